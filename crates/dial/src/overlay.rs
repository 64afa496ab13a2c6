//! The date/digital-time overlay and its tap-to-reveal timer.

use crate::clock::WallClock;
use crate::labels::to_twelve_hour;
use crate::prefs::DateOverlayMode;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Identifies one reveal. Only the most recent ticket can hide the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RevealTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct RevealOverlay {
    revealed: bool,
    generation: u64,
}

impl RevealOverlay {
    /// Shows the overlay. Any earlier ticket is superseded, so a second tap
    /// restarts the countdown.
    pub fn reveal(&mut self) -> RevealTicket {
        self.generation += 1;
        self.revealed = true;
        RevealTicket(self.generation)
    }

    /// Hides the overlay if `ticket` is still current. Returns whether
    /// anything changed; calling it again is harmless.
    pub fn expire(&mut self, ticket: RevealTicket) -> bool {
        if !self.revealed || ticket.0 != self.generation {
            return false;
        }
        self.revealed = false;
        true
    }

    pub fn hide(&mut self) {
        self.revealed = false;
    }

    pub fn is_visible(&self, mode: DateOverlayMode) -> bool {
        match mode {
            DateOverlayMode::Off => false,
            DateOverlayMode::TapToReveal => self.revealed,
            DateOverlayMode::AlwaysOn => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayText {
    pub date: String,
    pub time: String,
}

impl OverlayText {
    pub fn new(date: NaiveDate, clock: &WallClock, use_24h: bool) -> Self {
        let time = if use_24h {
            format!("{:02}:{:02}", clock.hour24(), clock.minute())
        } else {
            format!("{}:{:02}", to_twelve_hour(clock.hour24()), clock.minute())
        };
        Self {
            date: format!("{} {:02}", date.weekday(), date.day()),
            time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_then_expire() {
        let mut overlay = RevealOverlay::default();
        assert!(!overlay.is_visible(DateOverlayMode::TapToReveal));

        let ticket = overlay.reveal();
        assert!(overlay.is_visible(DateOverlayMode::TapToReveal));
        assert!(overlay.expire(ticket));
        assert!(!overlay.is_visible(DateOverlayMode::TapToReveal));
        assert!(!overlay.expire(ticket));
    }

    #[test]
    fn test_superseded_ticket_does_not_hide() {
        let mut overlay = RevealOverlay::default();
        let first = overlay.reveal();
        let second = overlay.reveal();

        assert!(!overlay.expire(first));
        assert!(overlay.is_visible(DateOverlayMode::TapToReveal));
        assert!(overlay.expire(second));
    }

    #[test]
    fn test_mode_overrides_reveal_state() {
        let mut overlay = RevealOverlay::default();
        assert!(overlay.is_visible(DateOverlayMode::AlwaysOn));
        overlay.reveal();
        assert!(!overlay.is_visible(DateOverlayMode::Off));
    }

    #[test]
    fn test_overlay_text() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let clock = WallClock::new(14, 5).unwrap();

        let twelve = OverlayText::new(date, &clock, false);
        assert_eq!(twelve.date, "Fri 16");
        assert_eq!(twelve.time, "2:05");

        let twenty_four = OverlayText::new(date, &clock, true);
        assert_eq!(twenty_four.time, "14:05");
    }
}
