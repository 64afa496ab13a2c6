use crate::clock::WallClock;
use crate::prefs::Preferences;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Vibe {
    /// Top of the hour.
    Short,
    /// Bluetooth connection lost.
    Double,
}

impl Vibe {
    /// Alternating on/off segments, starting with on.
    pub fn pattern(&self) -> &'static [Duration] {
        const SHORT: [Duration; 1] = [Duration::from_millis(200)];
        const DOUBLE: [Duration; 3] = [
            Duration::from_millis(100),
            Duration::from_millis(100),
            Duration::from_millis(100),
        ];
        match self {
            Self::Short => &SHORT,
            Self::Double => &DOUBLE,
        }
    }
}

/// Hourly pulse. `previous` is the clock of the last handled tick so a
/// repeated tick within the same minute stays quiet.
pub fn hourly(previous: Option<WallClock>, now: WallClock, prefs: &Preferences) -> Option<Vibe> {
    let fresh = previous != Some(now);
    (prefs.vibrate && fresh && now.minute() == 0 && prefs.vibe_window.contains(now.hour24()))
        .then_some(Vibe::Short)
}

/// Pulse on a connected -> disconnected transition.
pub fn bluetooth(was_connected: bool, connected: bool, prefs: &Preferences) -> Option<Vibe> {
    (prefs.bluetooth_alert && was_connected && !connected).then_some(Vibe::Double)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::HourWindow;

    fn clock(h: u32, m: u32) -> WallClock {
        WallClock::new(h, m).unwrap()
    }

    fn vibrating(start: u32, end: u32) -> Preferences {
        Preferences {
            vibrate: true,
            vibe_window: HourWindow { start, end },
            ..Preferences::default()
        }
    }

    #[test]
    fn test_hourly() {
        let prefs = vibrating(8, 22);
        let cases = vec![
            (Some(clock(8, 59)), clock(9, 0), Some(Vibe::Short)),
            (None, clock(9, 0), Some(Vibe::Short)),
            (Some(clock(9, 0)), clock(9, 0), None),
            (Some(clock(9, 0)), clock(9, 1), None),
            (Some(clock(22, 59)), clock(23, 0), None),
            (Some(clock(6, 59)), clock(7, 0), None),
        ];

        for (previous, now, expected) in cases {
            assert_eq!(hourly(previous, now, &prefs), expected, "{now}");
        }
    }

    #[test]
    fn test_hourly_respects_switch_and_wrapping_window() {
        let night = vibrating(22, 2);
        assert_eq!(hourly(None, clock(0, 0), &night), Some(Vibe::Short));
        assert_eq!(hourly(None, clock(12, 0), &night), None);

        let off = Preferences::default();
        assert_eq!(hourly(None, clock(12, 0), &off), None);
    }

    #[test]
    fn test_bluetooth() {
        let prefs = Preferences::default();
        assert_eq!(bluetooth(true, false, &prefs), Some(Vibe::Double));
        assert_eq!(bluetooth(false, false, &prefs), None);
        assert_eq!(bluetooth(false, true, &prefs), None);

        let quiet = Preferences {
            bluetooth_alert: false,
            ..Preferences::default()
        };
        assert_eq!(bluetooth(true, false, &quiet), None);
    }

    #[test]
    fn test_patterns_start_with_a_pulse() {
        assert_eq!(Vibe::Short.pattern().len(), 1);
        assert_eq!(Vibe::Double.pattern().len() % 2, 1);
    }
}
