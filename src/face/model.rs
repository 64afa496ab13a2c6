use crate::config::{self, Config};
use crate::events::AppEvent;
use chrono::NaiveDateTime;
use dial::alerts::{self, Vibe};
use dial::overlay::{OverlayText, RevealOverlay, RevealTicket};
use dial::prefs::DateOverlayMode;
use dial::store::Store;
use dial::{FaceGeometry, Preferences, WallClock};
use std::time::Duration;

/// All mutable state of a running face. Owned by exactly one host loop, which
/// feeds it [`AppEvent`]s and acts on the returned [`Reaction`].
pub struct Face<S: Store> {
    prefs: Preferences,
    geometry: FaceGeometry,
    overlay: RevealOverlay,
    now: NaiveDateTime,
    last_clock: Option<WallClock>,
    bluetooth_connected: bool,
    reveal_after: Duration,
    store: S,
}

impl<S: Store> Face<S> {
    /// Restores preferences from `store`. The current minute counts as
    /// already seen, so starting up at the top of the hour stays quiet.
    pub fn new(store: S, config: &Config, now: NaiveDateTime) -> Self {
        let prefs = Preferences::load(&store, config.layout());
        let clock = WallClock::from_time(&now);

        Self {
            geometry: FaceGeometry::compute(&clock, &prefs.display),
            prefs,
            overlay: RevealOverlay::default(),
            now,
            last_clock: Some(clock),
            bluetooth_connected: true,
            reveal_after: config.reveal_after(),
            store,
        }
    }

    pub fn handle(&mut self, event: AppEvent) -> Reaction {
        match event {
            AppEvent::Tick(now) => self.tick(now),
            AppEvent::Tap => self.tap(),
            AppEvent::Bluetooth(connected) => self.bluetooth(connected),
            AppEvent::Settings(pairs) => self.apply_settings(pairs),
            AppEvent::RevealExpired(ticket) => self.expire(ticket),
            AppEvent::ConfigReload => {
                log::info!("Config changed, reloading layout");
                self.relayout(&config::load_or_default())
            }
        }
    }

    fn tick(&mut self, now: NaiveDateTime) -> Reaction {
        let clock = WallClock::from_time(&now);
        let vibe = alerts::hourly(self.last_clock, clock, &self.prefs);
        let changed = self.last_clock != Some(clock) || self.now.date() != now.date();

        self.now = now;
        self.last_clock = Some(clock);
        if changed {
            self.recompute();
        }

        Reaction {
            should_redraw: changed,
            vibe,
            hide_after: None,
        }
    }

    fn tap(&mut self) -> Reaction {
        if self.prefs.date_overlay != DateOverlayMode::TapToReveal {
            return Reaction::default();
        }

        let ticket = self.overlay.reveal();
        Reaction {
            should_redraw: true,
            vibe: None,
            hide_after: Some((self.reveal_after, ticket)),
        }
    }

    fn bluetooth(&mut self, connected: bool) -> Reaction {
        let vibe = alerts::bluetooth(self.bluetooth_connected, connected, &self.prefs);
        if self.bluetooth_connected != connected {
            log::info!(
                "Bluetooth {}",
                if connected { "connected" } else { "disconnected" }
            );
        }
        self.bluetooth_connected = connected;

        Reaction {
            vibe,
            ..Reaction::default()
        }
    }

    fn apply_settings(&mut self, pairs: Vec<(String, String)>) -> Reaction {
        let applied = self.prefs.apply_settings(pairs);

        for key in &applied.changed {
            if let Err(e) = self.prefs.persist(*key, &mut self.store) {
                log::error!("Failed to persist {}: {}", key, e);
            }
        }

        if self.prefs.date_overlay != DateOverlayMode::TapToReveal {
            self.overlay.hide();
        }

        let changed = !applied.changed.is_empty();
        if changed {
            self.recompute();
        }

        Reaction {
            should_redraw: changed,
            ..Reaction::default()
        }
    }

    fn expire(&mut self, ticket: RevealTicket) -> Reaction {
        Reaction {
            should_redraw: self.overlay.expire(ticket),
            ..Reaction::default()
        }
    }

    /// Takes the layout fields of a (re)loaded host config. The hour
    /// notation stays a user preference.
    pub fn relayout(&mut self, config: &Config) -> Reaction {
        let display = self.prefs.display.with_layout(&config.layout());
        let changed = display != self.prefs.display;

        self.prefs.display = display;
        self.reveal_after = config.reveal_after();
        if changed {
            self.recompute();
        }

        Reaction {
            should_redraw: changed,
            ..Reaction::default()
        }
    }

    fn recompute(&mut self) {
        self.geometry = FaceGeometry::compute(&self.clock(), &self.prefs.display);
    }

    pub fn clock(&self) -> WallClock {
        WallClock::from_time(&self.now)
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }

    /// Date and digital time, when the overlay is currently shown.
    pub fn overlay_text(&self) -> Option<OverlayText> {
        self.overlay
            .is_visible(self.prefs.date_overlay)
            .then(|| OverlayText::new(self.now.date(), &self.clock(), self.prefs.display.use_24h))
    }

    pub fn bluetooth_connected(&self) -> bool {
        self.bluetooth_connected
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// What the host has to do after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reaction {
    pub should_redraw: bool,
    pub vibe: Option<Vibe>,
    /// Schedule an [`AppEvent::RevealExpired`] with this ticket.
    pub hide_after: Option<(Duration, RevealTicket)>,
}
