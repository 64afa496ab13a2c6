use chrono::NaiveDateTime;
use dial::overlay::RevealTicket;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Tick(NaiveDateTime),
    Tap,
    Bluetooth(bool),
    Settings(Vec<(String, String)>),
    RevealExpired(RevealTicket),
    ConfigReload,
}
