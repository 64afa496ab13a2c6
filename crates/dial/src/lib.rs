//! Clock-face geometry and preferences for the macroclock watch face.
//!
//! Everything in here is a plain function of its inputs. Hosts own the state
//! (`Preferences`, `RevealOverlay`, a `Store`) and pass it in.

pub mod alerts;
pub mod clock;
pub mod color;
pub mod geometry;
pub mod labels;
#[cfg(test)]
mod log_capture;
pub mod macros;
pub mod overlay;
pub mod prefs;
pub mod settings;
pub mod store;

pub use clock::WallClock;
pub use geometry::{DisplayConfig, FaceGeometry, Point, Size};
pub use prefs::Preferences;
