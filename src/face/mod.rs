pub mod model;
#[cfg(feature = "gui")]
pub mod view;

pub use model::{Face, Reaction};
#[cfg(feature = "gui")]
pub use view::draw;

/// Screen the face is laid out for; the renderer scales it to the window.
pub const REFERENCE_WIDTH: f64 = 144.0;
pub const REFERENCE_HEIGHT: f64 = 168.0;
