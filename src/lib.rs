pub mod config;
pub mod events;
pub mod face;
pub mod sys;

#[cfg(feature = "gui")]
pub mod gui;
