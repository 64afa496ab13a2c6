pub mod headless;
pub mod runtime;
pub mod server;
pub mod store;
pub mod ticker;
