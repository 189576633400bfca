//! Built-in services registered by `AppState`.

pub mod status;

pub use status::StatusService;
