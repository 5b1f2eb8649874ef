//! swift-hmac library API
//!
//! Stamps a SWIFT message file with an HMAC-SHA256 `{S:{MDG:...}}` trailer.
//! The binary interface is in main.rs; the modules are exposed for tests
//! and fuzzing.

pub mod commands;
pub mod error;
pub mod format;
pub mod ini;
pub mod journal;
pub mod mac;
pub mod relocate;
pub mod securemem;
pub mod settings;

// Re-export commonly used types for convenience
pub use error::Error;
pub use ini::Ini;
pub use journal::Journal;
pub use settings::Settings;
