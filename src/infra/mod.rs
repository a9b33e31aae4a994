//! Infrastructure adapters: the ContentAPI client, durable preferences, and
//! telemetry bootstrap.

pub mod api;
pub mod error;
pub mod prefs;
pub mod sources;
pub mod telemetry;
