//! Infrastructure adapters: the HTTP content provider and telemetry.

pub mod http;
pub mod provider;
pub mod telemetry;
