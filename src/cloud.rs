mod cloud_protocol;
mod config;
mod diagnostics;
mod request_type;
pub mod schema;

pub use cloud_protocol::{CloudProtocol, OnEvent};
pub use config::CloudConfig;
pub use diagnostics::{DiagnosticValue, DiagnosticsProvider};
pub use request_type::RequestType;
