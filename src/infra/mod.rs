pub mod http;
pub mod settings;
pub mod telemetry;
pub mod wire;
