pub mod league;
pub mod secret;
pub mod telemetry;
