use env_sensor::SensorError;

#[derive(Debug, thiserror::Error)]
pub enum StationError {
    #[error("Error serving HTTP: {0}")]
    Network(#[from] std::io::Error),
    #[error("Config parsing error: {0}")]
    Config(#[from] dotenvy::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),
    #[error("Telemetry setup error: {0}")]
    Telemetry(String),
    #[error("Threading error: {0}")]
    Threading(#[from] tokio::task::JoinError),
}
