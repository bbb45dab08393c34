use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("Error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unexpected value {value:?} in {path}")]
    Parse { path: PathBuf, value: String },
    #[error("Sensor reported {value} for {quantity}")]
    NonFinite { quantity: &'static str, value: f64 },
    #[error("No IIO device named {0}")]
    DeviceNotFound(String),
    #[error("Sensor lock poisoned by an earlier failed read")]
    Poisoned,
}
