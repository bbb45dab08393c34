use env_sensor::{FixedSensor, IioSensor, SensorAdapter};

use crate::config::SensorSettings;
use crate::error::StationError;

pub mod api;
pub mod config;
pub mod error;
pub mod telemetry;

pub use api::ReadingEndpoint;

/// Build the adapter described by the settings. IIO devices are looked up
/// once here and reused for every request.
pub fn build_sensor(settings: &SensorSettings) -> Result<Box<dyn SensorAdapter>, StationError> {
    let sensor: Box<dyn SensorAdapter> = match settings {
        SensorSettings::Iio { root, devices } => Box::new(IioSensor::discover(root, devices)?),
        SensorSettings::Fixed(reading) => Box::new(FixedSensor::new(*reading)),
    };
    Ok(sensor)
}
