use crate::{SensorAdapter, SensorError, SensorReading};

/// Reports the same reading on every query. Useful when no hardware is
/// attached.
#[derive(Debug, Clone)]
pub struct FixedSensor {
    reading: SensorReading,
}

impl FixedSensor {
    pub fn new(reading: SensorReading) -> Self {
        Self { reading }
    }
}

impl SensorAdapter for FixedSensor {
    fn read_temperature_celsius(&mut self) -> Result<f64, SensorError> {
        Ok(self.reading.temperature_celsius)
    }

    fn read_pressure_millibar(&mut self) -> Result<f64, SensorError> {
        Ok(self.reading.pressure_millibar)
    }

    fn read_humidity_percent(&mut self) -> Result<f64, SensorError> {
        Ok(self.reading.humidity_percent)
    }
}
