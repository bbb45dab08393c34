//! Environmental sensor adapters.
//!
//! A [`SensorAdapter`] hands out raw temperature, pressure and humidity
//! values. The station only ever talks to the trait, so the hardware
//! backend can be swapped for a [`FixedSensor`] on a bench or in tests.

pub mod error;
pub mod fixed;
pub mod iio;

pub use error::SensorError;
pub use fixed::FixedSensor;
pub use iio::{IioDevices, IioSensor};

/// One snapshot of the three raw sensor values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub temperature_celsius: f64,
    pub pressure_millibar: f64,
    pub humidity_percent: f64,
}

impl std::fmt::Display for SensorReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "temperature: {}C, pressure: {}mb, humidity: {}%",
            self.temperature_celsius, self.pressure_millibar, self.humidity_percent
        )
    }
}

pub trait SensorAdapter: Send + 'static {
    fn read_temperature_celsius(&mut self) -> Result<f64, SensorError>;

    fn read_pressure_millibar(&mut self) -> Result<f64, SensorError>;

    fn read_humidity_percent(&mut self) -> Result<f64, SensorError>;

    /// Query all three values, temperature first. The first failing read
    /// aborts the snapshot, and a NaN or infinite value counts as a failure.
    fn read(&mut self) -> Result<SensorReading, SensorError> {
        Ok(SensorReading {
            temperature_celsius: finite("temperature", self.read_temperature_celsius()?)?,
            pressure_millibar: finite("pressure", self.read_pressure_millibar()?)?,
            humidity_percent: finite("humidity", self.read_humidity_percent()?)?,
        })
    }
}

fn finite(quantity: &'static str, value: f64) -> Result<f64, SensorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SensorError::NonFinite { quantity, value })
    }
}

impl<S> SensorAdapter for Box<S>
where
    S: SensorAdapter + ?Sized,
{
    fn read_temperature_celsius(&mut self) -> Result<f64, SensorError> {
        (**self).read_temperature_celsius()
    }

    fn read_pressure_millibar(&mut self) -> Result<f64, SensorError> {
        (**self).read_pressure_millibar()
    }

    fn read_humidity_percent(&mut self) -> Result<f64, SensorError> {
        (**self).read_humidity_percent()
    }

    fn read(&mut self) -> Result<SensorReading, SensorError> {
        (**self).read()
    }
}
