//! Linux Industrial I/O (IIO) sysfs adapter.
//!
//! The kernel exposes each sensor chip as a directory under
//! `/sys/bus/iio/devices` with a `name` file and one set of files per
//! channel. A channel is read either from its processed `<prefix>_input`
//! file or computed as `(raw + offset) * scale`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::{SensorAdapter, SensorError};

pub const DEFAULT_IIO_ROOT: &str = "/sys/bus/iio/devices";

const TEMPERATURE_CHANNEL: &str = "in_temp";
const PRESSURE_CHANNEL: &str = "in_pressure";
const HUMIDITY_CHANNEL: &str = "in_humidityrelative";

// IIO ABI units: milli degrees Celsius, kilopascal, milli percent.
const MILLI: f64 = 1000.0;
const MILLIBAR_PER_KILOPASCAL: f64 = 10.0;

/// Device names to look for, as reported by their `name` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IioDevices {
    /// Chip providing relative humidity and temperature.
    pub humidity: String,
    /// Chip providing barometric pressure.
    pub pressure: String,
}

impl Default for IioDevices {
    fn default() -> Self {
        Self {
            humidity: "hts221".to_string(),
            pressure: "lps25h".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IioSensor {
    humidity_device: PathBuf,
    pressure_device: PathBuf,
}

impl IioSensor {
    pub fn new(humidity_device: impl Into<PathBuf>, pressure_device: impl Into<PathBuf>) -> Self {
        Self {
            humidity_device: humidity_device.into(),
            pressure_device: pressure_device.into(),
        }
    }

    /// Scan `root` for the configured devices.
    pub fn discover(root: impl AsRef<Path>, devices: &IioDevices) -> Result<Self, SensorError> {
        let root = root.as_ref();
        let humidity_device = find_device(root, &devices.humidity)?;
        let pressure_device = find_device(root, &devices.pressure)?;
        debug!(
            humidity = %humidity_device.display(),
            pressure = %pressure_device.display(),
            "IIO devices found"
        );
        Ok(Self::new(humidity_device, pressure_device))
    }
}

impl SensorAdapter for IioSensor {
    fn read_temperature_celsius(&mut self) -> Result<f64, SensorError> {
        read_channel(&self.humidity_device, TEMPERATURE_CHANNEL).map(|v| v / MILLI)
    }

    fn read_pressure_millibar(&mut self) -> Result<f64, SensorError> {
        read_channel(&self.pressure_device, PRESSURE_CHANNEL).map(|v| v * MILLIBAR_PER_KILOPASCAL)
    }

    fn read_humidity_percent(&mut self) -> Result<f64, SensorError> {
        read_channel(&self.humidity_device, HUMIDITY_CHANNEL).map(|v| v / MILLI)
    }
}

fn find_device(root: &Path, name: &str) -> Result<PathBuf, SensorError> {
    let entries = fs::read_dir(root).map_err(|source| SensorError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let device = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                trace!("skipping entry in {}: {e}", root.display());
                continue;
            }
        };
        match fs::read_to_string(device.join("name")) {
            Ok(found) if found.trim() == name => return Ok(device),
            Ok(_) => {}
            Err(e) => trace!("skipping {}: {e}", device.display()),
        }
    }

    Err(SensorError::DeviceNotFound(name.to_string()))
}

fn read_channel(device: &Path, prefix: &str) -> Result<f64, SensorError> {
    let processed = device.join(format!("{prefix}_input"));
    if processed.exists() {
        return read_value(&processed);
    }

    let raw = read_value(&device.join(format!("{prefix}_raw")))?;
    let offset = read_optional(&device.join(format!("{prefix}_offset")))?.unwrap_or(0.0);
    let scale = read_optional(&device.join(format!("{prefix}_scale")))?.unwrap_or(1.0);

    Ok((raw + offset) * scale)
}

fn read_optional(path: &Path) -> Result<Option<f64>, SensorError> {
    if path.exists() {
        read_value(path).map(Some)
    } else {
        Ok(None)
    }
}

fn read_value(path: &Path) -> Result<f64, SensorError> {
    let contents = fs::read_to_string(path).map_err(|source| SensorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    contents.trim().parse().map_err(|_| SensorError::Parse {
        path: path.to_path_buf(),
        value: contents.trim().to_string(),
    })
}
