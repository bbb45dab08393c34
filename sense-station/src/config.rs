use std::env::VarError;
use std::path::PathBuf;
use std::str::FromStr;

use env_sensor::{IioDevices, SensorReading, iio::DEFAULT_IIO_ROOT};

use crate::error::StationError;

const ADDRESS: &str = "SENSE_STATION_ADDRESS";
const PORT: &str = "SENSE_STATION_PORT";
const SENSOR: &str = "SENSE_STATION_SENSOR";
const IIO_ROOT: &str = "SENSE_STATION_IIO_ROOT";
const IIO_HUMIDITY_DEVICE: &str = "SENSE_STATION_IIO_HUMIDITY_DEVICE";
const IIO_PRESSURE_DEVICE: &str = "SENSE_STATION_IIO_PRESSURE_DEVICE";
const FIXED_TEMPERATURE: &str = "SENSE_STATION_FIXED_TEMPERATURE";
const FIXED_PRESSURE: &str = "SENSE_STATION_FIXED_PRESSURE";
const FIXED_HUMIDITY: &str = "SENSE_STATION_FIXED_HUMIDITY";
const LOG_DIR: &str = "SENSE_STATION_LOG_DIR";

/// Which adapter backs the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorSettings {
    Iio { root: PathBuf, devices: IioDevices },
    Fixed(SensorReading),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub address: String,
    pub port: u16,
    pub sensor: SensorSettings,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Read settings from the process environment, after loading `.env` if
    /// there is one.
    pub fn from_env() -> Result<Self, StationError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| dotenvy::var(key))
    }

    pub fn from_source<F>(source: F) -> Result<Self, StationError>
    where
        F: Fn(&str) -> Result<String, dotenvy::Error>,
    {
        let lookup = Lookup(source);

        let sensor = match lookup.or(SENSOR, "iio")?.as_str() {
            "iio" => SensorSettings::Iio {
                root: lookup.or(IIO_ROOT, DEFAULT_IIO_ROOT)?.into(),
                devices: IioDevices {
                    humidity: lookup.or(IIO_HUMIDITY_DEVICE, "hts221")?,
                    pressure: lookup.or(IIO_PRESSURE_DEVICE, "lps25h")?,
                },
            },
            "fixed" => SensorSettings::Fixed(SensorReading {
                temperature_celsius: lookup.parsed(FIXED_TEMPERATURE, 15.0)?,
                pressure_millibar: lookup.parsed(FIXED_PRESSURE, 1013.25)?,
                humidity_percent: lookup.parsed(FIXED_HUMIDITY, 50.0)?,
            }),
            other => {
                return Err(StationError::InvalidConfig(format!(
                    "{SENSOR} must be `iio` or `fixed`, got `{other}`"
                )));
            }
        };

        Ok(Self {
            address: lookup.or(ADDRESS, "0.0.0.0")?,
            port: lookup.parsed(PORT, 8000)?,
            sensor,
            log_dir: lookup.optional(LOG_DIR)?.map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Result<String, dotenvy::Error>,
{
    fn optional(&self, key: &str) -> Result<Option<String>, StationError> {
        match (self.0)(key) {
            Ok(value) => Ok(Some(value)),
            Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn or(&self, key: &str, default: &str) -> Result<String, StationError> {
        Ok(self.optional(key)?.unwrap_or_else(|| default.to_string()))
    }

    fn parsed<T>(&self, key: &str, default: T) -> Result<T, StationError>
    where
        T: FromStr,
    {
        match self.optional(key)? {
            Some(value) => value.trim().parse().map_err(|_| {
                StationError::InvalidConfig(format!("{key} has an invalid value `{value}`"))
            }),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, StationError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_source(|key| {
            vars.get(key)
                .cloned()
                .ok_or(dotenvy::Error::EnvVar(VarError::NotPresent))
        })
    }

    #[test]
    fn defaults_match_the_sense_hat_server() {
        let settings = settings(&[]).unwrap();

        assert_eq!(settings.bind_addr(), "0.0.0.0:8000");
        assert_eq!(
            settings.sensor,
            SensorSettings::Iio {
                root: PathBuf::from("/sys/bus/iio/devices"),
                devices: IioDevices::default(),
            }
        );
        assert_eq!(settings.log_dir, None);
    }

    #[test]
    fn fixed_sensor_values_are_read() {
        let settings = settings(&[
            (SENSOR, "fixed"),
            (FIXED_TEMPERATURE, "22.4"),
            (FIXED_HUMIDITY, " 47.2 "),
            (PORT, "9000"),
            (LOG_DIR, "/var/log/sense-station"),
        ])
        .unwrap();

        assert_eq!(settings.port, 9000);
        assert_eq!(
            settings.sensor,
            SensorSettings::Fixed(SensorReading {
                temperature_celsius: 22.4,
                pressure_millibar: 1013.25,
                humidity_percent: 47.2,
            })
        );
        assert_eq!(settings.log_dir, Some(PathBuf::from("/var/log/sense-station")));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = settings(&[(PORT, "eighty")]).unwrap_err();

        assert!(matches!(err, StationError::InvalidConfig(msg) if msg.contains(PORT)));
    }

    #[test]
    fn unknown_sensor_kind_is_rejected() {
        let err = settings(&[(SENSOR, "bme280")]).unwrap_err();

        assert!(matches!(err, StationError::InvalidConfig(_)));
    }
}
