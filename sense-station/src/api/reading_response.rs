use env_sensor::SensorReading;
use poem_openapi::{ApiResponse, Object, payload::Json};

/// What a client sees for one reading.
#[derive(Debug, Clone, PartialEq, Object)]
pub struct ReadingResponse {
    /// Fahrenheit, two decimals.
    pub temperature: f64,
    /// Millibar.
    pub pressure: i64,
    /// Percent relative humidity.
    pub humidity: i64,
}

impl From<SensorReading> for ReadingResponse {
    fn from(value: SensorReading) -> Self {
        let celsius = round_whole(value.temperature_celsius);
        Self {
            temperature: round_hundredths(celsius_to_fahrenheit(celsius)),
            pressure: round_whole(value.pressure_millibar) as i64,
            humidity: round_whole(value.humidity_percent) as i64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Object)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, ApiResponse)]
pub enum ReadingApiResponse {
    #[oai(status = 200)]
    Ok(Json<ReadingResponse>),
    #[oai(status = 500)]
    InternalServerError(Json<ErrorBody>),
    #[oai(status = 501)]
    NotImplemented(Json<ErrorBody>),
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    9.0 / 5.0 * celsius + 32.0
}

// Ties go to the even neighbour everywhere.
fn round_whole(value: f64) -> f64 {
    value.round_ties_even()
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature_celsius: f64, pressure_millibar: f64, humidity_percent: f64) -> SensorReading {
        SensorReading {
            temperature_celsius,
            pressure_millibar,
            humidity_percent,
        }
    }

    #[test]
    fn fahrenheit_reference_points() {
        assert_eq!(ReadingResponse::from(reading(20.0, 1000.0, 50.0)).temperature, 68.0);
        assert_eq!(ReadingResponse::from(reading(0.0, 1000.0, 50.0)).temperature, 32.0);
        assert_eq!(ReadingResponse::from(reading(100.0, 1000.0, 50.0)).temperature, 212.0);
    }

    #[test]
    fn celsius_is_rounded_before_conversion() {
        // 22.4 -> 22 -> 71.6, not 72.32
        assert_eq!(ReadingResponse::from(reading(22.4, 1000.0, 50.0)).temperature, 71.6);
        assert_eq!(ReadingResponse::from(reading(-3.7, 1000.0, 50.0)).temperature, 24.8);
    }

    #[test]
    fn pressure_rounds_to_nearest() {
        assert_eq!(ReadingResponse::from(reading(20.0, 1013.4, 50.0)).pressure, 1013);
        assert_eq!(ReadingResponse::from(reading(20.0, 1013.6, 50.0)).pressure, 1014);
    }

    #[test]
    fn ties_round_to_even() {
        let response = ReadingResponse::from(reading(20.5, 1012.5, 46.5));

        assert_eq!(response.temperature, 68.0);
        assert_eq!(response.pressure, 1012);
        assert_eq!(response.humidity, 46);

        let response = ReadingResponse::from(reading(21.5, 1013.5, 47.5));

        assert_eq!(response.temperature, 71.6);
        assert_eq!(response.pressure, 1014);
        assert_eq!(response.humidity, 48);
    }

    #[test]
    fn temperature_has_at_most_two_decimals() {
        for celsius in -40..=60 {
            let response = ReadingResponse::from(reading(celsius as f64 + 0.3, 1000.0, 50.0));
            let hundredths = response.temperature * 100.0;
            assert!((hundredths - hundredths.round()).abs() < 1e-6, "{}", response.temperature);
        }
    }

    #[test]
    fn reference_scenario() {
        let response = ReadingResponse::from(reading(22.4, 1012.9, 47.2));

        assert_eq!(
            response,
            ReadingResponse {
                temperature: 71.6,
                pressure: 1013,
                humidity: 47,
            }
        );
    }
}
