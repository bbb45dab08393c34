use std::sync::{Arc, Mutex};

use env_sensor::{SensorAdapter, SensorError, SensorReading};
use poem::{Endpoint, IntoResponse, Request, Response, http::Method};
use poem_openapi::payload::Json;
use tracing::{debug, error, warn};

use crate::error::StationError;

pub use reading_response::{ErrorBody, ReadingApiResponse, ReadingResponse};

mod reading_response;

/// Answers every GET, whatever the path, with a fresh sensor reading.
pub struct ReadingEndpoint<S> {
    sensor: Arc<Mutex<S>>,
}

impl<S> ReadingEndpoint<S>
where
    S: SensorAdapter,
{
    pub fn new(sensor: S) -> Self {
        Self {
            sensor: Arc::new(Mutex::new(sensor)),
        }
    }

    pub async fn current_reading(&self) -> Result<ReadingResponse, StationError> {
        let sensor = self.sensor.clone();
        let reading = tokio::task::spawn_blocking(move || read_sensor(&sensor)).await??;
        let response = ReadingResponse::from(reading);
        debug!(raw = %reading, ?response, "sensor read");
        Ok(response)
    }
}

impl<S> Endpoint for ReadingEndpoint<S>
where
    S: SensorAdapter,
{
    type Output = Response;

    async fn call(&self, req: Request) -> poem::Result<Self::Output> {
        if req.method() != Method::GET {
            warn!(method = %req.method(), uri = %req.uri(), "rejecting request");
            let body = ErrorBody::new(format!("unsupported method {}", req.method()));
            return Ok(ReadingApiResponse::NotImplemented(Json(body)).into_response());
        }

        let response = match self.current_reading().await {
            Ok(reading) => ReadingApiResponse::Ok(Json(reading)),
            Err(e) => {
                error!("Failed to read sensor: {e}");
                ReadingApiResponse::InternalServerError(Json(ErrorBody::new("sensor unavailable")))
            }
        };
        Ok(response.into_response())
    }
}

fn read_sensor<S>(sensor: &Mutex<S>) -> Result<SensorReading, SensorError>
where
    S: SensorAdapter,
{
    let mut sensor = sensor.lock().map_err(|_| SensorError::Poisoned)?;
    sensor.read()
}
