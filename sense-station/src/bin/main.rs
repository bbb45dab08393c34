use poem::{EndpointExt, Server, listener::TcpListener, middleware::Tracing};
use sense_station::{ReadingEndpoint, build_sensor, config::Settings, error::StationError, telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), StationError> {
    let settings = Settings::from_env()?;
    let _guard = telemetry::init("sense-station", settings.log_dir.as_deref())?;

    let sensor = build_sensor(&settings.sensor)?;
    let app = ReadingEndpoint::new(sensor).with(Tracing);

    let bind_addr = settings.bind_addr();
    info!("Starting server at http://{bind_addr}");
    Server::new(TcpListener::bind(bind_addr))
        .run_with_graceful_shutdown(
            app,
            async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => info!("Shutdown requested"),
                    Err(e) => {
                        error!("Failed to listen for ctrl_c. Error: {e}");
                        std::future::pending::<()>().await;
                    }
                }
            },
            None,
        )
        .await?;
    Ok(())
}
