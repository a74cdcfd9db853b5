mod config;

mod app;
mod ctx;
mod db;
mod edit;
mod errors;
mod logging;
mod notes;
mod openapi;
mod reminders;
mod state;

use std::net::SocketAddr;

use aide::axum::ApiRouter;
use app::AppParams;
pub use config::config;
pub use db::{init_db, DB};
pub use errors::{Error, Result};
use state::AppState;
use tokio::net::TcpListener;

pub fn routes(state: AppState) -> ApiRouter {
    ApiRouter::new()
        .merge(notes::router(state.clone()))
        .merge(reminders::router(state.clone()))
        .merge(edit::router(state))
}

#[tokio::main]
async fn main() -> errors::Result<()> {
    let config = config::init_config().map_err(|e| Error::Unexpected(format!("invalid configuration: {e}")))?;

    logging::setup_tracing(config.log_json);

    let conn = init_db().await?;

    let (app, _api) = app::create(AppParams { db: conn, router: routes }).await?;

    let app = logging::add_tracing_layer(app);

    let listener = TcpListener::bind(format!("127.0.0.1:{}", config.port)).await?;

    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
