use accountd::application::service::AccountService;
use accountd::config::Settings;
use accountd::infrastructure::mongo::MongoAccountStore;
use accountd::interfaces::http;
use accountd::interfaces::http::handlers::AppState;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let store = MongoAccountStore::connect(&settings).await.into_diagnostic()?;
    let service = AccountService::new(Arc::new(store), settings.default_limit);
    let state = web::Data::new(AppState::new(service, settings.api_timeout()));

    info!(address = %settings.bind_address, "starting http server");
    HttpServer::new(move || App::new().app_data(state.clone()).configure(http::configure))
        .bind(settings.bind_address.as_str())
        .into_diagnostic()?
        .run()
        .await
        .into_diagnostic()?;

    info!("server stopped");
    Ok(())
}
