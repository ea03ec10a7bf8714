mod cli;
mod config;
mod logging;

use std::process;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::cli::{run_classify, Cli, Command, ServeArgs};
use crate::config::Config;

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve(args) => serve(args, config).await,
        Command::Classify(args) => run_classify(args, config).await,
    }
}

async fn serve(args: ServeArgs, mut config: Config) -> Result<()> {
    config.override_dataset(args.dataset);
    let Config {
        bind,
        dataset,
        allow_origin,
    } = config;
    let bind = args.bind.unwrap_or(bind);
    let allow_origin = args.allow_origin.unwrap_or(allow_origin);

    info!(%bind, %dataset, %allow_origin, "starting knn service");

    let source = web::Data::new(dataset);
    HttpServer::new(move || {
        App::new()
            .app_data(source.clone())
            .wrap(knnapi::server::cors_headers(&allow_origin))
            .wrap(Logger::default())
            .configure(knnapi::server::config)
    })
    .bind(bind.as_str())
    .with_context(|| format!("failed to bind {bind}"))?
    .run()
    .await?;

    Ok(())
}
