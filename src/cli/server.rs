use clap::Parser;
use error_stack::{Result, ResultExt};
use std::net::IpAddr;
use std::num::NonZeroUsize;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::Server as Config;
use crate::App;

#[derive(Debug, Error)]
#[error("Could not start the Chirper server")]
pub struct StartServerError;

/// Expose a Chirper API HTTP server
#[derive(Debug, Parser)]
pub struct ServerCommand {
    #[clap(long)]
    pub address: Option<IpAddr>,
    #[clap(long)]
    pub port: Option<u16>,
    #[clap(long)]
    pub workers: Option<NonZeroUsize>,
    /// Keeps every document in memory instead of MongoDB. Everything
    /// is lost once the server stops.
    #[clap(long)]
    pub in_memory: bool,
}

pub fn run(args: ServerCommand) -> Result<(), StartServerError> {
    let mut config = Config::load().change_context(StartServerError)?;
    args.override_config(&mut config);

    crate::logging::init(&config.logging).change_context(StartServerError)?;
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(config.workers)
        .build()
        .change_context(StartServerError)
        .attach_printable("could not build tokio runtime")?
        .block_on(serve(config, args.in_memory))
}

impl ServerCommand {
    fn override_config(&self, config: &mut Config) {
        // override server configurations if set by the cli
        if let Some(address) = self.address {
            config.ip = address;
        }

        if let Some(port) = self.port {
            config.port = port;
        }

        if let Some(workers) = self.workers {
            config.workers = workers.get();
        }
    }
}

#[tracing::instrument(skip_all, name = "server.run", fields(
    server.ip = %config.ip,
    server.port = %config.port,
    workers = %config.workers,
))]
async fn serve(config: Config, in_memory: bool) -> Result<(), StartServerError> {
    if cfg!(debug_assertions) {
        info!("Starting server with config: {config:#?}");
    } else {
        debug!("Starting server...");
    }

    let listener = TcpListener::bind((config.ip, config.port))
        .await
        .change_context(StartServerError)
        .attach_printable("could not bind server with address and port")?;

    let addr = listener
        .local_addr()
        .change_context(StartServerError)
        .attach_printable("could not get socket address of the server")?;

    let app = App::connect(config, in_memory)
        .await
        .change_context(StartServerError)?;

    let router = crate::routes::build_axum_router(app);
    info!("Chirper server is listening at http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(crate::util::shutdown_signal())
        .await
        .change_context(StartServerError)
        .attach_printable("server stopped unexpectedly")?;

    info!("Chirper server has been shut down");
    Ok(())
}
