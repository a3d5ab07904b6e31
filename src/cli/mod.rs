use clap::Parser;
use error_stack::Result;

mod server;

pub use self::server::StartServerError;

/// Chirper, a small social network backend.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

impl Cli {
    pub fn run(self) -> Result<(), StartServerError> {
        match self.subcommand {
            Subcommand::Server(command) => self::server::run(command),
        }
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Runs the HTTP API server
    Server(self::server::ServerCommand),
}
