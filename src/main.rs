use clap::Parser;
use std::process;

fn main() {
    let cli = chirper::cli::Cli::parse();
    if let Err(error) = cli.run() {
        eprintln!("{error:?}");
        process::exit(1);
    }
}
