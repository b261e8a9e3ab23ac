//! # Rentdesk Console Entry Point
//!
//! All logic lives in the library so tests can drive it.

use std::process::ExitCode;

use clap::Parser;
use rentdesk_console::{init_tracing, run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json {
                match serde_json::to_string(&err) {
                    Ok(body) => println!("{}", body),
                    Err(_) => eprintln!("{}", err),
                }
            } else {
                eprintln!("{}", err);
            }
            ExitCode::FAILURE
        }
    }
}
