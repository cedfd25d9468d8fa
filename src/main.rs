//! Fake SOAP server
//!
//! Serves recorded SOAP responses one request at a time until interrupted.

use clap::Parser;
use fakesoap::cli::Args;
use fakesoap::common::logging;
use fakesoap::{Result, Server};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    logging::init();

    if let Err(e) = run(args).await {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(args: Args) -> Result<()> {
    let config = args.resolve()?;
    let server = Server::bind(config).await?;
    server.run().await
}
