// Chamberlink - ESPEC and Watlow chamber controller communication tool
use chamberlink::cli::args::Args;
use chamberlink::cli::commands::execute_command;
use chamberlink::domain::error::ChamberError;
use chamberlink::infrastructure::logging::init_logging;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), ChamberError> {
    let args = Args::parse();

    if !args.quiet {
        if let Err(e) = init_logging(args.verbose) {
            eprintln!("Warning: failed to initialize logging: {}", e);
        }
    }

    match execute_command(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
