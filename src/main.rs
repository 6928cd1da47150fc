use clap::Parser;
use log::{debug, error};

mod args;
mod insights;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    debug!("args: {:?}", args);

    if let Err(e) = insights::run_survey(&args) {
        error!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        // JSON views still emit a document on failure.
        if let Some(payload) = insights::error_payload(args.view.as_deref()) {
            println!("{}", payload);
        }
        std::process::exit(1);
    }
}
