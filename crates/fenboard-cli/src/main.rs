use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use fenboard::FenboardError;
use fenboard_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match fenboard_cli::run(&args) {
        Ok(()) => info!(output = args.output.as_str(); "Board written"),
        Err(err) => {
            print_reports(&err);
            process::exit(1);
        }
    }
}

/// Unknown level names fall back to `warn`.
fn init_logger(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level `{level}`, logging warnings only");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
    info!(level:% = filter; "fenboard starting");
}

fn print_reports(err: &FenboardError) {
    let handler = GraphicalReportHandler::new();
    for report in to_reportables(err) {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, &report) {
            Ok(()) => error!("{rendered}"),
            Err(_) => error!("{report}"),
        }
    }
}
