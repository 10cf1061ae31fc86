//! CLI entry point: analyze a CSV of transaction records and print the
//! resulting fraud report as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use fraud_ring_analyzer::{analyze, ingest};

fn main() -> ExitCode {
    env_logger::init();

    let path = match std::env::args().nth(1) {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("usage: fraud_report <transactions.csv>");
            return ExitCode::FAILURE;
        }
    };

    let records = match ingest::load_records(&path) {
        Ok(records) => records,
        Err(e) => {
            log::error!("failed to load {}: {e}", path.display());
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = analyze(records);
    match report.to_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to serialize report: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
