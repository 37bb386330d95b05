use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use bp_reader_lib::config::{self, OcrConfig};
use bp_reader_lib::models::BloodPressureLevel;
use bp_reader_lib::pipeline::extraction::confidence::needs_confirmation;
use bp_reader_lib::{extract_bytes, BloodPressureCandidate};
use tracing_subscriber::EnvFilter;

/// Reads OCR text from the file given as the first argument (or stdin) and
/// prints the extracted reading as JSON.
///
/// Exit codes: 0 reading found, 1 no reading, 2 input error.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);

    // Text arrives already recognized; an unusable engine setting is only worth a warning.
    let ocr_config = OcrConfig::from_env();
    if let Err(e) = ocr_config.ensure_configured() {
        tracing::warn!(engine = %ocr_config.engine, error = %e, "OCR engine not ready");
    }

    let input = match std::env::args().nth(1) {
        Some(path) => read_file(Path::new(&path)),
        None => read_stdin(),
    };
    let bytes = match input {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Cannot read OCR text");
            return ExitCode::from(2);
        }
    };

    match extract_bytes(&bytes) {
        Ok(Some(candidate)) => {
            report(&candidate);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("null");
            tracing::info!("No blood pressure values found; enter the reading manually");
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!(error = %e, "Rejected input");
            ExitCode::from(2)
        }
    }
}

fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    std::fs::read(path)
}

fn read_stdin() -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

fn report(candidate: &BloodPressureCandidate) {
    match serde_json::to_string_pretty(candidate) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "Cannot serialize reading"),
    }

    if needs_confirmation(candidate.confidence) {
        tracing::info!(
            confidence = candidate.confidence,
            "Low confidence, check the values before saving"
        );
    }
    if let Some(diastolic) = candidate.diastolic() {
        let level = BloodPressureLevel::classify(candidate.systolic(), diastolic);
        tracing::info!(level = level.as_str(), "{}", level.label());
    }
}
