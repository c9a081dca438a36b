//! Command-line entry point: run one extraction attempt against a backend
//! and print the narrated progress followed by the projected table.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use form_extract_client::{
    project_table, AttemptOutcome, CancelToken, DocumentTable, ExtractionRunner, HttpBackend,
    NarratorEvent, RunnerConfig,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(file) = args.next() else {
        eprintln!("Usage: form-extract-client <file> [backend-url]");
        return ExitCode::from(2);
    };
    let backend = match args.next() {
        Some(url) => HttpBackend::new(&url, 30),
        None => HttpBackend::default_local(),
    };

    let mut runner = ExtractionRunner::new(backend, RunnerConfig::default());
    let sink = |event: NarratorEvent| {
        if let NarratorEvent::MessageAppended { message } = event {
            println!("[{}] {}", message.timestamp.format("%H:%M:%S"), message.text);
        }
    };

    let report = runner
        .run_file(&PathBuf::from(&file), Some(&sink), &CancelToken::new())
        .await;

    match report.outcome {
        AttemptOutcome::Success(result) => {
            match project_table(&result) {
                Some(table) => print_table(&table),
                None => println!("{:#}", result.payload()),
            }
            ExitCode::SUCCESS
        }
        AttemptOutcome::EmptyFailure | AttemptOutcome::Error(_) | AttemptOutcome::Cancelled => {
            ExitCode::FAILURE
        }
    }
}

fn print_table(table: &DocumentTable) {
    if !table.doc_type.is_empty() {
        println!("\n{}", table.doc_type.to_uppercase());
    }
    let mut header = vec!["Page #".to_string()];
    header.extend(table.ordered_columns.iter().cloned());
    println!("{}", header.join(" | "));

    for row in &table.rows {
        let mut cells = vec![row.label.to_string()];
        for column in &table.ordered_columns {
            cells.push(row.cells.get(column).cloned().unwrap_or_default());
        }
        println!("{}", cells.join(" | "));
    }
}
