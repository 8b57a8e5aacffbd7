//! `depwarn check`: scan documents against a schema.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use depwarn::{CollectedWarning, CollectingSink, DeprecationValidator, ValidationSummary};
use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};
use crate::input;

/// One line of `--output json`.
#[derive(Debug, Serialize)]
struct WarningLine<'a> {
    document: &'a str,
    #[serde(flatten)]
    warning: &'a CollectedWarning,
}

pub fn run(config: &CliConfig, schema: &Path, documents: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let schema = input::load_schema(schema)?;
    let validator = DeprecationValidator::new(CollectingSink::new()).with_policy(config.policy);

    let mut stdout = io::stdout().lock();
    let mut totals = ValidationSummary::default();
    let mut failed = 0_usize;

    for path in documents {
        let result = input::load_document(path).and_then(|document| {
            validator
                .validate_document(&schema, &document, &config.prefix)
                .with_context(|| format!("cannot scan {}", path.display()))
        });

        // Warnings found before a failure are still reported.
        let display = path.display().to_string();
        for warning in validator.sink().take() {
            write_warning(&mut stdout, config.output, &display, &warning)?;
        }

        match result {
            Ok(summary) => {
                totals.fields_inspected += summary.fields_inspected;
                totals.warnings_emitted += summary.warnings_emitted;
            }
            Err(err) => {
                failed += 1;
                eprintln!("error: {err:#}");
            }
        }
    }
    stdout.flush()?;

    eprintln!(
        "{} warning(s), {} field(s) inspected, {} of {} document(s) failed",
        totals.warnings_emitted,
        totals.fields_inspected,
        failed,
        documents.len()
    );
    tracing::debug!(?totals, failed, "check finished");

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn write_warning(
    out: &mut impl Write,
    format: OutputFormat,
    document: &str,
    warning: &CollectedWarning,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}: {}", warning.path, warning.message)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &WarningLine { document, warning })?;
            writeln!(out)?;
        }
    }
    Ok(())
}
