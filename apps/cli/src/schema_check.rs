//! `depwarn schema-check`: report malformed deprecation markers.

use std::path::Path;
use std::process::ExitCode;

use crate::input;

pub fn run(schema: &Path) -> anyhow::Result<ExitCode> {
    let problems = input::load_schema(schema)?.check_annotations();

    for (path, error) in &problems {
        println!("{path}: {error}");
    }

    if problems.is_empty() {
        eprintln!("{}: ok", schema.display());
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{}: {} malformed annotation(s)",
            schema.display(),
            problems.len()
        );
        Ok(ExitCode::FAILURE)
    }
}
