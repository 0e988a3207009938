//! `crecon inspect` and `crecon suggest`: look at input files before a run.

use std::path::PathBuf;

use contrecon_core::{all_sheet_keys, sheet_key, FileData};
use contrecon_io::{load_batch, BatchLoad};
use contrecon_recon::mapper::{classify_header, map_headers, union_headers};
use serde::Serialize;

use crate::exit_codes::{parse_exit_code, EXIT_INGEST, EXIT_IO, EXIT_USAGE};
use crate::CliError;

// ── Inspect ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SheetInfo {
    key: String,
    name: String,
    header_row: Option<usize>,
    double_header: bool,
    headers: Vec<String>,
    records: usize,
}

#[derive(Debug, Serialize)]
struct FileInfo {
    file: String,
    sheets: Vec<SheetInfo>,
}

fn describe(file: &FileData) -> FileInfo {
    FileInfo {
        file: file.file_name.clone(),
        sheets: file
            .sheets
            .iter()
            .map(|s| SheetInfo {
                key: sheet_key(&file.file_name, &s.name),
                name: s.name.clone(),
                header_row: s.header_row,
                double_header: s.double_header,
                headers: s.headers.clone(),
                records: s.records.len(),
            })
            .collect(),
    }
}

pub fn cmd_inspect(files: Vec<PathBuf>, json: bool) -> Result<(), CliError> {
    let batch = load_batch(&files);
    let infos: Vec<FileInfo> = batch.files.iter().map(describe).collect();

    if json {
        let out = serde_json::to_string_pretty(&infos)
            .map_err(|e| CliError { code: EXIT_IO, message: e.to_string(), hint: None })?;
        println!("{out}");
    } else {
        for info in &infos {
            println!("{}", info.file);
            for s in &info.sheets {
                match s.header_row {
                    Some(row) => println!(
                        "  {:<20} header row {}{}, {} record(s)",
                        s.name,
                        row,
                        if s.double_header { " (two rows)" } else { "" },
                        s.records,
                    ),
                    None => println!("  {:<20} empty", s.name),
                }
                if !s.headers.is_empty() {
                    println!("  {:<20} {}", "", s.headers.join(" | "));
                }
            }
        }
    }

    fail_on_errors(&batch)
}

// ── Suggest ─────────────────────────────────────────────────────────

pub fn cmd_suggest(files: Vec<PathBuf>, sheets: Vec<String>, json: bool) -> Result<(), CliError> {
    let batch = load_batch(&files);
    fail_on_errors(&batch)?;

    let known = all_sheet_keys(&batch.files);
    let selected = if sheets.is_empty() { known.clone() } else { sheets };
    if let Some(unknown) = selected.iter().find(|k| !known.contains(k)) {
        return Err(CliError {
            code: EXIT_USAGE,
            message: format!("unknown sheet \"{unknown}\""),
            hint: Some(format!("available sheets: {}", known.join(", "))),
        });
    }

    let headers = union_headers(&batch.files, &selected);
    let mapping = map_headers(&headers);

    let out = if json {
        serde_json::to_string_pretty(&mapping).map_err(|e| e.to_string())
    } else {
        toml::to_string_pretty(&mapping).map_err(|e| e.to_string())
    }
    .map_err(|message| CliError { code: EXIT_IO, message, hint: None })?;
    println!("{out}");

    let unmapped: Vec<&str> = headers
        .iter()
        .filter(|h| classify_header(h).is_none())
        .map(String::as_str)
        .collect();
    if !unmapped.is_empty() {
        eprintln!("unmapped: {}", unmapped.join(", "));
    }
    if !mapping.is_ready() {
        eprintln!("warning: no contract number or date column found; map them by hand");
    }
    Ok(())
}

fn fail_on_errors(batch: &BatchLoad) -> Result<(), CliError> {
    let Some((_, first)) = batch.failures.first() else {
        return Ok(());
    };
    for (_, err) in &batch.failures {
        eprintln!("error: {err}");
    }
    let code = if batch.failures.len() == 1 { parse_exit_code(first) } else { EXIT_INGEST };
    Err(CliError {
        code,
        message: format!("{} file(s) could not be loaded", batch.failures.len()),
        hint: None,
    })
}
