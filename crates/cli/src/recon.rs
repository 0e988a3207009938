//! `crecon run` / `crecon validate`: config-driven two-sided reconciliation.

use std::path::{Path, PathBuf};

use contrecon_core::FileData;
use contrecon_io::load_batch;
use contrecon_recon::{filter_results, reconcile, ReconConfig, ReconError, ReconReport, StatusFilter};

use crate::exit_codes::{recon_exit_code, EXIT_IO, EXIT_RECON_DISCREPANCY};
use crate::export::{format_amount, write_report, ReportView};
use crate::CliError;

fn recon_err(err: ReconError) -> CliError {
    CliError { code: recon_exit_code(&err), message: err.to_string(), hint: None }
}

fn read_config(config_path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| recon_err(ReconError::Io(format!("cannot read {}: {e}", config_path.display()))))?;
    ReconConfig::from_toml(&config_str).map_err(recon_err)
}

/// Load every file of one side. Any failure fails the side: a partial side
/// would report its missing rows as MISSING.
fn load_side(label: &str, paths: &[PathBuf]) -> Result<Vec<FileData>, ReconError> {
    log::info!("loading {} file(s) for {label}", paths.len());
    let batch = load_batch(paths);
    if batch.is_complete() {
        return Ok(batch.files);
    }
    Err(ReconError::Ingest {
        side: label.to_string(),
        failures: batch.failures.iter().map(|(_, e)| e.to_string()).collect(),
    })
}

pub struct RunOptions {
    pub json: bool,
    pub output: Option<PathBuf>,
    pub only: StatusFilter,
    pub search: Option<String>,
}

pub fn cmd_run(config_path: PathBuf, opts: RunOptions) -> Result<(), CliError> {
    let config = read_config(&config_path)?;

    // Files are relative to the job file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let files_a = load_side(config.label_a(), &config.side_a.resolve_files(base_dir)).map_err(recon_err)?;
    let files_b = load_side(config.label_b(), &config.side_b.resolve_files(base_dir)).map_err(recon_err)?;

    let report = reconcile(&config, &files_a, &files_b).map_err(recon_err)?;

    let view = ReportView {
        meta: &report.meta,
        summary: &report.summary,
        results: filter_results(&report.results, opts.only, opts.search.as_deref().unwrap_or("")),
    };

    if let Some(ref path) = opts.output {
        write_report(path, &view)?;
        eprintln!("wrote {} ({} row(s))", path.display(), view.results.len());
    }

    if opts.json {
        let json_str = serde_json::to_string_pretty(&view).map_err(|e| CliError {
            code: EXIT_IO,
            message: format!("JSON serialization error: {e}"),
            hint: None,
        })?;
        println!("{json_str}");
    } else {
        print_discrepancies(&view);
    }

    print_summary(&report);

    if report.summary.discrepancies() > 0 {
        return Err(CliError { code: EXIT_RECON_DISCREPANCY, message: String::new(), hint: None });
    }
    Ok(())
}

fn print_discrepancies(view: &ReportView<'_>) {
    for r in view.results.iter().filter(|r| r.status.is_discrepancy()) {
        eprintln!(
            "{:<10} {:<16} {:<12} {:<14} {:>14} {:>14} {:>14}",
            r.status.as_str(),
            r.contract_no,
            r.date,
            r.bill_no.as_deref().unwrap_or(""),
            format_amount(r.total_cost_a),
            format_amount(r.total_cost_b),
            format_amount(r.diff),
        );
    }
}

fn print_summary(report: &ReconReport) {
    let (meta, s) = (&report.meta, &report.summary);
    eprintln!(
        "recon '{}': {} key(s), {} matched, {} mismatched, {} missing in {}, {} missing in {}",
        meta.config_name,
        s.total,
        s.matched,
        s.mismatched,
        s.missing_a,
        meta.side_a,
        s.missing_b,
        meta.side_b,
    );
    eprintln!(
        "totals: {} {}, {} {}, net {}",
        meta.side_a,
        format_amount(s.total_cost_a),
        meta.side_b,
        format_amount(s.total_cost_b),
        format_amount(s.net_diff),
    );
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let mapping_note = |explicit: bool| if explicit { "explicit mapping" } else { "suggested mapping" };
    eprintln!(
        "valid: recon '{}' - {}: {} file(s), {}; {}: {} file(s), {}",
        config.name,
        config.label_a(),
        config.side_a.files.len(),
        mapping_note(config.side_a.mapping.is_some()),
        config.label_b(),
        config.side_b.files.len(),
        mapping_note(config.side_b.mapping.is_some()),
    );
    Ok(())
}
