//! Report export for `crecon run --output`.
//!
//! The format follows the file extension:
//! - `.csv`: one row per result, the columns of [`REPORT_COLUMNS`]
//! - `.xlsx`: same columns, bold frozen header, amounts formatted
//! - `.json`: the full report (meta, summary, filtered results)

use std::path::Path;

use contrecon_recon::{ComparisonResult, ReconMeta, ReconSummary};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;

use crate::exit_codes::{EXIT_IO, EXIT_USAGE};
use crate::CliError;

pub const REPORT_COLUMNS: [&str; 7] = [
    "Type",
    "Contract No",
    "Date",
    "Bill No",
    "Total Cost File A",
    "Total Cost File B",
    "Difference",
];

/// What `--json` prints and `.json` exports: the run header plus the
/// results that survived `--only` / `--search`.
#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub meta: &'a ReconMeta,
    pub summary: &'a ReconSummary,
    pub results: Vec<&'a ComparisonResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Xlsx,
    Json,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn write_report(path: &Path, view: &ReportView<'_>) -> Result<(), CliError> {
    let format = ReportFormat::from_path(path).ok_or_else(|| CliError {
        code: EXIT_USAGE,
        message: format!("cannot export to {}", path.display()),
        hint: Some("use a .csv, .xlsx or .json file name".into()),
    })?;

    let io_err = |e: String| CliError {
        code: EXIT_IO,
        message: format!("cannot write {}: {e}", path.display()),
        hint: None,
    };

    match format {
        ReportFormat::Csv => write_csv(path, &view.results).map_err(|e| io_err(e.to_string())),
        ReportFormat::Xlsx => write_xlsx(path, &view.results).map_err(|e| io_err(e.to_string())),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(view).map_err(|e| io_err(e.to_string()))?;
            std::fs::write(path, json).map_err(|e| io_err(e.to_string()))
        }
    }
}

/// The seven report cells of a result, as text.
pub fn report_row(r: &ComparisonResult) -> [String; 7] {
    [
        r.status.to_string(),
        r.contract_no.clone(),
        r.date.clone(),
        r.bill_no.clone().unwrap_or_default(),
        format_amount(r.total_cost_a),
        format_amount(r.total_cost_b),
        format_amount(r.diff),
    ]
}

/// Integral amounts print without decimals, others with two.
pub fn format_amount(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn write_csv(path: &Path, results: &[&ComparisonResult]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(REPORT_COLUMNS)?;
    for r in results {
        writer.write_record(report_row(r))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, results: &[&ComparisonResult]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let amount = Format::new().set_num_format("#,##0.##");

    let sheet = workbook.add_worksheet();
    sheet.set_name("Reconciliation")?;
    for (col, title) in REPORT_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (i, r) in results.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, r.status.as_str())?;
        sheet.write_string(row, 1, &r.contract_no)?;
        sheet.write_string(row, 2, &r.date)?;
        sheet.write_string(row, 3, r.bill_no.as_deref().unwrap_or(""))?;
        sheet.write_number_with_format(row, 4, r.total_cost_a, &amount)?;
        sheet.write_number_with_format(row, 5, r.total_cost_b, &amount)?;
        sheet.write_number_with_format(row, 6, r.diff, &amount)?;
    }
    sheet.set_column_width(1, 18)?;
    sheet.set_column_width(3, 16)?;
    for col in 4..=6 {
        sheet.set_column_width(col, 18)?;
    }

    workbook.save(path)
}
