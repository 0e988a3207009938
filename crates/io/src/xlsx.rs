// Excel workbook reading (xlsx, xlsm, xlsb, xls, ods).
//
// Cells are resolved to scalar values: formulas contribute their cached
// result, date-formatted serials become dates, everything else is text or a
// number. Styles and merged regions are ignored.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{Days, NaiveDate};
use contrecon_core::{CellValue, Grid};

use crate::error::ParseError;

/// Maximum dimensions read from a single sheet.
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLS: usize = 16_384;

/// Open a workbook on disk and return `(sheet name, grid)` in workbook order.
pub fn read_grids(path: &Path) -> Result<Vec<(String, Grid)>, ParseError> {
    let file = path.display().to_string();
    let workbook = open_workbook_auto(path).map_err(|e| ParseError::Open {
        file: file.clone(),
        message: e.to_string(),
    })?;
    collect_grids(&file, workbook)
}

/// Same as [`read_grids`] for an in-memory upload.
pub fn read_grids_from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Vec<(String, Grid)>, ParseError> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| ParseError::Open {
        file: file_name.to_string(),
        message: e.to_string(),
    })?;
    collect_grids(file_name, workbook)
}

fn collect_grids<RS: Read + Seek>(
    file: &str,
    mut workbook: Sheets<RS>,
) -> Result<Vec<(String, Grid)>, ParseError> {
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(ParseError::Open {
            file: file.to_string(),
            message: "workbook contains no sheets".into(),
        });
    }

    let mut grids = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ParseError::Sheet {
                file: file.to_string(),
                sheet: sheet_name.clone(),
                message: e.to_string(),
            })?;
        let grid = range_to_grid(&range);
        log::debug!("{file}: sheet '{sheet_name}' read as {} rows", grid.len());
        grids.push((sheet_name, grid));
    }
    Ok(grids)
}

/// Convert a calamine range to a grid addressed in absolute sheet coordinates.
///
/// A used range that does not begin at A1 is padded with empty rows and
/// columns so that row numbers reported later match the sheet.
fn range_to_grid(range: &Range<Data>) -> Grid {
    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return Vec::new();
    }

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let start_row = start_row as usize;
    let start_col = start_col as usize;

    let effective_rows = (start_row + height).min(MAX_ROWS);
    let mut grid: Grid = Vec::with_capacity(effective_rows);
    grid.resize_with(start_row.min(effective_rows), Vec::new);

    for row in range.rows() {
        if grid.len() >= effective_rows {
            log::warn!("sheet truncated at {MAX_ROWS} rows");
            break;
        }
        let mut cells = vec![CellValue::Empty; start_col.min(MAX_COLS)];
        for cell in row.iter().take(MAX_COLS.saturating_sub(start_col)) {
            cells.push(convert_cell(cell));
        }
        grid.push(cells);
    }
    grid
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from_field(s),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::text(if *b { "TRUE" } else { "FALSE" }),
        Data::Error(e) => CellValue::Text(format!("#{e:?}")),
        // Assumes the 1900 date system; the 1904 flag is not exposed.
        Data::DateTime(dt) => serial_to_date(dt.as_f64())
            .map(CellValue::Date)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_date(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::text(s.as_str())),
        Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

/// Excel serial (1900 system) to calendar date; the time of day is dropped.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    // Day 0 is 1899-12-30 once the phantom 1900-02-29 is accounted for.
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.floor() as u64))
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
