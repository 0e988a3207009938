use std::path::{Path, PathBuf};
use std::time::Instant;

use contrecon_core::{FileData, Grid};

use crate::error::ParseError;
use crate::extract::build_sheet;

/// Spreadsheet formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
    Tsv,
}

impl SourceFormat {
    pub fn from_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            "csv" | "txt" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Display name for a path: its final component.
pub fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse an uploaded file held in memory.
///
/// `file_name` picks the format and becomes [`FileData::file_name`]. CSV and
/// TSV files produce a single sheet named after the file stem.
pub fn load_bytes(file_name: &str, bytes: Vec<u8>) -> Result<FileData, ParseError> {
    let format = SourceFormat::from_name(file_name).ok_or_else(|| ParseError::UnsupportedFormat {
        file: file_name.to_string(),
    })?;

    let grids: Vec<(String, Grid)> = match format {
        SourceFormat::Workbook => crate::xlsx::read_grids_from_bytes(file_name, bytes)?,
        SourceFormat::Csv | SourceFormat::Tsv => {
            let delimiter = (format == SourceFormat::Tsv).then_some(b'\t');
            let content = crate::csv::decode_text(bytes);
            let grid = crate::csv::read_grid(file_name, &content, delimiter)?;
            vec![(sheet_name_for_text(file_name), grid)]
        }
    };

    Ok(build_file(file_name, grids))
}

/// Parse a spreadsheet file from disk.
pub fn load_file(path: &Path) -> Result<FileData, ParseError> {
    let start = Instant::now();
    let file_name = file_display_name(path);

    let format = SourceFormat::from_name(&file_name).ok_or_else(|| ParseError::UnsupportedFormat {
        file: file_name.clone(),
    })?;

    let file_data = match format {
        SourceFormat::Workbook => {
            if let Err(e) = std::fs::metadata(path) {
                return Err(ParseError::Io { file: file_name, message: e.to_string() });
            }
            let grids = crate::xlsx::read_grids(path).map_err(|e| rename_file(e, &file_name))?;
            build_file(&file_name, grids)
        }
        SourceFormat::Csv | SourceFormat::Tsv => {
            let bytes = std::fs::read(path).map_err(|e| ParseError::Io {
                file: file_name.clone(),
                message: e.to_string(),
            })?;
            load_bytes(&file_name, bytes)?
        }
    };

    log::info!(
        "loaded {} ({} sheets, {} records) in {:.1?}",
        file_name,
        file_data.sheets.len(),
        file_data.sheets.iter().map(|s| s.records.len()).sum::<usize>(),
        start.elapsed()
    );
    Ok(file_data)
}

fn build_file(file_name: &str, grids: Vec<(String, Grid)>) -> FileData {
    let sheets = grids
        .iter()
        .map(|(name, grid)| build_sheet(name, grid))
        .collect();
    FileData::new(file_name, sheets)
}

fn sheet_name_for_text(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

/// Report errors against the short file name rather than the full path.
fn rename_file(err: ParseError, file_name: &str) -> ParseError {
    let file = file_name.to_string();
    match err {
        ParseError::Open { message, .. } => ParseError::Open { file, message },
        ParseError::Sheet { sheet, message, .. } => ParseError::Sheet { file, sheet, message },
        other => other,
    }
}

/// Outcome of loading several files: parsed files plus per-file failures.
#[derive(Debug, Default)]
pub struct BatchLoad {
    pub files: Vec<FileData>,
    pub failures: Vec<(PathBuf, ParseError)>,
}

impl BatchLoad {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Load every path; a file that fails is reported and skipped, the rest continue.
pub fn load_batch<P: AsRef<Path>>(paths: &[P]) -> BatchLoad {
    let mut batch = BatchLoad::default();
    for path in paths {
        let path = path.as_ref();
        match load_file(path) {
            Ok(file) => batch.files.push(file),
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                batch.failures.push((path.to_path_buf(), e));
            }
        }
    }
    batch
}
