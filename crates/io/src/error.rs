use std::fmt;

/// Failure to turn one file into sheets.
///
/// Ingestion is all-or-nothing per file: when any of these is returned, no
/// sheet of that file is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Reading the file from disk failed.
    Io { file: String, message: String },
    /// The workbook container could not be opened (corrupt zip, wrong format).
    Open { file: String, message: String },
    /// A worksheet inside an otherwise readable workbook failed to load.
    Sheet { file: String, sheet: String, message: String },
    /// Malformed delimited text.
    Csv { file: String, message: String },
    /// Extension is not one of the supported spreadsheet formats.
    UnsupportedFormat { file: String },
}

impl ParseError {
    /// Name of the file the error belongs to.
    pub fn file(&self) -> &str {
        match self {
            Self::Io { file, .. }
            | Self::Open { file, .. }
            | Self::Sheet { file, .. }
            | Self::Csv { file, .. }
            | Self::UnsupportedFormat { file } => file,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { file, message } => write!(f, "cannot read '{file}': {message}"),
            Self::Open { file, message } => {
                write!(f, "cannot open workbook '{file}': {message}")
            }
            Self::Sheet { file, sheet, message } => {
                write!(f, "'{file}', sheet '{sheet}': {message}")
            }
            Self::Csv { file, message } => write!(f, "'{file}': malformed CSV: {message}"),
            Self::UnsupportedFormat { file } => {
                write!(f, "'{file}': unsupported format (expected xlsx, xlsm, xlsb, xls, ods, csv or tsv)")
            }
        }
    }
}

impl std::error::Error for ParseError {}
