use std::collections::BTreeMap;

use serde::Serialize;

use crate::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// Separator between file name and sheet name in a qualified sheet key.
pub const SHEET_KEY_SEPARATOR: &str = "::";

/// Qualified key identifying one worksheet inside a batch of files.
pub fn sheet_key(file_name: &str, sheet_name: &str) -> String {
    format!("{file_name}{SHEET_KEY_SEPARATOR}{sheet_name}")
}

/// One data row of a worksheet, keyed by header name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// 1-based row number in the source worksheet.
    pub row_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_sheet: Option<String>,
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            source_file: None,
            source_sheet: None,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.values.insert(column.to_string(), value.into());
        self
    }

    /// Value under `column`. A column the record does not carry reads as empty.
    pub fn get(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&EMPTY)
    }

    /// Copy of this record tagged with the file and sheet it came from.
    pub fn tagged(&self, file_name: &str, sheet_name: &str) -> Record {
        Record {
            source_file: Some(file_name.to_string()),
            source_sheet: Some(sheet_name.to_string()),
            ..self.clone()
        }
    }
}

/// Parsed content of one worksheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    /// Non-blank header names in column order.
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    /// 1-based row index of the (primary) header row; `None` for an empty sheet.
    pub header_row: Option<usize>,
    pub double_header: bool,
}

impl Sheet {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headers: Vec::new(),
            records: Vec::new(),
            header_row: None,
            double_header: false,
        }
    }
}

/// All worksheets of one uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileData {
    pub file_name: String,
    pub sheets: Vec<Sheet>,
}

impl FileData {
    pub fn new(file_name: impl Into<String>, sheets: Vec<Sheet>) -> Self {
        Self {
            file_name: file_name.into(),
            sheets,
        }
    }

    /// Qualified keys of every sheet, in workbook order.
    pub fn sheet_keys(&self) -> Vec<String> {
        self.sheets
            .iter()
            .map(|s| sheet_key(&self.file_name, &s.name))
            .collect()
    }
}

/// Qualified keys of every sheet across a batch, used as the default selection.
pub fn all_sheet_keys(files: &[FileData]) -> Vec<String> {
    files.iter().flat_map(FileData::sheet_keys).collect()
}
