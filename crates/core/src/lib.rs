//! `contrecon-core`: plain data shared by ingestion and reconciliation.

pub mod cell;
pub mod sheet;
pub mod text;

pub use cell::{CellValue, Grid};
pub use sheet::{all_sheet_keys, sheet_key, FileData, Record, Sheet, SHEET_KEY_SEPARATOR};
pub use text::fold;
