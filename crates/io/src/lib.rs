//! `contrecon-io`: spreadsheet ingestion.
//!
//! Bytes or paths in, [`FileData`](contrecon_core::FileData) out: workbooks
//! are read into cell grids, the header is located (including two-row
//! headers) and the remaining rows become records.

pub mod csv;
pub mod error;
pub mod extract;
pub mod header;
pub mod load;
pub mod xlsx;

pub use error::ParseError;
pub use extract::{build_sheet, extract_records};
pub use header::{detect_header, HeaderLayout, DEFAULT_SCAN_LIMIT};
pub use load::{load_batch, load_bytes, load_file, BatchLoad};
