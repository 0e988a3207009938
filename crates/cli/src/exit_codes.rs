//! CLI Exit Code Registry
//!
//! Single source of truth for `crecon` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success (for `run`: every key matched)             |
//! | 1    | `run` found discrepancies                          |
//! | 2    | Usage error (bad arguments)                        |
//! | 3    | IO error (cannot read job, cannot write output)    |
//! | 4    | An input file could not be parsed                  |
//! | 5    | Invalid job config or unusable mapping             |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above

use contrecon_io::ParseError;
use contrecon_recon::ReconError;

/// Success - command completed, nothing to report.
pub const EXIT_SUCCESS: u8 = 0;

/// Reconciliation found at least one MISMATCH, MISSING_A or MISSING_B.
/// Like `diff(1)`, exit 1 means "sides differ."
pub const EXIT_RECON_DISCREPANCY: u8 = 1;

/// Usage error - bad arguments, unknown filter.
pub const EXIT_USAGE: u8 = 2;

/// Cannot read the job file or write the report.
pub const EXIT_IO: u8 = 3;

/// An input workbook or CSV failed to parse.
pub const EXIT_INGEST: u8 = 4;

/// Job config failed to parse or validate, or a side has no usable mapping.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// Map a ReconError to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReconError::Io(_) => EXIT_IO,
        ReconError::Ingest { .. } => EXIT_INGEST,
    }
}

/// Map a ParseError to its exit code. A missing file is IO, not a bad file.
pub fn parse_exit_code(err: &ParseError) -> u8 {
    match err {
        ParseError::Io { .. } => EXIT_IO,
        _ => EXIT_INGEST,
    }
}
