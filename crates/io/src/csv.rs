// CSV/TSV reading into cell grids

use contrecon_core::{CellValue, Grid};

use crate::error::ParseError;

/// Parse delimited text into a grid. The delimiter is sniffed unless given.
pub fn read_grid(file: &str, content: &str, delimiter: Option<u8>) -> Result<Grid, ParseError> {
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(content));
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Grid::new();
    for result in reader.records() {
        let record = result.map_err(|e| ParseError::Csv {
            file: file.to_string(),
            message: e.to_string(),
        })?;
        grid.push(record.iter().map(CellValue::from_field).collect());
    }
    Ok(grid)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Cost sheets open with title lines, so score the most common field
        // count rather than the first line's.
        let target = counts.iter().copied().max().unwrap_or(1);
        if target <= 1 {
            continue;
        }
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Decode bytes as UTF-8, falling back to Windows-1252 (common for Excel-exported CSVs).
pub fn decode_text(bytes: Vec<u8>) -> String {
    let bytes = match String::from_utf8(bytes) {
        Ok(s) => return strip_bom(s),
        Err(e) => e.into_bytes(),
    };
    let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
    decoded.into_owned()
}

fn strip_bom(s: String) -> String {
    match s.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => s,
    }
}
