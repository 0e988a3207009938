// Header row detection for loosely formatted cost sheets.
//
// Carrier and internal cost sheets usually open with a title block (company
// name, period, report name) before the real header, and often split the
// header over two rows: a group row ("Phí", "Chi phí khác") above the
// specific labels ("Hạ", "Nâng", "Amount"). Detection scores the first rows
// by how many cells look like cost-sheet vocabulary.

use std::collections::HashMap;

use contrecon_core::{fold, CellValue, Grid};

/// Number of leading rows searched for the header.
pub const DEFAULT_SCAN_LIMIT: usize = 20;

/// Folded substrings that mark a cell as header-like.
pub const HEADER_KEYWORDS: &[&str] = &[
    "stt", "so cont", "cont", "container", "ngay", "date", "bill", "so bill",
    "chi phi", "cost", "tien", "amount", "thanh tien",
    "ha", "nang", "lift", "phi", "cuoc", "kho", "xe", "bot", "thue", "vat", "neo",
];

/// Where the header sits in a grid and what the columns are called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    /// 0-based index of the primary header row.
    pub header_row_index: usize,
    /// True when the row below the primary header was merged in as labels.
    pub double_header: bool,
    /// Column names by position. Blank names keep their slot so that data
    /// cells stay aligned, but are not addressable.
    pub columns: Vec<String>,
}

impl HeaderLayout {
    /// Rows between the primary header row and the first data row.
    pub fn data_offset(&self) -> usize {
        if self.double_header {
            2
        } else {
            1
        }
    }

    /// 0-based index of the first data row.
    pub fn first_data_row(&self) -> usize {
        self.header_row_index + self.data_offset()
    }

    /// 1-based row number of the primary header row.
    pub fn header_row_number(&self) -> usize {
        self.header_row_index + 1
    }

    /// Addressable (non-blank) header names in column order.
    pub fn headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|h| !h.trim().is_empty())
            .cloned()
            .collect()
    }
}

fn is_header_like(text: &str) -> bool {
    let folded = fold(text);
    HEADER_KEYWORDS.iter().any(|k| folded.contains(k))
}

/// Number of non-blank cells in `row` that contain header vocabulary.
pub fn keyword_hits(row: &[CellValue]) -> usize {
    row.iter()
        .filter(|c| !c.is_blank())
        .filter(|c| is_header_like(&c.display()))
        .count()
}

/// Locate the header in `grid`, looking at rows `0..=scan_limit`.
///
/// The row with the most keyword hits wins; ties go to the earliest row and
/// a grid with no hits at all uses row 0. Returns `None` for an empty grid.
pub fn detect_header(grid: &Grid, scan_limit: usize) -> Option<HeaderLayout> {
    let last_row = grid.len().checked_sub(1)?;
    let end_row = last_row.min(scan_limit);

    let mut best_row = 0;
    let mut max_score = 0;
    for (r, row) in grid.iter().enumerate().take(end_row + 1) {
        let score = keyword_hits(row);
        if score > max_score {
            max_score = score;
            best_row = r;
        }
    }

    let primary = &grid[best_row];
    let layout = match grid.get(best_row + 1) {
        Some(secondary) if keyword_hits(secondary) > 0 => HeaderLayout {
            header_row_index: best_row,
            double_header: true,
            columns: merge_header_rows(primary, secondary),
        },
        _ => HeaderLayout {
            header_row_index: best_row,
            double_header: false,
            columns: primary.iter().map(CellValue::display).collect(),
        },
    };

    log::debug!(
        "header at row {} (score {}), double header: {}, {} columns",
        layout.header_row_number(),
        max_score,
        layout.double_header,
        layout.columns.len()
    );

    Some(layout)
}

/// Merge a group row and a label row into one name per column.
///
/// A label that is unique across the label row stands alone; a repeated
/// label ("Amount" under several groups) is prefixed with its group; a
/// column without a label keeps the group name.
pub fn merge_header_rows(top_row: &[CellValue], bottom_row: &[CellValue]) -> Vec<String> {
    let width = top_row.len().max(bottom_row.len());
    let cell_text = |row: &[CellValue], i: usize| -> String {
        row.get(i).map(|c| c.display().trim().to_string()).unwrap_or_default()
    };

    let mut bottom_counts: HashMap<String, usize> = HashMap::new();
    for i in 0..width {
        let bottom = cell_text(bottom_row, i);
        if !bottom.is_empty() {
            *bottom_counts.entry(bottom).or_insert(0) += 1;
        }
    }

    (0..width)
        .map(|i| {
            let top = cell_text(top_row, i);
            let bottom = cell_text(bottom_row, i);
            if bottom.is_empty() {
                top
            } else if bottom_counts.get(&bottom).copied().unwrap_or(0) == 1 || top.is_empty() {
                bottom
            } else {
                format!("{top} {bottom}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|s| CellValue::from_field(s)).collect()
    }

    #[test]
    fn picks_row_with_most_keywords() {
        let grid = vec![
            row(&["CÔNG TY TNHH VẬN TẢI", "", ""]),
            row(&["Bảng kê tháng 3", "", ""]),
            row(&["STT", "Số Cont", "Ngày", "Phí nâng"]),
            row(&["1", "MSKU1906227", "2024-03-01", "250000"]),
        ];
        let layout = detect_header(&grid, DEFAULT_SCAN_LIMIT).unwrap();
        assert_eq!(layout.header_row_index, 2);
        assert_eq!(layout.header_row_number(), 3);
        assert!(!layout.double_header);
        assert_eq!(layout.first_data_row(), 3);
        assert_eq!(layout.headers(), vec!["STT", "Số Cont", "Ngày", "Phí nâng"]);
    }

    #[test]
    fn tie_keeps_earliest_row() {
        let grid = vec![
            row(&["Cont", "Date"]),
            row(&["x", "y"]),
            row(&["Bill", "Amount"]),
        ];
        let layout = detect_header(&grid, DEFAULT_SCAN_LIMIT).unwrap();
        assert_eq!(layout.header_row_index, 0);
    }

    #[test]
    fn no_keywords_defaults_to_first_row() {
        let grid = vec![row(&["a", "b"]), row(&["1", "2"])];
        let layout = detect_header(&grid, DEFAULT_SCAN_LIMIT).unwrap();
        assert_eq!(layout.header_row_index, 0);
        assert!(!layout.double_header);
        assert_eq!(layout.columns, vec!["a", "b"]);
    }

    #[test]
    fn rows_past_scan_limit_are_ignored() {
        let mut grid: Grid = (0..5).map(|_| row(&["x"])).collect();
        grid.push(row(&["Số Cont", "Ngày"]));
        let layout = detect_header(&grid, 3).unwrap();
        assert_eq!(layout.header_row_index, 0);

        let layout = detect_header(&grid, 5).unwrap();
        assert_eq!(layout.header_row_index, 5);
    }

    #[test]
    fn empty_grid_has_no_header() {
        assert!(detect_header(&Vec::new(), DEFAULT_SCAN_LIMIT).is_none());
    }

    #[test]
    fn double_header_unique_labels_stand_alone() {
        let grid = vec![
            row(&["Phí", "", "Phí"]),
            row(&["Hạ", "Nâng", "Cân"]),
            row(&["100", "200", "50"]),
        ];
        let layout = detect_header(&grid, DEFAULT_SCAN_LIMIT).unwrap();
        assert!(layout.double_header);
        assert_eq!(layout.columns, vec!["Hạ", "Nâng", "Cân"]);
        assert_eq!(layout.first_data_row(), 2);
    }

    #[test]
    fn repeated_labels_take_group_prefix() {
        let top = row(&["Số Cont", "Phí nâng", "Phí hạ", "Ngày"]);
        let bottom = row(&["", "Amount", "Amount", ""]);
        assert_eq!(
            merge_header_rows(&top, &bottom),
            vec!["Số Cont", "Phí nâng Amount", "Phí hạ Amount", "Ngày"]
        );
    }

    #[test]
    fn repeated_label_without_group_keeps_label() {
        let top = row(&["", "Cost"]);
        let bottom = row(&["Amount", "Amount"]);
        assert_eq!(merge_header_rows(&top, &bottom), vec!["Amount", "Cost Amount"]);
    }

    #[test]
    fn merge_covers_longer_row() {
        let top = row(&["Cont"]);
        let bottom = row(&["", "VAT"]);
        assert_eq!(merge_header_rows(&top, &bottom), vec!["Cont", "VAT"]);
    }

    #[test]
    fn blank_headers_are_not_addressable() {
        let layout = HeaderLayout {
            header_row_index: 0,
            double_header: false,
            columns: vec!["Cont".into(), "  ".into(), "".into(), "VAT".into()],
        };
        assert_eq!(layout.headers(), vec!["Cont", "VAT"]);
    }
}
