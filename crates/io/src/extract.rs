use contrecon_core::{CellValue, Grid, Record, Sheet};

use crate::header::{detect_header, HeaderLayout, DEFAULT_SCAN_LIMIT};

/// Turn the rows below the header into records keyed by column name.
///
/// Every addressable column gets an entry (missing cells read as empty);
/// when two columns share a name the rightmost one wins. Row numbers are
/// 1-based positions in the source sheet.
pub fn extract_records(grid: &Grid, layout: &HeaderLayout) -> Vec<Record> {
    let first_data_row = layout.first_data_row();

    grid.iter()
        .skip(first_data_row)
        .enumerate()
        .map(|(i, cells)| {
            let mut record = Record::new(first_data_row + i + 1);
            for (col, name) in layout.columns.iter().enumerate() {
                if name.trim().is_empty() {
                    continue;
                }
                let value = cells.get(col).cloned().unwrap_or(CellValue::Empty);
                record.values.insert(name.clone(), value);
            }
            record
        })
        .collect()
}

/// Detect the header and extract records for one worksheet grid.
pub fn build_sheet(name: &str, grid: &Grid) -> Sheet {
    let Some(layout) = detect_header(grid, DEFAULT_SCAN_LIMIT) else {
        return Sheet::empty(name);
    };

    let records = extract_records(grid, &layout);
    Sheet {
        name: name.to_string(),
        headers: layout.headers(),
        records,
        header_row: Some(layout.header_row_number()),
        double_header: layout.double_header,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|s| CellValue::from_field(s)).collect()
    }

    #[test]
    fn row_numbers_follow_sheet_position() {
        let grid = vec![
            row(&["Bảng kê"]),
            row(&["Số Cont", "Ngày", "Phí nâng"]),
            row(&["MSKU1906227", "2024-03-01", "250000"]),
            row(&["TGHU1234567", "2024-03-02", "300000"]),
        ];
        let sheet = build_sheet("T3", &grid);
        assert_eq!(sheet.header_row, Some(2));
        assert_eq!(sheet.records.len(), 2);
        assert_eq!(sheet.records[0].row_number, 3);
        assert_eq!(sheet.records[1].row_number, 4);
        assert_eq!(sheet.records[1].get("Số Cont"), &CellValue::text("TGHU1234567"));
    }

    #[test]
    fn double_header_data_starts_two_rows_down() {
        let grid = vec![
            row(&["Số Cont", "Phí", "Phí"]),
            row(&["", "Hạ", "Nâng"]),
            row(&["C1", "10", "20"]),
        ];
        let sheet = build_sheet("S", &grid);
        assert!(sheet.double_header);
        assert_eq!(sheet.headers, vec!["Số Cont", "Hạ", "Nâng"]);
        assert_eq!(sheet.records.len(), 1);
        assert_eq!(sheet.records[0].row_number, 3);
        assert_eq!(sheet.records[0].get("Nâng"), &CellValue::text("20"));
    }

    #[test]
    fn short_rows_fill_with_empty() {
        let layout = HeaderLayout {
            header_row_index: 0,
            double_header: false,
            columns: vec!["Cont".into(), "VAT".into()],
        };
        let grid = vec![row(&["Cont", "VAT"]), row(&["C1"])];
        let records = extract_records(&grid, &layout);
        assert_eq!(records[0].get("VAT"), &CellValue::Empty);
        assert!(records[0].values.contains_key("VAT"));
    }

    #[test]
    fn duplicate_names_last_column_wins() {
        let layout = HeaderLayout {
            header_row_index: 0,
            double_header: false,
            columns: vec!["Amount".into(), "".into(), "Amount".into()],
        };
        let grid = vec![row(&["Amount", "", "Amount"]), row(&["1", "hidden", "3"])];
        let records = extract_records(&grid, &layout);
        assert_eq!(records[0].values.len(), 1);
        assert_eq!(records[0].get("Amount"), &CellValue::text("3"));
    }

    #[test]
    fn empty_grid_gives_empty_sheet() {
        let sheet = build_sheet("Blank", &Vec::new());
        assert_eq!(sheet.header_row, None);
        assert!(sheet.headers.is_empty());
        assert!(sheet.records.is_empty());
    }
}
