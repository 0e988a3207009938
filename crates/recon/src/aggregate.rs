use std::collections::{BTreeMap, HashMap, HashSet};

use contrecon_core::{sheet_key, FileData, Record};

use crate::mapping::CostMapping;
use crate::model::Aggregate;
use crate::normalize::{normalize_bill_no, normalize_container_no, normalize_date, parse_cost};

/// Sum of every mapped cost column of a row, fixed categories and
/// additional costs alike. Unknown columns read as empty and cost 0.
pub fn row_cost(record: &Record, mapping: &CostMapping) -> f64 {
    mapping
        .cost_buckets()
        .iter()
        .flat_map(|(_, cols)| cols.iter())
        .map(|col| parse_cost(record.get(col)))
        .sum()
}

/// Per-bucket cost of a row. Only buckets with at least one mapped column
/// appear.
pub fn row_breakdown(record: &Record, mapping: &CostMapping) -> BTreeMap<String, f64> {
    mapping
        .cost_buckets()
        .into_iter()
        .filter(|(_, cols)| !cols.is_empty())
        .map(|(name, cols)| {
            let sum: f64 = cols.iter().map(|col| parse_cost(record.get(col))).sum();
            (name, sum)
        })
        .collect()
}

/// Normalized match-key of a row, or `None` when the contract or date is
/// missing. The bill part is empty when no bill column is mapped.
pub fn match_key(record: &Record, mapping: &CostMapping) -> Option<String> {
    let contract = normalize_container_no(record.get(mapping.contract_no.as_deref()?));
    let date = normalize_date(record.get(mapping.date.as_deref()?));
    if contract.is_empty() || date.is_empty() {
        return None;
    }
    let bill = mapping
        .bill_no
        .as_deref()
        .map(|col| normalize_bill_no(record.get(col)))
        .unwrap_or_default();
    Some(format!("{contract}|{date}|{bill}"))
}

/// Group the rows of the selected sheets by match-key.
///
/// Aggregates come back in first-seen order across files, sheets and rows.
/// Rows that cannot be keyed are skipped.
pub fn aggregate(
    files: &[FileData],
    mapping: &CostMapping,
    selected_sheet_keys: &[String],
) -> Vec<Aggregate> {
    let selected: HashSet<&str> = selected_sheet_keys.iter().map(String::as_str).collect();
    let mut groups: Vec<Aggregate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for file in files {
        for sheet in &file.sheets {
            if !selected.contains(sheet_key(&file.file_name, &sheet.name).as_str()) {
                continue;
            }
            for record in &sheet.records {
                let Some(key) = match_key(record, mapping) else {
                    skipped += 1;
                    continue;
                };

                let slot = match index.get(&key) {
                    Some(&i) => i,
                    None => {
                        index.insert(key.clone(), groups.len());
                        groups.push(new_aggregate(key, record, mapping));
                        groups.len() - 1
                    }
                };
                let group = &mut groups[slot];

                group.total_cost += row_cost(record, mapping);
                for (name, cost) in row_breakdown(record, mapping) {
                    *group.breakdown.entry(name).or_insert(0.0) += cost;
                }
                group.rows.push(record.tagged(&file.file_name, &sheet.name));
            }
        }
    }

    if skipped > 0 {
        log::debug!("skipped {skipped} row(s) without contract or date");
    }
    groups
}

fn new_aggregate(key: String, first: &Record, mapping: &CostMapping) -> Aggregate {
    let display = |col: Option<&str>| col.map(|c| first.get(c).display()).unwrap_or_default();
    Aggregate {
        key,
        contract_no: display(mapping.contract_no.as_deref()),
        date: display(mapping.date.as_deref()),
        bill_no: mapping.bill_no.as_deref().map(|c| first.get(c).display()),
        total_cost: 0.0,
        breakdown: BTreeMap::new(),
        rows: Vec::new(),
    }
}
