// Heuristic column → cost category suggestion.
//
// Rules run in a fixed priority order and the first one that matches claims
// the header. The three key fields are the exception in one respect: a later
// header matching the same key rule replaces the earlier assignment.

use std::collections::HashSet;

use contrecon_core::{fold, sheet_key, FileData};

use crate::mapping::{CostCategory, CostMapping};

/// A matching rule over the folded header text.
struct Rule {
    equals: &'static [&'static str],
    contains: &'static [&'static str],
}

impl Rule {
    fn matches(&self, folded: &str) -> bool {
        self.equals.iter().any(|e| folded == *e) || self.contains.iter().any(|c| folded.contains(c))
    }
}

const CONTRACT_RULE: Rule = Rule {
    equals: &["cont", "container"],
    contains: &["so cont"],
};

const DATE_RULE: Rule = Rule {
    equals: &["ngay"],
    contains: &["ngay van chuyen", "ngay vc"],
};

const BILL_RULE: Rule = Rule {
    equals: &["bill"],
    contains: &["so bill"],
};

/// Cost rules in priority order. Container deposit is handled separately
/// because it also looks at the raw (accented) text.
const COST_RULES_BEFORE_DEPOSIT: &[(CostCategory, Rule)] = &[
    (
        CostCategory::DetentionFee,
        Rule { equals: &["neo"], contains: &["neo xe", "detention"] },
    ),
    (
        CostCategory::StorageFee,
        Rule { equals: &[], contains: &["gui cont", "luu bai", "storage", "luu cont"] },
    ),
];

const COST_RULES_AFTER_DEPOSIT: &[(CostCategory, Rule)] = &[
    (
        CostCategory::LiftUnload,
        Rule { equals: &["ha", "nang"], contains: &["phi ha", "phi nang", "lift", "lo/lo"] },
    ),
    (
        CostCategory::Toll,
        Rule { equals: &[], contains: &["bot", "spitc", "sp-itc", "sp itc", "cau duong"] },
    ),
    (
        CostCategory::TransportFee,
        Rule { equals: &["vc", "phi vc"], contains: &["cuoc xe", "phi van chuyen", "trucking"] },
    ),
    (
        CostCategory::WarehouseTransfer,
        Rule { equals: &[], contains: &["chuyen kho", "luu kho", "warehouse"] },
    ),
    (
        CostCategory::WeighingFee,
        Rule { equals: &[], contains: &["can xe", "phi can", "weighing"] },
    ),
    (
        CostCategory::CleaningFee,
        Rule {
            equals: &[],
            contains: &[
                "ve sinh", "cleaning", "rua cont", "washing", "phi ve sinh", "hoa don vsc", "vsc",
            ],
        },
    ),
    (
        CostCategory::OverweightFee,
        Rule { equals: &[], contains: &["qua tai", "overweight", "phi qua tai"] },
    ),
];

/// "Thành tiền dịch vụ" is a service subtotal, never tax.
const VAT_EXCLUSION: &str = "thanh tien dich vu";

fn is_deposit(raw: &str, folded: &str) -> bool {
    raw.to_lowercase().contains("cược") || folded.contains("cuoc vo") || folded.contains("deposit")
}

fn is_vat(folded: &str) -> bool {
    !folded.contains(VAT_EXCLUSION) && (folded.contains("thue") || folded.contains("vat"))
}

/// Where a single header lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRole {
    ContractNo,
    Date,
    BillNo,
    Cost(CostCategory),
}

/// Classify one header, or `None` when no rule applies.
pub fn classify_header(raw: &str) -> Option<HeaderRole> {
    let folded = fold(raw);

    if CONTRACT_RULE.matches(&folded) {
        return Some(HeaderRole::ContractNo);
    }
    if DATE_RULE.matches(&folded) {
        return Some(HeaderRole::Date);
    }
    if BILL_RULE.matches(&folded) {
        return Some(HeaderRole::BillNo);
    }

    for (category, rule) in COST_RULES_BEFORE_DEPOSIT {
        if rule.matches(&folded) {
            return Some(HeaderRole::Cost(*category));
        }
    }
    if is_deposit(raw, &folded) {
        return Some(HeaderRole::Cost(CostCategory::ContainerDeposit));
    }
    for (category, rule) in COST_RULES_AFTER_DEPOSIT {
        if rule.matches(&folded) {
            return Some(HeaderRole::Cost(*category));
        }
    }
    if is_vat(&folded) {
        return Some(HeaderRole::Cost(CostCategory::Vat));
    }
    None
}

/// Suggest a mapping for a list of header names.
///
/// Pure and idempotent. Cost columns accumulate in header order; for the
/// contract, date and bill columns the last matching header wins.
pub fn map_headers<S: AsRef<str>>(headers: &[S]) -> CostMapping {
    let mut mapping = CostMapping::default();

    for header in headers {
        let header = header.as_ref();
        match classify_header(header) {
            Some(HeaderRole::ContractNo) => mapping.contract_no = Some(header.to_string()),
            Some(HeaderRole::Date) => mapping.date = Some(header.to_string()),
            Some(HeaderRole::BillNo) => mapping.bill_no = Some(header.to_string()),
            Some(HeaderRole::Cost(category)) => mapping.columns_mut(category).push(header.to_string()),
            None => log::debug!("header '{header}' left unmapped"),
        }
    }

    mapping
}

/// Ordered, de-duplicated union of the headers of every selected sheet.
pub fn union_headers(files: &[FileData], selected_sheet_keys: &[String]) -> Vec<String> {
    let selected: HashSet<&str> = selected_sheet_keys.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut headers = Vec::new();

    for file in files {
        for sheet in &file.sheets {
            if !selected.contains(sheet_key(&file.file_name, &sheet.name).as_str()) {
                continue;
            }
            for header in &sheet.headers {
                if seen.insert(header.as_str()) {
                    headers.push(header.clone());
                }
            }
        }
    }
    headers
}
