use crate::model::{Aggregate, ComparisonResult, MatchStatus, Pairing};

/// Two totals closer than this are treated as equal.
pub const MATCH_TOLERANCE: f64 = 1.0;

/// Status of a key present on both sides, from `total_a - total_b`.
pub fn status_for_diff(diff: f64) -> MatchStatus {
    if diff.abs() < MATCH_TOLERANCE {
        MatchStatus::Match
    } else {
        MatchStatus::Mismatch
    }
}

/// Turn pairings into comparison results, keeping their order.
pub fn classify(pairings: Vec<Pairing>) -> Vec<ComparisonResult> {
    pairings.into_iter().map(classify_one).collect()
}

fn classify_one(pairing: Pairing) -> ComparisonResult {
    match pairing {
        Pairing::Both { a, b } => {
            let diff = a.total_cost - b.total_cost;
            let mut result = from_side(a, MatchStatus::Mismatch);
            result.total_cost_b = b.total_cost;
            result.diff = diff;
            result.status = status_for_diff(diff);
            result.breakdown_b = b.breakdown;
            result.rows_b = b.rows;
            result
        }
        Pairing::OnlyA(a) => from_side(a, MatchStatus::MissingB),
        Pairing::OnlyB(b) => {
            let diff = -b.total_cost;
            ComparisonResult {
                id: b.key,
                contract_no: b.contract_no,
                date: b.date,
                bill_no: b.bill_no,
                total_cost_a: 0.0,
                total_cost_b: b.total_cost,
                diff,
                status: MatchStatus::MissingA,
                breakdown_a: Default::default(),
                breakdown_b: b.breakdown,
                rows_a: Vec::new(),
                rows_b: b.rows,
            }
        }
    }
}

/// Result seeded from side A alone; side B reads as zero.
fn from_side(a: Aggregate, status: MatchStatus) -> ComparisonResult {
    ComparisonResult {
        id: a.key,
        contract_no: a.contract_no,
        date: a.date,
        bill_no: a.bill_no,
        total_cost_a: a.total_cost,
        total_cost_b: 0.0,
        diff: a.total_cost,
        status,
        breakdown_a: a.breakdown,
        breakdown_b: Default::default(),
        rows_a: a.rows,
        rows_b: Vec::new(),
    }
}
