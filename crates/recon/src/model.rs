use std::collections::BTreeMap;

use contrecon_core::Record;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// All rows of one side sharing a match-key.
#[derive(Debug, Clone, Serialize)]
pub struct Aggregate {
    /// `"{contract}|{date}|{bill}"` over the normalized values.
    pub key: String,
    /// Raw display values of the first row seen for this key.
    pub contract_no: String,
    pub date: String,
    pub bill_no: Option<String>,
    pub total_cost: f64,
    pub breakdown: BTreeMap<String, f64>,
    pub rows: Vec<Record>,
}

// ---------------------------------------------------------------------------
// Pair matching
// ---------------------------------------------------------------------------

/// Outcome of looking up one match-key on both sides.
#[derive(Debug, Clone)]
pub enum Pairing {
    Both { a: Aggregate, b: Aggregate },
    OnlyA(Aggregate),
    OnlyB(Aggregate),
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Match,
    Mismatch,
    /// Present on side B only.
    MissingA,
    /// Present on side A only.
    MissingB,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "MATCH",
            Self::Mismatch => "MISMATCH",
            Self::MissingA => "MISSING_A",
            Self::MissingB => "MISSING_B",
        }
    }

    pub fn is_discrepancy(&self) -> bool {
        !matches!(self, Self::Match)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MATCH" => Ok(Self::Match),
            "MISMATCH" => Ok(Self::Mismatch),
            "MISSING_A" => Ok(Self::MissingA),
            "MISSING_B" => Ok(Self::MissingB),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// One reconciled match-key.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub id: String,
    pub contract_no: String,
    pub date: String,
    pub bill_no: Option<String>,
    pub total_cost_a: f64,
    pub total_cost_b: f64,
    /// `total_cost_a - total_cost_b`.
    pub diff: f64,
    pub status: MatchStatus,
    pub breakdown_a: BTreeMap<String, f64>,
    pub breakdown_b: BTreeMap<String, f64>,
    pub rows_a: Vec<Record>,
    pub rows_b: Vec<Record>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconSummary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub missing_a: usize,
    pub missing_b: usize,
    pub total_cost_a: f64,
    pub total_cost_b: f64,
    pub net_diff: f64,
}

impl ReconSummary {
    pub fn discrepancies(&self) -> usize {
        self.mismatched + self.missing_a + self.missing_b
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub side_a: String,
    pub side_b: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub results: Vec<ComparisonResult>,
}
