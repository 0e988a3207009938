// Narrowing a result list for display or export.

use crate::model::{ComparisonResult, MatchStatus};

/// Which statuses to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    /// Everything except `MATCH`.
    Discrepancies,
    /// `MISSING_A` and `MISSING_B`.
    Missing,
    Only(MatchStatus),
}

impl StatusFilter {
    pub fn accepts(&self, status: MatchStatus) -> bool {
        match self {
            Self::All => true,
            Self::Discrepancies => status.is_discrepancy(),
            Self::Missing => matches!(status, MatchStatus::MissingA | MatchStatus::MissingB),
            Self::Only(s) => *s == status,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "discrepancies" | "issues" => Ok(Self::Discrepancies),
            "missing" => Ok(Self::Missing),
            _ => s.parse::<MatchStatus>().map(Self::Only).map_err(|_| {
                format!(
                    "unknown filter '{s}' (expected all, discrepancies, missing, match, mismatch, missing_a or missing_b)"
                )
            }),
        }
    }
}

/// Case-insensitive substring match on the contract number or the match-key.
/// An empty or blank query matches everything.
pub fn matches_search(result: &ComparisonResult, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty()
        || result.contract_no.to_lowercase().contains(&query)
        || result.id.to_lowercase().contains(&query)
}

/// Results passing both the status filter and the search, in their
/// original order.
pub fn filter_results<'a>(
    results: &'a [ComparisonResult],
    status: StatusFilter,
    search: &str,
) -> Vec<&'a ComparisonResult> {
    results
        .iter()
        .filter(|r| status.accepts(r.status) && matches_search(r, search))
        .collect()
}
