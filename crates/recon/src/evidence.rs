use crate::model::{ComparisonResult, MatchStatus, ReconSummary};

/// Compute summary statistics from comparison results.
pub fn compute_summary(results: &[ComparisonResult]) -> ReconSummary {
    let mut summary = ReconSummary {
        total: results.len(),
        ..ReconSummary::default()
    };

    for r in results {
        match r.status {
            MatchStatus::Match => summary.matched += 1,
            MatchStatus::Mismatch => summary.mismatched += 1,
            MatchStatus::MissingA => summary.missing_a += 1,
            MatchStatus::MissingB => summary.missing_b += 1,
        }
        summary.total_cost_a += r.total_cost_a;
        summary.total_cost_b += r.total_cost_b;
    }
    summary.net_diff = summary.total_cost_a - summary.total_cost_b;

    summary
}
