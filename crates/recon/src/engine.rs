use contrecon_core::FileData;

use crate::aggregate::aggregate;
use crate::classify::classify;
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::mapping::CostMapping;
use crate::matcher::match_exact_key;
use crate::model::{ComparisonResult, ReconMeta, ReconReport};

/// Compare two sides: aggregate each by match-key, pair, classify.
///
/// Pure. Missing columns read as empty, unkeyable rows are skipped, so this
/// has no error path.
pub fn compare(
    files_a: &[FileData],
    files_b: &[FileData],
    mapping_a: &CostMapping,
    mapping_b: &CostMapping,
    selected_a: &[String],
    selected_b: &[String],
) -> Vec<ComparisonResult> {
    let side_a = aggregate(files_a, mapping_a, selected_a);
    let side_b = aggregate(files_b, mapping_b, selected_b);
    log::debug!("aggregated {} key(s) on side A, {} on side B", side_a.len(), side_b.len());

    classify(match_exact_key(side_a, side_b))
}

/// Run a configured job over already-loaded files.
///
/// Sides without an explicit mapping get the heuristic suggestion; a side
/// whose contract or date column cannot be identified is an error.
pub fn reconcile(
    config: &ReconConfig,
    files_a: &[FileData],
    files_b: &[FileData],
) -> Result<ReconReport, ReconError> {
    let selected_a = config.side_a.selected_sheet_keys(files_a);
    let selected_b = config.side_b.selected_sheet_keys(files_b);
    let mapping_a = config.side_a.effective_mapping(files_a, &selected_a);
    let mapping_b = config.side_b.effective_mapping(files_b, &selected_b);

    for (label, mapping) in [(config.label_a(), &mapping_a), (config.label_b(), &mapping_b)] {
        if !mapping.is_ready() {
            return Err(ReconError::ConfigValidation(format!(
                "{label}: no contract number or date column identified; add an explicit mapping"
            )));
        }
    }

    let results = compare(files_a, files_b, &mapping_a, &mapping_b, &selected_a, &selected_b);
    let summary = compute_summary(&results);
    log::info!(
        "'{}': {} key(s), {} matched, {} mismatched, {} missing in {}, {} missing in {}",
        config.name,
        summary.total,
        summary.matched,
        summary.mismatched,
        summary.missing_a,
        config.label_a(),
        summary.missing_b,
        config.label_b(),
    );

    Ok(ReconReport {
        meta: ReconMeta {
            config_name: config.name.clone(),
            side_a: config.label_a().to_string(),
            side_b: config.label_b().to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SideConfig;
    use crate::model::MatchStatus;
    use contrecon_core::{Record, Sheet};

    fn file(name: &str, headers: &[&str], records: Vec<Record>) -> FileData {
        let mut sheet = Sheet::empty("Sheet1");
        sheet.headers = headers.iter().map(|h| h.to_string()).collect();
        sheet.records = records;
        FileData::new(name, vec![sheet])
    }

    fn mapping_with_custom() -> CostMapping {
        let mut m = CostMapping {
            contract_no: Some("CONT".into()),
            date: Some("DATE".into()),
            lift_unload: vec!["LIFT".into()],
            ..CostMapping::default()
        };
        m.additional_costs.insert("MyFee".into(), vec!["CUSTOM".into()]);
        m
    }

    fn side_mapping(suffix: &str) -> CostMapping {
        let mut m = CostMapping {
            contract_no: Some("CONT".into()),
            date: Some("DATE".into()),
            bill_no: Some("BILL".into()),
            lift_unload: vec![format!("LIFT_{suffix}")],
            ..CostMapping::default()
        };
        m.additional_costs.insert("MyFee".into(), vec![format!("CUSTOM_{suffix}")]);
        m
    }

    #[test]
    fn custom_fee_on_both_sides_matches() {
        let row = |suffix: &str| {
            Record::new(2)
                .with("CONT", "C1")
                .with("DATE", "2023-01-01")
                .with("BILL", "B1")
                .with(format!("LIFT_{suffix}").as_str(), 100.0)
                .with(format!("CUSTOM_{suffix}").as_str(), 20.0)
        };
        let a = vec![file("a.xlsx", &["CONT", "DATE", "BILL", "LIFT_A", "CUSTOM_A"], vec![row("A")])];
        let b = vec![file("b.xlsx", &["CONT", "DATE", "BILL", "LIFT_B", "CUSTOM_B"], vec![row("B")])];

        let results = compare(
            &a,
            &b,
            &side_mapping("A"),
            &side_mapping("B"),
            &["a.xlsx::Sheet1".to_string()],
            &["b.xlsx::Sheet1".to_string()],
        );

        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.id, "C1|2023-01-01|B1");
        assert_eq!(r.bill_no.as_deref(), Some("B1"));
        assert_eq!(r.status, MatchStatus::Match);
        assert_eq!(r.total_cost_a, 120.0);
        assert_eq!(r.total_cost_b, 120.0);
        assert_eq!(r.diff, 0.0);
        assert_eq!(r.breakdown_a["MyFee"], 20.0);
        assert_eq!(r.breakdown_b["MyFee"], 20.0);
        assert_eq!(r.rows_a[0].source_file.as_deref(), Some("a.xlsx"));
        assert_eq!(r.rows_b[0].source_file.as_deref(), Some("b.xlsx"));
    }

    #[test]
    fn sides_may_use_different_headers() {
        let a = vec![file(
            "ours.csv",
            &["Số Cont", "Ngày", "Phí nâng"],
            vec![
                Record::new(2).with("Số Cont", "MSKU1906227").with("Ngày", "2024-03-01").with("Phí nâng", 500.0),
                Record::new(3).with("Số Cont", "TGHU1234567").with("Ngày", "2024-03-01").with("Phí nâng", 300.0),
            ],
        )];
        let b = vec![file(
            "carrier.csv",
            &["Container", "Ngày vận chuyển", "Lift"],
            vec![
                Record::new(2).with("Container", "MSKU1906227 RE").with("Ngày vận chuyển", "2024-03-01").with("Lift", "500"),
                Record::new(3).with("Container", "CAIU7777777").with("Ngày vận chuyển", "2024-03-02").with("Lift", "80"),
            ],
        )];

        let config = ReconConfig {
            name: "March".into(),
            side_a: SideConfig { files: vec!["ours.csv".into()], ..SideConfig::default() },
            side_b: SideConfig {
                label: Some("Carrier".into()),
                files: vec!["carrier.csv".into()],
                ..SideConfig::default()
            },
        };
        let report = reconcile(&config, &a, &b).unwrap();

        let statuses: Vec<_> = report.results.iter().map(|r| (r.contract_no.as_str(), r.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("MSKU1906227", MatchStatus::Match),
                ("TGHU1234567", MatchStatus::MissingB),
                ("CAIU7777777", MatchStatus::MissingA),
            ]
        );
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.matched, 1);
        assert_eq!(report.summary.net_diff, 800.0 - 580.0);
        assert_eq!(report.meta.side_a, "File A");
        assert_eq!(report.meta.side_b, "Carrier");
        assert_eq!(report.meta.config_name, "March");
    }

    #[test]
    fn unmappable_side_is_rejected() {
        let a = vec![file("a.csv", &["Foo"], vec![])];
        let b = vec![file("b.csv", &["Số Cont", "Ngày"], vec![])];
        let config = ReconConfig {
            name: "x".into(),
            side_a: SideConfig { files: vec!["a.csv".into()], ..SideConfig::default() },
            side_b: SideConfig { files: vec!["b.csv".into()], ..SideConfig::default() },
        };
        let err = reconcile(&config, &a, &b).unwrap_err();
        assert!(err.to_string().contains("File A: no contract"), "{err}");
    }

    #[test]
    fn empty_inputs_give_empty_report() {
        let m = mapping_with_custom();
        assert!(compare(&[], &[], &m, &m, &[], &[]).is_empty());
    }
}
