use std::path::{Path, PathBuf};

use contrecon_core::FileData;
use contrecon_io::load_batch;
use contrecon_recon::{
    compare, filter_results, reconcile, CostMapping, MatchStatus, ReconConfig, ReconReport,
    StatusFilter,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_side(paths: &[PathBuf]) -> Vec<FileData> {
    let batch = load_batch(paths);
    assert!(batch.is_complete(), "failures: {:?}", batch.failures);
    batch.files
}

fn load_and_run(job: &Path) -> ReconReport {
    let toml = std::fs::read_to_string(job).unwrap();
    let config = ReconConfig::from_toml(&toml).unwrap();
    let base = job.parent().unwrap();
    let files_a = load_side(&config.side_a.resolve_files(base));
    let files_b = load_side(&config.side_b.resolve_files(base));
    reconcile(&config, &files_a, &files_b).unwrap()
}

// -------------------------------------------------------------------------
// Job fixture
// -------------------------------------------------------------------------

#[test]
fn march_job_end_to_end() {
    let report = load_and_run(&fixtures_dir().join("march.recon.toml"));

    assert_eq!(report.meta.config_name, "March trucking");
    assert_eq!(report.meta.side_a, "Internal");
    assert_eq!(report.meta.side_b, "Carrier");

    let rows: Vec<(&str, MatchStatus, f64)> = report
        .results
        .iter()
        .map(|r| (r.contract_no.as_str(), r.status, r.diff))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("MSKU1906227", MatchStatus::Match, 0.0),
            ("TGHU1234567", MatchStatus::Mismatch, -10000.0),
            ("CAIU7777777", MatchStatus::MissingB, 1_200_000.0),
            ("ZZZU0000001", MatchStatus::MissingA, -1_050_000.0),
        ]
    );

    let s = &report.summary;
    assert_eq!((s.total, s.matched, s.mismatched, s.missing_a, s.missing_b), (4, 1, 1, 1, 1));
    assert_eq!(s.total_cost_a, 4_850_000.0);
    assert_eq!(s.total_cost_b, 4_710_000.0);
    assert_eq!(s.net_diff, 140_000.0);
}

#[test]
fn annotated_bill_and_container_suffix_still_pair() {
    let report = load_and_run(&fixtures_dir().join("march.recon.toml"));
    let msku = &report.results[0];

    assert_eq!(msku.id, "MSKU1906227|2024-03-01|7265053640");
    assert_eq!(msku.rows_a.len(), 2);
    assert_eq!(msku.rows_a[0].row_number, 3);
    assert_eq!(msku.rows_a[1].row_number, 6);
    assert_eq!(msku.rows_a[0].source_file.as_deref(), Some("internal.csv"));
    assert_eq!(msku.rows_b.len(), 1);
    assert_eq!(msku.rows_b[0].row_number, 3);
    assert_eq!(msku.breakdown_a["lift_unload"], 550_000.0);
    assert_eq!(msku.breakdown_a["transport_fee"], 1_600_000.0);
    assert_eq!(msku.breakdown_b["lift_unload"], 550_000.0);
    assert_eq!(msku.breakdown_b["transport_fee"], 1_600_000.0);
}

#[test]
fn suggested_mapping_for_carrier_side() {
    let base = fixtures_dir();
    let files = load_side(&[base.join("carrier.csv")]);
    let config = ReconConfig::from_toml(
        &std::fs::read_to_string(base.join("march.recon.toml")).unwrap(),
    )
    .unwrap();
    let keys = config.side_b.selected_sheet_keys(&files);
    assert_eq!(keys, vec!["carrier.csv::carrier"]);

    let m = config.side_b.effective_mapping(&files, &keys);
    assert_eq!(m.contract_no.as_deref(), Some("Container"));
    assert_eq!(m.date.as_deref(), Some("Ngày vận chuyển"));
    assert_eq!(m.bill_no.as_deref(), Some("Bill"));
    assert_eq!(m.lift_unload, vec!["Lift"]);
    assert_eq!(m.transport_fee, vec!["Trucking"]);
    assert_eq!(m.toll, vec!["Cầu đường"]);
}

#[test]
fn filters_over_a_real_run() {
    let report = load_and_run(&fixtures_dir().join("march.recon.toml"));
    let missing = filter_results(&report.results, StatusFilter::Missing, "");
    assert_eq!(missing.len(), 2);
    let found = filter_results(&report.results, StatusFilter::Discrepancies, "tghu");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].status, MatchStatus::Mismatch);
}

// -------------------------------------------------------------------------
// Adversarial
// -------------------------------------------------------------------------

#[test]
fn adversarial_swapping_sides_mirrors_results() {
    let base = fixtures_dir();
    let a = load_side(&[base.join("internal.csv")]);
    let b = load_side(&[base.join("carrier.csv")]);
    let ka = vec!["internal.csv::internal".to_string()];
    let kb = vec!["carrier.csv::carrier".to_string()];
    let ma = contrecon_recon::map_headers(&a[0].sheets[0].headers);
    let mb = contrecon_recon::map_headers(&b[0].sheets[0].headers);

    let forward = compare(&a, &b, &ma, &mb, &ka, &kb);
    let backward = compare(&b, &a, &mb, &ma, &kb, &ka);

    assert_eq!(forward.len(), backward.len());
    for f in &forward {
        let r = backward.iter().find(|r| r.id == f.id).unwrap();
        assert_eq!(r.total_cost_a, f.total_cost_b);
        assert_eq!(r.total_cost_b, f.total_cost_a);
        let mirrored = match f.status {
            MatchStatus::MissingA => MatchStatus::MissingB,
            MatchStatus::MissingB => MatchStatus::MissingA,
            other => other,
        };
        assert_eq!(r.status, mirrored);
    }
}

#[test]
fn adversarial_unmapped_mapping_yields_nothing() {
    let base = fixtures_dir();
    let a = load_side(&[base.join("internal.csv")]);
    let keys = vec!["internal.csv::internal".to_string()];
    assert!(compare(&a, &a, &CostMapping::default(), &CostMapping::default(), &keys, &keys).is_empty());
}

#[test]
fn adversarial_json_contract() {
    let report = load_and_run(&fixtures_dir().join("march.recon.toml"));
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["summary"]["total"], 4);
    let first = &json["results"][0];
    assert_eq!(first["status"], "MATCH");
    assert_eq!(first["id"], "MSKU1906227|2024-03-01|7265053640");
    assert_eq!(first["total_cost_a"], 2_150_000.0);
    assert_eq!(first["rows_a"][0]["values"]["Số Cont"], "MSKU1906227");
    assert_eq!(first["rows_a"][0]["source_sheet"], "internal");
    assert!(json["meta"]["engine_version"].is_string());
}
