//! Integration tests for batch conversion
//!
//! These tests run the coordinator end to end against a fake record reader
//! and verify discovery, failure isolation, output layout and idempotence.

mod common;

use common::{config_for, files_under, read_json, touch_all, FakeReader};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::watch;
use wfdb_json::config::{NonFinitePolicy, OutputLayout, WfdbJsonConfig};
use wfdb_json::core::export::{ConversionCoordinator, ConversionSummary};
use wfdb_json::domain::{DiscoveryError, FailureStage, WfdbJsonError};

async fn run(config: WfdbJsonConfig, reader: Arc<FakeReader>) -> ConversionSummary {
    let (_tx, rx) = watch::channel(false);
    ConversionCoordinator::new(config, reader, rx)
        .execute()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_sibling_files_produce_one_document() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["a.hea", "a.dat", "a.xyz"]);

    let reader = Arc::new(FakeReader::new(10));
    let summary = run(config_for(input.path(), output.path()), reader.clone()).await;

    assert_eq!(summary.discovered, 1);
    assert_eq!(summary.converted, 1);
    assert_eq!(reader.reads(), 1);
    assert_eq!(files_under(output.path()), vec![PathBuf::from("a.json")]);
}

#[tokio::test]
async fn test_rerun_overwrites_outputs() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["r1.hea", "r2.hea"]);
    let config = config_for(input.path(), output.path());

    let first = run(config.clone(), Arc::new(FakeReader::new(4))).await;
    assert_eq!(first.converted, 2);

    let second = run(config, Arc::new(FakeReader::new(6))).await;
    assert_eq!(second.converted, 2);
    assert_eq!(second.failed, 0);

    assert_eq!(
        files_under(output.path()),
        vec![PathBuf::from("r1.json"), PathBuf::from("r2.json")]
    );
    let doc = read_json(&output.path().join("r1.json"));
    assert_eq!(doc["sig_len"], json!(6));
}

#[tokio::test]
async fn test_corrupt_record_is_isolated() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["a.hea", "b.hea", "c.hea"]);

    let reader = Arc::new(FakeReader::new(10).with_corrupt(&["b"]));
    let summary = run(config_for(input.path(), output.path()), reader).await;

    assert_eq!(summary.discovered, 3);
    assert_eq!(summary.converted, 2);
    assert_eq!(summary.failed, 1);
    assert!(!summary.interrupted);

    let failure = &summary.failures[0];
    assert_eq!(failure.record_id.base_name(), "b");
    assert_eq!(failure.error.stage(), FailureStage::Decode);

    assert_eq!(
        files_under(output.path()),
        vec![PathBuf::from("a.json"), PathBuf::from("c.json")]
    );
    for name in ["a.json", "c.json"] {
        let doc = read_json(&output.path().join(name));
        assert_eq!(doc["n_sig"], json!(2));
    }
}

#[tokio::test]
async fn test_signal_shape_is_row_major() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["long.hea"]);

    run(
        config_for(input.path(), output.path()),
        Arc::new(FakeReader::new(1000)),
    )
    .await;

    let doc = read_json(&output.path().join("long.json"));
    let rows = doc["p_signal"].as_array().unwrap();
    assert_eq!(rows.len(), 1000);
    assert!(rows.iter().all(|r| r.as_array().unwrap().len() == 2));
    assert_eq!(rows[0], json!([0.0, 0.25]));
    assert_eq!(rows[999], json!([499.5, 499.75]));
}

#[tokio::test]
async fn test_document_keys_and_nulls() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["rec.hea"]);

    run(
        config_for(input.path(), output.path()),
        Arc::new(FakeReader::new(2)),
    )
    .await;

    let text = std::fs::read_to_string(output.path().join("rec.json")).unwrap();
    assert!(text.contains("\n    \"record_name\": \"rec\""));

    let doc: Value = serde_json::from_str(&text).unwrap();
    let keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "record_name",
            "n_sig",
            "fs",
            "counter_freq",
            "base_counter",
            "sig_len",
            "base_time",
            "base_date",
            "comments",
            "sig_name",
            "d_signal",
            "e_d_signal",
            "p_signal",
            "e_p_signal",
            "units",
            "init_value",
            "checksum",
            "block_size",
        ]
    );
    assert_eq!(doc["base_time"], Value::Null);
    assert_eq!(doc["base_date"], Value::Null);
    assert_eq!(doc["d_signal"], Value::Null);
}

#[tokio::test]
async fn test_empty_input_completes() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["notes.txt", "sub/data.dat"]);

    let reader = Arc::new(FakeReader::new(10));
    let summary = run(config_for(input.path(), output.path()), reader.clone()).await;

    assert_eq!(summary.discovered, 0);
    assert_eq!(summary.converted, 0);
    assert!(summary.is_successful());
    assert_eq!(reader.reads(), 0);
    assert!(files_under(output.path()).is_empty());
}

#[tokio::test]
async fn test_missing_input_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir.path().join("missing"), &dir.path().join("out"));
    let (_tx, rx) = watch::channel(false);

    let result = ConversionCoordinator::new(config, Arc::new(FakeReader::new(1)), rx)
        .execute()
        .await;

    assert!(matches!(
        result,
        Err(WfdbJsonError::Discovery(DiscoveryError::RootNotFound(_)))
    ));
}

#[tokio::test]
async fn test_flat_layout_collision_fails_later_record() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["set1/r.hea", "set2/r.hea"]);

    let summary = run(
        config_for(input.path(), output.path()),
        Arc::new(FakeReader::new(3)),
    )
    .await;

    assert_eq!(summary.converted, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].error.stage(), FailureStage::Write);
    assert!(summary.failures[0].record_id.as_path().ends_with("set2/r"));

    let doc = read_json(&output.path().join("r.json"));
    let owner = doc["comments"][0].as_str().unwrap();
    assert!(owner.ends_with("set1/r"), "{owner}");
}

#[tokio::test]
async fn test_corrupt_record_does_not_block_same_base_name() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["a/r1.hea", "b/r1.hea"]);

    let reader = FakeReader::new(3).with_corrupt_under(&input.path().join("a"));
    let summary = run(config_for(input.path(), output.path()), Arc::new(reader)).await;

    assert_eq!(summary.converted, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].error.stage(), FailureStage::Decode);
    assert!(summary.failures[0].record_id.as_path().ends_with("a/r1"));

    let doc = read_json(&output.path().join("r1.json"));
    let owner = doc["comments"][0].as_str().unwrap();
    assert!(owner.ends_with("b/r1"), "{owner}");
}

#[tokio::test]
async fn test_mirror_layout_reproduces_tree() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["set1/r.hea", "set2/deep/r.hea", "top.hea"]);

    let mut config = config_for(input.path(), output.path());
    config.output.layout = OutputLayout::Mirror;
    let summary = run(config, Arc::new(FakeReader::new(3))).await;

    assert_eq!(summary.converted, 3);
    assert_eq!(
        files_under(output.path()),
        vec![
            PathBuf::from("set1/r.json"),
            PathBuf::from("set2/deep/r.json"),
            PathBuf::from("top.json"),
        ]
    );
}

#[tokio::test]
async fn test_output_directory_is_created() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["a.hea"]);
    let nested = output.path().join("x/y/z");

    let summary = run(config_for(input.path(), &nested), Arc::new(FakeReader::new(1))).await;
    assert_eq!(summary.converted, 1);
    assert!(nested.join("a.json").is_file());
}

#[tokio::test]
async fn test_non_finite_policies() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["a.hea"]);

    let mut reader = FakeReader::new(2);
    reader.non_finite = true;
    let reader = Arc::new(reader);

    let summary = run(config_for(input.path(), output.path()), reader.clone()).await;
    assert_eq!(summary.converted, 1);
    let doc = read_json(&output.path().join("a.json"));
    assert_eq!(doc["p_signal"][0], json!([null, 0.25]));

    let strict_out = TempDir::new().unwrap();
    let mut config = config_for(input.path(), strict_out.path());
    config.encoding.non_finite = NonFinitePolicy::Fail;
    let summary = run(config, reader).await;
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].error.stage(), FailureStage::Encode);
    assert!(files_under(strict_out.path()).is_empty());
}

#[tokio::test]
async fn test_concurrent_conversion_matches_sequential() {
    let input = TempDir::new().unwrap();
    let names: Vec<String> = (0..40).map(|i| format!("r{i:02}.hea")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    touch_all(input.path(), &refs);

    let sequential = TempDir::new().unwrap();
    let mut config = config_for(input.path(), sequential.path());
    config.conversion.max_concurrency = 1;
    let seq_summary = run(config, Arc::new(FakeReader::new(5).with_corrupt(&["r07"]))).await;

    let parallel = TempDir::new().unwrap();
    let mut config = config_for(input.path(), parallel.path());
    config.conversion.max_concurrency = 16;
    let par_summary = run(config, Arc::new(FakeReader::new(5).with_corrupt(&["r07"]))).await;

    assert_eq!(seq_summary.converted, 39);
    assert_eq!(par_summary.converted, 39);
    assert_eq!(par_summary.failed, 1);
    assert_eq!(files_under(sequential.path()), files_under(parallel.path()));
    for file in files_under(sequential.path()) {
        assert_eq!(
            std::fs::read(sequential.path().join(&file)).unwrap(),
            std::fs::read(parallel.path().join(&file)).unwrap()
        );
    }
}
