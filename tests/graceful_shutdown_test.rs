//! Integration tests for graceful shutdown
//!
//! These tests verify that:
//! - Shutdown signals are properly propagated
//! - A cancelled batch stops scheduling new records
//! - In-flight records still finish and are written

mod common;

use common::{config_for, files_under, touch_all, FakeReader};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::watch;
use wfdb_json::core::export::{BatchPhase, ConversionCoordinator};

#[tokio::test]
async fn test_shutdown_signal_propagation() {
    let (shutdown_tx, shutdown_rx1) = watch::channel(false);
    let shutdown_rx2 = shutdown_rx1.clone();

    assert!(!*shutdown_rx1.borrow());
    assert!(!*shutdown_rx2.borrow());

    shutdown_tx.send(true).unwrap();

    assert!(*shutdown_rx1.borrow());
    assert!(*shutdown_rx2.borrow());
}

#[tokio::test]
async fn test_shutdown_before_start_schedules_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["a.hea", "b.hea", "c.hea"]);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    shutdown_tx.send(true).unwrap();

    let reader = Arc::new(FakeReader::new(4));
    let mut coordinator = ConversionCoordinator::new(
        config_for(input.path(), output.path()),
        reader.clone(),
        shutdown_rx,
    );
    let summary = coordinator.execute().await.unwrap();

    assert_eq!(coordinator.phase(), BatchPhase::Done);
    assert_eq!(summary.discovered, 3);
    assert_eq!(summary.converted, 0);
    assert_eq!(summary.not_scheduled, 3);
    assert!(summary.interrupted);
    assert_eq!(reader.reads(), 0);
    assert!(files_under(output.path()).is_empty());
}

#[tokio::test]
async fn test_in_flight_record_finishes_after_shutdown() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["a.hea", "b.hea", "c.hea", "d.hea"]);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut reader = FakeReader::new(4);
    reader.shutdown_on_read = Some(shutdown_tx);
    let reader = Arc::new(reader);

    let mut config = config_for(input.path(), output.path());
    config.conversion.max_concurrency = 1;

    let summary = ConversionCoordinator::new(config, reader.clone(), shutdown_rx)
        .execute()
        .await
        .unwrap();

    assert_eq!(reader.reads(), 1);
    assert_eq!(summary.converted, 1);
    assert_eq!(summary.not_scheduled, 3);
    assert!(summary.interrupted);
    assert!(!summary.is_successful());
    assert_eq!(files_under(output.path()), vec![PathBuf::from("a.json")]);
}

#[tokio::test]
async fn test_uninterrupted_batch_is_not_flagged() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    touch_all(input.path(), &["a.hea", "b.hea"]);

    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let summary = ConversionCoordinator::new(
        config_for(input.path(), output.path()),
        Arc::new(FakeReader::new(4)),
        shutdown_rx,
    )
    .execute()
    .await
    .unwrap();

    assert_eq!(summary.converted, 2);
    assert_eq!(summary.not_scheduled, 0);
    assert!(!summary.interrupted);
}
