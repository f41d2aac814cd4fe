//! Conversion coordinator - main orchestrator for a batch run
//!
//! Runs discovery, assigns output paths, then converts records on a bounded
//! pool of blocking workers. A shutdown signal stops new records from being
//! scheduled while in-flight conversions finish.

use super::converter::{output_path_for, ConversionOutcome, RecordConverter};
use super::discovery::discover_records;
use super::summary::ConversionSummary;
use crate::adapters::RecordReader;
use crate::config::WfdbJsonConfig;
use crate::core::encode::JsonEncoder;
use crate::domain::{ConversionError, RecordId, Result, WfdbJsonError, WriteError};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Batch lifecycle; no phase is revisited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Idle,
    Discovering,
    Converting,
    Done,
}

/// Records sharing one output path, in identifier order
///
/// Members are converted one after another; the first that succeeds owns
/// the path and the rest fail with [`WriteError::OutputCollision`].
#[derive(Debug)]
struct OutputGroup {
    target: PathBuf,
    ids: Vec<RecordId>,
}

/// Conversion coordinator
pub struct ConversionCoordinator {
    config: WfdbJsonConfig,
    converter: Arc<RecordConverter>,
    shutdown_signal: watch::Receiver<bool>,
    phase: BatchPhase,
}

impl ConversionCoordinator {
    /// Create a new conversion coordinator
    pub fn new(
        config: WfdbJsonConfig,
        reader: Arc<dyn RecordReader>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        let converter = RecordConverter::new(
            reader,
            JsonEncoder::new(config.encoding.non_finite),
            config.output.indent,
        )
        .with_dry_run(config.application.dry_run);

        Self {
            config,
            converter: Arc::new(converter),
            shutdown_signal,
            phase: BatchPhase::Idle,
        }
    }

    /// Current batch phase
    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    /// Execute the batch
    ///
    /// Only discovery failures are returned as errors. Per-record failures
    /// end up in the summary.
    pub async fn execute(&mut self) -> Result<ConversionSummary> {
        let start_time = Instant::now();
        let mut summary = ConversionSummary::new(self.config.application.dry_run);

        self.phase = BatchPhase::Discovering;
        let root = self.config.input.root.clone();
        tracing::info!(
            root = %root.display(),
            extension = %self.config.input.header_extension,
            "Discovering records"
        );

        let records = {
            let root = root.clone();
            let extension = self.config.input.header_extension.clone();
            tokio::task::spawn_blocking(move || discover_records(&root, &extension))
                .await
                .map_err(|e| WfdbJsonError::Other(format!("Discovery task failed: {e}")))??
        };
        summary.discovered = records.len();

        if records.is_empty() {
            tracing::warn!(root = %root.display(), "No records found");
            self.phase = BatchPhase::Done;
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        self.phase = BatchPhase::Converting;
        let total = records.len();
        let plan = self.plan_outputs(records, &root);
        tracing::info!(
            total,
            max_concurrency = self.config.conversion.max_concurrency,
            dry_run = self.config.application.dry_run,
            "Converting records"
        );

        let converter = Arc::clone(&self.converter);
        let shutdown = self.shutdown_signal.clone();
        let mut outcomes = stream::iter(plan)
            .take_while(move |_| {
                let stop = *shutdown.borrow();
                future::ready(!stop)
            })
            .map(|group| run_group(Arc::clone(&converter), group))
            .buffer_unordered(self.config.conversion.max_concurrency);

        while let Some(group_outcomes) = outcomes.next().await {
            for outcome in group_outcomes {
                summary.record(outcome);
            }
            crate::log_batch_progress!(summary.processed(), total);
        }

        summary.not_scheduled = total - summary.processed();
        if summary.not_scheduled > 0 {
            summary.interrupted = true;
            tracing::warn!(
                not_scheduled = summary.not_scheduled,
                "Shutdown requested, remaining records were not scheduled"
            );
        }

        self.phase = BatchPhase::Done;
        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Groups records by output path
    ///
    /// Records arrive in identifier order, so every group lists its
    /// candidates lexicographically and groups are scheduled by their first
    /// member.
    fn plan_outputs(&self, records: BTreeSet<RecordId>, root: &Path) -> Vec<OutputGroup> {
        let output = &self.config.output;
        let mut slots: BTreeMap<PathBuf, usize> = BTreeMap::new();
        let mut groups: Vec<OutputGroup> = Vec::new();

        for id in records {
            let target = output_path_for(&id, root, &output.directory, output.layout);
            match slots.get(&target) {
                Some(&index) => groups[index].ids.push(id),
                None => {
                    slots.insert(target.clone(), groups.len());
                    groups.push(OutputGroup {
                        target,
                        ids: vec![id],
                    });
                }
            }
        }
        groups
    }
}

/// Runs one output group on the blocking pool
async fn run_group(converter: Arc<RecordConverter>, group: OutputGroup) -> Vec<ConversionOutcome> {
    let ids = group.ids.clone();
    tokio::task::spawn_blocking(move || convert_group(&converter, &group))
        .await
        .unwrap_or_else(|e| {
            let error = e.to_string();
            ids.into_iter()
                .map(|id| {
                    let error = ConversionError::Internal(error.clone());
                    crate::log_conversion_failure!(&id, error.stage(), &error);
                    ConversionOutcome::failed(id, error)
                })
                .collect()
        })
}

/// Converts group members in order until one claims the output path
fn convert_group(converter: &RecordConverter, group: &OutputGroup) -> Vec<ConversionOutcome> {
    let mut outcomes = Vec::with_capacity(group.ids.len());
    let mut owner: Option<&RecordId> = None;

    for id in &group.ids {
        let outcome = match owner {
            None => converter.convert(id, &group.target),
            Some(owner) => {
                tracing::warn!(
                    record_id = %id,
                    owner = %owner,
                    output_path = %group.target.display(),
                    "Output path already claimed"
                );
                ConversionOutcome::failed(
                    id.clone(),
                    WriteError::OutputCollision {
                        path: group.target.clone(),
                        owner: owner.to_string(),
                    },
                )
            }
        };
        if owner.is_none() && outcome.is_converted() {
            owner = Some(id);
        }
        outcomes.push(outcome);
    }
    outcomes
}
