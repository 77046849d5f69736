//! Command implementations.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, bail};
use tracing::{info, warn};

use recon_ingest::{IngestOptions, IngestWarning, ingest_table, read_csv_table};
use recon_map::{ConfidenceBands, classify_suggestions};
use recon_model::{AggregateContext, ClassifiedMapping};
use recon_parse::parse_response;
use recon_report::write_csv_file;
use recon_store::{MappingStore, SnapshotStore, flush};

use crate::cli::{ApplyArgs, ExportArgs, IngestArgs, StatusArgs};

/// Result of `recon ingest`.
pub struct IngestOutcome {
    pub total: usize,
    pub context: AggregateContext,
    pub warnings: Vec<IngestWarning>,
}

/// Result of `recon apply`.
pub struct ApplyOutcome {
    pub parsed: usize,
    pub merged: usize,
    pub dropped: usize,
    pub orphans: usize,
}

/// Result of `recon status`.
pub struct StatusOutcome {
    pub total: usize,
    pub high_confidence: usize,
    pub threshold: u8,
    pub context: AggregateContext,
}

pub fn run_ingest(args: &IngestArgs) -> anyhow::Result<IngestOutcome> {
    let started = Instant::now();
    let table = read_csv_table(&args.input)?;
    let options = IngestOptions {
        session_id: args.session_id.clone(),
        source_file: args
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
    };
    let report = ingest_table(&table, &options)
        .with_context(|| format!("failed to ingest {}", args.input.display()))?;

    // Ingest replaces the session wholesale; surface what gets lost.
    match SnapshotStore::new(&args.session).load() {
        Ok(Some((prior, _))) => warn!(
            records = prior.len(),
            session = %args.session.display(),
            "overwriting existing session snapshot"
        ),
        Ok(None) => {}
        Err(error) => warn!(
            error = %format!("{error:#}"),
            "existing session snapshot is unreadable; overwriting"
        ),
    }

    let mut store = MappingStore::new();
    store.add_all(report.records);
    persist(&mut store, &args.session)?;

    info!(
        records = store.len(),
        warnings = report.warnings.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "ingest complete"
    );
    Ok(IngestOutcome {
        total: store.len(),
        context: store.aggregates(),
        warnings: report.warnings,
    })
}

pub fn run_apply(args: &ApplyArgs) -> anyhow::Result<ApplyOutcome> {
    let started = Instant::now();
    let mut store = load_session(&args.session)?;
    let response = fs::read_to_string(&args.response)
        .with_context(|| format!("failed to read response file {}", args.response.display()))?;

    let suggestions = parse_response(&response);
    let classified =
        classify_suggestions(&suggestions, store.records(), &ConfidenceBands::default());
    let (orphans, resolved): (Vec<ClassifiedMapping>, Vec<ClassifiedMapping>) =
        classified.into_iter().partition(ClassifiedMapping::is_orphan);

    // Orphans are new records; resolved suggestions update existing ones.
    for orphan in &orphans {
        store.add(orphan.record.clone());
    }
    let outcome = store.merge_suggestions(&resolved);
    persist(&mut store, &args.session)?;

    info!(
        parsed = suggestions.len(),
        merged = outcome.merged,
        dropped = outcome.dropped,
        orphans = orphans.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "apply complete"
    );
    Ok(ApplyOutcome {
        parsed: suggestions.len(),
        merged: outcome.merged,
        dropped: outcome.dropped,
        orphans: orphans.len(),
    })
}

pub fn run_export(args: &ExportArgs) -> anyhow::Result<usize> {
    let store = load_session(&args.session)?;
    write_csv_file(&args.output, store.records())
        .with_context(|| format!("failed to export to {}", args.output.display()))?;
    info!(records = store.len(), output = %args.output.display(), "export complete");
    Ok(store.len())
}

pub fn run_status(args: &StatusArgs) -> anyhow::Result<StatusOutcome> {
    let store = load_session(&args.session)?;
    let high_confidence = store
        .records()
        .iter()
        .filter(|r| r.confidence >= args.threshold)
        .count();
    Ok(StatusOutcome {
        total: store.len(),
        high_confidence,
        threshold: args.threshold,
        context: store.aggregates(),
    })
}

fn load_session(session: &Path) -> anyhow::Result<MappingStore> {
    let snapshot = SnapshotStore::new(session);
    let (records, changes) = snapshot
        .load()?
        .with_context(|| format!("no snapshot in {}; run ingest first", session.display()))?;
    Ok(MappingStore::from_parts(records, changes))
}

fn persist(store: &mut MappingStore, session: &Path) -> anyhow::Result<()> {
    let snapshot = SnapshotStore::new(session);
    if !flush(store, &snapshot) {
        bail!(
            "failed to persist session snapshot to {}",
            session.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn nanos() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    }

    fn write_chart_csv(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("recon-cli-chart-{}.csv", nanos()));
        let mut file = fs::File::create(&path).expect("create chart csv");
        file.write_all(contents.as_bytes()).expect("write chart csv");
        path
    }

    #[test]
    fn reingest_replaces_existing_session() {
        let session = std::env::temp_dir().join(format!("recon-cli-session-{}", nanos()));

        let first = write_chart_csv("Account_Code,Account_Description\n1000,Cash\n2000,AP\n");
        let outcome = run_ingest(&IngestArgs {
            input: first.clone(),
            session: session.clone(),
            session_id: None,
        })
        .expect("first ingest");
        assert_eq!(outcome.total, 2);

        let second = write_chart_csv("Account_Code,Account_Description\n3000,Inventory\n");
        let outcome = run_ingest(&IngestArgs {
            input: second.clone(),
            session: session.clone(),
            session_id: None,
        })
        .expect("ingest over existing session");
        assert_eq!(outcome.total, 1);

        let store = load_session(&session).expect("reload session");
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].source_code, "3000");

        let _ = fs::remove_file(first);
        let _ = fs::remove_file(second);
        let _ = fs::remove_dir_all(session);
    }
}
