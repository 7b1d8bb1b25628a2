//! Pipeline orchestration: read, realign and coerce, load.
//!
//! The stages run strictly in order inside one task; nothing here is
//! concurrent and nothing retries. The outcome is an explicit result the
//! caller turns into its exit behavior, rather than a catch-all at the
//! process boundary.

use std::path::Path;

use mongodb::bson::Document;
use mongodb::Database;
use tracing::{info, instrument};

use crate::error::LoadError;
use crate::ingest::{self, coerce};
use crate::store;

/// Outcome of a successful run.
#[derive(Debug)]
pub struct LoadSummary {
    /// Records actually inserted into the collection.
    pub inserted: u64,
    /// First inserted record, for the operator summary. None when nothing
    /// was inserted.
    pub sample: Option<Document>,
}

/// Run the whole load against `db` from the export at `csv_path`.
///
/// Errors abort the run with no partial-persistence guarantee beyond the
/// last completed store step; the caller reports them as zero records.
#[instrument(level = "info", skip(db, csv_path), fields(path = %csv_path.display()))]
pub async fn run_load(db: &Database, csv_path: &Path) -> Result<LoadSummary, LoadError> {
    let table = ingest::read_raw_table(csv_path)?;
    let records = coerce::build_records(&table);
    let sample = records.first().cloned();

    let inserted = store::replace_collection(db, records).await?;
    info!(inserted, "load complete");

    Ok(LoadSummary {
        inserted,
        sample: if inserted > 0 { sample } else { None },
    })
}
