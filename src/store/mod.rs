//! Destination collection maintenance.
//!
//! The unit of update is the whole collection: every run deletes what is
//! there and bulk-inserts the fresh record set. The window between delete
//! and insert is visible to concurrent readers; this is a batch refresh
//! tool, not a live-serving path, and that is accepted.

use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{debug, info, instrument};

use crate::error::LoadError;

/// Name of the destination collection.
pub const COLLECTION: &str = "alumni";

/// Connect to the store and resolve the target database. Built once per run
/// and passed into the pipeline; dropped when the run ends.
pub async fn connect(uri: &str, db_name: &str) -> Result<Database, LoadError> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client.database(db_name))
}

/// Replace the collection's contents with `records` and (re)create the
/// lookup indexes. Returns the number of records actually inserted.
///
/// Order matters: delete, then insert, then indexes. Uniqueness of
/// `alumni_id` is the store's job; a duplicate in `records` makes the
/// insert fail rather than being silently absorbed.
#[instrument(level = "info", skip(db, records), fields(records = records.len()))]
pub async fn replace_collection(
    db: &Database,
    records: Vec<Document>,
) -> Result<u64, LoadError> {
    let coll = db.collection::<Document>(COLLECTION);

    let deleted = coll.delete_many(doc! {}).await?.deleted_count;
    debug!(deleted, "cleared existing records");

    let inserted = if records.is_empty() {
        info!("no records to insert");
        0
    } else {
        coll.insert_many(records).await?.inserted_ids.len() as u64
    };

    ensure_indexes(&coll).await?;
    info!(inserted, "collection replaced");
    Ok(inserted)
}

/// Create the fixed index set: a unique index on `alumni_id` and plain
/// lookup indexes on `email`, `major`, `industry`. Safe to repeat across
/// runs; existing identical indexes are left in place by the server.
pub async fn ensure_indexes(coll: &Collection<Document>) -> Result<(), LoadError> {
    let models = vec![
        IndexModel::builder()
            .keys(doc! { "alumni_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
        IndexModel::builder().keys(doc! { "email": 1 }).build(),
        IndexModel::builder().keys(doc! { "major": 1 }).build(),
        IndexModel::builder().keys(doc! { "industry": 1 }).build(),
    ];
    coll.create_indexes(models).await?;
    Ok(())
}

// Integration tests live in src/pipeline/mod.rs; they need a reachable
// MongoDB and are skipped when MONGO_URL is not set.
