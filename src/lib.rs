pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod schema;
pub mod store;

pub use error::LoadError;
