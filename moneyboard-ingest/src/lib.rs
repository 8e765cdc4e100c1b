//! moneyboard-ingest: turn raw budgeting-API JSON into typed records,
//! rejecting malformed entries instead of letting them reach the arithmetic.

pub mod payloads;
pub mod types;

pub use payloads::categories::ingest_categories;
pub use payloads::expenses::ingest_expenses;
pub use types::{IngestError, IngestMode, IngestReport, Rejected};
