//! `GET /budget/category/all` payload.
//!
//! Each entry is a stored category budget:
//!   {"_id": "...", "category": "Food", "value": 300, "spent": 120.5, "month": 2, "year": 2024, ...}

use moneyboard_core::CategoryRecord;
use serde_json::Value;

use super::{ingest_array, number_field, string_field, Object};
use crate::types::{IngestError, IngestMode, IngestReport};

fn parse_category(obj: &Object) -> Result<CategoryRecord, String> {
    Ok(CategoryRecord {
        id: string_field(obj, &["_id", "id"])?,
        category_name: string_field(obj, &["category", "categoryName"])?,
        budgeted: number_field(obj, &["value", "budgeted"])?,
        spent: number_field(obj, &["spent"])?,
    })
}

pub fn ingest_categories(
    payload: &Value,
    mode: IngestMode,
) -> Result<IngestReport<CategoryRecord>, IngestError> {
    ingest_array(payload, mode, "category", parse_category)
}
