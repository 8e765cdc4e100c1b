//! `GET /expense/ranged/<start>/<end>` payload: expense entries carrying at
//! least `date` and `price`. Order is kept exactly as received.

use moneyboard_core::trend::epoch_millis;
use moneyboard_core::PricePoint;
use serde_json::Value;

use super::{ingest_array, number_field, string_field, Object};
use crate::types::{IngestError, IngestMode, IngestReport};

fn parse_expense(obj: &Object) -> Result<PricePoint, String> {
    let date = string_field(obj, &["date"])?;
    epoch_millis(&date).map_err(|e| e.to_string())?;
    Ok(PricePoint {
        date,
        price: number_field(obj, &["price"])?,
    })
}

pub fn ingest_expenses(
    payload: &Value,
    mode: IngestMode,
) -> Result<IngestReport<PricePoint>, IngestError> {
    ingest_array(payload, mode, "expense", parse_expense)
}
