// Epic catalog promotion classification
use crate::model::{Classification, ClassifiedRecord, SchemaError};
use crate::utils::{dig, dig_str, format_date, parse_datetime};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

pub const UNKNOWN_TITLE: &str = "Unknown Game";

const ELEMENTS_PATH: [&str; 4] = ["data", "Catalog", "searchStore", "elements"];
const OFFER_GROUPS: [&str; 2] = ["promotionalOffers", "upcomingPromotionalOffers"];

/// What a single catalog entry contributes to the output.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EntryClass {
    pub current: Option<ClassifiedRecord>,
    pub upcoming: Option<ClassifiedRecord>,
}

/// Returns the entry list of a raw storefront payload, if it has one.
pub fn catalog_elements(payload: &Value) -> Option<&[Value]> {
    dig(payload, &ELEMENTS_PATH)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Splits catalog entries into currently-free and upcoming-free records.
/// Entries with structural problems are dropped one by one; the rest are kept.
pub fn classify(entries: &[Value], now: DateTime<Utc>, store_base: &str) -> Classification {
    entries
        .iter()
        .enumerate()
        .fold(Classification::default(), |mut acc, (idx, entry)| {
            match classify_entry(entry, now, store_base) {
                Ok(class) => {
                    acc.current.extend(class.current);
                    acc.upcoming.extend(class.upcoming);
                }
                Err(e) => debug!("Skipping catalog entry #{}: {}", idx, e),
            }
            acc
        })
}

pub fn classify_entry(
    entry: &Value,
    now: DateTime<Utc>,
    store_base: &str,
) -> Result<EntryClass, SchemaError> {
    let mut class = EntryClass::default();

    let promotions = match entry.get("promotions") {
        None | Some(Value::Null) => return Ok(class),
        Some(p @ Value::Object(_)) => p,
        Some(_) => return Err(wrong_type("promotions", "object")),
    };

    let title = dig_str(entry, &["title"]).unwrap_or(UNKNOWN_TITLE);
    let url = format!(
        "{}/{}",
        store_base.trim_end_matches('/'),
        product_slug(entry).unwrap_or("")
    );
    let record = |date: DateTime<Utc>| ClassifiedRecord {
        title: title.to_string(),
        url: url.clone(),
        date: format_date(date),
    };

    for group in OFFER_GROUPS {
        for window in offer_windows(promotions, group)? {
            if !is_free(window) {
                continue;
            }
            let start = window_date(window, group, "startDate")?;
            let end = window_date(window, group, "endDate")?;

            if start <= now && now < end {
                if class.current.is_none() {
                    class.current = Some(record(end));
                }
            } else if now < start && class.upcoming.is_none() {
                class.upcoming = Some(record(start));
            }
        }
    }

    Ok(class)
}

/// Flattens `promotions.<group>[*].promotionalOffers[*]`.
fn offer_windows<'a>(promotions: &'a Value, group: &str) -> Result<Vec<&'a Value>, SchemaError> {
    let batches = match promotions.get(group) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(batches)) => batches,
        Some(_) => return Err(wrong_type(&format!("promotions.{}", group), "array")),
    };

    let mut windows = Vec::new();
    for (i, batch) in batches.iter().enumerate() {
        let batch_path = format!("promotions.{}[{}]", group, i);
        if !batch.is_object() {
            return Err(wrong_type(&batch_path, "object"));
        }
        let offers = match batch.get("promotionalOffers") {
            None | Some(Value::Null) => continue,
            Some(Value::Array(offers)) => offers,
            Some(_) => {
                return Err(wrong_type(&format!("{}.promotionalOffers", batch_path), "array"));
            }
        };
        for (j, window) in offers.iter().enumerate() {
            if !window.is_object() {
                return Err(wrong_type(
                    &format!("{}.promotionalOffers[{}]", batch_path, j),
                    "object",
                ));
            }
            windows.push(window);
        }
    }
    Ok(windows)
}

fn is_free(window: &Value) -> bool {
    dig(window, &["discountSetting", "discountPercentage"])
        .and_then(Value::as_f64)
        .is_some_and(|pct| pct == 0.0)
}

fn window_date(window: &Value, group: &str, key: &str) -> Result<DateTime<Utc>, SchemaError> {
    let raw = dig_str(window, &[key]).unwrap_or_default();
    parse_datetime(raw).ok_or_else(|| SchemaError::BadDate {
        path: format!("promotions.{}.{}", group, key),
        value: raw.to_string(),
    })
}

fn product_slug(entry: &Value) -> Option<&str> {
    dig_str(entry, &["productSlug"])
        .or_else(|| dig_str(entry, &["catalogNs", "mappings", "0", "pageSlug"]))
        .or_else(|| dig_str(entry, &["offerMappings", "0", "pageSlug"]))
}

fn wrong_type(path: &str, expected: &'static str) -> SchemaError {
    SchemaError::WrongType {
        path: path.to_string(),
        expected,
    }
}
