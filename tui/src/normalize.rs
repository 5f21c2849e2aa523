//! Shapes the raw listings payload into [`ListingRecord`]s.
//!
//! Pure and total: any JSON value is accepted, nothing panics, and an array
//! of N elements always yields N records in the same order. Anything that is
//! not an array yields no records.

use serde_json::Value;
use url::Url;

use crate::listing::ListingRecord;
use crate::listing::RecordId;

pub const PRIMARY_ID_KEY: &str = "id_anuncio";
pub const SECONDARY_ID_KEY: &str = "id";

// First present, non-null key wins. Text fields also skip objects and arrays.
const NAME_KEYS: &[&str] = &["nombre", "name"];
const CATEGORY_KEYS: &[&str] = &["tipo", "category"];
const DESCRIPTION_KEYS: &[&str] = &["descripción", "descripcion", "description"];
const PRICE_KEYS: &[&str] = &["precio", "price"];
const IMAGE_KEYS: &[&str] = &["imagen", "imageUrl", "image"];

pub fn normalize_listings(raw: &Value) -> Vec<ListingRecord> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .map(|(position, item)| normalize_record(position, item))
        .collect()
}

/// Normalize one payload element. Non-objects become a defaulted record
/// keyed by `position`.
pub fn normalize_record(position: usize, item: &Value) -> ListingRecord {
    ListingRecord {
        id: derive_id(item, position),
        name: text_field(item, NAME_KEYS),
        category: text_field(item, CATEGORY_KEYS),
        description: text_field(item, DESCRIPTION_KEYS),
        price: first_field(item, PRICE_KEYS).map_or(0.0, parse_price),
        image_url: first_field(item, IMAGE_KEYS).and_then(parse_image_url),
    }
}

/// `id_anuncio`, then `id`, then the element's position.
pub fn derive_id(item: &Value, position: usize) -> RecordId {
    [PRIMARY_ID_KEY, SECONDARY_ID_KEY]
        .iter()
        .find_map(|key| item.get(*key).and_then(usable_id))
        .unwrap_or(RecordId::Position(position))
}

fn usable_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(RecordId::Int(i));
            }
            // Past i64::MAX the exact digits are the only faithful key.
            if let Some(u) = n.as_u64() {
                return Some(RecordId::Text(u.to_string()));
            }
            if let Some(f) = n.as_f64() {
                // 3.0 and 3 name the same row. `i64::MAX as f64` rounds up to
                // 2^63, so the upper bound is exclusive.
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    return Some(RecordId::Int(f as i64));
                }
            }
            Some(RecordId::Text(n.to_string()))
        }
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| RecordId::Text(trimmed.to_string()))
        }
        _ => None,
    }
}

fn first_field<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| item.get(*key).filter(|v| !v.is_null()))
}

/// First candidate holding a scalar; nulls, objects and arrays fall through
/// to the next key.
fn text_field(item: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| item.get(*key).and_then(scalar_text))
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers and numeric strings; anything else, negative, or non-finite is 0.
pub fn parse_price(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if p.is_finite() && p > 0.0 => p,
        _ => 0.0,
    }
}

fn parse_image_url(value: &Value) -> Option<String> {
    let raw = value.as_str()?.trim();
    let url = Url::parse(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| raw.to_string())
}
