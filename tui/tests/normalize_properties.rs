//! Properties of payload normalization that must hold for any input.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use anuncios_tui::listing::RecordId;
use anuncios_tui::normalize_listings;
use anuncios_tui::render::table::RowModel;
use anuncios_tui::render::table::format_price;
use proptest::prelude::*;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        ".{0,24}".prop_map(Value::from),
    ]
}

/// Object with an identifier plus any mix of the known fields.
fn listing_object() -> impl Strategy<Value = Value> {
    (
        prop_oneof![
            any::<i64>().prop_map(|n| ("id_anuncio", json!(n))),
            "[a-z0-9-]{1,12}".prop_map(|s| ("id", json!(s))),
        ],
        proptest::collection::vec(
            (
                prop::sample::select(vec![
                    "nombre",
                    "tipo",
                    "descripción",
                    "descripcion",
                    "precio",
                    "imagen",
                    "extra",
                ]),
                scalar(),
            ),
            0..6,
        ),
    )
        .prop_map(|((id_key, id), fields)| {
            let mut map = Map::new();
            map.insert(id_key.to_string(), id);
            for (key, value) in fields {
                map.insert(key.to_string(), value);
            }
            Value::Object(map)
        })
}

fn non_array() -> impl Strategy<Value = Value> {
    prop_oneof![
        scalar(),
        proptest::collection::btree_map("[a-z]{1,8}", scalar(), 0..5)
            .prop_map(|m| Value::Object(m.into_iter().collect())),
    ]
}

proptest! {
    #[test]
    fn output_length_matches_input(items in proptest::collection::vec(listing_object(), 0..40)) {
        let records = normalize_listings(&Value::Array(items.clone()));
        prop_assert_eq!(records.len(), items.len());
    }

    #[test]
    fn non_array_payloads_are_empty(raw in non_array()) {
        prop_assert!(normalize_listings(&raw).is_empty());
    }

    #[test]
    fn arbitrary_elements_never_break_rendering(items in proptest::collection::vec(scalar(), 0..20)) {
        let records = normalize_listings(&Value::Array(items.clone()));
        prop_assert_eq!(records.len(), items.len());
        for (index, record) in records.iter().enumerate() {
            prop_assert!(record.price.is_finite() && record.price >= 0.0);
            let row = RowModel::new(index, Some(record));
            prop_assert!(row.price.starts_with('$'));
            let _ = row.fit([3, 6, 9, 6, 12, 6], index % 2 == 0);
        }
    }

    #[test]
    fn missing_price_renders_zero(name in ".{0,16}", category in ".{0,16}") {
        let raw = json!([{ "id_anuncio": 1, "nombre": name, "tipo": category }]);
        let records = normalize_listings(&raw);
        prop_assert_eq!(format_price(records[0].price), "$0.00");
    }

    #[test]
    fn records_without_ids_key_by_position(count in 1usize..30) {
        let items: Vec<Value> = (0..count).map(|i| json!({ "nombre": format!("n{i}") })).collect();
        let records = normalize_listings(&Value::Array(items));
        for (index, record) in records.iter().enumerate() {
            prop_assert_eq!(&record.id, &RecordId::Position(index));
            prop_assert_eq!(record.id.key(), index.to_string());
        }
    }
}
