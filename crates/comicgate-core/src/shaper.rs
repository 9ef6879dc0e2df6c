//! Response shaping
//!
//! Trims upstream entities to the fields the client renders. The transform is
//! total: unexpected shapes are passed through or omitted, never rejected.

use serde_json::{Map, Value as JsonValue};

use crate::types::{ResourceKind, UpstreamResponse};

/// Upper bound on the comic/series summaries kept per character
pub const MAX_SUMMARY_ITEMS: usize = 5;

const CHARACTER_FIELDS: &[&str] = &["id", "name", "description", "thumbnail", "urls"];
const CHARACTER_SUMMARIES: &[&str] = &["comics", "series"];
const COMIC_FIELDS: &[&str] =
    &["id", "title", "description", "thumbnail", "dates", "pageCount", "urls"];
const SERIES_FIELDS: &[&str] =
    &["id", "title", "description", "thumbnail", "startYear", "endYear", "urls"];

/// Project every `data.results` entry of a successful upstream reply.
/// Anything other than `code == 200` with a results array is returned untouched.
pub fn shape(kind: ResourceKind, mut response: UpstreamResponse) -> UpstreamResponse {
    if response.code() != Some(200) {
        return response;
    }

    if let Some(results) =
        response.body.pointer_mut("/data/results").and_then(JsonValue::as_array_mut)
    {
        for entity in results.iter_mut() {
            *entity = project(kind, std::mem::take(entity));
        }
    }

    response
}

fn project(kind: ResourceKind, entity: JsonValue) -> JsonValue {
    let JsonValue::Object(source) = entity else {
        return entity;
    };

    let mut shaped = Map::new();
    match kind {
        ResourceKind::Characters | ResourceKind::Character => {
            copy_fields(&source, &mut shaped, CHARACTER_FIELDS);
            for name in CHARACTER_SUMMARIES {
                if let Some(summary) = source.get(*name).and_then(summarize) {
                    shaped.insert((*name).to_string(), summary);
                }
            }
        }
        ResourceKind::Comics => copy_fields(&source, &mut shaped, COMIC_FIELDS),
        ResourceKind::Series => copy_fields(&source, &mut shaped, SERIES_FIELDS),
    }
    JsonValue::Object(shaped)
}

fn copy_fields(source: &Map<String, JsonValue>, target: &mut Map<String, JsonValue>, fields: &[&str]) {
    for field in fields {
        if let Some(value) = source.get(*field) {
            target.insert((*field).to_string(), value.clone());
        }
    }
}

/// `{available, items}` with items capped at [`MAX_SUMMARY_ITEMS`]
fn summarize(list: &JsonValue) -> Option<JsonValue> {
    let list = list.as_object()?;
    let mut summary = Map::new();
    if let Some(available) = list.get("available") {
        summary.insert("available".to_string(), available.clone());
    }
    if let Some(items) = list.get("items").and_then(JsonValue::as_array) {
        let capped = items.iter().take(MAX_SUMMARY_ITEMS).cloned().collect();
        summary.insert("items".to_string(), JsonValue::Array(capped));
    }
    Some(JsonValue::Object(summary))
}
