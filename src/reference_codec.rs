//! Text form of document references.
//!
//! Inside the crate a reference is a typed [`Reference`]. Catalog data written
//! by hand as JSON has no such type, so a reference there is a string made of
//! the [`REFERENCE_TAG`] followed by the target identifier, e.g.
//! `mongoid:3f1c...`. This module converts between the two forms.

use std::fmt::{Display, Formatter};

use serde_json::Value as JsonValue;

use crate::app_response::AppResponse;
use crate::catalog_model::{CollectionKind, Document, DocumentId, Reference, Value, ID_FIELD};

/// Prefix marking a string as a reference.
pub const REFERENCE_TAG: &str = "mongoid:";

/// Field whose references always point into the manufacturer collection.
pub const MANUFACTURER_FIELD: &str = "manufacturer";

pub fn encode(id: &DocumentId) -> String {
    format!("{}{}", REFERENCE_TAG, id)
}

/// True iff `value` is a string carrying the reference tag.
pub fn is_reference(value: &JsonValue) -> bool {
    value
        .as_str()
        .map(|text| text.starts_with(REFERENCE_TAG))
        .unwrap_or(false)
}

/// Strips the tag and parses the identifier behind it.
pub fn decode(tagged: &str) -> Result<DocumentId, AppResponse> {
    let raw = tagged.strip_prefix(REFERENCE_TAG).ok_or_else(|| {
        AppResponse::InvalidReference(format!("`{}` does not start with `{}`", tagged, REFERENCE_TAG))
    })?;

    DocumentId::parse(raw).map_err(|e| {
        AppResponse::InvalidReference(format!("`{}` is not a document identifier: {}", raw, e))
    })
}

/// Collection a tagged string under `field` points into.
pub fn target_collection(field: &str) -> CollectionKind {
    if field == MANUFACTURER_FIELD {
        CollectionKind::Manufacturers
    } else {
        CollectionKind::Components
    }
}

/// Converts an untyped JSON value found under `field` into a catalog [`Value`].
///
/// Tagged strings become references; list elements inherit the field of
/// their list. `null` has no catalog counterpart and is rejected.
pub fn value_from_json(field: &str, json: &JsonValue) -> Result<Value, AppResponse> {
    match json {
        JsonValue::String(text) if is_reference(json) => {
            let id = decode(text)?;
            Ok(Value::Reference(Reference::new(target_collection(field), id)))
        }
        JsonValue::String(text) => Ok(Value::Text(text.clone())),
        JsonValue::Bool(flag) => Ok(Value::Boolean(*flag)),
        JsonValue::Number(number) => match number.as_i64() {
            Some(n) => Ok(Value::Integer(n)),
            None => number.as_f64().map(Value::Float).ok_or_else(|| {
                AppResponse::ValidationError(format!("Field `{}` holds an unsupported number {}", field, number))
            }),
        },
        JsonValue::Array(items) => items
            .iter()
            .map(|item| value_from_json(field, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        JsonValue::Object(_) => document_from_json(json).map(Value::Document),
        JsonValue::Null => Err(AppResponse::ValidationError(format!("Field `{}` is null", field))),
    }
}

/// Converts a JSON object into a [`Document`], lifting `_id` into the document id.
pub fn document_from_json(json: &JsonValue) -> Result<Document, AppResponse> {
    let object = json
        .as_object()
        .ok_or_else(|| AppResponse::ValidationError("Expected a JSON object for a document".to_string()))?;

    let mut document = Document::new();
    for (field, value) in object {
        if field == ID_FIELD {
            let raw = value.as_str().ok_or_else(|| {
                AppResponse::ValidationError(format!("`{}` must be a string", ID_FIELD))
            })?;
            let id = match raw.strip_prefix(REFERENCE_TAG) {
                Some(_) => decode(raw)?,
                None => DocumentId::parse(raw).map_err(|e| {
                    AppResponse::InvalidReference(format!("`{}` is not a document identifier: {}", raw, e))
                })?,
            };
            document.id = Some(id);
            continue;
        }
        document.set(field.as_str(), value_from_json(field, value)?);
    }
    Ok(document)
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode(&self.id))
    }
}
