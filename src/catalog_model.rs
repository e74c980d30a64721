//! Data model for the parts catalog.
//!
//! Catalog entries are schemaless: a [`Document`] is an ordered list of named
//! [`Value`]s, and two documents never have to share a field layout. A motor
//! carries a voltage, a frame carries a material, and a drivetrain carries a
//! list of references to the parts it is made of.
//!
//! Links between documents are first-class [`Reference`] values that know which
//! collection they point into, so nothing downstream has to guess whether a
//! string is data or a pointer.
//!
//! # Examples
//!
//! ```rust
//! use ebike_catalog::catalog_model::{CollectionKind, Document, DocumentId, Reference, Value};
//!
//! let yamaha = DocumentId::new();
//! let motor = Document::named("Motor")
//!     .with("voltage", 36)
//!     .with("wattage", 250)
//!     .with("manufacturer", Reference::new(CollectionKind::Manufacturers, yamaha));
//!
//! assert_eq!(motor.name(), Some("Motor"));
//! assert_eq!(motor.get("voltage"), Some(&Value::Integer(36)));
//! assert!(motor.get("manufacturer").map(Value::is_reference).unwrap_or(false));
//! ```

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field holding the store-assigned identifier in the JSON form of a document.
pub const ID_FIELD: &str = "_id";

/// Field used as the display label of a document.
pub const NAME_FIELD: &str = "name";

/// Store-assigned, never reused identifier of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        DocumentId(Uuid::new_v4())
    }

    /// Parses the hyphenated string form produced by [`Display`].
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(DocumentId)
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// The two collections of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Components,
    Manufacturers,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Components, CollectionKind::Manufacturers];

    /// Name of the collection inside the store.
    pub fn collection_name(&self) -> &'static str {
        match self {
            CollectionKind::Components => "component",
            CollectionKind::Manufacturers => "manufacturer",
        }
    }
}

impl Display for CollectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection_name())
    }
}

/// Pointer from a field of one document to another document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub collection: CollectionKind,
    pub id: DocumentId,
}

impl Reference {
    pub fn new(collection: CollectionKind, id: DocumentId) -> Self {
        Reference { collection, id }
    }

    pub fn component(id: DocumentId) -> Self {
        Self::new(CollectionKind::Components, id)
    }

    pub fn manufacturer(id: DocumentId) -> Self {
        Self::new(CollectionKind::Manufacturers, id)
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Document(Document),
    List(Vec<Value>),
    Reference(Reference),
}

impl Value {
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Reference(_))
    }

    /// True for nested documents and lists, the values rendered as blocks.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Document(_) | Value::List(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Reference(reference) => Some(reference),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Document(doc) => write!(f, "<document with {} fields>", doc.len()),
            Value::List(items) => write!(f, "<list of {}>", items.len()),
            Value::Reference(reference) => write!(f, "{}", reference),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Reference> for Value {
    fn from(value: Reference) -> Self {
        Value::Reference(value)
    }
}

/// A schemaless record: an optional store identifier plus fields in insertion order.
///
/// Setting a field that already exists replaces its value without moving it,
/// so merging property sets keeps the order in which fields first appeared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    fields: Vec<(String, Value)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document whose only field is its `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().with(NAME_FIELD, name.into())
    }

    /// Builder form of [`Document::set`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Copies every field of `other` into `self`, later values winning.
    pub fn merge(&mut self, other: Document) {
        for (field, value) in other.fields {
            self.set(field, value);
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Looks up a dotted path such as `list_price.value` through nested documents.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            match current {
                Value::Document(inner) => current = inner.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// The display label, if the document has a textual `name`.
    pub fn name(&self) -> Option<&str> {
        self.get(NAME_FIELD).and_then(Value::as_text)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
