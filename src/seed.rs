//! Populating the catalog.
//!
//! The helpers here create manufacturers and components and wire them together
//! with references. [`seed_demo_catalog`] uses them to model a complete
//! Haibike SDURO AllMtn RC e-bike: frame, battery, motor and a drivetrain
//! sub-assembly, all composed into one full build.

use log::{debug, info};

use crate::app_response::AppResponse;
use crate::catalog_model::{CollectionKind, Document, DocumentId, Reference, Value, NAME_FIELD};
use crate::catalog_store::{DocumentStore, Filter};

/// Field holding a manufacturer's lookup key.
pub const SHORTNAME_FIELD: &str = "shortname";

/// Field holding the references of a sub-assembly or build.
pub const COMPONENTS_FIELD: &str = "components";

/// Flag marking a component as a complete bike.
pub const FULL_BUILD_FIELD: &str = "full-build";

/// Lookup key for a manufacturer: lowercase with spaces replaced by `-`.
pub fn shortname(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Inserts `properties` plus a `name` field into `kind` and returns the new id.
pub fn create_document(
    store: &impl DocumentStore,
    kind: CollectionKind,
    name: &str,
    properties: Document,
) -> Result<DocumentId, AppResponse> {
    let mut document = properties;
    document.set(NAME_FIELD, name);
    let id = store.insert(kind, document)?;
    debug!("Created {} `{}` as {}", kind, name, id);
    Ok(id)
}

/// Inserts a manufacturer with its derived shortname.
pub fn create_manufacturer(
    store: &impl DocumentStore,
    name: &str,
    properties: Document,
) -> Result<DocumentId, AppResponse> {
    let mut document = properties;
    document.set(SHORTNAME_FIELD, shortname(name));
    create_document(store, CollectionKind::Manufacturers, name, document)
}

/// Reference to the manufacturer registered under `short`.
///
/// An unknown shortname is almost always a typo in the seed data, so it fails
/// with [`AppResponse::NotFound`] naming the shortname.
pub fn manufacturer_ref(store: &impl DocumentStore, short: &str) -> Result<Value, AppResponse> {
    let manufacturer = store.find_one(CollectionKind::Manufacturers, &Filter::equals(SHORTNAME_FIELD, short))?;

    match manufacturer.and_then(|document| document.id) {
        Some(id) => Ok(Value::Reference(Reference::manufacturer(id))),
        None => Err(AppResponse::NotFound(format!(
            "Manufacturer `{}` not found - check spelling?",
            short
        ))),
    }
}

/// List of component references, in the given order.
pub fn reference_group(ids: &[DocumentId]) -> Value {
    Value::List(
        ids.iter()
            .map(|id| Value::Reference(Reference::component(*id)))
            .collect(),
    )
}

/// Removes every document from both collections.
pub fn reset(store: &impl DocumentStore) -> Result<usize, AppResponse> {
    let mut removed = 0;
    for kind in CollectionKind::ALL {
        removed += store.delete_all(kind)?;
    }
    info!("Removed {} documents", removed);
    Ok(removed)
}

/// Price in pounds sterling.
fn list_price(value: i64) -> Document {
    Document::new().with("value", value).with("currency", "GBP")
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedSummary {
    pub manufacturers: usize,
    pub components: usize,
    pub drivetrain: DocumentId,
    pub bike: DocumentId,
}

/// Seeds the Haibike SDURO AllMtn RC catalog into an empty store.
pub fn seed_demo_catalog(store: &impl DocumentStore) -> Result<SeedSummary, AppResponse> {
    let manufacturers = ["Haibike", "Yamaha", "Shimano", "Fox", "Selle Royal", "FSA"];
    for name in manufacturers {
        create_manufacturer(store, name, Document::new())?;
    }

    let components = CollectionKind::Components;
    let mut parts = Vec::new();
    parts.push(create_document(
        store,
        components,
        "Battery 400Wh",
        Document::new()
            .with("watt_hours", 400)
            .with("manufacturer", manufacturer_ref(store, "yamaha")?)
            .with("list_price", list_price(300)),
    )?);
    parts.push(create_document(
        store,
        components,
        "Motor",
        Document::new()
            .with("voltage", 36)
            .with("wattage", 250)
            .with("manufacturer", manufacturer_ref(store, "yamaha")?)
            .with("list_price", list_price(400)),
    )?);
    parts.push(create_document(
        store,
        components,
        "Haibike SDURO frame",
        Document::new()
            .with("material", "Aluminium")
            .with("size_inches", 27.5)
            .with("manufacturer", manufacturer_ref(store, "haibike")?)
            .with(
                "description",
                "6061, All MNT, 4-Link System, Yamaha-Interface, hydroforced tubes, 150mm",
            ),
    )?);

    let drivetrain_parts = [
        create_document(
            store,
            components,
            "Haibike sDuro crank",
            Document::new()
                .with("material", "Aluminium")
                .with("manufacturer", manufacturer_ref(store, "fsa")?)
                .with("list_price", list_price(45)),
        )?,
        create_document(
            store,
            components,
            "Front Derailleur",
            Document::new()
                .with("manufacturer", manufacturer_ref(store, "shimano")?)
                .with("gears", 2)
                .with("list_price", list_price(40)),
        )?,
        create_document(
            store,
            components,
            "Rear Derailleur",
            Document::new()
                .with("manufacturer", manufacturer_ref(store, "shimano")?)
                .with("line", "Deore XT")
                .with("model", "M 786 Shadow Plus")
                .with("gears", 10)
                .with("list_price", list_price(50)),
        )?,
        create_document(
            store,
            components,
            "Cassette",
            Document::new()
                .with("description", "Sram PG 1020 11-36 Teeth")
                .with("list_price", list_price(60)),
        )?,
    ];

    let drivetrain = create_document(
        store,
        components,
        "Haibike SDURO Drivetrain",
        Document::new()
            .with("speeds", 20)
            .with(COMPONENTS_FIELD, reference_group(&drivetrain_parts)),
    )?;
    parts.push(drivetrain);

    let bike = create_document(
        store,
        components,
        "Haibike SDURO AllMtn RC",
        Document::new()
            .with(FULL_BUILD_FIELD, true)
            .with(COMPONENTS_FIELD, reference_group(&parts)),
    )?;

    let summary = SeedSummary {
        manufacturers: manufacturers.len(),
        components: parts.len() + drivetrain_parts.len() + 1,
        drivetrain,
        bike,
    };
    info!(
        "Seeded {} manufacturers and {} components",
        summary.manufacturers, summary.components
    );
    Ok(summary)
}
