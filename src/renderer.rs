//! Indented text rendering of catalog documents.
//!
//! The renderer walks a document depth first and writes one line per field,
//! indented with tabs by nesting depth. References are followed as they are
//! met, so a bike renders with its drivetrain and the drivetrain's parts
//! inline underneath it:
//!
//! ```text
//! 	Haibike SDURO AllMtn RC
//! 		full-build: true
//! 		components:
//! 			Battery 400Wh
//! 				watt_hours: 400
//! 			Motor
//! 				voltage: 36
//! 				manufacturer: Yamaha
//! ```
//!
//! A `manufacturer` field is resolved to the manufacturer's name on a single
//! line. Any other reference is looked up in the component collection and
//! expanded into that component's own fields.
//!
//! Scalars print through their `Display` form: booleans as `true`/`false`,
//! floats in shortest form (`27.5`).

use std::io::Write;

use log::warn;

use crate::app_response::AppResponse;
use crate::catalog_model::{CollectionKind, Document, DocumentId, Reference, Value, ID_FIELD, NAME_FIELD};
use crate::catalog_store::{DocumentStore, Filter};
use crate::reference_codec::MANUFACTURER_FIELD;

/// Heading used for a referenced document that is missing or has no name.
pub const PLACEHOLDER_LABEL: &str = "<component>";

/// Renders the fields of `document` at `depth` (1 for a top-level document's
/// own fields, which then sit two tabs deep).
///
/// Fails with [`AppResponse::CyclicReference`] when a reference leads back into
/// a component that is still being expanded.
pub fn render<S, W>(store: &S, document: &Document, depth: usize, out: &mut W) -> Result<(), AppResponse>
where
    S: DocumentStore,
    W: Write,
{
    let mut renderer = Renderer { store, out, chain: Vec::new() };
    if let Some(id) = document.id {
        renderer.chain.push(id);
    }
    renderer.render_document(document, depth)
}

/// Writes a `\t<name>` heading for every matching document of `kind`,
/// followed by its rendered fields.
pub fn dump_collection<S, W>(store: &S, kind: CollectionKind, filter: &Filter, out: &mut W) -> Result<(), AppResponse>
where
    S: DocumentStore,
    W: Write,
{
    for document in store.find(kind, filter)? {
        writeln!(out, "\t{}", document.name().unwrap_or(PLACEHOLDER_LABEL))?;
        render(store, &document, 1, out)?;
    }
    Ok(())
}

struct Renderer<'a, S, W> {
    store: &'a S,
    out: &'a mut W,
    /// Components currently being expanded, outermost first.
    chain: Vec<DocumentId>,
}

impl<S: DocumentStore, W: Write> Renderer<'_, S, W> {
    fn render_document(&mut self, document: &Document, depth: usize) -> Result<(), AppResponse> {
        for (field, value) in document.fields() {
            if field == ID_FIELD || field == NAME_FIELD {
                continue;
            }
            self.render_entry(field, value, depth)?;
        }
        Ok(())
    }

    fn render_list(&mut self, items: &[Value], depth: usize) -> Result<(), AppResponse> {
        for (index, value) in items.iter().enumerate() {
            self.render_entry(&index.to_string(), value, depth)?;
        }
        Ok(())
    }

    fn render_entry(&mut self, key: &str, value: &Value, depth: usize) -> Result<(), AppResponse> {
        write!(self.out, "{}", "\t".repeat(depth + 1))?;

        match value {
            Value::Document(inner) => {
                writeln!(self.out, "{}:", key)?;
                self.render_document(inner, depth + 1)
            }
            Value::List(items) => {
                writeln!(self.out, "{}:", key)?;
                self.render_list(items, depth + 1)
            }
            Value::Reference(reference) if key == MANUFACTURER_FIELD => self.render_manufacturer(reference),
            Value::Reference(reference) => self.render_reference(reference, depth),
            scalar => {
                writeln!(self.out, "{}: {}", key, scalar)?;
                Ok(())
            }
        }
    }

    fn render_manufacturer(&mut self, reference: &Reference) -> Result<(), AppResponse> {
        let manufacturer = self
            .store
            .find_one(CollectionKind::Manufacturers, &Filter::Id(reference.id))?;

        let name = match &manufacturer {
            Some(document) => document.name().unwrap_or_default(),
            None => {
                warn!("Dangling manufacturer reference {}", reference);
                ""
            }
        };
        writeln!(self.out, "{}: {}", MANUFACTURER_FIELD, name)?;
        Ok(())
    }

    fn render_reference(&mut self, reference: &Reference, depth: usize) -> Result<(), AppResponse> {
        if self.chain.contains(&reference.id) {
            return Err(AppResponse::CyclicReference(reference.id.to_string()));
        }

        let Some(target) = self.store.find_one(CollectionKind::Components, &Filter::Id(reference.id))? else {
            warn!("Dangling component reference {}", reference);
            writeln!(self.out, "{}", PLACEHOLDER_LABEL)?;
            return Ok(());
        };

        writeln!(self.out, "{}", target.name().unwrap_or(PLACEHOLDER_LABEL))?;

        self.chain.push(reference.id);
        let rendered = self.render_document(&target, depth + 1);
        self.chain.pop();
        rendered
    }
}
