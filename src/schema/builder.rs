//! Recursive schema builder
//!
//! Walks a decoded [`Node`] tree and registers one [`Record`] per record
//! shape it finds. Same-named shapes are grown into each other; shapes
//! that cannot be reconciled abort the build.

use super::classify::classify;
use super::trace::{PathStep, Trace};
use super::types::{Field, FieldKind, ListShape, Record};
use super::value::Node;
use crate::config::BuildOptions;
use crate::error::{Error, Result};
use crate::registry::StructRegistry;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Schema builder bound to a registry for one conversion job
#[derive(Debug)]
pub struct SchemaBuilder<'r> {
    registry: &'r mut StructRegistry,
    options: BuildOptions,
    /// Record name committed for each document location during the current build
    sites: HashMap<Vec<PathStep>, String>,
}

impl<'r> SchemaBuilder<'r> {
    /// Create a builder that registers into `registry`
    pub fn new(registry: &'r mut StructRegistry, options: BuildOptions) -> Self {
        Self {
            registry,
            options,
            sites: HashMap::new(),
        }
    }

    /// Build options in use
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Infer and register every record in `tree`, returning the root record
    ///
    /// A failed build leaves whatever was registered before the failure in
    /// place; callers should discard the registry.
    pub fn build(&mut self, tree: &Node) -> Result<Record> {
        self.sites.clear();
        let root_name = self.options.root_name.clone();

        let name = match tree {
            Node::Record(map) => {
                let trace = Trace::root(&root_name);
                let record = self.handle_record(map, &trace)?;
                self.commit(record, &trace)?
            }
            Node::List(items) => {
                let trace = Trace::root_list(&root_name);
                match self.handle_list(items, &trace)? {
                    Some(ListShape {
                        element: FieldKind::Record,
                        reference: Some(name),
                        ..
                    }) => name,
                    Some(shape) => {
                        return Err(Error::unsupported_root(format!("list of {}", shape.element)))
                    }
                    None => return Err(Error::unsupported_root("empty list")),
                }
            }
            Node::Scalar(scalar) => {
                return Err(Error::unsupported_root(format!(
                    "scalar of type {}",
                    scalar.type_name()
                )))
            }
        };

        self.registry
            .get(&name)
            .cloned()
            .ok_or(Error::RegistryInconsistent { name })
    }

    /// Collect the fields of a record node
    ///
    /// Child records are committed as they are found; the returned record
    /// itself is left for the caller to commit.
    fn handle_record(&mut self, map: &BTreeMap<String, Node>, trace: &Trace<'_>) -> Result<Record> {
        let mut record = Record::new(trace.name(), trace.level());

        for (key, value) in map {
            let kind = classify(value)
                .ok_or_else(|| Error::unsupported_type(trace.child_path(key), value.type_name()))?;

            let field = match value {
                Node::Record(child_map) => {
                    let child = trace.record_field(key);
                    let child_record = self.handle_record(child_map, &child)?;
                    let name = self.commit(child_record, &child)?;
                    Field::record(key, name)
                }
                Node::List(items) => {
                    let child = trace.list_field(key);
                    match self.handle_list(items, &child)? {
                        Some(shape) => Field::list(key, shape),
                        None => {
                            warn!(path = child.path(), "Skipping empty list, element type unknown");
                            continue;
                        }
                    }
                }
                Node::Scalar(_) => Field::primitive(key, kind),
            };

            record.add_field(self.annotated(field))?;
        }

        Ok(record)
    }

    /// Describe a list node; `None` when no element carries a type
    pub(crate) fn handle_list(&mut self, items: &[Node], trace: &Trace<'_>) -> Result<Option<ListShape>> {
        let Some(element) = element_kind(items, trace)? else {
            return Ok(None);
        };

        match element {
            FieldKind::Record => {
                let element_trace = trace.element_record();
                let mut merged: Option<Record> = None;
                for item in items {
                    if let Node::Record(map) = item {
                        let record = self.handle_record(map, &element_trace)?;
                        merged = Some(match merged {
                            Some(acc) => acc.grow(&record)?,
                            None => record,
                        });
                    }
                }

                match merged {
                    Some(record) => {
                        let name = self.commit(record, &element_trace)?;
                        Ok(Some(ListShape::record(name, trace.nesting())))
                    }
                    None => Ok(None),
                }
            }
            FieldKind::List => {
                let inner_trace = trace.element_list();
                let mut unified: Option<ListShape> = None;
                for item in items {
                    let Node::List(inner) = item else { continue };
                    let Some(shape) = self.handle_list(inner, &inner_trace)? else {
                        continue;
                    };
                    match &unified {
                        Some(existing) if *existing != shape => {
                            return Err(Error::heterogeneous_list(
                                inner_trace.path(),
                                existing.to_string(),
                                shape.to_string(),
                            ));
                        }
                        Some(_) => {}
                        None => unified = Some(shape),
                    }
                }
                Ok(unified)
            }
            primitive => Ok(Some(ListShape::primitive(primitive, trace.nesting()))),
        }
    }

    /// Merge a record into the registry and return its final name
    fn commit(&mut self, record: Record, trace: &Trace<'_>) -> Result<String> {
        // Seen at this path earlier in the build: keep the committed name
        if let Some(name) = self.sites.get(trace.steps()).cloned() {
            let mut record = record;
            record.name = name;
            let merged = match self.registry.get(&record.name) {
                Some(existing) => existing.grow(&record)?,
                None => record,
            };
            return self.registry.register_struct(merged, false);
        }

        let name = if self.options.enforce_unique_name {
            self.registry.register_struct(record, true)?
        } else {
            let merged = match self.registry.get(&record.name) {
                Some(existing) => {
                    debug!(record = %record.name, path = trace.path(), "Growing existing record");
                    existing.grow(&record)?
                }
                None => record,
            };
            self.registry.register_struct(merged, false)?
        };

        self.sites.insert(trace.steps().to_vec(), name.clone());
        Ok(name)
    }

    fn annotated(&self, mut field: Field) -> Field {
        if self.options.annotate {
            let tag = format!("json:\"{}\"", escape_tag_value(&field.name));
            field.annotate(tag);
        }
        field
    }
}

/// Quote-escape a key for use inside a `key:"value"` annotation
fn escape_tag_value(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Element kind shared by every item of a list
fn element_kind(items: &[Node], trace: &Trace<'_>) -> Result<Option<FieldKind>> {
    let mut expected: Option<FieldKind> = None;

    for (idx, item) in items.iter().enumerate() {
        let kind = classify(item).ok_or_else(|| {
            Error::unsupported_type(format!("{}[{idx}]", trace.path()), item.type_name())
        })?;
        match expected {
            Some(e) if e != kind => {
                return Err(Error::heterogeneous_list(
                    trace.path(),
                    e.to_string(),
                    kind.to_string(),
                ))
            }
            Some(_) => {}
            None => expected = Some(kind),
        }
    }

    Ok(expected)
}

/// Infer structs from a JSON value into a fresh registry (convenience function)
pub fn infer_structs(value: &serde_json::Value, options: &BuildOptions) -> Result<StructRegistry> {
    let mut registry = StructRegistry::new();
    let tree = Node::from(value);
    SchemaBuilder::new(&mut registry, options.clone()).build(&tree)?;
    Ok(registry)
}
