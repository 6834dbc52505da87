//! Schema types: field kinds, fields and records

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Kind of a record field
///
/// Narrower numeric types are widened when classified, so 8/16/32-bit
/// integers become `Integer` and 32-bit floats become `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Boolean,
    Integer,
    Integer64,
    Float,
    String,
    List,
    Record,
}

impl FieldKind {
    /// Primitive kinds are leaves that need no further descent
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            FieldKind::Boolean
                | FieldKind::Integer
                | FieldKind::Integer64
                | FieldKind::Float
                | FieldKind::String
        )
    }

    /// Composite kinds reference other shapes
    pub fn is_composite(self) -> bool {
        !self.is_primitive()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Boolean => write!(f, "Boolean"),
            FieldKind::Integer => write!(f, "Integer"),
            FieldKind::Integer64 => write!(f, "Integer64"),
            FieldKind::Float => write!(f, "Float"),
            FieldKind::String => write!(f, "String"),
            FieldKind::List => write!(f, "List"),
            FieldKind::Record => write!(f, "Record"),
        }
    }
}

/// Shape of a list value: the element kind once all list nesting is
/// stripped, the record it references, and how many lists enclose it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListShape {
    pub element: FieldKind,
    pub reference: Option<String>,
    pub nesting: usize,
}

impl ListShape {
    /// List of primitives
    pub fn primitive(element: FieldKind, nesting: usize) -> Self {
        Self {
            element,
            reference: None,
            nesting,
        }
    }

    /// List of records
    pub fn record(reference: impl Into<String>, nesting: usize) -> Self {
        Self {
            element: FieldKind::Record,
            reference: Some(reference.into()),
            nesting,
        }
    }
}

impl fmt::Display for ListShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reference {
            Some(reference) => write!(f, "List({reference}, nesting={})", self.nesting),
            None => write!(f, "List({}, nesting={})", self.element, self.nesting),
        }
    }
}

/// A field inside a record
///
/// Equality covers name, kind, element kind, referenced record and list
/// nesting. Annotations are metadata and are unioned on merge instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub annotations: BTreeSet<String>,

    pub kind: FieldKind,

    /// Element kind for list fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<FieldKind>,

    /// Referenced record name for record fields and lists of records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Number of enclosing lists (0 unless kind is List)
    #[serde(default)]
    pub nesting: usize,
}

impl Field {
    /// Create a primitive field
    pub fn primitive(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            annotations: BTreeSet::new(),
            kind,
            element: None,
            reference: None,
            nesting: 0,
        }
    }

    /// Create a field referencing a record
    pub fn record(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: BTreeSet::new(),
            kind: FieldKind::Record,
            element: None,
            reference: Some(reference.into()),
            nesting: 0,
        }
    }

    /// Create a list field from a list shape
    pub fn list(name: impl Into<String>, shape: ListShape) -> Self {
        Self {
            name: name.into(),
            annotations: BTreeSet::new(),
            kind: FieldKind::List,
            element: Some(shape.element),
            reference: shape.reference,
            nesting: shape.nesting,
        }
    }

    /// Add an annotation
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotate(annotation);
        self
    }

    /// Add an annotation in place
    pub fn annotate(&mut self, annotation: impl Into<String>) {
        self.annotations.insert(annotation.into());
    }

    /// Union another field's annotations into this one
    pub fn merge_annotations(&mut self, other: &Field) {
        self.annotations.extend(other.annotations.iter().cloned());
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.element == other.element
            && self.reference == other.reference
            && self.nesting == other.nesting
    }
}

impl Eq for Field {}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.reference, self.element) {
            (FieldKind::Record, Some(reference), _) => {
                write!(f, "{}: Record({reference})", self.name)
            }
            (FieldKind::List, Some(reference), _) => {
                write!(f, "{}: List({reference}, nesting={})", self.name, self.nesting)
            }
            (FieldKind::List, None, Some(element)) => {
                write!(f, "{}: List({element}, nesting={})", self.name, self.nesting)
            }
            (kind, _, _) => write!(f, "{}: {kind}", self.name),
        }
    }
}

/// A named record definition discovered in a document
///
/// Two records are the same entity when their names match, whatever their
/// fields. Use [`Record::grow`] to reconcile their shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub level: usize,
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
}

impl Record {
    /// Create an empty record
    pub fn new(name: impl Into<String>, level: usize) -> Self {
        Self {
            name: name.into(),
            level,
            fields: BTreeMap::new(),
        }
    }

    /// Add a field; an existing equal field only gains annotations
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        match self.fields.get_mut(&field.name) {
            None => {
                self.fields.insert(field.name.clone(), field);
                Ok(())
            }
            Some(existing) if *existing == field => {
                existing.merge_annotations(&field);
                Ok(())
            }
            Some(existing) => Err(Error::field_mismatch(
                &self.name,
                existing.to_string(),
                field.to_string(),
            )),
        }
    }

    /// Add a field (builder style)
    pub fn with_field(mut self, field: Field) -> Result<Self> {
        self.add_field(field)?;
        Ok(self)
    }

    /// Get a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Records are identified by name only
    pub fn same_entity(&self, other: &Record) -> bool {
        self.name == other.name
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Grow this record with the fields of another sighting of it
    ///
    /// Returns the merged record and leaves `self` untouched, so a failed
    /// merge never exposes a half-merged shape.
    pub fn grow(&self, incoming: &Record) -> Result<Record> {
        if !self.same_entity(incoming) {
            return Err(Error::RecordIdentity {
                target: self.name.clone(),
                incoming: incoming.name.clone(),
            });
        }

        let mut merged = self.clone();
        merged.level = self.level.max(incoming.level);
        for field in incoming.fields.values() {
            merged.add_field(field.clone())?;
        }
        Ok(merged)
    }
}
