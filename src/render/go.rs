//! Go struct renderer

use super::Renderer;
use crate::error::{Error, Result};
use crate::registry::StructRegistry;
use crate::schema::{Field, FieldKind, Record};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Anything that is not a Unicode letter or decimal digit
static WORD_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{Nd}]+").expect("word separator regex init failed"));

/// Convert a document key into an exported Go identifier
///
/// `user_name`, `user-name` and `userName` all become `UserName`, and `café`
/// becomes `Café`. When the first character has no upper case form (a digit
/// or most CJK letters) the identifier gets an `X` prefix so it stays
/// exported. Returns `None` when no letters or digits remain.
pub fn go_identifier(name: &str) -> Option<String> {
    let mut ident = String::with_capacity(name.len());
    for word in WORD_SEPARATOR.split(name).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            ident.extend(first.to_uppercase());
            ident.push_str(chars.as_str());
        }
    }

    match ident.chars().next() {
        None => None,
        Some(c) if !c.is_uppercase() => Some(format!("X{ident}")),
        Some(_) => Some(ident),
    }
}

/// Renders records as Go struct declarations
#[derive(Debug, Clone)]
pub struct GoRenderer {
    package: String,
}

impl Default for GoRenderer {
    fn default() -> Self {
        Self::new("main")
    }
}

impl GoRenderer {
    /// Create a renderer for the given package name
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Render one `type X struct {}` block
    pub fn render_record(&self, record: &Record) -> Result<String> {
        let type_name = type_identifier(&record.name)?;

        let mut rows = Vec::with_capacity(record.fields.len());
        let mut seen: HashMap<String, &str> = HashMap::new();
        for field in record.fields.values() {
            let ident = go_identifier(&field.name).ok_or_else(|| {
                Error::render(format!(
                    "field '{}' of record '{}' has no usable identifier",
                    field.name, record.name
                ))
            })?;
            if let Some(previous) = seen.insert(ident.clone(), &field.name) {
                return Err(Error::render(format!(
                    "fields '{previous}' and '{}' of record '{}' both render as '{ident}'",
                    field.name, record.name
                )));
            }
            rows.push((ident, go_type(field)?, tag(field, record)?));
        }

        let name_width = rows.iter().map(|(ident, _, _)| ident.chars().count()).max().unwrap_or(0);
        let type_width = rows
            .iter()
            .filter(|(_, _, tag)| tag.is_some())
            .map(|(_, ty, _)| ty.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = format!("type {type_name} struct {{\n");
        for (ident, ty, tag) in rows {
            let line = match tag {
                Some(tag) => format!("\t{ident:<name_width$} {ty:<type_width$} {tag}"),
                None => format!("\t{ident:<name_width$} {ty}"),
            };
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out.push('}');
        Ok(out)
    }
}

impl Renderer for GoRenderer {
    fn render(&self, registry: &StructRegistry) -> Result<String> {
        let mut out = format!("package {}\n", self.package);

        let mut types: HashMap<String, String> = HashMap::new();
        for record in registry {
            let record = record?;
            let type_name = type_identifier(&record.name)?;
            if let Some(previous) = types.insert(type_name.clone(), record.name.clone()) {
                return Err(Error::render(format!(
                    "records '{previous}' and '{}' both render as type '{type_name}'",
                    record.name
                )));
            }

            out.push('\n');
            out.push_str(&self.render_record(record)?);
            out.push('\n');
        }

        Ok(out)
    }
}

fn type_identifier(name: &str) -> Result<String> {
    go_identifier(name)
        .ok_or_else(|| Error::render(format!("record '{name}' has no usable type name")))
}

fn primitive_type(kind: FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::Boolean => Some("bool"),
        FieldKind::Integer => Some("int"),
        FieldKind::Integer64 => Some("int64"),
        FieldKind::Float => Some("float64"),
        FieldKind::String => Some("string"),
        FieldKind::List | FieldKind::Record => None,
    }
}

fn go_type(field: &Field) -> Result<String> {
    let element = match (field.kind, field.element, &field.reference) {
        (FieldKind::Record | FieldKind::List, _, Some(reference)) => type_identifier(reference)?,
        (FieldKind::List, Some(element), None) => primitive_type(element)
            .ok_or_else(|| Error::render(format!("list field '{}' has no element type", field.name)))?
            .to_string(),
        (kind, _, _) => primitive_type(kind)
            .ok_or_else(|| Error::render(format!("field '{}' is missing its reference", field.name)))?
            .to_string(),
    };

    if field.kind == FieldKind::List {
        Ok(format!("{}{element}", "[]".repeat(field.nesting)))
    } else {
        Ok(element)
    }
}

/// Struct tag for a field; annotations go inside a raw string literal
fn tag(field: &Field, record: &Record) -> Result<Option<String>> {
    if field.annotations.is_empty() {
        return Ok(None);
    }
    if let Some(annotation) = field.annotations.iter().find(|a| a.contains('`')) {
        return Err(Error::render(format!(
            "annotation {annotation} of field '{}' in record '{}' contains a backtick",
            field.name, record.name
        )));
    }
    let joined = field
        .annotations
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    Ok(Some(format!("`{joined}`")))
}
