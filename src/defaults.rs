//! Defaults loader: a JSON or TOML document → a [`Defaults`] map.
//!
//! Stands in for importing a project's runtime config module: the
//! defaults live in a data file and an optional dotted `export` path picks
//! the object holding them.

use crate::error::LoadError;
use crate::literal::DefaultValue;
use crate::model::Defaults;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load the defaults object at `export` (or the document root) from `path`.
pub fn load(path: &Path, export: Option<&str>) -> Result<Defaults, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let doc: Value = serde_json::from_str(&content).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;
            from_json(path, doc, export)
        }
        Some("toml") => {
            let doc: toml::Table = toml::from_str(&content).map_err(|source| LoadError::Toml {
                path: path.to_path_buf(),
                source,
            })?;
            from_toml(path, toml::Value::Table(doc), export)
        }
        _ => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn export_segments(export: Option<&str>) -> Vec<&str> {
    export
        .map(|e| e.split('.').filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

fn from_json(path: &Path, doc: Value, export: Option<&str>) -> Result<Defaults, LoadError> {
    let mut node = doc;
    for segment in export_segments(export) {
        node = match node {
            Value::Object(mut map) => map.remove(segment),
            _ => None,
        }
        .ok_or_else(|| not_found(path, export))?;
    }
    match node {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(k, v)| (k, DefaultValue::Json(v)))
            .collect()),
        _ => Err(not_object(path, export)),
    }
}

fn from_toml(path: &Path, doc: toml::Value, export: Option<&str>) -> Result<Defaults, LoadError> {
    let mut node = doc;
    for segment in export_segments(export) {
        node = match node {
            toml::Value::Table(mut table) => table.remove(segment),
            _ => None,
        }
        .ok_or_else(|| not_found(path, export))?;
    }
    match node {
        toml::Value::Table(table) => Ok(table
            .into_iter()
            .map(|(k, v)| (k, toml_to_default(v)))
            .collect()),
        _ => Err(not_object(path, export)),
    }
}

/// TOML values map onto JSON one-to-one except datetimes, which have no
/// JSON form and are kept as their string conversion.
fn toml_to_default(value: toml::Value) -> DefaultValue {
    match toml_to_json(value) {
        Ok(json) => DefaultValue::Json(json),
        Err(repr) => DefaultValue::Opaque(repr),
    }
}

fn toml_to_json(value: toml::Value) -> Result<Value, String> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => match serde_json::Number::from_f64(f) {
            Some(n) => Value::Number(n),
            None => return Err(f.to_string()),
        },
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => return Err(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| toml_to_json(v).map(|v| (k, v)))
                .collect::<Result<_, _>>()?,
        ),
    })
}

fn not_found(path: &Path, export: Option<&str>) -> LoadError {
    LoadError::ExportNotFound {
        path: path.to_path_buf(),
        export: export.unwrap_or_default().to_string(),
    }
}

fn not_object(path: &Path, export: Option<&str>) -> LoadError {
    LoadError::NotAnObject {
        path: path.to_path_buf(),
        export: export.unwrap_or("<root>").to_string(),
    }
}
