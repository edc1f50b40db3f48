use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    domain::{
        ConditionRule, FieldType, FormField, FormSchema, SelectOption, ValidationRules,
        generate_field_id, generate_schema_id,
    },
    error::ImportError,
};

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Value>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Parse and coerce an import document into a schema.
pub fn import_schema_str(contents: &str, format: DocumentFormat) -> Result<FormSchema, ImportError> {
    let value = parse_document_str(contents, format).map_err(|err| ImportError::Syntax {
        format,
        message: format!("{err:#}"),
    })?;
    import_schema_value(&value)
}

/// Coerce a parsed document into a schema.
///
/// The top level must be an object with a string `name` and a `fields` array.
/// Everything below that is repaired rather than rejected.
pub fn import_schema_value(value: &Value) -> Result<FormSchema, ImportError> {
    let Some(document) = value.as_object() else {
        return Err(ImportError::Shape("expected an object"));
    };
    let Some(name) = document.get("name").and_then(Value::as_str) else {
        return Err(ImportError::Shape("missing string \"name\""));
    };
    let Some(entries) = document.get("fields").and_then(Value::as_array) else {
        return Err(ImportError::Shape("\"fields\" must be an array"));
    };

    let fields = entries.iter().map(coerce_field).collect::<Vec<_>>();

    let created_at = document
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|stamp| stamp.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    let mut schema = FormSchema {
        id: non_empty_str(document, "id")
            .map(str::to_string)
            .unwrap_or_else(generate_schema_id),
        name: name.to_string(),
        fields,
        created_at,
        updated_at: Utc::now(),
    };
    schema.ensure_unique_ids();
    debug!(schema = %schema.id, fields = schema.fields.len(), "coerced import document");
    Ok(schema)
}

fn coerce_field(entry: &Value) -> FormField {
    let empty = Map::new();
    let object = entry.as_object().unwrap_or(&empty);

    let id = non_empty_str(object, "id")
        .map(str::to_string)
        .unwrap_or_else(generate_field_id);

    let field_type = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(FieldType::from_name)
        .unwrap_or(FieldType::Text);

    FormField {
        id,
        field_type,
        label: object
            .get("label")
            .and_then(Value::as_str)
            .unwrap_or("Field")
            .to_string(),
        placeholder: object
            .get("placeholder")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        options: object
            .get("options")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(coerce_option).collect()),
        validation: object
            .get("validation")
            .and_then(Value::as_object)
            .map(coerce_validation)
            .unwrap_or_default(),
        conditions: object
            .get("conditions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value::<ConditionRule>(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn coerce_option(item: &Value) -> Option<SelectOption> {
    let object = item.as_object()?;
    let label = object.get("label").and_then(Value::as_str);
    let value = object.get("value").and_then(Value::as_str);
    match (label, value) {
        (Some(label), Some(value)) => Some(SelectOption::new(label, value)),
        (Some(only), None) | (None, Some(only)) => Some(SelectOption::new(only, only)),
        (None, None) => None,
    }
}

fn coerce_validation(object: &Map<String, Value>) -> ValidationRules {
    let length = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n as usize)
    };
    ValidationRules {
        required: object.get("required").and_then(Value::as_bool),
        min_length: length("minLength"),
        max_length: length("maxLength"),
        min: object.get("min").and_then(Value::as_f64),
        max: object.get("max").and_then(Value::as_f64),
        pattern: object
            .get("pattern")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|raw| !raw.is_empty())
}
