//! Variable sources for rendering.
//! Variables come from a flat YAML mapping and/or `KEY=VALUE` tokens. Tokens
//! are applied after the file, so they win on conflicting keys.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Variable name to value, in definition order.
pub type VariableMap = IndexMap<String, String>;

/// Splits a `KEY=VALUE` token on its first `=`.
///
/// # Errors
/// * `Error::VariableError` naming the token if it has no `=` or an empty key
pub fn parse_assignment(token: &str) -> Result<(String, String)> {
    match token.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        Some(_) => Err(Error::VariableError(format!("argument '{token}' has an empty name"))),
        None => Err(Error::VariableError(format!(
            "argument '{token}' not formatted as KEY=VALUE"
        ))),
    }
}

/// Converts a scalar YAML value to its string form.
fn scalar_to_string(key: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => Err(Error::VariableError(
            format!("value of '{key}' is not a single string"),
        )),
    }
}

/// Decodes a YAML document into a variable map.
///
/// The top level must be a mapping whose values are scalars. An empty
/// document yields an empty map.
pub fn parse_yaml(content: &str) -> Result<VariableMap> {
    if content.trim().is_empty() {
        return Ok(VariableMap::new());
    }
    let document: Option<IndexMap<Value, Value>> = serde_yaml::from_str(content)
        .map_err(|e| Error::VariableError(format!("invalid variables document: {e}")))?;

    let mut variables = VariableMap::new();
    for (key, value) in document.unwrap_or_default() {
        let key = match key {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(Error::VariableError(format!(
                    "variable names must be strings, found {other:?}"
                )))
            }
        };
        let value = scalar_to_string(&key, value)?;
        variables.insert(key, value);
    }
    Ok(variables)
}

/// Reads and decodes a variables file.
///
/// # Errors
/// * `Error::NotFound` if the file does not exist
/// * `Error::VariableError` if the document cannot be decoded
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<VariableMap> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound { what: "variables file", path: path.display().to_string() });
    }
    debug!("Loading variables from '{}'", path.display());
    let content = fs::read_to_string(path)?;
    parse_yaml(&content).map_err(|e| match e {
        Error::VariableError(msg) => Error::VariableError(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Builds the variable map for one render.
///
/// # Arguments
/// * `yaml_path` - Optional variables file, loaded first
/// * `tokens` - `KEY=VALUE` overrides applied on top, in order
///
/// # Returns
/// * `Result<VariableMap>` - Empty when there is neither file nor token
pub fn resolve<S: AsRef<str>>(yaml_path: Option<&Path>, tokens: &[S]) -> Result<VariableMap> {
    let mut variables = match yaml_path {
        Some(path) => load_yaml_file(path)?,
        None => VariableMap::new(),
    };

    for token in tokens {
        let (key, value) = parse_assignment(token.as_ref())?;
        if let Some(previous) = variables.insert(key.clone(), value) {
            debug!("'{}' overrides file value '{}'", key, previous);
        }
    }

    Ok(variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment_splits_on_first_equals() {
        let (key, value) = parse_assignment("QUERY=a=b").unwrap();
        assert_eq!(key, "QUERY");
        assert_eq!(value, "a=b");
    }

    #[test]
    fn test_parse_assignment_allows_empty_value() {
        assert_eq!(parse_assignment("EMPTY=").unwrap(), ("EMPTY".to_string(), String::new()));
    }

    #[test]
    fn test_parse_assignment_rejects_missing_equals() {
        match parse_assignment("SPECIES HUMAN") {
            Err(Error::VariableError(msg)) => assert!(msg.contains("SPECIES HUMAN")),
            other => panic!("Expected VariableError, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_yaml_coerces_scalars() {
        let vars = parse_yaml("name: World\ncount: 3\nenabled: true\nnothing:\n").unwrap();
        assert_eq!(vars["name"], "World");
        assert_eq!(vars["count"], "3");
        assert_eq!(vars["enabled"], "true");
        assert_eq!(vars["nothing"], "");
    }

    #[test]
    fn test_parse_yaml_rejects_nested_values() {
        assert!(matches!(parse_yaml("list:\n  - a\n  - b\n"), Err(Error::VariableError(_))));
        assert!(matches!(parse_yaml("map:\n  a: b\n"), Err(Error::VariableError(_))));
    }

    #[test]
    fn test_parse_yaml_rejects_non_mapping() {
        assert!(matches!(parse_yaml("- a\n- b\n"), Err(Error::VariableError(_))));
    }

    #[test]
    fn test_parse_yaml_empty_document() {
        assert!(parse_yaml("").unwrap().is_empty());
    }
}
