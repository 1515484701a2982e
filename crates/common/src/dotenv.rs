//! Minimal `.env` reader.
//!
//! Supports `KEY=value`, an optional `export ` prefix, `#` comments and
//! single or double quoted values. Whitespace around `=` and duplicate keys
//! are rejected.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct DotenvFile {
    lines: Vec<DotenvLine>,
}

#[derive(Debug, Clone)]
enum DotenvLine {
    Comment,
    Empty,
    Variable { key: String, value: String },
}

impl DotenvFile {
    /// Read a dotenv file. A missing file yields an empty set of variables.
    pub fn read(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self { lines: Vec::new() });
        }

        let contents = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read dotenv file {}: {err}", path.display()))?;
        Self::parse(path, &contents)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, String> {
        let mut seen_keys = HashSet::new();
        let mut lines = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            let parsed = parse_line(line).map_err(|err| {
                format!(
                    "Failed to parse dotenv file {} at line {}: {err}",
                    path.display(),
                    index + 1
                )
            })?;

            if let DotenvLine::Variable { key, .. } = &parsed {
                if !seen_keys.insert(key.clone()) {
                    return Err(format!(
                        "Duplicate variable '{key}' in dotenv file {}",
                        path.display()
                    ));
                }
            }

            lines.push(parsed);
        }

        Ok(Self { lines })
    }

    pub fn get_vars(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        for line in &self.lines {
            if let DotenvLine::Variable { key, value } = line {
                vars.insert(key.clone(), value.clone());
            }
        }
        vars
    }
}

fn parse_line(line: &str) -> Result<DotenvLine, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(DotenvLine::Empty);
    }
    if trimmed.starts_with('#') {
        return Ok(DotenvLine::Comment);
    }

    let (export_stripped, has_export) = match trimmed.strip_prefix("export ") {
        Some(stripped) => (stripped, true),
        None => (trimmed, false),
    };

    let eq_index = export_stripped.find('=').ok_or_else(|| {
        if has_export {
            "Invalid dotenv line after export prefix".to_string()
        } else {
            "Invalid dotenv line, missing '='".to_string()
        }
    })?;

    if eq_index == 0 {
        return Err("Invalid dotenv line, missing key".to_string());
    }

    let before = export_stripped[..eq_index].chars().last();
    let after = export_stripped[eq_index + 1..].chars().next();
    if before.is_some_and(char::is_whitespace) || after.is_some_and(char::is_whitespace) {
        return Err("Whitespace around '=' is not allowed".to_string());
    }

    let key = &export_stripped[..eq_index];
    if !is_valid_key(key) {
        return Err(format!("Invalid dotenv variable name '{key}'"));
    }

    let mut value = export_stripped[eq_index + 1..].to_string();
    if let Some(quote) = value.chars().next().filter(|ch| *ch == '"' || *ch == '\'') {
        if !value.ends_with(quote) || value.len() == 1 {
            return Err("Invalid quoted value".to_string());
        }
        value = value[1..value.len() - 1].to_string();
    }

    Ok(DotenvLine::Variable {
        key: key.to_string(),
        value,
    })
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}
