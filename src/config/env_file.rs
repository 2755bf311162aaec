//! Parsing for `.env` files in the project root.
//!
//! The format is the usual dotenv dialect: one `KEY=VALUE` per line, `#`
//! comments, blank lines ignored, optional single or double quotes around
//! the value. Values loaded here take precedence over the process
//! environment when building a variable lookup, matching how the launcher
//! environment behaves in local development.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Parse dotenv-style content into a key/value map.
///
/// Later assignments to the same key win. Lines without `=` are skipped.
pub fn parse_env_file(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        vars.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    vars
}

/// Load and parse a `.env` file from disk.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_env_file(&content))
}

/// Load a `.env` file if it exists, returning an empty map when it does not.
pub fn load_optional_env_file(path: &Path) -> Result<HashMap<String, String>> {
    if path.exists() {
        load_env_file(path)
    } else {
        Ok(HashMap::new())
    }
}

/// Strip one pair of matching surrounding quotes, if present.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_simple_assignments() {
        let vars = parse_env_file("FOO=bar\nBAZ=qux");
        assert_eq!(vars.get("FOO"), Some(&"bar".to_string()));
        assert_eq!(vars.get("BAZ"), Some(&"qux".to_string()));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let vars = parse_env_file("# comment\n\nFOO=bar\n  # indented comment\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("FOO"), Some(&"bar".to_string()));
    }

    #[test]
    fn strips_matching_quotes() {
        let vars = parse_env_file("A=\"double\"\nB='single'\nC=\"mismatched'");
        assert_eq!(vars.get("A"), Some(&"double".to_string()));
        assert_eq!(vars.get("B"), Some(&"single".to_string()));
        assert_eq!(vars.get("C"), Some(&"\"mismatched'".to_string()));
    }

    #[test]
    fn keeps_equals_signs_inside_values() {
        let vars = parse_env_file("DSN=postgres://u:p@host/db?sslmode=require");
        assert_eq!(
            vars.get("DSN"),
            Some(&"postgres://u:p@host/db?sslmode=require".to_string())
        );
    }

    #[test]
    fn keeps_empty_values() {
        let vars = parse_env_file("EMPTY=");
        assert_eq!(vars.get("EMPTY"), Some(&String::new()));
    }

    #[test]
    fn later_assignment_wins() {
        let vars = parse_env_file("KEY=first\nKEY=second");
        assert_eq!(vars.get("KEY"), Some(&"second".to_string()));
    }

    #[test]
    fn skips_lines_without_equals() {
        let vars = parse_env_file("not an assignment\nFOO=bar");
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn loads_file_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "WAREHOUSE_USER=etl").unwrap();

        let vars = load_env_file(file.path()).unwrap();
        assert_eq!(vars.get("WAREHOUSE_USER"), Some(&"etl".to_string()));
    }

    #[test]
    fn optional_load_of_missing_file_is_empty() {
        let vars = load_optional_env_file(Path::new("/nonexistent/.env")).unwrap();
        assert!(vars.is_empty());
    }
}
