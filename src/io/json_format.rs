//! JSON batch input and output
//!
//! The input file is a single JSON object with three arrays: `users`,
//! `exchangeRates` and `commands`. Output is the accumulated array of
//! per-command records, written as pretty-printed JSON.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Write};
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::types::{CommandInput, LedgerError};

/// The full input batch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputData {
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub exchange_rates: Vec<RateSeed>,
    #[serde(default)]
    pub commands: Vec<CommandInput>,
}

/// One entry of the `users` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// One entry of the `exchangeRates` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RateSeed {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
}

/// Reads and parses the input batch.
///
/// # Errors
///
/// Returns [`LedgerError::FileNotFound`] when the path does not exist,
/// [`LedgerError::Io`] for other read failures, and
/// [`LedgerError::Parse`] when the file is not a valid batch.
pub fn load_input(path: &Path) -> Result<InputData, LedgerError> {
    let file = File::open(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            LedgerError::file_not_found(path.display().to_string())
        } else {
            err.into()
        }
    })?;
    let input = serde_json::from_reader(BufReader::new(file))?;
    Ok(input)
}

/// Writes the output records as a pretty-printed JSON array, followed by
/// a trailing newline.
pub fn write_output(records: &[Value], writer: &mut dyn Write) -> Result<(), LedgerError> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_batch() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "users": [{{"firstName": "Ana", "lastName": "Pop", "email": "ana@mail.com"}}],
                "exchangeRates": [{{"from": "EUR", "to": "RON", "rate": 5}}],
                "commands": [{{"command": "printUsers", "timestamp": 1}}]
            }}"#
        )
        .unwrap();

        let input = load_input(file.path()).unwrap();
        assert_eq!(input.users.len(), 1);
        assert_eq!(input.users[0].email, "ana@mail.com");
        assert_eq!(input.exchange_rates[0].rate, Decimal::from(5));
        assert_eq!(input.commands[0].command, "printUsers");
    }

    #[test]
    fn test_load_batch_with_missing_sections() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"commands": []}}"#).unwrap();
        let input = load_input(file.path()).unwrap();
        assert!(input.users.is_empty());
        assert!(input.exchange_rates.is_empty());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = load_input(Path::new("/nonexistent/batch.json")).unwrap_err();
        assert!(matches!(err, LedgerError::FileNotFound { .. }));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_input(file.path()).unwrap_err();
        assert!(matches!(err, LedgerError::Parse { .. }));
    }

    #[test]
    fn test_write_output_round_trips() {
        let records = vec![json!({"command": "printUsers", "timestamp": 1})];
        let mut buffer = Vec::new();
        write_output(&records, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with('\n'));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!(records));
    }
}
