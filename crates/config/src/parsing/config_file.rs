//! Parsing logic for a separate config file

use std::fs;

use toml::{Value, map::Map};
use util::raw_err_str;

/// The CLI argument name for the config file
const CONFIG_FILE_ARG: &str = "--config-file";

/// Parse args from a config file
pub(crate) fn config_file_args(cli_args: &[String]) -> Result<Vec<String>, String> {
    // If we find "--config-file", the next argument is the file to read from
    let Some(index) = cli_args.iter().position(|arg| arg == CONFIG_FILE_ARG) else {
        return Ok(vec![]);
    };

    let path = cli_args
        .get(index + 1)
        .ok_or_else(|| format!("`{CONFIG_FILE_ARG}` requires a path"))?;
    read_config_file(path)
}

/// Parse a config file into CLI-style args
pub fn read_config_file(path: &str) -> Result<Vec<String>, String> {
    let file_contents =
        fs::read_to_string(path).map_err(raw_err_str!("error reading {}: {}", path))?;
    let config_kv_pairs: Map<_, _> =
        toml::from_str(&file_contents).map_err(|err| err.to_string())?;

    let mut config_file_args: Vec<String> = Vec::with_capacity(config_kv_pairs.len());
    for (toml_key, value) in config_kv_pairs.iter() {
        // Format the TOML key into --key
        let cli_arg = format!("--{}", toml_key.replace('_', "-"));
        let cli_values = parse_toml_value(cli_arg, value)?;
        config_file_args.extend(cli_values);
    }

    Ok(config_file_args)
}

// ----------------
// | TOML Parsing |
// ----------------

/// Parse a toml value into a list of strings to append to the CLI args
fn parse_toml_value(cli_arg: String, val: &Value) -> Result<Vec<String>, String> {
    let values: Vec<String> = match val {
        Value::Boolean(b) => toml_boolean_to_args(cli_arg, *b),
        Value::Array(_) | Value::Table(_) => {
            return Err(format!("unsupported value for {cli_arg}: {val}"));
        },
        x => toml_value_to_args(cli_arg, x)?,
    };

    Ok(values)
}

/// Parse a toml boolean into a string that is CLI compatible
///
/// This will be "--key" if the boolean is true, otherwise it will be empty
fn toml_boolean_to_args(cli_arg: String, b: bool) -> Vec<String> {
    if b { vec![cli_arg] } else { vec![] }
}

/// Parse a toml value into a string that is CLI compatible
fn toml_value_to_args(cli_arg: String, val: &Value) -> Result<Vec<String>, String> {
    let value_str = toml_value_to_string(val)?;
    Ok(vec![cli_arg, value_str])
}

/// Helper method to convert a toml value to a string
fn toml_value_to_string(val: &Value) -> Result<String, String> {
    Ok(match val {
        Value::String(val) => val.clone(),
        Value::Integer(val) => format!("{val:?}"),
        Value::Float(val) => format!("{val:?}"),
        _ => {
            return Err("unsupported value".to_string());
        },
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::{Command, parsing::parse_cli_with_config_file};
    use pool_types::Chain;

    /// Write a config file with the given contents
    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_config_file() {
        let file = write_config(
            r#"
            chain = "goerli"
            permit-validity-secs = 600
            json_logs = true
            verbose = false
            "#,
        );

        let args = read_config_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            args,
            vec!["--chain", "goerli", "--json-logs", "--permit-validity-secs", "600"]
        );
    }

    #[test]
    fn test_nested_values_rejected() {
        let file = write_config("addresses = [\"0x1\"]\n");
        assert!(read_config_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let file = write_config("chain = \"goerli\"\npermit-validity-secs = 600\n");
        let path = file.path().to_str().unwrap().to_string();

        let args = vec![
            "pool-cli".to_string(),
            "--config-file".to_string(),
            path,
            "--permit-validity-secs".to_string(),
            "120".to_string(),
            "balance".to_string(),
        ];
        let cli = parse_cli_with_config_file(args).unwrap();
        assert_eq!(cli.chain, Chain::Goerli);
        assert_eq!(cli.permit_validity_secs, 120);
        assert_eq!(cli.command, Command::Balance);
    }

    #[test]
    fn test_unreadable_config_file() {
        let err = read_config_file("/nonexistent/pool-cli.toml").unwrap_err();
        assert!(err.starts_with("error reading /nonexistent/pool-cli.toml: "));
    }

    #[test]
    fn test_missing_config_path() {
        let args = vec!["pool-cli".to_string(), "--config-file".to_string()];
        assert!(config_file_args(&args).is_err());
    }
}
