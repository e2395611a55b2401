//! DSN helpers: environment expansion and credential redaction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{DbError, Result};

static ENV_VAR_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env var regex"));

/// Replace every `${VAR}` in `input` with the value of the environment variable.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let mut result = input.to_string();
    for caps in ENV_VAR_RX.captures_iter(input) {
        let var_name = &caps[1];
        let value =
            std::env::var(var_name).map_err(|_| DbError::MissingEnvVar(var_name.to_string()))?;
        result = result.replace(&caps[0], &value);
    }
    Ok(result)
}

/// Mask the password part of a DSN so it can be logged.
pub fn redact_credentials_in_dsn(dsn: Option<&str>) -> String {
    match dsn {
        Some(dsn) if dsn.contains('@') => match url::Url::parse(dsn) {
            Ok(mut parsed) => {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                parsed.to_string()
            }
            Err(_) => "***".to_string(),
        },
        Some(dsn) => dsn.to_string(),
        None => "none".to_string(),
    }
}
