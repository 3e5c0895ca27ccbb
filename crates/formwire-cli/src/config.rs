use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use formwire_model::EnhanceOptions;

/// Options from a JSON file, or the defaults when no file is given.
/// Fields missing from the file keep their default.
pub fn load_options(path: Option<&Path>) -> Result<EnhanceOptions> {
    let Some(path) = path else {
        return Ok(EnhanceOptions::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let options = parse_options(&text).with_context(|| format!("parse config {}", path.display()))?;
    debug!(path = %path.display(), "enhancement options loaded");
    Ok(options)
}

pub fn parse_options(text: &str) -> Result<EnhanceOptions> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        assert_eq!(load_options(None).unwrap(), EnhanceOptions::default());
    }

    #[test]
    fn partial_config_overrides_named_fields() {
        let options =
            parse_options(r#"{"hidden_class": "hidden", "suppressible_tags": ["input", "select"]}"#)
                .unwrap();
        assert_eq!(options.hidden_class, "hidden");
        assert!(options.is_suppressible("select"));
        assert_eq!(options.strike_class, EnhanceOptions::default().strike_class);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_options("{hidden_class").is_err());
    }
}
