#![warn(missing_docs)]
//! `fold-core-lang` - data-driven fold trigger configuration for `fold-core`.
//!
//! This crate stays lightweight and knows nothing about documents or regions. It provides the
//! serializable [`FoldConfig`] a host loads from YAML (or picks from a language preset) and hands
//! to `fold_core::TriggerRegistry`.
//!
//! ```rust
//! use fold_core_lang::{FoldConfig, StartPolicy};
//!
//! let config = FoldConfig::from_yaml_str(
//!     r#"
//! start_policy: earliest_column
//! triggers:
//!   "{": "}"
//!   "/*": "*/"
//! "#,
//! )
//! .unwrap();
//!
//! assert!(config.auto_fold);
//! assert_eq!(config.start_policy, StartPolicy::EarliestColumn);
//! assert_eq!(config.triggers[1].start, "/*");
//! ```

mod error;

pub use error::FoldConfigError;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::path::Path;

/// How a line's fold start is chosen when several trigger start symbols occur on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPolicy {
    /// The first registered pair whose start symbol occurs anywhere on the line wins.
    #[default]
    RegistrationOrder,
    /// The start symbol occurring at the earliest column wins (ties keep registration order).
    EarliestColumn,
}

/// One configured `(start, end)` delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerSpec {
    /// Opening symbol (e.g. `{`, `/*`, `begin`).
    pub start: String,
    /// Closing symbol (e.g. `}`, `*/`, `end`).
    pub end: String,
}

impl TriggerSpec {
    /// Create a trigger spec.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Returns `true` if both symbols are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }
}

/// Folding configuration for one editor instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldConfig {
    /// Rebuild fold regions automatically after edits and trigger changes.
    #[serde(default = "default_auto_fold")]
    pub auto_fold: bool,
    /// Start-symbol selection policy used by on-demand toggling.
    #[serde(default)]
    pub start_policy: StartPolicy,
    /// Trigger pairs in priority order.
    ///
    /// In YAML this may be written either as a list of `{ start, end }` entries or as an ordered
    /// mapping from start symbol to end symbol.
    #[serde(default, deserialize_with = "deserialize_triggers")]
    pub triggers: Vec<TriggerSpec>,
}

fn default_auto_fold() -> bool {
    true
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            auto_fold: true,
            start_policy: StartPolicy::RegistrationOrder,
            triggers: Vec::new(),
        }
    }
}

impl FoldConfig {
    /// Create a config with the given pairs and default flags.
    pub fn with_triggers<I, S, E>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, E)>,
        S: Into<String>,
        E: Into<String>,
    {
        Self {
            triggers: pairs
                .into_iter()
                .map(|(start, end)| TriggerSpec::new(start, end))
                .collect(),
            ..Self::default()
        }
    }

    /// Braces, block comments and brackets: the default set for C-family languages.
    pub fn c_like() -> Self {
        Self::with_triggers([("{", "}"), ("/*", "*/"), ("[", "]")])
    }

    /// Objects and arrays.
    pub fn json() -> Self {
        Self::with_triggers([("{", "}"), ("[", "]")])
    }

    /// Parenthesized forms.
    pub fn lisp() -> Self {
        Self::with_triggers([("(", ")")])
    }

    /// `begin`/`end` blocks and `(* *)` comments.
    pub fn pascal() -> Self {
        Self::with_triggers([("begin", "end"), ("(*", "*)")])
    }

    /// Markup comments.
    pub fn markup() -> Self {
        Self::with_triggers([("<!--", "-->")])
    }

    /// Look up a preset by (case-insensitive) language name.
    pub fn for_language(name: &str) -> Result<Self, FoldConfigError> {
        let preset = match name.to_ascii_lowercase().as_str() {
            "c" | "cpp" | "c++" | "csharp" | "c#" | "java" | "javascript" | "typescript" | "go"
            | "rust" | "kotlin" | "swift" | "css" => Self::c_like(),
            "json" | "jsonc" => Self::json(),
            "lisp" | "scheme" | "clojure" | "racket" => Self::lisp(),
            "pascal" | "delphi" => Self::pascal(),
            "html" | "xml" | "svg" => Self::markup(),
            _ => return Err(FoldConfigError::UnknownLanguage(name.to_string())),
        };
        Ok(preset)
    }

    /// Parse a config from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FoldConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config from a YAML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, FoldConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize the config back to YAML (triggers are written in list form).
    pub fn to_yaml_string(&self) -> Result<String, FoldConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Iterate the triggers with both symbols non-empty, in priority order.
    pub fn valid_triggers(&self) -> impl Iterator<Item = &TriggerSpec> {
        self.triggers.iter().filter(|t| t.is_valid())
    }
}

fn deserialize_triggers<'de, D>(deserializer: D) -> Result<Vec<TriggerSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTriggers {
        List(Vec<TriggerSpec>),
        Map(serde_yaml::Mapping),
    }

    match RawTriggers::deserialize(deserializer)? {
        RawTriggers::List(list) => Ok(list),
        RawTriggers::Map(map) => map
            .into_iter()
            .map(|entry| match entry {
                (Value::String(start), Value::String(end)) => Ok(TriggerSpec { start, end }),
                (start, end) => Err(serde::de::Error::custom(format!(
                    "trigger symbols must be strings, got {start:?} -> {end:?}"
                ))),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config = FoldConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, FoldConfig::default());
        assert!(config.auto_fold);
        assert!(config.triggers.is_empty());
    }

    #[test]
    fn test_list_form_keeps_order() {
        let config = FoldConfig::from_yaml_str(
            r#"
auto_fold: false
triggers:
  - { start: "[", end: "]" }
  - { start: "{", end: "}" }
"#,
        )
        .unwrap();

        assert!(!config.auto_fold);
        assert_eq!(
            config.triggers,
            vec![TriggerSpec::new("[", "]"), TriggerSpec::new("{", "}")]
        );
    }

    #[test]
    fn test_mapping_form_keeps_order() {
        let config = FoldConfig::from_yaml_str(
            r#"
triggers:
  "/*": "*/"
  "{": "}"
  begin: end
"#,
        )
        .unwrap();

        let starts: Vec<&str> = config.triggers.iter().map(|t| t.start.as_str()).collect();
        assert_eq!(starts, vec!["/*", "{", "begin"]);
    }

    #[test]
    fn test_non_string_mapping_is_rejected() {
        let err = FoldConfig::from_yaml_str("triggers:\n  \"{\": 3\n").unwrap_err();
        assert!(matches!(err, FoldConfigError::Yaml(_)));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let err = FoldConfig::from_yaml_str("start_policy: sideways\n").unwrap_err();
        assert!(err.to_string().starts_with("YAML parse error"));
    }

    #[test]
    fn test_empty_symbols_survive_loading_but_are_not_valid() {
        let config = FoldConfig::from_yaml_str(
            r#"
triggers:
  - { start: "", end: "}" }
  - { start: "(", end: ")" }
"#,
        )
        .unwrap();
        assert_eq!(config.triggers.len(), 2);
        let valid: Vec<_> = config.valid_triggers().collect();
        assert_eq!(valid, vec![&TriggerSpec::new("(", ")")]);
    }

    #[test]
    fn test_yaml_round_trip_of_preset() {
        let config = FoldConfig::pascal();
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(FoldConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_language_presets() {
        assert_eq!(FoldConfig::for_language("Rust").unwrap(), FoldConfig::c_like());
        assert_eq!(FoldConfig::for_language("json").unwrap(), FoldConfig::json());
        assert_eq!(FoldConfig::for_language("scheme").unwrap(), FoldConfig::lisp());
        assert!(matches!(
            FoldConfig::for_language("cobol"),
            Err(FoldConfigError::UnknownLanguage(name)) if name == "cobol"
        ));
    }

    #[test]
    fn test_c_like_order() {
        let config = FoldConfig::c_like();
        let pairs: Vec<(&str, &str)> = config
            .triggers
            .iter()
            .map(|t| (t.start.as_str(), t.end.as_str()))
            .collect();
        assert_eq!(pairs, vec![("{", "}"), ("/*", "*/"), ("[", "]")]);
    }
}
