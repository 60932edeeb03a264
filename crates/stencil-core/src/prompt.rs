//! Collecting final values for every configuration key
//!
//! The prompt loop is a plain synchronous request/response sequence. The
//! actual input source sits behind the [`Prompter`] trait so the terminal
//! front end, `--yes` mode and tests can each supply their own.

use crate::config::Configuration;
use crate::error::{Result, ScaffoldError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;

/// Source of answers for configuration keys
pub trait Prompter {
    /// Ask for the value of `key`, offering `default` as an editable answer.
    /// Any error aborts the whole run.
    fn prompt(&mut self, key: &str, default: &str) -> io::Result<String>;
}

/// Accepts every default without asking (non-interactive mode)
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn prompt(&mut self, _key: &str, default: &str) -> io::Result<String> {
        Ok(default.to_string())
    }
}

/// Final key -> value mapping used as the render context.
/// Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValueSet(BTreeMap<String, String>);

impl ValueSet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValueSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Ask `prompter` for each key of `config` in file order.
/// The first failed prompt aborts collection and discards earlier answers.
pub fn collect<P: Prompter + ?Sized>(config: &Configuration, prompter: &mut P) -> Result<ValueSet> {
    let mut values = BTreeMap::new();

    for (key, default) in config.iter() {
        let answer = prompter
            .prompt(key, default)
            .map_err(|source| ScaffoldError::PromptAborted {
                key: key.to_string(),
                source,
            })?;
        tracing::debug!(key, "value collected");
        values.insert(key.to_string(), answer);
    }

    Ok(ValueSet(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Replays canned answers; keys without one take their default.
    /// Fails on `fail_on` to simulate the operator cancelling.
    struct ScriptedPrompter {
        answers: HashMap<String, String>,
        fail_on: Option<String>,
        asked: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[(&str, &str)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                fail_on: None,
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn prompt(&mut self, key: &str, default: &str) -> io::Result<String> {
            self.asked.push(key.to_string());
            if self.fail_on.as_deref() == Some(key) {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "cancelled"));
            }
            Ok(self
                .answers
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string()))
        }
    }

    fn sample_config() -> Configuration {
        Configuration::from_json(br#"{"Name": "World", "Author": "anon", "Year": "2024"}"#)
            .unwrap()
    }

    #[test]
    fn test_collect_yields_exactly_the_config_keys() {
        let config = sample_config();
        let values = collect(&config, &mut AcceptDefaults).unwrap();

        assert_eq!(values.len(), config.len());
        for key in config.keys() {
            assert!(values.contains_key(key), "missing {key}");
        }
        assert_eq!(values.get("Name"), Some("World"));
    }

    #[test]
    fn test_collect_keeps_edited_answers() {
        let config = sample_config();
        let mut prompter = ScriptedPrompter::new(&[("Name", "Stencil"), ("Year", "")]);

        let values = collect(&config, &mut prompter).unwrap();

        assert_eq!(values.get("Name"), Some("Stencil"));
        assert_eq!(values.get("Author"), Some("anon"));
        assert_eq!(values.get("Year"), Some(""));
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_collect_prompts_in_file_order() {
        let config = sample_config();
        let mut prompter = ScriptedPrompter::new(&[]);

        collect(&config, &mut prompter).unwrap();

        assert_eq!(prompter.asked, vec!["Name", "Author", "Year"]);
    }

    #[test]
    fn test_cancel_aborts_immediately() {
        let config = sample_config();
        let mut prompter = ScriptedPrompter::new(&[]);
        prompter.fail_on = Some("Author".to_string());

        let err = collect(&config, &mut prompter).unwrap_err();

        match err {
            ScaffoldError::PromptAborted { key, .. } => assert_eq!(key, "Author"),
            other => panic!("unexpected error: {other}"),
        }
        // Nothing after the cancelled key is asked
        assert_eq!(prompter.asked, vec!["Name", "Author"]);
    }

    #[test]
    fn test_empty_config_yields_empty_values() {
        let values = collect(&Configuration::default(), &mut AcceptDefaults).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_value_set_serializes_flat() {
        let values: ValueSet = [("Name", "World")].into_iter().collect();
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"Name":"World"}"#);
    }
}
