use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constraints::ParameterValue;

/// Locale every lookup ultimately falls back to. Always present in the
/// built-in registry.
pub const FALLBACK_LOCALE: &str = "en";

/// Key of the message used when a constraint has no entry of its own.
pub const GENERIC_KEY: &str = "generic";

/// One locale's message table, keyed by constraint name.
pub type LocaleMessages = BTreeMap<String, String>;

/// Message registry keyed by locale code.
pub type MessageRegistry = BTreeMap<String, LocaleMessages>;

/// Seam for custom message sources.
pub trait MessageLookup {
    /// Resolves `key` to a localized, parameter-substituted message.
    fn get_string(
        &self,
        key: &str,
        parameters: Option<&[ParameterValue]>,
        locale: Option<&str>,
    ) -> String;
}

/// Built-in message dictionary with a locale-fallback chain.
///
/// Locale resolution strips trailing `-subtag` components from the requested
/// code ("en-US" is tried as "en-US", then "en") and falls back to
/// [`FALLBACK_LOCALE`]. Within the chosen locale, a missing key falls back to
/// that locale's generic message, then to the fallback locale's key, then to
/// the fallback locale's generic message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringDictionary {
    registry: MessageRegistry,
}

impl StringDictionary {
    /// Dictionary with the built-in `en`/`ru` registry.
    pub fn new() -> Self {
        Self {
            registry: built_in_registry(),
        }
    }

    /// Replaces the registry wholesale.
    pub fn with_registry(registry: MessageRegistry) -> Self {
        Self { registry }
    }

    /// Replaces the registry wholesale from JSON
    /// (`{"<locale>": {"<key>": "<message>", ...}, ...}`).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            registry: serde_json::from_str(json)?,
        })
    }

    pub fn registry(&self) -> &MessageRegistry {
        &self.registry
    }

    /// Preference-ordered locale codes derived from `locale` by progressively
    /// stripping trailing subtags.
    fn derive_locale_codes(locale: &str) -> Vec<String> {
        let mut codes = Vec::new();
        let mut parts: Vec<&str> = locale.split('-').collect();
        while !parts.is_empty() {
            codes.push(parts.join("-"));
            parts.pop();
        }
        codes
    }

    fn messages_for_locale(&self, locale: &str) -> Option<&LocaleMessages> {
        Self::derive_locale_codes(locale)
            .iter()
            .find_map(|code| self.registry.get(code))
    }

    fn resolve(&self, key: &str, locale: &str) -> Option<&str> {
        let fallback = self.registry.get(FALLBACK_LOCALE);
        let messages = self.messages_for_locale(locale).or(fallback)?;

        messages
            .get(key)
            .or_else(|| messages.get(GENERIC_KEY))
            .or_else(|| fallback.and_then(|f| f.get(key)))
            .or_else(|| fallback.and_then(|f| f.get(GENERIC_KEY)))
            .map(String::as_str)
    }

    /// Substitutes `{i}` placeholders with the i-th parameter's string form.
    ///
    /// Single left-to-right scan: substituted text is never rescanned, and
    /// placeholders without a matching parameter are left literal.
    fn interpolate(message: &str, parameters: &[ParameterValue]) -> String {
        let mut result = String::with_capacity(message.len());
        let mut rest = message;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if after[..close].chars().all(|c| c.is_ascii_digit()) && close > 0 => {
                    let index: usize = after[..close].parse().unwrap_or(usize::MAX);
                    match parameters.get(index) {
                        Some(value) => result.push_str(&value.to_string()),
                        None => result.push_str(&rest[open..open + close + 2]),
                    }
                    rest = &after[close + 1..];
                }
                _ => {
                    result.push('{');
                    rest = after;
                }
            }
        }
        result.push_str(rest);
        result
    }
}

impl Default for StringDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLookup for StringDictionary {
    fn get_string(
        &self,
        key: &str,
        parameters: Option<&[ParameterValue]>,
        locale: Option<&str>,
    ) -> String {
        let locale = locale.unwrap_or(FALLBACK_LOCALE);
        // A registry stripped of the fallback locale resolves to the key
        // itself rather than panicking.
        let message = match self.resolve(key, locale) {
            Some(message) => message,
            None => key,
        };
        match parameters {
            Some(parameters) => Self::interpolate(message, parameters),
            None => message.to_string(),
        }
    }
}

fn locale_messages(entries: &[(&str, &str)]) -> LocaleMessages {
    entries
        .iter()
        .map(|(key, message)| (key.to_string(), message.to_string()))
        .collect()
}

fn built_in_registry() -> MessageRegistry {
    let mut registry = MessageRegistry::new();
    registry.insert(
        "en".to_string(),
        locale_messages(&[
            (GENERIC_KEY, "Please enter a correct value"),
            ("required", "Please fill in this required field"),
            ("email", "Please specify valid E-Mail address"),
            ("minlength", "Please enter a value not less than {0} characters"),
            ("maxlength", "Please enter a value not greater than {0} characters"),
            ("number", "Please enter a correct number"),
            ("min", "Please enter a number not less than {0}"),
            ("max", "Please enter a number not greater than {0}"),
            ("pattern", "Please enter a correct value according to specified rules"),
            ("url", "Please enter a valid URL address"),
        ]),
    );
    registry.insert(
        "ru".to_string(),
        locale_messages(&[
            (GENERIC_KEY, "Пожалуйста введите корректное значение"),
            ("required", "Пожалуйста заполните это обязательное поле"),
            ("email", "Пожалуйста укажите корректный E-Mail адрес"),
            ("minlength", "Пожалуйста укажите значение не короче {0} символов"),
            ("maxlength", "Пожалуйста укажите значение не длиннее {0} символов"),
            ("number", "Пожалуйста введите корректное число"),
            ("min", "Пожалуйста укажите число не меньше чем {0}"),
            ("max", "Пожалуйста укажите число не больше чем {0}"),
            (
                "pattern",
                "Пожалуйста введите значение в соответствии с указанными требованиями",
            ),
            ("url", "Пожалуйста укажите корректный URL адрес"),
        ]),
    );
    registry
}
