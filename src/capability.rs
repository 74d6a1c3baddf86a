//! Recognizer capabilities: which entity types and languages each recognizer covers.
//!
//! The registry is built once, from configuration or with [`RegistryBuilder`],
//! and then only read. It also fixes the total order over entity types used
//! for every tie-break and for output ordering: the order in which types are
//! first declared.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CombineError, CombineResult, ConfigError};

macro_rules! string_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_token!(
    /// Opaque identity of a contributing recognizer (e.g. `"date-tagger-A"`).
    RecognizerId
);

string_token!(
    /// Entity type label (e.g. `"PERSON"`). Ordered for voting by
    /// [`CapabilityRegistry::compare_types`], not by `Ord`.
    EntityType
);

string_token!(
    /// Document language tag, compared verbatim (`"en"` != `"EN"`).
    Language
);

/// The detection scope of one recognizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capability {
    pub types: BTreeSet<EntityType>,
    pub languages: BTreeSet<Language>,
}

impl Capability {
    pub fn supports_type(&self, entity_type: &EntityType) -> bool {
        self.types.contains(entity_type)
    }

    pub fn supports_language(&self, language: &Language) -> bool {
        self.languages.contains(language)
    }

    /// True when the recognizer could have reported `entity_type` in `language`.
    pub fn covers(&self, entity_type: &EntityType, language: &Language) -> bool {
        self.supports_type(entity_type) && self.supports_language(language)
    }
}

/// One row of recognizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizerConfig {
    pub id: RecognizerId,
    #[serde(default)]
    pub types: Vec<EntityType>,
    #[serde(default)]
    pub languages: Vec<Language>,
}

/// Already-parsed capability configuration.
///
/// ```toml
/// [[recognizer]]
/// id = "date-tagger-A"
/// types = ["DATE", "TIME"]
/// languages = ["pt", "en"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(rename = "recognizer", default)]
    pub recognizers: Vec<RecognizerConfig>,
}

impl RegistryConfig {
    /// Parse a TOML configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Read-only lookup from recognizer identity to [`Capability`].
///
/// Safe to share across threads once built.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    /// Recognizers in declaration order
    recognizers: Vec<(RecognizerId, Capability)>,
    by_id: HashMap<RecognizerId, usize>,
    /// Entity types in first-declaration order
    type_order: Vec<EntityType>,
    type_rank: HashMap<EntityType, usize>,
}

impl CapabilityRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self, ConfigError> {
        let mut builder = RegistryBuilder::default();
        for row in &config.recognizers {
            builder.rows.push(row.clone());
        }
        builder.build()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::from_config(&RegistryConfig::from_toml_str(text)?)
    }

    /// Capability of `id`, or [`CombineError::UnknownRecognizer`].
    pub fn capabilities_of(&self, id: &RecognizerId) -> CombineResult<&Capability> {
        self.by_id
            .get(id)
            .map(|&idx| &self.recognizers[idx].1)
            .ok_or_else(|| CombineError::UnknownRecognizer { id: id.clone() })
    }

    /// Unknown recognizers support nothing.
    pub fn supports_type(&self, id: &RecognizerId, entity_type: &EntityType) -> bool {
        self.capabilities_of(id)
            .map_or(false, |cap| cap.supports_type(entity_type))
    }

    pub fn supports_language(&self, id: &RecognizerId, language: &Language) -> bool {
        self.capabilities_of(id)
            .map_or(false, |cap| cap.supports_language(language))
    }

    pub fn contains(&self, id: &RecognizerId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Recognizer identities in declaration order.
    pub fn recognizers(&self) -> impl Iterator<Item = &RecognizerId> {
        self.recognizers.iter().map(|(id, _)| id)
    }

    /// Recognizers able to detect `entity_type` in `language`, in declaration order.
    pub fn eligible_for<'a>(
        &'a self,
        entity_type: &'a EntityType,
        language: &'a Language,
    ) -> impl Iterator<Item = &'a RecognizerId> + 'a {
        self.recognizers
            .iter()
            .filter(move |(_, cap)| cap.covers(entity_type, language))
            .map(|(id, _)| id)
    }

    /// Entity types in their fixed total order (first declaration wins).
    pub fn type_order(&self) -> &[EntityType] {
        &self.type_order
    }

    /// Fixed total order over entity types.
    ///
    /// Declared types compare by first declaration. Undeclared types sort
    /// after every declared one, by name.
    pub fn compare_types(&self, a: &EntityType, b: &EntityType) -> Ordering {
        let rank_a = self.type_rank.get(a).copied().unwrap_or(usize::MAX);
        let rank_b = self.type_rank.get(b).copied().unwrap_or(usize::MAX);
        rank_a.cmp(&rank_b).then_with(|| a.cmp(b))
    }
}

/// Programmatic construction of a [`CapabilityRegistry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    rows: Vec<RecognizerConfig>,
}

impl RegistryBuilder {
    pub fn recognizer(mut self, id: &str, types: &[&str], languages: &[&str]) -> Self {
        self.rows.push(RecognizerConfig {
            id: RecognizerId::from(id),
            types: types.iter().copied().map(EntityType::from).collect(),
            languages: languages.iter().copied().map(Language::from).collect(),
        });
        self
    }

    pub fn build(self) -> Result<CapabilityRegistry, ConfigError> {
        let mut registry = CapabilityRegistry::default();

        for row in self.rows {
            if registry.by_id.contains_key(&row.id) {
                return Err(ConfigError::DuplicateRecognizer { id: row.id });
            }

            for entity_type in &row.types {
                if !registry.type_rank.contains_key(entity_type) {
                    registry
                        .type_rank
                        .insert(entity_type.clone(), registry.type_order.len());
                    registry.type_order.push(entity_type.clone());
                }
            }

            let capability = Capability {
                types: row.types.into_iter().collect(),
                languages: row.languages.into_iter().collect(),
            };
            registry.by_id.insert(row.id.clone(), registry.recognizers.len());
            registry.recognizers.push((row.id, capability));
        }

        Ok(registry)
    }
}
