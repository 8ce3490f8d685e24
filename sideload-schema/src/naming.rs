//! Field and resource-type naming rules.
//!
//! Wire names are lower kebab-case. Internal names follow one of the
//! [`FieldCase`] conventions, and [`wire_name`] / [`internal_name`] convert
//! between the two.
//!
//! ```rust
//! use sideload_schema::naming::{FieldCase, internal_name, resource_type, wire_name};
//!
//! assert_eq!(wire_name("first_name"), "first-name");
//! assert_eq!(wire_name("firstName"), "first-name");
//! assert_eq!(internal_name("first-name", FieldCase::Camel), "firstName");
//! assert_eq!(resource_type("FormattingWithABBR", false), "formatting-with-abbr");
//! assert_eq!(resource_type("Person", true), "persons");
//! ```

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// Internal naming convention of serialized field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCase {
    /// `first_name`
    #[default]
    Snake,
    /// `firstName`
    Camel,
}

impl FieldCase {
    fn case(self) -> Case {
        match self {
            Self::Snake => Case::Snake,
            Self::Camel => Case::Camel,
        }
    }

    /// Get the convention name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snake => "snake",
            Self::Camel => "camel",
        }
    }
}

/// Convert an internal field name into its wire (kebab-case) form.
pub fn wire_name(name: &str) -> String {
    name.to_case(Case::Kebab)
}

/// Convert a wire field name back into the internal convention.
pub fn internal_name(wire: &str, case: FieldCase) -> String {
    wire.to_case(case.case())
}

/// Default resource type for a domain model name.
///
/// The model name is kebab-cased and, when `pluralize` is set, its last word
/// is pluralized.
pub fn resource_type(model: &str, pluralize: bool) -> String {
    let singular = model.trim().to_case(Case::Kebab);
    if pluralize {
        self::pluralize(&singular)
    } else {
        singular
    }
}

/// Pluralize a lowercase English word with the regular suffix rules.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        return format!("{}es", word);
    }

    if let Some(stem) = word.strip_suffix('y') {
        let after_consonant = stem
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_alphabetic() && !"aeiou".contains(c));
        if after_consonant {
            return format!("{}ies", stem);
        }
    }

    format!("{}s", word)
}
