//! Page forms
//!
//! A [`FormManager`] holds the named [`FieldManager`]s of one page in
//! declaration order. A field owns its current value, the rules it must pass
//! and the [`Condition`]s under which those rules apply at all; conditions look
//! at the current value of another field on the same page.
//!
//! Whether errors are shown is decided by [`Dirty`]: a form built for a GET is
//! pristine and never reports errors, a form built from a POST is marked dirty
//! once and reports every violation whose conditions are met.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::validators::{self, ValidationRule};

/// Whether the user has submitted the page yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dirty {
    #[default]
    Pristine,
    Dirty,
}

impl Dirty {
    pub fn is_dirty(self) -> bool {
        matches!(self, Dirty::Dirty)
    }
}

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Applies-if condition on another field of the same form
#[derive(Clone)]
pub struct Condition {
    pub depends_on: String,
    meeting_condition: Predicate,
}

impl Condition {
    pub fn new(
        depends_on: impl Into<String>,
        meeting_condition: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            depends_on: depends_on.into(),
            meeting_condition: Arc::new(meeting_condition),
        }
    }

    /// Met when the other field holds exactly `expected`.
    pub fn equals(depends_on: impl Into<String>, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        Self::new(depends_on, move |value| value == expected)
    }

    /// Met when the other field is not blank.
    pub fn not_blank(depends_on: impl Into<String>) -> Self {
        Self::new(depends_on, |value| !value.trim().is_empty())
    }

    pub fn is_met_by(&self, value: &str) -> bool {
        (self.meeting_condition)(value)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("depends_on", &self.depends_on)
            .finish_non_exhaustive()
    }
}

/// One field of a page form
#[derive(Debug, Clone, Default)]
pub struct FieldManager {
    value: String,
    rules: Vec<ValidationRule>,
    conditions: Vec<Condition>,
}

impl FieldManager {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Rule violations, ignoring dirtiness and conditions
    pub fn violations(&self) -> Vec<&str> {
        validators::violations(&self.rules, &self.value)
    }

    /// Whether every condition holds, reading other fields through `lookup`.
    ///
    /// A condition on a field the form does not contain sees an empty value.
    pub fn conditions_met<'a>(&self, lookup: impl Fn(&str) -> Option<&'a str>) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.is_met_by(lookup(&condition.depends_on).unwrap_or("")))
    }

    /// Errors to show the user for this field
    pub fn errors<'a>(&self, dirty: Dirty, lookup: impl Fn(&str) -> Option<&'a str>) -> Vec<String> {
        if !dirty.is_dirty() || !self.conditions_met(lookup) {
            return Vec::new();
        }
        self.violations().into_iter().map(str::to_string).collect()
    }
}

/// View of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldJson {
    pub value: String,
    pub error_messages: Vec<String>,
}

/// Entry in the error summary at the top of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryItem {
    pub field_id: String,
    pub error_messages: Vec<String>,
}

/// View of a whole page form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormJson {
    pub has_errors: bool,
    pub error_summary: Vec<SummaryItem>,
    pub fields: BTreeMap<String, FieldJson>,
}

/// The editable fields of one page
#[derive(Debug, Clone, Default)]
pub struct FormManager {
    fields: Vec<(String, FieldManager)>,
    dirty: Dirty,
}

impl FormManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; fields are reported in the order they are added.
    pub fn field(mut self, name: impl Into<String>, field: FieldManager) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    /// Mark the form as submitted. Call once per POST, never on GET.
    pub fn mark_as_dirty(mut self) -> Self {
        self.dirty = Dirty::Dirty;
        self
    }

    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    pub fn get(&self, name: &str) -> Option<&FieldManager> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, field)| field)
    }

    /// Names of the fields, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    fn value_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(FieldManager::value)
    }

    /// Field errors in declaration order, as seen with the given dirtiness
    pub fn errors_with(&self, dirty: Dirty) -> Vec<(&str, Vec<String>)> {
        self.fields
            .iter()
            .map(|(name, field)| (name.as_str(), field.errors(dirty, |other| self.value_of(other))))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.errors_with(self.dirty)
            .iter()
            .any(|(_, errors)| !errors.is_empty())
    }

    pub fn serialise(&self) -> FormJson {
        let errors = self.errors_with(self.dirty);

        let error_summary: Vec<SummaryItem> = errors
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(name, messages)| SummaryItem {
                field_id: name.to_string(),
                error_messages: messages.clone(),
            })
            .collect();

        let fields = self
            .fields
            .iter()
            .zip(errors)
            .map(|((name, field), (_, error_messages))| {
                (
                    name.clone(),
                    FieldJson {
                        value: field.value().to_string(),
                        error_messages,
                    },
                )
            })
            .collect();

        FormJson {
            has_errors: !error_summary.is_empty(),
            error_summary,
            fields,
        }
    }
}
