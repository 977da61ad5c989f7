//! Field validation rules
//!
//! A rule is a value: an error message paired with a [`RuleKind`] describing
//! what makes a value violate it. Rules are built with the constructor
//! functions on [`ValidationRule`] and evaluated with
//! [`ValidationRule::applies`], which returns `true` when the value is in
//! violation.
//!
//! Every rule except `required`, `isLength` and `isValidDate` treats a blank
//! value as passing, so optional fields only need the pattern rule and
//! mandatory fields compose it with `required`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::hex_id;

static HEXADECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-fA-F0-9]+$").unwrap());

static WHOLE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@([^\s@.,]+\.)+[^\s@.,]{2,}$").unwrap());

static POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z][A-Ha-hJ-Yj-y]?[0-9][A-Za-z0-9]? ?[0-9][A-Za-z]{2}|[Gg][Ii][Rr] ?0[Aa]{2})$",
    )
    .unwrap()
});

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+|00)?[0-9]{10,14}$").unwrap());

static MMSI_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{9}$").unwrap());

/// What a rule checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    MaxLength { max: usize },
    IsLength { length: usize },
    HexadecimalString,
    UkEncodedBeacon,
    ShouldNotContain { substring: String },
    WholeNumber,
    Email,
    Postcode,
    PhoneNumber,
    MmsiNumber,
    IsValidDate,
    IsInThePast,
    MinDateYear { year: i32 },
}

/// A single validation rule and the message shown when it is violated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub error_message: String,
    pub kind: RuleKind,
}

impl ValidationRule {
    fn new(error_message: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            error_message: error_message.into(),
            kind,
        }
    }

    /// Violated when the value is empty or whitespace only.
    pub fn required(error_message: impl Into<String>) -> Self {
        Self::new(error_message, RuleKind::Required)
    }

    /// Violated when the value is longer than `max` characters.
    pub fn max_length(error_message: impl Into<String>, max: usize) -> Self {
        Self::new(error_message, RuleKind::MaxLength { max })
    }

    /// Violated when the value is non-empty and not exactly `length` characters.
    pub fn is_length(error_message: impl Into<String>, length: usize) -> Self {
        Self::new(error_message, RuleKind::IsLength { length })
    }

    pub fn hexadecimal_string(error_message: impl Into<String>) -> Self {
        Self::new(error_message, RuleKind::HexadecimalString)
    }

    /// Violated when a 15-character hex id decodes to a non-UK country code.
    ///
    /// Values of any other length, or with non-hex characters, are left to
    /// the `isLength` and `hexadecimalString` rules.
    pub fn uk_encoded_beacon(error_message: impl Into<String>) -> Self {
        Self::new(error_message, RuleKind::UkEncodedBeacon)
    }

    /// Violated when the value contains `substring` (case-sensitive).
    pub fn should_not_contain(error_message: impl Into<String>, substring: impl Into<String>) -> Self {
        Self::new(
            error_message,
            RuleKind::ShouldNotContain {
                substring: substring.into(),
            },
        )
    }

    pub fn whole_number(error_message: impl Into<String>) -> Self {
        Self::new(error_message, RuleKind::WholeNumber)
    }

    pub fn email(error_message: impl Into<String>) -> Self {
        Self::new(error_message, RuleKind::Email)
    }

    pub fn postcode(error_message: impl Into<String>) -> Self {
        Self::new(error_message, RuleKind::Postcode)
    }

    pub fn phone_number(error_message: impl Into<String>) -> Self {
        Self::new(error_message, RuleKind::PhoneNumber)
    }

    pub fn mmsi_number(error_message: impl Into<String>) -> Self {
        Self::new(error_message, RuleKind::MmsiNumber)
    }

    pub fn is_valid_date(error_message: impl Into<String>) -> Self {
        Self::new(error_message, RuleKind::IsValidDate)
    }

    pub fn is_in_the_past(error_message: impl Into<String>) -> Self {
        Self::new(error_message, RuleKind::IsInThePast)
    }

    /// Violated when the date falls before 1 January of `year`.
    pub fn min_date_year(error_message: impl Into<String>, year: i32) -> Self {
        Self::new(error_message, RuleKind::MinDateYear { year })
    }

    /// Returns `true` if `value` violates this rule.
    pub fn applies(&self, value: &str) -> bool {
        self.applies_at(value, Utc::now().date_naive())
    }

    /// As [`applies`](Self::applies), with "now" pinned to `today`.
    pub fn applies_at(&self, value: &str, today: NaiveDate) -> bool {
        match &self.kind {
            RuleKind::Required => is_blank(value),
            RuleKind::MaxLength { max } => value.chars().count() > *max,
            RuleKind::IsLength { length } => {
                !value.is_empty() && value.chars().count() != *length
            }
            RuleKind::HexadecimalString => violates_pattern(value, &HEXADECIMAL),
            RuleKind::UkEncodedBeacon => {
                hex_id::country_code(value).is_some() && !hex_id::is_uk_encoded(value)
            }
            RuleKind::ShouldNotContain { substring } => value.contains(substring.as_str()),
            RuleKind::WholeNumber => violates_pattern(value, &WHOLE_NUMBER),
            RuleKind::Email => violates_pattern(value, &EMAIL),
            RuleKind::Postcode => violates_pattern(value, &POSTCODE),
            RuleKind::PhoneNumber => {
                let compact: String = value
                    .chars()
                    .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
                    .collect();
                !is_blank(value) && !PHONE_NUMBER.is_match(&compact)
            }
            RuleKind::MmsiNumber => violates_pattern(value, &MMSI_NUMBER),
            RuleKind::IsValidDate => parse_date(value).is_none(),
            RuleKind::IsInThePast => parse_date(value).is_some_and(|date| date > today),
            RuleKind::MinDateYear { year } => match NaiveDate::from_ymd_opt(*year, 1, 1) {
                Some(lower_bound) => parse_date(value).is_some_and(|date| date < lower_bound),
                None => false,
            },
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn violates_pattern(value: &str, pattern: &Regex) -> bool {
    !is_blank(value) && !pattern.is_match(value)
}

/// Parse the date formats the registration pages produce.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM` (read as the first of the month) and RFC
/// 3339 timestamps.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|timestamp| timestamp.date_naive())
        .filter(|date| date.year() > 0)
}

/// Error messages of every rule `value` violates, in rule order
pub fn violations<'a>(rules: &'a [ValidationRule], value: &str) -> Vec<&'a str> {
    let today = Utc::now().date_naive();
    rules
        .iter()
        .filter(|rule| rule.applies_at(value, today))
        .map(|rule| rule.error_message.as_str())
        .collect()
}
