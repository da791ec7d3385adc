//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, well-formed
//! calendar dates, known field names) so that once a value reaches the domain
//! layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Canonical wire format of calendar dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// Format used when dates are shown in list views and matched by search.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value could not be read as a calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// Provided name does not correspond to any product field.
    #[error("unknown product field: {0}")]
    UnknownField(String),
}

/// Externally assigned identifier of a financial product.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Creates an identifier from a trimmed, non-empty string.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ProductId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

/// Fields of a product record, in the order they appear on the creation form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Id,
    Name,
    Description,
    Logo,
    DateRelease,
    DateRevision,
}

impl ProductField {
    pub const ALL: [ProductField; 6] = [
        ProductField::Id,
        ProductField::Name,
        ProductField::Description,
        ProductField::Logo,
        ProductField::DateRelease,
        ProductField::DateRevision,
    ];

    /// Field identifier as used in JSON payloads and HTML forms.
    pub const fn as_str(self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Logo => "logo",
            ProductField::DateRelease => "date_release",
            ProductField::DateRevision => "date_revision",
        }
    }

    /// Human readable name: first letter capitalized, underscores replaced by spaces.
    pub fn display_name(self) -> String {
        let spaced = self.as_str().replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Whether the field holds a calendar date.
    pub const fn is_date(self) -> bool {
        matches!(self, ProductField::DateRelease | ProductField::DateRevision)
    }
}

impl Display for ProductField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductField {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| TypeConstraintError::UnknownField(s.to_string()))
    }
}

/// Calendar date without time-of-day, serialized as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a raw date input.
    ///
    /// Accepts ISO dates, ISO timestamps with or without an offset (the date
    /// part is kept as written) and `DD/MM/YYYY`.
    pub fn parse(raw: &str) -> Result<Self, TypeConstraintError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT) {
            return Ok(Self(date));
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(timestamp.date_naive()));
        }
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(timestamp.date()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, DISPLAY_DATE_FORMAT) {
            return Ok(Self(date));
        }

        Err(TypeConstraintError::InvalidDate(raw.to_string()))
    }

    /// `YYYY-MM-DD`.
    pub fn to_iso(self) -> String {
        self.0.format(ISO_DATE_FORMAT).to_string()
    }

    /// `DD/MM/YYYY`.
    pub fn to_display(self) -> String {
        self.0.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Re-serializes a raw date input as `YYYY-MM-DD`.
///
/// Input that cannot be read as a date yields an empty string, the value an
/// HTML date input reports for anything it cannot represent.
pub fn normalize_date_input(raw: &str) -> String {
    CalendarDate::parse(raw)
        .map(CalendarDate::to_iso)
        .unwrap_or_default()
}
