//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, known
//! movement kinds, well-formed months) so that once a value reaches the domain
//! layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Movement type label is neither an inflow nor an outflow.
    #[error("unknown movement type: {0}")]
    UnknownMovementKind(String),
    /// Month string is not in `YYYY-MM` form.
    #[error("invalid month: {0}")]
    InvalidMonth(String),
    /// Money value read from storage is NaN or infinite.
    #[error("amount is not a finite number")]
    NonFiniteAmount,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ProjectId, "Unique identifier for a project.");
id_newtype!(CategoryId, "Unique identifier for a spending category.");
id_newtype!(MovementId, "Unique identifier for a financial movement.");

/// Direction of a financial movement.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub enum MovementKind {
    /// Money coming into the project (`ENTRADA`).
    Inflow,
    /// Money spent by the project (`SAIDA`).
    #[default]
    Outflow,
}

impl MovementKind {
    pub const ALL: [MovementKind; 2] = [MovementKind::Inflow, MovementKind::Outflow];

    /// Label stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            MovementKind::Inflow => "ENTRADA",
            MovementKind::Outflow => "SAIDA",
        }
    }

    /// Whether a stored type label counts toward this direction.
    ///
    /// Labels match by case- and accent-insensitive containment of `ENT`
    /// (inflow) or `SAI` (outflow), so `entrada` and `Saída` are recognised.
    /// The two checks are independent: a label may match both or neither.
    pub fn matches(self, label: &str) -> bool {
        let needle = match self {
            MovementKind::Inflow => "ENT",
            MovementKind::Outflow => "SAI",
        };
        fold_text(label).contains(needle)
    }

    /// Direction of a label matching exactly one of the two kinds.
    pub fn classify(label: &str) -> Option<Self> {
        match (
            MovementKind::Inflow.matches(label),
            MovementKind::Outflow.matches(label),
        ) {
            (true, false) => Some(MovementKind::Inflow),
            (false, true) => Some(MovementKind::Outflow),
            _ => None,
        }
    }
}

/// Upper-cases text and strips the Portuguese diacritics.
///
/// Used for type labels and for description search, where `diária`,
/// `DIÁRIA` and `diaria` all fold to `DIARIA`.
pub fn fold_text(text: &str) -> String {
    text
        .to_uppercase()
        .chars()
        .map(|ch| match ch {
            'Á' | 'À' | 'Â' | 'Ã' => 'A',
            'É' | 'Ê' => 'E',
            'Í' => 'I',
            'Ó' | 'Ô' | 'Õ' => 'O',
            'Ú' | 'Ü' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

impl Display for MovementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ENTRADA" => Ok(MovementKind::Inflow),
            "SAIDA" => Ok(MovementKind::Outflow),
            other => Err(TypeConstraintError::UnknownMovementKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for MovementKind {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MovementKind> for String {
    fn from(value: MovementKind) -> Self {
        value.as_str().to_string()
    }
}

/// Calendar month used by the movement list filter (`YYYY-MM`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, TypeConstraintError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| TypeConstraintError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    /// Inclusive lower bound of the month.
    pub fn first_day(self) -> NaiveDate {
        self.first_day
    }

    /// Exclusive upper bound of the month: the first day of the next month.
    pub fn next_month_first_day(self) -> NaiveDate {
        let (year, month) = if self.first_day.month() == 12 {
            (self.first_day.year() + 1, 1)
        } else {
            (self.first_day.year(), self.first_day.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.first_day() && date < self.next_month_first_day()
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}",
            self.first_day.year(),
            self.first_day.month()
        )
    }
}

impl FromStr for YearMonth {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeConstraintError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Status assigned to movements when none is provided.
pub const DEFAULT_MOVEMENT_STATUS: &str = "confirmado";
