//! Habit records and the rules for naming them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_ALIAS_LEN: usize = 15;
pub const MAX_ALIASES: usize = 5;
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Whether logging a habit records a success or a slip-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitType {
    /// A habit to build. A log marks the day as performed.
    #[default]
    Improve,
    /// A habit to abstain from. A log marks the day as a slip-up.
    Quit,
}

impl HabitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitType::Improve => "improve",
            HabitType::Quit => "quit",
        }
    }
}

impl fmt::Display for HabitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "improve" => Ok(HabitType::Improve),
            "quit" => Ok(HabitType::Quit),
            _ => Err(ValidationError::invalid(
                "type",
                "must be either 'improve' or 'quit'",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub description: Option<String>,
    pub habit_type: HabitType,
    pub created_date: NaiveDate,
}

impl Habit {
    pub fn is_quit(&self) -> bool {
        self.habit_type == HabitType::Quit
    }
}

/// A habit that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
    pub habit_type: HabitType,
    pub aliases: Vec<String>,
}

impl NewHabit {
    pub fn new(name: impl Into<String>, habit_type: HabitType) -> Self {
        Self {
            name: name.into(),
            habit_type,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Normalize every field and check the length and uniqueness rules that do
    /// not need the registry.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = normalize_name(&self.name)?;
        let description = normalize_description(self.description.as_deref())?;

        if self.aliases.len() > MAX_ALIASES {
            return Err(ValidationError::TooMany {
                field: "aliases".into(),
                max: MAX_ALIASES,
            });
        }
        let mut aliases: Vec<String> = Vec::with_capacity(self.aliases.len());
        for raw in &self.aliases {
            let alias = normalize_alias(raw)?;
            if alias == name || aliases.contains(&alias) {
                return Err(ValidationError::Duplicate {
                    field: "alias".into(),
                    value: alias,
                });
            }
            aliases.push(alias);
        }

        Ok(Self {
            name,
            description,
            habit_type: self.habit_type,
            aliases,
        })
    }
}

/// Trim, lower-case and check a habit name.
pub fn normalize_name(raw: &str) -> Result<String, ValidationError> {
    normalize_word(raw, "habit name", MAX_NAME_LEN)
}

pub fn normalize_alias(raw: &str) -> Result<String, ValidationError> {
    normalize_word(raw, "alias", MAX_ALIAS_LEN)
}

/// Empty descriptions are stored as absent.
pub fn normalize_description(raw: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".into(),
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(Some(text.to_string()))
}

fn normalize_word(raw: &str, field: &str, max: usize) -> Result<String, ValidationError> {
    let word = raw.trim();
    if word.is_empty() {
        return Err(ValidationError::invalid(field, "cannot be empty"));
    }
    if word.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid(field, "should be a single word"));
    }
    if word.contains(',') {
        return Err(ValidationError::invalid(field, "cannot contain ','"));
    }
    if word.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(word.to_lowercase())
}
