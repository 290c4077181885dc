use serde_json::Value;

use super::email::is_valid_email;
use super::violation::{Violation, ViolationCode};

/// Whether a field has to be present in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Predicate applied to a present string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    NonEmpty,
    Email,
    /// Minimum character count after trimming surrounding whitespace.
    MinLength(usize),
}

impl Check {
    fn apply(&self, field: &'static str, value: &str) -> Result<(), Violation> {
        match *self {
            Check::NonEmpty if value.is_empty() => Err(Violation::new(
                field,
                ViolationCode::Empty,
                format!("{field} must not be empty"),
            )),
            Check::Email if !is_valid_email(value) => Err(Violation::new(
                field,
                ViolationCode::InvalidEmail,
                format!("{field} must be a valid email address"),
            )),
            Check::MinLength(min) if value.trim().chars().count() < min => Err(Violation::new(
                field,
                ViolationCode::TooShort,
                format!("{field} must contain at least {min} characters"),
            )),
            _ => Ok(()),
        }
    }
}

/// Declarative constraint descriptor for one field. Every field is a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub presence: Presence,
    pub checks: &'static [Check],
}

impl FieldRule {
    pub const fn required(field: &'static str, checks: &'static [Check]) -> Self {
        Self {
            field,
            presence: Presence::Required,
            checks,
        }
    }

    pub const fn optional(field: &'static str, checks: &'static [Check]) -> Self {
        Self {
            field,
            presence: Presence::Optional,
            checks,
        }
    }

    /// Evaluate the rule against the raw field value, reporting the first failed check.
    ///
    /// `null` is treated the same as an absent key.
    pub(crate) fn evaluate(&self, value: Option<&Value>) -> Option<Violation> {
        let raw = match value {
            None | Some(Value::Null) => {
                return match self.presence {
                    Presence::Required => Some(Violation::missing(self.field)),
                    Presence::Optional => None,
                }
            }
            Some(Value::String(raw)) => raw,
            Some(other) => return Some(Violation::invalid_type(self.field, other)),
        };

        self.checks
            .iter()
            .find_map(|check| check.apply(self.field, raw).err())
    }
}
