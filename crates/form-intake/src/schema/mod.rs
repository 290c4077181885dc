//! Declarative payload schemas.
//!
//! A [`Schema`] is a static table of [`FieldRule`]s. Checking a payload evaluates every
//! rule independently and collects all violations, so the outcome never depends on the
//! order fields are declared in. Schemas hold no state and can be shared freely across
//! concurrent requests.

mod email;
mod rules;
mod violation;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::forms::{ContractorRequest, SocialQualifyForm};

pub use rules::{Check, FieldRule, Presence};
pub use violation::{ValidationFailure, Violation, ViolationCode, BODY_FIELD};

/// Identifies one of the accepted payload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaId {
    ContractorRequest,
    SocialQualify,
}

impl SchemaId {
    pub const ALL: [SchemaId; 2] = [SchemaId::ContractorRequest, SchemaId::SocialQualify];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaId::ContractorRequest => "contractor-request",
            SchemaId::SocialQualify => "social-qualify",
        }
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            SchemaId::ContractorRequest => ContractorRequest::SCHEMA,
            SchemaId::SocialQualify => SocialQualifyForm::SCHEMA,
        }
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown schema '{0}' (expected contractor-request or social-qualify)")]
pub struct UnknownSchema(pub String);

impl FromStr for SchemaId {
    type Err = UnknownSchema;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SchemaId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownSchema(value.to_string()))
    }
}

#[derive(Debug)]
pub struct Schema {
    pub id: SchemaId,
    pub fields: &'static [FieldRule],
}

impl Schema {
    /// Check a raw payload, collecting every violated field.
    pub fn check(&self, payload: &Value) -> Result<(), ValidationFailure> {
        let Some(object) = payload.as_object() else {
            return Err(ValidationFailure::new(
                self.id,
                vec![Violation::body_not_object(payload)],
            ));
        };

        let violations: Vec<Violation> = self
            .fields
            .iter()
            .filter_map(|rule| rule.evaluate(object.get(rule.field)))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::new(self.id, violations))
        }
    }

    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.field == field)
    }
}

/// A typed payload backed by a static schema.
pub trait FormSchema: DeserializeOwned {
    const SCHEMA: &'static Schema;

    /// Check `payload` against [`Self::SCHEMA`] and deserialize it on success.
    fn validate(payload: &Value) -> Result<Self, ValidationFailure> {
        Self::SCHEMA.check(payload)?;
        Self::deserialize(payload).map_err(|err| {
            ValidationFailure::new(
                Self::SCHEMA.id,
                vec![Violation::new(
                    BODY_FIELD,
                    ViolationCode::InvalidType,
                    err.to_string(),
                )],
            )
        })
    }
}

/// Outcome of [`validate`] when the schema is chosen at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidatedPayload {
    ContractorRequest(ContractorRequest),
    SocialQualify(SocialQualifyForm),
}

impl ValidatedPayload {
    pub fn schema(&self) -> SchemaId {
        match self {
            ValidatedPayload::ContractorRequest(_) => SchemaId::ContractorRequest,
            ValidatedPayload::SocialQualify(_) => SchemaId::SocialQualify,
        }
    }
}

pub fn validate(schema: SchemaId, payload: &Value) -> Result<ValidatedPayload, ValidationFailure> {
    match schema {
        SchemaId::ContractorRequest => {
            ContractorRequest::validate(payload).map(ValidatedPayload::ContractorRequest)
        }
        SchemaId::SocialQualify => {
            SocialQualifyForm::validate(payload).map(ValidatedPayload::SocialQualify)
        }
    }
}
