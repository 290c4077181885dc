//! Validation core for the form intake service.
//!
//! Payload schemas, typed form values, configuration, and the error taxonomy shared by
//! the HTTP surface in `form-intake-api`.

pub mod config;
pub mod error;
pub mod forms;
pub mod schema;
pub mod telemetry;

pub use forms::{ContractorRequest, SocialQualifyForm};
pub use schema::{
    validate, FormSchema, SchemaId, ValidatedPayload, ValidationFailure, Violation,
    ViolationCode,
};
