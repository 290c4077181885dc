use serde::{Deserialize, Serialize};

use crate::schema::{Check, FieldRule, FormSchema, Schema, SchemaId};

const EMAIL_CHECKS: &[Check] = &[Check::NonEmpty, Check::Email];
const NON_EMPTY: &[Check] = &[Check::NonEmpty];

/// Minimum phone length accepted on the social qualify form.
pub const MIN_PHONE_LENGTH: usize = 10;

pub const CONTRACTOR_REQUEST_SCHEMA: Schema = Schema {
    id: SchemaId::ContractorRequest,
    fields: &[
        FieldRule::required("email", EMAIL_CHECKS),
        FieldRule::required("companySlug", NON_EMPTY),
        FieldRule::required("companyName", NON_EMPTY),
    ],
};

pub const SOCIAL_QUALIFY_SCHEMA: Schema = Schema {
    id: SchemaId::SocialQualify,
    fields: &[
        FieldRule::required("email", EMAIL_CHECKS),
        FieldRule::required("phone", &[Check::NonEmpty, Check::MinLength(MIN_PHONE_LENGTH)]),
        FieldRule::required("redditUsername", NON_EMPTY),
        FieldRule::optional("twitterUsername", &[]),
    ],
};

/// A contractor asking to be listed under a company page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorRequest {
    pub email: String,
    pub company_slug: String,
    pub company_name: String,
}

impl FormSchema for ContractorRequest {
    const SCHEMA: &'static Schema = &CONTRACTOR_REQUEST_SCHEMA;
}

/// Social account details submitted for qualification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialQualifyForm {
    pub email: String,
    pub phone: String,
    pub reddit_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_username: Option<String>,
}

impl FormSchema for SocialQualifyForm {
    const SCHEMA: &'static Schema = &SOCIAL_QUALIFY_SCHEMA;
}
