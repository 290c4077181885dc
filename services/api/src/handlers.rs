use crate::middleware::JsonBody;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{Method, Uri};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use form_intake::error::RequestError;
use form_intake::{ContractorRequest, FormSchema, SocialQualifyForm};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Acknowledgement returned for an accepted form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAccepted<T> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
    pub received_at: DateTime<Utc>,
}

impl<T> SubmissionAccepted<T> {
    fn new(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
            received_at: Utc::now(),
        }
    }
}

pub async fn ping(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: state.settings.ping_message(),
    })
}

pub async fn demo(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Hello from {} server", state.server_name),
    })
}

pub async fn contractor_request(
    body: Option<Extension<JsonBody>>,
) -> Result<Json<SubmissionAccepted<ContractorRequest>>, RequestError> {
    let request = validate_body::<ContractorRequest>(body)?;
    info!(company_slug = %request.company_slug, "contractor request accepted");
    Ok(Json(SubmissionAccepted::new(
        "contractor request received",
        request,
    )))
}

pub async fn social_qualify(
    body: Option<Extension<JsonBody>>,
) -> Result<Json<SubmissionAccepted<SocialQualifyForm>>, RequestError> {
    let form = validate_body::<SocialQualifyForm>(body)?;
    info!(
        reddit_username = %form.reddit_username,
        has_twitter = form.twitter_username.is_some(),
        "social qualify form accepted"
    );
    Ok(Json(SubmissionAccepted::new(
        "social qualify form received",
        form,
    )))
}

pub async fn not_found(method: Method, uri: Uri) -> RequestError {
    RequestError::NotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Requests without a parsed JSON body validate as an empty object.
fn validate_body<T: FormSchema>(body: Option<Extension<JsonBody>>) -> Result<T, RequestError> {
    let empty = Value::Object(Map::new());
    let payload = body.as_ref().map_or(&empty, |Extension(JsonBody(value))| &**value);

    T::validate(payload).map_err(|failure| {
        debug!(
            schema = %failure.schema,
            violations = failure.violations.len(),
            "rejecting submission"
        );
        RequestError::Validation(failure)
    })
}
