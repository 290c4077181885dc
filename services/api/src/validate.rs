use clap::Args;
use form_intake::error::AppError;
use form_intake::{validate, SchemaId};
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Schema to check the payload against (contractor-request or social-qualify)
    #[arg(long)]
    pub(crate) schema: SchemaId,
    /// JSON file holding the payload. Reads stdin when omitted.
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let ValidateArgs { schema, file } = args;

    let raw = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let (report, outcome) = check_payload(schema, &raw)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    outcome
}

/// Build the printable report for `raw`; the second element carries the failure, if
/// any, so the process exits non-zero on rejection.
fn check_payload(schema: SchemaId, raw: &str) -> Result<(Value, Result<(), AppError>), AppError> {
    let payload: Value = serde_json::from_str(raw)?;

    match validate(schema, &payload) {
        Ok(valid) => Ok((
            json!({ "schema": schema, "valid": true, "data": valid }),
            Ok(()),
        )),
        Err(failure) => Ok((
            json!({
                "schema": schema,
                "valid": false,
                "violations": failure.violations,
            }),
            Err(failure.into()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_valid_payloads() {
        let (report, outcome) = check_payload(
            SchemaId::ContractorRequest,
            r#"{"email":"test@example.com","companySlug":"test-company","companyName":"Test Company"}"#,
        )
        .expect("payload parses");

        assert!(outcome.is_ok());
        assert_eq!(report["valid"], true);
        assert_eq!(report["schema"], "contractor-request");
        assert_eq!(report["data"]["companySlug"], "test-company");
    }

    #[test]
    fn reports_every_violation_and_fails() {
        let (report, outcome) =
            check_payload(SchemaId::SocialQualify, r#"{"email":"nope","phone":"123"}"#)
                .expect("payload parses");

        assert!(matches!(outcome, Err(AppError::Validation(_))));
        assert_eq!(report["valid"], false);
        let fields: Vec<_> = report["violations"]
            .as_array()
            .expect("violations array")
            .iter()
            .map(|violation| violation["field"].as_str().unwrap_or_default())
            .collect();
        assert_eq!(fields, vec!["email", "phone", "redditUsername"]);
    }

    #[test]
    fn rejects_unparseable_input() {
        let err = check_payload(SchemaId::SocialQualify, "{not json").expect_err("bad json");
        assert!(matches!(err, AppError::Json(_)));
    }
}
