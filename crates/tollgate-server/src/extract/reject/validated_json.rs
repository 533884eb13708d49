use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};
use crate::utility::tracing_targets::TRACING_TARGET_RESPONSE as TRACING_TARGET;

/// [`Json`] that also runs [`Validate`] on the decoded value.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Client-facing sentence for one failed rule on `field`.
fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{field}': {message}");
    }

    let bound = |key: &str| error.params.get(key).and_then(serde_json::Value::as_u64);
    match (error.code.as_ref(), bound("min"), bound("max")) {
        ("length", Some(min), Some(max)) if min == max => {
            format!("Field '{field}' must be exactly {min} characters long")
        }
        ("length", Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max} characters long")
        }
        ("length", Some(min), None) => format!("Field '{field}' must be at least {min} characters long"),
        ("length", None, Some(max)) => format!("Field '{field}' must be at most {max} characters long"),
        ("required", ..) => format!("Field '{field}' is required"),
        (code, ..) => format!("Field '{field}' failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let mut sentences: Vec<String> = field_errors
            .iter()
            .flat_map(|(field, rules)| rules.iter().map(move |rule| describe(field, rule)))
            .collect();
        sentences.sort_unstable();

        tracing::debug!(
            target: TRACING_TARGET,
            fields = ?field_errors.keys().collect::<Vec<_>>(),
            "Request validation failed"
        );

        let message = if sentences.is_empty() {
            "Validation failed".to_owned()
        } else {
            sentences.join(". ")
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

impl<T: schemars::JsonSchema> aide::OperationInput for ValidateJson<T> {
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        <Json<T> as aide::OperationInput>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        <Json<T> as aide::OperationInput>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Account {
        #[validate(length(min = 1, max = 4))]
        name: String,
        #[validate(length(min = 3))]
        code: String,
    }

    #[test]
    fn each_failed_rule_is_described() {
        let errors = Account {
            name: "too long".into(),
            code: "x".into(),
        }
        .validate()
        .unwrap_err();

        let error = Error::from(errors);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("request"));
        assert_eq!(
            error.message(),
            Some(
                "Field 'code' must be at least 3 characters long. \
                 Field 'name' must be between 1 and 4 characters long"
            )
        );
    }

    #[test]
    fn custom_messages_win() {
        let mut rule = ValidationError::new("price");
        rule.message = Some("must have at most two decimal places".into());

        assert_eq!(
            describe("price", &rule),
            "Field 'price': must have at most two decimal places"
        );
    }
}
