use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationError, ValidationErrors};

/// JSON body extractor that also runs `validator` rules. Rejections use the
/// same `{status, message}` envelope as every other error, plus per-field
/// `details` on validation failures.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let payload = json!({
                    "status": "fail",
                    "message": format!("Invalid JSON: {}", rejection.body_text()),
                });
                (rejection.status(), Json(payload))
            })?;

        value.validate().map_err(|errors| {
            let payload = json!({
                "status": "fail",
                "message": summary(&errors),
                "details": details(&errors),
            });
            (StatusCode::BAD_REQUEST, Json(payload))
        })?;

        Ok(Self(value))
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            _ => format!("Invalid {field}"),
        },
    }
}

fn summary(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(move |e| format!("{field}: {}", describe(&field, e)))
        })
        .collect();

    if messages.is_empty() {
        return "Validation failed".to_string();
    }

    messages.sort();
    messages.join("; ")
}

fn details(errors: &ValidationErrors) -> Value {
    let map: Map<String, Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages: Vec<String> = field_errors.iter().map(|e| describe(&field, e)).collect();
            (field.to_string(), json!(messages))
        })
        .collect();

    Value::Object(map)
}
