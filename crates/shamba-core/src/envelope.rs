//! Response envelope handling.
//!
//! Most backend endpoints answer with `{ success, data?, message?, error? }`.
//! [`classify`] turns a raw status and body into an [`Outcome`] right after
//! the transport returns, so nothing downstream looks at the optional
//! fields again.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{BackendError, Error, FALLBACK_MESSAGE, ProtocolError};

/// The common response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Take the `data` payload, failing if the backend omitted it.
    pub fn into_data(self) -> Result<T, Error> {
        self.data
            .ok_or_else(|| ProtocolError::new("response envelope has no data").into())
    }
}

/// A response after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The request succeeded; the full parsed body.
    Success(Value),
    /// The backend reported failure.
    Failure { status: u16, message: String },
}

impl Outcome {
    /// Convert into the client's result type.
    pub fn into_result(self) -> Result<Value, Error> {
        match self {
            Outcome::Success(body) => Ok(body),
            Outcome::Failure { status, message } => {
                Err(BackendError::new(status, message).into())
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Outcome::Failure { status: 401, .. })
    }
}

/// Classify a raw response.
///
/// A non-2xx status, or a 2xx body whose envelope says `success: false`, is
/// a failure. The failure text is the envelope's `message`, else its
/// `error`, else [`FALLBACK_MESSAGE`]. An empty or non-JSON success body is
/// returned as `null`.
pub fn classify(status: u16, body: &[u8]) -> Outcome {
    let parsed: Option<Value> = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice(body).ok()
    };

    let ok_status = (200..300).contains(&status);
    let envelope_failed = parsed
        .as_ref()
        .and_then(|v| v.get("success"))
        .and_then(Value::as_bool)
        == Some(false);

    if ok_status && !envelope_failed {
        return Outcome::Success(parsed.unwrap_or(Value::Null));
    }

    Outcome::Failure {
        status,
        message: failure_text(parsed.as_ref()),
    }
}

fn failure_text(body: Option<&Value>) -> String {
    let field = |name: &str| {
        body.and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    field("message")
        .or_else(|| field("error"))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bytes(v: Value) -> Vec<u8> {
        serde_json::to_vec(&v).unwrap()
    }

    #[test]
    fn success_returns_full_body() {
        let body = json!({"success": true, "data": {"farms": 2}});
        assert_eq!(classify(200, &bytes(body.clone())), Outcome::Success(body));
    }

    #[test]
    fn success_false_is_failure_even_with_200() {
        let outcome = classify(200, &bytes(json!({"success": false, "error": "No farm"})));
        assert_eq!(
            outcome,
            Outcome::Failure {
                status: 200,
                message: "No farm".to_string()
            }
        );
    }

    #[test]
    fn message_wins_over_error() {
        let outcome = classify(
            400,
            &bytes(json!({"success": false, "message": "Bad phone", "error": "VALIDATION"})),
        );
        assert_eq!(
            outcome.into_result().unwrap_err().message(),
            "Bad phone"
        );
    }

    #[test]
    fn error_used_when_message_missing() {
        let outcome = classify(500, &bytes(json!({"error": "Database unavailable"})));
        assert_eq!(outcome.into_result().unwrap_err().message(), "Database unavailable");
    }

    #[test]
    fn fallback_when_neither_present() {
        let outcome = classify(503, b"<html>Bad gateway</html>");
        assert_eq!(outcome.into_result().unwrap_err().message(), FALLBACK_MESSAGE);

        let outcome = classify(404, &bytes(json!({"message": "", "detail": "x"})));
        assert_eq!(outcome.into_result().unwrap_err().message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn empty_success_body_is_null() {
        assert_eq!(classify(204, b""), Outcome::Success(Value::Null));
    }

    #[test]
    fn unauthorized_detection() {
        assert!(classify(401, b"").is_unauthorized());
        assert!(!classify(403, b"").is_unauthorized());
    }

    #[test]
    fn envelope_into_data() {
        let env: Envelope<u32> = serde_json::from_value(json!({"success": true, "data": 7})).unwrap();
        assert_eq!(env.into_data().unwrap(), 7);

        let env: Envelope<u32> = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(env.into_data().is_err());
    }
}
