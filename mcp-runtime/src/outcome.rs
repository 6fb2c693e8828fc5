//! Tool call outcomes and HTTP response interpretation.

use reqwest::{Response, StatusCode};
use serde_json::{Value, json};

use crate::args::ArgError;

/// The result of running a tool: response text plus an error flag. This maps
/// directly onto the MCP tool-result envelope, so transport errors and API
/// rejections surface to the model as readable text rather than protocol
/// failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutcome {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "content": [
                {
                    "type": "text",
                    "text": self.text,
                }
            ],
            "isError": self.is_error,
        })
    }
}

impl From<ArgError> for ToolOutcome {
    fn from(err: ArgError) -> Self {
        Self::error(err.to_string())
    }
}

/// Interprets an API response against the single status code the endpoint
/// documents for success. The body is read either way: on success it becomes
/// the tool output verbatim, on mismatch it is attached to the error so the
/// upstream rejection reason is not lost.
pub async fn expect_status(
    result: aegis_client::Result<Response>,
    expected: StatusCode,
    context: &str,
) -> ToolOutcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => return ToolOutcome::error(err.to_string()),
    };

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => return ToolOutcome::error(format!("{context}: failed to read body: {err}")),
    };

    if status != expected {
        return ToolOutcome::error(format!("{context}: {body}"));
    }
    ToolOutcome::text(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_envelope_has_text_content_and_error_flag() {
        let outcome = ToolOutcome::error("boom");
        let value = outcome.to_value();
        assert_eq!(value["isError"], json!(true));
        assert_eq!(value["content"][0]["type"], json!("text"));
        assert_eq!(value["content"][0]["text"], json!("boom"));
    }

    #[test]
    fn arg_error_converts_to_error_outcome() {
        let outcome = ToolOutcome::from(ArgError::MissingParameter("accountId".to_string()));
        assert!(outcome.is_error);
        assert_eq!(outcome.text, "missing required parameter: accountId");
    }
}
