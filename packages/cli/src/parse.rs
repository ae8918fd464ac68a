// ABOUTME: Parsing of raw command-line values into request parts
// ABOUTME: HTTP method, JSON body, multipart form fields and token masking for display

use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CliError {
    #[error("Unsupported HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Form field must look like KEY=VALUE, got {0:?}")]
    InvalidFormField(String),

    #[error("--data and --form cannot be combined")]
    ConflictingBody,
}

pub fn parse_method(raw: &str) -> Result<Method, CliError> {
    match raw.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        "HEAD" => Ok(Method::HEAD),
        "OPTIONS" => Ok(Method::OPTIONS),
        _ => Err(CliError::InvalidMethod(raw.to_string())),
    }
}

pub fn parse_json_body(raw: Option<&str>) -> Result<Option<Value>, CliError> {
    match raw {
        None => Ok(None),
        Some(raw) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| CliError::InvalidJson(e.to_string())),
    }
}

pub fn parse_form_field(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidFormField(raw.to_string())),
    }
}

/// Show only the first few characters of a token
pub fn mask_token(token: &str) -> String {
    const VISIBLE: usize = 4;
    let count = token.chars().count();
    if count <= VISIBLE {
        return "*".repeat(count);
    }
    let prefix: String = token.chars().take(VISIBLE).collect();
    format!("{}{}", prefix, "*".repeat(count - VISIBLE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("get", Method::GET)]
    #[case("POST", Method::POST)]
    #[case("Put", Method::PUT)]
    #[case("patch", Method::PATCH)]
    #[case("DELETE", Method::DELETE)]
    fn test_parse_method(#[case] raw: &str, #[case] expected: Method) {
        assert_eq!(parse_method(raw).unwrap(), expected);
    }

    #[test]
    fn test_parse_method_rejects_unknown() {
        assert_eq!(
            parse_method("FETCH"),
            Err(CliError::InvalidMethod("FETCH".to_string()))
        );
    }

    #[test]
    fn test_parse_json_body() {
        assert_eq!(parse_json_body(None).unwrap(), None);
        assert_eq!(
            parse_json_body(Some(r#"{"name":"Kim"}"#)).unwrap(),
            Some(json!({"name": "Kim"}))
        );
        assert!(matches!(
            parse_json_body(Some("{name: Kim}")),
            Err(CliError::InvalidJson(_))
        ));
    }

    #[rstest]
    #[case("title=Basics", "title", "Basics")]
    #[case("note=a=b", "note", "a=b")]
    #[case("empty=", "empty", "")]
    fn test_parse_form_field(#[case] raw: &str, #[case] key: &str, #[case] value: &str) {
        assert_eq!(
            parse_form_field(raw).unwrap(),
            (key.to_string(), value.to_string())
        );
    }

    #[rstest]
    #[case("novalue")]
    #[case("=value")]
    fn test_parse_form_field_rejects(#[case] raw: &str) {
        assert!(parse_form_field(raw).is_err());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefgh"), "abcd****");
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token(""), "");
    }
}
