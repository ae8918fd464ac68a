// ABOUTME: CLI command sending a single request through the API client
// ABOUTME: Optional login in the same session, JSON or multipart body, payload printed as JSON

use std::process;

use academy_cli::{parse_form_field, parse_json_body, parse_method, CliError};
use academy_client::{ApiClient, RequestOptions};
use academy_config::ClientSettings;
use clap::Args;
use colored::*;
use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::json;

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: String,

    /// Endpoint path relative to ACADEMY_API_BASE_URL, e.g. /api/trainers
    pub endpoint: String,

    /// JSON request body
    #[arg(long)]
    pub data: Option<String>,

    /// Multipart form field, repeatable
    #[arg(long = "form", value_name = "KEY=VALUE")]
    pub form: Vec<String>,

    /// Log in with this username before sending the request
    #[arg(long)]
    pub username: Option<String>,

    /// Password for --username (prompted when omitted)
    #[arg(long, requires = "username")]
    pub password: Option<String>,

    /// Endpoint used for --username login
    #[arg(long, default_value = "/api/auth/login")]
    pub login_endpoint: String,
}

impl RequestArgs {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let method = parse_method(&self.method)?;
        let options = self.build_options(method)?;

        let settings = ClientSettings::from_env()?;
        let client = ApiClient::from_settings(&settings)?;

        if let Some(username) = &self.username {
            let password = match &self.password {
                Some(password) => password.clone(),
                None => inquire::Password::new("Password:")
                    .without_confirmation()
                    .prompt()?,
            };

            let credentials = json!({ "username": username, "password": password });
            if let Err(e) = client.login(&self.login_endpoint, &credentials).await {
                eprintln!("{} Login failed: {}", "✗".red().bold(), e);
                process::exit(1);
            }
            eprintln!("{} Logged in as {}", "✓".green().bold(), username.bold());
        }

        match client.call(&self.endpoint, options).await {
            Ok(payload) => {
                println!("{}", serde_json::to_string_pretty(&payload)?);
                Ok(())
            }
            Err(e) => {
                match e.status() {
                    Some(status) => eprintln!("{} [{}] {}", "✗".red().bold(), status, e),
                    None => eprintln!("{} {}", "✗".red().bold(), e),
                }
                process::exit(1);
            }
        }
    }

    fn build_options(&self, method: Method) -> Result<RequestOptions, CliError> {
        let body = parse_json_body(self.data.as_deref())?;
        if body.is_some() && !self.form.is_empty() {
            return Err(CliError::ConflictingBody);
        }

        let options = RequestOptions::new(method);
        if let Some(body) = body {
            return Ok(options.json(body));
        }
        if self.form.is_empty() {
            return Ok(options);
        }

        let mut form = Form::new();
        for field in &self.form {
            let (key, value) = parse_form_field(field)?;
            form = form.text(key, value);
        }
        Ok(options.multipart(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_client::RequestBody;

    fn args(data: Option<&str>, form: &[&str]) -> RequestArgs {
        RequestArgs {
            method: "POST".to_string(),
            endpoint: "/api/lectures".to_string(),
            data: data.map(str::to_string),
            form: form.iter().map(|f| f.to_string()).collect(),
            username: None,
            password: None,
            login_endpoint: "/api/auth/login".to_string(),
        }
    }

    #[test]
    fn test_build_options_json() {
        let options = args(Some(r#"{"title":"Intro"}"#), &[])
            .build_options(Method::POST)
            .unwrap();
        assert_eq!(options.method, Method::POST);
        assert!(matches!(options.body, RequestBody::Json(_)));
    }

    #[test]
    fn test_build_options_multipart() {
        let options = args(None, &["title=Intro", "level=2"])
            .build_options(Method::POST)
            .unwrap();
        assert!(matches!(options.body, RequestBody::Multipart(_)));
    }

    #[test]
    fn test_build_options_empty() {
        let options = args(None, &[]).build_options(Method::GET).unwrap();
        assert!(matches!(options.body, RequestBody::Empty));
    }

    #[test]
    fn test_build_options_rejects_both_bodies() {
        let result = args(Some("{}"), &["a=b"]).build_options(Method::POST);
        assert!(matches!(result, Err(CliError::ConflictingBody)));
    }
}
