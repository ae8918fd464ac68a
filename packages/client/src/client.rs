// ABOUTME: Request interceptor wrapping every call to the console backend
// ABOUTME: Attaches the stored anti-forgery token, sends cookies, resynchronizes the token afterwards

use std::future::Future;
use std::sync::Arc;

use academy_auth::{CookieReader, FileTokenStore, Token, TokenStore};
use academy_config::ClientSettings;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::envelope::{failure_message, parse_success_body};
use crate::error::{ApiError, ApiResult};
use crate::request::{RequestBody, RequestOptions};

/// Where a resynchronized token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    ResponseHeader,
    Cookie,
}

/// Client for the console REST API.
///
/// Cloning is cheap; clones share the connection pool, the cookie jar and the
/// token store. Concurrent calls race on token updates and the last write wins.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    header_name: HeaderName,
    store: Arc<dyn TokenStore>,
    jar: Arc<Jar>,
    cookies: CookieReader,
}

impl ApiClient {
    /// Create a client with a fresh cookie jar
    pub fn new(settings: &ClientSettings, store: Arc<dyn TokenStore>) -> ApiResult<Self> {
        Self::with_cookie_jar(settings, store, Arc::new(Jar::default()))
    }

    /// Create a client from settings, persisting the token in the configured token file
    pub fn from_settings(settings: &ClientSettings) -> ApiResult<Self> {
        Self::new(settings, Arc::new(FileTokenStore::from_settings(settings)))
    }

    /// Create a client around an existing cookie jar
    pub fn with_cookie_jar(
        settings: &ClientSettings,
        store: Arc<dyn TokenStore>,
        jar: Arc<Jar>,
    ) -> ApiResult<Self> {
        let header_name = HeaderName::from_bytes(settings.csrf_header_name.as_bytes())
            .map_err(|e| ApiError::config(format!("Invalid anti-forgery header name: {}", e)))?;

        let mut builder = reqwest::Client::builder().cookie_provider(jar.clone());
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::config(format!("Failed to build HTTP client: {}", e)))?;

        let cookies = CookieReader::new(
            jar.clone(),
            settings.api_base_url.clone(),
            settings.csrf_cookie_name.clone(),
        );

        Ok(Self {
            http,
            base_url: settings.api_base_url.clone(),
            header_name,
            store,
            jar,
            cookies,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Currently stored anti-forgery token
    pub fn current_token(&self) -> Option<Token> {
        self.store.get()
    }

    /// Perform one API call.
    ///
    /// Exactly one network attempt is made. Once a response arrives the
    /// stored token is resynchronized, whatever the status, before the body
    /// is interpreted. Every failure comes back as an `Err`.
    pub async fn call(&self, endpoint: &str, options: RequestOptions) -> ApiResult<Value> {
        let url = self.endpoint_url(endpoint)?;
        let method = options.method.clone();
        let request = self.prepare(url, options);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(%method, endpoint, error = %e, "Request failed before a response arrived");
                self.sync_token(None);
                return Err(ApiError::from(e));
            }
        };

        self.complete(endpoint, response).await
    }

    /// Like [`ApiClient::call`], but gives up when `cancel` completes first.
    ///
    /// A cancelled call returns [`ApiError::Cancelled`]; if no response had
    /// arrived yet the token is left untouched.
    pub async fn call_until<F>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        cancel: F,
    ) -> ApiResult<Value>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.call(endpoint, options) => result,
            _ = cancel => {
                debug!(endpoint, "Request cancelled by caller");
                Err(ApiError::Cancelled)
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.call_as(endpoint, RequestOptions::get()).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call_as(endpoint, RequestOptions::post().json(encode(body)?))
            .await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call_as(endpoint, RequestOptions::put().json(encode(body)?))
            .await
    }

    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call_as(endpoint, RequestOptions::patch().json(encode(body)?))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.call_as(endpoint, RequestOptions::delete()).await
    }

    /// Log in with JSON credentials.
    ///
    /// The server answers by setting the session cookie and the anti-forgery
    /// cookie; the call's resynchronization step persists the token.
    pub async fn login<B>(&self, endpoint: &str, credentials: &B) -> ApiResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let payload = self
            .call(endpoint, RequestOptions::post().json(encode(credentials)?))
            .await?;

        if self.store.get().is_some() {
            info!(endpoint, "Logged in, anti-forgery token stored");
        } else {
            warn!(endpoint, "Logged in but the server did not issue an anti-forgery token");
        }
        Ok(payload)
    }

    /// Clear the stored token, after calling `endpoint` when one is given.
    ///
    /// The token is removed even when the logout call fails.
    pub async fn logout(&self, endpoint: Option<&str>) -> ApiResult<()> {
        let result = match endpoint {
            Some(endpoint) => self.call(endpoint, RequestOptions::post()).await.map(|_| ()),
            None => Ok(()),
        };

        self.store.remove();
        debug!("Anti-forgery token removed");
        result
    }

    /// Copy the token cookie into the store if it differs from the stored value
    pub fn sync_from_cookies(&self) -> Option<Token> {
        let current = self.store.get();
        match self.cookies.read_from_cookies() {
            Some(token) if current.as_ref() != Some(&token) => {
                self.store.set(&token);
                debug!(source = "cookie", "Stored anti-forgery token");
                Some(token)
            }
            _ => current,
        }
    }

    /// Resynchronize the stored token after a request.
    ///
    /// A response header carrying a new token takes precedence. When the
    /// header is absent or repeats the stored token, the cookie jar decides.
    fn sync_token(&self, headers: Option<&HeaderMap>) -> Option<TokenSource> {
        let current = self.store.get();

        let rotated = headers
            .and_then(|headers| headers.get(&self.header_name))
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(Token::from)
            .filter(|token| current.as_ref() != Some(token));

        if let Some(token) = rotated {
            self.store.set(&token);
            debug!(source = "header", "Stored rotated anti-forgery token");
            return Some(TokenSource::ResponseHeader);
        }

        match self.cookies.read_from_cookies() {
            Some(token) if current.as_ref() != Some(&token) => {
                self.store.set(&token);
                debug!(source = "cookie", "Stored rotated anti-forgery token");
                Some(TokenSource::Cookie)
            }
            _ => None,
        }
    }

    async fn complete(&self, endpoint: &str, response: Response) -> ApiResult<Value> {
        let status = response.status();
        self.sync_token(Some(response.headers()));

        if !status.is_success() {
            // An unreadable error body falls back to the status code
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(endpoint, status = status.as_u16(), error = %e, "Failed to read error body");
                    Default::default()
                }
            };
            let message = failure_message(status, &body);
            debug!(endpoint, status = status.as_u16(), %message, "API call failed");
            return Err(ApiError::http(status.as_u16(), message));
        }

        let body = response.bytes().await.map_err(ApiError::from)?;
        debug!(endpoint, status = status.as_u16(), "API call succeeded");
        parse_success_body(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn prepare(&self, url: Url, options: RequestOptions) -> reqwest::RequestBuilder {
        let RequestOptions {
            method,
            mut headers,
            body,
        } = options;

        if let Some(token) = self.store.get() {
            match HeaderValue::from_str(token.as_str()) {
                Ok(value) => {
                    headers.insert(self.header_name.clone(), value);
                }
                Err(_) => warn!("Stored anti-forgery token is not a valid header value, omitting it"),
            }
        }

        if matches!(body, RequestBody::Multipart(_)) && headers.remove(CONTENT_TYPE).is_some() {
            debug!("Replacing caller content type with the multipart boundary type");
        }

        let builder = self.http.request(method, url).headers(headers);
        match body {
            RequestBody::Empty => builder,
            // Keeps a caller-supplied content type
            RequestBody::Json(value) => builder.json(&value),
            // The form sets its own boundary content type
            RequestBody::Multipart(form) => builder.multipart(form),
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> ApiResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        Url::parse(&format!("{}/{}", base, path))
            .map_err(|e| ApiError::InvalidEndpoint(format!("{}: {}", endpoint, e)))
    }

    async fn call_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let payload = self.call(endpoint, options).await?;
        serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}
