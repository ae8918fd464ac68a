// ABOUTME: Reads the anti-forgery token from the cookies the server set for the API origin
// ABOUTME: Exact-name matching over a `name=value; name=value` cookie string, URI-decoded

use std::sync::Arc;

use reqwest::cookie::CookieStore;
use tracing::debug;
use url::Url;

use crate::token::Token;

/// Extract the value of the cookie named exactly `name` from a cookie header string.
///
/// Whitespace around `;` and `=` is ignored, entries without `=` are skipped,
/// and the value is percent-decoded. An empty value counts as absent.
pub fn token_from_cookie_header(header: &str, name: &str) -> Option<Token> {
    let raw = header
        .split(';')
        .filter_map(|entry| entry.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())?;

    if raw.is_empty() {
        return None;
    }

    let decoded = match urlencoding::decode(raw) {
        Ok(value) => value.into_owned(),
        // Percent sequences that are not UTF-8 stay as sent
        Err(_) => raw.to_string(),
    };

    Some(Token::new(decoded))
}

/// Reads the token cookie that the cookie jar holds for the API origin
#[derive(Clone)]
pub struct CookieReader {
    source: Option<Arc<dyn CookieStore>>,
    origin: Url,
    cookie_name: String,
}

impl CookieReader {
    pub fn new(source: Arc<dyn CookieStore>, origin: Url, cookie_name: impl Into<String>) -> Self {
        Self {
            source: Some(source),
            origin,
            cookie_name: cookie_name.into(),
        }
    }

    /// Reader with no cookie jar behind it; always reads `None`
    pub fn detached(origin: Url, cookie_name: impl Into<String>) -> Self {
        Self {
            source: None,
            origin,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn read_from_cookies(&self) -> Option<Token> {
        let source = self.source.as_ref()?;
        let header = source.cookies(&self.origin)?;

        let header = match header.to_str() {
            Ok(header) => header,
            Err(_) => {
                debug!("Cookie header is not visible ASCII, ignoring");
                return None;
            }
        };

        token_from_cookie_header(header, &self.cookie_name)
    }
}

impl std::fmt::Debug for CookieReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieReader")
            .field("attached", &self.source.is_some())
            .field("origin", &self.origin.as_str())
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const NAME: &str = "XSRF-TOKEN";

    #[rstest]
    #[case("XSRF-TOKEN=abc", "abc")]
    #[case("session=1; XSRF-TOKEN=abc", "abc")]
    #[case("XSRF-TOKEN=abc; session=1", "abc")]
    #[case("  a=1 ;  XSRF-TOKEN = abc ; b=2", "abc")]
    #[case("XSRF-TOKEN=abc%3D%3D", "abc==")]
    #[case("XSRF-TOKEN=a%2Fb%2Bc", "a/b+c")]
    #[case("flag; XSRF-TOKEN=abc", "abc")]
    #[case("XSRF-TOKEN-OLD=old; XSRF-TOKEN=new", "new")]
    #[case("XSRF-TOKEN=first; XSRF-TOKEN=second", "first")]
    fn test_extracts_exact_name(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(
            token_from_cookie_header(header, NAME),
            Some(Token::new(expected))
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("session=1; theme=dark")]
    #[case("XSRF-TOKEN-OLD=old")]
    #[case("OLD-XSRF-TOKEN=old")]
    #[case("xsrf-token=lowercase")]
    #[case("XSRF-TOKEN=")]
    #[case("XSRF-TOKEN")]
    fn test_absent_cases(#[case] header: &str) {
        assert_eq!(token_from_cookie_header(header, NAME), None);
    }

    #[test]
    fn test_value_containing_equals_is_kept_whole() {
        assert_eq!(
            token_from_cookie_header("XSRF-TOKEN=a=b=c", NAME),
            Some(Token::new("a=b=c"))
        );
    }

    #[test]
    fn test_non_utf8_percent_sequence_falls_back_to_raw() {
        assert_eq!(
            token_from_cookie_header("XSRF-TOKEN=%FF%FE", NAME),
            Some(Token::new("%FF%FE"))
        );
    }

    #[test]
    fn test_detached_reader_reads_nothing() {
        let reader = CookieReader::detached(Url::parse("http://localhost/").unwrap(), NAME);
        assert!(reader.read_from_cookies().is_none());
    }
}
