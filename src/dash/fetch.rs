// Retrieval of the criteria file from the WebDAV server.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::dash::*;

pub const USER_ENV: &str = "EXPOSCORE_USER";
pub const PASSWORD_ENV: &str = "EXPOSCORE_PASSWORD";

/// Why the remote file could not be retrieved. Failures are reported, never retried.
#[derive(Debug, Snafu, Clone, Eq, PartialEq)]
pub enum FetchFailure {
    #[snafu(display("no answer after {seconds} seconds"))]
    Timeout { seconds: u64 },
    #[snafu(display("the server answered with HTTP status {code}"))]
    HttpError { code: u16 },
    #[snafu(display("network error: {message}"))]
    NetworkError { message: String },
}

/// A source of raw bytes.
pub trait Fetcher {
    /// Identifies the inputs of the fetch (credentials and location).
    /// Two fetchers with the same key return the same content.
    fn key(&self) -> String;

    /// A description of the location, suitable for logs.
    fn location(&self) -> String;

    fn fetch(&self) -> Result<Vec<u8>, FetchFailure>;
}

#[derive(Eq, PartialEq, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Both values must be present and not blank.
    pub fn from_values(user: Option<String>, password: Option<String>) -> DashResult<Credentials> {
        match (user, password) {
            (Some(user), Some(password)) if !user.trim().is_empty() && !password.is_empty() => {
                Ok(Credentials {
                    user: user.trim().to_string(),
                    password,
                })
            }
            _ => CredentialsMissingSnafu {}.fail(),
        }
    }
}

// The password stays out of the logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Encodes a user name as a single path segment.
fn encode_segment(user: &str) -> String {
    // The form encoding writes spaces as `+` and escapes a literal `+`.
    url::form_urlencoded::byte_serialize(user.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Fills the `{user}` placeholder of a URL template with the encoded user name
/// and checks the result.
pub fn resolve_url(template: &str, user: &str) -> DashResult<url::Url> {
    let s = template.replace("{user}", &encode_segment(user));
    url::Url::parse(&s).context(InvalidUrlSnafu { url: s.clone() })
}

/// Downloads a file with HTTP basic authentication.
#[derive(Debug)]
pub struct WebDavFetcher {
    client: Client,
    url: url::Url,
    credentials: Credentials,
    timeout: Duration,
}

impl WebDavFetcher {
    pub fn new(
        url_template: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> DashResult<WebDavFetcher> {
        let url = resolve_url(url_template, &credentials.user)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context(HttpClientSnafu {})?;
        Ok(WebDavFetcher {
            client,
            url,
            credentials,
            timeout,
        })
    }

    fn classify(&self, e: reqwest::Error) -> FetchFailure {
        if e.is_timeout() {
            FetchFailure::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if let Some(status) = e.status() {
            FetchFailure::HttpError {
                code: status.as_u16(),
            }
        } else {
            FetchFailure::NetworkError {
                message: e.to_string(),
            }
        }
    }
}

impl Fetcher for WebDavFetcher {
    // Only a digest of the password enters the key.
    fn key(&self) -> String {
        format!(
            "{}\u{0}{}\u{0}{}",
            self.credentials.user,
            sha256::digest(self.credentials.password.as_str()),
            self.url
        )
    }

    fn location(&self) -> String {
        self.url.to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>, FetchFailure> {
        info!("fetch: requesting {}", self.url);
        let resp = self
            .client
            .get(self.url.clone())
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
            .send()
            .map_err(|e| self.classify(e))?;
        let status = resp.status();
        if !status.is_success() {
            warn!("fetch: {} answered {}", self.url, status);
            return Err(FetchFailure::HttpError {
                code: status.as_u16(),
            });
        }
        let bytes = resp.bytes().map_err(|e| self.classify(e))?;
        info!("fetch: received {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_must_be_complete() {
        assert!(matches!(
            Credentials::from_values(Some("alice".to_string()), None),
            Err(DashError::CredentialsMissing {})
        ));
        assert!(Credentials::from_values(None, Some("pw".to_string())).is_err());
        assert!(Credentials::from_values(Some("  ".to_string()), Some("pw".to_string())).is_err());
        let c = Credentials::from_values(Some(" alice ".to_string()), Some("pw".to_string()))
            .unwrap();
        assert_eq!(c.user, "alice");
    }

    #[test]
    fn password_is_not_printed() {
        let c = Credentials {
            user: "alice".to_string(),
            password: "secret".to_string(),
        };
        assert!(!format!("{:?}", c).contains("secret"));
    }

    #[test]
    fn key_hides_the_password() {
        let fetcher = |password: &str| {
            WebDavFetcher::new(
                "https://cloud.example.org/files/{user}/c.xlsx",
                Credentials {
                    user: "alice".to_string(),
                    password: password.to_string(),
                },
                Duration::from_secs(10),
            )
            .unwrap()
        };
        let k = fetcher("secret").key();
        assert!(!k.contains("secret"));
        assert_eq!(k, fetcher("secret").key());
        assert_ne!(k, fetcher("other").key());
    }

    #[test]
    fn user_placeholder() {
        let u = resolve_url(
            "https://cloud.example.org/remote.php/dav/files/{user}/Conseil/criteres.xlsx",
            "alice",
        )
        .unwrap();
        assert_eq!(u.path(), "/remote.php/dav/files/alice/Conseil/criteres.xlsx");
    }

    #[test]
    fn user_is_a_single_segment() {
        let u = resolve_url("https://cloud.example.org/files/{user}/c.xlsx", "jean?dupont").unwrap();
        assert_eq!(u.path(), "/files/jean%3Fdupont/c.xlsx");
        assert_eq!(u.query(), None);
        assert_eq!(u.path_segments().map(|s| s.count()), Some(3));

        let u = resolve_url("https://cloud.example.org/files/{user}/c.xlsx", "a/b#c d+e").unwrap();
        assert_eq!(u.path(), "/files/a%2Fb%23c%20d%2Be/c.xlsx");
        assert_eq!(u.fragment(), None);

        let u = resolve_url("https://cloud.example.org/files/{user}/c.xlsx", "zoé").unwrap();
        assert_eq!(u.path(), "/files/zo%C3%A9/c.xlsx");
    }

    #[test]
    fn spaces_are_encoded() {
        let u = resolve_url("https://cloud.example.org/files/{user}/03 - Activités/c.xlsx", "bob")
            .unwrap();
        assert!(u.as_str().contains("03%20-%20Activit%C3%A9s"));
    }

    #[test]
    fn invalid_url() {
        assert!(matches!(
            resolve_url("not a url {user}", "bob"),
            Err(DashError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn failure_messages() {
        assert_eq!(
            FetchFailure::HttpError { code: 404 }.to_string(),
            "the server answered with HTTP status 404"
        );
    }
}
