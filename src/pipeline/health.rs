//! Link health checker
//!
//! One GET per link decides the verdict; there are no retries at this
//! layer. The client tolerates invalid TLS chains and follows a short
//! redirect chain, because the question is "does anything answer here",
//! not "is this site well-configured".

use crate::config::HealthConfig;
use crate::state::LinkStatus;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Outcome of a single health check
#[derive(Debug, Clone)]
pub struct HealthVerdict {
    pub status: LinkStatus,
    pub msg: String,
}

/// Checks link liveness with a single bounded-timeout request
pub struct HealthChecker {
    client: Client,
    spam_keywords: Vec<String>,
}

impl HealthChecker {
    /// Builds a checker from the health configuration
    ///
    /// The client uses a browser user agent, accepts invalid certificates,
    /// and follows up to 3 redirects.
    pub fn new(config: &HealthConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::limited(3))
            .danger_accept_invalid_certs(true)
            .gzip(true)
            .brotli(true)
            .build()?;

        let spam_keywords = config
            .spam_keywords
            .iter()
            .map(|kw| kw.to_lowercase())
            .collect();

        Ok(Self {
            client,
            spam_keywords,
        })
    }

    /// Determines whether a URL is alive, dead, or spam
    ///
    /// - 404 ⇒ DEAD
    /// - 5xx ⇒ DEAD ("HTTP <code>")
    /// - textual body containing a spam keyword ⇒ SPAM
    /// - any network failure ⇒ DEAD with the failure description
    /// - otherwise ⇒ ALIVE
    pub async fn check(&self, url: &str) -> HealthVerdict {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                return HealthVerdict {
                    status: LinkStatus::Dead,
                    msg: describe_error(&e),
                }
            }
        };

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return HealthVerdict {
                status: LinkStatus::Dead,
                msg: "404".to_string(),
            };
        }

        if status.is_server_error() {
            return HealthVerdict {
                status: LinkStatus::Dead,
                msg: format!("HTTP {}", status.as_u16()),
            };
        }

        // Only scan textual bodies for spam markers
        let is_text = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("text"))
            .unwrap_or(false);

        if is_text {
            if let Ok(body) = response.text().await {
                let body = body.to_lowercase();
                if self.spam_keywords.iter().any(|kw| body.contains(kw)) {
                    return HealthVerdict {
                        status: LinkStatus::Spam,
                        msg: "Spam".to_string(),
                    };
                }
            }
        }

        HealthVerdict {
            status: LinkStatus::Alive,
            msg: "OK".to_string(),
        }
    }
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection failed".to_string()
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HealthConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn checker() -> HealthChecker {
        HealthChecker::new(&HealthConfig::default()).expect("build checker")
    }

    #[tokio::test]
    async fn ok_page_is_alive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>welcome</html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&server)
            .await;

        let verdict = checker().check(&server.uri()).await;
        assert_eq!(verdict.status, LinkStatus::Alive);
        assert_eq!(verdict.msg, "OK");
    }

    #[tokio::test]
    async fn not_found_is_dead() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let verdict = checker().check(&server.uri()).await;
        assert_eq!(verdict.status, LinkStatus::Dead);
        assert_eq!(verdict.msg, "404");
    }

    #[tokio::test]
    async fn server_error_is_dead() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let verdict = checker().check(&server.uri()).await;
        assert_eq!(verdict.status, LinkStatus::Dead);
        assert_eq!(verdict.msg, "HTTP 503");
    }

    #[tokio::test]
    async fn spam_keyword_is_spam() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>This Domain For Sale!</html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&server)
            .await;

        let verdict = checker().check(&server.uri()).await;
        assert_eq!(verdict.status, LinkStatus::Spam);
    }

    #[tokio::test]
    async fn spam_keywords_ignore_binary_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("domain for sale", "application/octet-stream"),
            )
            .mount(&server)
            .await;

        let verdict = checker().check(&server.uri()).await;
        assert_eq!(verdict.status, LinkStatus::Alive);
    }

    #[tokio::test]
    async fn client_error_other_than_404_is_alive() {
        // Anything below 500 that is not a 404 counts as reachable.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let verdict = checker().check(&server.uri()).await;
        assert_eq!(verdict.status, LinkStatus::Alive);
    }

    #[tokio::test]
    async fn connection_failure_is_dead() {
        // Nothing listens on this port.
        let verdict = checker().check("http://127.0.0.1:1/").await;
        assert_eq!(verdict.status, LinkStatus::Dead);
        assert!(!verdict.msg.is_empty());
    }
}
