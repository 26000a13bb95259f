//! HTTP client for the spreadsheet endpoint.

use async_trait::async_trait;
use serde_json::Value;

use crate::attendee::Attendee;
use crate::constants::REMOTE_TIMEOUT;
use crate::error::{RsvpError, RsvpResult};
use crate::remote::row::normalize_rows;
use crate::roster::Roster;

/// Where the shared guest list lives.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Current roster, normalized and newest first.
    async fn fetch(&self) -> RsvpResult<Roster>;

    /// Send one new attendee. Delivery is best effort: only transport
    /// failures are reported.
    async fn save(&self, attendee: &Attendee) -> RsvpResult<()>;
}

/// A Google Apps Script web app (or anything speaking the same contract):
/// `GET` returns a JSON array of row objects, `POST` appends one row.
pub struct HttpRemoteStore {
    http: reqwest::Client,
    url: String,
}

impl HttpRemoteStore {
    pub fn new(url: impl Into<String>) -> RsvpResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("tour-rsvp/{}", env!("CARGO_PKG_VERSION")))
            .timeout(REMOTE_TIMEOUT)
            .build()?;

        Ok(HttpRemoteStore {
            http,
            url: url.into().trim().to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn fetch(&self) -> RsvpResult<Roster> {
        let resp = self
            .http
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(RsvpError::Remote(format!(
                "Failed to fetch from spreadsheet (HTTP {})",
                resp.status()
            )));
        }

        let body = resp.bytes().await?;
        let rows = match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Array(rows)) => rows,
            Ok(_) => {
                return Err(RsvpError::Remote(
                    "Spreadsheet endpoint did not return a list of rows".into(),
                ));
            }
            Err(e) => {
                return Err(RsvpError::Remote(format!(
                    "Spreadsheet endpoint returned invalid JSON: {e}"
                )));
            }
        };

        Ok(normalize_rows(rows))
    }

    async fn save(&self, attendee: &Attendee) -> RsvpResult<()> {
        let body = serde_json::to_string(attendee)?;

        // Apps Script answers with a redirect to an opaque page; the
        // response says nothing useful about whether the row landed.
        self.http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::make_attendee;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_normalizes_rows() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET).path("/exec");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([
                    { "id": "a", "name": "Ada", "guests": 2, "timestamp": 10 },
                    { "id": "b", "name": "Bea", "guests": 500, "timestamp": 20 },
                    { "id": "", "name": "Nobody", "guests": 1, "timestamp": 30 }
                ]));
        });

        let store = HttpRemoteStore::new(server.url("/exec")).unwrap();
        let roster = store.fetch().await.unwrap();

        mock.assert();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.attendees()[0].id, "b");
        assert_eq!(roster.attendees()[0].guests, 1);
        assert_eq!(roster.total_guests(), 3);
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET).path("/exec");
            then.status(500).body("Internal Server Error");
        });

        let store = HttpRemoteStore::new(server.url("/exec")).unwrap();
        let err = store.fetch().await.unwrap_err();

        mock.assert();
        assert!(matches!(err, RsvpError::Remote(_)));
        assert!(err.to_string().contains("500"), "got: {err}");
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_array() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/exec");
            then.status(200).json_body(json!({ "error": "sheet missing" }));
        });

        let store = HttpRemoteStore::new(server.url("/exec")).unwrap();
        assert!(matches!(store.fetch().await, Err(RsvpError::Remote(_))));
    }

    #[tokio::test]
    async fn test_save_posts_json_as_plain_text() {
        let server = MockServer::start();
        let attendee = make_attendee("abc123def", "Ada", 2, 1_767_225_600_000);

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/exec")
                .header("content-type", "text/plain")
                .body(serde_json::to_string(&attendee).unwrap());
            then.status(302).body("Moved");
        });

        let store = HttpRemoteStore::new(server.url("/exec")).unwrap();
        store.save(&attendee).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_save_reports_transport_failure() {
        // Nothing listens on port 9 locally.
        let store = HttpRemoteStore::new("http://127.0.0.1:9/exec").unwrap();
        let attendee = make_attendee("a", "Ada", 1, 1);

        assert!(matches!(store.save(&attendee).await, Err(RsvpError::Remote(_))));
    }
}
