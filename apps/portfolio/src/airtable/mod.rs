//! Records API client: the single point of entry for the hosted table store.
//!
//! Both the remote record source (reads) and the contact submitter (the only
//! write) go through this module. One request per call, no retries.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::records::{Record, Table};

pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_BASE_ID: &str = "appGyrt1M9uOvi9cr";
/// Upper bound on pages followed for one table listing.
const MAX_PAGES: usize = 100;

#[derive(Debug, Error)]
pub enum RecordsApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Pagination did not terminate after {0} pages")]
    TooManyPages(usize),
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    records: Vec<RemoteRecord>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoteRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    fields: &'a Map<String, Value>,
}

/// The API reports errors either as `{"error": {"type", "message"}}` or as
/// `{"error": "NOT_FOUND"}`.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorBody {
    Detailed {
        #[serde(rename = "type")]
        kind: Option<String>,
        message: Option<String>,
    },
    Code(String),
}

impl ApiErrorBody {
    fn into_message(self) -> Option<String> {
        match self {
            ApiErrorBody::Detailed { message, kind } => message.or(kind),
            ApiErrorBody::Code(code) => Some(code),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordsApiConfig {
    pub api_url: String,
    pub base_id: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct RecordsApiClient {
    client: Client,
    api_url: String,
    base_id: String,
    api_key: String,
}

impl RecordsApiClient {
    pub fn new(config: RecordsApiConfig) -> Result<Self, RecordsApiError> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            base_id: config.base_id,
            api_key: config.api_key,
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/{}/{}", self.api_url, self.base_id, table.name())
    }

    /// Lists every row of `table`, following the `offset` cursor.
    pub async fn list_records(&self, table: Table) -> Result<Vec<Record>, RecordsApiError> {
        let url = self.table_url(table);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        for page in 0..MAX_PAGES {
            let mut request = self.client.get(&url).bearer_auth(&self.api_key);
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let response = request.send().await?;
            let body = checked_body(response).await?;
            let list: ListResponse = serde_json::from_str(&body)?;

            debug!(
                "Fetched page {} of '{}' ({} records)",
                page + 1,
                table,
                list.records.len()
            );
            records.extend(list.records.into_iter().map(|r| Record::from(r.fields)));

            match list.offset {
                Some(next) if !next.is_empty() => offset = Some(next),
                _ => return Ok(records),
            }
        }

        Err(RecordsApiError::TooManyPages(MAX_PAGES))
    }

    /// Appends one row to `table` and returns the created record.
    pub async fn create_record(
        &self,
        table: Table,
        fields: &Map<String, Value>,
    ) -> Result<RemoteRecord, RecordsApiError> {
        let response = self
            .client
            .post(self.table_url(table))
            .bearer_auth(&self.api_key)
            .json(&CreateRequest { fields })
            .send()
            .await?;

        let body = checked_body(response).await?;
        let created: RemoteRecord = serde_json::from_str(&body)?;
        debug!("Created record {} in '{}'", created.id, table);
        Ok(created)
    }
}

/// Returns the response body, or an `Api` error carrying the backend's message.
async fn checked_body(response: reqwest::Response) -> Result<String, RecordsApiError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .ok()
        .and_then(|e| e.error.into_message())
        .unwrap_or_else(|| fallback_message(status, body));

    Err(RecordsApiError::Api {
        status: status.as_u16(),
        message,
    })
}

fn fallback_message(status: StatusCode, body: String) -> String {
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RecordsApiClient {
        RecordsApiClient::new(RecordsApiConfig {
            api_url: format!("{}/v0/", server.uri()),
            base_id: "appTest".to_string(),
            api_key: "test-key".to_string(),
            timeout: Duration::from_secs(5),
        })
        .expect("failed to build client")
    }

    #[tokio::test]
    async fn test_list_records_follows_offset() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v0/appTest/skills"))
            .and(query_param("offset", "page2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{"id": "rec2", "fields": {"Name": "Go"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v0/appTest/skills"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{"id": "rec1", "createdTime": "2024-01-01T00:00:00.000Z", "fields": {"Name": "Python"}}],
                "offset": "page2"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let records = client_for(&server)
            .list_records(Table::Skills)
            .await
            .expect("list failed");

        let names: Vec<_> = records.iter().map(|r| r.text("Name", "?")).collect();
        assert_eq!(names, vec!["Python", "Go"]);
    }

    #[tokio::test]
    async fn test_list_records_uses_stem_table_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/appTest/STEM"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .expect(1)
            .mount(&server)
            .await;

        let records = client_for(&server).list_records(Table::Stem).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"type": "AUTHENTICATION_REQUIRED", "message": "Authentication required"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_records(Table::Profile)
            .await
            .unwrap_err();
        match err {
            RecordsApiError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Authentication required");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_code_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "NOT_FOUND"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_records(Table::Projects)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("NOT_FOUND"), "{err}");
    }

    #[tokio::test]
    async fn test_create_record_posts_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/appTest/contacts"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_json(json!({"fields": {"Name": "Ada", "Email": "ada@example.com"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "recNew",
                "createdTime": "2024-01-01T00:00:00.000Z",
                "fields": {"Name": "Ada", "Email": "ada@example.com"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut fields = Map::new();
        fields.insert("Name".into(), json!("Ada"));
        fields.insert("Email".into(), json!("ada@example.com"));

        let created = client_for(&server)
            .create_record(Table::Contacts, &fields)
            .await
            .expect("create failed");
        assert_eq!(created.id, "recNew");
    }
}
