use async_trait::async_trait;

use crate::airtable::RecordsApiClient;
use crate::records::{Record, Table};
use crate::sources::{RecordSource, SourceError};

/// Reads tables from the hosted records API. Rows with no non-empty field are
/// dropped, as for CSV tables. Without a credential every fetch fails softly
/// with `SourceError::MissingCredential`.
pub struct RemoteTable {
    client: Option<RecordsApiClient>,
}

impl RemoteTable {
    pub fn new(client: Option<RecordsApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordSource for RemoteTable {
    fn kind(&self) -> &'static str {
        "remote"
    }

    async fn fetch(&self, table: Table) -> Result<Vec<Record>, SourceError> {
        let client = self.client.as_ref().ok_or(SourceError::MissingCredential)?;
        let mut records = client.list_records(table).await?;
        records.retain(|record| !record.is_blank());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airtable::RecordsApiConfig;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_drops_blank_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/appTest/skills"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    {"id": "rec1", "fields": {"Name": "Rust"}},
                    {"id": "rec2", "fields": {}},
                    {"id": "rec3", "fields": {"Name": " ", "Tags": []}},
                    {"id": "rec4", "fields": {"Name": "Go"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RecordsApiClient::new(RecordsApiConfig {
            api_url: server.uri(),
            base_id: "appTest".into(),
            api_key: "key".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let records = RemoteTable::new(Some(client))
            .fetch(Table::Skills)
            .await
            .unwrap();
        let names: Vec<_> = records.iter().map(|r| r.text("Name", "?")).collect();
        assert_eq!(names, vec!["Rust", "Go"]);
    }

    #[tokio::test]
    async fn test_fetch_without_credential() {
        let source = RemoteTable::new(None);
        let err = source.fetch(Table::Profile).await.unwrap_err();
        assert!(matches!(err, SourceError::MissingCredential));
    }
}
