//! Contact form: the site's only write path.
//!
//! The page composer validates the form first; only a valid message reaches
//! `ContactSubmitter`, which makes exactly one write attempt and reports a
//! plain success flag. Failures are logged here and never propagate.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::airtable::RecordsApiClient;
use crate::records::Table;

pub const VALIDATION_WARNING: &str = "Please fill in at least your name, email and message.";

/// Raw form input as posted by the visitor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

/// A validated message, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub notes: String,
}

impl ContactForm {
    /// Name, email and notes are required; phone is optional. Returns the
    /// names of the missing fields on failure.
    pub fn validate(&self) -> Result<ContactMessage, Vec<&'static str>> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("notes", &self.notes),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone.trim().to_string(),
            notes: self.notes.trim().to_string(),
        })
    }
}

impl ContactMessage {
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("Name".into(), Value::String(self.name.clone()));
        fields.insert("Email".into(), Value::String(self.email.clone()));
        fields.insert(
            "PhoneNumber".into(),
            Value::String(self.phone_number.clone()),
        );
        fields.insert("Notes".into(), Value::String(self.notes.clone()));
        fields
    }
}

/// Writes contact messages to the `contacts` table. Disabled when no
/// credential is configured.
#[derive(Clone)]
pub struct ContactSubmitter {
    client: Option<RecordsApiClient>,
}

impl ContactSubmitter {
    pub fn new(client: Option<RecordsApiClient>) -> Self {
        Self { client }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub async fn submit(&self, message: &ContactMessage) -> bool {
        let Some(client) = &self.client else {
            error!("Cannot send contact message: records API key is not configured");
            return false;
        };

        match client
            .create_record(Table::Contacts, &message.to_fields())
            .await
        {
            Ok(created) => {
                info!("Contact message stored as {}", created.id);
                true
            }
            Err(e) => {
                error!("Error sending contact message: {e}");
                false
            }
        }
    }
}
