//! Field normalizer: typed, defaulted values out of a raw `Record`.
//!
//! Every accessor is total. A missing key, `null`, `false`, a blank string or
//! an empty array all count as "no value" and yield the caller's default, so
//! nothing undefined ever reaches the renderers.

use serde_json::Value;

use super::Record;

/// Delimiter for skill / knowledge chip lists in local tables.
pub const LIST_DELIMITER: char = ',';
/// Delimiter for education knowledge paragraphs.
pub const PARAGRAPH_DELIMITER: char = '#';

/// Where an image field points, before any file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Absolute URL, typically from a remote attachment.
    Url(String),
    /// Bare file name relative to the images directory.
    File(String),
    Missing,
}

pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.iter().all(is_empty_value),
        Value::Object(map) => map.is_empty(),
        Value::Bool(true) | Value::Number(_) => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
    .filter(|s| !s.is_empty())
}

/// Splits a delimiter-joined string, trimming every fragment and dropping
/// empty ones. Order is preserved.
pub fn split_list(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn is_url(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl Record {
    pub fn optional_text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .filter_map(scalar_text)
                    .collect::<Vec<_>>()
                    .join(", ");
                (!joined.is_empty()).then_some(joined)
            }
            other => scalar_text(other),
        }
    }

    pub fn text(&self, key: &str, default: &str) -> String {
        self.optional_text(key).unwrap_or_else(|| default.to_string())
    }

    /// List-valued field. Strings are split on `delimiter`; arrays (remote
    /// multi-select) are taken element by element.
    pub fn list(&self, key: &str, delimiter: char) -> Vec<String> {
        match self.get(key) {
            Some(Value::String(raw)) => split_list(raw, delimiter),
            Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
            Some(other) => scalar_text(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Image-style field: a bare file name (local tables may append a
    /// description after the name, which is dropped) or a list of attachment
    /// objects each exposing a `url`.
    pub fn image(&self, key: &str) -> ImageSource {
        match self.get(key) {
            Some(Value::String(raw)) => image_from_str(raw),
            Some(Value::Array(items)) => items
                .iter()
                .find_map(|item| match item {
                    Value::Object(obj) => obj
                        .get("url")
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|u| !u.is_empty())
                        .map(|u| ImageSource::Url(u.to_string())),
                    Value::String(raw) => match image_from_str(raw) {
                        ImageSource::Missing => None,
                        source => Some(source),
                    },
                    _ => None,
                })
                .unwrap_or(ImageSource::Missing),
            _ => ImageSource::Missing,
        }
    }
}

fn image_from_str(raw: &str) -> ImageSource {
    match raw.split_whitespace().next() {
        Some(token) if is_url(token) => ImageSource::Url(token.to_string()),
        Some(token) => ImageSource::File(token.to_string()),
        None => ImageSource::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => Record::from(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_text_defaults_for_missing_and_empty() {
        let r = record(json!({"Name": "", "Tagline": null, "Done": false, "Blank": "   "}));
        assert_eq!(r.text("Name", "Name not available"), "Name not available");
        assert_eq!(r.text("Tagline", "none"), "none");
        assert_eq!(r.text("Done", "no"), "no");
        assert_eq!(r.text("Blank", "x"), "x");
        assert_eq!(r.text("Absent", "#"), "#");
    }

    #[test]
    fn test_text_trims_and_stringifies() {
        let r = record(json!({"Name": "  Ada  ", "Year": 2024, "Tags": ["a", " b "]}));
        assert_eq!(r.text("Name", "-"), "Ada");
        assert_eq!(r.text("Year", "-"), "2024");
        assert_eq!(r.text("Tags", "-"), "a, b");
    }

    #[test]
    fn test_list_splits_trims_and_keeps_order() {
        let r = Record::from_pairs([("Skills", "A, B ,C")]);
        assert_eq!(r.list("Skills", LIST_DELIMITER), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_list_drops_empty_fragments() {
        let r = Record::from_pairs([("Knowledge", "#First# #Second##")]);
        assert_eq!(
            r.list("Knowledge", PARAGRAPH_DELIMITER),
            vec!["First", "Second"]
        );
        assert!(r.list("Missing", LIST_DELIMITER).is_empty());
    }

    #[test]
    fn test_list_accepts_multi_select_arrays() {
        let r = record(json!({"Skills": ["Rust", "", " Go "]}));
        assert_eq!(r.list("Skills", LIST_DELIMITER), vec!["Rust", "Go"]);
    }

    #[test]
    fn test_split_is_idempotent() {
        let once = split_list(" x ,, y,z ", ',');
        let again = split_list(&once.join(","), ',');
        assert_eq!(once, again);
    }

    #[test]
    fn test_image_from_file_name_drops_trailing_description() {
        let r = Record::from_pairs([("Picture", "perfil.jpg (https://cdn/perfil.jpg)")]);
        assert_eq!(r.image("Picture"), ImageSource::File("perfil.jpg".into()));
    }

    #[test]
    fn test_image_from_attachment_list() {
        let r = record(json!({
            "Picture": [{"id": "att1", "url": "https://cdn.example/p.png", "filename": "p.png"}]
        }));
        assert_eq!(
            r.image("Picture"),
            ImageSource::Url("https://cdn.example/p.png".into())
        );
    }

    #[test]
    fn test_image_missing_variants() {
        let r = record(json!({"A": "", "B": [], "C": [{"url": ""}], "D": 3}));
        for key in ["A", "B", "C", "D", "E"] {
            assert_eq!(r.image(key), ImageSource::Missing, "key {key}");
        }
    }
}
