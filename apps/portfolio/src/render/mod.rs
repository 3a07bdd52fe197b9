// Markup generation.
// Every value that comes from a table row or from a visitor goes through
// `escape` (text) or `safe_href` / `safe_img_src` (attributes) before it is
// written into a page.

pub mod layout;
pub mod sections;

use std::fmt::Write as _;

pub use layout::render_page;

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escaped link target. Only http(s), mailto, relative paths and fragments
/// survive; anything else (`javascript:` and friends) becomes `#`.
pub fn safe_href(url: &str) -> String {
    const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

    let url = url.trim();
    if url.is_empty() || url.starts_with("//") {
        return "#".to_string();
    }

    let scheme = url
        .split_once(':')
        .map(|(scheme, _)| scheme)
        .filter(|scheme| !scheme.contains(['/', '?', '#']));

    match scheme {
        Some(scheme) if !ALLOWED_SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s)) => {
            "#".to_string()
        }
        _ => escape(url),
    }
}

/// Escaped image source, or `None` when the value is not an http(s) URL or
/// an inline image.
pub fn safe_img_src(src: &str) -> Option<String> {
    let src = src.trim();
    let lower = src.to_ascii_lowercase();
    let allowed = lower.starts_with("https://")
        || lower.starts_with("http://")
        || lower.starts_with("data:image/");
    allowed.then(|| escape(src))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// An inline, non-fatal message shown above the active section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub fn render_notices(notices: &[Notice]) -> String {
    let mut html = String::new();
    for notice in notices {
        let (class, icon) = match notice.level {
            NoticeLevel::Info => ("light-blue lighten-5 blue-grey-text text-darken-4", "info"),
            NoticeLevel::Success => ("green lighten-4 green-text text-darken-4", "check_circle"),
            NoticeLevel::Warning => ("amber lighten-4 brown-text text-darken-4", "warning"),
            NoticeLevel::Error => ("red lighten-4 red-text text-darken-4", "error"),
        };
        let _ = write!(
            html,
            r#"<div class="card-panel notice {class}" role="alert"><i class="material-icons left">{icon}</i>{}</div>"#,
            escape(&notice.message)
        );
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_specials() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn test_safe_href_allows_common_links() {
        assert_eq!(safe_href("https://github.com/me"), "https://github.com/me");
        assert_eq!(safe_href("mailto:me@example.com"), "mailto:me@example.com");
        assert_eq!(safe_href("#"), "#");
        assert_eq!(safe_href("/contact"), "/contact");
        assert_eq!(safe_href("https://x.com/?a=1&b=2"), "https://x.com/?a=1&amp;b=2");
    }

    #[test]
    fn test_safe_href_rejects_scripts() {
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href(" JavaScript:alert(1)"), "#");
        assert_eq!(safe_href("data:text/html,hi"), "#");
        assert_eq!(safe_href("//evil.example"), "#");
    }

    #[test]
    fn test_safe_img_src() {
        assert!(safe_img_src("data:image/png;base64,AAAA").is_some());
        assert!(safe_img_src("https://cdn.example/a.png").is_some());
        assert!(safe_img_src("").is_none());
        assert!(safe_img_src("javascript:alert(1)").is_none());
    }

    #[test]
    fn test_notice_levels_have_distinct_styles() {
        let html = render_notices(&[
            Notice::info("hello"),
            Notice::success("sent"),
            Notice::error("failed"),
        ]);
        assert!(html.contains(r#"notice light-blue lighten-5"#));
        assert!(html.contains(r#"<i class="material-icons left">info</i>hello"#));
        assert!(html.contains("notice green lighten-4"));
        assert!(html.contains("notice red lighten-4"));
        assert!(html.find("hello").unwrap() < html.find("sent").unwrap());
    }

    #[test]
    fn test_notices_are_escaped() {
        let html = render_notices(&[Notice::warning("<script>x</script>")]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("amber"));
    }
}
