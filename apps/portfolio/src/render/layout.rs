//! Page chrome: document head, navigation tabs, footer.

use std::fmt::Write as _;

use crate::pages::Section;
use crate::render::{escape, render_notices, Notice};

const HEAD_LINKS: &str = r#"<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/materialize/1.0.0/css/materialize.min.css">
<link rel="stylesheet" href="https://fonts.googleapis.com/icon?family=Material+Icons">
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.7.2/css/all.min.css" crossorigin="anonymous" referrerpolicy="no-referrer">"#;

const STYLE: &str = r#"<style>
body { background: linear-gradient(90deg, hsla(186, 33%, 94%, 1) 0%, hsla(216, 41%, 79%, 1) 100%); min-height: 100vh; }
.profile-card .profile-img { width: 250px; height: 250px; object-fit: cover; }
.profile-card .profile-desc { font-size: 1.5rem; line-height: 1.6; }
.social-icons a { margin-right: 1rem; display: inline-block; }
.img-placeholder { display: flex; align-items: center; justify-content: center; background-color: #e0e0e0; color: #9e9e9e; }
.img-placeholder i { font-size: 4rem; }
.img-placeholder.gradient { height: 200px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: #fff; }
.projects-container { display: flex; flex-wrap: wrap; gap: 15px; }
.project-card { width: calc(33.333% - 15px); margin-bottom: 20px; }
.project-img { object-fit: cover; height: 200px; width: 100%; }
.skill-card .card-content p { font-size: 1.3rem; line-height: 1.5; }
.tabs .tab a.active { font-weight: 700; }
@media (max-width: 992px) { .project-card { width: calc(50% - 15px); } }
@media (max-width: 600px) {
  .project-card { width: 100%; }
  .profile-card .profile-img { width: 150px; height: 150px; }
  .profile-card .profile-desc { font-size: 1.3rem; }
}
</style>"#;

/// Everything the shell needs to wrap one active section.
pub struct Page<'a> {
    pub owner: &'a str,
    pub active: Section,
    pub notices: &'a [Notice],
    pub body: &'a str,
    pub year: i32,
}

fn render_nav(active: Section) -> String {
    let mut tabs = String::new();
    for section in Section::ALL {
        let class = if section == active { " class=\"active\"" } else { "" };
        let _ = write!(
            tabs,
            r#"<li class="tab"><a href="{}"{class}>{}</a></li>"#,
            section.path(),
            escape(section.label())
        );
    }
    format!(r#"<div class="row"><div class="col s12"><ul class="tabs">{tabs}</ul></div></div>"#)
}

pub fn render_page(page: &Page<'_>) -> String {
    let owner = escape(page.owner);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{owner} - {label}</title>
{HEAD_LINKS}
{STYLE}
</head>
<body>
<main class="container">
{nav}
<section id="{id}">
{notices}
{body}
</section>
</main>
<footer class="page-footer transparent"><div class="container center-align grey-text text-darken-2">&copy; {year} {owner}</div></footer>
<script src="https://cdnjs.cloudflare.com/ajax/libs/materialize/1.0.0/js/materialize.min.js"></script>
</body>
</html>"#,
        label = escape(page.active.label()),
        nav = render_nav(page.active),
        id = page.active.slug(),
        notices = render_notices(page.notices),
        body = page.body,
        year = page.year,
    )
}

/// Standalone page for errors that prevent a section from rendering at all.
pub fn render_error_page(status: u16, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{status}</title>
{HEAD_LINKS}
</head>
<body>
<main class="container center-align">
<h1>{status}</h1>
<p class="flow-text">{message}</p>
<a class="btn blue darken-3" href="/">Back to home</a>
</main>
</body>
</html>"#,
        message = escape(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_marks_exactly_one_active_tab() {
        let html = render_page(&Page {
            owner: "Marc",
            active: Section::Projects,
            notices: &[],
            body: "<p>body</p>",
            year: 2026,
        });
        assert_eq!(html.matches(r#"class="active""#).count(), 1);
        assert!(html.contains(r#"<a href="/projects" class="active">"#));
        assert!(html.contains("&copy; 2026 Marc"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_owner_name_is_escaped() {
        let html = render_page(&Page {
            owner: "<i>Marc</i>",
            active: Section::Home,
            notices: &[Notice::warning("careful")],
            body: "",
            year: 2026,
        });
        assert!(html.contains("&lt;i&gt;Marc&lt;/i&gt;"));
        assert!(html.contains("careful"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render_error_page(404, "no <such> page");
        assert!(html.contains("<h1>404</h1>"));
        assert!(html.contains("no &lt;such&gt; page"));
    }
}
