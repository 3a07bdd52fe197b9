//! One pure render function per page section.
//!
//! Inputs are already normalized (every field defaulted), so these functions
//! never skip a record. Records render in source order.

use std::fmt::Write as _;

use crate::contact::ContactForm;
use crate::models::portfolio::{EducationEntry, Profile, Project, Skill, StemEntry};
use crate::render::{escape, render_notices, safe_href, safe_img_src, Notice};

pub const PROFILE_PLACEHOLDER: &str = r#"<div class="circle responsive-img profile-img img-placeholder"><i class="material-icons">person</i></div>"#;
pub const PROJECT_PLACEHOLDER: &str = r#"<div class="project-img img-placeholder gradient"><i class="material-icons">image</i></div>"#;

const CONTACT_INTRO: &str = "If you think I can help you with some of your projects or \
entrepreneurships, send me a message and I'll contact you as soon as I can. \
I'm always glad to help.";

fn empty_state(message: &str) -> String {
    format!(
        r#"<div class="col s12"><p class="empty-state grey-text text-darken-1 center-align">{}</p></div>"#,
        escape(message)
    )
}

fn chips(items: &[String], color: &str) -> String {
    items
        .iter()
        .map(|item| format!(r#"<div class="chip {color}">{}</div>"#, escape(item)))
        .collect()
}

pub fn render_profile(profile: &Profile, picture_src: Option<&str>) -> String {
    let picture = match picture_src.and_then(safe_img_src) {
        Some(src) => format!(
            r#"<img src="{src}" alt="Profile picture" class="circle responsive-img profile-img">"#
        ),
        None => PROFILE_PLACEHOLDER.to_string(),
    };

    format!(
        r#"<div class="row center-align profile-card">
  <h1>{name} <span class="blue-text text-darken-3">Portfolio</span></h1>
  <h5>{tagline}</h5>
</div>
<div class="row profile-card">
  <div class="col s12">
    <div class="card hoverable">
      <div class="card-content">
        <div class="row valign-wrapper">
          <div class="col s12 m3 center-align">{picture}</div>
          <div class="col s12 m9">
            <span class="card-title">About me</span>
            <p class="profile-desc">{description}</p>
            <div class="card-action social-icons">
              <a href="{linkedin}" class="blue-text text-darken-3" target="_blank" rel="noopener" aria-label="LinkedIn"><i class="fa-brands fa-linkedin fa-2xl"></i></a>
              <a href="{github}" class="blue-text text-darken-3" target="_blank" rel="noopener" aria-label="GitHub"><i class="fa-brands fa-github fa-2xl"></i></a>
              <a href="{instagram}" class="blue-text text-darken-3" target="_blank" rel="noopener" aria-label="Instagram"><i class="fa-brands fa-instagram fa-2xl"></i></a>
            </div>
          </div>
        </div>
      </div>
    </div>
  </div>
</div>"#,
        name = escape(&profile.name),
        tagline = escape(&profile.tagline),
        description = escape(&profile.description),
        linkedin = safe_href(&profile.linkedin),
        github = safe_href(&profile.github),
        instagram = safe_href(&profile.instagram),
    )
}

pub fn render_skills(skills: &[Skill]) -> String {
    if skills.is_empty() {
        return format!(r#"<div class="row">{}</div>"#, empty_state("No skills to show yet."));
    }

    let mut cards = String::new();
    for skill in skills {
        let category = skill
            .category
            .as_deref()
            .map(|c| format!(r#"<div class="chip white light-blue-text text-darken-3">{}</div>"#, escape(c)))
            .unwrap_or_default();
        let _ = write!(
            cards,
            r#"<div class="col s12 m4 l3 skill-card"><div class="card small light-blue darken-3 hoverable"><div class="card-content white-text"><span class="card-title">{}</span>{category}<p>{}</p></div></div></div>"#,
            escape(&skill.name),
            escape(&skill.notes),
        );
    }
    format!(r#"<div class="row">{cards}</div>"#)
}

/// A project together with its resolved image source, if any.
#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub project: Project,
    pub image_src: Option<String>,
}

pub fn render_projects(cards: &[ProjectCard]) -> String {
    if cards.is_empty() {
        return format!(
            r#"<div class="projects-container">{}</div>"#,
            empty_state("No projects to show yet.")
        );
    }

    let mut html = String::new();
    for ProjectCard { project, image_src } in cards {
        let link = safe_href(&project.link);
        let image = match image_src.as_deref().and_then(safe_img_src) {
            Some(src) => format!(r#"<img src="{src}" class="project-img" alt="{}">"#, escape(&project.name)),
            None => PROJECT_PLACEHOLDER.to_string(),
        };
        let _ = write!(
            html,
            r#"<div class="project-card"><div class="card hoverable">
  <div class="card-image"><a href="{link}" target="_blank" rel="noopener">{image}</a></div>
  <div class="card-content">
    <span class="card-title">{name}</span>
    <p class="project-description">{description}</p>
    <div class="row hide-on-small-only">
      <div class="col s12 m6"><h6>Knowledge Applied:</h6>{knowledge}</div>
      <div class="col s12 m6"><h6>Skills Demonstrated:</h6>{skills}</div>
    </div>
  </div>
  <div class="card-action right-align">
    <a href="{link}" class="waves-effect waves-light btn-small blue darken-3 white-text" target="_blank" rel="noopener"><i class="material-icons left">launch</i>View Project</a>
  </div>
</div></div>"#,
            name = escape(&project.name),
            description = escape(&project.description),
            knowledge = chips(&project.knowledge, "blue lighten-4"),
            skills = chips(&project.skills, "green lighten-4"),
        );
    }
    format!(r#"<div class="projects-container">{html}</div>"#)
}

pub fn render_education(entries: &[EducationEntry]) -> String {
    if entries.is_empty() {
        return format!(r#"<div class="row">{}</div>"#, empty_state("No education entries to show yet."));
    }

    let mut cards = String::new();
    for entry in entries {
        let knowledge: String = entry
            .knowledge
            .iter()
            .map(|k| {
                format!(
                    r#"<div class="collection-item grey lighten-5"><p>{}</p></div>"#,
                    escape(k)
                )
            })
            .collect();
        let _ = write!(
            cards,
            r#"<div class="col s12 m6 l6 education-card"><div class="card hoverable">
  <div class="card-content light-blue lighten-4">
    <span class="card-title blue-grey-text text-darken-4">{name}</span>
    <p class="blue-grey-text text-darken-2"><i class="fas fa-graduation-cap"></i> {degree}<br><i class="fas fa-calendar-alt"></i> {date}</p>
  </div>
  <div class="card-content"><div class="collection">{knowledge}</div></div>
</div></div>"#,
            name = escape(&entry.name),
            degree = escape(&entry.degree),
            date = escape(&entry.date),
        );
    }
    format!(r#"<div class="row">{cards}</div>"#)
}

pub fn render_stem(entries: &[StemEntry]) -> String {
    if entries.is_empty() {
        return format!(r#"<div class="row">{}</div>"#, empty_state("No outreach content to show yet."));
    }

    let mut cards = String::new();
    for entry in entries {
        let _ = write!(
            cards,
            r#"<div class="col s12 m6 l4 stem-card"><div class="card hoverable">
  <div class="card-content light-blue lighten-4"><span class="card-title blue-grey-text text-darken-4">{title}</span></div>
  <div class="card-content center">
    <p class="blue-grey-text text-darken-2">{description}</p>
    <a href="{link}" target="_blank" rel="noopener" class="btn waves-effect pink accent-3 white-text"><i class="fab fa-instagram"></i> Follow me!</a>
  </div>
</div></div>"#,
            title = escape(&entry.title),
            description = escape(&entry.description),
            link = safe_href(&entry.instagram),
        );
    }
    format!(r#"<div class="row">{cards}</div>"#)
}

/// The contact form, pre-filled with `form` (empty after a successful send).
pub fn render_contact_form(form: &ContactForm, enabled: bool) -> String {
    let disabled = if enabled { "" } else { " disabled" };
    format!(
        r#"{intro}
<div class="card"><div class="card-content">
<form method="post" action="/contact" class="contact-form">
  <div class="input-field"><label class="active" for="name">Your name</label><input id="name" name="name" type="text" value="{name}" required></div>
  <div class="input-field"><label class="active" for="email">Your email</label><input id="email" name="email" type="email" value="{email}" required></div>
  <div class="input-field"><label class="active" for="phone">WhatsApp phone number, with country code</label><input id="phone" name="phone" type="tel" value="{phone}"></div>
  <div class="input-field"><label class="active" for="notes">What can I do for you</label><textarea id="notes" name="notes" class="materialize-textarea" required>{notes}</textarea></div>
  <button type="submit" class="btn blue darken-3 waves-effect waves-light"{disabled}><i class="material-icons right">send</i>Send</button>
</form>
</div></div>"#,
        intro = render_notices(&[Notice::info(CONTACT_INTRO)]),
        name = escape(&form.name),
        email = escape(&form.email),
        phone = escape(&form.phone),
        notes = escape(&form.notes),
    )
}
