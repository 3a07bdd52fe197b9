//! Page composer: one active section per request.
//!
//! Navigation is explicit (a tab link or the contact form post). Every page
//! reads the current cached snapshots through `DataStore`; nothing here forces
//! a reload.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use tracing::info;

use crate::contact::{ContactForm, VALIDATION_WARNING};
use crate::models::portfolio::{group_education, Profile, Project, Skill, StemEntry};
use crate::records::{ImageSource, Table};
use crate::render::layout::Page;
use crate::render::sections::{
    render_contact_form, render_education, render_profile, render_projects, render_skills,
    render_stem, ProjectCard,
};
use crate::render::{render_page, Notice};
use crate::state::AppState;

pub const SENT_MESSAGE: &str = "Your message has been sent!";
pub const SEND_FAILED_MESSAGE: &str = "There was an error sending your message. Please try again.";
pub const PROFILE_PICTURE_WARNING: &str = "Could not load the profile picture";
pub const CONTACT_DISABLED_MESSAGE: &str =
    "The contact form is currently unavailable. Please reach out through the social links instead.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Skills,
    Projects,
    Education,
    Stem,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::Skills,
        Section::Projects,
        Section::Education,
        Section::Stem,
        Section::Contact,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Education => "education",
            Section::Stem => "stem",
            Section::Contact => "contact",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Section::Home => "/",
            Section::Skills => "/skills",
            Section::Projects => "/projects",
            Section::Education => "/education",
            Section::Stem => "/stem",
            Section::Contact => "/contact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Skills => "My skills",
            Section::Projects => "My projects",
            Section::Education => "Education",
            Section::Stem => "STEM Content Creation & Outreach",
            Section::Contact => "Contact",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "home" | "profile" => Ok(Section::Home),
            "skills" => Ok(Section::Skills),
            "projects" | "portfolio" => Ok(Section::Projects),
            "education" => Ok(Section::Education),
            "stem" => Ok(Section::Stem),
            "contact" => Ok(Section::Contact),
            other => Err(format!("unknown section '{other}'")),
        }
    }
}

/// What the contact section should show: the form contents and any outcome
/// notices from a submission.
#[derive(Debug, Clone, Default)]
pub struct ContactView {
    pub form: ContactForm,
    pub notices: Vec<Notice>,
}

/// Renders the full page for `section`.
pub async fn compose(state: &AppState, section: Section, contact: ContactView) -> String {
    let mut notices = Vec::new();

    let profile_load = state.data.load(Table::Profile).await;
    let profile = Profile::from_records(&profile_load.records);

    let body = match section {
        Section::Home => {
            notices.extend(profile_load.warning.map(Notice::warning));
            let picture = state.images.resolve(&profile.picture).await;
            if picture.is_none() {
                notices.push(Notice::warning(profile_picture_warning(&profile.picture)));
            }
            render_profile(&profile, picture.as_deref())
        }
        Section::Skills => {
            let load = state.data.load(Table::Skills).await;
            notices.extend(load.warning.map(Notice::warning));
            let skills: Vec<Skill> = load.records.iter().map(Skill::from_record).collect();
            render_skills(&skills)
        }
        Section::Projects => {
            let load = state.data.load(Table::Projects).await;
            notices.extend(load.warning.map(Notice::warning));
            let mut cards = Vec::with_capacity(load.records.len());
            for record in load.records.iter() {
                let project = Project::from_record(record);
                let image_src = resolve_image(state, &project.image, &mut notices).await;
                cards.push(ProjectCard { project, image_src });
            }
            render_projects(&cards)
        }
        Section::Education => {
            let load = state.data.load(Table::Education).await;
            notices.extend(load.warning.map(Notice::warning));
            render_education(&group_education(&load.records))
        }
        Section::Stem => {
            let load = state.data.load(Table::Stem).await;
            notices.extend(load.warning.map(Notice::warning));
            let entries: Vec<StemEntry> = load.records.iter().map(StemEntry::from_record).collect();
            render_stem(&entries)
        }
        Section::Contact => {
            let enabled = state.contact.is_enabled();
            if !enabled {
                notices.push(Notice::warning(CONTACT_DISABLED_MESSAGE));
            }
            notices.extend(contact.notices);
            render_contact_form(&contact.form, enabled)
        }
    };

    render_page(&Page {
        owner: &profile.name,
        active: section,
        notices: &notices,
        body: &body,
        year: Utc::now().year(),
    })
}

/// Validates and, when valid, submits a contact form; then renders the
/// contact section with the outcome.
pub async fn submit_contact(state: &AppState, form: ContactForm) -> String {
    let view = match form.validate() {
        Err(missing) => {
            info!("Contact form rejected, missing: {}", missing.join(", "));
            ContactView {
                form,
                notices: vec![Notice::warning(VALIDATION_WARNING)],
            }
        }
        Ok(message) => {
            if state.contact.submit(&message).await {
                ContactView {
                    form: ContactForm::default(),
                    notices: vec![Notice::success(SENT_MESSAGE)],
                }
            } else {
                ContactView {
                    form,
                    notices: vec![Notice::error(SEND_FAILED_MESSAGE)],
                }
            }
        }
    };

    compose(state, Section::Contact, view).await
}

/// The profile picture is always expected, so an unset one is reported too.
fn profile_picture_warning(source: &ImageSource) -> String {
    match source {
        ImageSource::File(name) => format!("{PROFILE_PICTURE_WARNING}: {name}"),
        ImageSource::Url(url) => format!("{PROFILE_PICTURE_WARNING}: {url}"),
        ImageSource::Missing => format!("{PROFILE_PICTURE_WARNING}: no picture is set"),
    }
}

/// Resolves an image, adding a visible warning when a referenced image could
/// not be loaded. A missing reference is not an error.
async fn resolve_image(
    state: &AppState,
    source: &ImageSource,
    notices: &mut Vec<Notice>,
) -> Option<String> {
    let resolved = state.images.resolve(source).await;
    if resolved.is_none() {
        if let ImageSource::File(name) = source {
            notices.push(Notice::warning(format!("Image not available: {name}")));
        }
    }
    resolved
}
