use crate::records::normalize::{LIST_DELIMITER, PARAGRAPH_DELIMITER};
use crate::records::{ImageSource, Record};

pub const PLACEHOLDER_LINK: &str = "#";

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub description: String,
    pub tagline: String,
    pub linkedin: String,
    pub github: String,
    pub instagram: String,
    pub picture: ImageSource,
}

impl Profile {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.text("Name", "Name not available"),
            description: record.text("Description", "Description not available"),
            tagline: record.text("Tagline", "Tagline not available"),
            linkedin: record.text("Linkedin", PLACEHOLDER_LINK),
            github: record.text("GitHub", PLACEHOLDER_LINK),
            instagram: record.text("Instagram", PLACEHOLDER_LINK),
            picture: record.image("Picture"),
        }
    }

    /// The profile table may hold several rows; only the first non-blank one
    /// counts. No rows at all still yields a fully defaulted profile.
    pub fn from_records(records: &[Record]) -> Self {
        let empty = Record::new();
        let first = records.iter().find(|r| !r.is_blank()).unwrap_or(&empty);
        Self::from_record(first)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    pub notes: String,
    pub category: Option<String>,
}

impl Skill {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.text("Name", "Unnamed skill"),
            notes: record.text("Notes", "Description not available"),
            category: record.optional_text("Category"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub skills: Vec<String>,
    pub knowledge: Vec<String>,
    pub link: String,
    pub image: ImageSource,
}

impl Project {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.text("Name", "Untitled project"),
            description: record.text("Description", "No description available"),
            skills: record.list("Skills", LIST_DELIMITER),
            knowledge: record.list("Knowledge", LIST_DELIMITER),
            link: record.text("Link", PLACEHOLDER_LINK),
            image: record.image("Image"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationEntry {
    pub name: String,
    pub degree: String,
    pub date: String,
    pub knowledge: Vec<String>,
}

/// Merges education rows that share (Name, Degree). Groups appear in order of
/// first occurrence; the first non-empty date is kept and knowledge paragraphs
/// (`#`-separated) are concatenated in source order. Defaults are applied
/// after grouping, so rows missing both keys form one group.
pub fn group_education(records: &[Record]) -> Vec<EducationEntry> {
    struct Group {
        name: String,
        degree: String,
        date: Option<String>,
        knowledge: Vec<String>,
    }

    let mut groups: Vec<Group> = Vec::new();

    for record in records {
        let name = record.optional_text("Name").unwrap_or_default();
        let degree = record.optional_text("Degree").unwrap_or_default();
        let knowledge = record.list("Knowledge", PARAGRAPH_DELIMITER);

        match groups
            .iter_mut()
            .find(|g| g.name == name && g.degree == degree)
        {
            Some(group) => {
                if group.date.is_none() {
                    group.date = record.optional_text("Date");
                }
                group.knowledge.extend(knowledge);
            }
            None => groups.push(Group {
                name,
                degree,
                date: record.optional_text("Date"),
                knowledge,
            }),
        }
    }

    groups
        .into_iter()
        .map(|g| EducationEntry {
            name: non_empty_or(g.name, "Institution not specified"),
            degree: non_empty_or(g.degree, "Degree not specified"),
            date: g.date.unwrap_or_else(|| "Date not specified".to_string()),
            knowledge: if g.knowledge.is_empty() {
                vec!["Knowledge not specified".to_string()]
            } else {
                g.knowledge
            },
        })
        .collect()
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StemEntry {
    pub title: String,
    pub description: String,
    pub instagram: String,
}

impl StemEntry {
    pub fn from_record(record: &Record) -> Self {
        Self {
            title: record.text("Name", "Title not available"),
            description: record.text("Description", "Description not available"),
            instagram: record.text("Instagram", PLACEHOLDER_LINK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_when_table_is_empty() {
        let profile = Profile::from_records(&[]);
        assert_eq!(profile.name, "Name not available");
        assert_eq!(profile.linkedin, "#");
        assert_eq!(profile.github, "#");
        assert_eq!(profile.instagram, "#");
        assert_eq!(profile.picture, ImageSource::Missing);
    }

    #[test]
    fn test_profile_uses_first_non_blank_row() {
        let rows = vec![
            Record::from_pairs([("Name", ""), ("Tagline", " ")]),
            Record::from_pairs([("Name", "Marc"), ("Picture", "perfil.jpg")]),
            Record::from_pairs([("Name", "Other")]),
        ];
        let profile = Profile::from_records(&rows);
        assert_eq!(profile.name, "Marc");
        assert_eq!(profile.tagline, "Tagline not available");
        assert_eq!(profile.picture, ImageSource::File("perfil.jpg".into()));
    }

    #[test]
    fn test_project_chip_lists() {
        let project = Project::from_record(&Record::from_pairs([
            ("Name", "Site"),
            ("Skills", "A, B ,C"),
            ("Knowledge", ""),
        ]));
        assert_eq!(project.skills, vec!["A", "B", "C"]);
        assert!(project.knowledge.is_empty());
        assert_eq!(project.link, "#");
        assert_eq!(project.image, ImageSource::Missing);
    }

    #[test]
    fn test_education_rows_with_same_key_merge_in_order() {
        let rows = vec![
            Record::from_pairs([("Name", "X"), ("Degree", "BSc"), ("Knowledge", "K1")]),
            Record::from_pairs([("Name", "Y"), ("Degree", "MSc"), ("Knowledge", "M1")]),
            Record::from_pairs([("Name", "X"), ("Degree", "BSc"), ("Knowledge", "K2")]),
        ];
        let entries = group_education(&rows);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "X");
        assert_eq!(entries[0].knowledge, vec!["K1", "K2"]);
        assert_eq!(entries[1].knowledge, vec!["M1"]);
    }

    #[test]
    fn test_education_same_name_different_degree_stays_apart() {
        let rows = vec![
            Record::from_pairs([("Name", "X"), ("Degree", "BSc")]),
            Record::from_pairs([("Name", "X"), ("Degree", "PhD")]),
        ];
        assert_eq!(group_education(&rows).len(), 2);
    }

    #[test]
    fn test_education_splits_paragraphs_and_defaults() {
        let rows = vec![
            Record::from_pairs([("Name", " X "), ("Degree", "BSc"), ("Knowledge", "A # B#")]),
            Record::from_pairs([("Name", "X"), ("Degree", "BSc"), ("Date", "2020")]),
            Record::from_pairs([("Date", "2019")]),
        ];
        let entries = group_education(&rows);
        assert_eq!(entries[0].knowledge, vec!["A", "B"]);
        assert_eq!(entries[0].date, "2020");
        assert_eq!(entries[1].name, "Institution not specified");
        assert_eq!(entries[1].degree, "Degree not specified");
        assert_eq!(entries[1].knowledge, vec!["Knowledge not specified"]);
    }

    #[test]
    fn test_stem_defaults_link() {
        let entry = StemEntry::from_record(&Record::from_pairs([("Name", "Talks")]));
        assert_eq!(entry.title, "Talks");
        assert_eq!(entry.instagram, "#");
    }
}
