//! Section Composer — decides which of the eight content sections a resume
//! has and builds the markup fragment for each present one.
//!
//! Presence is derived, never stored: a list section is present iff the list
//! is non-empty, Summary iff the summary text is non-blank. Optional
//! sub-fields (period, company, description, ...) emit no markup node at all
//! when absent, and each list entry renders independently of its neighbors.

use crate::models::resume::{
    Achievement, Certificate, Education, Experience, LinkEntry, PersonalInfo, Project,
    ResumeRecord,
};
use crate::render::markup::Markup;

/// The eight recognized content sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Experience,
    Projects,
    Skills,
    Education,
    Certificates,
    Achievements,
    Links,
}

/// Fixed column assignment. Links render in the header line, never in a column.
pub const LEFT_COLUMN: [Section; 4] = [
    Section::Summary,
    Section::Experience,
    Section::Projects,
    Section::Skills,
];
pub const RIGHT_COLUMN: [Section; 3] = [
    Section::Education,
    Section::Certificates,
    Section::Achievements,
];

/// One presence flag per section, recomputed on every render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionPresence {
    pub summary: bool,
    pub experience: bool,
    pub projects: bool,
    pub skills: bool,
    pub education: bool,
    pub certificates: bool,
    pub achievements: bool,
    pub links: bool,
}

impl SectionPresence {
    pub fn of(record: &ResumeRecord) -> Self {
        Self {
            summary: !record.personal_info.summary.trim().is_empty(),
            experience: !record.experience.is_empty(),
            projects: !record.projects.is_empty(),
            skills: !record.skills.is_empty(),
            education: !record.education.is_empty(),
            certificates: !record.certificates.is_empty(),
            achievements: !record.achievements.is_empty(),
            links: !record.links.is_empty(),
        }
    }

    pub fn count(self) -> usize {
        [
            self.summary,
            self.experience,
            self.projects,
            self.skills,
            self.education,
            self.certificates,
            self.achievements,
            self.links,
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// Builds the markup fragment for one section, or `None` if the section has
/// no content. No section ever renders empty.
pub fn compose_section(record: &ResumeRecord, section: Section) -> Option<Markup> {
    match section {
        Section::Summary => summary_fragment(&record.personal_info),
        Section::Experience => experience_fragment(&record.experience),
        Section::Projects => projects_fragment(&record.projects),
        Section::Skills => skills_fragment(&record.skills),
        Section::Education => education_fragment(&record.education),
        Section::Certificates => certificates_fragment(&record.certificates),
        Section::Achievements => achievements_fragment(&record.achievements),
        Section::Links => links_fragment(&record.links),
    }
}

/// Blank and whitespace-only optional fields count as absent.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Fragment builders
// ────────────────────────────────────────────────────────────────────────────

fn section_shell(title: &str, body: Markup) -> Markup {
    let mut m = Markup::new();
    m.open_class("div", "resume-section");
    m.open_class("div", "section-header");
    m.element("h2", title);
    m.close("div");
    m.open_class("div", "section-content");
    m.fragment(body);
    m.close("div");
    m.close("div");
    m
}

/// Right-aligned date/affiliation spans inside an item header. The wrapper
/// is omitted entirely when every candidate span is absent.
fn date_location(body: &mut Markup, spans: &[(&str, &Option<String>)]) {
    let present: Vec<(&str, &str)> = spans
        .iter()
        .filter_map(|(class, value)| non_blank(value).map(|text| (*class, text)))
        .collect();
    if present.is_empty() {
        return;
    }
    body.open_class("div", "date-location");
    for (class, text) in present {
        body.class_element("span", class, text);
    }
    body.close("div");
}

fn description(body: &mut Markup, value: &Option<String>) {
    if let Some(text) = non_blank(value) {
        body.open_class("div", "item-description");
        body.element("p", text);
        body.close("div");
    }
}

fn summary_fragment(info: &PersonalInfo) -> Option<Markup> {
    if info.summary.trim().is_empty() {
        return None;
    }
    let mut body = Markup::new();
    body.element("p", &info.summary);
    Some(section_shell("Professional Summary", body))
}

fn experience_fragment(entries: &[Experience]) -> Option<Markup> {
    if entries.is_empty() {
        return None;
    }
    let mut body = Markup::new();
    for entry in entries {
        body.open_class("div", "experience-item");
        body.open_class("div", "item-header");
        body.element("h3", &entry.title);
        date_location(
            &mut body,
            &[("date", &entry.period), ("company", &entry.company)],
        );
        body.close("div");
        description(&mut body, &entry.description);
        body.close("div");
    }
    Some(section_shell("Work Experience", body))
}

fn projects_fragment(entries: &[Project]) -> Option<Markup> {
    if entries.is_empty() {
        return None;
    }
    let mut body = Markup::new();
    for entry in entries {
        body.open_class("div", "project-item");
        body.open_class("div", "item-header");
        body.element("h3", &entry.name);
        date_location(
            &mut body,
            &[
                ("date", &entry.period),
                ("technologies", &entry.technologies),
            ],
        );
        body.close("div");
        description(&mut body, &entry.description);
        if let Some(link) = non_blank(&entry.link) {
            body.open_class("div", "project-link");
            body.anchor(link, "View Project");
            body.close("div");
        }
        body.close("div");
    }
    Some(section_shell("Projects", body))
}

fn skills_fragment(skills: &[String]) -> Option<Markup> {
    if skills.is_empty() {
        return None;
    }
    let mut body = Markup::new();
    body.open_class("div", "skills-container");
    for skill in skills {
        body.class_element("div", "skill-tag", skill);
    }
    body.close("div");
    Some(section_shell("Skills", body))
}

fn education_fragment(entries: &[Education]) -> Option<Markup> {
    if entries.is_empty() {
        return None;
    }
    let mut body = Markup::new();
    for entry in entries {
        body.open_class("div", "education-item");
        body.open_class("div", "item-header");
        body.element("h3", &entry.degree);
        date_location(
            &mut body,
            &[("date", &entry.period), ("institution", &entry.institution)],
        );
        body.close("div");
        description(&mut body, &entry.description);
        body.close("div");
    }
    Some(section_shell("Education", body))
}

fn certificates_fragment(entries: &[Certificate]) -> Option<Markup> {
    if entries.is_empty() {
        return None;
    }
    let mut body = Markup::new();
    for entry in entries {
        body.open_class("div", "certificate-item");
        body.open_class("div", "item-header");
        body.element("h3", &entry.name);
        date_location(
            &mut body,
            &[("date", &entry.date), ("issuer", &entry.issuer)],
        );
        body.close("div");
        if let Some(link) = non_blank(&entry.credential_link) {
            body.open_class("div", "certificate-link");
            body.anchor(link, "Verify Credential");
            body.close("div");
        }
        body.close("div");
    }
    Some(section_shell("Certifications", body))
}

fn achievements_fragment(entries: &[Achievement]) -> Option<Markup> {
    if entries.is_empty() {
        return None;
    }
    let mut body = Markup::new();
    for entry in entries {
        body.open_class("div", "achievement-item");
        body.open_class("div", "item-header");
        body.element("h3", &entry.title);
        if let Some(date) = non_blank(&entry.date) {
            body.class_element("span", "date", date);
        }
        body.close("div");
        description(&mut body, &entry.description);
        body.close("div");
    }
    Some(section_shell("Achievements", body))
}

/// Header links line: platform anchors joined with ", ", no trailing separator.
fn links_fragment(links: &[LinkEntry]) -> Option<Markup> {
    if links.is_empty() {
        return None;
    }
    let mut m = Markup::new();
    m.open_class("div", "contact-item links-inline");
    for (i, link) in links.iter().enumerate() {
        if i > 0 {
            m.text(", ");
        }
        m.anchor(&link.url, &link.platform);
    }
    m.close("div");
    Some(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::{empty_record, full_record, sparse_record};

    fn compose(record: &ResumeRecord, section: Section) -> String {
        compose_section(record, section)
            .expect("section should be present")
            .into_string()
    }

    #[test]
    fn test_presence_of_empty_record_is_zero() {
        assert_eq!(SectionPresence::of(&empty_record()).count(), 0);
    }

    #[test]
    fn test_presence_counts_each_nonempty_section() {
        let presence = SectionPresence::of(&full_record());
        assert_eq!(presence.count(), 8);

        let sparse = SectionPresence::of(&sparse_record());
        assert_eq!(sparse.count(), 2);
        assert!(sparse.summary);
        assert!(sparse.skills);
    }

    #[test]
    fn test_whitespace_summary_counts_as_absent() {
        let mut record = empty_record();
        record.personal_info.summary = "   \n  ".to_string();
        assert!(!SectionPresence::of(&record).summary);
        assert!(compose_section(&record, Section::Summary).is_none());
    }

    #[test]
    fn test_empty_section_composes_to_none() {
        let record = empty_record();
        assert!(compose_section(&record, Section::Experience).is_none());
        assert!(compose_section(&record, Section::Links).is_none());
    }

    #[test]
    fn test_experience_without_period_emits_no_date_node() {
        let mut record = empty_record();
        record.experience.push(Experience {
            title: "Platform Engineer".to_string(),
            company: None,
            period: None,
            description: None,
        });
        let html = compose(&record, Section::Experience);
        assert!(html.contains("Platform Engineer"));
        assert!(!html.contains("class=\"date\""));
        assert!(!html.contains("date-location"), "empty wrapper must be omitted");
        assert!(!html.contains("item-description"));
    }

    #[test]
    fn test_one_entry_missing_field_does_not_affect_others() {
        let mut record = empty_record();
        record.experience.push(Experience {
            title: "First".to_string(),
            company: Some("Initech".to_string()),
            period: None,
            description: None,
        });
        record.experience.push(Experience {
            title: "Second".to_string(),
            company: None,
            period: Some("2020 - 2022".to_string()),
            description: Some("Shipped things.".to_string()),
        });
        let html = compose(&record, Section::Experience);
        assert!(html.contains("Initech"));
        assert!(html.contains("2020 - 2022"));
        assert!(html.contains("Shipped things."));
        assert_eq!(html.matches("experience-item").count(), 2);
    }

    #[test]
    fn test_certificate_link_rendered_only_when_present() {
        let mut record = empty_record();
        record.certificates.push(Certificate {
            name: "CKA".to_string(),
            issuer: Some("CNCF".to_string()),
            date: None,
            credential_link: None,
        });
        let html = compose(&record, Section::Certificates);
        assert!(!html.contains("Verify Credential"));

        record.certificates[0].credential_link = Some("https://cred.example/cka".to_string());
        let html = compose(&record, Section::Certificates);
        assert!(html.contains("Verify Credential"));
        assert!(html.contains("https://cred.example/cka"));
    }

    #[test]
    fn test_links_joined_with_separator_no_trailing() {
        let mut record = empty_record();
        record.links.push(LinkEntry {
            platform: "GitHub".to_string(),
            url: "https://github.com/jdoe".to_string(),
        });
        record.links.push(LinkEntry {
            platform: "LinkedIn".to_string(),
            url: "https://linkedin.com/in/jdoe".to_string(),
        });
        let html = compose(&record, Section::Links);
        assert_eq!(html.matches(", ").count(), 1, "one separator between two links");
        assert!(html.contains("</a>, <a"));
        assert!(!html.trim_end().ends_with(", "), "no separator after the last link");
    }

    #[test]
    fn test_skills_render_in_insertion_order() {
        let mut record = empty_record();
        record.skills = vec!["Go".to_string(), "SQL".to_string(), "Rust".to_string()];
        let html = compose(&record, Section::Skills);
        let go = html.find(">Go<").expect("Go tag");
        let sql = html.find(">SQL<").expect("SQL tag");
        let rust = html.find(">Rust<").expect("Rust tag");
        assert!(go < sql && sql < rust, "insertion order is rendering order");
    }
}
