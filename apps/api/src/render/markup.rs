//! Markup Renderer — serializes a resume record plus its composed sections
//! into one self-contained HTML document with an embedded print stylesheet.
//!
//! Rendering is a pure function of the record: identical input produces a
//! byte-identical document. All user text flows through `Markup`, whose
//! text and attribute methods escape by default, so a resume field can never
//! break the page structure.

use crate::models::resume::ResumeRecord;
use crate::render::sections::{self, Section, SectionPresence, LEFT_COLUMN, RIGHT_COLUMN};

// ────────────────────────────────────────────────────────────────────────────
// Escaping markup builder
// ────────────────────────────────────────────────────────────────────────────

/// HTML fragment builder. Tag and class names come from code; anything that
/// originates in user data goes through `text` or `anchor`, which escape.
#[derive(Debug, Default)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, tag: &str) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    pub fn open_class(&mut self, tag: &str, class: &str) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push_str(" class=\"");
        self.buf.push_str(class);
        self.buf.push_str("\">");
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Appends user text, escaped.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&html_escape::encode_text(text));
        self
    }

    /// `<tag>text</tag>` with the text escaped.
    pub fn element(&mut self, tag: &str, text: &str) -> &mut Self {
        self.open(tag).text(text).close(tag)
    }

    /// `<tag class="class">text</tag>` with the text escaped.
    pub fn class_element(&mut self, tag: &str, class: &str, text: &str) -> &mut Self {
        self.open_class(tag, class).text(text).close(tag)
    }

    /// External link with an escaped href attribute and escaped label.
    pub fn anchor(&mut self, href: &str, label: &str) -> &mut Self {
        self.buf.push_str("<a href=\"");
        self.buf
            .push_str(&html_escape::encode_double_quoted_attribute(href));
        self.buf
            .push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
        self.text(label);
        self.buf.push_str("</a>");
        self
    }

    /// Splices a finished fragment in as-is. Fragments are themselves built
    /// through this type, so escaping has already happened.
    pub fn fragment(&mut self, other: Markup) -> &mut Self {
        self.buf.push_str(&other.buf);
        self
    }

    fn raw(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

/// Renders the complete printable document for one resume record.
///
/// Both column containers are always emitted so the grid stays stable; an
/// empty column simply contains no section markup. `two_column` toggles the
/// `two-columns` class on the content container.
pub fn render_document(record: &ResumeRecord, presence: SectionPresence, two_column: bool) -> String {
    let mut doc = Markup::new();
    doc.raw("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>");
    doc.text(&record.version_name);
    doc.raw("</title>\n<style>");
    doc.raw(PRINT_STYLE);
    doc.raw("</style>\n</head>\n<body>\n");

    doc.open_class("div", "resume-preview");
    doc.open_class("div", "resume-a4-template");

    render_header(&mut doc, record, presence);

    let content_class = if two_column {
        "resume-content two-columns"
    } else {
        "resume-content"
    };
    doc.open_class("div", content_class);
    render_column(&mut doc, record, &LEFT_COLUMN);
    render_column(&mut doc, record, &RIGHT_COLUMN);
    doc.close("div");

    doc.close("div");
    doc.close("div");
    doc.raw("\n</body>\n</html>\n");
    doc.into_string()
}

/// Header block: name, optional professional title, inline contact details,
/// and the joined links line. Blank fields emit no node.
fn render_header(doc: &mut Markup, record: &ResumeRecord, presence: SectionPresence) {
    let info = &record.personal_info;

    doc.open_class("div", "resume-header");
    doc.open_class("div", "name-title");
    doc.element("h1", &info.name);
    if !info.title.trim().is_empty() {
        doc.class_element("p", "professional-title", &info.title);
    }
    doc.close("div");

    doc.open_class("div", "contact-info");
    for field in [&info.email, &info.phone, &info.address] {
        if !field.trim().is_empty() {
            doc.open_class("div", "contact-item");
            doc.element("span", field);
            doc.close("div");
        }
    }
    if presence.links {
        if let Some(links) = sections::compose_section(record, Section::Links) {
            doc.fragment(links);
        }
    }
    doc.close("div");

    doc.close("div");
}

fn render_column(doc: &mut Markup, record: &ResumeRecord, column: &[Section]) {
    doc.open_class("div", "content-column");
    for &section in column {
        if let Some(fragment) = sections::compose_section(record, section) {
            doc.fragment(fragment);
        }
    }
    doc.close("div");
}

/// Print-optimized stylesheet: A4 page geometry with 15mm margins, section
/// and entry blocks kept whole across page boundaries, forced print colors,
/// and a single-column collapse on narrow screens (display nicety only).
const PRINT_STYLE: &str = r#"
.resume-preview { display: flex; justify-content: center; }
.resume-a4-template {
  background: white;
  font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
  color: #2d3748;
  width: 100%;
}
.resume-header { border-bottom: 2px solid #4361ee; padding-bottom: 1rem; margin-bottom: 1.5rem; }
.name-title { text-align: center; margin-bottom: 0.75rem; }
.name-title h1 {
  font-size: 28px;
  font-weight: 700;
  margin: 0 0 0.25rem 0;
  text-transform: uppercase;
  letter-spacing: 1px;
}
.professional-title { font-size: 16px; color: #4361ee; font-weight: 500; margin: 0; font-style: italic; }
.contact-info { display: flex; justify-content: center; flex-wrap: wrap; gap: 1rem; font-size: 14px; }
.contact-item { display: flex; align-items: center; gap: 0.5rem; }
.links-inline a { margin-left: 5px; text-decoration: none; color: #0073e6; }

.resume-content { padding-top: 0.5rem; display: block; }
.resume-content.two-columns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.content-column { display: flex; flex-direction: column; gap: 1.25rem; }

.resume-section { page-break-inside: avoid; }
.section-header {
  display: flex;
  align-items: center;
  margin-bottom: 0.75rem;
  border-bottom: 1px solid #e2e8f0;
  padding-bottom: 0.5rem;
}
.section-header h2 { font-size: 18px; font-weight: 600; margin: 0; text-transform: uppercase; letter-spacing: 0.5px; }
.section-content { padding-left: 1.75rem; }

.experience-item, .education-item, .project-item, .certificate-item, .achievement-item {
  margin-bottom: 1rem;
  page-break-inside: avoid;
}
.item-header { display: flex; justify-content: space-between; align-items: flex-start; margin-bottom: 0.25rem; }
.item-header h3 { font-size: 16px; font-weight: 600; margin: 0; flex: 2; }
.date-location { display: flex; flex-direction: column; align-items: flex-end; flex: 1; font-size: 14px; text-align: right; }
.date { color: #4361ee; font-weight: 500; }
.company, .institution, .technologies, .issuer { color: #4a5568; font-style: italic; font-size: 13px; }
.item-description { margin-top: 0.25rem; }
.item-description p { margin: 0; font-size: 14px; color: #4a5568; text-align: justify; }

.project-link, .certificate-link { margin-top: 0.5rem; font-size: 13px; }
.project-link a, .certificate-link a { color: #4361ee; text-decoration: none; }

.skills-container { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.skill-tag {
  background: #e0e7ff;
  color: #4338ca;
  padding: 0.35rem 0.75rem;
  border-radius: 16px;
  font-size: 13px;
  font-weight: 500;
}

@page { size: A4; margin: 15mm; }

@media screen and (max-width: 992px) {
  .resume-content.two-columns { grid-template-columns: 1fr; gap: 1.5rem; }
  .item-header { flex-direction: column; align-items: flex-start; }
  .date-location { align-items: flex-start; text-align: left; margin-top: 0.25rem; }
  .contact-info { flex-direction: column; align-items: center; gap: 0.5rem; }
}

@media print {
  body, html { width: 210mm; height: 297mm; margin: 0; padding: 0; }
  .resume-preview { padding: 0; background: white; }
  .resume-a4-template {
    width: 100%;
    height: 100%;
    box-shadow: none;
    padding: 15mm;
    margin: 0;
    color: #000 !important;
    -webkit-print-color-adjust: exact;
    print-color-adjust: exact;
  }
  .resume-content.two-columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
  .resume-section, .experience-item, .education-item, .project-item, .certificate-item, .achievement-item {
    page-break-inside: avoid;
  }
  .resume-section:not(:first-child) { page-break-before: avoid; }
  .section-header h2, .item-header h3, .professional-title, .date { color: #000 !important; }
  .company, .institution, .technologies, .issuer { color: #666 !important; }
  .skill-tag { background: #f0f0f0 !important; color: #000 !important; border: 1px solid #ccc; }
  .project-link a, .certificate-link a, .links-inline a { color: #000 !important; text-decoration: underline; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::{five_section_record, full_record, sparse_record};
    use crate::render::layout;

    fn render(record: &ResumeRecord) -> String {
        let presence = SectionPresence::of(record);
        render_document(record, presence, layout::two_column(presence))
    }

    /// Splits a rendered document into (left column, right column) bodies.
    fn columns(document: &str) -> (String, String) {
        let parts: Vec<&str> = document.split("<div class=\"content-column\">").collect();
        assert_eq!(parts.len(), 3, "both column containers must always exist");
        (parts[1].to_string(), parts[2].to_string())
    }

    #[test]
    fn test_builder_escapes_text() {
        let mut m = Markup::new();
        m.element("p", "<script>alert('x')</script> & more");
        let html = m.into_string();
        assert!(!html.contains("<script>"), "raw tags must not survive");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp; more"));
    }

    #[test]
    fn test_builder_escapes_href() {
        let mut m = Markup::new();
        m.anchor("https://example.com/?a=\"b\"", "Profile");
        let html = m.into_string();
        assert!(!html.contains("=\"b\"\""), "quote must not close the attribute");
        assert!(html.contains("&quot;b&quot;"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let record = full_record();
        assert_eq!(render(&record), render(&record));
    }

    #[test]
    fn test_two_column_class_follows_layout_decision() {
        // The stylesheet always mentions `.two-columns`; only the content
        // container's class attribute reflects the layout decision.
        let dense = render(&full_record());
        assert!(dense.contains("class=\"resume-content two-columns\""));

        let sparse = render(&sparse_record());
        assert!(!sparse.contains("class=\"resume-content two-columns\""));
        assert!(sparse.contains("class=\"resume-content\""));
    }

    #[test]
    fn test_title_line_omitted_when_blank() {
        let mut record = full_record();
        record.personal_info.title = String::new();
        assert!(!render(&record).contains("class=\"professional-title\""));

        record.personal_info.title = "Staff Engineer".to_string();
        assert!(render(&record).contains("class=\"professional-title\""));
    }

    #[test]
    fn test_malicious_name_cannot_break_structure() {
        let mut record = full_record();
        record.personal_info.name = "</div><script>steal()</script>".to_string();
        let html = render(&record);
        assert!(!html.contains("<script>steal()"));
        assert!(html.contains("&lt;script&gt;steal()&lt;/script&gt;"));
    }

    #[test]
    fn test_sparse_record_scenario() {
        // Summary + skills only: single column, no links line, left column
        // has Summary then Skills, right column stays empty.
        let html = render(&sparse_record());
        assert!(!html.contains("class=\"resume-content two-columns\""));
        assert!(!html.contains("class=\"contact-item links-inline\""));

        let (left, right) = columns(&html);
        let summary_at = left.find("Professional Summary").expect("summary in left column");
        let skills_at = left.find("Skills").expect("skills in left column");
        assert!(summary_at < skills_at, "Summary must precede Skills");
        assert!(left.contains("Go"));
        assert!(left.contains("SQL"));
        assert!(
            !right.contains("resume-section"),
            "right column must contain no section markup"
        );
    }

    #[test]
    fn test_five_section_scenario() {
        // Experience, Education, Skills, Projects, Certificates: two columns,
        // Experience/Projects/Skills on the left, Education/Certificates on
        // the right.
        let html = render(&five_section_record());
        assert!(html.contains("class=\"resume-content two-columns\""));

        let (left, right) = columns(&html);
        for heading in ["Work Experience", "Projects", "Skills"] {
            assert!(left.contains(heading), "{heading} belongs in the left column");
            assert!(!right.contains(heading), "{heading} must not leak right");
        }
        for heading in ["Education", "Certifications"] {
            assert!(right.contains(heading), "{heading} belongs in the right column");
            assert!(!left.contains(heading), "{heading} must not leak left");
        }
    }

    #[test]
    fn test_each_present_section_rendered_exactly_once() {
        let html = render(&full_record());
        for heading in [
            "Professional Summary",
            "Work Experience",
            "Projects",
            "Education",
            "Certifications",
            "Achievements",
        ] {
            let occurrences = html.matches(&format!("<h2>{heading}</h2>")).count();
            assert_eq!(occurrences, 1, "{heading} must appear exactly once");
        }
    }

    #[test]
    fn test_empty_sections_emit_no_markup() {
        let mut record = full_record();
        record.projects.clear();
        record.achievements.clear();
        let html = render(&record);
        assert!(!html.contains("<h2>Projects</h2>"));
        assert!(!html.contains("<h2>Achievements</h2>"));
    }
}
