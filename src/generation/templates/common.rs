//! Section builders shared by the CV templates.
//!
//! A template chooses a [`Palette`] and the order of sections; the functions here turn
//! the payload into blocks with that palette.

use crate::generation::composer::{
    Align, BlockKind, ComposedDocument, FontStyle, TextStyle,
};
use crate::generation::language::Language;

use super::data::{present, CvTemplateData};

/// Section titles in one language.
#[derive(Debug, Clone, Copy)]
pub struct SectionLabels {
    pub objective: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    pub languages: &'static str,
    pub certificates: &'static str,
    pub references: &'static str,
    pub present: &'static str,
}

const TURKISH_LABELS: SectionLabels = SectionLabels {
    objective: "Kariyer Hedefi",
    experience: "İş Deneyimi",
    education: "Eğitim",
    skills: "Yetenekler",
    languages: "Yabancı Diller",
    certificates: "Sertifikalar",
    references: "Referanslar",
    present: "Devam ediyor",
};

const ENGLISH_LABELS: SectionLabels = SectionLabels {
    objective: "Objective",
    experience: "Work Experience",
    education: "Education",
    skills: "Skills",
    languages: "Languages",
    certificates: "Certificates",
    references: "References",
    present: "Present",
};

impl SectionLabels {
    pub fn for_language(language: Language) -> &'static SectionLabels {
        match language {
            Language::Turkish => &TURKISH_LABELS,
            Language::English => &ENGLISH_LABELS,
        }
    }
}

/// Text styles a template uses for each kind of line.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub name: TextStyle,
    pub title: TextStyle,
    pub contact: TextStyle,
    pub section: TextStyle,
    pub entry: TextStyle,
    pub meta: TextStyle,
    pub body: TextStyle,
    pub uppercase_sections: bool,
    pub rule_under_sections: bool,
    pub contact_separator: &'static str,
}

impl Palette {
    /// Centered name over a centered contact line.
    pub fn centered(name_size: f32, body_size: f32) -> Self {
        Self {
            name: TextStyle::new(FontStyle::Bold, name_size).align(Align::Center),
            title: TextStyle::new(FontStyle::Italic, body_size + 1.0).align(Align::Center),
            contact: TextStyle::new(FontStyle::Regular, body_size - 1.0).align(Align::Center),
            section: TextStyle::new(FontStyle::Bold, body_size + 2.0),
            entry: TextStyle::new(FontStyle::Bold, body_size),
            meta: TextStyle::new(FontStyle::Italic, body_size - 1.0),
            body: TextStyle::new(FontStyle::Regular, body_size).line_gap(2.0),
            uppercase_sections: false,
            rule_under_sections: false,
            contact_separator: " | ",
        }
    }

    /// Everything flush left.
    pub fn left(name_size: f32, body_size: f32) -> Self {
        Self {
            name: TextStyle::new(FontStyle::Bold, name_size),
            title: TextStyle::new(FontStyle::Regular, body_size + 1.0),
            contact: TextStyle::new(FontStyle::Regular, body_size - 1.0),
            ..Self::centered(name_size, body_size)
        }
    }

    pub fn uppercase_sections(mut self) -> Self {
        self.uppercase_sections = true;
        self
    }

    pub fn rule_under_sections(mut self) -> Self {
        self.rule_under_sections = true;
        self
    }

    pub fn contact_separator(mut self, separator: &'static str) -> Self {
        self.contact_separator = separator;
        self
    }

    pub fn justify_body(mut self) -> Self {
        self.body = self.body.align(Align::Justify);
        self
    }
}

/// Sections a template can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Objective,
    Experience,
    Education,
    Skills,
    Languages,
    Certificates,
    References,
}

pub fn document_title(data: &CvTemplateData) -> String {
    format!("{} - CV", data.personal_info.full_name.trim())
}

/// Name, optional title and the contact line.
pub fn push_header(doc: &mut ComposedDocument, data: &CvTemplateData, palette: &Palette) {
    let info = &data.personal_info;
    doc.text(BlockKind::Heading, info.full_name.trim(), palette.name);
    if let Some(title) = present(&info.title) {
        doc.text(BlockKind::Subheading, title, palette.title);
    }

    let contact = contact_line(data, palette.contact_separator);
    if !contact.is_empty() {
        doc.text(BlockKind::Byline, contact, palette.contact);
    }
    doc.space(1.0);
}

pub fn contact_line(data: &CvTemplateData, separator: &str) -> String {
    let info = &data.personal_info;
    let location = match (present(&info.address), present(&info.city)) {
        (Some(address), Some(city)) => Some(format!("{}, {}", address, city)),
        (Some(address), None) => Some(address.to_string()),
        (None, Some(city)) => Some(city.to_string()),
        (None, None) => None,
    };

    [
        present(&info.email).map(str::to_string),
        present(&info.phone).map(str::to_string),
        location,
        present(&info.linkedin).map(str::to_string),
        present(&info.website).map(str::to_string),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(separator)
}

/// `start - end`, with the "present" label for a current job.
pub fn date_range(
    start: Option<&str>,
    end: Option<&str>,
    is_current: bool,
    labels: &SectionLabels,
) -> Option<String> {
    let end = if is_current { Some(labels.present) } else { end };
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{} - {}", start, end)),
        (Some(start), None) => Some(start.to_string()),
        (None, Some(end)) => Some(end.to_string()),
        (None, None) => None,
    }
}

fn section_heading(
    doc: &mut ComposedDocument,
    label: &str,
    palette: &Palette,
) {
    let text = if palette.uppercase_sections {
        label.to_uppercase()
    } else {
        label.to_string()
    };
    doc.text(BlockKind::Subheading, text, palette.section);
    if palette.rule_under_sections {
        doc.rule();
    }
}

/// Emit the given sections in order, skipping the empty ones.
pub fn push_sections(
    doc: &mut ComposedDocument,
    data: &CvTemplateData,
    sections: &[Section],
    labels: &SectionLabels,
    palette: &Palette,
) {
    for section in sections {
        let written = match section {
            Section::Objective => push_objective(doc, data, labels, palette),
            Section::Experience => push_experience(doc, data, labels, palette),
            Section::Education => push_education(doc, data, labels, palette),
            Section::Skills => push_skills(doc, data, labels, palette),
            Section::Languages => push_languages(doc, data, labels, palette),
            Section::Certificates => push_certificates(doc, data, labels, palette),
            Section::References => push_references(doc, data, labels, palette),
        };
        if written {
            doc.space(0.8);
        }
    }
}

fn push_objective(
    doc: &mut ComposedDocument,
    data: &CvTemplateData,
    labels: &SectionLabels,
    palette: &Palette,
) -> bool {
    let Some(objective) = present(&data.objective) else {
        return false;
    };
    section_heading(doc, labels.objective, palette);
    doc.text(BlockKind::Paragraph, objective, palette.body);
    true
}

fn push_experience(
    doc: &mut ComposedDocument,
    data: &CvTemplateData,
    labels: &SectionLabels,
    palette: &Palette,
) -> bool {
    if data.experience.is_empty() {
        return false;
    }
    section_heading(doc, labels.experience, palette);

    for job in &data.experience {
        doc.text(
            BlockKind::Paragraph,
            format!("{} - {}", job.job_title.trim(), job.company.trim()),
            palette.entry,
        );

        let dates = date_range(
            present(&job.start_date),
            present(&job.end_date),
            job.is_current,
            labels,
        );
        let meta: Vec<String> = [dates, present(&job.location).map(str::to_string)]
            .into_iter()
            .flatten()
            .collect();
        if !meta.is_empty() {
            doc.text(BlockKind::Byline, meta.join(" | "), palette.meta);
        }
        if let Some(description) = present(&job.description) {
            doc.text(BlockKind::Paragraph, description, palette.body);
        }
        doc.space(0.4);
    }
    true
}

fn push_education(
    doc: &mut ComposedDocument,
    data: &CvTemplateData,
    labels: &SectionLabels,
    palette: &Palette,
) -> bool {
    if data.education.is_empty() {
        return false;
    }
    section_heading(doc, labels.education, palette);

    for school in &data.education {
        doc.text(
            BlockKind::Paragraph,
            format!("{} - {}", school.degree.trim(), school.school.trim()),
            palette.entry,
        );
        let meta: Vec<&str> = [present(&school.graduation_date), present(&school.location)]
            .into_iter()
            .flatten()
            .collect();
        if !meta.is_empty() {
            doc.text(BlockKind::Byline, meta.join(" | "), palette.meta);
        }
        if let Some(details) = present(&school.details) {
            doc.text(BlockKind::Paragraph, details, palette.body);
        }
        doc.space(0.4);
    }
    true
}

fn push_skills(
    doc: &mut ComposedDocument,
    data: &CvTemplateData,
    labels: &SectionLabels,
    palette: &Palette,
) -> bool {
    let skills: Vec<&str> = data
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        return false;
    }
    section_heading(doc, labels.skills, palette);
    doc.text(BlockKind::Paragraph, skills.join(", "), palette.body);
    true
}

fn push_languages(
    doc: &mut ComposedDocument,
    data: &CvTemplateData,
    labels: &SectionLabels,
    palette: &Palette,
) -> bool {
    if data.languages.is_empty() {
        return false;
    }
    section_heading(doc, labels.languages, palette);
    for entry in &data.languages {
        let line = match present(&entry.level) {
            Some(level) => format!("{} ({})", entry.language.trim(), level),
            None => entry.language.trim().to_string(),
        };
        doc.text(BlockKind::Paragraph, line, palette.body);
    }
    true
}

fn push_certificates(
    doc: &mut ComposedDocument,
    data: &CvTemplateData,
    labels: &SectionLabels,
    palette: &Palette,
) -> bool {
    if data.certificates.is_empty() {
        return false;
    }
    section_heading(doc, labels.certificates, palette);
    for cert in &data.certificates {
        let extra: Vec<&str> = [present(&cert.issuer), present(&cert.date)]
            .into_iter()
            .flatten()
            .collect();
        let line = if extra.is_empty() {
            cert.name.trim().to_string()
        } else {
            format!("{} - {}", cert.name.trim(), extra.join(", "))
        };
        doc.text(BlockKind::Paragraph, line, palette.body);
    }
    true
}

fn push_references(
    doc: &mut ComposedDocument,
    data: &CvTemplateData,
    labels: &SectionLabels,
    palette: &Palette,
) -> bool {
    if data.references.is_empty() {
        return false;
    }
    section_heading(doc, labels.references, palette);
    for reference in &data.references {
        let extra: Vec<&str> = [present(&reference.company), present(&reference.contact)]
            .into_iter()
            .flatten()
            .collect();
        let line = if extra.is_empty() {
            reference.name.trim().to_string()
        } else {
            format!("{} - {}", reference.name.trim(), extra.join(" | "))
        };
        doc.text(BlockKind::Paragraph, line, palette.body);
    }
    true
}
