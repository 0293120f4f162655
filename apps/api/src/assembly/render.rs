//! Section Renderers — one pure function per resume section kind.
//!
//! Each renderer returns a markdown fragment, or the empty string when
//! nothing in that section survives the filter. Empty string means "omit
//! the section entirely", never "render an empty heading". Experience and
//! project groups are the exception: a group's heading always renders, and
//! a fully filtered bullet list collapses to a single placeholder bullet.

use crate::assembly::resume_data::ResumeData;
use crate::assembly::tag_filter::TagFilterSpec;
use crate::errors::AppError;

pub const NO_MATCH_BULLET: &str = "- (No bullets matched selected tags.)";

/// Normalizes line endings and strips surrounding whitespace before a
/// value lands in markdown.
fn md_escape(s: &str) -> String {
    s.replace("\r\n", "\n").trim().to_string()
}

/// `## Title` plus the horizontal rule every section opens with.
fn section_heading(title: &str) -> Vec<String> {
    vec![
        format!("## {title}"),
        String::new(),
        "----".to_string(),
        "\n".to_string(),
    ]
}

/// Title line, horizontal rule, and an optional contact line joining
/// location/phone/email — only the non-empty ones, in that fixed order.
pub fn render_header(data: &ResumeData) -> String {
    let mut lines = vec![format!("# {}", md_escape(&data.name)).trim().to_string()];
    lines.extend([String::new(), "----".to_string(), "\n".to_string()]);

    let contact: Vec<String> = [&data.location, &data.phone, &data.email]
        .iter()
        .map(|v| md_escape(v))
        .filter(|v| !v.is_empty())
        .collect();
    if !contact.is_empty() {
        lines.push(format!("### {}", contact.join(" * ")));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn render_summary(data: &ResumeData, spec: &TagFilterSpec) -> Result<String, AppError> {
    let mut kept = Vec::new();
    for entry in &data.summary {
        let text = md_escape(&entry.text);
        if !text.is_empty() && spec.keeps(&entry.tags)? {
            kept.push(text);
        }
    }
    if kept.is_empty() {
        return Ok(String::new());
    }

    let mut out = section_heading("Professional Summary");
    for text in kept {
        out.push(String::new());
        out.push(text);
    }
    out.push(String::new());
    Ok(out.join("\n"))
}

pub fn render_certification(data: &ResumeData, spec: &TagFilterSpec) -> Result<String, AppError> {
    let mut kept = Vec::new();
    for entry in &data.certification {
        let header = md_escape(&entry.header);
        if !header.is_empty() && spec.keeps(&entry.tags)? {
            kept.push(format!("**{header}**"));
        }
        let text = md_escape(&entry.text);
        if !text.is_empty() && spec.keeps(&entry.tags)? {
            kept.push(text);
        }
    }
    if kept.is_empty() {
        return Ok(String::new());
    }

    let mut out = section_heading("Certification");
    for text in kept {
        out.push(String::new());
        out.push(text);
    }
    out.push(String::new());
    Ok(out.join("\n"))
}

/// An entry needs both a header and a skill text to count — a partial
/// entry contributes nothing.
pub fn render_skills(data: &ResumeData, spec: &TagFilterSpec) -> Result<String, AppError> {
    let mut kept = Vec::new();
    for entry in &data.skills {
        let header = md_escape(&entry.header);
        let skill = md_escape(&entry.skill);
        if !header.is_empty() && !skill.is_empty() && spec.keeps(&entry.tags)? {
            kept.push(format!("- **{header}** {skill}"));
        }
    }
    if kept.is_empty() {
        return Ok(String::new());
    }

    let mut out = section_heading("Technical Skills");
    out.extend(kept);
    out.push(String::new());
    Ok(out.join("\n"))
}

/// A role's heading always renders once the role exists; only its bullet
/// list is filtered. Zero surviving bullets emit the placeholder bullet
/// instead of dropping the group.
pub fn render_experience(data: &ResumeData, spec: &TagFilterSpec) -> Result<String, AppError> {
    if data.experience.is_empty() {
        return Ok(String::new());
    }

    let mut out = section_heading("Professional Experience");
    for role in &data.experience {
        let company = md_escape(&role.company);
        let title = md_escape(&role.title);
        let location = md_escape(&role.location);
        let dates = md_escape(&role.dates);
        out.push(format!("**{company} — {title}**"));
        out.push(String::new());
        out.push(format!("{location} ({dates})"));
        out.push(String::new());

        let mut kept = Vec::new();
        for bullet in &role.bullets {
            let text = md_escape(&bullet.text);
            if !text.is_empty() && spec.keeps(&bullet.tags)? {
                kept.push(format!("- {text}"));
            }
        }
        if kept.is_empty() {
            out.push(NO_MATCH_BULLET.to_string());
        } else {
            out.extend(kept);
        }
        out.push(String::new());
    }
    Ok(out.join("\n"))
}

pub fn render_projects(data: &ResumeData, spec: &TagFilterSpec) -> Result<String, AppError> {
    if data.projects.is_empty() {
        return Ok(String::new());
    }

    let mut out = section_heading("Projects");
    for project in &data.projects {
        let name = md_escape(&project.name);
        let dates = md_escape(&project.dates);
        out.push(format!("**{name}** ({dates})"));
        out.push(String::new());

        let mut kept = Vec::new();
        for bullet in &project.bullets {
            let text = md_escape(&bullet.text);
            if !text.is_empty() && spec.keeps(&bullet.tags)? {
                kept.push(format!("- {text}"));
            }
        }
        if kept.is_empty() {
            out.push(NO_MATCH_BULLET.to_string());
        } else {
            out.extend(kept);
        }
        out.push(String::new());
    }
    Ok(out.join("\n"))
}

/// Education is never filtered.
pub fn render_education(data: &ResumeData) -> String {
    if data.education.is_empty() {
        return String::new();
    }

    let mut out = section_heading("Education");
    for entry in &data.education {
        let parts: Vec<String> = [&entry.school, &entry.detail, &entry.year]
            .iter()
            .map(|p| md_escape(p))
            .filter(|p| !p.is_empty())
            .collect();
        out.push(format!("- {}", parts.join(", ")));
    }
    out.push(String::new());
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::resume_data::{
        EducationEntry, ExperienceEntry, SkillEntry, TextEntry,
    };
    use std::collections::BTreeSet;

    fn tags(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn spec_including(values: &[&str]) -> TagFilterSpec {
        TagFilterSpec::from_raw(&values.join(","), "", "any").unwrap()
    }

    fn unfiltered() -> TagFilterSpec {
        TagFilterSpec::from_raw("", "", "any").unwrap()
    }

    #[test]
    fn test_header_joins_present_contact_parts_in_order() {
        let data = ResumeData {
            name: "Jane Doe".to_string(),
            location: "Springfield".to_string(),
            email: "jane@example.com".to_string(),
            ..Default::default()
        };
        let out = render_header(&data);
        assert!(out.starts_with("# Jane Doe\n"));
        assert!(out.contains("### Springfield * jane@example.com"));
    }

    #[test]
    fn test_header_omits_contact_line_when_all_empty() {
        let data = ResumeData {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };
        assert!(!render_header(&data).contains("###"));
    }

    #[test]
    fn test_summary_omitted_when_nothing_survives() {
        let data = ResumeData {
            summary: vec![TextEntry {
                text: "Cloud work.".to_string(),
                tags: tags(&["devops"]),
            }],
            ..Default::default()
        };
        let out = render_summary(&data, &spec_including(&["security"])).unwrap();
        assert_eq!(out, "", "Section must be omitted entirely, not render an empty heading");
    }

    #[test]
    fn test_summary_fragments_render_as_paragraphs() {
        let data = ResumeData {
            summary: vec![
                TextEntry {
                    text: "First.".to_string(),
                    tags: BTreeSet::new(),
                },
                TextEntry {
                    text: "Second.".to_string(),
                    tags: BTreeSet::new(),
                },
            ],
            ..Default::default()
        };
        let out = render_summary(&data, &unfiltered()).unwrap();
        assert!(out.contains("## Professional Summary"));
        assert!(out.contains("First."));
        assert!(out.contains("Second."));
    }

    #[test]
    fn test_partial_skill_entry_contributes_nothing() {
        let data = ResumeData {
            skills: vec![
                SkillEntry {
                    header: "Languages".to_string(),
                    skill: String::new(),
                    tags: BTreeSet::new(),
                },
                SkillEntry {
                    header: "Tools".to_string(),
                    skill: "Terraform, Ansible".to_string(),
                    tags: BTreeSet::new(),
                },
            ],
            ..Default::default()
        };
        let out = render_skills(&data, &unfiltered()).unwrap();
        assert!(!out.contains("Languages"));
        assert!(out.contains("- **Tools** Terraform, Ansible"));
    }

    #[test]
    fn test_skills_omitted_when_no_entry_survives() {
        let data = ResumeData {
            skills: vec![SkillEntry {
                header: "Tools".to_string(),
                skill: "Terraform".to_string(),
                tags: tags(&["devops"]),
            }],
            ..Default::default()
        };
        let out = render_skills(&data, &spec_including(&["security"])).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_experience_heading_survives_full_filtering() {
        let data = ResumeData {
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                location: "Remote".to_string(),
                dates: "2020 - 2023".to_string(),
                bullets: vec![TextEntry {
                    text: "Shipped X".to_string(),
                    tags: tags(&["devops"]),
                }],
            }],
            ..Default::default()
        };
        let out = render_experience(&data, &spec_including(&["security"])).unwrap();
        assert!(out.contains("**Acme — Engineer**"));
        assert!(out.contains(NO_MATCH_BULLET));
        assert!(!out.contains("Shipped X"));
    }

    #[test]
    fn test_experience_bullets_render_when_matched() {
        let data = ResumeData {
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                bullets: vec![TextEntry {
                    text: "Shipped X".to_string(),
                    tags: tags(&["devops"]),
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        let out = render_experience(&data, &spec_including(&["devops"])).unwrap();
        assert!(out.contains("- Shipped X"));
        assert!(!out.contains(NO_MATCH_BULLET));
    }

    #[test]
    fn test_education_never_filtered_and_joins_present_parts() {
        let data = ResumeData {
            education: vec![
                EducationEntry {
                    school: "State University".to_string(),
                    detail: "BSc Computer Science".to_string(),
                    year: "2016".to_string(),
                },
                EducationEntry {
                    school: "Trade School".to_string(),
                    detail: String::new(),
                    year: String::new(),
                },
            ],
            ..Default::default()
        };
        let out = render_education(&data);
        assert!(out.contains("- State University, BSc Computer Science, 2016"));
        assert!(out.contains("- Trade School\n"));
    }
}
