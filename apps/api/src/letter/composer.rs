//! Cover Letter Composer — resolves the applicant, application, job,
//! artifact, and ordered sections, then assembles the letter from fixed
//! blocks. Every resolution step is a hard precondition: a missing entity
//! aborts the whole composition with a `NotFound` naming it.

use chrono::Local;

use crate::errors::AppError;
use crate::letter::source::LetterSource;
use crate::models::artifact::SectionRow;
use crate::models::tracker::{ApplicationRow, JobRow};
use crate::models::user::UserRow;

pub const DEFAULT_CONTACT: &str = "Hiring Manager";
const DATE_FORMAT: &str = "%B %d, %Y";

/// Composes the cover letter markdown for `username` and `application_id`.
/// The caller is responsible for persisting the result.
pub async fn compose(
    source: &dyn LetterSource,
    username: &str,
    application_id: i32,
) -> Result<String, AppError> {
    let user = source
        .user_by_username(username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with username {username} not found")))?;

    let application = source.application_by_id(application_id).await?.ok_or_else(|| {
        AppError::NotFound(format!("Application with id {application_id} not found"))
    })?;

    let job = source.job_by_id(application.job_id).await?.ok_or_else(|| {
        AppError::NotFound(format!("Job with id {} not found", application.job_id))
    })?;

    let artifact = source
        .cover_letter_artifact(application_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Cover letter artifact for application id {application_id} not found"
            ))
        })?;

    let sections = source.ordered_sections(artifact.id).await?;
    if sections.is_empty() {
        return Err(AppError::NotFound(format!(
            "No sections found for cover letter artifact id {}",
            artifact.id
        )));
    }

    let date_line = Local::now().format(DATE_FORMAT).to_string();
    Ok(assemble(&user, &job, &application, &sections, &date_line))
}

/// Pure block assembly given already-resolved rows and a formatted date.
/// Blocks are joined with a blank line; a block that is entirely blank
/// after trimming is omitted.
pub(crate) fn assemble(
    user: &UserRow,
    job: &JobRow,
    application: &ApplicationRow,
    sections: &[SectionRow],
    date_line: &str,
) -> String {
    let contact = application
        .contact
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CONTACT);

    // Sender block: single newlines inside, markdown hard line breaks so
    // pandoc keeps the address on separate lines.
    let mut sender_lines = vec![user.full_name.clone()];
    if let Some(address) = present(user.address.as_deref()) {
        sender_lines.push(address.to_string());
    }
    let locality = locality_line(
        user.city.as_deref(),
        user.state.as_deref(),
        user.postal_code.as_deref(),
    );
    if !locality.is_empty() {
        sender_lines.push(locality);
    }
    if let Some(phone) = present(user.phone.as_deref()) {
        sender_lines.push(phone.to_string());
    }
    let sender_block = join_address_block(&sender_lines);

    let mut recipient_lines = vec![contact.to_string()];
    if !job.company.trim().is_empty() {
        recipient_lines.push(job.company.trim().to_string());
    }
    if let Some(contact_address) = present(application.contact_address.as_deref()) {
        recipient_lines.push(contact_address.to_string());
    }
    let recipient_block = join_address_block(&recipient_lines);

    // Body: each section's trimmed content as its own paragraph, then the
    // closing-appeal paragraphs when their source fields are present.
    let mut paragraphs: Vec<String> = sections
        .iter()
        .map(|s| s.content.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    if let Some(skills) = present(job.required_skills.as_deref()) {
        paragraphs.push(format!(
            "In particular, I believe my experience with {skills} would allow me to make an \
             immediate contribution to your team."
        ));
    }
    if !job.title.trim().is_empty() && !job.company.trim().is_empty() {
        paragraphs.push(format!(
            "I am confident that my years of experience make me a strong candidate for the {} \
             role at {}.",
            job.title.trim(),
            job.company.trim()
        ));
    }

    let closing_block = join_address_block(&[
        "Sincerely,".to_string(),
        user.full_name.clone(),
        user.email.clone(),
    ]);

    let blocks = [
        sender_block,
        date_line.to_string(),
        recipient_block,
        format!("Dear {contact},"),
        paragraphs.join("\n\n"),
        closing_block,
    ];

    blocks
        .iter()
        .filter(|b| !b.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `City, ST 12345` from whichever parts exist.
fn locality_line(city: Option<&str>, state: Option<&str>, postal_code: Option<&str>) -> String {
    let region = [state, postal_code]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    match (present(city), region.is_empty()) {
        (Some(city), true) => city.to_string(),
        (Some(city), false) => format!("{city}, {region}"),
        (None, _) => region,
    }
}

/// Joins lines with markdown hard line breaks (trailing double space) so a
/// multi-line address stays one paragraph through pandoc.
fn join_address_block(lines: &[String]) -> String {
    let kept: Vec<String> = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| format!("{l}  "))
        .collect();
    match kept.split_last() {
        // no hard break needed after the block's final line
        Some((last, rest)) => {
            let mut out: Vec<String> = rest.to_vec();
            out.push(last.trim_end().to_string());
            out.join("\n")
        }
        None => String::new(),
    }
}
