//! Application submission: required-field checks, then resume write and row append.

use std::path::Path;

use bytes::Bytes;
use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;
use tracing::info;

use crate::models::application::ApplicationRecord;
use crate::store::{RecordStore, StoreError};

/// Resume extensions the form accepts.
pub const RESUME_EXTENSIONS: [&str; 2] = ["pdf", "docx"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please complete all fields including uploading a resume.")]
    Incomplete,

    #[error("Resume must be a .pdf or .docx file (got '{0}').")]
    UnsupportedResume(String),
}

/// An uploaded resume as received from the form.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Raw form contents. Any field may be missing or blank.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub company: String,
    pub job_description: String,
    pub resume: Option<ResumeUpload>,
}

/// A form that passed validation.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub company: String,
    pub job_description: String,
    pub resume: Bytes,
}

impl ApplicationForm {
    pub fn validate(self) -> Result<NewApplication, FormError> {
        let resume = self
            .resume
            .filter(|r| !r.file_name.trim().is_empty() && !r.bytes.is_empty());

        let (company, job_description, resume) = match resume {
            Some(resume)
                if !self.company.trim().is_empty() && !self.job_description.trim().is_empty() =>
            {
                (self.company, self.job_description, resume)
            }
            _ => return Err(FormError::Incomplete),
        };

        let extension = Path::new(&resume.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !RESUME_EXTENSIONS.contains(&extension.as_str()) {
            return Err(FormError::UnsupportedResume(resume.file_name));
        }

        Ok(NewApplication {
            company,
            job_description,
            resume: resume.bytes,
        })
    }
}

/// Saves the resume, then appends and persists the row stamped with `now`.
///
/// Not transactional: if the table write fails the resume file stays behind.
pub fn submit(
    store: &mut RecordStore,
    application: NewApplication,
    now: NaiveDateTime,
) -> Result<ApplicationRecord, StoreError> {
    let resume_file = store.save_resume_file(&application.company, &application.resume)?;

    let record = ApplicationRecord {
        company: application.company,
        job_description: application.job_description,
        date_applied: now.date(),
        time_applied: now.time().with_nanosecond(0).unwrap_or_else(|| now.time()),
        resume_file,
    };
    store.append_and_persist(record.clone())?;

    info!(
        "Recorded application to {} on {}",
        record.company, record.date_applied
    );
    Ok(record)
}
