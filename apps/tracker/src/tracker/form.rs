use axum::extract::Multipart;

use crate::errors::AppError;
use crate::tracker::submission::{ApplicationForm, ResumeUpload};

pub const FIELD_COMPANY: &str = "company";
pub const FIELD_JOB_DESCRIPTION: &str = "job_description";
pub const FIELD_RESUME: &str = "resume";

/// Reads the application form out of a multipart body.
///
/// Missing parts are left blank for `ApplicationForm::validate` to reject;
/// only a malformed body is an error here. Unknown parts are drained.
pub async fn read_application_form(mut multipart: Multipart) -> Result<ApplicationForm, AppError> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            FIELD_COMPANY => {
                form.company = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable company field: {e}")))?;
            }
            FIELD_JOB_DESCRIPTION => {
                form.job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable job description field: {e}"))
                })?;
            }
            FIELD_RESUME => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable resume upload: {e}")))?;
                form.resume = Some(ResumeUpload { file_name, bytes });
            }
            _ => {
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?;
            }
        }
    }

    Ok(form)
}
