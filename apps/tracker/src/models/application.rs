use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Header row of the applications table, in file order.
pub const COLUMNS: [&str; 5] = [
    "Company",
    "Job Description",
    "Date Applied",
    "Time Applied",
    "Resume File",
];

/// One row of the applications table.
///
/// Field names map onto the CSV header; the same names are used in JSON
/// responses so the API mirrors the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Job Description")]
    pub job_description: String,
    #[serde(rename = "Date Applied")]
    pub date_applied: NaiveDate,
    #[serde(rename = "Time Applied")]
    pub time_applied: NaiveTime,
    #[serde(rename = "Resume File")]
    pub resume_file: String,
}

/// Filename a resume is stored under: `"<applicant> - <company> - CV.pdf"`.
///
/// Deterministic per company, so a second application to the same company
/// replaces the earlier file. Path separators are flattened so the file
/// always lands directly inside the resume folder.
pub fn resume_file_name(applicant_name: &str, company: &str) -> String {
    let company: String = company
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    format!("{applicant_name} - {company} - CV.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_file_name_format() {
        assert_eq!(
            resume_file_name("Jane Doe", "Acme"),
            "Jane Doe - Acme - CV.pdf"
        );
    }

    #[test]
    fn test_resume_file_name_keeps_spaces_and_punctuation() {
        assert_eq!(
            resume_file_name("Jane Doe", "Acme, Inc."),
            "Jane Doe - Acme, Inc. - CV.pdf"
        );
    }

    #[test]
    fn test_resume_file_name_flattens_path_separators() {
        let name = resume_file_name("Jane Doe", "../etc/passwd");
        assert!(!name.contains('/'));
        assert_eq!(name, "Jane Doe - ..-etc-passwd - CV.pdf");
    }

    #[test]
    fn test_record_json_uses_column_names() {
        let record = ApplicationRecord {
            company: "Acme".to_string(),
            job_description: "Build widgets".to_string(),
            date_applied: NaiveDate::from_ymd_opt(2025, 3, 28).unwrap(),
            time_applied: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
            resume_file: "Jane Doe - Acme - CV.pdf".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Company"], "Acme");
        assert_eq!(value["Date Applied"], "2025-03-28");
        assert_eq!(value["Time Applied"], "09:15:00");
    }
}
