use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::application::ApplicationRecord;

/// All applications sent on one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub label: String,
    pub count: usize,
    pub applications: Vec<ApplicationRecord>,
}

impl DateGroup {
    /// Header shown on the collapsible section.
    pub fn heading(&self) -> String {
        format!("📅 {} ({} application(s))", self.label, self.count)
    }
}

/// Partitions `records` by `date_applied`, oldest day first.
/// Rows keep their table order inside a group.
pub fn group_by_date(records: &[ApplicationRecord]) -> Vec<DateGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<ApplicationRecord>> = BTreeMap::new();
    for record in records {
        by_date
            .entry(record.date_applied)
            .or_default()
            .push(record.clone());
    }

    by_date
        .into_iter()
        .map(|(date, applications)| DateGroup {
            date,
            label: format_fancy_date(date),
            count: applications.len(),
            applications,
        })
        .collect()
}

/// "28th March 2025".
pub fn format_fancy_date(date: NaiveDate) -> String {
    let day = date.day();
    format!("{day}{} {}", ordinal_suffix(day), date.format("%B %Y"))
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn record(company: &str, date: NaiveDate, hour: u32) -> ApplicationRecord {
        ApplicationRecord {
            company: company.to_string(),
            job_description: "JD".to_string(),
            date_applied: date,
            time_applied: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            resume_file: format!("Jane Doe - {company} - CV.pdf"),
        }
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_ordinal_suffixes() {
        let expected = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (31, "st"),
        ];
        for (day, suffix) in expected {
            let formatted = format_fancy_date(march(day));
            assert!(
                formatted.starts_with(&format!("{day}{suffix} ")),
                "day {day} formatted as {formatted}"
            );
        }
    }

    #[test]
    fn test_fancy_date_full_format() {
        assert_eq!(format_fancy_date(march(28)), "28th March 2025");
        assert_eq!(
            format_fancy_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            "1st January 2024"
        );
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_date(&[]).is_empty());
    }

    #[test]
    fn test_groups_sorted_and_ignore_time() {
        let records = vec![
            record("Globex", march(29), 9),
            record("Acme", march(28), 17),
            record("Initech", march(29), 8),
            record("Hooli", march(28), 10),
        ];
        let groups = group_by_date(&records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, march(28));
        assert_eq!(groups[0].label, "28th March 2025");
        let companies: Vec<_> = groups[1]
            .applications
            .iter()
            .map(|a| a.company.as_str())
            .collect();
        assert_eq!(companies, vec!["Globex", "Initech"], "table order kept within a day");
    }

    #[test]
    fn test_grouping_is_exhaustive_and_disjoint() {
        let records: Vec<_> = (0..20)
            .map(|i| record(&format!("Co{i}"), march(1 + (i * 7) % 5), i % 24))
            .collect();
        let groups = group_by_date(&records);

        let total: usize = groups.iter().map(|g| g.count).sum();
        assert_eq!(total, records.len());
        for group in &groups {
            assert_eq!(group.count, group.applications.len());
            assert!(group.applications.iter().all(|a| a.date_applied == group.date));
        }
        let mut dates: Vec<_> = groups.iter().map(|g| g.date).collect();
        dates.dedup();
        assert_eq!(dates.len(), groups.len(), "one group per date");
    }

    #[test]
    fn test_heading_text() {
        let groups = group_by_date(&[record("Acme", march(2), 9)]);
        assert_eq!(groups[0].heading(), "📅 2nd March 2025 (1 application(s))");
    }
}
