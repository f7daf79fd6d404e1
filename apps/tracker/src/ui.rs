use askama::Template;

use crate::tracker::grouping::DateGroup;
use crate::tracker::trend::TrendChart;

/// The single tracker page: form, applications by date, trend chart.
#[derive(Template)]
#[template(path = "index.html")]
pub struct TrackerPage {
    pub company: String,
    pub job_description: String,
    /// Inline validation message; empty when there is none.
    pub error: String,
    pub saved: bool,
    pub groups: Vec<DateGroup>,
    pub chart: TrendChart,
}
