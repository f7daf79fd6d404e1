//! Application trend: submissions per day, laid out as an SVG line chart.
//!
//! Counts are raw per-day totals with no smoothing or binning. Days without
//! applications have no point; the line joins the days that do.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::application::ApplicationRecord;

pub const CHART_TITLE: &str = "Jobs Applied Over Time";
pub const X_AXIS_LABEL: &str = "Date";
pub const Y_AXIS_LABEL: &str = "Number of Applications";

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 64.0;
const MAX_Y_TICKS: usize = 5;
const MAX_X_TICKS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub applications: usize,
}

/// Number of applications per distinct `date_applied`, oldest first.
pub fn daily_counts(records: &[ApplicationRecord]) -> Vec<DailyCount> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.date_applied).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(date, applications)| DailyCount { date, applications })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub tooltip: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTick {
    /// Coordinate of the tick along its axis.
    pub position: f64,
    /// Same axis coordinate, nudged for the label baseline.
    pub text_position: f64,
    pub label: String,
}

/// Pre-computed geometry for the trend chart, in SVG user units.
#[derive(Debug, Clone, Serialize)]
pub struct TrendChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub points: Vec<ChartPoint>,
    /// `points` attribute for the `<polyline>`.
    pub polyline: String,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

impl TrendChart {
    pub fn from_records(records: &[ApplicationRecord]) -> Self {
        Self::from_counts(&daily_counts(records))
    }

    pub fn from_counts(counts: &[DailyCount]) -> Self {
        let left = MARGIN_LEFT;
        let right = WIDTH - MARGIN_RIGHT;
        let top = MARGIN_TOP;
        let bottom = HEIGHT - MARGIN_BOTTOM;

        let peak = counts.iter().map(|c| c.applications).max().unwrap_or(0).max(1);
        let step = peak.div_ceil(MAX_Y_TICKS).max(1);
        let axis_max = peak.div_ceil(step) * step;
        let y_at = |count: usize| bottom - (bottom - top) * count as f64 / axis_max as f64;

        // x is proportional to days elapsed since the first point.
        let first = counts.first().map(|c| c.date);
        let span_days = match (counts.first(), counts.last()) {
            (Some(a), Some(b)) => (b.date - a.date).num_days(),
            _ => 0,
        };
        let x_at = |date: NaiveDate| match first {
            Some(first) if span_days > 0 => {
                left + (right - left) * (date - first).num_days() as f64 / span_days as f64
            }
            _ => (left + right) / 2.0,
        };

        let points: Vec<ChartPoint> = counts
            .iter()
            .map(|c| ChartPoint {
                date: c.date,
                count: c.applications,
                x: round1(x_at(c.date)),
                y: round1(y_at(c.applications)),
                tooltip: format!("{}: {} application(s)", c.date, c.applications),
            })
            .collect();

        let polyline = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        let stride = points.len().div_ceil(MAX_X_TICKS).max(1);
        let x_ticks = points
            .iter()
            .step_by(stride)
            .map(|p| AxisTick {
                position: p.x,
                text_position: p.x,
                label: p.date.format("%b %d").to_string(),
            })
            .collect();

        let y_ticks = (0..=axis_max)
            .step_by(step)
            .map(|value| {
                let position = round1(y_at(value));
                AxisTick {
                    position,
                    text_position: position + 4.0,
                    label: value.to_string(),
                }
            })
            .collect();

        TrendChart {
            title: CHART_TITLE,
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            width: WIDTH,
            height: HEIGHT,
            left,
            right,
            top,
            bottom,
            points,
            polyline,
            x_ticks,
            y_ticks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x_label_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn y_label_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn x_label_y(&self) -> f64 {
        self.height - 12.0
    }

    pub fn x_tick_text_y(&self) -> f64 {
        self.bottom + 20.0
    }

    pub fn y_tick_text_x(&self) -> f64 {
        self.left - 8.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn record(day: u32) -> ApplicationRecord {
        ApplicationRecord {
            company: format!("Co{day}"),
            job_description: "JD".to_string(),
            date_applied: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            time_applied: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            resume_file: "cv.pdf".to_string(),
        }
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_daily_counts_per_distinct_date() {
        let records = vec![record(29), record(28), record(29), record(29)];
        assert_eq!(
            daily_counts(&records),
            vec![
                DailyCount { date: march(28), applications: 1 },
                DailyCount { date: march(29), applications: 3 },
            ]
        );
    }

    #[test]
    fn test_daily_counts_sum_to_rows() {
        let records: Vec<_> = (1..=10).map(|d| record(1 + d % 3)).collect();
        let total: usize = daily_counts(&records).iter().map(|c| c.applications).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_empty_chart_has_no_points() {
        let chart = TrendChart::from_counts(&[]);
        assert!(chart.is_empty());
        assert!(chart.polyline.is_empty());
        assert_eq!(chart.y_ticks.first().map(|t| t.label.as_str()), Some("0"));
    }

    #[test]
    fn test_single_point_is_centred_at_top() {
        let chart = TrendChart::from_counts(&[DailyCount { date: march(28), applications: 1 }]);
        assert_eq!(chart.points.len(), 1);
        let p = &chart.points[0];
        assert_eq!(p.count, 1);
        assert_eq!(p.x, round1((chart.left + chart.right) / 2.0));
        assert_eq!(p.y, chart.top);
    }

    #[test]
    fn test_x_spacing_follows_calendar_days() {
        let chart = TrendChart::from_counts(&[
            DailyCount { date: march(1), applications: 2 },
            DailyCount { date: march(2), applications: 1 },
            DailyCount { date: march(5), applications: 4 },
        ]);
        let xs: Vec<f64> = chart.points.iter().map(|p| p.x).collect();
        assert_eq!(xs[0], chart.left);
        assert_eq!(xs[2], chart.right);
        let quarter = round1(chart.left + (chart.right - chart.left) / 4.0);
        assert_eq!(xs[1], quarter, "one day out of four");
    }

    #[test]
    fn test_y_axis_starts_at_zero_and_covers_peak() {
        let chart = TrendChart::from_counts(&[
            DailyCount { date: march(1), applications: 7 },
            DailyCount { date: march(2), applications: 3 },
        ]);
        let labels: Vec<_> = chart.y_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "2", "4", "6", "8"]);
        assert_eq!(chart.y_ticks[0].position, chart.bottom);
        assert!(chart.points.iter().all(|p| p.y >= chart.top && p.y <= chart.bottom));
    }

    #[test]
    fn test_polyline_lists_every_point() {
        let chart = TrendChart::from_records(&[record(1), record(2), record(2)]);
        assert_eq!(chart.polyline.split(' ').count(), 2);
    }
}
