//! Formats a [`PipelineOutput`] as either a fixed-width text table or JSON.

use astican_solver::PipelineOutput;
use serde::Serialize;

const PROJECT_WIDTH: usize = 12;
const PERIOD_WIDTH: usize = 6;
const LOCATION_WIDTH: usize = 20;
const DATE_WIDTH: usize = 12;

pub fn render_text(output: &PipelineOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<PROJECT_WIDTH$} {:<PERIOD_WIDTH$} {:<LOCATION_WIDTH$} {:<DATE_WIDTH$} {:<DATE_WIDTH$} RESULT_ID\n",
        "PROJECT", "PERIOD", "LOCATION", "START", "END",
    ));

    for row in &output.results {
        out.push_str(&format!(
            "{:<PROJECT_WIDTH$} {:<PERIOD_WIDTH$} {:<LOCATION_WIDTH$} {:<DATE_WIDTH$} {:<DATE_WIDTH$} {}\n",
            row.project_id,
            row.period_id,
            row.location.to_string(),
            row.start_date,
            row.end_date,
            row.result_id,
        ));
    }

    out.push_str(&format!(
        "\n{} rows, objective {:.2}\n",
        output.results.len(),
        output.objective_value_cents as f64 / 100.0
    ));
    out
}

#[derive(Serialize)]
struct JsonRow<'a> {
    project_id: &'a str,
    period_id: u32,
    repair_project_id: &'a str,
    location: String,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    result_id: &'a str,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    objective_value: f64,
    rows: Vec<JsonRow<'a>>,
}

pub fn render_json(output: &PipelineOutput) -> serde_json::Result<String> {
    let report = JsonReport {
        objective_value: output.objective_value_cents as f64 / 100.0,
        rows: output
            .results
            .iter()
            .map(|row| JsonRow {
                project_id: &row.project_id,
                period_id: row.period_id,
                repair_project_id: &row.repair_project_id,
                location: row.location.to_string(),
                start_date: row.start_date,
                end_date: row.end_date,
                result_id: &row.result_id,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use astican_core::{Area, ResultRow};
    use chrono::NaiveDate;

    fn sample_output() -> PipelineOutput {
        PipelineOutput {
            results: vec![ResultRow {
                project_id: "P1".to_string(),
                period_id: 0,
                repair_project_id: "P1_0".to_string(),
                location: Area::Concrete("MUELLE-1".to_string()),
                start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                result_id: "P1_2026-01-01_2026-01-05_MUELLE-1".to_string(),
            }],
            objective_value_cents: 123_450,
        }
    }

    #[test]
    fn text_report_contains_every_row() {
        let text = render_text(&sample_output());
        assert!(text.contains("P1"));
        assert!(text.contains("MUELLE-1"));
        assert!(text.contains("1234.50") || text.contains("1234.5"));
    }

    #[test]
    fn json_report_round_trips_through_serde_value() {
        let json = render_json(&sample_output()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"][0]["project_id"], "P1");
    }
}
