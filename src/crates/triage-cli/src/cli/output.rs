//! Output formatting for evaluation results
//!
//! Table rows for the summary and per-query breakdown, plus the JSON report.

use serde_json::{json, Value};
use std::time::Duration;
use tabled::{Table, Tabled};
use triage::{CaseOutcome, EvaluationResult};

/// Summary row, one per evaluated model
#[derive(Tabled)]
pub struct EvaluationRow {
    #[tabled(rename = "Model")]
    pub model: String,
    #[tabled(rename = "Correct")]
    pub correct: usize,
    #[tabled(rename = "Total")]
    pub total: usize,
    #[tabled(rename = "Failed")]
    pub failed: usize,
    #[tabled(rename = "Accuracy")]
    pub accuracy: String,
    #[tabled(rename = "Avg Time (s)")]
    pub avg_time: String,
}

impl From<&EvaluationResult> for EvaluationRow {
    fn from(result: &EvaluationResult) -> Self {
        Self {
            model: result.name.clone(),
            correct: result.correct,
            total: result.total,
            failed: result.failed,
            accuracy: format_accuracy(result.accuracy()),
            avg_time: format_seconds(result.average_latency()),
        }
    }
}

/// Per-query row for `--details`
#[derive(Tabled)]
pub struct CaseRow {
    #[tabled(rename = "Query")]
    pub query: String,
    #[tabled(rename = "Expected")]
    pub expected: String,
    #[tabled(rename = "Predicted")]
    pub predicted: String,
    #[tabled(rename = "Result")]
    pub result: String,
    #[tabled(rename = "Time (s)")]
    pub time: String,
}

impl From<&CaseOutcome> for CaseRow {
    fn from(case: &CaseOutcome) -> Self {
        let result = match &case.error {
            Some(error) => format!("failed: {}", error),
            None if case.is_correct() => "✓".to_string(),
            None => "✗".to_string(),
        };

        Self {
            query: case.query.clone(),
            expected: case.expected.to_string(),
            predicted: case
                .predicted
                .map(|intent| intent.to_string())
                .unwrap_or_else(|| "-".to_string()),
            result,
            time: format_seconds(case.latency),
        }
    }
}

/// Accuracy as a percentage with one decimal
pub fn format_accuracy(accuracy: f64) -> String {
    format!("{:.1}%", accuracy)
}

/// Seconds with millisecond precision
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}

pub fn summary_table(results: &[EvaluationResult]) -> String {
    let rows: Vec<EvaluationRow> = results.iter().map(EvaluationRow::from).collect();
    Table::new(rows).to_string()
}

pub fn details_table(result: &EvaluationResult) -> String {
    let rows: Vec<CaseRow> = result.cases.iter().map(CaseRow::from).collect();
    Table::new(rows).to_string()
}

/// Machine-readable report of results and skipped providers
pub fn json_report(results: &[EvaluationResult], skipped: &[(String, String)], details: bool) -> Value {
    let models: Vec<Value> = results
        .iter()
        .map(|result| {
            let mut model = json!({
                "model": result.name,
                "correct": result.correct,
                "total": result.total,
                "failed": result.failed,
                "accuracy": result.accuracy(),
                "avg_time_secs": result.average_latency().as_secs_f64(),
            });

            if details {
                model["cases"] = result
                    .cases
                    .iter()
                    .map(|case| {
                        json!({
                            "query": case.query,
                            "expected": case.expected,
                            "predicted": case.predicted,
                            "response": case.response,
                            "latency_secs": case.latency.as_secs_f64(),
                            "error": case.error,
                        })
                    })
                    .collect();
            }

            model
        })
        .collect();

    let skipped: Vec<Value> = skipped
        .iter()
        .map(|(name, reason)| json!({ "model": name, "reason": reason }))
        .collect();

    json!({ "results": models, "skipped": skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage::Intent;

    fn case(query: &str, predicted: Option<Intent>, error: Option<&str>) -> CaseOutcome {
        CaseOutcome {
            query: query.to_string(),
            expected: Intent::Faq,
            predicted,
            response: String::new(),
            latency: Duration::from_millis(250),
            error: error.map(str::to_string),
        }
    }

    fn sample_result() -> EvaluationResult {
        let mut result = EvaluationResult::new("GPT");
        result.correct = 2;
        result.total = 3;
        result.failed = 1;
        result.elapsed = Duration::from_millis(1000);
        result.cases = vec![
            case("hours?", Some(Intent::Faq), None),
            case("returns?", Some(Intent::Faq), None),
            case("shipping?", Some(Intent::OrderStatus), None),
            case("gift cards?", None, Some("Rate limit exceeded: slow down")),
        ];
        result
    }

    #[test]
    fn test_format_accuracy() {
        assert_eq!(format_accuracy(100.0), "100.0%");
        assert_eq!(format_accuracy(200.0 / 3.0), "66.7%");
        assert_eq!(format_accuracy(0.0), "0.0%");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::from_millis(1500)), "1.500");
        assert_eq!(format_seconds(Duration::ZERO), "0.000");
    }

    #[test]
    fn test_evaluation_row() {
        let row = EvaluationRow::from(&sample_result());
        assert_eq!(row.model, "GPT");
        assert_eq!(row.accuracy, "66.7%");
        assert_eq!(row.avg_time, "0.250");
    }

    #[test]
    fn test_summary_table_has_all_columns() {
        let table = summary_table(&[sample_result()]);
        for column in ["Model", "Correct", "Total", "Failed", "Accuracy", "Avg Time (s)"] {
            assert!(table.contains(column), "missing column {}", column);
        }
        assert!(table.contains("GPT"));
    }

    #[test]
    fn test_case_rows() {
        let result = sample_result();
        let rows: Vec<CaseRow> = result.cases.iter().map(CaseRow::from).collect();
        assert_eq!(rows[0].result, "✓");
        assert_eq!(rows[2].result, "✗");
        assert_eq!(rows[2].predicted, "ORDER_STATUS");
        assert_eq!(rows[3].predicted, "-");
        assert!(rows[3].result.starts_with("failed: "));
    }

    #[test]
    fn test_json_report() {
        let skipped = vec![("Claude".to_string(), "ANTHROPIC_API_KEY not set".to_string())];
        let report = json_report(&[sample_result()], &skipped, true);

        assert_eq!(report["results"][0]["model"], "GPT");
        assert_eq!(report["results"][0]["failed"], 1);
        assert_eq!(report["results"][0]["cases"][2]["predicted"], "ORDER_STATUS");
        assert!(report["results"][0]["cases"][3]["predicted"].is_null());
        assert_eq!(report["skipped"][0]["model"], "Claude");

        let brief = json_report(&[sample_result()], &[], false);
        assert!(brief["results"][0].get("cases").is_none());
    }
}
