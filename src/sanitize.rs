// ABOUTME: Defensive sanitizer for the AI's structured grading response
// ABOUTME: Total function coercing arbitrary JSON into a valid AnalysisResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Response Sanitizer
//!
//! Even with a response schema declared, the service can return values that
//! violate the contract: out-of-range scores, empty strings, wrong-typed
//! entries. [`sanitize`] never fails and never keeps a partially-valid entry:
//! a list element either passes every check or is dropped whole.
//!
//! The sanitizer is idempotent; feeding its own output back yields the same
//! result.

use serde_json::Value;

use crate::models::{AnalysisResult, Drill, Issue, Severity, DEFAULT_PRO_SCORE};

/// Validate and coerce a raw JSON value into an [`AnalysisResult`]
///
/// Non-object input yields the zero-result default. `score` is kept only when
/// numeric, then clamped to 0-100; `proScore` is kept only when numeric and is
/// deliberately not clamped. List entries failing any field check are dropped
/// silently.
#[must_use]
pub fn sanitize(raw: &Value) -> AnalysisResult {
    let Some(data) = raw.as_object() else {
        return AnalysisResult::zero();
    };

    let score = data
        .get("score")
        .and_then(Value::as_f64)
        .map_or(0, |s| s.clamp(0.0, 100.0).round() as u8);

    let pro_score = data
        .get("proScore")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_PRO_SCORE);

    let issues = data
        .get("issues")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(sanitize_issue).collect())
        .unwrap_or_default();

    let strengths = data
        .get("strengths")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let drills = data
        .get("drills")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(sanitize_drill).collect())
        .unwrap_or_default();

    AnalysisResult {
        score,
        pro_score,
        issues,
        strengths,
        drills,
    }
}

/// Keep an issue only when severity is a known level (case-insensitively)
/// and both texts are non-empty after trimming
fn sanitize_issue(item: &Value) -> Option<Issue> {
    let obj = item.as_object()?;
    let severity = Severity::parse(obj.get("severity")?.as_str()?)?;
    let issue = obj.get("issue")?.as_str()?;
    let fix = obj.get("fix")?.as_str()?;
    if issue.trim().is_empty() || fix.trim().is_empty() {
        return None;
    }
    Some(Issue {
        severity,
        issue: issue.to_owned(),
        fix: fix.to_owned(),
    })
}

/// Keep a drill only with non-empty text and a positive duration
fn sanitize_drill(item: &Value) -> Option<Drill> {
    let obj = item.as_object()?;
    let drill = obj.get("drill")?.as_str()?;
    let duration = obj.get("duration")?.as_f64()?;
    if drill.trim().is_empty() || duration <= 0.0 {
        return None;
    }
    Some(Drill::new(drill, duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_input_yields_zero_default() {
        for raw in [json!(null), json!(42), json!("x"), json!([1, 2])] {
            assert_eq!(sanitize(&raw), AnalysisResult::zero());
        }
    }

    #[test]
    fn severity_accepted_case_insensitively() {
        let raw = json!({
            "score": 10,
            "issues": [
                {"severity": "HIGH", "issue": "a", "fix": "b"},
                {"severity": "Medium", "issue": "c", "fix": "d"},
                {"severity": "critical", "issue": "e", "fix": "f"}
            ]
        });
        let result = sanitize(&raw);
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[0].severity, Severity::High);
        assert_eq!(result.issues[1].severity, Severity::Medium);
    }

    #[test]
    fn whitespace_only_texts_are_dropped() {
        let raw = json!({
            "strengths": ["  ", "Good shape"],
            "drills": [{"drill": "   ", "duration": 5}],
            "issues": [{"severity": "low", "issue": " ", "fix": "y"}]
        });
        let result = sanitize(&raw);
        assert_eq!(result.strengths, vec!["Good shape".to_owned()]);
        assert!(result.drills.is_empty());
        assert!(result.issues.is_empty());
    }
}
