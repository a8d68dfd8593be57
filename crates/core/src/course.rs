//! Course content shape and the admin review decision.
//!
//! [`CourseContent`] is the substantive, instructor-editable portion of a
//! course: the fields the submission readiness check and the MAJOR/MINOR edit
//! classifier both inspect. The workflow columns (status, lock, version) live
//! alongside it in storage but are owned by the engine, never edited directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{DbId, Timestamp};

/// Lock reason applied when a course is submitted for review.
pub const LOCK_REASON_UNDER_REVIEW: &str = "Under review";

/// Lock reason applied when a major edit displaces an approved course.
pub const LOCK_REASON_MAJOR_EDIT: &str = "Major changes require re-approval";

/// The substantive fields of a course.
///
/// List-shaped fields (`objectives`, `syllabus`, `requirements`,
/// `target_audience`, `media_files`) are JSON arrays; `curriculum` is a JSON
/// array of sections, each holding an ordered list of lectures; `pricing` is
/// a JSON object carrying the pricing mode and amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseContent {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub level: String,
    pub language: String,
    pub pricing: Value,
    pub objectives: Value,
    pub syllabus: Value,
    pub requirements: Value,
    pub target_audience: Value,
    pub curriculum: Value,
    pub media_files: Value,
}

impl CourseContent {
    /// Whether the named field is empty for readiness purposes.
    ///
    /// Returns `None` for a field name this shape does not know about, so a
    /// misconfigured required-field list fails loudly instead of passing.
    pub fn is_field_empty(&self, field: &str) -> Option<bool> {
        let empty = match field {
            "title" => self.title.trim().is_empty(),
            "subtitle" => opt_str_empty(&self.subtitle),
            "description" => self.description.trim().is_empty(),
            "category" => self.category.trim().is_empty(),
            "subcategory" => opt_str_empty(&self.subcategory),
            "level" => self.level.trim().is_empty(),
            "language" => self.language.trim().is_empty(),
            "pricing" => json_is_empty(&self.pricing),
            "objectives" => json_is_empty(&self.objectives),
            "syllabus" => json_is_empty(&self.syllabus),
            "requirements" => json_is_empty(&self.requirements),
            "target_audience" => json_is_empty(&self.target_audience),
            "curriculum" => json_is_empty(&self.curriculum),
            "media_files" => json_is_empty(&self.media_files),
            _ => return None,
        };
        Some(empty)
    }

    /// The named field as a JSON value, for diffing against a change set.
    ///
    /// Returns `None` for unknown field names.
    pub fn field_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "title" => Value::String(self.title.clone()),
            "subtitle" => opt_str_value(&self.subtitle),
            "description" => Value::String(self.description.clone()),
            "category" => Value::String(self.category.clone()),
            "subcategory" => opt_str_value(&self.subcategory),
            "level" => Value::String(self.level.clone()),
            "language" => Value::String(self.language.clone()),
            "pricing" => self.pricing.clone(),
            "objectives" => self.objectives.clone(),
            "syllabus" => self.syllabus.clone(),
            "requirements" => self.requirements.clone(),
            "target_audience" => self.target_audience.clone(),
            "curriculum" => self.curriculum.clone(),
            "media_files" => self.media_files.clone(),
            _ => return None,
        };
        Some(value)
    }
}

fn opt_str_empty(value: &Option<String>) -> bool {
    value.as_ref().is_none_or(|s| s.trim().is_empty())
}

fn opt_str_value(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::String(s.clone()),
        None => Value::Null,
    }
}

/// Whether a JSON value counts as empty: null, `""`, `[]`, or `{}`.
pub fn json_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// The most recent terminal admin decision on a course.
///
/// Exactly one variant is current at a time; approving a course clears any
/// prior rejection record and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ReviewDecision {
    /// No admin decision recorded (draft, or awaiting first review).
    Pending,
    Approved(ApprovalInfo),
    Rejected(RejectionInfo),
}

/// Recorded when an admin approves a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalInfo {
    pub approved_by_id: DbId,
    pub approved_by_name: String,
    pub approval_notes: Option<String>,
    pub is_featured: bool,
    pub approved_at: Timestamp,
}

/// Recorded when an admin rejects a course or requests a revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionInfo {
    pub rejected_by_id: DbId,
    pub rejected_by_name: String,
    pub rejection_reason: String,
    pub rejected_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content() -> CourseContent {
        CourseContent {
            title: "Practical Rust".into(),
            subtitle: None,
            description: "Ownership without tears".into(),
            category: "programming".into(),
            subcategory: Some("systems".into()),
            level: "intermediate".into(),
            language: "en".into(),
            pricing: json!({"mode": "paid", "amount": 49.0}),
            objectives: json!(["read lifetimes"]),
            syllabus: json!(["week 1"]),
            requirements: json!(["a laptop"]),
            target_audience: json!(["backend developers"]),
            curriculum: json!([{"title": "Intro", "lectures": []}]),
            media_files: json!([{"name": "promo.mp4", "duration": 90}]),
        }
    }

    #[test]
    fn empty_detection_covers_strings_and_arrays() {
        let mut c = content();
        assert_eq!(c.is_field_empty("title"), Some(false));
        assert_eq!(c.is_field_empty("subtitle"), Some(true));
        c.requirements = json!([]);
        assert_eq!(c.is_field_empty("requirements"), Some(true));
        c.pricing = Value::Null;
        assert_eq!(c.is_field_empty("pricing"), Some(true));
    }

    #[test]
    fn unknown_field_is_none() {
        assert_eq!(content().is_field_empty("thumbnail_url"), None);
        assert_eq!(content().field_value("thumbnail_url"), None);
    }

    #[test]
    fn whitespace_only_string_counts_as_empty() {
        let mut c = content();
        c.description = "   ".into();
        assert_eq!(c.is_field_empty("description"), Some(true));
    }

    #[test]
    fn json_is_empty_treats_scalars_as_non_empty() {
        assert!(json_is_empty(&Value::Null));
        assert!(json_is_empty(&json!("")));
        assert!(json_is_empty(&json!([])));
        assert!(json_is_empty(&json!({})));
        assert!(!json_is_empty(&json!(0)));
        assert!(!json_is_empty(&json!(false)));
    }

    #[test]
    fn decision_serializes_with_tag() {
        let decision = ReviewDecision::Rejected(RejectionInfo {
            rejected_by_id: 7,
            rejected_by_name: "Ada".into(),
            rejection_reason: "Add more examples".into(),
            rejected_at: chrono::Utc::now(),
        });
        let value = serde_json::to_value(&decision).unwrap();
        assert_eq!(value["decision"], "rejected");
        assert_eq!(value["rejection_reason"], "Add more examples");
    }
}
