//! Edit change sets and MAJOR/MINOR classification.
//!
//! An edit is a partial update: only the fields present in the change set are
//! applied. Classification is a pure function of the diff between the change
//! set and the stored course, independent of the course's current status; the
//! engine decides what a MAJOR edit *does* based on status.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::course::CourseContent;
use crate::workflow::WorkflowConfig;

/// How substantial an edit is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditType {
    /// Touches substance; forces re-review when the course is already
    /// approved or published.
    Major,
    /// Cosmetic; never forces a status change.
    Minor,
}

/// A partial update to a course's content fields.
///
/// Absent fields are left unchanged. Field names mirror [`CourseContent`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseEdit {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub level: Option<String>,
    pub language: Option<String>,
    pub pricing: Option<Value>,
    pub objectives: Option<Value>,
    pub syllabus: Option<Value>,
    pub requirements: Option<Value>,
    pub target_audience: Option<Value>,
    pub curriculum: Option<Value>,
    pub media_files: Option<Value>,
}

/// Every field name a change set can carry, in storage order.
pub const EDITABLE_FIELDS: &[&str] = &[
    "title",
    "subtitle",
    "description",
    "category",
    "subcategory",
    "level",
    "language",
    "pricing",
    "objectives",
    "syllabus",
    "requirements",
    "target_audience",
    "curriculum",
    "media_files",
];

impl CourseEdit {
    /// The proposed value for `field`, or `None` if the change set does not
    /// touch it.
    pub fn value_of(&self, field: &str) -> Option<Value> {
        match field {
            "title" => self.title.clone().map(Value::String),
            "subtitle" => self.subtitle.clone().map(Value::String),
            "description" => self.description.clone().map(Value::String),
            "category" => self.category.clone().map(Value::String),
            "subcategory" => self.subcategory.clone().map(Value::String),
            "level" => self.level.clone().map(Value::String),
            "language" => self.language.clone().map(Value::String),
            "pricing" => self.pricing.clone(),
            "objectives" => self.objectives.clone(),
            "syllabus" => self.syllabus.clone(),
            "requirements" => self.requirements.clone(),
            "target_audience" => self.target_audience.clone(),
            "curriculum" => self.curriculum.clone(),
            "media_files" => self.media_files.clone(),
            _ => None,
        }
    }

    /// Whether the change set touches nothing.
    pub fn is_empty(&self) -> bool {
        EDITABLE_FIELDS.iter().all(|f| self.value_of(f).is_none())
    }
}

/// Classify an edit against the stored course.
///
/// MAJOR if the change set carries `curriculum` or `media_files` at all, or
/// if any configured major field differs from the stored value. MINOR
/// otherwise. A major field present but equal to the stored value does not
/// count as a change.
pub fn determine_edit_type(
    edit: &CourseEdit,
    current: &CourseContent,
    config: &WorkflowConfig,
) -> EditType {
    if edit.curriculum.is_some() || edit.media_files.is_some() {
        return EditType::Major;
    }
    for field in &config.major_edit_fields {
        if let Some(proposed) = edit.value_of(field) {
            if current.field_value(field).as_ref() != Some(&proposed) {
                return EditType::Major;
            }
        }
    }
    EditType::Minor
}

/// The names of fields the change set actually alters, for the version
/// snapshot's `changed_fields` record.
pub fn changed_fields(edit: &CourseEdit, current: &CourseContent) -> Vec<String> {
    EDITABLE_FIELDS
        .iter()
        .filter(|field| {
            edit.value_of(field)
                .is_some_and(|proposed| current.field_value(field).as_ref() != Some(&proposed))
        })
        .map(|field| field.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content() -> CourseContent {
        CourseContent {
            title: "Practical Rust".into(),
            subtitle: Some("From zero to shipping".into()),
            description: "Ownership without tears".into(),
            category: "programming".into(),
            subcategory: None,
            level: "intermediate".into(),
            language: "en".into(),
            pricing: json!({"mode": "paid", "amount": 49.0}),
            objectives: json!(["read lifetimes"]),
            syllabus: json!(["week 1"]),
            requirements: json!(["a laptop"]),
            target_audience: json!(["backend developers"]),
            curriculum: json!([{"title": "Intro", "lectures": []}]),
            media_files: json!([{"name": "promo.mp4"}]),
        }
    }

    fn config() -> WorkflowConfig {
        WorkflowConfig::default()
    }

    #[test]
    fn subtitle_only_change_is_minor() {
        let edit = CourseEdit {
            subtitle: Some("Now with async".into()),
            ..Default::default()
        };
        assert_eq!(determine_edit_type(&edit, &content(), &config()), EditType::Minor);
    }

    #[test]
    fn title_change_is_major() {
        let edit = CourseEdit {
            title: Some("Impractical Rust".into()),
            ..Default::default()
        };
        assert_eq!(determine_edit_type(&edit, &content(), &config()), EditType::Major);
    }

    #[test]
    fn unchanged_major_field_does_not_escalate() {
        // Clients often echo back the stored value; an identical title is
        // not a substantive change.
        let edit = CourseEdit {
            title: Some("Practical Rust".into()),
            subtitle: Some("Different".into()),
            ..Default::default()
        };
        assert_eq!(determine_edit_type(&edit, &content(), &config()), EditType::Minor);
    }

    #[test]
    fn curriculum_presence_is_always_major() {
        // Even an identical curriculum counts: content restructuring is
        // reviewed regardless of diff depth.
        let edit = CourseEdit {
            curriculum: Some(content().curriculum),
            ..Default::default()
        };
        assert_eq!(determine_edit_type(&edit, &content(), &config()), EditType::Major);
    }

    #[test]
    fn media_files_presence_is_always_major() {
        let edit = CourseEdit {
            media_files: Some(json!([{"name": "lesson1.mp4"}])),
            ..Default::default()
        };
        assert_eq!(determine_edit_type(&edit, &content(), &config()), EditType::Major);
    }

    #[test]
    fn pricing_change_is_major() {
        let edit = CourseEdit {
            pricing: Some(json!({"mode": "free"})),
            ..Default::default()
        };
        assert_eq!(determine_edit_type(&edit, &content(), &config()), EditType::Major);
    }

    #[test]
    fn changed_fields_lists_only_real_changes() {
        let edit = CourseEdit {
            title: Some("Practical Rust".into()), // unchanged
            subtitle: Some("Now with async".into()),
            level: Some("advanced".into()),
            ..Default::default()
        };
        let changed = changed_fields(&edit, &content());
        assert_eq!(changed, vec!["subtitle".to_string(), "level".to_string()]);
    }

    #[test]
    fn empty_edit_is_detected() {
        assert!(CourseEdit::default().is_empty());
        let edit = CourseEdit {
            language: Some("de".into()),
            ..Default::default()
        };
        assert!(!edit.is_empty());
    }

    #[test]
    fn classification_ignores_course_status() {
        // determine_edit_type takes no status: the same diff classifies the
        // same way for a draft as for a published course.
        let edit = CourseEdit {
            description: Some("Rewritten".into()),
            ..Default::default()
        };
        assert_eq!(determine_edit_type(&edit, &content(), &config()), EditType::Major);
    }
}
