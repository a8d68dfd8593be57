//! Course entity model and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use coursehub_core::course::{ApprovalInfo, CourseContent, RejectionInfo, ReviewDecision};
use coursehub_core::error::CoreError;
use coursehub_core::status::CourseStatus;
use coursehub_core::types::{DbId, Timestamp};

/// A row from the `courses` table.
///
/// `status` and `decision` are stored as text; use [`Course::status`] and
/// [`Course::review_decision`] for the typed views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,

    // Content
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

    // Ownership
    pub instructor_id: DbId,
    pub instructor_name: String,
    pub instructor_email: String,

    // Workflow
    pub status: String,
    pub is_locked: bool,
    pub locked_by: Option<DbId>,
    pub locked_at: Option<Timestamp>,
    pub lock_reason: Option<String>,
    pub version: i32,
    pub is_published: bool,
    pub published_by: Option<DbId>,

    // Decision
    pub decision: String,
    pub approved_by_id: Option<DbId>,
    pub approved_by_name: Option<String>,
    pub approval_notes: Option<String>,
    pub is_featured: bool,
    pub approved_at: Option<Timestamp>,
    pub rejected_by_id: Option<DbId>,
    pub rejected_by_name: Option<String>,
    pub rejection_reason: Option<String>,
    pub rejected_at: Option<Timestamp>,

    // Lifecycle timestamps
    pub submitted_at: Option<Timestamp>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Course {
    /// The typed lifecycle status.
    pub fn status(&self) -> Result<CourseStatus, CoreError> {
        CourseStatus::parse(&self.status)
    }

    /// Clone out the substantive content fields for readiness checks and
    /// edit classification.
    pub fn content(&self) -> CourseContent {
        CourseContent {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            level: self.level.clone(),
            language: self.language.clone(),
            pricing: self.pricing.clone(),
            objectives: self.objectives.clone(),
            syllabus: self.syllabus.clone(),
            requirements: self.requirements.clone(),
            target_audience: self.target_audience.clone(),
            curriculum: self.curriculum.clone(),
            media_files: self.media_files.clone(),
        }
    }

    /// The most recent admin decision as a tagged value.
    ///
    /// Falls back to `Pending` when the discriminant says a side is current
    /// but its columns are incomplete, which only happens for rows written
    /// outside the engine.
    pub fn review_decision(&self) -> ReviewDecision {
        match self.decision.as_str() {
            "approved" => {
                match (self.approved_by_id, &self.approved_by_name, self.approved_at) {
                    (Some(id), Some(name), Some(at)) => ReviewDecision::Approved(ApprovalInfo {
                        approved_by_id: id,
                        approved_by_name: name.clone(),
                        approval_notes: self.approval_notes.clone(),
                        is_featured: self.is_featured,
                        approved_at: at,
                    }),
                    _ => ReviewDecision::Pending,
                }
            }
            "rejected" => {
                match (self.rejected_by_id, &self.rejected_by_name, self.rejected_at) {
                    (Some(id), Some(name), Some(at)) => ReviewDecision::Rejected(RejectionInfo {
                        rejected_by_id: id,
                        rejected_by_name: name.clone(),
                        rejection_reason: self.rejection_reason.clone().unwrap_or_default(),
                        rejected_at: at,
                    }),
                    _ => ReviewDecision::Pending,
                }
            }
            _ => ReviewDecision::Pending,
        }
    }
}

/// DTO for creating a course draft.
///
/// Only the title and instructor identity are required up front; everything
/// else can be filled in through edits before submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub title: String,
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
    pub instructor_id: DbId,
    pub instructor_name: String,
    pub instructor_email: String,
}
