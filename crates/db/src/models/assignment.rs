//! Assignment entity model, request DTOs, and response projection.

use assignment_core::assignment::{
    matches_search, matches_status_filter, StatusPolicy, DEFAULT_STATUS, STATUS_FILTER_ALL,
};
use assignment_core::error::CoreError;
use assignment_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `assignments` table.
///
/// `deleted_time` is set exactly when `deleted` is true; rows that break this
/// are rejected when projected into an [`AssignmentResponse`].
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_soft_delete"))]
pub struct Assignment {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    pub created_time: Timestamp,
    pub updated_time: Timestamp,
    pub deleted: bool,
    #[serde(default)]
    pub deleted_time: Option<Timestamp>,
}

fn validate_soft_delete(record: &Assignment) -> Result<(), ValidationError> {
    if record.deleted == record.deleted_time.is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("soft_delete_mismatch");
    err.message = Some(
        format!(
            "assignment {} has deleted={} but deleted_time is {}",
            record.id,
            record.deleted,
            if record.deleted_time.is_some() { "set" } else { "null" }
        )
        .into(),
    );
    Err(err)
}

impl Assignment {
    /// Materialize a validated creation request as a freshly persisted row.
    pub fn from_create(id: DbId, input: CreateAssignment, now: Timestamp) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            status: input.status,
            created_time: now,
            updated_time: now,
            deleted: false,
            deleted_time: None,
        }
    }

    /// Apply a partial update. Only `Some` fields in `patch` are written.
    ///
    /// `updated_time` is bumped even for an empty patch. Returns whether any
    /// field value actually changed. Soft-deleted rows cannot be updated.
    pub fn apply_update(
        &mut self,
        patch: &UpdateAssignment,
        now: Timestamp,
    ) -> Result<bool, CoreError> {
        if self.deleted {
            return Err(CoreError::Conflict(format!(
                "Assignment {} is deleted and cannot be updated",
                self.id
            )));
        }

        let mut changed = false;
        if let Some(title) = &patch.title {
            changed |= *title != self.title;
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            changed |= self.description.as_ref() != Some(description);
            self.description = Some(description.clone());
        }
        if let Some(status) = &patch.status {
            changed |= *status != self.status;
            self.status.clone_from(status);
        }
        self.updated_time = now;
        Ok(changed)
    }

    /// Mark the row deleted. Returns `false` if it already was.
    pub fn soft_delete(&mut self, now: Timestamp) -> bool {
        if self.deleted {
            return false;
        }
        self.deleted = true;
        self.deleted_time = Some(now);
        self.updated_time = now;
        true
    }

    /// Undo a soft delete. Returns `false` if the row was not deleted.
    pub fn restore(&mut self, now: Timestamp) -> bool {
        if !self.deleted {
            return false;
        }
        self.deleted = false;
        self.deleted_time = None;
        self.updated_time = now;
        true
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a new assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAssignment {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `"Pending"` when omitted or null.
    #[serde(default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,
}

impl CreateAssignment {
    /// Validate an untyped request body into a creation DTO.
    pub fn validate(raw: &serde_json::Value, policy: &StatusPolicy) -> Result<Self, CoreError> {
        require_object(raw)?;
        let input = Self::deserialize(raw).map_err(|e| CoreError::Validation(e.to_string()))?;
        policy.check(&input.status)?;
        Ok(input)
    }
}

/// DTO for updating an existing assignment. All fields are optional; `None`
/// leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAssignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateAssignment {
    /// Validate an untyped request body into an update DTO.
    pub fn validate(raw: &serde_json::Value, policy: &StatusPolicy) -> Result<Self, CoreError> {
        require_object(raw)?;
        let input = Self::deserialize(raw).map_err(|e| CoreError::Validation(e.to_string()))?;
        if let Some(status) = &input.status {
            policy.check(status)?;
        }
        Ok(input)
    }

    /// True when no field is set (a no-op patch).
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

fn require_object(raw: &serde_json::Value) -> Result<(), CoreError> {
    if raw.is_object() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Request body must be a JSON object".to_string(),
        ))
    }
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// Treat an explicit `null` status the same as an omitted one.
fn status_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Read-only outbound view of a persisted assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_time: Timestamp,
    pub updated_time: Timestamp,
    pub deleted: bool,
    pub deleted_time: Option<Timestamp>,
}

impl AssignmentResponse {
    /// Project an untyped persisted record (a JSON attribute map).
    ///
    /// A missing or mistyped mandatory column is a persistence contract
    /// violation and yields [`CoreError::Internal`].
    pub fn from_record(raw: &serde_json::Value) -> Result<Self, CoreError> {
        if !raw.is_object() {
            return Err(CoreError::Internal(
                "Persisted assignment record must be a JSON object".to_string(),
            ));
        }
        let record = Assignment::deserialize(raw).map_err(|e| {
            CoreError::Internal(format!("Malformed persisted assignment record: {e}"))
        })?;
        Self::try_from(record)
    }
}

impl TryFrom<Assignment> for AssignmentResponse {
    type Error = CoreError;

    fn try_from(record: Assignment) -> Result<Self, Self::Error> {
        record
            .validate()
            .map_err(|e| CoreError::Internal(format!("Inconsistent assignment record: {e}")))?;

        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            status: record.status,
            created_time: record.created_time,
            updated_time: record.updated_time,
            deleted: record.deleted,
            deleted_time: record.deleted_time,
        })
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Query parameters for filtering a list of assignments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentFilter {
    /// Exact status to keep. `None` or `"All"` keeps every status.
    pub status: Option<String>,
    /// Case-insensitive text matched against title and description.
    pub search: Option<String>,
}

impl AssignmentFilter {
    /// Keep the non-deleted assignments matching this filter, in input order.
    pub fn apply<'a>(&self, items: &'a [AssignmentResponse]) -> Vec<&'a AssignmentResponse> {
        let status = self.status.as_deref().unwrap_or(STATUS_FILTER_ALL);
        let search = self.search.as_deref().unwrap_or("");
        items
            .iter()
            .filter(|a| !a.deleted)
            .filter(|a| matches_status_filter(&a.status, status))
            .filter(|a| matches_search(&a.title, a.description.as_deref(), search))
            .collect()
    }
}

/// The `limit` most recently updated non-deleted assignments, newest first.
pub fn recently_updated(items: &[AssignmentResponse], limit: usize) -> Vec<&AssignmentResponse> {
    let mut recent: Vec<&AssignmentResponse> = items.iter().filter(|a| !a.deleted).collect();
    recent.sort_by(|a, b| b.updated_time.cmp(&a.updated_time));
    recent.truncate(limit);
    recent
}
