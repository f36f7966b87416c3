//! Assignment status constants, status policy, and listing predicates.
//!
//! The request/response shapes themselves live in `assignment_db::models`;
//! this module only holds the rules they share.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_COMPLETED: &str = "Completed";

/// Status assigned when a creation request omits `status`.
pub const DEFAULT_STATUS: &str = STATUS_PENDING;

/// Statuses the front end knows how to render. Not enforced unless a
/// [`StatusPolicy::Closed`] is configured.
pub const KNOWN_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_IN_PROGRESS, STATUS_COMPLETED];

/// Status filter value that matches every assignment.
pub const STATUS_FILTER_ALL: &str = "All";

/// Number of entries in the "recently updated" list.
pub const RECENT_LIMIT: usize = 10;

/// Whether `status` is free text or restricted to a closed set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    #[default]
    FreeText,
    Closed(Vec<String>),
}

impl StatusPolicy {
    /// Build a policy from a list of allowed values.
    ///
    /// Blank entries are dropped; an empty list yields [`StatusPolicy::FreeText`].
    pub fn from_allowed<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed: Vec<String> = allowed
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if allowed.is_empty() {
            StatusPolicy::FreeText
        } else {
            StatusPolicy::Closed(allowed)
        }
    }

    /// Check a status value against the policy.
    pub fn check(&self, status: &str) -> Result<(), CoreError> {
        match self {
            StatusPolicy::FreeText => Ok(()),
            StatusPolicy::Closed(allowed) if allowed.iter().any(|s| s == status) => Ok(()),
            StatusPolicy::Closed(allowed) => Err(CoreError::Validation(format!(
                "Invalid status '{status}'. Must be one of: {}",
                allowed.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing predicates
// ---------------------------------------------------------------------------

/// Case-insensitive substring search over title and description.
///
/// An empty query matches everything.
pub fn matches_search(title: &str, description: Option<&str>, query: &str) -> bool {
    let query = query.to_lowercase();
    title.to_lowercase().contains(&query)
        || description.is_some_and(|d| d.to_lowercase().contains(&query))
}

/// Exact status match, with [`STATUS_FILTER_ALL`] matching every status.
pub fn matches_status_filter(status: &str, filter: &str) -> bool {
    filter == STATUS_FILTER_ALL || status == filter
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
