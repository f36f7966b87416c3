use assignment_core::assignment::{StatusPolicy, RECENT_LIMIT};
use assignment_core::error::CoreError;
use assignment_db::models::assignment::{recently_updated, AssignmentResponse};

/// Schema-layer configuration loaded from environment variables.
///
/// The defaults keep `status` as free text, matching an unconfigured
/// deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Which `status` values request shapes accept.
    pub status_policy: StatusPolicy,
    /// Size of the "recently updated" list (default: `10`).
    pub recent_limit: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            status_policy: StatusPolicy::FreeText,
            recent_limit: RECENT_LIMIT,
        }
    }
}

impl SchemaConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                       | Default          |
    /// |-------------------------------|------------------|
    /// | `ASSIGNMENT_ALLOWED_STATUSES` | empty (any text) |
    /// | `ASSIGNMENT_RECENT_LIMIT`     | `10`             |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let status_policy = match lookup("ASSIGNMENT_ALLOWED_STATUSES") {
            Some(raw) => StatusPolicy::from_allowed(raw.split(',')),
            None => StatusPolicy::FreeText,
        };

        let recent_limit = match lookup("ASSIGNMENT_RECENT_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                CoreError::Validation(format!(
                    "ASSIGNMENT_RECENT_LIMIT must be a non-negative integer, got '{raw}': {e}"
                ))
            })?,
            None => RECENT_LIMIT,
        };

        Ok(Self {
            status_policy,
            recent_limit,
        })
    }

    /// The `recent_limit` most recently updated live assignments, newest first.
    pub fn recently_updated<'a>(
        &self,
        items: &'a [AssignmentResponse],
    ) -> Vec<&'a AssignmentResponse> {
        recently_updated(items, self.recent_limit)
    }
}
