use serde::Serialize;

/// Outcome of an update: how many documents matched the filter and how many
/// were actually modified. Updates report this instead of the new document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateOutcome {
    /// Outcome of an update that matched nothing, e.g. for a malformed id.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            matched_count: 0,
            modified_count: 0,
        }
    }
}
