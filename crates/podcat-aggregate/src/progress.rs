use serde::Serialize;

/// Run-level status shown to the presentation layer.
///
/// `Pending → Success` happens once the catalog list fetch succeeds.
/// A catalog-list failure sets `Fail` — the upstream design left the
/// status `Pending` forever in that case and only cleared the loading
/// flag; assigning `Fail` explicitly closes that gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Pending,
    Success,
    Fail,
}

/// Process-wide progress snapshot: reset at run start, mutated only by
/// the scheduler, read-only to consumers.
///
/// Invariants: `completed` is monotone non-decreasing and never exceeds
/// `total`; `total` is assigned exactly once per run, immediately after
/// the catalog fetch succeeds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub status: RunStatus,
    pub elapsed_secs: u64,
    pub loading: bool,
}
