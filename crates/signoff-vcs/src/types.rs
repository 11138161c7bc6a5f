use anyhow::Result;

/// Working-tree condition relative to the upstream branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeState {
    /// Nothing uncommitted, nothing unpushed.
    Clean,
    /// Uncommitted modifications, staged included.
    Dirty,
    /// Local commits absent from the upstream branch.
    Unpushed,
}

/// Local version-control facts the commands consume. Read-only: no
/// implementation mutates repository state.
pub trait Vcs: Send + Sync {
    /// Content hash of the current commit.
    fn head_commit(&self) -> Result<String>;

    /// Configured user display name.
    fn user_name(&self) -> Result<String>;

    /// Errors when the current branch is not tracking a remote branch; that
    /// is a misconfiguration, not ordinary work-in-progress.
    fn tree_state(&self) -> Result<TreeState>;
}
