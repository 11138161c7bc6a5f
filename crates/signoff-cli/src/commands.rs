use anyhow::{bail, Context, Result};

use signoff_api::{HostApi, RepoClient};
use signoff_core::{
    reconcile, signoff_labels, ObservedSet, ReconciledReport, RequiredSet, SignoffContext,
};
use signoff_vcs::{TreeState, Vcs};

/// Outcome of one sign-off invocation; failed posts carry the rendered
/// error so the caller can report them and aggregate the exit code.
#[derive(Debug)]
pub struct CreateReport {
    pub entries: Vec<(SignoffContext, Result<(), String>)>,
}

impl CreateReport {
    pub fn all_ok(&self) -> bool {
        self.entries.iter().all(|(_, result)| result.is_ok())
    }
}

/// The supplied labels in order, or the bare context when none are given.
fn resolve_contexts(labels: &[String]) -> Result<Vec<SignoffContext>> {
    if labels.is_empty() {
        return Ok(vec![SignoffContext::bare()]);
    }
    labels
        .iter()
        .map(|label| SignoffContext::from_label(label).map_err(anyhow::Error::from))
        .collect()
}

fn resolve_branch(client: &RepoClient, branch: Option<&str>) -> Result<String> {
    match branch {
        Some(branch) => {
            let branch = branch.trim();
            if branch.is_empty() {
                bail!("branch name must not be empty");
            }
            Ok(branch.to_string())
        }
        None => client.default_branch(),
    }
}

/// Post a success status for HEAD under every supplied context,
/// left-to-right. A failed post does not stop the remaining ones. Unless
/// forced, a dirty or unpushed tree aborts before any remote call.
pub fn create(
    vcs: &dyn Vcs,
    api: &dyn HostApi,
    labels: &[String],
    force: bool,
) -> Result<CreateReport> {
    let contexts = resolve_contexts(labels)?;
    if !force {
        match vcs.tree_state()? {
            TreeState::Clean => {}
            TreeState::Dirty => {
                bail!("working tree has uncommitted changes (use -f to sign off anyway)")
            }
            TreeState::Unpushed => {
                bail!("local commits are not pushed upstream (use -f to sign off anyway)")
            }
        }
    }
    let sha = vcs.head_commit()?;
    let user = vcs.user_name()?;
    let description = format!("{user} signed off");

    let client = RepoClient::new(api);
    let mut entries = Vec::new();
    for ctx in contexts {
        let result = client
            .post_status(&sha, &ctx.canonical(), &description)
            .map_err(|err| format!("{err:#}"));
        entries.push((ctx, result));
    }
    Ok(CreateReport { entries })
}

/// Require the canonical forms of the supplied labels on a branch.
pub fn install(
    api: &dyn HostApi,
    branch: Option<&str>,
    labels: &[String],
) -> Result<(String, Vec<SignoffContext>)> {
    let contexts = resolve_contexts(labels)?;
    let client = RepoClient::new(api);
    let branch = resolve_branch(&client, branch)?;
    let names: Vec<String> = contexts.iter().map(|ctx| ctx.canonical()).collect();
    client
        .put_protection(&branch, &names)
        .with_context(|| format!("install protection on {branch}"))?;
    Ok((branch, contexts))
}

/// Drop branch protection. Wholesale: the provider call removes every
/// protection rule on the branch, not just sign-off checks.
pub fn uninstall(api: &dyn HostApi, branch: Option<&str>) -> Result<String> {
    let client = RepoClient::new(api);
    let branch = resolve_branch(&client, branch)?;
    client
        .delete_protection(&branch)
        .with_context(|| format!("remove protection from {branch}"))?;
    Ok(branch)
}

/// Whether each supplied context is required on the branch. Absent
/// protection is an empty requirement; a failed fetch is an error.
pub fn check(
    api: &dyn HostApi,
    branch: Option<&str>,
    labels: &[String],
) -> Result<Vec<(SignoffContext, bool)>> {
    let contexts = resolve_contexts(labels)?;
    let client = RepoClient::new(api);
    let branch = resolve_branch(&client, branch)?;
    let required = client
        .protection(&branch)
        .with_context(|| format!("fetch protection for {branch}"))?
        .unwrap_or_default();
    Ok(contexts
        .into_iter()
        .map(|ctx| {
            let hit = required.iter().any(|name| *name == ctx.canonical());
            (ctx, hit)
        })
        .collect())
}

/// Reconcile the branch's required contexts with the statuses observed on
/// the local HEAD commit.
pub fn status(vcs: &dyn Vcs, api: &dyn HostApi, branch: Option<&str>) -> Result<ReconciledReport> {
    let client = RepoClient::new(api);
    let branch = resolve_branch(&client, branch)?;
    // Absence of protection, or a failed protection fetch, means nothing is
    // required beyond the default check.
    let required = match client.protection(&branch) {
        Ok(Some(contexts)) => {
            RequiredSet::from_labels(signoff_labels(contexts.iter().map(String::as_str)))
        }
        Ok(None) | Err(_) => RequiredSet::default_only(),
    };
    let sha = vcs.head_commit()?;
    let records = client
        .combined_status(&sha)
        .with_context(|| format!("fetch commit status for {sha}"))?;
    let observed =
        ObservedSet::from_statuses(records.iter().map(|r| (r.context.as_str(), r.state.as_str())));
    Ok(reconcile(&required, &observed))
}
