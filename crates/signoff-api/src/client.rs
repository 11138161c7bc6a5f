use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::host::HostApi;

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct Protection {
    #[serde(default)]
    required_status_checks: Option<RequiredStatusChecks>,
}

#[derive(Debug, Deserialize)]
struct RequiredStatusChecks {
    #[serde(default)]
    contexts: Vec<String>,
}

/// One recorded commit status.
#[derive(Clone, Debug, Deserialize)]
pub struct StatusRecord {
    pub context: String,
    pub state: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CombinedStatus {
    #[serde(default)]
    statuses: Vec<StatusRecord>,
}

/// Typed remote operations over a [`HostApi`]. The `{owner}`/`{repo}`
/// placeholders are left for the underlying client to resolve from the
/// current repository.
pub struct RepoClient<'a> {
    api: &'a dyn HostApi,
}

impl<'a> RepoClient<'a> {
    pub fn new(api: &'a dyn HostApi) -> Self {
        Self { api }
    }

    pub fn default_branch(&self) -> Result<String> {
        let value = self
            .api
            .get("repos/{owner}/{repo}")?
            .context("repository not found")?;
        let info: RepoInfo =
            serde_json::from_value(value).context("parse repository payload")?;
        Ok(info.default_branch)
    }

    /// Required status-check contexts for a branch, `None` when the branch
    /// has no protection configured.
    pub fn protection(&self, branch: &str) -> Result<Option<Vec<String>>> {
        let path = format!("repos/{{owner}}/{{repo}}/branches/{branch}/protection");
        let Some(value) = self.api.get(&path)? else {
            return Ok(None);
        };
        let protection: Protection =
            serde_json::from_value(value).context("parse branch protection")?;
        Ok(Some(
            protection
                .required_status_checks
                .map(|checks| checks.contexts)
                .unwrap_or_default(),
        ))
    }

    /// Combined status records for one commit, in API order.
    pub fn combined_status(&self, sha: &str) -> Result<Vec<StatusRecord>> {
        let path = format!("repos/{{owner}}/{{repo}}/commits/{sha}/status");
        let value = self
            .api
            .get(&path)?
            .with_context(|| format!("no combined status for {sha}"))?;
        let combined: CombinedStatus =
            serde_json::from_value(value).context("parse combined status")?;
        Ok(combined.statuses)
    }

    /// Post a success status for one commit under the given context name.
    pub fn post_status(&self, sha: &str, context: &str, description: &str) -> Result<()> {
        let path = format!("repos/{{owner}}/{{repo}}/statuses/{sha}");
        let body = json!({
            "state": "success",
            "context": context,
            "description": description
        });
        self.api.post(&path, &body)?;
        Ok(())
    }

    /// Require exactly `contexts` on a branch. Strict mode, admin
    /// enforcement, review requirements and push restrictions are all
    /// disabled; the protection carries only the status checks.
    pub fn put_protection(&self, branch: &str, contexts: &[String]) -> Result<()> {
        let path = format!("repos/{{owner}}/{{repo}}/branches/{branch}/protection");
        let body = json!({
            "required_status_checks": {
                "strict": false,
                "contexts": contexts
            },
            "enforce_admins": false,
            "required_pull_request_reviews": Value::Null,
            "restrictions": Value::Null
        });
        self.api.put(&path, &body)?;
        Ok(())
    }

    /// Removes ALL protection on the branch, not just sign-off checks.
    pub fn delete_protection(&self, branch: &str) -> Result<()> {
        let path = format!("repos/{{owner}}/{{repo}}/branches/{branch}/protection");
        self.api.delete(&path)
    }
}
