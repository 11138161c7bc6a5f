use std::path::PathBuf;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::types::{TreeState, Vcs};

/// `Vcs` backed by the `git` binary running in a working directory.
#[derive(Clone, Debug)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    /// Fails fast when `git` is missing from PATH.
    pub fn probe(repo: impl Into<PathBuf>) -> Result<Self> {
        let out = Command::new("git").arg("--version").output();
        match out {
            Ok(o) if o.status.success() => Ok(Self::new(repo)),
            _ => Err(anyhow!("git not found on PATH")),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "git");
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.repo);
        let out = cmd.output().with_context(|| format!("run git {args:?}"))?;
        if !out.status.success() {
            return Err(anyhow!(
                "git {:?} failed\nstdout:{}\nstderr:{}",
                args,
                String::from_utf8_lossy(&out.stdout),
                String::from_utf8_lossy(&out.stderr)
            ));
        }
        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }

    fn upstream(&self) -> Result<String> {
        self.run(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"])
            .map_err(|_| anyhow!("not tracking a remote branch"))
    }
}

impl Vcs for GitCli {
    fn head_commit(&self) -> Result<String> {
        self.run(&["rev-parse", "HEAD"])
    }

    fn user_name(&self) -> Result<String> {
        self.run(&["config", "user.name"])
    }

    fn tree_state(&self) -> Result<TreeState> {
        let porcelain = self.run(&["status", "--porcelain"])?;
        if !porcelain.is_empty() {
            return Ok(TreeState::Dirty);
        }
        let upstream = self.upstream()?;
        let ahead = self.run(&["rev-list", "--count", &format!("{upstream}..HEAD")])?;
        if ahead != "0" {
            return Ok(TreeState::Unpushed);
        }
        Ok(TreeState::Clean)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::tempdir;

    use super::*;

    fn run(dir: &Path, args: &[&str]) {
        let out = Command::new(args[0])
            .args(&args[1..])
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            out.status.success(),
            "command failed: {:?}\nstderr:{}",
            args,
            String::from_utf8_lossy(&out.stderr)
        );
    }

    fn init_repo(dir: &Path) {
        run(dir, &["git", "init"]);
        run(dir, &["git", "config", "user.email", "dev@example.com"]);
        run(dir, &["git", "config", "user.name", "Dev Example"]);
        std::fs::write(dir.join("README.md"), "fixture").unwrap();
        run(dir, &["git", "add", "."]);
        run(dir, &["git", "commit", "-m", "init"]);
    }

    /// Origin repo plus a clone whose branch tracks it.
    fn init_tracking_clone(root: &Path) -> PathBuf {
        let origin = root.join("origin");
        std::fs::create_dir_all(&origin).unwrap();
        init_repo(&origin);

        run(root, &["git", "clone", "origin", "work"]);
        let work = root.join("work");
        run(&work, &["git", "config", "user.email", "dev@example.com"]);
        run(&work, &["git", "config", "user.name", "Dev Example"]);
        work
    }

    #[test]
    fn clean_tracking_clone_is_clean() {
        let dir = tempdir().unwrap();
        let work = init_tracking_clone(dir.path());
        let git = GitCli::new(&work);
        assert_eq!(git.tree_state().unwrap(), TreeState::Clean);
    }

    #[test]
    fn staged_but_uncommitted_change_is_dirty() {
        let dir = tempdir().unwrap();
        let work = init_tracking_clone(dir.path());
        std::fs::write(work.join("new.txt"), "wip").unwrap();
        run(&work, &["git", "add", "new.txt"]);

        let git = GitCli::new(&work);
        assert_eq!(git.tree_state().unwrap(), TreeState::Dirty);
    }

    #[test]
    fn unstaged_change_is_dirty() {
        let dir = tempdir().unwrap();
        let work = init_tracking_clone(dir.path());
        std::fs::write(work.join("README.md"), "edited").unwrap();

        let git = GitCli::new(&work);
        assert_eq!(git.tree_state().unwrap(), TreeState::Dirty);
    }

    #[test]
    fn committed_but_unpushed_is_unpushed() {
        let dir = tempdir().unwrap();
        let work = init_tracking_clone(dir.path());
        std::fs::write(work.join("new.txt"), "done").unwrap();
        run(&work, &["git", "add", "new.txt"]);
        run(&work, &["git", "commit", "-m", "local only"]);

        let git = GitCli::new(&work);
        assert_eq!(git.tree_state().unwrap(), TreeState::Unpushed);
    }

    #[test]
    fn missing_upstream_is_a_hard_error() {
        let dir = tempdir().unwrap();
        init_repo(dir.path());

        let git = GitCli::new(dir.path());
        let err = git.tree_state().unwrap_err();
        assert!(err.to_string().contains("not tracking a remote branch"));
    }

    #[test]
    fn head_commit_and_user_name_come_from_git() {
        let dir = tempdir().unwrap();
        init_repo(dir.path());

        let git = GitCli::new(dir.path());
        let sha = git.head_commit().unwrap();
        assert_eq!(sha.len(), 40);
        assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(git.user_name().unwrap(), "Dev Example");
    }
}
