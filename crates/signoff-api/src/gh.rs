use std::io::Write;
use std::process::{Command, Output, Stdio};

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::host::HostApi;

/// `HostApi` backed by the `gh` CLI in raw request mode. `gh` resolves the
/// `{owner}`/`{repo}` placeholders from the current repository and handles
/// authentication.
#[derive(Clone, Copy, Debug, Default)]
pub struct GhApi;

impl GhApi {
    /// Fails fast when `gh` is missing from PATH.
    pub fn probe() -> Result<Self> {
        let out = Command::new("gh").arg("--version").output();
        match out {
            Ok(o) if o.status.success() => Ok(Self),
            _ => Err(anyhow!(
                "gh not found on PATH; install it from https://cli.github.com"
            )),
        }
    }

    fn request(&self, method: &str, path: &str, body: Option<&Value>) -> Result<Output> {
        debug!(method, path, "gh api");
        let mut cmd = Command::new("gh");
        cmd.args(["api", "-X", method, path])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if body.is_some() {
            cmd.args(["--input", "-"]).stdin(Stdio::piped());
        } else {
            cmd.stdin(Stdio::null());
        }
        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawn gh api {method} {path}"))?;
        if let Some(body) = body {
            let mut stdin = child.stdin.take().context("open gh stdin")?;
            stdin.write_all(body.to_string().as_bytes())?;
        }
        child
            .wait_with_output()
            .with_context(|| format!("gh api {method} {path}"))
    }

    fn failure(method: &str, path: &str, out: &Output) -> anyhow::Error {
        anyhow!(
            "gh api {} {} failed\nstdout:{}\nstderr:{}",
            method,
            path,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        )
    }

    // `gh api` exits non-zero on HTTP errors; not-found is told apart from
    // other failures so callers can treat absence as a value.
    fn is_not_found(out: &Output) -> bool {
        let stderr = String::from_utf8_lossy(&out.stderr);
        let stdout = String::from_utf8_lossy(&out.stdout);
        stderr.contains("HTTP 404")
            || stdout.contains("\"Not Found\"")
            || stdout.contains("Branch not protected")
    }

    fn parse(method: &str, path: &str, out: &Output) -> Result<Value> {
        if out.stdout.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&out.stdout)
            .with_context(|| format!("parse gh api {method} {path} response"))
    }
}

impl HostApi for GhApi {
    fn get(&self, path: &str) -> Result<Option<Value>> {
        let out = self.request("GET", path, None)?;
        if !out.status.success() {
            if Self::is_not_found(&out) {
                return Ok(None);
            }
            return Err(Self::failure("GET", path, &out));
        }
        Ok(Some(Self::parse("GET", path, &out)?))
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let out = self.request("POST", path, Some(body))?;
        if !out.status.success() {
            return Err(Self::failure("POST", path, &out));
        }
        Self::parse("POST", path, &out)
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let out = self.request("PUT", path, Some(body))?;
        if !out.status.success() {
            return Err(Self::failure("PUT", path, &out));
        }
        Self::parse("PUT", path, &out)
    }

    fn delete(&self, path: &str) -> Result<()> {
        let out = self.request("DELETE", path, None)?;
        if !out.status.success() {
            return Err(Self::failure("DELETE", path, &out));
        }
        Ok(())
    }
}
