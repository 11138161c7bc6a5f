use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use crate::host::HostApi;

/// In-memory host for tests. Routes are exact repository-relative paths;
/// mutations are recorded for assertions and failures can be injected per
/// path or by request-body content.
#[derive(Default)]
pub struct InMemoryHost {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<String, Value>,
    fail_paths: HashSet<String>,
    fail_body_fragments: Vec<String>,
    posts: Vec<(String, Value)>,
    puts: Vec<(String, Value)>,
    deletes: Vec<String>,
    calls: usize,
}

impl Inner {
    fn check(&mut self, path: &str, body: Option<&Value>) -> Result<()> {
        self.calls += 1;
        if self.fail_paths.contains(path) {
            return Err(anyhow!("injected failure for {path}"));
        }
        if let Some(body) = body {
            let rendered = body.to_string();
            for fragment in &self.fail_body_fragments {
                if rendered.contains(fragment) {
                    return Err(anyhow!("injected failure for body containing {fragment}"));
                }
            }
        }
        Ok(())
    }
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, path: &str, value: Value) {
        self.inner
            .lock()
            .unwrap()
            .routes
            .insert(path.to_string(), value);
    }

    /// Every request to `path` errors.
    pub fn fail_path(&self, path: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail_paths
            .insert(path.to_string());
    }

    /// Every mutation whose body contains `fragment` errors.
    pub fn fail_body_containing(&self, fragment: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail_body_fragments
            .push(fragment.to_string());
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.inner.lock().unwrap().posts.clone()
    }

    pub fn puts(&self) -> Vec<(String, Value)> {
        self.inner.lock().unwrap().puts.clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.inner.lock().unwrap().deletes.clone()
    }

    /// Total requests seen, failed ones included.
    pub fn calls(&self) -> usize {
        self.inner.lock().unwrap().calls
    }
}

impl HostApi for InMemoryHost {
    fn get(&self, path: &str) -> Result<Option<Value>> {
        let mut inner = self.inner.lock().unwrap();
        inner.check(path, None)?;
        Ok(inner.routes.get(path).cloned())
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let mut inner = self.inner.lock().unwrap();
        inner.check(path, Some(body))?;
        inner.posts.push((path.to_string(), body.clone()));
        Ok(json!({}))
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let mut inner = self.inner.lock().unwrap();
        inner.check(path, Some(body))?;
        inner.puts.push((path.to_string(), body.clone()));
        Ok(json!({}))
    }

    fn delete(&self, path: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check(path, None)?;
        inner.deletes.push(path.to_string());
        Ok(())
    }
}
