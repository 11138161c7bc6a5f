use anyhow::Result;
use serde_json::Value;

/// Blocking JSON round trips against the hosting provider, keyed by
/// repository-relative paths. No protocol lives behind this seam in this
/// repository; implementations delegate to the provider's own client.
pub trait HostApi: Send + Sync {
    /// `Ok(None)` means the resource does not exist.
    fn get(&self, path: &str) -> Result<Option<Value>>;

    fn post(&self, path: &str, body: &Value) -> Result<Value>;

    fn put(&self, path: &str, body: &Value) -> Result<Value>;

    fn delete(&self, path: &str) -> Result<()>;
}
