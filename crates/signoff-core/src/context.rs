use thiserror::Error;

/// Status-check family every sign-off context belongs to.
pub const FAMILY: &str = "signoff";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("context label must not be empty")]
    Empty,
    #[error("context label must not contain '/': {0}")]
    Slash(String),
}

/// A sign-off check name with two views: the canonical form the remote
/// stores (`signoff` or `signoff/<label>`) and the display label alone,
/// empty for the bare default. The two forms round-trip exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignoffContext {
    label: String,
}

impl SignoffContext {
    /// The default check, canonical name `signoff`.
    pub fn bare() -> Self {
        Self { label: String::new() }
    }

    /// Build from a user-supplied display label. Use [`SignoffContext::bare`]
    /// for the default context; an empty label is rejected here.
    pub fn from_label(label: &str) -> Result<Self, LabelError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(LabelError::Empty);
        }
        if label.contains('/') {
            return Err(LabelError::Slash(label.to_string()));
        }
        Ok(Self {
            label: label.to_string(),
        })
    }

    /// Parse a canonical name. `None` for anything outside the family.
    pub fn parse(canonical: &str) -> Option<Self> {
        if canonical == FAMILY {
            return Some(Self::bare());
        }
        let label = canonical.strip_prefix(FAMILY)?.strip_prefix('/')?;
        if label.is_empty() {
            return None;
        }
        Some(Self {
            label: label.to_string(),
        })
    }

    // For labels that already came from a canonical name.
    pub(crate) fn trusted(label: String) -> Self {
        Self { label }
    }

    pub fn canonical(&self) -> String {
        if self.label.is_empty() {
            FAMILY.to_string()
        } else {
            format!("{FAMILY}/{}", self.label)
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_bare(&self) -> bool {
        self.label.is_empty()
    }

    /// Human-facing name: the label, or the family name for the bare context.
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            FAMILY
        } else {
            &self.label
        }
    }
}

/// Outcome recorded for a context. Any remote state other than the literal
/// `success` counts as a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Success,
    Failure,
}

impl Verdict {
    pub fn from_state(state: &str) -> Self {
        if state == "success" {
            Verdict::Success
        } else {
            Verdict::Failure
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Verdict::Success)
    }
}
