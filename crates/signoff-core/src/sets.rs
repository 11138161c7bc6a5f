use crate::context::{SignoffContext, Verdict};

/// Display labels of the sign-off family members of a raw required-context
/// list, in their original order, family prefix stripped. The bare family
/// name is implicit and never emitted; foreign names are ignored.
pub fn signoff_labels<'a, I>(contexts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    contexts
        .into_iter()
        .filter_map(SignoffContext::parse)
        .filter(|ctx| !ctx.is_bare())
        .map(|ctx| ctx.label().to_string())
        .collect()
}

/// Ordered required contexts. Always begins with the bare context, followed
/// by the declared ones in remote order, deduplicated by canonical name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequiredSet {
    items: Vec<SignoffContext>,
}

impl RequiredSet {
    /// The synthesized requirement when no protection is configured.
    pub fn default_only() -> Self {
        Self {
            items: vec![SignoffContext::bare()],
        }
    }

    /// Build from parsed display labels, e.g. the output of
    /// [`signoff_labels`].
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut items = vec![SignoffContext::bare()];
        for label in labels {
            if label.is_empty() {
                continue;
            }
            let ctx = SignoffContext::trusted(label);
            if !items.contains(&ctx) {
                items.push(ctx);
            }
        }
        Self { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignoffContext> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Observed sign-off statuses for one commit, in API record order. Foreign
/// contexts are dropped; the first record per canonical name wins.
#[derive(Clone, Debug, Default)]
pub struct ObservedSet {
    entries: Vec<(SignoffContext, Verdict)>,
}

impl ObservedSet {
    pub fn from_statuses<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries: Vec<(SignoffContext, Verdict)> = Vec::new();
        for (context, state) in records {
            let Some(ctx) = SignoffContext::parse(context) else {
                continue;
            };
            if entries.iter().any(|(seen, _)| *seen == ctx) {
                continue;
            }
            entries.push((ctx, Verdict::from_state(state)));
        }
        Self { entries }
    }

    pub fn verdict(&self, ctx: &SignoffContext) -> Option<Verdict> {
        self.entries
            .iter()
            .find(|(seen, _)| seen == ctx)
            .map(|(_, verdict)| *verdict)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SignoffContext, Verdict)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
