use crate::context::{SignoffContext, Verdict};
use crate::sets::{ObservedSet, RequiredSet};

/// Ordered, deduplicated pass/fail lines for one commit: required contexts
/// first, then observed-only contexts in observation order. Identity is by
/// canonical name; every name appears exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconciledReport {
    entries: Vec<(SignoffContext, Verdict)>,
}

impl ReconciledReport {
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

/// Merge the required and observed sets into one report. A required context
/// passes only when the observed set holds a success entry for it; observed
/// contexts nobody required are appended with their own recorded verdict.
pub fn reconcile(required: &RequiredSet, observed: &ObservedSet) -> ReconciledReport {
    let mut entries: Vec<(SignoffContext, Verdict)> = Vec::new();
    for ctx in required.iter() {
        let verdict = match observed.verdict(ctx) {
            Some(Verdict::Success) => Verdict::Success,
            _ => Verdict::Failure,
        };
        entries.push((ctx.clone(), verdict));
    }
    for (ctx, verdict) in observed.iter() {
        if entries.iter().any(|(seen, _)| seen == ctx) {
            continue;
        }
        entries.push((ctx.clone(), *verdict));
    }
    ReconciledReport { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_names(report: &ReconciledReport) -> Vec<(String, Verdict)> {
        report
            .iter()
            .map(|(ctx, verdict)| (ctx.canonical(), *verdict))
            .collect()
    }

    #[test]
    fn empty_inputs_still_report_the_bare_context() {
        let report = reconcile(&RequiredSet::default_only(), &ObservedSet::default());
        assert_eq!(
            report_names(&report),
            vec![("signoff".to_string(), Verdict::Failure)]
        );
    }

    #[test]
    fn required_order_first_then_observed_order() {
        let required =
            RequiredSet::from_labels(vec!["tests".to_string(), "lint".to_string()]);
        let observed = ObservedSet::from_statuses([
            ("signoff/security", "failure"),
            ("signoff/tests", "success"),
        ]);
        let report = reconcile(&required, &observed);
        assert_eq!(
            report_names(&report),
            vec![
                ("signoff".to_string(), Verdict::Failure),
                ("signoff/tests".to_string(), Verdict::Success),
                ("signoff/lint".to_string(), Verdict::Failure),
                ("signoff/security".to_string(), Verdict::Failure),
            ]
        );
    }

    #[test]
    fn no_context_appears_twice() {
        let required = RequiredSet::from_labels(vec!["tests".to_string()]);
        let observed = ObservedSet::from_statuses([
            ("signoff/tests", "success"),
            ("signoff", "success"),
        ]);
        let report = reconcile(&required, &observed);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn reconcile_is_deterministic() {
        let required = RequiredSet::from_labels(vec!["a".to_string(), "b".to_string()]);
        let observed =
            ObservedSet::from_statuses([("signoff/c", "success"), ("signoff/a", "error")]);
        let first = reconcile(&required, &observed);
        let second = reconcile(&required, &observed);
        assert_eq!(first, second);
    }
}
