use signoff_core::{ReconciledReport, Verdict};

/// Success glyph.
pub const CHECK: &str = "✓";
/// Failure glyph.
pub const CROSS: &str = "✗";
/// Reserved for a future pending state; no verdict maps to it yet.
#[allow(dead_code)]
pub const HOURGLASS: &str = "⌛";

pub fn glyph(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Success => CHECK,
        Verdict::Failure => CROSS,
    }
}

/// One line per report entry, required order first.
pub fn print_report(report: &ReconciledReport) {
    for (ctx, verdict) in report.iter() {
        println!("{} {}", glyph(*verdict), ctx.display_name());
    }
}
