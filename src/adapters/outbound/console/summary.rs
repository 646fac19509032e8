use crate::compatibility::domain::AnalysisSummary;
use owo_colors::OwoColorize;

/// One status line per non-zero counter, for the end-of-run console summary.
///
/// `colored` switches ANSI colors on; callers pass whether stderr is a
/// terminal.
pub fn render_summary(summary: &AnalysisSummary, colored: bool) -> String {
    let rows: [(&str, usize, fn(&str) -> String); 6] = [
        ("compatible", summary.compatible, |s| s.green().to_string()),
        ("incompatible", summary.incompatible, |s| s.red().bold().to_string()),
        ("needs upgrade", summary.needs_upgrade, |s| s.yellow().to_string()),
        ("needs verification", summary.needs_verification, |s| s.cyan().to_string()),
        (
            "needs version verification",
            summary.needs_version_verification,
            |s| s.cyan().to_string(),
        ),
        ("unknown", summary.unknown, |s| s.dimmed().to_string()),
    ];

    let mut output = format!("📊 {} component(s) analyzed\n", summary.total_components);
    for (label, count, paint) in rows {
        if count == 0 {
            continue;
        }
        let line = format!("{:>6}  {}", count, label);
        output.push_str("   ");
        output.push_str(&if colored { paint(&line) } else { line });
        output.push('\n');
    }
    output
}
