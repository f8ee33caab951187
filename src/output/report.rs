//! Markdown cost report for sharing outside the terminal

use std::fmt::Write;

use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::consts::DATE_FORMAT;
use crate::core::{Bounds, CostResult, GlobalSettings, total_cost};
use crate::output::format::{NumberFormat, format_cost, format_count, format_range};

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

pub(crate) fn render_markdown_report(
    results: &[CostResult],
    settings: &GlobalSettings,
    catalog: &Catalog,
    number_format: NumberFormat,
    generated: NaiveDate,
) -> String {
    let nf = number_format;
    let tokens = |b: &Bounds| format_range(b, |v| format_count(v, nf, false));
    let cost = |b: &Bounds| format_range(b, |v| format_cost(v, nf));

    let mut out = String::new();
    let _ = writeln!(out, "# AI Cost Estimate\n");
    let _ = writeln!(out, "Generated: {}\n", generated.format(DATE_FORMAT));

    let _ = writeln!(
        out,
        "| Interaction | Model | Requests/mo | Input Tokens | Output Tokens | Monthly Cost |"
    );
    let _ = writeln!(out, "|---|---|---:|---:|---:|---:|");
    for r in results {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            md_escape(&r.interaction_name),
            md_escape(&r.model_name),
            format_count(r.monthly_request_volume, nf, false),
            tokens(&r.input_tokens),
            tokens(&r.output_tokens),
            cost(&r.cost),
        );
    }

    let total = total_cost(results);
    let _ = writeln!(out, "\n**Total: {} per month**\n", cost(&total));

    let default_model = catalog
        .find_model(&settings.default_model_id)
        .map_or(settings.default_model_id.as_str(), |m| m.name.as_str());

    let _ = writeln!(out, "## Settings\n");
    let _ = writeln!(out, "- Admins: {}", format_count(settings.admin_count as f64, nf, false));
    let _ = writeln!(out, "- Users: {}", format_count(settings.user_count as f64, nf, false));
    let _ = writeln!(out, "- Working days per month: {}", settings.working_days_per_month);
    let _ = writeln!(out, "- Default model: {}", md_escape(default_model));
    let disabled = settings.disabled_count();
    if disabled > 0 {
        let _ = writeln!(out, "- Disabled interactions: {disabled}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::catalog;
    use crate::core::{calculate, default_settings};

    #[test]
    fn report_contains_table_total_and_settings() {
        let catalog = catalog();
        let settings = default_settings(&catalog);
        let results = calculate(&settings, &catalog).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let report =
            render_markdown_report(&results, &settings, &catalog, NumberFormat::default(), date);

        assert!(report.starts_with("# AI Cost Estimate\n"));
        assert!(report.contains("Generated: 2025-03-14"));
        assert!(report.contains("| daily name | FAST |"));
        assert!(report.contains("**Total: "));
        assert!(report.contains("- Admins: 4"));
        assert!(report.contains("- Users: 1,000"));
        assert!(report.contains("- Working days per month: 22"));
        assert!(report.contains("- Default model: FAST"));
        assert!(!report.contains("Disabled interactions"));
    }

    #[test]
    fn pipes_are_escaped() {
        assert_eq!(md_escape("a|b"), "a\\|b");
    }
}
