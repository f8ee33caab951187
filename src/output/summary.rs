use crate::core::{CostResult, GlobalSettings, total_cost};
use crate::output::format::{NumberFormat, format_cost, format_range};

/// One-line total for shell prompts and status bars
/// Format: "AI cost: $a - $b/mo | N interactions | M disabled"
pub(crate) fn summary_line(
    results: &[CostResult],
    settings: &GlobalSettings,
    number_format: NumberFormat,
) -> String {
    let total = total_cost(results);
    let mut parts = vec![
        format!(
            "AI cost: {}/mo",
            format_range(&total, |v| format_cost(v, number_format))
        ),
        format!("{} interactions", results.len()),
    ];
    let disabled = settings.disabled_count();
    if disabled > 0 {
        parts.push(format!("{disabled} disabled"));
    }
    parts.join(" | ")
}

pub(crate) fn print_summary(
    results: &[CostResult],
    settings: &GlobalSettings,
    number_format: NumberFormat,
) {
    println!("{}", summary_line(results, settings, number_format));
}

/// Summary as JSON for programmatic consumption
pub(crate) fn summary_json(results: &[CostResult], settings: &GlobalSettings) -> String {
    let total = total_cost(results);
    let output = serde_json::json!({
        "total": total,
        "interactions": results.len(),
        "disabled": settings.disabled_count(),
    });
    serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::catalog;
    use crate::core::{calculate, default_settings};

    #[test]
    fn summary_counts_enabled_and_disabled() {
        let catalog = catalog();
        let mut settings = default_settings(&catalog);
        settings
            .interaction_settings
            .get_mut("monthly")
            .unwrap()
            .enabled = false;
        let results = calculate(&settings, &catalog).unwrap();
        let line = summary_line(&results, &settings, NumberFormat::default());
        assert!(line.starts_with("AI cost: $"));
        assert!(line.contains("/mo | 2 interactions | 1 disabled"));
    }

    #[test]
    fn summary_omits_disabled_when_none() {
        let catalog = catalog();
        let settings = default_settings(&catalog);
        let line = summary_line(&[], &settings, NumberFormat::default());
        assert_eq!(line, "AI cost: $0.00/mo | 0 interactions");
    }

    #[test]
    fn summary_json_shape() {
        let catalog = catalog();
        let settings = default_settings(&catalog);
        let json: serde_json::Value = serde_json::from_str(&summary_json(&[], &settings)).unwrap();
        assert_eq!(json["interactions"], 0);
        assert_eq!(json["disabled"], 0);
        assert_eq!(json["total"]["min"], 0.0);
    }
}
