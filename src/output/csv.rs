use std::fmt::Write;

use crate::core::{CostResult, total_cost};

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Estimate as CSV: one row per interaction, then a TOTAL row
pub(crate) fn output_estimate_csv(results: &[CostResult]) -> String {
    let mut out = String::new();
    out.push_str(
        "interaction_id,interaction,model,monthly_requests,input_tokens_min,input_tokens_max,output_tokens_min,output_tokens_max,cost_min,cost_max\n",
    );

    let mut requests = 0.0;
    for r in results {
        requests += r.monthly_request_volume;
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{:.6},{:.6}",
            csv_escape(&r.interaction_id),
            csv_escape(&r.interaction_name),
            csv_escape(&r.model_id),
            r.monthly_request_volume,
            r.input_tokens.min,
            r.input_tokens.max,
            r.output_tokens.min,
            r.output_tokens.max,
            r.cost.min,
            r.cost.max,
        );
    }

    let input_min: f64 = results.iter().map(|r| r.input_tokens.min).sum();
    let input_max: f64 = results.iter().map(|r| r.input_tokens.max).sum();
    let output_min: f64 = results.iter().map(|r| r.output_tokens.min).sum();
    let output_max: f64 = results.iter().map(|r| r.output_tokens.max).sum();
    let total = total_cost(results);
    let _ = writeln!(
        out,
        "TOTAL,,,{requests},{input_min},{input_max},{output_min},{output_max},{:.6},{:.6}",
        total.min, total.max
    );

    out
}
