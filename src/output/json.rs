use crate::core::{CostResult, GlobalSettings, total_cost};
use crate::error::AppError;

pub(crate) fn output_estimate_json(results: &[CostResult]) -> Result<String, AppError> {
    let output = serde_json::json!({
        "results": results,
        "total": total_cost(results),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

pub(crate) fn output_settings_json(settings: &GlobalSettings) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(settings)?)
}
