//! Cost engine: settings snapshot + catalog -> per-interaction estimates

use crate::catalog::{Cadence, Catalog, InteractionDefinition, Model, TokenRange};
use crate::core::settings::{GlobalSettings, InteractionSetting};
use crate::core::types::{Bounds, CostResult};
use crate::error::AppError;

/// Requests per month for one active user
pub(crate) fn monthly_requests(cadence: Cadence, request_count: u64, working_days: u64) -> f64 {
    match cadence {
        Cadence::Daily => request_count as f64 * working_days as f64,
        Cadence::Monthly => request_count as f64,
    }
}

fn token_totals(range: TokenRange, requests: f64, users: f64) -> Bounds {
    Bounds::new(range.min * requests * users, range.max * requests * users)
}

fn price(model: &Model, input: &Bounds, output: &Bounds, requests: f64, users: f64) -> Bounds {
    if let Some(per_unit) = model.unit_price() {
        return Bounds::flat(requests * users * per_unit);
    }
    let at = |input_tokens: f64, output_tokens: f64| {
        input_tokens * model.input_cost_per_1k / 1000.0
            + output_tokens * model.output_cost_per_1k / 1000.0
    };
    Bounds::new(at(input.min, output.min), at(input.max, output.max))
}

fn estimate_interaction(
    def: &InteractionDefinition,
    setting: &InteractionSetting,
    settings: &GlobalSettings,
    catalog: &Catalog,
) -> Result<CostResult, AppError> {
    let model_id = setting.model.resolve(&settings.default_model_id);
    let model = catalog
        .find_model(model_id)
        .ok_or_else(|| AppError::ModelNotFound {
            model_id: model_id.to_string(),
        })?;

    let requests = monthly_requests(
        def.usage.cadence,
        setting.request_count,
        settings.working_days_per_month,
    );
    let users = settings.effective_active_users(setting.active_users) as f64;

    let profile = setting.token_profile(def);
    let base = profile.base_tokens.unwrap_or(0.0);
    let input_tokens = token_totals(profile.input.offset(base), requests, users);
    let output_tokens = token_totals(profile.output, requests, users);
    let cost = price(model, &input_tokens, &output_tokens, requests, users);

    Ok(CostResult {
        interaction_id: def.id.clone(),
        interaction_name: def.name.clone(),
        model_id: model.id.clone(),
        model_name: model.name.clone(),
        monthly_request_volume: requests * users,
        input_tokens,
        output_tokens,
        cost,
    })
}

/// Estimate every enabled interaction, in catalog order
///
/// Disabled interactions are left out entirely. An unresolvable model id
/// fails the whole batch with [`AppError::ModelNotFound`].
pub(crate) fn calculate(
    settings: &GlobalSettings,
    catalog: &Catalog,
) -> Result<Vec<CostResult>, AppError> {
    let mut results = Vec::with_capacity(catalog.interactions().len());

    for def in catalog.interactions() {
        let fallback;
        let setting = match settings.interaction(&def.id) {
            Some(setting) => setting,
            None => {
                fallback = InteractionSetting::from_definition(def);
                &fallback
            }
        };
        if !setting.enabled {
            continue;
        }
        results.push(estimate_interaction(def, setting, settings, catalog)?);
    }

    Ok(results)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::catalog::ModelSelection;
    use crate::catalog::test_support::catalog;
    use crate::core::settings::{ActiveUserSource, default_settings};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn result<'a>(results: &'a [CostResult], id: &str) -> &'a CostResult {
        results.iter().find(|r| r.interaction_id == id).unwrap()
    }

    #[test]
    fn daily_token_priced_interaction() {
        let catalog = catalog();
        let settings = default_settings(&catalog);
        let results = calculate(&settings, &catalog).unwrap();
        let daily = result(&results, "daily");

        // 40 requests/day * 22 days * 4 admins
        assert_eq!(daily.monthly_request_volume, 3520.0);
        assert_eq!(daily.input_tokens, Bounds::flat(422_400.0));
        assert_eq!(daily.output_tokens, Bounds::new(2_816_000.0, 5_632_000.0));
        assert!(close(daily.cost.min, 88.704));
        assert!(close(daily.cost.max, 173.184));
        assert_eq!(daily.model_name, "FAST");
    }

    #[test]
    fn image_model_is_flat_per_unit() {
        let catalog = catalog();
        let settings = default_settings(&catalog);
        let results = calculate(&settings, &catalog).unwrap();
        let image = result(&results, "image");

        // 100 requests/month * 4 admins * $0.04
        assert!(close(image.cost.min, 16.0));
        assert_eq!(image.cost.min, image.cost.max);
        // token totals are still reported
        assert_eq!(image.input_tokens, Bounds::new(40_000.0, 80_000.0));
    }

    #[test]
    fn monthly_cadence_ignores_working_days() {
        let catalog = catalog();
        let mut settings = default_settings(&catalog);
        let before = calculate(&settings, &catalog).unwrap();
        settings.working_days_per_month = 30;
        let after = calculate(&settings, &catalog).unwrap();
        assert_eq!(result(&before, "image"), result(&after, "image"));
        assert_eq!(result(&before, "monthly"), result(&after, "monthly"));
        assert_ne!(result(&before, "daily"), result(&after, "daily"));
    }

    #[test]
    fn base_tokens_offset_input_only() {
        let catalog = catalog();
        let mut settings = default_settings(&catalog);
        settings.user_count = 1;
        let results = calculate(&settings, &catalog).unwrap();
        let monthly = result(&results, "monthly");

        // 10 requests * 1 user; base 50 added to input 100..200
        assert_eq!(monthly.input_tokens, Bounds::new(1500.0, 2500.0));
        assert_eq!(monthly.output_tokens, Bounds::new(3000.0, 6000.0));
    }

    #[test]
    fn override_base_replaces_catalog_base() {
        let catalog = catalog();
        let mut settings = default_settings(&catalog);
        settings.user_count = 1;
        let monthly = settings.interaction_settings.get_mut("monthly").unwrap();
        monthly.token_override.base_tokens = Some(0.0);
        let results = calculate(&settings, &catalog).unwrap();
        assert_eq!(
            result(&results, "monthly").input_tokens,
            Bounds::new(1000.0, 2000.0)
        );
    }

    #[test]
    fn disabled_interactions_are_excluded() {
        let catalog = catalog();
        let mut settings = default_settings(&catalog);
        settings.interaction_settings.get_mut("monthly").unwrap().enabled = false;
        let results = calculate(&settings, &catalog).unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.interaction_id.as_str()).collect();
        assert_eq!(ids, vec!["daily", "image"]);
    }

    #[test]
    fn results_follow_catalog_order() {
        let catalog = catalog();
        let results = calculate(&default_settings(&catalog), &catalog).unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.interaction_id.as_str()).collect();
        assert_eq!(ids, vec!["daily", "monthly", "image"]);
    }

    #[test]
    fn default_model_follows_global_default() {
        let catalog = catalog();
        let mut settings = default_settings(&catalog);
        let before = calculate(&settings, &catalog).unwrap();
        assert_eq!(result(&before, "monthly").model_id, "fast");

        settings.default_model_id = "cheap".to_string();
        let after = calculate(&settings, &catalog).unwrap();
        assert_eq!(result(&after, "monthly").model_id, "cheap");
        assert!(result(&after, "monthly").cost.max < result(&before, "monthly").cost.max);
        // interactions pinned to a specific model are unaffected
        assert_eq!(result(&after, "daily"), result(&before, "daily"));
    }

    #[test]
    fn unknown_model_fails_whole_batch() {
        let catalog = catalog();
        let mut settings = default_settings(&catalog);
        settings.interaction_settings.get_mut("image").unwrap().model =
            ModelSelection::Specific("retired".into());
        let err = calculate(&settings, &catalog).unwrap_err();
        assert!(matches!(err, AppError::ModelNotFound { model_id } if model_id == "retired"));
    }

    #[test]
    fn unknown_model_on_disabled_interaction_is_ignored() {
        let catalog = catalog();
        let mut settings = default_settings(&catalog);
        let image = settings.interaction_settings.get_mut("image").unwrap();
        image.model = ModelSelection::Specific("retired".into());
        image.enabled = false;
        assert_eq!(calculate(&settings, &catalog).unwrap().len(), 2);
    }

    #[test]
    fn custom_users_are_used_verbatim() {
        let catalog = catalog();
        let mut settings = default_settings(&catalog);
        settings.interaction_settings.get_mut("daily").unwrap().active_users =
            ActiveUserSource::Custom(1);
        let results = calculate(&settings, &catalog).unwrap();
        assert_eq!(result(&results, "daily").monthly_request_volume, 880.0);
    }

    #[test]
    fn missing_interaction_setting_uses_definition_defaults() {
        let catalog = catalog();
        let mut settings = default_settings(&catalog);
        let expected = calculate(&settings, &catalog).unwrap();
        settings.interaction_settings.clear();
        assert_eq!(calculate(&settings, &catalog).unwrap(), expected);
    }

    #[test]
    fn cost_bounds_are_ordered_and_non_negative() {
        let catalog = Catalog::builtin().unwrap();
        let results = calculate(&default_settings(&catalog), &catalog).unwrap();
        assert!(!results.is_empty());
        for r in &results {
            assert!(r.cost.min >= 0.0, "{}", r.interaction_id);
            assert!(r.cost.min <= r.cost.max, "{}", r.interaction_id);
            assert!(r.monthly_request_volume >= 0.0);
        }
    }

    #[test]
    fn calculate_is_idempotent() {
        let catalog = Catalog::builtin().unwrap();
        let settings = default_settings(&catalog);
        let first = calculate(&settings, &catalog).unwrap();
        let second = calculate(&settings, &catalog).unwrap();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.cost.min.to_bits(), b.cost.min.to_bits());
            assert_eq!(a.cost.max.to_bits(), b.cost.max.to_bits());
        }
    }

    #[test]
    fn monthly_requests_by_cadence() {
        assert_eq!(monthly_requests(Cadence::Daily, 40, 22), 880.0);
        assert_eq!(monthly_requests(Cadence::Monthly, 40, 22), 40.0);
    }
}
