//! Settings reducer
//!
//! Every edit is an [`Action`]; [`reduce`] returns a new snapshot and leaves
//! its input untouched.

use crate::catalog::{Catalog, ModelSelection, TokenRange};
use crate::core::settings::{
    ActiveUserMode, ActiveUserSource, GlobalSettings, InteractionSetting, default_settings,
};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    SetAdminCount(u64),
    SetUserCount(u64),
    SetWorkingDays(u64),
    SetDefaultModel(String),
    SetModel {
        interaction: String,
        model: ModelSelection,
    },
    SetRequestCount {
        interaction: String,
        count: u64,
    },
    /// Switches the interaction to a custom count
    SetActiveUsers {
        interaction: String,
        count: u64,
    },
    SetActiveUserMode {
        interaction: String,
        mode: ActiveUserMode,
    },
    SetEnabled {
        interaction: String,
        enabled: bool,
    },
    /// `None` drops the override so the catalog base applies again
    SetBaseTokens {
        interaction: String,
        base: Option<f64>,
    },
    SetInputRange {
        interaction: String,
        range: TokenRange,
    },
    SetOutputRange {
        interaction: String,
        range: TokenRange,
    },
    ClearTokenOverride {
        interaction: String,
    },
    Reset,
}

impl Action {
    /// Short human-readable description, used for confirmations
    pub(crate) fn describe(&self) -> String {
        match self {
            Action::SetAdminCount(n) => format!("admin count set to {n}"),
            Action::SetUserCount(n) => format!("user count set to {n}"),
            Action::SetWorkingDays(n) => format!("working days per month set to {n}"),
            Action::SetDefaultModel(id) => format!("default model set to {id}"),
            Action::SetModel { interaction, model } => {
                let model: String = model.clone().into();
                format!("{interaction}: model set to {model}")
            }
            Action::SetRequestCount { interaction, count } => {
                format!("{interaction}: requests set to {count}")
            }
            Action::SetActiveUsers { interaction, count } => {
                format!("{interaction}: active users set to {count} (custom)")
            }
            Action::SetActiveUserMode { interaction, mode } => {
                format!("{interaction}: active users follow {} mode", mode.label())
            }
            Action::SetEnabled {
                interaction,
                enabled,
            } => {
                let state = if *enabled { "enabled" } else { "disabled" };
                format!("{interaction}: {state}")
            }
            Action::SetBaseTokens { interaction, base } => match base {
                Some(base) => format!("{interaction}: base tokens set to {base}"),
                None => format!("{interaction}: base tokens reset to catalog default"),
            },
            Action::SetInputRange { interaction, range } => {
                format!("{interaction}: input tokens set to {}-{}", range.min, range.max)
            }
            Action::SetOutputRange { interaction, range } => {
                format!("{interaction}: output tokens set to {}-{}", range.min, range.max)
            }
            Action::ClearTokenOverride { interaction } => {
                format!("{interaction}: token ranges reset to catalog defaults")
            }
            Action::Reset => "settings reset to defaults".to_string(),
        }
    }
}

fn interaction_mut<'a>(
    settings: &'a mut GlobalSettings,
    id: &str,
    catalog: &Catalog,
) -> Result<&'a mut InteractionSetting, AppError> {
    let def = catalog
        .interaction(id)
        .ok_or_else(|| AppError::UnknownInteraction { id: id.to_string() })?;
    Ok(settings
        .interaction_settings
        .entry(def.id.clone())
        .or_insert_with(|| InteractionSetting::from_definition(def)))
}

fn require_model(catalog: &Catalog, model_id: &str) -> Result<(), AppError> {
    match catalog.find_model(model_id) {
        Some(_) => Ok(()),
        None => Err(AppError::ModelNotFound {
            model_id: model_id.to_string(),
        }),
    }
}

fn require_range(range: TokenRange) -> Result<TokenRange, AppError> {
    if range.is_valid() {
        Ok(range)
    } else {
        Err(AppError::InvalidTokenRange {
            min: range.min,
            max: range.max,
        })
    }
}

/// Apply one edit, producing the next snapshot
pub(crate) fn reduce(
    settings: &GlobalSettings,
    action: Action,
    catalog: &Catalog,
) -> Result<GlobalSettings, AppError> {
    tracing::debug!(?action, "applying settings action");
    let mut next = settings.clone();

    match action {
        Action::SetAdminCount(count) => next.admin_count = count,
        Action::SetUserCount(count) => next.user_count = count,
        Action::SetWorkingDays(days) => next.working_days_per_month = days,
        Action::SetDefaultModel(model_id) => {
            require_model(catalog, &model_id)?;
            for def in catalog.interactions() {
                let follows_default = next
                    .interaction(&def.id)
                    .map_or(def.default_model_id == ModelSelection::Default, |s| {
                        s.model == ModelSelection::Default
                    });
                if follows_default && !def.allows_model(&model_id) {
                    return Err(AppError::ModelNotAllowed {
                        model_id,
                        interaction_id: def.id.clone(),
                    });
                }
            }
            next.default_model_id = model_id;
        }
        Action::SetModel { interaction, model } => {
            if let ModelSelection::Specific(model_id) = &model {
                require_model(catalog, model_id)?;
            }
            let def = catalog
                .interaction(&interaction)
                .ok_or_else(|| AppError::UnknownInteraction {
                    id: interaction.clone(),
                })?;
            // "default" must also land on a model the interaction accepts
            let model_id = model.resolve(&next.default_model_id);
            if !def.allows_model(model_id) {
                return Err(AppError::ModelNotAllowed {
                    model_id: model_id.to_string(),
                    interaction_id: interaction,
                });
            }
            interaction_mut(&mut next, &interaction, catalog)?.model = model;
        }
        Action::SetRequestCount { interaction, count } => {
            interaction_mut(&mut next, &interaction, catalog)?.request_count = count;
        }
        Action::SetActiveUsers { interaction, count } => {
            interaction_mut(&mut next, &interaction, catalog)?.active_users =
                ActiveUserSource::Custom(count);
        }
        Action::SetActiveUserMode { interaction, mode } => {
            let (admins, users) = (next.admin_count, next.user_count);
            let setting = interaction_mut(&mut next, &interaction, catalog)?;
            setting.active_users = match mode {
                ActiveUserMode::Admin => ActiveUserSource::Admin,
                ActiveUserMode::User => ActiveUserSource::User,
                // keep whatever count was in effect when switching
                ActiveUserMode::Custom => ActiveUserSource::Custom(match setting.active_users {
                    ActiveUserSource::Admin => admins,
                    ActiveUserSource::User => users,
                    ActiveUserSource::Custom(count) => count,
                }),
            };
        }
        Action::SetEnabled {
            interaction,
            enabled,
        } => {
            interaction_mut(&mut next, &interaction, catalog)?.enabled = enabled;
        }
        Action::SetBaseTokens { interaction, base } => {
            if let Some(value) = base.filter(|v| !v.is_finite() || *v < 0.0) {
                return Err(AppError::InvalidBaseTokens { value });
            }
            interaction_mut(&mut next, &interaction, catalog)?
                .token_override
                .base_tokens = base;
        }
        Action::SetInputRange { interaction, range } => {
            let range = require_range(range)?;
            interaction_mut(&mut next, &interaction, catalog)?
                .token_override
                .input = Some(range);
        }
        Action::SetOutputRange { interaction, range } => {
            let range = require_range(range)?;
            interaction_mut(&mut next, &interaction, catalog)?
                .token_override
                .output = Some(range);
        }
        Action::ClearTokenOverride { interaction } => {
            interaction_mut(&mut next, &interaction, catalog)?.token_override = Default::default();
        }
        Action::Reset => next = default_settings(catalog),
    }

    Ok(next)
}
