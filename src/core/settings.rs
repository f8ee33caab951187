//! Settings snapshot and the rules that reconcile it with the catalog
//!
//! A stored snapshot may be partial or stale (written against an older
//! catalog). [`resolve_settings`] fills every gap from catalog defaults
//! without discarding what the user customised.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::catalog::{Audience, Catalog, InteractionDefinition, ModelSelection, TokenProfile, TokenRange};
use crate::consts::{
    DEFAULT_ADMIN_COUNT, DEFAULT_GLOBAL_MODEL, DEFAULT_USER_COUNT, DEFAULT_WORKING_DAYS,
};

/// Where an interaction's active user count comes from
///
/// `Admin` and `User` are read from the global counts every time, so a
/// stale per-interaction count can never be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "count", rename_all = "lowercase")]
pub(crate) enum ActiveUserSource {
    Admin,
    User,
    Custom(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActiveUserMode {
    Admin,
    User,
    Custom,
}

impl ActiveUserMode {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ActiveUserMode::Admin => "admin",
            ActiveUserMode::User => "user",
            ActiveUserMode::Custom => "custom",
        }
    }
}

impl ActiveUserSource {
    pub(crate) fn for_audience(audience: Audience) -> Self {
        match audience {
            Audience::Admin => ActiveUserSource::Admin,
            Audience::User | Audience::Both => ActiveUserSource::User,
        }
    }

    pub(crate) fn mode(self) -> ActiveUserMode {
        match self {
            ActiveUserSource::Admin => ActiveUserMode::Admin,
            ActiveUserSource::User => ActiveUserMode::User,
            ActiveUserSource::Custom(_) => ActiveUserMode::Custom,
        }
    }
}

/// Per-interaction token override; each part falls back to the catalog on its own
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct TokenOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) base_tokens: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) input: Option<TokenRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) output: Option<TokenRange>,
}

impl TokenOverride {
    pub(crate) fn is_empty(&self) -> bool {
        self.base_tokens.is_none() && self.input.is_none() && self.output.is_none()
    }

    /// Effective profile: override fields where set, catalog profile otherwise
    pub(crate) fn apply(&self, profile: &TokenProfile) -> TokenProfile {
        TokenProfile {
            base_tokens: self.base_tokens.or(profile.base_tokens),
            input: self.input.unwrap_or(profile.input),
            output: self.output.unwrap_or(profile.output),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct InteractionSetting {
    pub(crate) model: ModelSelection,
    pub(crate) request_count: u64,
    pub(crate) active_users: ActiveUserSource,
    pub(crate) enabled: bool,
    #[serde(default, skip_serializing_if = "TokenOverride::is_empty")]
    pub(crate) token_override: TokenOverride,
}

impl InteractionSetting {
    pub(crate) fn from_definition(def: &InteractionDefinition) -> Self {
        InteractionSetting {
            model: def.default_model_id.clone(),
            request_count: def.usage.default_request_count,
            active_users: ActiveUserSource::for_audience(def.audience),
            enabled: true,
            token_override: TokenOverride::default(),
        }
    }

    pub(crate) fn token_profile(&self, def: &InteractionDefinition) -> TokenProfile {
        self.token_override.apply(&def.token_profile)
    }
}

/// Complete, internally consistent settings snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct GlobalSettings {
    pub(crate) admin_count: u64,
    pub(crate) user_count: u64,
    pub(crate) working_days_per_month: u64,
    pub(crate) default_model_id: String,
    pub(crate) interaction_settings: BTreeMap<String, InteractionSetting>,
}

impl GlobalSettings {
    /// Active users for an interaction, decided by mode at read time
    pub(crate) fn effective_active_users(&self, source: ActiveUserSource) -> u64 {
        match source {
            ActiveUserSource::Admin => self.admin_count,
            ActiveUserSource::User => self.user_count,
            ActiveUserSource::Custom(count) => count,
        }
    }

    pub(crate) fn interaction(&self, id: &str) -> Option<&InteractionSetting> {
        self.interaction_settings.get(id)
    }

    pub(crate) fn disabled_count(&self) -> usize {
        self.interaction_settings
            .values()
            .filter(|s| !s.enabled)
            .count()
    }
}

/// Stored snapshot as read from disk: any field may be missing
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct StoredSettings {
    admin_count: Option<u64>,
    user_count: Option<u64>,
    working_days_per_month: Option<u64>,
    default_model_id: Option<String>,
    interaction_settings: HashMap<String, StoredInteractionSetting>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredInteractionSetting {
    model: Option<ModelSelection>,
    request_count: Option<u64>,
    active_users: Option<ActiveUserSource>,
    enabled: Option<bool>,
    token_override: Option<TokenOverride>,
}

impl StoredInteractionSetting {
    fn merge_onto(self, defaults: InteractionSetting) -> InteractionSetting {
        InteractionSetting {
            model: self.model.unwrap_or(defaults.model),
            request_count: self.request_count.unwrap_or(defaults.request_count),
            active_users: self.active_users.unwrap_or(defaults.active_users),
            enabled: self.enabled.unwrap_or(defaults.enabled),
            token_override: self.token_override.unwrap_or(defaults.token_override),
        }
    }
}

fn default_global_model(catalog: &Catalog) -> String {
    if catalog.find_model(DEFAULT_GLOBAL_MODEL).is_some() {
        return DEFAULT_GLOBAL_MODEL.to_string();
    }
    catalog
        .models()
        .next()
        .map(|m| m.id.clone())
        .unwrap_or_else(|| DEFAULT_GLOBAL_MODEL.to_string())
}

/// Fill a stored snapshot into a complete [`GlobalSettings`]
///
/// Settings for interactions no longer in the catalog are dropped.
pub(crate) fn resolve_settings(stored: StoredSettings, catalog: &Catalog) -> GlobalSettings {
    let mut stored_interactions = stored.interaction_settings;

    let interaction_settings: BTreeMap<String, InteractionSetting> = catalog
        .interactions()
        .iter()
        .map(|def| {
            let defaults = InteractionSetting::from_definition(def);
            let setting = match stored_interactions.remove(&def.id) {
                Some(stored) => stored.merge_onto(defaults),
                None => defaults,
            };
            (def.id.clone(), setting)
        })
        .collect();

    for id in stored_interactions.keys() {
        tracing::debug!(interaction = %id, "ignoring settings for interaction not in catalog");
    }

    GlobalSettings {
        admin_count: stored.admin_count.unwrap_or(DEFAULT_ADMIN_COUNT),
        user_count: stored.user_count.unwrap_or(DEFAULT_USER_COUNT),
        working_days_per_month: stored.working_days_per_month.unwrap_or(DEFAULT_WORKING_DAYS),
        default_model_id: stored
            .default_model_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| default_global_model(catalog)),
        interaction_settings,
    }
}

/// Settings used on first run and on explicit reset
pub(crate) fn default_settings(catalog: &Catalog) -> GlobalSettings {
    resolve_settings(StoredSettings::default(), catalog)
}

/// Parse and resolve a serialized snapshot
pub(crate) fn parse_snapshot(json: &str, catalog: &Catalog) -> Result<GlobalSettings, serde_json::Error> {
    let stored: StoredSettings = serde_json::from_str(json)?;
    Ok(resolve_settings(stored, catalog))
}
