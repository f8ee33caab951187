use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;

use super::types::{InteractionDefinition, Model, ModelSelection, Provider};

const BUILTIN_MODELS: &str = include_str!("data/models.json");
const BUILTIN_INTERACTIONS: &str = include_str!("data/interactions.json");

pub(crate) const MODELS_FILE: &str = "models.json";
pub(crate) const INTERACTIONS_FILE: &str = "interactions.json";

/// Read-only model price table and interaction list
#[derive(Debug, Clone)]
pub(crate) struct Catalog {
    providers: Vec<Provider>,
    interactions: Vec<InteractionDefinition>,
}

impl Catalog {
    /// Build a catalog, rejecting tables that break the catalog invariants
    pub(crate) fn new(
        providers: Vec<Provider>,
        interactions: Vec<InteractionDefinition>,
    ) -> Result<Self, CatalogError> {
        let catalog = Catalog {
            providers,
            interactions,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub(crate) fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_MODELS, BUILTIN_INTERACTIONS)
    }

    pub(crate) fn from_json(models: &str, interactions: &str) -> Result<Self, CatalogError> {
        let providers: Vec<Provider> =
            serde_json::from_str(models).map_err(|source| CatalogError::Parse {
                what: MODELS_FILE.to_string(),
                source,
            })?;
        let interactions: Vec<InteractionDefinition> =
            serde_json::from_str(interactions).map_err(|source| CatalogError::Parse {
                what: INTERACTIONS_FILE.to_string(),
                source,
            })?;
        Self::new(providers, interactions)
    }

    /// Load `models.json` and `interactions.json` from a directory
    pub(crate) fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| CatalogError::Read { path, source })
        };
        let models = read(MODELS_FILE)?;
        let interactions = read(INTERACTIONS_FILE)?;
        Self::from_json(&models, &interactions)
    }

    pub(crate) fn load(dir: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match dir {
            Some(dir) => {
                tracing::debug!(dir = %dir.display(), "loading catalog from directory");
                Self::from_dir(dir)?
            }
            None => Self::builtin()?,
        };
        tracing::debug!(
            providers = catalog.providers.len(),
            interactions = catalog.interactions.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut model_ids = HashSet::new();
        for model in self.models() {
            if !model_ids.insert(model.id.as_str()) {
                return Err(CatalogError::DuplicateModel(model.id.clone()));
            }
        }
        if model_ids.is_empty() {
            return Err(CatalogError::NoModels);
        }

        let mut interaction_ids = HashSet::new();
        for def in &self.interactions {
            if !interaction_ids.insert(def.id.as_str()) {
                return Err(CatalogError::DuplicateInteraction(def.id.clone()));
            }
            let profile = &def.token_profile;
            if !profile.input.is_valid() {
                return Err(CatalogError::InvalidRange {
                    interaction: def.id.clone(),
                    which: "input",
                });
            }
            if !profile.output.is_valid() {
                return Err(CatalogError::InvalidRange {
                    interaction: def.id.clone(),
                    which: "output",
                });
            }
            if profile.base_tokens.is_some_and(|base| base < 0.0) {
                return Err(CatalogError::NegativeBase(def.id.clone()));
            }
            let referenced = match &def.default_model_id {
                ModelSelection::Specific(id) => Some(id),
                ModelSelection::Default => None,
            };
            for model in referenced.into_iter().chain(&def.allowed_models) {
                if !model_ids.contains(model.as_str()) {
                    return Err(CatalogError::UnknownModel {
                        interaction: def.id.clone(),
                        model: model.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub(crate) fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub(crate) fn interactions(&self) -> &[InteractionDefinition] {
        &self.interactions
    }

    pub(crate) fn models(&self) -> impl Iterator<Item = &Model> {
        self.providers.iter().flat_map(|p| p.models.iter())
    }

    pub(crate) fn find_model(&self, id: &str) -> Option<&Model> {
        self.models().find(|m| m.id == id)
    }

    pub(crate) fn interaction(&self, id: &str) -> Option<&InteractionDefinition> {
        self.interactions.iter().find(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{definition, provider, token_model};
    use crate::catalog::types::TokenRange;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.interactions().is_empty());
        assert!(catalog.find_model("gpt-4o").is_some());
        assert!(catalog.interaction("image-generation").is_some());
    }

    #[test]
    fn builtin_image_model_is_unit_priced() {
        let catalog = Catalog::builtin().unwrap();
        let model = catalog.find_model("gpt-image-1").unwrap();
        assert_eq!(model.unit_price(), Some(0.04));
        let def = catalog.interaction("image-generation").unwrap();
        assert!(def.allows_model("gpt-image-1"));
        assert!(!def.allows_model("gpt-4o"));
    }

    #[test]
    fn rejects_duplicate_model_ids() {
        let providers = vec![
            provider("a", vec![token_model("m1", 0.01, 0.03)]),
            provider("b", vec![token_model("m1", 0.02, 0.04)]),
        ];
        let err = Catalog::new(providers, vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateModel(id) if id == "m1"));
    }

    #[test]
    fn rejects_empty_model_table() {
        let err = Catalog::new(vec![], vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::NoModels));
    }

    #[test]
    fn rejects_inverted_range() {
        let mut def = definition("chat", "m1");
        def.token_profile.output = TokenRange::new(500.0, 100.0);
        let providers = vec![provider("a", vec![token_model("m1", 0.01, 0.03)])];
        let err = Catalog::new(providers, vec![def]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidRange { which: "output", .. }
        ));
    }

    #[test]
    fn rejects_negative_base_tokens() {
        let mut def = definition("chat", "m1");
        def.token_profile.base_tokens = Some(-5.0);
        let providers = vec![provider("a", vec![token_model("m1", 0.01, 0.03)])];
        let err = Catalog::new(providers, vec![def]).unwrap_err();
        assert!(matches!(err, CatalogError::NegativeBase(_)));
    }

    #[test]
    fn rejects_unknown_default_model() {
        let def = definition("chat", "missing");
        let providers = vec![provider("a", vec![token_model("m1", 0.01, 0.03)])];
        let err = Catalog::new(providers, vec![def]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownModel { model, .. } if model == "missing"
        ));
    }

    #[test]
    fn accepts_default_sentinel_as_default_model() {
        let def = definition("chat", "default");
        let providers = vec![provider("a", vec![token_model("m1", 0.01, 0.03)])];
        assert!(Catalog::new(providers, vec![def]).is_ok());
    }

    #[test]
    fn rejects_duplicate_interactions() {
        let providers = vec![provider("a", vec![token_model("m1", 0.01, 0.03)])];
        let defs = vec![definition("chat", "m1"), definition("chat", "m1")];
        let err = Catalog::new(providers, defs).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateInteraction(_)));
    }

    #[test]
    fn from_json_reports_which_table_failed() {
        let err = Catalog::from_json("[]", "not json").unwrap_err();
        assert!(err.to_string().contains(INTERACTIONS_FILE));
    }

    #[test]
    fn from_dir_reads_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MODELS_FILE), BUILTIN_MODELS).unwrap();
        fs::write(dir.path().join(INTERACTIONS_FILE), BUILTIN_INTERACTIONS).unwrap();
        let catalog = Catalog::from_dir(dir.path()).unwrap();
        assert_eq!(
            catalog.interactions().len(),
            Catalog::builtin().unwrap().interactions().len()
        );
    }

    #[test]
    fn from_dir_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
