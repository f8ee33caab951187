//! Static catalog: model price table and interaction definitions

mod db;
mod types;

pub(crate) use db::Catalog;
pub(crate) use types::{
    Audience, Cadence, InteractionDefinition, Model, ModelSelection, TokenProfile, TokenRange,
};
