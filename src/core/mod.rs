//! Core module - settings reconciliation and the cost engine
//!
//! Everything here is pure: no I/O, no clock, no global state.

mod aggregator;
mod engine;
mod reducer;
mod settings;
mod types;

pub(crate) use aggregator::total_cost;
pub(crate) use engine::calculate;
pub(crate) use reducer::{Action, reduce};
pub(crate) use settings::{
    ActiveUserMode, ActiveUserSource, GlobalSettings, default_settings, parse_snapshot,
};
pub(crate) use types::{Bounds, CostResult};
