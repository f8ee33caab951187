mod catalog;
mod csv;
mod format;
mod json;
mod report;
mod summary;
mod table;

pub(crate) use catalog::{
    output_interactions_json, output_models_json, print_interactions_table, print_models_table,
};
pub(crate) use csv::output_estimate_csv;
pub(crate) use format::NumberFormat;
pub(crate) use json::{output_estimate_json, output_settings_json};
pub(crate) use report::render_markdown_report;
pub(crate) use summary::{print_summary, summary_json, summary_line};
pub(crate) use table::{EstimateTableOptions, print_estimate_table};
