use comfy_table::{Cell, Color, Table};

use crate::catalog::{Catalog, InteractionDefinition, Model, TokenRange};
use crate::core::{ActiveUserSource, GlobalSettings};
use crate::error::AppError;
use crate::output::format::{
    NumberFormat, create_styled_table, format_count, header_cell, right_cell, styled_cell,
};

fn price(value: f64) -> String {
    format!("${value:.4}")
}

fn model_prices(model: &Model) -> (String, String, String) {
    match model.unit_price() {
        Some(unit) => ("-".into(), "-".into(), price(unit)),
        None => (
            price(model.input_cost_per_1k),
            price(model.output_cost_per_1k),
            "-".into(),
        ),
    }
}

pub(crate) fn build_models_table(catalog: &Catalog, use_color: bool) -> Table {
    let c = use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Provider", c),
        header_cell("Model", c),
        header_cell("ID", c),
        header_cell("Input/1K", c),
        header_cell("Output/1K", c),
        header_cell("Per Unit", c),
    ]);

    let cost_color = if use_color { Some(Color::Green) } else { None };
    for provider in catalog.providers() {
        for (i, model) in provider.models.iter().enumerate() {
            let (input, output, unit) = model_prices(model);
            table.add_row(vec![
                styled_cell(if i == 0 { provider.name.as_str() } else { "" }, None, i == 0),
                Cell::new(&model.name),
                Cell::new(&model.id),
                right_cell(&input, cost_color, false),
                right_cell(&output, cost_color, false),
                right_cell(&unit, cost_color, false),
            ]);
        }
    }
    table
}

fn range_text(range: &TokenRange, nf: NumberFormat) -> String {
    if range.min == range.max {
        format_count(range.min, nf, false)
    } else {
        format!(
            "{} - {}",
            format_count(range.min, nf, false),
            format_count(range.max, nf, false)
        )
    }
}

/// Active user source and the count it yields, e.g. `admin (4)` or `custom (12)`
fn users_text(source: ActiveUserSource, settings: &GlobalSettings, nf: NumberFormat) -> String {
    let count = settings.effective_active_users(source) as f64;
    format!("{} ({})", source.mode().label(), format_count(count, nf, false))
}

fn interaction_row(
    def: &InteractionDefinition,
    settings: &GlobalSettings,
    nf: NumberFormat,
    use_color: bool,
) -> Vec<Cell> {
    let setting = settings.interaction(&def.id);
    let enabled = setting.is_none_or(|s| s.enabled);
    let profile = setting.map_or(def.token_profile, |s| s.token_profile(def));
    let model = setting.map_or(&def.default_model_id, |s| &s.model);
    let requests = setting.map_or(def.usage.default_request_count, |s| s.request_count);
    let source = setting.map_or(ActiveUserSource::for_audience(def.audience), |s| s.active_users);

    let (status, color) = if enabled {
        ("on", Color::Green)
    } else {
        ("off", Color::DarkGrey)
    };

    vec![
        Cell::new(&def.id),
        Cell::new(&def.name),
        Cell::new(def.audience.label()),
        Cell::new(def.usage.cadence.label()),
        Cell::new(String::from(model.clone())),
        right_cell(&format_count(requests as f64, nf, false), None, false),
        right_cell(&users_text(source, settings, nf), None, false),
        right_cell(
            &format_count(def.usage.default_active_user_count as f64, nf, false),
            None,
            false,
        ),
        right_cell(
            &profile
                .base_tokens
                .map_or_else(|| "-".to_string(), |b| format_count(b, nf, false)),
            None,
            false,
        ),
        right_cell(&range_text(&profile.input, nf), None, false),
        right_cell(&range_text(&profile.output, nf), None, false),
        styled_cell(status, use_color.then_some(color), false),
    ]
}

pub(crate) fn build_interactions_table(
    catalog: &Catalog,
    settings: &GlobalSettings,
    number_format: NumberFormat,
    use_color: bool,
) -> Table {
    let c = use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("ID", c),
        header_cell("Interaction", c),
        header_cell("Audience", c),
        header_cell("Cadence", c),
        header_cell("Model", c),
        header_cell("Requests", c),
        header_cell("Users", c),
        header_cell("Catalog Users", c),
        header_cell("Base", c),
        header_cell("Input", c),
        header_cell("Output", c),
        header_cell("Enabled", c),
    ]);

    for def in catalog.interactions() {
        table.add_row(interaction_row(def, settings, number_format, use_color));
    }
    table
}

pub(crate) fn print_models_table(catalog: &Catalog, use_color: bool) {
    println!("\n  Models\n");
    println!("{}", build_models_table(catalog, use_color));
    println!();
}

pub(crate) fn print_interactions_table(
    catalog: &Catalog,
    settings: &GlobalSettings,
    number_format: NumberFormat,
    use_color: bool,
) {
    println!("\n  Interactions\n");
    println!(
        "{}",
        build_interactions_table(catalog, settings, number_format, use_color)
    );
    println!();
}

pub(crate) fn output_models_json(catalog: &Catalog) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(catalog.providers())?)
}

pub(crate) fn output_interactions_json(catalog: &Catalog) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(catalog.interactions())?)
}
