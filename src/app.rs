use std::fs;
use std::path::Path;

use chrono::Local;

use crate::catalog::Catalog;
use crate::cli::{Cli, Commands, ExportFormat};
use crate::core::{Action, GlobalSettings, calculate, reduce};
use crate::error::AppError;
use crate::output::{
    EstimateTableOptions, NumberFormat, output_estimate_csv, output_estimate_json,
    output_interactions_json, output_models_json, output_settings_json, print_estimate_table,
    print_interactions_table, print_models_table, print_summary, render_markdown_report,
    summary_json, summary_line,
};
use crate::store::SettingsStore;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) catalog: &'a Catalog,
    pub(crate) store: &'a SettingsStore,
    pub(crate) number_format: NumberFormat,
}

fn handle_estimate(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let settings = ctx.store.load(ctx.catalog);
    let results = calculate(&settings, ctx.catalog)?;
    if ctx.cli.json {
        println!("{}", output_estimate_json(&results)?);
    } else if ctx.cli.csv {
        print!("{}", output_estimate_csv(&results));
    } else {
        print_estimate_table(
            &results,
            &settings,
            EstimateTableOptions {
                use_color: ctx.cli.use_color(),
                compact: ctx.cli.compact,
                number_format: ctx.number_format,
            },
        );
    }
    Ok(())
}

fn handle_summary(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let settings = ctx.store.load(ctx.catalog);
    let results = calculate(&settings, ctx.catalog)?;
    if ctx.cli.json {
        println!("{}", summary_json(&results, &settings));
    } else {
        print_summary(&results, &settings, ctx.number_format);
    }
    Ok(())
}

fn handle_models(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    if ctx.cli.json {
        println!("{}", output_models_json(ctx.catalog)?);
    } else {
        print_models_table(ctx.catalog, ctx.cli.use_color());
    }
    Ok(())
}

fn handle_interactions(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    if ctx.cli.json {
        println!("{}", output_interactions_json(ctx.catalog)?);
    } else {
        let settings = ctx.store.load(ctx.catalog);
        print_interactions_table(
            ctx.catalog,
            &settings,
            ctx.number_format,
            ctx.cli.use_color(),
        );
    }
    Ok(())
}

fn handle_settings(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let settings = ctx.store.load(ctx.catalog);
    println!("{}", output_settings_json(&settings)?);
    Ok(())
}

/// Apply one edit, persist the new snapshot and report the resulting total
fn handle_action(ctx: &CommandContext<'_>, action: Action) -> Result<(), AppError> {
    let current = ctx.store.load(ctx.catalog);
    let message = action.describe();
    let next = reduce(&current, action, ctx.catalog)?;
    ctx.store.save(&next)?;
    report_change(ctx, &message, &next)
}

fn report_change(
    ctx: &CommandContext<'_>,
    message: &str,
    settings: &GlobalSettings,
) -> Result<(), AppError> {
    let results = calculate(settings, ctx.catalog)?;
    if ctx.cli.json {
        println!("{}", summary_json(&results, settings));
    } else {
        println!("{message}");
        println!("{}", summary_line(&results, settings, ctx.number_format));
    }
    Ok(())
}

fn handle_export(
    ctx: &CommandContext<'_>,
    path: &Path,
    format: ExportFormat,
) -> Result<(), AppError> {
    let settings = ctx.store.load(ctx.catalog);
    let results = calculate(&settings, ctx.catalog)?;
    let content = match format {
        ExportFormat::Csv => output_estimate_csv(&results),
        ExportFormat::Json => output_estimate_json(&results)?,
        ExportFormat::Markdown => render_markdown_report(
            &results,
            &settings,
            ctx.catalog,
            ctx.number_format,
            Local::now().date_naive(),
        ),
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| AppError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !ctx.cli.json {
        println!(
            "Exported {} interactions to {}",
            results.len(),
            path.display()
        );
    }
    Ok(())
}

/// Load the catalog and settings store, then dispatch the selected command
pub(crate) fn run(mut cli: Cli, configured_settings: Option<&Path>) -> Result<(), AppError> {
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let catalog = Catalog::load(cli.catalog.as_deref())?;
    let store = SettingsStore::locate(cli.settings.as_deref(), configured_settings);
    tracing::debug!(path = %store.path().display(), "using settings file");

    let command = cli.command.take().unwrap_or(Commands::Estimate);
    let ctx = CommandContext {
        cli: &cli,
        catalog: &catalog,
        store: &store,
        number_format,
    };

    match command {
        Commands::Estimate => handle_estimate(&ctx),
        Commands::Summary => handle_summary(&ctx),
        Commands::Models => handle_models(&ctx),
        Commands::Interactions => handle_interactions(&ctx),
        Commands::Settings => handle_settings(&ctx),
        Commands::Set { target } => handle_action(&ctx, target.into_action()),
        Commands::Interaction { id, change } => handle_action(&ctx, change.into_action(id)),
        Commands::Reset => handle_action(&ctx, Action::Reset),
        Commands::Export { path, format } => handle_export(&ctx, &path, format),
    }
}
