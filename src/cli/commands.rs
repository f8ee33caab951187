//! CLI subcommand definitions
//!
//! Editing subcommands translate one-to-one into settings reducer actions.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Subcommand, ValueEnum};

use crate::catalog::{ModelSelection, TokenRange};
use crate::core::{Action, ActiveUserMode};

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the monthly cost estimate per interaction (default)
    Estimate,
    /// Output a single line with the total monthly cost
    Summary,
    /// List providers and model prices
    Models,
    /// List interactions and their usage profiles
    Interactions,
    /// Print the resolved settings snapshot as JSON
    Settings,
    /// Change a global setting
    Set {
        #[command(subcommand)]
        target: SetCommands,
    },
    /// Change the settings of one interaction
    Interaction {
        /// Interaction id (see `aicost interactions`)
        id: String,
        #[command(subcommand)]
        change: InteractionCommands,
    },
    /// Restore default settings
    Reset,
    /// Write the estimate to a file
    Export {
        /// Output file
        path: PathBuf,
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
    },
}

/// Global settings
#[derive(Subcommand)]
pub(crate) enum SetCommands {
    /// Number of administrators
    Admins {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        count: u64,
    },
    /// Number of users
    Users {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        count: u64,
    },
    /// Working days per month (applies to daily interactions)
    Days {
        #[arg(value_parser = clap::value_parser!(u64).range(1..=31))]
        count: u64,
    },
    /// Default model used by interactions set to "default"
    Model { model_id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum ModeArg {
    /// Follow the global admin count
    Admin,
    /// Follow the global user count
    User,
    /// Use a fixed per-interaction count
    Custom,
}

impl From<ModeArg> for ActiveUserMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Admin => ActiveUserMode::Admin,
            ModeArg::User => ActiveUserMode::User,
            ModeArg::Custom => ActiveUserMode::Custom,
        }
    }
}

/// Base token value; `none` clears the override
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BaseTokensArg(pub(crate) Option<f64>);

impl FromStr for BaseTokensArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Ok(BaseTokensArg(None));
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(BaseTokensArg(Some(value))),
            _ => Err(format!(
                "invalid base tokens \"{s}\" (expected a non-negative number or \"none\")"
            )),
        }
    }
}

/// Per-interaction edits
#[derive(Subcommand)]
pub(crate) enum InteractionCommands {
    /// Include the interaction in the estimate
    Enable,
    /// Exclude the interaction from the estimate
    Disable,
    /// Model to use ("default" follows the global default model)
    Model { model_id: String },
    /// Requests per user, per day or per month depending on cadence
    Requests { count: u64 },
    /// Fixed active user count (switches to custom mode)
    Users {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        count: u64,
    },
    /// Where the active user count comes from
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Base tokens added to every request's input ("none" for catalog default)
    Base { value: BaseTokensArg },
    /// Input token range per request
    Input { min: f64, max: f64 },
    /// Output token range per request
    Output { min: f64, max: f64 },
    /// Drop all token overrides for this interaction
    ResetTokens,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub(crate) enum ExportFormat {
    Csv,
    Json,
    Markdown,
}

impl SetCommands {
    pub(crate) fn into_action(self) -> Action {
        match self {
            SetCommands::Admins { count } => Action::SetAdminCount(count),
            SetCommands::Users { count } => Action::SetUserCount(count),
            SetCommands::Days { count } => Action::SetWorkingDays(count),
            SetCommands::Model { model_id } => Action::SetDefaultModel(model_id),
        }
    }
}

impl InteractionCommands {
    pub(crate) fn into_action(self, interaction: String) -> Action {
        match self {
            InteractionCommands::Enable => Action::SetEnabled {
                interaction,
                enabled: true,
            },
            InteractionCommands::Disable => Action::SetEnabled {
                interaction,
                enabled: false,
            },
            InteractionCommands::Model { model_id } => Action::SetModel {
                interaction,
                model: ModelSelection::parse(&model_id),
            },
            InteractionCommands::Requests { count } => {
                Action::SetRequestCount { interaction, count }
            }
            InteractionCommands::Users { count } => Action::SetActiveUsers { interaction, count },
            InteractionCommands::Mode { mode } => Action::SetActiveUserMode {
                interaction,
                mode: mode.into(),
            },
            InteractionCommands::Base { value } => Action::SetBaseTokens {
                interaction,
                base: value.0,
            },
            InteractionCommands::Input { min, max } => Action::SetInputRange {
                interaction,
                range: TokenRange::new(min, max),
            },
            InteractionCommands::Output { min, max } => Action::SetOutputRange {
                interaction,
                range: TokenRange::new(min, max),
            },
            InteractionCommands::ResetTokens => Action::ClearTokenOverride { interaction },
        }
    }
}
