/// Model id that stands for "use the global default model"
pub(crate) const DEFAULT_MODEL_SENTINEL: &str = "default";

/// Global defaults used on first run and on reset
pub(crate) const DEFAULT_ADMIN_COUNT: u64 = 4;
pub(crate) const DEFAULT_USER_COUNT: u64 = 1000;
pub(crate) const DEFAULT_WORKING_DAYS: u64 = 22;
pub(crate) const DEFAULT_GLOBAL_MODEL: &str = "gpt-4o";

/// Environment variable overriding the settings snapshot location
pub(crate) const SETTINGS_ENV: &str = "AICOST_SETTINGS";

/// Standard date format for reports: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
