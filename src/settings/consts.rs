pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "khqr";
pub const APP_NAME: &str = "khqr-cli";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "khqr-cli.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";
