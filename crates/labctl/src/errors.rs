//! Exit codes for labctl

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the interactive UI is requested without a terminal
pub const EXIT_NO_TERMINAL: i32 = 74;

/// Exit code when the config file cannot be parsed (EX_CONFIG)
pub const EXIT_CONFIG_ERROR: i32 = 78;
