mod config_warnings;

pub use config_warnings::warn_unconfigured;
