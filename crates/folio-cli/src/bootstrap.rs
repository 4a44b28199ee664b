use anyhow::Context;
use folio_config::FolioConfig;

use crate::cli::root_commands::MigrateArgs;

/// Read `.env` and the layered config.
pub fn load_config() -> anyhow::Result<FolioConfig> {
    FolioConfig::load_with_dotenv().context("failed to load configuration")
}

/// Apply `folio migrate` flags on top of the loaded config.
pub fn apply_migrate_overrides(config: &mut FolioConfig, args: &MigrateArgs) {
    if let Some(path) = &args.content_file {
        config.source.content_file.clone_from(path);
    }
    if let Some(path) = &args.media_dir {
        config.source.media_dir.clone_from(path);
    }
    if args.fail_fast {
        config.run.fail_fast = true;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flags_override_config() {
        let mut config = FolioConfig::default();
        let args = MigrateArgs {
            content_file: Some(PathBuf::from("other.json")),
            fail_fast: true,
            ..MigrateArgs::default()
        };

        apply_migrate_overrides(&mut config, &args);

        assert_eq!(config.source.content_file, PathBuf::from("other.json"));
        assert_eq!(
            config.source.media_dir,
            folio_config::SourceConfig::default().media_dir
        );
        assert!(config.run.fail_fast);
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = FolioConfig::default();
        config.run.fail_fast = true;

        apply_migrate_overrides(&mut config, &MigrateArgs::default());

        assert!(config.run.fail_fast);
    }
}
