use folio_config::{FolioConfig, SourceConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &FolioConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &FolioConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.remote.is_configured() && has_env_prefix(&env_keys, "FOLIO_REMOTE") {
        warnings.push(
            "Remote token appears unset while FOLIO_REMOTE* env vars exist. Use double underscores (example: FOLIO_REMOTE__TOKEN)."
                .to_string(),
        );
    }

    let defaults = SourceConfig::default();
    if config.source.content_file == defaults.content_file
        && config.source.media_dir == defaults.media_dir
        && has_env_prefix(&env_keys, "FOLIO_SOURCE")
    {
        warnings.push(
            "Source paths appear default while FOLIO_SOURCE* env vars exist. Use double underscores (example: FOLIO_SOURCE__CONTENT_FILE)."
                .to_string(),
        );
    }

    if !config.run.fail_fast && has_single_underscore(&env_keys, "FOLIO_RUN") {
        warnings.push(
            "Run options appear default while FOLIO_RUN_* env vars exist. Use double underscores (example: FOLIO_RUN__FAIL_FAST)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use folio_config::FolioConfig;

    use super::collect_unconfigured_warnings;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn warns_for_unconfigured_sections_with_env_prefixes() {
        let config = FolioConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            env(&[
                ("FOLIO_REMOTE_TOKEN", "secret"),
                ("FOLIO_SOURCE_CONTENT_FILE", "export.json"),
                ("FOLIO_RUN_FAIL_FAST", "true"),
            ]),
        );

        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("FOLIO_REMOTE__TOKEN"));
    }

    #[test]
    fn does_not_warn_when_sections_are_configured() {
        let mut config = FolioConfig::default();
        config.remote.token = "secret".to_string();
        config.source.content_file = PathBuf::from("export.json");

        let warnings = collect_unconfigured_warnings(
            &config,
            env(&[
                ("FOLIO_REMOTE__TOKEN", "secret"),
                ("FOLIO_SOURCE__CONTENT_FILE", "export.json"),
                ("FOLIO_RUN__FAIL_FAST", "false"),
            ]),
        );

        assert!(warnings.is_empty());
    }

    #[test]
    fn ignores_unrelated_env() {
        let warnings =
            collect_unconfigured_warnings(&FolioConfig::default(), env(&[("PATH", "/usr/bin")]));
        assert!(warnings.is_empty());
    }
}
