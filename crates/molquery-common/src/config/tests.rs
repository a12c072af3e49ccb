#[cfg(test)]
mod tests {
    use super::super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Scratch path unique to this test process.
    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("molquery-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_match_public_chembl() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1:8001");
        assert_eq!(config.server.path, "/mcp");
        assert_eq!(config.upstream.base_url, "https://www.ebi.ac.uk/chembl/api/data");
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.upstream.related_page_size, 50);
        assert_eq!(config.client.search_limit, 10);
        assert_eq!(config.client.max_listed, 5);
        assert_eq!(config.logging.filter, "molquery=debug,info");
        assert_eq!(config.logging.client_filter, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [upstream]
            timeout_secs = 5

            [client]
            search_limit = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.upstream.timeout_secs, 5);
        assert_eq!(config.upstream.base_url, default_base_url());
        assert_eq!(config.client.search_limit, 3);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = Config::from_toml_str("[server\nbind = ").unwrap_err();
        assert!(matches!(err, MolqueryError::ConfigParse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("MOLQUERY_BIND", "0.0.0.0:9000"),
            ("MOLQUERY_UPSTREAM_URL", "http://127.0.0.1:4000/chembl"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:4000/chembl");
        assert_eq!(config.client.endpoint, default_endpoint());
        assert_eq!(config.bind_addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = Config::default();
        config.upstream.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.client.search_limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upstream.related_page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_addresses() {
        let mut config = Config::default();
        config.server.bind = "not-an-addr".to_string();
        assert!(matches!(config.validate(), Err(MolqueryError::Config(_))));

        let mut config = Config::default();
        config.server.path = "mcp".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upstream.base_url = "::nope".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_default_file_yields_defaults() {
        let missing = scratch_file("absent-default.toml");
        let config = Config::load_with(&missing, |_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_missing_explicit_file_is_error() {
        let missing = scratch_file("absent-explicit.toml");
        let explicit = missing.to_string_lossy().to_string();

        let err = Config::load_with(Path::new(DEFAULT_CONFIG_FILE), |key| {
            (key == CONFIG_ENV).then(|| explicit.clone())
        })
        .unwrap_err();

        assert!(matches!(err, MolqueryError::Config(ref m) if m.contains("not found")));
    }

    #[test]
    fn test_load_explicit_file_then_env_overrides() {
        let file = scratch_file("explicit.toml");
        std::fs::write(
            &file,
            "[client]\nsearch_limit = 4\n\n[logging]\nclient_filter = \"molquery=debug\"\n",
        )
        .unwrap();
        let explicit = file.to_string_lossy().to_string();

        let config = Config::load_with(Path::new(DEFAULT_CONFIG_FILE), |key| match key {
            CONFIG_ENV => Some(explicit.clone()),
            "MOLQUERY_ENDPOINT" => Some("http://127.0.0.1:9100/mcp".to_string()),
            _ => None,
        });
        std::fs::remove_file(&file).ok();
        let config = config.unwrap();

        assert_eq!(config.client.search_limit, 4);
        assert_eq!(config.client.endpoint, "http://127.0.0.1:9100/mcp");
        assert_eq!(config.logging.client_filter, "molquery=debug");
        assert_eq!(config.logging.filter, "molquery=debug,info");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let file = scratch_file("invalid.toml");
        std::fs::write(&file, "[upstream]\ntimeout_secs = 0\n").unwrap();

        let config = Config::load_with(&file, |_| None);
        std::fs::remove_file(&file).ok();

        assert!(matches!(config, Err(MolqueryError::Config(_))));
    }
}
