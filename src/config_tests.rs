// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for provider configuration.

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::constants::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_token_duration() {
        let config = ProviderConfig::default();
        assert_eq!(
            config.token_duration_secs().unwrap(),
            DEFAULT_TOKEN_DURATION_SECS
        );
    }

    #[test]
    fn test_token_duration_must_be_positive() {
        let config = ProviderConfig {
            token_duration: Some(0),
            ..Default::default()
        };
        assert!(config.token_duration_secs().is_err());

        let config = ProviderConfig {
            token_duration: Some(600),
            ..Default::default()
        };
        assert_eq!(config.token_duration_secs().unwrap(), 600);
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r"
project: dns-project
impersonate_service_account: verifier@p.iam.gserviceaccount.com
token_duration: 1200
endpoints:
  dns: http://localhost:9000/dns/v2
";
        let config: ProviderConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.project.as_deref(), Some("dns-project"));
        assert_eq!(
            config.impersonate_service_account.as_deref(),
            Some("verifier@p.iam.gserviceaccount.com")
        );
        assert_eq!(config.token_duration, Some(1200));
        assert_eq!(
            config.endpoints.unwrap().dns.as_deref(),
            Some("http://localhost:9000/dns/v2")
        );
    }

    #[test]
    fn test_parse_json_config_with_seconds_alias() {
        let json = r#"{"token_duration_seconds": 900}"#;
        let config: ProviderConfig = serde_yaml::from_str(json).unwrap();
        assert_eq!(config.token_duration, Some(900));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "projekt: typo\n";
        assert!(serde_yaml::from_str::<ProviderConfig>(yaml).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "project: from-file").unwrap();

        let config = ProviderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.project.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_from_missing_file() {
        let result = ProviderConfig::from_file(std::path::Path::new("/nonexistent/provider.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_merged_with_prefers_set_values() {
        let file = ProviderConfig {
            project: Some("file-project".to_string()),
            token_duration: Some(100),
            ..Default::default()
        };
        let flags = ProviderConfig {
            project: Some("flag-project".to_string()),
            ..Default::default()
        };

        let merged = file.merged_with(flags);
        assert_eq!(merged.project.as_deref(), Some("flag-project"));
        assert_eq!(merged.token_duration, Some(100));
        assert_eq!(merged.impersonate_service_account, None);
    }

    #[test]
    fn test_project_override_ignores_blank() {
        let config = ProviderConfig {
            project: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.project_override(), None);

        let config = ProviderConfig {
            project: Some(" p1 ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.project_override(), Some("p1"));
    }

    #[test]
    fn test_endpoints_default() {
        let endpoints = Endpoints::resolve_with(None, env_from(&[])).unwrap();
        assert_eq!(endpoints, Endpoints::default());
        assert_eq!(endpoints.dns, DEFAULT_DNS_ENDPOINT);
    }

    #[test]
    fn test_endpoints_env_and_config_precedence() {
        let env = env_from(&[
            (ENV_DNS_ENDPOINT, "http://env-dns:1/dns/v2/"),
            (ENV_SITE_VERIFICATION_ENDPOINT, "http://env-sv:2"),
            (ENV_METADATA_HOST, "127.0.0.1:8081"),
        ]);
        let overrides = EndpointOverrides {
            dns: Some("http://config-dns:3/dns/v2".to_string()),
            ..Default::default()
        };

        let endpoints = Endpoints::resolve_with(Some(&overrides), env).unwrap();
        assert_eq!(endpoints.dns, "http://config-dns:3/dns/v2");
        assert_eq!(endpoints.site_verification, "http://env-sv:2");
        assert_eq!(endpoints.metadata, "http://127.0.0.1:8081");
        assert_eq!(endpoints.iam_credentials, DEFAULT_IAM_CREDENTIALS_ENDPOINT);
    }

    #[test]
    fn test_endpoints_reject_relative_url() {
        let overrides = EndpointOverrides {
            oauth2: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(Endpoints::resolve_with(Some(&overrides), env_from(&[])).is_err());
    }

    #[test]
    fn test_endpoints_all() {
        let endpoints = Endpoints::all("http://127.0.0.1:4000/");
        assert_eq!(endpoints.site_verification, "http://127.0.0.1:4000");
        assert_eq!(endpoints.metadata, "http://127.0.0.1:4000");
    }

    #[test]
    fn test_build_base_url() {
        assert_eq!(build_base_url("metadata.google.internal"), "http://metadata.google.internal");
        assert_eq!(build_base_url("https://example.com/"), "https://example.com");
        assert_eq!(build_base_url("127.0.0.1:8080"), "http://127.0.0.1:8080");
    }
}
