// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for provider configuration.

#[cfg(test)]
mod tests {
    use crate::auth::Credentials;
    use crate::config::{Endpoints, ProviderConfig};
    use crate::contract::DataSource;
    use crate::errors::CredentialError;
    use crate::models::DomainKeyModel;
    use crate::provider::Provider;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SA: &str = "verifier@p.iam.gserviceaccount.com";

    async fn mount_tokeninfo(server: &MockServer, email: &str) {
        Mock::given(method("GET"))
            .and(path("/oauth2/v2/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": email})))
            .mount(server)
            .await;
    }

    #[test]
    fn test_type_names() {
        let provider = Provider::new("1.2.3");
        assert_eq!(provider.type_name(), "googlesiteverification");
        assert_eq!(provider.version(), "1.2.3");
        assert_eq!(
            provider.data_source_type_names(),
            vec!["googlesiteverification_domain_key".to_string()]
        );
        assert_eq!(
            provider.resource_type_names(),
            vec!["googlesiteverification_site_verification".to_string()]
        );
        assert_eq!(provider.schema().attributes.len(), 3);
    }

    #[tokio::test]
    async fn test_default_owner_from_tokeninfo() {
        let server = MockServer::start().await;
        mount_tokeninfo(&server, "me@example.com").await;

        let clients = Provider::new("test")
            .configure_with_credentials(
                &ProviderConfig::default(),
                &Endpoints::all(&server.uri()),
                &reqwest::Client::new(),
                Credentials::from_access_token("ambient", Some("ambient-project".to_string())),
            )
            .await
            .unwrap();

        assert_eq!(clients.default_owner, "me@example.com");
        assert_eq!(clients.project_id.as_deref(), Some("ambient-project"));
    }

    #[tokio::test]
    async fn test_project_override() {
        let server = MockServer::start().await;
        mount_tokeninfo(&server, "me@example.com").await;

        let config = ProviderConfig {
            project: Some("dns-project".to_string()),
            ..Default::default()
        };
        let clients = Provider::new("test")
            .configure_with_credentials(
                &config,
                &Endpoints::all(&server.uri()),
                &reqwest::Client::new(),
                Credentials::from_access_token("ambient", Some("ambient-project".to_string())),
            )
            .await
            .unwrap();

        assert_eq!(clients.project_id.as_deref(), Some("dns-project"));
    }

    #[tokio::test]
    async fn test_tokeninfo_failure_aborts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth2/v2/tokeninfo"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = Provider::new("test")
            .configure_with_credentials(
                &ProviderConfig::default(),
                &Endpoints::all(&server.uri()),
                &reqwest::Client::new(),
                Credentials::from_access_token("ambient", None),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::TokenInfoFailed { .. }));
    }

    #[tokio::test]
    async fn test_tokeninfo_without_email_leaves_owner_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth2/v2/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "scope": "https://www.googleapis.com/auth/siteverification",
                "expires_in": 3599
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "method": "DNS_TXT",
                "token": "google-site-verification=abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = Provider::new("test");
        let clients = provider
            .configure_with_credentials(
                &ProviderConfig::default(),
                &Endpoints::all(&server.uri()),
                &reqwest::Client::new(),
                Credentials::from_access_token("ambient", Some("p".to_string())),
            )
            .await
            .unwrap();
        assert!(clients.default_owner.is_empty());

        let key = provider
            .domain_key(clients)
            .read(DomainKeyModel {
                site_identifier: "example.com".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(key.token.as_deref(), Some("google-site-verification=abc"));
    }

    #[tokio::test]
    async fn test_empty_service_account_does_not_impersonate() {
        let server = MockServer::start().await;
        mount_tokeninfo(&server, "me@example.com").await;
        Mock::given(method("POST"))
            .and(path_regex(r":generateAccessToken$"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let config = ProviderConfig {
            impersonate_service_account: Some(String::new()),
            ..Default::default()
        };
        let clients = Provider::new("test")
            .configure_with_credentials(
                &config,
                &Endpoints::all(&server.uri()),
                &reqwest::Client::new(),
                Credentials::from_access_token("ambient", None),
            )
            .await
            .unwrap();
        assert_eq!(clients.default_owner, "me@example.com");
    }

    #[tokio::test]
    async fn test_impersonation_splits_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!(
                "/projects/-/serviceAccounts/{SA}:generateAccessToken"
            )))
            .and(header("authorization", "Bearer ambient"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "impersonated",
                "expireTime": "2099-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/webResource/example.com"))
            .and(header("authorization", "Bearer impersonated"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"owners": [SA]})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/projects/p/locations/global/managedZones/z/rrsets/.*$"))
            .and(header("authorization", "Bearer ambient"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "example.com.",
                "type": "TXT",
                "rrdatas": ["\"tok\""]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ProviderConfig {
            impersonate_service_account: Some(SA.to_string()),
            token_duration: Some(600),
            ..Default::default()
        };
        let clients = Provider::new("test")
            .configure_with_credentials(
                &config,
                &Endpoints::all(&server.uri()),
                &reqwest::Client::new(),
                Credentials::from_access_token("ambient", Some("p".to_string())),
            )
            .await
            .unwrap();

        assert_eq!(clients.default_owner, SA);
        assert_eq!(clients.project_id.as_deref(), Some("p"));

        clients.site_verification.get("example.com").await.unwrap();
        clients
            .dns
            .get("p", "z", "example.com.", "TXT")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_token_duration() {
        let config = ProviderConfig {
            impersonate_service_account: Some(SA.to_string()),
            token_duration: Some(-5),
            ..Default::default()
        };
        let err = Provider::new("test")
            .configure_with_credentials(
                &config,
                &Endpoints::all("http://127.0.0.1:1"),
                &reqwest::Client::new(),
                Credentials::from_access_token("ambient", None),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::InvalidConfiguration { .. }));
    }
}
