// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod tests {
    use crate::models::{DomainKeyModel, SiteVerificationModel};
    use serde_json::json;

    fn domain_model() -> SiteVerificationModel {
        SiteVerificationModel {
            site_identifier: "example.com".to_string(),
            token: "tok".to_string(),
            managed_zone: "example-zone".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_defaults_keeps_explicit_values() {
        let mut model = SiteVerificationModel {
            site_type: Some("SITE".to_string()),
            ..domain_model()
        };
        model.apply_defaults();
        assert_eq!(model.site_type.as_deref(), Some("SITE"));
        assert_eq!(model.verification_method.as_deref(), Some("DNS_TXT"));
    }

    #[test]
    fn test_uses_dns_txt() {
        let mut model = domain_model();
        assert!(!model.uses_dns_txt(), "undefaulted model has no method");

        model.apply_defaults();
        assert!(model.uses_dns_txt());

        model.verification_method = Some("META".to_string());
        assert!(!model.uses_dns_txt());

        let mut site = SiteVerificationModel {
            site_type: Some("SITE".to_string()),
            ..domain_model()
        };
        site.apply_defaults();
        assert!(!site.uses_dns_txt());
    }

    #[test]
    fn test_names() {
        let model = SiteVerificationModel {
            site_identifier: "example.com.".to_string(),
            ..domain_model()
        };
        assert_eq!(model.site_id(), "example.com");
        assert_eq!(model.record_name(), "example.com.");

        let model = domain_model();
        assert_eq!(model.site_id(), "example.com");
        assert_eq!(model.record_name(), "example.com.");
    }

    #[test]
    fn test_from_import_id() {
        let model = SiteVerificationModel::from_import_id("dns://example.com");
        assert_eq!(model.site_identifier, "example.com");
        assert_eq!(model.site_type.as_deref(), Some("INET_DOMAIN"));
        assert_eq!(model.id.as_deref(), Some("dns://example.com"));
        assert!(!model.uses_dns_txt());

        let model = SiteVerificationModel::from_import_id("https://www.example.com/");
        assert_eq!(model.site_identifier, "https://www.example.com/");
        assert_eq!(model.site_type.as_deref(), Some("SITE"));
    }

    #[test]
    fn test_state_json_has_every_attribute() {
        let value = serde_json::to_value(domain_model()).unwrap();
        assert_eq!(
            value,
            json!({
                "project": null,
                "verification_method": null,
                "site_identifier": "example.com",
                "site_type": null,
                "token": "tok",
                "managed_zone": "example-zone",
                "owners": null,
                "id": null
            })
        );
    }

    #[test]
    fn test_explicit_empty_owners_survive_parsing() {
        let model: SiteVerificationModel = serde_json::from_value(json!({
            "site_identifier": "example.com",
            "token": "tok",
            "managed_zone": "z",
            "owners": []
        }))
        .unwrap();
        assert_eq!(model.owners, Some(vec![]));

        let model: SiteVerificationModel = serde_json::from_value(json!({
            "site_identifier": "example.com",
            "owners": null
        }))
        .unwrap();
        assert_eq!(model.owners, None);
    }

    #[test]
    fn test_domain_key_defaults() {
        let mut model = DomainKeyModel {
            site_identifier: "example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(model.site().site_type, "INET_DOMAIN");
        model.apply_defaults();
        assert_eq!(model.verification_method.as_deref(), Some("DNS_TXT"));
        assert_eq!(model.site_type.as_deref(), Some("INET_DOMAIN"));
    }
}
