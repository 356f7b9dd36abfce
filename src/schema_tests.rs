// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod tests {
    use crate::models::SiteVerificationModel;
    use crate::schema::*;
    use serde_json::json;

    fn state() -> SiteVerificationModel {
        SiteVerificationModel {
            project: Some("p".to_string()),
            verification_method: Some("DNS_TXT".to_string()),
            site_identifier: "example.com".to_string(),
            site_type: Some("INET_DOMAIN".to_string()),
            token: "tok".to_string(),
            managed_zone: "zone".to_string(),
            owners: Some(vec!["a@example.com".to_string()]),
            id: Some("dns://example.com".to_string()),
        }
    }

    #[test]
    fn test_only_owners_and_token_update_in_place() {
        let schema = site_verification_schema();
        let in_place: Vec<&str> = schema
            .attributes
            .iter()
            .filter(|a| !a.requires_replace && (a.required || a.optional))
            .map(|a| a.name)
            .collect();
        assert_eq!(in_place, vec!["token", "owners"]);
    }

    #[test]
    fn test_owners_use_state_for_unknown() {
        let schema = site_verification_schema();
        let owners = schema.attribute("owners").unwrap();
        assert!(owners.use_state_for_unknown);
        assert_eq!(owners.attr_type, AttributeType::StringList);
        assert!(schema.attribute("missing").is_none());
    }

    #[test]
    fn test_requires_replace_on_zone_change() {
        let prior = state();
        let planned = SiteVerificationModel {
            managed_zone: "other-zone".to_string(),
            token: "new-token".to_string(),
            ..state()
        };
        let changed = site_verification_schema()
            .requires_replace(&prior, &planned)
            .unwrap();
        assert_eq!(changed, vec!["managed_zone"]);
    }

    #[test]
    fn test_null_computed_value_is_not_a_change() {
        let prior = state();
        let planned = SiteVerificationModel {
            project: None,
            site_type: None,
            verification_method: None,
            owners: Some(vec![]),
            ..state()
        };
        let changed = site_verification_schema()
            .requires_replace(&prior, &planned)
            .unwrap();
        assert!(changed.is_empty());
    }

    #[test]
    fn test_schema_json() {
        let value = serde_json::to_value(domain_key_schema()).unwrap();
        assert_eq!(
            value["attributes"][1],
            json!({
                "name": "site_identifier",
                "type": "string",
                "markdown_description": "The DNS name or URL to retrieve a verification token for.",
                "required": true
            })
        );

        let value = serde_json::to_value(provider_schema()).unwrap();
        assert_eq!(value["attributes"][2]["type"], "number");
    }
}
