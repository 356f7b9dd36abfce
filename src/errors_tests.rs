// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for provider error types.

#[cfg(test)]
mod tests {
    use crate::errors::*;

    fn status_error(status: u16) -> ApiError {
        ApiError::Status {
            method: "GET".to_string(),
            url: "https://dns.googleapis.com/dns/v2/projects/p/locations/global/managedZones/z/rrsets/example.com./TXT".to_string(),
            status,
            message: "The 'parameters.name' resource named 'example.com.' does not exist.".to_string(),
        }
    }

    #[test]
    fn test_status_error_display() {
        let error = ApiError::Status {
            method: "DELETE".to_string(),
            url: "https://example.test/webResource/example.com".to_string(),
            status: 403,
            message: "Forbidden".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "HTTP 403 from DELETE https://example.test/webResource/example.com: Forbidden"
        );
    }

    #[test]
    fn test_is_not_found_only_for_404() {
        assert!(status_error(404).is_not_found());
        assert!(!status_error(403).is_not_found());
        assert!(!status_error(500).is_not_found());
    }

    #[test]
    fn test_transport_error_is_not_not_found() {
        let error = ApiError::Transport {
            method: "GET".to_string(),
            url: "https://example.test/404".to_string(),
            reason: "connection refused".to_string(),
        };

        // A "404" in the URL must not be mistaken for the status
        assert!(!error.is_not_found());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_credential_error_is_transparent() {
        let error = ApiError::from(CredentialError::TokenRequestFailed {
            url: "https://oauth2.googleapis.com/token".to_string(),
            reason: "HTTP 400: invalid_grant".to_string(),
        });

        assert_eq!(
            error.to_string(),
            "Token request to https://oauth2.googleapis.com/token failed: HTTP 400: invalid_grant"
        );
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_resource_error_summary_prefixes_message() {
        let errors = vec![
            ResourceError::CreateDnsRecord {
                source: status_error(409),
            },
            ResourceError::ReadDnsRecord {
                source: status_error(500),
            },
            ResourceError::UpdateDnsRecord {
                source: status_error(500),
            },
            ResourceError::RelinquishSiteVerification {
                source: status_error(500),
            },
            ResourceError::UnexpectedTxtValues { count: 2 },
        ];

        for error in errors {
            assert!(
                error.to_string().starts_with(error.summary()),
                "{error} should start with {}",
                error.summary()
            );
        }
    }

    #[test]
    fn test_unexpected_txt_values_display() {
        let error = ResourceError::UnexpectedTxtValues { count: 0 };
        assert_eq!(
            error.to_string(),
            "Error reading DNS record: expected 1 TXT value, got 0"
        );
        assert!(error.api_error().is_none());
    }

    #[test]
    fn test_api_error_accessor() {
        let error = ResourceError::InsertSiteVerification {
            source: status_error(400),
        };
        assert_eq!(error.api_error().and_then(ApiError::status), Some(400));
    }

    #[test]
    fn test_missing_project_display() {
        let error = ResourceError::MissingProject {
            site_identifier: "example.com".to_string(),
        };
        assert!(error.to_string().contains("example.com"));
        assert_eq!(error.summary(), "Error creating DNS record");
    }
}
