// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `site_verification` resource: verify ownership of a site.
//!
//! For an `INET_DOMAIN` site verified with `DNS_TXT`, the resource also owns the
//! TXT record that carries the token, in a Cloud DNS managed zone:
//!
//! - **Create** writes the TXT record, then asks Google to verify the site. The
//!   record must exist first or verification fails.
//! - **Read** refreshes the token from the TXT record and the owners from the
//!   registration. If either is gone the resource is dropped from state.
//! - **Update** recreates the TXT record and patches the owner list.
//! - **Delete** removes the TXT record, then relinquishes the verification.
//!
//! No step is rolled back when a later step fails.
//!
//! Owner authority is asymmetric: after create and read the server's owner list is
//! stored, while after update the configured list is stored as sent.

use crate::constants::{RECORD_TYPE_TXT, SITE_VERIFICATION_TYPE_SUFFIX, VERIFICATION_RECORD_TTL_SECS};
use crate::contract::{ReadOutcome, Resource};
use crate::errors::{ApiError, ResourceError};
use crate::gcp::dns::ResourceRecordSet;
use crate::gcp::site_verification::WebResource;
use crate::identifiers::decode_id;
use crate::models::SiteVerificationModel;
use crate::owners::{optional_owners_equal, owners_for_request, owners_from_response};
use crate::provider::Clients;
use crate::schema::{site_verification_schema, Schema};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// What applying a planned state would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    /// Nothing to change
    NoOp,
    /// Create a new resource
    Create,
    /// Update owners and/or token in place
    Update,
    /// Destroy and recreate
    Replace,
}

/// A planned change, as printed by `gsv-provider plan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedChange {
    /// Action the host should take
    pub action: PlanAction,
    /// Attributes whose change forces replacement
    pub requires_replace: Vec<&'static str>,
    /// Planned state with unknown values resolved from prior state
    pub planned_state: SiteVerificationModel,
}

/// Attributes whose change between `prior` and `planned` forces replacement.
///
/// # Errors
///
/// Returns an error if either state cannot be serialized.
pub fn plan_requires_replace(
    prior: &SiteVerificationModel,
    planned: &SiteVerificationModel,
) -> Result<Vec<&'static str>, serde_json::Error> {
    site_verification_schema().requires_replace(prior, planned)
}

/// Decide what applying `planned` over `prior` would do.
///
/// Null computed values in the plan keep their prior value (`owners` per its
/// use-state-for-unknown modifier, the rest because the provider fills them in).
///
/// # Errors
///
/// Returns an error if either state cannot be serialized.
pub fn plan(
    prior: Option<&SiteVerificationModel>,
    planned: SiteVerificationModel,
) -> Result<PlannedChange, serde_json::Error> {
    let Some(prior) = prior else {
        return Ok(PlannedChange {
            action: PlanAction::Create,
            requires_replace: Vec::new(),
            planned_state: planned,
        });
    };

    let requires_replace = plan_requires_replace(prior, &planned)?;
    if !requires_replace.is_empty() {
        return Ok(PlannedChange {
            action: PlanAction::Replace,
            requires_replace,
            planned_state: planned,
        });
    }

    let mut resolved = planned;
    if resolved.owners.is_none() {
        resolved.owners.clone_from(&prior.owners);
    }
    if resolved.project.is_none() {
        resolved.project.clone_from(&prior.project);
    }
    if resolved.site_type.is_none() {
        resolved.site_type.clone_from(&prior.site_type);
    }
    if resolved.verification_method.is_none() {
        resolved.verification_method.clone_from(&prior.verification_method);
    }
    resolved.id.clone_from(&prior.id);

    let unchanged = resolved.token == prior.token
        && optional_owners_equal(resolved.owners.as_deref(), prior.owners.as_deref());

    Ok(PlannedChange {
        action: if unchanged {
            PlanAction::NoOp
        } else {
            PlanAction::Update
        },
        requires_replace,
        planned_state: resolved,
    })
}

/// Manages site verifications and their DNS TXT records.
#[derive(Debug, Clone)]
pub struct SiteVerificationResource {
    clients: Arc<Clients>,
}

impl SiteVerificationResource {
    /// Bind the resource to configured clients.
    #[must_use]
    pub fn new(clients: Arc<Clients>) -> Self {
        Self { clients }
    }

    /// Project for the TXT record: the resource's own, else the provider's.
    fn project<'a>(&'a self, data: &'a SiteVerificationModel) -> Result<&'a str, ResourceError> {
        data.project
            .as_deref()
            .or(self.clients.project_id.as_deref())
            .ok_or_else(|| ResourceError::MissingProject {
                site_identifier: data.site_identifier.clone(),
            })
    }

    async fn create_dns_record(
        &self,
        project: &str,
        data: &SiteVerificationModel,
    ) -> Result<(), ApiError> {
        let record = ResourceRecordSet {
            name: data.record_name(),
            record_type: RECORD_TYPE_TXT.to_string(),
            ttl: Some(VERIFICATION_RECORD_TTL_SECS),
            rrdatas: vec![format!("\"{}\"", data.token)],
        };
        trace!(
            id = ?data.id,
            site = %data.site_identifier,
            zone = %data.managed_zone,
            project = %project,
            record = ?record,
            "Creating DNS record"
        );

        let created = self
            .clients
            .dns
            .create(project, &data.managed_zone, &record)
            .await?;
        trace!(response = ?created, "DNS record created");
        Ok(())
    }

    /// Fetch the TXT record; `Ok(None)` if it does not exist.
    async fn read_dns_record(
        &self,
        project: &str,
        data: &SiteVerificationModel,
    ) -> Result<Option<String>, ResourceError> {
        trace!(
            id = ?data.id,
            site = %data.site_identifier,
            zone = %data.managed_zone,
            project = %project,
            "Looking up DNS record"
        );

        let record = match self
            .clients
            .dns
            .get(project, &data.managed_zone, &data.record_name(), RECORD_TYPE_TXT)
            .await
        {
            Ok(record) => record,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(source) => return Err(ResourceError::ReadDnsRecord { source }),
        };

        match record.rrdatas.as_slice() {
            [value] => Ok(Some(value.trim_matches('"').to_string())),
            values => Err(ResourceError::UnexpectedTxtValues {
                count: values.len(),
            }),
        }
    }

    async fn delete_dns_record(
        &self,
        project: &str,
        data: &SiteVerificationModel,
    ) -> Result<(), ApiError> {
        trace!(
            id = ?data.id,
            site = %data.site_identifier,
            zone = %data.managed_zone,
            project = %project,
            "Deleting DNS record"
        );
        self.clients
            .dns
            .delete(project, &data.managed_zone, &data.record_name(), RECORD_TYPE_TXT)
            .await
    }

    async fn insert_site_verification(
        &self,
        data: &mut SiteVerificationModel,
    ) -> Result<(), ResourceError> {
        let method = data.verification_method.clone().unwrap_or_default();
        let request = WebResource {
            id: None,
            site: Some(data.site()),
            owners: owners_for_request(data.owners.as_deref()),
        };
        trace!(site = %data.site_identifier, request = ?request, "Inserting site verification");

        let response = self
            .clients
            .site_verification
            .insert(&method, &request)
            .await
            .map_err(|source| ResourceError::InsertSiteVerification { source })?;
        trace!(id = ?response.id, owners = ?response.owners, "Response");

        data.owners = Some(owners_from_response(response.owners.as_deref()));
        data.id = match response.id {
            Some(remote_id) => Some(
                decode_id(&remote_id)
                    .map_err(|e| ResourceError::InvalidId {
                        id: remote_id.clone(),
                        reason: e.to_string(),
                    })?
                    .into_owned(),
            ),
            None => None,
        };
        Ok(())
    }
}

#[async_trait]
impl Resource for SiteVerificationResource {
    type Model = SiteVerificationModel;

    fn type_suffix(&self) -> &'static str {
        SITE_VERIFICATION_TYPE_SUFFIX
    }

    fn schema(&self) -> Schema {
        site_verification_schema()
    }

    async fn create(
        &self,
        mut data: SiteVerificationModel,
    ) -> Result<SiteVerificationModel, ResourceError> {
        data.apply_defaults();

        if data.uses_dns_txt() {
            if data.project.is_none() {
                data.project.clone_from(&self.clients.project_id);
            }
            let project = self.project(&data)?.to_string();
            self.create_dns_record(&project, &data)
                .await
                .map_err(|source| ResourceError::CreateDnsRecord { source })?;
            debug!(site = %data.site_identifier, zone = %data.managed_zone, "DNS record created");
        }

        self.insert_site_verification(&mut data).await?;

        info!(
            site = %data.site_identifier,
            id = ?data.id,
            owners = ?data.owners,
            "Created site verification"
        );
        Ok(data)
    }

    async fn read(
        &self,
        mut data: SiteVerificationModel,
    ) -> Result<ReadOutcome<SiteVerificationModel>, ResourceError> {
        if data.uses_dns_txt() {
            let project = self.project(&data)?.to_string();
            match self.read_dns_record(&project, &data).await? {
                Some(token) => data.token = token,
                None => {
                    info!(id = ?data.id, site = %data.site_identifier, "DNS TXT record not found, removing from state");
                    return Ok(ReadOutcome::Removed);
                }
            }
        }

        trace!(id = ?data.id, site = %data.site_identifier, "Looking up site verification");
        let response = match self.clients.site_verification.get(data.site_id()).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                info!(id = ?data.id, site = %data.site_identifier, "Site verification not found, removing from state");
                return Ok(ReadOutcome::Removed);
            }
            Err(source) => return Err(ResourceError::ReadSiteVerification { source }),
        };
        trace!(owners = ?response.owners, "Read site verification");

        data.owners = Some(owners_from_response(response.owners.as_deref()));
        Ok(ReadOutcome::Present(data))
    }

    async fn update(
        &self,
        prior: SiteVerificationModel,
        mut data: SiteVerificationModel,
    ) -> Result<SiteVerificationModel, ResourceError> {
        trace!(token = %data.token, owners = ?data.owners, "Site verification update plan");
        data.apply_defaults();
        if data.id.is_none() {
            data.id = prior.id;
        }

        if data.uses_dns_txt() {
            if data.project.is_none() {
                data.project = prior.project.or_else(|| self.clients.project_id.clone());
            }
            let project = self.project(&data)?.to_string();
            self.delete_dns_record(&project, &data)
                .await
                .map_err(|source| ResourceError::DeleteDnsRecord { source })?;
            self.create_dns_record(&project, &data)
                .await
                .map_err(|source| ResourceError::UpdateDnsRecord { source })?;
            debug!(site = %data.site_identifier, "DNS record recreated");
        }

        let request = WebResource {
            id: None,
            site: None,
            owners: owners_for_request(data.owners.as_deref()),
        };
        trace!(id = ?data.id, site = %data.site_identifier, request = ?request, "Patching site verification");
        let response = self
            .clients
            .site_verification
            .patch(data.site_id(), &request)
            .await
            .map_err(|source| ResourceError::UpdateSiteVerification { source })?;
        trace!(id = ?response.id, "Response");

        info!(site = %data.site_identifier, owners = ?data.owners, "Updated site verification");
        Ok(data)
    }

    async fn delete(&self, data: SiteVerificationModel) -> Result<(), ResourceError> {
        if data.uses_dns_txt() {
            let project = self.project(&data)?.to_string();
            self.delete_dns_record(&project, &data)
                .await
                .map_err(|source| ResourceError::DeleteDnsRecord { source })?;
            trace!("DNS record deleted");
        }

        trace!(id = ?data.id, site = %data.site_identifier, "Deleting site verification");
        self.clients
            .site_verification
            .delete(data.site_id())
            .await
            .map_err(|source| ResourceError::RelinquishSiteVerification { source })?;

        info!(site = %data.site_identifier, "Relinquished site verification");
        Ok(())
    }

    fn import_state(&self, id: &str) -> Result<SiteVerificationModel, ResourceError> {
        let decoded = decode_id(id).map_err(|e| ResourceError::InvalidId {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        debug!(id = %decoded, "Importing site verification");
        Ok(SiteVerificationModel::from_import_id(&decoded))
    }
}

#[cfg(test)]
#[path = "site_verification_tests.rs"]
mod site_verification_tests;
