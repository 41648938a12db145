//! `fetch-domains`: every domain of the account, and the DNS records of active ones.

use std::cell::RefCell;

use godaddy_provider::datetime::rfc3339_to_epoch_millis;
use godaddy_provider::{Contact, DomainDetail, DomainRecord, DomainSummary, GodaddyClient};
use sha1::{Digest, Sha1};

use crate::entities::{Entity, Relationship};
use crate::error::{CollectorError, CollectorResult};
use crate::job_state::JobState;

use super::StepContext;
use super::account::account_key;

pub const DOMAIN_ENTITY_TYPE: &str = "godaddy_domain";
pub const DOMAIN_RECORD_ENTITY_TYPE: &str = "godaddy_domain_record";
const DOMAIN_CLASS: &str = "Domain";
const DOMAIN_RECORD_CLASS: &str = "DomainRecord";
const REGISTRAR: &str = "godaddy";

pub fn domain_key(domain: &str) -> String {
    format!("godaddy-domain:{domain}")
}

/// `godaddy-domain-record:{domain}:{type}:{name}:{sha1(data)}`; missing data hashes as empty.
pub fn domain_record_key(domain: &str, record: &DomainRecord) -> String {
    let data = record.data.as_deref().unwrap_or_default();
    let digest = hex::encode(Sha1::digest(data.as_bytes()));
    format!(
        "godaddy-domain-record:{domain}:{}:{}:{digest}",
        record.record_type, record.name
    )
}

pub async fn fetch_domains(ctx: StepContext<'_>) -> CollectorResult<()> {
    let client = ctx.client;
    let key = account_key(client.credentials().shopper_id());
    let account = ctx
        .job_state
        .get_data(&key)
        .cloned()
        .ok_or_else(|| CollectorError::MissingData(key.clone()))?;

    let state = RefCell::new(std::mem::take(&mut *ctx.job_state));
    let result = client
        .iterate_domains(|summary| collect_domain(client, &account, &state, summary))
        .await;
    *ctx.job_state = state.into_inner();
    result
}

async fn collect_domain(
    client: &GodaddyClient,
    account: &Entity,
    state: &RefCell<JobState>,
    summary: DomainSummary,
) -> CollectorResult<()> {
    let Some(detail) = client.get_domain_details(&summary.domain).await? else {
        tracing::warn!(
            "[fetch-domains] No details for {}, skipping domain",
            summary.domain
        );
        return Ok(());
    };

    let domain = state
        .borrow_mut()
        .add_entity(domain_entity(&summary.domain, &detail)?)?;
    state
        .borrow_mut()
        .add_relationship(Relationship::has(account, &domain))?;

    if !detail.is_active() {
        tracing::debug!(
            "[fetch-domains] {} is not active, skipping records",
            summary.domain
        );
        return Ok(());
    }

    let records = client.get_domain_records(&summary.domain).await?;
    let mut state = state.borrow_mut();
    for record in &records {
        let entity = state.add_entity(record_entity(&summary.domain, record)?)?;
        state.add_relationship(Relationship::has(&domain, &entity))?;
    }
    Ok(())
}

fn domain_entity(domain: &str, detail: &DomainDetail) -> CollectorResult<Entity> {
    let raw = serde_json::to_value(detail)?;
    let contact_email = |contact: Option<&Contact>| contact.and_then(|c| c.email.clone());

    Ok(
        Entity::new(domain_key(domain), DOMAIN_ENTITY_TYPE, DOMAIN_CLASS, raw.clone())
            .with_scalars_of(&raw)
            .with("displayName", detail.domain.as_str())
            .with("domainName", detail.domain.as_str())
            .with("name", detail.domain.as_str())
            .with("createdOn", rfc3339_to_epoch_millis(detail.created_at.as_deref()))
            .with("expiresOn", rfc3339_to_epoch_millis(detail.expires.as_deref()))
            .with("autoRenew", detail.renew_auto)
            .with("active", detail.is_active())
            .with("id", detail.domain_id.to_string())
            .with("registrar", REGISTRAR)
            .with("adminContactEmail", contact_email(detail.contact_admin.as_ref()))
            .with("billingContactEmail", contact_email(detail.contact_billing.as_ref()))
            .with("registrantContactEmail", contact_email(detail.contact_registrant.as_ref()))
            .with("techContactEmail", contact_email(detail.contact_tech.as_ref()))
            .with("transferLock", detail.transfer_protected)
            .with("locked", detail.transfer_protected),
    )
}

fn record_entity(domain: &str, record: &DomainRecord) -> CollectorResult<Entity> {
    Ok(Entity::new(
        domain_record_key(domain, record),
        DOMAIN_RECORD_ENTITY_TYPE,
        DOMAIN_RECORD_CLASS,
        serde_json::to_value(record)?,
    )
    .with("displayName", format!("{}.{domain}", record.name))
    .with("type", record.record_type.as_str())
    .with("name", record.name.as_str())
    .with("data", record.data.as_deref())
    .with("value", record.data.as_deref())
    .with("priority", record.priority)
    .with("ttl", record.ttl)
    .with("TTL", record.ttl))
}
