//! # godaddy-collector
//!
//! Collects the GoDaddy account, its domains and their DNS records into a graph of
//! entities and relationships.
//!
//! A run validates the configuration, checks the credentials, then executes the
//! steps in dependency order:
//!
//! 1. `fetch-account`: the `godaddy_account` entity.
//! 2. `fetch-domains`: one `godaddy_domain` per domain, plus `godaddy_domain_record`
//!    entities for active domains, linked with `HAS` relationships.

pub mod config;
pub mod entities;
pub mod error;
pub mod job_state;
pub mod steps;
pub mod validate;

pub use config::IntegrationConfig;
pub use entities::{Entity, Relationship};
pub use error::{CollectorError, CollectorResult};
pub use job_state::{CollectedGraph, JobState};
pub use steps::{Step, integration_steps, run_steps};
pub use validate::{create_client, validate_invocation};

/// Validate `config`, then run every step and return what was collected.
pub async fn collect(config: &IntegrationConfig) -> CollectorResult<CollectedGraph> {
    let client = validate_invocation(config).await?;
    let mut job_state = JobState::new();
    run_steps(&client, &integration_steps(), &mut job_state).await?;
    tracing::info!(
        "Collection complete: {} entities, {} relationships",
        job_state.entity_count(),
        job_state.relationship_count()
    );
    Ok(job_state.into_graph())
}
