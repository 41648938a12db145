//! Collection steps and the runner that executes them in dependency order.

mod account;
mod domains;

use std::collections::HashSet;
use std::time::Instant;

use godaddy_provider::GodaddyClient;

use crate::error::{CollectorError, CollectorResult};
use crate::job_state::JobState;

pub use account::{ACCOUNT_ENTITY_TYPE, account_key, fetch_account_details};
pub use domains::{
    DOMAIN_ENTITY_TYPE, DOMAIN_RECORD_ENTITY_TYPE, domain_key, domain_record_key, fetch_domains,
};

/// Shared inputs of a step.
pub struct StepContext<'a> {
    pub client: &'a GodaddyClient,
    pub job_state: &'a mut JobState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    FetchAccount,
    FetchDomains,
}

/// A unit of collection work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub id: &'static str,
    pub name: &'static str,
    /// Entity types the step produces.
    pub entities: &'static [&'static str],
    /// Relationship types the step produces.
    pub relationships: &'static [&'static str],
    /// Steps that must complete first.
    pub depends_on: &'static [&'static str],
    handler: Handler,
}

impl Step {
    pub async fn execute(&self, ctx: StepContext<'_>) -> CollectorResult<()> {
        match self.handler {
            Handler::FetchAccount => fetch_account_details(ctx).await,
            Handler::FetchDomains => fetch_domains(ctx).await,
        }
    }
}

pub const FETCH_ACCOUNT: Step = Step {
    id: "fetch-account",
    name: "Fetch Account Details",
    entities: &[ACCOUNT_ENTITY_TYPE],
    relationships: &[],
    depends_on: &[],
    handler: Handler::FetchAccount,
};

pub const FETCH_DOMAINS: Step = Step {
    id: "fetch-domains",
    name: "Fetch Domains and Records",
    entities: &[DOMAIN_ENTITY_TYPE, DOMAIN_RECORD_ENTITY_TYPE],
    relationships: &["godaddy_account_has_domain", "godaddy_domain_has_record"],
    depends_on: &[FETCH_ACCOUNT.id],
    handler: Handler::FetchDomains,
};

/// All steps of the integration.
pub fn integration_steps() -> Vec<Step> {
    vec![FETCH_ACCOUNT, FETCH_DOMAINS]
}

/// Order `steps` so every step comes after its dependencies.
///
/// Steps with no ordering constraint between them keep their relative order.
pub fn execution_order(steps: &[Step]) -> CollectorResult<Vec<Step>> {
    let known: HashSet<&str> = steps.iter().map(|s| s.id).collect();
    for step in steps {
        if let Some(missing) = step.depends_on.iter().find(|d| !known.contains(*d)) {
            return Err(CollectorError::StepGraph(format!(
                "step '{}' depends on unknown step '{missing}'",
                step.id
            )));
        }
    }

    let mut done: HashSet<&str> = HashSet::new();
    let mut ordered = Vec::with_capacity(steps.len());

    while ordered.len() < steps.len() {
        let next = steps.iter().find(|s| {
            !done.contains(s.id) && s.depends_on.iter().all(|d| done.contains(d))
        });
        let Some(step) = next else {
            let pending: Vec<&str> = steps
                .iter()
                .filter(|s| !done.contains(s.id))
                .map(|s| s.id)
                .collect();
            return Err(CollectorError::StepGraph(format!(
                "dependency cycle between {}",
                pending.join(", ")
            )));
        };
        done.insert(step.id);
        ordered.push(*step);
    }

    Ok(ordered)
}

/// Run `steps` in dependency order, stopping at the first failure.
pub async fn run_steps(
    client: &GodaddyClient,
    steps: &[Step],
    job_state: &mut JobState,
) -> CollectorResult<()> {
    for step in execution_order(steps)? {
        let started = Instant::now();
        let before = (job_state.entity_count(), job_state.relationship_count());
        tracing::info!("[{}] Starting step: {}", step.id, step.name);

        let result = step
            .execute(StepContext {
                client,
                job_state: &mut *job_state,
            })
            .await;

        if let Err(e) = result {
            if e.is_expected() {
                tracing::warn!("[{}] Step failed: {e}", step.id);
            } else {
                tracing::error!("[{}] Step failed: {e}", step.id);
            }
            return Err(CollectorError::Step {
                step: step.id.to_string(),
                source: Box::new(e),
            });
        }

        tracing::info!(
            "[{}] Step complete in {:.2}s: {} entities, {} relationships",
            step.id,
            started.elapsed().as_secs_f32(),
            job_state.entity_count() - before.0,
            job_state.relationship_count() - before.1
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(steps: &[Step]) -> Vec<&'static str> {
        steps.iter().map(|s| s.id).collect()
    }

    #[test]
    fn account_runs_before_domains() {
        let ordered = execution_order(&[FETCH_DOMAINS, FETCH_ACCOUNT]).unwrap();
        assert_eq!(ids(&ordered), ["fetch-account", "fetch-domains"]);
    }

    #[test]
    fn registered_steps_are_already_ordered() {
        let steps = integration_steps();
        assert_eq!(ids(&execution_order(&steps).unwrap()), ids(&steps));
    }

    #[test]
    fn unknown_dependency_rejected() {
        let err = execution_order(&[FETCH_DOMAINS]).unwrap_err();
        assert!(matches!(err, CollectorError::StepGraph(ref m) if m.contains("fetch-account")));
    }

    #[test]
    fn cycle_rejected() {
        let a = Step {
            depends_on: &["fetch-domains"],
            ..FETCH_ACCOUNT
        };
        let err = execution_order(&[a, FETCH_DOMAINS]).unwrap_err();
        assert!(matches!(err, CollectorError::StepGraph(ref m) if m.contains("cycle")));
    }

    #[test]
    fn step_metadata() {
        assert_eq!(FETCH_DOMAINS.depends_on, ["fetch-account"]);
        assert_eq!(FETCH_ACCOUNT.entities, ["godaddy_account"]);
        assert_eq!(
            FETCH_DOMAINS.entities,
            ["godaddy_domain", "godaddy_domain_record"]
        );
    }
}
