//! `fetch-account`: the GoDaddy account the credentials belong to.

use godaddy_provider::Shopper;

use crate::entities::Entity;
use crate::error::{CollectorError, CollectorResult};

use super::StepContext;

pub const ACCOUNT_ENTITY_TYPE: &str = "godaddy_account";
const ACCOUNT_CLASS: &str = "Account";

/// Entity key of the account; also the job-data key later steps read it from.
pub fn account_key(shopper_id: &str) -> String {
    format!("godaddy:account:{shopper_id}")
}

pub async fn fetch_account_details(ctx: StepContext<'_>) -> CollectorResult<()> {
    let shopper_id = ctx.client.credentials().shopper_id();
    let Some(shopper) = ctx.client.get_account_details().await? else {
        return Err(CollectorError::AccountNotFound(shopper_id.to_string()));
    };

    let key = account_key(shopper_id);
    let entity = ctx
        .job_state
        .add_entity(account_entity(&key, shopper_id, &shopper)?)?;
    ctx.job_state.set_data(key, entity);
    Ok(())
}

fn account_entity(key: &str, shopper_id: &str, shopper: &Shopper) -> CollectorResult<Entity> {
    let display_name = format!("GoDaddy Account {shopper_id}");
    Ok(
        Entity::new(key, ACCOUNT_ENTITY_TYPE, ACCOUNT_CLASS, serde_json::to_value(shopper)?)
            .with("name", display_name.as_str())
            .with("displayName", display_name)
            .with("firstName", shopper.name_first.clone())
            .with("lastName", shopper.name_last.clone())
            .with("email", shopper.email.clone())
            .with("owner", shopper.email.clone())
            .with("marketId", shopper.market_id.clone())
            .with("shopperId", shopper.shopper_id.clone())
            .with("accountId", shopper.shopper_id.clone())
            .with("id", shopper.shopper_id.clone())
            .with("externalId", shopper.external_id),
    )
}
