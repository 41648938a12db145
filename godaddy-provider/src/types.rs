use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::datetime::parse_rfc3339;
use crate::utils::log_sanitizer::mask_secret;

// ============ Credentials ============

/// Error returned when building [`Credentials`] from user-supplied configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// GoDaddy API credentials.
///
/// Immutable once built. Both constructors reject missing or blank fields, so a
/// [`GodaddyClient`](crate::GodaddyClient) never exists with partial credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
    shopper_id: String,
}

impl Credentials {
    /// Map key of the API key field.
    pub const API_KEY: &'static str = "apiKey";
    /// Map key of the API secret field.
    pub const API_SECRET: &'static str = "apiSecret";
    /// Map key of the shopper ID field.
    pub const SHOPPER_ID: &'static str = "shopperId";

    /// Build credentials from the three values, rejecting blank ones.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        shopper_id: impl Into<String>,
    ) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            api_key: Self::require_non_empty(api_key.into(), Self::API_KEY, "API Key")?,
            api_secret: Self::require_non_empty(api_secret.into(), Self::API_SECRET, "API Secret")?,
            shopper_id: Self::require_non_empty(shopper_id.into(), Self::SHOPPER_ID, "Shopper ID")?,
        })
    }

    /// Build credentials from a flat key-value map (`apiKey`, `apiSecret`, `shopperId`).
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            api_key: Self::get_required_field(map, Self::API_KEY, "API Key")?,
            api_secret: Self::get_required_field(map, Self::API_SECRET, "API Secret")?,
            shopper_id: Self::get_required_field(map, Self::SHOPPER_ID, "Shopper ID")?,
        })
    }

    fn get_required_field(
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Self::require_non_empty(v.clone(), key, label),
        }
    }

    fn require_non_empty(
        value: String,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        if value.trim().is_empty() {
            Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            })
        } else {
            Ok(value)
        }
    }

    /// API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Shopper (customer number) the account lookups are keyed by.
    ///
    /// Not the UUID-style customer ID.
    pub fn shopper_id(&self) -> &str {
        &self.shopper_id
    }

    /// `Authorization` header value: `sso-key {key}:{secret}`.
    pub fn authorization_header(&self) -> String {
        format!("sso-key {}:{}", self.api_key, self.api_secret)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &mask_secret(&self.api_secret))
            .field("shopper_id", &self.shopper_id)
            .finish()
    }
}

// ============ Upstream payloads ============
//
// Only the fields this crate reads are typed. Everything else the API returns
// is kept in `extra`, so a record serializes back to the body it came from.

/// A payload decoded from a JSON object.
///
/// A typed `Option` field cannot tell `"field": null` from a missing field.
/// [`Payload::from_json`] records explicit nulls in `extra`, so both shapes
/// serialize back unchanged.
pub trait Payload: DeserializeOwned {
    fn extra_mut(&mut self) -> &mut Map<String, Value>;

    /// Restore explicit nulls inside nested payloads.
    fn restore_nested_nulls(&mut self, _raw: &Map<String, Value>) {}

    fn from_json(value: Value) -> serde_json::Result<Self> {
        let Value::Object(raw) = value else {
            return serde_json::from_value(value);
        };
        let mut payload: Self = serde_json::from_value(Value::Object(raw.clone()))?;
        restore_nulls(payload.extra_mut(), &raw);
        payload.restore_nested_nulls(&raw);
        Ok(payload)
    }
}

fn restore_nulls(extra: &mut Map<String, Value>, raw: &Map<String, Value>) {
    for (key, value) in raw {
        if value.is_null() {
            extra.entry(key.clone()).or_insert(Value::Null);
        }
    }
}

macro_rules! impl_payload {
    ($($ty:ty),+) => {
        $(impl Payload for $ty {
            fn extra_mut(&mut self) -> &mut Map<String, Value> {
                &mut self.extra
            }
        })+
    };
}

impl_payload!(Shopper, DomainSummary, Contact, DomainRecord);

impl Payload for DomainDetail {
    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }

    fn restore_nested_nulls(&mut self, raw: &Map<String, Value>) {
        let contacts = [
            ("contactAdmin", &mut self.contact_admin),
            ("contactBilling", &mut self.contact_billing),
            ("contactRegistrant", &mut self.contact_registrant),
            ("contactTech", &mut self.contact_tech),
        ];
        for (name, contact) in contacts {
            if let (Some(contact), Some(Value::Object(raw_contact))) = (contact, raw.get(name)) {
                restore_nulls(&mut contact.extra, raw_contact);
            }
        }
    }
}

/// Account resource (`GET /v1/shoppers/{shopperId}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shopper {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopper_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_last: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the domain listing (`GET /v1/domains`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    /// Domain name; doubles as the pagination marker.
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contact block attached to a domain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_last: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Domain details (`GET /v1/domains/{domain}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDetail {
    pub domain_id: i64,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// RFC3339 creation time, as returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// RFC3339 expiry time, as returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renew_auto: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_protected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_admin: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_billing: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_registrant: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_tech: Option<Contact>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DomainDetail {
    /// Status value GoDaddy uses for a live registration.
    pub const STATUS_ACTIVE: &'static str = "ACTIVE";

    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(Self::STATUS_ACTIVE)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_rfc3339)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires.as_deref().and_then(parse_rfc3339)
    }
}

/// DNS record (`GET /v1/domains/{domain}/records`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
