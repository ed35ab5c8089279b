//! Payment-provider webhook event classification.
//!
//! The reconciler's decision logic lives here as a pure function over the
//! parsed event JSON so it can be tested without a database or an HTTP
//! server. The api crate applies the resulting [`ReconcileAction`] against
//! the store.

use serde::Deserialize;

use crate::types::DbId;

/// Subscription status values stored in the `subscriptions` table.
pub const SUBSCRIPTION_ACTIVE: &str = "active";
pub const SUBSCRIPTION_CANCELED: &str = "canceled";

/// Inbound webhook payload, as delivered by the payment provider.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEvent {
    pub event_type: String,
    #[serde(default)]
    pub resource: Option<EventResource>,
}

/// The `resource` object carried by provider events.
///
/// `custom_id` / `custom` carry caller-supplied correlation data: a JSON
/// metadata blob for one-off captures, a tenant id (raw or JSON-wrapped)
/// for subscription events.
#[derive(Debug, Clone, Deserialize)]
pub struct EventResource {
    /// External transaction or subscription id, depending on event type.
    pub id: String,
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub custom: Option<String>,
    #[serde(default)]
    pub amount: Option<EventAmount>,
}

/// Monetary amount as the provider formats it (decimal string).
#[derive(Debug, Clone, Deserialize)]
pub struct EventAmount {
    pub value: String,
}

/// Metadata embedded in the `custom` payload of a completed capture.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CaptureMetadata {
    pub company_id: DbId,
    pub manager_id: DbId,
    pub report_type: String,
}

/// What the reconciler should do with an event.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileAction {
    /// Record a one-off report purchase, idempotent by transaction id.
    RecordPurchase {
        transaction_id: String,
        metadata: CaptureMetadata,
        amount: f64,
    },
    /// Mark the tenant's subscription active under the given external id.
    ActivateSubscription {
        tenant_id: DbId,
        subscription_id: String,
    },
    /// Mark the subscription with the given external id canceled.
    CancelSubscription { subscription_id: String },
    /// Acknowledge without touching the store (unknown event types, or
    /// events missing the correlation data we need).
    Ignore,
}

/// Classification failures. These map to a 400 response; the provider will
/// retry, and a malformed payload will never become well-formed, but the
/// failure must be visible rather than silently acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("event is missing the resource object")]
    MissingResource,

    #[error("capture metadata is not valid JSON: {0}")]
    InvalidPayload(String),
}

impl PaymentEvent {
    /// Classify an event into the action the reconciler should take.
    ///
    /// Unknown event types are acknowledged as [`ReconcileAction::Ignore`]:
    /// the provider adds event types over time and an unrecognized one must
    /// not fail the webhook.
    pub fn classify(&self) -> Result<ReconcileAction, ReconcileError> {
        match self.event_type.as_str() {
            "PAYMENT.CAPTURE.COMPLETED" => self.classify_capture(),
            "BILLING.SUBSCRIPTION.ACTIVATED" | "BILLING.SUBSCRIPTION.UPDATED" => {
                self.classify_activation()
            }
            "BILLING.SUBSCRIPTION.CANCELLED" | "BILLING.SUBSCRIPTION.SUSPENDED" => {
                let resource = self.resource.as_ref().ok_or(ReconcileError::MissingResource)?;
                Ok(ReconcileAction::CancelSubscription {
                    subscription_id: resource.id.clone(),
                })
            }
            _ => Ok(ReconcileAction::Ignore),
        }
    }

    fn classify_capture(&self) -> Result<ReconcileAction, ReconcileError> {
        let resource = self.resource.as_ref().ok_or(ReconcileError::MissingResource)?;

        // Captures without correlation metadata are not ours to record.
        let Some(payload) = custom_payload(resource) else {
            return Ok(ReconcileAction::Ignore);
        };

        let metadata: CaptureMetadata = serde_json::from_str(payload)
            .map_err(|e| ReconcileError::InvalidPayload(e.to_string()))?;

        let amount = resource
            .amount
            .as_ref()
            .and_then(|a| a.value.parse::<f64>().ok())
            .unwrap_or(0.0);

        Ok(ReconcileAction::RecordPurchase {
            transaction_id: resource.id.clone(),
            metadata,
            amount,
        })
    }

    fn classify_activation(&self) -> Result<ReconcileAction, ReconcileError> {
        let resource = self.resource.as_ref().ok_or(ReconcileError::MissingResource)?;

        let Some(payload) = custom_payload(resource) else {
            return Ok(ReconcileAction::Ignore);
        };

        // The tenant id arrives either as a raw integer string or wrapped
        // in JSON as {"company_id": N}.
        let tenant_id = if payload.trim_start().starts_with('{') {
            match serde_json::from_str::<serde_json::Value>(payload) {
                Ok(value) => match value.get("company_id").and_then(|v| v.as_i64()) {
                    Some(id) => id,
                    None => return Ok(ReconcileAction::Ignore),
                },
                Err(_) => return Ok(ReconcileAction::Ignore),
            }
        } else {
            match payload.trim().parse::<DbId>() {
                Ok(id) => id,
                Err(_) => return Ok(ReconcileAction::Ignore),
            }
        };

        Ok(ReconcileAction::ActivateSubscription {
            tenant_id,
            subscription_id: resource.id.clone(),
        })
    }
}

/// Correlation payload, preferring `custom_id` over `custom`.
fn custom_payload(resource: &EventResource) -> Option<&str> {
    resource.custom_id.as_deref().or(resource.custom.as_deref())
}
