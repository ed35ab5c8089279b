//! Payment-provider webhook endpoint.
//!
//! Events are verified (see [`verify_event`]), classified by
//! `voicebox_core::billing`, and applied idempotently. Successful processing
//! always acknowledges with `{ "received": true }`; unknown event types are
//! acknowledged without touching the store so new provider event types never
//! fail the webhook.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use voicebox_core::billing::{PaymentEvent, ReconcileAction};
use voicebox_db::repositories::{PurchaseRepo, SubscriptionRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Acknowledgement body returned for every processed event.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Verify the authenticity of an inbound provider event.
///
/// Signature verification is deliberately isolated here so it can be added
/// without touching the reconciliation logic below. TODO: implement provider
/// webhook signature verification before exposing this endpoint publicly;
/// until then every event is accepted and a warning is logged.
fn verify_event(event: &PaymentEvent) -> AppResult<()> {
    tracing::warn!(
        event_type = %event.event_type,
        "Webhook signature verification is not implemented; accepting event unverified",
    );
    Ok(())
}

/// POST /api/v1/webhooks/payments
///
/// Consume a provider event and reconcile purchase/subscription state.
///
/// Malformed payloads are 400s and will never succeed on retry. Store
/// failures (e.g. a capture whose company id has no tenant row) are 500s;
/// the provider keeps retrying those, so an event that fails persistently
/// needs the underlying data fixed, not a code change.
pub async fn payments(
    State(state): State<AppState>,
    Json(event): Json<PaymentEvent>,
) -> AppResult<Json<WebhookAck>> {
    verify_event(&event)?;

    match event.classify()? {
        ReconcileAction::RecordPurchase {
            transaction_id,
            metadata,
            amount,
        } => {
            // Fast path: skip the insert when the transaction is already
            // recorded. The unique constraint remains the authoritative
            // guard against concurrent replays.
            if PurchaseRepo::find_by_transaction_id(&state.pool, &transaction_id)
                .await?
                .is_some()
            {
                tracing::info!(
                    transaction_id = %transaction_id,
                    "Duplicate capture event ignored",
                );
            } else {
                let inserted = PurchaseRepo::insert_if_absent(
                    &state.pool,
                    metadata.company_id,
                    metadata.manager_id,
                    &metadata.report_type,
                    &transaction_id,
                    amount,
                )
                .await?;
                match inserted {
                    Some(purchase) => tracing::info!(
                        purchase_id = purchase.id,
                        tenant_id = purchase.tenant_id,
                        report_type = %purchase.report_type,
                        "Report purchase recorded",
                    ),
                    None => tracing::info!(
                        transaction_id = %transaction_id,
                        "Capture event lost insert race; already recorded",
                    ),
                }
            }
        }
        ReconcileAction::ActivateSubscription {
            tenant_id,
            subscription_id,
        } => {
            let subscription =
                SubscriptionRepo::upsert_active(&state.pool, tenant_id, &subscription_id).await?;
            tracing::info!(
                tenant_id,
                subscription_id = subscription.id,
                provider_subscription_id = %subscription.provider_subscription_id,
                "Subscription activated",
            );
        }
        ReconcileAction::CancelSubscription { subscription_id } => {
            let canceled =
                SubscriptionRepo::cancel_by_provider_id(&state.pool, &subscription_id).await?;
            if canceled {
                tracing::info!(
                    provider_subscription_id = %subscription_id,
                    "Subscription canceled",
                );
            } else {
                // Cancellation of an unknown subscription is a no-op success.
                tracing::warn!(
                    provider_subscription_id = %subscription_id,
                    "Cancellation event for unknown subscription ignored",
                );
            }
        }
        ReconcileAction::Ignore => {
            tracing::debug!(event_type = %event.event_type, "Ignoring webhook event");
        }
    }

    Ok(Json(WebhookAck { received: true }))
}
