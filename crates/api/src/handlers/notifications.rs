//! Handler for the `/notifications` resource: payment receipt emails.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::notifications::email::PaymentReceipt;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /notifications/receipt`.
#[derive(Debug, Deserialize, Validate)]
pub struct ReceiptRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "video_title must not be empty"))]
    pub video_title: String,
    /// Amount paid, in rupees.
    pub amount: i64,
    #[validate(length(min = 1, message = "payment_id must not be empty"))]
    pub payment_id: String,
    #[validate(length(min = 1, message = "provider must not be empty"))]
    pub provider: String,
}

/// Response body for `POST /notifications/receipt`.
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub queued: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/notifications/receipt
///
/// Queue the post-payment receipt emails (customer receipt plus operator
/// sale copy). Delivery happens in the background; SMTP trouble is logged
/// but never turns a completed payment into a client-visible error.
pub async fn send_receipt(
    State(state): State<AppState>,
    Json(input): Json<ReceiptRequest>,
) -> AppResult<Json<DataResponse<ReceiptResponse>>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mailer = state
        .mailer
        .clone()
        .ok_or_else(|| AppError::InternalError("Email delivery is not configured".into()))?;

    let receipt = PaymentReceipt {
        email: input.email,
        name: input.name,
        video_title: input.video_title,
        amount: input.amount,
        payment_id: input.payment_id,
        provider: input.provider,
    };

    tokio::spawn(async move {
        if let Err(e) = mailer.send_receipt(&receipt).await {
            tracing::warn!(error = %e, payment_id = %receipt.payment_id, "Receipt email failed");
        }
    });

    Ok(Json(DataResponse::new(ReceiptResponse { queued: true })))
}
