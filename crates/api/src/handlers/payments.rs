//! Handlers for the `/payments` resource.
//!
//! Two gateways, one job: put a paid "download / share" unlock in front of
//! a video. The primary gateway (`orders` + `verify`) runs client-side with
//! a server-created order and an HMAC check on the callback. The
//! alternative gateway (`checkout`) is a hosted pay page the customer is
//! redirected to. No payment state is persisted; a verified signature is
//! the receipt.

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use keepsake_core::payment::{pay_page_checksum, verify_signature};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// API path of the hosted pay page, signed into the checksum.
const PAY_PAGE_PATH: &str = "/pg/v1/pay";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /payments/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Response body for `POST /payments/verify`.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub verified: bool,
    pub message: String,
}

/// Response body for `POST /payments/checkout`.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Hosted pay page the customer should be redirected to.
    pub url: String,
    pub transaction_id: String,
}

/// Pay-page initiation payload, serialized exactly as the gateway's wire
/// format expects (camelCase, amounts in paise).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PayPagePayload {
    merchant_id: String,
    merchant_transaction_id: String,
    merchant_user_id: String,
    amount: i64,
    redirect_url: String,
    redirect_mode: &'static str,
    callback_url: String,
    mobile_number: &'static str,
    payment_instrument: PaymentInstrument,
}

#[derive(Debug, Serialize)]
struct PaymentInstrument {
    #[serde(rename = "type")]
    kind: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/payments/orders
///
/// Create an order on the primary gateway for the fixed unlock amount and
/// forward the gateway's order object to the client checkout widget.
pub async fn create_order(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let razorpay = state
        .config
        .payments
        .razorpay
        .as_ref()
        .ok_or_else(|| AppError::InternalError("Razorpay is not configured".into()))?;

    // Receipts only need to be unique-ish; the gateway treats them as an
    // opaque merchant reference.
    let suffix: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(7)
        .map(char::from)
        .collect();

    let response = state
        .http
        .post(format!("{}/orders", razorpay.api_url))
        .basic_auth(&razorpay.key_id, Some(&razorpay.key_secret))
        .json(&serde_json::json!({
            "amount": state.config.payments.amount_inr * 100,
            "currency": "INR",
            "receipt": format!("receipt_{suffix}"),
        }))
        .send()
        .await
        .map_err(|e| AppError::InternalError(format!("Payment gateway unreachable: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::InternalError(format!("Payment gateway read error: {e}")))?;

    if !status.is_success() {
        tracing::warn!(%status, "Order creation rejected by gateway");
        return Err(AppError::InternalError(format!(
            "Payment gateway returned {status}: {body}"
        )));
    }

    let order: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| AppError::InternalError(format!("Invalid JSON from gateway: {e}")))?;

    tracing::info!(order_id = order.get("id").and_then(|v| v.as_str()), "Order created");

    Ok(Json(DataResponse::new(order)))
}

/// POST /api/v1/payments/verify
///
/// Verify the HMAC signature the primary gateway attached to a completed
/// payment. A mismatch is a 400, never a 200 with a false flag, so clients
/// cannot mistake tampering for success.
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<DataResponse<VerifyResponse>>> {
    let razorpay = state
        .config
        .payments
        .razorpay
        .as_ref()
        .ok_or_else(|| AppError::InternalError("Razorpay is not configured".into()))?;

    if !verify_signature(
        &razorpay.key_secret,
        &input.order_id,
        &input.payment_id,
        &input.signature,
    ) {
        tracing::warn!(order_id = %input.order_id, "Payment signature mismatch");
        return Err(AppError::BadRequest("Invalid Signature".into()));
    }

    tracing::info!(order_id = %input.order_id, payment_id = %input.payment_id, "Payment verified");

    Ok(Json(DataResponse::new(VerifyResponse {
        verified: true,
        message: "Payment Verified".into(),
    })))
}

/// POST /api/v1/payments/checkout
///
/// Initiate a hosted pay-page transaction on the alternative gateway and
/// return the page URL to redirect the customer to.
pub async fn checkout(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<CheckoutResponse>>> {
    let phonepe = state
        .config
        .payments
        .phonepe
        .as_ref()
        .ok_or_else(|| AppError::InternalError("PhonePe is not configured".into()))?;

    // 1. Assemble the initiation payload. Transaction ids are
    //    millisecond-stamped so retries never collide.
    let now_millis = chrono::Utc::now().timestamp_millis();
    let transaction_id = format!("MT{now_millis}");
    let return_url = format!("{}?id={transaction_id}", phonepe.redirect_url);

    let payload = PayPagePayload {
        merchant_id: phonepe.merchant_id.clone(),
        merchant_transaction_id: transaction_id.clone(),
        merchant_user_id: format!("MUID{now_millis}"),
        amount: state.config.payments.amount_inr * 100,
        redirect_url: return_url.clone(),
        redirect_mode: "REDIRECT",
        callback_url: return_url,
        mobile_number: "9999999999",
        payment_instrument: PaymentInstrument { kind: "PAY_PAGE" },
    };

    // 2. Base64-encode and sign. The checksum covers the encoded payload,
    //    the API path, and the salt key.
    let encoded = BASE64.encode(
        serde_json::to_vec(&payload)
            .map_err(|e| AppError::InternalError(format!("Payload encoding error: {e}")))?,
    );
    let checksum = pay_page_checksum(
        &phonepe.salt_key,
        phonepe.salt_index,
        &encoded,
        PAY_PAGE_PATH,
    );

    // 3. Call the gateway.
    let response = state
        .http
        .post(pay_page_url(&phonepe.merchant_id))
        .header("X-VERIFY", checksum)
        .json(&serde_json::json!({ "request": encoded }))
        .send()
        .await
        .map_err(|e| AppError::InternalError(format!("Payment gateway unreachable: {e}")))?;

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::InternalError(format!("Invalid JSON from gateway: {e}")))?;

    // 4. A successful initiation carries the pay page URL; anything else
    //    surfaces the gateway's own message.
    if body.get("success").and_then(|v| v.as_bool()) != Some(true) {
        let reason = body
            .get("message")
            .or_else(|| body.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("pay page initiation failed");
        tracing::warn!(reason, "Checkout rejected by gateway");
        return Err(AppError::InternalError(format!(
            "Payment gateway error: {reason}"
        )));
    }

    let url = body
        .pointer("/data/instrumentResponse/redirectInfo/url")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::InternalError("Gateway response missing pay page URL".into()))?
        .to_string();

    tracing::info!(%transaction_id, "Pay page transaction initiated");

    Ok(Json(DataResponse::new(CheckoutResponse {
        url,
        transaction_id,
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pick the gateway environment from the merchant id: test merchants
/// (id contains `TEST`) go to the sandbox, everything else to production.
fn pay_page_url(merchant_id: &str) -> &'static str {
    if merchant_id.to_uppercase().contains("TEST") {
        "https://api-preprod.phonepe.com/apis/pg-sandbox/pg/v1/pay"
    } else {
        "https://api.phonepe.com/apis/hermes/pg/v1/pay"
    }
}
