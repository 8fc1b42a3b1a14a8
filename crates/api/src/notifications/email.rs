//! Payment receipt delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport to send
//! plain-text receipts after a verified payment: one to the customer and,
//! when `SMTP_ADMIN_COPY` is set, a sale notice to the operator.
//! Configuration is loaded from environment variables; if `SMTP_HOST` is not
//! set, [`EmailConfig::from_env`] returns `None` and no mailer should be
//! constructed.

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@keepsake.local";

/// Configuration for the SMTP receipt delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Optional operator address that receives a copy of every sale.
    pub admin_copy: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Env Var           | Default                   |
    /// |-------------------|---------------------------|
    /// | `SMTP_HOST`       | (required)                |
    /// | `SMTP_PORT`       | `587`                     |
    /// | `SMTP_FROM`       | `noreply@keepsake.local`  |
    /// | `SMTP_USER`       | (unauthenticated)         |
    /// | `SMTP_PASSWORD`   | (unauthenticated)         |
    /// | `SMTP_ADMIN_COPY` | (no copy sent)            |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            admin_copy: std::env::var("SMTP_ADMIN_COPY").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// PaymentReceipt
// ---------------------------------------------------------------------------

/// Details of a verified payment, as rendered into the receipt emails.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// Customer email address (receipt recipient).
    pub email: String,
    /// Customer display name.
    pub name: String,
    /// Title of the purchased video.
    pub video_title: String,
    /// Amount paid, in rupees.
    pub amount: i64,
    /// Provider-assigned payment id.
    pub payment_id: String,
    /// Payment provider name (e.g. `"razorpay"`, `"phonepe"`).
    pub provider: String,
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends payment receipt emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    /// Create a new email delivery service with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the customer receipt and, if configured, the operator sale copy.
    pub async fn send_receipt(&self, receipt: &PaymentReceipt) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let customer_subject = format!("Payment Successful - {}", receipt.video_title);
        let customer_body = format!(
            "Thank you for your purchase, {}!\n\n\
             Your payment for the video memory \"{}\" was successful.\n\n\
             Amount Paid: ₹{}\n\
             Payment ID: {}\n\
             Provider: {}\n\n\
             You can now download your video directly from the portal.\n\n\
             Video Portal Team",
            receipt.name, receipt.video_title, receipt.amount, receipt.payment_id, receipt.provider
        );

        let customer_email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(receipt.email.parse()?)
            .subject(customer_subject)
            .header(ContentType::TEXT_PLAIN)
            .body(customer_body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(customer_email).await?;

        tracing::info!(to = %receipt.email, payment_id = %receipt.payment_id, "Receipt email sent");

        if let Some(admin) = &self.config.admin_copy {
            let admin_subject = format!("New Sale: {}", receipt.name);
            let admin_body = format!(
                "New Purchase Received\n\n\
                 Customer: {} ({})\n\
                 Video: {}\n\
                 Amount: ₹{}\n\
                 Payment ID: {} ({})",
                receipt.name,
                receipt.email,
                receipt.video_title,
                receipt.amount,
                receipt.payment_id,
                receipt.provider
            );

            let admin_email = Message::builder()
                .from(self.config.from_address.parse()?)
                .to(admin.parse()?)
                .subject(admin_subject)
                .header(ContentType::TEXT_PLAIN)
                .body(admin_body)
                .map_err(|e| EmailError::Build(e.to_string()))?;

            mailer.send(admin_email).await?;

            tracing::info!(to = %admin, payment_id = %receipt.payment_id, "Sale copy sent");
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
