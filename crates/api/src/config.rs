use keepsake_core::access::AccessPolicy;

use crate::auth::session::SessionConfig;

/// Server configuration loaded from environment variables.
///
/// Network settings have sensible defaults for local development; the
/// credentials (operator login, session secret, override codes) are
/// required so a misconfigured deployment fails at startup instead of
/// running an unguarded gallery.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token configuration (secret, expiry).
    pub session: SessionConfig,
    /// The single operator login credential.
    pub operator: OperatorConfig,
    /// Override codes and the sync default password.
    pub access: AccessPolicy,
    /// Payment provider credentials (each provider optional).
    pub payments: PaymentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default                 |
    /// |-------------------------|----------|-------------------------|
    /// | `HOST`                  | no       | `0.0.0.0`               |
    /// | `PORT`                  | no       | `3000`                  |
    /// | `CORS_ORIGINS`          | no       | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | no       | `30`                    |
    /// | `ADMIN_OVERRIDE_CODES`  | **yes**  | --                      |
    /// | `SYNC_DEFAULT_PASSWORD` | **yes**  | --                      |
    ///
    /// Sub-configs document their own variables. `ADMIN_OVERRIDE_CODES`
    /// is comma-separated; entering any listed code into a password
    /// prompt elevates that browser session to admin.
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or unparseable.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let override_codes: Vec<String> = std::env::var("ADMIN_OVERRIDE_CODES")
            .expect("ADMIN_OVERRIDE_CODES must be set in the environment")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        assert!(
            !override_codes.is_empty(),
            "ADMIN_OVERRIDE_CODES must contain at least one code"
        );

        let sync_default_password = std::env::var("SYNC_DEFAULT_PASSWORD")
            .expect("SYNC_DEFAULT_PASSWORD must be set in the environment");
        assert!(
            !sync_default_password.is_empty(),
            "SYNC_DEFAULT_PASSWORD must not be empty"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session: SessionConfig::from_env(),
            operator: OperatorConfig::from_env(),
            access: AccessPolicy::new(override_codes, sync_default_password),
            payments: PaymentConfig::from_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// Operator credential
// ---------------------------------------------------------------------------

/// The portal's single operator login. There is no users table; this
/// pair is the whole account system.
#[derive(Debug, Clone)]
pub struct OperatorConfig {
    pub email: String,
    pub password: String,
}

impl OperatorConfig {
    /// Load the operator credential from environment variables.
    ///
    /// | Env Var             | Required |
    /// |---------------------|----------|
    /// | `OPERATOR_EMAIL`    | **yes**  |
    /// | `OPERATOR_PASSWORD` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing or empty.
    pub fn from_env() -> Self {
        let email = std::env::var("OPERATOR_EMAIL")
            .expect("OPERATOR_EMAIL must be set in the environment");
        let password = std::env::var("OPERATOR_PASSWORD")
            .expect("OPERATOR_PASSWORD must be set in the environment");
        assert!(!email.is_empty(), "OPERATOR_EMAIL must not be empty");
        assert!(!password.is_empty(), "OPERATOR_PASSWORD must not be empty");
        Self { email, password }
    }

    /// Check a submitted login against the configured credential.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

// ---------------------------------------------------------------------------
// Payment providers
// ---------------------------------------------------------------------------

/// Default charge for a download/share unlock, in INR.
const DEFAULT_AMOUNT_INR: i64 = 400;

/// Payment configuration. Each provider is optional; an endpoint whose
/// provider is unconfigured reports that instead of half-working.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Fixed charge in INR; both providers bill amounts in paise.
    pub amount_inr: i64,
    pub razorpay: Option<RazorpayConfig>,
    pub phonepe: Option<PhonePeConfig>,
}

impl PaymentConfig {
    /// Load payment configuration.
    ///
    /// | Env Var              | Required | Default |
    /// |----------------------|----------|---------|
    /// | `PAYMENT_AMOUNT_INR` | no       | `400`   |
    pub fn from_env() -> Self {
        let amount_inr: i64 = std::env::var("PAYMENT_AMOUNT_INR")
            .unwrap_or_else(|_| DEFAULT_AMOUNT_INR.to_string())
            .parse()
            .expect("PAYMENT_AMOUNT_INR must be a valid i64");

        Self {
            amount_inr,
            razorpay: RazorpayConfig::from_env(),
            phonepe: PhonePeConfig::from_env(),
        }
    }
}

/// Credentials for the primary (order + signature) payment provider.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
    /// REST base URL, overridable for tests.
    pub api_url: String,
}

impl RazorpayConfig {
    /// Load from environment variables; `None` when `RAZORPAY_KEY_ID`
    /// is unset, disabling the order and verify endpoints.
    ///
    /// | Env Var               | Required  | Default                      |
    /// |-----------------------|-----------|------------------------------|
    /// | `RAZORPAY_KEY_ID`     | gate      | unset (provider disabled)    |
    /// | `RAZORPAY_KEY_SECRET` | with gate | --                           |
    /// | `RAZORPAY_API_URL`    | no        | `https://api.razorpay.com/v1`|
    pub fn from_env() -> Option<Self> {
        let key_id = std::env::var("RAZORPAY_KEY_ID").ok()?;
        let key_secret = std::env::var("RAZORPAY_KEY_SECRET")
            .expect("RAZORPAY_KEY_SECRET must be set when RAZORPAY_KEY_ID is set");
        let api_url = std::env::var("RAZORPAY_API_URL")
            .unwrap_or_else(|_| "https://api.razorpay.com/v1".into());
        Some(Self {
            key_id,
            key_secret,
            api_url,
        })
    }
}

/// Credentials for the alternative (hosted pay-page) payment provider.
#[derive(Debug, Clone)]
pub struct PhonePeConfig {
    pub merchant_id: String,
    pub salt_key: String,
    pub salt_index: u32,
    /// Where the pay page sends the customer afterwards.
    pub redirect_url: String,
}

impl PhonePeConfig {
    /// Load from environment variables; `None` when
    /// `PHONEPE_MERCHANT_ID` is unset, disabling the checkout endpoint.
    ///
    /// | Env Var                | Required  | Default                                |
    /// |------------------------|-----------|----------------------------------------|
    /// | `PHONEPE_MERCHANT_ID`  | gate      | unset (provider disabled)              |
    /// | `PHONEPE_SALT_KEY`     | with gate | --                                     |
    /// | `PHONEPE_SALT_INDEX`   | no        | `1`                                    |
    /// | `PHONEPE_REDIRECT_URL` | no        | `http://localhost:3000/payment/result` |
    pub fn from_env() -> Option<Self> {
        let merchant_id = std::env::var("PHONEPE_MERCHANT_ID").ok()?;
        let salt_key = std::env::var("PHONEPE_SALT_KEY")
            .expect("PHONEPE_SALT_KEY must be set when PHONEPE_MERCHANT_ID is set");
        let salt_index: u32 = std::env::var("PHONEPE_SALT_INDEX")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("PHONEPE_SALT_INDEX must be a valid u32");
        let redirect_url = std::env::var("PHONEPE_REDIRECT_URL")
            .unwrap_or_else(|_| "http://localhost:3000/payment/result".into());
        Some(Self {
            merchant_id,
            salt_key,
            salt_index,
            redirect_url,
        })
    }
}
