//! Outbound notifications.
//!
//! - [`email::EmailDelivery`] -- Sends payment receipt emails over SMTP.

pub mod email;
