//! SMS Dispatch Gateway
//!
//! Capability interface for delivering one-time codes, with two
//! interchangeable implementations selected once at startup:
//!
//! - [`HttpSmsGateway`] - real HTTP provider transport (production)
//! - [`ConsoleSmsGateway`] - logs the code instead of transmitting it
//!
//! Business logic never branches on the environment; it only sees the
//! trait object picked by [`from_config`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::core::Config;
use crate::utils::{AppError, AppResult};

/// Send a verification code to a normalized phone number
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_code(&self, phone: &str, code: &str) -> AppResult<()>;
}

/// Pick the gateway implementation from configuration.
///
/// A provider URL in production selects the HTTP transport; everything
/// else falls back to the console stub.
pub fn from_config(config: &Config) -> Arc<dyn SmsGateway> {
    match (&config.sms_api_url, config.is_production()) {
        (Some(url), true) => {
            tracing::info!(provider = %url, "SMS gateway: HTTP provider");
            Arc::new(HttpSmsGateway::new(
                url.clone(),
                config.sms_api_key.clone().unwrap_or_default(),
                config.sms_sender_id.clone(),
            ))
        }
        _ => {
            tracing::info!("SMS gateway: console (codes are logged, not sent)");
            Arc::new(ConsoleSmsGateway)
        }
    }
}

// ========== Console stub ==========

/// Non-production gateway: logs the code and always succeeds
pub struct ConsoleSmsGateway;

#[async_trait]
impl SmsGateway for ConsoleSmsGateway {
    async fn send_code(&self, phone: &str, code: &str) -> AppResult<()> {
        tracing::info!(phone = %phone, code = %code, "OTP (console gateway, not sent)");
        Ok(())
    }
}

// ========== HTTP provider ==========

#[derive(Serialize)]
struct SmsPayload<'a> {
    to: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender_id: Option<&'a str>,
}

/// Real transport: POSTs the code to the configured SMS provider
pub struct HttpSmsGateway {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    sender_id: Option<String>,
}

impl HttpSmsGateway {
    pub fn new(api_url: String, api_key: String, sender_id: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url,
            api_key,
            sender_id,
        }
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send_code(&self, phone: &str, code: &str) -> AppResult<()> {
        let payload = SmsPayload {
            to: phone,
            message: format!("{code} is your table ordering verification code."),
            sender_id: self.sender_id.as_deref(),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::delivery(format!("SMS provider unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::delivery(format!(
                "SMS provider rejected the message ({status}): {body}"
            )));
        }

        tracing::debug!(phone = %phone, "OTP dispatched via SMS provider");
        Ok(())
    }
}
