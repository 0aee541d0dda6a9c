//! OTP Session Service
//!
//! Issues one-time codes and verifies them against the per-tuple session
//! document. Reissuing rotates the code so a stale code can never be
//! replayed; a consumed code is cleared so it can never be reused.

use std::sync::Arc;

use chrono::{Duration, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{OTP_TTL_MINUTES, generate_code};
use crate::db::models::{CustomerSession, TableIdentity};
use crate::db::repository::SessionRepository;
use crate::sms::SmsGateway;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, normalize_phone, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Outcome of a successful verification
#[derive(Debug, Clone)]
pub struct VerifiedCustomer {
    pub phone: String,
    pub name: String,
}

#[derive(Clone)]
pub struct SessionService {
    repo: SessionRepository,
    sms: Arc<dyn SmsGateway>,
}

impl SessionService {
    pub fn new(db: Surreal<Db>, sms: Arc<dyn SmsGateway>) -> Self {
        Self {
            repo: SessionRepository::new(db),
            sms,
        }
    }

    /// Issue (or reissue) a verification code for the identity tuple.
    ///
    /// Upserts the session: an existing session gets a rotated code, a
    /// fresh expiry and its verified flag dropped. The code is then
    /// dispatched through the SMS gateway; a gateway failure propagates
    /// as a retryable delivery error. Returns the normalized phone.
    pub async fn issue_code(
        &self,
        phone: &str,
        name: &str,
        restaurant_id: &str,
        location_id: &str,
        table_number: &str,
    ) -> AppResult<String> {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
        validate_required_text(restaurant_id, "restaurantId", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(location_id, "locationId", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(table_number, "tableNumber", MAX_SHORT_TEXT_LEN)?;

        let phone = normalize_phone(phone)?;
        let identity = TableIdentity::new(
            phone.clone(),
            restaurant_id,
            location_id,
            table_number,
        );

        let code = generate_code();
        let now = Utc::now();
        let expires_at = now + Duration::minutes(OTP_TTL_MINUTES);

        match self.repo.find_by_identity(&identity).await? {
            Some(existing) => {
                let id = existing
                    .id
                    .ok_or_else(|| AppError::internal("Session record without id"))?;
                self.repo
                    .rotate_code(&id, name.trim(), &code, expires_at, now)
                    .await?;
                tracing::info!(identity = %identity, "OTP rotated");
            }
            None => {
                self.repo
                    .create(CustomerSession {
                        id: None,
                        phone: identity.phone.clone(),
                        name: name.trim().to_string(),
                        restaurant_id: identity.restaurant_id.clone(),
                        location_id: identity.location_id.clone(),
                        table_number: identity.table_number.clone(),
                        otp_code: Some(code.clone()),
                        otp_expires_at: Some(expires_at),
                        is_verified: false,
                        verified_at: None,
                        created_at: now,
                        updated_at: now,
                    })
                    .await?;
                tracing::info!(identity = %identity, "OTP session created");
            }
        }

        self.sms.send_code(&identity.phone, &code).await?;

        Ok(identity.phone)
    }

    /// Check a supplied code against the session for the tuple.
    ///
    /// Verifying an already-verified session is an idempotent no-op that
    /// succeeds without looking at the code. On a correct, unexpired
    /// match the session flips to verified and the code is consumed.
    pub async fn verify_code(
        &self,
        phone: &str,
        code: &str,
        restaurant_id: &str,
        location_id: &str,
        table_number: &str,
    ) -> AppResult<VerifiedCustomer> {
        let phone = normalize_phone(phone)?;
        let identity = TableIdentity::new(phone, restaurant_id, location_id, table_number);

        let session = self
            .repo
            .find_by_identity(&identity)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "No verification in progress for this table. Please request a code first.",
                )
            })?;

        if session.is_verified {
            return Ok(VerifiedCustomer {
                phone: session.phone,
                name: session.name,
            });
        }

        let now = Utc::now();
        if !session.code_usable(now) {
            return Err(AppError::otp_expired("OTP expired. Please request a new one."));
        }

        if session.otp_code.as_deref() != Some(code.trim()) {
            return Err(AppError::invalid_code("Incorrect code. Please try again."));
        }

        let id = session
            .id
            .ok_or_else(|| AppError::internal("Session record without id"))?;
        let verified = self.repo.mark_verified(&id, now).await?;

        tracing::info!(identity = %identity, "Phone verified");
        Ok(VerifiedCustomer {
            phone: verified.phone,
            name: verified.name,
        })
    }
}
