//! Identity & access resolver — the gate every authenticated request
//! passes through.
//!
//! Checks run in a fixed order so the most user-actionable error surfaces
//! first: expiry (inspected without signature verification) before signature
//! validity, signature validity before payload shape, existence before
//! status. Status failures carry status-specific messages rather than a
//! generic forbidden.

use std::sync::Arc;

use staylink_core::error::AppError;
use staylink_core::result::AppResult;
use staylink_database::repositories::profile::ProfileRepository;
use staylink_database::repositories::user::UserRepository;
use staylink_entity::collaboration::InitiatorType;
use staylink_entity::profile::{CreatorProfile, HotelProfile};
use staylink_entity::user::{User, UserRole, UserStatus};
use uuid::Uuid;

use crate::jwt::{TokenError, TokenIssuer};

/// A verified user acting as one side of the marketplace, with the profile
/// row that backs them.
#[derive(Debug, Clone)]
pub struct MarketplaceActor {
    /// The resolved user.
    pub user: User,
    /// Which side of a collaboration they act as.
    pub side: InitiatorType,
    /// Their creator or hotel profile ID.
    pub profile_id: Uuid,
}

/// Resolves a presented bearer token to a user, enforcing lifecycle status
/// and role scoping.
#[derive(Debug, Clone)]
pub struct AccessResolver {
    issuer: Arc<TokenIssuer>,
    users: Arc<UserRepository>,
    profiles: Arc<ProfileRepository>,
}

impl AccessResolver {
    /// Creates a new resolver.
    pub fn new(
        issuer: Arc<TokenIssuer>,
        users: Arc<UserRepository>,
        profiles: Arc<ProfileRepository>,
    ) -> Self {
        Self {
            issuer,
            users,
            profiles,
        }
    }

    /// Resolve a token to a verified user.
    pub async fn resolve(&self, token: &str) -> AppResult<User> {
        let user = self.resolve_allow_pending(token).await?;
        self.check_status(&user)?;
        Ok(user)
    }

    /// Resolve a token to a user without requiring `verified` status.
    ///
    /// Used by consent and GDPR endpoints that must work before the account
    /// is verified.
    pub async fn resolve_allow_pending(&self, token: &str) -> AppResult<User> {
        // Expiry first, inspected without verifying the signature; the
        // caller is told to log in again instead of seeing a generic
        // invalid-token error.
        if self.issuer.is_expired(token) == Some(true) {
            return Err(AppError::authentication(
                "Token has expired. Please login again.",
            ));
        }

        let claims = self.issuer.verify(token).map_err(|e| match e {
            TokenError::Expired => {
                AppError::authentication("Token has expired. Please login again.")
            }
            TokenError::Malformed => AppError::authentication("Invalid token"),
        })?;

        let user_id = claims
            .sub
            .ok_or_else(|| AppError::authentication("Invalid token payload"))?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("User not found"))
    }

    /// Resolve a token to a creator and their profile.
    ///
    /// A creator without a profile gets a distinct "complete your profile"
    /// error rather than a bare forbidden.
    pub async fn resolve_creator(&self, token: &str) -> AppResult<(User, CreatorProfile)> {
        let user = self.resolve(token).await?;

        if user.role != UserRole::Creator {
            return Err(AppError::authorization(
                "This endpoint is only available for creators",
            ));
        }

        let profile = self
            .profiles
            .find_creator_by_user(user.id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Creator profile not found. Please complete your profile first.",
                )
            })?;

        Ok((user, profile))
    }

    /// Resolve a token to a hotel and their profile.
    pub async fn resolve_hotel(&self, token: &str) -> AppResult<(User, HotelProfile)> {
        let user = self.resolve(token).await?;

        if user.role != UserRole::Hotel {
            return Err(AppError::authorization(
                "This endpoint is only available for hotels",
            ));
        }

        let profile = self
            .profiles
            .find_hotel_by_user(user.id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Hotel profile not found. Please create your profile first.")
            })?;

        Ok((user, profile))
    }

    /// Resolve a token to whichever marketplace side the user belongs to.
    ///
    /// Used by endpoints where either a creator or a hotel may act.
    pub async fn resolve_marketplace_actor(&self, token: &str) -> AppResult<MarketplaceActor> {
        let user = self.resolve(token).await?;

        match user.role {
            UserRole::Creator => {
                let profile = self
                    .profiles
                    .find_creator_by_user(user.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found(
                            "Creator profile not found. Please complete your profile first.",
                        )
                    })?;
                Ok(MarketplaceActor {
                    user,
                    side: InitiatorType::Creator,
                    profile_id: profile.id,
                })
            }
            UserRole::Hotel => {
                let profile = self
                    .profiles
                    .find_hotel_by_user(user.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found(
                            "Hotel profile not found. Please create your profile first.",
                        )
                    })?;
                Ok(MarketplaceActor {
                    user,
                    side: InitiatorType::Hotel,
                    profile_id: profile.id,
                })
            }
            UserRole::Admin => Err(AppError::authorization(
                "This endpoint is only available for creators and hotels",
            )),
        }
    }

    /// Resolve a token to an admin.
    ///
    /// Suspension is re-checked even though the generic resolver already
    /// rejects suspended accounts.
    pub async fn resolve_admin(&self, token: &str) -> AppResult<User> {
        let user = self.resolve(token).await?;

        if user.role != UserRole::Admin {
            return Err(AppError::authorization(
                "This endpoint is only available for administrators",
            ));
        }

        if user.status == UserStatus::Suspended {
            return Err(AppError::authorization(
                "Your account has been suspended. Contact support.",
            ));
        }

        Ok(user)
    }

    /// Enforce lifecycle status with status-specific messages.
    fn check_status(&self, user: &User) -> AppResult<()> {
        match user.status {
            UserStatus::Verified => Ok(()),
            UserStatus::Pending => Err(AppError::authorization(
                "Your account is pending verification. You will be notified once it has been reviewed.",
            )),
            UserStatus::Rejected => Err(AppError::authorization(
                "Your account application was not approved. Contact support for details.",
            )),
            UserStatus::Suspended => Err(AppError::authorization(
                "Your account has been suspended. Contact support.",
            )),
        }
    }
}
