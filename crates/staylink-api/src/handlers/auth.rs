//! Auth handlers — registration, login, token introspection, password
//! reset, and email verification.
//!
//! The forgot-password and verification endpoints always answer 200 with an
//! outcome field; whether an email or token exists is only visible in logs.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use staylink_core::error::AppError;
use staylink_service::account::RegisterInput;

use crate::dto::request::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    SendVerificationCodeRequest, ValidateTokenRequest, VerifyEmailCodeRequest, VerifyEmailQuery,
};
use crate::dto::response::{
    AuthResponse, ForgotPasswordResponse, MessageResponse, SendVerificationCodeResponse,
    UserResponse, VerifyEmailCodeResponse, VerifyEmailResponse,
};
use crate::extractors::{AuthUserAllowPending, ClientMetaExt};
use crate::handlers::validate_body;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ClientMetaExt(meta): ClientMetaExt,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    validate_body(&req)?;

    let outcome = state
        .account_service
        .register(
            RegisterInput {
                email: req.email,
                password: req.password,
                name: req.name,
                role: req.role,
                terms_accepted: req.terms_accepted,
                privacy_accepted: req.privacy_accepted,
                marketing_consent: req.marketing_consent,
                terms_version: req.terms_version,
                privacy_version: req.privacy_version,
            },
            &meta,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: outcome.user.id,
            email: outcome.user.email.clone(),
            name: outcome.user.name.clone(),
            role: outcome.user.role.to_string(),
            status: outcome.user.status.to_string(),
            access_token: outcome.token.token,
            token_type: "bearer".to_string(),
            expires_in: outcome.token.expires_in_seconds,
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validate_body(&req)?;

    let outcome = state.account_service.login(&req.email, &req.password).await?;

    Ok(Json(AuthResponse {
        id: outcome.user.id,
        email: outcome.user.email.clone(),
        name: outcome.user.name.clone(),
        role: outcome.user.role.to_string(),
        status: outcome.user.status.to_string(),
        access_token: outcome.token.token,
        token_type: "bearer".to_string(),
        expires_in: outcome.token.expires_in_seconds,
        message: "Login successful".to_string(),
    }))
}

/// POST /api/auth/validate-token — best-effort introspection, always 200.
pub async fn validate_token(
    State(state): State<AppState>,
    Json(req): Json<ValidateTokenRequest>,
) -> Json<staylink_service::account::TokenValidation> {
    Json(state.account_service.validate_token(&req.token))
}

/// GET /api/auth/me
pub async fn me(AuthUserAllowPending(user): AuthUserAllowPending) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// POST /api/auth/forgot-password — identical response shape whether or
/// not the email exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ForgotPasswordResponse>, AppError> {
    validate_body(&req)?;

    let debug_token = state.account_service.forgot_password(&req.email).await?;

    Ok(Json(ForgotPasswordResponse {
        message: "If an account exists for that email, a password reset link has been sent."
            .to_string(),
        token: debug_token,
    }))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_body(&req)?;

    state
        .account_service
        .reset_password(&req.token, &req.new_password)
        .await?;

    Ok(Json(MessageResponse::new(
        "Your password has been reset. You can now log in with your new password.",
    )))
}

/// GET /api/auth/verify-email?token= — always 200, outcome in the body.
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<Json<VerifyEmailResponse>, AppError> {
    let (verified, email) = state.account_service.verify_email_token(&query.token).await?;

    let message = if verified {
        "Your email address has been verified."
    } else {
        "This verification link is invalid or has expired."
    };

    Ok(Json(VerifyEmailResponse {
        message: message.to_string(),
        verified,
        email,
    }))
}

/// POST /api/auth/send-verification-code — always 200.
pub async fn send_verification_code(
    State(state): State<AppState>,
    Json(req): Json<SendVerificationCodeRequest>,
) -> Result<Json<SendVerificationCodeResponse>, AppError> {
    validate_body(&req)?;

    let debug_code = state.account_service.send_verification_code(&req.email).await?;

    Ok(Json(SendVerificationCodeResponse {
        message: "A verification code has been sent to your email.".to_string(),
        code: debug_code,
    }))
}

/// POST /api/auth/verify-email-code — always 200, outcome in the body.
pub async fn verify_email_code(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailCodeRequest>,
) -> Result<Json<VerifyEmailCodeResponse>, AppError> {
    validate_body(&req)?;

    let verified = state
        .account_service
        .verify_email_code(&req.email, &req.code)
        .await?;

    let message = if verified {
        "Your email address has been verified."
    } else {
        "The verification code is invalid or has expired."
    };

    Ok(Json(VerifyEmailCodeResponse {
        message: message.to_string(),
        verified,
    }))
}
