//! Access gate: bearer tokens and the admin role check.
//!
//! A token is `sha256(signing_key || len(email) || email || expires_at)`
//! carried next to its claims, so issuing one is read-only and verifying one
//! needs no session table.

use common::text;
use soroban_sdk::{contracttype, symbol_short, Bytes, BytesN, Env, String, Symbol};

use crate::user::{self, Role, User};
use crate::ClinicError;

const SIGN_KEY: Symbol = symbol_short!("SIGN_KEY");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessToken {
    pub email: String,
    pub expires_at: u64,
    pub signature: BytesN<32>,
}

/// Result of a token request. Unregistered emails get `NoAccount` instead of
/// an error so clients can route them to signup.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenResponse {
    Issued(AccessToken),
    NoAccount,
}

/// Identity established by a verified token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claims {
    pub email: String,
}

pub fn set_signing_key(env: &Env, key: &BytesN<32>) {
    env.storage().instance().set(&SIGN_KEY, key);
}

fn signing_key(env: &Env) -> Result<BytesN<32>, ClinicError> {
    env.storage()
        .instance()
        .get(&SIGN_KEY)
        .ok_or(ClinicError::NotInitialized)
}

fn sign(env: &Env, email: &String, expires_at: u64) -> Result<BytesN<32>, ClinicError> {
    let key = signing_key(env)?;
    let email_bytes = text::to_bytes(env, email).ok_or(ClinicError::InvalidInput)?;

    let mut payload = Bytes::from_array(env, &key.to_array());
    payload.append(&Bytes::from_array(env, &email.len().to_be_bytes()));
    payload.append(&email_bytes);
    payload.append(&Bytes::from_array(env, &expires_at.to_be_bytes()));

    Ok(env.crypto().sha256(&payload).into())
}

/// Mints a token for a registered email, valid for `ttl_seconds`. Any other
/// string, well-formed or not, gets `NoAccount`.
pub fn issue(env: &Env, email: &String, ttl_seconds: u64) -> Result<TokenResponse, ClinicError> {
    if user::find_by_email(env, email).is_none() {
        return Ok(TokenResponse::NoAccount);
    }

    let expires_at = env.ledger().timestamp().saturating_add(ttl_seconds);
    let signature = sign(env, email, expires_at)?;

    Ok(TokenResponse::Issued(AccessToken {
        email: email.clone(),
        expires_at,
        signature,
    }))
}

/// Authenticates a request. A missing credential and a bad one are reported
/// separately.
pub fn verify(env: &Env, credential: Option<AccessToken>) -> Result<Claims, ClinicError> {
    let token = credential.ok_or(ClinicError::MissingCredential)?;

    let expected = sign(env, &token.email, token.expires_at)
        .map_err(|err| match err {
            ClinicError::InvalidInput => ClinicError::InvalidCredential,
            other => other,
        })?;
    if expected != token.signature {
        return Err(ClinicError::InvalidCredential);
    }
    if token.expires_at <= env.ledger().timestamp() {
        return Err(ClinicError::CredentialExpired);
    }

    Ok(Claims { email: token.email })
}

/// Authorizes an authenticated caller for admin-only operations.
pub fn require_admin(env: &Env, claims: &Claims) -> Result<User, ClinicError> {
    match user::find_by_email(env, &claims.email) {
        Some(user) if user.role == Role::Admin => Ok(user),
        _ => Err(ClinicError::Forbidden),
    }
}

/// `verify` followed by `require_admin`.
pub fn authorize_admin(env: &Env, credential: Option<AccessToken>) -> Result<User, ClinicError> {
    let claims = verify(env, credential)?;
    require_admin(env, &claims)
}
