use common::ttl::{extend_instance, extend_persistent};
use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

use crate::{events, validation, ClinicError};

// ── Storage keys ──────────────────────────────────────────────
const USR_CTR: Symbol = symbol_short!("USR_CTR");

fn user_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("USER"), id)
}

fn email_key(email: &String) -> (Symbol, String) {
    (symbol_short!("USER_EM"), email.clone())
}

// ── Types ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    Patient,
    Admin,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: u64,
}

/// Signup payload.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminStatus {
    pub is_admin: bool,
}

// ── Storage functions ────────────────────────────────────────

fn next_user_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&USR_CTR).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(&USR_CTR, &next);
    extend_instance(env);
    next
}

fn store_user(env: &Env, user: &User) {
    let key = user_key(user.id);
    env.storage().persistent().set(&key, user);
    extend_persistent(env, &key);
}

pub fn get_user(env: &Env, id: u64) -> Option<User> {
    env.storage().persistent().get(&user_key(id))
}

pub fn find_by_email(env: &Env, email: &String) -> Option<User> {
    let id: u64 = env.storage().persistent().get(&email_key(email))?;
    get_user(env, id)
}

/// Registers a user. Emails are unique across the clinic.
pub fn create_user(env: &Env, draft: UserDraft, role: Role) -> Result<u64, ClinicError> {
    validation::validate_name(&draft.name)?;
    validation::validate_email(&draft.email)?;

    let index = email_key(&draft.email);
    if env.storage().persistent().has(&index) {
        return Err(ClinicError::UserExists);
    }

    let user = User {
        id: next_user_id(env),
        name: draft.name,
        email: draft.email,
        role,
        created_at: env.ledger().timestamp(),
    };
    store_user(env, &user);
    env.storage().persistent().set(&index, &user.id);
    extend_persistent(env, &index);

    events::publish_user_registered(env, user.id, user.email, user.role);

    Ok(user.id)
}

pub fn list_users(env: &Env) -> Vec<User> {
    let mut users = Vec::new(env);
    let counter: u64 = env.storage().instance().get(&USR_CTR).unwrap_or(0);
    for id in 1..=counter {
        if let Some(user) = get_user(env, id) {
            users.push_back(user);
        }
    }
    users
}

/// Grants the admin role. Promoting an admin again is a no-op.
pub fn promote(env: &Env, id: u64, promoted_by: &String) -> Result<(), ClinicError> {
    let mut user = get_user(env, id).ok_or(ClinicError::UserNotFound)?;
    if user.role == Role::Admin {
        return Ok(());
    }

    user.role = Role::Admin;
    store_user(env, &user);

    events::publish_user_promoted(env, user.id, user.email, promoted_by.clone());

    Ok(())
}

pub fn admin_status(env: &Env, email: &String) -> AdminStatus {
    let is_admin = find_by_email(env, email)
        .map(|user| user.role == Role::Admin)
        .unwrap_or(false);
    AdminStatus { is_admin }
}
