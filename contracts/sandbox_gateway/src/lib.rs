#![no_std]

//! Development payment gateway.
//!
//! Implements the `ChargeGateway` interface without moving funds: intents are
//! stored, confirmed with their client secret, and answered with a
//! transaction id the clinic can record. An operator switch makes every new
//! charge decline.

use common::gateway::{ChargeIntent, GatewayError};
use common::text::{compose, hex_encode, Piece};
use common::ttl::{extend_instance, extend_persistent};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Bytes, BytesN, Env, String,
    Symbol,
};

/// Storage keys
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const DECLINING: Symbol = symbol_short!("DECLINING");
const INTENT_CTR: Symbol = symbol_short!("INT_CTR");
const TXN_CTR: Symbol = symbol_short!("TXN_CTR");

/// Hex characters of the intent digest embedded in the client secret.
const SECRET_DIGEST_HEX: usize = 24;

fn intent_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("INTENT"), id)
}

/// A stored intent and, once confirmed, its transaction id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntentState {
    pub intent: ChargeIntent,
    pub transaction_id: Option<String>,
}

fn next_id(env: &Env, counter: &Symbol) -> u64 {
    let current: u64 = env.storage().instance().get(counter).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(counter, &next);
    extend_instance(env);
    next
}

fn client_secret(env: &Env, id: u64, amount: i128) -> String {
    let mut payload = Bytes::from_array(env, &id.to_be_bytes());
    payload.append(&Bytes::from_array(env, &amount.to_be_bytes()));
    payload.append(&Bytes::from_array(env, &env.ledger().timestamp().to_be_bytes()));
    payload.append(&Bytes::from_array(env, &env.ledger().sequence().to_be_bytes()));
    let digest: BytesN<32> = env.crypto().sha256(&payload).into();
    let digest = digest.to_array();

    let mut hex = [0u8; 64];
    hex_encode(&digest, &mut hex);

    compose(
        env,
        &[
            Piece::Lit(b"pi_"),
            Piece::Num(id),
            Piece::Lit(b"_secret_"),
            Piece::Lit(&hex[..SECRET_DIGEST_HEX]),
        ],
    )
}

#[contract]
pub struct SandboxGateway;

#[contractimpl]
impl SandboxGateway {
    pub fn initialize(env: Env, admin: Address) -> Result<(), GatewayError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(GatewayError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&DECLINING, &false);
        env.storage().instance().set(&INITIALIZED, &true);
        extend_instance(&env);

        Ok(())
    }

    /// When set, every new charge is declined.
    pub fn set_declining(env: Env, declining: bool) -> Result<(), GatewayError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(GatewayError::NotInitialized)?;
        admin.require_auth();

        env.storage().instance().set(&DECLINING, &declining);
        Ok(())
    }

    pub fn create_intent(
        env: Env,
        amount: i128,
        currency: Symbol,
    ) -> Result<ChargeIntent, GatewayError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(GatewayError::NotInitialized);
        }
        if amount <= 0 {
            return Err(GatewayError::InvalidAmount);
        }
        if env.storage().instance().get(&DECLINING).unwrap_or(false) {
            return Err(GatewayError::Declined);
        }

        let id = next_id(&env, &INTENT_CTR);
        let intent = ChargeIntent {
            id,
            amount,
            currency,
            client_secret: client_secret(&env, id, amount),
            created_at: env.ledger().timestamp(),
        };

        let key = intent_key(id);
        let state = IntentState {
            intent: intent.clone(),
            transaction_id: None,
        };
        env.storage().persistent().set(&key, &state);
        extend_persistent(&env, &key);

        Ok(intent)
    }

    /// Confirms an intent as the paying client would, returning the
    /// transaction id to report to the clinic.
    pub fn confirm_intent(
        env: Env,
        intent_id: u64,
        client_secret: String,
    ) -> Result<String, GatewayError> {
        let key = intent_key(intent_id);
        let mut state: IntentState = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(GatewayError::IntentNotFound)?;

        if state.intent.client_secret != client_secret {
            return Err(GatewayError::SecretMismatch);
        }
        if state.transaction_id.is_some() {
            return Err(GatewayError::AlreadyConfirmed);
        }

        let txn = next_id(&env, &TXN_CTR);
        let transaction_id = compose(&env, &[Piece::Lit(b"txn_"), Piece::Num(txn)]);
        state.transaction_id = Some(transaction_id.clone());
        env.storage().persistent().set(&key, &state);
        extend_persistent(&env, &key);

        Ok(transaction_id)
    }

    pub fn get_intent(env: Env, intent_id: u64) -> Option<IntentState> {
        env.storage().persistent().get(&intent_key(intent_id))
    }
}
