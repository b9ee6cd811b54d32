//! Interface to the external payment gateway.
//!
//! The clinic never talks to a card processor directly. It asks a gateway
//! contract to open a charge intent and hands the returned client secret to
//! the patient, who confirms the charge out of band.

use soroban_sdk::{contractclient, contracttype, Env, String, Symbol};

/// A charge opened with the gateway and not yet confirmed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChargeIntent {
    pub id: u64,
    /// Amount in minor currency units (cents for `usd`).
    pub amount: i128,
    pub currency: Symbol,
    /// Handed to the paying client so it can confirm the charge.
    pub client_secret: String,
    pub created_at: u64,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum GatewayError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 3,
    Declined = 4,
    IntentNotFound = 5,
    AlreadyConfirmed = 6,
    SecretMismatch = 7,
}

#[contractclient(name = "ChargeGatewayClient")]
pub trait ChargeGateway {
    /// Opens a charge intent for `amount` minor units of `currency`.
    fn create_intent(env: Env, amount: i128, currency: Symbol)
        -> Result<ChargeIntent, GatewayError>;
}
