//! Payment reconciliation.
//!
//! Charging happens in two phases: a charge intent is opened with the
//! gateway, the patient confirms it out of band, and the confirmed payload is
//! then recorded here together with the booking's paid flag.

use common::gateway::{ChargeGatewayClient, GatewayError};
use common::ttl::{extend_instance, extend_persistent};
use soroban_sdk::{contracttype, log, symbol_short, Env, String, Symbol};

use crate::booking::{self, Booking};
use crate::{events, validation, ClinicConfig, ClinicError};

// ── Storage keys ──────────────────────────────────────────────
const PAY_CTR: Symbol = symbol_short!("PAY_CTR");

/// Gateway amounts are in minor units; catalog prices are whole units.
pub const MINOR_UNITS_PER_MAJOR: i128 = 100;

fn payment_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("PAYMENT"), id)
}

fn transaction_key(transaction_id: &String) -> (Symbol, String) {
    (symbol_short!("PAY_TX"), transaction_id.clone())
}

// ── Types ─────────────────────────────────────────────────────

/// Confirmation payload posted after the gateway settles a charge.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentDraft {
    pub booking_id: u64,
    pub transaction_id: String,
    /// Whole currency units; must equal the booking price.
    pub amount: i128,
}

/// Append-only receipt of a confirmed charge.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payment {
    pub id: u64,
    pub booking_id: u64,
    pub amount: i128,
    pub transaction_id: String,
    pub paid_at: u64,
}

// ── Storage functions ────────────────────────────────────────

pub fn get_payment(env: &Env, id: u64) -> Option<Payment> {
    env.storage().persistent().get(&payment_key(id))
}

pub fn payment_for_transaction(env: &Env, transaction_id: &String) -> Option<Payment> {
    let id: u64 = env.storage().persistent().get(&transaction_key(transaction_id))?;
    get_payment(env, id)
}

fn next_payment_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&PAY_CTR).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(&PAY_CTR, &next);
    extend_instance(env);
    next
}

// ── Phase 1: charge intent ───────────────────────────────────

/// Converts a whole-unit price into the gateway's minor units.
pub fn minor_units(price: i128) -> Result<i128, ClinicError> {
    validation::validate_price(price)?;
    price
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .ok_or(ClinicError::InvalidInput)
}

/// Opens a charge intent and returns the gateway's client secret.
/// Touches no clinic state.
pub fn open_intent(env: &Env, config: &ClinicConfig, price: i128) -> Result<String, ClinicError> {
    let amount = minor_units(price)?;

    let gateway = ChargeGatewayClient::new(env, &config.gateway);
    match gateway.try_create_intent(&amount, &config.currency) {
        Ok(Ok(intent)) => Ok(intent.client_secret),
        Err(Ok(GatewayError::Declined)) => {
            log!(env, "charge declined", amount);
            Err(ClinicError::PaymentDeclined)
        }
        _ => {
            log!(env, "gateway unavailable", config.gateway, amount);
            Err(ClinicError::GatewayUnavailable)
        }
    }
}

// ── Phase 2: confirmation ────────────────────────────────────

fn mark_paid(env: &Env, mut booking: Booking, transaction_id: &String) {
    booking.paid = true;
    booking.transaction_id = Some(transaction_id.clone());
    booking::store_booking(env, &booking);
}

/// Records a confirmed charge and flips the booking's paid flag as one unit.
///
/// Every check runs before the first write, and any `Err` discards the
/// invocation's writes, so a Payment never exists without its paid Booking.
///
/// Replaying a transaction id already recorded for the same booking returns
/// the original payment id and writes nothing.
pub fn record_payment(env: &Env, draft: PaymentDraft) -> Result<u64, ClinicError> {
    validation::validate_transaction_id(&draft.transaction_id)?;

    if let Some(existing) = payment_for_transaction(env, &draft.transaction_id) {
        if existing.booking_id == draft.booking_id {
            return Ok(existing.id);
        }
        return Err(ClinicError::DuplicateTransaction);
    }

    let booking = booking::get_booking(env, draft.booking_id).ok_or(ClinicError::BookingNotFound)?;
    if booking.paid {
        return Err(ClinicError::AlreadyPaid);
    }
    if draft.amount != booking.price {
        return Err(ClinicError::AmountMismatch);
    }

    let payment = Payment {
        id: next_payment_id(env),
        booking_id: booking.id,
        amount: draft.amount,
        transaction_id: draft.transaction_id,
        paid_at: env.ledger().timestamp(),
    };

    let key = payment_key(payment.id);
    env.storage().persistent().set(&key, &payment);
    extend_persistent(env, &key);

    let tx_key = transaction_key(&payment.transaction_id);
    env.storage().persistent().set(&tx_key, &payment.id);
    extend_persistent(env, &tx_key);

    mark_paid(env, booking, &payment.transaction_id);

    events::publish_payment_recorded(
        env,
        payment.id,
        payment.booking_id,
        payment.transaction_id.clone(),
        payment.amount,
    );

    Ok(payment.id)
}
