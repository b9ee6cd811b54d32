//! Treatment catalog. Treatments are keyed by name, which bookings and
//! doctor specialties reference directly.

use common::ttl::{extend_instance, extend_persistent};
use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

use crate::{events, validation, ClinicError};

// ── Storage keys ──────────────────────────────────────────────
const TRT_CTR: Symbol = symbol_short!("TRT_CTR");
/// Treatment names in insertion order; drives listing order.
const TRT_NAMES: Symbol = symbol_short!("TRT_NAMES");

fn treatment_key(name: &String) -> (Symbol, String) {
    (symbol_short!("TRT"), name.clone())
}

// ── Types ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentOption {
    pub id: u64,
    pub name: String,
    /// Whole currency units.
    pub price: i128,
    /// Daily slot template, in display order.
    pub slots: Vec<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentDraft {
    pub name: String,
    pub price: i128,
    pub slots: Vec<String>,
}

// ── Storage functions ────────────────────────────────────────

pub fn get_treatment(env: &Env, name: &String) -> Option<TreatmentOption> {
    env.storage().persistent().get(&treatment_key(name))
}

fn store_treatment(env: &Env, option: &TreatmentOption) {
    let key = treatment_key(&option.name);
    env.storage().persistent().set(&key, option);
    extend_persistent(env, &key);
}

pub fn treatment_names(env: &Env) -> Vec<String> {
    env.storage()
        .persistent()
        .get(&TRT_NAMES)
        .unwrap_or(Vec::new(env))
}

/// Every treatment in catalog order.
pub fn all_treatments(env: &Env) -> Vec<TreatmentOption> {
    let mut options = Vec::new(env);
    for name in treatment_names(env).iter() {
        if let Some(option) = get_treatment(env, &name) {
            options.push_back(option);
        }
    }
    options
}

pub fn add_treatment(env: &Env, draft: TreatmentDraft) -> Result<u64, ClinicError> {
    validation::validate_name(&draft.name)?;
    validation::validate_price(draft.price)?;
    validation::validate_slot_template(&draft.slots)?;

    if get_treatment(env, &draft.name).is_some() {
        return Err(ClinicError::TreatmentExists);
    }

    let current: u64 = env.storage().instance().get(&TRT_CTR).unwrap_or(0);
    let id = current.saturating_add(1);
    env.storage().instance().set(&TRT_CTR, &id);
    extend_instance(env);

    let option = TreatmentOption {
        id,
        name: draft.name,
        price: draft.price,
        slots: draft.slots,
    };
    store_treatment(env, &option);

    let mut names = treatment_names(env);
    names.push_back(option.name.clone());
    env.storage().persistent().set(&TRT_NAMES, &names);
    extend_persistent(env, &TRT_NAMES);

    events::publish_treatment_added(env, option.name, option.price, option.slots.len());

    Ok(id)
}

/// Changes the list price. Existing bookings keep the price they were admitted at.
pub fn set_price(env: &Env, name: &String, price: i128) -> Result<(), ClinicError> {
    validation::validate_price(price)?;

    let mut option = get_treatment(env, name).ok_or(ClinicError::TreatmentNotFound)?;
    let old_price = option.price;
    option.price = price;
    store_treatment(env, &option);

    events::publish_treatment_repriced(env, option.name, old_price, price);

    Ok(())
}
