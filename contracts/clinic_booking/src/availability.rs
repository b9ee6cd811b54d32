//! Remaining bookable slots per treatment for a given day.
//!
//! Read-only: everything here is derived from the catalog and the slots
//! claimed per treatment on the requested date.

use soroban_sdk::{contracttype, log, Env, String, Vec};

use crate::booking;
use crate::catalog::{self, TreatmentOption};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AvailableTreatment {
    pub name: String,
    pub price: i128,
    /// Template slots still open, in template order.
    pub slots: Vec<String>,
}

/// `template \ claimed`, keeping template order.
pub fn remaining_slots(env: &Env, template: &Vec<String>, claimed: &Vec<String>) -> Vec<String> {
    let mut open = Vec::new(env);
    for slot in template.iter() {
        if !claimed.contains(&slot) {
            open.push_back(slot);
        }
    }
    open
}

/// Applies one treatment's claims for a day to its template.
pub fn open_option(env: &Env, option: TreatmentOption, claimed: &Vec<String>) -> AvailableTreatment {
    let slots = remaining_slots(env, &option.slots, claimed);
    log!(env, "option", option.name, slots.len());
    AvailableTreatment {
        name: option.name,
        price: option.price,
        slots,
    }
}

/// Every catalog treatment with the slots still open on `date`.
///
/// Reads one claim entry per treatment, however many bookings the day holds.
pub fn available_on(env: &Env, date: &String) -> Vec<AvailableTreatment> {
    let mut available = Vec::new(env);
    for option in catalog::all_treatments(env).iter() {
        let claimed = booking::claimed_slots(env, &option.name, date);
        available.push_back(open_option(env, option, &claimed));
    }
    available
}
