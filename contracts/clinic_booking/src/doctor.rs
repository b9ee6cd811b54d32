use common::ttl::{extend_instance, extend_persistent};
use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

use crate::{catalog, events, validation, ClinicError};

const DOC_CTR: Symbol = symbol_short!("DOC_CTR");

fn doctor_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("DOCTOR"), id)
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Doctor {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Name of the treatment this doctor provides.
    pub specialty: String,
    pub available_slots: Vec<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorDraft {
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub available_slots: Vec<String>,
}

pub fn get_doctor(env: &Env, id: u64) -> Option<Doctor> {
    env.storage().persistent().get(&doctor_key(id))
}

/// Adds a doctor to the roster. The specialty must name a catalog treatment
/// and the doctor's slots must come from that treatment's template.
pub fn add_doctor(env: &Env, draft: DoctorDraft) -> Result<u64, ClinicError> {
    validation::validate_name(&draft.name)?;
    validation::validate_email(&draft.email)?;

    let treatment =
        catalog::get_treatment(env, &draft.specialty).ok_or(ClinicError::TreatmentNotFound)?;
    if !draft.available_slots.is_empty() {
        validation::validate_slot_template(&draft.available_slots)?;
    }
    for slot in draft.available_slots.iter() {
        if !treatment.slots.contains(&slot) {
            return Err(ClinicError::InvalidSlot);
        }
    }

    let current: u64 = env.storage().instance().get(&DOC_CTR).unwrap_or(0);
    let id = current.saturating_add(1);
    env.storage().instance().set(&DOC_CTR, &id);
    extend_instance(env);

    let doctor = Doctor {
        id,
        name: draft.name,
        email: draft.email,
        specialty: draft.specialty,
        available_slots: draft.available_slots,
    };
    let key = doctor_key(id);
    env.storage().persistent().set(&key, &doctor);
    extend_persistent(env, &key);

    events::publish_doctor_added(env, id, doctor.name, doctor.specialty);

    Ok(id)
}

pub fn list_doctors(env: &Env) -> Vec<Doctor> {
    let mut doctors = Vec::new(env);
    let counter: u64 = env.storage().instance().get(&DOC_CTR).unwrap_or(0);
    for id in 1..=counter {
        if let Some(doctor) = get_doctor(env, id) {
            doctors.push_back(doctor);
        }
    }
    doctors
}

/// Returns `false` when no doctor has this id.
pub fn remove_doctor(env: &Env, id: u64, removed_by: &String) -> bool {
    let key = doctor_key(id);
    if !env.storage().persistent().has(&key) {
        return false;
    }
    env.storage().persistent().remove(&key);

    events::publish_doctor_removed(env, id, removed_by.clone());

    true
}
