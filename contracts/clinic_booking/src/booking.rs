use common::text::{compose, Piece};
use common::ttl::{extend_instance, extend_persistent};
use soroban_sdk::{contracttype, log, symbol_short, Env, String, Symbol, Vec};

use crate::{catalog, events, validation, ClinicError};

// ── Storage keys ──────────────────────────────────────────────
const BK_CTR: Symbol = symbol_short!("BK_CTR");

fn booking_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("BOOKING"), id)
}

/// Uniqueness constraint: one booking per (patient, treatment, date).
fn admission_key(email: &String, treatment: &String, date: &String) -> (Symbol, String, String, String) {
    (
        symbol_short!("BK_UNIQ"),
        email.clone(),
        treatment.clone(),
        date.clone(),
    )
}

/// Slots already held for one treatment on one date.
fn claims_key(treatment: &String, date: &String) -> (Symbol, String, String) {
    (symbol_short!("BK_SLOTS"), treatment.clone(), date.clone())
}

fn patient_index_key(email: &String) -> (Symbol, String) {
    (symbol_short!("BK_PAT"), email.clone())
}

// ── Types ─────────────────────────────────────────────────────

/// What a patient submits. Identity, price and payment fields are assigned
/// on admission.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BookingDraft {
    pub patient_name: String,
    pub patient_email: String,
    pub phone: String,
    pub treatment: String,
    pub appointment_date: String,
    pub slot: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Booking {
    pub id: u64,
    pub patient_name: String,
    pub patient_email: String,
    pub phone: String,
    pub treatment: String,
    /// `YYYY-MM-DD`
    pub appointment_date: String,
    pub slot: String,
    /// Treatment price at admission time, whole currency units.
    pub price: i128,
    pub paid: bool,
    pub transaction_id: Option<String>,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConflictKind {
    /// The patient already holds this treatment on this date.
    DuplicateBooking,
    /// Another patient holds the requested slot.
    SlotTaken,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BookingConflict {
    pub kind: ConflictKind,
    pub appointment_date: String,
    /// Display text for the patient.
    pub message: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AdmissionResult {
    Admitted(u64),
    Conflict(BookingConflict),
}

// ── Storage functions ────────────────────────────────────────

fn next_booking_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&BK_CTR).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(&BK_CTR, &next);
    extend_instance(env);
    next
}

pub fn get_booking(env: &Env, id: u64) -> Option<Booking> {
    env.storage().persistent().get(&booking_key(id))
}

pub fn store_booking(env: &Env, booking: &Booking) {
    let key = booking_key(booking.id);
    env.storage().persistent().set(&key, booking);
    extend_persistent(env, &key);
}

fn push_index(env: &Env, key: &(Symbol, String), id: u64) {
    let mut ids: Vec<u64> = env.storage().persistent().get(key).unwrap_or(Vec::new(env));
    ids.push_back(id);
    env.storage().persistent().set(key, &ids);
    extend_persistent(env, key);
}

fn load_indexed(env: &Env, key: &(Symbol, String)) -> Vec<Booking> {
    let ids: Vec<u64> = env.storage().persistent().get(key).unwrap_or(Vec::new(env));
    let mut bookings = Vec::new(env);
    for id in ids.iter() {
        if let Some(booking) = get_booking(env, id) {
            bookings.push_back(booking);
        }
    }
    bookings
}

pub fn bookings_for_patient(env: &Env, email: &String) -> Vec<Booking> {
    load_indexed(env, &patient_index_key(email))
}

pub fn claimed_slots(env: &Env, treatment: &String, date: &String) -> Vec<String> {
    env.storage()
        .persistent()
        .get(&claims_key(treatment, date))
        .unwrap_or(Vec::new(env))
}

fn claim_slot(env: &Env, treatment: &String, date: &String, slot: &String) {
    let key = claims_key(treatment, date);
    let mut slots = claimed_slots(env, treatment, date);
    slots.push_back(slot.clone());
    env.storage().persistent().set(&key, &slots);
    extend_persistent(env, &key);
}

// ── Admission ────────────────────────────────────────────────

fn validate_draft(draft: &BookingDraft) -> Result<(), ClinicError> {
    validation::validate_name(&draft.patient_name)?;
    validation::validate_email(&draft.patient_email)?;
    validation::validate_phone(&draft.phone)?;
    validation::validate_name(&draft.treatment)?;
    validation::validate_date(&draft.appointment_date)?;
    validation::validate_slot_label(&draft.slot)?;
    Ok(())
}

fn conflict(env: &Env, draft: &BookingDraft, kind: ConflictKind) -> AdmissionResult {
    let message = match kind {
        ConflictKind::DuplicateBooking => compose(
            env,
            &[
                Piece::Lit(b"You already have a booking on "),
                Piece::Text(&draft.appointment_date),
            ],
        ),
        ConflictKind::SlotTaken => compose(
            env,
            &[
                Piece::Lit(b"The "),
                Piece::Text(&draft.slot),
                Piece::Lit(b" slot is already booked on "),
                Piece::Text(&draft.appointment_date),
            ],
        ),
    };

    events::publish_booking_conflict(
        env,
        draft.patient_email.clone(),
        draft.treatment.clone(),
        draft.appointment_date.clone(),
        kind.clone(),
    );

    AdmissionResult::Conflict(BookingConflict {
        kind,
        appointment_date: draft.appointment_date.clone(),
        message,
    })
}

/// Insert-if-absent on (patient, treatment, date).
///
/// The conflict check and every write happen in the caller's invocation, and
/// the `BK_UNIQ` and `BK_SLOTS` entries are written together with the
/// booking, so a second admission for the same key or slot can never commit.
/// Conflicts write nothing. Storage reads stay constant as a day fills up.
pub fn admit(env: &Env, draft: BookingDraft) -> Result<AdmissionResult, ClinicError> {
    validate_draft(&draft)?;
    log!(
        env,
        "booking request",
        draft.patient_email,
        draft.treatment,
        draft.appointment_date,
        draft.slot
    );

    let option =
        catalog::get_treatment(env, &draft.treatment).ok_or(ClinicError::TreatmentNotFound)?;
    if !option.slots.contains(&draft.slot) {
        return Err(ClinicError::InvalidSlot);
    }

    let unique = admission_key(&draft.patient_email, &draft.treatment, &draft.appointment_date);
    if env.storage().persistent().has(&unique) {
        return Ok(conflict(env, &draft, ConflictKind::DuplicateBooking));
    }
    if claimed_slots(env, &draft.treatment, &draft.appointment_date).contains(&draft.slot) {
        return Ok(conflict(env, &draft, ConflictKind::SlotTaken));
    }

    let booking = Booking {
        id: next_booking_id(env),
        patient_name: draft.patient_name,
        patient_email: draft.patient_email,
        phone: draft.phone,
        treatment: draft.treatment,
        appointment_date: draft.appointment_date,
        slot: draft.slot,
        price: option.price,
        paid: false,
        transaction_id: None,
        created_at: env.ledger().timestamp(),
    };
    store_booking(env, &booking);

    env.storage().persistent().set(&unique, &booking.id);
    extend_persistent(env, &unique);
    claim_slot(env, &booking.treatment, &booking.appointment_date, &booking.slot);
    push_index(env, &patient_index_key(&booking.patient_email), booking.id);

    events::publish_booking_admitted(
        env,
        booking.id,
        booking.patient_email.clone(),
        booking.treatment.clone(),
        booking.appointment_date.clone(),
        booking.slot.clone(),
    );

    Ok(AdmissionResult::Admitted(booking.id))
}
