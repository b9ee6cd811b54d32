use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::booking::ConflictKind;
use crate::user::Role;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub admin_email: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub gateway: Address,
    pub currency: Symbol,
    pub token_ttl_seconds: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentAddedEvent {
    pub name: String,
    pub price: i128,
    pub slot_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentRepricedEvent {
    pub name: String,
    pub old_price: i128,
    pub new_price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BookingAdmittedEvent {
    pub booking_id: u64,
    pub patient_email: String,
    pub treatment: String,
    pub appointment_date: String,
    pub slot: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BookingConflictEvent {
    pub patient_email: String,
    pub treatment: String,
    pub appointment_date: String,
    pub kind: ConflictKind,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentRecordedEvent {
    pub payment_id: u64,
    pub booking_id: u64,
    pub transaction_id: String,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserRegisteredEvent {
    pub user_id: u64,
    pub email: String,
    pub role: Role,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPromotedEvent {
    pub user_id: u64,
    pub email: String,
    pub promoted_by: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorAddedEvent {
    pub doctor_id: u64,
    pub name: String,
    pub specialty: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorRemovedEvent {
    pub doctor_id: u64,
    pub removed_by: String,
}

pub fn publish_initialized(env: &Env, admin: Address, admin_email: String) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent { admin, admin_email };
    env.events().publish(topics, data);
}

pub fn publish_config_updated(
    env: &Env,
    gateway: Address,
    currency: Symbol,
    token_ttl_seconds: u64,
) {
    let topics = (symbol_short!("CFG_UPD"),);
    let data = ConfigUpdatedEvent {
        gateway,
        currency,
        token_ttl_seconds,
    };
    env.events().publish(topics, data);
}

pub fn publish_treatment_added(env: &Env, name: String, price: i128, slot_count: u32) {
    let topics = (symbol_short!("TRT_ADD"), name.clone());
    let data = TreatmentAddedEvent {
        name,
        price,
        slot_count,
    };
    env.events().publish(topics, data);
}

pub fn publish_treatment_repriced(env: &Env, name: String, old_price: i128, new_price: i128) {
    let topics = (symbol_short!("TRT_PRC"), name.clone());
    let data = TreatmentRepricedEvent {
        name,
        old_price,
        new_price,
    };
    env.events().publish(topics, data);
}

pub fn publish_booking_admitted(
    env: &Env,
    booking_id: u64,
    patient_email: String,
    treatment: String,
    appointment_date: String,
    slot: String,
) {
    let topics = (symbol_short!("BK_ADD"), patient_email.clone());
    let data = BookingAdmittedEvent {
        booking_id,
        patient_email,
        treatment,
        appointment_date,
        slot,
    };
    env.events().publish(topics, data);
}

pub fn publish_booking_conflict(
    env: &Env,
    patient_email: String,
    treatment: String,
    appointment_date: String,
    kind: ConflictKind,
) {
    let topics = (symbol_short!("BK_CONF"), patient_email.clone());
    let data = BookingConflictEvent {
        patient_email,
        treatment,
        appointment_date,
        kind,
    };
    env.events().publish(topics, data);
}

pub fn publish_payment_recorded(
    env: &Env,
    payment_id: u64,
    booking_id: u64,
    transaction_id: String,
    amount: i128,
) {
    let topics = (symbol_short!("PAY_OK"), booking_id);
    let data = PaymentRecordedEvent {
        payment_id,
        booking_id,
        transaction_id,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn publish_user_registered(env: &Env, user_id: u64, email: String, role: Role) {
    let topics = (symbol_short!("USR_REG"), email.clone());
    let data = UserRegisteredEvent {
        user_id,
        email,
        role,
    };
    env.events().publish(topics, data);
}

pub fn publish_user_promoted(env: &Env, user_id: u64, email: String, promoted_by: String) {
    let topics = (symbol_short!("USR_ADM"), email.clone());
    let data = UserPromotedEvent {
        user_id,
        email,
        promoted_by,
    };
    env.events().publish(topics, data);
}

pub fn publish_doctor_added(env: &Env, doctor_id: u64, name: String, specialty: String) {
    let topics = (symbol_short!("DOC_ADD"), doctor_id);
    let data = DoctorAddedEvent {
        doctor_id,
        name,
        specialty,
    };
    env.events().publish(topics, data);
}

pub fn publish_doctor_removed(env: &Env, doctor_id: u64, removed_by: String) {
    let topics = (symbol_short!("DOC_DEL"), doctor_id);
    let data = DoctorRemovedEvent {
        doctor_id,
        removed_by,
    };
    env.events().publish(topics, data);
}
