#![no_std]

#[cfg(test)]
extern crate std;

pub mod access;
pub mod availability;
pub mod booking;
pub mod catalog;
pub mod doctor;
pub mod events;
pub mod payment;
pub mod user;
pub mod validation;

use common::ttl::extend_instance;
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, BytesN, Env, String, Symbol, Vec,
};

pub use access::{AccessToken, TokenResponse};
pub use availability::AvailableTreatment;
pub use booking::{AdmissionResult, Booking, BookingConflict, BookingDraft, ConflictKind};
pub use catalog::{TreatmentDraft, TreatmentOption};
pub use doctor::{Doctor, DoctorDraft};
pub use payment::{Payment, PaymentDraft};
pub use user::{AdminStatus, Role, User, UserDraft};

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const CONFIG: Symbol = symbol_short!("CONFIG");
const INITIALIZED: Symbol = symbol_short!("INIT");

pub const DEFAULT_CURRENCY: Symbol = symbol_short!("usd");
/// Four hours.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 14_400;

/// Runtime settings, stored once at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClinicConfig {
    /// Contract implementing `common::gateway::ChargeGateway`.
    pub gateway: Address,
    pub currency: Symbol,
    pub token_ttl_seconds: u64,
}

/// Contract errors
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ClinicError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    MissingCredential = 3,
    InvalidCredential = 4,
    CredentialExpired = 5,
    Forbidden = 6,
    InvalidInput = 7,
    TreatmentNotFound = 8,
    TreatmentExists = 9,
    InvalidSlot = 10,
    UserExists = 11,
    UserNotFound = 12,
    BookingNotFound = 13,
    AlreadyPaid = 14,
    DuplicateTransaction = 15,
    AmountMismatch = 16,
    PaymentDeclined = 17,
    GatewayUnavailable = 18,
}

fn load_config(env: &Env) -> Result<ClinicConfig, ClinicError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ClinicError::NotInitialized)
}

fn store_config(env: &Env, config: &ClinicConfig) -> Result<(), ClinicError> {
    validation::validate_token_ttl(config.token_ttl_seconds)?;
    env.storage().instance().set(&CONFIG, config);
    extend_instance(env);
    Ok(())
}

#[contract]
pub struct ClinicBookingContract;

#[contractimpl]
impl ClinicBookingContract {
    /// Initialize the clinic. `admin` operates the contract; the admin user
    /// created here is the first account allowed to use admin-gated calls.
    pub fn initialize(
        env: Env,
        admin: Address,
        admin_name: String,
        admin_email: String,
        signing_key: BytesN<32>,
        config: ClinicConfig,
    ) -> Result<(), ClinicError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ClinicError::AlreadyInitialized);
        }

        admin.require_auth();

        store_config(&env, &config)?;
        access::set_signing_key(&env, &signing_key);
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);

        user::create_user(
            &env,
            UserDraft {
                name: admin_name,
                email: admin_email.clone(),
            },
            Role::Admin,
        )?;

        events::publish_initialized(&env, admin, admin_email);

        Ok(())
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_config(env: Env) -> Result<ClinicConfig, ClinicError> {
        load_config(&env)
    }

    /// Replace the runtime settings. Signed by the operator address.
    pub fn update_config(env: Env, config: ClinicConfig) -> Result<(), ClinicError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ClinicError::NotInitialized)?;
        admin.require_auth();

        store_config(&env, &config)?;

        events::publish_config_updated(
            &env,
            config.gateway,
            config.currency,
            config.token_ttl_seconds,
        );

        Ok(())
    }

    // ── Catalog ──────────────────────────────────────────────

    /// Every treatment with the slots still open on `date` (`YYYY-MM-DD`).
    pub fn available_treatments(
        env: Env,
        date: String,
    ) -> Result<Vec<AvailableTreatment>, ClinicError> {
        validation::validate_date(&date)?;
        Ok(availability::available_on(&env, &date))
    }

    pub fn treatment_names(env: Env) -> Vec<String> {
        catalog::treatment_names(&env)
    }

    pub fn get_treatment(env: Env, name: String) -> Option<TreatmentOption> {
        catalog::get_treatment(&env, &name)
    }

    pub fn add_treatment(
        env: Env,
        credential: Option<AccessToken>,
        draft: TreatmentDraft,
    ) -> Result<u64, ClinicError> {
        access::authorize_admin(&env, credential)?;
        catalog::add_treatment(&env, draft)
    }

    pub fn set_treatment_price(
        env: Env,
        credential: Option<AccessToken>,
        name: String,
        price: i128,
    ) -> Result<(), ClinicError> {
        access::authorize_admin(&env, credential)?;
        catalog::set_price(&env, &name, price)
    }

    // ── Bookings ─────────────────────────────────────────────

    /// Admit a booking unless the patient already holds this treatment on
    /// this date or the slot is taken. Conflicts are returned, not raised.
    pub fn create_booking(env: Env, draft: BookingDraft) -> Result<AdmissionResult, ClinicError> {
        booking::admit(&env, draft)
    }

    pub fn get_booking(env: Env, booking_id: u64) -> Option<Booking> {
        booking::get_booking(&env, booking_id)
    }

    /// A patient's own bookings. The token's email must match `email`.
    pub fn bookings_for(
        env: Env,
        credential: Option<AccessToken>,
        email: String,
    ) -> Result<Vec<Booking>, ClinicError> {
        let claims = access::verify(&env, credential)?;
        if claims.email != email {
            return Err(ClinicError::Forbidden);
        }
        Ok(booking::bookings_for_patient(&env, &email))
    }

    // ── Payments ─────────────────────────────────────────────

    /// Open a charge for `price` whole currency units; returns the gateway's
    /// client secret.
    pub fn create_charge_intent(env: Env, price: i128) -> Result<String, ClinicError> {
        let config = load_config(&env)?;
        payment::open_intent(&env, &config, price)
    }

    /// Record a confirmed charge and mark its booking paid.
    pub fn confirm_payment(env: Env, draft: PaymentDraft) -> Result<u64, ClinicError> {
        payment::record_payment(&env, draft)
    }

    pub fn get_payment(env: Env, payment_id: u64) -> Option<Payment> {
        payment::get_payment(&env, payment_id)
    }

    // ── Accounts ─────────────────────────────────────────────

    pub fn issue_token(env: Env, email: String) -> Result<TokenResponse, ClinicError> {
        let config = load_config(&env)?;
        access::issue(&env, &email, config.token_ttl_seconds)
    }

    pub fn admin_status(env: Env, email: String) -> AdminStatus {
        user::admin_status(&env, &email)
    }

    /// Signup. New accounts are patients.
    pub fn create_user(env: Env, draft: UserDraft) -> Result<u64, ClinicError> {
        user::create_user(&env, draft, Role::Patient)
    }

    pub fn list_users(env: Env) -> Vec<User> {
        user::list_users(&env)
    }

    pub fn promote_user(
        env: Env,
        credential: Option<AccessToken>,
        user_id: u64,
    ) -> Result<(), ClinicError> {
        let admin = access::authorize_admin(&env, credential)?;
        user::promote(&env, user_id, &admin.email)
    }

    // ── Doctors ──────────────────────────────────────────────

    pub fn list_doctors(
        env: Env,
        credential: Option<AccessToken>,
    ) -> Result<Vec<Doctor>, ClinicError> {
        access::authorize_admin(&env, credential)?;
        Ok(doctor::list_doctors(&env))
    }

    pub fn add_doctor(
        env: Env,
        credential: Option<AccessToken>,
        draft: DoctorDraft,
    ) -> Result<u64, ClinicError> {
        access::authorize_admin(&env, credential)?;
        doctor::add_doctor(&env, draft)
    }

    /// Returns whether a doctor was removed.
    pub fn remove_doctor(
        env: Env,
        credential: Option<AccessToken>,
        doctor_id: u64,
    ) -> Result<bool, ClinicError> {
        let admin = access::authorize_admin(&env, credential)?;
        Ok(doctor::remove_doctor(&env, doctor_id, &admin.email))
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}
