#![no_main]

use arbitrary::Arbitrary;
use clinic_booking::{
    AdmissionResult, ClinicBookingContract, ClinicBookingContractClient, ClinicConfig,
    PaymentDraft, TokenResponse, TreatmentDraft, UserDraft, DEFAULT_CURRENCY,
    DEFAULT_TOKEN_TTL_SECONDS,
};
use libfuzzer_sys::fuzz_target;
use sandbox_gateway::{SandboxGateway, SandboxGatewayClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, BytesN, Env, String};
use std::collections::HashSet;

const PATIENTS: [&str; 3] = ["ana@x.com", "ben@x.com", "cho@x.com"];
const TREATMENTS: [&str; 2] = ["Cleaning", "Whitening"];
const DAYS: [&str; 2] = ["2024-05-01", "2024-05-02"];
const SLOTS: [&str; 3] = ["9am", "10am", "11am"];
const PRICE: i128 = 40;

#[derive(Arbitrary, Debug)]
enum Op {
    Signup { patient: u8 },
    Book { patient: u8, treatment: u8, day: u8, slot: u8 },
    Charge { booking: u8 },
    Confirm { booking: u8, transaction: u8, exact_amount: bool },
    Reprice { price: u8 },
}

fn s(env: &Env, v: &str) -> String {
    String::from_str(env, v)
}

fuzz_target!(|ops: Vec<Op>| {
    let env = Env::default();
    env.mock_all_auths();

    let gateway_id = env.register(SandboxGateway, ());
    SandboxGatewayClient::new(&env, &gateway_id).initialize(&Address::generate(&env));

    let contract_id = env.register(ClinicBookingContract, ());
    let client = ClinicBookingContractClient::new(&env, &contract_id);
    client.initialize(
        &Address::generate(&env),
        &s(&env, "Clinic Admin"),
        &s(&env, "admin@clinic.com"),
        &BytesN::from_array(&env, &[5u8; 32]),
        &ClinicConfig {
            gateway: gateway_id,
            currency: DEFAULT_CURRENCY,
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        },
    );
    let admin = match client.issue_token(&s(&env, "admin@clinic.com")) {
        TokenResponse::Issued(token) => Some(token),
        TokenResponse::NoAccount => return,
    };
    for name in TREATMENTS {
        client.add_treatment(
            &admin,
            &TreatmentDraft {
                name: s(&env, name),
                price: PRICE,
                slots: vec![&env, s(&env, SLOTS[0]), s(&env, SLOTS[1]), s(&env, SLOTS[2])],
            },
        );
    }

    let mut booking_count = 0u64;

    for op in ops.iter().take(64) {
        match *op {
            Op::Signup { patient } => {
                let _ = client.try_create_user(&UserDraft {
                    name: s(&env, "Fuzz Patient"),
                    email: s(&env, PATIENTS[patient as usize % PATIENTS.len()]),
                });
            }
            Op::Book { patient, treatment, day, slot } => {
                let result = client.try_create_booking(&clinic_booking::BookingDraft {
                    patient_name: s(&env, "Fuzz Patient"),
                    patient_email: s(&env, PATIENTS[patient as usize % PATIENTS.len()]),
                    phone: s(&env, ""),
                    treatment: s(&env, TREATMENTS[treatment as usize % TREATMENTS.len()]),
                    appointment_date: s(&env, DAYS[day as usize % DAYS.len()]),
                    slot: s(&env, SLOTS[slot as usize % SLOTS.len()]),
                });
                if let Ok(Ok(AdmissionResult::Admitted(id))) = result {
                    booking_count += 1;
                    assert_eq!(id, booking_count);
                }
            }
            Op::Charge { booking } => {
                if let Some(stored) = client.get_booking(&(booking as u64)) {
                    let _ = client.try_create_charge_intent(&stored.price);
                }
            }
            Op::Confirm { booking, transaction, exact_amount } => {
                let booking_id = booking as u64;
                let amount = match client.get_booking(&booking_id) {
                    Some(stored) if exact_amount => stored.price,
                    _ => PRICE + 1,
                };
                let _ = client.try_confirm_payment(&PaymentDraft {
                    booking_id,
                    transaction_id: s(&env, &format!("txn_{}", transaction % 8)),
                    amount,
                });
            }
            Op::Reprice { price } => {
                let _ = client.try_set_treatment_price(
                    &admin,
                    &s(&env, TREATMENTS[0]),
                    &(price as i128),
                );
            }
        }
    }

    // One booking per (patient, treatment, date) and per (treatment, date, slot).
    let mut held = Vec::new();
    let mut taken = Vec::new();
    let mut paid_bookings = HashSet::new();
    for id in 1..=booking_count {
        let booking = client.get_booking(&id).expect("admitted booking missing");
        let key = (
            booking.patient_email.clone(),
            booking.treatment.clone(),
            booking.appointment_date.clone(),
        );
        assert!(!held.contains(&key));
        held.push(key);
        let resource = (booking.treatment, booking.appointment_date, booking.slot);
        assert!(!taken.contains(&resource));
        taken.push(resource);
        assert_eq!(booking.paid, booking.transaction_id.is_some());
        if booking.paid {
            paid_bookings.insert(id);
        }
    }
    assert!(client.get_booking(&(booking_count + 1)).is_none());

    // A payment exists exactly for each paid booking.
    let mut payment_id = 1u64;
    let mut receipts = HashSet::new();
    while let Some(payment) = client.get_payment(&payment_id) {
        let booking = client.get_booking(&payment.booking_id).expect("payment without booking");
        assert!(booking.paid);
        assert_eq!(booking.transaction_id, Some(payment.transaction_id));
        assert_eq!(payment.amount, booking.price);
        assert!(receipts.insert(payment.booking_id));
        payment_id += 1;
    }
    assert_eq!(receipts, paid_bookings);
});
