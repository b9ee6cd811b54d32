use soroban_sdk::{String, Vec};

use crate::ClinicError;

const MIN_NAME_LEN: u32 = 2;
const MAX_NAME_LEN: u32 = 64;

const MIN_EMAIL_LEN: u32 = 3;
const MAX_EMAIL_LEN: u32 = 128;

const MAX_SLOT_LEN: u32 = 32;
const MAX_TEMPLATE_SLOTS: u32 = 48;

const MAX_PHONE_LEN: u32 = 32;
const MAX_TRANSACTION_ID_LEN: u32 = 64;

/// `YYYY-MM-DD`
const DATE_LEN: u32 = 10;

/// Prices are whole currency units; the cap keeps `price * 100` far from overflow.
pub const MAX_PRICE: i128 = 1_000_000;

const MIN_TOKEN_TTL_SECONDS: u64 = 60;
const MAX_TOKEN_TTL_SECONDS: u64 = 604_800; // 7 days

fn is_printable(b: u8) -> bool {
    (32..=126).contains(&b)
}

/// Validate a person's or treatment's display name.
/// Names must be between MIN_NAME_LEN and MAX_NAME_LEN bytes of printable ASCII.
pub fn validate_name(name: &String) -> Result<(), ClinicError> {
    let len = name.len();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(ClinicError::InvalidInput);
    }

    let mut buf = [0u8; MAX_NAME_LEN as usize];
    name.copy_into_slice(&mut buf[..len as usize]);

    if !buf[..len as usize].iter().all(|&b| is_printable(b)) {
        return Err(ClinicError::InvalidInput);
    }

    Ok(())
}

/// Validate an email address used as an account or booking identity.
/// Exactly one `@`, not at either end, no whitespace or control bytes.
pub fn validate_email(email: &String) -> Result<(), ClinicError> {
    let len = email.len();
    if !(MIN_EMAIL_LEN..=MAX_EMAIL_LEN).contains(&len) {
        return Err(ClinicError::InvalidInput);
    }

    let mut buf = [0u8; MAX_EMAIL_LEN as usize];
    let raw = &mut buf[..len as usize];
    email.copy_into_slice(raw);

    if raw.iter().any(|&b| !is_printable(b) || b == b' ') {
        return Err(ClinicError::InvalidInput);
    }

    let at_count = raw.iter().filter(|&&b| b == b'@').count();
    if at_count != 1 || raw[0] == b'@' || raw[raw.len() - 1] == b'@' {
        return Err(ClinicError::InvalidInput);
    }

    Ok(())
}

fn parse_digits(raw: &[u8]) -> Option<u32> {
    let mut value = 0u32;
    for &b in raw {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + (b - b'0') as u32;
    }
    Some(value)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            if leap {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// Validate a calendar date in `YYYY-MM-DD` form, including month lengths
/// and leap years.
pub fn validate_date(date: &String) -> Result<(), ClinicError> {
    if date.len() != DATE_LEN {
        return Err(ClinicError::InvalidInput);
    }

    let mut raw = [0u8; DATE_LEN as usize];
    date.copy_into_slice(&mut raw);

    if raw[4] != b'-' || raw[7] != b'-' {
        return Err(ClinicError::InvalidInput);
    }

    let year = parse_digits(&raw[0..4]).ok_or(ClinicError::InvalidInput)?;
    let month = parse_digits(&raw[5..7]).ok_or(ClinicError::InvalidInput)?;
    let day = parse_digits(&raw[8..10]).ok_or(ClinicError::InvalidInput)?;

    if year == 0 || !(1..=12).contains(&month) {
        return Err(ClinicError::InvalidInput);
    }
    if day == 0 || day > days_in_month(year, month) {
        return Err(ClinicError::InvalidInput);
    }

    Ok(())
}

/// Validate a single slot label such as `9am` or `08.00 AM - 08.30 AM`.
pub fn validate_slot_label(slot: &String) -> Result<(), ClinicError> {
    let len = slot.len();
    if len == 0 || len > MAX_SLOT_LEN {
        return Err(ClinicError::InvalidInput);
    }

    let mut buf = [0u8; MAX_SLOT_LEN as usize];
    slot.copy_into_slice(&mut buf[..len as usize]);

    if !buf[..len as usize].iter().all(|&b| is_printable(b)) {
        return Err(ClinicError::InvalidInput);
    }
    Ok(())
}

/// Validate a daily slot template: non-empty, bounded, labels unique.
pub fn validate_slot_template(slots: &Vec<String>) -> Result<(), ClinicError> {
    if slots.is_empty() || slots.len() > MAX_TEMPLATE_SLOTS {
        return Err(ClinicError::InvalidInput);
    }

    for (i, slot) in slots.iter().enumerate() {
        validate_slot_label(&slot)?;
        // Labels must be unique so one booking consumes exactly one slot.
        if slots.first_index_of(&slot) != Some(i as u32) {
            return Err(ClinicError::InvalidInput);
        }
    }
    Ok(())
}

/// Validate an optional contact phone number. Empty is accepted.
pub fn validate_phone(phone: &String) -> Result<(), ClinicError> {
    let len = phone.len();
    if len > MAX_PHONE_LEN {
        return Err(ClinicError::InvalidInput);
    }

    let mut buf = [0u8; MAX_PHONE_LEN as usize];
    phone.copy_into_slice(&mut buf[..len as usize]);

    let valid = buf[..len as usize]
        .iter()
        .all(|&b| b.is_ascii_digit() || matches!(b, b' ' | b'+' | b'-' | b'(' | b')'));
    if !valid {
        return Err(ClinicError::InvalidInput);
    }
    Ok(())
}

/// Validate a gateway transaction id. Allows `[A-Za-z0-9_-]`.
pub fn validate_transaction_id(transaction_id: &String) -> Result<(), ClinicError> {
    let len = transaction_id.len();
    if len == 0 || len > MAX_TRANSACTION_ID_LEN {
        return Err(ClinicError::InvalidInput);
    }

    let mut buf = [0u8; MAX_TRANSACTION_ID_LEN as usize];
    transaction_id.copy_into_slice(&mut buf[..len as usize]);

    let valid = buf[..len as usize]
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if !valid {
        return Err(ClinicError::InvalidInput);
    }
    Ok(())
}

pub fn validate_price(price: i128) -> Result<(), ClinicError> {
    if !(1..=MAX_PRICE).contains(&price) {
        return Err(ClinicError::InvalidInput);
    }
    Ok(())
}

pub fn validate_token_ttl(seconds: u64) -> Result<(), ClinicError> {
    if !(MIN_TOKEN_TTL_SECONDS..=MAX_TOKEN_TTL_SECONDS).contains(&seconds) {
        return Err(ClinicError::InvalidInput);
    }
    Ok(())
}
