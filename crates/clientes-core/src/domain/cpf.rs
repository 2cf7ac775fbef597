//! CPF (Brazilian individual taxpayer number) checksum validation

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Accepts `ddd.ddd.ddd-dd` or eleven bare digits
static CPF_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{3}\.\d{3}\.\d{3}-\d{2}|\d{11})$").expect("valid CPF regex"));

/// Returns the eleven digits of a well-formed CPF, or `None` if the layout is wrong.
pub fn digits(cpf: &str) -> Option<[u32; 11]> {
    if !CPF_FORMAT.is_match(cpf) {
        return None;
    }
    let mut out = [0u32; 11];
    for (slot, d) in out.iter_mut().zip(cpf.chars().filter_map(|c| c.to_digit(10))) {
        *slot = d;
    }
    Some(out)
}

fn check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}

/// Full checksum validation. Sequences of one repeated digit are rejected
/// even though they satisfy the arithmetic.
pub fn is_valid(cpf: &str) -> bool {
    let Some(d) = digits(cpf) else {
        return false;
    };
    if d.iter().all(|x| *x == d[0]) {
        return false;
    }
    check_digit(&d[..9]) == d[9] && check_digit(&d[..10]) == d[10]
}

/// Canonical `ddd.ddd.ddd-dd` layout of a well-formed CPF. Anything else is
/// returned trimmed so lookups simply miss.
pub fn normalize(cpf: &str) -> String {
    let cpf = cpf.trim();
    match digits(cpf) {
        Some(d) => {
            let s: String = d.iter().filter_map(|x| char::from_digit(*x, 10)).collect();
            format!("{}.{}.{}-{}", &s[0..3], &s[3..6], &s[6..9], &s[9..11])
        }
        None => cpf.to_string(),
    }
}

/// `validator` custom rule covering both the not-blank and checksum checks
pub fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    if cpf.trim().is_empty() {
        return Err(ValidationError::new("not_blank")
            .with_message("Field 'cpf' must not be blank".into()));
    }
    if !is_valid(cpf) {
        return Err(ValidationError::new("cpf").with_message("Invalid CPF".into()));
    }
    Ok(())
}
