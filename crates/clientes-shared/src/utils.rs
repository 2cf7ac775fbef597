//! Utility functions

/// Mask an email for log output, keeping the first characters of the local part.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let keep = if local.chars().count() <= 2 { 1 } else { 2 };
            let prefix: String = local.chars().take(keep).collect();
            format!("{}***@{}", prefix, domain)
        }
        None => "***".to_string(),
    }
}

/// Mask a CPF for log output, keeping only the last two check digits.
pub fn mask_cpf(cpf: &str) -> String {
    let digits: Vec<char> = cpf.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 2 {
        return "***".to_string();
    }
    let tail: String = digits[digits.len() - 2..].iter().collect();
    format!("***.***.***-{}", tail)
}
