// ============================================================================
// Clientes Core - Input Forms
// File: crates/clientes-core/src/domain/form.rs
// Description: Validated request shapes for register/update/status toggle
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Address sub-object; every field is required
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AddressForm {
    #[serde(rename = "logradouro")]
    #[validate(custom(function = "not_blank", message = "Field 'logradouro' must not be blank"))]
    pub street: String,

    #[serde(rename = "numero")]
    #[validate(custom(function = "not_blank", message = "Field 'numero' must not be blank"))]
    pub number: String,

    #[serde(rename = "bairro")]
    #[validate(custom(function = "not_blank", message = "Field 'bairro' must not be blank"))]
    pub neighborhood: String,

    #[serde(rename = "cidade")]
    #[validate(custom(function = "not_blank", message = "Field 'cidade' must not be blank"))]
    pub city: String,

    #[serde(rename = "estado")]
    #[validate(custom(function = "not_blank", message = "Field 'estado' must not be blank"))]
    pub state: String,

    #[serde(rename = "cep")]
    #[validate(custom(function = "not_blank", message = "Field 'cep' must not be blank"))]
    pub postal_code: String,
}

/// Body of register (POST) and update (PUT)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CustomerForm {
    #[serde(rename = "nome")]
    #[validate(custom(function = "not_blank", message = "Field 'nome' must not be blank"))]
    pub name: String,

    #[serde(rename = "dataNascimento", with = "super::birth_date")]
    pub birth_date: NaiveDate,

    #[validate(
        custom(function = "not_blank", message = "Field 'email' must not be blank"),
        email(message = "The provided email is not valid")
    )]
    pub email: String,

    #[validate(custom(function = "super::cpf::validate_cpf"))]
    pub cpf: String,

    #[serde(rename = "endereco")]
    #[validate(nested)]
    pub address: AddressForm,
}

/// Body of the status toggle (PATCH)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StatusForm {
    #[serde(rename = "ativo")]
    pub active: bool,
}

/// Flatten (possibly nested) validation errors into one message, sorted so
/// the output is stable.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages.sort();
    messages.dedup();
    messages.join("; ")
}

fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.push(match &error.message {
                        Some(message) => message.to_string(),
                        None => format!("Field '{}' is invalid ({})", field, error.code),
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, out);
                }
            }
        }
    }
}
