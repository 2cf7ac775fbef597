//! Form to entity mapping

use crate::domain::cpf;
use crate::domain::{Address, AddressForm, Customer, CustomerForm, NewCustomer};

/// Pure conversions from validated forms to the persisted shapes
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerMapper;

impl CustomerMapper {
    /// New records start in the active partition. The address is attached
    /// separately through [`CustomerMapper::to_address`].
    pub fn to_new_customer(&self, form: &CustomerForm, address: Address) -> NewCustomer {
        NewCustomer {
            name: form.name.trim().to_string(),
            birth_date: form.birth_date,
            email: self.normalize_email(&form.email),
            cpf: self.normalize_cpf(&form.cpf),
            address,
            active: true,
        }
    }

    /// Stored CPF layout; uniqueness checks and lookups go through this too
    pub fn normalize_cpf(&self, raw: &str) -> String {
        cpf::normalize(raw)
    }

    /// Emails are compared case-insensitively
    pub fn normalize_email(&self, raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    pub fn to_address(&self, form: &AddressForm) -> Address {
        Address {
            street: form.street.trim().to_string(),
            number: form.number.trim().to_string(),
            neighborhood: form.neighborhood.trim().to_string(),
            city: form.city.trim().to_string(),
            state: form.state.trim().to_string(),
            postal_code: form.postal_code.trim().to_string(),
        }
    }

    /// Full replacement of every form field. Identity, the active flag and
    /// `created_at` are left untouched.
    pub fn apply(&self, form: &CustomerForm, customer: &mut Customer) {
        customer.name = form.name.trim().to_string();
        customer.birth_date = form.birth_date;
        customer.email = self.normalize_email(&form.email);
        customer.cpf = self.normalize_cpf(&form.cpf);
        customer.address = self.to_address(&form.address);
        customer.touch();
    }
}
