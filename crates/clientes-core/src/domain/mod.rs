//! # Clientes Core - Domain Module
//! 
//! Customer entity, its embedded address, and the validated input forms.

pub mod customer;
pub mod form;
pub mod cpf;
pub mod birth_date;

// Re-export entities and forms
pub use customer::{Address, Customer, NewCustomer, Partition};
pub use form::{AddressForm, CustomerForm, StatusForm};
