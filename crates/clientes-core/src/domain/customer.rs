// ============================================================================
// Clientes Core - Customer Entity
// File: crates/clientes-core/src/domain/customer.rs
// Description: Customer record with embedded address
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Active/inactive subset of the customer table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Active,
    Inactive,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Active => "active",
            Partition::Inactive => "inactive",
        }
    }

    /// Value of the `active` flag for records in this partition
    pub fn is_active(&self) -> bool {
        matches!(self, Partition::Active)
    }

    pub fn of(active: bool) -> Self {
        if active {
            Partition::Active
        } else {
            Partition::Inactive
        }
    }
}

/// Embedded address, never stored on its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
}

/// Persisted customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "dataNascimento", with = "super::birth_date")]
    pub birth_date: NaiveDate,

    pub email: String,
    pub cpf: String,

    #[serde(rename = "endereco")]
    pub address: Address,

    #[serde(rename = "ativo")]
    pub active: bool,

    // Audit fields
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "atualizadoEm")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn partition(&self) -> Partition {
        Partition::of(self.active)
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.modified_at = Some(Utc::now());
    }
}

/// Customer shape handed to the repository on insert; the store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub cpf: String,
    pub address: Address,
    pub active: bool,
}

impl NewCustomer {
    /// Materialize with a store-assigned identity
    pub fn into_customer(self, id: Uuid, created_at: DateTime<Utc>) -> Customer {
        Customer {
            id,
            name: self.name,
            birth_date: self.birth_date,
            email: self.email,
            cpf: self.cpf,
            address: self.address,
            active: self.active,
            created_at,
            modified_at: None,
        }
    }
}
