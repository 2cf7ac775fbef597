// ============================================================================
// Clientes Infrastructure - PostgreSQL Customer Repository
// File: crates/clientes-infrastructure/src/database/postgres/customer_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use clientes_core::domain::{Address, Customer, NewCustomer, Partition};
use clientes_core::error::DomainError;
use clientes_core::repositories::CustomerRepository;
use clientes_shared::{Page, PageRequest};

const CPF_CONSTRAINT: &str = "clientes_cpf_key";
const EMAIL_CONSTRAINT: &str = "clientes_email_key";

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct CustomerRow {
    pub id: Uuid,
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub email: String,
    pub cpf: String,
    pub logradouro: String,
    pub numero: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.nome,
            birth_date: row.data_nascimento,
            email: row.email,
            cpf: row.cpf,
            address: Address {
                street: row.logradouro,
                number: row.numero,
                neighborhood: row.bairro,
                city: row.cidade,
                state: row.estado,
                postal_code: row.cep,
            },
            active: row.ativo,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

/// Map a write failure, turning unique violations into the matching conflict
fn map_write_error(e: sqlx::Error, cpf: &str, email: &str) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(CPF_CONSTRAINT) => DomainError::CpfAlreadyRegistered(cpf.to_string()),
                Some(EMAIL_CONSTRAINT) => DomainError::EmailAlreadyRegistered(email.to_string()),
                _ => DomainError::DatabaseError(db_err.to_string()),
            };
        }
    }
    DomainError::DatabaseError(e.to_string())
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, DomainError> {
        let row: CustomerRow = sqlx::query_as(
            r#"
            INSERT INTO clientes (
                nome, data_nascimento, email, cpf,
                logradouro, numero, bairro, cidade, estado, cep,
                ativo
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING
                id, nome, data_nascimento, email, cpf,
                logradouro, numero, bairro, cidade, estado, cep,
                ativo, created_at, modified_at
            "#
        )
        .bind(&customer.name)
        .bind(customer.birth_date)
        .bind(&customer.email)
        .bind(&customer.cpf)
        .bind(&customer.address.street)
        .bind(&customer.address.number)
        .bind(&customer.address.neighborhood)
        .bind(&customer.address.city)
        .bind(&customer.address.state)
        .bind(&customer.address.postal_code)
        .bind(customer.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating customer: {}", e);
            map_write_error(e, &customer.cpf, &customer.email)
        })?;

        info!("Customer row created: {}", row.id);
        Ok(row.into())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT
                id, nome, data_nascimento, email, cpf,
                logradouro, numero, bairro, cidade, estado, cep,
                ativo, created_at, modified_at
            FROM clientes
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding customer by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_cpf(&self, cpf: &str, partition: Partition) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT
                id, nome, data_nascimento, email, cpf,
                logradouro, numero, bairro, cidade, estado, cep,
                ativo, created_at, modified_at
            FROM clientes
            WHERE cpf = $1 AND ativo = $2
            "#
        )
        .bind(cpf)
        .bind(partition.is_active())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding customer by cpf"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_page(&self, partition: Partition, request: PageRequest) -> Result<Page<Customer>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clientes WHERE ativo = $1")
            .bind(partition.is_active())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting customers"))?;

        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT
                id, nome, data_nascimento, email, cpf,
                logradouro, numero, bairro, cidade, estado, cep,
                ativo, created_at, modified_at
            FROM clientes
            WHERE ativo = $1
            ORDER BY data_nascimento ASC, id ASC
            LIMIT $2 OFFSET $3
            "#
        )
        .bind(partition.is_active())
        .bind(request.limit() as i64)
        .bind(request.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing customers"))?;

        let content = rows.into_iter().map(Customer::from).collect();
        Ok(Page::new(content, request, total.max(0) as u64))
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            UPDATE clientes
            SET
                nome = $2,
                data_nascimento = $3,
                email = $4,
                cpf = $5,
                logradouro = $6,
                numero = $7,
                bairro = $8,
                cidade = $9,
                estado = $10,
                cep = $11,
                ativo = $12,
                modified_at = $13
            WHERE id = $1
            RETURNING
                id, nome, data_nascimento, email, cpf,
                logradouro, numero, bairro, cidade, estado, cep,
                ativo, created_at, modified_at
            "#
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(customer.birth_date)
        .bind(&customer.email)
        .bind(&customer.cpf)
        .bind(&customer.address.street)
        .bind(&customer.address.number)
        .bind(&customer.address.neighborhood)
        .bind(&customer.address.city)
        .bind(&customer.address.state)
        .bind(&customer.address.postal_code)
        .bind(customer.active)
        .bind(customer.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating customer: {}", e);
            map_write_error(e, &customer.cpf, &customer.email)
        })?;

        // the row can vanish between the service's lookup and this write
        row.map(Customer::from)
            .ok_or(DomainError::CustomerNotFoundById(customer.id))
    }

    async fn delete(&self, customer: &Customer) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(customer.id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting customer"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CustomerNotFoundById(customer.id));
        }
        Ok(())
    }

    async fn exists_by_cpf(&self, cpf: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clientes WHERE cpf = $1)")
            .bind(cpf)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("checking cpf"))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clientes WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("checking email"))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error("pinging database"))?;
        Ok(())
    }
}
