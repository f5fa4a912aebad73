use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgExecutor;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Row;
use sqlx::Transaction;

use crate::domain::user::models::Address;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow, addresses: Vec<Address>) -> Result<User, UserError> {
        Ok(User {
            id: UserId(row.get("id")),
            name: row.get("name"),
            // Stored e-mails were validated on insert; a failure here is corrupt data
            email: EmailAddress::new(row.get("email"))
                .map_err(|e| UserError::DatabaseError(format!("stored email: {}", e)))?,
            birth_date: row.get("birth_date"),
            password_hash: row.get("password_hash"),
            addresses,
        })
    }

    fn row_to_address(row: &PgRow) -> Address {
        Address {
            id: row.get("id"),
            cep: row.get("cep"),
            street: row.get("street"),
            street_number: row.get("street_number"),
            complement: row.get("complement"),
            neighborhood: row.get("neighborhood"),
            city: row.get("city"),
            state: row.get("state"),
        }
    }

    async fn insert_address(
        transaction: &mut Transaction<'_, Postgres>,
        user_id: i32,
        address: NewAddress,
    ) -> Result<Address, UserError> {
        let row = sqlx::query(
            r#"
            INSERT INTO addresses (user_id, cep, street, street_number, complement, neighborhood, city, state)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(&address.cep)
        .bind(&address.street)
        .bind(address.street_number)
        .bind(&address.complement)
        .bind(&address.neighborhood)
        .bind(&address.city)
        .bind(&address.state)
        .fetch_one(&mut **transaction)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(Address {
            id: row.get("id"),
            cep: address.cep,
            street: address.street,
            street_number: address.street_number,
            complement: address.complement,
            neighborhood: address.neighborhood,
            city: address.city,
            state: address.state,
        })
    }

    /// Load addresses for several users at once, keyed by owner.
    async fn addresses_for<'e, E>(
        executor: E,
        user_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<Address>>, UserError>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, cep, street, street_number, complement, neighborhood, city, state
            FROM addresses
            WHERE user_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(user_ids)
        .fetch_all(executor)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let mut by_user: HashMap<i32, Vec<Address>> = HashMap::new();
        for row in &rows {
            by_user
                .entry(row.get("user_id"))
                .or_default()
                .push(Self::row_to_address(row));
        }

        Ok(by_user)
    }

    async fn hydrate_one(&self, row: Option<PgRow>) -> Result<Option<User>, UserError> {
        match row {
            Some(r) => {
                let id: i32 = r.get("id");
                let addresses = Self::addresses_for(&self.pool, &[id])
                    .await?
                    .remove(&id)
                    .unwrap_or_default();
                Ok(Some(Self::row_to_user(&r, addresses)?))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, birth_date, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.birth_date)
        .bind(&user.password_hash)
        .fetch_one(&mut *transaction)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        let id: i32 = row.get("id");

        let mut addresses = Vec::with_capacity(user.addresses.len());
        for address in user.addresses {
            addresses.push(Self::insert_address(&mut transaction, id, address).await?);
        }

        transaction
            .commit()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(User {
            id: UserId(id),
            name: user.name,
            email: user.email,
            birth_date: user.birth_date,
            password_hash: user.password_hash,
            addresses,
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, birth_date, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        self.hydrate_one(row).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, birth_date, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        self.hydrate_one(row).await
    }

    async fn list_page(&self, page: &PageRequest) -> Result<(Vec<User>, i64), UserError> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        // Count, page and addresses all read the same snapshot
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *transaction)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM users")
            .fetch_one(&mut *transaction)
            .await
            .map(|row| row.get("total"))
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let rows = sqlx::query(
            r#"
            SELECT id, name, email, birth_date, password_hash
            FROM users
            ORDER BY name ASC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.max_users)
        .bind(page.skip)
        .fetch_all(&mut *transaction)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let ids: Vec<i32> = rows.iter().map(|r| r.get("id")).collect();
        let mut addresses = Self::addresses_for(&mut *transaction, &ids).await?;

        transaction
            .commit()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let users = rows
            .iter()
            .map(|r| {
                let id: i32 = r.get("id");
                Self::row_to_user(r, addresses.remove(&id).unwrap_or_default())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }
}
