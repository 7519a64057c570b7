use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DatabaseConnection, DatabaseTransaction, prelude::*};

use crate::{EngineError, ResultEngine};

mod balances;
mod transactions;
mod users;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point for every read and write on users and transactions.
///
/// Transaction writes go through the engine so the owner's balance is updated
/// in the same DB transaction as the transaction row.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn require_user(
        &self,
        db: &DatabaseTransaction,
        user_id: i64,
    ) -> ResultEngine<crate::users::Model> {
        crate::users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn require_transaction(
        &self,
        db: &DatabaseTransaction,
        transaction_id: i64,
    ) -> ResultEngine<crate::transactions::Model> {
        crate::transactions::Entity::find_by_id(transaction_id)
            .one(db)
            .await?
            .ok_or_else(|| transaction_not_found(transaction_id))
    }

    /// Write a new denormalized balance for `user_id`.
    ///
    /// A non-finite balance fails with `Validation`, rolling back the caller's
    /// DB transaction.
    async fn persist_balance(
        &self,
        db: &DatabaseTransaction,
        user_id: i64,
        balance: f64,
        now: DateTime<Utc>,
    ) -> ResultEngine<crate::users::Model> {
        if !balance.is_finite() {
            tracing::warn!(user_id, "rejected out of range balance");
            return Err(EngineError::Validation(
                "resulting balance is out of range".to_string(),
            ));
        }
        tracing::debug!(user_id, balance, "persisting balance");
        let user_model = crate::users::ActiveModel {
            id: ActiveValue::Set(user_id),
            balance: ActiveValue::Set(balance),
            modified_at: ActiveValue::Set(now),
            ..Default::default()
        };
        Ok(user_model.update(db).await?)
    }
}

fn user_not_found(user_id: i64) -> EngineError {
    EngineError::KeyNotFound(format!("user {user_id}"))
}

fn transaction_not_found(transaction_id: i64) -> EngineError {
    EngineError::KeyNotFound(format!("transaction {transaction_id}"))
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;
        Ok(Engine {
            database: self.database,
        })
    }
}
