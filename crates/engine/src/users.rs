//! The module contains `User` struct and its storage entity.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::balance;

/// A person whose money movements are tracked.
///
/// `balance` is denormalized: it always equals the signed sum of the user's
/// transactions, and the engine keeps it in sync on every transaction write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub balance: f64,
    pub profession: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl User {
    /// Balance the user would have after applying a transaction.
    pub fn adjusted_balance(&self, value: f64, is_debt: bool) -> f64 {
        balance::adjust(self.balance, value, is_debt)
    }

    /// Balance the user would have after undoing a transaction.
    pub fn reverted_balance(&self, value: f64, is_debt: bool) -> f64 {
        balance::revert(self.balance, value, is_debt)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub birth_date: Date,
    pub balance: f64,
    pub profession: Option<String>,
    pub created_at: DateTimeUtc,
    pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            birth_date: model.birth_date,
            balance: model.balance,
            profession: model.profession,
            created_at: model.created_at,
            modified_at: model.modified_at,
        }
    }
}
