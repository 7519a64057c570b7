//! Transaction primitives.
//!
//! A `Transaction` is a payment (credit) or a debt owned by exactly one user.
//! Its only effect on the rest of the system is the signed change it applies
//! to the owner's balance.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::balance;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub is_debt: bool,
    pub value: f64,
    pub description: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Transaction {
    /// Signed change this transaction applies to its owner's balance.
    pub fn effect(&self) -> f64 {
        balance::signed_effect(self.value, self.is_debt)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub is_debt: bool,
    pub value: f64,
    pub description: String,
    pub user_id: i64,
    pub created_at: DateTimeUtc,
    pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            is_debt: model.is_debt,
            value: model.value,
            description: model.description,
            user_id: model.user_id,
            created_at: model.created_at,
            modified_at: model.modified_at,
        }
    }
}
