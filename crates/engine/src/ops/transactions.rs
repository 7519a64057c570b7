//! Transaction lifecycle.
//!
//! Every write follows the same shape inside one DB transaction:
//! load the owner, compute the new balance with the balance adjuster,
//! persist the balance, then persist the transaction row. A failure at any
//! step rolls back both writes.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    NewTransactionCmd, ResultEngine, Transaction, UpdateTransactionCmd, User, balance,
    transactions, users,
    util::{DESCRIPTION_MAX_LEN, normalize_text, validate_value},
};

use super::{Engine, transaction_not_found, user_not_found, with_tx};

impl Engine {
    /// All transactions, in creation order.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .order_by_asc(transactions::Column::CreatedAt)
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Transaction::from).collect())
    }

    /// Return a transaction snapshot from DB.
    pub async fn transaction(&self, transaction_id: i64) -> ResultEngine<Transaction> {
        transactions::Entity::find_by_id(transaction_id)
            .one(&self.database)
            .await?
            .map(Transaction::from)
            .ok_or_else(|| transaction_not_found(transaction_id))
    }

    /// Transactions owned by `user_id`, in creation order.
    ///
    /// Fails with `KeyNotFound` when the user does not exist, so an unknown id
    /// is distinguishable from a user without transactions.
    pub async fn list_user_transactions(&self, user_id: i64) -> ResultEngine<Vec<Transaction>> {
        let exists = users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .is_some();
        if !exists {
            return Err(user_not_found(user_id));
        }

        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_asc(transactions::Column::CreatedAt)
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Transaction::from).collect())
    }

    /// Creates a transaction and applies its effect to the owner's balance.
    pub async fn new_transaction(&self, cmd: NewTransactionCmd) -> ResultEngine<Transaction> {
        let value = validate_value(cmd.value)?;
        let description = normalize_text(&cmd.description, "description", DESCRIPTION_MAX_LEN)?;
        let is_debt = cmd.is_debt;

        with_tx!(self, |db_tx| {
            let owner = User::from(self.require_user(&db_tx, cmd.user_id).await?);
            let now = Utc::now();

            self.persist_balance(
                &db_tx,
                owner.id,
                owner.adjusted_balance(value, is_debt),
                now,
            )
            .await?;

            let model = transactions::ActiveModel {
                id: ActiveValue::NotSet,
                is_debt: ActiveValue::Set(is_debt),
                value: ActiveValue::Set(value),
                description: ActiveValue::Set(description),
                user_id: ActiveValue::Set(owner.id),
                created_at: ActiveValue::Set(now),
                modified_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(
                transaction_id = model.id,
                user_id = owner.id,
                value,
                is_debt,
                "transaction created"
            );
            Ok(Transaction::from(model))
        })
    }

    /// Updates value, direction, description and/or owner of a transaction.
    ///
    /// The old effect is always reverted on the stored owner. The new effect
    /// is applied on `cmd.user_id` when given, otherwise on the stored owner.
    /// Fields left as `None` keep their current value.
    pub async fn update_transaction(&self, cmd: UpdateTransactionCmd) -> ResultEngine<Transaction> {
        let new_value = cmd.value.map(validate_value).transpose()?;
        let new_description = cmd
            .description
            .as_deref()
            .map(|d| normalize_text(d, "description", DESCRIPTION_MAX_LEN))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let tx_model = self.require_transaction(&db_tx, cmd.transaction_id).await?;
            let old_value = tx_model.value;
            let old_is_debt = tx_model.is_debt;
            let old_owner_id = tx_model.user_id;

            let new_value = new_value.unwrap_or(old_value);
            let new_is_debt = cmd.is_debt.unwrap_or(old_is_debt);
            let new_owner_id = cmd.user_id.unwrap_or(old_owner_id);
            let now = Utc::now();

            let old_owner = User::from(self.require_user(&db_tx, old_owner_id).await?);
            if new_owner_id == old_owner_id {
                let reverted = old_owner.reverted_balance(old_value, old_is_debt);
                let updated = balance::adjust(reverted, new_value, new_is_debt);
                self.persist_balance(&db_tx, old_owner_id, updated, now)
                    .await?;
            } else {
                let new_owner = User::from(self.require_user(&db_tx, new_owner_id).await?);
                self.persist_balance(
                    &db_tx,
                    old_owner_id,
                    old_owner.reverted_balance(old_value, old_is_debt),
                    now,
                )
                .await?;
                self.persist_balance(
                    &db_tx,
                    new_owner_id,
                    new_owner.adjusted_balance(new_value, new_is_debt),
                    now,
                )
                .await?;
                tracing::info!(
                    transaction_id = cmd.transaction_id,
                    from_user = old_owner_id,
                    to_user = new_owner_id,
                    "transaction moved"
                );
            }

            let mut tx_active: transactions::ActiveModel = tx_model.into();
            tx_active.value = ActiveValue::Set(new_value);
            tx_active.is_debt = ActiveValue::Set(new_is_debt);
            tx_active.user_id = ActiveValue::Set(new_owner_id);
            if let Some(description) = new_description {
                tx_active.description = ActiveValue::Set(description);
            }
            tx_active.modified_at = ActiveValue::Set(now);
            let updated = tx_active.update(&db_tx).await?;

            tracing::info!(transaction_id = updated.id, "transaction updated");
            Ok(Transaction::from(updated))
        })
    }

    /// Deletes a transaction and reverts its effect on the stored owner.
    pub async fn delete_transaction(&self, transaction_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let tx_model = self.require_transaction(&db_tx, transaction_id).await?;
            let owner = User::from(self.require_user(&db_tx, tx_model.user_id).await?);

            self.persist_balance(
                &db_tx,
                owner.id,
                owner.reverted_balance(tx_model.value, tx_model.is_debt),
                Utc::now(),
            )
            .await?;
            transactions::Entity::delete_by_id(transaction_id)
                .exec(&db_tx)
                .await?;

            tracing::info!(transaction_id, user_id = owner.id, "transaction deleted");
            Ok(())
        })
    }
}
