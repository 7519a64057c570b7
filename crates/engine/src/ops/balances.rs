use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{ResultEngine, User, balance, transactions};

use super::{Engine, with_tx};

impl Engine {
    /// Recomputes the denormalized balance of a user from its transactions.
    ///
    /// Replays every transaction in creation order starting from zero and
    /// persists the result. Returns the refreshed user.
    pub async fn recompute_balance(&self, user_id: i64) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let before = self.require_user(&db_tx, user_id).await?;

            let tx_models = transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id))
                .order_by_asc(transactions::Column::CreatedAt)
                .order_by_asc(transactions::Column::Id)
                .all(&db_tx)
                .await?;

            let replayed = tx_models
                .iter()
                .fold(0.0, |acc, tx| balance::adjust(acc, tx.value, tx.is_debt));

            if replayed != before.balance {
                tracing::warn!(
                    user_id,
                    stored = before.balance,
                    replayed,
                    "balance drift repaired"
                );
            }

            let updated = self
                .persist_balance(&db_tx, user_id, replayed, Utc::now())
                .await?;
            Ok(User::from(updated))
        })
    }
}
