use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    NewUserCmd, ResultEngine, UpdateUserCmd, User, transactions, users,
    util::{
        EMAIL_MAX_LEN, NAME_MAX_LEN, PROFESSION_MAX_LEN, normalize_optional_text,
        normalize_required_text,
    },
};

use super::{Engine, user_not_found, with_tx};

impl Engine {
    /// All users, ordered by id.
    pub async fn list_users(&self) -> ResultEngine<Vec<User>> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    /// Return a user snapshot from DB.
    pub async fn user(&self, user_id: i64) -> ResultEngine<User> {
        users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .map(User::from)
            .ok_or_else(|| user_not_found(user_id))
    }

    /// Create a user with a zero balance.
    pub async fn new_user(&self, cmd: NewUserCmd) -> ResultEngine<User> {
        let name = normalize_required_text(&cmd.name, "name", NAME_MAX_LEN)?;
        let email = normalize_required_text(&cmd.email, "email", EMAIL_MAX_LEN)?;
        let profession =
            normalize_optional_text(cmd.profession.as_deref(), "profession", PROFESSION_MAX_LEN)?;
        let now = Utc::now();

        let model = users::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            email: ActiveValue::Set(email),
            birth_date: ActiveValue::Set(cmd.birth_date),
            balance: ActiveValue::Set(0.0),
            profession: ActiveValue::Set(profession),
            created_at: ActiveValue::Set(now),
            modified_at: ActiveValue::Set(now),
        }
        .insert(&self.database)
        .await?;

        tracing::info!(user_id = model.id, "user created");
        Ok(User::from(model))
    }

    /// Update the descriptive fields of a user.
    ///
    /// The balance is not editable here: it only moves through transaction
    /// writes.
    pub async fn update_user(&self, cmd: UpdateUserCmd) -> ResultEngine<User> {
        let name = cmd
            .name
            .as_deref()
            .map(|name| normalize_required_text(name, "name", NAME_MAX_LEN))
            .transpose()?;
        let email = cmd
            .email
            .as_deref()
            .map(|email| normalize_required_text(email, "email", EMAIL_MAX_LEN))
            .transpose()?;
        let profession = cmd
            .profession
            .as_ref()
            .map(|p| normalize_optional_text(p.as_deref(), "profession", PROFESSION_MAX_LEN))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, cmd.user_id).await?;
            let mut user_model: users::ActiveModel = model.into();
            if let Some(name) = name {
                user_model.name = ActiveValue::Set(name);
            }
            if let Some(email) = email {
                user_model.email = ActiveValue::Set(email);
            }
            if let Some(birth_date) = cmd.birth_date {
                user_model.birth_date = ActiveValue::Set(birth_date);
            }
            if let Some(profession) = profession {
                user_model.profession = ActiveValue::Set(profession);
            }
            user_model.modified_at = ActiveValue::Set(Utc::now());

            let updated = user_model.update(&db_tx).await?;
            Ok(User::from(updated))
        })
    }

    /// Delete a user together with all of its transactions.
    pub async fn delete_user(&self, user_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;

            let removed = transactions::Entity::delete_many()
                .filter(transactions::Column::UserId.eq(user_id))
                .exec(&db_tx)
                .await?;
            users::Entity::delete_by_id(user_id).exec(&db_tx).await?;

            tracing::info!(
                user_id,
                transactions = removed.rows_affected,
                "user deleted"
            );
            Ok(())
        })
    }
}
