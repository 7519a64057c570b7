//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable. Optional fields on update commands mean "leave unchanged".

use chrono::NaiveDate;

/// Create a user. The balance always starts at zero.
#[derive(Clone, Debug)]
pub struct NewUserCmd {
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub profession: Option<String>,
}

impl NewUserCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            birth_date,
            profession: None,
        }
    }

    #[must_use]
    pub fn profession(mut self, profession: impl Into<String>) -> Self {
        self.profession = Some(profession.into());
        self
    }
}

/// Partially update a user.
///
/// `profession` is a double option: `Some(None)` clears the field.
#[derive(Clone, Debug, Default)]
pub struct UpdateUserCmd {
    pub user_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub profession: Option<Option<String>>,
}

impl UpdateUserCmd {
    #[must_use]
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    #[must_use]
    pub fn profession(mut self, profession: Option<String>) -> Self {
        self.profession = Some(profession);
        self
    }
}

/// Create a transaction for `user_id`.
#[derive(Clone, Debug)]
pub struct NewTransactionCmd {
    pub user_id: i64,
    pub value: f64,
    pub is_debt: bool,
    pub description: String,
}

impl NewTransactionCmd {
    #[must_use]
    pub fn credit(user_id: i64, value: f64) -> Self {
        Self {
            user_id,
            value,
            is_debt: false,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn debt(user_id: i64, value: f64) -> Self {
        Self {
            is_debt: true,
            ..Self::credit(user_id, value)
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Update an existing transaction.
///
/// When `user_id` names a different user than the stored owner, the
/// transaction moves to that user together with its balance effect.
#[derive(Clone, Debug, Default)]
pub struct UpdateTransactionCmd {
    pub transaction_id: i64,
    pub user_id: Option<i64>,
    pub value: Option<f64>,
    pub is_debt: Option<bool>,
    pub description: Option<String>,
}

impl UpdateTransactionCmd {
    #[must_use]
    pub fn new(transaction_id: i64) -> Self {
        Self {
            transaction_id,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn is_debt(mut self, is_debt: bool) -> Self {
        self.is_debt = Some(is_debt);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
