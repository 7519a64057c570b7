use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) when deserializing partial updates.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        /// ISO date (`YYYY-MM-DD`).
        pub birth_date: NaiveDate,
        #[serde(default)]
        pub profession: Option<String>,
    }

    /// Partial update. Absent fields are left unchanged; `"profession": null`
    /// clears the profession.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UserUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub birth_date: Option<NaiveDate>,
        #[serde(
            default,
            deserialize_with = "double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub profession: Option<Option<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i64,
        pub name: String,
        pub email: String,
        pub birth_date: NaiveDate,
        /// Net of all the user's transactions.
        pub balance: f64,
        pub profession: Option<String>,
        pub created_at: DateTime<Utc>,
        pub modified_at: DateTime<Utc>,
    }
}

pub mod transaction {
    use super::*;

    /// Create a transaction. `user`, `value` and `is_debt` are mandatory.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        /// Owning user id.
        pub user: i64,
        pub value: f64,
        pub is_debt: bool,
        #[serde(default)]
        pub description: String,
    }

    /// Partial update. When `user` is present and differs from the current
    /// owner, the transaction moves to that user.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub user: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub is_debt: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i64,
        pub is_debt: bool,
        pub value: f64,
        pub description: String,
        pub user: i64,
        pub created_at: DateTime<Utc>,
        pub modified_at: DateTime<Utc>,
    }
}
