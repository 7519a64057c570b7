//! Bookkeeping engine: users, their transactions and the running balance
//! that ties them together.

pub use commands::{NewTransactionCmd, NewUserCmd, UpdateTransactionCmd, UpdateUserCmd};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use transactions::Transaction;
pub use users::User;

pub mod balance;
mod commands;
mod error;
mod ops;
mod transactions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
