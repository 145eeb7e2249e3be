//! classbook-core: student model, class statistics, and client state.
//!
//! This crate defines the data model, the `StudentStore` trait, the
//! aggregation functions, and the edit/delete state machines that the rest
//! of classbook builds on.

pub mod cache;
pub mod chart;
pub mod controller;
pub mod error;
pub mod model;
pub mod report;
pub mod session;
pub mod state;
pub mod statistics;
pub mod traits;

pub use controller::Controller;
pub use error::{ClientError, StatsError, StoreError, ValidationError};
pub use model::{NewStudent, Status, Student};
