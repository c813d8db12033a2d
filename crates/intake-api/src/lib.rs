//! Quote Intake API Library
//!
//! HTTP surface, request pipeline and application setup for the quote intake
//! service.

pub mod auth;
pub mod constants;
pub mod error;
mod handlers;
pub mod payload;
pub mod request;
pub mod services;
pub mod setup;
pub mod state;
mod telemetry;

pub use error::IntakeError;
pub use request::{IntakeRequest, IntakeResponse, RequestHeaders};
pub use services::{IntakeService, Notifier};
pub use state::AppState;
