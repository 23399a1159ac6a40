//! Core use-case services.
//!
//! # Responsibility
//! - Apply caller-facing rules (credentials, admin gate, username uniqueness,
//!   blank-field dropping, creator stamping) on top of the entity store.
//! - Translate absent store results into typed not-found errors.
//!
//! # Invariants
//! - Services validate input before handing it to the store.
//! - User records leave services only as `PublicUser`.

pub mod account_service;
pub mod customer_service;
pub mod dashboard_service;
pub mod task_service;
