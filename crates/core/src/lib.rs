//! Transfer wizard core for Paywise.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! It drives the outbound transfer ("send money") wizard: which fields a payout
//! method requires, how each step validates, what fee applies, and how the
//! wizard state advances.
//!
//! # Modules
//!
//! - `transfer` - Transfer draft and payout method domain types
//! - `schema` - Declarative field requirements per payout method and bank rail
//! - `validation` - Per-step validation rules
//! - `fees` - Fee rate lookup and totals
//! - `resolver` - Debounced asynchronous recipient identifier lookup
//! - `wizard` - The step state machine owning draft and wizard state
//! - `submit` - Final payload construction and submission seam

pub mod fees;
pub mod resolver;
pub mod schema;
pub mod submit;
pub mod transfer;
pub mod validation;
pub mod wizard;
