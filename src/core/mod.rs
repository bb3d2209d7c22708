//! # Core Application Logic
//!
//! This module contains Tally's calculator logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Element / Equation   │
//!                    │  • EquationQueue        │
//!                    │  • Action + update()    │
//!                    │                         │
//!                    │  No terminal types.     │
//!                    └───────────┬─────────────┘
//!                                │ change notification
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Headless  │      │   Tests    │
//!     │  Adapter   │      │  --keys    │      │            │
//!     │ (ratatui)  │      │  replay    │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`element`]: `Number` and `Operator` tokens
//! - [`equation`]: one line, its editing rules and the evaluator
//! - [`queue`]: the bounded history of lines
//! - [`links`]: equal values on consecutive lines
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`state`]: the `App` struct

pub mod action;
pub mod config;
pub mod element;
pub mod equation;
pub mod error;
pub mod keys;
pub mod links;
pub mod notify;
pub mod queue;
pub mod state;
