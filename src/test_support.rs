//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::keys;
use crate::core::queue::{DEFAULT_SIZE_LIMIT, EquationQueue};
use crate::core::state::App;

/// Creates a test App with the default history limit.
pub fn test_app() -> App {
    App::new(DEFAULT_SIZE_LIMIT)
}

/// Creates a test App after replaying `keys` (see `core::keys`).
pub fn app_from_keys(keys: &str) -> App {
    let mut app = test_app();
    keys::replay(&mut app, keys);
    app
}

/// Just the queue of [`app_from_keys`].
pub fn queue_from_keys(keys: &str) -> EquationQueue {
    app_from_keys(keys).queue
}
