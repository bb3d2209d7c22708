//! # Application State
//!
//! Core business state for Tally. Domain data only; presentation state
//! (scroll offsets, the menu, whether connectors are shown) lives in `tui`.
//!
//! ```text
//! App
//! ├── queue: EquationQueue        // history + line being typed
//! ├── status_message: String      // status bar text
//! └── error: Option<String>       // last evaluation failure
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::queue::EquationQueue;

pub struct App {
    pub queue: EquationQueue,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    pub fn new(history_limit: usize) -> Self {
        Self {
            queue: EquationQueue::with_size_limit(history_limit),
            status_message: String::from("Ready"),
            error: None,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.history_limit)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::queue::DEFAULT_SIZE_LIMIT;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Ready");
        assert!(app.error.is_none());
        assert!(app.queue.is_empty());
        assert_eq!(app.queue.size_limit(), DEFAULT_SIZE_LIMIT);
    }
}
