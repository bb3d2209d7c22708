//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: status, history usage and the connections indicator
//! - `Keypad`: key legend along the bottom
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it
//! each frame:
//! - `HistoryState` / `History`: scrollable paper roll of equations
//! - `MenuState` / `Menu`: side panel with copy, connections and clear
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs        (this file)
//! ├── title_bar.rs  (Top status bar)
//! ├── history.rs    (Equation history view)
//! ├── keypad.rs     (Key legend)
//! └── menu.rs       (Menu overlay)
//! ```

pub mod history;
mod keypad;
pub mod menu;
mod title_bar;

pub use history::{History, HistoryState};
pub use keypad::Keypad;
pub use menu::{Menu, MenuEvent, MenuState};
pub use title_bar::TitleBar;
