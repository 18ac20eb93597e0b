//! # Core Application Logic
//!
//! The conversation session controller. It knows nothing about terminals
//! or HTTP; it only decides what a session looks like after each event.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │  Service   │
//!             │  Adapter   │          │  (HTTP)    │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`conversation`]: `ChatTurn` and the append-only `MessageLog`
//! - [`history`]: the question/answer pair sent as context
//! - [`input`]: the question field and its key policy
//! - [`state`]: the `Session` struct
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod conversation;
pub mod history;
pub mod input;
pub mod state;
