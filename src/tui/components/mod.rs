//! # TUI Components
//!
//! Stateless components receive everything as props and are rebuilt every
//! frame:
//! - `TitleBar`: top status line
//! - `Message`: one chat turn
//! - `InputBox`: the question field (its text lives in the core session)
//!
//! Stateful components keep a `*State` in `TuiState` and implement
//! `EventHandler` on it:
//! - `MessageList`: scrollable log with layout caching
//! - `UrlBar`: the website field
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── url_bar.rs
//! ├── message.rs
//! ├── message_list.rs
//! └── input_box/
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub use input_box::InputBox;
pub mod message;
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod url_bar;
pub use url_bar::{URL_BAR_HEIGHT, UrlBar, UrlBarState, UrlEvent};
