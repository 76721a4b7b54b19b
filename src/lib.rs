//! Client-side engine of the bilemedilema polling platform.
//!
//! The server renders poll markup and owns all persistence; this crate owns
//! everything the browser used to decide on its own: casting votes, tracking
//! multi-select state, patching result numbers into an existing card,
//! refreshing notifications, counting down poll expiry, and the rest of the
//! widget behavior around a poll feed.
//!
//! Host UIs construct an [`app::App`] once with the session's cookie header
//! and drive the components from their event loop. Components never reach for
//! globals: cross-component coupling goes through the broadcast
//! [`events::EventBus`], and background work (notification refresh, countdown
//! ticks, badge checks) runs as tasks that stop when their owner does.

pub mod api;
pub mod app;
pub mod badges;
pub mod bookmarks;
pub mod config;
pub mod cookies;
pub mod countdown;
pub mod error;
pub mod events;
pub mod guest;
pub mod mentions;
pub mod notifications;
pub mod poll;
pub mod reactions;
pub mod search;
pub mod selection;
pub mod share;
pub mod storage;
pub mod theme;
pub mod toast;
pub mod view;
pub mod vote;
pub mod voting;

pub use app::App;
pub use config::ClientConfig;
pub use error::{ApiError, VoteError};
pub use events::{ClientEvent, EventBus};
pub use toast::{ToastKind, ToastSink};
