//! Aria Player - Playback Control
//!
//! Platform-agnostic playback control for Aria Player.
//!
//! This crate provides:
//! - A cloneable, fire-and-forget [`PlaybackController`] handle
//! - Observable playback state via [`StateWatch`] (tokio watch channels)
//! - Optimistic state updates, corrected by session events
//! - Periodic persistence of position, queue, shuffle and repeat
//! - Startup restore: the previous queue is rebuilt and prepared, paused
//!
//! # Architecture
//!
//! The controller never touches audio hardware. The platform implements
//! [`MediaSession`] (the thing that actually plays) and the controller
//! drives it, folding the session's event stream back into the observable
//! state. The session's reports always win over the controller's
//! predictions.
//!
//! # Example
//!
//! ```rust,no_run
//! use aria_catalog::FileSystemCatalog;
//! use aria_playback::{ControllerConfig, MediaSession, PlaybackController, Result};
//! use aria_storage::{Database, PlaybackStateStore};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! async fn run(session: Arc<dyn MediaSession>) -> Result<()> {
//!     let database = Database::new("sqlite://aria.db").await?;
//!     let store = PlaybackStateStore::new(&database);
//!     let catalog = Arc::new(FileSystemCatalog::new(vec![PathBuf::from("/music")]));
//!
//!     let controller =
//!         PlaybackController::start(session, catalog, store, ControllerConfig::default());
//!
//!     // Commands are fire-and-forget; outcomes land in the observable state
//!     controller.toggle_play_pause();
//!
//!     let mut playing = controller.state().watch_is_playing();
//!     while playing.changed().await.is_ok() {
//!         println!("playing: {}", *playing.borrow());
//!     }
//!     Ok(())
//! }
//! ```

mod controller;
mod error;
mod events;
mod session;
mod state;

// Public exports
pub use controller::{ControllerConfig, PlaybackController};
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use session::MediaSession;
pub use state::StateWatch;
