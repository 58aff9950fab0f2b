//! Playback controller - core orchestration
//!
//! Bridges a platform media session to observable UI state and durable
//! persistence. The [`PlaybackController`] handle is cheap to clone and
//! fire-and-forget; a driver task owns the session, applies commands, folds
//! session events into the observable state, and checkpoints progress so the
//! next launch can resume where this one left off.

use crate::error::Result;
use crate::events::SessionEvent;
use crate::session::MediaSession;
use crate::state::{StatePublisher, StateWatch};
use aria_core::{PlaybackSnapshot, SnapshotUpdate, Track, TrackCatalog};
use aria_storage::PlaybackStateStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Timing configuration for the controller driver
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// How often the persisted snapshot is refreshed while playing
    pub persist_interval: Duration,

    /// How often the observed position is refreshed while playing
    pub position_interval: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            persist_interval: Duration::from_secs(5),
            position_interval: Duration::from_millis(500),
        }
    }
}

/// Commands sent from handles to the driver task
#[derive(Debug)]
enum Command {
    PlayTrack { track: Track, queue: Vec<Track> },
    TogglePlayPause,
    SeekTo { position_ms: u64 },
    Next,
    Previous,
    ToggleShuffle,
    ToggleRepeat,
    Stop,
    Release { ack: oneshot::Sender<()> },
}

/// Handle to the playback controller
///
/// Cloneable; all clones drive the same session. Commands are
/// fire-and-forget: failures surface through the observable state and the
/// log, never to the caller. Once released (or after every handle is
/// dropped), remaining commands become logged no-ops.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    commands: mpsc::UnboundedSender<Command>,
    state: StateWatch,
}

impl PlaybackController {
    /// Start the controller
    ///
    /// Connects to the session, restores the previous session's queue and
    /// settings, and begins processing commands. Restore failures leave the
    /// controller at defaults rather than failing startup.
    #[must_use]
    pub fn start(
        session: Arc<dyn MediaSession>,
        catalog: Arc<dyn TrackCatalog>,
        store: PlaybackStateStore,
        config: ControllerConfig,
    ) -> Self {
        let publisher = StatePublisher::new();
        let state = publisher.watch();
        let (commands, command_rx) = mpsc::unbounded_channel();

        let driver = Driver {
            session,
            catalog,
            store,
            config,
            state: publisher,
            queue: Vec::new(),
        };
        tokio::spawn(driver.run(command_rx));

        Self { commands, state }
    }

    /// Observable playback state
    #[must_use]
    pub fn state(&self) -> &StateWatch {
        &self.state
    }

    /// Play `track` within the given queue
    ///
    /// An empty `queue` plays the track alone; when the track is missing
    /// from a non-empty `queue`, the queue starts from its first entry.
    pub fn play_track(&self, track: Track, queue: Vec<Track>) {
        self.send(Command::PlayTrack { track, queue });
    }

    /// Toggle between play and pause
    pub fn toggle_play_pause(&self) {
        self.send(Command::TogglePlayPause);
    }

    /// Seek within the active track
    pub fn seek_to(&self, position_ms: u64) {
        self.send(Command::SeekTo { position_ms });
    }

    /// Skip to the next track in the queue
    pub fn play_next(&self) {
        self.send(Command::Next);
    }

    /// Return to the previous track or restart the current one
    pub fn play_previous(&self) {
        self.send(Command::Previous);
    }

    /// Toggle shuffle
    pub fn toggle_shuffle(&self) {
        self.send(Command::ToggleShuffle);
    }

    /// Cycle the repeat mode: off, all, one
    pub fn toggle_repeat_mode(&self) {
        self.send(Command::ToggleRepeat);
    }

    /// Stop playback, clearing the active track but keeping the queue
    pub fn stop(&self) {
        self.send(Command::Stop);
    }

    /// Persist the current state and release the session
    ///
    /// Resolves once the final snapshot is written and the session is gone;
    /// the controller stops processing commands after this. Releasing an
    /// already-released controller returns immediately.
    pub async fn release(&self) {
        let (ack, done) = oneshot::channel();
        self.send(Command::Release { ack });
        let _ = done.await;
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            debug!("Controller driver is gone; dropping command");
        }
    }
}

/// Driver task owning the session and all mutable controller state
struct Driver {
    session: Arc<dyn MediaSession>,
    catalog: Arc<dyn TrackCatalog>,
    store: PlaybackStateStore,
    config: ControllerConfig,
    state: StatePublisher,
    queue: Vec<Track>,
}

impl Driver {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let mut events = match self.session.connect().await {
            Ok(events) => events,
            Err(e) => {
                error!("Failed to connect to media session: {e}");
                return;
            }
        };
        info!("Connected to media session");

        if let Err(e) = self.restore().await {
            warn!("Failed to restore playback state: {e}");
        }

        // Both timers wait a full period before their first tick
        let mut position_timer = interval_at(
            Instant::now() + self.config.position_interval,
            self.config.position_interval,
        );
        let mut persist_timer = interval_at(
            Instant::now() + self.config.persist_interval,
            self.config.persist_interval,
        );
        position_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        persist_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // Events before commands: a toggle issued after the session
            // reported a change must see that change applied
            tokio::select! {
                biased;

                event = events.recv() => match event {
                    Ok(event) => {
                        let was_playing = self.state.is_playing.get();
                        self.handle_event(event).await;
                        self.after_resume(was_playing, &mut position_timer, &mut persist_timer)
                            .await;
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "Dropped session events; state may briefly lag");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Session event channel closed");
                        break;
                    }
                },

                command = commands.recv() => match command {
                    Some(Command::Release { ack }) => {
                        self.shutdown().await;
                        let _ = ack.send(());
                        return;
                    }
                    // Every handle dropped without a release; clean up anyway
                    None => {
                        self.shutdown().await;
                        return;
                    }
                    Some(command) => {
                        let was_playing = self.state.is_playing.get();
                        self.handle_command(command).await;
                        self.after_resume(was_playing, &mut position_timer, &mut persist_timer)
                            .await;
                    }
                },

                _ = position_timer.tick(), if self.state.is_playing.get() => {
                    self.refresh_position().await;
                }

                _ = persist_timer.tick(), if self.state.is_playing.get() => {
                    self.save_state().await;
                }
            }
        }

        // The session went away without a release; still checkpoint state
        self.save_state().await;
    }

    /// After a transition into playing, restart the periodic timers and
    /// refresh the position so the UI catches up right away and the timers
    /// then settle into full periods
    async fn after_resume(
        &mut self,
        was_playing: bool,
        position_timer: &mut Interval,
        persist_timer: &mut Interval,
    ) {
        if !was_playing && self.state.is_playing.get() {
            position_timer.reset();
            persist_timer.reset();
            self.refresh_position().await;
        }
    }

    async fn handle_event(&mut self, event: SessionEvent) {
        debug!(?event, "Session event");

        match event {
            SessionEvent::PlayingChanged { is_playing } => {
                self.state.is_playing.confirm(is_playing);
                self.save_state().await;
            }
            SessionEvent::TrackChanged { track_id } => {
                let track = track_id.and_then(|id| self.queue.iter().find(|t| t.id == id).cloned());
                if let (Some(id), None) = (track_id, track.as_ref()) {
                    debug!(%id, "Session reported a track outside the known queue");
                }
                self.state.current_track.confirm(track);
                self.refresh_position().await;
                self.save_state().await;
            }
            SessionEvent::Ready { duration_ms } => {
                self.state.duration_ms.confirm(duration_ms);
            }
            SessionEvent::ShuffleChanged { enabled } => {
                self.state.shuffle_enabled.confirm(enabled);
                self.save_state().await;
            }
            SessionEvent::RepeatChanged { mode } => {
                self.state.repeat_mode.confirm(mode);
                self.save_state().await;
            }
            SessionEvent::Error { message } => {
                error!("Session error: {message}");
            }
        }
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::PlayTrack { track, queue } => self.play_track(track, queue).await,
            Command::TogglePlayPause => self.toggle_play_pause().await,
            Command::SeekTo { position_ms } => self.seek_to(position_ms).await,
            Command::Next => {
                if let Err(e) = self.session.next().await {
                    warn!("Failed to skip to next track: {e}");
                }
            }
            Command::Previous => {
                if let Err(e) = self.session.previous().await {
                    warn!("Failed to return to previous track: {e}");
                }
            }
            Command::ToggleShuffle => self.toggle_shuffle().await,
            Command::ToggleRepeat => self.toggle_repeat().await,
            Command::Stop => self.stop().await,
            // Release is handled in the select loop so the driver can exit
            Command::Release { .. } => {}
        }
    }

    async fn play_track(&mut self, track: Track, queue: Vec<Track>) {
        let queue = if queue.is_empty() {
            vec![track.clone()]
        } else {
            queue
        };
        let start_index = queue.iter().position(|t| t.id == track.id).unwrap_or(0);
        self.queue = queue;

        if let Err(e) = self.session.set_queue(&self.queue, start_index, 0).await {
            warn!("Failed to set session queue: {e}");
            return;
        }
        if let Err(e) = self.session.play().await {
            warn!("Failed to start playback: {e}");
            return;
        }

        self.state.current_track.predict(Some(track));
        self.state.position_ms.predict(0);
        self.state.is_playing.predict(true);

        self.save_queue().await;
        self.save_state().await;
    }

    async fn toggle_play_pause(&mut self) {
        if self.state.is_playing.get() {
            if let Err(e) = self.session.pause().await {
                warn!("Failed to pause: {e}");
                return;
            }
            self.state.is_playing.predict(false);
        } else {
            if let Err(e) = self.session.play().await {
                warn!("Failed to play: {e}");
                return;
            }
            self.state.is_playing.predict(true);
        }
    }

    async fn seek_to(&mut self, position_ms: u64) {
        if let Err(e) = self.session.seek_to(position_ms).await {
            warn!("Failed to seek: {e}");
            return;
        }
        self.state.position_ms.predict(position_ms);
    }

    async fn toggle_shuffle(&mut self) {
        let enabled = !self.state.shuffle_enabled.get();
        if let Err(e) = self.session.set_shuffle(enabled).await {
            warn!("Failed to set shuffle: {e}");
            return;
        }
        self.state.shuffle_enabled.predict(enabled);
    }

    async fn toggle_repeat(&mut self) {
        let mode = self.state.repeat_mode.get().cycle();
        if let Err(e) = self.session.set_repeat(mode).await {
            warn!("Failed to set repeat mode: {e}");
            return;
        }
        self.state.repeat_mode.predict(mode);
    }

    async fn stop(&mut self) {
        if let Err(e) = self.session.stop().await {
            warn!("Failed to stop: {e}");
        }

        self.state.is_playing.predict(false);
        self.state.current_track.predict(None);
        self.state.position_ms.predict(0);
        self.state.duration_ms.confirm(0);

        // Full write so the stored track is cleared; the queue survives
        // for the next launch
        let snapshot = PlaybackSnapshot {
            track_id: None,
            position_ms: 0,
            queue: self.queue.iter().map(|t| t.id).collect(),
            shuffle_enabled: self.state.shuffle_enabled.get(),
            repeat_mode: self.state.repeat_mode.get(),
        };
        if let Err(e) = self.store.write(&snapshot).await {
            warn!("Failed to persist stopped state: {e}");
        }
    }

    async fn shutdown(&mut self) {
        self.save_state().await;

        if let Err(e) = self.session.release().await {
            warn!("Failed to release session: {e}");
        }

        info!("Playback controller released");
    }

    /// Restore the previous session's queue and settings
    ///
    /// The stored queue is resolved against the catalog; tracks that no
    /// longer exist are dropped, keeping the order of the rest. The session
    /// is prepared but never started.
    async fn restore(&mut self) -> Result<()> {
        let snapshot = self.store.read().await?;

        if snapshot.queue.is_empty() {
            debug!("No stored queue to restore");
            return Ok(());
        }

        let mut tracks = Vec::with_capacity(snapshot.queue.len());
        for id in &snapshot.queue {
            match self.catalog.track_by_id(*id).await {
                Ok(Some(track)) => tracks.push(track),
                Ok(None) => debug!(%id, "Dropping stored track missing from the catalog"),
                Err(e) => return Err(e.into()),
            }
        }

        if tracks.is_empty() {
            debug!("No stored tracks still present in the catalog");
            return Ok(());
        }

        // Fall back to the front of the queue when the stored track is gone;
        // the stored position applies either way
        let start_index = snapshot
            .track_id
            .and_then(|id| tracks.iter().position(|t| t.id == id))
            .unwrap_or(0);
        let position_ms = snapshot.position_ms;
        let track = tracks[start_index].clone();

        self.session.set_queue(&tracks, start_index, position_ms).await?;
        self.session.set_shuffle(snapshot.shuffle_enabled).await?;
        self.session.set_repeat(snapshot.repeat_mode).await?;
        self.session.prepare().await?;

        self.queue = tracks;

        self.state.current_track.confirm(Some(track));
        self.state.position_ms.confirm(position_ms);
        self.state.shuffle_enabled.confirm(snapshot.shuffle_enabled);
        self.state.repeat_mode.confirm(snapshot.repeat_mode);

        info!(
            queue_len = self.queue.len(),
            position_ms, "Restored playback state"
        );

        Ok(())
    }

    /// Persist everything but the queue
    ///
    /// The queue is written separately when it changes; see
    /// [`Self::save_queue`].
    async fn save_state(&self) {
        let track_id = self.state.current_track.get().map(|t| t.id);
        let position_ms = self.live_position().await;

        let update = SnapshotUpdate {
            track_id,
            position_ms: Some(position_ms),
            queue: None,
            shuffle_enabled: Some(self.state.shuffle_enabled.get()),
            repeat_mode: Some(self.state.repeat_mode.get()),
        };

        if let Err(e) = self.store.update(&update).await {
            warn!("Failed to persist playback state: {e}");
        }
    }

    async fn save_queue(&self) {
        let update = SnapshotUpdate {
            queue: Some(self.queue.iter().map(|t| t.id).collect()),
            ..SnapshotUpdate::default()
        };

        if let Err(e) = self.store.update(&update).await {
            warn!("Failed to persist queue: {e}");
        }
    }

    async fn refresh_position(&mut self) {
        let position_ms = self.live_position().await;
        self.state.position_ms.confirm(position_ms);
    }

    /// Live position from the session, falling back to the last observed
    /// value when the query fails
    async fn live_position(&self) -> u64 {
        match self.session.position_ms().await {
            Ok(position_ms) => position_ms,
            Err(e) => {
                debug!("Failed to query position: {e}");
                self.state.position_ms.get()
            }
        }
    }
}
