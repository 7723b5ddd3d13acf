//! Session manager - core orchestration
//!
//! Owns the current item, the queue, transport flags and the resume points,
//! and applies every command as one synchronous state transition.

use crate::{
    events::{EventHub, SessionEvent, SubscriptionId},
    format::progress_percent,
    persistence::SessionStorage,
    progress::ProgressStore,
    queue::Queue,
    types::{SessionConfig, SessionSnapshot, TransportState},
};
use cadence_core::{Catalog, KeyValueStore, MediaId, MediaItem};
use tracing::{debug, info};

/// How a play command treats the queue
enum QueueUpdate {
    /// Replace the queue wholesale
    Replace(Vec<MediaItem>),
    /// Move the item to the head unless it is already there
    MoveToFront,
    /// Leave the queue alone (navigation inside the queue)
    Keep,
}

/// Central playback session
///
/// Commands never fail: out-of-range arguments are accepted as-is and
/// persistence problems are logged and swallowed.
///
/// ```text
/// play ─────────────► Playing ◄──── toggle_play ────► Paused
///                        │
///     play_next at end,  │
///     no repeat          ▼
///                     Stopped (current kept, progress 0)
/// ```
pub struct SessionManager {
    // State
    current: Option<MediaItem>,
    queue: Queue,
    is_playing: bool,
    progress: f64,
    duration: f64,
    volume: f64,
    repeat: bool,
    // Set when the queue ran out; cleared by play and toggle_play
    ended: bool,

    // Resume points and persistence
    progress_store: ProgressStore,
    storage: SessionStorage,

    // Observers
    events: EventHub,

    config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("current", &self.current.as_ref().map(|item| &item.id))
            .field("queue_len", &self.queue.len())
            .field("is_playing", &self.is_playing)
            .field("progress", &self.progress)
            .field("duration", &self.duration)
            .field("volume", &self.volume)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create a session, rehydrating the queue and resume points from `store`
    ///
    /// Missing or unreadable records start out empty.
    pub fn new(store: impl KeyValueStore + 'static, config: SessionConfig) -> Self {
        Self::with_boxed_store(Box::new(store), config)
    }

    /// Same as [`SessionManager::new`] for an already boxed store
    pub fn with_boxed_store(store: Box<dyn KeyValueStore>, config: SessionConfig) -> Self {
        let storage = SessionStorage::new(store, &config.progress_key, &config.queue_key);
        let progress_store = storage.load_progress();
        let queue = storage.load_queue();

        info!(
            "Session restored: {} queued items, {} resume points",
            queue.len(),
            progress_store.len()
        );

        Self {
            current: None,
            queue,
            is_playing: false,
            progress: 0.0,
            duration: 0.0,
            volume: config.initial_volume,
            repeat: false,
            ended: false,
            progress_store,
            storage,
            events: EventHub::new(config.max_pending_events),
            config,
        }
    }

    // ===== Playback Control =====

    /// Play `item`, keeping the current queue
    ///
    /// The item is moved to the head of the queue (duplicates removed)
    /// unless it already is the head. Playback resumes from the item's
    /// stored position, or 0.
    pub fn play(&mut self, item: MediaItem) {
        self.start(item, QueueUpdate::MoveToFront);
    }

    /// Play `item` with `queue` replacing the current queue
    pub fn play_with_queue(&mut self, item: MediaItem, queue: Vec<MediaItem>) {
        self.start(item, QueueUpdate::Replace(queue));
    }

    /// Play a whole collection from its first item
    ///
    /// The collection becomes the queue. Empty collections are ignored.
    pub fn play_collection(&mut self, items: Vec<MediaItem>) {
        let Some(first) = items.first().cloned() else {
            debug!("Ignoring empty collection");
            return;
        };
        self.start(first, QueueUpdate::Replace(items));
    }

    fn start(&mut self, item: MediaItem, update: QueueUpdate) {
        let previous_item_id = self.current.as_ref().map(|c| c.id.to_string());
        let resume = self.progress_store.resume_point(item.id.as_str());

        debug!(
            "Playing {} from {:.1}s",
            item.id,
            resume.unwrap_or_default()
        );

        self.duration = f64::from(item.duration);
        self.progress = resume.unwrap_or(0.0);
        self.is_playing = true;
        self.ended = false;

        let queue_changed = match update {
            QueueUpdate::Replace(items) => {
                self.queue.replace(items);
                true
            }
            QueueUpdate::MoveToFront => self.queue.move_to_front(&item),
            QueueUpdate::Keep => false,
        };

        let item_id = item.id.to_string();
        self.current = Some(item);

        if queue_changed {
            self.storage.save_queue(&self.queue);
        }

        self.emit(SessionEvent::ItemChanged {
            item_id,
            previous_item_id,
        });
        if queue_changed {
            self.emit(SessionEvent::QueueChanged {
                length: self.queue.len(),
            });
        }
        self.emit(SessionEvent::DurationChanged {
            duration: self.duration,
        });
        self.emit(SessionEvent::ProgressChanged {
            position: self.progress,
        });
        self.emit_state();
    }

    /// Flip between playing and paused
    ///
    /// Does nothing when no item is loaded.
    pub fn toggle_play(&mut self) {
        if self.current.is_none() {
            debug!("toggle_play ignored: nothing loaded");
            return;
        }

        self.is_playing = !self.is_playing;
        self.ended = false;
        self.emit_state();
    }

    /// Advance to the item after the current one
    ///
    /// At the end of the queue: wraps to the first item when repeat is on,
    /// otherwise stops (progress 0, current item kept). Does nothing when no
    /// item is loaded.
    pub fn play_next(&mut self) {
        let Some(current) = &self.current else {
            return;
        };

        if let Some(next) = self.queue.successor_of(current.id.as_str()).cloned() {
            self.start(next, QueueUpdate::Keep);
        } else if self.repeat && !self.queue.is_empty() {
            if let Some(first) = self.queue.head().cloned() {
                debug!("Queue ended, repeating from {}", first.id);
                self.start(first, QueueUpdate::Keep);
            }
        } else {
            debug!("Queue ended, stopping");
            self.is_playing = false;
            self.progress = 0.0;
            self.ended = true;
            self.emit(SessionEvent::ProgressChanged { position: 0.0 });
            self.emit_state();
        }
    }

    /// Go back to the item before the current one
    ///
    /// Without a predecessor the current item restarts from 0 and the
    /// playing flag is left alone. Does nothing when no item is loaded.
    pub fn play_prev(&mut self) {
        let Some(current) = &self.current else {
            return;
        };

        if let Some(prev) = self.queue.predecessor_of(current.id.as_str()).cloned() {
            self.start(prev, QueueUpdate::Keep);
        } else {
            self.progress = 0.0;
            self.emit(SessionEvent::ProgressChanged { position: 0.0 });
        }
    }

    // ===== Position =====

    /// User-initiated scrub
    ///
    /// The value is taken as-is and stored as the current item's resume point.
    pub fn seek(&mut self, position: f64) {
        self.set_progress(position);
    }

    /// Periodic position report from the playback surface
    ///
    /// Same contract as [`SessionManager::seek`].
    pub fn update_progress(&mut self, position: f64) {
        self.set_progress(position);
    }

    fn set_progress(&mut self, position: f64) {
        self.progress = position;
        if let Some(id) = self.current.as_ref().map(|item| item.id.clone()) {
            self.remember_progress(id, position);
        }
        self.emit(SessionEvent::ProgressChanged { position });
    }

    /// Record a resume point for any item and write it through
    pub fn remember_progress(&mut self, id: impl Into<MediaId>, position: f64) {
        self.progress_store.record(id.into(), position);
        self.storage.save_progress(&self.progress_store);
    }

    /// Real duration reported by the playback surface
    pub fn update_duration(&mut self, duration: f64) {
        self.duration = duration;
        self.emit(SessionEvent::DurationChanged { duration });
    }

    // ===== Settings =====

    /// Set volume; callers keep it within 0.0-1.0
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
        self.emit(SessionEvent::VolumeChanged { volume });
    }

    /// Set the repeat flag
    pub fn set_repeat(&mut self, repeat: bool) {
        if self.repeat == repeat {
            return;
        }
        self.repeat = repeat;
        self.emit(SessionEvent::RepeatChanged { repeat });
    }

    // ===== Queue Management =====

    /// Replace the queue without touching the current item or transport
    ///
    /// Items are taken as given, duplicates included.
    pub fn load_queue(&mut self, items: Vec<MediaItem>) {
        self.queue.replace(items);
        self.storage.save_queue(&self.queue);
        self.emit(SessionEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    // ===== Playback Surface Callbacks =====

    /// Time update tick from the rendering surface
    pub fn on_time_update(&mut self, position: f64) {
        self.update_progress(position);
    }

    /// End-of-media notification
    pub fn on_ended(&mut self) {
        self.play_next();
    }

    /// Metadata-loaded notification carrying the decoded duration
    pub fn on_loaded_metadata(&mut self, duration: f64) {
        self.update_duration(duration);
    }

    /// The surface paused on its own; keep the position as a resume point
    pub fn on_pause(&mut self) {
        self.update_progress(self.progress);
    }

    // ===== State Queries =====

    /// Active item
    pub fn current(&self) -> Option<&MediaItem> {
        self.current.as_ref()
    }

    /// Queue in playback order
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Transport flag
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Elapsed seconds into the current item
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Known total seconds of the current item
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Current volume
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Repeat flag
    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Derived transport state
    pub fn transport(&self) -> TransportState {
        match (&self.current, self.is_playing) {
            (None, _) => TransportState::Stopped,
            (Some(_), true) => TransportState::Playing,
            (Some(_), false) if self.ended => TransportState::Stopped,
            (Some(_), false) => TransportState::Paused,
        }
    }

    /// Resume points
    pub fn progress_store(&self) -> &ProgressStore {
        &self.progress_store
    }

    /// Stored position for an item, `None` if never recorded
    pub fn resume_point(&self, id: &str) -> Option<f64> {
        self.progress_store.resume_point(id)
    }

    /// Duration to show: reported duration, else the item's declared one
    pub fn display_duration(&self) -> f64 {
        if self.duration > 0.0 {
            self.duration
        } else {
            self.current
                .as_ref()
                .map_or(0.0, |item| f64::from(item.duration))
        }
    }

    /// Items worth resuming, in the order they were first recorded
    ///
    /// Items whose stored position exceeds the configured threshold and that
    /// the catalog still knows, at most `continue_limit` of them.
    pub fn continue_listening<'a>(&self, catalog: &'a Catalog) -> Vec<&'a MediaItem> {
        self.progress_store
            .iter()
            .filter(|(_, seconds)| *seconds > self.config.continue_threshold_secs)
            .filter_map(|(id, _)| catalog.get(id.as_str()))
            .take(self.config.continue_limit)
            .collect()
    }

    /// Full read state for views
    pub fn snapshot(&self) -> SessionSnapshot {
        let display_duration = self.display_duration();
        SessionSnapshot {
            current: self.current.clone(),
            queue: self.queue.items().to_vec(),
            is_playing: self.is_playing,
            transport: self.transport(),
            progress: self.progress,
            duration: self.duration,
            display_duration,
            progress_percent: progress_percent(self.progress, display_duration),
            volume: self.volume,
            repeat: self.repeat,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ===== Events =====

    /// Register a listener called after every state change
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(Box::new(listener))
    }

    /// Remove a listener; returns `false` if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    /// Check if events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        self.events.has_pending()
    }

    fn emit(&mut self, event: SessionEvent) {
        self.events.emit(event);
    }

    fn emit_state(&mut self) {
        let state = self.transport();
        self.emit(SessionEvent::StateChanged { state });
    }
}
