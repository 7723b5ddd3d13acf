//! WASM-compatible SessionManager wrapper

use crate::{SessionConfig, SessionEvent, SessionManager, SubscriptionId};
use cadence_core::MediaItem;
use cadence_storage::LocalStorageStore;
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// WASM-compatible session manager
///
/// Wraps the core `SessionManager` with a JavaScript-friendly API. Media
/// items cross the boundary as plain objects in the catalog JSON layout.
#[wasm_bindgen]
pub struct WasmSessionManager {
    inner: SessionManager,

    // Handles given to JS, indexed by the number returned from `onEvent`
    handles: Vec<Option<SubscriptionId>>,
}

fn parse_item(value: JsValue) -> Result<MediaItem, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse item: {}", e)))
}

fn parse_items(value: JsValue) -> Result<Vec<MediaItem>, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse items: {}", e)))
}

#[wasm_bindgen]
impl WasmSessionManager {
    /// Create a session backed by `window.localStorage`
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        Self {
            inner: SessionManager::new(LocalStorageStore::new(), SessionConfig::default()),
            handles: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Play an item, keeping the queue
    pub fn play(&mut self, item: JsValue) -> Result<(), JsValue> {
        let item = parse_item(item)?;
        self.inner.play(item);
        Ok(())
    }

    /// Play an item with a replacement queue
    #[wasm_bindgen(js_name = playWithQueue)]
    pub fn play_with_queue(&mut self, item: JsValue, queue: JsValue) -> Result<(), JsValue> {
        let item = parse_item(item)?;
        let queue = parse_items(queue)?;
        self.inner.play_with_queue(item, queue);
        Ok(())
    }

    /// Play a collection from its first item
    #[wasm_bindgen(js_name = playCollection)]
    pub fn play_collection(&mut self, items: JsValue) -> Result<(), JsValue> {
        let items = parse_items(items)?;
        self.inner.play_collection(items);
        Ok(())
    }

    /// Toggle between playing and paused
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) {
        self.inner.toggle_play();
    }

    /// Skip to the next item
    #[wasm_bindgen(js_name = playNext)]
    pub fn play_next(&mut self) {
        self.inner.play_next();
    }

    /// Go to the previous item
    #[wasm_bindgen(js_name = playPrev)]
    pub fn play_prev(&mut self) {
        self.inner.play_prev();
    }

    /// Seek to position in seconds
    pub fn seek(&mut self, position_secs: f64) {
        self.inner.seek(position_secs);
    }

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, volume: f64) {
        self.inner.set_volume(volume.clamp(0.0, 1.0));
    }

    /// Set the repeat flag
    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&mut self, repeat: bool) {
        self.inner.set_repeat(repeat);
    }

    /// Replace the queue
    #[wasm_bindgen(js_name = loadQueue)]
    pub fn load_queue(&mut self, items: JsValue) -> Result<(), JsValue> {
        let items = parse_items(items)?;
        self.inner.load_queue(items);
        Ok(())
    }

    // ===== Media Element Callbacks =====

    /// Forward `timeupdate`
    #[wasm_bindgen(js_name = onTimeUpdate)]
    pub fn on_time_update(&mut self, current_time: f64) {
        self.inner.on_time_update(current_time);
    }

    /// Forward `ended`
    #[wasm_bindgen(js_name = onEnded)]
    pub fn on_ended(&mut self) {
        self.inner.on_ended();
    }

    /// Forward `loadedmetadata`
    #[wasm_bindgen(js_name = onLoadedMetadata)]
    pub fn on_loaded_metadata(&mut self, duration: f64) {
        self.inner.on_loaded_metadata(duration);
    }

    /// Forward `pause`
    #[wasm_bindgen(js_name = onPause)]
    pub fn on_pause(&mut self) {
        self.inner.on_pause();
    }

    // ===== State Queries =====

    /// Full session state as a plain object
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).unwrap_or(JsValue::NULL)
    }

    /// Transport state as string
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.inner.transport().as_str().to_string()
    }

    /// Stored position for an item
    #[wasm_bindgen(js_name = resumePoint)]
    pub fn resume_point(&self, id: &str) -> Option<f64> {
        self.inner.resume_point(id)
    }

    // ===== Event Listeners =====

    /// Register a callback receiving every session event as a plain object
    ///
    /// Returns a handle for `offEvent`.
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) -> u32 {
        let id = self.inner.subscribe(move |event: &SessionEvent| {
            if let Ok(value) = serde_wasm_bindgen::to_value(event) {
                callback.call1(&JsValue::NULL, &value).ok();
            }
        });
        self.handles.push(Some(id));
        (self.handles.len() - 1) as u32
    }

    /// Remove a callback registered with `onEvent`
    #[wasm_bindgen(js_name = offEvent)]
    pub fn off_event(&mut self, handle: u32) -> bool {
        let Some(slot) = self.handles.get_mut(handle as usize) else {
            return false;
        };
        match slot.take() {
            Some(id) => self.inner.unsubscribe(id),
            None => false,
        }
    }
}

impl Default for WasmSessionManager {
    fn default() -> Self {
        Self::new()
    }
}
