//! Playback queue
//!
//! Ordered list of media items. Index 0 is "now playing" only by convention:
//! the session tracks its current item separately, and queue navigation
//! (next/previous) looks the current item up by id.

use cadence_core::MediaItem;
use serde::{Deserialize, Serialize};

/// Ordered playback queue
///
/// Items are unique by id when the queue is built through
/// [`Queue::move_to_front`]; [`Queue::replace`] takes the caller's list as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Queue {
    items: Vec<MediaItem>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue from items, in order
    pub fn from_items(items: Vec<MediaItem>) -> Self {
        Self { items }
    }

    /// Replace the whole queue
    pub fn replace(&mut self, items: Vec<MediaItem>) {
        self.items = items;
    }

    /// Put `item` at the head
    ///
    /// Every other occurrence of the item's id is removed and the remaining
    /// items keep their relative order. Returns `false` (and leaves the queue
    /// untouched) when the head already has this id.
    pub fn move_to_front(&mut self, item: &MediaItem) -> bool {
        if self.head().is_some_and(|head| head.id == item.id) {
            return false;
        }

        self.items.retain(|existing| existing.id != item.id);
        self.items.insert(0, item.clone());
        true
    }

    /// First item
    pub fn head(&self) -> Option<&MediaItem> {
        self.items.first()
    }

    /// Item at index
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    /// Index of the first item with this id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id.as_str() == id)
    }

    /// Item following `id`
    ///
    /// An id that is not queued behaves like index -1, so its successor is the
    /// head of the queue.
    pub fn successor_of(&self, id: &str) -> Option<&MediaItem> {
        match self.position(id) {
            Some(index) => self.items.get(index + 1),
            None => self.items.first(),
        }
    }

    /// Item preceding `id`
    ///
    /// Returns `None` for the head and for ids that are not queued.
    pub fn predecessor_of(&self, id: &str) -> Option<&MediaItem> {
        let index = self.position(id)?;
        index.checked_sub(1).and_then(|prev| self.items.get(prev))
    }

    /// All items in order
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Iterate over items in order
    pub fn iter(&self) -> std::slice::Iter<'_, MediaItem> {
        self.items.iter()
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a MediaItem;
    type IntoIter = std::slice::Iter<'a, MediaItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::MediaKind;

    fn create_test_item(id: &str) -> MediaItem {
        MediaItem::new(id, format!("Item {id}"), MediaKind::Music, "Artist", 180)
    }

    fn ids(queue: &Queue) -> Vec<&str> {
        queue.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn create_empty_queue() {
        let queue = Queue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.head().is_none());
    }

    #[test]
    fn move_to_front_on_empty_queue() {
        let mut queue = Queue::new();
        assert!(queue.move_to_front(&create_test_item("a")));
        assert_eq!(ids(&queue), vec!["a"]);
    }

    #[test]
    fn move_to_front_preserves_relative_order() {
        let mut queue = Queue::from_items(vec![
            create_test_item("a"),
            create_test_item("b"),
            create_test_item("c"),
            create_test_item("d"),
        ]);

        assert!(queue.move_to_front(&create_test_item("c")));
        assert_eq!(ids(&queue), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn move_to_front_removes_every_duplicate() {
        let mut queue = Queue::from_items(vec![
            create_test_item("a"),
            create_test_item("x"),
            create_test_item("b"),
            create_test_item("x"),
        ]);

        queue.move_to_front(&create_test_item("x"));
        assert_eq!(ids(&queue), vec!["x", "a", "b"]);
    }

    #[test]
    fn move_to_front_is_noop_when_already_head() {
        // Duplicates after the head survive: the queue is left untouched
        let mut queue = Queue::from_items(vec![
            create_test_item("a"),
            create_test_item("b"),
            create_test_item("a"),
        ]);

        assert!(!queue.move_to_front(&create_test_item("a")));
        assert_eq!(ids(&queue), vec!["a", "b", "a"]);
    }

    #[test]
    fn successor_and_predecessor() {
        let queue = Queue::from_items(vec![
            create_test_item("a"),
            create_test_item("b"),
            create_test_item("c"),
        ]);

        assert_eq!(queue.successor_of("a").unwrap().id.as_str(), "b");
        assert!(queue.successor_of("c").is_none());
        assert_eq!(queue.successor_of("zzz").unwrap().id.as_str(), "a");

        assert_eq!(queue.predecessor_of("c").unwrap().id.as_str(), "b");
        assert!(queue.predecessor_of("a").is_none());
        assert!(queue.predecessor_of("zzz").is_none());
    }

    #[test]
    fn replace_keeps_duplicates() {
        let mut queue = Queue::new();
        queue.replace(vec![create_test_item("a"), create_test_item("a")]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn serializes_as_plain_array() {
        let queue = Queue::from_items(vec![create_test_item("a")]);
        let json = serde_json::to_value(&queue).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "a");
    }
}
