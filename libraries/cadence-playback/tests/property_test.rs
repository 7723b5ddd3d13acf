//! Property-based tests for the session manager
//!
//! Uses proptest to drive random command sequences and check the
//! invariants that must hold after every step.

use cadence_core::{MediaItem, MediaKind};
use cadence_playback::{SessionConfig, SessionManager, TransportState};
use cadence_storage::MemoryStore;
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

/// Small id space so sequences revisit items
fn arbitrary_item() -> impl Strategy<Value = MediaItem> {
    (0u8..8, 1u32..7200).prop_map(|(n, duration)| {
        MediaItem::new(
            format!("item-{n}"),
            format!("Item {n}"),
            MediaKind::Music,
            "Artist",
            duration,
        )
    })
}

#[derive(Debug, Clone)]
enum Command {
    Play(MediaItem),
    Toggle,
    Next,
    Prev,
    Seek(f64),
    Repeat(bool),
    Ended,
}

fn arbitrary_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => arbitrary_item().prop_map(Command::Play),
        1 => Just(Command::Toggle),
        2 => Just(Command::Next),
        2 => Just(Command::Prev),
        // Whole seconds so persisted values compare exactly
        1 => (0u32..10_000).prop_map(|s| Command::Seek(f64::from(s))),
        1 => any::<bool>().prop_map(Command::Repeat),
        1 => Just(Command::Ended),
    ]
}

fn apply(manager: &mut SessionManager, command: Command) {
    match command {
        Command::Play(item) => manager.play(item),
        Command::Toggle => manager.toggle_play(),
        Command::Next => manager.play_next(),
        Command::Prev => manager.play_prev(),
        Command::Seek(position) => manager.seek(position),
        Command::Repeat(repeat) => manager.set_repeat(repeat),
        Command::Ended => manager.on_ended(),
    }
}

fn session() -> SessionManager {
    SessionManager::new(MemoryStore::new(), SessionConfig::default())
}

// ===== Property Tests =====

proptest! {
    /// Property: plays alone never put the same id in the queue twice,
    /// and the last played item is always at the head
    #[test]
    fn play_keeps_queue_unique_with_current_at_head(
        items in prop::collection::vec(arbitrary_item(), 1..40)
    ) {
        let mut manager = session();

        for item in items {
            manager.play(item);

            let ids: Vec<_> = manager.queue().iter().map(|i| i.id.clone()).collect();
            let unique: HashSet<_> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());

            let current = manager.current().map(|i| i.id.clone());
            prop_assert_eq!(ids.first().cloned(), current);
        }
    }

    /// Property: once an item is loaded, the current item stays in the queue
    /// under any command mix (the queue only ever gains or reorders)
    #[test]
    fn current_is_always_queued(
        commands in prop::collection::vec(arbitrary_command(), 1..80)
    ) {
        let mut manager = session();

        for command in commands {
            apply(&mut manager, command);

            if let Some(current) = manager.current() {
                prop_assert!(manager.queue().position(current.id.as_str()).is_some());
            }
        }
    }

    /// Property: transport state is always consistent with the flags
    #[test]
    fn transport_matches_flags(
        commands in prop::collection::vec(arbitrary_command(), 1..80)
    ) {
        let mut manager = session();

        for command in commands {
            apply(&mut manager, command);

            match manager.transport() {
                TransportState::Playing => {
                    prop_assert!(manager.current().is_some());
                    prop_assert!(manager.is_playing());
                }
                TransportState::Paused => {
                    prop_assert!(manager.current().is_some());
                    prop_assert!(!manager.is_playing());
                }
                TransportState::Stopped => prop_assert!(!manager.is_playing()),
            }
        }
    }

    /// Property: the last seek on an item is what the item resumes from
    #[test]
    fn last_seek_is_resume_point(
        item in arbitrary_item(),
        positions in prop::collection::vec(0.0f64..10_000.0, 1..20)
    ) {
        let mut manager = session();
        manager.play(item.clone());

        for position in &positions {
            manager.seek(*position);
        }

        manager.play(item);
        prop_assert_eq!(Some(manager.progress()), positions.last().copied());
    }

    /// Property: a fresh session over the same store sees the same queue
    #[test]
    fn queue_rehydrates_exactly(
        commands in prop::collection::vec(arbitrary_command(), 1..60)
    ) {
        let store = MemoryStore::new();
        let mut manager = SessionManager::new(store.clone(), SessionConfig::default());

        for command in commands {
            apply(&mut manager, command);
        }

        let restored = SessionManager::new(store, SessionConfig::default());
        prop_assert_eq!(restored.queue(), manager.queue());
        prop_assert_eq!(restored.progress_store(), manager.progress_store());
    }
}
