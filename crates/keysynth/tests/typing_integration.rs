//! End-to-end typing scenarios through the public API.
//!
//! These tests wire the real resolver, sequencer and dispatcher to a
//! [`RecordingSink`] and check the exact event streams a user would see.

use std::{
    sync::{atomic::AtomicBool, Arc},
    time::Duration,
};

use keysynth::application::{
    dispatch_chat::{ChatDispatcher, ChatKeys},
    type_text::{EventSequencer, FallbackPolicy, KeyEvent, KeyEventSink, SequenceError},
};
use keysynth::infrastructure::event_sink::recording::RecordingSink;
use keysynth_core::{LayoutResolver, PhysicalKeyCode};

const SHIFT: u16 = 0x38;
const OPTION: u16 = 0x3A;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sequencer(locale: Option<&str>, sink: &Arc<RecordingSink>) -> EventSequencer {
    EventSequencer::new(
        Arc::new(LayoutResolver::new(locale)),
        Arc::clone(sink) as Arc<dyn KeyEventSink>,
    )
    .with_key_delay(Duration::ZERO)
}

fn key_downs(sink: &RecordingSink) -> Vec<PhysicalKeyCode> {
    sink.events()
        .into_iter()
        .filter(|e| e.pressed)
        .map(|e| e.code)
        .collect()
}

// ── Typing ────────────────────────────────────────────────────────────────────

#[test]
fn test_type_mixed_case_brackets_each_uppercase_with_shift() {
    // Arrange
    let sink = Arc::new(RecordingSink::new());
    let seq = sequencer(None, &sink);

    // Act
    let typed = seq.type_text("Ab").unwrap();

    // Assert
    assert_eq!(typed, 2);
    assert_eq!(
        sink.events(),
        vec![
            KeyEvent::down(SHIFT),
            KeyEvent::down(0x00u16), // a
            KeyEvent::up(0x00u16),
            KeyEvent::up(SHIFT),
            KeyEvent::down(0x0Bu16), // b
            KeyEvent::up(0x0Bu16),
        ]
    );
}

#[test]
fn test_german_layout_types_z_on_physical_y_key() {
    let sink = Arc::new(RecordingSink::new());
    let seq = sequencer(Some("de-DE"), &sink);

    seq.type_text("z").unwrap();

    assert_eq!(key_downs(&sink), vec![PhysicalKeyCode(0x10)]);
}

#[test]
fn test_german_bracket_uses_option_modifier() {
    let sink = Arc::new(RecordingSink::new());
    let seq = sequencer(Some("de"), &sink);

    seq.type_text("[").unwrap();

    assert_eq!(
        sink.events(),
        vec![
            KeyEvent::down(OPTION),
            KeyEvent::down(0x17u16), // 5
            KeyEvent::up(0x17u16),
            KeyEvent::up(OPTION),
        ]
    );
}

#[test]
fn test_long_text_leaves_no_key_down() {
    let sink = Arc::new(RecordingSink::new());
    let seq = sequencer(Some("de"), &sink);

    seq.type_text("/msg Steve Hallo! [#1] \"ok\" & tschüss").unwrap();

    assert!(sink.is_balanced());
}

#[test]
fn test_reject_policy_emits_nothing_for_unmapped_text() {
    let sink = Arc::new(RecordingSink::new());
    let seq = sequencer(None, &sink).with_fallback_policy(FallbackPolicy::Reject);

    let err = seq.type_text("price: 5€").unwrap_err();

    assert!(matches!(
        err,
        SequenceError::UnmappedCharacter {
            character: '€',
            index: 8
        }
    ));
    assert!(sink.events().is_empty());
}

#[test]
fn test_sink_failure_reports_fully_typed_characters() {
    // Arrange: "ab" needs 4 events; the fifth event belongs to 'c'.
    let sink = Arc::new(RecordingSink::failing_after(5));
    let seq = sequencer(None, &sink);

    // Act
    let err = seq.type_text("abc").unwrap_err();

    // Assert
    assert!(matches!(err, SequenceError::Interrupted { typed: 2, .. }));
    assert_eq!(sink.events().len(), 5);
}

// ── Hold and release ──────────────────────────────────────────────────────────

#[test]
fn test_hold_and_release_bracket_other_taps() {
    let sink = Arc::new(RecordingSink::new());
    let seq = sequencer(None, &sink);

    let held = seq.press_and_hold("shift").unwrap();
    seq.tap("1").unwrap();
    seq.release(held).unwrap();

    assert_eq!(
        sink.events(),
        vec![
            KeyEvent::down(SHIFT),
            KeyEvent::down(0x12u16),
            KeyEvent::up(0x12u16),
            KeyEvent::up(SHIFT),
        ]
    );
}

// ── Chat ──────────────────────────────────────────────────────────────────────

#[test]
fn test_chat_macro_for_german_command() {
    // Arrange
    let sink = Arc::new(RecordingSink::new());
    let seq = Arc::new(sequencer(Some("de"), &sink));
    let dispatcher = ChatDispatcher::new(seq, ChatKeys::default())
        .with_delays(Duration::ZERO, Duration::ZERO);

    // Act
    let report = dispatcher
        .dispatch(&["/pay Zed 5".to_string()], &AtomicBool::new(false))
        .unwrap();

    // Assert
    assert_eq!(report.sent, 1);
    assert!(!report.cancelled);
    let downs = key_downs(&sink);
    assert_eq!(downs.first(), Some(&PhysicalKeyCode(0x35)), "starts with esc");
    assert_eq!(downs.get(1), Some(&PhysicalKeyCode(0x11)), "then opens chat");
    assert_eq!(downs.last(), Some(&PhysicalKeyCode(0x35)), "ends with esc");
    assert!(downs.contains(&PhysicalKeyCode(0x24)), "submits with enter");
    // 'Z' on a German layout is shift + the physical Y key.
    assert!(downs.contains(&PhysicalKeyCode(0x10)));
    assert!(sink.is_balanced());
}
