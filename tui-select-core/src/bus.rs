//! Terminal event polling and conversion into [`EventKind`]

use crate::event::EventKind;
use crossterm::event::{self, MouseEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
    FocusGained,
    FocusLost,
}

/// Spawn the event polling task with cancellation support
///
/// This spawns an async task that polls for crossterm events and sends them
/// through the provided channel. The task can be cancelled using the token.
///
/// # Arguments
/// * `tx` - Channel to send raw events
/// * `poll_timeout` - Timeout for each poll operation
/// * `loop_sleep` - Sleep duration between poll cycles
/// * `cancel_token` - Token to cancel the polling task
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let Ok(evt) = event::read() else {
                            continue;
                        };
                        let raw = match evt {
                            event::Event::Key(key) => RawEvent::Key(key),
                            event::Event::Mouse(mouse) => RawEvent::Mouse(mouse),
                            event::Event::Resize(w, h) => RawEvent::Resize(w, h),
                            event::Event::FocusGained => RawEvent::FocusGained,
                            event::Event::FocusLost => RawEvent::FocusLost,
                            _ => continue,
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an EventKind
///
/// Wheel motion becomes [`EventKind::Scroll`]; every other mouse event is
/// passed through unchanged.
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
        RawEvent::FocusGained => EventKind::FocusGained,
        RawEvent::FocusLost => EventKind::FocusLost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent};

    #[test]
    fn test_process_raw_event_key() {
        use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState};

        let key_event = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        };

        let kind = process_raw_event(RawEvent::Key(key_event));
        assert!(matches!(kind, EventKind::Key(_)));
    }

    #[test]
    fn test_process_raw_event_scroll() {
        let scroll_up = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 3,
            row: 9,
            modifiers: KeyModifiers::NONE,
        };

        match process_raw_event(RawEvent::Mouse(scroll_up)) {
            EventKind::Scroll { column, row, delta } => {
                assert_eq!((column, row, delta), (3, 9, -1));
            }
            other => panic!("Expected Scroll event, got {other:?}"),
        }
    }

    #[test]
    fn test_process_raw_event_click_passes_through() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 1,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };

        let kind = process_raw_event(RawEvent::Mouse(click));
        assert!(kind.left_click().is_some());
    }

    #[test]
    fn test_process_raw_event_focus() {
        assert!(matches!(
            process_raw_event(RawEvent::FocusLost),
            EventKind::FocusLost
        ));
        assert!(matches!(
            process_raw_event(RawEvent::FocusGained),
            EventKind::FocusGained
        ));
    }
}
