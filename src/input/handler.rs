use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::trace;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Restart,
    Quit,
    None,
}

const EMPTY: u8 = 0;

fn encode(direction: Direction) -> u8 {
    match direction {
        Direction::Up => 1,
        Direction::Down => 2,
        Direction::Left => 3,
        Direction::Right => 4,
    }
}

fn decode(raw: u8) -> Option<Direction> {
    match raw {
        1 => Some(Direction::Up),
        2 => Some(Direction::Down),
        3 => Some(Direction::Left),
        4 => Some(Direction::Right),
        _ => None,
    }
}

/// Captures the latest steering intent between ticks.
///
/// Holds at most one pending direction; a newer key press overwrites an
/// unconsumed one. Clones share the same slot, so one clone can sit with the
/// key reader and another with the game loop.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    pending: Arc<AtomicU8>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a key press; arrow keys are also recorded as the pending direction
    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let action = match key.code {
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        };

        if let KeyAction::Steer(direction) = action {
            self.record_direction(direction);
        }

        action
    }

    /// Store `direction` as the pending intent, replacing any unconsumed one
    pub fn record_direction(&self, direction: Direction) {
        trace!("pending direction {:?}", direction);
        self.pending.store(encode(direction), Ordering::Release);
    }

    /// Take the pending direction, leaving the slot empty
    pub fn consume_pending_direction(&self) -> Option<Direction> {
        decode(self.pending.swap(EMPTY, Ordering::AcqRel))
    }

    /// Drop any unconsumed intent
    pub fn clear(&self) {
        self.pending.store(EMPTY, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up)),
            KeyAction::Steer(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down)),
            KeyAction::Steer(Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left)),
            KeyAction::Steer(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right)),
            KeyAction::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_latest_direction_wins() {
        let handler = InputHandler::new();

        handler.handle_key_event(press(KeyCode::Up));
        handler.handle_key_event(press(KeyCode::Left));

        assert_eq!(handler.consume_pending_direction(), Some(Direction::Left));
    }

    #[test]
    fn test_consume_clears_slot() {
        let handler = InputHandler::new();
        assert_eq!(handler.consume_pending_direction(), None);

        handler.record_direction(Direction::Down);
        assert_eq!(handler.consume_pending_direction(), Some(Direction::Down));
        assert_eq!(handler.consume_pending_direction(), None);
    }

    #[test]
    fn test_clones_share_slot() {
        let reader = InputHandler::new();
        let game = reader.clone();

        reader.handle_key_event(press(KeyCode::Right));
        assert_eq!(game.consume_pending_direction(), Some(Direction::Right));
        assert_eq!(reader.consume_pending_direction(), None);
    }

    #[test]
    fn test_wasd_does_not_steer() {
        let handler = InputHandler::new();

        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(w), KeyAction::None);
        assert_eq!(handler.consume_pending_direction(), None);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);

        let q_upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(q_upper), KeyAction::Quit);

        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);
    }

    #[test]
    fn test_restart_key() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('r'))), KeyAction::Restart);

        let r_upper = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(r_upper), KeyAction::Restart);
    }

    #[test]
    fn test_unknown_key_leaves_pending_untouched() {
        let handler = InputHandler::new();
        handler.record_direction(Direction::Up);

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(handler.consume_pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_clear() {
        let handler = InputHandler::new();
        handler.record_direction(Direction::Left);
        handler.clear();
        assert_eq!(handler.consume_pending_direction(), None);
    }
}
