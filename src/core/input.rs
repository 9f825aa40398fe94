use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RailMove {
    Left,
    Right,
}

/// Held state per direction, used to turn key events into press edges.
#[derive(Default, Debug)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

pub fn init_state() -> InputState {
    InputState::default()
}

#[inline(always)]
pub fn rail_move_from_keycode(code: KeyCode) -> Option<RailMove> {
    match code {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(RailMove::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(RailMove::Right),
        _ => None,
    }
}

/// Updates the held state and reports a move only on the press edge.
/// OS key repeats and presses of an already held direction yield nothing.
pub fn handle_key(code: KeyCode, pressed: bool, repeat: bool, state: &mut InputState) -> Option<RailMove> {
    let mv = rail_move_from_keycode(code)?;
    let held = match mv {
        RailMove::Left => &mut state.left,
        RailMove::Right => &mut state.right,
    };

    let edge = pressed && !repeat && !*held;
    *held = pressed;
    edge.then_some(mv)
}

pub fn handle_keyboard_input(event: &KeyEvent, state: &mut InputState) -> Option<RailMove> {
    let PhysicalKey::Code(code) = event.physical_key else {
        return None;
    };
    handle_key(code, event.state == ElementState::Pressed, event.repeat, state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_edge_yields_one_move() {
        let mut state = init_state();
        assert_eq!(handle_key(KeyCode::ArrowLeft, true, false, &mut state), Some(RailMove::Left));
        assert_eq!(handle_key(KeyCode::ArrowLeft, true, true, &mut state), None);
        assert_eq!(handle_key(KeyCode::ArrowLeft, true, false, &mut state), None);
        assert_eq!(handle_key(KeyCode::ArrowLeft, false, false, &mut state), None);
        assert_eq!(handle_key(KeyCode::KeyA, true, false, &mut state), Some(RailMove::Left));
    }

    #[test]
    fn directions_are_tracked_independently() {
        let mut state = init_state();
        assert_eq!(handle_key(KeyCode::KeyD, true, false, &mut state), Some(RailMove::Right));
        assert_eq!(handle_key(KeyCode::ArrowLeft, true, false, &mut state), Some(RailMove::Left));
        assert!(state.left && state.right);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut state = init_state();
        assert_eq!(handle_key(KeyCode::ArrowUp, true, false, &mut state), None);
        assert!(!state.left && !state.right);
    }
}
