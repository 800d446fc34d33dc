use winit::event::KeyEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Discrete state mutation requested by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleOrbit,
    ToggleFirstArc,
    ToggleSecondArc,
    ShrinkGoal,
    SpeedUp,
    SpeedDown,
    ToggleWireframe,
    ToggleKeeper,
}

impl Action {
    /// Whether holding the key should keep firing the action.
    /// Toggles must not flicker under OS auto-repeat.
    pub fn repeats(self) -> bool {
        matches!(self, Action::SpeedUp | Action::SpeedDown | Action::ShrinkGoal)
    }
}

/// Map a key code to its action. Unrecognized keys are a no-op.
pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyO => Some(Action::ToggleOrbit),
        KeyCode::Digit1 => Some(Action::ToggleFirstArc),
        KeyCode::Digit2 => Some(Action::ToggleSecondArc),
        KeyCode::Digit3 => Some(Action::ShrinkGoal),
        KeyCode::ArrowUp => Some(Action::SpeedUp),
        KeyCode::ArrowDown => Some(Action::SpeedDown),
        KeyCode::KeyW => Some(Action::ToggleWireframe),
        KeyCode::KeyG => Some(Action::ToggleKeeper),
        _ => None,
    }
}

/// Resolve a full key event, dropping auto-repeat for toggle actions.
pub fn action_for_event(event: &KeyEvent) -> Option<Action> {
    if !event.state.is_pressed() {
        return None;
    }
    let PhysicalKey::Code(code) = event.physical_key else {
        return None;
    };
    let action = action_for(code)?;
    if event.repeat && !action.repeats() {
        return None;
    }
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_bound_key_maps() {
        assert_eq!(action_for(KeyCode::KeyO), Some(Action::ToggleOrbit));
        assert_eq!(action_for(KeyCode::Digit1), Some(Action::ToggleFirstArc));
        assert_eq!(action_for(KeyCode::Digit2), Some(Action::ToggleSecondArc));
        assert_eq!(action_for(KeyCode::Digit3), Some(Action::ShrinkGoal));
        assert_eq!(action_for(KeyCode::ArrowUp), Some(Action::SpeedUp));
        assert_eq!(action_for(KeyCode::ArrowDown), Some(Action::SpeedDown));
        assert_eq!(action_for(KeyCode::KeyW), Some(Action::ToggleWireframe));
        assert_eq!(action_for(KeyCode::KeyG), Some(Action::ToggleKeeper));
    }

    #[test]
    fn test_unbound_keys_are_noops() {
        assert_eq!(action_for(KeyCode::KeyA), None);
        assert_eq!(action_for(KeyCode::Space), None);
        assert_eq!(action_for(KeyCode::Digit4), None);
        assert_eq!(action_for(KeyCode::ArrowLeft), None);
    }

    #[test]
    fn test_only_parameter_steps_repeat() {
        assert!(Action::SpeedUp.repeats());
        assert!(Action::SpeedDown.repeats());
        assert!(Action::ShrinkGoal.repeats());
        assert!(!Action::ToggleOrbit.repeats());
        assert!(!Action::ToggleFirstArc.repeats());
        assert!(!Action::ToggleSecondArc.repeats());
        assert!(!Action::ToggleWireframe.repeats());
        assert!(!Action::ToggleKeeper.repeats());
    }
}
