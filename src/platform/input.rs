//! Input events and their effect on the game phase

use crate::settings::Config;
use crate::sim::{GamePhase, PendingSignals, StateMachine};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A discrete input event, delivered once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed / interrupt
    Quit,
    KeyDown(Key),
    MouseDown(MouseButton),
}

/// Phases in which a flap is accepted
fn can_flap(state: GamePhase) -> bool {
    matches!(state, GamePhase::WaitFirstFlap | GamePhase::Default)
}

/// Apply one input event to the state machine.
///
/// The mute key is the only input that writes to the (locked) config.
pub fn dispatch(machine: &mut StateMachine, config: &mut Config, event: InputEvent) {
    match event {
        InputEvent::Quit
        | InputEvent::KeyDown(Key::Escape)
        | InputEvent::KeyDown(Key::Char('q')) => machine.set(GamePhase::Quit),

        InputEvent::KeyDown(Key::Char('p')) => {
            if machine.state() == GamePhase::Pause {
                machine.resume();
                log::debug!("Resumed ({:?})", machine.state());
            } else {
                machine.set(GamePhase::Pause);
                log::debug!("Paused");
            }
        }

        InputEvent::KeyDown(Key::Char('m')) => {
            if config.toggle_mute() {
                machine.raise(PendingSignals::mute());
            } else {
                machine.raise(PendingSignals::unmute());
            }
            log::info!("Mute: {}", config.mute());
        }

        InputEvent::KeyDown(Key::Space) | InputEvent::MouseDown(MouseButton::Left) => {
            if can_flap(machine.state()) {
                machine.set(GamePhase::Flap);
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(state: GamePhase) -> (StateMachine, Config) {
        let mut machine = StateMachine::new();
        machine.set(state);
        let mut config = Config::default();
        config.lock().unwrap();
        (machine, config)
    }

    #[test]
    fn test_quit_inputs() {
        for event in [
            InputEvent::Quit,
            InputEvent::KeyDown(Key::Escape),
            InputEvent::KeyDown(Key::Char('q')),
        ] {
            let (mut machine, mut config) = setup(GamePhase::Default);
            dispatch(&mut machine, &mut config, event);
            assert_eq!(machine.state(), GamePhase::Quit);
        }
    }

    #[test]
    fn test_pause_toggles() {
        let (mut machine, mut config) = setup(GamePhase::WaitReset);
        let pause = InputEvent::KeyDown(Key::Char('p'));
        dispatch(&mut machine, &mut config, pause);
        assert_eq!(machine.state(), GamePhase::Pause);
        dispatch(&mut machine, &mut config, pause);
        assert_eq!(machine.state(), GamePhase::WaitReset);
    }

    #[test]
    fn test_mute_toggles_and_signals() {
        let (mut machine, mut config) = setup(GamePhase::Default);
        let mute = InputEvent::KeyDown(Key::Char('m'));

        dispatch(&mut machine, &mut config, mute);
        assert!(config.mute());
        assert!(machine.take_mute());
        assert!(!machine.signals().unmute);

        dispatch(&mut machine, &mut config, mute);
        assert!(!config.mute());
        assert!(machine.take_unmute());
        assert_eq!(machine.state(), GamePhase::Default);
    }

    #[test]
    fn test_flap_only_when_allowed() {
        for event in [
            InputEvent::KeyDown(Key::Space),
            InputEvent::MouseDown(MouseButton::Left),
        ] {
            for state in [GamePhase::WaitFirstFlap, GamePhase::Default] {
                let (mut machine, mut config) = setup(state);
                dispatch(&mut machine, &mut config, event);
                assert_eq!(machine.state(), GamePhase::Flap);
            }
            for state in [GamePhase::WaitReset, GamePhase::Pause, GamePhase::Collision] {
                let (mut machine, mut config) = setup(state);
                dispatch(&mut machine, &mut config, event);
                assert_eq!(machine.state(), state);
            }
        }
    }

    #[test]
    fn test_other_inputs_ignored() {
        let (mut machine, mut config) = setup(GamePhase::Default);
        dispatch(&mut machine, &mut config, InputEvent::MouseDown(MouseButton::Right));
        dispatch(&mut machine, &mut config, InputEvent::KeyDown(Key::Char('x')));
        assert_eq!(machine.state(), GamePhase::Default);
        assert!(machine.signals().is_empty());
    }
}
