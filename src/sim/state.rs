//! Game phases and the state machine that drives them
//!
//! Input handlers, the world update and the presentation all steer the game
//! by setting the current phase. The machine itself only knows the handful of
//! one-frame transitions that happen on every tick regardless of input.

use serde::{Deserialize, Serialize};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player idles in place until the first flap
    #[default]
    WaitFirstFlap,
    /// Normal play: gravity pulls, columns scroll
    Default,
    /// One-frame pulse: the player flapped this frame
    Flap,
    /// One-frame pulse: the player cleared a column this frame
    Score,
    /// One-frame pulse: the player hit something this frame
    Collision,
    /// Player falls off-screen after a collision
    WaitReset,
    /// World is being reset for a new run
    Reset,
    /// Game is paused
    Pause,
    /// Leave the game loop
    Quit,
}

impl GamePhase {
    /// Every phase, in declaration order
    pub const ALL: [GamePhase; 9] = [
        GamePhase::WaitFirstFlap,
        GamePhase::Default,
        GamePhase::Flap,
        GamePhase::Score,
        GamePhase::Collision,
        GamePhase::WaitReset,
        GamePhase::Reset,
        GamePhase::Pause,
        GamePhase::Quit,
    ];
}

/// Phases during which the player is under gravity and columns scroll
pub fn is_main_game(phase: GamePhase) -> bool {
    matches!(
        phase,
        GamePhase::Default | GamePhase::Flap | GamePhase::Score | GamePhase::Collision
    )
}

/// Phases during which the scenery stands still
pub fn is_no_move(phase: GamePhase) -> bool {
    matches!(phase, GamePhase::Collision | GamePhase::WaitReset)
}

/// One-shot signals raised alongside a phase change.
///
/// Each flag stays raised until the consumer that acts on it takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingSignals {
    pub mute: bool,
    pub unmute: bool,
}

impl PendingSignals {
    pub fn mute() -> Self {
        Self {
            mute: true,
            ..Default::default()
        }
    }

    pub fn unmute() -> Self {
        Self {
            unmute: true,
            ..Default::default()
        }
    }

    /// Raise every flag that is raised in `other`
    pub fn merge(&mut self, other: PendingSignals) {
        self.mute |= other.mute;
        self.unmute |= other.unmute;
    }

    pub fn is_empty(&self) -> bool {
        !self.mute && !self.unmute
    }
}

/// Holds the current phase, the phase to resume after a pause, and the
/// pending one-shot signals.
#[derive(Debug, Clone, Default)]
pub struct StateMachine {
    state: GamePhase,
    previous: GamePhase,
    signals: PendingSignals,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn state(&self) -> GamePhase {
        self.state
    }

    /// Phase that was current when the game was last paused
    pub fn previous(&self) -> GamePhase {
        self.previous
    }

    /// Set the current phase.
    ///
    /// Entering `Pause` remembers the outgoing phase so that it can be
    /// restored with [`StateMachine::resume`]. No other transition touches
    /// the history.
    pub fn set(&mut self, state: GamePhase) {
        if state == GamePhase::Pause && self.state != GamePhase::Pause {
            self.previous = self.state;
        }
        self.state = state;
    }

    /// Set the current phase and raise `signals` in the same step
    pub fn set_with_signals(&mut self, state: GamePhase, signals: PendingSignals) {
        self.set(state);
        self.signals.merge(signals);
    }

    /// Raise signals without changing phase
    pub fn raise(&mut self, signals: PendingSignals) {
        self.signals.merge(signals);
    }

    /// Leave `Pause` for the phase that was current before it
    pub fn resume(&mut self) {
        if self.state == GamePhase::Pause {
            self.state = self.previous;
        }
    }

    pub fn signals(&self) -> PendingSignals {
        self.signals
    }

    /// Consume the `mute` signal, returning whether it was raised
    pub fn take_mute(&mut self) -> bool {
        std::mem::take(&mut self.signals.mute)
    }

    /// Consume the `unmute` signal, returning whether it was raised
    pub fn take_unmute(&mut self) -> bool {
        std::mem::take(&mut self.signals.unmute)
    }

    /// Apply the transitions that happen on every frame before input is
    /// handled. Pulse phases fall back to `Default`, a collision starts the
    /// wait for reset, and a finished reset waits for the next first flap.
    pub fn transition_on_tick(&mut self) {
        self.state = match self.state {
            GamePhase::Flap | GamePhase::Score => GamePhase::Default,
            GamePhase::Collision => GamePhase::WaitReset,
            GamePhase::Reset => GamePhase::WaitFirstFlap,
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn machine_in(state: GamePhase) -> StateMachine {
        let mut machine = StateMachine::new();
        machine.set(state);
        machine
    }

    #[test]
    fn test_starts_waiting_for_first_flap() {
        let machine = StateMachine::new();
        assert_eq!(machine.state(), GamePhase::WaitFirstFlap);
        assert!(machine.signals().is_empty());
    }

    #[test]
    fn test_pulse_phases_fall_back_to_default() {
        for state in [GamePhase::Flap, GamePhase::Score] {
            let mut machine = machine_in(state);
            machine.transition_on_tick();
            assert_eq!(machine.state(), GamePhase::Default);
        }
    }

    #[test]
    fn test_collision_then_reset_chain() {
        let mut machine = machine_in(GamePhase::Collision);
        machine.transition_on_tick();
        assert_eq!(machine.state(), GamePhase::WaitReset);

        machine.set(GamePhase::Reset);
        machine.transition_on_tick();
        assert_eq!(machine.state(), GamePhase::WaitFirstFlap);
    }

    #[test]
    fn test_pause_restores_previous() {
        let mut machine = machine_in(GamePhase::Default);
        machine.set(GamePhase::Pause);
        assert_eq!(machine.previous(), GamePhase::Default);

        // Pausing twice must not forget where we came from
        machine.set(GamePhase::Pause);
        assert_eq!(machine.previous(), GamePhase::Default);

        machine.transition_on_tick();
        assert_eq!(machine.state(), GamePhase::Pause);

        machine.resume();
        assert_eq!(machine.state(), GamePhase::Default);
    }

    #[test]
    fn test_only_pause_records_history() {
        let mut machine = machine_in(GamePhase::WaitReset);
        machine.set(GamePhase::Pause);
        machine.resume();
        machine.set(GamePhase::Reset);
        machine.set(GamePhase::WaitFirstFlap);
        assert_eq!(machine.previous(), GamePhase::WaitReset);
    }

    #[test]
    fn test_signals_are_one_shot() {
        let mut machine = StateMachine::new();
        machine.set_with_signals(GamePhase::Default, PendingSignals::mute());
        machine.raise(PendingSignals::unmute());
        assert_eq!(machine.state(), GamePhase::Default);

        assert!(machine.take_mute());
        assert!(!machine.take_mute());
        assert!(machine.take_unmute());
        assert!(machine.signals().is_empty());
    }

    #[test]
    fn test_phase_ranges() {
        let main_game: Vec<_> = GamePhase::ALL
            .into_iter()
            .filter(|p| is_main_game(*p))
            .collect();
        assert_eq!(
            main_game,
            vec![
                GamePhase::Default,
                GamePhase::Flap,
                GamePhase::Score,
                GamePhase::Collision
            ]
        );
        assert!(is_no_move(GamePhase::Collision));
        assert!(is_no_move(GamePhase::WaitReset));
        assert!(!is_no_move(GamePhase::Default));
    }

    proptest! {
        #[test]
        fn prop_tick_only_moves_pulse_phases(index in 0usize..GamePhase::ALL.len()) {
            let state = GamePhase::ALL[index];
            let mut machine = machine_in(state);
            machine.transition_on_tick();
            let expected = match state {
                GamePhase::Flap | GamePhase::Score => GamePhase::Default,
                GamePhase::Collision => GamePhase::WaitReset,
                GamePhase::Reset => GamePhase::WaitFirstFlap,
                other => other,
            };
            prop_assert_eq!(machine.state(), expected);
        }
    }
}
