//! Audio system using rodio
//!
//! Procedurally generated sound effects and music - no external files needed!
//! Audio is best-effort: without an output device the player stays silent
//! and the game runs on.

use std::time::Duration;

use rodio::source::{Amplify, SineWave, Source, TakeDuration};
use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::sim::{GamePhase, StateMachine};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player hit a column or the ground
    Hit,
    /// Player cleared a column
    Score,
}

/// What the player should do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    StartMusic,
    StopAll,
    Play(SoundEffect),
    /// Restart the music once the current effect has finished
    RestartMusicWhenIdle,
}

/// Decide the audio reaction to the current phase and pending signals.
///
/// Consumes the mute/unmute signals it acts on. An `unmute` raised while
/// waiting for reset is kept until the wait is over.
pub fn plan(machine: &mut StateMachine, muted: bool) -> Vec<AudioCommand> {
    let mut commands = Vec::new();
    let state = machine.state();

    if muted {
        machine.take_unmute();
        if machine.take_mute() {
            commands.push(AudioCommand::StopAll);
        }
        return commands;
    }

    machine.take_mute();
    if machine.signals().unmute && state != GamePhase::WaitReset {
        machine.take_unmute();
        commands.push(AudioCommand::StartMusic);
    }

    match state {
        GamePhase::Reset => commands.push(AudioCommand::RestartMusicWhenIdle),
        GamePhase::Collision => {
            commands.push(AudioCommand::StopAll);
            commands.push(AudioCommand::Play(SoundEffect::Hit));
        }
        GamePhase::Score => commands.push(AudioCommand::Play(SoundEffect::Score)),
        _ => {}
    }
    commands
}

type Tone = Amplify<TakeDuration<SineWave>>;

/// A plain sine tone; frequency 0 is a rest
fn tone(freq: f32, millis: u64, volume: f32) -> Tone {
    SineWave::new(freq)
        .take_duration(Duration::from_millis(millis))
        .amplify(volume)
}

/// Looping tune, in Hz (0 = rest)
const MELODY: [f32; 16] = [
    523.25, 659.25, 783.99, 659.25, 587.33, 698.46, 880.0, 0.0, 523.25, 659.25, 783.99, 1046.5,
    987.77, 783.99, 659.25, 0.0,
];
const MELODY_NOTE_MS: u64 = 180;

struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Sink,
    effects: Sink,
}

/// Audio manager for the game
pub struct AudioPlayer {
    output: Option<Output>,
    music_volume: f32,
    sfx_volume: f32,
    music_restart_pending: bool,
}

impl AudioPlayer {
    /// Open the default output device, starting the music unless muted
    pub fn new(muted: bool) -> Self {
        let output = match Self::open() {
            Ok(output) => Some(output),
            Err(reason) => {
                log::warn!("Audio unavailable ({}) - audio disabled", reason);
                None
            }
        };
        let mut player = Self {
            output,
            ..Self::disabled()
        };
        if !muted {
            player.start_music();
        }
        player
    }

    /// A player that never makes a sound
    pub fn disabled() -> Self {
        Self {
            output: None,
            music_volume: 0.5,
            sfx_volume: 0.5,
            music_restart_pending: false,
        }
    }

    fn open() -> Result<Output, String> {
        let (stream, handle) = OutputStream::try_default().map_err(|e| e.to_string())?;
        let music = Sink::try_new(&handle).map_err(|e| e.to_string())?;
        let effects = Sink::try_new(&handle).map_err(|e| e.to_string())?;
        Ok(Output {
            _stream: stream,
            handle,
            music,
            effects,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    /// Per-frame update: react to the phase and apply mute signals
    pub fn update(&mut self, machine: &mut StateMachine, muted: bool) {
        for command in plan(machine, muted) {
            self.apply(command);
        }
        if self.music_restart_pending && !muted && self.effects_idle() {
            self.start_music();
        }
    }

    fn apply(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::StartMusic => self.start_music(),
            AudioCommand::StopAll => self.stop_all(),
            AudioCommand::Play(effect) => self.play(effect),
            AudioCommand::RestartMusicWhenIdle => self.music_restart_pending = true,
        }
    }

    fn effects_idle(&self) -> bool {
        self.output.as_ref().is_none_or(|o| o.effects.empty())
    }

    /// Replace a sink with a fresh one; dropping the old sink silences it
    fn fresh_sink(&mut self) -> Option<Sink> {
        let output = self.output.as_ref()?;
        match Sink::try_new(&output.handle) {
            Ok(sink) => Some(sink),
            Err(e) => {
                log::warn!("Audio sink lost ({}) - audio disabled", e);
                self.output = None;
                None
            }
        }
    }

    pub fn start_music(&mut self) {
        self.music_restart_pending = false;
        let Some(sink) = self.fresh_sink() else { return };
        let notes: Vec<Tone> = MELODY
            .iter()
            .map(|&f| tone(f, MELODY_NOTE_MS, 0.15))
            .collect();
        sink.set_volume(self.music_volume);
        sink.append(rodio::source::from_iter(notes).repeat_infinite());
        if let Some(output) = self.output.as_mut() {
            output.music = sink;
        }
    }

    pub fn stop_all(&mut self) {
        self.music_restart_pending = false;
        let (Some(music), Some(effects)) = (self.fresh_sink(), self.fresh_sink()) else {
            return;
        };
        if let Some(output) = self.output.as_mut() {
            output.music = music;
            output.effects = effects;
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.sfx_volume;
        let Some(output) = self.output.as_ref() else {
            return;
        };
        output.effects.set_volume(volume);
        match effect {
            SoundEffect::Hit => Self::play_hit(&output.effects),
            SoundEffect::Score => Self::play_score(&output.effects),
        }
    }

    // === Sound generators ===

    /// Hit - sad falling tones
    fn play_hit(sink: &Sink) {
        for (freq, ms) in [(440.0, 150), (349.23, 150), (261.63, 400)] {
            sink.append(tone(freq, ms, 0.4));
        }
    }

    /// Score - quick rising blip
    fn play_score(sink: &Sink) {
        sink.append(tone(880.0, 60, 0.3));
        sink.append(tone(1318.5, 90, 0.3));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PendingSignals;

    fn machine_in(state: GamePhase) -> StateMachine {
        let mut machine = StateMachine::new();
        machine.set(state);
        machine
    }

    #[test]
    fn test_phase_sounds() {
        assert_eq!(
            plan(&mut machine_in(GamePhase::Collision), false),
            vec![AudioCommand::StopAll, AudioCommand::Play(SoundEffect::Hit)]
        );
        assert_eq!(
            plan(&mut machine_in(GamePhase::Score), false),
            vec![AudioCommand::Play(SoundEffect::Score)]
        );
        assert_eq!(
            plan(&mut machine_in(GamePhase::Reset), false),
            vec![AudioCommand::RestartMusicWhenIdle]
        );
        assert!(plan(&mut machine_in(GamePhase::Default), false).is_empty());
    }

    #[test]
    fn test_muted_is_silent() {
        for state in [GamePhase::Collision, GamePhase::Score, GamePhase::Reset] {
            assert!(plan(&mut machine_in(state), true).is_empty());
        }
    }

    #[test]
    fn test_mute_signal_stops_everything_once() {
        let mut machine = machine_in(GamePhase::Default);
        machine.raise(PendingSignals::mute());
        assert_eq!(plan(&mut machine, true), vec![AudioCommand::StopAll]);
        assert!(plan(&mut machine, true).is_empty());
    }

    #[test]
    fn test_unmute_waits_out_reset_wait() {
        let mut machine = machine_in(GamePhase::WaitReset);
        machine.raise(PendingSignals::unmute());
        assert!(plan(&mut machine, false).is_empty());
        assert!(machine.signals().unmute);

        machine.set(GamePhase::Default);
        assert_eq!(plan(&mut machine, false), vec![AudioCommand::StartMusic]);
        assert!(machine.signals().is_empty());
    }

    #[test]
    fn test_disabled_player_degrades() {
        let mut player = AudioPlayer::disabled();
        assert!(!player.is_enabled());
        let mut machine = machine_in(GamePhase::Collision);
        player.update(&mut machine, false);
        machine.set(GamePhase::Reset);
        player.update(&mut machine, false);
        assert!(!player.music_restart_pending);
    }
}
