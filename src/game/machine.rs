//! Game Loop
//!
//! Attract pattern, sequence playback, verification, and the win and loss
//! sequences. Every blocking wait for input goes through [`EventWaiter`]; all
//! other pauses go through the configured [`Delay`].

use super::timing::{ms, Delay, ThreadDelay, Timings};
use super::{GameOutcome, GamePhase, PhaseObserver, Sequence};
use crate::board::{DigitalOutput, PositionTable};
use crate::events::{EventQueue, EventWaiter, SlotIndex};
use crate::sound::SoundPlayer;
use crate::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

/// Victory animation, taken modulo the number of slots
const WIN_PATTERN: [SlotIndex; 10] = [0, 1, 2, 3, 2, 1, 0, 1, 2, 3];

/// Result of checking one round of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenVerdict {
    /// The whole sequence was repeated
    Correct,
    /// The player pressed the wrong slot or nothing at all
    Wrong {
        /// Position within the sequence that failed
        index: usize,
        /// Slot that should have been pressed
        expected: SlotIndex,
        /// Slot that was pressed; `None` if the deadline passed
        pressed: Option<SlotIndex>,
    },
}

/// The game state machine and its collaborators
pub struct Game {
    positions: Arc<PositionTable>,
    failure_sound: String,
    timings: Timings,
    waiter: EventWaiter,
    output: Arc<dyn DigitalOutput>,
    sound: Box<dyn SoundPlayer>,
    delay: Box<dyn Delay>,
    rng: StdRng,
    observer: Option<Box<dyn PhaseObserver>>,
    phase: GamePhase,
}

impl Game {
    /// Create a game consuming `queue` and driving `output` and `sound`
    pub fn new(
        positions: Arc<PositionTable>,
        failure_sound: impl Into<String>,
        timings: Timings,
        queue: Arc<EventQueue>,
        output: Arc<dyn DigitalOutput>,
        sound: Box<dyn SoundPlayer>,
    ) -> Self {
        Game {
            positions,
            failure_sound: failure_sound.into(),
            timings,
            waiter: EventWaiter::new(queue),
            output,
            sound,
            delay: Box::new(ThreadDelay),
            rng: StdRng::from_entropy(),
            observer: None,
            phase: GamePhase::Idle,
        }
    }

    /// Replace the pacing delay
    pub fn with_delay(mut self, delay: impl Delay + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    /// Make sequences reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Report phase transitions to `observer`
    pub fn with_observer(mut self, observer: impl PhaseObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Current phase
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Play games forever. Only returns if the event layer fails.
    pub fn run(&mut self) -> Result<Infallible> {
        let mut grace = None;
        loop {
            let rounds = self.attract(grace)?;
            grace = match self.play_game(rounds)? {
                GameOutcome::Won => None,
                GameOutcome::Lost => Some(ms(self.timings.loss_grace_ms)),
            };
        }
    }

    /// Run the attract pattern until a button is pressed.
    ///
    /// With `initial_delay`, first waits that long with the lights off so a new
    /// game can start straight away. Returns the round count of the pressed
    /// slot.
    pub fn attract(&mut self, initial_delay: Option<Duration>) -> Result<usize> {
        self.enter(GamePhase::Attracting, &[]);

        if let Some(window) = initial_delay {
            self.blank();
            if let Some(edge) = self.waiter.wait_for_press(Some(window))?.edge() {
                return Ok(self.start_from(edge.slot));
            }
        }

        let step = ms(self.timings.attract_step_ms);
        let idle = ms(self.timings.attract_idle_ms);
        loop {
            for slot in 0..self.positions.len() {
                self.activate(slot);
                if let Some(edge) = self.waiter.wait_for_press(Some(step))?.edge() {
                    return Ok(self.start_from(edge.slot));
                }
            }
            self.blank();
            if let Some(edge) = self.waiter.wait_for_press(Some(idle))?.edge() {
                return Ok(self.start_from(edge.slot));
            }
        }
    }

    /// Play one game of `rounds` rounds
    pub fn play_game(&mut self, rounds: usize) -> Result<GameOutcome> {
        let mut sequence = Sequence::new();
        for _ in 0..rounds {
            sequence.extend_random(&mut self.rng, self.positions.len());
            self.play_back(&sequence);

            if let ListenVerdict::Wrong {
                index,
                expected,
                pressed,
            } = self.listen(&sequence)?
            {
                match pressed {
                    Some(slot) => log::info!(
                        "Round {}: step {} expected slot {}, got slot {}",
                        sequence.len(),
                        index + 1,
                        expected,
                        slot
                    ),
                    None => log::info!(
                        "Round {}: step {} expected slot {}, timed out",
                        sequence.len(),
                        index + 1,
                        expected
                    ),
                }
                self.lose(&sequence);
                return Ok(GameOutcome::Lost);
            }
        }

        self.win(&sequence);
        Ok(GameOutcome::Won)
    }

    /// Show the whole sequence, then drop any input made while it played
    pub fn play_back(&mut self, sequence: &Sequence) {
        self.enter(
            GamePhase::PlayingBack {
                round: sequence.len(),
            },
            sequence.as_slice(),
        );
        if sequence.len() > 1 {
            self.delay.delay(ms(self.timings.inter_round_pause_ms));
        }

        for &slot in sequence.as_slice() {
            self.activate(slot);
            self.delay.delay(ms(self.timings.playback_on_ms));
            self.blank();
            self.delay.delay(ms(self.timings.playback_off_ms));
        }

        self.waiter.clear_events();
    }

    /// Check the player's repetition of `sequence`, stopping at the first miss
    pub fn listen(&mut self, sequence: &Sequence) -> Result<ListenVerdict> {
        self.enter(
            GamePhase::Listening {
                round: sequence.len(),
            },
            sequence.as_slice(),
        );

        let deadline = ms(self.timings.input_deadline_ms);
        for (index, &expected) in sequence.as_slice().iter().enumerate() {
            let pressed = self
                .waiter
                .wait_for_press(Some(deadline))?
                .edge()
                .map(|edge| edge.slot);
            if pressed != Some(expected) {
                return Ok(ListenVerdict::Wrong {
                    index,
                    expected,
                    pressed,
                });
            }

            self.activate(expected);
            self.waiter.wait_for_release_of(expected, None)?;
            self.blank();
        }

        Ok(ListenVerdict::Correct)
    }

    fn win(&mut self, sequence: &Sequence) {
        self.enter(GamePhase::Won, sequence.as_slice());
        self.delay.delay(ms(self.timings.win_hold_ms));
        for step in WIN_PATTERN {
            self.activate(step % self.positions.len());
            self.delay.delay(ms(self.timings.win_step_ms));
        }
        self.blank();
        self.waiter.clear_events();
    }

    fn lose(&mut self, sequence: &Sequence) {
        self.enter(GamePhase::Lost, sequence.as_slice());
        for position in self.positions.iter() {
            self.output.set_level(position.output_pin, true);
        }
        self.sound.play(&self.failure_sound);
        self.delay.delay(ms(self.timings.failure_hold_ms));
        self.blank();
        self.delay.delay(ms(self.timings.failure_blank_ms));
        self.waiter.clear_events();
    }

    fn start_from(&self, slot: SlotIndex) -> usize {
        self.blank();
        let position = self.positions.get(slot);
        log::info!(
            "Game started from '{}' ({} rounds)",
            position.id,
            position.unlock_sequence_length
        );
        position.unlock_sequence_length
    }

    /// Light `slot` alone and play its sound
    fn activate(&self, slot: SlotIndex) {
        for (index, position) in self.positions.iter().enumerate() {
            self.output.set_level(position.output_pin, index == slot);
        }
        self.sound.play(&self.positions.get(slot).sound_id);
    }

    fn blank(&self) {
        for position in self.positions.iter() {
            self.output.set_level(position.output_pin, false);
        }
    }

    fn enter(&mut self, phase: GamePhase, sequence: &[SlotIndex]) {
        log::info!("Phase: {:?}", phase);
        self.phase = phase;
        if let Some(observer) = self.observer.as_mut() {
            observer.phase_changed(phase, sequence);
        }
    }
}
