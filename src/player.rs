//! Headless host that drives one engine per frame.
//!
//! This is the control half of an interactive visualizer: it owns the values, the active engine
//! and the run/pause state, and reacts to reset, algorithm switch, play/pause and single-step
//! commands. Drawing is left to whoever calls [`Player::tick`] and reads [`Player::frame`].

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::engine::{Algorithm, AnyEngine};
use crate::error::SortError;
use crate::step::{Highlight, StepSort};

/// Width of the reference window divided by the four pixel wide columns.
pub const DEFAULT_LEN: usize = 640 / 4;
pub const DEFAULT_MIN_VALUE: i32 = 20;
pub const DEFAULT_MAX_VALUE: i32 = 401;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerConfig {
    /// Number of values generated on every reset.
    pub len: usize,
    pub min_value: i32,
    pub max_value: i32,
    /// Fixed seed for reproducible value sequences. Seeded from entropy if `None`.
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            len: DEFAULT_LEN,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            seed: None,
            algorithm: Algorithm::Selection,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), SortError> {
        if self.min_value > self.max_value {
            return Err(SortError::InvalidValueRange {
                min: self.min_value,
                max: self.max_value,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fresh values, engine restarted, playback stopped.
    Reset,
    /// Switch to another algorithm. Implies a reset.
    Select(Algorithm),
    ToggleRunning,
    /// Stop playback and advance by exactly one step on the next tick.
    Step,
}

impl Command {
    /// `r` resets, `1`-`4` select an algorithm, space toggles playback and `s` single-steps.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'r' => Some(Command::Reset),
            ' ' => Some(Command::ToggleRunning),
            's' => Some(Command::Step),
            digit => Algorithm::from_digit(digit).map(Command::Select),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub step: usize,
    pub algorithm: Algorithm,
    pub data: Vec<i32>,
    pub highlights: Vec<Highlight>,
    pub done: bool,
}

pub struct Player {
    config: PlayerConfig,
    rng: StdRng,
    data: Vec<i32>,
    engine: AnyEngine<i32>,
    running: bool,
    pending_step: bool,
    steps: usize,
}

impl Player {
    /// Generates `config.len` random values and prepares `config.algorithm` to sort them.
    pub fn new(config: PlayerConfig) -> Result<Self, SortError> {
        config.validate()?;

        let mut rng = make_rng(config.seed);
        let data = random_values(&mut rng, &config);

        Ok(Self::assemble(config, rng, data))
    }

    /// Like [`Player::new`], but starts from `data` instead of random values. Later resets still
    /// generate random values.
    pub fn with_data(config: PlayerConfig, data: Vec<i32>) -> Result<Self, SortError> {
        config.validate()?;

        let rng = make_rng(config.seed);
        Ok(Self::assemble(config, rng, data))
    }

    fn assemble(config: PlayerConfig, rng: StdRng, data: Vec<i32>) -> Self {
        let engine = AnyEngine::new(config.algorithm, &data);
        info!(
            "player ready: {} sort over {} values",
            config.algorithm,
            data.len()
        );

        Self {
            config,
            rng,
            data,
            engine,
            running: false,
            pending_step: false,
            steps: 0,
        }
    }

    pub fn handle(&mut self, command: Command) {
        debug!("command {:?}", command);
        match command {
            Command::Reset => self.reset(),
            Command::Select(algorithm) => self.select(algorithm),
            Command::ToggleRunning => self.toggle_running(),
            Command::Step => self.request_step(),
        }
    }

    pub fn reset(&mut self) {
        self.data = random_values(&mut self.rng, &self.config);
        self.restart();
        info!(
            "reset: {} fresh values for {} sort",
            self.data.len(),
            self.config.algorithm
        );
    }

    pub fn select(&mut self, algorithm: Algorithm) {
        info!("switching from {} to {}", self.config.algorithm, algorithm);
        self.config.algorithm = algorithm;
        self.reset();
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn request_step(&mut self) {
        self.running = false;
        self.pending_step = true;
    }

    /// Advances the engine once if playback is on or a single step was requested.
    ///
    /// Returns whether a step was performed.
    pub fn tick(&mut self) -> bool {
        if !(self.running || self.pending_step) {
            return false;
        }
        self.pending_step = false;

        if self.engine.is_done() {
            return false;
        }

        self.engine.step(&mut self.data);
        self.steps += 1;

        if self.engine.is_done() {
            info!(
                "{} sort finished after {} steps",
                self.config.algorithm, self.steps
            );
        }

        true
    }

    #[inline]
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    pub fn highlights(&self) -> Vec<Highlight> {
        self.engine.highlights()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.engine.is_done()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[inline]
    pub fn engine(&self) -> &AnyEngine<i32> {
        &self.engine
    }

    pub fn frame(&self) -> Frame {
        Frame {
            step: self.steps,
            algorithm: self.config.algorithm,
            data: self.data.clone(),
            highlights: self.highlights(),
            done: self.is_done(),
        }
    }

    // Drops the old engine together with its scratch buffers.
    fn restart(&mut self) {
        self.engine = AnyEngine::new(self.config.algorithm, &self.data);
        self.running = false;
        self.pending_step = false;
        self.steps = 0;
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn random_values(rng: &mut StdRng, config: &PlayerConfig) -> Vec<i32> {
    (0..config.len)
        .map(|_| rng.gen_range(config.min_value..=config.max_value))
        .collect()
}
