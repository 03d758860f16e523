//! Fly Unicorn: steer a qubit towards the castle in the clouds.
//!
//! Every turn rotates a fresh qubit by the share of the goal the player is
//! aiming for and measures it `goal` times. The number of `1` outcomes is the
//! new altitude, so the unicorn only reaches the castle once the qubit is
//! fully inverted.

use std::io::{BufRead, Write};

use qlab_decode::magnitude;
use qlab_hal::{Counts, Executor, Target};
use tracing::debug;

use crate::circuits::unicorn::{Lift, unicorn_circuit};
use crate::error::DemoResult;

/// Altitude of the castle gates.
pub const GOAL: u64 = 1000;
/// Extra shots on hardware so noise does not keep the unicorn below the goal.
pub const HARDWARE_SHOT_BUFFER: u32 = 125;
/// Altitude change per climb or dive.
pub const STEP: i64 = 150;

/// A player command. Only the first character of the input matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `u`, `up`
    Up,
    /// `d`, `down`
    Down,
    /// `q`, `quit`
    Quit,
    /// Anything else.
    Unknown,
}

impl Command {
    /// Parse a line of input, ignoring case.
    pub fn parse(input: &str) -> Self {
        match input.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('u') => Command::Up,
            Some('d') => Command::Down,
            Some('q') => Command::Quit,
            _ => Command::Unknown,
        }
    }

    /// Altitude change: `+150`, `-150`, `0` for quit and `-1` when unknown.
    pub fn modifier(self) -> i64 {
        match self {
            Command::Up => STEP,
            Command::Down => -STEP,
            Command::Quit => 0,
            Command::Unknown => -1,
        }
    }
}

/// Status line for an altitude.
pub fn status(altitude: u64) -> &'static str {
    match altitude {
        0 => "Your unicorn is waiting for you on the ground",
        1..=100 => "Your unicorn is floating gently above the ground",
        101..=200 => "Your unicorn is hovering just above the evergreen sea of trees",
        201..=300 => "Your unicorn is approaching the first misty cloud layer",
        301..=400 => "Your unicorn has soared through the misty pink clouds",
        401..=500 => "Your unicorn is well above the misty clouds",
        501..=600 => "You can barely see the evergreen sea of trees from this high up",
        601..=700 => "Your unicorn is soaring through the sky",
        701..=800 => "You can see the first glimpse of the golden castle gates just above you",
        801..=900 => "Your unicorn is nearly at the mystical castle gates",
        901..=999 => {
            "Your unicorn swiftly glides through the mystical castle gate. You're almost there"
        }
        _ => "A roar emits from the crowd of excited sky elves, waiting to greet you",
    }
}

/// What a command does this turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// End the game.
    Quit,
    /// Print "What?" and ask again.
    Confused,
    /// Run the circuit with this lift after printing the message.
    Fly {
        /// Narration for the move.
        message: &'static str,
        /// Rotation for the new target altitude.
        lift: Lift,
    },
}

/// How the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The unicorn reached the castle.
    Won {
        /// Turns flown.
        turns: u32,
    },
    /// The player quit or input ended.
    Quit {
        /// Altitude when the game stopped.
        altitude: u64,
    },
}

/// Game state.
#[derive(Debug, Clone)]
pub struct UnicornGame {
    altitude: u64,
    goal: u64,
    shots: u32,
    turns: u32,
}

impl UnicornGame {
    /// New game on the ground. Hardware runs add [`HARDWARE_SHOT_BUFFER`].
    pub fn new(on_hardware: bool) -> Self {
        let buffer = if on_hardware { HARDWARE_SHOT_BUFFER } else { 0 };
        Self {
            altitude: 0,
            goal: GOAL,
            shots: GOAL as u32 + buffer,
            turns: 0,
        }
    }

    /// Start at a given altitude.
    pub fn with_altitude(mut self, altitude: u64) -> Self {
        self.altitude = altitude;
        self
    }

    /// Current altitude.
    pub fn altitude(&self) -> u64 {
        self.altitude
    }

    /// Shots per turn.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Whether the unicorn has reached the castle.
    pub fn has_won(&self) -> bool {
        self.altitude >= self.goal
    }

    /// Decide what `command` does from the current altitude.
    pub fn turn(&self, command: Command) -> Turn {
        let message = match command {
            Command::Quit => return Turn::Quit,
            Command::Unknown => return Turn::Confused,
            Command::Up => "You soar into the sky.",
            Command::Down if self.altitude > 0 => "You dive down lower.",
            Command::Down => "Your unicorn can't fly into the ground!",
        };

        let target = self.altitude as i64 + command.modifier();
        let fraction = target as f64 / self.goal as f64;
        Turn::Fly {
            message,
            lift: Lift::from_fraction(fraction),
        }
    }

    /// Read the new altitude from a turn's counts.
    pub fn land(&mut self, counts: &Counts) -> u64 {
        self.turns += 1;
        self.altitude = magnitude(counts, "1");
        self.altitude
    }

    /// Play until the castle is reached or the player quits.
    ///
    /// Commands are read line by line from `input`; end of input quits.
    pub async fn play<R: BufRead, W: Write>(
        &mut self,
        executor: &Executor,
        target: &Target,
        mut input: R,
        mut output: W,
    ) -> DemoResult<GameOutcome> {
        loop {
            write!(
                output,
                "\n=====================\n-[ Altitude {} feet ]-\n{}.\n[up,down,quit]: ",
                self.altitude,
                status(self.altitude)
            )?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(GameOutcome::Quit {
                    altitude: self.altitude,
                });
            }
            if line.trim().is_empty() {
                continue;
            }

            let (message, lift) = match self.turn(Command::parse(&line)) {
                Turn::Quit => {
                    return Ok(GameOutcome::Quit {
                        altitude: self.altitude,
                    });
                }
                Turn::Confused => {
                    writeln!(output, "What?")?;
                    continue;
                }
                Turn::Fly { message, lift } => (message, lift),
            };
            writeln!(output, "{message}")?;

            let circuit = unicorn_circuit(lift)?;
            let result = executor.execute(target, &circuit, self.shots).await?;
            writeln!(output, "{}", result.counts)?;

            let altitude = self.land(&result.counts);
            debug!(turn = self.turns, altitude, ?lift, "unicorn landed");

            if self.has_won() {
                writeln!(
                    output,
                    "Congratulations! Your unicorn soars into the castle gates!"
                )?;
                return Ok(GameOutcome::Won { turns: self.turns });
            }
        }
    }
}
