//! Magic 8-ball answers from a single three-bit outcome.

use std::fmt;

use qlab_hal::Counts;

use crate::error::DecodeResult;
use crate::frequency::single_outcome;

/// An answer of the magic 8-ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EightBallAnswer {
    /// `000`
    Certain,
    /// `001`
    WithoutDoubt,
    /// `010`
    Definitely,
    /// `011`
    MostLikely,
    /// `100`
    DontCountOnIt,
    /// `101`
    ReplyIsNo,
    /// `110`
    VeryDoubtful,
    /// Any other outcome.
    AskAgain,
}

impl EightBallAnswer {
    /// Look up the answer for an outcome.
    pub fn from_outcome(outcome: &str) -> Self {
        match outcome {
            "000" => EightBallAnswer::Certain,
            "001" => EightBallAnswer::WithoutDoubt,
            "010" => EightBallAnswer::Definitely,
            "011" => EightBallAnswer::MostLikely,
            "100" => EightBallAnswer::DontCountOnIt,
            "101" => EightBallAnswer::ReplyIsNo,
            "110" => EightBallAnswer::VeryDoubtful,
            _ => EightBallAnswer::AskAgain,
        }
    }

    /// The phrase shown to the user.
    pub fn phrase(self) -> &'static str {
        match self {
            EightBallAnswer::Certain => "It is certain.",
            EightBallAnswer::WithoutDoubt => "Without a doubt.",
            EightBallAnswer::Definitely => "Yes - definitely.",
            EightBallAnswer::MostLikely => "Most likely.",
            EightBallAnswer::DontCountOnIt => "Don't count on it.",
            EightBallAnswer::ReplyIsNo => "My reply is no.",
            EightBallAnswer::VeryDoubtful => "Very doubtful.",
            EightBallAnswer::AskAgain => "Concentrate and ask again.",
        }
    }
}

impl fmt::Display for EightBallAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

/// Decode the answer of a one-shot 8-ball run.
pub fn eight_ball(counts: &Counts) -> DecodeResult<EightBallAnswer> {
    single_outcome(counts).map(EightBallAnswer::from_outcome)
}
