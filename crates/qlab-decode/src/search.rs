//! Bounded retry loop around a probabilistic search.

use std::future::Future;

use qlab_hal::Counts;
use tracing::debug;

use crate::frequency::majority;

/// Attempt cap used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The majority outcome matched the target.
    Found {
        /// The matching guess.
        guess: String,
        /// Number of attempts used, starting at 1.
        attempts: u32,
    },
    /// The attempt budget ran out without a match.
    Exhausted {
        /// Majority outcome of the final attempt, if it produced any counts.
        last_guess: Option<String>,
        /// Number of attempts used.
        attempts: u32,
    },
}

impl SearchOutcome {
    /// Whether the target was found.
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    /// Number of attempts made.
    pub fn attempts(&self) -> u32 {
        match self {
            SearchOutcome::Found { attempts, .. } | SearchOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Re-run an experiment until its majority outcome equals `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordSearch {
    /// Bitstring to look for.
    pub target: String,
    /// Upper bound on attempts.
    pub max_attempts: u32,
}

impl PasswordSearch {
    /// Search for `target` with the default attempt cap.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Change the attempt cap.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Run the loop.
    ///
    /// `attempt` receives the 1-based attempt number and returns the counts
    /// of one execution. Errors from `attempt` end the search immediately.
    pub async fn run<F, Fut, E>(&self, mut attempt: F) -> Result<SearchOutcome, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Counts, E>>,
    {
        let mut last_guess = None;

        for n in 1..=self.max_attempts {
            let counts = attempt(n).await?;
            let guess = majority(&counts).map(|(key, _)| key.to_string());
            debug!(attempt = n, guess = ?guess, "search attempt");

            if guess.as_deref() == Some(self.target.as_str()) {
                return Ok(SearchOutcome::Found {
                    guess: self.target.clone(),
                    attempts: n,
                });
            }
            last_guess = guess;
        }

        Ok(SearchOutcome::Exhausted {
            last_guess,
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_found_on_first_attempt() {
        let search = PasswordSearch::new("0110");
        let outcome = search
            .run(|_| async { Ok::<_, ()>(Counts::from_pairs([("0110", 900), ("0111", 124)])) })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SearchOutcome::Found {
                guess: "0110".into(),
                attempts: 1
            }
        );
    }

    #[tokio::test]
    async fn test_found_after_retries() {
        let search = PasswordSearch::new("1010");
        let outcome = search
            .run(|n| async move {
                let key = if n < 3 { "0000" } else { "1010" };
                Ok::<_, ()>(Counts::from_pairs([(key, 100)]))
            })
            .await
            .unwrap();

        assert!(outcome.is_found());
        assert_eq!(outcome.attempts(), 3);
    }

    #[tokio::test]
    async fn test_exhausted() {
        let search = PasswordSearch::new("1111").with_max_attempts(4);
        let mut calls = 0;
        let outcome = search
            .run(|_| {
                calls += 1;
                async { Ok::<_, ()>(Counts::from_pairs([("0001", 60), ("1111", 40)])) }
            })
            .await
            .unwrap();

        assert_eq!(calls, 4);
        assert_eq!(
            outcome,
            SearchOutcome::Exhausted {
                last_guess: Some("0001".into()),
                attempts: 4
            }
        );
    }

    #[tokio::test]
    async fn test_zero_attempts() {
        let search = PasswordSearch::new("1").with_max_attempts(0);
        let outcome = search
            .run(|_| async { Ok::<_, ()>(Counts::from_pairs([("1", 1)])) })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::Exhausted {
                last_guess: None,
                attempts: 0
            }
        );
    }

    #[tokio::test]
    async fn test_error_stops_search() {
        let search = PasswordSearch::new("1");
        let result = search
            .run(|n| async move {
                if n == 2 {
                    Err("backend offline")
                } else {
                    Ok(Counts::from_pairs([("0", 1)]))
                }
            })
            .await;
        assert_eq!(result, Err("backend offline"));
    }
}
