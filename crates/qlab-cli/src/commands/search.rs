//! Password search command.

use anyhow::{Context, Result};
use console::style;

use qlab_decode::SearchOutcome;
use qlab_demos::circuits::Password;
use qlab_demos::runners::run_password_search;
use qlab_demos::{create_spinner, print_header, print_result, print_success, print_warning};

use super::common::{RunOptions, announce, open_session};

/// Parse a four-character binary password such as `0110`.
pub fn parse_password(s: &str) -> Result<u8, String> {
    if s.len() != 4 || !s.chars().all(|c| c == '0' || c == '1') {
        return Err(format!("expected four binary digits, got '{s}'"));
    }
    u8::from_str_radix(s, 2).map_err(|e| e.to_string())
}

/// Hide a password in an oracle and search for it with Grover's algorithm.
pub async fn execute(
    options: &RunOptions<'_>,
    password: Option<u8>,
    max_attempts: u32,
    shots: u32,
) -> Result<()> {
    print_header("Password Search");
    let password = match password {
        Some(value) => Password::new(value)?,
        None => Password::random(&mut options.rng()),
    };
    println!("The oracle password is {}.", password.bitstring());
    print_result("Max attempts", max_attempts);

    let session = open_session(options).await?;

    for target in &session.targets {
        announce(target);
        let spinner = create_spinner("Searching...");
        let outcome =
            run_password_search(&session.executor, target, password, max_attempts, shots).await;
        spinner.finish_and_clear();
        let outcome = outcome.with_context(|| format!("Search on {} failed", target.name))?;

        match outcome {
            SearchOutcome::Found { guess, attempts } => print_success(&format!(
                "Found password {} after {attempts} attempt(s)",
                style(guess).green().bold()
            )),
            SearchOutcome::Exhausted {
                last_guess,
                attempts,
            } => print_warning(&format!(
                "No match after {attempts} attempt(s); last guess {}",
                last_guess.as_deref().unwrap_or("none")
            )),
        }
    }
    Ok(())
}
