//! Repeated Grover runs until the password shows up as the majority outcome.

use qlab_decode::{PasswordSearch, SearchOutcome};
use qlab_hal::{Executor, Target};

use crate::circuits::search::{Password, password_search_circuit};
use crate::error::DemoResult;

/// Search for `password` on `target`, at most `max_attempts` times.
pub async fn run_password_search(
    executor: &Executor,
    target: &Target,
    password: Password,
    max_attempts: u32,
    shots: u32,
) -> DemoResult<SearchOutcome> {
    let circuit = password_search_circuit(password)?;
    let circuit = &circuit;
    let search = PasswordSearch::new(password.bitstring()).with_max_attempts(max_attempts);

    let outcome = search
        .run(move |_| async move {
            executor
                .execute(target, circuit, shots)
                .await
                .map(|result| result.counts)
        })
        .await?;
    Ok(outcome)
}
