//! Fly Unicorn game command.

use std::io;

use anyhow::{Result, bail};

use qlab_demos::print_success;
use qlab_demos::runners::{GameOutcome, UnicornGame};

use super::common::{BackendChoice, RunOptions, announce, open_session};

/// Play the game on stdin and stdout.
pub async fn execute(options: &RunOptions<'_>) -> Result<()> {
    if options.backend == BackendChoice::Both {
        bail!("The unicorn game is interactive; pick --backend sim or --backend real");
    }

    println!("===============");
    println!("  Fly Unicorn");
    println!("===============");
    println!();
    println!("Your majestic unicorn is ready for flight!");
    println!(
        "After a long night of preparation and celebration, it's time to visit the castle in the clouds."
    );
    println!(
        "Use your keyboard to fly up or down on a quantum computer, as you ascend your way into the castle."
    );
    println!();

    let session = open_session(options).await?;
    let Some(target) = session.targets.first() else {
        bail!("No backend selected");
    };
    announce(target);

    let mut game = UnicornGame::new(target.is_hardware());
    let outcome = game
        .play(&session.executor, target, io::stdin().lock(), io::stdout().lock())
        .await?;

    match outcome {
        GameOutcome::Won { turns } => {
            print_success(&format!("Reached the castle in {turns} turn(s)"));
        }
        GameOutcome::Quit { altitude } => println!("\nLanded at {altitude} feet. Goodbye!"),
    }
    Ok(())
}
