//! Dice Duel
//!
//! Terminal game against the computer with non-transitive dice. Every random
//! value the computer contributes is committed with HMAC-SHA256 before the
//! user answers, and revealed afterwards so the user can verify it.

mod cli;
mod table;
mod terminal;

use clap::Parser;
use cli::Args;
use dice_duel_core::{Conclusion, DicePool, Duel, DuelConfig, ProbabilityMatrix};
use std::process::ExitCode;
use terminal::Terminal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let pool = match DicePool::parse(&args.dice[..]) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Example: dice-duel 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7");
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };

    if args.max_attempts == 0 {
        eprintln!("Error: --max-attempts must be at least 1");
        return ExitCode::from(EXIT_INVALID_INPUT);
    }

    if args.table {
        let matrix = ProbabilityMatrix::compute(&pool);
        println!("Probability of the win for the user:");
        println!("{}", table::render(&pool, &matrix));
        return ExitCode::SUCCESS;
    }

    let config = DuelConfig {
        win_rule: args.win_rule,
        max_attempts: args.max_attempts,
    };

    let mut console = Terminal;
    let conclusion = Duel::new(&pool, &mut console).with_config(config).run();

    match conclusion {
        Ok(Conclusion::Exited { phase, .. }) => {
            info!(phase, "duel exited by user");
            println!("The game is exited");
            ExitCode::SUCCESS
        }
        Ok(Conclusion::Finished { transcript, .. }) => {
            if args.transcript {
                match transcript.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!(error = %e, "transcript serialization failed");
                        eprintln!("Error: {}", e);
                        return ExitCode::from(EXIT_FAILURE);
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "duel aborted");
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
