//! Interactive console on stdin/stdout.

use crate::table;
use dialoguer::Input;
use dice_duel_core::protocol::Purpose;
use dice_duel_core::{
    Console, DicePool, Event, Outcome, Player, ProbabilityMatrix, Prompt, Reply,
};
use std::io::{self, BufRead, IsTerminal, Write};

/// Human player at a terminal
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn request_choice(&mut self, prompt: Prompt, options: &[String]) -> io::Result<Reply> {
        println!("{}", heading(prompt));
        for (i, option) in options.iter().enumerate() {
            println!("{} - {}", i, option);
        }
        println!("X - exit");
        println!("? - help");

        Ok(parse_reply(&read_selection()?))
    }

    fn show_probabilities(&mut self, pool: &DicePool, matrix: &ProbabilityMatrix) -> io::Result<()> {
        println!("Probability of the win for the user:");
        println!("{}", table::render(pool, matrix));
        Ok(())
    }

    fn notify(&mut self, event: &Event) -> io::Result<()> {
        if let Some(line) = describe(event) {
            println!("{}", line);
        }
        Ok(())
    }
}

/// Interactive prompt on a terminal, plain lines when input is piped
fn read_selection() -> io::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Input::new()
            .with_prompt("Your selection")
            .allow_empty(true)
            .report(false)
            .interact_text()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()));
    }
    print!("Your selection: ");
    io::stdout().flush()?;
    read_line(&mut stdin.lock())
}

/// Next line of `reader`; running out of input is an error
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line)
}

/// Reserved tokens first, then a menu index
pub fn parse_reply(input: &str) -> Reply {
    match input.trim() {
        "?" => Reply::Help,
        "x" | "X" => Reply::Exit,
        other => other
            .parse()
            .map(Reply::Pick)
            .unwrap_or_else(|_| Reply::Unrecognized(other.to_string())),
    }
}

fn heading(prompt: Prompt) -> String {
    match prompt {
        Prompt::GuessTurn => "Try to guess my selection.".to_string(),
        Prompt::ChooseDie => "Choose your dice:".to_string(),
        Prompt::AddModulo(m) => format!("Add your number modulo {}.", m),
    }
}

/// Status line for `event`, if it has one
pub fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::Started { .. } => return None,
        Event::Committed {
            purpose,
            bound,
            digest,
        } => {
            let intro = match purpose {
                Purpose::TurnOrder => "Let's determine who makes the first move.",
                Purpose::Throw(Player::Computer) => "It's time for my throw.",
                Purpose::Throw(Player::User) => "It's time for your throw.",
            };
            format!(
                "{}\nI selected a random value in the range 0..{}\n(HMAC={}).",
                intro,
                bound.saturating_sub(1),
                digest
            )
        }
        Event::Revealed {
            purpose: Purpose::TurnOrder,
            value,
            key,
        } => format!("My selection: {} (KEY={}).", value, key),
        Event::Revealed { value, key, .. } => format!("My number is {} (KEY={}).", value, key),
        Event::FirstMove(Player::User) => "You make the first move.".to_string(),
        Event::FirstMove(Player::Computer) => "I make the first move.".to_string(),
        Event::DieChosen {
            player: Player::User,
            die,
            ..
        } => format!("You choose the [{}] dice.", die),
        Event::DieChosen {
            player: Player::Computer,
            die,
            ..
        } => format!("I choose the [{}] dice.", die),
        Event::Sum {
            committed,
            contribution,
            modulus,
            result,
            ..
        } => format!(
            "The result is {} + {} = {} (mod {}).",
            committed, contribution, result, modulus
        ),
        Event::Throw {
            player: Player::Computer,
            face,
        } => format!("My throw is {}.", face),
        Event::Throw {
            player: Player::User,
            face,
        } => format!("Your throw is {}.", face),
        Event::Rejected { input, options } => format!(
            "Your choice '{}' is not correct! Pick 0..{}, X or ?:",
            input,
            options.saturating_sub(1)
        ),
        Event::Finished(verdict) => {
            let (user, computer) = (verdict.user_face, verdict.computer_face);
            let symbol = verdict.rule.symbol();
            match verdict.outcome {
                Outcome::UserWins => format!("You win ({} {} {})!", user, symbol, computer),
                Outcome::ComputerWins => format!("I win ({} {} {})!", computer, symbol, user),
                Outcome::Draw => format!("Draw ({} = {})!", user, computer),
            }
        }
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_duel_core::{Digest, Verdict, WinRule};

    #[test]
    fn test_parse_reply() {
        assert_eq!(parse_reply("3"), Reply::Pick(3));
        assert_eq!(parse_reply(" 0 \n"), Reply::Pick(0));
        assert_eq!(parse_reply("?"), Reply::Help);
        assert_eq!(parse_reply("x"), Reply::Exit);
        assert_eq!(parse_reply("X"), Reply::Exit);
        assert_eq!(parse_reply("-1"), Reply::Unrecognized("-1".to_string()));
        assert_eq!(parse_reply(""), Reply::Unrecognized(String::new()));
    }

    #[test]
    fn test_piped_lines_become_replies() {
        let mut input = io::Cursor::new("1\n?\nX\n");
        assert_eq!(parse_reply(&read_line(&mut input).unwrap()), Reply::Pick(1));
        assert_eq!(parse_reply(&read_line(&mut input).unwrap()), Reply::Help);
        assert_eq!(parse_reply(&read_line(&mut input).unwrap()), Reply::Exit);

        let err = read_line(&mut input).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut input = io::Cursor::new("4");
        assert_eq!(parse_reply(&read_line(&mut input).unwrap()), Reply::Pick(4));
    }

    #[test]
    fn test_commitment_line_shows_range_and_digest() {
        let line = describe(&Event::Committed {
            purpose: Purpose::Throw(Player::Computer),
            bound: 6,
            digest: Digest::from_bytes([0xab; 32]),
        })
        .unwrap();
        assert!(line.starts_with("It's time for my throw."));
        assert!(line.contains("range 0..5"));
        assert!(line.contains(&format!("(HMAC={}).", "AB".repeat(32))));
    }

    #[test]
    fn test_outcome_messages_follow_rule() {
        let higher = Verdict::new(3, 5, WinRule::Higher);
        assert_eq!(describe(&Event::Finished(higher)).unwrap(), "You win (5 > 3)!");

        let lower = Verdict::new(3, 5, WinRule::Lower);
        assert_eq!(describe(&Event::Finished(lower)).unwrap(), "I win (3 < 5)!");

        let draw = Verdict::new(4, 4, WinRule::Higher);
        assert_eq!(describe(&Event::Finished(draw)).unwrap(), "Draw (4 = 4)!");
    }

    #[test]
    fn test_started_is_silent() {
        let event = Event::Started {
            duel_id: dice_duel_core::DuelId::new(),
            dice: 3,
        };
        assert!(describe(&event).is_none());
    }
}
