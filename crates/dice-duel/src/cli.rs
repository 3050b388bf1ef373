//! Command-line arguments.

use clap::Parser;
use dice_duel_core::duel::DEFAULT_MAX_ATTEMPTS;
use dice_duel_core::WinRule;

#[derive(Debug, Parser)]
#[command(
    name = "dice-duel",
    version,
    about = "A verifiably fair duel with non-transitive dice",
    after_help = "Example: dice-duel 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7"
)]
pub struct Args {
    /// Dice, each six comma-separated integers (at least three dice)
    #[arg(value_name = "DIE", allow_hyphen_values = true)]
    pub dice: Vec<String>,

    /// Which face value wins a throw: higher or lower
    #[arg(long, env = "DICE_DUEL_WIN_RULE", default_value = "higher")]
    pub win_rule: WinRule,

    /// Invalid replies tolerated per menu before giving up
    #[arg(long, env = "DICE_DUEL_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Print the win probability table and exit
    #[arg(long)]
    pub table: bool,

    /// Print the JSON verification transcript after the duel
    #[arg(long)]
    pub transcript: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dice_and_defaults() {
        let args = Args::try_parse_from(["dice-duel", "1,2,3,4,5,6", "2,2,2,2,2,2", "3,3,3,3,3,3"]).unwrap();
        assert_eq!(args.dice.len(), 3);
        assert_eq!(args.win_rule, WinRule::Higher);
        assert_eq!(args.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(!args.table);
    }

    #[test]
    fn test_negative_faces_are_dice() {
        let args = Args::try_parse_from(["dice-duel", "--win-rule", "lower", "-1,0,1,2,3,4"]).unwrap();
        assert_eq!(args.dice, vec!["-1,0,1,2,3,4"]);
        assert_eq!(args.win_rule, WinRule::Lower);
    }

    #[test]
    fn test_unknown_win_rule() {
        assert!(Args::try_parse_from(["dice-duel", "--win-rule", "sideways"]).is_err());
    }
}
