//! Hand evaluation command.
//!
//! Ranks five cards given on the command line, e.g.
//! `fivedraw eval AS KS QS JS 10S`, and reports the category with its base
//! payout.

use crate::error::CliError;
use crate::formatters::{format_card, format_cash};
use crate::ui;
use crate::validation::parse_hand;
use fivedraw_engine::hand::evaluate;
use std::io::Write;

pub fn handle_eval_command(
    cards: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let hand = match parse_hand(cards) {
        Ok(hand) => hand,
        Err(msg) => {
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };
    let ranking = evaluate(&hand);

    let shown: Vec<String> = hand.iter().map(format_card).collect();
    writeln!(out, "Hand: {}", shown.join(" "))?;
    writeln!(out, "Category: {}", ranking.category.name())?;
    writeln!(out, "Base payout: {}", format_cash(ranking.base_payout))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_eval_royal_flush() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_eval_command(&args("AS KS QS JS 10S"), &mut out, &mut err).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Category: Royal Flush"));
        assert!(output.contains("Base payout: $2500"));
    }

    #[test]
    fn test_eval_wheel_is_a_straight() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_eval_command(&args("AD 2S 3H 4C 5D"), &mut out, &mut err).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Category: Straight\n"));
    }

    #[test]
    fn test_eval_low_pair_pays_nothing() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_eval_command(&args("10S 10H 2D 5C 8S"), &mut out, &mut err).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Low Pair"));
        assert!(output.contains("$0"));
    }

    #[test]
    fn test_eval_rejects_duplicates() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_eval_command(&args("AS AS KS QS JS"), &mut out, &mut err);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(String::from_utf8(err).unwrap().contains("duplicate"));
    }
}
