//! UI helper functions for terminal output formatting.

use rand::Rng;
use rand::seq::IndexedRandom;
use std::io::Write;

/// Lines shown under the emergency loan message.
pub const TAUNTS: [&str; 6] = [
    "You must be new to this game!",
    "Maybe you are lucky in other ways!",
    "Have you thought about other hobbies?",
    "Therapy might be cheaper!",
    "Better luck next time.",
    "Deposit car keys now.",
];

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Terminal bell plus a short notice for a rejected command.
pub fn beep(err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "\x07Invalid action")
}

pub fn pick_taunt<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TAUNTS.choose(rng).copied().unwrap_or(TAUNTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn beep_rings_the_bell() {
        let mut err = Vec::new();
        beep(&mut err).unwrap();
        let text = String::from_utf8(err).unwrap();
        assert!(text.starts_with('\x07'));
        assert!(text.contains("Invalid action"));
    }

    #[test]
    fn taunts_come_from_the_list() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(TAUNTS.contains(&pick_taunt(&mut rng)));
        }
    }
}
