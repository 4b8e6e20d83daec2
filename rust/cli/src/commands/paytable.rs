use crate::error::CliError;
use crate::formatters::{format_cash, format_paytable};
use crate::ui;
use fivedraw_engine::bankroll::BET_STEP;
use std::io::Write;

/// Print the fixed paytable scaled to `bet`.
pub fn handle_paytable_command(
    bet: u32,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if bet == 0 || bet % BET_STEP != 0 {
        let msg = format!("bet must be a positive multiple of {}", BET_STEP);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    writeln!(out, "Paytable at {}", format_cash(bet))?;
    writeln!(out, "{}", format_paytable(bet, None))?;
    Ok(())
}
