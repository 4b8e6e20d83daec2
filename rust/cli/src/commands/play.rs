//! # Play Command
//!
//! Interactive video poker session in the terminal.
//!
//! Each input line is one key press of the original game: Enter for the
//! Deal / Draw / Next button, `1`-`5` to toggle holds, `+`/`-` for the bet,
//! `z` for the hidden test mode and `r` to reset the session. The engine
//! runs its reveal steps on a virtual clock; with `--animate` the session
//! sleeps until every deadline so cards turn over one by one, otherwise the
//! reveals are flushed immediately.
//!
//! ## Features
//!
//! - Rejected commands ring the terminal bell and leave the state untouched
//! - Bailouts show the emergency loan with a random taunt
//! - Optional JSONL history of every resolved round
//! - Graceful quit on `q` or end of input

use crate::accept_or_beep;
use crate::error::CliError;
use crate::formatters::{format_card, format_cash, format_hand, format_paytable, format_status};
use crate::formatters::{phase_message, result_message};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, SessionInput, parse_session_input};
use fivedraw_engine::engine::Engine;
use fivedraw_engine::events::{EventSubscription, GameEvent};
use fivedraw_engine::logger::{RoundLogger, RoundRecord};
use fivedraw_engine::reveal::RevealTiming;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::{BufRead, Write};

const HELP: &str = "\
Keys (type one and press Enter):
  Enter / d   deal, draw or next hand
  1-5         toggle HOLD on a card
  + / -       raise / lower the bet by $10
  z           secret test mode (after a round)
  r           reset the session
  p           show the paytable
  h           this help
  q           quit";

/// Resolved settings for one session; command-line flags already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOptions {
    pub seed: Option<u64>,
    pub animate: bool,
    /// Percent of normal reveal speed
    pub speed: u32,
    pub history: Option<String>,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            seed: None,
            animate: false,
            speed: 100,
            history: None,
        }
    }
}

/// Handle the play command: run one interactive session until quit or EOF.
///
/// # Examples
///
/// ```ignore
/// use std::io::Cursor;
/// let mut input = Cursor::new("\n\nq\n");
/// handle_play_command(PlayOptions::default(), &mut out, &mut err, &mut input)?;
/// ```
pub fn handle_play_command(
    opts: PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let timing = RevealTiming::default().scaled(opts.speed);
    let mut engine = Engine::with_timing(opts.seed, timing);
    let events = engine.subscribe();
    let mut history = match &opts.history {
        Some(path) => Some(RoundLogger::create(path)?),
        None => None,
    };
    let mut session = Session {
        taunts: ChaCha20Rng::seed_from_u64(engine.seed()),
        rounds: 0,
        seed: engine.seed(),
        animate: opts.animate,
    };

    tracing::info!(seed = engine.seed(), animate = opts.animate, speed = opts.speed, "play session started");
    writeln!(out, "play: seed={}", engine.seed())?;
    writeln!(out, "{}", format_status(&engine.snapshot()))?;
    writeln!(out, "Type h for help.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            break;
        };
        let input = match parse_session_input(&line) {
            ParseResult::Input(input) => input,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };

        let mut notice: Option<(String, String)> = None;
        match input {
            SessionInput::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            SessionInput::Paytable => {
                let snap = engine.snapshot();
                let highlight = snap.last_ranking.map(|r| r.category);
                writeln!(out, "{}", format_paytable(snap.bet, highlight))?;
                continue;
            }
            SessionInput::Primary => accept_or_beep!(engine.press_primary(), err),
            SessionInput::Hold(slot) => accept_or_beep!(engine.toggle_hold(slot), err),
            SessionInput::Bet(direction) => accept_or_beep!(engine.adjust_bet(direction), err),
            SessionInput::ToggleDiagnostic => {
                if engine.snapshot().diagnostic {
                    accept_or_beep!(engine.exit_diagnostic(), err);
                    notice = Some((
                        "Secret test mode disabled.".to_string(),
                        "Press Enter for next hand, or Z to re-enable.".to_string(),
                    ));
                } else {
                    accept_or_beep!(engine.enter_diagnostic(), err);
                }
            }
            SessionInput::Reset => {
                accept_or_beep!(engine.reset_session(), err);
                notice = Some((
                    "Session reset.".to_string(),
                    "Press Enter to start a new game.".to_string(),
                ));
            }
        }

        let resolved = play_out(&mut engine, &events, &mut session, history.as_mut(), out)?;
        let snap = engine.snapshot();
        writeln!(out, "{}", format_hand(&snap))?;
        writeln!(out, "{}", format_status(&snap))?;
        let (main, sub) = resolved
            .or(notice)
            .unwrap_or_else(|| phase_message(snap.phase, snap.diagnostic));
        writeln!(out, "{}", main)?;
        writeln!(out, "{}", sub)?;
    }

    tracing::info!(rounds = session.rounds, balance = engine.balance(), "play session ended");
    writeln!(
        out,
        "Session over after {} rounds. Balance {}.",
        session.rounds,
        format_cash(engine.balance())
    )?;
    Ok(())
}

struct Session {
    taunts: ChaCha20Rng,
    rounds: u32,
    seed: u64,
    animate: bool,
}

/// Runs the reveal queue to the end and handles every notification it
/// produced. Returns the result lines if a round was resolved.
fn play_out(
    engine: &mut Engine,
    events: &EventSubscription,
    session: &mut Session,
    mut history: Option<&mut RoundLogger>,
    out: &mut dyn Write,
) -> Result<Option<(String, String)>, CliError> {
    let mut resolved = None;
    loop {
        if session.animate {
            if let Some(wait) = engine.next_deadline() {
                std::thread::sleep(wait);
                engine.tick(wait);
            }
        } else {
            engine.run_pending();
        }

        for event in events.drain() {
            match &event {
                GameEvent::CardRevealed { slot, card, .. } if session.animate => {
                    writeln!(out, "  card {}: {}", slot + 1, format_card(card))?;
                    out.flush()?;
                }
                GameEvent::RoundResolved { diagnostic, .. } => {
                    if !diagnostic {
                        session.rounds += 1;
                    }
                    let taunt = ui::pick_taunt(&mut session.taunts);
                    resolved = result_message(&event, taunt);
                    if let Some(logger) = history.as_deref_mut() {
                        let record = RoundRecord::from_event(logger.next_id(), Some(session.seed), &event);
                        if let Some(record) = record {
                            logger.write(&record)?;
                        }
                    }
                }
                _ => {}
            }
        }

        if engine.next_deadline().is_none() {
            return Ok(resolved);
        }
    }
}
