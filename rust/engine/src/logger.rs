use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::events::GameEvent;
use crate::hand::{Category, HAND_SIZE};

/// One settled round, serialized as a single JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Seed of the session deck
    pub seed: Option<u64>,
    /// Final five cards
    pub hand: Vec<Card>,
    /// Hold flags at the moment of the draw
    pub held: [bool; HAND_SIZE],
    pub category: Category,
    pub payout: u32,
    pub bet: u32,
    /// Balance after settlement
    pub balance: u32,
    #[serde(default)]
    pub bailout: bool,
    /// Diagnostic rounds are never settled against the bankroll.
    #[serde(default)]
    pub diagnostic: bool,
    /// Timestamp when the round was resolved (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    /// Builds a record from a `RoundResolved` event; any other event yields `None`.
    pub fn from_event(round_id: String, seed: Option<u64>, event: &GameEvent) -> Option<Self> {
        let GameEvent::RoundResolved {
            category,
            payout,
            bet,
            bailout,
            diagnostic,
            snapshot,
        } = event
        else {
            return None;
        };
        Some(Self {
            round_id,
            seed,
            hand: snapshot.hand.iter().flatten().copied().collect(),
            held: snapshot.holds,
            category: *category,
            payout: *payout,
            bet: *bet,
            balance: snapshot.balance,
            bailout: *bailout,
            diagnostic: *diagnostic,
            ts: None,
        })
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Append-only JSONL round history.
pub struct RoundLogger {
    writer: Option<BufWriter<std::fs::File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger without a backing file; ids start from `date`.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
