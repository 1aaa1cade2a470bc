//! Hand history as JSON Lines.
//!
//! One [`HandRecord`] per line, LF terminated, ids of the form
//! `YYYYMMDD-NNNNNN`. Records are plain serde values so a replay tool can
//! read them back without the engine.

use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::cards::Card;
use crate::deck::CardSource;
use crate::engine::{Engine, Street};

/// One accepted action, blinds included.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat that acted
    pub player_id: usize,
    pub street: Street,
    /// As submitted; a posted blind appears as a bet of the posted amount
    pub action: Action,
}

/// Everything needed to replay or audit a settled hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_id: String,
    /// Shuffle seed, absent for stacked or external decks
    pub seed: Option<u64>,
    pub actions: Vec<ActionRecord>,
    /// Community cards dealt before the hand ended
    pub board: Vec<Card>,
    /// Human readable payouts, e.g. `"alice wins 40"`
    pub result: Option<String>,
    /// RFC3339, filled in by [`HandLogger::write`] when missing
    #[serde(default)]
    pub ts: Option<String>,
    /// Table details such as dealer seat and blinds
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

/// Outcome of a hand that reached showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Seats that won the main pot
    pub winners: Vec<usize>,
    /// Winning hand, e.g. `"Flush (As Ks Qs 9s 4s)"`
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{yyyymmdd}-{seq:06}")
}

/// Appends hand records to a file and numbers hands within one day.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    /// Truncates or creates `path`, making parent directories as needed.
    /// Hand ids carry today's UTC date.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all(parent)?;
        }
        Ok(Self {
            writer: Some(BufWriter::new(File::create(path)?)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Hands out ids for `date` without writing anywhere.
    pub fn ids_only(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> io::Result<()> {
        let Some(w) = self.writer.as_mut() else {
            return Ok(());
        };
        let line = if record.ts.is_some() {
            serde_json::to_string(record)
        } else {
            let stamped = HandRecord {
                ts: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                ..record.clone()
            };
            serde_json::to_string(&stamped)
        }
        .map_err(io::Error::other)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()
    }

    /// Logs the engine's last settled hand under a fresh id.
    ///
    /// Returns the id used, or `None` when no hand has been settled yet.
    pub fn log_hand<D: CardSource>(&mut self, engine: &Engine<D>) -> io::Result<Option<String>> {
        if engine.settlement().is_none() {
            return Ok(None);
        }
        let id = self.next_id();
        if let Some(record) = engine.hand_record(id.clone()) {
            self.write(&record)?;
        }
        Ok(Some(id))
    }
}
