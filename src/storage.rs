// THEORY:
// The `storage` module is the persistence collaborator: an append-only record
// file owned by a single actor task. Callers hold a cheap `RecordStore`
// handle and talk to the actor over a message channel with oneshot replies,
// so appends are serialized by construction and no two tasks ever contend
// for the file.
//
// Key architectural principles:
// 1.  **Single Owner**: The actor task is the only code that touches the
//     file. The handle clones freely; the file handle never does.
// 2.  **Append-Only Contract**: A record is written exactly once, after a
//     complete result exists. The header row is written only when the file
//     is first created. Reads return the full history filtered by the
//     normalized patient name, ordered by timestamp.
// 3.  **Explicit Lifecycle**: A `Shutdown` message ends the actor; dropping
//     the last handle sends it best-effort, mirroring how the engine shuts
//     down its workers elsewhere.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::error::StorageError;
use crate::pipeline::{PatientProfile, ScreeningResult};

/// Timestamp format used in records. Lexicographic order equals
/// chronological order for this format, which the history sort relies on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const HEADER: &str = "Timestamp,Name,Display_Name,Age,Gender,Diet,Hb_Level,Status";
const FIELD_COUNT: usize = 8;
const CHANNEL_CAPACITY: usize = 16;

/// The flat record persisted for one completed screening run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningRecord {
    /// Local time of the run, formatted with `TIMESTAMP_FORMAT`.
    pub timestamp: String,
    /// Normalized (trimmed, lowercased) name; the history key.
    pub name: String,
    /// Trimmed name as entered, for display.
    pub display_name: String,
    pub age: u32,
    pub gender: String,
    pub diet: String,
    pub hb_level: f64,
    pub status: String,
}

impl ScreeningRecord {
    /// Builds the record for a finished run, stamped with the current time.
    pub fn from_screening(patient: &PatientProfile, result: &ScreeningResult) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            name: patient.normalized_name(),
            display_name: patient.display_name(),
            age: patient.age,
            gender: patient.gender.as_str().to_string(),
            diet: patient.diet.as_str().to_string(),
            hb_level: result.hb_value,
            status: result.status_label.to_string(),
        }
    }
}

/// Message type for the record store actor.
enum StoreMessage {
    Append(
        ScreeningRecord,
        oneshot::Sender<Result<(), StorageError>>,
    ),
    History(
        String,
        oneshot::Sender<Result<Vec<ScreeningRecord>, StorageError>>,
    ),
    Shutdown,
}

/// Handle to the actor task that owns the record file.
#[derive(Clone)]
pub struct RecordStore {
    tx: mpsc::Sender<StoreMessage>,
}

impl RecordStore {
    /// Spawns the owning actor for the given record file path.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, mut rx) = mpsc::channel::<StoreMessage>(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    StoreMessage::Append(record, reply) => {
                        let _ = reply.send(append_record(&path, &record));
                    }
                    StoreMessage::History(name, reply) => {
                        let _ = reply.send(read_history(&path, &name));
                    }
                    StoreMessage::Shutdown => break,
                }
            }
        });

        Self { tx }
    }

    /// Appends one record; resolves once the write is flushed.
    pub async fn append(&self, record: ScreeningRecord) -> Result<(), StorageError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StoreMessage::Append(record, reply_tx))
            .await
            .map_err(|_| StorageError::StoreClosed)?;
        reply_rx.await.map_err(|_| StorageError::StoreClosed)?
    }

    /// All records for a normalized patient name, ordered by timestamp.
    pub async fn history(&self, name: &str) -> Result<Vec<ScreeningRecord>, StorageError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StoreMessage::History(name.to_string(), reply_tx))
            .await
            .map_err(|_| StorageError::StoreClosed)?;
        reply_rx.await.map_err(|_| StorageError::StoreClosed)?
    }

    /// Ends the actor after the messages already queued are processed.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(StoreMessage::Shutdown).await;
    }
}

impl Drop for RecordStore {
    fn drop(&mut self) {
        // Best effort shutdown on drop.
        let _ = self.tx.try_send(StoreMessage::Shutdown);
    }
}

fn append_record(path: &Path, record: &ScreeningRecord) -> Result<(), StorageError> {
    let is_new = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(StorageError::Open)?;
    let mut writer = BufWriter::new(file);

    if is_new {
        writeln!(writer, "{HEADER}").map_err(StorageError::Append)?;
    }
    writeln!(writer, "{}", render_row(record)).map_err(StorageError::Append)?;
    writer.flush().map_err(StorageError::Append)
}

fn read_history(path: &Path, name: &str) -> Result<Vec<ScreeningRecord>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = std::fs::File::open(path).map_err(StorageError::Open)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(StorageError::Read)?;
        if index == 0 || line.is_empty() {
            continue;
        }
        let record = parse_row(&line, index + 1)?;
        if record.name == name {
            records.push(record);
        }
    }

    records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    Ok(records)
}

fn render_row(record: &ScreeningRecord) -> String {
    [
        quote_field(&record.timestamp),
        quote_field(&record.name),
        quote_field(&record.display_name),
        record.age.to_string(),
        quote_field(&record.gender),
        quote_field(&record.diet),
        record.hb_level.to_string(),
        quote_field(&record.status),
    ]
    .join(",")
}

/// Minimal CSV quoting: only fields containing a comma or quote are wrapped.
fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

fn parse_row(line: &str, line_number: usize) -> Result<ScreeningRecord, StorageError> {
    let fields = split_row(line);
    if fields.len() != FIELD_COUNT {
        return Err(StorageError::MalformedRecord {
            line: line_number,
            reason: format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        });
    }

    let age = fields[3]
        .parse::<u32>()
        .map_err(|e| StorageError::MalformedRecord {
            line: line_number,
            reason: format!("bad age: {e}"),
        })?;
    let hb_level = fields[6]
        .parse::<f64>()
        .map_err(|e| StorageError::MalformedRecord {
            line: line_number,
            reason: format!("bad hb value: {e}"),
        })?;

    Ok(ScreeningRecord {
        timestamp: fields[0].clone(),
        name: fields[1].clone(),
        display_name: fields[2].clone(),
        age,
        gender: fields[4].clone(),
        diet: fields[5].clone(),
        hb_level,
        status: fields[7].clone(),
    })
}
