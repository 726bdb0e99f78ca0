use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Handle")]
    pub handle: String,
    #[serde(rename = "Problems Solved")]
    pub solved: u32,
    #[serde(rename = "Submission Link", default)]
    pub link: String,
    #[serde(rename = "Day Number")]
    pub day: u32,
}

/// Append-mostly record of every active (date, handle) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyLog {
    entries: Vec<LogEntry>,
}

impl DailyLog {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::read_from(std::fs::File::open(path)?)
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let entries = rdr.deserialize().collect::<std::result::Result<Vec<LogEntry>, _>>()?;
        Ok(Self { entries })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.write_to(std::fs::File::create(path)?)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(["Date", "Handle", "Problems Solved", "Submission Link", "Day Number"])?;
        for entry in &self.entries {
            wtr.serialize(entry)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Merge one observation. Existing rows keep the larger count; new rows are only
    /// added for active days, so a zero is represented by absence.
    pub fn record(&mut self, entry: LogEntry) {
        let existing =
            self.entries.iter_mut().find(|e| e.date == entry.date && e.handle == entry.handle);

        match existing {
            Some(e) => {
                e.solved = e.solved.max(entry.solved);
                if entry.solved > 0 && e.link.is_empty() {
                    e.link = entry.link;
                }
            }
            None if entry.solved > 0 => self.entries.push(entry),
            None => {}
        }
    }

    pub fn solved_on(&self, handle: &str, date: NaiveDate) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.handle == handle && e.date == date)
            .map(|e| e.solved)
            .max()
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}
