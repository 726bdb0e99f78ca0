use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Result, TrackerError};

const HANDLE: &str = "Handle";
const TOTAL: &str = "Total Solved";
const LAST_UPDATED: &str = "Last Updated";
const STREAK: &str = "Day Streak";
const TODAY: &str = "Today Solved";
const LINK: &str = "Submission Link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgress {
    pub handle: String,
    pub total_solved: u32,
    pub last_updated: Option<NaiveDate>,
    pub day_streak: u32,
    pub today_solved: u32,
    pub submission_link: String,
    /// One cell per challenge day; index 0 is day 1.
    pub attendance: Vec<bool>,
}

impl UserProgress {
    pub fn new(handle: &str, total_days: u32) -> Self {
        Self {
            handle: handle.to_string(),
            total_solved: 0,
            last_updated: None,
            day_streak: 0,
            today_solved: 0,
            submission_link: String::new(),
            attendance: vec![false; total_days as usize],
        }
    }

    pub fn attended(&self, day: u32) -> bool {
        day >= 1 && self.attendance.get(day as usize - 1).copied().unwrap_or(false)
    }

    pub fn set_attended(&mut self, day: u32, value: bool) {
        if let Some(cell) = day.checked_sub(1).and_then(|i| self.attendance.get_mut(i as usize)) {
            *cell = value;
        }
    }

    pub fn days_attended(&self) -> usize {
        self.attendance.iter().filter(|&&a| a).count()
    }
}

/// All users' durable state, in the order they were first tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressBook {
    users: Vec<UserProgress>,
    total_days: u32,
}

impl ProgressBook {
    pub fn new(total_days: u32) -> Self {
        Self { users: Vec::new(), total_days }
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    pub fn get(&self, handle: &str) -> Option<&UserProgress> {
        self.users.iter().find(|u| u.handle == handle)
    }

    pub fn get_mut(&mut self, handle: &str) -> Option<&mut UserProgress> {
        self.users.iter_mut().find(|u| u.handle == handle)
    }

    pub fn insert(&mut self, user: UserProgress) {
        match self.get_mut(&user.handle) {
            Some(existing) => *existing = user,
            None => self.users.push(user),
        }
    }

    pub fn users(&self) -> &[UserProgress] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Read the progress CSV; a missing file yields an empty book.
    pub fn load(path: &Path, total_days: u32) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new(total_days));
        }
        let file = std::fs::File::open(path)?;
        Self::read_from(file, total_days, &path.display().to_string())
    }

    pub fn read_from<R: Read>(reader: R, total_days: u32, name: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let col = |name: &str| headers.iter().position(|h| h.trim() == name);

        let handle_col = col(HANDLE).ok_or_else(|| TrackerError::Corrupt {
            file: name.to_string(),
            row: 1,
            reason: format!("missing '{HANDLE}' column"),
        })?;
        let (total_col, updated_col, streak_col, today_col, link_col) =
            (col(TOTAL), col(LAST_UPDATED), col(STREAK), col(TODAY), col(LINK));
        let day_cols: Vec<(u32, usize)> = headers
            .iter()
            .enumerate()
            .filter_map(|(i, h)| {
                let day: u32 = h.trim().strip_prefix("Day ")?.parse().ok()?;
                (1..=total_days).contains(&day).then_some((day, i))
            })
            .collect();

        let mut book = Self::new(total_days);
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row = i + 2;
            let corrupt =
                |reason: String| TrackerError::Corrupt { file: name.to_string(), row, reason };
            let cell = |c: Option<usize>| c.and_then(|c| record.get(c)).map(str::trim).unwrap_or("");
            let number = |c: Option<usize>, label: &str| -> Result<u32> {
                let raw = cell(c);
                if raw.is_empty() {
                    return Ok(0);
                }
                raw.parse().map_err(|_| corrupt(format!("bad {label} '{raw}'")))
            };

            let handle = cell(Some(handle_col));
            if handle.is_empty() {
                continue;
            }

            let mut user = UserProgress::new(handle, total_days);
            user.total_solved = number(total_col, TOTAL)?;
            user.day_streak = number(streak_col, STREAK)?;
            user.today_solved = number(today_col, TODAY)?;
            user.submission_link = cell(link_col).to_string();
            user.last_updated = match cell(updated_col) {
                "" => None,
                raw => Some(raw.parse().map_err(|_| corrupt(format!("bad date '{raw}'")))?),
            };
            for &(day, c) in &day_cols {
                user.set_attended(day, cell(Some(c)) == "1");
            }
            book.insert(user);
        }

        Ok(book)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(file)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header: Vec<String> =
            [HANDLE, TOTAL, LAST_UPDATED, STREAK, TODAY, LINK].map(String::from).to_vec();
        header.extend((1..=self.total_days).map(|d| format!("Day {d}")));
        wtr.write_record(&header)?;

        for u in &self.users {
            let mut row = vec![
                u.handle.clone(),
                u.total_solved.to_string(),
                u.last_updated.map(|d| d.to_string()).unwrap_or_default(),
                u.day_streak.to_string(),
                u.today_solved.to_string(),
                u.submission_link.clone(),
            ];
            row.extend((1..=self.total_days).map(|d| String::from(if u.attended(d) { "1" } else { "0" })));
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
