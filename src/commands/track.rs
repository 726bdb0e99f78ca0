use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use cf_hundred::codeforces::Client;
use cf_hundred::config::Settings;
use cf_hundred::daily_log::DailyLog;
use cf_hundred::progress::ProgressBook;
use cf_hundred::reconcile::Outcome;
use cf_hundred::{roster, summary, tracker};
use chrono::NaiveDate;

pub fn run(
    settings: &Settings,
    date: Option<NaiveDate>,
    yes: bool,
    dry_run: bool,
    notify: bool,
) -> Result<()> {
    let date = date.unwrap_or_else(|| settings.today());
    let window = &settings.window;

    println!("Starting 100-Day Codeforces Tracker");
    println!("Challenge Start Date: {}", window.start);
    println!("Fetching submissions for: {date}");
    println!("Current Day: {}\n", window.require_day(date)?);

    if notify {
        settings.require_webhook()?;
    }

    let handles = roster::load(&settings.roster)?;
    println!("Found {} handles: {}", handles.len(), handles.join(", "));

    let mut book = ProgressBook::load(&settings.progress, window.total_days)
        .with_context(|| format!("failed to read {}", settings.progress.display()))?;
    let mut log = DailyLog::load(&settings.daily_log)
        .with_context(|| format!("failed to read {}", settings.daily_log.display()))?;

    let client = Client::new(&settings.api_base, settings.fetch_count);
    let report = tracker::track(&client, settings, &handles, date, &mut book, &mut log, |i, h| {
        println!("Checking {h} ({i}/{})...", handles.len());
    })?;

    println!();
    print!("{}", summary::render_table(&report.rows, window, date));

    for (handle, outcome) in &report.outcomes {
        match outcome {
            Outcome::Refreshed => {
                println!("  {handle}: already tracked for {date}, kept the higher count");
            }
            Outcome::Backfilled => {
                println!("  {handle}: {date} is before the last update, only attendance was marked");
            }
            _ => {}
        }
    }

    if !report.failures.is_empty() {
        println!();
        for (handle, err) in &report.failures {
            println!("  FETCH FAILED: {handle}: {err}");
        }
    }

    if dry_run {
        println!("\nDry run: no files were updated.");
        return Ok(());
    }

    if !yes && !ask_save()? {
        println!("Changes discarded. No files were updated.");
        return Ok(());
    }

    println!("Saving progress data...");
    book.save(&settings.progress)?;
    log.save(&settings.daily_log)?;
    println!("Done! Results saved to:");
    println!("  - Progress file: {}", settings.progress.display());
    println!("  - Daily log: {}", settings.daily_log.display());

    if notify {
        super::notify::post(settings, &summary::render_message(&report.rows, window, date))?;
    }

    Ok(())
}

fn ask_save() -> Result<bool> {
    let stdin = io::stdin();
    loop {
        print!("\nDo you want to save these changes? (y/n): ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(false);
        }
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please enter 'y' or 'n'"),
        }
    }
}
