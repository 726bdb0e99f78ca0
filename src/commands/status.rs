use anyhow::Result;
use cf_hundred::config::Settings;
use cf_hundred::progress::{ProgressBook, UserProgress};
use cf_hundred::{roster, summary};
use chrono::NaiveDate;

pub fn run(settings: &Settings, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(|| settings.today());
    let window = &settings.window;
    let handles = roster::load(&settings.roster)?;
    let book = ProgressBook::load(&settings.progress, window.total_days)?;

    let rows = summary::rows(&book, &handles, date);
    print!("{}", summary::render_table(&rows, window, date));

    let elapsed = window.days_through(date).count();
    println!();
    println!("{:<20} {:>8}", "Handle", "Attended");
    println!("{}", "-".repeat(29));
    for handle in &handles {
        let attended = book.get(handle).map_or(0, UserProgress::days_attended);
        println!("{handle:<20} {attended:>3}/{elapsed:<4}");
    }

    let untracked: Vec<&str> = book
        .users()
        .iter()
        .map(|u| u.handle.as_str())
        .filter(|h| !handles.iter().any(|r| r == h))
        .collect();
    if !untracked.is_empty() {
        println!("\nNot on roster (kept in progress file): {}", untracked.join(", "));
    }

    Ok(())
}
