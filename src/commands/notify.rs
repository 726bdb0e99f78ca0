use anyhow::Result;
use cf_hundred::config::Settings;
use cf_hundred::progress::ProgressBook;
use cf_hundred::{roster, summary};
use chrono::NaiveDate;

pub fn run(settings: &Settings, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(|| settings.today());
    let handles = roster::load(&settings.roster)?;
    let book = ProgressBook::load(&settings.progress, settings.window.total_days)?;

    let rows = summary::rows(&book, &handles, date);
    let message = summary::render_message(&rows, &settings.window, date);
    println!("{message}\n");

    post(settings, &message)
}

pub fn post(settings: &Settings, message: &str) -> Result<()> {
    let webhook = settings.require_webhook()?;

    eprint!("Posting summary... ");
    match webhook.post(message) {
        Ok(()) => {
            eprintln!("done");
            Ok(())
        }
        Err(e) => {
            eprintln!("failed");
            Err(e.into())
        }
    }
}
