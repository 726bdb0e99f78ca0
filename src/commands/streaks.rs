use anyhow::Result;
use cf_hundred::config::Settings;
use cf_hundred::daily_log::DailyLog;
use cf_hundred::{roster, streak, summary};
use chrono::NaiveDate;

pub fn run(settings: &Settings, date: Option<NaiveDate>) -> Result<()> {
    let as_of = date.unwrap_or_else(|| settings.today());
    let handles = roster::load(&settings.roster)?;
    let log = DailyLog::load(&settings.daily_log)?;

    let board = streak::leaderboard(&log, &handles, &settings.window, as_of);
    println!("{}", summary::render_streaks(&board, &settings.window, as_of));

    Ok(())
}
