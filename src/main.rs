mod commands;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use cf_hundred::challenge::ChallengeWindow;
use cf_hundred::config::{self, Settings};
use cf_hundred::webhook::Webhook;
use chrono::{FixedOffset, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cf-hundred")]
#[command(version, about = "Track a 100-day Codeforces challenge for a roster of handles")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Roster file, one handle per line
    #[arg(long, global = true, env = "CF_HUNDRED_ROSTER", default_value = "handles.txt")]
    roster: PathBuf,

    /// Per-user progress CSV
    #[arg(long, global = true, env = "CF_HUNDRED_PROGRESS", default_value = "progress.csv")]
    progress: PathBuf,

    /// Daily activity log CSV
    #[arg(long, global = true, env = "CF_HUNDRED_LOG", default_value = "daily_log.csv")]
    daily_log: PathBuf,

    /// First day of the challenge (YYYY-MM-DD)
    #[arg(long, global = true, env = "CF_HUNDRED_START", value_parser = config::parse_date)]
    start: Option<NaiveDate>,

    /// UTC offset that decides which day a submission counts for
    #[arg(
        long,
        global = true,
        env = "CF_HUNDRED_UTC_OFFSET",
        default_value = "+06:00",
        allow_hyphen_values = true,
        value_parser = config::parse_utc_offset
    )]
    utc_offset: FixedOffset,

    /// Codeforces API base URL
    #[arg(long, global = true, env = "CF_HUNDRED_API", default_value = cf_hundred::codeforces::DEFAULT_API)]
    api: String,

    /// How many recent submissions to fetch per handle
    #[arg(long, global = true, env = "CF_HUNDRED_FETCH_COUNT", default_value = "50")]
    fetch_count: u32,

    /// Pause between API calls, in milliseconds
    #[arg(long, global = true, env = "CF_HUNDRED_DELAY_MS", default_value = "500")]
    delay_ms: u64,

    /// Webhook that receives the daily summary
    #[arg(long, global = true, env = "CF_HUNDRED_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Bearer token sent with webhook posts
    #[arg(long, global = true, env = "CF_HUNDRED_WEBHOOK_TOKEN", hide_env_values = true)]
    webhook_token: Option<String>,
}

impl GlobalArgs {
    fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            roster: self.roster,
            progress: self.progress,
            daily_log: self.daily_log,
            window: self.start.map_or(defaults.window, ChallengeWindow::new),
            utc_offset: self.utc_offset,
            api_base: self.api,
            fetch_count: self.fetch_count,
            delay: Duration::from_millis(self.delay_ms),
            webhook: self.webhook_url.map(|url| Webhook::new(&url, self.webhook_token.as_deref())),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Fetch today's activity, reconcile it, and save on confirmation
    Track {
        /// Day to fetch (default: today in the configured offset)
        #[arg(long, value_parser = config::parse_date)]
        date: Option<NaiveDate>,
        /// Save without asking
        #[arg(short, long)]
        yes: bool,
        /// Show the summary but never write files
        #[arg(long, conflicts_with = "yes")]
        dry_run: bool,
        /// Post the summary to the webhook after saving
        #[arg(long)]
        notify: bool,
    },
    /// Show saved progress without contacting Codeforces
    Status {
        #[arg(long, value_parser = config::parse_date)]
        date: Option<NaiveDate>,
    },
    /// Rank the roster by zero-elimination streaks from the daily log
    Streaks {
        #[arg(long, value_parser = config::parse_date)]
        date: Option<NaiveDate>,
    },
    /// Post the saved summary for a day to the webhook
    Notify {
        #[arg(long, value_parser = config::parse_date)]
        date: Option<NaiveDate>,
    },
    /// Create a default roster file
    Init,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.global.into_settings();

    match cli.command {
        Command::Track { date, yes, dry_run, notify } => {
            commands::track::run(&settings, date, yes, dry_run, notify)
        }
        Command::Status { date } => commands::status::run(&settings, date),
        Command::Streaks { date } => commands::streaks::run(&settings, date),
        Command::Notify { date } => commands::notify::run(&settings, date),
        Command::Init => commands::init::run(&settings),
    }
}
