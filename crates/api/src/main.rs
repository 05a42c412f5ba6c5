//! Daybook command-line entry point

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use daybook_domain::{ViewMode, ViewState};
use daybook_infra::config;
use daybook_lib::utils::logging::init_tracing;
use daybook_lib::{
    generate_meet_link, get_calendar_view, session_status, sign_in, sign_out, AppContext, CalendarView, MeetLinkResult,
};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Personal calendar with Google sign-in and Meet links")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the month, week or day grid around a date
    View {
        /// month, week or day
        #[arg(short, long, default_value = "month")]
        mode: ViewMode,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Emit the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sign in with Google in the browser
    SignIn,
    /// Sign out and forget the cached calendar credential
    SignOut,
    /// Show whether a calendar credential is cached
    Whoami,
    /// Generate a Google Meet link
    Meet,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let ctx = AppContext::new(config).await.context("Failed to initialise Daybook")?;
    let outcome = run(&ctx, cli.command).await;
    ctx.shutdown().await?;
    outcome
}

async fn run(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::View { mode, date, json } => {
            let state = ViewState::new(date.unwrap_or_else(|| Local::now().date_naive()), mode);
            let view = get_calendar_view(ctx, state).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_view(&view);
            }
        }
        Commands::SignIn => {
            let session = sign_in(ctx).await?;
            let name = session.display_name.or(session.email).unwrap_or(session.user_id);
            println!("Signed in as {name}");
        }
        Commands::SignOut => {
            sign_out(ctx).await?;
            println!("Signed out");
        }
        Commands::Whoami => {
            let status = session_status(ctx)?;
            if status.has_calendar_access {
                println!("Calendar access granted");
            } else {
                println!("No calendar credential cached; run `daybook sign-in`");
            }
        }
        Commands::Meet => match generate_meet_link(ctx).await {
            MeetLinkResult::Generated { link } => println!("{link}"),
            MeetLinkResult::Failed { message, remedy, .. } => anyhow::bail!("{message}\n{remedy}"),
        },
    }
    Ok(())
}

fn print_view(view: &CalendarView) {
    println!("{}", view.title);

    for cell in &view.range.days {
        let Some(bucket) = view.placement.bucket(cell.date) else {
            continue;
        };
        let marker = match (cell.is_today, cell.in_current_month) {
            (true, _) => '*',
            (false, true) => ' ',
            (false, false) => '.',
        };
        println!("{marker}{}", cell.date.format("%a %d"));

        for event in &bucket.events {
            println!("    {} {}", event.start_time.format("%H:%M"), event.title);
        }
        if let Some(more) = bucket.more_label() {
            println!("    {more}");
        }
    }
}
