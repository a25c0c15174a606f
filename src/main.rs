use clap::Parser;
use ecoalertas::cli::commands::{Cli, Commands, FeedArgs};
use ecoalertas::cli::csv;
use ecoalertas::cli::watch::{watch, WatchEnd};
use ecoalertas::domain::ports::push_channel::PushChannel;
use ecoalertas::domain::ports::report_source::ReportSource;
use ecoalertas::infrastructure::push::lines::LinesPushChannel;
use ecoalertas::infrastructure::push::local::LocalPushChannel;
use ecoalertas::infrastructure::sources::file::FileReportSource;
use ecoalertas::infrastructure::sources::http::HttpReportSource;
use ecoalertas::{DateRange, FeedConfig, FeedSession, FilterCriteria, SessionEvent};
use std::io::Write;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let config = FeedConfig::from_env();
    if let Err(e) = run_command(config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("ECOALERTAS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_command(config: FeedConfig, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::View {
            feed,
            page,
            page_size,
        } => {
            let mut session = loaded_session(&config, &feed).await?;
            match page_size {
                Some(size) => {
                    let page = session.page(page.unwrap_or(0), size)?;
                    println!("{}", serde_json::to_string_pretty(&page)?);
                }
                None => {
                    let view = session.current_view();
                    println!("{}", serde_json::to_string_pretty(&*view)?);
                }
            }
            session.stop();
        }
        Commands::Export { feed, out } => {
            let mut session = loaded_session(&config, &feed).await?;
            let rows = session.export_current_view();
            session.stop();
            let encoded = csv::encode(&rows);
            match out {
                Some(path) => {
                    tokio::fs::write(&path, encoded).await?;
                    eprintln!("Exported {} reports to {path}", rows.len());
                }
                None => print!("{encoded}"),
            }
        }
        Commands::Facets { feed } => {
            let mut session = loaded_session(&config, &feed).await?;
            println!("{}", serde_json::to_string_pretty(&session.facets())?);
            session.stop();
        }
        Commands::Watch { feed, event } => {
            let push: Arc<dyn PushChannel> =
                Arc::new(LinesPushChannel::new(tokio::io::stdin(), 64));
            let event = event.unwrap_or_else(|| config.event.clone());
            let mut session = FeedSession::new(source_for(&config, &feed), push).with_event(event);
            session.set_criteria(criteria_from(&feed)?)?;
            session.start().await?;
            eprintln!("Live with {} reports", session.current_view().len());

            let stop = session.stop_handle();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    stop.stop();
                }
            });

            let end = watch(&mut session, |session, ev| match ev {
                SessionEvent::Merged { id, outcome } => {
                    eprintln!("{outcome} {id}: {} visible", session.current_view().len());
                }
                SessionEvent::Disconnected(reason) => eprintln!("disconnected: {reason}"),
                SessionEvent::Reconnected => eprintln!("reconnected"),
                SessionEvent::Discarded => {}
            })
            .await?;
            let view = session.current_view();
            println!("{}", serde_json::to_string_pretty(&*view)?);

            if end == WatchEnd::Interrupted {
                // The stdin reader is a blocking thread that runtime shutdown would wait on
                std::io::stdout().flush()?;
                std::process::exit(0);
            }
        }
    }
    Ok(())
}

fn source_for(config: &FeedConfig, feed: &FeedArgs) -> Arc<dyn ReportSource> {
    match (&feed.file, &feed.api_url) {
        (Some(path), _) => Arc::new(FileReportSource::new(path)),
        (None, Some(url)) => {
            let cfg = FeedConfig {
                api_url: url.clone(),
                ..config.clone()
            };
            Arc::new(HttpReportSource::from_config(&cfg))
        }
        (None, None) => Arc::new(HttpReportSource::from_config(config)),
    }
}

fn criteria_from(feed: &FeedArgs) -> Result<FilterCriteria, Box<dyn std::error::Error>> {
    let range = DateRange::parse(feed.from.as_deref(), feed.to.as_deref())?;
    Ok(FilterCriteria::new()
        .with_categories(feed.categories.iter().cloned())
        .with_statuses(feed.statuses.iter().cloned())
        .with_search(feed.search.clone().unwrap_or_default())
        .with_date_range(range))
}

/// Start a session with no live events and apply the requested filters.
async fn loaded_session(
    config: &FeedConfig,
    feed: &FeedArgs,
) -> Result<FeedSession, Box<dyn std::error::Error>> {
    let push: Arc<dyn PushChannel> = Arc::new(LocalPushChannel::new(1));
    let mut session = FeedSession::new(source_for(config, feed), push);
    session.set_criteria(criteria_from(feed)?)?;
    session.start().await?;
    for id in session.data_errors() {
        eprintln!("Warning: report {id} has an unparseable date; date filters skip it");
    }
    Ok(session)
}
