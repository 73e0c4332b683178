use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use streamflix::{
    db::{create_redis_client, redis::CacheWriterHandle, Cache},
    engine::{
        parse_line, Command, EngineConfig, EngineSnapshot, Phase, SessionInput, SwipeSession,
    },
    services::{
        DecisionSink, InMemorySink, ListRouting, RecommendationSource, RemoteSink, StaticSource,
        TmdbSource,
    },
    Config,
};

/// Terminal client for the swipe deck.
///
/// Reads one command per line from stdin: `r`/`ArrowRight` keeps a movie,
/// `l`/`ArrowLeft` passes, `drag <dx>` replays a pointer drag and
/// `q`/`Escape` closes the deck.
#[derive(Parser, Debug)]
#[command(name = "swipe", about = "Swipe through movie recommendations")]
struct Args {
    /// Persist decisions for this backend user instead of keeping them in memory
    #[arg(long)]
    user_id: Option<i32>,

    /// Use the built-in deck instead of TMDB
    #[arg(long)]
    offline: bool,

    /// Override the viewport width used for drag thresholds
    #[arg(long)]
    width: Option<f64>,

    /// TMDB popular page to load
    #[arg(long, default_value_t = 1)]
    page: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let (source, cache_writer) = build_source(&config, &args)?;
    let items = source.load().await;
    tracing::info!(source = source.name(), count = items.len(), "Deck loaded");

    let memory = InMemorySink::new(ListRouting::default());
    let sink: Arc<dyn DecisionSink> = match args.user_id {
        Some(user_id) => Arc::new(RemoteSink::new(
            config.api_base_url.clone(),
            user_id,
            ListRouting::default(),
        )),
        None => Arc::new(memory.clone()),
    };

    let engine_config = EngineConfig::new(items, args.width.unwrap_or(config.viewport_width))
        .with_threshold_fraction(config.swipe_threshold_fraction)
        .with_settle_duration(config.settle_duration());
    let session = SwipeSession::spawn(engine_config, sink)?;

    let printer = tokio::spawn(print_cards(session.subscribe()));
    println!("r = keep, l = pass, drag <dx> = swipe by hand, q = quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut closed = false;
    while let Some(line) = lines.next_line().await? {
        let Some(inputs) = parse_line(&line) else {
            println!("unrecognised input: {}", line.trim());
            continue;
        };

        closed = inputs.contains(&SessionInput::Command(Command::Close));
        if closed {
            break;
        }
        for input in inputs {
            session.send(input);
        }
    }

    // Input ran out without an explicit close: let the last swipe settle.
    if !closed {
        let mut state_rx = session.subscribe();
        let settle = config.settle_duration() + Duration::from_millis(50);
        let _ = tokio::time::timeout(settle, state_rx.wait_for(|s| s.phase == Phase::Idle)).await;
    }

    let report = session.close().await;
    printer.abort();
    if let Some(writer) = cache_writer {
        writer.shutdown().await;
    }

    println!(
        "Done: {} kept, {} passed, {} failed to save",
        report.accepted, report.rejected, report.failed
    );
    if args.user_id.is_none() {
        for movie in memory.watchlist().await {
            println!("  watchlist: {} ({:.1})", movie.title, movie.rating);
        }
    }

    Ok(())
}

type Source = (Box<dyn RecommendationSource>, Option<CacheWriterHandle>);

fn build_source(config: &Config, args: &Args) -> Result<Source> {
    let api_key = match (&config.tmdb_api_key, args.offline) {
        (Some(key), false) => key.clone(),
        _ => return Ok((Box::new(StaticSource::fallback()), None)),
    };

    let source = TmdbSource::new(api_key, config.tmdb_api_url.clone()).with_page(args.page);
    match &config.redis_url {
        Some(redis_url) => {
            let (cache, writer) = Cache::new(create_redis_client(redis_url)?);
            Ok((Box::new(source.with_cache(cache)), Some(writer)))
        }
        None => Ok((Box::new(source), None)),
    }
}

async fn print_cards(mut state_rx: tokio::sync::watch::Receiver<EngineSnapshot>) {
    let mut shown = None;
    loop {
        let snapshot = state_rx.borrow_and_update().clone();
        if shown != Some(snapshot.cursor) {
            shown = Some(snapshot.cursor);
            match &snapshot.current {
                Some(movie) => println!(
                    "[{}/{}] {} ({:.1}/10)\n    {}",
                    snapshot.cursor + 1,
                    snapshot.len,
                    movie.title,
                    movie.rating,
                    movie.description
                ),
                None => println!("No more recommendations!"),
            }
        }

        if state_rx.changed().await.is_err() {
            break;
        }
    }
}
