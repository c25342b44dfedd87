use clap::Parser;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};
use trn_relay::{
    config::Config,
    games::Game,
    lookup::{LookupParams, LookupSession, LookupState, Outcome},
    trn::TrnClient,
};

/// Look up a player's TRN stats from the terminal.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// fortnite, apex, valorant or cod
    game: Game,

    username: String,

    /// Riot ID tagline (Valorant only), with or without the leading '#'
    #[arg(long)]
    tag: Option<String>,

    /// Platform slug, e.g. epic, psn, xbl, origin, battle
    #[arg(long)]
    platform: Option<String>,

    /// Print the normalized view as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, env = "STATS_LOG", default_value = "warn")]
    log: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log))
        .with(fmt_layer)
        .init();

    let config = Config::load()?;
    let client = TrnClient::new(&config.trn)?;
    let session = LookupSession::new(client, config.trn.base_url.clone(), config.lookup.stale_policy);

    let params = LookupParams {
        username: Some(args.username),
        tag: args.tag,
        platform: args.platform,
    };

    let view = match session.submit(args.game, &params).await {
        Ok(Outcome::Displayed(LookupState::Success(view))) => view,
        Ok(Outcome::Displayed(LookupState::Failed(e))) | Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(other) => anyhow::bail!("lookup ended in unexpected state: {other:?}"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let player = view
        .player
        .as_deref()
        .or(params.username.as_deref())
        .unwrap_or_default();

    println!("{} - {}", player, args.game.display_name());
    for (metric, value) in view.rows() {
        println!("  {:<16} {}", metric.label, value);
    }

    Ok(())
}
