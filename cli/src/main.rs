use std::sync::Arc;

use clap::{Parser, Subcommand};

use ghanti_cli::audio::{BellTone, SystemSpeech};
use ghanti_cli::event_source::DesktopEventSource;
use ghanti_cli::{commands, logging, readline, CliContext};
use ghanti_core::{announcer_channel, AnnouncerService, AppConfig, ServiceHandle, TransientFocus};

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let config = AppConfig::load();
    let (events, rx) = announcer_channel();

    let sounds_dir = dirs::config_dir()
        .map(|dir| dir.join("ghanti").join("sounds"))
        .unwrap_or_else(|| "sounds".into());

    let service = AnnouncerService::new(
        rx,
        events.clone(),
        config.clone(),
        Box::new(SystemSpeech::new(events.clone())),
        Box::new(BellTone::new(events.clone(), sounds_dir)),
        Box::new(TransientFocus::new()),
    );
    tokio::spawn(service.run());

    let handle = ServiceHandle::new(events, Arc::new(DesktopEventSource::new()));
    let ctx = CliContext::new(handle, config);

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "payment-notification voice announcer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the bell and speak a sample announcement
    Test {
        #[arg(short, long)]
        text: Option<String>,
        #[arg(short, long)]
        volume: Option<f32>,
        #[arg(short, long)]
        gap_ms: Option<u64>,
    },
    /// Feed raw notification text through the full pipeline
    Notify {
        #[arg(short, long)]
        text: String,
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Show current configuration
    Config,
    /// Set speech volume (0-100)
    SetVolume {
        #[arg(short, long)]
        percent: u8,
    },
    /// Set the gap between spoken words in milliseconds
    SetGap {
        #[arg(short, long)]
        ms: u64,
    },
    /// Set which app's notifications are announced
    SetSource {
        #[arg(short, long)]
        package: String,
    },
    /// Report event-source and announcer status
    Status,
    /// Open the platform event-source settings
    Settings,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "ghanti".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Test {
            text,
            volume,
            gap_ms,
        }) => commands::test(ctx, text, volume, gap_ms).await,
        Some(Commands::Notify { text, source }) => commands::notify(ctx, text, source).await,
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::SetVolume { percent }) => commands::set_volume(ctx, percent).await,
        Some(Commands::SetGap { ms }) => commands::set_gap(ctx, ms).await,
        Some(Commands::SetSource { package }) => commands::set_source(ctx, package).await,
        Some(Commands::Status) => commands::status(ctx).await,
        Some(Commands::Settings) => commands::open_settings(ctx),
        Some(Commands::Exit) => {
            commands::exit(ctx);
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
