use ghanti_core::NotificationRecord;

use crate::CliContext;

/// Play the bell and speak a sample announcement, bypassing extraction.
pub async fn test(ctx: &CliContext, text: Option<String>, volume: Option<f32>, gap_ms: Option<u64>) {
    let config = ctx.config.read().await;
    let text = text.unwrap_or_else(|| "20 rupees received".to_string());
    let volume = volume.unwrap_or_else(|| config.announcer.volume_fraction());
    let gap_ms = gap_ms.unwrap_or(config.announcer.word_gap_ms);
    drop(config);

    match ctx.handle.test_announcement(text, volume, gap_ms) {
        Ok(()) => println!("test announcement submitted"),
        Err(err) => println!("error: {err}"),
    }
}

/// Feed raw notification text through classify -> extract -> announce.
pub async fn notify(ctx: &CliContext, text: String, source: Option<String>) {
    let source = match source {
        Some(source) => source,
        None => ctx.config.read().await.source_package.clone(),
    };

    match ctx.handle.announce(NotificationRecord::new(source, text)) {
        Ok(()) => println!("notification submitted"),
        Err(err) => println!("error: {err}"),
    }
}

pub async fn show_config(ctx: &CliContext) {
    let config = ctx.config.read().await;
    println!("source package:  {}", config.source_package);
    println!("overlap policy:  {:?}", config.overlap_policy);
    println!("enabled:         {}", config.announcer.enabled);
    println!("volume:          {}%", config.announcer.volume);
    println!("word gap:        {} ms", config.announcer.word_gap_ms);
    println!("tone enabled:    {}", config.announcer.tone_enabled);
    println!("tone settle:     {} ms", config.announcer.tone_settle_ms);
    println!("fallback phrase: {}", config.announcer.fallback_phrase);
}

pub async fn set_volume(ctx: &CliContext, percent: u8) {
    let mut config = ctx.config.write().await;
    config.announcer.volume = percent.min(100);
    apply(ctx, &config).await;
    println!("volume set to {}%", config.announcer.volume);
}

pub async fn set_gap(ctx: &CliContext, ms: u64) {
    let mut config = ctx.config.write().await;
    config.announcer.word_gap_ms = ms;
    apply(ctx, &config).await;
    println!("word gap set to {ms} ms");
}

pub async fn set_source(ctx: &CliContext, package: String) {
    let mut config = ctx.config.write().await;
    config.source_package = package.clone();
    apply(ctx, &config).await;
    println!("source package set to {package}");
    println!("note: the running service keeps its source filter until restart");
}

pub async fn status(ctx: &CliContext) {
    let enabled = ctx.handle.is_event_source_enabled();
    let config = ctx.config.read().await;
    println!(
        "event source:  {} ({})",
        if enabled { "enabled" } else { "disabled" },
        config.source_package
    );
    println!(
        "announcements: {}",
        if config.announcer.enabled { "on" } else { "off" }
    );
}

pub fn open_settings(ctx: &CliContext) {
    ctx.handle.open_event_source_settings();
}

pub fn exit(ctx: &CliContext) {
    let _ = ctx.handle.shutdown();
    println!("quitting...");
}

/// Persist the config and push the announcer settings to the service.
async fn apply(ctx: &CliContext, config: &ghanti_core::AppConfig) {
    if let Err(err) = config.save() {
        println!("warning: {err}");
    }
    if let Err(err) = ctx.handle.update_settings(config.announcer.clone()) {
        println!("error: {err}");
    }
}
