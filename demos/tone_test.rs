use env_logger::Builder;
use log::{info, LevelFilter};
use mouth_watch::alert::tone_cpal::CpalTone;
use mouth_watch::alert::ToneSink;
use mouth_watch::config::MonitorConfig;
use std::thread::sleep;
use std::time::Duration;

/// Plays the alert tone on the default output device for two seconds
fn main() -> Result<(), anyhow::Error> {
    Builder::new().filter_level(LevelFilter::Debug).init();

    info!("Output device: {}", CpalTone::default_output_name()?);
    let config = MonitorConfig::default();
    let mut tone = CpalTone::new()?;

    tone.start(config.tone_frequency_hz, config.tone_volume)?;
    sleep(Duration::from_secs(2));
    tone.stop()?;

    println!("Tone test finished");
    Ok(())
}
