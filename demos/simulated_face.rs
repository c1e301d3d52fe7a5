use env_logger::Builder;
use log::{info, LevelFilter};
use mouth_watch::config::MonitorConfig;
use mouth_watch::landmarks::{Landmark, LandmarkFrame};
use mouth_watch::monitor_sync;
use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

const FRAME_MS: u64 = 33;

/// 16 landmarks with the lips centred at y=0.6 and the given total gap
fn face(gap: f32) -> LandmarkFrame {
    let mut points = vec![Landmark::new(0.5, 0.5); 16];
    points[12] = Landmark::new(0.5, 0.6 - gap / 2.0);
    points[13] = Landmark::new(0.5, 0.6 - gap / 4.0);
    points[14] = Landmark::new(0.5, 0.6 + gap / 4.0);
    points[15] = Landmark::new(0.5, 0.6 + gap / 2.0);
    LandmarkFrame::new(points)
}

/// Feeds a scripted face through a session with the real alert tone:
/// mouth open, closed long enough to alert, open again, then the face leaves.
fn main() -> Result<(), anyhow::Error> {
    Builder::new().filter_level(LevelFilter::Debug).init();

    let (sender, receiver) = mpsc::channel();
    let running = Arc::new(AtomicBool::new(true));

    let producer = thread::spawn(move || {
        let script: [(Option<f32>, u64); 4] = [(Some(0.08), 1000), (Some(0.005), 2500), (Some(0.08), 1000), (None, 500)];
        for (gap, duration_ms) in script {
            info!("Simulating {:?} for {} ms", gap, duration_ms);
            for _ in 0..duration_ms / FRAME_MS {
                if sender.send(gap.map(face)).is_err() {
                    return;
                }
                thread::sleep(Duration::from_millis(FRAME_MS));
            }
        }
    });

    monitor_sync(MonitorConfig::default(), receiver, running)?;
    let _ = producer.join();
    println!("Simulation finished");
    Ok(())
}
