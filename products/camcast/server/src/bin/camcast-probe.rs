use {
    base::log,
    camcast::DEFAULT_PROBE_ADDR,
    com::{FromViewer, ToViewer, WsClient},
    std::{
        net::SocketAddr,
        time::{Duration, Instant},
    },
};

const PING_INTERVAL: Duration = Duration::from_secs(3);
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Connects as a viewer and logs what a viewer would see: latency, frame
/// rate, frame size and status changes.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    base::init_stdout_logger();

    let addr: SocketAddr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PROBE_ADDR.to_string())
        .parse()?;
    let mut client = WsClient::connect(addr).await?;
    log::info!("connected to {}", addr);
    client.send(FromViewer::Status).await?;

    let mut ping = tokio::time::interval(PING_INTERVAL);
    let mut report = tokio::time::interval(REPORT_INTERVAL);
    let mut ping_sent: Option<Instant> = None;
    let mut window_start = Instant::now();
    let mut window_frames = 0u64;
    let mut last_sequence = 0u64;
    let mut last_size = 0u32;

    loop {
        tokio::select! {
            message = client.recv() => match message? {
                ToViewer::Frame {
                    sequence,
                    byte_length,
                    ..
                } => {
                    if last_sequence != 0 && sequence > last_sequence + 1 {
                        log::debug!("missed {} frames", sequence - last_sequence - 1);
                    }
                    last_sequence = sequence;
                    last_size = byte_length;
                    window_frames += 1;
                }
                ToViewer::Pong => {
                    if let Some(sent) = ping_sent.take() {
                        log::info!("latency {:?}", sent.elapsed());
                    }
                }
                ToViewer::Status {
                    source_available,
                    running,
                } => log::info!("status: camera available {}, streaming {}", source_available, running),
                ToViewer::StreamStatus { status, message } => {
                    if message.is_empty() {
                        log::info!("stream {}", status);
                    } else {
                        log::info!("stream {}: {}", status, message);
                    }
                }
            },
            _ = ping.tick() => {
                ping_sent = Some(Instant::now());
                client.send(FromViewer::Ping).await?;
            }
            _ = report.tick() => {
                let elapsed = window_start.elapsed().as_secs_f64();
                if window_frames > 0 {
                    log::info!(
                        "{:.1} fps, last frame {} ({} bytes)",
                        window_frames as f64 / elapsed,
                        last_sequence,
                        last_size
                    );
                }
                window_start = Instant::now();
                window_frames = 0;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    client.close().await?;
    Ok(())
}
