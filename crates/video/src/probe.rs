use crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Device,
    Synthetic,
}

/// The source chosen at startup, already open.
pub struct Probed {
    pub source: Box<dyn FrameSource>,
    pub config: SourceConfig,
    pub kind: SourceKind,
}

#[cfg(feature = "v4l2")]
fn default_device() -> Option<Box<dyn FrameSource>> {
    Some(Box::new(V4l2Source::new()))
}

#[cfg(not(feature = "v4l2"))]
fn default_device() -> Option<Box<dyn FrameSource>> {
    None
}

/// Open the platform camera, falling back to the synthetic source.
///
/// Blocking. See `probe_with`.
pub fn probe(config: &SourceConfig) -> Result<Probed, VideoError> {
    probe_with(default_device(), config)
}

/// Open `device` and read one test frame; if either fails, open a
/// `SyntheticSource` instead.
///
/// The choice is final: nothing re-probes the device later. Only a failure
/// to open the synthetic source is returned as an error.
pub fn probe_with(
    device: Option<Box<dyn FrameSource>>,
    config: &SourceConfig,
) -> Result<Probed, VideoError> {
    match device {
        Some(mut device) => match try_device(device.as_mut(), config) {
            Ok(actual) => {
                log::info!(
                    "camera {} ready: {} {} @ {} fps",
                    device.name(),
                    actual.size(),
                    actual.format(),
                    actual.fps()
                );
                return Ok(Probed {
                    source: device,
                    config: actual,
                    kind: SourceKind::Device,
                });
            }
            Err(error) => {
                device.close();
                log::error!("camera {} unavailable: {}", device.name(), error);
            }
        },
        None => log::warn!("no camera backend compiled in"),
    }

    let mut synthetic = SyntheticSource::new();
    let actual = synthetic.open(config)?;
    log::info!("using synthetic source at {}", actual.size());
    Ok(Probed {
        source: Box::new(synthetic),
        config: actual,
        kind: SourceKind::Synthetic,
    })
}

fn try_device(
    device: &mut dyn FrameSource,
    config: &SourceConfig,
) -> Result<SourceConfig, VideoError> {
    let actual = device.open(config)?;
    let frame = device.read()?;
    log::debug!(
        "camera {} test frame: {} {} bytes",
        device.name(),
        frame.image.size,
        frame.image.data.len()
    );
    Ok(actual)
}
