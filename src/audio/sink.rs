use crate::error::DeviceError;
use crate::library::Track;

/// Renders tracks to an output device.
///
/// Implementations own the device resource and keep at most one track
/// rendering: `play` supersedes whatever was playing before.
pub trait AudioSink {
    /// Start rendering `track`.
    fn play(&mut self, track: &Track) -> Result<(), DeviceError>;

    /// Stop rendering and release the current stream. A no-op when idle.
    fn stop(&mut self);
}
