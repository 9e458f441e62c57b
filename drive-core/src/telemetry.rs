//! Diagnostic snapshots of the pipeline state.

use crate::channel::ChannelInput;
use crate::output::MotorOutput;
use crate::pipeline::ActiveSource;

/// Consistent copy of the pipeline's observable state.
///
/// Produced by [`DrivePipeline::snapshot`](crate::DrivePipeline::snapshot).
/// Firmware takes it while holding the pipeline lock, so every field
/// belongs to the same completed update cycle; no half-committed state is
/// observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveSnapshot {
    /// Both channel states in order (channel 1, channel 2).
    pub channels: [ChannelInput; 2],
    /// Both committed motor outputs in order (motor A, motor B).
    pub outputs: [MotorOutput; 2],
    /// Which decoder currently owns the channels.
    pub source: ActiveSource,
    /// Completed update cycles since startup (wrapping).
    pub cycles: u32,
}
