//! Event dispatch and the decode-to-drive update cycle.
//!
//! [`DrivePipeline`] is the single state machine behind the firmware's
//! interrupt sources. Each event handler runs to completion, and a handler
//! that completes a measurement runs the full update cycle (validate, mix,
//! commit, watchdog reset) before returning. Callers serialize events with
//! a critical section; the pipeline itself holds no locks.

use crate::capture::PulseCapture;
use crate::channel::{ChannelInput, RcChannel};
use crate::config::DriveConfig;
use crate::hal::DriveHal;
use crate::mixer::mix;
use crate::output::{DutyCurve, Motor, MotorOutput};
use crate::telemetry::DriveSnapshot;
use ibus_proto::{IbusDecoder, IbusError};

/// Which decoder currently feeds the channels.
///
/// The run starts on pulse capture. The first validated iBUS frame hands
/// the channels to the serial decoder for the rest of the run; the
/// handover is not revocable without a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveSource {
    Pulse,
    Serial,
}

/// Status LED pulse-count state machine.
///
/// Each burst encodes the number of armed channels: the counter reloads
/// with `armed * 2 + 1` ticks and the LED toggles on every tick the
/// countdown survives, producing `armed` blinks followed by a pause.
/// With no channel armed the LED never toggles.
#[derive(Debug, Clone, Copy, Default)]
struct LedBlinker {
    countdown: u8,
}

impl LedBlinker {
    /// Advance one tick; returns true when the LED should toggle.
    fn tick(&mut self, armed_channels: u8) -> bool {
        if self.countdown == 0 {
            self.countdown = armed_channels * 2 + 1;
            false
        } else {
            self.countdown -= 1;
            self.countdown != 0
        }
    }
}

/// The decode → validate → mix → drive pipeline.
///
/// Owns all cross-event state: channel inputs, capture units, the serial
/// decoder, committed outputs and the active-source flag. Generic over
/// [`DriveHal`] so the whole pipeline runs on host with a mock.
pub struct DrivePipeline<H: DriveHal> {
    hal: H,
    config: DriveConfig,
    curve: DutyCurve,
    channels: [ChannelInput; 2],
    captures: [PulseCapture; 2],
    decoder: IbusDecoder,
    source: ActiveSource,
    outputs: [MotorOutput; 2],
    blinker: LedBlinker,
    cycles: u32,
}

impl<H: DriveHal> DrivePipeline<H> {
    /// Create a pipeline in the reset state: channels unarmed, outputs
    /// stopped, pulse capture active.
    pub fn new(hal: H, config: DriveConfig) -> Self {
        Self {
            hal,
            config,
            curve: DutyCurve::from_percentages(config.min_duty_pct, config.max_duty_pct),
            channels: [ChannelInput::new(); 2],
            captures: [PulseCapture::new(); 2],
            decoder: IbusDecoder::new(),
            source: ActiveSource::Pulse,
            outputs: [MotorOutput::STOPPED; 2],
            blinker: LedBlinker::default(),
            cycles: 0,
        }
    }

    /// Handle an edge timestamp from one RC channel's capture input.
    ///
    /// A falling edge completes a width measurement, which always runs a
    /// full update cycle: even an out-of-range width commits (neutral)
    /// outputs and feeds the watchdog, so a present-but-garbled signal
    /// idles the vehicle instead of forcing reset loops. Only event
    /// silence starves the watchdog.
    ///
    /// Returns the active source; once it reports [`ActiveSource::Serial`]
    /// the edge path is dead and the caller can stop delivering edges.
    pub fn on_edge(&mut self, channel: RcChannel, timestamp: u16) -> ActiveSource {
        if self.source == ActiveSource::Serial {
            return ActiveSource::Serial;
        }
        let idx = channel.index();
        if let Some(width) = self.captures[idx].edge(timestamp) {
            self.channels[idx].apply_pulse(width >> self.config.capture_shift);
            self.update();
        }
        ActiveSource::Pulse
    }

    /// Feed one byte from the serial stream.
    ///
    /// On a validated frame the two configured slots run through the gate,
    /// one update cycle runs, and the serial source takes over for good.
    /// A checksum failure changes no channel state; the error is surfaced
    /// for logging only.
    pub fn on_serial_byte(&mut self, byte: u8) -> Result<(), IbusError> {
        let frame = match self.decoder.push_byte(byte)? {
            Some(frame) => frame,
            None => return Ok(()),
        };
        // Slots outside the wire layout read as width 0, which the gate
        // turns into a permanently disarmed channel
        let ch1 = frame.channel(self.config.ibus_slot_ch1).unwrap_or(0);
        let ch2 = frame.channel(self.config.ibus_slot_ch2).unwrap_or(0);
        self.channels[0].apply_pulse(ch1);
        self.channels[1].apply_pulse(ch2);
        self.update();
        self.source = ActiveSource::Serial;
        Ok(())
    }

    /// Advance the status LED on the periodic tick.
    pub fn on_tick(&mut self) {
        let armed = self.channels.iter().filter(|c| c.armed).count() as u8;
        if self.blinker.tick(armed) {
            self.hal.status_led_toggle();
        }
    }

    /// Mix the current channel commands and commit both motor outputs.
    ///
    /// Runs entirely within the triggering event: by the time the event
    /// handler returns, duty, direction and the watchdog are consistent
    /// with this cycle's inputs.
    fn update(&mut self) {
        let (a, b) = mix(
            self.config.mix_mode,
            self.channels[0].value,
            self.channels[1].value,
        );
        self.outputs[0] = self.curve.apply(a);
        self.outputs[1] = self.curve.apply(b);
        self.hal.set_duty(Motor::A, self.outputs[0].duty);
        self.hal.set_duty(Motor::B, self.outputs[1].duty);
        self.hal
            .set_direction(Motor::A, self.outputs[0].forward, self.outputs[0].reverse);
        self.hal
            .set_direction(Motor::B, self.outputs[1].forward, self.outputs[1].reverse);
        self.hal.watchdog_reset();
        self.cycles = self.cycles.wrapping_add(1);
    }

    /// Which decoder currently owns the channels.
    #[must_use]
    pub fn source(&self) -> ActiveSource {
        self.source
    }

    /// The duty curve derived from the configuration.
    #[must_use]
    pub fn curve(&self) -> &DutyCurve {
        &self.curve
    }

    /// Consistent copy of the observable state.
    ///
    /// Call under the same lock that serializes events and the snapshot
    /// reflects exactly one completed cycle.
    #[must_use]
    pub fn snapshot(&self) -> DriveSnapshot {
        DriveSnapshot {
            channels: self.channels,
            outputs: self.outputs,
            source: self.source,
            cycles: self.cycles,
        }
    }

    /// Get a reference to the HAL.
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Get a mutable reference to the HAL.
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }
}
