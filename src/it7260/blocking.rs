//! Blocking driver: the bus reader and the deferred poll task.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, warn};

use super::{decode, Config, Error, RawFrame, TouchSample, FRAME_LEN};
use crate::irq::{InterruptLine, IrqGate};
use crate::sink::{Axis, Button, EventSink};

/// Outcome of one deferred poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// No poll was queued; the bus and the interrupt line were not touched.
    Skipped,
    /// The bus read failed. No events were emitted; the line was re-armed.
    ReadFailed,
    /// A sample was decoded and reported to the sink.
    Reported(TouchSample),
}

/// Blocking IT7260 driver.
///
/// One instance per physical sensor. [`It7260::poll_once`] is the deferred
/// unit of work and must run outside interrupt context; the only
/// interrupt-context entry point is [`IrqGate::handle_interrupt`] on the
/// shared gate. The gate's single slot keeps poll cycles for one device
/// strictly serialized no matter how often the line fires.
#[derive(Debug)]
pub struct It7260<'d, I2C, SINK, DELAY, LINE> {
    bus: I2C,
    sink: &'d SINK,
    delay: DELAY,
    gate: &'d IrqGate<LINE>,
    config: Config,
}

impl<'d, I2C, SINK, DELAY, LINE> It7260<'d, I2C, SINK, DELAY, LINE>
where
    I2C: I2c,
    SINK: EventSink,
    DELAY: DelayNs,
    LINE: InterruptLine,
{
    pub fn new(
        bus: I2C,
        sink: &'d SINK,
        delay: DELAY,
        gate: &'d IrqGate<LINE>,
        config: Config,
    ) -> Self {
        Self {
            bus,
            sink,
            delay,
            gate,
            config,
        }
    }

    /// Read one raw frame from the sensor.
    ///
    /// A single blocking transaction of exactly [`FRAME_LEN`] bytes. Not
    /// retried here; a failed read skips event emission for this cycle and
    /// the next interrupt brings a fresh frame.
    fn read_frame(&mut self) -> Result<RawFrame, Error> {
        let mut buf = [0u8; FRAME_LEN];
        self.bus.read(self.config.address, &mut buf)?;
        Ok(buf)
    }

    /// Run one deferred poll cycle.
    ///
    /// Claims the queued slot, waits out the debounce interval, reads and
    /// decodes the frame and reports it to the sink. The interrupt line is
    /// re-enabled exactly once on every path that claimed the slot, read
    /// failure included; leaving it masked would wedge the device for good.
    pub fn poll_once(&mut self) -> PollOutcome {
        if !self.gate.begin_poll() {
            return PollOutcome::Skipped;
        }

        self.delay.delay_ms(self.config.debounce_ms);

        let outcome = match self.read_frame() {
            Ok(frame) => {
                let sample = decode(&frame);
                self.report(sample);
                PollOutcome::Reported(sample)
            }
            Err(e) => {
                warn!("unable to read frame: {e}");
                PollOutcome::ReadFailed
            }
        };

        self.gate.finish_poll();
        outcome
    }

    fn report(&self, sample: TouchSample) {
        if sample.contact {
            self.sink.report_button(Button::Touch, true);
            // Consumer mapping: the emitted X axis carries the decoded Y
            // value and the emitted Y axis the decoded X value.
            self.sink.report_absolute(Axis::X, sample.y);
            self.sink.report_absolute(Axis::Y, sample.x);
        } else {
            self.sink.report_button(Button::Touch, false);
        }
        self.sink.sync();
        debug!("{sample}");
    }
}
