//! Device bind/unbind lifecycle.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use super::{BindStep, Config, Error, CAPABILITIES, DEVICE_ID};
use crate::irq::{InterruptLine, IrqGate, TriggerFlags};
use crate::sink::EventSink;

/// Lifecycle controller for one bound sensor instance.
///
/// Created by [`bind`](It7260Binding::bind) when discovery matches a sensor
/// against [`DEVICE_ID`]. The poll engine shares the sink and the gate by
/// reference, which is what lets [`unbind`](It7260Binding::unbind) join a
/// poll task that is still in flight.
#[derive(Debug)]
pub struct It7260Binding<'d, SINK, DELAY, LINE> {
    sink: &'d SINK,
    gate: &'d IrqGate<LINE>,
    delay: DELAY,
    config: Config,
    bound: bool,
}

impl<'d, SINK, DELAY, LINE> It7260Binding<'d, SINK, DELAY, LINE>
where
    SINK: EventSink,
    DELAY: DelayNs,
    LINE: InterruptLine,
{
    /// Bind the driver to a discovered sensor.
    ///
    /// Runs the bind sequence in order: advertise the capability set,
    /// register the sink, request the interrupt line (level-triggered,
    /// active low), mark the line as a wake source. A failing step unwinds
    /// every completed step in reverse and reports which step failed; no
    /// partial state is left attached.
    pub fn bind(
        sink: &'d SINK,
        gate: &'d IrqGate<LINE>,
        delay: DELAY,
        config: Config,
    ) -> Result<Self, Error> {
        if sink.configure(&CAPABILITIES).is_err() {
            return Err(Error::Bind(BindStep::SinkConfig));
        }

        if sink.register().is_err() {
            return Err(Error::Bind(BindStep::SinkRegister));
        }

        if let Err(e) = gate.line().request(TriggerFlags::LEVEL_LOW) {
            warn!("unable to request touch interrupt: {e:?}");
            sink.unregister();
            return Err(Error::Bind(BindStep::IrqRequest));
        }

        gate.line().set_wake(true);
        info!("{DEVICE_ID} bound at bus address 0x{:02x}", config.address);

        Ok(Self {
            sink,
            gate,
            delay,
            config,
            bound: true,
        })
    }

    /// Consumer opened the input device. Interrupt delivery is not gated on
    /// the consumer being open.
    pub fn handle_open(&self) {}

    /// Consumer closed the input device.
    pub fn handle_close(&self) {}

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Tear the binding down.
    ///
    /// Releases the interrupt line (no handler runs for this device
    /// afterwards), cancels a poll that was queued but never started, waits
    /// for a running poll to finish, then unregisters the sink. The bus
    /// transaction is not abortable mid-flight, so a running poll is joined,
    /// never preempted. Safe to call exactly once per successful bind.
    pub fn unbind(&mut self) -> Result<(), Error> {
        if !self.bound {
            return Err(Error::AlreadyUnbound);
        }

        self.gate.line().release();
        self.gate.cancel_queued();
        while self.gate.running() {
            self.delay.delay_ms(self.config.join_poll_ms);
        }

        self.sink.unregister();
        self.bound = false;
        info!("{DEVICE_ID} unbound");
        Ok(())
    }
}
