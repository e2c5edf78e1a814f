//! Interrupt line control and the single-slot poll gate.
//!
//! embedded-hal exposes no generic interface for masking and unmasking an
//! external interrupt line, so the driver defines its own capability trait
//! and lets the platform integration implement it over whatever interrupt
//! controller it has.
//!
//! On hardware, mutual exclusion between poll tasks comes for free: the
//! line stays masked from the moment an interrupt fires until the matching
//! poll task completes, so a second task can never be scheduled. [`IrqGate`]
//! replicates that bracket with an explicit single-slot state machine for
//! platforms where masking is not the only path into scheduling.

use core::sync::atomic::{AtomicU8, Ordering};

use bitflags::bitflags;

bitflags! {
    /// Trigger mode requested for the sensor interrupt line.
    pub struct TriggerFlags: u8 {
        const LEVEL_LOW    = 1 << 0;
        const LEVEL_HIGH   = 1 << 1;
        const EDGE_FALLING = 1 << 2;
        const EDGE_RISING  = 1 << 3;
    }
}

/// Control over one external interrupt line.
///
/// All methods take `&self`; implementations are expected to be internally
/// synchronized the way interrupt controllers are. Masking is idempotent:
/// the gate guarantees exactly one `enable` per completed poll task, never
/// a depth count.
pub trait InterruptLine {
    type Error: core::fmt::Debug;

    /// Claim the line in the given trigger mode. The line is unmasked on
    /// successful return.
    fn request(&self, flags: TriggerFlags) -> Result<(), Self::Error>;

    /// Release the line, blocking until any in-flight handler has finished.
    /// No handler runs for this line after `release` returns.
    fn release(&self);

    /// Unmask the line.
    fn enable(&self);

    /// Mask the line without waiting for running handlers to quiesce.
    fn disable_nosync(&self);

    /// Mark or unmark the line as a system wake source.
    fn set_wake(&self, enabled: bool);
}

/// Outcome of one interrupt firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqStatus {
    /// A poll task must be dispatched for this device.
    Scheduled,
    /// A poll is already queued or running; the firing was absorbed.
    Ignored,
}

const SLOT_IDLE: u8 = 0;
const SLOT_QUEUED: u8 = 1;
const SLOT_RUNNING: u8 = 2;

/// Per-device interrupt gate.
///
/// Owns the interrupt line and the single poll slot. The gate is the only
/// object shared between interrupt context and the deferred context, so all
/// methods take `&self` and the slot is a plain atomic.
#[derive(Debug)]
pub struct IrqGate<LINE> {
    line: LINE,
    slot: AtomicU8,
}

impl<LINE: InterruptLine> IrqGate<LINE> {
    pub const fn new(line: LINE) -> Self {
        Self {
            line,
            slot: AtomicU8::new(SLOT_IDLE),
        }
    }

    /// Interrupt-context entry point. Never blocks, never touches the bus.
    ///
    /// Masks the line, then claims the poll slot. Returns
    /// [`IrqStatus::Scheduled`] when the caller must dispatch one poll task;
    /// re-entrant firings while a poll is outstanding are absorbed.
    pub fn handle_interrupt(&self) -> IrqStatus {
        self.line.disable_nosync();
        match self.slot.compare_exchange(
            SLOT_IDLE,
            SLOT_QUEUED,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => IrqStatus::Scheduled,
            Err(_) => IrqStatus::Ignored,
        }
    }

    /// True while a poll task is queued or running.
    pub fn pending(&self) -> bool {
        self.slot.load(Ordering::Acquire) != SLOT_IDLE
    }

    pub(crate) fn line(&self) -> &LINE {
        &self.line
    }

    /// Claim the queued slot for execution. Fails when no poll was
    /// scheduled, which keeps a stray dispatch away from the bus and the
    /// line.
    pub(crate) fn begin_poll(&self) -> bool {
        self.slot
            .compare_exchange(
                SLOT_QUEUED,
                SLOT_RUNNING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Mark the running task finished and unmask the line.
    ///
    /// The slot must drop back to idle before the unmask: an interrupt
    /// arriving right after `enable` has to find the slot free or its event
    /// would be lost.
    pub(crate) fn finish_poll(&self) {
        self.slot.store(SLOT_IDLE, Ordering::Release);
        self.line.enable();
    }

    /// Cancel a poll that is queued but has not started.
    pub(crate) fn cancel_queued(&self) -> bool {
        self.slot
            .compare_exchange(SLOT_QUEUED, SLOT_IDLE, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// True while a poll task body is executing.
    pub(crate) fn running(&self) -> bool {
        self.slot.load(Ordering::Acquire) == SLOT_RUNNING
    }
}
