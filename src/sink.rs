//! Consumer-facing input event sink.
//!
//! The consumer (an input subsystem, a UI event queue, a test recorder)
//! implements [`EventSink`]; the driver reports decoded touch state through
//! it. Methods take `&self` because the poll task reports events while the
//! lifecycle controller holds the registration; the driver's poll protocol
//! guarantees the calls are never concurrent for one sink instance, so
//! implementations only need interior mutability, not locking around whole
//! batches.

use num_enum::IntoPrimitive;

/// Absolute axis reported to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X = 0x00,
    Y = 0x01,
    Pressure = 0x02,
}

/// Button reported to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Touch = 0x00,
}

/// Value range advertised for one absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AbsRange {
    pub min: u16,
    pub max: u16,
}

/// Capability set advertised to the consumer at bind time.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    pub touch_button: bool,
    pub abs_x: AbsRange,
    pub abs_y: AbsRange,
    pub abs_pressure: AbsRange,
}

/// Input event consumer.
///
/// `configure`/`register`/`unregister` bracket the device lifecycle; the
/// report methods carry one batch of state changes and `sync` flushes the
/// batch to the consumer.
pub trait EventSink {
    type Error: core::fmt::Debug;

    /// Advertise the capability set before registration.
    fn configure(&self, caps: &Capabilities) -> Result<(), Self::Error>;

    /// Make the sink visible to the consumer side.
    fn register(&self) -> Result<(), Self::Error>;

    /// Withdraw the sink. Called after the last report has been flushed.
    fn unregister(&self);

    /// Report a button state transition.
    fn report_button(&self, button: Button, pressed: bool);

    /// Report an absolute axis position.
    fn report_absolute(&self, axis: Axis, value: u16);

    /// Flush the current event batch.
    fn sync(&self);
}
