//! Hand-written test doubles for the embedded-hal and driver interfaces.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, AtomicUsize, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation};

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use std::vec::Vec;

use crate::irq::{InterruptLine, TriggerFlags};
use crate::it7260::RawFrame;
use crate::sink::{Axis, Button, Capabilities, EventSink};

#[derive(Debug)]
pub(crate) struct BusError(pub ErrorKind);

impl i2c::Error for BusError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// I2C double serving one fixed frame per read.
#[derive(Debug)]
pub(crate) struct MockBus {
    frame: RawFrame,
    fail: bool,
    hold_ms: u64,
    pub reads: Arc<AtomicUsize>,
    pub read_started: Arc<AtomicBool>,
}

impl MockBus {
    pub fn with_frame(frame: RawFrame) -> Self {
        Self {
            frame,
            fail: false,
            hold_ms: 0,
            reads: Arc::new(AtomicUsize::new(0)),
            read_started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Every transaction fails with a bus error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_frame([0; crate::it7260::FRAME_LEN])
        }
    }

    /// Transactions block for `hold_ms` before completing, so a test can
    /// overlap an unbind with an in-flight read.
    pub fn slow(frame: RawFrame, hold_ms: u64) -> Self {
        Self {
            hold_ms,
            ..Self::with_frame(frame)
        }
    }
}

impl ErrorType for MockBus {
    type Error = BusError;
}

impl I2c for MockBus {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.read_started.store(true, Ordering::SeqCst);

        if self.fail {
            return Err(BusError(ErrorKind::Other));
        }
        if self.hold_ms > 0 {
            thread::sleep(Duration::from_millis(self.hold_ms));
        }

        for op in operations {
            if let Operation::Read(buf) = op {
                for (dst, src) in buf.iter_mut().zip(self.frame.iter()) {
                    *dst = *src;
                }
            }
        }
        Ok(())
    }
}

/// Interrupt line double counting mask transitions.
#[derive(Debug, Default)]
pub(crate) struct MockLine {
    pub enables: AtomicU32,
    pub disables: AtomicU32,
    pub requested: AtomicU8,
    pub released: AtomicBool,
    pub wake: AtomicBool,
    fail_request: bool,
}

impl MockLine {
    pub fn failing_request() -> Self {
        Self {
            fail_request: true,
            ..Self::default()
        }
    }
}

impl InterruptLine for MockLine {
    type Error = ();

    fn request(&self, flags: TriggerFlags) -> Result<(), Self::Error> {
        if self.fail_request {
            return Err(());
        }
        self.requested.store(flags.bits(), Ordering::SeqCst);
        Ok(())
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }

    fn enable(&self) {
        self.enables.fetch_add(1, Ordering::SeqCst);
    }

    fn disable_nosync(&self) {
        self.disables.fetch_add(1, Ordering::SeqCst);
    }

    fn set_wake(&self, enabled: bool) {
        self.wake.store(enabled, Ordering::SeqCst);
    }
}

/// One recorded sink invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SinkCall {
    Configure,
    Register,
    Unregister,
    Button(Button, bool),
    Absolute(Axis, u16),
    Sync,
}

/// Event sink double recording the exact call sequence.
#[derive(Debug, Default)]
pub(crate) struct MockSink {
    calls: Mutex<Vec<SinkCall>>,
    fail_configure: bool,
    fail_register: bool,
}

impl MockSink {
    pub fn failing_configure() -> Self {
        Self {
            fail_configure: true,
            ..Self::default()
        }
    }

    pub fn failing_register() -> Self {
        Self {
            fail_register: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: SinkCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl EventSink for MockSink {
    type Error = ();

    fn configure(&self, _caps: &Capabilities) -> Result<(), Self::Error> {
        if self.fail_configure {
            return Err(());
        }
        self.record(SinkCall::Configure);
        Ok(())
    }

    fn register(&self) -> Result<(), Self::Error> {
        if self.fail_register {
            return Err(());
        }
        self.record(SinkCall::Register);
        Ok(())
    }

    fn unregister(&self) {
        self.record(SinkCall::Unregister);
    }

    fn report_button(&self, button: Button, pressed: bool) {
        self.record(SinkCall::Button(button, pressed));
    }

    fn report_absolute(&self, axis: Axis, value: u16) {
        self.record(SinkCall::Absolute(axis, value));
    }

    fn sync(&self) {
        self.record(SinkCall::Sync);
    }
}

/// Delay double accumulating requested wait time instead of sleeping.
#[derive(Debug, Default)]
pub(crate) struct MockDelay {
    pub total_ms: AtomicU32,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms.fetch_add(ns / 1_000_000, Ordering::SeqCst);
    }
}
