#![no_std]
//! IT7260 Touch Screen Controller Library
//!
//! This library provides an interrupt-driven driver for the IT7260
//! capacitive touch screen controller. The sensor signals frame readiness
//! over a level-triggered interrupt line; reading the frame is a blocking
//! I2C transaction, so the read runs as a deferred poll task outside
//! interrupt context while the line stays masked.
//!
//! Wiring order: place an [`irq::IrqGate`] where both contexts can reach it,
//! bind the device with [`it7260::lifecycle::It7260Binding::bind`], then run
//! [`it7260::blocking::It7260::poll_once`] from the deferred context each
//! time [`irq::IrqGate::handle_interrupt`] reports a scheduled poll.

/// IT7260 touch screen controller driver.
pub mod it7260;

/// Interrupt line control and the single-slot poll gate.
pub mod irq;

/// Driver identity registry for device discovery.
pub mod registry;

/// Consumer-facing input event sink interface.
pub mod sink;

#[cfg(test)]
extern crate std;

#[cfg(test)]
pub(crate) mod testutil;
