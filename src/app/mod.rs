//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the AuraLink station: the
//! per-cycle orchestration, the threshold/rule plumbing, and the owned
//! device state. All interaction with hardware and the network happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
