//! Core types shared across the notebook facilities
//!
//! This crate provides the canonical schema constants used by both the
//! error handling and logging facilities, so that every crate emits the
//! same field keys and event names.

pub mod schema;
