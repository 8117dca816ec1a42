//! Generates JSON validation fixtures of IANA time zone data.
//!
//! For a configured list of time zones and a year range, the generator
//! records every UTC-offset transition (bracketed by a sample one minute
//! before and a sample at the exact transition instant) together with a
//! fixed grid of monthly and year-end samples. The resulting document is a
//! deterministic reference fixture: an independent time zone engine can be
//! cross-checked against it point by point.
//!
//! Time zone resolution, transition enumeration, and local-time
//! disambiguation are delegated to [`jiff`]; this crate only shapes the
//! provider's answers into the fixture format.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod dataset;
pub mod epoch;
pub mod json;
pub mod provider;
pub mod sampling;
