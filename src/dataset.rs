//! Fixture data model and per-zone dataset assembly.

use std::collections::BTreeMap;

use color_eyre::eyre::{Result, WrapErr};
use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::epoch::EpochConverter;
use crate::provider::{TzdbSource, SOURCE, SOURCE_VERSION};
use crate::sampling;

/// Classifies a test point within a zone's entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleKind {
    /// One minute before an offset transition.
    #[serde(rename = "A")]
    BeforeTransition,
    /// The exact instant of an offset transition.
    #[serde(rename = "B")]
    AtTransition,
    /// Local midnight on the second day of a month.
    #[serde(rename = "S")]
    MonthStart,
    /// 23:00 local time on December 31.
    #[serde(rename = "Y")]
    YearEnd,
}

/// One sample point: epoch-relative seconds paired with the civil date-time
/// and offsets the zone assigns to that instant.
///
/// Field order matters: it is the wire order of the emitted JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestItem {
    pub epoch: i32,
    pub total_offset: i32,
    pub dst_offset: i32,
    #[serde(rename = "y")]
    pub year: i16,
    #[serde(rename = "M")]
    pub month: i8,
    #[serde(rename = "d")]
    pub day: i8,
    #[serde(rename = "h")]
    pub hour: i8,
    #[serde(rename = "m")]
    pub minute: i8,
    #[serde(rename = "s")]
    pub second: i8,
    pub abbrev: String,
    #[serde(rename = "type")]
    pub kind: SampleKind,
}

/// Per-zone test points: transition brackets and the periodic sample grid,
/// each in chronological order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TestEntry {
    pub transitions: Vec<TestItem>,
    pub samples: Vec<TestItem>,
}

/// The complete fixture document.
///
/// `test_data` is a `BTreeMap` so zones always serialize in lexicographic
/// order, independent of input order and of worker completion order.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationData {
    pub start_year: i32,
    pub until_year: i32,
    pub epoch_year: i32,
    pub source: &'static str,
    pub version: &'static str,
    pub tz_version: String,
    pub has_valid_abbrev: bool,
    pub has_valid_dst: bool,
    pub test_data: BTreeMap<String, TestEntry>,
}

/// Year range and epoch configuration for one generator run.
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    /// First year of the sampled range (inclusive).
    pub start_year: i32,
    /// End year of the sampled range (exclusive).
    pub until_year: i32,
    /// Year anchoring the emitted epoch seconds.
    pub epoch_year: i32,
}

/// Builds the full fixture for `zones`.
///
/// Zones are processed by a worker pool; extraction is read-only and
/// independent per zone, and the ordered map merge makes the result
/// identical to sequential processing. Any unresolvable zone aborts the
/// whole run: the fixture is all-or-nothing.
pub fn build_validation_data(
    options: &GenerateOptions,
    source: &TzdbSource,
    zones: &[String],
) -> Result<ValidationData> {
    let epoch = EpochConverter::new(options.epoch_year)?;

    let test_data = zones
        .par_iter()
        .map(|zone| {
            let entry = zone_entry(options, source, &epoch, zone)
                .wrap_err_with(|| format!("failed to process zone `{zone}`"))?;
            info!(
                "zone {zone}: {} transitions, {} samples",
                entry.transitions.len(),
                entry.samples.len()
            );
            Ok((zone.clone(), entry))
        })
        .collect::<Result<BTreeMap<String, TestEntry>>>()?;

    Ok(ValidationData {
        start_year: options.start_year,
        until_year: options.until_year,
        epoch_year: options.epoch_year,
        source: SOURCE,
        version: SOURCE_VERSION,
        tz_version: source.tz_version().to_string(),
        has_valid_abbrev: true,
        has_valid_dst: true,
        test_data,
    })
}

fn zone_entry(
    options: &GenerateOptions,
    source: &TzdbSource,
    epoch: &EpochConverter,
    zone: &str,
) -> Result<TestEntry> {
    let tz = source.resolve(zone)?;
    let start = local_year_start(&tz, options.start_year)?;
    let until = local_year_start(&tz, options.until_year)?;

    Ok(TestEntry {
        transitions: sampling::transition_items(&tz, epoch, start, until, options.start_year)?,
        samples: sampling::sample_items(&tz, epoch, start, until)?,
    })
}

/// The instant of local January 1, 00:00:00 of `year`, resolved leniently.
fn local_year_start(tz: &TimeZone, year: i32) -> Result<Timestamp> {
    let year = i16::try_from(year).wrap_err_with(|| format!("year {year} out of range"))?;
    let midnight = Date::new(year, 1, 1)?.at(0, 0, 0, 0);
    Ok(tz.to_timestamp(midnight)?)
}
