//! Extraction of transition brackets and periodic samples for one zone.

use color_eyre::eyre::Result;
use jiff::civil::Date;
use jiff::tz::{Dst, TimeZone};
use jiff::Timestamp;

use crate::dataset::{SampleKind, TestItem};
use crate::epoch::EpochConverter;

/// Emits an A/B pair for every offset transition in `[start, until)`.
///
/// `TimeZone::following` yields exactly the interval starts strictly inside
/// the half-open range; the interval already active at `start` has no start
/// within the range and is never visited. Transitions whose civil year (in
/// the zone) is not greater than `start_year` are skipped: an interval
/// beginning at the window boundary reflects the already-active offset, not
/// an observed transition, and emitting it would fabricate a phantom
/// transition. A real transition very early in the first year is dropped by
/// the same rule; downstream consumers rely on that historical behavior.
pub fn transition_items(
    tz: &TimeZone,
    epoch: &EpochConverter,
    start: Timestamp,
    until: Timestamp,
    start_year: i32,
) -> Result<Vec<TestItem>> {
    let mut items = Vec::new();
    for transition in tz.following(start) {
        let at = transition.timestamp();
        if at >= until {
            break;
        }
        if i32::from(tz.to_datetime(at).year()) <= start_year {
            continue;
        }
        let before = Timestamp::from_second(at.as_second() - 60)?;
        items.push(test_item(tz, epoch, before, SampleKind::BeforeTransition));
        items.push(test_item(tz, epoch, at, SampleKind::AtTransition));
    }
    Ok(items)
}

/// Emits the periodic sample grid: local midnight on the second of every
/// month, plus 23:00 on December 31, for every civil year in the range.
///
/// Day 2 rather than day 1: midnight on January 1 can sit exactly on (or one
/// offset shy of) the custom epoch origin in some zones, flipping the civil
/// year once offset-relative arithmetic is applied downstream and throwing
/// off consumers that size buffers by sampling whole years.
pub fn sample_items(
    tz: &TimeZone,
    epoch: &EpochConverter,
    start: Timestamp,
    until: Timestamp,
) -> Result<Vec<TestItem>> {
    let first = tz.to_datetime(start).year();
    let last = tz.to_datetime(until).year();

    let mut items = Vec::new();
    for year in first..last {
        for month in 1..=12 {
            let at = resolve_local(tz, year, month, 2, 0)?;
            items.push(test_item(tz, epoch, at, SampleKind::MonthStart));
        }
        let at = resolve_local(tz, year, 12, 31, 23)?;
        items.push(test_item(tz, epoch, at, SampleKind::YearEnd));
    }
    Ok(items)
}

/// Resolves a civil local time in `tz` with jiff's Compatible policy: the
/// earlier instant for a repeated hour, the instant after the gap for a
/// skipped hour. This is the generator's lenient disambiguation rule;
/// fixtures from providers with a different rule can disagree at sample
/// points that land on a transition.
fn resolve_local(tz: &TimeZone, year: i16, month: i8, day: i8, hour: i8) -> Result<Timestamp> {
    let local = Date::new(year, month, day)?.at(hour, 0, 0, 0);
    Ok(tz.to_timestamp(local)?)
}

/// Builds one test point by re-resolving the offset info active at `at`.
///
/// Offsets and civil fields are always read back from the zone at the exact
/// instant, never inherited from an iterated transition, so A items pick up
/// the pre-transition interval and B items the post-transition one.
fn test_item(tz: &TimeZone, epoch: &EpochConverter, at: Timestamp, kind: SampleKind) -> TestItem {
    let info = tz.to_offset_info(at);
    let total_offset = info.offset().seconds();
    let dst_offset = dst_offset_seconds(tz, at, total_offset, info.dst() == Dst::Yes);
    let civil = tz.to_datetime(at);

    TestItem {
        epoch: epoch.to_epoch_seconds(at),
        total_offset,
        dst_offset,
        year: civil.year(),
        month: civil.month(),
        day: civil.day(),
        hour: civil.hour(),
        minute: civil.minute(),
        second: civil.second(),
        abbrev: info.abbreviation().to_string(),
        kind,
    }
}

/// Recovers the DST portion of `total_offset` at `at`.
///
/// TZif data flags an interval as DST but does not record the savings
/// amount, so it is reconstructed as the difference from the nearest
/// standard-time offset: the most recent non-DST transition before `at`,
/// falling back to the next one after it. A zone that never observes
/// standard time reports 0. Note the difference can be negative (zones
/// modeled with negative savings, e.g. Europe/Dublin winters).
fn dst_offset_seconds(tz: &TimeZone, at: Timestamp, total_offset: i32, is_dst: bool) -> i32 {
    if !is_dst {
        return 0;
    }
    for transition in tz.preceding(at) {
        if transition.dst() == Dst::No {
            return total_offset - transition.offset().seconds();
        }
    }
    for transition in tz.following(at) {
        if transition.dst() == Dst::No {
            return total_offset - transition.offset().seconds();
        }
    }
    0
}
