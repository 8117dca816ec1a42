//! Conversion from absolute timestamps to the fixture's custom epoch.

use color_eyre::eyre::{Result, WrapErr};
use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;

/// Converts absolute timestamps into seconds relative to a configurable
/// epoch of January 1, 00:00:00 UTC of a given year.
///
/// The offset between the Unix epoch and the custom epoch is computed once;
/// January 1 at midnight UTC is never ambiguous, so no disambiguation policy
/// is involved.
#[derive(Debug, Clone, Copy)]
pub struct EpochConverter {
    epoch_offset: i64,
}

impl EpochConverter {
    pub fn new(epoch_year: i32) -> Result<Self> {
        let year = i16::try_from(epoch_year)
            .wrap_err_with(|| format!("epoch year {epoch_year} out of range"))?;
        let origin = Date::new(year, 1, 1)?.at(0, 0, 0, 0);
        let timestamp = TimeZone::UTC.to_timestamp(origin)?;
        Ok(Self {
            epoch_offset: timestamp.as_second(),
        })
    }

    /// Epoch-relative seconds for `timestamp`, truncated to the signed
    /// 32-bit range expected by the fixed-width downstream consumer.
    /// Values far from the epoch wrap; that truncation is part of the
    /// fixture format and is deliberately not widened here.
    pub fn to_epoch_seconds(&self, timestamp: Timestamp) -> i32 {
        (timestamp.as_second() - self.epoch_offset) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::EpochConverter;
    use jiff::Timestamp;

    #[test]
    fn epoch_origin_is_zero() {
        // Unix seconds of 2000-01-01T00:00:00Z and 2050-01-01T00:00:00Z.
        for (year, unix) in [(1970, 0), (2000, 946_684_800), (2050, 2_524_608_000)] {
            let converter = EpochConverter::new(year).unwrap();
            let origin = Timestamp::from_second(unix).unwrap();
            assert_eq!(converter.to_epoch_seconds(origin), 0);
        }
    }

    #[test]
    fn relative_to_unix_epoch() {
        let converter = EpochConverter::new(2000).unwrap();
        assert_eq!(
            converter.to_epoch_seconds(Timestamp::UNIX_EPOCH),
            -946_684_800
        );
    }

    #[test]
    fn out_of_range_values_wrap() {
        // 1900-01-01T00:00:00Z is -2208988800 Unix seconds; relative to the
        // 2050 epoch that is -4733596800, which is below i32::MIN and wraps.
        let converter = EpochConverter::new(2050).unwrap();
        let timestamp = Timestamp::from_second(-2_208_988_800).unwrap();
        assert_eq!(converter.to_epoch_seconds(timestamp), -438_629_504);
    }
}
