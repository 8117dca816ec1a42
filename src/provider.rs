//! Thin adapter over the jiff time zone database.

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use jiff::tz::{TimeZone, TimeZoneDatabase};

/// Identifier of the backing provider, reported in the fixture header.
pub const SOURCE: &str = "jiff";

/// Version of the provider library, reported in the fixture header.
pub const SOURCE_VERSION: &str = "0.2";

/// A read-only time zone database snapshot for one generator run.
///
/// The default is the tzdb copy bundled by `jiff-tzdb`, so output never
/// depends on the host's `/usr/share/zoneinfo`. An alternate database can
/// be loaded from a zoneinfo directory of compiled TZif files.
#[derive(Debug)]
pub struct TzdbSource {
    database: TimeZoneDatabase,
    tz_version: &'static str,
}

impl TzdbSource {
    pub fn bundled() -> Self {
        Self {
            database: TimeZoneDatabase::bundled(),
            tz_version: jiff_tzdb::VERSION.unwrap_or("unknown"),
        }
    }

    pub fn from_dir(path: &Path) -> Result<Self> {
        let database = TimeZoneDatabase::from_dir(path).wrap_err_with(|| {
            format!("failed to load time zone database from `{}`", path.display())
        })?;
        // TZif trees carry no version marker the database exposes.
        Ok(Self {
            database,
            tz_version: "unknown",
        })
    }

    pub fn resolve(&self, name: &str) -> Result<TimeZone> {
        self.database
            .get(name)
            .wrap_err_with(|| format!("unknown time zone `{name}`"))
    }

    pub fn tz_version(&self) -> &'static str {
        self.tz_version
    }
}
