//! Streaming JSON emission of the fixture document.

use std::io::Write;

use color_eyre::eyre::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::dataset::ValidationData;

/// Serializes `data` to `out` as pretty-printed JSON with two-space indents
/// and a trailing newline.
///
/// The document is streamed field by field straight from the typed dataset;
/// no intermediate `serde_json::Value` tree is built, so memory stays
/// bounded for large zone/year counts. Output is a pure function of `data`:
/// struct field order fixes the wire order and the `BTreeMap` fixes zone
/// order, making runs byte-identical.
pub fn write_json<W: Write>(mut out: W, data: &ValidationData) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    data.serialize(&mut serializer)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::write_json;
    use crate::dataset::{SampleKind, TestEntry, TestItem, ValidationData};

    fn item(kind: SampleKind) -> TestItem {
        TestItem {
            epoch: -1_577_836_800,
            total_offset: 0,
            dst_offset: 0,
            year: 2000,
            month: 1,
            day: 2,
            hour: 0,
            minute: 0,
            second: 0,
            abbrev: "UTC".to_string(),
            kind,
        }
    }

    #[test]
    fn wire_format_is_stable() {
        let mut test_data = BTreeMap::new();
        test_data.insert(
            "UTC".to_string(),
            TestEntry {
                transitions: Vec::new(),
                samples: vec![item(SampleKind::MonthStart)],
            },
        );
        let data = ValidationData {
            start_year: 2000,
            until_year: 2001,
            epoch_year: 2050,
            source: "jiff",
            version: "0.2",
            tz_version: "2025b".to_string(),
            has_valid_abbrev: true,
            has_valid_dst: true,
            test_data,
        };

        let mut buffer = Vec::new();
        write_json(&mut buffer, &data).unwrap();
        let written = String::from_utf8(buffer).unwrap();

        let expected = r#"{
  "start_year": 2000,
  "until_year": 2001,
  "epoch_year": 2050,
  "source": "jiff",
  "version": "0.2",
  "tz_version": "2025b",
  "has_valid_abbrev": true,
  "has_valid_dst": true,
  "test_data": {
    "UTC": {
      "transitions": [],
      "samples": [
        {
          "epoch": -1577836800,
          "total_offset": 0,
          "dst_offset": 0,
          "y": 2000,
          "M": 1,
          "d": 2,
          "h": 0,
          "m": 0,
          "s": 0,
          "abbrev": "UTC",
          "type": "S"
        }
      ]
    }
  }
}
"#;
        assert_eq!(written, expected);
    }

    #[test]
    fn identical_input_yields_identical_bytes() {
        let data = ValidationData {
            start_year: 2000,
            until_year: 2002,
            epoch_year: 2050,
            source: "jiff",
            version: "0.2",
            tz_version: "2025b".to_string(),
            has_valid_abbrev: true,
            has_valid_dst: true,
            test_data: BTreeMap::new(),
        };

        let mut first = Vec::new();
        let mut second = Vec::new();
        write_json(&mut first, &data).unwrap();
        write_json(&mut second, &data).unwrap();
        assert_eq!(first, second);
    }
}
