//! CSV export of run time series.

use std::io::Write;

use crate::ResultsResult;
use crate::types::TimeseriesRecord;

pub const CSV_HEADER: &str = "time_s,reference,output,control";

/// Write records as `time_s,reference,output,control` rows.
pub fn write_csv<W: Write>(records: &[TimeseriesRecord], mut out: W) -> ResultsResult<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for r in records {
        writeln!(out, "{},{},{},{}", r.time_s, r.reference, r.output, r.control)?;
    }
    out.flush()?;
    Ok(())
}

/// Write one `(time, value)` series as `time_s,<name>` rows.
pub fn write_series_csv<W: Write>(
    name: &str,
    series: &[(f64, f64)],
    mut out: W,
) -> ResultsResult<()> {
    writeln!(out, "time_s,{name}")?;
    for (t, v) in series {
        writeln!(out, "{t},{v}")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let records = vec![
            TimeseriesRecord {
                time_s: 0.0,
                reference: 400.0,
                output: 0.0,
                control: 100.0,
            },
            TimeseriesRecord {
                time_s: 0.1,
                reference: 400.0,
                output: 0.5,
                control: 100.0,
            },
        ];
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "0,400,0,100");
        assert_eq!(lines[2], "0.1,400,0.5,100");
    }

    #[test]
    fn writes_single_series() {
        let mut buf = Vec::new();
        write_series_csv("output", &[(0.0, 0.0), (0.1, 0.5)], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "time_s,output\n0,0\n0.1,0.5\n");
    }
}
