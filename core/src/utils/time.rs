use chrono::{DateTime, SecondsFormat};
use log::warn;

/// Convert Windows filetime values to unixepoch
pub(crate) fn filetime_to_unixepoch(filetime: &u64) -> i64 {
    let windows_nano = 10000000;
    let seconds_to_unix: i64 = 11644473600;

    // We should not overflow because of the division.
    (filetime / windows_nano) as i64 - seconds_to_unix
}

/// Convert unixepoch seconds to an ISO8601 formatted string
pub(crate) fn unixepoch_to_iso(timestamp: &i64) -> String {
    let date = DateTime::from_timestamp(*timestamp, 0);
    match date {
        Some(result) => result.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => {
            warn!("[time] Could not represent {timestamp} as a datetime");
            String::from("1970-01-01T00:00:00.000Z")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::time::{filetime_to_unixepoch, unixepoch_to_iso};

    #[test]
    fn test_filetime_to_unixepoch() {
        let test = 132244766418940254;
        assert_eq!(filetime_to_unixepoch(&test), 1580003041);
    }

    #[test]
    fn test_unixepoch_to_iso() {
        let test = 1574819646;
        assert_eq!(unixepoch_to_iso(&test), "2019-11-27T01:54:06.000Z");
    }

    #[test]
    fn test_unixepoch_to_iso_zero() {
        let test = 0;
        assert_eq!(unixepoch_to_iso(&test), "1970-01-01T00:00:00.000Z");
    }
}
