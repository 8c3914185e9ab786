//! Parsing date/time strings with the host `strptime`.
//!
//! Formats use host strptime syntax plus the same `%L` milliseconds extension accepted by the
//! formatting side: at a `%L` boundary, one to three ASCII digits are read from the input as
//! the millisecond value. Parsing never fails with an error; input that does not match the
//! format yields the all-zero [`DateTime`].
//!
//! # Examples
//!
//! ```
//! # use simtime::{DateTime, parse_date};
//! assert_eq!(
//! 	parse_date("2024-06-15 12:30:45.123", "%Y-%m-%d %H:%M:%S.%L"),
//! 	DateTime { ms: 123, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 }
//! );
//! assert_eq!(parse_date("nonsense", "%Y-%m-%d"), DateTime::default());
//! ```

use crate::calendar::DateTime;
#[cfg(feature = "time")]
use crate::host;

/// Parse one to three millisecond digits from the start of `bytes`.
///
/// Greedy up to three digits, so surplus digits stay unconsumed. At least one digit is
/// required.
#[cfg(feature = "time")]
fn parse_millis(bytes: &[u8]) -> Option<(&[u8], i32)> {
	let mut value = 0;
	let mut digits = 0;
	while digits < 3 {
		match bytes.get(digits).copied() {
			Some(d @ b'0'..=b'9') => value = value * 10 + i32::from(d - b'0'),
			_ => break
		}
		digits += 1;
	}
	if digits == 0 {
		None
	} else {
		Some((&bytes[digits..], value))
	}
}

/// Drive the host parser across the `%L` boundaries of `format`.
///
/// The format is split into plain strptime segments around each `%L` (escaped `%%` never
/// starts a boundary, so a literal `%L` can be matched with `%%L`). Each segment consumes a
/// prefix of the remaining input through the host parser; each boundary consumes the
/// millisecond digits directly. Fields the format never names keep the host zero values.
#[cfg(feature = "time")]
fn parse_with_millis(input: &str, format: &str) -> Option<DateTime> {
	// Safety: tm is a plain C struct and all-zero bytes is a valid value for it.
	let mut fields: libc::tm = unsafe { core::mem::zeroed() };
	let mut ms = 0;
	let mut rest = input.as_bytes();

	let bytes = format.as_bytes();
	let mut seg_start = 0;
	let mut i = 0;
	while i < bytes.len() {
		if bytes[i] == b'%' && i + 1 < bytes.len() {
			if bytes[i + 1] == b'L' {
				let segment = &format[seg_start..i];
				if !segment.is_empty() {
					rest = host::parse_prefix(rest, segment, &mut fields)?;
				}
				(rest, ms) = parse_millis(rest)?;
				seg_start = i + 2;
			}
			// Any other specifier, %% included, belongs to the current segment
			i += 2;
		} else {
			i += 1;
		}
	}
	let segment = &format[seg_start..];
	if !segment.is_empty() {
		host::parse_prefix(rest, segment, &mut fields)?;
	}

	Some(DateTime::from_host(&fields, ms))
}

/// Parse `input` according to `format`, host strptime syntax plus the `%L` milliseconds
/// extension.
///
/// On success the parsed fields are returned with month rebased to 1-based and year to the
/// full 4-digit Gregorian year; fields the format does not name keep the host zero values, so
/// a time-only format yields day 0, month 1 and year 1900. Trailing input beyond the format is
/// ignored.
///
/// Parsing failure is soft: input that does not match the format yields the all-zero
/// [`DateTime`], indistinguishable from a partially matching one that parsed all fields as
/// zero.
///
/// # Examples
///
/// ```
/// # use simtime::{DateTime, parse_date};
/// assert_eq!(
/// 	parse_date("2024-06-15 12:30:45.123", "%Y-%m-%d %H:%M:%S.%L"),
/// 	DateTime { ms: 123, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 }
/// );
/// assert_eq!(parse_date("garbage", "%Y-%m-%d"), DateTime::default());
/// ```
#[cfg(feature = "time")]
pub fn parse_date(input: &str, format: &str) -> DateTime {
	parse_with_millis(input, format).unwrap_or_default()
}

/// Stub used when host time support is disabled; always returns the all-zero [`DateTime`].
#[cfg(not(feature = "time"))]
pub fn parse_date(_input: &str, _format: &str) -> DateTime {
	DateTime::default()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[cfg(feature = "time")]
	#[test]
	fn parse_date_test() {
		assert_eq!(
			parse_date("2024-06-15 12:30:45.123", "%Y-%m-%d %H:%M:%S.%L"),
			DateTime { ms: 123, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 }
		);

		// Without the milliseconds extension
		assert_eq!(
			parse_date("2024-06-15", "%Y-%m-%d"),
			DateTime { ms: 0, sec: 0, min: 0, hour: 0, day: 15, mon: 6, year: 2024 }
		);

		// Fields the format never names keep the host zero values
		assert_eq!(
			parse_date("12:30:45", "%H:%M:%S"),
			DateTime { ms: 0, sec: 45, min: 30, hour: 12, day: 0, mon: 1, year: 1900 }
		);
	}

	#[cfg(feature = "time")]
	#[test]
	fn parse_millis_test() {
		// One to three digits, surplus digits stay unconsumed
		assert_eq!(
			parse_date("12:30:45.7", "%H:%M:%S.%L"),
			DateTime { ms: 7, sec: 45, min: 30, hour: 12, day: 0, mon: 1, year: 1900 }
		);
		assert_eq!(
			parse_date("12:30:45.1234", "%H:%M:%S.%L"),
			DateTime { ms: 123, sec: 45, min: 30, hour: 12, day: 0, mon: 1, year: 1900 }
		);

		// %L with no digits in the input is a parse failure
		assert_eq!(parse_date("12:30:45.", "%H:%M:%S.%L"), DateTime::default());
	}

	#[cfg(feature = "time")]
	#[test]
	fn parse_failure_test() {
		assert_eq!(parse_date("nonsense", "%Y-%m-%d"), DateTime::default());
		assert_eq!(parse_date("", "%Y"), DateTime::default());
		assert_eq!(parse_date("2024-13", "%Y-%m"), DateTime::default());
	}

	#[cfg(feature = "time")]
	#[test]
	fn escaped_percent_test() {
		// %% matches a literal percent sign and never starts a %L boundary
		assert_eq!(
			parse_date("%12", "%%%H"),
			DateTime { ms: 0, sec: 0, min: 0, hour: 12, day: 0, mon: 1, year: 1900 }
		);
	}

	#[cfg(feature = "time")]
	#[test]
	fn trailing_input_test() {
		// Input beyond the format is ignored, as the host parser does
		assert_eq!(
			parse_date("2024-06-15 and more", "%Y-%m-%d"),
			DateTime { ms: 0, sec: 0, min: 0, hour: 0, day: 15, mon: 6, year: 2024 }
		);
	}

	#[cfg(not(feature = "time"))]
	#[test]
	fn disabled_test() {
		assert_eq!(parse_date("2024-06-15", "%Y-%m-%d"), DateTime::default());
	}
}
