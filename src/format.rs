//! Formatting date/time fields into strings with the host `strftime`.
//!
//! The host formatter has no conversion for milliseconds, so formats accept one extension: the
//! two-character sequence `%L`, replaced by the zero-padded 3-digit millisecond value before
//! the format is handed to the host. Escaped percent signs are honored, so `%%L` produces a
//! literal `%L` in the output.
//!
//! # Examples
//!
//! ```
//! # use simtime::{DateTime, format_date};
//! let date = DateTime { ms: 7, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 };
//! assert_eq!(
//! 	format_date(date, "%Y-%m-%d %H:%M:%S.%L", 64).unwrap(),
//! 	"2024-06-15 12:30:45.007"
//! );
//! ```

use crate::calendar::DateTime;
use crate::error::Error;
#[cfg(feature = "time")]
use crate::host;

/// Expand every `%L` in `format` with the zero-padded 3-digit `ms` value.
///
/// A single pass over the format recognizes four token kinds: literal text, the escaped
/// percent `%%`, the `%L` milliseconds specifier, and any other conversion specifier. Escaped
/// percents and other specifiers pass through untouched, so the substitution can never fire
/// inside `%%L`.
#[cfg(feature = "time")]
fn expand_format(format: &str, ms: i32) -> String {
	let mut out = String::with_capacity(format.len() + 4);
	let mut chars = format.chars();
	while let Some(c) = chars.next() {
		if c != '%' {
			out.push(c);
			continue;
		}
		match chars.next() {
			Some('L') => out.push_str(&format!("{:03}", ms)),
			Some('%') => out.push_str("%%"),
			Some(other) => {
				out.push('%');
				out.push(other);
			},
			None => out.push('%')
		}
	}
	out
}

/// Format `date` according to `format`, host strftime syntax plus the `%L` milliseconds
/// extension.
///
/// The output buffer is sized to `max_size` bytes; the formatted result is at most
/// `max_size - 1` bytes long and ownership of it passes to the caller. Formatting failure is
/// soft: if the host formatter reports an empty result or the output does not fit `max_size`,
/// the empty string is returned. With the `locale` feature (default), month and weekday names
/// are formatted in the invariant "C" locale regardless of the process locale.
///
/// # Errors
///
/// [`Error::NotRepresentable`] if the host cannot express `date` as a calendar time in the
/// local time zone.
///
/// # Examples
///
/// ```
/// # use simtime::{DateTime, format_date};
/// let date = DateTime { ms: 7, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 };
/// assert_eq!(format_date(date, "%Y-%L", 32).unwrap(), "2024-007");
///
/// // %%L escapes the percent sign, so no millisecond substitution happens
/// assert_eq!(format_date(date, "%%L", 32).unwrap(), "%L");
///
/// // An output that does not fit comes back empty
/// assert_eq!(format_date(date, "%Y-%m-%d", 5).unwrap(), "");
/// ```
#[cfg(feature = "time")]
pub fn format_date(date: DateTime, format: &str, max_size: usize) -> Result<String, Error> {
	let fields = match date.instant()?.to_local() {
		Some(fields) => fields,
		None => return Ok(String::new())
	};
	Ok(host::format_fields(&fields, &expand_format(format, date.ms), max_size).unwrap_or_default())
}

/// Stub used when host time support is disabled; always returns the empty string.
#[cfg(not(feature = "time"))]
pub fn format_date(_date: DateTime, _format: &str, _max_size: usize) -> Result<String, Error> {
	Ok(String::new())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[cfg(feature = "time")]
	#[test]
	fn expand_format_test() {
		assert_eq!(expand_format("%Y-%L", 7), "%Y-007");
		assert_eq!(expand_format("%L", 0), "000");
		assert_eq!(expand_format("a%Lb%Lc", 12), "a012b012c");
		assert_eq!(expand_format("%j %L %%", 999), "%j 999 %%");

		// Escaped percents shield the L from substitution
		assert_eq!(expand_format("%%L", 123), "%%L");
		assert_eq!(expand_format("%%%L", 123), "%%123");

		// A trailing lone percent stays put
		assert_eq!(expand_format("100%", 1), "100%");
	}

	#[cfg(feature = "time")]
	#[test]
	fn format_date_test() {
		let date = DateTime { ms: 7, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 };
		assert!(format_date(date, "%Y-%L", 32).unwrap().ends_with("-007"));
		assert_eq!(format_date(date, "%Y-%m-%d %H:%M:%S.%L", 64).unwrap(), "2024-06-15 12:30:45.007");
		assert_eq!(format_date(date, "%%L", 32).unwrap(), "%L");
	}

	#[cfg(feature = "time")]
	#[test]
	fn overflow_test() {
		let date = DateTime { ms: 0, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 };
		// "2024-06-15" needs 10 bytes plus the terminator
		assert_eq!(format_date(date, "%Y-%m-%d", 5).unwrap(), "");
		assert_eq!(format_date(date, "%Y-%m-%d", 10).unwrap(), "");
		assert_eq!(format_date(date, "%Y-%m-%d", 11).unwrap(), "2024-06-15");
		assert_eq!(format_date(date, "%Y-%m-%d", 0).unwrap(), "");
	}

	#[cfg(all(feature = "time", feature = "locale"))]
	#[test]
	fn invariant_locale_test() {
		// Month names come from the "C" locale no matter what the process locale says
		let date = DateTime { ms: 0, sec: 0, min: 0, hour: 12, day: 15, mon: 6, year: 2024 };
		assert_eq!(format_date(date, "%d %b %Y", 32).unwrap(), "15 Jun 2024");
	}

	#[cfg(not(feature = "time"))]
	#[test]
	fn disabled_test() {
		let date = DateTime { ms: 7, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 };
		assert_eq!(format_date(date, "%Y-%L", 32).unwrap(), "");
	}
}
