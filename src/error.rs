//! Error types used across modules.
//!
//! This module contains the error types that may be created and used within this crate. See
//! individual error types for documentation.

use std::{error, fmt};

/// The error type for calendar conversions.
#[cfg_attr(test, derive(PartialEq))]
pub enum Error {
	/// The supplied date cannot be expressed as a calendar time in the local time zone. The
	/// original fields are carried as the payload, month 1-based and year as the full 4-digit
	/// Gregorian year.
	NotRepresentable {
		/// 4-digit Gregorian year.
		year: i32,
		/// Month, 1-based.
		mon: i32,
		/// Day of the month.
		day: i32,
		/// Hours.
		hour: i32,
		/// Minutes.
		min: i32,
		/// Seconds.
		sec: i32
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::NotRepresentable { year, mon, day, hour, min, sec } => write!(
				f,
				"Not possible to convert \"{:04}-{:02}-{:02} {:02}:{:02}:{:02}\" to a calendar time in the local time zone",
				year, mon, day, hour, min, sec
			)
		}
	}
}

impl fmt::Debug for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_test() {
		let e = Error::NotRepresentable { year: 1970, mon: 2, day: 31, hour: 0, min: 0, sec: 0 };
		assert_eq!(
			e.to_string(),
			"Not possible to convert \"1970-02-31 00:00:00\" to a calendar time in the local time zone"
		);

		// Out-of-range fields keep their sign and width
		let e = Error::NotRepresentable { year: 2024, mon: 13, day: 1, hour: 25, min: 61, sec: 0 };
		assert!(e.to_string().contains("2024-13-01 25:61:00"));
	}
}
