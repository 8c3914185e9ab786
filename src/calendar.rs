//! Converting broken-down date/time fields to and from elapsed seconds.
//!
//! Elapsed seconds are counted from midnight, January 1 of a caller-chosen reference year, in
//! the local time zone. [`elapsed_seconds`] maps a [`DateTime`] to that offset and
//! [`from_elapsed_seconds`] maps the offset back to fields; both delegate the actual calendar
//! arithmetic to the host's local time conversion.
//!
//! Two dates get special treatment. January 1 of the reference year itself never touches the
//! host conversion: the offset is computed from the time-of-day fields alone, so reference
//! years the host calendar cannot represent still work. And a calendar time for January 1,
//! 1970 is never built directly, because some hosts cannot express the exact epoch in local
//! time; January 2 is built instead and compensated by one day.
//!
//! # Examples
//!
//! ```
//! # use simtime::{DateTime, elapsed_seconds, from_elapsed_seconds};
//! let date = DateTime { ms: 500, sec: 30, min: 15, hour: 2, day: 1, mon: 1, year: 2024 };
//! let elapsed = elapsed_seconds(date, 2024).unwrap();
//! assert_eq!(elapsed, 2.0 * 3600.0 + 15.0 * 60.0 + 30.5);
//!
//! assert_eq!(from_elapsed_seconds(elapsed, 2024).unwrap(), date);
//! ```

#[cfg(feature = "time")]
use crate::host::CalendarTime;
#[cfg(feature = "now")]
use core::mem::MaybeUninit;
#[cfg(feature = "now")]
use libc::{CLOCK_REALTIME, clock_gettime, timespec};

use crate::error::Error;

/// Seconds per day.
#[cfg(feature = "time")]
const SECONDS_PER_DAY: i64 = 86400;

/// Broken-down date and time in the local time zone.
///
/// `mon` is 1-based and `year` is the full 4-digit Gregorian year, unlike the host's `tm`
/// convention. No field is range checked; out-of-range values are handed to the host calendar
/// conversion as-is, which either normalizes or rejects them.
///
/// The all-zero value (`DateTime::default()`) doubles as the soft-failure result of
/// [`parse_date`](crate::parse_date) and [`from_elapsed_seconds`].
///
/// # Examples
///
/// ```
/// # use simtime::DateTime;
/// let date = DateTime { ms: 123, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 };
/// assert_eq!(date.mon, 6);
/// assert_eq!(DateTime::default().year, 0);
/// ```
#[derive(Clone, Copy, Default)]
#[derive(Debug, PartialEq)]
pub struct DateTime {
	/// Milliseconds, ranged [0, 999]
	pub ms: i32,
	/// Seconds, ranged [0, 59]
	pub sec: i32,
	/// Minutes, ranged [0, 59]
	pub min: i32,
	/// Hours, ranged [0, 23]
	pub hour: i32,
	/// Day of the month, ranged [1, 31]
	pub day: i32,
	/// Month of the year, ranged [1, 12]
	pub mon: i32,
	/// 4-digit Gregorian year
	pub year: i32
}

impl DateTime {
	/// Build the calendar instant for this date's six whole-second fields.
	#[cfg(feature = "time")]
	pub(crate) fn instant(&self) -> Result<CalendarTime, Error> {
		CalendarTime::from_fields(self.sec, self.min, self.hour, self.day, self.mon, self.year)
	}

	/// Convert from the host representation, rebasing to 1-based month and 4-digit year.
	#[cfg(feature = "time")]
	pub(crate) fn from_host(fields: &libc::tm, ms: i32) -> DateTime {
		DateTime {
			ms,
			sec: fields.tm_sec,
			min: fields.tm_min,
			hour: fields.tm_hour,
			day: fields.tm_mday,
			mon: 1 + fields.tm_mon,
			year: 1900 + fields.tm_year
		}
	}
}

/// Get the elapsed seconds between `date` and midnight, January 1 of `ref_year`.
///
/// The result is negative for dates before the reference point. Milliseconds contribute
/// fractionally.
///
/// When `date` is January 1 of the reference year itself, the result is computed from the
/// time-of-day fields with no host conversion, so it is exact and works for reference years
/// outside the host calendar's range. Calendar times for January 1, 1970 (as the queried date
/// or as the reference date) are never built directly; January 2 is built and compensated by
/// one day.
///
/// # Errors
///
/// [`Error::NotRepresentable`] if the host cannot express `date` or the reference date as a
/// calendar time in the local time zone.
///
/// # Examples
///
/// ```
/// # use simtime::{DateTime, elapsed_seconds};
/// let date = DateTime { ms: 0, sec: 5, min: 0, hour: 0, day: 1, mon: 1, year: 1970 };
/// assert_eq!(elapsed_seconds(date, 1970).unwrap(), 5.0);
///
/// let date = DateTime { ms: 0, sec: 0, min: 0, hour: 0, day: 2, mon: 1, year: 1970 };
/// assert_eq!(elapsed_seconds(date, 1970).unwrap(), 86400.0);
/// ```
#[cfg(feature = "time")]
pub fn elapsed_seconds(date: DateTime, ref_year: i32) -> Result<f64, Error> {
	let ms = f64::from(date.ms) / 1000.0;
	if date.day == 1 && date.mon == 1 {
		if date.year == ref_year {
			return Ok(f64::from(60 * (60 * date.hour + date.min) + date.sec) + ms);
		}
		if date.year == 1970 {
			let end = CalendarTime::from_fields(date.sec, date.min, date.hour, 2, 1, 1970)?;
			let start = CalendarTime::from_fields(0, 0, 0, 1, 1, ref_year)?;
			return Ok(end - start - SECONDS_PER_DAY as f64 + ms);
		}
	}
	let end = date.instant()?;
	if ref_year == 1970 {
		let start = CalendarTime::from_fields(0, 0, 0, 2, 1, 1970)?;
		Ok(end - start + SECONDS_PER_DAY as f64 + ms)
	} else {
		let start = CalendarTime::from_fields(0, 0, 0, 1, 1, ref_year)?;
		Ok(end - start + ms)
	}
}

/// Stub used when host time support is disabled; always returns zero.
#[cfg(not(feature = "time"))]
pub fn elapsed_seconds(_date: DateTime, _ref_year: i32) -> Result<f64, Error> {
	Ok(0.0)
}

/// Convert elapsed seconds since midnight, January 1 of `ref_year` back into broken-down local
/// time.
///
/// The whole-second part of `seconds` offsets the reference instant; the fractional part is
/// rounded to the nearest millisecond. The reference instant follows the same rule as
/// [`elapsed_seconds`]: for `ref_year == 1970` it is built from January 2 and compensated by
/// one day. If the host cannot place the target instant in the local time zone (offsets beyond
/// the host calendar's range), the all-zero [`DateTime`] is returned.
///
/// # Errors
///
/// [`Error::NotRepresentable`] if the host cannot express the reference date as a calendar
/// time in the local time zone.
///
/// # Examples
///
/// ```
/// # use simtime::{DateTime, from_elapsed_seconds};
/// assert_eq!(
/// 	from_elapsed_seconds(86405.25, 1970).unwrap(),
/// 	DateTime { ms: 250, sec: 5, min: 0, hour: 0, day: 2, mon: 1, year: 1970 }
/// );
/// ```
#[cfg(feature = "time")]
pub fn from_elapsed_seconds(seconds: f64, ref_year: i32) -> Result<DateTime, Error> {
	let frac = seconds.fract();
	let whole = seconds.trunc() as i64;

	let start = if ref_year == 1970 {
		CalendarTime::from_fields(0, 0, 0, 2, 1, 1970)? + -SECONDS_PER_DAY
	} else {
		CalendarTime::from_fields(0, 0, 0, 1, 1, ref_year)?
	};

	let ms = (frac * 1000.0 + 0.5) as i32;
	Ok(match (start + whole).to_local() {
		Some(fields) => DateTime::from_host(&fields, ms),
		None => DateTime::default()
	})
}

/// Stub used when host time support is disabled; always returns the all-zero [`DateTime`].
#[cfg(not(feature = "time"))]
pub fn from_elapsed_seconds(_seconds: f64, _ref_year: i32) -> Result<DateTime, Error> {
	Ok(DateTime::default())
}

/// Get the current date and time in the local time zone, with millisecond resolution.
///
/// Returns `None` if the host clock query fails or the current time cannot be placed in the
/// local time zone.
///
/// This function is thread safe.
///
/// # Examples
///
/// ```
/// # use simtime::now;
/// let date = now().expect("Failed to get current time");
/// assert!(date.year >= 2024);
/// ```
#[cfg(feature = "now")]
pub fn now() -> Option<DateTime> {
	let mut time = MaybeUninit::<timespec>::uninit();
	// Safety:
	// - clock_gettime does not read time, only writes
	// - if clock_gettime returns zero, time is successfully initialized
	let time = unsafe {
		match clock_gettime(CLOCK_REALTIME, time.as_mut_ptr()) {
			0 => time.assume_init(),
			_ => return None
		}
	};
	let fields = CalendarTime(time.tv_sec).to_local()?;
	Some(DateTime::from_host(&fields, (time.tv_nsec / 1_000_000) as i32))
}
