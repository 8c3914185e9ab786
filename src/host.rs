//! Reentrant wrappers around the host calendar API.
//!
//! Every conversion in this module goes through the thread-safe variants of the host C library
//! (`mktime`, `localtime_r`, `strftime_l`, `strptime`); the process-wide `struct tm` buffer
//! behind plain `localtime` is never touched, so all wrappers are safe to call from multiple
//! threads. The only host-global state the results depend on is the local time zone
//! configuration.
//!
//! The wrappers are deliberately thin: field rebasing (1-based months, 4-digit years) and all
//! calendar policy live in the calling modules.

use core::mem::MaybeUninit;
use core::ops::{Add, Sub};
use std::ffi::{CStr, CString};
use libc::{time_t, tm, localtime_r, mktime, strftime, strptime};
#[cfg(feature = "locale")]
use std::ffi::c_char;
#[cfg(feature = "locale")]
use libc::{LC_TIME_MASK, size_t, freelocale, locale_t, newlocale};

use crate::error::Error;

#[cfg(not(unix))]
compile_error!("simtime needs a Unix host: it requires the reentrant local time conversions \
                localtime_r and strptime");

/// An instant on the host calendar, counted in whole seconds from the host epoch in local time
/// semantics.
///
/// Values are only produced by [`CalendarTime::from_fields`]; there is no public constructor.
/// Subtracting two instants yields the elapsed seconds between them as `f64`, like the host
/// `difftime`. Whole-second offsets can be added directly; subtraction of an offset is done by
/// adding a negative value.
#[derive(Clone, Copy)]
pub(crate) struct CalendarTime(pub(crate) time_t);

impl CalendarTime {
	/// Convert broken-down local time fields into a calendar instant.
	///
	/// `mon` is 1-based and `year` the full 4-digit Gregorian year; both are rebased to the host
	/// convention before the conversion. `tm_isdst` is left at `-1` so the host decides whether
	/// daylight saving time is in effect. Out-of-range fields are passed through unchecked; the
	/// host either normalizes them or rejects the conversion.
	///
	/// # Errors
	///
	/// [`Error::NotRepresentable`] with the original fields if the host cannot express the date
	/// as a calendar time in the local time zone.
	pub(crate) fn from_fields(sec: i32, min: i32, hour: i32, day: i32, mon: i32, year: i32)
	-> Result<CalendarTime, Error> {
		// Zero the whole struct first: the host may carry fields beyond the portable seven
		// (tm_gmtoff, tm_zone).
		// Safety: tm is a plain C struct and all-zero bytes is a valid value for it.
		let mut fields: tm = unsafe { core::mem::zeroed() };
		fields.tm_sec = sec;
		fields.tm_min = min;
		fields.tm_hour = hour;
		fields.tm_mday = day;
		fields.tm_mon = mon - 1;
		fields.tm_year = year - 1900;
		fields.tm_isdst = -1;

		// Safety: fields is initialized and mktime only normalizes it in place.
		let calendar_time = unsafe { mktime(&mut fields) };
		if calendar_time == -1 {
			return Err(Error::NotRepresentable { year, mon, day, hour, min, sec });
		}
		Ok(CalendarTime(calendar_time))
	}

	/// Convert this instant to broken-down local time.
	///
	/// Returns `None` if the host cannot place the instant in the local time zone, which only
	/// happens for offsets beyond the range of the host calendar.
	pub(crate) fn to_local(self) -> Option<tm> {
		let mut res = MaybeUninit::<tm>::uninit();
		// Safety:
		// - localtime_r does not read res, only writes
		// - if localtime_r returns non-null, res is successfully initialized
		unsafe {
			if localtime_r(&self.0, res.as_mut_ptr()).is_null() {
				None
			} else {
				Some(res.assume_init())
			}
		}
	}
}

impl Sub for CalendarTime {
	type Output = f64;

	/// Seconds elapsed from `rhs` to `self`, equivalent to the host `difftime`.
	fn sub(self, rhs: Self) -> f64 {
		(self.0 - rhs.0) as f64
	}
}

impl Add<i64> for CalendarTime {
	type Output = Self;

	/// Offset `self` by `rhs` whole seconds. Subtraction is done by adding a negative value.
	fn add(self, rhs: i64) -> Self {
		CalendarTime(self.0 + rhs as time_t)
	}
}

/// Format broken-down local time with the host formatter.
///
/// `max_size` is the output buffer size in bytes, including the terminator; the formatted
/// result is at most `max_size - 1` bytes long. With the `locale` feature the time-related
/// locale category is pinned to "C" through a locale object scoped to this call, so month and
/// weekday names come out locale-independent and no process-wide locale state is mutated.
///
/// Returns `None` when the host reports an empty result or the output does not fit `max_size`.
pub(crate) fn format_fields(fields: &tm, format: &str, max_size: usize) -> Option<String> {
	if max_size == 0 {
		return None;
	}
	let format = CString::new(format).ok()?;
	let mut buf = vec![0u8; max_size];
	let len = format_host(&mut buf, &format, fields);
	if len == 0 {
		None
	} else {
		Some(String::from_utf8_lossy(&buf[..len]).into_owned())
	}
}

#[cfg(feature = "locale")]
fn format_host(buf: &mut [u8], format: &CStr, fields: &tm) -> usize {
	// Safety:
	// - newlocale with a null base creates a fresh locale object, freed below and never
	//   shared across threads
	// - buf holds buf.len() writable bytes and format is NUL terminated
	unsafe {
		let loc = newlocale(LC_TIME_MASK, c"C".as_ptr(), core::ptr::null_mut());
		if loc.is_null() {
			// Host cannot build the "C" locale, fall back to its default locale
			return strftime(buf.as_mut_ptr().cast(), buf.len(), format.as_ptr(), fields);
		}
		let len = strftime_l(buf.as_mut_ptr().cast(), buf.len(), format.as_ptr(), fields, loc);
		freelocale(loc);
		len
	}
}

#[cfg(not(feature = "locale"))]
fn format_host(buf: &mut [u8], format: &CStr, fields: &tm) -> usize {
	// Safety: buf holds buf.len() writable bytes and format is NUL terminated.
	unsafe { strftime(buf.as_mut_ptr().cast(), buf.len(), format.as_ptr(), fields) }
}

// POSIX.1-2008, present on every supported Unix host but not bound by the libc crate on all of
// them.
#[cfg(feature = "locale")]
unsafe extern "C" {
	fn strftime_l(s: *mut c_char, maxsize: size_t, format: *const c_char, timeptr: *const tm,
	              locale: locale_t) -> size_t;
}

/// Parse the leading portion of `input` against `format`, filling `fields`.
///
/// Only the fields named by `format` are written; everything else in `fields` is left as
/// supplied by the caller. Trailing input beyond the format is not an error and stays in the
/// returned remainder.
///
/// Returns the unconsumed remainder of `input` on success, or `None` if the host parser rejects
/// the input (including input with interior NUL bytes, which the host cannot see past).
pub(crate) fn parse_prefix<'a>(input: &'a [u8], format: &str, fields: &mut tm) -> Option<&'a [u8]> {
	let input_c = CString::new(input).ok()?;
	let format_c = CString::new(format).ok()?;
	// Safety:
	// - both strings are NUL terminated and fields points to a valid tm
	// - on success the returned pointer is within input_c's buffer, so the offset from its
	//   start is a valid index into input
	unsafe {
		let end = strptime(input_c.as_ptr(), format_c.as_ptr(), fields);
		if end.is_null() {
			None
		} else {
			Some(&input[end.offset_from(input_c.as_ptr()) as usize..])
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	// Get the host's own conversion of local broken-down time
	fn mktime_host(sec: i32, min: i32, hour: i32, day: i32, mon: i32, year: i32) -> time_t {
		let mut fields: tm = unsafe { core::mem::zeroed() };
		fields.tm_sec = sec;
		fields.tm_min = min;
		fields.tm_hour = hour;
		fields.tm_mday = day;
		fields.tm_mon = mon - 1;
		fields.tm_year = year - 1900;
		fields.tm_isdst = -1;
		unsafe { mktime(&mut fields) }
	}

	#[test]
	fn from_fields_test() {
		let t = CalendarTime::from_fields(45, 30, 12, 15, 6, 2024).unwrap();
		assert_eq!(t.0, mktime_host(45, 30, 12, 15, 6, 2024));

		let t = CalendarTime::from_fields(0, 0, 0, 2, 1, 1970).unwrap();
		assert_eq!(t.0, mktime_host(0, 0, 0, 2, 1, 1970));
	}

	#[test]
	fn to_local_test() {
		let t = CalendarTime::from_fields(45, 30, 12, 15, 6, 2024).unwrap();
		let fields = t.to_local().unwrap();
		assert_eq!(fields.tm_sec, 45);
		assert_eq!(fields.tm_min, 30);
		assert_eq!(fields.tm_hour, 12);
		assert_eq!(fields.tm_mday, 15);
		assert_eq!(fields.tm_mon, 5);
		assert_eq!(fields.tm_year, 124);
	}

	#[test]
	fn math_test() {
		let t = CalendarTime::from_fields(0, 0, 0, 2, 1, 1970).unwrap();
		assert_eq!((t + 86400) - t, 86400.0);
		assert_eq!((t + -86400) - t, -86400.0);
		assert_eq!(t - t, 0.0);
	}

	#[test]
	fn format_fields_test() {
		let fields = CalendarTime::from_fields(45, 30, 12, 15, 6, 2024).unwrap().to_local().unwrap();
		// Plain literal text passes through the host formatter untouched
		assert_eq!(format_fields(&fields, "abc", 16), Some(String::from("abc")));
		// Zero-sized and too-small buffers both report failure
		assert_eq!(format_fields(&fields, "abc", 0), None);
		assert_eq!(format_fields(&fields, "abcdef", 3), None);
	}

	#[test]
	fn parse_prefix_test() {
		let mut fields: tm = unsafe { core::mem::zeroed() };
		let rest = parse_prefix(b"12:34 tail", "%H:%M", &mut fields).unwrap();
		assert_eq!(rest, &b" tail"[..]);
		assert_eq!(fields.tm_hour, 12);
		assert_eq!(fields.tm_min, 34);

		let mut fields: tm = unsafe { core::mem::zeroed() };
		assert!(parse_prefix(b"nonsense", "%H:%M", &mut fields).is_none());
	}
}
