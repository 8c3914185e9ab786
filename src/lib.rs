//! Calendar and clock conversion helpers for simulation runtimes.
//!
//! This crate provides the small set of date/time utilities a simulation runtime's standard
//! utility library needs: converting broken-down date/time fields ([`DateTime`]) to an
//! elapsed-seconds offset from a reference year ([`elapsed_seconds`]), the inverse conversion
//! ([`from_elapsed_seconds`]), formatting fields into a string ([`format_date`]), and parsing
//! a string into fields ([`parse_date`]). All four are built on the host C library's local
//! time conversion, always through its reentrant variants, so every operation is thread safe
//! up to the host-global time zone configuration.
//!
//! Formatting and parsing use host strftime/strptime syntax with one extension: the
//! two-character sequence `%L` stands for the 3-digit millisecond value, which the host has no
//! conversion for. Formatting pins the time-related locale category to the invariant "C"
//! locale (feature `locale`, default), so month and weekday names are reproducible regardless
//! of the process locale.
//!
//! Failure is two-tier: a date the host cannot express as a calendar time is a hard error
//! ([`Error`]), expected to propagate to the embedding runtime's top-level handler; everything
//! else (formatting overflow, unparseable input) is soft and reported by a sentinel, the empty
//! string or the all-zero [`DateTime`].
//!
//! # Features
//!
//! - `time` (default): host calendar support. Without it every operation is a no-op returning
//!   zero or empty values and the `libc` dependency is dropped.
//! - `locale` (default): format in the invariant "C" locale through a call-scoped locale
//!   object. Without it the host default locale is used.
//! - `now`: the [`now`] helper returning the current local date and time.
//!
//! # Examples
//!
//! Elapsed seconds relative to a reference year, and back:
//! ```
//! # use simtime::{DateTime, elapsed_seconds, from_elapsed_seconds};
//! let date = DateTime { ms: 0, sec: 5, min: 0, hour: 0, day: 1, mon: 1, year: 1970 };
//! assert_eq!(elapsed_seconds(date, 1970).unwrap(), 5.0);
//!
//! let date = DateTime { ms: 250, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 };
//! let elapsed = elapsed_seconds(date, 2020).unwrap();
//! assert_eq!(from_elapsed_seconds(elapsed, 2020).unwrap(), date);
//! ```
//!
//! Formatting and parsing with the `%L` milliseconds extension:
//! ```
//! # use simtime::{DateTime, format_date, parse_date};
//! let date = DateTime { ms: 7, sec: 45, min: 30, hour: 12, day: 15, mon: 6, year: 2024 };
//! let text = format_date(date, "%Y-%m-%d %H:%M:%S.%L", 64).unwrap();
//! assert_eq!(text, "2024-06-15 12:30:45.007");
//!
//! assert_eq!(parse_date(&text, "%Y-%m-%d %H:%M:%S.%L"), date);
//! ```

pub mod calendar;
pub mod error;
pub mod format;
#[cfg(feature = "time")]
mod host;
pub mod parse;

pub use calendar::*;
pub use error::Error;
pub use format::*;
pub use parse::*;
