//! Inclusive calendar date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive range of calendar dates.
///
/// The boundaries are stored in ascending order no matter how they were
/// passed in, so `DateRange::new(x, y) == DateRange::new(y, x)`.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use simpleforex_core::types::DateRange;
///
/// let jan_1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let jan_3 = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
///
/// let range = DateRange::new(jan_3, jan_1);
/// assert_eq!(range.start(), jan_1);
/// assert_eq!(range.days().count(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range from two boundaries, in either order.
    #[must_use]
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Creates a range covering exactly one day.
    #[must_use]
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Earliest date, inclusive.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Latest date, inclusive.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if the date falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if the range covers a single day.
    #[must_use]
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Iterates every date in the range, in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| {
            if *d < end {
                d.succ_opt()
            } else {
                None
            }
        })
    }
}

/// Wire shape; boundaries may arrive in either order.
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl From<RawDateRange> for DateRange {
    fn from(raw: RawDateRange) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl From<NaiveDate> for DateRange {
    fn from(date: NaiveDate) -> Self {
        Self::single(date)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
