use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Inclusive reporting window. A missing side is unbounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DateWindow {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Window ending `today` and starting `days` days earlier.
    ///
    /// A span reaching past the earliest representable date leaves the start open.
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today.checked_sub_signed(Duration::days(i64::from(days))),
            end: Some(today),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Start after end. Such a window matches nothing.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    /// First instant included: 00:00:00.000 of the start day.
    pub fn lower_bound(&self) -> Option<NaiveDateTime> {
        self.start.and_then(|day| day.and_hms_milli_opt(0, 0, 0, 0))
    }

    /// Last instant included: 23:59:59.999 of the end day.
    pub fn upper_bound(&self) -> Option<NaiveDateTime> {
        self.end
            .and_then(|day| day.and_hms_milli_opt(23, 59, 59, 999))
    }

    /// Whether an item dated `at` falls inside the window.
    ///
    /// Undated items only pass an unbounded window.
    pub fn contains(&self, at: Option<NaiveDateTime>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        if self.is_inverted() {
            return false;
        }
        let Some(at) = at else {
            return false;
        };

        if let Some(lower) = self.lower_bound() {
            if at < lower {
                return false;
            }
        }
        if let Some(upper) = self.upper_bound() {
            if at > upper {
                return false;
            }
        }
        true
    }
}

/// Items whose date lies inside `window`, in their original order.
pub fn filter_by_window<'a, T, F>(items: &'a [T], date_of: F, window: &DateWindow) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<NaiveDateTime>,
{
    items
        .iter()
        .filter(|item| window.contains(date_of(*item)))
        .collect()
}
