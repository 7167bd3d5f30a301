use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::model::task::Task;

/// A calendar month, e.g. 2024-05
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1–12
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid month: {0} (expected YYYY-MM)")]
pub struct InvalidMonth(pub String);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| YearMonth { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            YearMonth {
                year: self.year - 1,
                month: 12,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn days_in_month(self) -> u32 {
        let next = self.next().first_day();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    /// Weekday of the 1st, Sunday = 0
    pub fn first_weekday(self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn title(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl FromStr for YearMonth {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s.split_once('-').ok_or_else(|| InvalidMonth(s.to_string()))?;
        let year = y.parse().map_err(|_| InvalidMonth(s.to_string()))?;
        let month = m.parse().map_err(|_| InvalidMonth(s.to_string()))?;
        YearMonth::new(year, month).ok_or_else(|| InvalidMonth(s.to_string()))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Tasks due on `day` of `month`, in list order
pub fn tasks_for_day(tasks: &[Task], month: YearMonth, day: u32) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| {
            t.due_date
                .is_some_and(|d| month.contains(d) && d.day() == day)
        })
        .collect()
}

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell<'a> {
    /// Padding before the 1st or after the last day
    Blank,
    Day { day: u32, tasks: Vec<&'a Task> },
}

/// Weeks of seven cells, Sunday first, padded with blanks on both ends
pub fn month_grid(tasks: &[Task], month: YearMonth) -> Vec<Vec<CalendarCell<'_>>> {
    let mut cells: Vec<CalendarCell> = Vec::new();
    for _ in 0..month.first_weekday() {
        cells.push(CalendarCell::Blank);
    }
    for day in 1..=month.days_in_month() {
        cells.push(CalendarCell::Day {
            day,
            tasks: tasks_for_day(tasks, month, day),
        });
    }
    while cells.len() % 7 != 0 {
        cells.push(CalendarCell::Blank);
    }
    cells
        .chunks(7)
        .map(|week| week.to_vec())
        .collect()
}
