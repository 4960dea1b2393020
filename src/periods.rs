// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Months, NaiveDate};
use std::str::FromStr;

use crate::models::DateRange;

/// Earliest start date used by the "all time" preset.
pub fn all_time_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

impl DateRange {
    pub fn month_of(date: NaiveDate) -> Self {
        DateRange::new(month_start(date), month_end(date))
    }

    /// Month range `n` months away from the month containing `start`.
    pub fn shift_months(&self, n: i32) -> Self {
        let anchor = month_start(self.start);
        let moved = if n >= 0 {
            anchor.checked_add_months(Months::new(n.unsigned_abs()))
        } else {
            anchor.checked_sub_months(Months::new(n.unsigned_abs()))
        };
        DateRange::month_of(moved.unwrap_or(anchor))
    }
}

/// Quick ranges offered by the reports view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    ThisMonth,
    LastThreeMonths,
    LastSixMonths,
    LastYear,
    AllTime,
}

impl RangePreset {
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        let back = |months: u32| today.checked_sub_months(Months::new(months)).unwrap_or(today);
        let start = match self {
            RangePreset::ThisMonth => month_start(today),
            RangePreset::LastThreeMonths => back(3),
            RangePreset::LastSixMonths => back(6),
            RangePreset::LastYear => back(12),
            RangePreset::AllTime => all_time_start(),
        };
        DateRange::new(start, month_end(today))
    }
}

impl FromStr for RangePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(RangePreset::ThisMonth),
            "3m" => Ok(RangePreset::LastThreeMonths),
            "6m" => Ok(RangePreset::LastSixMonths),
            "1y" => Ok(RangePreset::LastYear),
            "all" => Ok(RangePreset::AllTime),
            other => Err(anyhow::anyhow!(
                "Invalid range '{}', expected 1m|3m|6m|1y|all",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_of_handles_leap_february() {
        let r = DateRange::month_of(d(2024, 2, 14));
        assert_eq!(r, DateRange::new(d(2024, 2, 1), d(2024, 2, 29)));
        let r = DateRange::month_of(d(2023, 2, 1));
        assert_eq!(r.end, d(2023, 2, 28));
    }

    #[test]
    fn shift_crosses_year_boundaries() {
        let jan = DateRange::month_of(d(2024, 1, 10));
        assert_eq!(jan.shift_months(-1), DateRange::new(d(2023, 12, 1), d(2023, 12, 31)));
        let dec = DateRange::month_of(d(2023, 12, 31));
        assert_eq!(dec.shift_months(1), jan);
        assert_eq!(jan.shift_months(0), jan);
    }

    #[test]
    fn presets_end_at_month_end() {
        let today = d(2024, 5, 31);
        assert_eq!(
            RangePreset::ThisMonth.resolve(today),
            DateRange::new(d(2024, 5, 1), d(2024, 5, 31))
        );
        assert_eq!(RangePreset::LastThreeMonths.resolve(today).start, d(2024, 2, 29));
        assert_eq!(RangePreset::LastSixMonths.resolve(today).start, d(2023, 11, 30));
        assert_eq!(RangePreset::LastYear.resolve(today).start, d(2023, 5, 31));
        assert_eq!(RangePreset::AllTime.resolve(today).start, d(2000, 1, 1));
    }

    #[test]
    fn preset_parse() {
        assert_eq!("3M".parse::<RangePreset>().unwrap(), RangePreset::LastThreeMonths);
        assert!("2w".parse::<RangePreset>().is_err());
    }
}
