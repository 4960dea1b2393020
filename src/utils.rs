// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::models::{CategoryFilter, DateRange, Diagnostic, FilterSpec};
use crate::periods::RangePreset;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// `YYYY-MM` into the full calendar month.
pub fn parse_month(s: &str) -> Result<DateRange> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(DateRange::month_of(first))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Builds the filter from `--month`, `--from/--to`, `--range` and
/// `--category`. With no date arguments the current month is used.
pub fn filter_spec(sub: &clap::ArgMatches, today: NaiveDate) -> Result<FilterSpec> {
    let offset = sub.get_one::<i32>("offset").copied().unwrap_or(0);
    let date_range = if let Some(month) = sub.get_one::<String>("month") {
        parse_month(month)?.shift_months(offset)
    } else if let Some(range) = sub.get_one::<String>("range") {
        range.parse::<RangePreset>()?.resolve(today)
    } else {
        let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
        let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
        match (from, to) {
            (None, None) => DateRange::month_of(today).shift_months(offset),
            (from, to) => DateRange::new(
                from.unwrap_or_else(crate::periods::all_time_start),
                to.unwrap_or(today),
            ),
        }
    };
    let category = match sub.get_one::<String>("category") {
        Some(c) => c.parse::<CategoryFilter>()?,
        None => CategoryFilter::All,
    };
    Ok(FilterSpec {
        date_range,
        category,
    })
}

/// One stderr line per call when records were skipped.
pub fn warn_skipped(diagnostics: &[Diagnostic]) {
    if !diagnostics.is_empty() {
        eprintln!(
            "warning: {} malformed record(s) skipped; run `spendtrail doctor` for details",
            diagnostics.len()
        );
    }
}
