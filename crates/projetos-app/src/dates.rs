// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

pub const MISSING_DATE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `dd/mm`, used by the home list.
    DayMonth,
    /// `dd/mm/yy`, used by the history table.
    DayMonthYear,
}

/// Parses the `dt_created` shapes the API emits. Naive timestamps are taken as UTC.
pub fn parse_created(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }

    let naive_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ];
    for format in naive_formats {
        if let Ok(parsed) = PrimitiveDateTime::parse(raw, format) {
            return Some(parsed.assume_utc());
        }
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

pub fn format_created(raw: &str, style: DateStyle) -> String {
    let Some(parsed) = parse_created(raw) else {
        return MISSING_DATE.to_owned();
    };
    let date = parsed.date();
    let formatted = match style {
        DateStyle::DayMonth => date.format(format_description!("[day]/[month]")),
        DateStyle::DayMonthYear => {
            date.format(format_description!("[day]/[month]/[year repr:last_two]"))
        }
    };
    formatted.unwrap_or_else(|_| MISSING_DATE.to_owned())
}

#[cfg(test)]
mod tests {
    use super::{DateStyle, MISSING_DATE, format_created, parse_created};

    #[test]
    fn formats_offset_timestamps_in_their_own_offset() {
        let raw = "2025-07-01T23:20:30.123456-05:00";
        assert_eq!(format_created(raw, DateStyle::DayMonth), "01/07");
        assert_eq!(format_created(raw, DateStyle::DayMonthYear), "01/07/25");
    }

    #[test]
    fn accepts_naive_and_date_only_values() {
        assert_eq!(
            format_created("2024-12-09T08:00:00", DateStyle::DayMonthYear),
            "09/12/24"
        );
        assert_eq!(
            format_created("2024-12-09 08:00:00.5", DateStyle::DayMonth),
            "09/12"
        );
        assert_eq!(
            format_created("2009-03-04", DateStyle::DayMonthYear),
            "04/03/09"
        );
    }

    #[test]
    fn short_year_keeps_leading_zero_across_centuries() {
        assert_eq!(
            format_created("2100-01-05T00:00:00Z", DateStyle::DayMonthYear),
            "05/01/00"
        );
        assert_eq!(
            format_created("1999-11-30T22:00:00-03:00", DateStyle::DayMonthYear),
            "30/11/99"
        );
    }

    #[test]
    fn missing_or_garbled_dates_render_placeholder() {
        assert_eq!(format_created("", DateStyle::DayMonth), MISSING_DATE);
        assert_eq!(format_created("ontem", DateStyle::DayMonthYear), MISSING_DATE);
    }

    #[test]
    fn parsed_instants_order_across_offsets() {
        let earlier = parse_created("2025-01-01T09:00:00-05:00").expect("parse earlier");
        let later = parse_created("2025-01-01T14:30:00Z").expect("parse later");
        assert!(earlier < later);
    }
}
