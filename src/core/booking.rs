//! Reservation slot arithmetic.
//!
//! A slot is the half-open interval `[start, end)` on a single date, so two
//! back-to-back bookings (`12:00-13:00` and `13:00-14:00`) do not collide.

use chrono::{NaiveDate, NaiveTime};

use crate::core::models::Reservation;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const SLOT_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Parses `HH:MM` bounds. Returns `None` unless `start < end`.
    #[must_use]
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        let start = NaiveTime::parse_from_str(start.trim(), SLOT_FORMAT).ok()?;
        let end = NaiveTime::parse_from_str(end.trim(), SLOT_FORMAT).ok()?;
        (start < end).then_some(Self { start, end })
    }

    #[must_use]
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        other.start < self.end && self.start < other.end
    }
}

#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Returns the first existing reservation whose slot intersects `requested`.
///
/// Callers pass reservations already filtered to the same table and date.
/// Stored rows whose slot cannot be parsed never block a new booking.
pub fn find_overlap<'a>(
    requested: &TimeSlot,
    existing: &'a [Reservation],
) -> Option<&'a Reservation> {
    existing.iter().find(|r| {
        TimeSlot::parse(&r.slot_time_start, &r.slot_time_end)
            .is_some_and(|slot| slot.overlaps(requested))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(start: &str, end: &str) -> Reservation {
        Reservation {
            id: 1,
            reservation_id: "r-1".into(),
            table_number: 7,
            client_name: "Ann".into(),
            phone_number: "+380000000".into(),
            date: "2025-03-01".into(),
            slot_time_start: start.into(),
            slot_time_end: end.into(),
        }
    }

    #[test]
    fn slot_requires_start_before_end() {
        assert!(TimeSlot::parse("10:00", "11:30").is_some());
        assert!(TimeSlot::parse("11:30", "10:00").is_none());
        assert!(TimeSlot::parse("10:00", "10:00").is_none());
        assert!(TimeSlot::parse("ten", "11:00").is_none());
    }

    #[test]
    fn touching_slots_do_not_overlap() {
        let a = TimeSlot::parse("12:00", "13:00").unwrap();
        let b = TimeSlot::parse("13:00", "14:00").unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn contained_and_partial_slots_overlap() {
        let outer = TimeSlot::parse("12:00", "15:00").unwrap();
        let inner = TimeSlot::parse("13:00", "14:00").unwrap();
        let partial = TimeSlot::parse("14:30", "16:00").unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
        assert!(outer.overlaps(&partial));
    }

    #[test]
    fn find_overlap_skips_unparseable_rows() {
        let rows = vec![reservation("garbage", "13:00"), reservation("18:00", "19:00")];
        let requested = TimeSlot::parse("12:00", "14:00").unwrap();
        assert!(find_overlap(&requested, &rows).is_none());

        let late = TimeSlot::parse("18:30", "20:00").unwrap();
        assert_eq!(
            find_overlap(&late, &rows).map(|r| r.slot_time_start.as_str()),
            Some("18:00")
        );
    }

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert!(parse_date("2025-03-01").is_some());
        assert!(parse_date("01.03.2025").is_none());
    }
}
