//! Attendance time windows, evaluated on the WIB (UTC+7) wall clock.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use once_cell::sync::Lazy;

use crate::model::attendance::EventKind;

/// Waktu Indonesia Barat, fixed UTC+7. No DST.
static WIB: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(7 * 3600).expect("UTC+7 is a valid offset"));

// Minute-of-day window bounds, inclusive on both ends.
const CHECK_IN_START: u32 = 7 * 60; // 07:00
const CHECK_IN_END: u32 = 12 * 60; // 12:00
const CHECK_OUT_START: u32 = 12 * 60; // 12:00
const CHECK_OUT_END: u32 = 18 * 60; // 18:00

/// Current instant projected into WIB.
pub fn wib_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&WIB)
}

/// Whether `kind` may be recorded at `now`. Check-in is allowed between
/// 07:00 and 12:00, check-out between 12:00 and 18:00, boundaries included.
pub fn is_within_window(kind: EventKind, now: DateTime<FixedOffset>) -> bool {
    let minute = now.hour() * 60 + now.minute();
    match kind {
        EventKind::CheckIn => (CHECK_IN_START..=CHECK_IN_END).contains(&minute),
        EventKind::CheckOut => (CHECK_OUT_START..=CHECK_OUT_END).contains(&minute),
    }
}

/// Human-readable allowed range, display only.
pub fn window_label(kind: EventKind) -> &'static str {
    match kind {
        EventKind::CheckIn => "07:00 - 12:00 WIB",
        EventKind::CheckOut => "12:00 - 18:00 WIB",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn wib_at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 1, hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn check_in_boundaries_are_inclusive() {
        assert!(!is_within_window(EventKind::CheckIn, wib_at(6, 59)));
        assert!(is_within_window(EventKind::CheckIn, wib_at(7, 0)));
        assert!(is_within_window(EventKind::CheckIn, wib_at(12, 0)));
        assert!(!is_within_window(EventKind::CheckIn, wib_at(12, 1)));
    }

    #[test]
    fn check_out_boundaries_are_inclusive() {
        assert!(!is_within_window(EventKind::CheckOut, wib_at(11, 59)));
        assert!(is_within_window(EventKind::CheckOut, wib_at(12, 0)));
        assert!(is_within_window(EventKind::CheckOut, wib_at(18, 0)));
        assert!(!is_within_window(EventKind::CheckOut, wib_at(18, 1)));
    }

    #[test]
    fn windows_hold_for_every_minute_of_the_day() {
        for minute_of_day in 0..24 * 60 {
            let now = wib_at(minute_of_day / 60, minute_of_day % 60);
            assert_eq!(
                is_within_window(EventKind::CheckIn, now),
                (420..=720).contains(&minute_of_day),
                "check_in at minute {minute_of_day}"
            );
            assert_eq!(
                is_within_window(EventKind::CheckOut, now),
                (720..=1080).contains(&minute_of_day),
                "check_out at minute {minute_of_day}"
            );
        }
    }

    #[test]
    fn seconds_do_not_push_past_the_boundary() {
        // 12:00:59 is still minute 720 for both windows.
        let now = FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 59)
            .unwrap();
        assert!(is_within_window(EventKind::CheckIn, now));
        assert!(is_within_window(EventKind::CheckOut, now));
    }

    #[test]
    fn labels_name_the_allowed_ranges() {
        assert_eq!(window_label(EventKind::CheckIn), "07:00 - 12:00 WIB");
        assert_eq!(window_label(EventKind::CheckOut), "12:00 - 18:00 WIB");
    }
}
