use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Render an instant as local wall-clock time on a 12-hour dial: no leading
/// zero on the hour, lowercase marker — "3:45pm", "12:05am".
pub fn format_local(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M%P").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Los_Angeles;
    use pretty_assertions::assert_eq;

    fn la_instant(h: u32, mi: u32) -> DateTime<Utc> {
        Los_Angeles
            .with_ymd_and_hms(2024, 6, 1, h, mi, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_afternoon_has_no_leading_zero() {
        assert_eq!(format_local(la_instant(15, 45), Los_Angeles), "3:45pm");
    }

    #[test]
    fn test_minutes_keep_their_leading_zero() {
        assert_eq!(format_local(la_instant(0, 5), Los_Angeles), "12:05am");
    }

    #[test]
    fn test_noon_is_pm() {
        assert_eq!(format_local(la_instant(12, 0), Los_Angeles), "12:00pm");
    }

    #[test]
    fn test_midnight_is_am() {
        assert_eq!(format_local(la_instant(0, 0), Los_Angeles), "12:00am");
    }

    #[test]
    fn test_rendering_follows_the_reference_timezone() {
        // 22:00 UTC on a PDT date is 3:00pm on the west coast
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 22, 0, 0).unwrap();
        assert_eq!(format_local(instant, Los_Angeles), "3:00pm");
    }
}
