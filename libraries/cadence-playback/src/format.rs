//! Display helpers for positions and durations

/// Format seconds as `m:ss`
///
/// Minutes are not wrapped into hours (`75:00` for a 75 minute episode).
/// Negative and non-finite input is shown as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Elapsed share of `duration` as a percentage, capped at 100
///
/// Returns 0 when the duration is unknown (zero or not a number).
pub fn progress_percent(progress: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        (progress / duration * 100.0).min(100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(7.9), "0:07");
        assert_eq!(format_clock(242.0), "4:02");
        assert_eq!(format_clock(4500.0), "75:00");
    }

    #[test]
    fn clock_handles_garbage() {
        assert_eq!(format_clock(-3.0), "0:00");
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
    }

    #[test]
    fn percent_is_capped() {
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(500.0, 120.0), 100.0);
        assert_eq!(progress_percent(30.0, 0.0), 0.0);
        assert_eq!(progress_percent(30.0, f64::NAN), 0.0);
    }
}
