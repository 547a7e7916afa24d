/// Format elapsed seconds as "HH:MM:SS" (hours keep growing past 24)
pub fn format_time(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format a countdown as "MM:SS"
pub fn format_countdown(remaining_secs: u64) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(59), "00:00:59");
        assert_eq!(format_time(125), "00:02:05");
        assert_eq!(format_time(3725), "01:02:05");
        assert_eq!(format_time(100 * 3600), "100:00:00");
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(25 * 60), "25:00");
        assert_eq!(format_countdown(61), "01:01");
        assert_eq!(format_countdown(0), "00:00");
    }
}
