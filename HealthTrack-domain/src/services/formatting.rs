use chrono::NaiveDateTime;

/// Display format of the reading time: day, short month, year, 12-hour clock
pub const READING_TIME_FORMAT: &str = "%d %b %Y %I:%M %P";

/// Format a reading time for the date field, e.g. `01 Oct 2024 02:05 pm`
pub fn format_reading_time(date_time: &NaiveDateTime) -> String {
    date_time.format(READING_TIME_FORMAT).to_string()
}
