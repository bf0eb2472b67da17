use chrono::NaiveDate;

/// Get current date in YYYY-MM-DD format from the browser clock.
pub fn get_current_date() -> String {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    format!("{:04}-{:02}-{:02}", year as u32, month as u32, day as u32)
}

/// Today as a `NaiveDate`, for feeding the pure validator.
pub fn today() -> NaiveDate {
    parse_date(&get_current_date()).unwrap_or_default()
}

/// Parse a YYYY-MM-DD string.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// Format YYYY-MM-DD for display (e.g. "January 15, 2025").
pub fn format_date_for_display(date_str: &str) -> String {
    match parse_date(date_str) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => date_str.to_string(),
    }
}
