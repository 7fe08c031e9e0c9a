use chrono::{Local, NaiveDate};

/// Export file name for today: `<YYMMDD>-<base>`, local date, two-digit
/// year/month/day each zero-padded.
pub fn dated_file_name(base: &str) -> String {
    dated_file_name_on(Local::now().date_naive(), base)
}

pub fn dated_file_name_on(date: NaiveDate, base: &str) -> String {
    format!("{}-{}", date.format("%y%m%d"), base)
}
