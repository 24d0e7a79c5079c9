/// One parsed crawl-log line: `date,status,url,bot[,...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub date: String,
    pub status: i64,
    pub url: String,
    pub bot: String,
}

/// Parses a single line. Returns `None` when it has fewer than four
/// comma-separated fields; anything past the fourth field is ignored.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let mut parts = line.split(',');
    let date = parts.next()?;
    let status = parts.next()?;
    let url = parts.next()?;
    let bot = parts.next()?;

    Some(LogRecord {
        date: date.trim().to_string(),
        status: parse_status(status.trim()),
        url: url.trim().to_string(),
        bot: bot.trim().to_string(),
    })
}

/// Leading-integer parse: optional sign, an optional `0x` prefix for hex,
/// then as many digits as are present. Values past `i64` saturate. Anything
/// unparseable (including an empty field) is 0.
fn parse_status(field: &str) -> i64 {
    let (negative, rest) = match field.as_bytes().first() {
        Some(b'-') => (true, &field[1..]),
        Some(b'+') => (false, &field[1..]),
        _ => (false, field),
    };

    let (radix, digits) = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, rest),
    };

    let value = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(None, |acc: Option<i64>, digit| {
            Some(
                acc.unwrap_or(0)
                    .saturating_mul(i64::from(radix))
                    .saturating_add(i64::from(digit)),
            )
        });

    match value {
        Some(v) if negative => -v,
        Some(v) => v,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_line() {
        let record = parse_line(" 2024-01-01 , 200 , /a , Googlebot ").unwrap();
        assert_eq!(record.date, "2024-01-01");
        assert_eq!(record.status, 200);
        assert_eq!(record.url, "/a");
        assert_eq!(record.bot, "Googlebot");
    }

    #[test]
    fn test_reject_too_few_fields() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("2024-01-01,200"), None);
        assert_eq!(parse_line("2024-01-01,200,/a"), None);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let record = parse_line("2024-01-01,301,/a,Googlebot,extra,more").unwrap();
        assert_eq!(record.status, 301);
        assert_eq!(record.bot, "Googlebot");
    }

    #[test]
    fn test_non_numeric_status_is_zero() {
        assert_eq!(parse_line("d,abc,/a,bot").unwrap().status, 0);
        assert_eq!(parse_line("d,,/a,bot").unwrap().status, 0);
    }

    #[test]
    fn test_status_leading_digits() {
        assert_eq!(parse_status("200abc"), 200);
        assert_eq!(parse_status("-5"), -5);
        assert_eq!(parse_status("+404"), 404);
        assert_eq!(parse_status("-"), 0);
    }

    #[test]
    fn test_status_hex_prefix() {
        assert_eq!(parse_status("0x1F4"), 500);
        assert_eq!(parse_status("0X12c"), 300);
        assert_eq!(parse_status("-0x10"), -16);
        assert_eq!(parse_status("0x"), 0);
        assert_eq!(parse_status("0xzz"), 0);
    }

    #[test]
    fn test_status_overflow_saturates() {
        assert_eq!(parse_status("99999999999999999999"), i64::MAX);
        assert_eq!(parse_status("-99999999999999999999"), -i64::MAX);
        let record = parse_line("d,99999999999999999999,/a,bot").unwrap();
        assert!(record.status >= 500);
    }

    #[test]
    fn test_empty_fields_still_accepted() {
        let record = parse_line(",,,").unwrap();
        assert_eq!(record.date, "");
        assert_eq!(record.url, "");
        assert_eq!(record.bot, "");
    }
}
