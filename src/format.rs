//! Token substitution for [`Monthly::format`].
//!
//! Recognized tokens, longest match first and case-insensitive: `yyyy`,
//! `yy`, `mm`, `m`. Everything else passes through as literal text.
//!
//! Substitution runs on a lowercased copy of the format string, so literal
//! ASCII letters come out lowercased too (`"Q: yyyy"` renders as
//! `"q: 2018"`). This is a long-standing quirk of the output format and is
//! kept for compatibility.

use crate::{Monthly, MonthlyError};

/// Year rendered with at least two digits: zero-padded only below 10, the
/// natural decimal representation otherwise.
fn year_wide(year: u16) -> String {
    if year < 10 {
        format!("0{year}")
    } else {
        year.to_string()
    }
}

/// Two-digit year: the last two digits of the 4-zero-padded representation.
fn year_short(year: u16) -> String {
    if year < 10 {
        year_wide(year)
    } else {
        format!("{year:04}")[2..].to_string()
    }
}

pub(crate) fn format_tokens(monthly: Monthly, format: &str) -> Result<String, MonthlyError> {
    let mut out = format.to_ascii_lowercase();
    if !out.contains("yy") && !out.contains('m') {
        return Err(MonthlyError::BadFormat(format.to_owned()));
    }

    if out.contains("yyyy") {
        out = out.replace("yyyy", &year_wide(monthly.year()));
    } else if out.contains("yy") {
        out = out.replace("yy", &year_short(monthly.year()));
    }

    if out.contains("mm") {
        out = out.replace("mm", &format!("{:02}", monthly.month()));
    } else if out.contains('m') {
        out = out.replace('m', &monthly.month().to_string());
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly(year: u16, month: u8) -> Monthly {
        Monthly::new(year, month).unwrap()
    }

    #[test]
    fn test_default_format() {
        assert_eq!(monthly(2018, 1).format("yyyy/mm").unwrap(), "2018/01");
    }

    #[test]
    fn test_short_year() {
        assert_eq!(monthly(2018, 1).format("yy/mm").unwrap(), "18/01");
        assert_eq!(Monthly::from_dot(501).unwrap().format("yy/mm").unwrap(), "05/01");
        assert_eq!(monthly(18, 1).format("yy/mm").unwrap(), "18/01");
        assert_eq!(monthly(318, 1).format("yy/mm").unwrap(), "18/01");
    }

    #[test]
    fn test_wide_year_is_natural_width() {
        // yyyy does not force four digits; it only pads single-digit years.
        assert_eq!(monthly(5, 3).format("yyyy/mm").unwrap(), "05/03");
        assert_eq!(monthly(18, 3).format("yyyy/mm").unwrap(), "18/03");
        assert_eq!(monthly(318, 3).format("yyyy/mm").unwrap(), "318/03");
    }

    #[test]
    fn test_narrow_month() {
        assert_eq!(monthly(2018, 1).format("yyyy年m月").unwrap(), "2018年1月");
        assert_eq!(monthly(2018, 11).format("yyyy年m月").unwrap(), "2018年11月");
    }

    #[test]
    fn test_case_insensitive_tokens() {
        assert_eq!(monthly(2018, 1).format("YYYY年m月").unwrap(), "2018年1月");
        assert_eq!(monthly(2018, 1).format("YyYy-Mm").unwrap(), "2018-01");
    }

    #[test]
    fn test_literal_text_passes_through() {
        assert_eq!(
            monthly(2018, 1).format("公元YyYy年mM月,哈哈...").unwrap(),
            "公元2018年01月,哈哈..."
        );
    }

    #[test]
    fn test_literal_ascii_is_lowercased() {
        // The documented quirk: literal letters go through the lowercasing.
        assert_eq!(monthly(2018, 1).format("Q: yyyy").unwrap(), "q: 2018");
    }

    #[test]
    fn test_year_token_alone() {
        assert_eq!(monthly(2018, 1).format("yyyy").unwrap(), "2018");
        assert_eq!(monthly(2018, 1).format("yy").unwrap(), "18");
    }

    #[test]
    fn test_month_token_alone() {
        assert_eq!(monthly(2018, 1).format("m").unwrap(), "1");
        assert_eq!(monthly(2018, 1).format("mm").unwrap(), "01");
    }

    #[test]
    fn test_leftover_month_letter() {
        // "mm" wins the longest match; the trailing "m" stays literal.
        assert_eq!(monthly(2018, 1).format("mmm").unwrap(), "01m");
    }

    #[test]
    fn test_lone_y_is_literal() {
        assert_eq!(monthly(2018, 1).format("y/mm").unwrap(), "y/01");
    }

    #[test]
    fn test_bad_format() {
        for format in ["", "xyz", "????", "y"] {
            assert!(
                matches!(monthly(2018, 1).format(format), Err(MonthlyError::BadFormat(_))),
                "format {format:?} should be rejected"
            );
        }
    }
}
