//! # Chinese Lunar Calendar Lookup
//!
//! Finds the next solar date on which a lunar month/day falls.
//!
//! The conversion itself is delegated to a [`LunarFormatter`], which
//! renders a solar date the way a Chinese-calendar date formatter does
//! (`"九月"` / `"十八"`, leap months as `"闰四月"`). [`ChineseCalendar`] is
//! the stock formatter, backed by ICU4X's Chinese calendar. The finder
//! only parses that text and scans forward day by day.
//!
//! Without a formatter, or when the scan finds nothing, the lookup falls
//! back to 13 October.

use chrono::{Datelike, Days, NaiveDate};
use icu_calendar::chinese::Chinese;
use icu_calendar::Date;

/// Days scanned before giving up.
pub const SEARCH_DAYS: u64 = 730;

/// Fallback month and day (13 October).
const FALLBACK: (u32, u32) = (10, 13);

/// Month and day text of a lunar date, as a formatter renders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunarText {
    /// Month text, e.g. `"九月"`, `"正月"`, `"闰四月"`.
    pub month: String,
    /// Day text, e.g. `"初一"`, `"十八"`, `"廿三"`.
    pub day: String,
}

/// Renders solar dates in the Chinese lunar calendar.
pub trait LunarFormatter {
    /// Lunar month and day text for `date`, or `None` if unsupported.
    fn format(&self, date: NaiveDate) -> Option<LunarText>;
}

/// Numerals one through ten, indexed by value.
const NUMERALS: [&str; 11] = ["", "一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

/// Formatter over ICU4X's Chinese calendar.
///
/// Month codes `M01`..`M12` become `正月`..`腊月` (`冬月` for the eleventh),
/// a trailing `L` marks a leap month and adds the `闰` prefix. Days read
/// `初一`..`初十`, `十一`..`十九`, `二十`, `廿一`..`廿九`, `三十`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChineseCalendar;

impl ChineseCalendar {
    /// Creates the formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LunarFormatter for ChineseCalendar {
    fn format(&self, date: NaiveDate) -> Option<LunarText> {
        let month = u8::try_from(date.month()).ok()?;
        let day = u8::try_from(date.day()).ok()?;
        let iso = Date::try_new_iso_date(date.year(), month, day).ok()?;
        let lunar = iso.to_calendar(Chinese::new());

        let code = lunar.month().code;
        let code = code.0.as_str();
        let number: usize = code.get(1..3)?.parse().ok()?;
        Some(LunarText {
            month: month_text(number, code.ends_with('L'))?,
            day: day_text(lunar.day_of_month().0)?,
        })
    }
}

fn month_text(number: usize, is_leap: bool) -> Option<String> {
    let name = match number {
        1 => "正",
        11 => "冬",
        12 => "腊",
        2..=10 => NUMERALS[number],
        _ => return None,
    };
    let prefix = if is_leap { "闰" } else { "" };
    Some(format!("{prefix}{name}月"))
}

fn day_text(day: u32) -> Option<String> {
    let day = usize::try_from(day).ok()?;
    Some(match day {
        1..=10 => format!("初{}", NUMERALS[day]),
        11..=19 => format!("十{}", NUMERALS[day - 10]),
        20 => "二十".to_owned(),
        21..=29 => format!("廿{}", NUMERALS[day - 20]),
        30 => "三十".to_owned(),
        _ => return None,
    })
}

/// A parsed lunar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    /// Lunar month, 1-12.
    pub month: u32,
    /// Lunar day, 1-30.
    pub day: u32,
    /// True for an intercalary month.
    pub is_leap: bool,
}

fn digit(c: char) -> Option<u32> {
    Some(match c {
        '零' => 0,
        '一' => 1,
        '二' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        _ => return None,
    })
}

/// Value of a string that is exactly one numeral character.
fn single_digit(s: &str) -> Option<u32> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => digit(c),
        _ => None,
    }
}

/// Parses a Chinese day number: `初五`, `十`, `十八`, `二十`, `二十三`,
/// `廿一`, `卅`. The suffixes `日`/`号` are ignored.
///
/// Unknown numerals in a compound contribute zero, so `十X` parses as 10.
#[must_use]
pub fn chinese_number_to_int(source: &str) -> Option<u32> {
    let value: String = source
        .chars()
        .filter(|c| !matches!(c, '日' | '号' | '初'))
        .collect();
    if value.is_empty() {
        return None;
    }

    let mut chars = value.chars();
    let first = chars.next()?;
    let second = chars.next();

    if value == "十" {
        return Some(10);
    }
    if first == '十' {
        return Some(10 + second.and_then(digit).unwrap_or(0));
    }
    if value.ends_with('十') {
        return Some(digit(first).unwrap_or(0) * 10);
    }
    if let Some((tens, units)) = value.split_once('十') {
        return Some(single_digit(tens).unwrap_or(0) * 10 + single_digit(units).unwrap_or(0));
    }
    if first == '廿' {
        return Some(20 + second.and_then(digit).unwrap_or(0));
    }
    if first == '卅' {
        return Some(30 + second.and_then(digit).unwrap_or(0));
    }
    single_digit(&value)
}

/// Parses a lunar month name: `正月` = 1, `冬月` = 11, `腊月` = 12, otherwise
/// a numeral (`九月`, `十一月`).
#[must_use]
pub fn parse_lunar_month(value: &str) -> Option<u32> {
    if value.is_empty() {
        return None;
    }
    let cleaned = value.replacen('月', "", 1);
    match cleaned.as_str() {
        "正" => Some(1),
        "冬" => Some(11),
        "腊" | "臘" => Some(12),
        other => chinese_number_to_int(other),
    }
}

/// Formats `date` and parses the result.
pub fn lunar_date_parts<F: LunarFormatter + ?Sized>(formatter: &F, date: NaiveDate) -> Option<LunarDate> {
    let text = formatter.format(date)?;
    let is_leap = text.month.contains('闰') || text.month.contains('閏');
    let month_text: String = text.month.chars().filter(|c| !matches!(c, '闰' | '閏')).collect();

    let month = parse_lunar_month(&month_text)?;
    let day = chinese_number_to_int(&text.day)?;
    Some(LunarDate { month, day, is_leap })
}

/// Finds the next solar date of a fixed lunar month/day.
pub struct LunarFinder {
    month: u32,
    day: u32,
    formatter: Option<Box<dyn LunarFormatter>>,
}

impl std::fmt::Debug for LunarFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LunarFinder")
            .field("month", &self.month)
            .field("day", &self.day)
            .field("has_formatter", &self.formatter.is_some())
            .finish()
    }
}

impl LunarFinder {
    /// Creates a finder. Pass `None` when no lunar formatter is available.
    #[must_use]
    pub fn new(month: u32, day: u32, formatter: Option<Box<dyn LunarFormatter>>) -> Self {
        if formatter.is_none() {
            tracing::warn!("lunar formatter unavailable, falling back to fixed date");
        }
        Self { month, day, formatter }
    }

    /// First date on or after `base` whose lunar date matches.
    #[must_use]
    pub fn next_occurrence(&self, base: NaiveDate) -> NaiveDate {
        let Some(formatter) = self.formatter.as_deref() else {
            let this_year = fallback_date(base.year());
            return if this_year < base {
                fallback_date(base.year() + 1)
            } else {
                this_year
            };
        };

        for offset in 0..SEARCH_DAYS {
            let Some(probe) = base.checked_add_days(Days::new(offset)) else {
                break;
            };
            let Some(lunar) = lunar_date_parts(formatter, probe) else {
                continue;
            };
            if !lunar.is_leap && lunar.month == self.month && lunar.day == self.day {
                return probe;
            }
        }

        tracing::warn!(
            "lunar {}-{} not found within {SEARCH_DAYS} days of {base}",
            self.month,
            self.day
        );
        fallback_date(base.year() + 1)
    }
}

fn fallback_date(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, FALLBACK.0, FALLBACK.1).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const MONTHS: [&str; 12] = [
        "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月", "腊月",
    ];
    const DAYS: [&str; 30] = [
        "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一", "十二",
        "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一", "廿二", "廿三", "廿四",
        "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
    ];

    /// Toy calendar: every month has 30 days and starts on the solar epoch
    /// day, month 4 of the first year is doubled as a leap month.
    pub(crate) struct ToyCalendar {
        pub(crate) epoch: NaiveDate,
    }

    impl LunarFormatter for ToyCalendar {
        fn format(&self, date: NaiveDate) -> Option<LunarText> {
            let days = usize::try_from((date - self.epoch).num_days()).ok()?;
            let mut month_index = days / 30;
            let day = days % 30;
            let mut leap = false;
            if month_index == 4 {
                month_index = 3;
                leap = true;
            } else if month_index > 4 {
                month_index -= 1;
            }
            let month = MONTHS[month_index % 12];
            Some(LunarText {
                month: if leap { format!("闰{month}") } else { month.to_owned() },
                day: DAYS[day].to_owned(),
            })
        }
    }

    #[test]
    fn test_day_numbers() {
        let cases = [
            ("初一", 1),
            ("初十", 10),
            ("十", 10),
            ("十五", 15),
            ("二十", 20),
            ("二十三", 23),
            ("廿", 20),
            ("廿九", 29),
            ("三十", 30),
            ("卅", 30),
            ("五日", 5),
            ("十八号", 18),
        ];
        for (text, expected) in cases {
            assert_eq!(chinese_number_to_int(text), Some(expected), "{text}");
        }
    }

    #[test]
    fn test_unparseable_numbers() {
        assert_eq!(chinese_number_to_int(""), None);
        assert_eq!(chinese_number_to_int("初"), None);
        assert_eq!(chinese_number_to_int("abc"), None);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse_lunar_month("正月"), Some(1));
        assert_eq!(parse_lunar_month("九月"), Some(9));
        assert_eq!(parse_lunar_month("十一月"), Some(11));
        assert_eq!(parse_lunar_month("冬月"), Some(11));
        assert_eq!(parse_lunar_month("腊月"), Some(12));
        assert_eq!(parse_lunar_month(""), None);
    }

    #[test]
    fn test_leap_month_is_flagged() {
        let epoch = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let calendar = ToyCalendar { epoch };
        let date = lunar_date_parts(&calendar, epoch + Days::new(4 * 30 + 2)).unwrap();
        assert_eq!(date, LunarDate { month: 4, day: 3, is_leap: true });
    }

    #[test]
    fn test_finder_skips_leap_month() {
        let epoch = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let finder = LunarFinder::new(4, 3, Some(Box::new(ToyCalendar { epoch })));

        // Base inside the regular fourth month finds it directly.
        let found = finder.next_occurrence(epoch + Days::new(3 * 30));
        assert_eq!(found, epoch + Days::new(3 * 30 + 2));

        // Base after it lands in the leap month, which must be skipped; the
        // next regular month 4 is a full toy year later.
        let found = finder.next_occurrence(epoch + Days::new(3 * 30 + 5));
        assert_eq!(found, epoch + Days::new((12 + 4) * 30 + 2));
    }

    #[test]
    fn test_finder_without_formatter_uses_fallback() {
        let finder = LunarFinder::new(9, 18, None);
        let before = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();

        assert_eq!(finder.next_occurrence(before), NaiveDate::from_ymd_opt(2025, 10, 13).unwrap());
        assert_eq!(finder.next_occurrence(after), NaiveDate::from_ymd_opt(2026, 10, 13).unwrap());
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_chinese_calendar_known_dates() {
        let calendar = ChineseCalendar::new();
        let cases = [
            (ymd(2025, 1, 29), "正月", "初一"),
            (ymd(2025, 1, 28), "腊月", "廿九"),
            (ymd(2025, 10, 6), "八月", "十五"),
            (ymd(2026, 2, 17), "正月", "初一"),
        ];
        for (date, month, day) in cases {
            let text = calendar.format(date).unwrap();
            assert_eq!((text.month.as_str(), text.day.as_str()), (month, day), "{date}");
        }
    }

    #[test]
    fn test_chinese_calendar_leap_month() {
        let calendar = ChineseCalendar::new();
        let text = calendar.format(ymd(2025, 7, 25)).unwrap();
        assert_eq!(text.month, "闰六月");
        assert_eq!(text.day, "初一");

        let parsed = lunar_date_parts(&calendar, ymd(2025, 7, 25)).unwrap();
        assert_eq!(parsed, LunarDate { month: 6, day: 1, is_leap: true });
    }

    #[test]
    fn test_chinese_calendar_text_always_parses() {
        let calendar = ChineseCalendar::new();
        let mut date = ymd(2025, 1, 1);
        while date.year() == 2025 {
            let parts = lunar_date_parts(&calendar, date).unwrap();
            assert!((1..=12).contains(&parts.month), "{date}: {parts:?}");
            assert!((1..=30).contains(&parts.day), "{date}: {parts:?}");
            date = date + Days::new(1);
        }
    }

    #[test]
    fn test_finder_with_chinese_calendar() {
        let finder = LunarFinder::new(1, 1, Some(Box::new(ChineseCalendar::new())));
        assert_eq!(finder.next_occurrence(ymd(2025, 1, 1)), ymd(2025, 1, 29));
        assert_eq!(finder.next_occurrence(ymd(2025, 1, 30)), ymd(2026, 2, 17));

        // Regular sixth month, not the leap one that follows it.
        let finder = LunarFinder::new(6, 1, Some(Box::new(ChineseCalendar::new())));
        assert_eq!(finder.next_occurrence(ymd(2025, 6, 1)), ymd(2025, 6, 25));
    }

    #[test]
    fn test_finder_gives_up_after_search_window() {
        struct Blank;
        impl LunarFormatter for Blank {
            fn format(&self, _: NaiveDate) -> Option<LunarText> {
                None
            }
        }

        let finder = LunarFinder::new(1, 1, Some(Box::new(Blank)));
        let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(finder.next_occurrence(base), NaiveDate::from_ymd_opt(2026, 10, 13).unwrap());
    }
}
