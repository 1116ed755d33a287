//! # Birthday Countdown
//!
//! Ticks once a second. Each render re-targets if the birthday has
//! passed, then breaks the remaining time into days / hours / minutes /
//! seconds.

use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime};

use crate::config::BirthdayRule;
use crate::lunar::{LunarFinder, LunarFormatter};

/// Cell labels in display order.
pub const LABELS: [&str; 4] = ["天", "小时", "分钟", "秒"];

/// Prefix of the notice line above the cells.
pub const NOTICE_PREFIX: &str = "下次生日";

/// Remaining time, floored to whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Remaining {
    /// Whole days.
    pub days: i64,
    /// Hours past the whole days (0-23).
    pub hours: i64,
    /// Minutes past the whole hours (0-59).
    pub minutes: i64,
    /// Seconds past the whole minutes (0-59).
    pub seconds: i64,
}

impl Remaining {
    /// Splits a non-negative second count.
    #[must_use]
    pub fn from_seconds(total: i64) -> Self {
        let total = total.max(0);
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    fn values(self) -> [i64; 4] {
        [self.days, self.hours, self.minutes, self.seconds]
    }
}

/// One value/label cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownCell {
    /// Zero-padded value.
    pub value: String,
    /// Unit label.
    pub label: &'static str,
}

/// Everything one render shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownView {
    /// Date the countdown points at.
    pub target: NaiveDate,
    /// `下次生日：YYYY-MM-DD`.
    pub notice: String,
    /// Remaining time.
    pub remaining: Remaining,
    /// Four cells, days first.
    pub cells: Vec<CountdownCell>,
}

enum Schedule {
    Solar { month: u32, day: u32 },
    Lunar(LunarFinder),
}

impl std::fmt::Debug for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solar { month, day } => write!(f, "Solar({month}-{day})"),
            Self::Lunar(finder) => write!(f, "Lunar({finder:?})"),
        }
    }
}

/// Countdown to the next birthday.
#[derive(Debug)]
pub struct Countdown {
    schedule: Schedule,
    target: Option<NaiveDateTime>,
}

impl Countdown {
    /// Creates a countdown. `lunar` is only used for lunar birthdays.
    #[must_use]
    pub fn new(rule: BirthdayRule, lunar: Option<Box<dyn LunarFormatter>>) -> Self {
        let schedule = match rule {
            BirthdayRule::Solar { month, day } => Schedule::Solar { month, day },
            BirthdayRule::Lunar { month, day } => Schedule::Lunar(LunarFinder::new(month, day, lunar)),
        };
        Self {
            schedule,
            target: None,
        }
    }

    /// Start of the next birthday strictly after `now`.
    #[must_use]
    pub fn next_target(&self, now: NaiveDateTime) -> NaiveDateTime {
        let date = match &self.schedule {
            Schedule::Solar { month, day } => next_solar(now, *month, *day),
            Schedule::Lunar(finder) => {
                let today = now.date();
                let found = finder.next_occurrence(today);
                if found.and_hms_opt(0, 0, 0).is_some_and(|t| t <= now) {
                    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
                    finder.next_occurrence(tomorrow)
                } else {
                    found
                }
            }
        };
        midnight(date)
    }

    /// Renders against the wall clock.
    pub fn render_now(&mut self) -> CountdownView {
        self.render(Local::now().naive_local())
    }

    /// Renders against `now`.
    pub fn render(&mut self, now: NaiveDateTime) -> CountdownView {
        let target = match self.target {
            Some(target) if now <= target => target,
            _ => {
                let next = self.next_target(now);
                tracing::debug!("countdown target set to {next}");
                self.target = Some(next);
                next
            }
        };

        let remaining = Remaining::from_seconds((target - now).num_seconds());
        let cells = remaining
            .values()
            .iter()
            .zip(LABELS)
            .map(|(value, label)| CountdownCell {
                value: format!("{value:02}"),
                label,
            })
            .collect();

        CountdownView {
            target: target.date(),
            notice: format!("{NOTICE_PREFIX}：{}", target.date().format("%Y-%m-%d")),
            remaining,
            cells,
        }
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MAX)
}

/// Next `month`-`day` at midnight after `now`, skipping years where the
/// date doesn't exist (29 February).
fn next_solar(now: NaiveDateTime, month: u32, day: u32) -> NaiveDate {
    let mut year = now.year();
    for _ in 0..9 {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            if midnight(date) > now {
                return date;
            }
        }
        year += 1;
    }
    NaiveDate::MAX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunar::tests::ToyCalendar;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn test_remaining_breakdown() {
        let r = Remaining::from_seconds(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5);
        assert_eq!(r, Remaining { days: 2, hours: 3, minutes: 4, seconds: 5 });
        assert_eq!(Remaining::from_seconds(-10), Remaining::default());
    }

    #[test]
    fn test_render_before_birthday() {
        let mut countdown = Countdown::new(BirthdayRule::default(), None);
        let view = countdown.render(at(2025, 10, 31, 22, 0, 30));

        assert_eq!(view.notice, "下次生日：2025-11-02");
        assert_eq!(view.remaining, Remaining { days: 1, hours: 1, minutes: 59, seconds: 30 });
        let values: Vec<_> = view.cells.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["01", "01", "59", "30"]);
        let labels: Vec<_> = view.cells.iter().map(|c| c.label).collect();
        assert_eq!(labels, LABELS);
    }

    #[test]
    fn test_on_the_day_rolls_to_next_year() {
        let mut countdown = Countdown::new(BirthdayRule::default(), None);
        let view = countdown.render(at(2025, 11, 2, 9, 0, 0));
        assert_eq!(view.target, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
    }

    #[test]
    fn test_retargets_once_passed() {
        let mut countdown = Countdown::new(BirthdayRule::default(), None);
        countdown.render(at(2025, 11, 1, 23, 59, 59));

        let at_midnight = countdown.render(at(2025, 11, 2, 0, 0, 0));
        assert_eq!(at_midnight.target, NaiveDate::from_ymd_opt(2025, 11, 2).unwrap());
        assert_eq!(at_midnight.remaining, Remaining::default());

        let after = countdown.render(at(2025, 11, 2, 0, 0, 1));
        assert_eq!(after.target, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
    }

    #[test]
    fn test_leap_day_birthday_skips_to_leap_year() {
        let countdown = Countdown::new(BirthdayRule::Solar { month: 2, day: 29 }, None);
        let next = countdown.next_target(at(2025, 3, 1, 0, 0, 0));
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_lunar_birthday_uses_formatter() {
        let epoch = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let countdown = Countdown::new(
            BirthdayRule::Lunar { month: 2, day: 5 },
            Some(Box::new(ToyCalendar { epoch })),
        );

        // Second toy month starts 30 days after the epoch.
        let next = countdown.next_target(at(2025, 1, 10, 12, 0, 0));
        assert_eq!(next.date(), epoch + Days::new(34));

        // On the day itself the countdown moves on rather than sitting at zero.
        let on_day = countdown.next_target(at(2025, 2, 4, 8, 0, 0));
        assert!(on_day.date() > epoch + Days::new(34));
    }
}
