// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Upcoming paycheck dates for a pay schedule.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::frequency::PayFrequency;
use crate::models::PaySchedule;

/// Upper bound on cadence steps, catch-up included.
pub const MAX_STEPS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paycheck {
    pub index: usize,
    pub primary_date: NaiveDate,
    pub secondary_date: Option<NaiveDate>,
    pub primary_amount: Decimal,
    pub secondary_amount: Decimal,
    pub is_split: bool,
}

impl Paycheck {
    /// Day the money lands in `account_id`.
    pub fn deposit_date_for(&self, schedule: &PaySchedule, account_id: i64) -> NaiveDate {
        match self.secondary_date {
            Some(d) if schedule.secondary_account_id == Some(account_id) => d,
            _ => self.primary_date,
        }
    }

    pub fn total(&self) -> Decimal {
        self.primary_amount + self.secondary_amount
    }
}

/// Lazy paycheck sequence starting at the first payday on or after `today`.
///
/// Paydays before `today` are stepped over while generating, so the first
/// item is not necessarily the schedule's start date. Clone it to restart.
#[derive(Debug, Clone)]
pub struct Paychecks {
    schedule: PaySchedule,
    today: NaiveDate,
    step: u32,
    emitted: usize,
    exhausted: bool,
}

impl Paychecks {
    pub fn new(schedule: &PaySchedule, today: NaiveDate) -> Self {
        Self {
            schedule: schedule.clone(),
            today,
            step: 0,
            emitted: 0,
            exhausted: false,
        }
    }

    fn cadence_date(&self, step: u32) -> Option<NaiveDate> {
        let start = self.schedule.start_date;
        match self.schedule.frequency {
            PayFrequency::Weekly => start.checked_add_days(Days::new(7 * u64::from(step))),
            PayFrequency::BiWeekly => start.checked_add_days(Days::new(14 * u64::from(step))),
            PayFrequency::SemiMonthly => semi_monthly(start, step),
            PayFrequency::Monthly => add_months_rolling(start, step),
        }
    }

    fn build(&self, primary_date: NaiveDate) -> Paycheck {
        let s = &self.schedule;
        let secondary = s.secondary_amount.unwrap_or_default();
        if s.split_paycheck {
            let early = u64::from(s.secondary_days_early.unwrap_or(0));
            Paycheck {
                index: self.emitted,
                primary_date,
                secondary_date: primary_date.checked_sub_days(Days::new(early)),
                primary_amount: s.primary_amount,
                secondary_amount: secondary,
                is_split: true,
            }
        } else {
            Paycheck {
                index: self.emitted,
                primary_date,
                secondary_date: None,
                primary_amount: s.primary_amount + secondary,
                secondary_amount: Decimal::ZERO,
                is_split: false,
            }
        }
    }
}

impl Iterator for Paychecks {
    type Item = Paycheck;

    fn next(&mut self) -> Option<Paycheck> {
        if self.exhausted {
            return None;
        }
        while self.step < MAX_STEPS {
            let Some(date) = self.cadence_date(self.step) else {
                self.exhausted = true;
                return None;
            };
            self.step += 1;
            if date < self.today {
                continue;
            }
            let paycheck = self.build(date);
            self.emitted += 1;
            return Some(paycheck);
        }
        self.exhausted = true;
        tracing::warn!(
            start = %self.schedule.start_date,
            today = %self.today,
            "paycheck generation hit the step cap"
        );
        None
    }
}

impl std::iter::FusedIterator for Paychecks {}

/// The next `count` paychecks.
pub fn upcoming(schedule: &PaySchedule, today: NaiveDate, count: usize) -> Vec<Paycheck> {
    Paychecks::new(schedule, today).take(count).collect()
}

/// Paychecks falling within `months` months of `today`.
pub fn within_months(schedule: &PaySchedule, today: NaiveDate, months: u32) -> Vec<Paycheck> {
    let Some(horizon) = today.checked_add_months(Months::new(months)) else {
        return Vec::new();
    };
    Paychecks::new(schedule, today)
        .take_while(|p| p.primary_date <= horizon)
        .collect()
}

/// Dates on which paychecks reach `account_id`, up to and including `deadline`.
pub fn relevant_paychecks(
    paychecks: &[Paycheck],
    schedule: &PaySchedule,
    account_id: i64,
    deadline: NaiveDate,
) -> Vec<NaiveDate> {
    paychecks
        .iter()
        .map(|p| p.deposit_date_for(schedule, account_id))
        .filter(|d| *d <= deadline)
        .collect()
}

fn semi_monthly(start: NaiveDate, step: u32) -> Option<NaiveDate> {
    // Half-month slots: even = 1st, odd = 15th.
    let base_slot = i64::from(start.year()) * 24 + i64::from(start.month0()) * 2;
    let first = match start.day() {
        1 => base_slot,
        2..=15 => base_slot + 1,
        _ => base_slot + 2,
    };
    let slot = first + i64::from(step);
    let year = i32::try_from(slot.div_euclid(24)).ok()?;
    let month0 = u32::try_from(slot.rem_euclid(24) / 2).ok()?;
    let day = if slot % 2 == 0 { 1 } else { 15 };
    NaiveDate::from_ymd_opt(year, month0 + 1, day)
}

/// Same day-of-month `months` later; days past the end of the target month
/// spill into the next one (Jan 31 + 1 month = Mar 3, or Mar 2 in leap years).
fn add_months_rolling(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(start.year(), start.month(), 1)?
        .checked_add_months(Months::new(months))?;
    first.checked_add_days(Days::new(u64::from(start.day() - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn monthly_rolls_over_short_months() {
        assert_eq!(add_months_rolling(d(2025, 1, 31), 1), Some(d(2025, 3, 3)));
        assert_eq!(add_months_rolling(d(2024, 1, 31), 1), Some(d(2024, 3, 2)));
        assert_eq!(add_months_rolling(d(2025, 1, 15), 12), Some(d(2026, 1, 15)));
    }

    #[test]
    fn semi_monthly_alternates_first_and_fifteenth() {
        let dates: Vec<_> = (0..4).map(|i| semi_monthly(d(2025, 1, 10), i).unwrap()).collect();
        assert_eq!(
            dates,
            vec![d(2025, 1, 15), d(2025, 2, 1), d(2025, 2, 15), d(2025, 3, 1)]
        );
        assert_eq!(semi_monthly(d(2025, 12, 20), 0), Some(d(2026, 1, 1)));
    }

    #[test]
    fn unsplit_paycheck_carries_the_full_amount() {
        let mut s = PaySchedule::new(d(2025, 1, 3), PayFrequency::BiWeekly, dec!(1500));
        s.secondary_amount = Some(dec!(500));
        let p = upcoming(&s, d(2025, 1, 1), 1).remove(0);
        assert_eq!(p.primary_amount, dec!(2000));
        assert_eq!(p.secondary_amount, Decimal::ZERO);
        assert!(!p.is_split);
    }

    #[test]
    fn step_cap_exhausts_for_good() {
        let s = PaySchedule::new(d(1800, 1, 3), PayFrequency::Weekly, dec!(10));
        let mut it = Paychecks::new(&s, d(2025, 1, 1));
        assert!(it.next().is_none());
        assert!(it.exhausted);
        assert_eq!(it.step, MAX_STEPS);
        assert!(it.next().is_none());
        assert_eq!(it.step, MAX_STEPS);
    }
}
