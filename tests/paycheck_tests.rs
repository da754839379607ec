// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, NaiveDate};
use payplan::budget::frequency::PayFrequency;
use payplan::budget::paychecks::{Paychecks, relevant_paychecks, upcoming, within_months};
use payplan::models::PaySchedule;
use proptest::prelude::*;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn biweekly_catches_up_to_today() {
    let s = PaySchedule::new(d(2024, 1, 5), PayFrequency::BiWeekly, dec!(2000));
    let today = d(2025, 6, 15);
    let checks = upcoming(&s, today, 26);
    assert_eq!(checks.len(), 26);
    let first = checks[0].primary_date;
    assert!(first >= today);
    assert!(first - Days::new(14) < today);
    assert_eq!((first - s.start_date).num_days() % 14, 0);
    assert_eq!(checks[0].index, 0);
    assert_eq!(checks[25].index, 25);
}

#[test]
fn start_in_the_future_is_the_first_payday() {
    let s = PaySchedule::new(d(2025, 3, 7), PayFrequency::Weekly, dec!(900));
    let checks = upcoming(&s, d(2025, 3, 1), 3);
    let dates: Vec<_> = checks.iter().map(|p| p.primary_date).collect();
    assert_eq!(dates, vec![d(2025, 3, 7), d(2025, 3, 14), d(2025, 3, 21)]);
}

#[test]
fn payday_on_today_counts() {
    let s = PaySchedule::new(d(2025, 3, 1), PayFrequency::BiWeekly, dec!(900));
    let checks = upcoming(&s, d(2025, 3, 15), 1);
    assert_eq!(checks[0].primary_date, d(2025, 3, 15));
}

#[test]
fn semi_monthly_uses_first_and_fifteenth() {
    let s = PaySchedule::new(d(2025, 1, 1), PayFrequency::SemiMonthly, dec!(1200));
    let dates: Vec<_> = upcoming(&s, d(2025, 1, 10), 3)
        .into_iter()
        .map(|p| p.primary_date)
        .collect();
    assert_eq!(dates, vec![d(2025, 1, 15), d(2025, 2, 1), d(2025, 2, 15)]);
}

#[test]
fn monthly_spills_into_next_month() {
    let s = PaySchedule::new(d(2025, 1, 31), PayFrequency::Monthly, dec!(3000));
    let dates: Vec<_> = upcoming(&s, d(2025, 1, 1), 3)
        .into_iter()
        .map(|p| p.primary_date)
        .collect();
    assert_eq!(dates, vec![d(2025, 1, 31), d(2025, 3, 3), d(2025, 3, 31)]);
}

#[test]
fn horizon_is_inclusive() {
    let s = PaySchedule::new(d(2025, 3, 1), PayFrequency::BiWeekly, dec!(900));
    let checks = within_months(&s, d(2025, 3, 1), 1);
    let dates: Vec<_> = checks.iter().map(|p| p.primary_date).collect();
    assert_eq!(dates, vec![d(2025, 3, 1), d(2025, 3, 15), d(2025, 3, 29)]);
}

#[test]
fn split_paycheck_lands_early_in_secondary_account() {
    let mut s = PaySchedule::new(d(2025, 1, 10), PayFrequency::BiWeekly, dec!(1500));
    s.split_paycheck = true;
    s.secondary_amount = Some(dec!(500));
    s.secondary_account_id = Some(2);
    s.secondary_days_early = Some(2);

    let checks = upcoming(&s, d(2025, 1, 1), 2);
    assert!(checks[0].is_split);
    assert_eq!(checks[0].secondary_date, Some(d(2025, 1, 8)));
    assert_eq!(checks[0].total(), dec!(2000));
    assert_eq!(checks[0].deposit_date_for(&s, 2), d(2025, 1, 8));
    assert_eq!(checks[0].deposit_date_for(&s, 1), d(2025, 1, 10));

    // Deadline between the secondary and primary deposit of the second check.
    let deadline = d(2025, 1, 23);
    assert_eq!(relevant_paychecks(&checks, &s, 2, deadline), vec![d(2025, 1, 8), d(2025, 1, 22)]);
    assert_eq!(relevant_paychecks(&checks, &s, 1, deadline), vec![d(2025, 1, 10)]);
}

#[test]
fn ancient_start_stops_at_the_step_cap() {
    let s = PaySchedule::new(d(1800, 1, 3), PayFrequency::Weekly, dec!(10));
    assert!(upcoming(&s, d(2025, 1, 1), 5).is_empty());

    let s = PaySchedule::new(d(2000, 1, 7), PayFrequency::BiWeekly, dec!(10));
    assert_eq!(upcoming(&s, d(2025, 1, 1), 5).len(), 5);
}

#[test]
fn iterator_restarts_when_cloned() {
    let s = PaySchedule::new(d(2025, 1, 3), PayFrequency::Weekly, dec!(10));
    let mut it = Paychecks::new(&s, d(2025, 1, 1));
    let again = it.clone();
    let a = it.next().unwrap();
    let b: Vec<_> = again.take(1).collect();
    assert_eq!(a, b[0]);
}

fn pay_frequency() -> impl Strategy<Value = PayFrequency> {
    prop_oneof![
        Just(PayFrequency::Weekly),
        Just(PayFrequency::BiWeekly),
        Just(PayFrequency::SemiMonthly),
        Just(PayFrequency::Monthly),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_paydays_are_future_and_increasing(
        offset in -2000i64..2000,
        freq in pay_frequency(),
        count in 1usize..40,
    ) {
        let today = d(2025, 6, 1);
        let start = if offset < 0 {
            today - Days::new(offset.unsigned_abs())
        } else {
            today + Days::new(offset as u64)
        };
        let s = PaySchedule::new(start, freq, dec!(100));
        let checks = upcoming(&s, today, count);
        prop_assert_eq!(checks.len(), count);
        prop_assert!(checks[0].primary_date >= today);
        for w in checks.windows(2) {
            prop_assert!(w[0].primary_date < w[1].primary_date);
        }
    }
}
