// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use payplan::budget::allocation::compute_allocation;
use payplan::budget::frequency::{Frequency, PayFrequency};
use payplan::budget::timeline::{Timeline, TimelineStatus, compute_timeline};
use payplan::budget::urgency::{
    UrgencyBucket, bucket, bucket_counts, bucket_for_score, category_urgency, urgency_score,
};
use payplan::models::{ItemKind, PlanningItem, PriorityState};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn goal(target: Decimal, saved: Decimal, by: Option<NaiveDate>) -> PlanningItem {
    PlanningItem {
        id: 1,
        name: "Laptop".into(),
        kind: ItemKind::SavingsGoal {
            target_amount: target,
            monthly_contribution: dec!(100),
            target_date: by,
        },
        already_saved: saved,
        category_id: 1,
        account_id: 1,
        priority_state: PriorityState::Active,
        is_active: true,
    }
}

fn bill(amount: Decimal, due: Option<NaiveDate>) -> PlanningItem {
    PlanningItem {
        id: 2,
        name: "Insurance".into(),
        kind: ItemKind::Expense {
            amount,
            frequency: Frequency::Annually,
            due_date: due,
        },
        already_saved: Decimal::ZERO,
        category_id: 1,
        account_id: 1,
        priority_state: PriorityState::Active,
        is_active: true,
    }
}

fn fridays(n: usize) -> Vec<NaiveDate> {
    (0..n)
        .map(|i| d(2025, 1, 3) + chrono::Days::new(14 * i as u64))
        .collect()
}

#[test]
fn fully_funded_wins_over_everything() {
    let item = goal(dec!(500), dec!(500), Some(d(2025, 1, 1)));
    let t = compute_timeline(&item, Decimal::ZERO, &[]);
    assert_eq!(t.status, TimelineStatus::FullyFunded);
    assert_eq!(t.remaining_needed, Decimal::ZERO);
    assert_eq!(urgency_score(&t), Decimal::ZERO);
    assert_eq!(bucket(&t), UrgencyBucket::OnTrack);
}

#[test]
fn no_deadline_scores_zero() {
    let t = compute_timeline(&goal(dec!(500), dec!(0), None), dec!(50), &[]);
    assert_eq!(t.status, TimelineStatus::NoDeadline);
    assert_eq!(t.paychecks_needed, Some(10));
    assert_eq!(urgency_score(&t), Decimal::ZERO);
    assert_eq!(bucket(&t), UrgencyBucket::NoDeadline);
}

#[test]
fn behind_schedule_goal() {
    let item = goal(dec!(1200), dec!(600), Some(d(2025, 1, 31)));
    let rate = compute_allocation(&item, PayFrequency::BiWeekly, Decimal::ZERO);
    let t = compute_timeline(&item, rate, &fridays(3));
    assert_eq!(t.status, TimelineStatus::Behind);
    assert_eq!(t.remaining_needed, dec!(600));
    assert_eq!(t.paychecks_needed, Some(13));
    assert_eq!(t.available_paychecks, 3);
    assert_eq!(t.required_allocation, Some(dec!(200.00)));
    assert_eq!(t.funding_date, None);
    assert_eq!(urgency_score(&t), dec!(100));
    assert_eq!(bucket(&t), UrgencyBucket::Critical);
    assert!(t.message.contains("200.00"));
}

#[test]
fn on_track_reports_funding_date() {
    let item = bill(dec!(300), Some(d(2025, 3, 31)));
    let dates = fridays(5);
    let t = compute_timeline(&item, dec!(100), &dates);
    assert_eq!(t.status, TimelineStatus::OnTrack);
    assert_eq!(t.paychecks_needed, Some(3));
    assert_eq!(t.funding_date, Some(dates[2]));
    assert_eq!(urgency_score(&t), dec!(60));
    assert_eq!(bucket(&t), UrgencyBucket::Upcoming);
}

#[test]
fn exact_rate_funds_on_the_last_needed_paycheck() {
    let item = goal(dec!(1200), dec!(600), Some(d(2025, 12, 31)));
    let rate = compute_allocation(&item, PayFrequency::BiWeekly, Decimal::ZERO);
    let dates = fridays(20);
    let t = compute_timeline(&item, rate, &dates);
    assert_eq!(t.status, TimelineStatus::OnTrack);
    assert_eq!(t.paychecks_needed, Some(13));
    assert_eq!(t.funding_date, Some(dates[12]));
    assert!(t.message.contains("46.15"));
}

#[test]
fn one_cent_short_is_not_behind() {
    let mut item = bill(dec!(100), Some(d(2025, 3, 31)));
    item.kind = ItemKind::Expense {
        amount: dec!(100),
        frequency: Frequency::Monthly,
        due_date: Some(d(2025, 3, 31)),
    };
    item.already_saved = dec!(99.99);
    let rate = compute_allocation(&item, PayFrequency::BiWeekly, Decimal::ZERO);
    let t = compute_timeline(&item, rate, &fridays(5));
    assert_ne!(t.status, TimelineStatus::Behind);
    assert_eq!(t.paychecks_needed, Some(3));
    assert!(urgency_score(&t) < dec!(100));
}

#[test]
fn zero_allocation_never_funds() {
    let item = bill(dec!(300), Some(d(2025, 3, 31)));
    let t = compute_timeline(&item, Decimal::ZERO, &fridays(3));
    assert_eq!(t.status, TimelineStatus::Behind);
    assert_eq!(t.paychecks_needed, None);
    assert_eq!(t.funding_date, None);
    assert_eq!(t.required_allocation, Some(dec!(100)));
}

#[test]
fn no_paychecks_left_before_deadline() {
    let item = bill(dec!(300), Some(d(2025, 1, 2)));
    let t = compute_timeline(&item, dec!(50), &[]);
    assert_eq!(t.status, TimelineStatus::Behind);
    assert_eq!(t.available_paychecks, 0);
    assert_eq!(t.required_allocation, None);
    assert_eq!(urgency_score(&t), dec!(100));
}

#[test]
fn required_allocation_rounds_up_to_the_cent() {
    let item = bill(dec!(100), Some(d(2025, 3, 31)));
    let t = compute_timeline(&item, dec!(1), &fridays(3));
    assert_eq!(t.required_allocation, Some(dec!(33.34)));
}

#[test]
fn bucket_thresholds() {
    assert_eq!(bucket_for_score(dec!(80)), UrgencyBucket::Critical);
    assert_eq!(bucket_for_score(dec!(79.99)), UrgencyBucket::Upcoming);
    assert_eq!(bucket_for_score(dec!(50)), UrgencyBucket::Upcoming);
    assert_eq!(bucket_for_score(dec!(49.99)), UrgencyBucket::OnTrack);
    assert_eq!(bucket_for_score(Decimal::ZERO), UrgencyBucket::OnTrack);
}

#[test]
fn category_urgency_is_the_mean() {
    let due = Some(d(2025, 3, 31));
    let on_track = compute_timeline(&bill(dec!(300), due), dec!(100), &fridays(4));
    let behind = compute_timeline(&bill(dec!(300), due), dec!(10), &fridays(4));
    assert_eq!(urgency_score(&on_track), dec!(75));
    let timelines = vec![on_track, behind];
    assert_eq!(category_urgency(&timelines), Some(dec!(87.5)));
    assert_eq!(category_urgency(&Vec::<Timeline>::new()), None);

    let counts = bucket_counts(&timelines);
    assert_eq!(counts.critical, 1);
    assert_eq!(counts.upcoming, 1);
    assert_eq!(counts.no_deadline, 0);
}
