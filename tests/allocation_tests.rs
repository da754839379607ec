// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use payplan::budget::allocation::{compute_allocation, monthly_equivalent, round_up_to, to_cents};
use payplan::budget::frequency::{Frequency, PayFrequency};
use payplan::models::{ItemKind, PlanningItem, PriorityState};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn expense(amount: Decimal, frequency: Frequency, saved: Decimal) -> PlanningItem {
    PlanningItem {
        id: 1,
        name: "Rent".into(),
        kind: ItemKind::Expense {
            amount,
            frequency,
            due_date: None,
        },
        already_saved: saved,
        category_id: 1,
        account_id: 1,
        priority_state: PriorityState::Active,
        is_active: true,
    }
}

fn goal(target: Decimal, monthly: Decimal, saved: Decimal) -> PlanningItem {
    PlanningItem {
        id: 2,
        name: "Vacation".into(),
        kind: ItemKind::SavingsGoal {
            target_amount: target,
            monthly_contribution: monthly,
            target_date: None,
        },
        already_saved: saved,
        category_id: 1,
        account_id: 1,
        priority_state: PriorityState::Active,
        is_active: true,
    }
}

#[test]
fn monthly_expense_spreads_over_26_paychecks() {
    let item = expense(dec!(100), Frequency::Monthly, Decimal::ZERO);
    let amt = compute_allocation(&item, PayFrequency::BiWeekly, Decimal::ZERO);
    assert_eq!(to_cents(amt), dec!(46.15));
    assert!(amt > dec!(46.15));
}

#[test]
fn partial_savings_prorate_expenses() {
    let item = expense(dec!(100), Frequency::Monthly, dec!(50));
    let amt = compute_allocation(&item, PayFrequency::BiWeekly, Decimal::ZERO);
    assert_eq!(to_cents(amt), dec!(23.08));
}

#[test]
fn paused_and_complete_items_need_nothing() {
    for state in [PriorityState::Paused, PriorityState::Complete] {
        let mut item = expense(dec!(5000), Frequency::Weekly, Decimal::ZERO);
        item.priority_state = state;
        assert_eq!(
            compute_allocation(&item, PayFrequency::BiWeekly, dec!(25)),
            Decimal::ZERO
        );
        let mut g = goal(dec!(1000), dec!(100), Decimal::ZERO);
        g.priority_state = state;
        assert_eq!(
            compute_allocation(&g, PayFrequency::Weekly, Decimal::ZERO),
            Decimal::ZERO
        );
    }
}

#[test]
fn fully_saved_items_need_nothing() {
    let item = expense(dec!(100), Frequency::Monthly, dec!(100));
    assert_eq!(
        compute_allocation(&item, PayFrequency::BiWeekly, Decimal::ZERO),
        Decimal::ZERO
    );
    let g = goal(dec!(1200), dec!(100), dec!(1500));
    assert_eq!(
        compute_allocation(&g, PayFrequency::BiWeekly, Decimal::ZERO),
        Decimal::ZERO
    );
}

#[test]
fn per_paycheck_expense_uses_what_is_left() {
    let item = expense(dec!(80), Frequency::PerPaycheck, dec!(30));
    assert_eq!(
        compute_allocation(&item, PayFrequency::Weekly, Decimal::ZERO),
        dec!(50.00)
    );
}

#[test]
fn goal_rate_ignores_progress() {
    let fresh = goal(dec!(1200), dec!(100), Decimal::ZERO);
    let halfway = goal(dec!(1200), dec!(100), dec!(600));
    let a = compute_allocation(&fresh, PayFrequency::BiWeekly, Decimal::ZERO);
    let b = compute_allocation(&halfway, PayFrequency::BiWeekly, Decimal::ZERO);
    assert_eq!(to_cents(a), dec!(46.15));
    assert_eq!(a, b);
}

#[test]
fn zero_increment_keeps_tiny_remainders() {
    let item = expense(dec!(100), Frequency::Monthly, dec!(99.99));
    let amt = compute_allocation(&item, PayFrequency::BiWeekly, Decimal::ZERO);
    assert!(amt > Decimal::ZERO);
    assert!(amt < dec!(0.01));
}

#[test]
fn rounding_increment_rounds_up() {
    let small = expense(dec!(10), Frequency::Monthly, Decimal::ZERO);
    assert_eq!(
        compute_allocation(&small, PayFrequency::BiWeekly, dec!(25)),
        dec!(25)
    );
    let rent = expense(dec!(100), Frequency::Monthly, Decimal::ZERO);
    assert_eq!(
        compute_allocation(&rent, PayFrequency::BiWeekly, dec!(25)),
        dec!(50)
    );
    assert_eq!(round_up_to(dec!(25), dec!(25)), dec!(25));
    assert_eq!(round_up_to(dec!(25.0001), dec!(25)), dec!(50));
}

#[test]
fn unknown_frequency_is_treated_as_per_paycheck() {
    let item = expense(dec!(100), Frequency::Unrecognized("lunar".into()), Decimal::ZERO);
    assert_eq!(
        compute_allocation(&item, PayFrequency::BiWeekly, Decimal::ZERO),
        dec!(100)
    );
    assert_eq!(
        compute_allocation(&item, PayFrequency::Weekly, Decimal::ZERO),
        dec!(200)
    );
}

#[test]
fn monthly_equivalents() {
    assert_eq!(
        monthly_equivalent(&expense(dec!(600), Frequency::Annually, Decimal::ZERO), PayFrequency::BiWeekly),
        dec!(50)
    );
    assert_eq!(
        monthly_equivalent(&expense(dec!(50), Frequency::PerPaycheck, Decimal::ZERO), PayFrequency::BiWeekly),
        dec!(108.33)
    );
    assert_eq!(
        monthly_equivalent(&goal(dec!(900), dec!(75), Decimal::ZERO), PayFrequency::Monthly),
        dec!(75)
    );
}

fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    (0usize..Frequency::ALL.len()).prop_map(|i| Frequency::ALL[i].clone())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Owing more never lowers the per-paycheck amount.
    #[test]
    fn prop_allocation_monotonic_in_remaining(
        amount_cents in 1i64..10_000_000,
        saved_a in 0i64..10_000_000,
        saved_b in 0i64..10_000_000,
        frequency in frequency_strategy(),
        increment in prop_oneof![Just(Decimal::ZERO), Just(dec!(1)), Just(dec!(25))],
    ) {
        let amount = Decimal::new(amount_cents, 2);
        let (more_saved, less_saved) = if saved_a >= saved_b { (saved_a, saved_b) } else { (saved_b, saved_a) };
        let owes_less = expense(amount, frequency.clone(), Decimal::new(more_saved, 2));
        let owes_more = expense(amount, frequency, Decimal::new(less_saved, 2));
        let low = compute_allocation(&owes_less, PayFrequency::BiWeekly, increment);
        let high = compute_allocation(&owes_more, PayFrequency::BiWeekly, increment);
        prop_assert!(low <= high, "{} > {}", low, high);
        prop_assert!(low >= Decimal::ZERO);
    }

    #[test]
    fn prop_owing_something_means_setting_something_aside(
        amount_cents in 1i64..10_000_000,
        short_cents in 1i64..10_000_000,
        frequency in frequency_strategy(),
    ) {
        let amount = Decimal::new(amount_cents, 2);
        let short = Decimal::new(short_cents.min(amount_cents), 2);
        let item = expense(amount, frequency, amount - short);
        prop_assert!(compute_allocation(&item, PayFrequency::BiWeekly, Decimal::ZERO) > Decimal::ZERO);
    }

    #[test]
    fn prop_paused_is_always_zero(amount_cents in 0i64..10_000_000, frequency in frequency_strategy()) {
        let mut item = expense(Decimal::new(amount_cents, 2), frequency, Decimal::ZERO);
        item.priority_state = PriorityState::Paused;
        prop_assert_eq!(compute_allocation(&item, PayFrequency::Monthly, dec!(5)), Decimal::ZERO);
    }
}
