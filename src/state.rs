// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The single authoritative copy of a user's budget.
//!
//! Every mutating method validates first and leaves the budget untouched on
//! error. Derived allocations are rebuilt before a successful mutation
//! returns, so readers never observe stale per-paycheck amounts.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::budget::allocation::{compute_allocation, monthly_equivalent};
use crate::budget::frequency::{Frequency, PayFrequency};
use crate::budget::ledger::{self, FundingStatus};
use crate::budget::paychecks::{self, Paycheck, Paychecks};
use crate::budget::summary::{SummaryInput, budget_summary};
use crate::budget::timeline::{Timeline, compute_timeline};
use crate::budget::urgency::{self, UrgencyBucket};
use crate::budget::ItemPlan;
use crate::config::Settings;
use crate::db::{
    ACCOUNTS_KEY, CATEGORIES_KEY, ITEMS_KEY, KeyValueStore, PAY_SCHEDULE_KEY, SETTINGS_KEY,
    TRANSACTIONS_KEY,
};
use crate::errors::{Error, Result};
use crate::models::{
    Account, AccountKind, BudgetAllocation, Category, CategoryKind, ItemKind, PaySchedule,
    PlanningItem, PriorityState, Transaction,
};

#[derive(Debug, Clone, Default)]
pub struct Budget {
    accounts: Vec<Account>,
    categories: Vec<Category>,
    items: Vec<PlanningItem>,
    transactions: Vec<Transaction>,
    pay_schedule: Option<PaySchedule>,
    settings: Settings,
    allocations: Vec<BudgetAllocation>,
}

fn next_id<T>(rows: &[T], id: impl Fn(&T) -> i64) -> i64 {
    rows.iter().map(id).max().unwrap_or(0) + 1
}

fn require_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    Ok(name.to_string())
}

impl Budget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<S: KeyValueStore>(store: &S) -> Result<Self> {
        let mut budget = Self {
            accounts: store.load(ACCOUNTS_KEY, Vec::new())?,
            categories: store.load(CATEGORIES_KEY, Vec::new())?,
            items: store.load(ITEMS_KEY, Vec::new())?,
            transactions: store.load(TRANSACTIONS_KEY, Vec::new())?,
            pay_schedule: store.load(PAY_SCHEDULE_KEY, None)?,
            settings: store.load(SETTINGS_KEY, Settings::default())?,
            allocations: Vec::new(),
        };
        budget.recompute();
        Ok(budget)
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        store.save(ACCOUNTS_KEY, &self.accounts)?;
        store.save(CATEGORIES_KEY, &self.categories)?;
        store.save(ITEMS_KEY, &self.items)?;
        store.save(TRANSACTIONS_KEY, &self.transactions)?;
        store.save(PAY_SCHEDULE_KEY, &self.pay_schedule)?;
        store.save(SETTINGS_KEY, &self.settings)?;
        Ok(())
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn items(&self) -> &[PlanningItem] {
        &self.items
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn pay_schedule(&self) -> Option<&PaySchedule> {
        self.pay_schedule.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn allocations(&self) -> &[BudgetAllocation] {
        &self.allocations
    }

    /// Cadence used to annualize per-paycheck amounts; bi-weekly until a
    /// schedule is set.
    pub fn pay_frequency(&self) -> PayFrequency {
        self.pay_schedule
            .as_ref()
            .map_or(PayFrequency::BiWeekly, |s| s.frequency)
    }

    pub fn account(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn item(&self, id: i64) -> Option<&PlanningItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name.trim())
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name.trim())
    }

    pub fn item_by_name(&self, name: &str) -> Option<&PlanningItem> {
        self.items.iter().find(|i| i.name == name.trim())
    }

    pub fn default_account(&self) -> Option<&Account> {
        self.accounts.iter().find(|a| a.is_default)
    }

    pub fn allocation_for(&self, item_id: i64) -> Option<&BudgetAllocation> {
        self.allocations.iter().find(|a| a.planning_item_id == item_id)
    }

    pub fn items_in_category(&self, category_id: i64) -> impl Iterator<Item = &PlanningItem> {
        self.items.iter().filter(move |i| i.category_id == category_id)
    }

    /// Expense items, in insertion order.
    pub fn expenses(&self) -> impl Iterator<Item = &PlanningItem> {
        self.items.iter().filter(|i| i.is_expense())
    }

    pub fn savings_goals(&self) -> impl Iterator<Item = &PlanningItem> {
        self.items.iter().filter(|i| !i.is_expense())
    }

    // ---- derived state ----

    /// Rebuild the per-item allocations: one per active item, none for
    /// inactive ones.
    pub fn recompute(&mut self) {
        let pay = self.pay_frequency();
        let increment = self.settings.rounding_increment;
        self.allocations = self
            .items
            .iter()
            .filter(|i| i.is_active)
            .enumerate()
            .map(|(n, item)| BudgetAllocation {
                id: n as i64 + 1,
                planning_item_id: item.id,
                category_id: item.category_id,
                monthly_allocation: monthly_equivalent(item, pay),
                per_paycheck_amount: compute_allocation(item, pay, increment),
                source_account_id: item.account_id,
                is_paused: item.priority_state == PriorityState::Paused,
            })
            .collect();
        tracing::debug!(allocations = self.allocations.len(), pay = %pay, "recomputed allocations");
    }

    pub fn per_paycheck_amount(&self, item_id: i64) -> Decimal {
        self.allocation_for(item_id)
            .map_or(Decimal::ZERO, |a| a.per_paycheck_amount)
    }

    pub fn per_paycheck_total(&self) -> Decimal {
        self.allocations.iter().map(|a| a.per_paycheck_amount).sum()
    }

    /// Next paychecks as configured by `paycheck_count`.
    pub fn upcoming_paychecks(&self, today: NaiveDate) -> Vec<Paycheck> {
        match &self.pay_schedule {
            Some(s) => paychecks::upcoming(s, today, self.settings.paycheck_count),
            None => Vec::new(),
        }
    }

    pub fn paychecks_in_horizon(&self, today: NaiveDate) -> Vec<Paycheck> {
        match &self.pay_schedule {
            Some(s) => paychecks::within_months(s, today, self.settings.horizon_months),
            None => Vec::new(),
        }
    }

    pub fn timeline(&self, item: &PlanningItem, today: NaiveDate) -> Timeline {
        let allocation = self.per_paycheck_amount(item.id);
        let dates = match (&self.pay_schedule, item.deadline()) {
            (Some(schedule), Some(deadline)) => {
                // A split deposit can land before the deadline even when
                // its payday falls after it.
                let checks: Vec<Paycheck> = Paychecks::new(schedule, today)
                    .take_while(|p| p.deposit_date_for(schedule, item.account_id) <= deadline)
                    .collect();
                paychecks::relevant_paychecks(&checks, schedule, item.account_id, deadline)
            }
            _ => Vec::new(),
        };
        compute_timeline(item, allocation, &dates)
    }

    /// Allocation, timeline and urgency for every active item.
    pub fn plans(&self, today: NaiveDate) -> Vec<ItemPlan> {
        self.items
            .iter()
            .filter(|i| i.is_active)
            .map(|item| {
                let timeline = self.timeline(item, today);
                ItemPlan {
                    item: item.clone(),
                    per_paycheck: self.per_paycheck_amount(item.id),
                    urgency: urgency::urgency_score(&timeline),
                    bucket: urgency::bucket(&timeline),
                    timeline,
                }
            })
            .collect()
    }

    /// Mean urgency of the category's active items that have a deadline.
    pub fn category_urgency(&self, category_id: i64, today: NaiveDate) -> Option<Decimal> {
        let timelines: Vec<Timeline> = self
            .items_in_category(category_id)
            .filter(|i| i.is_active)
            .map(|i| self.timeline(i, today))
            .filter(Timeline::has_deadline)
            .collect();
        urgency::category_urgency(&timelines)
    }

    pub fn category_bucket(&self, category_id: i64, today: NaiveDate) -> UrgencyBucket {
        self.category_urgency(category_id, today)
            .map_or(UrgencyBucket::NoDeadline, urgency::bucket_for_score)
    }

    /// Sum of the targets of the category's active items.
    pub fn total_planned(&self, category_id: i64) -> Decimal {
        self.items_in_category(category_id)
            .filter(|i| i.is_active)
            .map(PlanningItem::target)
            .sum()
    }

    pub fn category_funding_status(&self, category_id: i64) -> Result<FundingStatus> {
        let cat = self
            .category(category_id)
            .ok_or(Error::CategoryNotFound(category_id))?;
        let count = self
            .items_in_category(category_id)
            .filter(|i| i.is_active)
            .count();
        Ok(ledger::funding_status(
            cat,
            self.total_planned(category_id),
            count,
        ))
    }

    pub fn to_be_allocated(&self) -> Decimal {
        ledger::to_be_allocated(&self.accounts, &self.categories)
    }

    /// Plain-text report of the whole budget.
    pub fn summary(&self, today: NaiveDate) -> String {
        let plans = self.plans(today);
        budget_summary(&SummaryInput {
            currency: &self.settings.currency,
            pay: self.pay_schedule.as_ref(),
            to_be_allocated: self.to_be_allocated(),
            categories: &self.categories,
            plans: &plans,
        })
    }

    /// Problems worth telling the user about. None of them block anything.
    pub fn warnings(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        let tba = self.to_be_allocated();
        if tba < Decimal::ZERO {
            out.push(("over_allocated", format!("To Be Allocated is {:.2}", tba)));
        }
        let defaults = self.accounts.iter().filter(|a| a.is_default).count();
        if !self.accounts.is_empty() && defaults != 1 {
            out.push(("default_account", format!("{} default accounts", defaults)));
        }
        for c in &self.categories {
            if c.available < Decimal::ZERO {
                out.push(("overspent", format!("{} ({:.2})", c.name, c.available)));
            }
            let n = self.items_in_category(c.id).count();
            if c.r#type == CategoryKind::Single && n > 1 {
                out.push(("single_category_overfull", format!("{} holds {} items", c.name, n)));
            }
        }
        for i in &self.items {
            if self.category(i.category_id).is_none() {
                out.push(("item_missing_category", i.name.clone()));
            }
            if self.account(i.account_id).is_none() {
                out.push(("item_missing_account", i.name.clone()));
            }
            if let ItemKind::Expense {
                frequency: Frequency::Unrecognized(k),
                ..
            } = &i.kind
            {
                out.push(("unknown_frequency", format!("{}: {}", i.name, k)));
            }
        }
        for t in &self.transactions {
            if ledger::validate_transaction(t, &self.accounts, &self.categories).is_err() {
                out.push(("dangling_transaction", format!("#{} {} {}", t.id, t.date, t.payee)));
            }
        }
        out
    }

    // ---- accounts ----

    pub fn add_account(&mut self, name: &str, kind: AccountKind, balance: Decimal) -> Result<i64> {
        let name = require_name(name)?;
        let id = next_id(&self.accounts, |a| a.id);
        let is_default = self.accounts.is_empty();
        self.accounts.push(Account {
            id,
            name,
            balance,
            r#type: kind,
            is_default,
        });
        Ok(id)
    }

    pub fn set_default_account(&mut self, id: i64) -> Result<()> {
        if self.account(id).is_none() {
            return Err(Error::AccountNotFound(id));
        }
        for a in &mut self.accounts {
            a.is_default = a.id == id;
        }
        Ok(())
    }

    /// Remove an account. Its transactions block removal unless `cascade`,
    /// in which case they are reversed and deleted too.
    pub fn remove_account(&mut self, id: i64, cascade: bool) -> Result<()> {
        let acct = self.account(id).ok_or(Error::AccountNotFound(id))?;
        let items = self.items.iter().filter(|i| i.account_id == id).count();
        if items > 0 {
            return Err(Error::AccountInUse {
                name: acct.name.clone(),
                items,
            });
        }
        let touches = |t: &Transaction| t.account_id == id || t.transfer_account_id == Some(id);
        let dependent = self.transactions.iter().filter(|t| touches(t)).count();
        if dependent > 0 && !cascade {
            return Err(Error::AccountHasTransactions {
                name: acct.name.clone(),
                transactions: dependent,
            });
        }

        let (gone, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.transactions).into_iter().partition(|t| touches(t));
        for t in &gone {
            ledger::reverse_transaction(t, &mut self.accounts, &mut self.categories);
        }
        self.transactions = kept;

        let was_default = self.account(id).is_some_and(|a| a.is_default);
        self.accounts.retain(|a| a.id != id);
        if was_default {
            if let Some(first) = self.accounts.first_mut() {
                first.is_default = true;
            }
        }
        if let Some(s) = &mut self.pay_schedule {
            if s.secondary_account_id == Some(id) {
                tracing::warn!(account = id, "secondary paycheck account removed");
                s.secondary_account_id = None;
            }
        }
        Ok(())
    }

    /// Move money between accounts; recorded as a transfer transaction.
    pub fn transfer(&mut self, from: i64, to: i64, amount: Decimal, date: NaiveDate) -> Result<i64> {
        if amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount(amount));
        }
        let to_name = self
            .account(to)
            .map(|a| a.name.clone())
            .ok_or(Error::AccountNotFound(to))?;
        self.add_transaction(Transaction {
            id: 0,
            date,
            payee: format!("Transfer to {}", to_name),
            amount: -amount,
            category_id: None,
            account_id: from,
            transfer_account_id: Some(to),
            cleared: true,
            memo: None,
            splits: Vec::new(),
        })
    }

    // ---- categories ----

    pub fn add_category(&mut self, name: &str, kind: CategoryKind, color: &str) -> Result<i64> {
        let name = require_name(name)?;
        let id = next_id(&self.categories, |c| c.id);
        let mut cat = Category::new(id, &name, kind);
        cat.color = color.trim().to_string();
        self.categories.push(cat);
        Ok(id)
    }

    /// Remove a category. Its items, transactions and envelope balance move to
    /// `fallback`; without a fallback the category must be unreferenced.
    pub fn remove_category(&mut self, id: i64, fallback: Option<i64>) -> Result<()> {
        let cat = self.category(id).ok_or(Error::CategoryNotFound(id))?.clone();
        let moving = self.items_in_category(id).count();
        let referenced = self
            .transactions
            .iter()
            .filter(|t| {
                t.category_id == Some(id) || t.splits.iter().any(|s| s.category_id == Some(id))
            })
            .count();

        let Some(fallback_id) = fallback else {
            if moving > 0 || referenced > 0 {
                return Err(Error::CategoryInUse {
                    name: cat.name,
                    items: moving,
                    transactions: referenced,
                });
            }
            self.categories.retain(|c| c.id != id);
            return Ok(());
        };

        if fallback_id == id {
            return Err(Error::SameCategory);
        }
        let target = self
            .category(fallback_id)
            .ok_or(Error::CategoryNotFound(fallback_id))?;
        if target.r#type == CategoryKind::Single
            && self.items_in_category(fallback_id).count() + moving > 1
        {
            return Err(Error::CategoryFull(target.name.clone()));
        }

        for item in self.items.iter_mut().filter(|i| i.category_id == id) {
            item.category_id = fallback_id;
        }
        for t in &mut self.transactions {
            if t.category_id == Some(id) {
                t.category_id = Some(fallback_id);
            }
            for s in &mut t.splits {
                if s.category_id == Some(id) {
                    s.category_id = Some(fallback_id);
                }
            }
        }
        if let Some(dst) = self.categories.iter_mut().find(|c| c.id == fallback_id) {
            dst.allocated += cat.allocated;
            dst.spent += cat.spent;
            dst.available += cat.available;
        }
        self.categories.retain(|c| c.id != id);
        self.recompute();
        Ok(())
    }

    pub fn fund_category(&mut self, id: i64, amount: Decimal) -> Result<()> {
        ledger::fund_category(&mut self.categories, id, amount)?;
        let tba = self.to_be_allocated();
        if tba < Decimal::ZERO {
            tracing::warn!(category = id, to_be_allocated = %tba, "categories are over-allocated");
        }
        Ok(())
    }

    pub fn move_between(&mut self, from: i64, to: i64, amount: Decimal) -> Result<()> {
        ledger::move_between(&mut self.categories, from, to, amount)
    }

    // ---- planning items ----

    fn validate_item(&self, item: &PlanningItem, replacing: Option<i64>) -> Result<()> {
        require_name(&item.name)?;
        let cat = self
            .category(item.category_id)
            .ok_or(Error::CategoryNotFound(item.category_id))?;
        if self.account(item.account_id).is_none() {
            return Err(Error::AccountNotFound(item.account_id));
        }
        if item.already_saved < Decimal::ZERO {
            return Err(Error::NegativeAmount(item.already_saved));
        }
        match &item.kind {
            ItemKind::Expense { amount, .. } if *amount < Decimal::ZERO => {
                return Err(Error::NegativeAmount(*amount));
            }
            ItemKind::SavingsGoal {
                target_amount,
                monthly_contribution,
                ..
            } => {
                for v in [*target_amount, *monthly_contribution] {
                    if v < Decimal::ZERO {
                        return Err(Error::NegativeAmount(v));
                    }
                }
            }
            ItemKind::Expense { .. } => {}
        }
        if cat.r#type == CategoryKind::Single {
            let others = self
                .items_in_category(cat.id)
                .filter(|i| Some(i.id) != replacing)
                .count();
            if others > 0 {
                return Err(Error::CategoryFull(cat.name.clone()));
            }
        }
        Ok(())
    }

    pub fn add_item(&mut self, mut item: PlanningItem) -> Result<i64> {
        item.name = item.name.trim().to_string();
        self.validate_item(&item, None)?;
        item.id = next_id(&self.items, |i| i.id);
        let id = item.id;
        self.items.push(item);
        self.recompute();
        Ok(id)
    }

    pub fn update_item(&mut self, item: PlanningItem) -> Result<()> {
        if self.item(item.id).is_none() {
            return Err(Error::ItemNotFound(item.id));
        }
        self.validate_item(&item, Some(item.id))?;
        if let Some(slot) = self.items.iter_mut().find(|i| i.id == item.id) {
            *slot = item;
        }
        self.recompute();
        Ok(())
    }

    pub fn remove_item(&mut self, id: i64) -> Result<PlanningItem> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(Error::ItemNotFound(id))?;
        let item = self.items.remove(pos);
        self.recompute();
        Ok(item)
    }

    fn item_mut(&mut self, id: i64) -> Result<&mut PlanningItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(Error::ItemNotFound(id))
    }

    pub fn set_item_active(&mut self, id: i64, active: bool) -> Result<()> {
        self.item_mut(id)?.is_active = active;
        self.recompute();
        Ok(())
    }

    pub fn set_priority_state(&mut self, id: i64, state: PriorityState) -> Result<()> {
        self.item_mut(id)?.priority_state = state;
        self.recompute();
        Ok(())
    }

    // ---- transactions ----

    pub fn add_transaction(&mut self, mut tx: Transaction) -> Result<i64> {
        ledger::validate_transaction(&tx, &self.accounts, &self.categories)?;
        tx.id = next_id(&self.transactions, |t| t.id);
        ledger::apply_transaction(&tx, &mut self.accounts, &mut self.categories);
        let id = tx.id;
        self.transactions.push(tx);
        Ok(id)
    }

    /// Replace a transaction, undoing its old effect before applying the new one.
    pub fn update_transaction(&mut self, tx: Transaction) -> Result<()> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == tx.id)
            .ok_or(Error::TransactionNotFound(tx.id))?;
        ledger::validate_transaction(&tx, &self.accounts, &self.categories)?;
        let old = std::mem::replace(&mut self.transactions[pos], tx.clone());
        ledger::reverse_transaction(&old, &mut self.accounts, &mut self.categories);
        ledger::apply_transaction(&tx, &mut self.accounts, &mut self.categories);
        Ok(())
    }

    pub fn remove_transaction(&mut self, id: i64) -> Result<Transaction> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::TransactionNotFound(id))?;
        let tx = self.transactions.remove(pos);
        ledger::reverse_transaction(&tx, &mut self.accounts, &mut self.categories);
        Ok(tx)
    }

    // ---- pay & settings ----

    /// Replace the pay schedule; allocations follow the new cadence at once.
    pub fn set_pay_schedule(&mut self, schedule: PaySchedule) -> Result<()> {
        schedule.validate()?;
        if let Some(id) = schedule.secondary_account_id {
            if self.account(id).is_none() {
                return Err(Error::AccountNotFound(id));
            }
        }
        self.pay_schedule = Some(schedule);
        self.recompute();
        Ok(())
    }

    pub fn clear_pay_schedule(&mut self) {
        self.pay_schedule = None;
        self.recompute();
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        self.recompute();
        Ok(())
    }
}
