// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurrence keywords and how many times a year each one happens.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};

/// How often the user gets paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayFrequency {
    Weekly,
    BiWeekly,
    SemiMonthly,
    Monthly,
}

impl PayFrequency {
    pub fn paychecks_per_year(self) -> Decimal {
        match self {
            Self::Weekly => dec!(52),
            Self::BiWeekly => dec!(26),
            Self::SemiMonthly => dec!(24),
            Self::Monthly => dec!(12),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::SemiMonthly => "semi-monthly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for PayFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "bi-weekly" | "biweekly" => Ok(Self::BiWeekly),
            "semi-monthly" | "semimonthly" => Ok(Self::SemiMonthly),
            "monthly" => Ok(Self::Monthly),
            other => Err(Error::UnknownFrequency(other.to_string())),
        }
    }
}

impl fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How often a planning item comes due.
///
/// Keys that are not recognised survive deserialization as
/// [`Frequency::Unrecognized`] so that stored data always loads; they only
/// fail once somebody asks for their annual count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Once,
    Weekly,
    BiWeekly,
    Every3Weeks,
    Monthly,
    Every6Weeks,
    Every7Weeks,
    Every8Weeks,
    Quarterly,
    SemiAnnually,
    Annually,
    PerPaycheck,
    Unrecognized(String),
}

impl Frequency {
    pub const ALL: [Frequency; 12] = [
        Frequency::Once,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Every3Weeks,
        Frequency::Monthly,
        Frequency::Every6Weeks,
        Frequency::Every7Weeks,
        Frequency::Every8Weeks,
        Frequency::Quarterly,
        Frequency::SemiAnnually,
        Frequency::Annually,
        Frequency::PerPaycheck,
    ];

    pub fn key(&self) -> &str {
        match self {
            Self::Once => "once",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Every3Weeks => "every-3-weeks",
            Self::Monthly => "monthly",
            Self::Every6Weeks => "every-6-weeks",
            Self::Every7Weeks => "every-7-weeks",
            Self::Every8Weeks => "every-8-weeks",
            Self::Quarterly => "quarterly",
            Self::SemiAnnually => "semi-annually",
            Self::Annually => "annually",
            Self::PerPaycheck => "per-paycheck",
            Self::Unrecognized(k) => k,
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        let f = match key {
            "once" => Self::Once,
            "weekly" => Self::Weekly,
            "bi-weekly" | "biweekly" => Self::BiWeekly,
            "every-3-weeks" => Self::Every3Weeks,
            "monthly" => Self::Monthly,
            "every-6-weeks" => Self::Every6Weeks,
            "every-7-weeks" => Self::Every7Weeks,
            "every-8-weeks" => Self::Every8Weeks,
            "quarterly" => Self::Quarterly,
            "semi-annually" => Self::SemiAnnually,
            "annually" | "yearly" => Self::Annually,
            "per-paycheck" => Self::PerPaycheck,
            _ => return None,
        };
        Some(f)
    }

    /// Occurrences per year. `PerPaycheck` follows the pay cadence.
    pub fn occurrences_per_year(&self, pay: PayFrequency) -> Result<Decimal> {
        let n = match self {
            Self::Once => dec!(1),
            Self::Weekly => dec!(52),
            Self::BiWeekly => dec!(26),
            Self::Every3Weeks => dec!(17.33),
            Self::Monthly => dec!(12),
            Self::Every6Weeks => dec!(8.67),
            Self::Every7Weeks => dec!(7.43),
            Self::Every8Weeks => dec!(6.5),
            Self::Quarterly => dec!(4),
            Self::SemiAnnually => dec!(2),
            Self::Annually => dec!(1),
            Self::PerPaycheck => pay.paychecks_per_year(),
            Self::Unrecognized(k) => return Err(Error::UnknownFrequency(k.clone())),
        };
        Ok(n)
    }

    /// Like [`Frequency::occurrences_per_year`], but an unknown key is read
    /// as "the amount is already per paycheck".
    pub fn occurrences_or_per_paycheck(&self, pay: PayFrequency) -> Decimal {
        self.occurrences_per_year(pay).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to per-paycheck cadence");
            pay.paychecks_per_year()
        })
    }
}

impl From<String> for Frequency {
    fn from(s: String) -> Self {
        let key = s.trim().to_lowercase();
        Self::from_key(&key).unwrap_or(Self::Unrecognized(s))
    }
}

impl From<Frequency> for String {
    fn from(f: Frequency) -> Self {
        f.key().to_string()
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(&s.trim().to_lowercase())
            .ok_or_else(|| Error::UnknownFrequency(s.trim().to_string()))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_key_occurs_at_least_once_a_year() {
        for f in Frequency::ALL.iter() {
            for pay in [
                PayFrequency::Weekly,
                PayFrequency::BiWeekly,
                PayFrequency::SemiMonthly,
                PayFrequency::Monthly,
            ] {
                assert!(f.occurrences_per_year(pay).unwrap() > Decimal::ZERO, "{}", f);
            }
        }
    }

    #[test]
    fn unknown_key_loads_but_errors_on_lookup() {
        let f: Frequency = serde_json::from_str("\"fortnightly-ish\"").unwrap();
        assert_eq!(f, Frequency::Unrecognized("fortnightly-ish".into()));
        assert!(f.occurrences_per_year(PayFrequency::BiWeekly).is_err());
        assert_eq!(f.occurrences_or_per_paycheck(PayFrequency::Weekly), dec!(52));
        assert!("fortnightly-ish".parse::<Frequency>().is_err());
    }

    #[test]
    fn keys_round_trip_through_json() {
        let json = serde_json::to_string(&Frequency::Every3Weeks).unwrap();
        assert_eq!(json, "\"every-3-weeks\"");
        let pay: PayFrequency = serde_json::from_str("\"semi-monthly\"").unwrap();
        assert_eq!(pay, PayFrequency::SemiMonthly);
    }
}
