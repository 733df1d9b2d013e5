use crate::errors::{AppError, AppResult};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Exact, non-negative amount of money with two fractional digits.
///
/// Stored as an integer count of cents (`role.salary_cents`) so that both
/// storage and `SUM()` in SQL stay exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Salary {
    cents: i64,
}

impl Salary {
    pub const ZERO: Salary = Salary { cents: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(self) -> i64 {
        self.cents
    }

    pub fn amount(self) -> Decimal {
        Decimal::new(self.cents, 2)
    }

    /// Parse user input such as `65000`, `65,000.50` or `$72000`.
    pub fn parse(input: &str) -> AppResult<Self> {
        let cleaned: String = input
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();

        if cleaned.is_empty() {
            return Err(AppError::Validation("salary is required".into()));
        }

        let value = Decimal::from_str(&cleaned)
            .map_err(|_| AppError::Validation(format!("'{}' is not a valid salary", input)))?;

        if value.is_sign_negative() && !value.is_zero() {
            return Err(AppError::Validation("salary cannot be negative".into()));
        }

        if value.normalize().scale() > 2 {
            return Err(AppError::Validation(
                "salary allows at most 2 decimal places".into(),
            ));
        }

        let cents = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|v| v.to_i64())
            .ok_or_else(|| AppError::Validation(format!("salary '{}' is too large", input)))?;

        Ok(Self { cents })
    }
}

impl FromStr for Salary {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Salary::parse(s)
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount())
    }
}

impl Serialize for Salary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.amount(), serializer)
    }
}

impl ToSql for Salary {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.cents))
    }
}

impl FromSql for Salary {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Salary::from_cents)
    }
}
