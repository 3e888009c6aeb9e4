use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::period::Period;

/// Aggregated debit/credit totals for one account over one period.
///
/// Balance rows are derived from the entry stream and regenerated, never
/// hand-edited. The opening side chains from the previous period's cumulative
/// within the same exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    pub exercise_year: i32,
    pub account_code: String,
    pub period: Period,
    pub opening_debit: Decimal,
    pub opening_credit: Decimal,
    pub movement_debit: Decimal,
    pub movement_credit: Decimal,
    pub cumulative_debit: Decimal,
    pub cumulative_credit: Decimal,
    pub debtor_net: Decimal,
    pub creditor_net: Decimal,
}

impl Balance {
    /// Builds a row from its opening and movement sides, deriving the
    /// cumulative totals and the debtor/creditor net.
    pub fn from_parts(
        exercise_year: i32,
        account_code: impl Into<String>,
        period: Period,
        opening_debit: Decimal,
        opening_credit: Decimal,
        movement_debit: Decimal,
        movement_credit: Decimal,
    ) -> Self {
        let cumulative_debit = opening_debit + movement_debit;
        let cumulative_credit = opening_credit + movement_credit;
        let (debtor_net, creditor_net) = if cumulative_debit >= cumulative_credit {
            (cumulative_debit - cumulative_credit, Decimal::ZERO)
        } else {
            (Decimal::ZERO, cumulative_credit - cumulative_debit)
        };
        Self {
            exercise_year,
            account_code: account_code.into(),
            period,
            opening_debit,
            opening_credit,
            movement_debit,
            movement_credit,
            cumulative_debit,
            cumulative_credit,
            debtor_net,
            creditor_net,
        }
    }
}

/// Per-account line of a trial balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrialBalanceLine {
    pub account_code: String,
    pub account_name: String,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
}

/// Trial balance over a whole exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrialBalance {
    pub exercise_year: i32,
    pub lines: Vec<TrialBalanceLine>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub is_balanced: bool,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn from_parts_assigns_net_side() {
        let period: Period = "2024-03".parse().unwrap();
        let debtor = Balance::from_parts(
            2024,
            "601000",
            period,
            dec!(100),
            dec!(0),
            dec!(50),
            dec!(20),
        );
        assert_eq!(debtor.cumulative_debit, dec!(150));
        assert_eq!(debtor.cumulative_credit, dec!(20));
        assert_eq!(debtor.debtor_net, dec!(130));
        assert_eq!(debtor.creditor_net, dec!(0));

        let creditor = Balance::from_parts(
            2024,
            "701000",
            period,
            dec!(0),
            dec!(100),
            dec!(10),
            dec!(40),
        );
        assert_eq!(creditor.debtor_net, dec!(0));
        assert_eq!(creditor.creditor_net, dec!(130));
    }
}
