/// Mapping from Plaid's wire record to the typed `Transaction`.
use super::model::{Status, Transaction};
use crate::plaid::wire::PlaidTransaction;

const UNCATEGORIZED: &str = "Uncategorized";
/// How many levels of Plaid's category hierarchy to keep.
const CATEGORY_DEPTH: usize = 2;

/// Convert one Plaid transaction.
///
/// Plaid reports outflows as positive amounts; the sign is flipped so debits
/// come out negative.
#[must_use]
pub fn from_plaid(raw: PlaidTransaction) -> Transaction {
    let category = raw
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| {
            c.iter()
                .take(CATEGORY_DEPTH)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .or_else(|| raw.personal_finance_category.map(|pfc| pfc.primary))
        .unwrap_or_else(|| UNCATEGORIZED.to_owned());

    // Keep zero unsigned so it never renders as "-$0.00".
    let amount = if raw.amount.is_zero() {
        raw.amount.abs()
    } else {
        -raw.amount
    };

    Transaction {
        transaction_id: raw.transaction_id,
        date: raw.date,
        amount,
        description: raw.name,
        merchant: raw.merchant_name.filter(|m| !m.trim().is_empty()),
        category,
        status: if raw.pending {
            Status::Pending
        } else {
            Status::Posted
        },
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::plaid::wire::PersonalFinanceCategory;

    fn raw(amount: &str) -> PlaidTransaction {
        PlaidTransaction {
            transaction_id: "tx1".to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            amount: Decimal::from_str(amount).unwrap(),
            name: "Starbucks Coffee".to_owned(),
            merchant_name: Some("Starbucks".to_owned()),
            category: Some(vec![
                "Food and Drink".to_owned(),
                "Restaurants".to_owned(),
                "Coffee Shop".to_owned(),
            ]),
            personal_finance_category: None,
            pending: false,
        }
    }

    #[test]
    fn test_outflow_becomes_negative() {
        let txn = from_plaid(raw("45.23"));
        assert_eq!(txn.amount, Decimal::from_str("-45.23").unwrap());
        assert!(txn.is_debit());
    }

    #[test]
    fn test_inflow_becomes_positive() {
        let txn = from_plaid(raw("-500.00"));
        assert_eq!(txn.amount, Decimal::from_str("500.00").unwrap());
        assert!(!txn.is_debit());
    }

    #[test]
    fn test_category_keeps_two_levels() {
        let txn = from_plaid(raw("1"));
        assert_eq!(txn.category, "Food and Drink, Restaurants");
    }

    #[test]
    fn test_category_falls_back_to_personal_finance() {
        let mut r = raw("1");
        r.category = None;
        r.personal_finance_category = Some(PersonalFinanceCategory {
            primary: "FOOD_AND_DRINK".to_owned(),
        });
        assert_eq!(from_plaid(r).category, "FOOD_AND_DRINK");
    }

    #[test]
    fn test_category_uncategorized() {
        let mut r = raw("1");
        r.category = Some(vec![]);
        assert_eq!(from_plaid(r).category, "Uncategorized");
    }

    #[test]
    fn test_pending_and_blank_merchant() {
        let mut r = raw("1");
        r.pending = true;
        r.merchant_name = Some(String::new());
        let txn = from_plaid(r);
        assert_eq!(txn.status, Status::Pending);
        assert!(txn.merchant.is_none());
    }
}
