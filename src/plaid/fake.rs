/// In-memory `PlaidApi` used by unit tests.
use std::cell::RefCell;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::api::PlaidApi;
use super::client::DEFAULT_INSTITUTION_ID;
use super::errors::PlaidError;
use super::wire::{
    Institution, InstitutionsGetByIdResponse, Item, ItemGetResponse,
    ItemPublicTokenExchangeResponse, PlaidTransaction, SandboxPublicTokenCreateResponse,
    TransactionsGetOptions, TransactionsGetResponse,
};

/// In-memory `PlaidApi` that serves canned pages and records offsets.
#[derive(Default)]
pub struct FakeApi {
    transactions: Vec<PlaidTransaction>,
    page_size: usize,
    reject_with: Option<&'static str>,
    pub offsets: RefCell<Vec<u32>>,
    pub exchanged: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn with_amounts(amounts: &[&str], page_size: usize) -> Self {
        let transactions = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| PlaidTransaction {
                transaction_id: format!("tx{i}"),
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                amount: Decimal::from_str(amount).unwrap(),
                name: format!("Transaction {i}"),
                merchant_name: None,
                category: None,
                personal_finance_category: None,
                pending: false,
            })
            .collect();
        Self {
            transactions,
            page_size,
            ..Self::default()
        }
    }

    pub fn rejecting(code: &'static str) -> Self {
        Self {
            reject_with: Some(code),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), PlaidError> {
        match self.reject_with {
            Some(code) => Err(PlaidError::Api {
                error_type: "INVALID_INPUT".to_owned(),
                error_code: code.to_owned(),
                error_message: "rejected by fake".to_owned(),
                display_message: None,
                request_id: None,
            }),
            None => Ok(()),
        }
    }
}

impl PlaidApi for FakeApi {
    fn sandbox_public_token_create(
        &self,
        institution_id: &str,
        initial_products: &[&str],
    ) -> Result<SandboxPublicTokenCreateResponse, PlaidError> {
        self.check()?;
        assert_eq!(initial_products, ["transactions"]);
        Ok(SandboxPublicTokenCreateResponse {
            public_token: format!("public-sandbox-{institution_id}"),
        })
    }

    fn item_public_token_exchange(
        &self,
        public_token: &str,
    ) -> Result<ItemPublicTokenExchangeResponse, PlaidError> {
        self.check()?;
        self.exchanged.borrow_mut().push(public_token.to_owned());
        Ok(ItemPublicTokenExchangeResponse {
            access_token: "access-sandbox-abc".to_owned(),
            item_id: "item-1".to_owned(),
        })
    }

    fn transactions_get(
        &self,
        _access_token: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
        options: TransactionsGetOptions,
    ) -> Result<TransactionsGetResponse, PlaidError> {
        self.check()?;
        self.offsets.borrow_mut().push(options.offset);
        let start = options.offset as usize;
        let page: Vec<PlaidTransaction> = self
            .transactions
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();
        Ok(TransactionsGetResponse {
            transactions: page,
            total_transactions: u32::try_from(self.transactions.len()).unwrap(),
        })
    }

    fn item_get(&self, _access_token: &str) -> Result<ItemGetResponse, PlaidError> {
        self.check()?;
        Ok(ItemGetResponse {
            item: Item {
                item_id: "item-1".to_owned(),
                institution_id: Some(DEFAULT_INSTITUTION_ID.to_owned()),
                available_products: vec!["balance".to_owned()],
                billed_products: vec!["transactions".to_owned()],
            },
        })
    }

    fn institutions_get_by_id(
        &self,
        institution_id: &str,
        _country_codes: &[&str],
    ) -> Result<InstitutionsGetByIdResponse, PlaidError> {
        self.check()?;
        Ok(InstitutionsGetByIdResponse {
            institution: Institution {
                institution_id: institution_id.to_owned(),
                name: "First Platypus Bank".to_owned(),
                products: vec!["transactions".to_owned()],
            },
        })
    }
}
