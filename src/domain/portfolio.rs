//! Single-asset cash/shares ledger.
//!
//! Each `buy` or `sell` moves exactly one unit at the caller's price, or
//! leaves the ledger untouched. Running out of cash or shares is reported as
//! `false`, never as an error. `cash >= 0` holds after every call.

use crate::domain::error::{SimError, ensure_positive_price};

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    cash: f64,
    initial_balance: f64,
    shares: u64,
}

impl Portfolio {
    pub fn new(initial_balance: f64) -> Result<Self, SimError> {
        if !initial_balance.is_finite() || initial_balance < 0.0 {
            return Err(SimError::invalid_input(
                "initial_balance",
                format!("must be a non-negative finite number, got {initial_balance}"),
            ));
        }
        Ok(Portfolio {
            cash: initial_balance,
            initial_balance,
            shares: 0,
        })
    }

    pub fn buy(&mut self, current_price: f64) -> Result<bool, SimError> {
        ensure_positive_price("price", current_price)?;
        if self.cash < current_price {
            return Ok(false);
        }
        self.cash -= current_price;
        self.shares += 1;
        Ok(true)
    }

    pub fn sell(&mut self, current_price: f64) -> Result<bool, SimError> {
        ensure_positive_price("price", current_price)?;
        if self.shares == 0 {
            return Ok(false);
        }
        self.cash += current_price;
        self.shares -= 1;
        Ok(true)
    }

    pub fn balance(&self) -> f64 {
        self.cash
    }

    pub fn shares(&self) -> u64 {
        self.shares
    }

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }

    pub fn total_value(&self, current_price: f64) -> f64 {
        self.cash + self.shares as f64 * current_price
    }

    pub fn profit_loss(&self, current_price: f64) -> f64 {
        self.total_value(current_price) - self.initial_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_portfolio() {
        let portfolio = Portfolio::new(10_000.0).unwrap();
        assert_relative_eq!(portfolio.balance(), 10_000.0);
        assert_relative_eq!(portfolio.initial_balance(), 10_000.0);
        assert_eq!(portfolio.shares(), 0);
    }

    #[test]
    fn zero_balance_allowed() {
        assert!(Portfolio::new(0.0).is_ok());
    }

    #[test]
    fn negative_balance_rejected() {
        for bad in [-0.01, f64::NAN, f64::NEG_INFINITY] {
            let err = Portfolio::new(bad).unwrap_err();
            assert!(matches!(err, SimError::InvalidInput { ref field, .. } if field == "initial_balance"));
        }
    }

    #[test]
    fn buy_debits_cash_and_adds_share() {
        let mut portfolio = Portfolio::new(100.0).unwrap();
        assert!(portfolio.buy(50.0).unwrap());
        assert_eq!(portfolio.balance(), 50.0);
        assert_eq!(portfolio.shares(), 1);
    }

    #[test]
    fn buy_with_insufficient_funds_is_noop() {
        let mut portfolio = Portfolio::new(100.0).unwrap();
        assert!(portfolio.buy(50.0).unwrap());
        let before = portfolio.clone();
        assert!(!portfolio.buy(60.0).unwrap());
        assert_eq!(portfolio, before);
    }

    #[test]
    fn buy_exact_balance_succeeds() {
        let mut portfolio = Portfolio::new(30.0).unwrap();
        assert!(portfolio.buy(30.0).unwrap());
        assert_eq!(portfolio.balance(), 0.0);
    }

    #[test]
    fn sell_without_shares_is_noop() {
        let mut portfolio = Portfolio::new(0.0).unwrap();
        assert!(!portfolio.sell(10.0).unwrap());
        assert_eq!(portfolio.balance(), 0.0);
        assert_eq!(portfolio.shares(), 0);
    }

    #[test]
    fn sell_credits_cash() {
        let mut portfolio = Portfolio::new(100.0).unwrap();
        portfolio.buy(40.0).unwrap();
        assert!(portfolio.sell(45.0).unwrap());
        assert_relative_eq!(portfolio.balance(), 105.0);
        assert_eq!(portfolio.shares(), 0);
    }

    #[test]
    fn invalid_prices_rejected_without_mutation() {
        let mut portfolio = Portfolio::new(100.0).unwrap();
        portfolio.buy(10.0).unwrap();
        let before = portfolio.clone();
        for bad in [0.0, -1.0, f64::NAN] {
            assert!(portfolio.buy(bad).is_err());
            assert!(portfolio.sell(bad).is_err());
        }
        assert_eq!(portfolio, before);
    }

    #[test]
    fn buy_then_sell_round_trip() {
        let mut portfolio = Portfolio::new(1_000.0).unwrap();
        let before = portfolio.clone();
        assert!(portfolio.buy(33.33).unwrap());
        assert!(portfolio.sell(33.33).unwrap());
        assert_relative_eq!(portfolio.balance(), before.balance(), epsilon = 1e-9);
        assert_eq!(portfolio.shares(), before.shares());
    }

    #[test]
    fn total_value_and_profit_loss() {
        let mut portfolio = Portfolio::new(100.0).unwrap();
        portfolio.buy(20.0).unwrap();
        portfolio.buy(20.0).unwrap();
        assert_relative_eq!(portfolio.total_value(25.0), 110.0);
        assert_relative_eq!(portfolio.profit_loss(25.0), 10.0);
        assert_relative_eq!(portfolio.profit_loss(15.0), -10.0);
    }
}
