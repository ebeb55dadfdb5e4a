//! Scripted buy/sell orders keyed by tick.
//!
//! Syntax: comma-separated `tick:side` entries, e.g. `3:buy,5:sell,5:sell`.
//! Sides are `buy`/`b` and `sell`/`s`, case-insensitive. Entries for the same
//! tick run in the order they are listed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "b" => Ok(Side::Buy),
            "sell" | "s" => Ok(Side::Sell),
            other => Err(format!("unknown side '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSchedule {
    orders: BTreeMap<u64, Vec<Side>>,
}

impl OrderSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: u64, side: Side) {
        self.orders.entry(tick).or_default().push(side);
    }

    pub fn at(&self, tick: u64) -> &[Side] {
        self.orders.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.orders.keys().next_back().copied()
    }

    pub fn parse(input: &str) -> Result<Self, SimError> {
        let err = |reason: String| SimError::OrderParse {
            input: input.to_string(),
            reason,
        };

        let mut schedule = OrderSchedule::new();
        for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (tick, side) = entry
                .split_once(':')
                .ok_or_else(|| err(format!("expected tick:side, got '{entry}'")))?;
            let tick: u64 = tick
                .trim()
                .parse()
                .map_err(|_| err(format!("invalid tick '{}'", tick.trim())))?;
            if tick == 0 {
                return Err(err("ticks start at 1".to_string()));
            }
            let side: Side = side.parse().map_err(err)?;
            schedule.push(tick, side);
        }
        Ok(schedule)
    }
}
