//! Simulation session: one price series, one portfolio, one indicator set.
//!
//! A `Session` is an ordinary caller-owned value. Nothing in here starts a
//! timer; whoever drives the session calls `tick()` and reads the returned
//! snapshot. Snapshots own their data, so they stay valid while the session
//! keeps growing or rotating its history.

use tracing::{debug, info, warn};

use crate::domain::error::SimError;
use crate::domain::indicator::{
    IndicatorEngine, IndicatorType, RsiSmoothing, ensure_window, pad_left,
};
use crate::domain::orders::Side;
use crate::domain::portfolio::Portfolio;
use crate::domain::price_series::{PriceSeries, Trend};
use crate::domain::random_walk::{DEFAULT_MAX_STEP, StepDistribution, build_step_source};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorSettings {
    pub sma_window: usize,
    pub rsi_period: usize,
    pub rsi_smoothing: RsiSmoothing,
    pub volatility_window: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        IndicatorSettings {
            sma_window: 10,
            rsi_period: 14,
            rsi_smoothing: RsiSmoothing::Wilder,
            volatility_window: 20,
        }
    }
}

impl IndicatorSettings {
    pub fn validate(&self) -> Result<(), SimError> {
        ensure_window("sma_window", self.sma_window)?;
        ensure_window("rsi_period", self.rsi_period)?;
        ensure_window("volatility_window", self.volatility_window)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub symbol: String,
    pub initial_price: f64,
    pub max_step: f64,
    pub distribution: StepDistribution,
    pub seed: Option<u64>,
    pub history_limit: Option<usize>,
    pub ticks: u64,
    pub interval_ms: u64,
    pub initial_balance: f64,
    pub indicators: IndicatorSettings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            symbol: "PETR4".to_string(),
            initial_price: 30.0,
            max_step: DEFAULT_MAX_STEP,
            distribution: StepDistribution::Uniform,
            seed: None,
            history_limit: None,
            ticks: 60,
            interval_ms: 0,
            initial_balance: 10_000.0,
            indicators: IndicatorSettings::default(),
        }
    }
}

/// Everything a presentation layer needs for one tick, fully owned.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSnapshot {
    pub tick: u64,
    pub symbol: String,
    pub price: f64,
    pub trend: Trend,
    pub history: Vec<f64>,
    pub sma_type: IndicatorType,
    pub sma: Vec<Option<f64>>,
    pub rsi_type: IndicatorType,
    pub rsi: Vec<Option<f64>>,
    pub volatility_type: IndicatorType,
    pub volatility: f64,
    pub balance: f64,
    pub shares: u64,
    pub total_value: f64,
    pub profit_loss: f64,
}

impl TickSnapshot {
    pub fn latest_sma(&self) -> Option<f64> {
        self.sma.last().copied().flatten()
    }

    pub fn latest_rsi(&self) -> Option<f64> {
        self.rsi.last().copied().flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    Filled,
    InsufficientFunds,
    InsufficientShares,
}

impl TradeOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, TradeOutcome::Filled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeRecord {
    pub tick: u64,
    pub side: Side,
    pub price: f64,
}

#[derive(Debug)]
pub struct Session {
    series: PriceSeries,
    portfolio: Portfolio,
    indicators: IndicatorSettings,
    tick: u64,
    trades: Vec<TradeRecord>,
}

impl Session {
    pub fn new(
        series: PriceSeries,
        portfolio: Portfolio,
        indicators: IndicatorSettings,
    ) -> Result<Self, SimError> {
        indicators.validate()?;
        Ok(Session {
            series,
            portfolio,
            indicators,
            tick: 0,
            trades: Vec::new(),
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimError> {
        let source = build_step_source(config.distribution, config.max_step, config.seed)?;
        let mut series = PriceSeries::with_source(&config.symbol, config.initial_price, source)?;
        series.set_history_limit(config.history_limit)?;
        let portfolio = Portfolio::new(config.initial_balance)?;
        debug!(
            symbol = %config.symbol,
            initial_price = config.initial_price,
            distribution = %config.distribution,
            seed = ?config.seed,
            "session created"
        );
        Session::new(series, portfolio, config.indicators)
    }

    /// Advance the price once and return the refreshed snapshot.
    pub fn tick(&mut self) -> Result<TickSnapshot, SimError> {
        self.series.advance();
        self.tick += 1;
        debug!(tick = self.tick, price = self.series.price(), "tick");
        self.snapshot()
    }

    pub fn snapshot(&self) -> Result<TickSnapshot, SimError> {
        let history = self.series.history();
        let settings = &self.indicators;

        let sma = IndicatorEngine::sma(&history, settings.sma_window)?;
        let rsi =
            IndicatorEngine::rsi_with(&history, settings.rsi_period, settings.rsi_smoothing)?;
        let volatility = IndicatorEngine::volatility(&history, settings.volatility_window)?;

        let price = self.series.price();
        Ok(TickSnapshot {
            tick: self.tick,
            symbol: self.series.symbol().to_string(),
            price,
            trend: self.series.trend(),
            sma_type: IndicatorType::Sma(settings.sma_window),
            sma: pad_left(&sma, history.len()),
            rsi_type: IndicatorType::Rsi(settings.rsi_period),
            rsi: pad_left(&rsi, history.len()),
            volatility_type: IndicatorType::Volatility(settings.volatility_window),
            volatility,
            balance: self.portfolio.balance(),
            shares: self.portfolio.shares(),
            total_value: self.portfolio.total_value(price),
            profit_loss: self.portfolio.profit_loss(price),
            history,
        })
    }

    pub fn buy(&mut self) -> Result<TradeOutcome, SimError> {
        self.trade(Side::Buy)
    }

    pub fn sell(&mut self) -> Result<TradeOutcome, SimError> {
        self.trade(Side::Sell)
    }

    pub fn trade(&mut self, side: Side) -> Result<TradeOutcome, SimError> {
        let price = self.series.price();
        let filled = match side {
            Side::Buy => self.portfolio.buy(price)?,
            Side::Sell => self.portfolio.sell(price)?,
        };

        if filled {
            self.trades.push(TradeRecord {
                tick: self.tick,
                side,
                price,
            });
            info!(
                tick = self.tick,
                %side,
                price,
                cash = self.portfolio.balance(),
                shares = self.portfolio.shares(),
                "order filled"
            );
            return Ok(TradeOutcome::Filled);
        }

        let outcome = match side {
            Side::Buy => TradeOutcome::InsufficientFunds,
            Side::Sell => TradeOutcome::InsufficientShares,
        };
        warn!(tick = self.tick, %side, price, ?outcome, "order rejected");
        Ok(outcome)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn indicators(&self) -> &IndicatorSettings {
        &self.indicators
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }
}
