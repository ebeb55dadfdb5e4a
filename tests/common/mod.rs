#![allow(dead_code)]

use std::io::Write;

use ticksim::domain::error::SimError;
use ticksim::domain::portfolio::Portfolio;
use ticksim::domain::price_series::PriceSeries;
use ticksim::domain::random_walk::ScriptedSteps;
use ticksim::domain::session::{IndicatorSettings, Session, TickSnapshot};
use ticksim::ports::report_port::SnapshotSink;

#[derive(Default)]
pub struct CollectingSink {
    pub snapshots: Vec<TickSnapshot>,
    pub finished: bool,
}

impl SnapshotSink for CollectingSink {
    fn publish(&mut self, snapshot: &TickSnapshot) -> Result<(), SimError> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SimError> {
        self.finished = true;
        Ok(())
    }
}

pub fn scripted_series(symbol: &str, price: f64, steps: Vec<f64>) -> PriceSeries {
    PriceSeries::with_source(symbol, price, Box::new(ScriptedSteps::new(steps))).unwrap()
}

pub fn scripted_session(price: f64, balance: f64, steps: Vec<f64>) -> Session {
    Session::new(
        scripted_series("ACME", price, steps),
        Portfolio::new(balance).unwrap(),
        IndicatorSettings::default(),
    )
    .unwrap()
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
