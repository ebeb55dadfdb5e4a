//! Tick loop: wait, advance, apply scheduled orders, publish.

use tracing::info;

use crate::domain::error::SimError;
use crate::domain::orders::OrderSchedule;
use crate::domain::session::{Session, TickSnapshot};
use crate::ports::clock_port::TickClock;
use crate::ports::report_port::SnapshotSink;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub fills: usize,
    pub rejections: usize,
    pub last: TickSnapshot,
}

pub fn run_simulation(
    session: &mut Session,
    clock: &mut dyn TickClock,
    sink: &mut dyn SnapshotSink,
    ticks: u64,
    schedule: &OrderSchedule,
) -> Result<RunSummary, SimError> {
    let mut fills = 0;
    let mut rejections = 0;
    let mut last = session.snapshot()?;

    for _ in 0..ticks {
        clock.wait();
        session.tick()?;

        for &side in schedule.at(session.tick_count()) {
            if session.trade(side)?.is_filled() {
                fills += 1;
            } else {
                rejections += 1;
            }
        }

        last = session.snapshot()?;
        sink.publish(&last)?;
    }
    sink.finish()?;

    info!(
        ticks,
        fills,
        rejections,
        price = last.price,
        total_value = last.total_value,
        "simulation finished"
    );

    Ok(RunSummary {
        ticks,
        fills,
        rejections,
        last,
    })
}
