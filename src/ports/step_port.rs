//! Random step source port.

/// Supplies the relative step `r` used by `PriceSeries::advance`, where the
/// next price is `last * (1 + r)`.
pub trait StepSource: Send {
    fn next_step(&mut self) -> f64;
}

impl<S: StepSource + ?Sized> StepSource for Box<S> {
    fn next_step(&mut self) -> f64 {
        (**self).next_step()
    }
}
