//! ticksim — simulated single-asset trading sandbox.
//!
//! Random-walk price series, streaming indicators and a cash/shares ledger.
//! Domain logic lives in [`domain`], port traits in [`ports`], concrete
//! implementations in [`adapters`], and the command line in [`cli`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
