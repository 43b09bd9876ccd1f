//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect;
mod pack;
mod tail_logs;

pub use inspect::Inspect;
pub use pack::Pack;
pub use tail_logs::TailLogs;

use adventure_content::ByteOrder;

/// Byte order as a command-line value.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OrderArg {
    Big,
    Little,
}

impl From<OrderArg> for ByteOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Big => ByteOrder::Big,
            OrderArg::Little => ByteOrder::Little,
        }
    }
}
