//! Cycle counters.
//!
//! The runner samples a [`CycleCounter`] immediately before and after its
//! repetition loop. Hosts plug in their own counter source by implementing the
//! trait; tests substitute scripted counters the same way.

mod cpu_time;
mod hardware;

pub use cpu_time::ProcessCpuTime;
pub use hardware::ProcessCycles;

use crate::error::Result;

/// What one tick of a counter measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub singular: &'static str,
    pub plural: &'static str,
    /// Label for a million ticks.
    pub mega: &'static str,
}

impl Unit {
    pub const CYCLES: Unit = Unit {
        singular: "cycle",
        plural: "cycles",
        mega: "Mcycles",
    };

    pub const NANOSECONDS: Unit = Unit {
        singular: "ns",
        plural: "ns",
        mega: "ms",
    };
}

/// A monotonically non-decreasing counter over the benchmark thread or process.
pub trait CycleCounter {
    /// Current counter value since some fixed epoch.
    ///
    /// An error means the host facility failed; callers treat it as fatal
    /// and never retry.
    fn cycles_now(&mut self) -> Result<u64>;

    fn unit(&self) -> Unit {
        Unit::CYCLES
    }
}

impl<C: CycleCounter + ?Sized> CycleCounter for Box<C> {
    fn cycles_now(&mut self) -> Result<u64> {
        (**self).cycles_now()
    }

    fn unit(&self) -> Unit {
        (**self).unit()
    }
}

impl<C: CycleCounter + ?Sized> CycleCounter for &mut C {
    fn cycles_now(&mut self) -> Result<u64> {
        (**self).cycles_now()
    }

    fn unit(&self) -> Unit {
        (**self).unit()
    }
}
