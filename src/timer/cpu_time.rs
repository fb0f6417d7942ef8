use crate::error::{environment_fault, Result};
use crate::timer::{CycleCounter, Unit};

/// CPU time consumed by the process, in nanoseconds.
///
/// Backed by `clock_gettime(CLOCK_PROCESS_CPUTIME_ID)`. Useful on hosts that do
/// not expose a hardware cycle counter to unprivileged processes, such as most
/// containers and virtual machines.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessCpuTime;

impl ProcessCpuTime {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl CycleCounter for ProcessCpuTime {
    fn cycles_now(&mut self) -> Result<u64> {
        // SAFETY: timespec is plain old data; all-zero is a valid value.
        let mut ts: libc::timespec = unsafe { std::mem::zeroed() };

        // SAFETY: `ts` is a valid, writable timespec.
        let status = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
        if status != 0 {
            return Err(environment_fault(
                "clock_gettime",
                std::io::Error::last_os_error().to_string(),
            ));
        }

        Ok(ts.tv_sec as u64 * 1_000_000_000 + ts.tv_nsec as u64)
    }

    fn unit(&self) -> Unit {
        Unit::NANOSECONDS
    }
}

#[cfg(not(unix))]
impl CycleCounter for ProcessCpuTime {
    fn cycles_now(&mut self) -> Result<u64> {
        Err(environment_fault(
            "clock_gettime",
            "process CPU time is not available on this platform",
        ))
    }

    fn unit(&self) -> Unit {
        Unit::NANOSECONDS
    }
}
