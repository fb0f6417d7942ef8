use crate::error::Result;
use crate::timer::CycleCounter;

/// CPU cycles consumed by the calling thread, as reported by the OS.
///
/// - **Linux**: a `perf_event_open(2)` hardware cycle counter on the calling
///   thread, user space only, so it also works under the default
///   `perf_event_paranoid` level. The harness runs on one thread.
/// - **macOS**: the `ri_cycles` field of `proc_pid_rusage(RUSAGE_INFO_V4)`,
///   which covers the whole process.
///
/// Other platforms fail at [`ProcessCycles::open`].
#[derive(Debug)]
pub struct ProcessCycles {
    inner: imp::Counter,
}

impl ProcessCycles {
    pub fn open() -> Result<Self> {
        let inner = imp::Counter::open()?;
        tracing::debug!(source = imp::SOURCE, "opened process cycle counter");
        Ok(Self { inner })
    }
}

impl CycleCounter for ProcessCycles {
    #[inline]
    fn cycles_now(&mut self) -> Result<u64> {
        self.inner.read()
    }
}

#[cfg(target_os = "linux")]
mod imp {
    use std::fs::File;
    use std::io::Read;
    use std::os::fd::{FromRawFd, OwnedFd};

    use crate::error::{environment_fault, Result};

    pub(super) const SOURCE: &str = "perf_event_open";

    const PERF_TYPE_HARDWARE: u32 = 0;
    const PERF_COUNT_HW_CPU_CYCLES: u64 = 0;
    const PERF_ATTR_SIZE_VER0: u32 = 64;
    const PERF_FLAG_FD_CLOEXEC: libc::c_ulong = 1 << 3;

    // Bit positions in the `flags` bitfield of `struct perf_event_attr`
    const EXCLUDE_KERNEL: u64 = 1 << 5;
    const EXCLUDE_HV: u64 = 1 << 6;

    /// The first revision (`PERF_ATTR_SIZE_VER0`) of `struct perf_event_attr`.
    /// Later kernels accept it and zero-fill the rest.
    #[repr(C)]
    #[derive(Default)]
    #[allow(dead_code)]
    struct PerfEventAttr {
        type_: u32,
        size: u32,
        config: u64,
        sample_period: u64,
        sample_type: u64,
        read_format: u64,
        flags: u64,
        wakeup_events: u32,
        bp_type: u32,
        config1: u64,
    }

    #[derive(Debug)]
    pub(super) struct Counter {
        file: File,
    }

    impl Counter {
        pub(super) fn open() -> Result<Self> {
            let attr = PerfEventAttr {
                type_: PERF_TYPE_HARDWARE,
                size: PERF_ATTR_SIZE_VER0,
                config: PERF_COUNT_HW_CPU_CYCLES,
                flags: EXCLUDE_KERNEL | EXCLUDE_HV,
                ..Default::default()
            };

            // pid = 0, cpu = -1: the calling thread on whichever CPU it runs.
            // SAFETY: `attr` outlives the call and its size field matches its layout.
            let fd = unsafe {
                libc::syscall(
                    libc::SYS_perf_event_open,
                    &attr as *const PerfEventAttr,
                    0 as libc::pid_t,
                    -1 as libc::c_int,
                    -1 as libc::c_int,
                    PERF_FLAG_FD_CLOEXEC,
                )
            };

            if fd < 0 {
                return Err(environment_fault(
                    SOURCE,
                    std::io::Error::last_os_error().to_string(),
                ));
            }

            // SAFETY: the kernel just handed us this descriptor and nothing else owns it.
            let owned = unsafe { OwnedFd::from_raw_fd(fd as libc::c_int) };

            Ok(Self {
                file: File::from(owned),
            })
        }

        #[inline]
        pub(super) fn read(&mut self) -> Result<u64> {
            let mut buf = [0u8; 8];
            self.file
                .read_exact(&mut buf)
                .map_err(|e| environment_fault(SOURCE, e.to_string()))?;
            Ok(u64::from_ne_bytes(buf))
        }
    }
}

#[cfg(target_os = "macos")]
mod imp {
    use crate::error::{environment_fault, Result};

    pub(super) const SOURCE: &str = "proc_pid_rusage";

    #[derive(Debug)]
    pub(super) struct Counter {
        pid: libc::pid_t,
    }

    impl Counter {
        pub(super) fn open() -> Result<Self> {
            // SAFETY: getpid has no preconditions.
            let pid = unsafe { libc::getpid() };
            let mut counter = Self { pid };
            counter.read()?;
            Ok(counter)
        }

        #[inline]
        pub(super) fn read(&mut self) -> Result<u64> {
            // SAFETY: rusage_info_v4 is plain old data; all-zero is a valid value.
            let mut info: libc::rusage_info_v4 = unsafe { std::mem::zeroed() };

            // SAFETY: `info` is large enough for the V4 flavor requested.
            let status = unsafe {
                libc::proc_pid_rusage(
                    self.pid,
                    libc::RUSAGE_INFO_V4,
                    (&mut info as *mut libc::rusage_info_v4).cast::<libc::rusage_info_t>(),
                )
            };

            if status != 0 {
                return Err(environment_fault(
                    SOURCE,
                    std::io::Error::last_os_error().to_string(),
                ));
            }

            Ok(info.ri_cycles)
        }
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod imp {
    use crate::error::{environment_fault, Result};

    pub(super) const SOURCE: &str = "unsupported";

    #[derive(Debug)]
    pub(super) struct Counter;

    impl Counter {
        pub(super) fn open() -> Result<Self> {
            Err(environment_fault(
                SOURCE,
                "no process cycle counter on this platform, use SUMBENCH_COUNTER=cpu-time",
            ))
        }

        pub(super) fn read(&mut self) -> Result<u64> {
            Err(environment_fault(SOURCE, "no process cycle counter on this platform"))
        }
    }
}
