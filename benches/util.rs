// Timing support for the benchmarks.
//
// ticks() reads a free-running counter: the time-stamp counter on x86
// and x86_64 (fenced so that earlier loads complete before the read),
// the virtual counter on aarch64 (readable from user space, unlike the
// PMU cycle counter), and a monotonic clock in nanoseconds elsewhere.
// Only differences between two readings are meaningful.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub const TICK_UNIT: &str = "cycles";

#[cfg(target_arch = "aarch64")]
pub const TICK_UNIT: &str = "ticks";

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64",
    target_arch = "aarch64")))]
pub const TICK_UNIT: &str = "ns";

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[inline(always)]
pub fn ticks() -> u64 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::{_mm_lfence, _rdtsc};
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::{_mm_lfence, _rdtsc};

    unsafe {
        _mm_lfence();
        let t = _rdtsc();
        _mm_lfence();
        t
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub fn ticks() -> u64 {
    use core::arch::asm;
    let t: u64;
    unsafe {
        asm!("isb", "mrs {}, cntvct_el0", out(reg) t, options(nostack));
    }
    t
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64",
    target_arch = "aarch64")))]
pub fn ticks() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_nanos() as u64
}

// Runs f() `inner` times per sample, over `samples` samples, and returns
// the average cost of one call in ticks. The slowest and fastest 10% of
// the samples are discarded (interrupts, frequency changes).
pub fn measure<F: FnMut()>(samples: usize, inner: usize, mut f: F) -> f64 {
    let mut tt = vec![0u64; samples];
    for t in tt.iter_mut() {
        let begin = ticks();
        for _ in 0..inner {
            f();
        }
        *t = ticks().wrapping_sub(begin);
    }
    tt.sort_unstable();
    let cut = samples / 10;
    let kept = &tt[cut..(samples - cut)];
    let sum: u64 = kept.iter().sum();
    (sum as f64) / (kept.len() as f64) / (inner as f64)
}
