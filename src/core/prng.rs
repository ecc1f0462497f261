// Minimal PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It only drives random wiring for benchmarks and property tests, where the
// same seed must always produce the same network.

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: seed }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform in `[low, high)`; returns `low` for an empty range.
    #[inline]
    pub fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low) as u64;
        low + (self.next_u64() % span) as usize
    }

    /// Uniform in `[low, high]` (inclusive).
    #[inline]
    pub fn gen_range_i8(&mut self, low: i8, high: i8) -> i8 {
        if high <= low {
            return low;
        }
        let span = (high as i16 - low as i16 + 1) as u32;
        (low as i16 + (self.next_u32() % span) as i16) as i8
    }
}
