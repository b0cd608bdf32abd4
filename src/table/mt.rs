//! MT19937 generator used to fill substitution tables.
//!
//! Boundaries have to agree across independent implementations, so the table
//! generator is the reference 32-bit Mersenne Twister (`init_genrand` seeding,
//! standard tempering) rather than whatever `rand` happens to ship.

use rand_core::{Error, RngCore, impls};

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// 32-bit Mersenne Twister.
#[derive(Clone)]
pub(crate) struct Mt19937 {
    state: [u32; N],
    index: usize,
}

impl Mt19937 {
    /// Seeds the generator like `init_genrand(seed)`.
    pub(crate) fn new(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { state, index: N }
    }

    /// Draws a uniform integer in `[0, max]`.
    ///
    /// Draws are masked to the smallest all-ones mask covering `max` and
    /// rejected while above it, so an all-ones `max` consumes exactly one
    /// output per call.
    pub(crate) fn next_bounded(&mut self, max: u32) -> u32 {
        let mut used = max;
        used |= used >> 1;
        used |= used >> 2;
        used |= used >> 4;
        used |= used >> 8;
        used |= used >> 16;

        loop {
            let value = self.next_u32() & used;
            if value <= max {
                return value;
            }
        }
    }

    fn reload(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut next = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.index = 0;
    }
}

impl RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.reload();
        }

        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_first_output() {
        // Default seed of the reference implementation.
        let mut rng = Mt19937::new(5489);
        assert_eq!(rng.next_u32(), 3_499_211_612);

        let mut rng = Mt19937::new(1);
        assert_eq!(rng.next_u32(), 1_791_095_845);
    }

    #[test]
    fn test_reference_ten_thousandth_output() {
        let mut rng = Mt19937::new(5489);
        for _ in 0..9999 {
            rng.next_u32();
        }
        assert_eq!(rng.next_u32(), 4_123_659_995);
    }

    #[test]
    fn test_bounded_all_ones_is_masked_draw() {
        let mut plain = Mt19937::new(9);
        let mut bounded = Mt19937::new(9);
        let mask = (1u32 << 29) - 1;

        for _ in 0..1000 {
            assert_eq!(bounded.next_bounded(mask), plain.next_u32() & mask);
        }
    }

    #[test]
    fn test_bounded_range() {
        let mut rng = Mt19937::new(123);
        for _ in 0..1000 {
            assert!(rng.next_bounded(10) <= 10);
        }
        assert_eq!(rng.next_bounded(0), 0);
    }
}
