/// Seeded 32-bit PRNG (mulberry32).
///
/// Two generators built from the same seed produce identical sequences; every generator-level
/// determinism guarantee in this crate rests on that.
#[derive(Clone, Debug)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a generator. Negative seeds wrap to their two's-complement `u32` value.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create a generator from a signed seed, wrapping like a `>>> 0` coercion.
    pub fn from_i64(seed: i64) -> Self {
        Self::new(seed as u32)
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform value in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
