//! Stochastic content generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RESERVED: [&str; 3] = ["true", "false", "null"];

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("MEMOML_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    /// Returns 0, 1, 2, ... with decreasing probability
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Random key: `[A-Za-z_][A-Za-z0-9_]*`, never a reserved word
    pub fn key(&mut self) -> String {
        const FIRST: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";
        const REST: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";
        loop {
            let len = 1 + self.geometric(0.7);
            let mut key = String::with_capacity(len);
            key.push(FIRST[self.rng.gen_range(0..FIRST.len())] as char);
            for _ in 1..len {
                key.push(REST[self.rng.gen_range(0..REST.len())] as char);
            }
            if !RESERVED.contains(&key.as_str()) {
                return key;
            }
        }
    }

    /// Random string literal body (no quotes)
    pub fn string_body(&mut self) -> String {
        const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789 _-.,;{}#";
        let len = self.geometric(0.8);
        (0..len)
            .map(|_| CHARS[self.rng.gen_range(0..CHARS.len())] as char)
            .collect()
    }

    /// Random number literal in one of the accepted shapes
    pub fn number(&mut self) -> String {
        let sign = if self.chance(0.2) { "-" } else { "" };
        let int: u32 = self.rng.gen_range(0..10_000);
        match self.rng.gen_range(0..3) {
            0 => format!("{}{}", sign, int),
            1 => format!("{}{}.{}", sign, int, self.rng.gen_range(0..1000)),
            _ => format!("{}.{}", sign, self.rng.gen_range(0..1000)),
        }
    }

    /// Random literal, or `None` for an entry that defaults to `true`
    pub fn literal(&mut self) -> Option<String> {
        match self.rng.gen_range(0..6) {
            0 => None,
            1 => Some(format!("{:?}", self.string_body())),
            2 => Some(self.number()),
            3 => Some("true".to_string()),
            4 => Some("false".to_string()),
            _ => Some("null".to_string()),
        }
    }

    /// Random whitespace run, possibly holding a comment
    pub fn whitespace(&mut self) -> String {
        let mut out = String::from(" ");
        for _ in 0..self.geometric(0.3) {
            match self.rng.gen_range(0..5) {
                0 => out.push('\t'),
                1 => out.push('\n'),
                2 => out.push_str("\r\n"),
                3 => out.push_str(" # noise { } ; \"\n"),
                _ => out.push(' '),
            }
        }
        out
    }

    /// Random valid entry, nested at most `depth` scopes deep
    pub fn entry(&mut self, depth: usize) -> String {
        let mut out = self.key();
        if let Some(literal) = self.literal() {
            out.push(' ');
            out.push_str(&literal);
        }
        if depth > 0 && self.chance(0.3) {
            out.push_str(" {");
            for _ in 0..self.geometric(0.5) {
                out.push_str(&self.whitespace());
                out.push_str(&self.entry(depth - 1));
            }
            out.push_str(" }");
        } else {
            out.push(';');
        }
        out
    }

    /// Random valid document of `count` top-level entries
    pub fn document(&mut self, count: usize, depth: usize) -> String {
        let mut out = String::new();
        for _ in 0..count {
            out.push_str(&self.entry(depth));
            out.push_str(&self.whitespace());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.entry(3), g2.entry(3));
            assert_eq!(g1.geometric(0.9), g2.geometric(0.9));
        }
    }

    #[test]
    fn test_keys_avoid_reserved_words() {
        let mut gen = Gen::new(7);
        for _ in 0..1000 {
            let key = gen.key();
            assert!(!RESERVED.contains(&key.as_str()));
        }
    }
}
