//! Seed-addressable random stream built on SHAKE-256.
//!
//! Every shot and every noise trajectory draws from its own stream derived
//! from a base seed and a label, so parallel runs reproduce bit for bit.

use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};

#[derive(Clone)]
pub struct ShotRng {
    state: [u8; 32],
    step: u64,
}

impl ShotRng {
    pub fn new(seed: &[u8]) -> Self {
        let mut state = [0u8; 32];
        shake(&[seed, b"SHOT_INIT"], &mut state);
        Self { state, step: 0 }
    }

    /// Independent stream for `label` under the same base seed.
    pub fn derive(seed: &[u8], label: &str) -> Self {
        let mut state = [0u8; 32];
        shake(&[seed, label.as_bytes(), b"SHOT_DERIVE"], &mut state);
        Self { state, step: 0 }
    }

    /// Uniform draw in `[0, 1)`. `ctx` separates draws made for different
    /// purposes from the same stream.
    pub fn next_f64(&mut self, ctx: &[u8]) -> f64 {
        self.step += 1;

        let state = self.state;
        let mut next_state = self.state;
        shake(&[&state, &self.step.to_be_bytes(), b"SHOT_STEP"], &mut next_state);
        self.state = next_state;

        let mut out = [0u8; 8];
        shake(&[&self.state, ctx], &mut out);

        // 53 significant bits keep the result strictly below 1.0
        (u64::from_be_bytes(out) >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Index drawn with probability proportional to `weights`.
    ///
    /// Negative weights are treated as zero. Returns the last index with
    /// positive weight when rounding leaves the cumulative sum short.
    pub fn choose(&mut self, weights: &[f64], ctx: &[u8]) -> usize {
        let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
        if total <= 0.0 {
            return 0;
        }

        let mut x = self.next_f64(ctx) * total;
        let mut last = 0;
        for (idx, w) in weights.iter().enumerate() {
            let w = w.max(0.0);
            if w == 0.0 {
                continue;
            }
            if x < w {
                return idx;
            }
            x -= w;
            last = idx;
        }
        last
    }
}

fn shake(parts: &[&[u8]], out: &mut [u8]) {
    let mut h = Shake256::default();
    for p in parts {
        h.update(p);
    }
    let mut r = h.finalize_xof();
    r.read(out);
}
