//! Deterministic hash and random substrate
//!
//! Every generator in this crate derives its randomness from [`hash`], so the
//! same seed always reproduces the same texture, mesh or particle stream.
//! State is a plain `u32` threaded explicitly by the caller; nothing here is
//! global.

use glam::Vec3;
use rand::{RngCore, SeedableRng};
use std::f32::consts::TAU;

/// Offset folded in before mixing so that zero is not a fixed point
const HASH_OFFSET: u32 = 0x9E37_79B9;

/// Scale mapping the top 24 bits of a hash to [0, 1)
const UNIT_SCALE: f32 = 1.0 / 16_777_216.0;

/// Avalanche mix of a 32-bit integer (xor-shift + multiply rounds)
///
/// Total over all inputs and bijective, so advancing a state with it never
/// collapses two streams into one.
#[inline]
pub fn hash(x: u32) -> u32 {
    let mut h = x.wrapping_add(HASH_OFFSET);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846C_A68B);
    h ^= h >> 16;
    h
}

/// Hash a 2D lattice coordinate together with a seed
#[inline]
pub fn hash2(x: i32, y: i32, seed: u32) -> u32 {
    hash((x as u32) ^ hash((y as u32) ^ hash(seed)))
}

/// Hash a 3D lattice coordinate together with a seed
#[inline]
pub fn hash3(x: i32, y: i32, z: i32, seed: u32) -> u32 {
    hash((x as u32) ^ hash((y as u32) ^ hash((z as u32) ^ hash(seed))))
}

/// Derive an independent stream seed (per worker, per layer, per element)
#[inline]
pub fn seed_for(seed: u32, stream: u32) -> u32 {
    hash(seed ^ hash(stream.wrapping_mul(0x27D4_EB2F)))
}

/// Map a hash value to [0, 1)
#[inline]
pub fn unit_from_hash(h: u32) -> f32 {
    (h >> 8) as f32 * UNIT_SCALE
}

/// Advance `state` and return a uniform sample in [0, 1)
#[inline]
pub fn rand01(state: &mut u32) -> f32 {
    *state = hash(*state);
    unit_from_hash(*state)
}

/// Small value-type RNG over the hash substrate
///
/// Copying a `HashRng` forks the stream: both copies produce the same
/// sequence from that point on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashRng {
    state: u32,
}

impl HashRng {
    /// Create a generator from a seed
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current state (the seed to reproduce the remainder of the stream)
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance and return the raw 32-bit state
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = hash(self.state);
        self.state
    }

    /// Uniform sample in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        rand01(&mut self.state)
    }

    /// Uniform sample in [min, max); returns `min` for an empty range
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.next_f32()
    }

    /// Uniformly distributed direction on the unit sphere
    pub fn unit_vector(&mut self) -> Vec3 {
        let z = self.range(-1.0, 1.0);
        let phi = self.next_f32() * TAU;
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * phi.cos(), z, r * phi.sin())
    }
}

impl Default for HashRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RngCore for HashRng {
    fn next_u32(&mut self) -> u32 {
        HashRng::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let hi = HashRng::next_u32(self) as u64;
        let lo = HashRng::next_u32(self) as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = HashRng::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for HashRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
