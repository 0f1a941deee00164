//! Pooled transient elements: voxel-cloud puffs and contrails
//!
//! Elements live in a bounded pool owned by the caller. Spawning reuses the
//! first inactive slot before growing the pool, and never grows it past
//! `max_elements`. Motion is forward Euler; an element retires once it is
//! older than its lifetime or has faded below the visibility threshold.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::random::HashRng;

/// Pool-wide behaviour shared by every element
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolParams {
    pub max_elements: usize,
    /// Density lost per second
    pub fade_rate: f32,
    /// Size gained per second
    pub growth_rate: f32,
    /// Fraction of velocity lost per second
    pub drag: f32,
    /// Elements below this density are retired
    pub visibility_threshold: f32,
    /// Defaults for elements emitted by [`ParticlePool::emit_trail`] and
    /// [`ParticlePool::emit_cloud`]
    pub lifetime: f32,
    pub initial_size: f32,
    pub initial_density: f32,
    /// Jitter radius for emitted positions
    pub spread: f32,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self::voxel_cloud()
    }
}

impl PoolParams {
    /// Slow, long-lived, barely fading puffs
    pub fn voxel_cloud() -> Self {
        Self {
            max_elements: 256,
            fade_rate: 0.02,
            growth_rate: 0.05,
            drag: 0.1,
            visibility_threshold: 0.01,
            lifetime: 60.0,
            initial_size: 1.0,
            initial_density: 0.8,
            spread: 0.5,
        }
    }

    /// Short-lived, quickly expanding and fading trail puffs
    pub fn contrail() -> Self {
        Self {
            max_elements: 512,
            fade_rate: 0.25,
            growth_rate: 0.4,
            drag: 0.8,
            visibility_threshold: 0.02,
            lifetime: 4.0,
            initial_size: 0.15,
            initial_density: 0.9,
            spread: 0.05,
        }
    }
}

/// Initial state of one element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnParams {
    pub position: Vec3,
    pub velocity: Vec3,
    pub size: f32,
    pub density: f32,
    pub max_age: f32,
}

/// One pooled element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransientElement {
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
    pub max_age: f32,
    pub size: f32,
    pub density: f32,
    pub active: bool,
}

impl TransientElement {
    /// Remaining life in [0, 1] (1 when freshly spawned)
    pub fn life_fraction(&self) -> f32 {
        if self.max_age <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

/// Bounded pool of transient elements
#[derive(Clone, Debug)]
pub struct ParticlePool {
    params: PoolParams,
    elements: Vec<TransientElement>,
    rng: HashRng,
}

impl ParticlePool {
    pub fn new(params: PoolParams, seed: u32) -> Self {
        if params.max_elements == 0 {
            warn!("ParticlePool: max_elements is 0, every spawn will be dropped");
        }
        Self {
            params,
            elements: Vec::new(),
            rng: HashRng::new(seed),
        }
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    /// Slots allocated so far (active or not)
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.elements.iter().filter(|e| e.active).count()
    }

    /// Iterate live elements
    pub fn active(&self) -> impl Iterator<Item = &TransientElement> {
        self.elements.iter().filter(|e| e.active)
    }

    /// Retire every element, keeping the allocation
    pub fn clear(&mut self) {
        for e in &mut self.elements {
            e.active = false;
        }
    }

    /// Activate an element, returning its slot
    ///
    /// Returns `None` when every slot is live and the pool is at capacity.
    pub fn spawn(&mut self, spawn: SpawnParams) -> Option<usize> {
        let element = TransientElement {
            position: spawn.position,
            velocity: spawn.velocity,
            age: 0.0,
            max_age: spawn.max_age,
            size: spawn.size,
            density: spawn.density,
            active: true,
        };

        if let Some(slot) = self.elements.iter().position(|e| !e.active) {
            self.elements[slot] = element;
            return Some(slot);
        }
        if self.elements.len() < self.params.max_elements {
            self.elements.push(element);
            return Some(self.elements.len() - 1);
        }
        None
    }

    fn jitter(&mut self) -> Vec3 {
        self.rng.unit_vector() * self.rng.next_f32() * self.params.spread
    }

    /// Drop `count` puffs behind a body moving at `velocity`
    ///
    /// Puffs line up along the reverse travel direction, one puff size (or
    /// the spread, if larger) apart, and drift slowly backward. Returns how
    /// many were spawned.
    pub fn emit_trail(&mut self, position: Vec3, velocity: Vec3, count: usize) -> usize {
        let back = -velocity.normalize_or_zero();
        let spacing = self.params.spread.max(self.params.initial_size);
        let mut spawned = 0;
        for i in 0..count {
            let offset = back * spacing * i as f32 + self.jitter();
            let drift = -velocity * 0.05 + self.jitter();
            let spawn = SpawnParams {
                position: position + offset,
                velocity: drift,
                size: self.params.initial_size,
                density: self.params.initial_density,
                max_age: self.params.lifetime,
            };
            if self.spawn(spawn).is_none() {
                debug!(requested = count, spawned, "contrail emission hit pool capacity");
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Scatter `count` puffs uniformly in the box `center ± extent`
    ///
    /// Sizes vary between half and full `initial_size`. Returns how many
    /// were spawned.
    pub fn emit_cloud(&mut self, center: Vec3, extent: Vec3, count: usize) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            let offset = Vec3::new(
                self.rng.range(-1.0, 1.0),
                self.rng.range(-1.0, 1.0),
                self.rng.range(-1.0, 1.0),
            ) * extent;
            let size = self.params.initial_size * self.rng.range(0.5, 1.0);
            let drift = self.jitter() * 0.1;
            let spawn = SpawnParams {
                position: center + offset,
                velocity: drift,
                size,
                density: self.params.initial_density,
                max_age: self.params.lifetime,
            };
            if self.spawn(spawn).is_none() {
                debug!(requested = count, spawned, "cloud emission hit pool capacity");
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Advance every live element by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }

        let damping = (1.0 - self.params.drag * dt).max(0.0);
        for e in self.elements.iter_mut().filter(|e| e.active) {
            e.position += e.velocity * dt;
            e.velocity *= damping;
            e.age += dt;
            e.size += self.params.growth_rate * dt;
            e.density -= self.params.fade_rate * dt;

            if e.age > e.max_age || e.density < self.params.visibility_threshold {
                e.active = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_at(x: f32) -> SpawnParams {
        SpawnParams {
            position: Vec3::new(x, 0.0, 0.0),
            velocity: Vec3::ZERO,
            size: 1.0,
            density: 1.0,
            max_age: 1.0,
        }
    }

    fn small_pool(max_elements: usize) -> ParticlePool {
        ParticlePool::new(
            PoolParams {
                max_elements,
                fade_rate: 0.0,
                growth_rate: 0.0,
                drag: 0.0,
                ..PoolParams::voxel_cloud()
            },
            1,
        )
    }

    #[test]
    fn test_spawn_grows_until_capacity() {
        let mut pool = small_pool(3);
        assert_eq!(pool.spawn(spawn_at(0.0)), Some(0));
        assert_eq!(pool.spawn(spawn_at(1.0)), Some(1));
        assert_eq!(pool.spawn(spawn_at(2.0)), Some(2));
        assert_eq!(pool.spawn(spawn_at(3.0)), None);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_spawn_reuses_inactive_slot() {
        let mut pool = small_pool(3);
        pool.spawn(spawn_at(0.0));
        pool.spawn(SpawnParams {
            max_age: 10.0,
            ..spawn_at(1.0)
        });
        // Slot 0 expires, slot 1 survives
        pool.update(2.0);
        assert_eq!(pool.active_count(), 1);

        assert_eq!(pool.spawn(spawn_at(5.0)), Some(0));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_update_euler_step() {
        let mut pool = ParticlePool::new(
            PoolParams {
                fade_rate: 0.1,
                growth_rate: 0.5,
                drag: 0.0,
                ..PoolParams::voxel_cloud()
            },
            0,
        );
        pool.spawn(SpawnParams {
            velocity: Vec3::new(0.0, 2.0, 0.0),
            max_age: 10.0,
            ..spawn_at(0.0)
        });
        pool.update(0.5);

        let e = pool.active().next().unwrap();
        assert_eq!(e.position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(e.age, 0.5);
        assert_eq!(e.size, 1.25);
        assert!((e.density - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_drag_slows_elements() {
        let mut pool = ParticlePool::new(
            PoolParams {
                drag: 0.5,
                ..PoolParams::voxel_cloud()
            },
            0,
        );
        pool.spawn(SpawnParams {
            velocity: Vec3::X,
            max_age: 10.0,
            ..spawn_at(0.0)
        });
        pool.update(1.0);
        assert!((pool.active().next().unwrap().velocity.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_faded_elements_retire() {
        let mut pool = ParticlePool::new(
            PoolParams {
                fade_rate: 1.0,
                visibility_threshold: 0.5,
                ..PoolParams::voxel_cloud()
            },
            0,
        );
        pool.spawn(SpawnParams {
            max_age: 100.0,
            ..spawn_at(0.0)
        });
        pool.update(0.4);
        assert_eq!(pool.active_count(), 1);
        pool.update(0.2);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_non_positive_dt_is_ignored() {
        let mut pool = small_pool(4);
        pool.spawn(spawn_at(0.0));
        pool.update(-1.0);
        pool.update(f32::NAN);
        assert_eq!(pool.active().next().unwrap().age, 0.0);
    }

    #[test]
    fn test_emit_trail_behind_body() {
        let mut pool = ParticlePool::new(PoolParams::contrail(), 7);
        let spawned = pool.emit_trail(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 8);
        assert_eq!(spawned, 8);
        let spread = pool.params().spread;
        for e in pool.active() {
            assert!(e.position.z <= spread + 1e-6);
            assert!(e.velocity.z < 0.0);
        }
    }

    #[test]
    fn test_emit_respects_capacity() {
        let mut pool = ParticlePool::new(
            PoolParams {
                max_elements: 5,
                ..PoolParams::voxel_cloud()
            },
            3,
        );
        assert_eq!(pool.emit_cloud(Vec3::ZERO, Vec3::splat(10.0), 20), 5);
        assert_eq!(pool.emit_trail(Vec3::ZERO, Vec3::X, 3), 0);
    }

    #[test]
    fn test_emit_cloud_inside_box() {
        let mut pool = ParticlePool::new(PoolParams::voxel_cloud(), 11);
        let center = Vec3::new(5.0, 20.0, -3.0);
        let extent = Vec3::new(4.0, 1.0, 2.0);
        pool.emit_cloud(center, extent, 50);
        for e in pool.active() {
            let d = (e.position - center).abs();
            assert!(d.x <= 4.0 + 1e-4 && d.y <= 1.0 + 1e-4 && d.z <= 2.0 + 1e-4);
            assert!(e.size >= 0.5 && e.size <= 1.0);
        }
    }

    #[test]
    fn test_emission_deterministic() {
        let mut a = ParticlePool::new(PoolParams::contrail(), 42);
        let mut b = ParticlePool::new(PoolParams::contrail(), 42);
        a.emit_trail(Vec3::ONE, Vec3::Z, 10);
        b.emit_trail(Vec3::ONE, Vec3::Z, 10);
        assert!(a.active().eq(b.active()));
    }

    #[test]
    fn test_clear() {
        let mut pool = small_pool(4);
        pool.spawn(spawn_at(0.0));
        pool.spawn(spawn_at(1.0));
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.len(), 2);
    }
}
