use super::constants::{
    PARTICLE_OPACITY_BASE, PARTICLE_OPACITY_SPAN, PARTICLE_RADIUS_MAX, PARTICLE_RADIUS_MIN,
    PARTICLE_SPEED_MAX, PARTICLE_SPEED_MIN, PARTICLE_TRANSIENT_BOOST,
};
use super::lifecycle::LifecycleState;
use glam::Vec2;
use rand::prelude::*;

/// A single mote drifting through the tank.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    // Sway phase in radians; advances with time.
    pub sway: f32,
}

/// Ambient drift simulation; positions wrap at the field edges.
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Vec2,
    opacity: f32,
    in_transient: bool,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(count: usize, bounds: Vec2, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = bounds.max(Vec2::ONE);
        let particles = (0..count).map(|_| spawn(&mut rng, bounds)).collect();
        Self {
            particles,
            bounds,
            opacity: PARTICLE_OPACITY_BASE,
            in_transient: false,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Resize the field, rescaling positions so the distribution is kept.
    pub fn resize(&mut self, bounds: Vec2) {
        let bounds = bounds.max(Vec2::ONE);
        let scale = bounds / self.bounds;
        for p in &mut self.particles {
            p.pos *= scale;
        }
        self.bounds = bounds;
    }

    pub fn step(&mut self, dt_sec: f32) {
        if !(dt_sec.is_finite() && dt_sec > 0.0) {
            return;
        }
        for p in &mut self.particles {
            p.sway = (p.sway + dt_sec * 0.8) % std::f32::consts::TAU;
            let drift = Vec2::new(p.sway.sin() * 3.0, 0.0);
            p.pos += (p.vel + drift) * dt_sec;
            p.pos.x = p.pos.x.rem_euclid(self.bounds.x);
            p.pos.y = p.pos.y.rem_euclid(self.bounds.y);
        }
    }

    /// Map lifecycle state onto particle opacity.
    ///
    /// Steady brightens slowly across the cycle; a transient flares and then
    /// decays back as its progress runs out. Entering a transient re-seeds one
    /// mote.
    pub fn apply_lifecycle(&mut self, state: LifecycleState) {
        self.opacity = opacity_for(state);
        let entered = state.is_transient() && !self.in_transient;
        self.in_transient = state.is_transient();
        if entered && !self.particles.is_empty() {
            let i = self.rng.gen_range(0..self.particles.len());
            self.particles[i] = spawn(&mut self.rng, self.bounds);
        }
    }
}

pub fn opacity_for(state: LifecycleState) -> f32 {
    let p = state.progress.clamp(0.0, 1.0);
    let o = if state.is_transient() {
        PARTICLE_OPACITY_BASE + PARTICLE_TRANSIENT_BOOST * (1.0 - p)
    } else {
        PARTICLE_OPACITY_BASE + PARTICLE_OPACITY_SPAN * p
    };
    o.clamp(0.0, 1.0)
}

fn spawn(rng: &mut StdRng, bounds: Vec2) -> Particle {
    let speed = rng.gen_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX);
    // Mostly upward with some lateral spread.
    let angle = rng.gen_range(-0.6_f32..0.6) - std::f32::consts::FRAC_PI_2;
    Particle {
        pos: Vec2::new(rng.gen_range(0.0..bounds.x), rng.gen_range(0.0..bounds.y)),
        vel: Vec2::new(angle.cos(), angle.sin()) * speed,
        radius: rng.gen_range(PARTICLE_RADIUS_MIN..PARTICLE_RADIUS_MAX),
        sway: rng.gen_range(0.0..std::f32::consts::TAU),
    }
}
