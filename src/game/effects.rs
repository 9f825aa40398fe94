use cgmath::Vector3;

#[derive(Clone, Debug)]
pub struct ActiveHitEffect {
    pub position: Vector3<f32>,
    pub elapsed: f32,
}

/// Burst effects spawned at the player on each hit, aged in real time.
#[derive(Clone, Debug)]
pub struct HitEffects {
    active: Vec<ActiveHitEffect>,
    lifetime: f32,
}

impl HitEffects {
    pub fn new(lifetime: f32) -> Self {
        Self {
            active: Vec::new(),
            lifetime,
        }
    }

    pub fn trigger(&mut self, position: Vector3<f32>) {
        self.active.push(ActiveHitEffect {
            position,
            elapsed: 0.0,
        });
    }

    pub fn tick(&mut self, delta_time: f32) {
        let lifetime = self.lifetime;
        self.active.retain_mut(|effect| {
            effect.elapsed += delta_time;
            effect.elapsed < lifetime
        });
    }

    pub fn active(&self) -> &[ActiveHitEffect] {
        &self.active
    }
}
