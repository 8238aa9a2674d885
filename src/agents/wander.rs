use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::math::Vec3;

/// Horizontal box an agent wanders in. The vertical axis is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f32,
    pub x_max: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl Bounds {
    pub const fn new(x_min: f32, x_max: f32, z_min: f32, z_max: f32) -> Self {
        Self { x_min, x_max, z_min, z_max }
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    pub fn contains_z(&self, z: f32) -> bool {
        z >= self.z_min && z <= self.z_max
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn depth(&self) -> f32 {
        self.z_max - self.z_min
    }

    pub fn is_valid(&self) -> bool {
        self.x_min <= self.x_max && self.z_min <= self.z_max
    }
}

/// Tunables for the random walk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderParams {
    /// Chance per tick of picking a brand new velocity
    pub turn_probability: f64,
    /// Full range of each initial velocity component (centered on zero)
    pub initial_speed: f32,
    /// Full range of x velocity after a random turn
    pub turn_speed_x: f32,
    /// Full range of z velocity after a random turn
    pub turn_speed_z: f32,
}

impl Default for WanderParams {
    fn default() -> Self {
        Self {
            turn_probability: 0.01,
            initial_speed: 0.01,
            turn_speed_x: 0.01,
            turn_speed_z: 0.002,
        }
    }
}

/// One wandering entity (a cow in the farm enclosure).
///
/// Moves one velocity step per render tick with no delta-time scaling, so
/// on-screen speed follows the host frame rate.
#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Facing angle around Y, `atan2(velocity.x, velocity.z)`
    pub heading: f32,
    bounds: Bounds,
    params: WanderParams,
}

impl Agent {
    /// Create an agent with a random horizontal starting velocity
    pub fn spawn<R: Rng + ?Sized>(position: Vec3, bounds: Bounds, params: WanderParams, rng: &mut R) -> Self {
        let velocity = random_horizontal(rng, params.initial_speed, params.initial_speed);
        Self::with_velocity(position, velocity, bounds, params)
    }

    pub fn with_velocity(position: Vec3, velocity: Vec3, bounds: Bounds, params: WanderParams) -> Self {
        Self {
            position,
            velocity,
            heading: velocity.x.atan2(velocity.z),
            bounds,
            params,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Advance one render tick
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.position += self.velocity;

        // Reflect, don't clamp: the agent may sit just outside for a tick
        if !self.bounds.contains_x(self.position.x) {
            self.velocity.x = -self.velocity.x;
        }
        if !self.bounds.contains_z(self.position.z) {
            self.velocity.z = -self.velocity.z;
        }

        if self.params.turn_probability > 0.0 && rng.random_bool(self.params.turn_probability.min(1.0)) {
            self.velocity = random_horizontal(rng, self.params.turn_speed_x, self.params.turn_speed_z);
        }

        self.heading = self.velocity.x.atan2(self.velocity.z);
    }
}

/// Horizontal vector with each component uniform in `±range / 2`
fn random_horizontal<R: Rng + ?Sized>(rng: &mut R, range_x: f32, range_z: f32) -> Vec3 {
    Vec3::new(
        (rng.random::<f32>() - 0.5) * range_x,
        0.0,
        (rng.random::<f32>() - 0.5) * range_z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const FARM: Bounds = Bounds::new(0.2, 2.8, -4.3, -1.7);

    fn no_turns() -> WanderParams {
        WanderParams {
            turn_probability: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_euler_step() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut agent = Agent::with_velocity(Vec3::new(1.5, 0.0, -3.0), Vec3::new(0.05, 0.0, 0.01), FARM, no_turns());
        agent.update(&mut rng);
        assert!((agent.position.x - 1.55).abs() < 0.0001);
        assert!((agent.position.z + 2.99).abs() < 0.0001);
    }

    #[test]
    fn test_reflects_off_x_max() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut agent = Agent::with_velocity(Vec3::new(1.5, 0.0, -3.0), Vec3::new(0.05, 0.0, 0.0), FARM, no_turns());

        let mut crossed = false;
        for _ in 0..100 {
            agent.update(&mut rng);
            assert!(agent.position.x <= FARM.x_max + 0.05 + 0.0001);
            if agent.position.x > FARM.x_max {
                crossed = true;
                assert!(agent.velocity.x < 0.0);
                break;
            }
        }
        assert!(crossed);

        // Reversed velocity pulls it back inside
        agent.update(&mut rng);
        assert!(agent.position.x <= FARM.x_max);
        assert!(agent.velocity.x < 0.0);
    }

    #[test]
    fn test_soft_bound_is_not_clamped() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut agent = Agent::with_velocity(Vec3::new(2.79, 0.0, -3.0), Vec3::new(0.05, 0.0, 0.0), FARM, no_turns());
        agent.update(&mut rng);
        assert!(agent.position.x > FARM.x_max);
        assert!((agent.position.x - 2.84).abs() < 0.0001);
    }

    #[test]
    fn test_reflects_both_axes_in_one_tick() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut agent = Agent::with_velocity(Vec3::new(2.79, 0.0, -1.71), Vec3::new(0.05, 0.0, 0.05), FARM, no_turns());
        agent.update(&mut rng);
        assert!(agent.velocity.x < 0.0);
        assert!(agent.velocity.z < 0.0);
    }

    #[test]
    fn test_heading_follows_velocity() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut agent = Agent::with_velocity(Vec3::new(1.0, 0.0, -3.0), Vec3::new(0.01, 0.0, 0.0), FARM, no_turns());
        agent.update(&mut rng);
        assert!((agent.heading - std::f32::consts::FRAC_PI_2).abs() < 0.0001);
    }

    #[test]
    fn test_random_turns_stay_horizontal() {
        let mut rng = SmallRng::seed_from_u64(99);
        let params = WanderParams {
            turn_probability: 1.0,
            ..Default::default()
        };
        let mut agent = Agent::spawn(Vec3::new(1.5, -0.85, -3.0), FARM, params, &mut rng);
        for _ in 0..50 {
            agent.update(&mut rng);
            assert_eq!(agent.velocity.y, 0.0);
            assert_eq!(agent.position.y, -0.85);
            assert!(agent.velocity.x.abs() <= 0.005);
            assert!(agent.velocity.z.abs() <= 0.001);
        }
    }

    #[test]
    fn test_same_seed_same_walk() {
        let run = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut agent = Agent::spawn(Vec3::new(1.5, 0.0, -3.0), FARM, WanderParams::default(), &mut rng);
            for _ in 0..500 {
                agent.update(&mut rng);
            }
            agent.position
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_long_walk_stays_near_bounds() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let params = WanderParams::default();
        let mut agent = Agent::spawn(Vec3::new(1.5, 0.0, -3.0), FARM, params, &mut rng);
        let slack = 0.25;
        for _ in 0..5_000 {
            agent.update(&mut rng);
            assert!(agent.position.x > FARM.x_min - slack && agent.position.x < FARM.x_max + slack);
            assert!(agent.position.z > FARM.z_min - slack && agent.position.z < FARM.z_max + slack);
        }
    }
}
