use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::position::{BlockPos, Vec3};

/// Snapshot of the entity that triggered an outcome, usually a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Display name.
    pub name: String,
    /// Stable unique id.
    pub uuid: Uuid,
    /// Continuous position.
    pub pos: Vec3,
    /// Horizontal look angle in degrees.
    pub yaw: f64,
    /// Vertical look angle in degrees.
    pub pitch: f64,
}

impl Actor {
    /// Create an actor at `pos` looking straight ahead.
    pub fn new(name: impl Into<String>, uuid: Uuid, pos: Vec3) -> Self {
        Self {
            name: name.into(),
            uuid,
            pos,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Set the look angles, in degrees.
    pub fn with_rotation(mut self, yaw: f64, pitch: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// The block the actor stands in.
    pub fn block_pos(&self) -> BlockPos {
        BlockPos::from_vec(self.pos)
    }
}

/// Runtime bundle handed to resolution and execution.
///
/// Holds the triggering block position, the acting entity (if any) and the
/// random source every template function and sound seed draws from. The
/// context is owned by value once an outcome is scheduled, so it is `Clone`
/// and carries no borrowed host state.
#[derive(Debug, Clone)]
pub struct Context {
    /// The position that triggered the outcome.
    pub pos: BlockPos,
    /// The acting entity, if any.
    pub actor: Option<Actor>,
    /// Random source for this invocation.
    pub rng: StdRng,
}

impl Context {
    /// Create a context at `pos` with a random source seeded from `seed`.
    pub fn new(pos: BlockPos, seed: u64) -> Self {
        Self {
            pos,
            actor: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Attach the acting entity.
    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Centre of the triggering block.
    pub fn center(&self) -> Vec3 {
        self.pos.center()
    }

    /// The acting entity's position, or the triggering block centre without one.
    pub fn actor_pos_or_center(&self) -> Vec3 {
        self.actor.as_ref().map_or_else(|| self.center(), |a| a.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn actor_block_pos() {
        let actor = Actor::new("Steve", Uuid::nil(), Vec3::new(3.2, 64.0, -9.9));
        assert_eq!(actor.block_pos(), BlockPos::new(3, 64, -10));
    }

    #[test]
    fn actor_pos_falls_back_to_center() {
        let ctx = Context::new(BlockPos::new(0, 10, 0), 1);
        assert_eq!(ctx.actor_pos_or_center(), Vec3::new(0.5, 10.5, 0.5));

        let ctx = ctx.with_actor(Actor::new("Alex", Uuid::nil(), Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(ctx.actor_pos_or_center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = Context::new(BlockPos::default(), 7);
        let mut b = Context::new(BlockPos::default(), 7);
        let xs: Vec<u32> = (0..5).map(|_| a.rng.random()).collect();
        let ys: Vec<u32> = (0..5).map(|_| b.rng.random()).collect();
        assert_eq!(xs, ys);
    }
}
