//! Context-derived parameter tables.
//!
//! Each table maps a placeholder name to a resolver over [`Context`]. The
//! tables are immutable statics; lookup walks them in precedence order
//! (string, then real, then integer) and the first hit wins.

use lb_core::Context;
use rand::Rng;

/// Resolver producing a string value.
pub type StringParam = fn(&mut Context) -> String;
/// Resolver producing a real value.
pub type RealParam = fn(&mut Context) -> f64;
/// Resolver producing an integer value.
pub type IntParam = fn(&mut Context) -> i64;

/// Exclusive upper bound for `randomRGBColor`.
const RGB_BOUND: i64 = 0xFF_FFFF;

/// String-valued parameters. Empty without an acting entity.
pub static STRING_PARAMS: &[(&str, StringParam)] = &[
    ("playerName", |ctx| {
        ctx.actor.as_ref().map(|a| a.name.clone()).unwrap_or_default()
    }),
    ("playerUUID", |ctx| {
        ctx.actor
            .as_ref()
            .map(|a| a.uuid.to_string())
            .unwrap_or_default()
    }),
];

/// Real-valued parameters. Actor values fall back to the block centre, or zero
/// for distances and angles.
pub static REAL_PARAMS: &[(&str, RealParam)] = &[
    ("playerVecX", |ctx| ctx.actor_pos_or_center().x),
    ("playerVecY", |ctx| ctx.actor_pos_or_center().y),
    ("playerVecZ", |ctx| ctx.actor_pos_or_center().z),
    ("playerX", |ctx| ctx.actor_pos_or_center().x),
    ("playerY", |ctx| ctx.actor_pos_or_center().y),
    ("playerZ", |ctx| ctx.actor_pos_or_center().z),
    ("blockVecX", |ctx| ctx.center().x),
    ("blockVecY", |ctx| ctx.center().y),
    ("blockVecZ", |ctx| ctx.center().z),
    ("blockX", |ctx| ctx.center().x),
    ("blockY", |ctx| ctx.center().y),
    ("blockZ", |ctx| ctx.center().z),
    ("playerDistance", |ctx| {
        let center = ctx.center();
        ctx.actor.as_ref().map_or(0.0, |a| a.pos.distance_to(center))
    }),
    ("playerSquaredDistance", |ctx| {
        let center = ctx.center();
        ctx.actor
            .as_ref()
            .map_or(0.0, |a| a.pos.squared_distance_to(center))
    }),
    ("playerPitch", |ctx| ctx.actor.as_ref().map_or(0.0, |a| a.pitch)),
    ("playerYaw", |ctx| ctx.actor.as_ref().map_or(0.0, |a| a.yaw)),
];

/// Integer-valued parameters. Actor block coordinates fall back to the
/// triggering block.
pub static INT_PARAMS: &[(&str, IntParam)] = &[
    ("playerPosX", |ctx| {
        i64::from(ctx.actor.as_ref().map_or(ctx.pos.x, |a| a.block_pos().x))
    }),
    ("playerPosY", |ctx| {
        i64::from(ctx.actor.as_ref().map_or(ctx.pos.y, |a| a.block_pos().y))
    }),
    ("playerPosZ", |ctx| {
        i64::from(ctx.actor.as_ref().map_or(ctx.pos.z, |a| a.block_pos().z))
    }),
    ("blockPosX", |ctx| i64::from(ctx.pos.x)),
    ("blockPosY", |ctx| i64::from(ctx.pos.y)),
    ("blockPosZ", |ctx| i64::from(ctx.pos.z)),
    ("randomRGBColor", |ctx| ctx.rng.random_range(0..RGB_BOUND)),
];

fn find<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    table.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
}

/// Resolve a placeholder name to its stringified value, or `None` if no table
/// knows it.
pub fn lookup(name: &str, ctx: &mut Context) -> Option<String> {
    if let Some(f) = find(STRING_PARAMS, name) {
        return Some(f(ctx));
    }
    if let Some(f) = find(REAL_PARAMS, name) {
        return Some(f(ctx).to_string());
    }
    find(INT_PARAMS, name).map(|f| f(ctx).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lb_core::{Actor, BlockPos, Vec3};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn ctx_with_actor() -> Context {
        Context::new(BlockPos::new(0, 60, 0), 1).with_actor(
            Actor::new("Steve", Uuid::nil(), Vec3::new(3.7, 64.0, -9.2)).with_rotation(90.0, -15.0),
        )
    }

    fn names() -> impl Iterator<Item = &'static str> {
        STRING_PARAMS
            .iter()
            .map(|(n, _)| *n)
            .chain(REAL_PARAMS.iter().map(|(n, _)| *n))
            .chain(INT_PARAMS.iter().map(|(n, _)| *n))
    }

    #[test]
    fn names_are_unique() {
        let all: Vec<&str> = names().collect();
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn actor_values() {
        let mut ctx = ctx_with_actor();
        assert_eq!(lookup("playerName", &mut ctx).unwrap(), "Steve");
        assert_eq!(
            lookup("playerUUID", &mut ctx).unwrap(),
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(lookup("playerPosX", &mut ctx).unwrap(), "3");
        assert_eq!(lookup("playerPosZ", &mut ctx).unwrap(), "-10");
        assert_eq!(lookup("playerX", &mut ctx).unwrap(), "3.7");
        assert_eq!(lookup("playerYaw", &mut ctx).unwrap(), "90");
        assert_eq!(lookup("playerPitch", &mut ctx).unwrap(), "-15");
    }

    #[test]
    fn fallbacks_without_actor() {
        let mut ctx = Context::new(BlockPos::new(2, 70, -4), 1);
        assert_eq!(lookup("playerName", &mut ctx).unwrap(), "");
        assert_eq!(lookup("playerUUID", &mut ctx).unwrap(), "");
        assert_eq!(lookup("playerPosY", &mut ctx).unwrap(), "70");
        assert_eq!(lookup("playerVecX", &mut ctx).unwrap(), "2.5");
        assert_eq!(lookup("playerDistance", &mut ctx).unwrap(), "0");
        assert_eq!(lookup("playerYaw", &mut ctx).unwrap(), "0");
    }

    #[test]
    fn block_values() {
        let mut ctx = Context::new(BlockPos::new(2, 70, -4), 1);
        assert_eq!(lookup("blockPosX", &mut ctx).unwrap(), "2");
        assert_eq!(lookup("blockX", &mut ctx).unwrap(), "2.5");
        assert_eq!(lookup("blockVecZ", &mut ctx).unwrap(), "-3.5");
    }

    #[test]
    fn distance_to_block_center() {
        let mut ctx = Context::new(BlockPos::new(0, 0, 0), 1)
            .with_actor(Actor::new("A", Uuid::nil(), Vec3::new(3.5, 4.5, 0.5)));
        assert_eq!(lookup("playerDistance", &mut ctx).unwrap(), "5");
        assert_eq!(lookup("playerSquaredDistance", &mut ctx).unwrap(), "25");
    }

    #[test]
    fn random_color_in_range() {
        let mut ctx = Context::new(BlockPos::default(), 9);
        for _ in 0..100 {
            let v: i64 = lookup("randomRGBColor", &mut ctx).unwrap().parse().unwrap();
            assert!((0..RGB_BOUND).contains(&v));
        }
    }

    #[test]
    fn unknown_is_none() {
        let mut ctx = Context::new(BlockPos::default(), 1);
        assert!(lookup("nope", &mut ctx).is_none());
    }
}
