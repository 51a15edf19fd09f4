//! Named template functions.
//!
//! Functions receive their arguments already resolved and return the text
//! that replaces the whole call.

use lb_core::{Context, Vec3};
use rand::Rng;

use crate::error::{TemplateError, TemplateResult};

/// Signature shared by every template function.
pub type TemplateFn = fn(&[String], &mut Context) -> TemplateResult<String>;

/// Launch power used by `randomVelocity()` with no arguments.
pub const DEFAULT_VELOCITY_POWER: f64 = 0.9;
/// Maximum pitch deviation, in degrees, used by `randomVelocity()` with no arguments.
pub const DEFAULT_VELOCITY_PITCH: f64 = 15.0;

/// Every function callable from a template, by name.
pub static FUNCTIONS: &[(&str, TemplateFn)] = &[
    ("random", random),
    ("randomBetween", random_between),
    ("randomVelocity", random_velocity),
];

/// Look up a function by name.
pub fn get(name: &str) -> Option<TemplateFn> {
    FUNCTIONS.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
}

/// Uniform pick among the arguments.
fn random(args: &[String], ctx: &mut Context) -> TemplateResult<String> {
    if args.is_empty() {
        return Err(TemplateError::call("random", "expected at least 1 argument"));
    }
    Ok(args[ctx.rng.random_range(0..args.len())].clone())
}

/// Uniform integer in `[lo, hi]`. Reversed bounds are swapped.
fn random_between(args: &[String], ctx: &mut Context) -> TemplateResult<String> {
    let [lo, hi] = args else {
        return Err(TemplateError::call(
            "randomBetween",
            format!("expected 2 arguments, found {}", args.len()),
        ));
    };
    let parse = |s: &str| {
        s.parse::<i64>().map_err(|_| {
            TemplateError::call("randomBetween", format!("'{s}' is not an integer"))
        })
    };
    let (mut lo, mut hi) = (parse(lo.as_str())?, parse(hi.as_str())?);
    if lo > hi {
        std::mem::swap(&mut lo, &mut hi);
    }
    Ok(ctx.rng.random_range(lo..=hi).to_string())
}

/// Random launch vector as `x,y,z`.
///
/// Takes either no arguments or `(power, maxPitchDegrees)`; any other arity
/// yields `0`. The yaw is uniform over a full turn and the pitch deviates from
/// straight up by at most `maxPitchDegrees`.
fn random_velocity(args: &[String], ctx: &mut Context) -> TemplateResult<String> {
    let (power, max_pitch) = match args {
        [] => (DEFAULT_VELOCITY_POWER, DEFAULT_VELOCITY_PITCH),
        [power, max_pitch] => {
            let parse = |s: &str| {
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        TemplateError::call("randomVelocity", format!("'{s}' is not a finite number"))
                    })
            };
            let (power, max_pitch) = (parse(power.as_str())?, parse(max_pitch.as_str())?);
            // The sampled span is twice the pitch and must stay finite.
            if !(2.0 * max_pitch).is_finite() {
                return Err(TemplateError::call(
                    "randomVelocity",
                    format!("maximum pitch {max_pitch} is out of range"),
                ));
            }
            (power, max_pitch)
        }
        _ => return Ok("0".to_string()),
    };

    let yaw = ctx.rng.random_range(-180.0..180.0_f64).to_radians();
    let deviation = if max_pitch > 0.0 {
        ctx.rng.random_range(-max_pitch..max_pitch)
    } else {
        0.0
    };
    let pitch = (deviation - 90.0).to_radians();

    let motion = Vec3::new(
        -yaw.sin() * pitch.cos(),
        -pitch.sin(),
        yaw.cos() * pitch.cos(),
    )
    .scale(power);
    Ok(motion.to_string())
}
