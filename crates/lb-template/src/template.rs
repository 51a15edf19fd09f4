//! The resolution pipeline: function calls, placeholders, quote stripping and
//! arithmetic.

use std::sync::LazyLock;

use lb_core::Context;
use regex::Regex;
use tracing::{debug, trace};

use crate::error::{TemplateError, TemplateResult};
use crate::expr::evaluate;
use crate::functions::{self, FUNCTIONS};
use crate::params;

static PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid regex"));
static MATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?[0-9]+(?:\.[0-9]+)?(?:[*/+-]-?[0-9]+(?:\.[0-9]+)?)+").expect("valid regex")
});
static QUOTED_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(-?[0-9]+(?:\.[0-9]+)?)""#).expect("valid regex"));
// Calls without nested parentheses; nesting is handled by repeating the pass.
static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<&str> = FUNCTIONS.iter().map(|(name, _)| *name).collect();
    Regex::new(&format!(r"\b({})\(([^()]*)\)", names.join("|"))).expect("valid regex")
});

/// Resolve every template construct in `raw` against `ctx`.
///
/// A string without placeholders, function calls, quoted numbers or
/// arithmetic is returned unchanged, so resolving an already resolved string
/// is a no-op.
pub fn resolve(raw: &str, ctx: &mut Context) -> TemplateResult<String> {
    let mut current = raw.to_string();
    while let Some(expanded) = expand_calls(&current, ctx)? {
        current = expanded;
    }
    substitute(&current, ctx)
}

/// Replace every innermost function call once. `None` when there was nothing
/// to replace.
fn expand_calls(input: &str, ctx: &mut Context) -> TemplateResult<Option<String>> {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for caps in CALL_RE.captures_iter(input) {
        let (Some(whole), Some(name), Some(args)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        out.push_str(&input[last..whole.start()]);
        out.push_str(&call(name.as_str(), args.as_str(), ctx)?);
        last = whole.end();
    }
    if last == 0 {
        return Ok(None);
    }
    out.push_str(&input[last..]);
    Ok(Some(out))
}

fn call(name: &str, arg_text: &str, ctx: &mut Context) -> TemplateResult<String> {
    let function =
        functions::get(name).ok_or_else(|| TemplateError::call(name, "unknown function"))?;
    let args = if arg_text.trim().is_empty() {
        Vec::new()
    } else {
        arg_text
            .split(',')
            .map(|arg| substitute(arg.trim(), ctx))
            .collect::<TemplateResult<Vec<_>>>()?
    };
    let result = function(&args, ctx)?;
    debug!(function = name, ?args, %result, "template function evaluated");
    Ok(result)
}

/// Placeholders, then quote stripping, then arithmetic, then a final strip so
/// computed numbers lose their quotes too.
fn substitute(input: &str, ctx: &mut Context) -> TemplateResult<String> {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for caps in PARAM_RE.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = params::lookup(name.as_str(), ctx)
            .ok_or_else(|| TemplateError::UnknownParameter(name.as_str().to_string()))?;
        trace!(param = name.as_str(), %value, "placeholder resolved");
        out.push_str(&input[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }
    out.push_str(&input[last..]);

    let evaluated = evaluate_expressions(&strip_number_quotes(&out))?;
    Ok(strip_number_quotes(&evaluated))
}

fn strip_number_quotes(input: &str) -> String {
    QUOTED_NUMBER_RE.replace_all(input, "$1").into_owned()
}

/// Replace each standalone arithmetic chain with its value. A chain touching
/// a letter, digit, `_` or `.` is part of a larger token (a UUID, a dotted id)
/// and is left alone.
fn evaluate_expressions(input: &str) -> TemplateResult<String> {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for m in MATH_RE.find_iter(input) {
        let before = input[..m.start()].chars().next_back();
        let after = input[m.end()..].chars().next();
        if before.is_some_and(is_token_char) || after.is_some_and(is_token_char) {
            continue;
        }
        let value = evaluate(m.as_str())?;
        out.push_str(&input[last..m.start()]);
        out.push_str(&value.to_string());
        last = m.end();
    }
    out.push_str(&input[last..]);
    Ok(out)
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}
