//! Error context capture.
//!
//! - Near: a window of up to three values either side of the offending one,
//!   rendered as `a b c >>> d <<< e f g`
//! - Where: the origin names of the active call frames, innermost first,
//!   found by following each frame's dynamic caller link

use rook_ir::{FrameId, Name};
use rook_value::{NearContext, Value, WhereContext};

use crate::frame::FrameKind;
use crate::stack::Stack;

/// Values shown on each side of the offending one.
pub const NEAR_RADIUS: usize = 3;

/// Longest rendering of a single value before it is abbreviated.
pub const NEAR_VALUE_WIDTH: usize = 40;

const ELLIPSIS: &str = "...";

/// Render the Near window around `items[index]`. An out-of-range index is
/// clamped to the last value; an empty sequence renders as empty.
pub fn near(items: &[Value], index: usize) -> NearContext {
    let Some(last) = items.len().checked_sub(1) else {
        return NearContext::new("");
    };
    let index = index.min(last);
    let start = index.saturating_sub(NEAR_RADIUS);
    let end = (index + NEAR_RADIUS + 1).min(items.len());

    let mut parts = Vec::with_capacity(end - start + 2);
    for (i, value) in items.iter().enumerate().take(end).skip(start) {
        if i == index {
            parts.push(">>>".to_string());
            parts.push(render(value));
            parts.push("<<<".to_string());
        } else {
            parts.push(render(value));
        }
    }
    NearContext::new(parts.join(" "))
}

/// Render one value for a Near window: decimals show their scale, long
/// values are cut short.
fn render(value: &Value) -> String {
    let text = match value {
        Value::Decimal(d) => format!("{d}[scale={}]", d.scale()),
        other => other.to_string(),
    };
    if text.chars().count() <= NEAR_VALUE_WIDTH {
        return text;
    }
    let keep = NEAR_VALUE_WIDTH - ELLIPSIS.len();
    let mut short: String = text.chars().take(keep).collect();
    short.push_str(ELLIPSIS);
    short
}

/// Call frames on the dynamic chain starting at `from`, innermost first.
/// Object frames are passed through; a freed frame ends the walk.
pub fn active_calls(stack: &Stack, from: FrameId) -> Vec<FrameId> {
    let mut calls = Vec::new();
    let mut next = Some(from);
    // each step moves to an older frame; the bound guards a corrupted chain
    let mut steps = stack.capacity();
    while let Some(id) = next {
        let Ok(frame) = stack.get(id) else {
            break;
        };
        if frame.kind() == FrameKind::Call {
            calls.push(id);
        }
        next = frame.caller();
        steps = steps.saturating_sub(1);
        if steps == 0 {
            break;
        }
    }
    calls
}

/// Where trace from `from`, keeping at most `depth` names.
pub fn where_trace(stack: &Stack, from: FrameId, depth: usize) -> WhereContext {
    let names: Vec<Name> = active_calls(stack, from)
        .into_iter()
        .filter_map(|id| stack.get(id).ok()?.origin())
        .take(depth)
        .collect();
    WhereContext::new(names)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
