//! Plain-text explanation of one recurrence step
//!
//! Signal amounts and the discount are floating-point sums and always print
//! with a fractional part (`1.0`); stance values print shortest (`-1`).

use std::collections::BTreeMap;

use crate::core::types::Nation;
use crate::stance::action::TurnOutcome;

/// `log[n][k]`: why `n` ended up with its current stance toward `k`
pub type RationaleLog = BTreeMap<Nation, BTreeMap<Nation, String>>;

/// Explain every ordered pair of `outcome`; self pairs get an empty string
pub fn render(outcome: &TurnOutcome) -> RationaleLog {
    outcome
        .current
        .rows()
        .map(|(n, row)| {
            let lines = row
                .iter()
                .map(|(k, &value)| {
                    let text = if n == k {
                        String::new()
                    } else {
                        explain(outcome, n, k, value)
                    };
                    (k.clone(), text)
                })
                .collect();
            (n.clone(), lines)
        })
        .collect()
}

fn explain(outcome: &TurnOutcome, n: &Nation, k: &Nation, value: f64) -> String {
    let (n_str, k_str) = (n.as_str(), k.as_str());
    let previous = outcome.previous.get(n_str, k_str).unwrap_or(0.0);
    let signals = &outcome.signals;
    let mut lines = vec![format!(
        "My stance to {} decays from {} to {} by a factor {:?}.",
        k,
        previous,
        outcome.discount * previous,
        outcome.discount
    )];

    let hostile_moves = signals.hostility_moves(n_str, k_str);
    if hostile_moves != 0.0 {
        lines.push(format!(
            "My stance to {} decreases by {:?} because of their hostile/conflict moves towards me.",
            k, hostile_moves
        ));
    }

    let hostile_supports = signals.hostility_supports(n_str, k_str);
    if hostile_supports != 0.0 {
        lines.push(format!(
            "My stance to {} decreases by {:?} because of their hostile/conflict support.",
            k, hostile_supports
        ));
    }

    let friendly = signals.friendship_supports(n_str, k_str);
    if friendly != 0.0 {
        lines.push(format!(
            "My stance to {} increases by {:?} because of receiving their support.",
            k, friendly
        ));
    }

    let unrealized = signals.friendship_unrealized(n_str, k_str);
    if unrealized > 0.0 {
        lines.push(format!(
            "My stance to {} increases by {:?} because they could attack but didn't.",
            k, unrealized
        ));
    } else if unrealized < 0.0 {
        lines.push(format!(
            "My stance to {} decreases by {:?} because they could be a threat.",
            k, unrealized
        ));
    }

    let pair = (n.clone(), k.clone());
    if outcome.betrayals.contains(&pair) {
        lines.push(format!(
            "My stance to {} becomes {} because I plan to betray {} to break the peace.",
            k, value, k
        ));
    }
    if outcome.end_game_flips.contains(&pair) {
        lines.push(format!(
            "My stance to {} becomes -1, because I plan to betray everyone after year {}.",
            k,
            outcome.year.unwrap_or(outcome.year_threshold)
        ));
    }

    lines.push(format!("My final stance score to {} is {}.", k, value));
    lines.join("\n")
}
