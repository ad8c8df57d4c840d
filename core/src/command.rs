use serde::{Deserialize, Serialize};
use crate::types::Millis;

/// All player- and host-issued commands.
/// Variants are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Presentation ──────────────────────────────
    GetState,
    Spin,
    Advance { elapsed_ms: Millis },

    // ── Statistics ────────────────────────────────
    /// `spins` is taken raw so malformed values can fall back to the default.
    Simulate {
        #[serde(default)]
        spins: Option<serde_json::Value>,
    },

    Quit,
}

/// Resolve a raw `spins` request value.
///
/// The value is read like a query-string integer: leading whitespace and
/// a `+` are skipped and the leading digit run is used, so `"12abc"` is 12
/// and `2.5` is 2. A count that is not positive, has no leading digits, or
/// does not fit a `u64` falls back to `default`.
pub fn resolve_spin_count(raw: Option<&serde_json::Value>, default: u64) -> u64 {
    let parsed = match raw {
        Some(serde_json::Value::Number(n)) => parse_spin_count(&n.to_string()),
        Some(serde_json::Value::String(s)) => parse_spin_count(s),
        _ => None,
    };
    match parsed {
        Some(n) if n > 0 => n,
        _ => {
            log::debug!("simulate: unusable spins value {raw:?}, using {default}");
            default
        }
    }
}

fn parse_spin_count(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse::<u64>().ok()
}
