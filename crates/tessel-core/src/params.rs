//! Name → value parameter maps for runtime rule reconfiguration.

use indexmap::IndexMap;

/// Parameter overrides keyed by parameter name.
///
/// Broadcast to every rule in a pipeline; each rule applies the keys it
/// recognizes and ignores the rest. Insertion order is preserved so
/// validation errors are reported deterministically.
pub type ParameterSet = IndexMap<String, f64>;

/// Copy `params[key]` into `slot` if present. Returns whether it was.
pub fn override_param(params: &ParameterSet, key: &str, slot: &mut f64) -> bool {
    match params.get(key) {
        Some(&v) => {
            *slot = v;
            true
        }
        None => false,
    }
}
