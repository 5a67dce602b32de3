//! Fixed sets used by profile validation

/// Domain names owned by the upstream Mantic domains.
///
/// Downstream profiles may not register under any of these, compared
/// case-insensitively. Kept sorted so error messages list them in order.
pub const RESERVED_DOMAIN_NAMES: [&str; 7] = [
    "climate",
    "cyber",
    "finance",
    "healthcare",
    "legal",
    "military",
    "social",
];

/// Hierarchy levels a layer may be assigned to (sorted).
pub const ALLOWED_HIERARCHY_LEVELS: [&str; 4] = ["Macro", "Meso", "Meta", "Micro"];

/// Temporal kernel families a profile may allowlist (sorted).
pub const ALLOWED_KERNEL_TYPES: [&str; 7] = [
    "exponential",
    "linear",
    "logistic",
    "memory",
    "oscillatory",
    "power_law",
    "s_curve",
];

/// Tolerance applied when checking that layer weights sum to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Minimum number of layers in a profile
pub const MIN_LAYERS: usize = 3;

/// Maximum number of layers in a profile
pub const MAX_LAYERS: usize = 6;

/// Lower bound for `interaction_rules.min_value`
pub const INTERACTION_MIN_FLOOR: f64 = 0.1;

/// Upper bound for `interaction_rules.max_value`
pub const INTERACTION_MAX_CEILING: f64 = 2.0;

/// Check whether a domain name collides with a reserved name
pub fn is_reserved_domain_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    RESERVED_DOMAIN_NAMES.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reserved_names_exact() {
        for name in RESERVED_DOMAIN_NAMES {
            assert!(is_reserved_domain_name(name));
        }
        assert!(!is_reserved_domain_name("customer_signal_core"));
    }

    #[test]
    fn test_sets_are_sorted() {
        assert!(RESERVED_DOMAIN_NAMES.windows(2).all(|w| w[0] < w[1]));
        assert!(ALLOWED_HIERARCHY_LEVELS.windows(2).all(|w| w[0] < w[1]));
        assert!(ALLOWED_KERNEL_TYPES.windows(2).all(|w| w[0] < w[1]));
    }

    proptest! {
        #[test]
        fn reserved_names_match_in_any_case(
            idx in 0usize..RESERVED_DOMAIN_NAMES.len(),
            mask in proptest::collection::vec(any::<bool>(), 16),
        ) {
            let mixed: String = RESERVED_DOMAIN_NAMES[idx]
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert!(is_reserved_domain_name(&mixed));
        }
    }
}
