//! Profile contract validation
//!
//! Validation runs in two phases. Phase one checks each field on its own and
//! records one error per failing field. Phase two runs the cross-field rules,
//! each only when every field it reads parsed cleanly, so a broken field never
//! produces a cascade of follow-on errors.

use crate::error::{FieldError, ValidationErrors};
use crate::profile::{DomainProfile, Guardrails, InteractionRules, DETECTION_THRESHOLD_KEY};
use cip_domain::constants::{
    is_reserved_domain_name, ALLOWED_HIERARCHY_LEVELS, ALLOWED_KERNEL_TYPES,
    INTERACTION_MAX_CEILING, INTERACTION_MIN_FLOOR, MAX_LAYERS, MIN_LAYERS,
    RESERVED_DOMAIN_NAMES, WEIGHT_SUM_TOLERANCE,
};
use cip_domain::{HierarchyLevel, InteractionMode, InteractionOverrideMode, KernelType};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

static DOMAIN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_-]{2,63}$").expect("valid domain name regex"));

static LAYER_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]{1,63}$").expect("valid layer name regex"));

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid version regex"));

const PROFILE_FIELDS: [&str; 11] = [
    "domain_name",
    "version",
    "display_name",
    "description",
    "layer_names",
    "weights",
    "hierarchy",
    "thresholds",
    "temporal_allowlist",
    "interaction_rules",
    "guardrails",
];

const INTERACTION_RULE_FIELDS: [&str; 4] =
    ["default_mode", "default_override_mode", "min_value", "max_value"];

const GUARDRAIL_FIELDS: [&str; 3] = ["disclaimers", "prohibited_actions", "escalation_triggers"];

const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_DETECTION_THRESHOLD: f64 = 0.4;

/// Validate an untyped payload against the profile contract
///
/// # Returns
///
/// The validated profile, or every violation found, each qualified by the
/// dotted path of the offending field.
pub fn validate(payload: &Value) -> Result<DomainProfile, ValidationErrors> {
    let Some(root) = payload.as_object() else {
        return Err(ValidationErrors::single(
            "root",
            "profile payload must be a mapping",
        ));
    };

    let mut check = Checker::default();

    // Phase 1: field-level rules
    check.reject_unknown_keys("", root, &PROFILE_FIELDS);

    let domain_name = check
        .required(root, "domain_name")
        .and_then(|value| check.domain_name(value));
    let version = match root.get("version") {
        Some(value) => check.version(value),
        None => Some(DEFAULT_VERSION.to_string()),
    };
    let display_name = check.optional_text(root, "display_name");
    let description = check.optional_text(root, "description");
    let layer_names = check
        .required(root, "layer_names")
        .and_then(|value| check.layer_names(value));
    let weights = check
        .required(root, "weights")
        .and_then(|value| check.weights(value));
    let hierarchy = check
        .required(root, "hierarchy")
        .and_then(|value| check.hierarchy(value));
    let thresholds = match root.get("thresholds") {
        Some(value) => check.thresholds(value),
        None => Some(BTreeMap::from([(
            DETECTION_THRESHOLD_KEY.to_string(),
            DEFAULT_DETECTION_THRESHOLD,
        )])),
    };
    let temporal_allowlist = match root.get("temporal_allowlist") {
        Some(value) => check.temporal_allowlist(value),
        None => Some(KernelType::default_allowlist()),
    };
    let interaction_rules = match root.get("interaction_rules") {
        Some(value) => check.interaction_rules(value),
        None => Some(InteractionRules::default()),
    };
    let guardrails = match root.get("guardrails") {
        Some(value) => check.guardrails(value),
        None => Some(Guardrails::default()),
    };

    // Phase 2: cross-field rules over cleanly parsed fields
    if let (Some(layers), Some(weights)) = (&layer_names, &weights) {
        if weights.len() != layers.len() {
            check.push(
                "weights",
                format!(
                    "weights length ({}) must equal layer_names length ({})",
                    weights.len(),
                    layers.len()
                ),
            );
        }
    }

    if let Some(weights) = &weights {
        let sum: f64 = weights.iter().sum();
        if !(1.0 - WEIGHT_SUM_TOLERANCE..=1.0 + WEIGHT_SUM_TOLERANCE).contains(&sum) {
            check.push("weights", format!("weights must sum to 1.0 (got {:.6})", sum));
        }
    }

    if let (Some(layers), Some(hierarchy)) = (&layer_names, &hierarchy) {
        check.hierarchy_coverage(layers, hierarchy);
    }

    if let Some(thresholds) = &thresholds {
        if !thresholds.contains_key(DETECTION_THRESHOLD_KEY) {
            check.push("thresholds", "thresholds must include 'detection'");
        }
    }

    if !check.errors.is_empty() {
        return Err(ValidationErrors::new(check.errors));
    }

    match (
        domain_name,
        version,
        display_name,
        description,
        layer_names,
        weights,
        hierarchy,
        thresholds,
        temporal_allowlist,
        interaction_rules,
        guardrails,
    ) {
        (
            Some(domain_name),
            Some(version),
            Some(display_name),
            Some(description),
            Some(layer_names),
            Some(weights),
            Some(hierarchy),
            Some(thresholds),
            Some(temporal_allowlist),
            Some(interaction_rules),
            Some(guardrails),
        ) => Ok(DomainProfile {
            domain_name,
            version,
            display_name,
            description,
            layer_names,
            weights,
            hierarchy,
            thresholds,
            temporal_allowlist,
            interaction_rules,
            guardrails,
        }),
        // Every `None` above recorded an error, so this arm is unreachable in
        // practice; report it rather than panic.
        _ => Err(ValidationErrors::single(
            "root",
            "profile payload failed validation",
        )),
    }
}

/// Accumulates field errors while individual checks run
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(path, message));
    }

    fn required<'a>(&mut self, root: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
        let value = root.get(field);
        if value.is_none() {
            self.push(field, "field required");
        }
        value
    }

    fn reject_unknown_keys(&mut self, prefix: &str, object: &Map<String, Value>, allowed: &[&str]) {
        for key in object.keys() {
            if !allowed.contains(&key.as_str()) {
                self.push(join_path(prefix, key), "extra fields not permitted");
            }
        }
    }

    fn string<'a>(&mut self, path: &str, value: &'a Value) -> Option<&'a str> {
        let text = value.as_str();
        if text.is_none() {
            self.push(path, "must be a string");
        }
        text
    }

    fn number(&mut self, path: &str, value: &Value) -> Option<f64> {
        let number = value.as_f64();
        if number.is_none() {
            self.push(path, "must be a number");
        }
        number
    }

    fn mapping<'a>(&mut self, path: &str, value: &'a Value) -> Option<&'a Map<String, Value>> {
        let object = value.as_object();
        if object.is_none() {
            self.push(path, "must be a mapping");
        }
        object
    }

    /// A list of strings; each non-string item is reported at its index
    fn string_list(&mut self, path: &str, value: &Value) -> Option<Vec<String>> {
        let Some(items) = value.as_array() else {
            self.push(path, "must be a list");
            return None;
        };

        let before = self.errors.len();
        let strings: Vec<String> = items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| {
                self.string(&format!("{}.{}", path, idx), item)
                    .map(str::to_string)
            })
            .collect();

        (self.errors.len() == before).then_some(strings)
    }

    fn optional_text(&mut self, root: &Map<String, Value>, field: &str) -> Option<String> {
        match root.get(field) {
            Some(value) => self.string(field, value).map(str::to_string),
            None => Some(String::new()),
        }
    }

    fn domain_name(&mut self, value: &Value) -> Option<String> {
        let name = self.string("domain_name", value)?;

        if is_reserved_domain_name(name) {
            self.push(
                "domain_name",
                format!(
                    "domain_name '{}' collides with reserved Mantic domains: [{}]",
                    name,
                    RESERVED_DOMAIN_NAMES.join(", ")
                ),
            );
            return None;
        }

        if !DOMAIN_NAME_RE.is_match(name) {
            self.push("domain_name", "domain_name must match ^[a-z][a-z0-9_-]{2,63}$");
            return None;
        }

        Some(name.to_string())
    }

    fn version(&mut self, value: &Value) -> Option<String> {
        let version = self.string("version", value)?;
        if !VERSION_RE.is_match(version) {
            self.push("version", "version must be semantic format like '1.0.0'");
            return None;
        }
        Some(version.to_string())
    }

    fn layer_names(&mut self, value: &Value) -> Option<Vec<String>> {
        let names = self.string_list("layer_names", value)?;

        if !(MIN_LAYERS..=MAX_LAYERS).contains(&names.len()) {
            self.push(
                "layer_names",
                format!(
                    "layer_names must contain between {} and {} entries (got {})",
                    MIN_LAYERS,
                    MAX_LAYERS,
                    names.len()
                ),
            );
            return None;
        }

        let unique: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        if unique.len() != names.len() {
            self.push("layer_names", "layer_names must be unique");
            return None;
        }

        if let Some(bad) = names.iter().find(|name| !LAYER_NAME_RE.is_match(name)) {
            self.push(
                "layer_names",
                format!("layer name '{}' must match ^[a-z][a-z0-9_]{{1,63}}$", bad),
            );
            return None;
        }

        Some(names)
    }

    fn weights(&mut self, value: &Value) -> Option<Vec<f64>> {
        let Some(items) = value.as_array() else {
            self.push("weights", "must be a list");
            return None;
        };

        let before = self.errors.len();
        let mut weights = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let path = format!("weights.{}", idx);
            if let Some(weight) = self.number(&path, item) {
                if !(0.0..=1.0).contains(&weight) {
                    self.push(path, "weights must be within [0, 1]");
                }
                weights.push(weight);
            }
        }

        (self.errors.len() == before).then_some(weights)
    }

    fn hierarchy(&mut self, value: &Value) -> Option<BTreeMap<String, HierarchyLevel>> {
        let object = self.mapping("hierarchy", value)?;

        let before = self.errors.len();
        let mut hierarchy = BTreeMap::new();
        for (layer, level) in object {
            let path = format!("hierarchy.{}", layer);
            let Some(name) = self.string(&path, level) else {
                continue;
            };
            match HierarchyLevel::parse(name) {
                Some(level) => {
                    hierarchy.insert(layer.clone(), level);
                }
                None => self.push(
                    path,
                    format!(
                        "hierarchy values must be one of [{}]",
                        ALLOWED_HIERARCHY_LEVELS.join(", ")
                    ),
                ),
            }
        }

        (self.errors.len() == before).then_some(hierarchy)
    }

    fn hierarchy_coverage(&mut self, layers: &[String], hierarchy: &BTreeMap<String, HierarchyLevel>) {
        let expected: BTreeSet<&str> = layers.iter().map(String::as_str).collect();
        let actual: BTreeSet<&str> = hierarchy.keys().map(String::as_str).collect();
        if expected == actual {
            return;
        }

        let missing: Vec<&str> = expected.difference(&actual).copied().collect();
        let extra: Vec<&str> = actual.difference(&expected).copied().collect();

        let mut detail = Vec::new();
        if !missing.is_empty() {
            detail.push(format!("missing: [{}]", missing.join(", ")));
        }
        if !extra.is_empty() {
            detail.push(format!("extra: [{}]", extra.join(", ")));
        }

        self.push(
            "hierarchy",
            format!(
                "hierarchy keys must match layer_names exactly ({})",
                detail.join("; ")
            ),
        );
    }

    fn thresholds(&mut self, value: &Value) -> Option<BTreeMap<String, f64>> {
        let object = self.mapping("thresholds", value)?;

        let before = self.errors.len();
        let mut thresholds = BTreeMap::new();
        for (name, raw) in object {
            let path = format!("thresholds.{}", name);
            let Some(threshold) = self.number(&path, raw) else {
                continue;
            };
            if threshold <= 0.0 || threshold >= 1.0 {
                self.push(path, format!("threshold '{}' must be in (0, 1)", name));
                continue;
            }
            thresholds.insert(name.clone(), threshold);
        }

        (self.errors.len() == before).then_some(thresholds)
    }

    fn temporal_allowlist(&mut self, value: &Value) -> Option<Vec<KernelType>> {
        let names = self.string_list("temporal_allowlist", value)?;

        if names.is_empty() {
            self.push("temporal_allowlist", "temporal_allowlist must not be empty");
            return None;
        }

        let before = self.errors.len();
        let mut kernels = Vec::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            match KernelType::parse(name) {
                Some(kernel) => kernels.push(kernel),
                None => self.push(
                    format!("temporal_allowlist.{}", idx),
                    format!(
                        "temporal_allowlist includes unsupported kernel '{}' (allowed: [{}])",
                        name,
                        ALLOWED_KERNEL_TYPES.join(", ")
                    ),
                ),
            }
        }

        (self.errors.len() == before).then_some(kernels)
    }

    fn interaction_rules(&mut self, value: &Value) -> Option<InteractionRules> {
        let object = self.mapping("interaction_rules", value)?;

        let before = self.errors.len();
        self.reject_unknown_keys("interaction_rules", object, &INTERACTION_RULE_FIELDS);

        let defaults = InteractionRules::default();

        let default_mode = match object.get("default_mode") {
            Some(raw) => self
                .string("interaction_rules.default_mode", raw)
                .and_then(|mode| {
                    let parsed = InteractionMode::parse(mode);
                    if parsed.is_none() {
                        self.push(
                            "interaction_rules.default_mode",
                            "default_mode must be 'dynamic' or 'base'",
                        );
                    }
                    parsed
                }),
            None => Some(defaults.default_mode),
        };

        let default_override_mode = match object.get("default_override_mode") {
            Some(raw) => self
                .string("interaction_rules.default_override_mode", raw)
                .and_then(|mode| {
                    let parsed = InteractionOverrideMode::parse(mode);
                    if parsed.is_none() {
                        self.push(
                            "interaction_rules.default_override_mode",
                            "default_override_mode must be 'scale' or 'replace'",
                        );
                    }
                    parsed
                }),
            None => Some(defaults.default_override_mode),
        };

        let min_value = match object.get("min_value") {
            Some(raw) => self.number("interaction_rules.min_value", raw),
            None => Some(defaults.min_value),
        };
        let max_value = match object.get("max_value") {
            Some(raw) => self.number("interaction_rules.max_value", raw),
            None => Some(defaults.max_value),
        };

        if let Some(min) = min_value {
            if min < INTERACTION_MIN_FLOOR {
                self.push(
                    "interaction_rules.min_value",
                    format!("min_value must be >= {}", INTERACTION_MIN_FLOOR),
                );
            }
        }
        if let Some(max) = max_value {
            if max > INTERACTION_MAX_CEILING {
                self.push(
                    "interaction_rules.max_value",
                    format!("max_value must be <= {}", INTERACTION_MAX_CEILING),
                );
            }
        }
        if let (Some(min), Some(max)) = (min_value, max_value) {
            if min >= max {
                self.push("interaction_rules", "min_value must be < max_value");
            }
        }

        if self.errors.len() != before {
            return None;
        }

        Some(InteractionRules {
            default_mode: default_mode?,
            default_override_mode: default_override_mode?,
            min_value: min_value?,
            max_value: max_value?,
        })
    }

    fn guardrails(&mut self, value: &Value) -> Option<Guardrails> {
        let object = self.mapping("guardrails", value)?;

        let before = self.errors.len();
        self.reject_unknown_keys("guardrails", object, &GUARDRAIL_FIELDS);

        let disclaimers = self.guardrail_list(object, "disclaimers");
        let prohibited_actions = self.guardrail_list(object, "prohibited_actions");
        let escalation_triggers = self.guardrail_list(object, "escalation_triggers");

        if self.errors.len() != before {
            return None;
        }

        Some(Guardrails {
            disclaimers: disclaimers?,
            prohibited_actions: prohibited_actions?,
            escalation_triggers: escalation_triggers?,
        })
    }

    fn guardrail_list(&mut self, object: &Map<String, Value>, field: &str) -> Option<Vec<String>> {
        let path = join_path("guardrails", field);
        let Some(raw) = object.get(field) else {
            return Some(Vec::new());
        };

        let entries = self.string_list(&path, raw)?;
        let before = self.errors.len();
        for (idx, entry) in entries.iter().enumerate() {
            if entry.trim().is_empty() {
                self.push(
                    format!("{}.{}", path, idx),
                    "guardrail entries must be non-empty strings",
                );
            }
        }

        (self.errors.len() == before).then_some(entries)
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
