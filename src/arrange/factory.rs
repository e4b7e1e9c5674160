//! Builds arranger chains from configuration rules.
//!
//! Rule strings (element kinds, group keys, sort keys, directions) are raw
//! text until here; anything outside the recognized sets is rejected with an
//! `InvalidConfiguration` error before arrangement starts.

use crate::arrange::chain::ChainElementArranger;
use crate::arrange::rules::{ConfiguredArranger, GroupBy, SortKey};
use crate::config::ElementRule;
use crate::error::{ArrangeError, Result};

/// Element kind names a rule may capture.
const KNOWN_KINDS: &[&str] = &[
    "using",
    "namespace",
    "type",
    "field",
    "property",
    "method",
    "constructor",
    "destructor",
    "event",
    "delegate",
    "comment",
    "group",
];

/// Recursively build the chain for one scope's rules, in configuration
/// order; earlier rules take precedence per the chain contract.
pub fn build_arranger_chain(rules: &[ElementRule]) -> Result<ChainElementArranger> {
    let mut chain = ChainElementArranger::new();
    for (index, rule) in rules.iter().enumerate() {
        chain.add_arranger(Box::new(build_arranger(rule, index)?));
    }
    Ok(chain)
}

fn build_arranger(rule: &ElementRule, rule_index: usize) -> Result<ConfiguredArranger> {
    if rule.kinds.is_empty() {
        return Err(ArrangeError::InvalidArgument(
            "arrangement rule must name at least one element kind".to_string(),
        ));
    }
    for kind in &rule.kinds {
        if !KNOWN_KINDS.contains(&kind.as_str()) {
            return Err(ArrangeError::InvalidConfiguration(format!(
                "unrecognized element kind '{kind}' in arrangement rule"
            )));
        }
    }

    let group_by = match rule.group_by.as_deref() {
        None => None,
        Some("access") => Some(GroupBy::Access),
        Some("kind") => Some(GroupBy::Kind),
        Some("static") => Some(GroupBy::Static),
        Some("first_letter") => Some(GroupBy::FirstLetter),
        Some(other) => {
            return Err(ArrangeError::InvalidConfiguration(format!(
                "unrecognized group key '{other}' (expected 'access', 'kind', 'static' or 'first_letter')"
            )));
        }
    };

    let sort_key = match rule.sort_by.as_deref() {
        None => None,
        Some("name") => Some(SortKey::Name),
        Some("access") => Some(SortKey::Access),
        Some("kind") => Some(SortKey::Kind),
        Some("type") => Some(SortKey::Type),
        Some(other) => {
            return Err(ArrangeError::InvalidConfiguration(format!(
                "unrecognized sort key '{other}' (expected 'name', 'access', 'kind' or 'type')"
            )));
        }
    };

    let descending = match rule.sort_direction.as_str() {
        "ascending" => false,
        "descending" => true,
        other => {
            return Err(ArrangeError::InvalidConfiguration(format!(
                "unrecognized sort direction '{other}' (expected 'ascending' or 'descending')"
            )));
        }
    };

    let children_chain = if rule.rules.is_empty() {
        None
    } else {
        Some(build_arranger_chain(&rule.rules)?)
    };

    Ok(ConfiguredArranger::new(
        rule.kinds.clone(),
        group_by,
        sort_key,
        descending,
        rule.region.clone(),
        rule.separator.clone(),
        children_chain,
        rule_index,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_default_rules_build() {
        let config = Config::default();
        let chain = build_arranger_chain(&config.rules).unwrap();
        assert_eq!(chain.len(), config.rules.len());
    }

    #[test]
    fn test_empty_rules_build_empty_chain() {
        let chain = build_arranger_chain(&[]).unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_rule_without_kinds_is_invalid_argument() {
        let rule = ElementRule {
            kinds: vec![],
            ..ElementRule::passthrough(&[])
        };
        let result = build_arranger_chain(std::slice::from_ref(&rule));
        assert!(matches!(result, Err(ArrangeError::InvalidArgument(_))));
    }

    #[test]
    fn test_unknown_kind_is_invalid_configuration() {
        let rule = ElementRule::passthrough(&["widget"]);
        let result = build_arranger_chain(std::slice::from_ref(&rule));
        match result {
            Err(ArrangeError::InvalidConfiguration(message)) => {
                assert!(message.contains("widget"));
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_group_key_is_invalid_configuration() {
        let mut rule = ElementRule::passthrough(&["field"]);
        rule.group_by = Some("color".to_string());
        let result = build_arranger_chain(std::slice::from_ref(&rule));
        assert!(matches!(
            result,
            Err(ArrangeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unknown_sort_key_is_invalid_configuration() {
        let mut rule = ElementRule::passthrough(&["field"]);
        rule.sort_by = Some("weight".to_string());
        let result = build_arranger_chain(std::slice::from_ref(&rule));
        assert!(matches!(
            result,
            Err(ArrangeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unknown_direction_is_invalid_configuration() {
        let mut rule = ElementRule::passthrough(&["field"]);
        rule.sort_direction = "sideways".to_string();
        let result = build_arranger_chain(std::slice::from_ref(&rule));
        assert!(matches!(
            result,
            Err(ArrangeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_bad_nested_rule_is_rejected() {
        let mut rule = ElementRule::passthrough(&["type"]);
        rule.rules = vec![ElementRule::passthrough(&["gadget"])];
        let result = build_arranger_chain(std::slice::from_ref(&rule));
        assert!(matches!(
            result,
            Err(ArrangeError::InvalidConfiguration(_))
        ));
    }
}
