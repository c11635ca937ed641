use regex::Regex;

use crate::disposable::error::DisposableError;

/// Which side of the address a heuristic inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleTarget {
    Domain,
    Local,
}

/// A named pattern flagging throwaway-looking addresses. Exactness is not
/// the goal; these catch list misses at a lower confidence.
#[derive(Debug)]
pub(crate) struct HeuristicRule {
    pub(crate) name: &'static str,
    target: RuleTarget,
    pattern: Regex,
}

impl HeuristicRule {
    fn new(
        name: &'static str,
        target: RuleTarget,
        pattern: &str,
    ) -> Result<Self, DisposableError> {
        let pattern =
            Regex::new(pattern).map_err(|err| DisposableError::invalid_rule(name, err))?;
        Ok(Self {
            name,
            target,
            pattern,
        })
    }

    pub(crate) fn matches(&self, domain: &str, local: &str) -> bool {
        match self.target {
            RuleTarget::Domain => self.pattern.is_match(domain),
            RuleTarget::Local => self.pattern.is_match(local),
        }
    }
}

/// Compiles the heuristic set in evaluation order. The first rule that
/// matches wins, so narrower patterns come first.
pub(crate) fn build_rules() -> Result<Vec<HeuristicRule>, DisposableError> {
    Ok(vec![
        // "10minutemail"-style domains: a minute count up front is a
        // near-certain throwaway marker.
        HeuristicRule::new("minute-mail", RuleTarget::Domain, r"^[0-9]+minute")?,
        // tempmail / temp-mail / tmpmail / tmp.mail variants. Anchored on
        // "mail"/"inbox" so e.g. "template.com" stays clean.
        HeuristicRule::new(
            "temp-prefix",
            RuleTarget::Domain,
            r"^te?mp[.-]?(mail|inbox)",
        )?,
        HeuristicRule::new("fake-prefix", RuleTarget::Domain, r"^fake")?,
        HeuristicRule::new("trash-prefix", RuleTarget::Domain, r"^trash")?,
        HeuristicRule::new("disposable-prefix", RuleTarget::Domain, r"^disposable")?,
        // Whole-local-part markers: "temp", "fake123", "trash7". Anchored at
        // both ends so names like "temperance" are untouched.
        HeuristicRule::new(
            "throwaway-local",
            RuleTarget::Local,
            r"^(temp|tmp|fake|trash|disposable)[0-9]*$",
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> HeuristicRule {
        build_rules()
            .expect("rules compile")
            .into_iter()
            .find(|rule| rule.name == name)
            .expect("rule exists")
    }

    #[test]
    fn all_rules_compile() {
        let rules = build_rules().expect("rules compile");
        assert!(!rules.is_empty());
    }

    #[test]
    fn rule_names_are_unique() {
        let rules = build_rules().expect("rules compile");
        let mut names: Vec<_> = rules.iter().map(|rule| rule.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), rules.len());
    }

    #[test]
    fn minute_mail_requires_leading_digits() {
        let rule = rule("minute-mail");
        assert!(rule.matches("20minutemail.it", "bob"));
        assert!(rule.matches("5minuteinbox.com", "bob"));
        assert!(!rule.matches("lastminute.com", "bob"));
    }

    #[test]
    fn temp_prefix_needs_a_mailbox_word() {
        let rule = rule("temp-prefix");
        assert!(rule.matches("tempmail.dev", "bob"));
        assert!(rule.matches("temp-mail.io", "bob"));
        assert!(rule.matches("tmpinbox.net", "bob"));
        assert!(!rule.matches("template.com", "bob"));
        assert!(!rule.matches("temperature.org", "bob"));
    }

    #[test]
    fn throwaway_local_is_fully_anchored() {
        let rule = rule("throwaway-local");
        assert!(rule.matches("gmail.com", "temp"));
        assert!(rule.matches("gmail.com", "fake123"));
        assert!(!rule.matches("gmail.com", "temperance"));
        assert!(!rule.matches("gmail.com", "faker.smith"));
    }
}
