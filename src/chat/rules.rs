//! Ordered rule tables for the responders
//!
//! Two rule families: pattern rules (regex with named captures, checked
//! first) and keyword rules (substring containment on the lowercased input).
//! Within each family, declaration order is priority and the first match
//! wins. Keyword matching is deliberately plain containment, so "help" also
//! fires on "helpful".

use regex::Regex;
use tracing::debug;

use super::Response;

/// Named-capture view handed to pattern handlers
pub struct Captures<'h> {
    inner: regex::Captures<'h>,
}

impl<'h> Captures<'h> {
    /// Text of a named group, if the group took part in the match
    pub fn get(&self, group: &str) -> Option<&'h str> {
        self.inner.name(group).map(|m| m.as_str())
    }

    /// Whole matched text
    pub fn matched(&self) -> &'h str {
        self.inner.get(0).map(|m| m.as_str()).unwrap_or_default()
    }
}

/// Handler invoked with the captures of a matching pattern and the caller's
/// context (wallet snapshot for the assistant, nothing for the widget).
/// `None` means the captures did not carry what the handler needs and the
/// next rule should be tried.
pub type PatternHandler<C> = fn(&Captures<'_>, &C) -> Option<Response>;

pub struct PatternRule<C> {
    pub name: &'static str,
    pattern: Regex,
    handler: PatternHandler<C>,
}

impl<C> PatternRule<C> {
    /// Compile a rule. Patterns are string constants, so a bad one is a
    /// programming error.
    #[allow(clippy::expect_used)]
    pub fn new(name: &'static str, pattern: &str, handler: PatternHandler<C>) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid regex"),
            handler,
        }
    }

    fn apply(&self, input: &str, ctx: &C) -> Option<Response> {
        let inner = self.pattern.captures(input)?;
        (self.handler)(&Captures { inner }, ctx)
    }
}

#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub name: &'static str,
    /// Lowercase keys; any one of them being contained triggers the rule
    pub keywords: &'static [&'static str],
    pub template: &'static str,
}

impl KeywordRule {
    pub const fn new(name: &'static str, keywords: &'static [&'static str], template: &'static str) -> Self {
        Self {
            name,
            keywords,
            template,
        }
    }

    /// `lowered` must already be lowercase
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

pub struct RuleSet<C> {
    patterns: Vec<PatternRule<C>>,
    keywords: Vec<KeywordRule>,
}

impl<C> Default for RuleSet<C> {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            keywords: Vec::new(),
        }
    }
}

impl<C> RuleSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(mut self, name: &'static str, pattern: &str, handler: PatternHandler<C>) -> Self {
        self.patterns.push(PatternRule::new(name, pattern, handler));
        self
    }

    pub fn keyword(mut self, rule: KeywordRule) -> Self {
        self.keywords.push(rule);
        self
    }

    pub fn keywords(mut self, rules: &[KeywordRule]) -> Self {
        self.keywords.extend_from_slice(rules);
        self
    }

    /// First pattern rule that matches and handles the input
    pub fn match_pattern(&self, input: &str, ctx: &C) -> Option<Response> {
        self.patterns.iter().find_map(|rule| {
            let response = rule.apply(input, ctx)?;
            debug!(rule = rule.name, "pattern rule matched");
            Some(response)
        })
    }

    /// First keyword rule contained in the input
    pub fn match_keyword(&self, input: &str) -> Option<&KeywordRule> {
        let lowered = input.to_lowercase();
        let rule = self.keywords.iter().find(|rule| rule.matches(&lowered))?;
        debug!(rule = rule.name, "keyword rule matched");
        Some(rule)
    }

    /// Template of the keyword rule registered under `name`
    pub fn template(&self, name: &str) -> Option<&'static str> {
        self.keywords
            .iter()
            .find(|rule| rule.name == name)
            .map(|rule| rule.template)
    }

    /// Patterns first, then keywords
    pub fn respond(&self, input: &str, ctx: &C) -> Option<Response> {
        self.match_pattern(input, ctx)
            .or_else(|| self.match_keyword(input).map(|rule| Response::ok(rule.template)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_amount(caps: &Captures<'_>, _: &()) -> Option<Response> {
        Some(Response::ok(format!("amount={}", caps.get("amount")?)))
    }

    fn decline(_: &Captures<'_>, _: &()) -> Option<Response> {
        None
    }

    fn always(caps: &Captures<'_>, _: &()) -> Option<Response> {
        Some(Response::ok(format!("always:{}", caps.matched())))
    }

    fn rules() -> RuleSet<()> {
        RuleSet::new()
            .pattern("pay", r"(?i)pay (?P<amount>\d+)", echo_amount)
            .pattern("greedy", r"(?i)pay", always)
            .keyword(KeywordRule::new("help", &["help"], "help text"))
            .keyword(KeywordRule::new("pay", &["pay", "money"], "pay text"))
    }

    #[test]
    fn test_patterns_beat_keywords() {
        let r = rules().respond("Pay 12 please, help", &()).unwrap();
        assert_eq!(r.text, "amount=12");
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        // "pay" without an amount falls to the second pattern, not the keyword
        let r = rules().respond("pay later", &()).unwrap();
        assert_eq!(r.text, "always:pay");
    }

    #[test]
    fn test_declining_handler_passes_to_next_rule() {
        let set: RuleSet<()> = RuleSet::new()
            .pattern("decline", r"x", decline)
            .pattern("accept", r"x", always);
        assert_eq!(set.respond("x", &()).unwrap().text, "always:x");
    }

    #[test]
    fn test_keyword_containment_is_loose() {
        let set = rules();
        assert_eq!(set.match_keyword("that was HELPFUL").unwrap().name, "help");
        assert_eq!(set.match_keyword("moneybags").unwrap().name, "pay");
    }

    #[test]
    fn test_no_match() {
        assert!(rules().respond("nothing here", &()).is_none());
    }

    #[test]
    fn test_template_lookup() {
        assert_eq!(rules().template("help"), Some("help text"));
        assert_eq!(rules().template("missing"), None);
    }
}
