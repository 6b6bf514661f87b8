//! The PolkaForge assistant
//!
//! Priority order, first match wins:
//! 1. command patterns (DOT transfer)
//! 2. code review (fenced block, or "review" / "bug" mentioned)
//! 3. topic keywords (help, ecosystem, optimization, security)
//! 4. fallback echoing the input

use super::review::{compose_report, detect_issues, extract_code_block, has_code_fence};
use super::rules::{KeywordRule, RuleSet};
use super::session::ThinkingDelay;
use super::transfer::{TRANSFER_PATTERN, handle_transfer};
use super::{Responder, Response};
use crate::wallet::WalletSnapshot;

pub const WELCOME: &str = "🤖 **Welcome to PolkaForge AI Assistant!** ✨\n\nI'm your coding companion. Here's what I can help you with:\n\n🔍 **Code Analysis & Bug Detection**\n• Detect security vulnerabilities\n• Find performance issues\n• Suggest best practices\n• Polkadot/Substrate specific guidance\n\n💰 **DOT Transfers**\n• Send DOT using natural language\n• Check balances\n\n🧠 **Development Assistance**\n• Explain complex concepts\n• Code optimization tips\n• Architecture recommendations\n• Debugging help\n\nTry saying: *\"Review my code\"* or *\"Send 5 DOT to alice\"*";

const REVIEW_READY: &str = "🤖 **Code Review Ready!**\n\nI'd love to analyze your code! Please share it using code blocks:\n\n```javascript\n// Your code here\nfunction example() {\n  return \"Hello PolkaForge!\";\n}\n```\n\n**🔍 I can detect:**\n• Security vulnerabilities\n• Performance issues\n• Best practice violations\n• Polkadot/Substrate specific problems\n• Code quality improvements\n\n**💡 Tip:** Include the programming language for better analysis!";

const EXCELLENT_CODE: &str = "✅ **Excellent Code Quality!**\n\nYour code looks great! Here's what I found:\n\n🛡️ **Security:** No vulnerabilities detected\n📊 **Quality:** Follows best practices\n⚡ **Performance:** No obvious bottlenecks\n\n**🌟 Pro Tips:**\n• Add comprehensive error handling\n• Include unit tests for critical functions\n• Document complex logic\n• Consider using TypeScript for better type safety\n\n**Polkadot Specific:**\n• Always handle API connection errors\n• Use proper account validation\n• Test on Westend testnet first";

const TOPICS: &[KeywordRule] = &[
    KeywordRule::new(
        "help",
        &["help", "what can you do"],
        "🧠 **PolkaForge AI Assistant Capabilities**\n\n**🔍 Code Analysis:**\n• Security vulnerability detection\n• Performance optimization\n• Best practices enforcement\n• Polkadot/Substrate expertise\n\n**💰 Blockchain Operations:**\n• DOT transfers via natural language\n• Balance checking\n\n**🚀 Development Support:**\n• Architecture recommendations\n• Debugging assistance\n• Code optimization\n• Testing strategies\n\n**🎯 Try These Commands:**\n• \"Review my smart contract code\"\n• \"Send 10 DOT to alice\"\n• \"How do I optimize this function?\"\n• \"Explain Polkadot consensus\"\n• \"Find bugs in my code\"",
    ),
    KeywordRule::new(
        "ecosystem",
        &["polkadot", "substrate", "ink", "parachain"],
        "🔗 **Polkadot Ecosystem Expertise**\n\n**🏗️ Development Best Practices:**\n• Use Polkadot.js API for blockchain interactions\n• ink! for WASM smart contracts\n• Substrate for custom blockchain development\n• Asset Hub for DOT/asset transfers\n• Always test on Westend testnet\n\n**🛡️ Security Guidelines:**\n• Validate all user inputs\n• Handle connection errors gracefully\n• Use proper account management\n• Implement transaction confirmations\n\n**⚡ Performance Tips:**\n• Cache API connections\n• Batch multiple operations\n• Optimize for minimal fees\n\n**🎯 Need specific help?** Ask about:\n• Smart contract development\n• Parachain integration\n• Cross-chain messaging\n• Staking mechanisms\n• Governance participation",
    ),
    KeywordRule::new(
        "optimization",
        &["optimize", "performance"],
        "⚡ **Performance Optimization Guide**\n\n**🚀 General Optimizations:**\n• Minimize DOM manipulations\n• Use efficient algorithms\n• Cache expensive operations\n• Lazy load resources\n• Optimize bundle size\n\n**🔗 Polkadot Specific:**\n• Batch API calls when possible\n• Use connection pooling\n• Implement proper caching\n• Optimize transaction fees\n\n**💡 Share your code and I'll provide specific optimization suggestions!**",
    ),
    KeywordRule::new(
        "security",
        &["security", "vulnerability"],
        "🛡️ **Security Best Practices**\n\n**🔒 Critical Security Measures:**\n• Input validation and sanitization\n• Proper authentication/authorization\n• Secure data transmission (HTTPS)\n• Regular dependency updates\n\n**🔗 Blockchain Security:**\n• Validate all addresses\n• Secure private key management\n• Multi-signature wallets\n• Smart contract audits\n• Reentrancy protection\n\n**⚠️ Common Vulnerabilities:**\n• XSS attacks\n• Injection attacks\n• Integer overflow\n• Access control issues\n\n**🔍 Want a security audit? Share your code!**",
    ),
];

/// Which branch of the assistant produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Command,
    CodeReview,
    Topic(&'static str),
    Fallback,
}

pub struct Assistant {
    rules: RuleSet<WalletSnapshot>,
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}

impl Assistant {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new()
                .pattern("transfer", TRANSFER_PATTERN, handle_transfer)
                .keywords(TOPICS),
        }
    }

    /// Classify one message. Total: every input gets exactly one reply.
    pub fn classify(&self, input: &str, wallet: &WalletSnapshot) -> Response {
        self.classify_with_intent(input, wallet).1
    }

    pub fn classify_with_intent(&self, input: &str, wallet: &WalletSnapshot) -> (Intent, Response) {
        if let Some(response) = self.rules.match_pattern(input, wallet) {
            return (Intent::Command, response);
        }

        if wants_review(input) {
            return (Intent::CodeReview, review_response(input));
        }

        if let Some(rule) = self.rules.match_keyword(input) {
            return (Intent::Topic(rule.name), Response::ok(rule.template));
        }

        (Intent::Fallback, Response::ok(fallback(input)))
    }
}

fn wants_review(input: &str) -> bool {
    if has_code_fence(input) {
        return true;
    }
    let lowered = input.to_lowercase();
    lowered.contains("review") || lowered.contains("bug")
}

fn review_response(input: &str) -> Response {
    let Some(code) = extract_code_block(input) else {
        return Response::ok(REVIEW_READY);
    };

    let review = detect_issues(code);
    if review.is_clean() {
        return Response::ok(EXCELLENT_CODE);
    }

    let text = compose_report(&review);
    if review.security_ok() {
        Response::ok(text)
    } else {
        Response::attention(text)
    }
}

fn fallback(input: &str) -> String {
    format!(
        "🤖 **I understand you said:** \"{}\"\n\n**🎯 I'm here to help with:**\n\n**🔍 Code Review & Analysis**\n• Share code with ```code``` blocks\n• Get instant bug detection\n• Security vulnerability scanning\n• Performance optimization tips\n\n**💰 DOT Operations**\n• \"Send X DOT to [address/username]\"\n• Balance checking and management\n\n**🧠 Development Assistance**\n• Polkadot/Substrate questions\n• Architecture recommendations\n• Best practices guidance\n• Debugging help\n\n**💡 Try being more specific about what you need help with!**",
        input
    )
}

impl Responder for Assistant {
    fn name(&self) -> &'static str {
        "assistant"
    }

    fn welcome(&self) -> &'static str {
        WELCOME
    }

    fn default_delay(&self) -> ThinkingDelay {
        ThinkingDelay::range(1500, 2500)
    }

    fn respond(&self, input: &str, wallet: &WalletSnapshot) -> Response {
        self.classify(input, wallet)
    }
}
