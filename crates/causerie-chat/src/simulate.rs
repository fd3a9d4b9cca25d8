//! The response simulator: a local stand-in for a real generation
//! backend.
//!
//! Replies are drawn uniformly from a fixed canned corpus; the user's
//! message is accepted as input but ignored by the selection policy, which
//! is an explicit placeholder choice rather than an oversight.  The
//! thinking delay is uniform in [2000, 4000) ms.  Both draws go through a
//! seedable RNG so tests can pin content and timing.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use causerie_shared::constants::{REPLY_DELAY_MAX_MS, REPLY_DELAY_MIN_MS};

/// The canned reply corpus.
pub const CANNED_REPLIES: [&str; 6] = [
    "That's an interesting question! Let me think about that...",
    "I understand what you're asking. Here's my perspective...",
    "Thanks for sharing that with me. I'd love to help you with...",
    "That's a great point! I think we should consider...",
    "I'm here to help you with that. Based on what you've told me...",
    "Let me provide you with some insights on that topic...",
];

pub struct ResponseSimulator {
    rng: StdRng,
}

impl ResponseSimulator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A simulator with a fixed seed, for deterministic tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Select a reply for the given user message.
    pub fn pick_reply(&mut self, _user_content: &str) -> String {
        let idx = self.rng.gen_range(0..CANNED_REPLIES.len());
        CANNED_REPLIES[idx].to_string()
    }

    /// Sample the simulated thinking delay.
    pub fn thinking_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(REPLY_DELAY_MIN_MS..REPLY_DELAY_MAX_MS))
    }
}

impl Default for ResponseSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replies_come_from_corpus() {
        let mut sim = ResponseSimulator::seeded(7);
        for _ in 0..100 {
            let reply = sim.pick_reply("does the content matter?");
            assert!(CANNED_REPLIES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_delay_stays_in_range() {
        let mut sim = ResponseSimulator::seeded(7);
        for _ in 0..1000 {
            let delay = sim.thinking_delay();
            assert!(delay >= Duration::from_millis(REPLY_DELAY_MIN_MS));
            assert!(delay < Duration::from_millis(REPLY_DELAY_MAX_MS));
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = ResponseSimulator::seeded(42);
        let mut b = ResponseSimulator::seeded(42);

        for _ in 0..20 {
            assert_eq!(a.pick_reply("x"), b.pick_reply("x"));
            assert_eq!(a.thinking_delay(), b.thinking_delay());
        }
    }
}
