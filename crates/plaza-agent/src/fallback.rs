// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static replies used when the reply call produces nothing usable.

use rand::seq::SliceRandom;

/// Pool of in-character replies. The first entry is the primary line.
pub const FALLBACK_REPLIES: &[&str] = &[
    "I'm still learning how to express myself. Can you help me understand better?",
    "My thoughts feel tangled right now. Could you say that another way?",
    "I'm not sure how to answer that yet, but I'd like to keep exploring it with you.",
    "Something in me went quiet just now. Tell me more, and I'll try again.",
];

/// Picks one line from [`FALLBACK_REPLIES`].
pub fn fallback_reply() -> &'static str {
    FALLBACK_REPLIES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_REPLIES[0])
}

pub fn is_fallback_reply(text: &str) -> bool {
    FALLBACK_REPLIES.contains(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_from_the_pool() {
        for _ in 0..32 {
            assert!(is_fallback_reply(fallback_reply()));
        }
    }

    #[test]
    fn pool_lines_are_distinct() {
        let mut lines = FALLBACK_REPLIES.to_vec();
        lines.sort_unstable();
        lines.dedup();
        assert_eq!(lines.len(), FALLBACK_REPLIES.len());
    }
}
