//! History Window Manager: bounds the conversation sent with each interviewer prompt.
//!
//! Keeps only the most recent utterances. Early context is deliberately dropped to cap
//! prompt size; the full transcript still reaches the grader at the end.

use crate::models::transcript::Utterance;

/// Utterances kept per prompt (three user/assistant exchanges).
pub const DEFAULT_MAX_TURNS: usize = 6;

/// Returns the last `max_turns` utterances in original order, or the whole history if shorter.
pub fn window(history: &[Utterance], max_turns: usize) -> &[Utterance] {
    if history.len() > max_turns {
        &history[history.len() - max_turns..]
    } else {
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<Utterance> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Utterance::assistant(format!("q{i}"))
                } else {
                    Utterance::user(format!("a{i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_short_history_is_unchanged() {
        for n in 0..=DEFAULT_MAX_TURNS {
            let history = numbered(n);
            assert_eq!(window(&history, DEFAULT_MAX_TURNS), history.as_slice());
        }
    }

    #[test]
    fn test_long_history_keeps_last_entries_in_order() {
        let history = numbered(9);
        let windowed = window(&history, DEFAULT_MAX_TURNS);
        assert_eq!(windowed.len(), 6);
        assert_eq!(windowed, &history[3..]);
        assert_eq!(windowed[0].content, "a3");
        assert_eq!(windowed[5].content, "q8");
    }

    #[test]
    fn test_zero_window_drops_everything() {
        let history = numbered(3);
        assert!(window(&history, 0).is_empty());
    }
}
