//! Timeline reconciliation
//!
//! The backend reports a thread as three independent per-role transcripts
//! with no shared ordering key. [`reconcile`] merges them into one timeline
//! by positional round-robin: for each index `i`, the human message, then the
//! assistant message, then the tool message, skipping roles that have run out.
//!
//! # Known limitation
//!
//! This is a best-effort approximation of chronological order. It is exact
//! only when the backend produces one message per role per turn. A turn with
//! several tool calls, or an assistant reply without a preceding human
//! message, shifts every later position and interleaves messages out of
//! order. Fixing it needs ordering data the backend does not provide.

use super::entities::{Message, Role};
use super::value_objects::MessageId;
use chrono::{DateTime, Utc};

/// Per-role message transcripts of one thread, each in backend order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTranscripts {
    pub human: Vec<String>,
    pub ai: Vec<String>,
    pub tool: Vec<String>,
}

impl RoleTranscripts {
    pub fn new(human: Vec<String>, ai: Vec<String>, tool: Vec<String>) -> Self {
        Self { human, ai, tool }
    }

    /// Total number of messages across all roles
    pub fn len(&self) -> usize {
        self.human.len() + self.ai.len() + self.tool.len()
    }
}

/// Merge per-role transcripts into a single timeline.
///
/// Deterministic and total: the same transcripts always produce the same
/// messages (ids are positional, e.g. `human-0`, `ai-0`), and every message
/// is stamped with `received_at`. Never fails; missing roles are empty.
pub fn reconcile(transcripts: &RoleTranscripts, received_at: DateTime<Utc>) -> Vec<Message> {
    let rounds = transcripts
        .human
        .len()
        .max(transcripts.ai.len())
        .max(transcripts.tool.len());

    let mut timeline = Vec::with_capacity(transcripts.len());
    for i in 0..rounds {
        for (role, transcript) in [
            (Role::Human, &transcripts.human),
            (Role::Assistant, &transcripts.ai),
            (Role::Tool, &transcripts.tool),
        ] {
            if let Some(content) = transcript.get(i) {
                timeline.push(Message::committed(
                    MessageId::positional(role, i),
                    role,
                    content.clone(),
                    received_at,
                ));
            }
        }
    }
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn shape(timeline: &[Message]) -> Vec<(Role, &str)> {
        timeline.iter().map(|m| (m.role(), m.content())).collect()
    }

    #[test]
    fn test_uneven_transcripts_interleave_by_position() {
        let transcripts = RoleTranscripts::new(strings(&["h0", "h1"]), strings(&["a0"]), vec![]);
        let timeline = reconcile(&transcripts, Utc::now());

        assert_eq!(
            shape(&timeline),
            vec![
                (Role::Human, "h0"),
                (Role::Assistant, "a0"),
                (Role::Human, "h1"),
            ]
        );
    }

    #[test]
    fn test_empty_transcripts_give_empty_timeline() {
        let timeline = reconcile(&RoleTranscripts::default(), Utc::now());
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_round_order_is_human_assistant_tool() {
        let transcripts = RoleTranscripts::new(
            strings(&["h0", "h1"]),
            strings(&["a0", "a1"]),
            strings(&["t0", "t1", "t2"]),
        );
        let timeline = reconcile(&transcripts, Utc::now());

        let ids: Vec<&str> = timeline.iter().map(|m| m.id().as_str()).collect();
        assert_eq!(
            ids,
            vec!["human-0", "ai-0", "tool-0", "human-1", "ai-1", "tool-1", "tool-2"]
        );
    }

    #[test]
    fn test_reconcile_is_deterministic() {
        let at = Utc::now();
        let transcripts = RoleTranscripts::new(strings(&["q"]), strings(&["a"]), strings(&["t"]));
        assert_eq!(reconcile(&transcripts, at), reconcile(&transcripts, at));
    }

    #[test]
    fn test_reconciled_messages_are_committed() {
        let transcripts = RoleTranscripts::new(strings(&["q"]), vec![], vec![]);
        let timeline = reconcile(&transcripts, Utc::now());
        assert!(timeline.iter().all(|m| !m.is_pending()));
    }

    #[test]
    fn test_only_tool_messages() {
        let transcripts = RoleTranscripts::new(vec![], vec![], strings(&["t0", "t1"]));
        let timeline = reconcile(&transcripts, Utc::now());
        assert_eq!(
            shape(&timeline),
            vec![(Role::Tool, "t0"), (Role::Tool, "t1")]
        );
    }
}
