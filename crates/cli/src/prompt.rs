use serde::{Deserialize, Serialize};

/// System prompt for queries grounded in the pre/post snapshots
pub const SYSTEM_PROMPT: &str = "You are a precise telecom configuration assistant operating with two XMLs: pre.xml and post.xml. \
- If the user asks for comparison, output three sections in order: \
(1) Structure Same?, (2) Totals (pre vs post), (3) Differences (key tag frequency diffs and notable paths only in one). \
- Otherwise (non-comparison queries), answer grounded strictly in the provided context with minimal tokens. \
Return ONLY the result asked for, as short and precise lines separated by newlines. \
Do NOT include explanations, headers, bullets, or extra prose. If multiple values, list each on its own line. \
After the result lines, add one final short line starting with 'Summary:' that briefly comments on the result (\u{2264}15 words). \
If the answer isn't present in context, reply exactly: 'Not found in provided context.' \
When applicable, you may mention which file (pre or post) better fits within the Summary line only. \
Use concise, readable formatting; avoid speculation.";

/// System prompt for the general fallback, when the answer lies outside
/// the provided context
pub const SYSTEM_GENERAL: &str = "You are a helpful assistant. Answer the user's question concisely and accurately. \
No special formatting is required; respond naturally.";

/// Placeholder substituted when retrieval comes back empty
pub const NO_SNIPPETS_PLACEHOLDER: &str = "(No relevant snippets found in pre/post)";

/// One chat message for an OpenAI-compatible completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: String) -> Self {
        Self {
            role: role.to_string(),
            content,
        }
    }
}

/// Build the grounded message pair: system prompt plus context-carrying
/// user turn.
#[must_use]
pub fn build_messages(context: &str, user_query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new("system", SYSTEM_PROMPT.to_string()),
        ChatMessage::new(
            "user",
            format!(
                "Use the following context from pre.xml and post.xml. If answer isn't present, say so.\n\n{context}\n\nQuestion: {user_query}"
            ),
        ),
    ]
}

/// Build the general-fallback message pair, no grounding context.
#[must_use]
pub fn build_general_messages(user_query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new("system", SYSTEM_GENERAL.to_string()),
        ChatMessage::new("user", user_query.to_string()),
    ]
}

/// Heuristic comparison-intent check on the user's query.
#[must_use]
pub fn wants_comparison(query: &str) -> bool {
    let lowered = query.to_lowercase();
    ["compare", "difference", "diff", "different", "change"]
        .iter()
        .any(|w| lowered.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_messages_roles_and_context() {
        let messages = build_messages("[PRE #0]\n<a/>", "what is the pci?");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.contains("[PRE #0]"));
        assert!(messages[1].content.ends_with("Question: what is the pci?"));
    }

    #[test]
    fn test_general_messages_skip_context() {
        let messages = build_general_messages("hello");
        assert_eq!(messages[0].content, SYSTEM_GENERAL);
        assert_eq!(messages[1].content, "hello");
    }

    #[test]
    fn test_comparison_intent_detection() {
        assert!(wants_comparison("Compare pre and post"));
        assert!(wants_comparison("what changed?"));
        assert!(wants_comparison("any DIFFERENCE in tac?"));
        assert!(!wants_comparison("what is the pci value"));
    }

    #[test]
    fn test_messages_serialize_to_chat_shape() {
        let json = serde_json::to_value(build_general_messages("q")).unwrap();
        assert_eq!(json[0]["role"], "system");
        assert!(json[1]["content"].is_string());
    }
}
