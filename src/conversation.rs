//! Conversation record data model
//!
//! A stored conversation is a title, an identifier, a creation timestamp
//! and an ordered message list. Assistant messages optionally carry the
//! council material: `stage1` (the independent member responses) and
//! `stage3` (the synthesized final resolution). Message order is
//! chronological and preserved as stored.
//!
//! Every optional field deserializes to a defined default; nothing in this
//! module fails on an absent field.

use serde::{Deserialize, Deserializer};

/// Root input for one render invocation. Read-only once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A single turn in the conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub stage1: Option<Vec<MemberResponse>>,
    #[serde(default)]
    pub stage3: Option<FinalResponse>,
}

/// Message roles. Anything outside user/assistant is inert, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    #[default]
    #[serde(other)]
    Other,
}

/// One council member's independent answer.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub response: String,
}

/// The synthesized final resolution.
///
/// On the wire this is either `{model, response}` or a bare string; the
/// shapes are normalized here, at load time, so no downstream code branches
/// on them again. A bare string carries no model attribution.
#[derive(Debug, Clone)]
pub struct FinalResponse {
    pub model: Option<String>,
    pub response: String,
}

impl<'de> Deserialize<'de> for FinalResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Structured {
                #[serde(default)]
                model: Option<String>,
                #[serde(default)]
                response: String,
            },
            Freeform(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Structured { model, response } => FinalResponse { model, response },
            Wire::Freeform(text) => FinalResponse {
                model: None,
                response: text,
            },
        })
    }
}

impl Message {
    /// The final resolution carried by this message, if it has substance.
    /// An empty unattributed `stage3` counts as absent.
    pub fn final_response(&self) -> Option<&FinalResponse> {
        self.stage3
            .as_ref()
            .filter(|f| f.model.is_some() || !f.response.is_empty())
    }
}

impl ConversationRecord {
    /// All user messages, original order preserved.
    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role == Role::User)
    }

    /// All assistant messages, original order preserved.
    pub fn assistant_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role == Role::Assistant)
    }

    /// Every member response across all assistant messages, in message
    /// order then in-message order. No reordering, no deduplication.
    pub fn member_responses(&self) -> impl Iterator<Item = &MemberResponse> {
        self.assistant_messages()
            .flat_map(|m| m.stage1.as_deref().unwrap_or(&[]))
    }

    /// Every non-empty final resolution across all assistant messages, in
    /// message order. The layout policy decides whether all of them or
    /// only the first one renders.
    pub fn final_responses(&self) -> impl Iterator<Item = &FinalResponse> {
        self.assistant_messages().filter_map(|m| m.final_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> ConversationRecord {
        serde_json::from_value(json).expect("record should deserialize")
    }

    #[test]
    fn partitions_messages_by_role_preserving_order() {
        let rec = record(serde_json::json!({
            "id": "c1",
            "messages": [
                {"role": "user", "content": "first"},
                {"role": "assistant", "content": ""},
                {"role": "user", "content": "second"},
                {"role": "system", "content": "ignored"},
            ]
        }));
        let users: Vec<&str> = rec.user_messages().map(|m| m.content.as_str()).collect();
        assert_eq!(users, ["first", "second"]);
        assert_eq!(rec.assistant_messages().count(), 1);
    }

    #[test]
    fn unknown_role_is_inert() {
        let rec = record(serde_json::json!({
            "messages": [{"role": "moderator", "content": "x"}]
        }));
        assert_eq!(rec.messages[0].role, Role::Other);
        assert_eq!(rec.user_messages().count(), 0);
    }

    #[test]
    fn member_responses_concatenate_in_order() {
        let rec = record(serde_json::json!({
            "messages": [
                {"role": "assistant", "stage1": [
                    {"model": "a/one", "response": "r1"},
                    {"model": "b/two", "response": "r2"},
                ]},
                {"role": "assistant"},
                {"role": "assistant", "stage1": [
                    {"model": "c/three", "response": "r3"},
                ]},
            ]
        }));
        let responses: Vec<&str> = rec
            .member_responses()
            .map(|m| m.response.as_str())
            .collect();
        assert_eq!(responses, ["r1", "r2", "r3"]);
    }

    #[test]
    fn structured_stage3_keeps_attribution() {
        let rec = record(serde_json::json!({
            "messages": [
                {"role": "assistant", "stage3": {"model": "acme/gpt-x", "response": "done"}}
            ]
        }));
        let finals: Vec<&FinalResponse> = rec.final_responses().collect();
        assert_eq!(finals.len(), 1);
        assert_eq!(finals[0].model.as_deref(), Some("acme/gpt-x"));
        assert_eq!(finals[0].response, "done");
    }

    #[test]
    fn bare_string_stage3_has_no_attribution() {
        let rec = record(serde_json::json!({
            "messages": [
                {"role": "assistant", "stage3": "No consensus reached"}
            ]
        }));
        let finals: Vec<&FinalResponse> = rec.final_responses().collect();
        assert_eq!(finals.len(), 1);
        assert!(finals[0].model.is_none());
        assert_eq!(finals[0].response, "No consensus reached");
    }

    #[test]
    fn empty_stage3_counts_as_absent() {
        let rec = record(serde_json::json!({
            "messages": [
                {"role": "assistant", "stage3": ""},
                {"role": "assistant"},
            ]
        }));
        assert_eq!(rec.final_responses().count(), 0);
    }

    #[test]
    fn missing_fields_resolve_to_defaults() {
        let rec = record(serde_json::json!({"messages": [{}]}));
        assert_eq!(rec.id, "");
        assert!(rec.title.is_none());
        assert_eq!(rec.created_at, "");
        assert_eq!(rec.messages[0].role, Role::Other);
        assert!(rec.messages[0].stage1.is_none());
    }
}
