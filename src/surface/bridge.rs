//! Message bridge between the embedded document and its coordinator.
//!
//! Inbound, the page posts on two named channels: `sizeChangeHandler` with
//! the measured body height as a number, and `renderedContentHandler` with
//! the rendered HTML as base64. Engines without named handlers post a JSON
//! envelope `{"channel": ..., "body": ...}` instead.
//!
//! Outbound there is a single operation: calling the page's update entry
//! point with base64-encoded markdown. Base64 keeps arbitrary text safe
//! inside the template literal of the evaluated script.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Page-side function that renders a new markdown payload.
pub const UPDATE_ENTRY_POINT: &str = "window.updateWithMarkdownContentBase64Encoded";

/// Page global consulted by the `window.ipc` transport. A channel is posted
/// only while `window.markdownSurfaceChannels[name] === true`.
pub const IPC_CHANNEL_REGISTRY: &str = "window.markdownSurfaceChannels";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BridgeChannel {
    SizeChange,
    RenderedContent,
}

impl BridgeChannel {
    pub const ALL: [BridgeChannel; 2] = [BridgeChannel::SizeChange, BridgeChannel::RenderedContent];

    /// Handler name the page posts to.
    pub fn name(self) -> &'static str {
        match self {
            BridgeChannel::SizeChange => "sizeChangeHandler",
            BridgeChannel::RenderedContent => "renderedContentHandler",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|channel| channel.name() == name)
    }
}

/// Decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeMessage {
    SizeChanged(f64),
    /// Base64 payload; see [`decode_rendered_payload`].
    RenderedContentReady(String),
}

impl BridgeMessage {
    pub fn channel(&self) -> BridgeChannel {
        match self {
            BridgeMessage::SizeChanged(_) => BridgeChannel::SizeChange,
            BridgeMessage::RenderedContentReady(_) => BridgeChannel::RenderedContent,
        }
    }

    /// Decode a message delivered through a named handler.
    pub fn decode(channel: &str, body: &Value) -> Result<Self, BridgeError> {
        let channel = BridgeChannel::from_name(channel).ok_or_else(|| BridgeError::UnknownChannel {
            name: channel.to_string(),
        })?;

        match channel {
            BridgeChannel::SizeChange => body
                .as_f64()
                .filter(|height| height.is_finite() && *height >= 0.0)
                .map(BridgeMessage::SizeChanged)
                .ok_or(BridgeError::InvalidBody { channel }),
            BridgeChannel::RenderedContent => body
                .as_str()
                .map(|encoded| BridgeMessage::RenderedContentReady(encoded.to_string()))
                .ok_or(BridgeError::InvalidBody { channel }),
        }
    }

    /// Decode a JSON envelope posted through a single IPC channel.
    pub fn decode_envelope(raw: &str) -> Result<Self, BridgeError> {
        let envelope: Envelope =
            serde_json::from_str(raw).map_err(|err| BridgeError::MalformedEnvelope(err.to_string()))?;
        Self::decode(&envelope.channel, &envelope.body)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    channel: String,
    #[serde(default)]
    body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("unknown bridge channel `{name}`")]
    UnknownChannel { name: String },
    #[error("unexpected message body on `{}`", .channel.name())]
    InvalidBody { channel: BridgeChannel },
    #[error("malformed bridge envelope: {0}")]
    MalformedEnvelope(String),
    #[error("rendered payload is not valid base64")]
    InvalidBase64,
    #[error("rendered payload is not valid UTF-8")]
    NotUtf8,
}

/// Base64 form of `markdown` as sent across the boundary.
pub fn encode_content(markdown: &str) -> String {
    STANDARD.encode(markdown.as_bytes())
}

/// Script that hands `markdown` to the page's renderer.
pub fn content_push_script(markdown: &str) -> String {
    format!("{UPDATE_ENTRY_POINT}(`{}`)", encode_content(markdown))
}

/// Decode a `renderedContentHandler` payload to text.
pub fn decode_rendered_payload(encoded: &str) -> Result<String, BridgeError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|_| BridgeError::InvalidBase64)?;
    String::from_utf8(bytes).map_err(|_| BridgeError::NotUtf8)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn channel_names_match_page_handlers() {
        assert_eq!(
            BridgeChannel::from_name("sizeChangeHandler"),
            Some(BridgeChannel::SizeChange)
        );
        assert_eq!(
            BridgeChannel::from_name("renderedContentHandler"),
            Some(BridgeChannel::RenderedContent)
        );
        assert_eq!(BridgeChannel::from_name("clickHandler"), None);
    }

    #[test]
    fn size_messages_accept_integer_and_float_heights() {
        assert_eq!(
            BridgeMessage::decode("sizeChangeHandler", &json!(120)),
            Ok(BridgeMessage::SizeChanged(120.0))
        );
        assert_eq!(
            BridgeMessage::decode("sizeChangeHandler", &json!(88.5)),
            Ok(BridgeMessage::SizeChanged(88.5))
        );
    }

    #[test]
    fn size_messages_reject_bad_bodies() {
        for body in [json!("120"), json!(-1), json!(null)] {
            assert_eq!(
                BridgeMessage::decode("sizeChangeHandler", &body),
                Err(BridgeError::InvalidBody {
                    channel: BridgeChannel::SizeChange
                })
            );
        }
    }

    #[test]
    fn envelope_carries_channel_and_body() {
        let message =
            BridgeMessage::decode_envelope(r#"{"channel":"renderedContentHandler","body":"PGgxPg=="}"#)
                .expect("valid envelope");
        assert_eq!(
            message,
            BridgeMessage::RenderedContentReady("PGgxPg==".to_string())
        );
        assert_eq!(message.channel(), BridgeChannel::RenderedContent);

        assert!(matches!(
            BridgeMessage::decode_envelope("not json"),
            Err(BridgeError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn push_script_wraps_base64_in_template_literal() {
        assert_eq!(
            content_push_script("# Hi"),
            "window.updateWithMarkdownContentBase64Encoded(`IyBIaQ==`)"
        );
        assert_eq!(
            content_push_script(""),
            "window.updateWithMarkdownContentBase64Encoded(``)"
        );
    }

    #[test]
    fn hostile_markdown_stays_inside_the_literal() {
        let script = content_push_script("`); alert('x'); (`\n${danger}");
        let payload = script
            .strip_prefix("window.updateWithMarkdownContentBase64Encoded(`")
            .and_then(|rest| rest.strip_suffix("`)"))
            .expect("single template literal");
        assert!(
            payload
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        );
    }

    #[test]
    fn rendered_payload_decodes_unicode() {
        let encoded = encode_content("<p>héllo, 世界</p>");
        assert_eq!(
            decode_rendered_payload(&encoded).as_deref(),
            Ok("<p>héllo, 世界</p>")
        );
    }

    #[test]
    fn rendered_payload_rejects_garbage() {
        assert_eq!(
            decode_rendered_payload("***"),
            Err(BridgeError::InvalidBase64)
        );
        let invalid_utf8 = STANDARD.encode([0xff, 0xfe, 0xfd]);
        assert_eq!(
            decode_rendered_payload(&invalid_utf8),
            Err(BridgeError::NotUtf8)
        );
    }
}
