//! In-flight click message passed from the redirect path to the recorder.

/// Raw click metadata captured in the redirect handler.
///
/// Sent over a bounded channel to the background click recorder, which
/// enriches it (user-agent parsing, geolocation) and persists the result.
/// Decoupling the enrichment from the handler keeps external-service
/// latency off the redirect path entirely.
///
/// Metadata fields are optional: a missing User-Agent header or an
/// unextractable peer address degrade to "unknown" labels downstream,
/// never to an error.
#[derive(Debug, Clone)]
pub struct ClickMessage {
    pub code: String,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

impl ClickMessage {
    pub fn new(code: String, user_agent: Option<&str>, ip: Option<String>) -> Self {
        Self {
            code,
            user_agent: user_agent.map(|s| s.to_string()),
            ip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_message_full() {
        let msg = ClickMessage::new(
            "aB3xY9".to_string(),
            Some("Mozilla/5.0"),
            Some("203.0.113.7".to_string()),
        );

        assert_eq!(msg.code, "aB3xY9");
        assert_eq!(msg.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(msg.ip.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_click_message_minimal() {
        let msg = ClickMessage::new("xyz".to_string(), None, None);

        assert!(msg.user_agent.is_none());
        assert!(msg.ip.is_none());
    }
}
