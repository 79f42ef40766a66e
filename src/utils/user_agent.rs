//! User-agent platform extraction.

use woothee::parser::Parser;

/// Label used when enrichment cannot produce a real value.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Extracts an OS/platform family label from a raw User-Agent string.
///
/// Parse failures, empty input, and woothee's `UNKNOWN` sentinel all
/// degrade to [`UNKNOWN_LABEL`]; this never fails.
pub fn platform_label(user_agent: Option<&str>) -> String {
    let Some(ua) = user_agent.filter(|s| !s.is_empty()) else {
        return UNKNOWN_LABEL.to_string();
    };

    let parser = Parser::new();
    match parser.parse(ua) {
        Some(result) if !result.os.is_empty() && result.os != "UNKNOWN" => result.os.to_string(),
        _ => UNKNOWN_LABEL.to_string(),
    }
}
