use serde::Deserialize;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Reply from the remote assistant. `manualPage`, when present, points at the
/// owner's manual page backing the answer.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(rename = "manualPage", default)]
    pub manual_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ExplanationReply {
    response: String,
}

fn api_url(endpoint: &str, path: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), path)
}

/// POST the user message to `<endpoint>/api/chat`. Blocking; run on a worker
/// thread. Non-success statuses surface as errors, there is no retry.
pub fn send_chat(endpoint: &str, message: &str, timeout: Duration) -> Result<ChatReply, String> {
    let agent = ureq::AgentBuilder::new().timeout(timeout).build();
    let response = agent
        .post(&api_url(endpoint, "api/chat"))
        .set("Content-Type", "application/json")
        .send_json(serde_json::json!({ "message": message }))
        .map_err(|e| format!("chat request failed: {}", e))?;
    response
        .into_json::<ChatReply>()
        .map_err(|e| format!("chat response was not valid JSON: {}", e))
}

/// GET `<endpoint>/api/explanation` for the last submitted crop.
pub fn fetch_explanation(endpoint: &str, timeout: Duration) -> Result<String, String> {
    let agent = ureq::AgentBuilder::new().timeout(timeout).build();
    let response = agent
        .get(&api_url(endpoint, "api/explanation"))
        .call()
        .map_err(|e| format!("explanation request failed: {}", e))?;
    response
        .into_json::<ExplanationReply>()
        .map(|r| r.response)
        .map_err(|e| format!("explanation response was not valid JSON: {}", e))
}

/// Fire the chat request on a background thread; the UI polls the receiver
/// once per frame so the event loop never blocks on the network.
pub fn request_chat(
    endpoint: String,
    message: String,
    timeout: Duration,
) -> Receiver<Result<ChatReply, String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = send_chat(&endpoint, &message, timeout);
        if let Err(ref e) = result {
            log::warn!("{}", e);
        }
        let _ = tx.send(result);
    });
    rx
}

pub fn request_explanation(endpoint: String, timeout: Duration) -> Receiver<Result<String, String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = fetch_explanation(&endpoint, timeout);
        if let Err(ref e) = result {
            log::warn!("{}", e);
        }
        let _ = tx.send(result);
    });
    rx
}

/// Canned demo answers keyed by a keyword found in the user message
const FALLBACK_RESPONSES: [(&str, &str, Option<u32>); 9] = [
    (
        "hello",
        "Hello! How can I help you with your vehicle today?",
        None,
    ),
    (
        "charging",
        "The fast-charging system supports up to 135 kW, taking the battery from 5% to 80% in roughly 30 minutes at a suitable station.",
        Some(42),
    ),
    (
        "maintenance",
        "Scheduled maintenance is recommended every 30,000 km or once a year. You can book an appointment at any official service partner.",
        Some(78),
    ),
    (
        "steering wheel",
        "The multifunction steering wheel integrates controls for infotainment, driver assistance and drive mode selection.",
        Some(23),
    ),
    (
        "driving modes",
        "Several driving modes are available: Comfort, Sport, Performance and Individual. Each adjusts throttle response, steering and adaptive suspension.",
        Some(51),
    ),
    (
        "consumption",
        "Combined consumption is 18-19 kWh/100km under the WLTP cycle, for a range of up to 520 km on a single charge.",
        Some(65),
    ),
    (
        "battery",
        "The 77 kWh battery pack uses an advanced thermal management system to protect performance and longevity.",
        Some(38),
    ),
    (
        "warranty",
        "The vehicle warranty covers 3 years or 100,000 km, with a separate battery warranty of 8 years or 160,000 km when scheduled maintenance is kept up.",
        Some(112),
    ),
    (
        "manual",
        "You can browse the full owner's manual from the button below. Is there a specific section you are interested in?",
        Some(1),
    ),
];

/// Parse a "page N" request out of the message, if any
fn requested_page(lower: &str) -> Option<(u32, String)> {
    let mut words = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .peekable();
    while let Some(word) = words.next() {
        let number = if word == "page" || word == "pg" {
            words.peek().and_then(|w| w.parse::<u32>().ok())
        } else {
            // Also accept the glued form "page42"
            word.strip_prefix("page").and_then(|n| n.parse::<u32>().ok())
        };
        if let Some(n) = number {
            return Some((n, n.to_string()));
        }
    }
    None
}

/// Local stand-in used when the chat endpoint is unreachable, so the
/// interaction degrades gracefully instead of stalling.
pub fn fallback_reply(message: &str, total_pages: u32) -> ChatReply {
    let lower = message.to_lowercase();

    // A direct page request takes priority over keyword matching
    if let Some((page, raw)) = requested_page(&lower) {
        if page >= 1 && page <= total_pages {
            return ChatReply {
                response: format!(
                    "Here is page {} of the owner's manual. Click the button below to open it.",
                    page
                ),
                manual_page: Some(page),
            };
        }
        return ChatReply {
            response: format!(
                "Sorry, page {} is not valid. The manual has {} pages in total.",
                raw, total_pages
            ),
            manual_page: Some(1),
        };
    }

    for (keyword, text, page) in FALLBACK_RESPONSES {
        if lower.contains(keyword) {
            return ChatReply {
                response: text.to_string(),
                manual_page: page,
            };
        }
    }

    if lower.contains("instructions") || lower.contains("guide") {
        return ChatReply {
            response: "You can browse the full owner's manual from the button below. Is there a specific section you are interested in?".to_string(),
            manual_page: Some(1),
        };
    }

    ChatReply {
        response: "Sorry, I don't have specific information about that. Can I help you with anything else about your vehicle?".to_string(),
        manual_page: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_deserializes_with_and_without_page() {
        let with: ChatReply =
            serde_json::from_str(r#"{"response":"see the manual","manualPage":42}"#).unwrap();
        assert_eq!(with.manual_page, Some(42));

        let without: ChatReply = serde_json::from_str(r#"{"response":"hi"}"#).unwrap();
        assert!(without.manual_page.is_none());
    }

    #[test]
    fn test_fallback_keyword_match() {
        let reply = fallback_reply("tell me about the battery please", 400);
        assert_eq!(reply.manual_page, Some(38));
        assert!(reply.response.contains("77 kWh"));
    }

    #[test]
    fn test_fallback_page_request_valid() {
        let reply = fallback_reply("show me page 57 of the manual", 400);
        assert_eq!(reply.manual_page, Some(57));
    }

    #[test]
    fn test_fallback_page_request_out_of_range() {
        let reply = fallback_reply("open page 9999", 400);
        assert_eq!(reply.manual_page, Some(1));
        assert!(reply.response.contains("400"));
    }

    #[test]
    fn test_fallback_default_reply() {
        let reply = fallback_reply("what's the weather like", 400);
        assert!(reply.manual_page.is_none());
    }

    #[test]
    fn test_api_url_joins_cleanly() {
        assert_eq!(
            api_url("http://localhost:8000/", "api/chat"),
            "http://localhost:8000/api/chat"
        );
        assert_eq!(
            api_url("http://localhost:8000", "api/chat"),
            "http://localhost:8000/api/chat"
        );
    }
}
