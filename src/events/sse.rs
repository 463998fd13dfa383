use chrono::Utc;
use serde_json::json;

use super::LotteryEvent;

/// Encode one Server-Sent-Events frame.
pub fn frame(label: &str, data: &serde_json::Value) -> String {
    format!("event: {label}\ndata: {data}\n\n")
}

/// Frame for a lottery event, labeled by its kind.
pub fn event_frame(event: &LotteryEvent) -> String {
    frame(event.label(), &event.payload())
}

/// Initial acknowledgement sent on connect.
pub fn connected_frame() -> String {
    frame("connected", &json!({ "timestamp": Utc::now() }))
}

/// Periodic keep-alive to defeat idle-timeout disconnects.
pub fn heartbeat_frame() -> String {
    frame("heartbeat", &json!({ "timestamp": Utc::now() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NewTicketPayload;

    #[test]
    fn test_frame_format() {
        let encoded = frame("heartbeat", &json!({ "ok": true }));
        assert_eq!(encoded, "event: heartbeat\ndata: {\"ok\":true}\n\n");
    }

    #[test]
    fn test_event_frame_uses_kind_label() {
        let event = LotteryEvent::NewTicket(NewTicketPayload {
            bet_id: 5,
            bettor_id: "bob".to_string(),
            chosen_number: 11,
            beneficiary_id: 2,
            timestamp: Utc::now(),
        });
        let encoded = event_frame(&event);
        assert!(encoded.starts_with("event: new-ticket\ndata: "));
        assert!(encoded.ends_with("\n\n"));
        assert!(encoded.contains("\"bet_id\":5"));
    }

    #[test]
    fn test_connected_and_heartbeat_frames_carry_timestamp() {
        assert!(connected_frame().starts_with("event: connected\n"));
        assert!(heartbeat_frame().contains("timestamp"));
    }
}
