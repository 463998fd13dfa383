//! Lottery lifecycle events.
//!
//! A closed vocabulary of event kinds flows from the bet/draw services to the
//! SSE stream gateway. Each variant carries a typed payload so consumers
//! handle every case at compile time instead of inspecting loose JSON.

pub mod broadcaster;
pub mod sse;

pub use broadcaster::EventBroadcaster;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

/// A draw has been triggered and settlement is underway.
#[derive(Debug, Clone, Serialize)]
pub struct DrawStartedPayload {
    pub draw_id: String,
    pub participant_count: u64,
    pub estimated_duration_secs: u64,
    pub timestamp: DateTime<Utc>,
}

/// The winning number has been fixed.
#[derive(Debug, Clone, Serialize)]
pub struct NumbersDrawnPayload {
    pub draw_id: String,
    pub winning_number: i32,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a single winning ticket.
#[derive(Debug, Clone, Serialize)]
pub struct TicketResultPayload {
    pub draw_id: String,
    pub bet_id: i64,
    pub bettor_id: String,
    pub winning_number: i32,
    pub is_winner: bool,
    pub prize_amount: i64,
    pub timestamp: DateTime<Utc>,
}

/// Settlement finished; all pending bets in the batch are resolved.
#[derive(Debug, Clone, Serialize)]
pub struct DrawCompletedPayload {
    pub draw_id: String,
    pub winning_number: i32,
    pub winner_count: u64,
    pub participant_count: u64,
    pub timestamp: DateTime<Utc>,
}

/// A new pending bet entered the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct NewTicketPayload {
    pub bet_id: i64,
    pub bettor_id: String,
    pub chosen_number: i32,
    pub beneficiary_id: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum LotteryEvent {
    DrawStarted(DrawStartedPayload),
    NumbersDrawn(NumbersDrawnPayload),
    TicketResult(TicketResultPayload),
    DrawCompleted(DrawCompletedPayload),
    NewTicket(NewTicketPayload),
}

impl LotteryEvent {
    /// SSE event label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            LotteryEvent::DrawStarted(_) => "draw-started",
            LotteryEvent::NumbersDrawn(_) => "numbers-drawn",
            LotteryEvent::TicketResult(_) => "ticket-result",
            LotteryEvent::DrawCompleted(_) => "draw-completed",
            LotteryEvent::NewTicket(_) => "new-ticket",
        }
    }

    /// Flat JSON payload as delivered on the wire.
    pub fn payload(&self) -> serde_json::Value {
        let value = match self {
            LotteryEvent::DrawStarted(p) => serde_json::to_value(p),
            LotteryEvent::NumbersDrawn(p) => serde_json::to_value(p),
            LotteryEvent::TicketResult(p) => serde_json::to_value(p),
            LotteryEvent::DrawCompleted(p) => serde_json::to_value(p),
            LotteryEvent::NewTicket(p) => serde_json::to_value(p),
        };
        value.unwrap_or_else(|_| json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_labels() {
        let now = Utc::now();
        let event = LotteryEvent::DrawStarted(DrawStartedPayload {
            draw_id: "d1".to_string(),
            participant_count: 3,
            estimated_duration_secs: 10,
            timestamp: now,
        });
        assert_eq!(event.label(), "draw-started");

        let event = LotteryEvent::NewTicket(NewTicketPayload {
            bet_id: 1,
            bettor_id: "alice".to_string(),
            chosen_number: 7,
            beneficiary_id: 1,
            timestamp: now,
        });
        assert_eq!(event.label(), "new-ticket");
    }

    #[test]
    fn test_payload_is_flat_with_timestamp() {
        let event = LotteryEvent::NumbersDrawn(NumbersDrawnPayload {
            draw_id: "d1".to_string(),
            winning_number: 42,
            timestamp: Utc::now(),
        });
        let payload = event.payload();
        assert_eq!(payload["draw_id"], "d1");
        assert_eq!(payload["winning_number"], 42);
        // chrono serializes DateTime<Utc> as an ISO-8601 string
        assert!(payload["timestamp"].is_string());
    }
}
