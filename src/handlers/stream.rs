use crate::config::Config;
use crate::events::{EventBroadcaster, LotteryEvent, sse};
use actix_web::{HttpResponse, web};
use futures_util::stream;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{Instant, Interval, interval_at};

struct StreamState {
    rx: broadcast::Receiver<LotteryEvent>,
    heartbeat: Interval,
    greeted: bool,
}

#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "Server-Sent-Events stream of lottery lifecycle \
            events: connected, draw-started, numbers-drawn, ticket-result, \
            draw-completed, new-ticket, heartbeat")
    )
)]
/// Long-lived push channel. Sends a `connected` acknowledgement, then relays
/// every broadcast event as a labeled SSE frame, with a periodic `heartbeat`
/// to survive idle timeouts. The stream owns its broadcast receiver and
/// heartbeat timer, so client disconnects or write failures release both by
/// drop; nothing leaks across connections. Each connection only sees events
/// published after it subscribed.
pub async fn events(
    broadcaster: web::Data<EventBroadcaster>,
    config: web::Data<Config>,
) -> HttpResponse {
    let period = Duration::from_secs(config.stream.heartbeat_secs.max(1));
    let state = StreamState {
        rx: broadcaster.subscribe(),
        // First tick delayed one full period, the connected frame covers t=0
        heartbeat: interval_at(Instant::now() + period, period),
        greeted: false,
    };

    log::debug!(
        "SSE subscriber connected ({} active)",
        broadcaster.subscriber_count()
    );

    let event_stream = stream::unfold(state, |mut state| async move {
        if !state.greeted {
            state.greeted = true;
            return Some((
                Ok::<_, actix_web::Error>(web::Bytes::from(sse::connected_frame())),
                state,
            ));
        }
        loop {
            tokio::select! {
                _ = state.heartbeat.tick() => {
                    return Some((Ok(web::Bytes::from(sse::heartbeat_frame())), state));
                }
                received = state.rx.recv() => match received {
                    Ok(event) => {
                        return Some((
                            Ok(web::Bytes::from(sse::event_frame(&event))),
                            state,
                        ));
                    }
                    Err(RecvError::Lagged(missed)) => {
                        // Slow consumer: skip what was lost and keep going,
                        // the status endpoint is the durability fallback
                        log::warn!("SSE subscriber lagged, skipped {missed} events");
                        continue;
                    }
                    Err(RecvError::Closed) => return None,
                },
            }
        }
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(event_stream)
}

pub fn stream_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::get().to(events));
}
