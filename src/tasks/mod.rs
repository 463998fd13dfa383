//! Background scheduled tasks.
//!
//! The only recurring job is the optional automatic draw: when
//! `lottery.auto_draw_interval_secs` is configured, a draw runs on that
//! cadence with no winning-number override. Call `spawn_all` once during
//! startup; it detaches via `tokio::spawn` and does not block.

use crate::models::ExecuteDrawRequest;
use crate::services::DrawService;

pub fn spawn_all(draw_service: DrawService, auto_draw_interval_secs: Option<u64>) {
    let Some(interval_secs) = auto_draw_interval_secs else {
        return;
    };

    tokio::spawn(async move {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(interval_secs)).await;

            log::info!("Scheduled draw starting");
            match draw_service.execute_draw(ExecuteDrawRequest::default()).await {
                Ok(result) => log::info!(
                    "Scheduled draw {} settled: winning_number={} winners={}",
                    result.draw_id,
                    result.winning_number,
                    result.winners.len()
                ),
                // A failed draw is safely re-runnable on the next tick
                Err(e) => log::error!("Scheduled draw failed: {e:?}"),
            }
        }
    });
}
