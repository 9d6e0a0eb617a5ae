use std::time::Duration;

use tokio::sync::watch;

use crate::db;
use crate::state::SharedState;

/// Billing sweeper: periodically flips past-due PENDING charges to
/// OVERDUE and emails reminders for charges approaching their due date.
/// Runs until shutdown is signaled.
pub async fn run_billing_sweeper(
    state: SharedState,
    mut shutdown: watch::Receiver<bool>,
    interval_secs: u64,
) {
    tracing::info!("Billing sweeper started (every {interval_secs}s)");

    loop {
        if *shutdown.borrow() {
            break;
        }

        if let Err(e) = sweep(&state).await {
            tracing::error!("Billing sweep failed: {e}");
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval_secs)) => {}
            _ = shutdown.changed() => {}
        }
    }

    tracing::info!("Billing sweeper stopped");
}

async fn sweep(state: &SharedState) -> Result<(), String> {
    let flipped = db::charges::mark_overdue(&state.pool)
        .await
        .map_err(|e| format!("Failed to mark overdue charges: {e}"))?;
    if flipped > 0 {
        tracing::info!("Marked {flipped} charge(s) overdue");
    }

    // Reminders need a mailer; the overdue sweep above runs regardless.
    let Some(mailer) = state.system_mailer.clone() else {
        return Ok(());
    };

    let due = db::charges::list_due_within(&state.pool, state.config.reminder_window_days)
        .await
        .map_err(|e| format!("Failed to list upcoming charges: {e}"))?;

    for charge in due {
        let member = match db::members::find_by_id(&state.pool, charge.member_id).await {
            Ok(Some(member)) => member,
            Ok(None) => continue,
            Err(e) => {
                tracing::error!("Failed to load member for reminder: {e}");
                continue;
            }
        };

        if let Err(e) = mailer
            .send_charge_reminder(&member.email, &member.name, &charge)
            .await
        {
            tracing::error!("Failed to send reminder for charge {}: {e}", charge.id);
        }
    }

    Ok(())
}
