// Background work for Wayfarer: the confirmation-email dispatcher and
// process-level plumbing shared by the binary.
use crate::error::ApiError;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use eyre::Report;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

pub const MAX_SEND_ATTEMPTS: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(10);

/// One confirmation email, queued when a payment verifies as completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub to_email: String,
    pub booking_reference: String,
    pub amount: String,
    pub currency: String,
    pub tx_ref: String,
}

#[async_trait]
pub trait ConfirmationSender: Send + Sync {
    async fn send(&self, job: &PaymentConfirmation) -> Result<(), ApiError>;
}

/// Handle for enqueueing confirmation emails. Enqueueing never blocks and
/// never fails the request that triggered it; delivery failures stay inside
/// the worker.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<PaymentConfirmation>,
}

impl Notifier {
    /// Spawns the dispatcher worker and returns its handle.
    pub fn spawn(sender: Arc<dyn ConfirmationSender>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_dispatcher(rx, sender));
        Self { tx }
    }

    pub fn enqueue(&self, job: PaymentConfirmation) {
        if self.tx.send(job).is_err() {
            error!("notification worker is gone, dropping confirmation email");
        }
    }

    /// A notifier whose jobs land in the returned receiver instead of a
    /// worker. Lets tests assert on what was enqueued.
    pub fn for_testing() -> (Self, UnboundedReceiver<PaymentConfirmation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

pub async fn run_dispatcher(
    mut rx: UnboundedReceiver<PaymentConfirmation>,
    sender: Arc<dyn ConfirmationSender>,
) {
    info!("notification dispatcher started");
    while let Some(job) = rx.recv().await {
        deliver_with_retry(sender.as_ref(), &job).await;
    }
    info!("notification dispatcher stopped");
}

async fn deliver_with_retry(sender: &dyn ConfirmationSender, job: &PaymentConfirmation) {
    for attempt in 1..=MAX_SEND_ATTEMPTS {
        match sender.send(job).await {
            Ok(()) => return,
            Err(e) if attempt < MAX_SEND_ATTEMPTS => {
                warn!(
                    tx_ref = %job.tx_ref,
                    attempt,
                    error = %e,
                    "confirmation email send failed, retrying"
                );
                sleep(RETRY_DELAY).await;
            }
            Err(e) => {
                error!(
                    tx_ref = %job.tx_ref,
                    attempts = MAX_SEND_ATTEMPTS,
                    error = %e,
                    "confirmation email dropped after exhausting retries"
                );
            }
        }
    }
}

pub fn db_connection() -> Result<Pool<ConnectionManager<PgConnection>>, Report> {
    let db_url = SecretString::new(
        //to prevent accidental logging
        env::var("DATABASE_URL")
            .map_err(|_| eyre::eyre!("DATABASE_URL must be set"))?
            .into(),
    );

    let pool = Pool::builder()
        .max_size(20)
        .connection_timeout(Duration::from_secs(5))
        .idle_timeout(Some(Duration::from_secs(300)))
        .build(ConnectionManager::<PgConnection>::new(db_url.expose_secret()))
        .map_err(|e| {
            error!("Failed to create database pool: {}", e);
            eyre::eyre!("Failed to create database pool: {}", e)
        })?;

    Ok(pool)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakySender {
        attempts: AtomicU32,
        failures_before_success: u32,
    }

    #[async_trait]
    impl ConfirmationSender for FlakySender {
        async fn send(&self, _job: &PaymentConfirmation) -> Result<(), ApiError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt <= self.failures_before_success {
                Err(ApiError::Internal("smtp down".into()))
            } else {
                Ok(())
            }
        }
    }

    fn job() -> PaymentConfirmation {
        PaymentConfirmation {
            to_email: "a@b.com".into(),
            booking_reference: "BK1".into(),
            amount: "100.00".into(),
            currency: "ETB".into(),
            tx_ref: "TRX_test".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn delivers_on_third_attempt_after_two_failures() {
        let sender = FlakySender {
            attempts: AtomicU32::new(0),
            failures_before_success: 2,
        };
        deliver_with_retry(&sender, &job()).await;
        assert_eq!(sender.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_three_attempts() {
        let sender = FlakySender {
            attempts: AtomicU32::new(0),
            failures_before_success: u32::MAX,
        };
        deliver_with_retry(&sender, &job()).await;
        assert_eq!(sender.attempts.load(Ordering::SeqCst), MAX_SEND_ATTEMPTS);
    }

    #[tokio::test]
    async fn first_attempt_success_sends_once() {
        let sender = FlakySender {
            attempts: AtomicU32::new(0),
            failures_before_success: 0,
        };
        deliver_with_retry(&sender, &job()).await;
        assert_eq!(sender.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dispatcher_drains_queued_jobs() {
        let sender = Arc::new(FlakySender {
            attempts: AtomicU32::new(0),
            failures_before_success: 0,
        });
        let (notifier, rx) = Notifier::for_testing();
        notifier.enqueue(job());
        notifier.enqueue(job());
        drop(notifier);

        run_dispatcher(rx, sender.clone()).await;
        assert_eq!(sender.attempts.load(Ordering::SeqCst), 2);
    }
}
