use tokio::sync::mpsc;

use crate::{config::Config, mail::mails};

const CHANNEL_CAPACITY: usize = 256;

/// Events published by handlers after the corresponding row has been
/// committed. Delivery is best-effort and never feeds back into the
/// originating request.
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    ParcelCreated {
        owner_email: String,
        owner_name: String,
        lr_number: String,
        status: String,
    },
    SurveyorAssigned {
        owner_email: String,
        owner_name: String,
        lr_number: String,
        surveyor_name: String,
    },
}

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::Sender<NotificationEvent>,
}

impl Notifier {
    /// Fire-and-forget publish. A full or closed channel is logged and
    /// dropped; the caller's operation already committed.
    pub fn publish(&self, event: NotificationEvent) {
        if let Err(err) = self.tx.try_send(event) {
            tracing::warn!("notification event dropped: {}", err);
        }
    }
}

/// Spawn the notifier task and hand back its publishing handle. The task
/// owns the mail retry policy; the request path never waits on delivery.
pub fn start_notifier(config: Config) -> Notifier {
    let (tx, mut rx) = mpsc::channel::<NotificationEvent>(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Err(err) = dispatch(&config, &event).await {
                tracing::error!("failed to deliver notification {:?}: {}", event, err);
            }
        }
        tracing::debug!("notifier channel closed, task exiting");
    });

    Notifier { tx }
}

async fn dispatch(
    config: &Config,
    event: &NotificationEvent,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        NotificationEvent::ParcelCreated {
            owner_email,
            owner_name,
            lr_number,
            status,
        } => mails::send_parcel_created_email(config, owner_email, owner_name, lr_number, status).await,
        NotificationEvent::SurveyorAssigned {
            owner_email,
            owner_name,
            lr_number,
            surveyor_name,
        } => {
            mails::send_surveyor_assigned_email(
                config,
                owner_email,
                owner_name,
                lr_number,
                surveyor_name,
            )
            .await
        }
    }
}
