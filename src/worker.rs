use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::activity::ActivityTicket;
use crate::client::{ActivitySource, Gateway};
use crate::collection::{self, Collection};
use crate::dashboard;

#[derive(Debug)]
pub enum FolioRequest {
    FetchActivity(ActivityTicket),
    LoadCollection(Collection),
    LoadDashboard { generation: u64, user_id: String },
    SignOut,
}

#[derive(Clone)]
pub struct FolioHandle {
    tx: mpsc::UnboundedSender<FolioRequest>,
}

impl FolioHandle {
    pub fn send(&self, request: FolioRequest) {
        let _ = self.tx.send(request);
    }
}

/// Runs client calls off the UI loop, one task per request. Results may
/// arrive in any order; the tickets and generations they carry sort that out.
pub struct FolioWorker {
    activity: Arc<dyn ActivitySource>,
    gateway: Arc<dyn Gateway>,
    rx: mpsc::UnboundedReceiver<FolioRequest>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl FolioWorker {
    pub fn new(
        activity: Arc<dyn ActivitySource>,
        gateway: Arc<dyn Gateway>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> (Self, FolioHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = FolioHandle { tx };
        let worker = Self {
            activity,
            gateway,
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            if self.action_tx.is_closed() {
                break;
            }
            let activity = Arc::clone(&self.activity);
            let gateway = Arc::clone(&self.gateway);
            let action_tx = self.action_tx.clone();
            tokio::spawn(async move {
                for action in process(activity.as_ref(), gateway.as_ref(), request).await {
                    if action_tx.send(action).is_err() {
                        break;
                    }
                }
            });
        }
    }
}

async fn process(
    activity: &dyn ActivitySource,
    gateway: &dyn Gateway,
    request: FolioRequest,
) -> Vec<Action> {
    match request {
        FolioRequest::FetchActivity(ticket) => {
            tracing::debug!("fetching activity for {}", ticket.source_id);
            let result = activity
                .public_events(&ticket.source_id, ticket.limit)
                .await
                .map_err(|e| e.to_string());
            vec![Action::ActivityLoaded { ticket, result }]
        }
        FolioRequest::LoadCollection(which) => {
            let action = match which {
                Collection::Reviews => Action::ReviewsLoaded(collection::load(gateway, which).await),
                Collection::Services => {
                    Action::ServicesLoaded(collection::load(gateway, which).await)
                }
                Collection::Team => Action::TeamLoaded(collection::load(gateway, which).await),
            };
            vec![action]
        }
        FolioRequest::LoadDashboard {
            generation,
            user_id,
        } => {
            let (projects, meetings, messages) = futures::join!(
                dashboard::load_projects(gateway, &user_id),
                dashboard::load_upcoming_meetings(gateway, &user_id, Utc::now()),
                dashboard::load_recent_messages(gateway, &user_id),
            );
            vec![
                Action::ProjectsLoaded {
                    generation,
                    result: projects.map_err(|e| e.to_string()),
                },
                Action::MeetingsLoaded {
                    generation,
                    result: meetings.map_err(|e| e.to_string()),
                },
                Action::MessagesLoaded {
                    generation,
                    result: messages.map_err(|e| e.to_string()),
                },
            ]
        }
        FolioRequest::SignOut => {
            gateway.set_access_token(None);
            vec![]
        }
    }
}
