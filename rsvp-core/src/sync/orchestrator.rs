//! Decides where the roster is read from and written to.
//!
//! With remote sync off, the local store is the only source. With it on,
//! the spreadsheet is authoritative: reads come from it (cached locally),
//! writes are shown optimistically, posted one-way, and confirmed by a
//! delayed re-fetch. A polling task keeps other devices' RSVPs flowing in.
//!
//! A poll that was already in flight when a guest submits can publish a
//! snapshot without the new row. Nothing arbitrates this; the next fetch
//! fixes it up.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::attendee::{Attendee, AttendeeDraft};
use crate::constants::RECONCILE_DELAY;
use crate::error::RsvpResult;
use crate::local::LocalStore;
use crate::remote::{HttpRemoteStore, RemoteStore};
use crate::roster::Roster;
use crate::sync::status::{SyncSnapshot, SyncStatus};
use crate::sync_config::SyncConfig;

/// Where a submitted RSVP ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Remote sync is off; saved on this device.
    Local,
    /// Posted to the spreadsheet; a re-fetch will confirm it.
    Remote,
    /// The post failed, so it was saved on this device instead.
    LocalFallback,
}

#[derive(Debug)]
pub struct SubmitOutcome {
    pub attendee: Attendee,
    pub delivery: Delivery,
    /// The scheduled re-fetch, for remote deliveries.
    pub reconcile: Option<JoinHandle<Roster>>,
}

#[derive(Default)]
struct SyncState {
    snapshot: SyncSnapshot,
    loaded: bool,
}

#[derive(Clone)]
pub struct SyncOrchestrator {
    capacity: u32,
    config: SyncConfig,
    local: LocalStore,
    remote: Option<Arc<dyn RemoteStore>>,
    state: Arc<RwLock<SyncState>>,
    reconcile_delay: Duration,
}

impl SyncOrchestrator {
    /// Build an orchestrator talking to the configured endpoint over HTTP.
    pub fn new(capacity: u32, config: SyncConfig, local: LocalStore) -> RsvpResult<Self> {
        let remote: Option<Arc<dyn RemoteStore>> = if config.is_remote_active() {
            Some(Arc::new(HttpRemoteStore::new(&config.url)?))
        } else {
            None
        };

        Ok(Self::with_remote(capacity, config, local, remote))
    }

    /// Build an orchestrator over any remote store. The remote is ignored
    /// unless `config` has remote sync switched on.
    pub fn with_remote(
        capacity: u32,
        config: SyncConfig,
        local: LocalStore,
        remote: Option<Arc<dyn RemoteStore>>,
    ) -> Self {
        let remote = remote.filter(|_| config.is_remote_active());

        SyncOrchestrator {
            capacity,
            config,
            local,
            remote,
            state: Arc::new(RwLock::new(SyncState::default())),
            reconcile_delay: RECONCILE_DELAY,
        }
    }

    pub fn with_reconcile_delay(mut self, delay: Duration) -> Self {
        self.reconcile_delay = delay;
        self
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn is_remote_active(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn snapshot(&self) -> SyncSnapshot {
        self.state.read().await.snapshot.clone()
    }

    pub async fn remaining_seats(&self) -> u32 {
        self.state
            .read()
            .await
            .snapshot
            .roster
            .remaining_seats(self.capacity)
    }

    /// Refresh the visible roster from the authoritative source.
    ///
    /// Never fails: a remote error falls back to the locally cached roster
    /// and flips the status to `Offline`.
    pub async fn load(&self) -> Roster {
        let Some(remote) = &self.remote else {
            let roster = self.read_local();
            self.publish(roster.clone(), SyncStatus::Local).await;
            return roster;
        };

        self.set_status(SyncStatus::Syncing).await;

        match remote.fetch().await {
            Ok(roster) => {
                tracing::debug!(attendees = roster.len(), "Fetched roster from spreadsheet");
                if let Err(e) = self.local.save_roster(&roster) {
                    tracing::warn!(error = %e, "Could not cache roster locally");
                }
                self.publish(roster.clone(), SyncStatus::Live).await;
                roster
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sheets sync error, falling back to cached roster");
                let cached = self.read_local();
                self.publish(
                    cached.clone(),
                    SyncStatus::Offline("showing the guest list saved on this device".into()),
                )
                .await;
                cached
            }
        }
    }

    /// Add a new RSVP.
    ///
    /// The capacity check runs against the visible roster before anything
    /// changes. It is client-side only: two devices submitting at once can
    /// still overbook the tour.
    pub async fn submit(&self, draft: AttendeeDraft) -> RsvpResult<SubmitOutcome> {
        if !self.state.read().await.loaded {
            self.load().await;
        }

        let attendee = draft.into_attendee(Utc::now())?;

        let roster = {
            let mut state = self.state.write().await;
            state
                .snapshot
                .roster
                .ensure_capacity(attendee.guests, self.capacity)?;
            state.snapshot.roster.prepend(attendee.clone());
            state.snapshot.roster.clone()
        };

        let Some(remote) = &self.remote else {
            self.persist_or_retract(&roster, &attendee.id).await?;
            return Ok(SubmitOutcome {
                attendee,
                delivery: Delivery::Local,
                reconcile: None,
            });
        };

        match remote.save(&attendee).await {
            Ok(()) => {
                tracing::debug!(id = %attendee.id, "Posted RSVP to spreadsheet");
                self.set_status(SyncStatus::Syncing).await;
                let reconcile = self.schedule_reconcile();
                Ok(SubmitOutcome {
                    attendee,
                    delivery: Delivery::Remote,
                    reconcile: Some(reconcile),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sheets save error, keeping RSVP on this device");
                self.persist_or_retract(&roster, &attendee.id).await?;
                self.set_status(SyncStatus::Offline("saved on this device only".into()))
                    .await;
                Ok(SubmitOutcome {
                    attendee,
                    delivery: Delivery::LocalFallback,
                    reconcile: None,
                })
            }
        }
    }

    /// Re-invoke `load` every polling interval while remote sync is on,
    /// handing each snapshot to `on_update`. Returns `None` when there is
    /// nothing to poll.
    pub fn spawn_polling<F>(&self, mut on_update: F) -> Option<JoinHandle<()>>
    where
        F: FnMut(SyncSnapshot) + Send + 'static,
    {
        if !self.is_remote_active() {
            return None;
        }

        let this = self.clone();
        let period = self.config.polling_interval();

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                this.load().await;
                on_update(this.snapshot().await);
            }
        }))
    }

    /// Forget the roster on this device. The spreadsheet is untouched, so
    /// with remote sync on the next load brings everything back.
    pub async fn clear_view(&self) -> RsvpResult<()> {
        self.local.clear_roster()?;
        self.state.write().await.snapshot.roster = Roster::default();
        Ok(())
    }

    /// Save `roster` locally. If that fails the RSVP never happened, so the
    /// optimistic entry comes back out of the visible roster.
    async fn persist_or_retract(&self, roster: &Roster, id: &str) -> RsvpResult<()> {
        if let Err(e) = self.local.save_roster(roster) {
            tracing::warn!(error = %e, "Could not save RSVP on this device");
            self.state.write().await.snapshot.roster.remove(id);
            return Err(e);
        }
        Ok(())
    }

    fn schedule_reconcile(&self) -> JoinHandle<Roster> {
        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.reconcile_delay).await;
            this.load().await
        })
    }

    fn read_local(&self) -> Roster {
        self.local.load_roster().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read local roster");
            Roster::default()
        })
    }

    async fn publish(&self, roster: Roster, status: SyncStatus) {
        let mut state = self.state.write().await;
        state.snapshot = SyncSnapshot { roster, status };
        state.loaded = true;
    }

    async fn set_status(&self, status: SyncStatus) {
        self.state.write().await.snapshot.status = status;
    }
}
