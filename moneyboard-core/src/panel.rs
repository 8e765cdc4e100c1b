//! Per-panel display state.
//!
//! A successful refresh replaces the data wholesale. A failed one keeps the
//! previous data around as `stale` and records the error, so "fetch failed"
//! never looks like "no data yet".

use std::fmt::Display;

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum PanelState<T> {
    /// Nothing fetched yet.
    Idle,
    Ready(T),
    Failed { error: String, stale: Option<T> },
}

/// Issued when a refresh starts; handed back with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What [`Panel::complete`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    Failed,
    /// A newer refresh already landed; the result was dropped.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct Panel<T> {
    name: &'static str,
    state: PanelState<T>,
    issued: u64,
    applied: u64,
}

impl<T> Panel<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: PanelState::Idle,
            issued: 0,
            applied: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> &PanelState<T> {
        &self.state
    }

    /// Current data: fresh if ready, stale if the last refresh failed.
    pub fn data(&self) -> Option<&T> {
        match &self.state {
            PanelState::Idle => None,
            PanelState::Ready(v) => Some(v),
            PanelState::Failed { stale, .. } => stale.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            PanelState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Apply a refresh result unless a later refresh has already been applied.
    pub fn complete<E: Display>(&mut self, ticket: RefreshTicket, result: Result<T, E>) -> Applied {
        if ticket.0 <= self.applied {
            info!(
                panel = self.name,
                ticket = ticket.0,
                applied = self.applied,
                "dropping superseded refresh"
            );
            return Applied::Superseded;
        }
        self.applied = ticket.0;

        match result {
            Ok(value) => {
                self.state = PanelState::Ready(value);
                Applied::Updated
            }
            Err(e) => {
                let error = e.to_string();
                warn!(panel = self.name, error = %error, "refresh failed; keeping previous data");
                let stale = match std::mem::replace(&mut self.state, PanelState::Idle) {
                    PanelState::Idle => None,
                    PanelState::Ready(v) => Some(v),
                    PanelState::Failed { stale, .. } => stale,
                };
                self.state = PanelState::Failed { error, stale };
                Applied::Failed
            }
        }
    }
}
