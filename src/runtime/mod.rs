//! Async runtime that drives the engine.
//!
//! The [`Runtime`] owns the application state, the session store and the
//! worker. It feeds one event at a time into `handle_event` and executes the
//! returned actions: it arms and aborts timers, spawns worker requests, and
//! writes the session store. Everything asynchronous comes back through one
//! inbox, so the state machine itself never runs concurrently with anything.
//!
//! ```text
//! RuntimeHandle ─┐
//! timers ────────┼──► inbox ──► handle_event ──► actions ──► timers / worker / session store
//! worker tasks ──┘                   ▲
//! session bus ───────────────────────┘
//! ```

pub mod timers;

use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::domain::SessionToken;
use crate::session::{SessionEvent, SessionStore, SubscriptionId};
use crate::storage::TokenStorage;
use crate::ui::viewmodel::GalleryViewModel;
use crate::worker::{GalleryWorker, WorkerMessage, WorkerResponse};
use crate::Config;
use timers::{TimerKey, TimerRegistry};
use tokio::sync::mpsc;

/// Messages arriving at the runtime inbox.
#[derive(Debug)]
pub enum Inbound {
    /// An event from the user-facing side.
    Dispatch(Event),
    /// A worker task finished.
    Worker(WorkerResponse),
    /// A timer fired.
    Timer { key: TimerKey, id: u64, event: Event },
    Shutdown,
}

/// Outcome of processing one inbox message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Handled { render: bool },
    Shutdown,
}

/// Cloneable sender for feeding events into a running [`Runtime`].
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    tx: mpsc::UnboundedSender<Inbound>,
}

impl RuntimeHandle {
    /// Queues `event`. Returns `false` if the runtime is gone.
    pub fn send(&self, event: Event) -> bool {
        self.tx.send(Inbound::Dispatch(event)).is_ok()
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(Inbound::Shutdown);
    }
}

pub struct Runtime {
    state: AppState,
    session: SessionStore,
    subscription: Option<SubscriptionId>,
    session_rx: mpsc::UnboundedReceiver<SessionEvent>,
    worker: GalleryWorker,
    timers: TimerRegistry,
    tx: mpsc::UnboundedSender<Inbound>,
    rx: mpsc::UnboundedReceiver<Inbound>,
    outstanding: usize,
}

impl Runtime {
    #[must_use]
    pub fn new(config: &Config, storage: Box<dyn TokenStorage>, worker: GalleryWorker) -> Self {
        let mut session = SessionStore::new(storage);
        let (subscription, session_rx) = session.subscribe();
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::new(config),
            session,
            subscription: Some(subscription),
            session_rx,
            worker,
            timers: TimerRegistry::default(),
            tx,
            rx,
            outstanding: 0,
        }
    }

    /// Reads the session store and opens the hydration gate.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub fn start(&mut self) -> Result<bool> {
        let _span = tracing::info_span!("runtime_start").entered();
        let token = self.session.hydrate();
        self.dispatch(Event::Hydrated { token })
    }

    #[must_use]
    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle { tx: self.tx.clone() }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn viewmodel(&self) -> Option<GalleryViewModel> {
        self.state.compute_viewmodel()
    }

    #[must_use]
    pub const fn session_token(&self) -> Option<&SessionToken> {
        self.session.token()
    }

    /// Handles `event` immediately and executes its actions.
    ///
    /// Spawns tasks, so it must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let (render, actions) = handle_event(&mut self.state, &event)?;
        for action in actions {
            self.execute(action);
        }
        Ok(render)
    }

    /// Waits for the next inbox message and processes it.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub async fn step(&mut self) -> Result<Step> {
        let inbound = tokio::select! {
            biased;
            Some(SessionEvent::Changed { token }) = self.session_rx.recv() => {
                Inbound::Dispatch(Event::SessionChanged { token })
            }
            Some(inbound) = self.rx.recv() => inbound,
            else => return Ok(Step::Shutdown),
        };
        self.process(inbound)
    }

    /// Processes messages until no timer is armed, no request is in flight
    /// and nothing is queued.
    ///
    /// With a paused tokio clock this fast-forwards through debounce and
    /// pulse delays.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub async fn settle(&mut self) -> Result<()> {
        loop {
            if self.outstanding == 0 && self.timers.is_empty() {
                match self.try_next() {
                    Some(inbound) => {
                        if self.process(inbound)? == Step::Shutdown {
                            return Ok(());
                        }
                        continue;
                    }
                    None => return Ok(()),
                }
            }
            if self.step().await? == Step::Shutdown {
                return Ok(());
            }
        }
    }

    /// Runs until shutdown, calling `render` whenever the view changed.
    ///
    /// Handler errors are logged and the loop keeps going.
    pub async fn run<F>(&mut self, mut render: F)
    where
        F: FnMut(&GalleryViewModel),
    {
        loop {
            match self.step().await {
                Ok(Step::Handled { render: true }) => {
                    if let Some(viewmodel) = self.viewmodel() {
                        render(&viewmodel);
                    }
                }
                Ok(Step::Handled { render: false }) => {}
                Ok(Step::Shutdown) => break,
                Err(e) => tracing::error!(error = %e, "event handling failed"),
            }
        }
        self.teardown();
    }

    /// Cancels every timer and leaves the session bus.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        if let Some(id) = self.subscription.take() {
            self.session.unsubscribe(id);
        }
        tracing::debug!(outstanding = self.outstanding, "runtime torn down");
    }

    fn try_next(&mut self) -> Option<Inbound> {
        if let Ok(SessionEvent::Changed { token }) = self.session_rx.try_recv() {
            return Some(Inbound::Dispatch(Event::SessionChanged { token }));
        }
        self.rx.try_recv().ok()
    }

    fn process(&mut self, inbound: Inbound) -> Result<Step> {
        let render = match inbound {
            Inbound::Dispatch(event) => self.dispatch(event)?,
            Inbound::Worker(response) => {
                self.outstanding = self.outstanding.saturating_sub(1);
                self.dispatch(Event::WorkerResponse(response))?
            }
            Inbound::Timer { key, id, event } => {
                if self.timers.fire(key, id) {
                    self.dispatch(event)?
                } else {
                    false
                }
            }
            Inbound::Shutdown => return Ok(Step::Shutdown),
        };
        Ok(Step::Handled { render })
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::ScheduleFetch { generation, delay } => {
                self.timers.start(
                    TimerKey::Fetch,
                    delay,
                    Event::DebounceElapsed { generation },
                    self.tx.clone(),
                );
            }
            Action::CancelScheduledFetch => {
                self.timers.cancel(TimerKey::Fetch);
            }
            Action::SchedulePulseClear { generation, delay } => {
                self.timers.start(
                    TimerKey::Pulse,
                    delay,
                    Event::PulseElapsed { generation },
                    self.tx.clone(),
                );
            }
            Action::PostToWorker(message) => self.spawn_worker(message),
            Action::StoreSession(token) => {
                if let Err(e) = self.session.set_token(token) {
                    tracing::warn!(error = %e, "failed to persist session");
                }
            }
            Action::ClearSession => {
                if let Err(e) = self.session.clear_token() {
                    tracing::warn!(error = %e, "failed to clear persisted session");
                }
            }
        }
    }

    fn spawn_worker(&mut self, message: WorkerMessage) {
        self.outstanding += 1;
        let worker = self.worker.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let response = worker.handle_message(message).await;
            let _ = tx.send(Inbound::Worker(response));
        });
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.teardown();
    }
}
