//! present::driver
//!
//! Runs a [`TransitionPresenter`] against a live [`StateReader`] and
//! publishes each new [`Composition`].
//!
//! Animations are modeled as timers: when a view starts entering or
//! exiting, a task sleeps for the transition duration and reports back.
//! When the engine goes away the driver lets running animations finish and
//! then stops.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::presenter::{Composition, MotionMode, PresenterUpdate, TransitionPresenter, ViewKey};
use crate::engine::StateReader;

#[derive(Debug, Clone, Copy)]
enum Finished {
    Enter(ViewKey),
    Exit(ViewKey),
}

/// Handle to a running presenter task.
#[derive(Debug)]
pub struct PresenterHandle {
    compositions: watch::Receiver<Composition>,
    task: JoinHandle<()>,
}

impl PresenterHandle {
    /// Subscribe to composition changes.
    pub fn compositions(&self) -> watch::Receiver<Composition> {
        self.compositions.clone()
    }

    /// The latest composition.
    pub fn composition(&self) -> Composition {
        self.compositions.borrow().clone()
    }

    /// Wait until the composition is a single steady view.
    pub async fn wait_converged(&mut self) -> Composition {
        if let Ok(c) = self.compositions.wait_for(|c| c.is_converged()).await {
            return (*c).clone();
        }
        // The task only exits once converged.
        self.compositions.borrow().clone()
    }

    /// Wait for the task to stop. It stops after the engine is dropped and
    /// the last animation has finished.
    pub async fn join(self) -> Composition {
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "presenter task failed");
        }
        let last = self.compositions.borrow().clone();
        last
    }
}

/// Spawn a presenter fed by `reader`.
///
/// `duration` is how long each enter or exit animation runs.
pub fn spawn_presenter(reader: StateReader, mode: MotionMode, duration: Duration) -> PresenterHandle {
    let presenter = TransitionPresenter::new(&reader.snapshot(), mode);
    let (tx, rx) = watch::channel(presenter.composition());
    let task = tokio::spawn(run(reader, presenter, tx, duration));

    PresenterHandle {
        compositions: rx,
        task,
    }
}

async fn run(
    mut reader: StateReader,
    mut presenter: TransitionPresenter,
    out: watch::Sender<Composition>,
    duration: Duration,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();

    if presenter.mode() == MotionMode::Animated {
        schedule(&done_tx, Finished::Enter(presenter.current().key), duration);
    }

    let mut closed = false;
    loop {
        if closed && presenter.is_converged() {
            break;
        }

        tokio::select! {
            changed = reader.changed(), if !closed => match changed {
                Ok(state) => {
                    let update = presenter.observe(&state);
                    log_update(&update);
                    if let Some(key) = update.exiting {
                        schedule(&done_tx, Finished::Exit(key), duration);
                    }
                    if let Some(key) = update.entering {
                        schedule(&done_tx, Finished::Enter(key), duration);
                    }
                }
                Err(_) => {
                    tracing::debug!("engine closed, draining animations");
                    closed = true;
                    continue;
                }
            },
            Some(done) = done_rx.recv() => {
                let applied = match done {
                    Finished::Enter(key) => presenter.enter_complete(key),
                    Finished::Exit(key) => presenter.exit_complete(key),
                };
                match applied {
                    Ok(true) => tracing::trace!(?done, "animation finished"),
                    Ok(false) => {
                        tracing::trace!(?done, "stale animation ignored");
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "presenter lifecycle error");
                        continue;
                    }
                }
            }
        }

        out.send_replace(presenter.composition());
    }
}

fn schedule(done: &mpsc::UnboundedSender<Finished>, event: Finished, duration: Duration) {
    let done = done.clone();
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        // The driver may have stopped; nothing to report to.
        let _ = done.send(event);
    });
}

fn log_update(update: &PresenterUpdate) {
    if update.is_empty() {
        return;
    }
    for key in &update.discarded {
        tracing::debug!(%key, "view discarded");
    }
    if let Some(key) = update.entering {
        tracing::debug!(%key, "view entering");
    }
    if let Some(key) = update.exiting {
        tracing::debug!(%key, "view exiting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RoutePath;
    use crate::engine::{MachineConfig, NavigationMachine};
    use crate::host::mock::MockHost;
    use crate::present::presenter::LayerRole;
    use std::sync::Arc;

    fn machine() -> NavigationMachine {
        let host = Arc::new(MockHost::new());
        NavigationMachine::new(MachineConfig::default(), host.clone(), host)
    }

    #[tokio::test(start_paused = true)]
    async fn two_layers_during_transition() {
        let machine = machine();
        let mut handle = spawn_presenter(machine.reader(), MotionMode::Animated, Duration::from_millis(600));
        handle.wait_converged().await;

        let ticket = machine
            .navigate_to(RoutePath::new("/lumen").unwrap())
            .ticket()
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mid = handle.composition();
        assert_eq!(mid.layers.len(), 2);
        assert_eq!(mid.previous().unwrap().path.as_str(), "/");
        assert_eq!(mid.current().unwrap().path.as_str(), "/lumen");

        ticket.finished().await;
        let done = handle.wait_converged().await;
        assert_eq!(done.layers.len(), 1);
        assert_eq!(done.layers[0].role, LayerRole::Current);
        assert_eq!(done.layers[0].path.as_str(), "/lumen");
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_engine_dropped() {
        let machine = machine();
        let handle = spawn_presenter(machine.reader(), MotionMode::Animated, Duration::from_millis(600));
        let ticket = machine
            .navigate_to(RoutePath::new("/about").unwrap())
            .ticket()
            .unwrap();
        drop(machine);
        ticket.finished().await;

        let last = handle.join().await;
        assert!(last.is_converged());
        assert_eq!(last.layers[0].path.as_str(), "/about");
    }

    #[tokio::test(start_paused = true)]
    async fn reduced_motion_never_layers() {
        let machine = machine();
        let handle = spawn_presenter(machine.reader(), MotionMode::Reduced, Duration::from_millis(600));
        let mut compositions = handle.compositions();

        let ticket = machine
            .navigate_to(RoutePath::new("/tidal").unwrap())
            .ticket()
            .unwrap();
        compositions
            .wait_for(|c| c.current().map(|l| l.path.as_str()) == Some("/tidal"))
            .await
            .unwrap();
        assert_eq!(handle.composition().layers.len(), 1);

        ticket.finished().await;
        drop(machine);
        assert!(handle.join().await.is_converged());
    }
}
