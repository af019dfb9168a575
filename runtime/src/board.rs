use hexcat_core::{GameConfig, GameEngine};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crate::*;

/// Runs a game on a dedicated render worker and feeds it input.
///
/// The engine lives inside the worker while it runs; [`pause`](Self::pause)
/// stops the worker and takes the engine and surface back, so no frame is
/// ever drawn after it returns.
pub struct Board<S: Surface> {
    input: InputHandle,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<Option<(Session, S)>>>,
    session: Option<Session>,
    surface: Option<S>,
}

impl<S: Surface> Board<S> {
    pub fn new(game_config: GameConfig, loop_config: LoopConfig) -> Self {
        let (input, queue) = channel();
        Self::with_session(input, Session::new(game_config, loop_config, queue))
    }

    pub fn from_engine(engine: GameEngine, loop_config: LoopConfig) -> Self {
        let (input, queue) = channel();
        Self::with_session(input, Session::from_engine(engine, loop_config, queue))
    }

    fn with_session(input: InputHandle, session: Session) -> Self {
        Self {
            input,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
            session: Some(session),
            surface: None,
        }
    }

    /// Producer handle for other threads.
    pub fn input_handle(&self) -> InputHandle {
        self.input.clone()
    }

    pub fn submit_pointer_press(&self, x: f32, y: f32) {
        self.input.submit_pointer_press(x, y);
    }

    /// Starts a new round regardless of the current one.
    pub fn request_reset(&mut self) {
        match self.session.as_mut() {
            Some(session) if self.worker.is_none() => session.reset_now(),
            _ => self.input.request_reset(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// The engine, only reachable while the worker is stopped.
    pub fn engine(&self) -> Option<&GameEngine> {
        self.session.as_ref().map(Session::engine)
    }

    pub fn attach_surface(&mut self, surface: S) -> Result<()> {
        self.pause();
        self.surface = Some(surface);
        self.resume()
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.pause();
        self.surface.take()
    }

    /// Starts the render worker. Without an attached surface there is nothing
    /// to run and this does nothing, as does resuming a running board. Fails
    /// with [`RuntimeError::SessionLost`] once a worker has panicked, and with
    /// [`RuntimeError::Spawn`] when no thread could be started; the board then
    /// keeps its session and surface.
    pub fn resume(&mut self) -> Result<()> {
        if self.worker.is_some() {
            return Ok(());
        }
        let (session, surface) = match (self.session.take(), self.surface.take()) {
            (Some(session), Some(surface)) => (session, surface),
            (None, surface) => {
                self.surface = surface;
                return Err(RuntimeError::SessionLost);
            }
            (session, None) => {
                self.session = session;
                log::debug!("No surface attached, render worker not started");
                return Ok(());
            }
        };

        let builder = thread::Builder::new().name("hexcat-render".into());
        self.launch(builder, session, surface)
    }

    /// Spawns the worker. The worker picks the session and surface up from a
    /// shared slot, so when spawning fails both go back to the board and a
    /// later [`resume`](Self::resume) can try again.
    fn launch(&mut self, builder: thread::Builder, session: Session, surface: S) -> Result<()> {
        let handoff = Arc::new(Mutex::new(Some((session, surface))));
        let pickup = Arc::clone(&handoff);
        let running = Arc::clone(&self.running);

        self.running.store(true, Ordering::Release);
        let spawned = builder.spawn(move || {
            let parts = pickup.lock().ok().and_then(|mut parts| parts.take());
            parts.map(|(session, surface)| session.run(surface, running))
        });

        match spawned {
            Ok(worker) => {
                self.worker = Some(worker);
                Ok(())
            }
            Err(err) => {
                self.running.store(false, Ordering::Release);
                log::warn!("Could not spawn the render worker: {}", err);
                let parts = handoff.lock().ok().and_then(|mut parts| parts.take());
                if let Some((session, surface)) = parts {
                    self.session = Some(session);
                    self.surface = Some(surface);
                }
                Err(err.into())
            }
        }
    }

    /// Stops the render worker and waits for its last cycle to finish.
    pub fn pause(&mut self) {
        self.running.store(false, Ordering::Release);
        let Some(worker) = self.worker.take() else {
            return;
        };
        self.input.wake();

        match worker.join() {
            Ok(Some((session, surface))) => {
                self.session = Some(session);
                self.surface = Some(surface);
            }
            Ok(None) => log::warn!("Render worker never received its session"),
            Err(_) => log::warn!("Render worker panicked, board stays stopped"),
        }
    }
}

impl<S: Surface> Drop for Board<S> {
    fn drop(&mut self) {
        self.pause();
    }
}
