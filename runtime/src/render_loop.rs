use hexcat_core::*;
use rand::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use web_time::Instant;

use crate::*;

/// Everything one render worker owns: the engine, the consumer end of the
/// input queue and the pending timers. Handed back to the [`Board`] when the
/// worker stops.
#[derive(Debug)]
pub struct Session {
    engine: GameEngine,
    queue: InputQueue,
    timers: Timers,
    seeds: SmallRng,
    game_config: GameConfig,
    loop_config: LoopConfig,
}

impl Session {
    pub fn new(game_config: GameConfig, loop_config: LoopConfig, queue: InputQueue) -> Self {
        let seed = loop_config.seed.unwrap_or_else(rand::random);
        log::debug!("Session seed: {}", seed);
        let mut seeds = SmallRng::seed_from_u64(seed);
        let engine = GameEngine::generate(
            game_config,
            RandomBoardGenerator::new(seeds.random(), game_config.spawn),
        );
        Self::with_engine(engine, game_config, loop_config, queue, seeds)
    }

    pub fn from_engine(engine: GameEngine, loop_config: LoopConfig, queue: InputQueue) -> Self {
        let seeds = SmallRng::seed_from_u64(loop_config.seed.unwrap_or_else(rand::random));
        let game_config = *engine.config();
        Self::with_engine(engine, game_config, loop_config, queue, seeds)
    }

    fn with_engine(
        engine: GameEngine,
        game_config: GameConfig,
        loop_config: LoopConfig,
        queue: InputQueue,
        seeds: SmallRng,
    ) -> Self {
        Self {
            engine,
            queue,
            timers: Timers::default(),
            seeds,
            game_config,
            loop_config,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Worker body: ticks once, then again whenever a signal arrives or a
    /// deadline passes, until `running` is cleared.
    pub(crate) fn run<S: Surface>(mut self, mut surface: S, running: Arc<AtomicBool>) -> (Self, S) {
        log::debug!("Render loop started");
        let mut drawn = self.tick(&mut surface, Instant::now());

        while running.load(Ordering::Acquire) {
            // without a surface there is nothing to time, sleep until poked
            let timeout = if drawn {
                self.timers.timeout(Instant::now())
            } else {
                None
            };
            self.queue.wait(timeout);

            if !running.load(Ordering::Acquire) {
                break;
            }
            drawn = self.tick(&mut surface, Instant::now());
        }

        log::debug!("Render loop stopped");
        (self, surface)
    }

    /// One update/draw cycle. Returns `false` when the surface was not
    /// available and nothing happened.
    ///
    /// Only input submitted before the tick starts is handled, anything later
    /// waits for the next tick.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, now: Instant) -> bool {
        let cutoff = self.queue.cutoff();
        let Some(size) = surface.dimensions() else {
            log::trace!("No drawable surface, skipping frame");
            return false;
        };
        let geometry = BoardGeometry::new(self.engine.edge_size(), size);

        for task in self.timers.take_due(now) {
            match task {
                Deferred::AnimationStep => {
                    self.engine.advance_animation();
                }
                Deferred::Reset => {
                    self.queue.clear_until(cutoff);
                    self.reset_round();
                }
            }
        }

        self.resolve_pending();
        self.handle_input(&geometry, cutoff);

        surface.present(&self.engine.view(), &geometry);

        if self.engine.is_animating() {
            self.timers
                .schedule(Deferred::AnimationStep, now + self.loop_config.animation_step());
        } else if self.engine.is_finished() {
            self.timers
                .schedule(Deferred::Reset, now + self.loop_config.reset_delay());
        }
        true
    }

    /// Immediate reset, used while no worker is running.
    pub(crate) fn reset_now(&mut self) {
        self.queue.clear();
        self.reset_round();
    }

    fn handle_input(&mut self, geometry: &BoardGeometry, cutoff: u64) {
        let mut parked = Vec::new();

        for queued in self.queue.drain_until(cutoff) {
            match queued.signal() {
                Signal::Wake => {}
                Signal::Reset => {
                    parked.clear();
                    self.reset_round();
                }
                Signal::Press { .. } if self.engine.is_animating() => parked.push(queued),
                Signal::Press { x, y } => self.press(geometry, x, y),
            }
        }

        if !parked.is_empty() {
            log::trace!("Holding {} presses until the animation ends", parked.len());
            self.queue.requeue(parked);
        }
    }

    fn press(&mut self, geometry: &BoardGeometry, x: f32, y: f32) {
        let turn = geometry
            .pixel_to_cell(x, y)
            .and_then(|cell| self.engine.apply_block(cell).map(|outcome| (cell, outcome)));

        match turn {
            Ok((cell, outcome)) => {
                log::debug!("Press at ({}, {}) blocked {}: {:?}", x, y, cell, outcome)
            }
            Err(err) => log::trace!("Ignored press at ({}, {}): {}", x, y, err),
        }
    }

    /// A freshly spawned agent may have to act before the player does.
    fn resolve_pending(&mut self) {
        if matches!(self.engine.state(), TurnState::Resolving) {
            if let Err(err) = self.engine.resolve() {
                log::warn!("Could not resolve pending turn: {}", err);
            }
        }
    }

    fn reset_round(&mut self) {
        let generator = RandomBoardGenerator::new(self.seeds.random(), self.game_config.spawn);
        self.engine.reset(generator.generate(self.game_config));
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        size: Option<SurfaceSize>,
        frames: Vec<BoardView>,
    }

    impl Recorder {
        fn square() -> Self {
            Self {
                size: Some(SurfaceSize::new(1150.0, 1150.0)),
                frames: Vec::new(),
            }
        }
    }

    impl Surface for Recorder {
        fn dimensions(&self) -> Option<SurfaceSize> {
            self.size
        }

        fn present(&mut self, view: &BoardView, _geometry: &BoardGeometry) {
            self.frames.push(view.clone());
        }
    }

    /// Presses `at` from inside the tick, after the tick took its input cutoff.
    struct LateTapper {
        handle: InputHandle,
        at: (f32, f32),
    }

    impl Surface for LateTapper {
        fn dimensions(&self) -> Option<SurfaceSize> {
            self.handle.submit_pointer_press(self.at.0, self.at.1);
            Some(SurfaceSize::new(1150.0, 1150.0))
        }

        fn present(&mut self, _view: &BoardView, _geometry: &BoardGeometry) {}
    }

    fn session(walls: &[Cell], spawn: Cell) -> (InputHandle, Session) {
        let (handle, queue) = channel();
        let layout = BoardLayout::from_walls(EDGE_SIZE, walls, spawn).unwrap();
        let engine = GameEngine::new(GameConfig::default(), layout);
        let config = LoopConfig {
            seed: Some(1),
            ..LoopConfig::default()
        };
        (handle, Session::from_engine(engine, config, queue))
    }

    /// Presses the centre of `cell` on the square test surface.
    fn tap(handle: &InputHandle, cell: Cell) {
        let (x, y) = center(cell);
        handle.submit_pointer_press(x, y);
    }

    fn center(cell: Cell) -> (f32, f32) {
        BoardGeometry::new(EDGE_SIZE, SurfaceSize::new(1150.0, 1150.0)).cell_center(cell)
    }

    fn ms(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    #[test]
    fn out_of_board_tap_is_dropped() {
        let (handle, mut session) = session(&[], Cell::new(5, 5));
        let mut surface = Recorder::square();
        handle.submit_pointer_press(5000.0, 20.0);
        handle.submit_pointer_press(20.0, 150.0);

        assert!(session.tick(&mut surface, Instant::now()));

        assert_eq!(session.engine().grid().wall_count(), 0);
        assert_eq!(session.engine().state(), TurnState::Idle);
        assert_eq!(session.queue.parked_len(), 0);
        assert!(session.queue.drain().is_empty());
        assert_eq!(surface.frames.len(), 1);
    }

    #[test]
    fn tap_blocks_cell_and_animates_on_timer() {
        let (handle, mut session) = session(&[], Cell::new(5, 5));
        let mut surface = Recorder::square();
        let start = Instant::now();
        tap(&handle, Cell::new(4, 5));

        session.tick(&mut surface, start);
        assert!(session.engine().grid()[Cell::new(4, 5)]);
        assert_eq!(session.engine().agent_position(), Some(Cell::new(6, 5)));
        assert!(session.timers.is_scheduled(Deferred::AnimationStep));

        let mut now = start;
        while session.engine().is_animating() {
            now += Duration::from_millis(100);
            session.tick(&mut surface, now);
        }
        assert_eq!(session.engine().state(), TurnState::Idle);
        assert_eq!(surface.frames.len(), usize::from(DEFAULT_ANIMATION_FRAMES) + 1);
        assert!(!session.timers.is_scheduled(Deferred::AnimationStep));
    }

    #[test]
    fn presses_during_animation_wait_for_it_to_finish() {
        let (handle, mut session) = session(&[], Cell::new(5, 5));
        let mut surface = Recorder::square();
        let start = Instant::now();
        tap(&handle, Cell::new(1, 1));
        session.tick(&mut surface, start);
        assert!(session.engine().is_animating());

        tap(&handle, Cell::new(2, 1));
        session.tick(&mut surface, ms(start, 10));
        assert!(!session.engine().grid()[Cell::new(2, 1)]);
        assert_eq!(session.queue.parked_len(), 1);

        let mut now = start;
        while session.engine().is_animating() {
            now += Duration::from_millis(100);
            session.tick(&mut surface, now);
        }
        // the held press is applied on the tick that ends the animation
        assert!(session.engine().grid()[Cell::new(2, 1)]);
        assert_eq!(session.engine().turn(), 2);
    }

    #[test]
    fn terminal_round_resets_after_the_delay() {
        let center = Cell::new(5, 5);
        let mut ring: Vec<Cell> = center.neighbors(EDGE_SIZE).collect();
        let gap = ring.pop().unwrap();
        let (handle, mut session) = session(&ring, center);
        let mut surface = Recorder::square();
        let start = Instant::now();

        tap(&handle, gap);
        session.tick(&mut surface, start);
        assert_eq!(session.engine().ending(), Some(Ending::Won));
        assert_eq!(surface.frames.last().unwrap().ending(), Some(Ending::Won));

        // input is ignored while the result is on screen
        tap(&handle, Cell::new(1, 1));
        session.tick(&mut surface, ms(start, 1000));
        assert_eq!(session.engine().ending(), Some(Ending::Won));
        assert!(!session.engine().grid()[Cell::new(1, 1)]);

        session.tick(&mut surface, ms(start, 1500));
        assert_eq!(session.engine().state(), TurnState::Idle);
        assert_eq!(session.engine().turn(), 0);
    }

    #[test]
    fn boundary_spawn_escapes_on_first_tick() {
        let (_handle, mut session) = session(&[], Cell::new(0, 4));
        let mut surface = Recorder::square();

        session.tick(&mut surface, Instant::now());

        assert_eq!(session.engine().ending(), Some(Ending::Escaped));
        assert_eq!(session.engine().turn(), 0);
        assert!(session.timers.is_scheduled(Deferred::Reset));
    }

    #[test]
    fn reset_request_discards_earlier_presses() {
        let (handle, mut session) = session(&[], Cell::new(5, 5));
        let mut surface = Recorder::square();
        let start = Instant::now();
        tap(&handle, Cell::new(1, 1));
        session.tick(&mut surface, start);

        tap(&handle, Cell::new(2, 1));
        handle.request_reset();
        session.tick(&mut surface, ms(start, 10));

        assert_eq!(session.engine().state(), TurnState::Idle);
        assert_eq!(session.engine().turn(), 0);
        assert_eq!(session.queue.parked_len(), 0);
        assert!(!session.timers.is_scheduled(Deferred::AnimationStep));
    }

    #[test]
    fn missing_surface_skips_the_tick_and_keeps_input() {
        let (handle, mut session) = session(&[], Cell::new(5, 5));
        let mut surface = Recorder::default();
        tap(&handle, Cell::new(4, 5));

        assert!(!session.tick(&mut surface, Instant::now()));
        assert_eq!(session.engine().turn(), 0);

        surface.size = Some(SurfaceSize::new(1150.0, 1150.0));
        assert!(session.tick(&mut surface, Instant::now()));
        assert_eq!(session.engine().turn(), 1);
    }

    #[test]
    fn press_during_a_tick_waits_for_the_next_one() {
        let (handle, mut session) = session(&[], Cell::new(5, 5));
        let mut surface = LateTapper {
            handle,
            at: center(Cell::new(4, 5)),
        };
        let start = Instant::now();

        session.tick(&mut surface, start);
        assert_eq!(session.engine().turn(), 0);
        assert!(!session.engine().grid()[Cell::new(4, 5)]);

        session.tick(&mut surface, ms(start, 10));
        assert_eq!(session.engine().turn(), 1);
        assert!(session.engine().grid()[Cell::new(4, 5)]);
        // the press submitted during the second tick is still pending
        assert_eq!(session.queue.parked_len(), 0);
        assert_eq!(session.queue.drain().len(), 1);
    }

    #[test]
    fn press_during_the_reset_tick_survives_into_the_new_round() {
        let center_cell = Cell::new(5, 5);
        let mut ring: Vec<Cell> = center_cell.neighbors(EDGE_SIZE).collect();
        let gap = ring.pop().unwrap();
        let (handle, mut session) = session(&ring, center_cell);
        let start = Instant::now();
        tap(&handle, gap);
        session.tick(&mut Recorder::square(), start);
        assert_eq!(session.engine().ending(), Some(Ending::Won));

        // submitted before the reset tick, dropped with the finished round
        tap(&handle, Cell::new(1, 1));
        let mut late = LateTapper {
            handle,
            at: (20.0, 30.0),
        };
        session.tick(&mut late, ms(start, 1500));

        assert_eq!(session.engine().turn(), 0);
        let pending: Vec<Signal> = session.queue.drain().iter().map(Queued::signal).collect();
        assert_eq!(pending, vec![Signal::Press { x: 20.0, y: 30.0 }]);
    }
}
