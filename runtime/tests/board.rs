use hexcat_core::*;
use hexcat_runtime::{Board, LoopConfig, RuntimeError, Surface};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

const SIZE: SurfaceSize = SurfaceSize::new(1150.0, 1150.0);

#[derive(Clone, Default)]
struct SharedFrames(Arc<Mutex<Vec<BoardView>>>);

impl SharedFrames {
    fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    fn last(&self) -> Option<BoardView> {
        self.0.lock().unwrap().last().cloned()
    }

    fn wait_for(&self, what: impl Fn(&[BoardView]) -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if what(&self.0.lock().unwrap()) {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }
}

struct TestSurface {
    frames: SharedFrames,
    broken: bool,
}

impl TestSurface {
    fn new(frames: &SharedFrames) -> Self {
        Self {
            frames: frames.clone(),
            broken: false,
        }
    }
}

impl Surface for TestSurface {
    fn dimensions(&self) -> Option<SurfaceSize> {
        Some(SIZE)
    }

    fn present(&mut self, view: &BoardView, _geometry: &BoardGeometry) {
        if self.broken {
            panic!("surface went away");
        }
        self.frames.0.lock().unwrap().push(view.clone());
    }
}

fn board() -> Board<TestSurface> {
    let layout = BoardLayout::from_walls(EDGE_SIZE, &[], Cell::new(5, 5)).unwrap();
    let engine = GameEngine::new(GameConfig::default(), layout);
    let config = LoopConfig {
        animation_step_ms: 5,
        reset_delay_ms: 20,
        seed: Some(11),
    };
    Board::from_engine(engine, config)
}

fn center_of(cell: Cell) -> (f32, f32) {
    BoardGeometry::new(EDGE_SIZE, SIZE).cell_center(cell)
}

#[test]
fn attaching_a_surface_draws_a_frame() {
    let frames = SharedFrames::default();
    let mut board = board();

    board.attach_surface(TestSurface::new(&frames)).unwrap();

    assert!(board.is_running());
    assert!(frames.wait_for(|frames| !frames.is_empty()));
    assert!(board.engine().is_none());
}

#[test]
fn press_from_another_thread_plays_a_turn() {
    let frames = SharedFrames::default();
    let mut board = board();
    board.attach_surface(TestSurface::new(&frames)).unwrap();

    let input = board.input_handle();
    let (x, y) = center_of(Cell::new(4, 5));
    thread::spawn(move || input.submit_pointer_press(x, y))
        .join()
        .unwrap();

    assert!(frames.wait_for(|frames| {
        frames
            .last()
            .is_some_and(|view| view.turn == 1 && view.state == TurnState::Idle)
    }));
    board.pause();

    let engine = board.engine().unwrap();
    assert!(engine.grid()[Cell::new(4, 5)]);
    assert_eq!(engine.agent_position(), Some(Cell::new(6, 5)));
}

#[test]
fn nothing_is_drawn_after_pause_returns() {
    let frames = SharedFrames::default();
    let mut board = board();
    board.attach_surface(TestSurface::new(&frames)).unwrap();
    let (x, y) = center_of(Cell::new(1, 1));
    board.submit_pointer_press(x, y);
    assert!(frames.wait_for(|frames| frames.iter().any(|view| view.animating)));

    board.pause();
    let drawn = frames.len();
    thread::sleep(Duration::from_millis(50));

    assert!(!board.is_running());
    assert_eq!(frames.len(), drawn);
}

#[test]
fn pause_and_resume_are_idempotent() {
    let frames = SharedFrames::default();
    let mut board = board();

    board.pause();
    board.resume().unwrap();
    assert!(!board.is_running());

    board.attach_surface(TestSurface::new(&frames)).unwrap();
    board.resume().unwrap();
    assert!(board.is_running());

    board.pause();
    board.pause();
    assert!(!board.is_running());

    board.resume().unwrap();
    assert!(board.is_running());
    assert!(board.detach_surface().is_some());
    assert!(!board.is_running());
}

#[test]
fn reset_while_paused_applies_immediately() {
    let frames = SharedFrames::default();
    let mut board = board();
    board.attach_surface(TestSurface::new(&frames)).unwrap();
    let (x, y) = center_of(Cell::new(1, 1));
    board.submit_pointer_press(x, y);
    assert!(frames.wait_for(|frames| frames.iter().any(|view| view.turn == 1)));
    board.pause();

    board.request_reset();

    let engine = board.engine().unwrap();
    assert_eq!(engine.turn(), 0);
    assert_eq!(engine.state(), TurnState::Idle);
}

#[test]
fn reset_request_reaches_a_running_worker() {
    let frames = SharedFrames::default();
    let mut board = board();
    board.attach_surface(TestSurface::new(&frames)).unwrap();
    let (x, y) = center_of(Cell::new(1, 1));
    board.submit_pointer_press(x, y);
    assert!(frames.wait_for(|frames| frames.iter().any(|view| view.turn == 1)));

    board.request_reset();

    assert!(frames.wait_for(|frames| frames.last().is_some_and(|view| view.turn == 0)));
    assert_eq!(frames.last().map(|view| view.state), Some(TurnState::Idle));
}

#[test]
fn panicked_worker_leaves_the_board_stopped() {
    let mut board = board();
    let surface = TestSurface {
        broken: true,
        ..TestSurface::new(&SharedFrames::default())
    };
    board.attach_surface(surface).unwrap();

    board.pause();

    assert!(!board.is_running());
    assert!(board.engine().is_none());
    assert!(matches!(board.resume(), Err(RuntimeError::SessionLost)));
}
