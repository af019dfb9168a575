use hexcat_core::{BoardGeometry, BoardView, Cell, Ending, SurfaceSize, TurnState};
use hexcat_runtime::Surface;
use std::fmt::Write;
use std::sync::{Arc, Mutex};

/// Last frame the render worker presented, readable from the prompt thread.
#[derive(Clone, Debug, Default)]
pub(crate) struct SharedView(Arc<Mutex<Option<BoardView>>>);

impl SharedView {
    pub fn get(&self) -> Option<BoardView> {
        self.0.lock().ok().and_then(|view| view.clone())
    }

    fn replace(&self, view: &BoardView) -> Option<BoardView> {
        match self.0.lock() {
            Ok(mut last) => last.replace(view.clone()),
            Err(_) => {
                log::warn!("Frame lock poisoned");
                None
            }
        }
    }
}

/// Prints the board as text whenever something visible changed.
pub(crate) struct TerminalSurface {
    size: SurfaceSize,
    shared: SharedView,
}

impl TerminalSurface {
    pub fn new(size: SurfaceSize, shared: SharedView) -> Self {
        Self { size, shared }
    }
}

impl Surface for TerminalSurface {
    fn dimensions(&self) -> Option<SurfaceSize> {
        Some(self.size)
    }

    fn present(&mut self, view: &BoardView, _geometry: &BoardGeometry) {
        let previous = self.shared.replace(view);
        if previous.is_some_and(|previous| same_picture(&previous, view)) {
            return;
        }
        println!("{}", render(view));
    }
}

/// Animation frames only differ in timing, text output has none.
fn same_picture(a: &BoardView, b: &BoardView) -> bool {
    a.walls == b.walls && a.agent == b.agent && a.state == b.state && a.turn == b.turn
}

fn status(view: &BoardView) -> &'static str {
    match view.state {
        TurnState::Idle => "your move",
        TurnState::Resolving | TurnState::Animating => "cat is moving",
        TurnState::Terminal(Ending::Won) => "cat trapped, you win",
        TurnState::Terminal(Ending::Escaped) => "cat escaped",
    }
}

/// Odd rows are indented half a cell, matching the board's stagger.
pub(crate) fn render(view: &BoardView) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "turn {}: {}", view.turn, status(view));

    for row in 0..view.edge_size {
        if row % 2 == 1 {
            text.push(' ');
        }
        for column in 0..view.edge_size {
            let cell = Cell::new(column, row);
            let glyph = if view.agent == Some(cell) {
                'C'
            } else if view.is_blocked(cell) {
                '#'
            } else {
                '.'
            };
            text.push(glyph);
            if column + 1 < view.edge_size {
                text.push(' ');
            }
        }
        text.push('\n');
    }
    text
}
