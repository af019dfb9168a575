use super::*;

/// Purely random wall placement: one pick per row-length, duplicates simply
/// land on an existing wall, so boards carry at most `edge_size` walls and
/// often a few less.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    spawn: SpawnPolicy,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, spawn: SpawnPolicy) -> Self {
        Self { seed, spawn }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> BoardLayout {
        use rand::prelude::*;
        use SpawnPolicy::*;

        // configs built field by field or deserialized skip the clamp in `GameConfig::new`
        let edge = config.edge_size.max(GameConfig::MIN_EDGE_SIZE);
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let spawn = match self.spawn {
            Centre => Cell::new(edge / 2, edge / 2),
            Random => {
                let margin = (edge / 4).max(1);
                let range = margin..edge - margin;
                Cell::new(rng.random_range(range.clone()), rng.random_range(range))
            }
        };

        let mut grid = HexGrid::new(edge);
        let mut duplicates = 0;
        for _ in 0..edge {
            let cell = Cell::new(rng.random_range(0..edge), rng.random_range(0..edge));
            if grid.block(cell) == Ok(BlockOutcome::NoChange) {
                duplicates += 1;
            }
        }

        // the agent and the cell west of it always start open
        grid.open(spawn);
        if let Some(west) = spawn.step(Direction::West, edge) {
            grid.open(west);
        }

        log::debug!(
            "Generated board with {} walls ({} duplicate picks), spawn at {}",
            grid.wall_count(),
            duplicates,
            spawn
        );
        BoardLayout { grid, spawn }
    }
}
