use ndarray::Array2;

use super::*;

/// Every cell except start and goal independently becomes a wall with the configured probability.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMazeGenerator {
    seed: u64,
}

impl RandomMazeGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MazeGenerator for RandomMazeGenerator {
    fn generate(self, config: MazeConfig) -> Grid {
        use rand::prelude::*;

        let probability = if (0.0..=1.0).contains(&config.wall_probability) {
            config.wall_probability
        } else {
            log::warn!(
                "Wall probability {} out of range, generating an open grid instead",
                config.wall_probability
            );
            0.0
        };

        let size = config.size;
        let start = config.start();
        let goal = config.goal();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut wall_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for row in 0..size.0 {
            for col in 0..size.1 {
                let coords = (row, col);
                if coords == start || coords == goal {
                    continue;
                }
                wall_mask[coords.to_nd_index()] = rng.random_bool(probability);
            }
        }

        let grid = Grid::from_mask_unchecked(wall_mask);
        log::debug!(
            "generated {:?} maze from seed {} with {} walls",
            size,
            self.seed,
            grid.wall_count()
        );
        grid
    }
}
