use crate::config::GestureConfig;

use super::history::PositionHistory;
use super::types::{Direction, Movement};


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementVerdict {
    Drag,
    Swipe(Direction),
}

#[derive(Clone, Copy, Debug)]
pub struct ClassificationPolicy {
    config: GestureConfig,
}

impl ClassificationPolicy {
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Jitter filter over the absolute (session start to now) movement.
    pub fn is_uncontrolled_move(&self, absolute: &Movement) -> bool {
        let threshold = self.config.move_threshold_px;
        absolute.dx.abs() <= threshold && absolute.dy.abs() <= threshold
    }

    /// Picks the dominant axis of the last step; the x axis wins ties.
    pub fn classify_movement(&self, relative: &Movement) -> MovementVerdict {
        let min_displacement = self.config.swipe_min_displacement_px;
        let adx = relative.dx.abs();
        let ady = relative.dy.abs();

        if adx >= ady {
            if adx >= min_displacement {
                let direction = if relative.dx > 0.0 {
                    Direction::RIGHT
                } else {
                    Direction::LEFT
                };
                return MovementVerdict::Swipe(direction);
            }
        } else if ady >= min_displacement {
            let direction = if relative.dy > 0.0 {
                Direction::BOTTOM
            } else {
                Direction::TOP
            };
            return MovementVerdict::Swipe(direction);
        }

        MovementVerdict::Drag
    }

    /// False once the swipe outlasts its duration limit or the session travels
    /// past the swipe distance ceiling.
    pub fn is_swipe_still_valid(&self, history: &PositionHistory, swipe_start_index: usize) -> bool {
        let elapsed_ms = history
            .movement_between(swipe_start_index, history.last_index())
            .map_or(0, |movement| movement.duration_ms);
        let distance = history.absolute_movement().distance;

        elapsed_ms <= self.config.swipe_duration_limit_ms
            && distance <= self.config.swipe_max_distance_px
    }
}
