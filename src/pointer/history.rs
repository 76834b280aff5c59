use super::types::{Movement, PositionSample};

pub fn compute_movement(from: &PositionSample, to: &PositionSample) -> Movement {
    let dx = to.x() - from.x();
    let dy = to.y() - from.y();
    let distance = dx.hypot(dy);
    // Coalesced events can share a timestamp; out-of-order ones saturate to zero.
    let duration_ms = to.t_ms().saturating_sub(from.t_ms());
    let (speed_x, speed_y, speed_total) = if duration_ms == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let duration = duration_ms as f64;
        (dx / duration, dy / duration, distance / duration)
    };
    Movement {
        dx,
        dy,
        distance,
        speed_x,
        speed_y,
        speed_total,
        duration_ms,
    }
}

/// Append-only record of every sample of one session.
#[derive(Clone, Debug)]
pub struct PositionHistory {
    samples: Vec<PositionSample>,
}

impl PositionHistory {
    pub fn new(first: PositionSample) -> Self {
        Self {
            samples: vec![first],
        }
    }

    pub fn push(&mut self, sample: PositionSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Never true: a history is created with its first sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.samples.len() - 1
    }

    pub fn first(&self) -> &PositionSample {
        &self.samples[0]
    }

    pub fn last(&self) -> &PositionSample {
        &self.samples[self.last_index()]
    }

    pub fn get(&self, index: usize) -> Option<&PositionSample> {
        self.samples.get(index)
    }

    pub fn samples(&self) -> &[PositionSample] {
        &self.samples
    }

    /// `None` unless `from <= to < len()`.
    pub fn movement_between(&self, from: usize, to: usize) -> Option<Movement> {
        if from > to {
            return None;
        }
        let a = self.samples.get(from)?;
        let b = self.samples.get(to)?;
        Some(compute_movement(a, b))
    }

    pub fn absolute_movement(&self) -> Movement {
        compute_movement(self.first(), self.last())
    }

    pub fn relative_movement(&self) -> Movement {
        match self.samples.len() {
            0 | 1 => Movement::default(),
            len => compute_movement(&self.samples[len - 2], &self.samples[len - 1]),
        }
    }
}
