//! Prey agent: grazes vegetation, starves without it, breeds when fed.

use crate::grid::Bounds;
use crate::rng::SimRng;

/// A prey agent on the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prey {
    pub x: u16,
    pub y: u16,
    /// Vegetation eaten this generation; reset by reproduction.
    pub eaten: u32,
    /// Set externally when a predator consumes this agent.
    pub dead: bool,
}

impl Prey {
    /// Create a prey at an explicit position with zero feeding state.
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            eaten: 0,
            dead: false,
        }
    }

    /// Create a prey at a random position on a grid of the given size.
    pub fn spawn(rng: &mut SimRng, size: u16) -> Self {
        Self::new(rng.coord(size), rng.coord(size))
    }

    /// Take one movement step: an independent {-1, 0, +1} offset per axis,
    /// resolved against the boundary policy.
    pub fn step(&mut self, rng: &mut SimRng, bounds: &Bounds) {
        let (dx, dy) = rng.prey_offset();
        self.x = bounds.resolve(i32::from(self.x) + dx);
        self.y = bounds.resolve(i32::from(self.y) + dy);
    }

    /// Accumulate vegetation eaten at the current cell (0 or 1).
    pub fn eat(&mut self, amount: u32) {
        self.eaten += amount;
    }

    /// Produce one offspring at this position. Resets the parent's feeding
    /// accumulator as a side effect.
    pub fn reproduce(&mut self) -> Prey {
        self.eaten = 0;
        Prey::new(self.x, self.y)
    }

    /// Mark this agent as consumed. Idempotent.
    pub fn kill(&mut self) {
        self.dead = true;
    }

    /// Whether this agent found no food this generation.
    pub fn starved(&self) -> bool {
        self.eaten < 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_in_bounds() {
        let mut rng = SimRng::seeded(5);
        for _ in 0..100 {
            let prey = Prey::spawn(&mut rng, 40);
            assert!(prey.x < 40 && prey.y < 40);
            assert_eq!(prey.eaten, 0);
            assert!(!prey.dead);
        }
    }

    #[test]
    fn test_step_stays_in_bounds() {
        let mut rng = SimRng::seeded(9);
        for &wrap in &[true, false] {
            let bounds = Bounds::new(5, wrap);
            let mut prey = Prey::new(4, 4);
            for _ in 0..500 {
                prey.step(&mut rng, &bounds);
                assert!(prey.x < 5 && prey.y < 5);
            }
        }
    }

    #[test]
    fn test_eat_accumulates() {
        let mut prey = Prey::new(0, 0);
        prey.eat(0);
        assert_eq!(prey.eaten, 0);
        assert!(prey.starved());
        prey.eat(1);
        prey.eat(1);
        assert_eq!(prey.eaten, 2);
        assert!(!prey.starved());
    }

    #[test]
    fn test_reproduce_resets_parent_and_child() {
        let mut prey = Prey::new(7, 3);
        prey.eat(1);

        let child = prey.reproduce();
        assert_eq!((child.x, child.y), (7, 3));
        assert_eq!(child.eaten, 0);
        assert!(!child.dead);
        assert_eq!(prey.eaten, 0);
    }

    #[test]
    fn test_kill_idempotent() {
        let mut prey = Prey::new(0, 0);
        prey.kill();
        prey.kill();
        assert!(prey.dead);
    }
}
