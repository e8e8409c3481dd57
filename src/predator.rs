//! Predator agent: hunts co-located prey, starves after too many empty
//! generations, breeds after a successful hunt.

use crate::grid::{Bounds, SpatialIndex};
use crate::prey::Prey;
use crate::rng::SimRng;

/// A predator agent on the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predator {
    pub x: u16,
    pub y: u16,
    /// Prey consumed this generation.
    pub eaten: u32,
    /// Consecutive foodless generations so far.
    pub starvation_counter: u32,
    /// Foodless generations tolerated before death.
    starvation_threshold: u32,
}

impl Predator {
    /// Create a predator at an explicit position with zero feeding state.
    pub fn new(x: u16, y: u16, starvation_threshold: u32) -> Self {
        Self {
            x,
            y,
            eaten: 0,
            starvation_counter: 0,
            starvation_threshold,
        }
    }

    /// Create a predator at a random position on a grid of the given size.
    pub fn spawn(rng: &mut SimRng, size: u16, starvation_threshold: u32) -> Self {
        Self::new(rng.coord(size), rng.coord(size), starvation_threshold)
    }

    /// Take one movement step: an independent {-2, 0, +2} offset per axis,
    /// twice the prey stride.
    pub fn step(&mut self, rng: &mut SimRng, bounds: &Bounds) {
        let (dx, dy) = rng.predator_offset();
        self.x = bounds.resolve(i32::from(self.x) + dx);
        self.y = bounds.resolve(i32::from(self.y) + dy);
    }

    /// Consume every prey sharing this predator's cell: each co-located prey
    /// is marked dead and counts one toward `eaten`. No per-step cap.
    ///
    /// Prey already killed by another predator this generation still count;
    /// they stay in place until the survive phase removes them.
    pub fn eat(&mut self, prey: &mut [Prey], index: &SpatialIndex) {
        for &idx in index.at(self.x, self.y) {
            self.eaten += 1;
            prey[idx].kill();
        }
    }

    /// Advance starvation accounting for this generation. Returns true when
    /// the predator has gone `starvation_threshold` consecutive generations
    /// without food and must die.
    pub fn starve(&mut self) -> bool {
        self.starvation_counter += 1;
        if self.eaten > 0 {
            self.starvation_counter = 0;
        }
        self.starvation_counter >= self.starvation_threshold && self.eaten == 0
    }

    /// Produce one offspring at this position with feeding and starvation
    /// state reset.
    pub fn reproduce(&self) -> Predator {
        Predator::new(self.x, self.y, self.starvation_threshold)
    }

    /// Clear the per-generation feeding signal. Called by the field once
    /// starvation and reproduction have both read it.
    pub fn reset_feeding(&mut self) {
        self.eaten = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_for(prey: &[Prey], size: usize) -> SpatialIndex {
        let mut index = SpatialIndex::new(size);
        for (i, p) in prey.iter().enumerate() {
            index.insert(p.x, p.y, i);
        }
        index
    }

    #[test]
    fn test_eat_kills_all_colocated_prey() {
        let mut prey = vec![Prey::new(3, 3), Prey::new(3, 3), Prey::new(4, 3)];
        let index = index_for(&prey, 10);

        let mut fox = Predator::new(3, 3, 10);
        fox.eat(&mut prey, &index);

        assert_eq!(fox.eaten, 2);
        assert!(prey[0].dead);
        assert!(prey[1].dead);
        assert!(!prey[2].dead);
    }

    #[test]
    fn test_eat_nothing_when_alone() {
        let mut prey = vec![Prey::new(0, 0)];
        let index = index_for(&prey, 10);

        let mut fox = Predator::new(9, 9, 10);
        fox.eat(&mut prey, &index);
        assert_eq!(fox.eaten, 0);
        assert!(!prey[0].dead);
    }

    #[test]
    fn test_starves_at_exactly_threshold() {
        let mut fox = Predator::new(0, 0, 3);
        // Dies after exactly 3 foodless generations, not 2 or 4.
        assert!(!fox.starve());
        assert!(!fox.starve());
        assert!(fox.starve());
    }

    #[test]
    fn test_feeding_resets_starvation_counter() {
        let mut fox = Predator::new(0, 0, 3);
        assert!(!fox.starve());
        assert!(!fox.starve());
        assert_eq!(fox.starvation_counter, 2);

        // A single meal in the nick of time resets the clock.
        fox.eaten = 1;
        assert!(!fox.starve());
        assert_eq!(fox.starvation_counter, 0);

        fox.reset_feeding();
        assert!(!fox.starve());
        assert!(!fox.starve());
        assert!(fox.starve());
    }

    #[test]
    fn test_reproduce_resets_offspring_state() {
        let mut fox = Predator::new(5, 6, 10);
        fox.eaten = 3;
        fox.starvation_counter = 4;

        let cub = fox.reproduce();
        assert_eq!((cub.x, cub.y), (5, 6));
        assert_eq!(cub.eaten, 0);
        assert_eq!(cub.starvation_counter, 0);
    }

    #[test]
    fn test_step_stays_in_bounds() {
        let mut rng = SimRng::seeded(13);
        for &wrap in &[true, false] {
            let bounds = Bounds::new(5, wrap);
            let mut fox = Predator::new(4, 4, 10);
            for _ in 0..500 {
                fox.step(&mut rng, &bounds);
                assert!(fox.x < 5 && fox.y < 5);
            }
        }
    }
}
