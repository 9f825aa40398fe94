use crate::core::input::RailMove;

/// The player's discrete lane. Moves one rail per input edge and stops at the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRailState {
    current_rail: usize,
    rail_count: usize,
}

impl PlayerRailState {
    pub fn new(rail_count: usize, start_rail: usize) -> Self {
        let rail_count = rail_count.max(1);
        Self {
            current_rail: start_rail.min(rail_count - 1),
            rail_count,
        }
    }

    #[inline(always)]
    pub fn current_rail(&self) -> usize {
        self.current_rail
    }

    pub fn move_left(&mut self) {
        if self.current_rail > 0 {
            self.current_rail -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.current_rail + 1 < self.rail_count {
            self.current_rail += 1;
        }
    }

    pub fn apply(&mut self, mv: RailMove) {
        match mv {
            RailMove::Left => self.move_left(),
            RailMove::Right => self.move_right(),
        }
    }

    #[inline(always)]
    pub fn x_position(&self, rail_start_x: f32, rail_spacing_x: f32) -> f32 {
        rail_start_x + rail_spacing_x * self.current_rail as f32
    }
}
