use cgmath::Vector3;

/// One falling note. Its track position is derived from its age on demand.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Note {
    pub rail: usize,
    /// Playhead beat at which the note was spawned.
    pub spawn_beat: f32,
    /// Horizontal world coordinate of the note's rail.
    pub x: f32,
}

impl Note {
    #[inline(always)]
    pub fn age(&self, current_beat: f32) -> f32 {
        current_beat - self.spawn_beat
    }

    /// Depth along the track: `spawn_distance` at spawn, zero at the
    /// judgment line, negative once it has passed the player.
    #[inline(always)]
    pub fn track_position(&self, current_beat: f32, note_distance: f32, spawn_distance: f32) -> f32 {
        spawn_distance - note_distance * self.age(current_beat)
    }

    pub fn world_position(&self, current_beat: f32, note_distance: f32, spawn_distance: f32) -> Vector3<f32> {
        Vector3::new(
            self.x,
            0.0,
            self.track_position(current_beat, note_distance, spawn_distance),
        )
    }
}

/// A live note paired with where it should be drawn this frame.
#[derive(Copy, Clone, Debug)]
pub struct NoteRenderInfo {
    pub note: Note,
    pub position: Vector3<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn track_position_recedes_with_age() {
        let note = Note { rail: 0, spawn_beat: 4.0, x: -2.25 };
        assert_relative_eq!(note.track_position(4.0, 10.0, 100.0), 100.0);
        assert_relative_eq!(note.track_position(9.0, 10.0, 100.0), 50.0);
        assert_relative_eq!(note.track_position(14.0, 10.0, 100.0), 0.0);
        assert_relative_eq!(note.track_position(16.0, 10.0, 100.0), -20.0);
    }

    #[test]
    fn world_position_keeps_rail_x() {
        let note = Note { rail: 2, spawn_beat: 0.0, x: 0.75 };
        let pos = note.world_position(5.0, 10.0, 100.0);
        assert_relative_eq!(pos.x, 0.75);
        assert_relative_eq!(pos.y, 0.0);
        assert_relative_eq!(pos.z, 50.0);
    }
}
