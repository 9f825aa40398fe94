use crate::config::Config;
use crate::game::note::{Note, NoteRenderInfo};
use log::{info, trace};

/// Half-width of the judgment window around track position zero (exclusive).
pub const HIT_WINDOW: f32 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitEvent {
    pub rail: usize,
    pub note_spawn_beat: f32,
    /// Playhead beat at which the hit was judged.
    pub beat: f32,
}

/// Sole owner of the live notes. Every note leaves the field either by being
/// hit or by outliving `2 * preview_beats`.
#[derive(Debug, Clone)]
pub struct NoteField {
    notes: Vec<Note>,
    note_distance: f32,
    spawn_distance: f32,
    lifetime_beats: f32,
}

impl NoteField {
    pub fn from_config(config: &Config) -> Self {
        Self {
            notes: Vec::new(),
            note_distance: config.note_distance,
            spawn_distance: config.spawn_distance(),
            lifetime_beats: config.note_lifetime_beats(),
        }
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[cfg(test)]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    #[cfg(test)]
    pub fn track_position(&self, note: &Note, current_beat: f32) -> f32 {
        note.track_position(current_beat, self.note_distance, self.spawn_distance)
    }

    /// Retires expired notes, judges the rest against `player_rail` and
    /// returns one event per note hit. Survivors are collected into a fresh
    /// list so no entry is skipped or visited twice.
    pub fn advance(&mut self, current_beat: f32, player_rail: usize) -> Vec<HitEvent> {
        let lifetime = self.lifetime_beats;
        let mut hits = Vec::new();
        let mut survivors = Vec::with_capacity(self.notes.len());

        for note in self.notes.drain(..) {
            let age = note.age(current_beat);
            if age > lifetime {
                trace!("Note on rail {} expired (spawned at beat {:.2}).", note.rail, note.spawn_beat);
                continue;
            }

            let z = note.track_position(current_beat, self.note_distance, self.spawn_distance);
            if -HIT_WINDOW < z && z < HIT_WINDOW && note.rail == player_rail {
                info!("HIT: Rail {}, Beat {:.2}, Depth {:.3}", note.rail, current_beat, z);
                hits.push(HitEvent {
                    rail: note.rail,
                    note_spawn_beat: note.spawn_beat,
                    beat: current_beat,
                });
                continue;
            }

            survivors.push(note);
        }

        self.notes = survivors;
        hits
    }

    pub fn render_info(&self, current_beat: f32) -> Vec<NoteRenderInfo> {
        self.notes
            .iter()
            .map(|note| NoteRenderInfo {
                note: *note,
                position: note.world_position(current_beat, self.note_distance, self.spawn_distance),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn note(rail: usize, spawn_beat: f32) -> Note {
        Note { rail, spawn_beat, x: rail as f32 }
    }

    fn field() -> NoteField {
        NoteField::from_config(&Config::default())
    }

    #[test]
    fn expired_notes_are_dropped_without_hits() {
        let mut field = field();
        field.push(note(0, 0.0));
        field.push(note(1, 5.0));

        for rail in 0..4 {
            let mut f = field.clone();
            let hits = f.advance(20.5, rail);
            assert!(hits.is_empty());
            assert_eq!(f.len(), 1);
            assert_eq!(f.notes()[0].rail, 1);
        }
    }

    #[test]
    fn note_at_exact_lifetime_survives() {
        let mut field = field();
        field.push(note(2, 0.0));
        assert!(field.advance(20.0, 0).is_empty());
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn note_in_window_on_player_rail_is_hit_once() {
        let mut field = field();
        field.push(note(2, 0.0));

        assert!(field.advance(9.5, 2).is_empty());
        assert_eq!(field.len(), 1);

        let hits = field.advance(10.05, 2);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rail, 2);
        assert_relative_eq!(hits[0].note_spawn_beat, 0.0);
        assert_relative_eq!(hits[0].beat, 10.05);
        assert!(field.is_empty());

        assert!(field.advance(10.06, 2).is_empty());
    }

    #[test]
    fn window_bounds_are_exclusive() {
        let mut field = field();
        field.push(note(0, 0.0));
        // Depths just past +1 and -1 are both outside the window.
        assert!(field.advance(9.9, 0).is_empty());
        assert!(field.advance(10.1, 0).is_empty());
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn unmatched_rail_passes_through_until_expiry() {
        let mut field = field();
        field.push(note(3, 0.0));

        assert!(field.advance(10.0, 1).is_empty());
        assert_eq!(field.len(), 1);
        let z = field.track_position(&field.notes()[0], 10.0);
        assert_relative_eq!(z, 0.0);

        assert!(field.advance(15.0, 3).is_empty());
        assert_eq!(field.len(), 1);

        assert!(field.advance(20.01, 3).is_empty());
        assert!(field.is_empty());
    }

    #[test]
    fn only_matching_notes_are_removed() {
        let mut field = field();
        field.push(note(0, 0.0));
        field.push(note(1, 0.0));
        field.push(note(0, 0.02));
        field.push(note(2, 3.0));

        let hits = field.advance(10.0, 0);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.rail == 0));
        let rails: Vec<usize> = field.notes().iter().map(|n| n.rail).collect();
        assert_eq!(rails, vec![1, 2]);
    }

    #[test]
    fn window_and_lifetime_follow_config() {
        let config = Config {
            note_distance: 5.0,
            preview_beats: 8,
            ..Config::default()
        };
        let mut field = NoteField::from_config(&config);
        field.push(note(1, 0.0));
        field.push(note(2, 0.0));

        // Spawn depth 40 at 5 per beat reaches the judgment line after 8 beats.
        assert_relative_eq!(field.track_position(&field.notes()[0], 0.0), 40.0);
        assert_eq!(field.advance(8.0, 1).len(), 1);

        assert!(field.advance(16.0, 0).is_empty());
        assert_eq!(field.len(), 1);
        assert!(field.advance(16.01, 0).is_empty());
        assert!(field.is_empty());
    }

    #[test]
    fn render_info_reports_depth() {
        let mut field = field();
        field.push(note(1, 2.0));
        let info = field.render_info(7.0);
        assert_eq!(info.len(), 1);
        assert_relative_eq!(info[0].position.z, 50.0);
        assert_relative_eq!(info[0].position.x, 1.0);
    }
}
