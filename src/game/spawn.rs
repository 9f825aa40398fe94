use crate::config::Config;
use crate::game::chart::Chart;
use crate::game::note::Note;
use crate::game::parsing::notes::first_active_rail;
use log::debug;

/// Turns chart rows into notes placed on their rail.
#[derive(Debug, Clone)]
pub struct NoteSpawner {
    rail_count: usize,
    rail_start_x: f32,
    rail_spacing_x: f32,
}

impl NoteSpawner {
    pub fn new(rail_count: usize, rail_start_x: f32, rail_spacing_x: f32) -> Self {
        Self {
            rail_count,
            rail_start_x,
            rail_spacing_x,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.rail_count, config.rail_start_x, config.rail_spacing_x)
    }

    #[inline(always)]
    pub fn rail_x(&self, rail: usize) -> f32 {
        self.rail_start_x + self.rail_spacing_x * rail as f32
    }

    /// Creates the note for chart row `row_index`, if that row exists and has
    /// an active rail. Negative or out-of-range rows and short rows produce nothing.
    pub fn spawn(&self, row_index: i64, chart: &Chart, spawn_beat: f32) -> Option<Note> {
        let index = usize::try_from(row_index).ok()?;
        let row = chart.row(index)?;
        debug!("Row {}: {}", index, row);

        let rail = first_active_rail(row, self.rail_count)?;
        Some(Note {
            rail,
            spawn_beat,
            x: self.rail_x(rail),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spawner() -> NoteSpawner {
        NoteSpawner::from_config(&Config::default())
    }

    #[test]
    fn single_active_rail_spawns_one_note() {
        let chart = Chart::from_rows(["1000", "0000", "1100", "0001"]);
        let note = spawner().spawn(0, &chart, 12.5).unwrap();
        assert_eq!(note.rail, 0);
        assert_relative_eq!(note.spawn_beat, 12.5);
        assert_relative_eq!(note.x, -2.25);

        assert_eq!(spawner().spawn(1, &chart, 0.0), None);

        let chord = spawner().spawn(2, &chart, 0.0).unwrap();
        assert_eq!(chord.rail, 0);

        let last = spawner().spawn(3, &chart, 0.0).unwrap();
        assert_eq!(last.rail, 3);
        assert_relative_eq!(last.x, 2.25);
    }

    #[test]
    fn out_of_range_rows_spawn_nothing() {
        let chart = Chart::from_rows(["1000"]);
        assert_eq!(spawner().spawn(1, &chart, 0.0), None);
        assert_eq!(spawner().spawn(-1, &chart, 0.0), None);
        assert_eq!(spawner().spawn(i64::MAX, &chart, 0.0), None);
    }

    #[test]
    fn short_rows_spawn_nothing() {
        let chart = Chart::from_rows(["10", "File is empty"]);
        assert_eq!(spawner().spawn(0, &chart, 0.0), None);
        // The marker row is long enough and non-idle, so it decodes like any other row.
        assert_eq!(spawner().spawn(1, &chart, 0.0).map(|n| n.rail), Some(0));
    }
}
