use log::debug;

/// Tracks the playhead in beats and reports each new integer row threshold.
#[derive(Debug, Clone)]
pub struct BeatClock {
    beats_per_second: f32,
    time_offset: f32,
    elapsed_beats: f32,
    last_processed_index: i64,
}

impl BeatClock {
    pub fn new(beats_per_second: f32, time_offset: f32) -> Self {
        Self {
            beats_per_second,
            time_offset,
            elapsed_beats: 0.0,
            last_processed_index: 0,
        }
    }

    pub fn elapsed_beats(&self) -> f32 {
        self.elapsed_beats
    }

    pub fn last_processed_index(&self) -> i64 {
        self.last_processed_index
    }

    /// Advances the playhead by `delta_time` seconds.
    ///
    /// Returns the new integer beat index when it moved past the last one
    /// processed. At most one index is reported per call: if a long frame
    /// crosses several thresholds, only the latest is returned and the ones in
    /// between are never reported.
    pub fn tick(&mut self, delta_time: f32) -> Option<i64> {
        self.elapsed_beats += delta_time * self.beats_per_second;

        let candidate = (self.elapsed_beats - self.time_offset).floor() as i64;
        if candidate <= self.last_processed_index {
            return None;
        }

        let skipped = candidate - self.last_processed_index - 1;
        if skipped > 0 && self.last_processed_index > 0 {
            debug!(
                "Frame stall skipped {} beat(s) before index {}.",
                skipped, candidate
            );
        }
        self.last_processed_index = candidate;
        Some(candidate)
    }
}
