use crate::config::Config;
use crate::core::input::RailMove;
use crate::game::chart::{Chart, LoadStatus};
use crate::game::effects::{ActiveHitEffect, HitEffects};
use crate::game::field::{HitEvent, NoteField};
use crate::game::note::{Note, NoteRenderInfo};
use crate::game::player::PlayerRailState;
use crate::game::spawn::NoteSpawner;
use crate::game::timing::BeatClock;
use cgmath::Vector3;
use log::{info, warn};

/// What happened during one call to [`update`].
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub beat_index: Option<i64>,
    pub spawned: Option<Note>,
    pub hits: Vec<HitEvent>,
}

/// One play session. Constructed explicitly and passed to the input and
/// render glue; nothing here is global.
pub struct State {
    pub config: Config,
    pub chart: Chart,
    pub clock: BeatClock,
    pub spawner: NoteSpawner,
    pub field: NoteField,
    pub player: PlayerRailState,
    pub effects: HitEffects,

    pub hits_total: u32,
    pub notes_spawned: u32,
    log_timer: f32,
}

pub fn init(config: Config, chart: Chart) -> State {
    info!("Initializing gameplay: {} ({} rows).", chart.load_message(), chart.len());
    if chart.is_empty() {
        warn!("Chart has no rows; no notes will spawn.");
    }
    info!(
        "BPM {:.1}, time offset {:.1}, row offset {}, preview {} beats, {} rails.",
        config.bpm,
        config.time_offset,
        config.index_offset(),
        config.preview_beats,
        config.rail_count
    );

    State {
        clock: BeatClock::new(config.beats_per_second(), config.time_offset),
        spawner: NoteSpawner::from_config(&config),
        field: NoteField::from_config(&config),
        player: PlayerRailState::new(config.rail_count, config.start_rail),
        effects: HitEffects::new(config.hit_effect_seconds),
        hits_total: 0,
        notes_spawned: 0,
        log_timer: 0.0,
        config,
        chart,
    }
}

pub fn handle_move(state: &mut State, mv: RailMove) {
    state.player.apply(mv);
}

#[inline(always)]
pub fn player_position(state: &State) -> Vector3<f32> {
    Vector3::new(
        state
            .player
            .x_position(state.config.player_rail_start_x, state.config.player_rail_spacing_x),
        0.0,
        0.0,
    )
}

#[inline(always)]
pub fn current_beat(state: &State) -> f32 {
    state.clock.elapsed_beats()
}

/// Chart row requested for beat trigger `beat_index`.
#[inline(always)]
pub fn row_for_beat_index(config: &Config, beat_index: i64) -> i64 {
    beat_index + config.index_offset() + config.preview_beats as i64
}

/// Advances the session by one frame: clock, spawn, judge, effects.
pub fn update(state: &mut State, delta_time: f32) -> TickReport {
    let mut report = TickReport {
        beat_index: state.clock.tick(delta_time),
        ..TickReport::default()
    };

    // Degraded charts still hold a marker row, so only a loaded chart may spawn.
    let beat = current_beat(state);
    if let Some(t) = report.beat_index {
        if state.chart.status() == LoadStatus::Loaded {
            let row = row_for_beat_index(&state.config, t);
            if let Some(note) = state.spawner.spawn(row, &state.chart, beat) {
                state.field.push(note);
                state.notes_spawned = state.notes_spawned.saturating_add(1);
                report.spawned = Some(note);
            }
        }
    }

    let rail = state.player.current_rail();
    report.hits = state.field.advance(beat, rail);

    state.effects.tick(delta_time);
    if !report.hits.is_empty() {
        let at = player_position(state);
        for _ in &report.hits {
            state.effects.trigger(at);
        }
        state.hits_total = state.hits_total.saturating_add(report.hits.len() as u32);
    }

    state.log_timer += delta_time;
    if state.log_timer >= 1.0 {
        info!(
            "Beat: {:.2}, Row index: {}, Live notes: {}, Rail: {}, Hits: {}",
            current_beat(state),
            state.clock.last_processed_index(),
            state.field.len(),
            state.player.current_rail(),
            state.hits_total
        );
        state.log_timer -= 1.0;
    }

    report
}

/// Live notes with their draw positions for this frame.
pub fn note_render_info(state: &State) -> Vec<NoteRenderInfo> {
    state.field.render_info(current_beat(state))
}

pub fn hit_effects(state: &State) -> &[ActiveHitEffect] {
    state.effects.active()
}

pub fn load_message(state: &State) -> &'static str {
    state.chart.load_message()
}
