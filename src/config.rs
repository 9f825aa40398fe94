use configparser::ini::Ini;
use log::{info, warn};
use once_cell::sync::Lazy;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

pub const CONFIG_INI_PATH: &str = "railbeat.ini";

// Window
pub const WINDOW_TITLE: &str = "RailBeat";
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

/// Tuning for one play session. Defaults match the hardcoded prototype values.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub chart_path: String,
    /// Delay before the first chart row, in beats (negative = rows start early).
    pub time_offset: f32,
    /// Row of the first real beat in the chart, before preview compensation.
    pub index_offset_raw: i64,
    pub bpm: f32,
    /// Distance between consecutive beats along the track.
    pub note_distance: f32,
    /// Number of beats visible on the track at once.
    pub preview_beats: u32,
    pub rail_count: usize,
    pub rail_start_x: f32,
    pub rail_spacing_x: f32,
    pub player_rail_start_x: f32,
    pub player_rail_spacing_x: f32,
    pub start_rail: usize,
    pub hit_effect_seconds: f32,
    /// Upper bound for a single frame delta. 0 disables clamping.
    pub max_delta_time: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chart_path: "example.sm".to_string(),
            time_offset: -10.0,
            index_offset_raw: 38,
            bpm: 210.0,
            note_distance: 10.0,
            preview_beats: 10,
            rail_count: 4,
            rail_start_x: -2.25,
            rail_spacing_x: 1.5,
            player_rail_start_x: -1.0,
            player_rail_spacing_x: 1.0,
            start_rail: 1,
            hit_effect_seconds: 5.0,
            max_delta_time: 0.0,
        }
    }
}

impl Config {
    #[inline(always)]
    pub fn beats_per_second(&self) -> f32 {
        self.bpm / 60.0
    }

    /// Row offset applied to every beat trigger, already compensated for the preview window.
    #[inline(always)]
    pub fn index_offset(&self) -> i64 {
        self.index_offset_raw - self.preview_beats as i64
    }

    /// Track position of a freshly spawned note.
    #[inline(always)]
    pub fn spawn_distance(&self) -> f32 {
        self.note_distance * self.preview_beats as f32
    }

    #[inline(always)]
    pub fn note_lifetime_beats(&self) -> f32 {
        2.0 * self.preview_beats as f32
    }

    pub fn from_ini(conf: &Ini) -> Self {
        let d = Self::default();
        Self {
            chart_path: conf.get("Chart", "Path").unwrap_or(d.chart_path),
            time_offset: read_or(conf, "Timing", "TimeOffset", d.time_offset),
            index_offset_raw: read_or(conf, "Timing", "IndexOffset", d.index_offset_raw),
            bpm: read_or(conf, "Timing", "Bpm", d.bpm),
            note_distance: read_or(conf, "Track", "NoteDistance", d.note_distance),
            preview_beats: read_or(conf, "Track", "PreviewBeats", d.preview_beats),
            rail_count: read_or(conf, "Track", "RailCount", d.rail_count),
            rail_start_x: read_or(conf, "Track", "RailStartX", d.rail_start_x),
            rail_spacing_x: read_or(conf, "Track", "RailSpacingX", d.rail_spacing_x),
            player_rail_start_x: read_or(conf, "Player", "RailStartX", d.player_rail_start_x),
            player_rail_spacing_x: read_or(conf, "Player", "RailSpacingX", d.player_rail_spacing_x),
            start_rail: read_or(conf, "Player", "StartRail", d.start_rail),
            hit_effect_seconds: read_or(conf, "Effects", "HitEffectSeconds", d.hit_effect_seconds),
            max_delta_time: read_or(conf, "Options", "MaxDeltaTime", d.max_delta_time),
        }
    }

    pub fn to_ini(&self) -> Ini {
        let mut conf = Ini::new_cs();
        conf.set("Chart", "Path", Some(self.chart_path.clone()));
        conf.set("Timing", "TimeOffset", Some(self.time_offset.to_string()));
        conf.set("Timing", "IndexOffset", Some(self.index_offset_raw.to_string()));
        conf.set("Timing", "Bpm", Some(self.bpm.to_string()));
        conf.set("Track", "NoteDistance", Some(self.note_distance.to_string()));
        conf.set("Track", "PreviewBeats", Some(self.preview_beats.to_string()));
        conf.set("Track", "RailCount", Some(self.rail_count.to_string()));
        conf.set("Track", "RailStartX", Some(self.rail_start_x.to_string()));
        conf.set("Track", "RailSpacingX", Some(self.rail_spacing_x.to_string()));
        conf.set("Player", "RailStartX", Some(self.player_rail_start_x.to_string()));
        conf.set("Player", "RailSpacingX", Some(self.player_rail_spacing_x.to_string()));
        conf.set("Player", "StartRail", Some(self.start_rail.to_string()));
        conf.set("Effects", "HitEffectSeconds", Some(self.hit_effect_seconds.to_string()));
        conf.set("Options", "MaxDeltaTime", Some(self.max_delta_time.to_string()));
        conf
    }
}

fn read_or<T: FromStr + Copy>(conf: &Ini, section: &str, key: &str, default: T) -> T {
    match conf.get(section, key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                warn!("Invalid value '{}' for [{}] {}, using default.", raw, section, key);
                default
            }
        },
    }
}

static CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| Mutex::new(Config::default()));

/// Reads `path` into a `Config`, writing a default file first if none exists.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        info!("Config '{}' not found, creating defaults.", path.display());
        if let Err(e) = Config::default().to_ini().write(path) {
            warn!("Failed to write default config '{}': {}", path.display(), e);
        }
        return Config::default();
    }

    // Case-sensitive so section and key names round-trip exactly as written.
    let mut conf = Ini::new_cs();
    match conf.load(path) {
        Ok(_) => {
            info!("Loaded config from '{}'.", path.display());
            Config::from_ini(&conf)
        }
        Err(e) => {
            warn!("Failed to load '{}' ({}), using defaults.", path.display(), e);
            Config::default()
        }
    }
}

pub fn load() {
    let loaded = load_from(Path::new(CONFIG_INI_PATH));
    match CONFIG.lock() {
        Ok(mut cfg) => *cfg = loaded,
        Err(poisoned) => *poisoned.into_inner() = loaded,
    }
}

/// Returns a copy of the currently loaded configuration.
pub fn get() -> Config {
    match CONFIG.lock() {
        Ok(cfg) => cfg.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
