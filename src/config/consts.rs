// src/config/consts.rs

// Net config
pub const HOST: &str = "www.kraland.org";
pub const PLATEAU_PATH: &str = "/jouer/plateau";
pub const INTERFACE_PATH: &str = "/profil/interface";

// Aggregation backend
pub const BACKEND_HOST: &str = "127.0.0.1";
pub const BACKEND_PORT: u16 = 8080;
pub const BACKEND_PREFIX: &str = "/krabot/characteristics";

// Local cache
pub const STORE_DIR: &str = ".store";
pub const API_KEY_FILE: &str = "api_key";
pub const SNAPSHOT_PREFIX: &str = "snapshot_";
pub const DEFAULT_SCOPE: &str = "default";

// Snapshot expiry: 1 hour
pub const SNAPSHOT_TTL_MS: u64 = 60 * 60 * 1000;

// Watch cycle
pub const REFRESH_INTERVAL_SECS: u64 = 30;

// Capability gate: viewports at or below this are "mobile", layout unreliable
pub const MOBILE_MAX_WIDTH: u32 = 767;

// Heading text of the in-page companion panel; never a character name
pub const BANNED_NAMES: &[&str] = &[
    "Krabot - Caractéristiques",
    "Krabot - Caracteristiques",
    "(no name)",
];

// Class of the in-page companion panel; hidden during fallback scans
pub const OWN_PANEL_CLASS: &str = "krabot-panel";

// User-directory error bodies are truncated to this before display
pub const ERROR_BODY_MAX: usize = 300;
