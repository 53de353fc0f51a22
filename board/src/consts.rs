//! Shared constants for the board crate.

// ── Gestures ────────────────────────────────────────────────────

/// Maximum per-axis pointer travel, in screen pixels, for a press/release
/// pair to count as a click. Travel equal to the threshold is still a click.
pub const CLICK_THRESHOLD_PX: f64 = 3.0;

// ── Notes ───────────────────────────────────────────────────────

/// Rendered note width in board units.
pub const NOTE_WIDTH: f64 = 200.0;

/// Rendered note height in board units.
pub const NOTE_HEIGHT: f64 = 200.0;

/// Maximum note content length in characters.
pub const MAX_CONTENT_CHARS: usize = 120;

/// Cosmetic tilt range in degrees; rotation falls in `[-MAX, MAX]`.
pub const MAX_ROTATION_DEG: f64 = 3.0;

/// Board-space step between successive newly created notes so they fan out
/// instead of landing exactly on top of each other.
pub const CREATE_CASCADE_STEP: f64 = 24.0;

/// Number of cascade steps before the offset wraps back to zero.
pub const CREATE_CASCADE_WRAP: u64 = 5;

// ── Stacking ────────────────────────────────────────────────────

/// Lowest z-index handed out at load time.
pub const Z_BASE: i64 = 1;

// ── Palette ─────────────────────────────────────────────────────

/// Allowed note colors.
pub const COLORS: [&str; 8] = [
    "#ffadad", // light red
    "#ffd6a5", // light orange
    "#fdffb6", // light yellow
    "#caffbf", // light green
    "#9bf6ff", // light blue
    "#a0c4ff", // light indigo
    "#bdb2ff", // light violet
    "#ffc6ff", // light pink
];

/// Color used when the caller does not pick one.
pub const DEFAULT_COLOR: &str = COLORS[0];
