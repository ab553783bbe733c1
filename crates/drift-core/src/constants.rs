use crate::color::Rgb;

// Shared tuning constants for the particle field and its effects.

// Population
pub const AREA_PER_PARTICLE: f32 = 6000.0; // baseline = floor(area / this)
pub const MAX_PARTICLES: usize = 350; // ceiling for effect-driven spawning
pub const SPAWN_GRID_SLICES: u32 = 6; // initial placement uses a 6x6 grid
pub const SPAWN_GRID_INSET: f32 = 20.0;

// Node motion
pub const RESET_MARGIN: f32 = 200.0; // distance past the edge before a node recycles
pub const RESPAWN_OFFSET: f32 = 100.0; // distance outside the edge a recycled node starts at
pub const Z_MIN: f32 = 0.4;
pub const Z_SPAN: f32 = 0.8;
pub const SPEED_MIN: f32 = 0.3;
pub const SPEED_SPAN: f32 = 0.8;
pub const TRANSITION_SPEED_BOOST: f32 = 0.8;
pub const PARALLAX_DEPTH_FACTOR: f32 = 0.4;
pub const SCALE_OFFSET_PER_TRANSITION: f32 = 4.0;

// Trail history
pub const HISTORY_LEN_MIN: usize = 12;
pub const HISTORY_LEN_SPAN: usize = 28;
pub const HISTORY_TRANSITION_SLACK: f32 = 6.0;

// Hue
pub const HUE_TIME_RATE: f64 = 0.05; // degrees per millisecond
pub const HUE_POSITION_RATE: f32 = 0.2;
pub const HUE_DEPTH_RATE: f32 = 150.0;

// Pointer interaction
pub const MOUSE_RADIUS: f32 = 120.0;
pub const INTERACT_RADIUS_BOOST: f32 = 1.5;
pub const STATIC_FORCE: f32 = 12.0;
pub const STATIC_FORCE_BOOST: f32 = 2.0;
pub const FLASH_FRAMES: u8 = 6;
pub const POINTER_PARKED: f32 = -1000.0; // where the pointer is parked after leaving the window

// Corner triggers
pub const TRIGGER_MARGIN: f32 = 60.0;

// Transition smoothing (fraction of the remaining distance per frame, ~60Hz assumed)
pub const TRANSITION_RATE: f32 = 0.04;
pub const TEARDOWN_EPSILON: f32 = 0.01;

// Connections
pub const LINK_BASE_DIST: f32 = 90.0;
pub const LINK_DIST_BOOST: f32 = 150.0;
pub const LINK_MAX_DEPTH_DIFF: f32 = 1.0;
pub const LINK_BASE_OPACITY: f32 = 0.18;
pub const LINK_OPACITY_BOOST: f32 = 0.25;
pub const LINK_JAG: f32 = 18.0; // midpoint jitter span of a freaking connection

// Accent colors used outside of effects (orange, cyan, emerald)
pub const ACCENT_COLORS: [Rgb; 3] = [
    Rgb::new(255, 106, 0),
    Rgb::new(0, 229, 255),
    Rgb::new(28, 231, 131),
];
