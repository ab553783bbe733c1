// Front-end tuning. Simulation constants live in drift-core.

// Frames slower than this are reported (two 60Hz frames)
pub const SLOW_FRAME_MS: f64 = 34.0;
// Minimum gap between slow-frame reports
pub const SLOW_FRAME_REPORT_SECS: u64 = 5;
