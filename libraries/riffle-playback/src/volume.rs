//! Volume control with logarithmic scaling
//!
//! Volume is 0-100% on the control surface and a linear gain at the engine.
//! The mapping goes through dB so equal steps sound like equal changes.

/// Volume step used by `step_up`/`step_down`
const STEP: u8 = 5;

/// Attenuation at 1% volume, in dB
const FLOOR_DB: f32 = -60.0;

/// Volume controller
///
/// 0% = silence, 1% = -60 dB, 100% = 0 dB (unity gain).
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    level: u8,
    muted: bool,
}

impl Volume {
    /// Create a volume controller at `level` (clamped to 100)
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Raise by one step
    pub fn step_up(&mut self) {
        self.set_level(self.level.saturating_add(STEP));
    }

    /// Lower by one step
    pub fn step_down(&mut self) {
        self.set_level(self.level.saturating_sub(STEP));
    }

    /// Current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Mute (level is kept)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain to hand to the engine
    pub fn gain(&self) -> f32 {
        if self.muted || self.level == 0 {
            return 0.0;
        }

        // gain = 10^(dB/20), dB linear in level between FLOOR_DB and 0
        let db = (f32::from(self.level) - 100.0) * (-FLOOR_DB / 100.0);
        10.0_f32.powf(db / 20.0)
    }

    /// Effective attenuation in dB
    pub fn to_db(&self) -> f32 {
        let gain = self.gain();
        if gain == 0.0 {
            FLOOR_DB
        } else {
            20.0 * gain.log10()
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80)
    }
}
