//! Static description of a module's controls and jacks.

/// A knob or switch the host exposes on the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamInfo {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    /// Snap to whole numbers (detented knob).
    pub snap: bool,
}

impl ParamInfo {
    pub const fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            min,
            max,
            default,
            snap: false,
        }
    }

    pub const fn snapped(mut self) -> Self {
        self.snap = true;
        self
    }

    /// Bring a raw value into this param's legal range.
    ///
    /// This is the only place step counts are clamped; modules read whatever
    /// the host stored. NaN falls back to the default.
    pub fn quantize(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let value = value.clamp(self.min, self.max);
        if self.snap {
            value.round()
        } else {
            value
        }
    }
}

/// Everything a host needs to lay out and drive a module.
#[derive(Debug)]
pub struct ModuleInfo {
    pub slug: &'static str,
    pub name: &'static str,
    pub params: &'static [ParamInfo],
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub lights: &'static [&'static str],
}

impl ModuleInfo {
    pub fn param(&self, id: usize) -> Option<&ParamInfo> {
        self.params.get(id)
    }
}
