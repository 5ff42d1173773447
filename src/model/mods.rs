pub use rosu_mods::GameModsLegacy;

/// Height of the playfield which is the axis for vertical reflection.
pub const PLAYFIELD_HEIGHT: f64 = 384.0;

const MAX_DIFFICULTY_SETTING: f64 = 10.0;

/// Re-implementation of the modifier transforms that timing and geometry are
/// subject to before any skill gets to see them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameMods {
    inner: GameModsLegacy,
}

impl GameMods {
    pub const NONE: Self = Self {
        inner: GameModsLegacy::NoMod,
    };

    pub const fn new(inner: GameModsLegacy) -> Self {
        Self { inner }
    }

    pub const fn inner(&self) -> GameModsLegacy {
        self.inner
    }

    pub fn hr(&self) -> bool {
        self.inner.contains(GameModsLegacy::HardRock)
    }

    pub fn ez(&self) -> bool {
        self.inner.contains(GameModsLegacy::Easy)
    }

    pub fn dt(&self) -> bool {
        self.inner.contains(GameModsLegacy::DoubleTime)
            || self.inner.contains(GameModsLegacy::Nightcore)
    }

    pub fn ht(&self) -> bool {
        self.inner.contains(GameModsLegacy::HalfTime)
    }

    /// The speed at which the map is played.
    pub fn clock_rate(&self) -> f64 {
        if self.dt() {
            1.5
        } else if self.ht() {
            0.75
        } else {
            1.0
        }
    }

    /// Whether positions are mirrored along the horizontal axis.
    pub fn reflection(&self) -> bool {
        self.hr()
    }

    /// Circle size after applying HardRock or Easy.
    pub fn circle_size(&self, cs: f64) -> f64 {
        if self.hr() {
            (cs * 1.3).min(MAX_DIFFICULTY_SETTING)
        } else if self.ez() {
            cs * 0.5
        } else {
            cs
        }
    }

    /// Approach rate or overall difficulty after applying HardRock or Easy.
    pub fn difficulty_setting(&self, value: f64) -> f64 {
        if self.hr() {
            (value * 1.4).min(MAX_DIFFICULTY_SETTING)
        } else if self.ez() {
            value * 0.5
        } else {
            value
        }
    }

    /// Radius of a circle in playfield pixels.
    pub fn radius(&self, cs: f64) -> f64 {
        let cs = self.circle_size(cs);

        64.0 * (1.0 - 0.7 * (cs - 5.0) / 5.0) / 2.0
    }

    /// Duration in milliseconds that an object is visible before its offset.
    pub fn approach_window(&self, ar: f64) -> f64 {
        let ar = self.difficulty_setting(ar);

        let preempt = if ar <= 5.0 {
            1800.0 - ar * 120.0
        } else {
            1950.0 - ar * 150.0
        };

        preempt / self.clock_rate()
    }

    /// Hit window in milliseconds for the best judgement.
    pub fn hit_window(&self, od: f64) -> f64 {
        let od = self.difficulty_setting(od);

        (80.0 - 6.0 * od) / self.clock_rate()
    }

    pub fn reflect_y(&self, y: f64) -> f64 {
        if self.reflection() {
            PLAYFIELD_HEIGHT - y
        } else {
            y
        }
    }
}

impl Default for GameMods {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<GameModsLegacy> for GameMods {
    fn from(mods: GameModsLegacy) -> Self {
        Self::new(mods)
    }
}
