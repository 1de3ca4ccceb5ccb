//! Threshold classification for the values `wx` highlights.

pub const HOT_ABOVE_F: f64 = 80.0;
pub const FREEZING_BELOW_F: f64 = 32.0;
pub const RAINY_ABOVE_PCT: f64 = 40.0;

/// How a rendered value should be colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Red,
    Blue,
    Plain,
}

impl Shade {
    /// Red strictly above 80F, blue strictly below 32F.
    pub fn for_temperature(temp_f: f64) -> Self {
        if temp_f > HOT_ABOVE_F {
            Shade::Red
        } else if temp_f < FREEZING_BELOW_F {
            Shade::Blue
        } else {
            Shade::Plain
        }
    }

    /// Red strictly above 40%.
    pub fn for_rain_chance(pct: f64) -> Self {
        if pct > RAINY_ABOVE_PCT { Shade::Red } else { Shade::Plain }
    }
}
