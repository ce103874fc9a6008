use crate::foundation::error::{ScrollstageError, ScrollstageResult};
use crate::foundation::math::lerp;
use serde::{Deserialize, Serialize};

/// Straight-alpha sRGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDef {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl ColorDef {
    /// Build from straight-alpha channels.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn hex(s: &str) -> ScrollstageResult<Self> {
        parse_hex(s).map_err(ScrollstageError::configuration)
    }

    /// Straight-alpha RGBA8, rounding each channel.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    /// `#rrggbbaa` form of this colour.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    fn to_oklab(self) -> [f64; 3] {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);

        let l = (0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b).cbrt();
        let m = (0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b).cbrt();
        let s = (0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b).cbrt();

        [
            0.210_454_255_3 * l + 0.793_617_785_0 * m - 0.004_072_046_8 * s,
            1.977_998_495_1 * l - 2.428_592_205_0 * m + 0.450_593_709_9 * s,
            0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766_0 * s,
        ]
    }

    fn from_oklab([ok_l, ok_a, ok_b]: [f64; 3], alpha: f64) -> Self {
        let l = (ok_l + 0.396_337_777_4 * ok_a + 0.215_803_757_3 * ok_b).powi(3);
        let m = (ok_l - 0.105_561_345_8 * ok_a - 0.063_854_172_8 * ok_b).powi(3);
        let s = (ok_l - 0.089_484_177_5 * ok_a - 1.291_485_548_0 * ok_b).powi(3);

        let r = 4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s;
        let g = -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s;
        let b = -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s;

        Self::rgba(
            linear_to_srgb(r),
            linear_to_srgb(g),
            linear_to_srgb(b),
            alpha.clamp(0.0, 1.0),
        )
    }

    /// Blend toward `other` in OKLab, keeping midpoints perceptually even.
    ///
    /// `t` is clamped; the endpoints return the inputs exactly.
    pub fn mix_oklab(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        let a = self.to_oklab();
        let b = other.to_oklab();
        let mixed = [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)];
        Self::from_oklab(mixed, lerp(self.a, other.a, t))
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            HslaObj {
                h: f64,
                s: f64,
                l: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::HslaObj { h, s, l, a } => Ok(hsla_to_rgba(h, s, l, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "colour array must be [r,g,b] or [r,g,b,a]",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err("hex colour must be ASCII".to_owned());
    }

    fn channel(s: &str, i: usize) -> Result<f64, String> {
        let pair = &s[i * 2..i * 2 + 2];
        u8::from_str_radix(pair, 16)
            .map(|v| f64::from(v) / 255.0)
            .map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        6 => Ok(ColorDef::rgba(
            channel(s, 0)?,
            channel(s, 1)?,
            channel(s, 2)?,
            1.0,
        )),
        8 => Ok(ColorDef::rgba(
            channel(s, 0)?,
            channel(s, 1)?,
            channel(s, 2)?,
            channel(s, 3)?,
        )),
        _ => Err("hex colour must be #RRGGBB or #RRGGBBAA".to_owned()),
    }
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> ColorDef {
    let h = (h % 360.0 + 360.0) % 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    // Chroma/hue-sector form of HSL -> RGB.
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    ColorDef::rgba(r + m, g + m, b + m, a)
}

/// One stop of a [`ColorRamp`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position in `[0, 1]`.
    pub at: f64,
    /// Colour at this position.
    pub color: ColorDef,
}

/// Multi-stop gradient sampled by local progress, blended in OKLab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    /// Stops sorted by `at`.
    pub stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Evenly spaced stops over `[0, 1]`.
    pub fn even(colors: impl IntoIterator<Item = ColorDef>) -> Self {
        let colors: Vec<ColorDef> = colors.into_iter().collect();
        let last = colors.len().saturating_sub(1).max(1) as f64;
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| ColorStop {
                at: i as f64 / last,
                color,
            })
            .collect();
        Self { stops }
    }

    /// Check stop ordering and ranges.
    pub fn validate(&self) -> ScrollstageResult<()> {
        if self.stops.is_empty() {
            return Err(ScrollstageError::configuration(
                "colour ramp must have at least one stop",
            ));
        }
        for stop in &self.stops {
            if !(0.0..=1.0).contains(&stop.at) {
                return Err(ScrollstageError::configuration(
                    "colour ramp stop positions must be in [0, 1]",
                ));
            }
            if !stop.color.is_finite() {
                return Err(ScrollstageError::configuration(
                    "colour ramp colours must be finite",
                ));
            }
        }
        for w in self.stops.windows(2) {
            if w[1].at < w[0].at {
                return Err(ScrollstageError::configuration(
                    "colour ramp stops must be sorted by position",
                ));
            }
            if w[1].at == w[0].at && w[1].color != w[0].color {
                return Err(ScrollstageError::configuration(format!(
                    "colour ramp jumps at {} (stops at the same position must share a colour)",
                    w[0].at
                )));
            }
        }
        Ok(())
    }

    /// Colour at `t`, clamping to the end stops outside their range.
    pub fn sample(&self, t: f64) -> ColorDef {
        let Some(first) = self.stops.first() else {
            return ColorDef::rgba(0.0, 0.0, 0.0, 0.0);
        };
        let idx = self.stops.partition_point(|s| s.at <= t);
        if idx == 0 {
            return first.color;
        }
        if idx >= self.stops.len() {
            return self.stops[self.stops.len() - 1].color;
        }
        let a = &self.stops[idx - 1];
        let b = &self.stops[idx];
        let span = b.at - a.at;
        if span <= 0.0 {
            return b.color;
        }
        a.color.mix_oklab(b.color, (t - a.at) / span)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/color.rs"]
mod tests;
