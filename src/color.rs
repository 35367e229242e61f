//! Color spec parsing and validation.
//!
//! Colors arrive as free-form strings from the CLI or `config.toml`. A spec
//! that does not parse is never fatal: [`validate`] substitutes the caller's
//! fallback and hands back a [`ColorWarning`] for the caller to surface.
//!
//! Accepted forms:
//!
//! | Form | Example |
//! |---|---|
//! | `#RGB` | `#fff` |
//! | `#RRGGBB` | `#1a2b3c` |
//! | `#RRGGBBAA` (alpha ignored) | `#1a2b3cff` |
//! | `rgb(r, g, b)` | `rgb(255, 128, 0)`, `rgb(100%, 50%, 0%)` |
//! | `hsl(h, s%, l%)` | `hsl(30, 100%, 50%)` |
//! | `hsv(h, s%, v%)`, `hsb(...)` | `hsv(30, 100%, 100%)` |
//! | any of the 148 CSS named colors | `white`, `SteelBlue`, `rebeccapurple` |

use image::Rgb;
use serde::Serialize;
use std::fmt;

/// Fallback for the gap (canvas fill) color.
pub const DEFAULT_GAP_COLOR: &str = "#FFFFFF";
/// Fallback for the border color.
pub const DEFAULT_BORDER_COLOR: &str = "#000000";

/// A color spec that parsed, together with the pixel it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedColor {
    /// The spec exactly as given (or the fallback, if the given one was rejected).
    pub spec: String,
    pub rgb: Rgb<u8>,
}

/// A rejected color spec and the fallback used in its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorWarning {
    pub given: String,
    pub fallback: String,
    pub reason: String,
}

impl fmt::Display for ColorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid color '{}' ({}); using '{}'",
            self.given, self.reason, self.fallback
        )
    }
}

/// Validate `spec`, falling back to `fallback` when it does not parse.
///
/// Exactly one warning is returned for a rejected spec. A valid spec comes
/// back unchanged. If the fallback itself is unparseable the pixel is black.
pub fn validate(spec: &str, fallback: &str) -> (ValidatedColor, Option<ColorWarning>) {
    match parse_color(spec) {
        Ok(rgb) => (
            ValidatedColor {
                spec: spec.to_string(),
                rgb,
            },
            None,
        ),
        Err(reason) => {
            log::debug!("color '{spec}' rejected: {reason}");
            let color = ValidatedColor {
                spec: fallback.to_string(),
                rgb: parse_color(fallback).unwrap_or(Rgb([0, 0, 0])),
            };
            let warning = ColorWarning {
                given: spec.to_string(),
                fallback: fallback.to_string(),
                reason,
            };
            (color, Some(warning))
        }
    }
}

/// Parse a color spec into an RGB pixel.
pub fn parse_color(spec: &str) -> Result<Rgb<u8>, String> {
    let s = spec.trim();
    if s.is_empty() {
        return Err("empty color".to_string());
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_function(args);
    }
    for kind in ["hsl", "hsv", "hsb"] {
        if let Some(args) = lower
            .strip_prefix(kind)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let kind = if kind == "hsb" { "hsv" } else { kind };
            return parse_hue_function(kind, args);
        }
    }
    named_color(&lower)
        .map(|[r, g, b]| Rgb([r, g, b]))
        .ok_or_else(|| format!("unknown color name '{s}'"))
}

fn parse_hex_byte(hex: &str, start: usize, len: usize) -> Result<u8, String> {
    let slice = &hex[start..start + len];
    let expanded = if len == 1 {
        // #RGB: "F" -> "FF"
        [slice, slice].concat()
    } else {
        slice.to_string()
    };
    u8::from_str_radix(&expanded, 16).map_err(|_| format!("invalid hex digit in '{slice}'"))
}

fn parse_hex(hex: &str) -> Result<Rgb<u8>, String> {
    // Byte slicing below requires ASCII.
    if !hex.is_ascii() {
        return Err("hex color must be ASCII".to_string());
    }
    match hex.len() {
        3 => Ok(Rgb([
            parse_hex_byte(hex, 0, 1)?,
            parse_hex_byte(hex, 1, 1)?,
            parse_hex_byte(hex, 2, 1)?,
        ])),
        6 | 8 => {
            if hex.len() == 8 {
                parse_hex_byte(hex, 6, 2)?;
            }
            Ok(Rgb([
                parse_hex_byte(hex, 0, 2)?,
                parse_hex_byte(hex, 2, 2)?,
                parse_hex_byte(hex, 4, 2)?,
            ]))
        }
        n => Err(format!("hex color needs 3, 6 or 8 digits, got {n}")),
    }
}

/// `r, g, b` as integers 0-255 or percentages.
fn parse_rgb_function(args: &str) -> Result<Rgb<u8>, String> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let component = |p: &str| -> Result<u8, String> {
        match p.strip_suffix('%') {
            Some(pct) => Ok(unit_to_byte(percentage(pct)?)),
            None => p
                .parse::<u8>()
                .map_err(|_| format!("rgb() component '{p}' is not in 0-255")),
        }
    };
    match parts.as_slice() {
        [r, g, b] => Ok(Rgb([component(r)?, component(g)?, component(b)?])),
        _ => Err(format!("rgb() needs 3 components, got {}", parts.len())),
    }
}

/// Hue-based forms: `hsl(h, s%, l%)` and `hsv(h, s%, v%)` (alias `hsb`).
/// Hue is in degrees and wraps at 360.
fn parse_hue_function(kind: &str, args: &str) -> Result<Rgb<u8>, String> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let [h, a, b] = parts.as_slice() else {
        return Err(format!("{kind}() needs 3 components, got {}", parts.len()));
    };
    let hue = h
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite() && *h >= 0.0)
        .ok_or_else(|| format!("{kind}() hue '{h}' is not a number of degrees"))?;
    let pct = |p: &str| -> Result<f64, String> {
        p.strip_suffix('%')
            .ok_or_else(|| format!("{kind}() component '{p}' must be a percentage"))
            .and_then(percentage)
    };
    let (a, b) = (pct(a)?, pct(b)?);
    let hue = (hue % 360.0) / 360.0;
    let [r, g, bl] = if kind == "hsl" {
        hsl_to_rgb(hue, a, b)
    } else {
        hsv_to_rgb(hue, a, b)
    };
    Ok(Rgb([unit_to_byte(r), unit_to_byte(g), unit_to_byte(bl)]))
}

/// A percentage in 0-100, as a fraction.
fn percentage(p: &str) -> Result<f64, String> {
    p.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| (0.0..=100.0).contains(v))
        .map(|v| v / 100.0)
        .ok_or_else(|| format!("'{p}%' is not a percentage in 0-100"))
}

fn unit_to_byte(v: f64) -> u8 {
    (v * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    if s == 0.0 {
        return [l, l, l];
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    let channel = |hue: f64| {
        let hue = hue.rem_euclid(1.0);
        if hue < 1.0 / 6.0 {
            m1 + (m2 - m1) * hue * 6.0
        } else if hue < 0.5 {
            m2
        } else if hue < 2.0 / 3.0 {
            m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
        } else {
            m1
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    if s == 0.0 {
        return [v, v, v];
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// The CSS named colors, sorted by name for binary search.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

fn named_color(name: &str) -> Option<[u8; 3]> {
    NAMED_COLORS
        .binary_search_by(|(candidate, _)| (*candidate).cmp(name))
        .ok()
        .map(|i| NAMED_COLORS[i].1)
}
