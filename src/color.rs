//! Theme color helpers: hex parsing, brightness, and terminal swatches.

use crate::models::PlaceholderStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Accepts `#RRGGBB`, `RRGGBB` and `#RGB`.
    pub fn parse(s: &str) -> Option<Rgb> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |h: &str| u8::from_str_radix(h, 16).ok();
        match hex.len() {
            6 if hex.is_ascii() => Some(Rgb { r: channel(&hex[0..2])?, g: channel(&hex[2..4])?, b: channel(&hex[4..6])? }),
            3 if hex.is_ascii() => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Rgb { r: short(0)?, g: short(1)?, b: short(2)? })
            }
            _ => None,
        }
    }

    /// Perceived brightness on a 0-255 scale.
    pub fn brightness(self) -> f64 {
        (self.r as f64 * 299.0 + self.g as f64 * 587.0 + self.b as f64 * 114.0) / 1000.0
    }

    pub fn is_light(self) -> bool { self.brightness() > 128.0 }

    /// Black or white, whichever reads better on top of this color.
    pub fn readable_foreground(self) -> Rgb {
        if self.is_light() { Rgb::BLACK } else { Rgb::WHITE }
    }

    fn shift(self, delta: i16) -> Rgb {
        let f = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
        Rgb { r: f(self.r), g: f(self.g), b: f(self.b) }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Color used for image placeholders on slides with the given background.
/// Unparsable backgrounds are treated as white.
pub fn placeholder_color(style: PlaceholderStyle, background: &str) -> Rgb {
    match style {
        PlaceholderStyle::Light => Rgb { r: 240, g: 240, b: 240 },
        PlaceholderStyle::Dark => Rgb { r: 40, g: 40, b: 40 },
        PlaceholderStyle::Themed => {
            let bg = Rgb::parse(background).unwrap_or(Rgb::WHITE);
            if bg.is_light() { bg.shift(-30) } else { bg.shift(30) }
        }
    }
}

/// Paint `label` on a truecolor background block. Colors that do not parse,
/// or `ansi == false`, give the plain label.
pub fn swatch(color: &str, label: &str, ansi: bool) -> String {
    match Rgb::parse(color) {
        Some(bg) if ansi => {
            let fg = bg.readable_foreground();
            format!(
                "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m {} \x1b[0m",
                bg.r, bg.g, bg.b, fg.r, fg.g, fg.b, label
            )
        }
        _ => format!("[{}]", label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(Rgb::parse("#1E3A8A"), Some(Rgb { r: 0x1E, g: 0x3A, b: 0x8A }));
        assert_eq!(Rgb::parse("ffffff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse("#0f0"), Some(Rgb { r: 0, g: 255, b: 0 }));
        assert_eq!(Rgb::parse("navy"), None);
        assert_eq!(Rgb::parse("#12345G"), None);
        assert_eq!(Rgb::parse("#éé"), None);
    }

    #[test]
    fn brightness_picks_foreground() {
        assert_eq!(Rgb::WHITE.brightness(), 255.0);
        assert_eq!(Rgb::parse("#FFD700").unwrap().readable_foreground(), Rgb::BLACK);
        assert_eq!(Rgb::parse("#1E3A8A").unwrap().readable_foreground(), Rgb::WHITE);
    }

    #[test]
    fn themed_placeholder_moves_away_from_background() {
        assert_eq!(placeholder_color(PlaceholderStyle::Themed, "#FFFFFF").to_hex(), "#E1E1E1");
        assert_eq!(placeholder_color(PlaceholderStyle::Themed, "#000000").to_hex(), "#1E1E1E");
        assert_eq!(placeholder_color(PlaceholderStyle::Themed, "#F0100A").to_hex(), "#FF2E28");
        assert_eq!(placeholder_color(PlaceholderStyle::Dark, "#FFFFFF").to_hex(), "#282828");
    }

    #[test]
    fn swatch_without_ansi_is_plain() {
        assert_eq!(swatch("#1E3A8A", "Primary", false), "[Primary]");
        assert_eq!(swatch("teal", "Accent", true), "[Accent]");
        assert!(swatch("#1E3A8A", "Primary", true).starts_with("\x1b[48;2;30;58;138m"));
    }
}
