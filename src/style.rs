//! Plot theming and the channel color palette.

use std::collections::HashMap;

use crate::channel::ChannelId;
use crate::render::{Color, LineStyle, MarkerShape, MarkerStyle, TextStyle};

/// Colors for the wavelengths commonly imaged in HCR spot data.
const KNOWN_CHANNELS: &[(&str, Color)] = &[
    ("405", Color::new(0.58, 0.40, 0.74, 1.0)),
    ("488", Color::new(0.12, 0.47, 0.71, 1.0)),
    ("514", Color::new(0.17, 0.63, 0.17, 1.0)),
    ("561", Color::new(1.00, 0.50, 0.05, 1.0)),
    ("594", Color::new(0.84, 0.15, 0.16, 1.0)),
    ("638", Color::new(0.55, 0.34, 0.29, 1.0)),
];

/// Fallback colors for channels outside [`KNOWN_CHANNELS`].
const FALLBACK: &[Color] = &[
    Color::new(0.89, 0.47, 0.76, 1.0),
    Color::new(0.50, 0.50, 0.50, 1.0),
    Color::new(0.74, 0.74, 0.13, 1.0),
    Color::new(0.09, 0.75, 0.81, 1.0),
    Color::new(0.35, 0.20, 0.60, 1.0),
    Color::new(0.60, 0.30, 0.05, 1.0),
];

/// Stable mapping from channel identifier to display color.
///
/// The same identifier always maps to the same color, independent of the
/// order channels are seen in.
#[derive(Debug, Clone, Default)]
pub struct ChannelPalette {
    overrides: HashMap<ChannelId, Color>,
}

impl ChannelPalette {
    /// Create a palette with the built-in channel colors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a color for a channel.
    pub fn set(&mut self, channel: ChannelId, color: Color) {
        self.overrides.insert(channel, color);
    }

    /// Color for a channel.
    pub fn color(&self, channel: &ChannelId) -> Color {
        if let Some(color) = self.overrides.get(channel) {
            return *color;
        }
        if let Some((_, color)) = KNOWN_CHANNELS
            .iter()
            .find(|(id, _)| *id == channel.as_str())
        {
            return *color;
        }
        FALLBACK[(fnv1a(channel.as_str()) % FALLBACK.len() as u64) as usize]
    }
}

fn fnv1a(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Visual theme for spot plots.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Channel colors shared by spots and dye lines.
    pub palette: ChannelPalette,
    /// Stroke for dye lines; the color is replaced per dye.
    pub dye_line: LineStyle,
    /// End-label text for dye lines; the color is replaced per dye.
    pub dye_label: TextStyle,
    /// Marker for spots kept on their original channel. Only the alpha of the
    /// color is used.
    pub spot: MarkerStyle,
    /// Marker for spots the unmixing moved to another channel.
    pub reassigned_spot: MarkerStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: ChannelPalette::new(),
            dye_line: LineStyle {
                color: Color::BLACK,
                width: 1.5,
            },
            dye_label: TextStyle::default(),
            spot: MarkerStyle {
                color: Color::BLACK.with_alpha(0.6),
                size: 3.0,
                shape: MarkerShape::Circle,
            },
            reassigned_spot: MarkerStyle {
                color: Color::BLACK,
                size: 4.0,
                shape: MarkerShape::Cross,
            },
        }
    }
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_channels_use_fixed_colors() {
        let palette = ChannelPalette::new();
        assert_eq!(
            palette.color(&ChannelId::new("488")),
            Color::new(0.12, 0.47, 0.71, 1.0)
        );
    }

    #[test]
    fn unknown_channels_are_stable() {
        let a = ChannelPalette::new();
        let b = ChannelPalette::new();
        let id = ChannelId::new("750");
        assert_eq!(a.color(&id), b.color(&id));
        assert_eq!(a.color(&id), a.color(&ChannelId::new("750")));
    }

    #[test]
    fn overrides_win() {
        let mut palette = ChannelPalette::new();
        palette.set(ChannelId::new("488"), Color::WHITE);
        assert_eq!(palette.color(&ChannelId::new("488")), Color::WHITE);
    }
}
