//! Visual effects configuration.
//!
//! The admin panel toggles the site's decorative effects. Rather than a
//! pile of independent booleans, the configuration is one record with
//! named presets, so the panel can offer "Minimal" or "Showcase" as a
//! single choice and still allow per-effect overrides.

use serde::{Deserialize, Serialize};

/// Per-effect toggle record for the site's visual layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Floating background particles.
    pub particles: bool,
    /// Parallax scrolling on hero sections.
    pub parallax: bool,
    /// Glow accents on interactive elements.
    pub glow: bool,
    /// Background blur behind overlays.
    pub blur: bool,
    /// Film-grain texture overlay.
    pub grain: bool,
    /// Retro scanline overlay.
    pub scanlines: bool,
    /// Animated gradient shifts on section backgrounds.
    pub gradient_shift: bool,
    /// Trailing cursor effect.
    pub cursor_trail: bool,
    /// Animated page transitions.
    pub page_transitions: bool,
    /// Cards lift on hover.
    pub hover_lift: bool,
    /// 3D tilt on project cards.
    pub tilt_cards: bool,
    /// Scrolling marquee strips.
    pub marquee: bool,
    /// Typewriter animation on headings.
    pub typewriter: bool,
    /// Celebration confetti after checkout.
    pub confetti: bool,
    /// Honor the visitor's reduced-motion preference.
    pub reduced_motion: bool,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        EffectsPreset::Balanced.config()
    }
}

/// Named effect presets offered by the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectsPreset {
    /// Everything off.
    Off,

    /// Transitions and hover feedback only.
    Minimal,

    /// The default set: tasteful motion without the heavy overlays.
    Balanced,

    /// Everything on.
    Showcase,
}

impl EffectsPreset {
    /// The configuration this preset stands for.
    #[must_use]
    pub const fn config(&self) -> EffectsConfig {
        match self {
            Self::Off => EffectsConfig {
                particles: false,
                parallax: false,
                glow: false,
                blur: false,
                grain: false,
                scanlines: false,
                gradient_shift: false,
                cursor_trail: false,
                page_transitions: false,
                hover_lift: false,
                tilt_cards: false,
                marquee: false,
                typewriter: false,
                confetti: false,
                reduced_motion: true,
            },
            Self::Minimal => EffectsConfig {
                particles: false,
                parallax: false,
                glow: false,
                blur: false,
                grain: false,
                scanlines: false,
                gradient_shift: false,
                cursor_trail: false,
                page_transitions: true,
                hover_lift: true,
                tilt_cards: false,
                marquee: false,
                typewriter: false,
                confetti: false,
                reduced_motion: true,
            },
            Self::Balanced => EffectsConfig {
                particles: true,
                parallax: true,
                glow: true,
                blur: true,
                grain: false,
                scanlines: false,
                gradient_shift: true,
                cursor_trail: false,
                page_transitions: true,
                hover_lift: true,
                tilt_cards: true,
                marquee: false,
                typewriter: true,
                confetti: true,
                reduced_motion: true,
            },
            Self::Showcase => EffectsConfig {
                particles: true,
                parallax: true,
                glow: true,
                blur: true,
                grain: true,
                scanlines: true,
                gradient_shift: true,
                cursor_trail: true,
                page_transitions: true,
                hover_lift: true,
                tilt_cards: true,
                marquee: true,
                typewriter: true,
                confetti: true,
                reduced_motion: false,
            },
        }
    }
}
