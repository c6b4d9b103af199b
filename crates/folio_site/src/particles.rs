//! Particle backdrop configuration
//!
//! The hero section sits on top of an interactive particle field drawn by an
//! external renderer. This module only describes that field; the renderer is
//! reached through [`ParticleBackdrop`] and receives the configuration once,
//! when the hero mounts.
//!
//! The serialized form follows the tsParticles options schema, so
//! `serde_json::to_string(&ParticleConfig::default())` can be handed to the
//! renderer unchanged.

use serde::{Deserialize, Serialize};

/// An external particle renderer
pub trait ParticleBackdrop {
    /// Start rendering with `config`; called once per hero mount
    fn mount(&mut self, config: &ParticleConfig);

    /// Stop rendering
    fn unmount(&mut self) {}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleConfig {
    pub particles: ParticleOptions,
    pub interactivity: Interactivity,
    pub background: Background,
    pub full_screen: FullScreen,
}

impl ParticleConfig {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particles: ParticleOptions {
                number: ParticleCount {
                    value: 100,
                    density: Density {
                        enable: true,
                        value_area: 1000.0,
                    },
                },
                color: ColorSet {
                    value: vec!["#00f5a0".into(), "#00d9f5".into(), "#00FFAB".into()],
                },
                shape: Shape {
                    kinds: vec![ShapeKind::Circle, ShapeKind::Triangle],
                    stroke: Stroke { width: 0.0 },
                },
                opacity: AnimatedValue::random(0.6, 0.5, 0.1),
                size: AnimatedValue::random(3.0, 1.0, 0.5),
                links: Links {
                    enable: true,
                    distance: 150.0,
                    color: "#00FFAB".into(),
                    opacity: 0.3,
                    width: 1.0,
                    triangles: Triangles {
                        enable: true,
                        opacity: 0.05,
                    },
                },
                motion: Motion {
                    enable: true,
                    speed: 1.0,
                    direction: "none".into(),
                    random: true,
                    straight: false,
                    out_modes: OutModes {
                        default: OutMode::Bounce,
                    },
                    attract: Attract {
                        enable: true,
                        rotate_x: 1200.0,
                        rotate_y: 1200.0,
                    },
                },
            },
            interactivity: Interactivity {
                detects_on: "canvas".into(),
                events: Events {
                    on_hover: HoverEvent {
                        enable: true,
                        mode: vec![HoverMode::Grab, HoverMode::Bubble],
                    },
                    on_click: ClickEvent {
                        enable: true,
                        mode: ClickMode::Push,
                    },
                    resize: true,
                },
                modes: Modes {
                    grab: Grab {
                        distance: 180.0,
                        links: GrabLinks {
                            opacity: 0.8,
                            color: "#00f5a0".into(),
                        },
                    },
                    bubble: Bubble {
                        distance: 200.0,
                        size: 6.0,
                        duration: 2.0,
                        opacity: 0.8,
                    },
                    push: Push { quantity: 6 },
                },
            },
            background: Background {
                color: "#0f0f0f".into(),
            },
            full_screen: FullScreen {
                enable: false,
                z_index: -1,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleOptions {
    pub number: ParticleCount,
    pub color: ColorSet,
    pub shape: Shape,
    pub opacity: AnimatedValue,
    pub size: AnimatedValue,
    pub links: Links,
    #[serde(rename = "move")]
    pub motion: Motion,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleCount {
    pub value: u32,
    pub density: Density,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Density {
    pub enable: bool,
    pub value_area: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorSet {
    pub value: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Triangle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kinds: Vec<ShapeKind>,
    pub stroke: Stroke,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f32,
}

/// A value that drifts randomly between `minimum_value` and `value`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatedValue {
    pub value: f32,
    pub random: bool,
    pub animation: ValueAnimation,
}

impl AnimatedValue {
    fn random(value: f32, speed: f32, minimum_value: f32) -> Self {
        Self {
            value,
            random: true,
            animation: ValueAnimation {
                enable: true,
                speed,
                minimum_value,
                sync: false,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAnimation {
    pub enable: bool,
    pub speed: f32,
    pub minimum_value: f32,
    pub sync: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Links {
    pub enable: bool,
    pub distance: f32,
    pub color: String,
    pub opacity: f32,
    pub width: f32,
    pub triangles: Triangles,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangles {
    pub enable: bool,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motion {
    pub enable: bool,
    pub speed: f32,
    pub direction: String,
    pub random: bool,
    pub straight: bool,
    pub out_modes: OutModes,
    pub attract: Attract,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutMode {
    Bounce,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutModes {
    pub default: OutMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attract {
    pub enable: bool,
    pub rotate_x: f32,
    pub rotate_y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interactivity {
    pub detects_on: String,
    pub events: Events,
    pub modes: Modes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    Grab,
    Bubble,
    Repulse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickMode {
    Push,
    Remove,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Events {
    pub on_hover: HoverEvent,
    pub on_click: ClickEvent,
    pub resize: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoverEvent {
    pub enable: bool,
    pub mode: Vec<HoverMode>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub enable: bool,
    pub mode: ClickMode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Modes {
    pub grab: Grab,
    pub bubble: Bubble,
    pub push: Push,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grab {
    pub distance: f32,
    pub links: GrabLinks,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrabLinks {
    pub opacity: f32,
    pub color: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub distance: f32,
    pub size: f32,
    /// Seconds
    pub duration: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Push {
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub color: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullScreen {
    pub enable: bool,
    pub z_index: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ParticleConfig::default()).unwrap();
        assert_eq!(json["particles"]["number"]["value"], 100);
        assert_eq!(json["particles"]["shape"]["type"][1], "triangle");
        assert_eq!(json["particles"]["move"]["outModes"]["default"], "bounce");
        assert_eq!(json["particles"]["opacity"]["animation"]["sync"], false);
        assert_eq!(
            json["interactivity"]["events"]["onHover"]["mode"],
            serde_json::json!(["grab", "bubble"])
        );
        assert_eq!(json["interactivity"]["events"]["onClick"]["mode"], "push");
        assert_eq!(json["interactivity"]["modes"]["push"]["quantity"], 6);
        assert_eq!(json["fullScreen"]["zIndex"], -1);
    }

    #[test]
    fn test_json_round_trips() {
        let config = ParticleConfig::default();
        let json = config.to_json().unwrap();
        let parsed: ParticleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
