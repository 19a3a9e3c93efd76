use super::common::{CUSTOM_MODEL, DEFAULT_MODEL};
use crate::error::VidGenError;
use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MIN_DURATION_SECONDS: u32 = 3;
pub const MAX_DURATION_SECONDS: u32 = 30;
pub const DEFAULT_DURATION_SECONDS: u32 = 5;

/// Exclusive upper bound for randomly drawn seeds.
pub const SEED_UPPER_BOUND: u64 = 1_000_000_000;

/// Declares a closed set of wire values. The first variant is the default.
macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $first:ident => ($first_wire:literal, $first_label:literal)
            $(, $variant:ident => ($wire:literal, $label:literal))* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $first,
            $($variant,)*
        }

        impl $name {
            pub fn all() -> &'static [$name] {
                &[$name::$first, $($name::$variant,)*]
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$first => $first_wire,
                    $($name::$variant => $wire,)*
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $name::$first => $first_label,
                    $($name::$variant => $label,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = VidGenError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::all()
                    .iter()
                    .copied()
                    .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = $name::all().iter().map(|o| o.as_str()).collect();
                        VidGenError::Config(format!(
                            "unknown {} '{}', expected one of: {}",
                            $what,
                            s,
                            allowed.join(", ")
                        ))
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

option_set! {
    /// Output frame size, sent as a `WxH` string.
    VideoSize, "size" {
        Landscape => ("1920x1080", "16:9 Landscape"),
        Portrait => ("1080x1920", "9:16 Portrait"),
        Square => ("1080x1080", "1:1 Square"),
        Cinematic => ("2048x1080", "2:1 Cinematic"),
    }
}

option_set! {
    Quality, "quality" {
        Standard => ("standard", "Standard"),
        Hd => ("hd", "HD"),
    }
}

option_set! {
    Style, "style" {
        Realistic => ("realistic", "Realistic"),
        Animation => ("animation", "Animation"),
        Cyberpunk => ("cyberpunk", "Cyberpunk"),
        Fantasy => ("fantasy", "Fantasy"),
        Minimalist => ("minimalist", "Minimalist"),
    }
}

/// Model selection as the user made it. `Custom` defers to the free-text
/// custom model field on [`GenerationParameters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice {
    Known(String),
    Custom,
}

impl ModelChoice {
    pub fn as_str(&self) -> &str {
        match self {
            ModelChoice::Known(id) => id,
            ModelChoice::Custom => CUSTOM_MODEL,
        }
    }
}

impl Default for ModelChoice {
    fn default() -> Self {
        ModelChoice::Known(DEFAULT_MODEL.to_string())
    }
}

impl From<&str> for ModelChoice {
    fn from(value: &str) -> Self {
        if value == CUSTOM_MODEL {
            ModelChoice::Custom
        } else {
            ModelChoice::Known(value.to_string())
        }
    }
}

impl FromStr for ModelChoice {
    type Err = VidGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(VidGenError::Config("model must not be empty".into()));
        }
        Ok(ModelChoice::from(trimmed))
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user can tweak before hitting generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParameters {
    pub prompt: String,
    pub model: ModelChoice,
    /// Only read when `model` is [`ModelChoice::Custom`].
    pub custom_model: String,
    pub size: VideoSize,
    pub quality: Quality,
    pub duration: u32,
    pub style: Style,
    pub seed: Option<u64>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            model: ModelChoice::default(),
            custom_model: String::new(),
            size: VideoSize::default(),
            quality: Quality::default(),
            duration: DEFAULT_DURATION_SECONDS,
            style: Style::default(),
            seed: None,
        }
    }
}

impl GenerationParameters {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = ModelChoice::from(model.into().as_str());
        self
    }

    pub fn with_custom_model(mut self, custom_model: impl Into<String>) -> Self {
        self.model = ModelChoice::Custom;
        self.custom_model = custom_model.into();
        self
    }

    pub fn with_size(mut self, size: VideoSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn randomize_seed(&mut self) -> u64 {
        let seed = random_seed();
        self.seed = Some(seed);
        seed
    }
}

pub fn random_seed() -> u64 {
    rand::thread_rng().gen_range(0..SEED_UPPER_BOUND)
}

/// Clamps a requested duration into the range the duration slider offers.
pub fn clamp_duration(seconds: u32) -> u32 {
    seconds.clamp(MIN_DURATION_SECONDS, MAX_DURATION_SECONDS)
}

/// A validated, immutable snapshot of one submission with the custom model
/// already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub prompt: String,
    pub model: String,
    pub size: VideoSize,
    pub quality: Quality,
    pub duration: u32,
    pub style: Style,
    pub seed: Option<u64>,
}
