//! Roles and the role families the bot manages

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::fmt;

/// Name prefix shared by every colour-family role
pub const COLOR_ROLE_PREFIX: &str = "Color:";

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}){1,2}$").expect("valid hex colour pattern"));

/// Family a role belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    Pronoun,
    Color,
    Other,
}

impl RoleKind {
    /// Classify a role read back from the platform by its name
    pub fn from_name(name: &str) -> Self {
        if name.starts_with(COLOR_ROLE_PREFIX) {
            RoleKind::Color
        } else {
            RoleKind::Other
        }
    }
}

/// A role owned by the server-wide registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub colour: Option<u32>,
    pub mentionable: bool,
    pub position: u16,
    pub kind: RoleKind,
}

impl Role {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            kind: RoleKind::from_name(&name),
            name,
            colour: None,
            mentionable: false,
            position: 0,
        }
    }

    pub fn with_colour(mut self, colour: u32) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn with_position(mut self, position: u16) -> Self {
        self.position = position;
        self
    }

    pub fn with_kind(mut self, kind: RoleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_color(&self) -> bool {
        self.kind == RoleKind::Color
    }

    /// Case-insensitive name comparison used for pronoun roles
    pub fn name_matches_ignore_case(&self, lowered: &str) -> bool {
        self.name.to_lowercase() == lowered
    }
}

/// Request to create a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
    pub colour: Option<u32>,
    pub mentionable: bool,
    pub position: Option<u16>,
    pub kind: RoleKind,
}

impl NewRole {
    pub fn pronoun(name: impl Into<String>, colour: u32) -> Self {
        Self {
            name: name.into(),
            colour: Some(colour),
            mentionable: true,
            position: None,
            kind: RoleKind::Pronoun,
        }
    }

    pub fn color(hex: &HexColor) -> Self {
        Self {
            name: hex.role_name(),
            colour: Some(hex.rgb()),
            mentionable: false,
            position: None,
            kind: RoleKind::Color,
        }
    }

    pub fn with_position(mut self, position: u16) -> Self {
        self.position = Some(position);
        self
    }
}

/// A validated `#RGB` or `#RRGGBB` colour as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor {
    raw: String,
    rgb: u32,
}

impl HexColor {
    pub fn parse(input: &str) -> Option<Self> {
        if !HEX_COLOR.is_match(input) {
            return None;
        }
        let digits = &input[1..];
        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };
        let rgb = u32::from_str_radix(&expanded, 16).ok()?;
        Some(Self {
            raw: input.to_string(),
            rgb,
        })
    }

    /// Uppercased form of the input, e.g. `#FF00FF`
    pub fn canonical(&self) -> String {
        self.raw.to_uppercase()
    }

    /// Name of the colour-family role for this colour
    pub fn role_name(&self) -> String {
        format!("{} {}", COLOR_ROLE_PREFIX, self.canonical())
    }

    pub fn rgb(&self) -> u32 {
        self.rgb
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}
