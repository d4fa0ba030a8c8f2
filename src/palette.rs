//! Colour palettes for card templates

/// RGBA colour as used by paint commands
pub type Rgba = (u8, u8, u8, u8);

pub const WHITE: Rgba = (255, 255, 255, 255);
pub const GRAY_100: Rgba = (243, 244, 246, 255);
pub const GRAY_200: Rgba = (229, 231, 235, 255);
pub const GRAY_300: Rgba = (209, 213, 219, 255);
pub const GRAY_400: Rgba = (156, 163, 175, 255);
pub const GRAY_600: Rgba = (75, 85, 99, 255);
pub const GRAY_700: Rgba = (55, 65, 81, 255);
pub const GRAY_800: Rgba = (31, 41, 55, 255);
pub const GRAY_900: Rgba = (17, 24, 39, 255);
pub const BLUE_50: Rgba = (239, 246, 255, 255);
pub const BLUE_600: Rgba = (37, 99, 235, 255);
pub const BLUE_800: Rgba = (30, 64, 175, 255);

/// School names offered by the student form
pub const SCHOOLS: &[&str] = &["Lakshay", "GVM", "GVMPS", "DPS", "Gurugram School"];

/// Schools with their own card colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum School {
    Lakshay,
    Gvm,
    Gvmps,
    Dps,
    GurugramSchool,
}

impl School {
    /// Exact-match lookup; anything else has no dedicated palette
    pub fn from_name(name: &str) -> Option<School> {
        match name {
            "Lakshay" => Some(School::Lakshay),
            "GVM" => Some(School::Gvm),
            "GVMPS" => Some(School::Gvmps),
            "DPS" => Some(School::Dps),
            "Gurugram School" => Some(School::GurugramSchool),
            _ => None,
        }
    }
}

/// Primary colour plus the two stops of the header gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub primary: Rgba,
    pub gradient: (Rgba, Rgba),
}

pub const GREEN: Palette = Palette {
    name: "green",
    primary: (34, 197, 94, 255),
    gradient: ((34, 197, 94, 255), (22, 163, 74, 255)),
};

pub const BLUE: Palette = Palette {
    name: "blue",
    primary: (59, 130, 246, 255),
    gradient: ((59, 130, 246, 255), (37, 99, 235, 255)),
};

pub const PURPLE: Palette = Palette {
    name: "purple",
    primary: (168, 85, 247, 255),
    gradient: ((168, 85, 247, 255), (147, 51, 234, 255)),
};

pub const RED: Palette = Palette {
    name: "red",
    primary: (239, 68, 68, 255),
    gradient: ((239, 68, 68, 255), (220, 38, 38, 255)),
};

pub const YELLOW: Palette = Palette {
    name: "yellow",
    primary: (234, 179, 8, 255),
    gradient: ((234, 179, 8, 255), (202, 138, 4, 255)),
};

pub const ORANGE: Palette = Palette {
    name: "orange",
    primary: (249, 115, 22, 255),
    gradient: ((249, 115, 22, 255), (234, 88, 12, 255)),
};

/// Palette for a school name. Unmapped names (including the empty name) use
/// the orange default.
pub fn for_school(name: &str) -> Palette {
    match School::from_name(name) {
        Some(School::Lakshay) => GREEN,
        Some(School::Gvm) => BLUE,
        Some(School::Gvmps) => PURPLE,
        Some(School::Dps) => RED,
        Some(School::GurugramSchool) => YELLOW,
        None => ORANGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_and_default_palettes() {
        assert_eq!(for_school("DPS"), RED);
        assert_eq!(for_school("Unknown School"), ORANGE);
        assert_eq!(for_school(""), ORANGE);
        // lookups are exact
        assert_eq!(for_school("dps"), ORANGE);
    }

    #[test]
    fn every_offered_school_has_a_palette() {
        for name in SCHOOLS {
            assert!(School::from_name(name).is_some(), "{} is unmapped", name);
            assert_ne!(for_school(name), ORANGE);
        }
    }
}
