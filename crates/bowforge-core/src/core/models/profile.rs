use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ProfileError {
    #[error("Unknown user profile: '{0}'. Expected one of Child, Adult, Professional")]
    UnknownProfile(String),
    #[error("Unknown speed preference: '{0}'. Expected one of Low, Medium, High")]
    UnknownSpeedPreference(String),
}

/// The closed set of user classes a design can be tailored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserClass {
    Child,
    Adult,
    Professional,
}

static USER_CLASS_ALIASES: Map<&'static str, UserClass> = phf_map! {
    "child" => UserClass::Child,
    "kid" => UserClass::Child,
    "adult" => UserClass::Adult,
    "professional" => UserClass::Professional,
    "pro" => UserClass::Professional,
    "expert" => UserClass::Professional,
};

impl UserClass {
    pub const ALL: [UserClass; 3] = [UserClass::Child, UserClass::Adult, UserClass::Professional];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserClass::Child => "Child",
            UserClass::Adult => "Adult",
            UserClass::Professional => "Professional",
        }
    }

    /// The fixed target profile for this class.
    pub fn profile(&self) -> &'static UserProfile {
        match self {
            UserClass::Child => &CHILD_PROFILE,
            UserClass::Adult => &ADULT_PROFILE,
            UserClass::Professional => &PROFESSIONAL_PROFILE,
        }
    }
}

impl fmt::Display for UserClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserClass {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        USER_CLASS_ALIASES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ProfileError::UnknownProfile(s.to_string()))
    }
}

/// How fast the user wants the arrow to fly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpeedPreference {
    Low,
    #[default]
    Medium,
    High,
}

impl SpeedPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreference::Low => "Low",
            SpeedPreference::Medium => "Medium",
            SpeedPreference::High => "High",
        }
    }
}

impl fmt::Display for SpeedPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpeedPreference {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(SpeedPreference::Low),
            "medium" => Ok(SpeedPreference::Medium),
            "high" => Ok(SpeedPreference::High),
            _ => Err(ProfileError::UnknownSpeedPreference(s.to_string())),
        }
    }
}

/// Target design values and safety limits for one user class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UserProfile {
    pub bow_thickness: f64,
    pub bow_curvature: f64,
    pub limb_stiffness: f64,
    pub grip_width: f64,
    pub arrow_length: f64,
    pub arrow_weight: f64,
    pub tip_diameter: f64,
    pub tip_length: f64,
    /// Upper comfort limit on draw force (N).
    pub max_draw_force: f64,
    /// Upper safety limit on launch speed (m/s).
    pub max_launch_speed: f64,
    pub safety_factor: f64,
    pub speed_factor: f64,
    pub grip_size_factor: f64,
}

pub const CHILD_PROFILE: UserProfile = UserProfile {
    bow_thickness: 6.0,
    bow_curvature: 0.25,
    limb_stiffness: 0.4,
    grip_width: 36.0,
    arrow_length: 50.0,
    arrow_weight: 0.8,
    tip_diameter: 10.0,
    tip_length: 7.0,
    max_draw_force: 6.0,
    max_launch_speed: 3.5,
    safety_factor: 1.5,
    speed_factor: 0.8,
    grip_size_factor: 1.2,
};

pub const ADULT_PROFILE: UserProfile = UserProfile {
    bow_thickness: 8.0,
    bow_curvature: 0.3,
    limb_stiffness: 0.6,
    grip_width: 34.0,
    arrow_length: 60.0,
    arrow_weight: 1.0,
    tip_diameter: 8.0,
    tip_length: 5.0,
    max_draw_force: 10.0,
    max_launch_speed: 4.5,
    safety_factor: 1.2,
    speed_factor: 1.0,
    grip_size_factor: 1.0,
};

pub const PROFESSIONAL_PROFILE: UserProfile = UserProfile {
    bow_thickness: 11.0,
    bow_curvature: 0.35,
    limb_stiffness: 0.8,
    grip_width: 30.0,
    arrow_length: 70.0,
    arrow_weight: 1.2,
    tip_diameter: 6.0,
    tip_length: 4.0,
    max_draw_force: 20.0,
    max_launch_speed: 6.5,
    safety_factor: 1.0,
    speed_factor: 1.2,
    grip_size_factor: 0.9,
};
