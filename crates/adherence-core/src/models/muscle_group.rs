// ABOUTME: Closed enumeration of muscle groups tracked by the adherence monitor
// ABOUTME: Normalizes free-text exercise metadata and program keys into canonical variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical muscle group
///
/// Raw exercise metadata and program target keys are free text; they are
/// converted with [`MuscleGroup::parse`] at the storage boundary and anything
/// unrecognized is dropped rather than carried as an ad hoc string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    /// Pectorals
    Chest,
    /// Deltoids
    Shoulders,
    /// Triceps brachii
    Triceps,
    /// General back / mid-back
    Back,
    /// Latissimus dorsi
    Lats,
    /// Trapezius
    Traps,
    /// Rhomboids
    Rhomboids,
    /// Biceps brachii
    Biceps,
    /// Forearm flexors and extensors
    Forearms,
    /// Quadriceps
    Quadriceps,
    /// Hamstrings
    Hamstrings,
    /// Gluteals
    Glutes,
    /// Gastrocnemius and soleus
    Calves,
    /// Inner thigh
    Adductors,
    /// Outer hip
    Abductors,
    /// Iliopsoas and rectus femoris (hip flexion)
    HipFlexors,
    /// Abdominals
    Core,
    /// Obliques
    Obliques,
    /// Erector spinae
    LowerBack,
}

impl MuscleGroup {
    /// Every variant, in declaration order
    pub const ALL: [Self; 19] = [
        Self::Chest,
        Self::Shoulders,
        Self::Triceps,
        Self::Back,
        Self::Lats,
        Self::Traps,
        Self::Rhomboids,
        Self::Biceps,
        Self::Forearms,
        Self::Quadriceps,
        Self::Hamstrings,
        Self::Glutes,
        Self::Calves,
        Self::Adductors,
        Self::Abductors,
        Self::HipFlexors,
        Self::Core,
        Self::Obliques,
        Self::LowerBack,
    ];

    /// Muscles counted on the pushing side of the push:pull ratio
    pub const PUSH: [Self; 3] = [Self::Chest, Self::Shoulders, Self::Triceps];

    /// Muscles counted on the pulling side of the push:pull ratio
    pub const PULL: [Self; 5] = [
        Self::Back,
        Self::Biceps,
        Self::Lats,
        Self::Traps,
        Self::Rhomboids,
    ];

    /// Canonical storage name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Shoulders => "shoulders",
            Self::Triceps => "triceps",
            Self::Back => "back",
            Self::Lats => "lats",
            Self::Traps => "traps",
            Self::Rhomboids => "rhomboids",
            Self::Biceps => "biceps",
            Self::Forearms => "forearms",
            Self::Quadriceps => "quadriceps",
            Self::Hamstrings => "hamstrings",
            Self::Glutes => "glutes",
            Self::Calves => "calves",
            Self::Adductors => "adductors",
            Self::Abductors => "abductors",
            Self::HipFlexors => "hip_flexors",
            Self::Core => "core",
            Self::Obliques => "obliques",
            Self::LowerBack => "lower_back",
        }
    }

    /// Parse free-text muscle metadata, resolving common aliases
    ///
    /// Returns `None` for values outside the enumeration.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        let group = match normalized.as_str() {
            "chest" | "pectorals" | "pecs" | "pectoralis_major" => Self::Chest,
            "shoulders" | "shoulder" | "deltoids" | "deltoid" | "delts" => Self::Shoulders,
            "triceps" | "tricep" => Self::Triceps,
            "back" | "upper_back" | "middle_back" => Self::Back,
            "lats" | "lat" | "latissimus_dorsi" => Self::Lats,
            "traps" | "trapezius" => Self::Traps,
            "rhomboids" | "rhomboid" => Self::Rhomboids,
            "biceps" | "bicep" => Self::Biceps,
            "forearms" | "forearm" => Self::Forearms,
            "quadriceps" | "quads" | "quad" => Self::Quadriceps,
            "hamstrings" | "hamstring" => Self::Hamstrings,
            "glutes" | "glute" | "gluteus_maximus" => Self::Glutes,
            "calves" | "calf" => Self::Calves,
            "adductors" | "adductor" => Self::Adductors,
            "abductors" | "abductor" => Self::Abductors,
            "hip_flexors" | "hip_flexor" => Self::HipFlexors,
            "core" | "abs" | "abdominals" => Self::Core,
            "obliques" | "oblique" => Self::Obliques,
            "lower_back" | "erector_spinae" => Self::LowerBack,
            _ => return None,
        };
        Some(group)
    }

    /// Whether this muscle counts toward the push side of push:pull
    #[must_use]
    pub fn is_push(&self) -> bool {
        Self::PUSH.contains(self)
    }

    /// Whether this muscle counts toward the pull side of push:pull
    #[must_use]
    pub fn is_pull(&self) -> bool {
        Self::PULL.contains(self)
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolves_aliases_case_insensitively() {
        assert_eq!(MuscleGroup::parse("Quads"), Some(MuscleGroup::Quadriceps));
        assert_eq!(MuscleGroup::parse("quadriceps"), Some(MuscleGroup::Quadriceps));
        assert_eq!(MuscleGroup::parse(" hamstring "), Some(MuscleGroup::Hamstrings));
        assert_eq!(MuscleGroup::parse("Pectorals"), Some(MuscleGroup::Chest));
        assert_eq!(MuscleGroup::parse("deltoids"), Some(MuscleGroup::Shoulders));
        assert_eq!(MuscleGroup::parse("Hip Flexors"), Some(MuscleGroup::HipFlexors));
        assert_eq!(MuscleGroup::parse("lower-back"), Some(MuscleGroup::LowerBack));
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert_eq!(MuscleGroup::parse("spleen"), None);
        assert_eq!(MuscleGroup::parse(""), None);
    }

    #[test]
    fn test_every_canonical_name_round_trips_through_parse() {
        for group in MuscleGroup::ALL {
            assert_eq!(MuscleGroup::parse(group.as_str()), Some(group));
        }
    }

    #[test]
    fn test_push_and_pull_sets_are_disjoint() {
        for group in MuscleGroup::ALL {
            assert!(!(group.is_push() && group.is_pull()), "{group} on both sides");
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&MuscleGroup::HipFlexors).unwrap();
        assert_eq!(json, "\"hip_flexors\"");
    }
}
