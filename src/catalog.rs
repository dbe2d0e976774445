/// One of the four fixed breathing slots, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::IntoStaticStr)]
pub enum Phase {
    Inhale,
    #[strum(serialize = "Hold")]
    HoldIn,
    Exhale,
    #[strum(serialize = "Hold")]
    HoldOut,
}

/// Slot order every profile's `timings` array is aligned to
pub const PHASE_SLOTS: [Phase; 4] = [
    Phase::Inhale,
    Phase::HoldIn,
    Phase::Exhale,
    Phase::HoldOut,
];

impl Phase {
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Inhale and the hold that follows it keep the lungs full
    pub fn is_expanded(self) -> bool {
        matches!(self, Phase::Inhale | Phase::HoldIn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseProfile {
    pub id: &'static str,
    /// Seconds per slot, aligned with [`PHASE_SLOTS`]
    pub timings: [u32; 4],
    pub description: &'static str,
}

impl ExerciseProfile {
    /// Slots with a positive duration, in their original order
    pub fn active_phases(&self) -> Vec<(Phase, u32)> {
        PHASE_SLOTS
            .into_iter()
            .zip(self.timings)
            .filter(|&(_, secs)| secs > 0)
            .collect()
    }

    /// Seconds per full cycle, widened so extreme timings cannot overflow
    pub fn cycle_duration_secs(&self) -> u64 {
        self.timings.iter().map(|&secs| u64::from(secs)).sum()
    }

    /// All four slots with their timings, zero-length ones included
    pub fn slots(&self) -> impl Iterator<Item = (Phase, u32)> {
        PHASE_SLOTS.into_iter().zip(self.timings)
    }
}

pub const CATALOG: &[ExerciseProfile] = &[
    ExerciseProfile {
        id: "Box Breathing",
        timings: [4, 4, 4, 4],
        description: "Activates the parasympathetic nervous system, helping you relax.",
    },
    ExerciseProfile {
        id: "Clear Mind",
        timings: [3, 0, 9, 0],
        description:
            "Enables resources for innovative solutions searching, stimulates creativity.",
    },
    ExerciseProfile {
        id: "Relax",
        timings: [3, 0, 6, 9],
        description: "Relieves nervous and physical tension, helps switch to resting.",
    },
    ExerciseProfile {
        id: "Calming",
        timings: [3, 6, 3, 6],
        description: "Balances strong emotions, enables taking control over them.",
    },
    ExerciseProfile {
        id: "Power",
        timings: [3, 6, 6, 0],
        description: "Mobilizes body resources for coping with serious tasks, promotes concentration on important things.",
    },
    ExerciseProfile {
        id: "Harmony",
        timings: [3, 9, 6, 3],
        description: "Harmonizes psycho-emotional processes, gives the feeling of integrity.",
    },
];

pub const DEFAULT_EXERCISE: &str = "Box Breathing";

/// Session lengths offered by the duration picker, in minutes
pub const DURATION_CHOICES: [u32; 2] = [4, 8];

pub fn list_exercises() -> &'static [ExerciseProfile] {
    CATALOG
}

pub fn find_exercise<'a>(
    catalog: &'a [ExerciseProfile],
    id: &str,
) -> Option<&'a ExerciseProfile> {
    catalog.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::Inhale.label(), "Inhale");
        assert_eq!(Phase::HoldIn.label(), "Hold");
        assert_eq!(Phase::Exhale.label(), "Exhale");
        assert_eq!(Phase::HoldOut.label(), "Hold");
        assert_eq!(Phase::HoldOut.to_string(), "Hold");
    }

    #[test]
    fn test_catalog_contents() {
        let ids: Vec<&str> = list_exercises().iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec!["Box Breathing", "Clear Mind", "Relax", "Calming", "Power", "Harmony"]
        );

        assert_eq!(find_exercise(CATALOG, "Relax").unwrap().timings, [3, 0, 6, 9]);
        assert_eq!(find_exercise(CATALOG, "Harmony").unwrap().timings, [3, 9, 6, 3]);
        assert!(find_exercise(CATALOG, "box breathing").is_none());
    }

    #[test]
    fn test_active_phases_match_positive_timings() {
        for profile in CATALOG {
            let active = profile.active_phases();
            let positive = profile.timings.iter().filter(|&&t| t > 0).count();
            assert_eq!(active.len(), positive, "{}", profile.id);

            // slot order is preserved
            let positions: Vec<usize> = active
                .iter()
                .map(|(phase, _)| PHASE_SLOTS.iter().position(|p| p == phase).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", profile.id);
        }
    }

    #[test]
    fn test_clear_mind_skips_holds() {
        let clear_mind = find_exercise(CATALOG, "Clear Mind").unwrap();
        assert_eq!(
            clear_mind.active_phases(),
            vec![(Phase::Inhale, 3), (Phase::Exhale, 9)]
        );
        assert_eq!(clear_mind.cycle_duration_secs(), 12);
    }

    #[test]
    fn test_cycle_duration() {
        assert_eq!(find_exercise(CATALOG, "Box Breathing").unwrap().cycle_duration_secs(), 16);
        assert_eq!(find_exercise(CATALOG, "Power").unwrap().cycle_duration_secs(), 15);
        assert_eq!(find_exercise(CATALOG, "Harmony").unwrap().cycle_duration_secs(), 21);
    }

    #[test]
    fn test_cycle_duration_of_huge_timings() {
        let huge = ExerciseProfile {
            id: "Huge",
            timings: [u32::MAX, 1, 0, u32::MAX],
            description: "",
        };
        assert_eq!(huge.cycle_duration_secs(), 2 * u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_expanded_phases() {
        assert!(Phase::Inhale.is_expanded());
        assert!(Phase::HoldIn.is_expanded());
        assert!(!Phase::Exhale.is_expanded());
        assert!(!Phase::HoldOut.is_expanded());
    }
}
