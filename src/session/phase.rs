//! The four breathing phases and their fixed labels

use serde::Deserialize;

/// One stage of a breathing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Breathe in, circle grows
    #[default]
    Inhale,
    /// Hold with full lungs, circle stays large
    HoldAfterInhale,
    /// Breathe out, circle shrinks
    Exhale,
    /// Hold with empty lungs, circle stays small
    HoldAfterExhale,
}

impl Phase {
    /// All phases in cycle order
    pub const ALL: [Phase; 4] = [
        Phase::Inhale,
        Phase::HoldAfterInhale,
        Phase::Exhale,
        Phase::HoldAfterExhale,
    ];

    /// The phase that follows this one, wrapping after the last
    pub fn next(self) -> Phase {
        match self {
            Phase::Inhale => Phase::HoldAfterInhale,
            Phase::HoldAfterInhale => Phase::Exhale,
            Phase::Exhale => Phase::HoldAfterExhale,
            Phase::HoldAfterExhale => Phase::Inhale,
        }
    }

    /// Position in the cycle (0..4)
    pub fn index(self) -> usize {
        match self {
            Phase::Inhale => 0,
            Phase::HoldAfterInhale => 1,
            Phase::Exhale => 2,
            Phase::HoldAfterExhale => 3,
        }
    }

    /// Label shown above the circle
    pub fn label(self) -> &'static str {
        match self {
            Phase::Inhale => "Inhalar",
            Phase::HoldAfterInhale | Phase::HoldAfterExhale => "Mantener",
            Phase::Exhale => "Exhalar",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Inhale => write!(f, "Inhale"),
            Phase::HoldAfterInhale => write!(f, "HoldAfterInhale"),
            Phase::Exhale => write!(f, "Exhale"),
            Phase::HoldAfterExhale => write!(f, "HoldAfterExhale"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_advances_return_to_inhale() {
        let mut phase = Phase::Inhale;
        let mut visited = Vec::new();
        for _ in 0..4 {
            phase = phase.next();
            visited.push(phase);
        }
        assert_eq!(
            visited,
            vec![
                Phase::HoldAfterInhale,
                Phase::Exhale,
                Phase::HoldAfterExhale,
                Phase::Inhale
            ]
        );
    }

    #[test]
    fn test_index_matches_cycle_order() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
            assert_eq!(phase.next().index(), (i + 1) % 4);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Phase::Inhale.label(), "Inhalar");
        assert_eq!(Phase::HoldAfterInhale.label(), "Mantener");
        assert_eq!(Phase::Exhale.label(), "Exhalar");
        assert_eq!(Phase::HoldAfterExhale.label(), "Mantener");
    }

    #[test]
    fn test_deserialize_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            phase: Phase,
        }
        let w: Wrapper = toml::from_str(r#"phase = "hold_after_exhale""#).unwrap();
        assert_eq!(w.phase, Phase::HoldAfterExhale);
    }
}
