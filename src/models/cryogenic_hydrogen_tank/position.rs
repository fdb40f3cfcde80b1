use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the tank is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TankPosition {
    InTheCabin,
    InTheBack,
    InTheFront,
    WingPod,
    Underbelly,
}

impl TankPosition {
    /// Mounted outside the fuselage, in the free stream.
    #[must_use]
    pub fn is_external(self) -> bool {
        matches!(self, TankPosition::WingPod | TankPosition::Underbelly)
    }

    /// Share of the outer area exposed to sunlight.
    #[must_use]
    pub fn solar_factor(self) -> f64 {
        match self {
            TankPosition::WingPod => 0.5,
            TankPosition::Underbelly => 0.25,
            TankPosition::InTheCabin | TankPosition::InTheBack | TankPosition::InTheFront => 0.0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TankPosition::InTheCabin => "in_the_cabin",
            TankPosition::InTheBack => "in_the_back",
            TankPosition::InTheFront => "in_the_front",
            TankPosition::WingPod => "wing_pod",
            TankPosition::Underbelly => "underbelly",
        }
    }
}

impl fmt::Display for TankPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_display() {
        for position in [
            TankPosition::InTheCabin,
            TankPosition::InTheBack,
            TankPosition::InTheFront,
            TankPosition::WingPod,
            TankPosition::Underbelly,
        ] {
            let json = serde_json::to_string(&position).unwrap();
            assert_eq!(json, format!("\"{position}\""));
            assert_eq!(serde_json::from_str::<TankPosition>(&json).unwrap(), position);
        }
    }

    #[test]
    fn only_external_tanks_see_the_sun() {
        assert!(TankPosition::Underbelly.is_external());
        assert!(!TankPosition::InTheBack.is_external());
        assert_eq!(TankPosition::InTheFront.solar_factor(), 0.0);
    }
}
