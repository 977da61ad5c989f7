//! Beacon uses and the vocabularies their radio buttons submit

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::records::{Aircraft, Communications, LandActivities, UseDetails, Vessel};
use crate::error::Error;

/// Where a beacon will be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Environment {
    Maritime,
    Aviation,
    Land,
    Other,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Maritime => "MARITIME",
            Environment::Aviation => "AVIATION",
            Environment::Land => "LAND",
            Environment::Other => "OTHER",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "MARITIME" => Ok(Environment::Maritime),
            "AVIATION" => Ok(Environment::Aviation),
            "LAND" => Ok(Environment::Land),
            "OTHER" => Ok(Environment::Other),
            other => Err(Error::UnrecognisedEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity radio values that other fields or the land payload depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Motor,
    Sailing,
    Rowing,
    SmallUnpowered,
    FishingVessel,
    MerchantVessel,
    Driving,
    Cycling,
    ClimbingMountaineering,
    Skiing,
    WalkingHiking,
    WorkingRemotely,
    Windfarm,
    Other,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Motor => "MOTOR",
            Activity::Sailing => "SAILING",
            Activity::Rowing => "ROWING",
            Activity::SmallUnpowered => "SMALL_UNPOWERED",
            Activity::FishingVessel => "FISHING_VESSEL",
            Activity::MerchantVessel => "MERCHANT_VESSEL",
            Activity::Driving => "DRIVING",
            Activity::Cycling => "CYCLING",
            Activity::ClimbingMountaineering => "CLIMBING_MOUNTAINEERING",
            Activity::Skiing => "SKIING",
            Activity::WalkingHiking => "WALKING_HIKING",
            Activity::WorkingRemotely => "WORKING_REMOTELY",
            Activity::Windfarm => "WINDFARM",
            Activity::Other => "OTHER",
        }
    }
}

/// One declared use of a beacon.
///
/// All environment payloads are kept so that switching environment on the
/// environment page does not throw away what was typed for another one;
/// [`BeaconUse::environment`] decides which payload is live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconUse {
    #[serde(default)]
    pub details: UseDetails,
    #[serde(default)]
    pub communications: Communications,
    #[serde(default)]
    pub vessel: Vessel,
    #[serde(default)]
    pub aircraft: Aircraft,
    #[serde(default)]
    pub land: LandActivities,
    #[serde(default)]
    pub main_use: bool,
}

impl BeaconUse {
    /// The first use of a new registration
    pub fn main() -> Self {
        Self {
            main_use: true,
            ..Self::default()
        }
    }

    /// `None` until a recognised environment has been chosen
    pub fn environment(&self) -> Option<Environment> {
        self.details.environment.parse().ok()
    }

    /// Overwrite the field submitted as `key`; `false` if the use has no such field.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        self.details.set(key, value)
            || self.communications.set(key, value)
            || self.vessel.set(key, value)
            || self.aircraft.set(key, value)
            || self.land.set(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.details
            .get(key)
            .or_else(|| self.communications.get(key))
            .or_else(|| self.vessel.get(key))
            .or_else(|| self.aircraft.get(key))
            .or_else(|| self.land.get(key))
    }

    /// Every field as `(form key, value)`
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.details
            .entries()
            .chain(self.communications.entries())
            .chain(self.vessel.entries())
            .chain(self.aircraft.entries())
            .chain(self.land.entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_round_trips_through_its_form_value() {
        for environment in [
            Environment::Maritime,
            Environment::Aviation,
            Environment::Land,
            Environment::Other,
        ] {
            assert_eq!(environment.as_str().parse::<Environment>().unwrap(), environment);
        }
    }

    #[test]
    fn test_unrecognised_environment() {
        let err = "SPACE".parse::<Environment>().unwrap_err();
        assert!(err.to_string().contains("SPACE"));
    }

    #[test]
    fn test_set_routes_keys_to_the_right_payload() {
        let mut beacon_use = BeaconUse::main();

        assert!(beacon_use.set("environment", "AVIATION"));
        assert!(beacon_use.set("aircraftMaxCapacity", "4"));
        assert!(beacon_use.set("maxCapacity", "10"));
        assert!(!beacon_use.set("hexId", "belongs to the beacon"));

        assert_eq!(beacon_use.environment(), Some(Environment::Aviation));
        assert_eq!(beacon_use.aircraft.max_capacity, "4");
        assert_eq!(beacon_use.vessel.max_capacity, "10");
        assert_eq!(beacon_use.get("aircraftMaxCapacity"), Some("4"));
    }

    #[test]
    fn test_blank_environment_is_unset() {
        assert_eq!(BeaconUse::main().environment(), None);
    }
}
