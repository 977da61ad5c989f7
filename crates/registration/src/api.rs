//! Request body for the backend registration API
//!
//! The intake shape (form field names, everything a string) differs from what
//! the API accepts: owner and emergency contacts are nested objects,
//! communication flags are booleans with renamed value fields, counts are
//! numbers, and blank optional fields are left out entirely.

use serde::{Deserialize, Serialize};

use crate::registration::{
    Activity, Aircraft, BeaconUse, EmergencyContact, Environment, LandActivities, OwnerDetails,
    Registration, Vessel,
};

/// `POST` body of a registration: `{ "beacons": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub beacons: Vec<BeaconRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconRequest {
    pub manufacturer: String,
    pub model: String,
    pub hex_id: String,
    pub manufacturer_serial_number: String,
    pub reference_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chk_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub battery_expiry_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_serviced_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_holder_id: Option<String>,
    pub owner: OwnerRequest,
    pub emergency_contacts: Vec<EmergencyContactRequest>,
    pub uses: Vec<UseRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRequest {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub telephone_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alternative_telephone_number: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address_line2: String,
    pub town_or_city: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub county: String,
    pub postcode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContactRequest {
    pub full_name: String,
    pub telephone_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alternative_telephone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseRequest {
    pub environment: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub purpose: String,
    pub activity: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub other_activity: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub more_details: String,
    pub main_use: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub call_sign: String,
    pub vhf_radio: bool,
    pub fixed_vhf_radio: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fixed_vhf_radio_value: String,
    pub portable_vhf_radio: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub portable_vhf_radio_value: String,
    pub satellite_telephone: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub satellite_telephone_value: String,
    pub mobile_telephone: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mobile_telephone1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mobile_telephone2: String,
    pub other_communication: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub other_communication_value: String,

    #[serde(flatten)]
    pub payload: UsePayloadRequest,
}

/// Environment-specific part of a use, flattened into the use object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UsePayloadRequest {
    Vessel(VesselRequest),
    Aircraft(AircraftRequest),
    Land(LandRequest),
    None {},
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vessel_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub port_letter_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub homeport: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub area_of_operation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub beacon_location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub imo_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssr_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub official_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rig_platform_location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub aircraft_manufacturer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub principal_airport: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secondary_airport: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub registration_mark: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hex_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cn_or_msn_number: String,
    pub dongle: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub beacon_position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandRequest {
    pub driving: bool,
    pub cycling: bool,
    pub climbing_mountaineering: bool,
    pub skiing: bool,
    pub walking_hiking: bool,
    pub working_remotely: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub working_remotely_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_remotely_people_count: Option<u64>,
    pub windfarm: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub windfarm_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windfarm_people_count: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub other_activity_description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub other_activity_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_activity_people_count: Option<u64>,
}

/// `Some` only for values made entirely of digits
fn whole_number(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// A ticked checkbox submits a non-blank value
fn is_selected(value: &str) -> bool {
    !value.trim().is_empty()
}

fn is_yes(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "yes")
}

impl From<&OwnerDetails> for OwnerRequest {
    fn from(owner: &OwnerDetails) -> Self {
        Self {
            full_name: owner.full_name.clone(),
            email: owner.email.clone(),
            telephone_number: owner.telephone_number.clone(),
            alternative_telephone_number: owner.alternative_telephone_number.clone(),
            address_line1: owner.address_line1.clone(),
            address_line2: owner.address_line2.clone(),
            town_or_city: owner.town_or_city.clone(),
            county: owner.county.clone(),
            postcode: owner.postcode.clone(),
        }
    }
}

impl From<&EmergencyContact> for EmergencyContactRequest {
    fn from(contact: &EmergencyContact) -> Self {
        Self {
            full_name: contact.full_name.clone(),
            telephone_number: contact.telephone_number.clone(),
            alternative_telephone_number: contact.alternative_telephone_number.clone(),
        }
    }
}

impl From<&Vessel> for VesselRequest {
    fn from(vessel: &Vessel) -> Self {
        Self {
            max_capacity: whole_number(&vessel.max_capacity),
            vessel_name: vessel.vessel_name.clone(),
            port_letter_number: vessel.port_letter_number.clone(),
            homeport: vessel.homeport.clone(),
            area_of_operation: vessel.area_of_operation.clone(),
            beacon_location: vessel.beacon_location.clone(),
            imo_number: vessel.imo_number.clone(),
            ssr_number: vessel.ssr_number.clone(),
            official_number: vessel.official_number.clone(),
            rig_platform_location: vessel.rig_platform_location.clone(),
        }
    }
}

impl From<&Aircraft> for AircraftRequest {
    fn from(aircraft: &Aircraft) -> Self {
        Self {
            max_capacity: whole_number(&aircraft.max_capacity),
            aircraft_manufacturer: aircraft.manufacturer.clone(),
            principal_airport: aircraft.principal_airport.clone(),
            secondary_airport: aircraft.secondary_airport.clone(),
            registration_mark: aircraft.registration_mark.clone(),
            hex_address: aircraft.hex_address.clone(),
            cn_or_msn_number: aircraft.cn_or_msn_number.clone(),
            dongle: is_yes(&aircraft.dongle),
            beacon_position: aircraft.beacon_position.clone(),
        }
    }
}

impl LandRequest {
    /// The land activity is picked with the `activity` radio, so each flag is
    /// set when it names that activity.
    fn new(activity: &str, land: &LandActivities) -> Self {
        let chosen = |candidate: Activity, ticked: &str| {
            activity == candidate.as_str() || is_selected(ticked)
        };

        Self {
            driving: chosen(Activity::Driving, &land.driving),
            cycling: chosen(Activity::Cycling, &land.cycling),
            climbing_mountaineering: chosen(
                Activity::ClimbingMountaineering,
                &land.climbing_mountaineering,
            ),
            skiing: chosen(Activity::Skiing, &land.skiing),
            walking_hiking: chosen(Activity::WalkingHiking, &land.walking_hiking),
            working_remotely: chosen(Activity::WorkingRemotely, &land.working_remotely),
            working_remotely_location: land.working_remotely_location.clone(),
            working_remotely_people_count: whole_number(&land.working_remotely_people_count),
            windfarm: chosen(Activity::Windfarm, &land.windfarm),
            windfarm_location: land.windfarm_location.clone(),
            windfarm_people_count: whole_number(&land.windfarm_people_count),
            other_activity_description: land.other_activity_description.clone(),
            other_activity_location: land.other_activity_location.clone(),
            other_activity_people_count: whole_number(&land.other_activity_people_count),
        }
    }
}

impl From<&BeaconUse> for UseRequest {
    fn from(beacon_use: &BeaconUse) -> Self {
        let details = &beacon_use.details;
        let communications = &beacon_use.communications;

        let payload = match beacon_use.environment() {
            Some(Environment::Maritime) => UsePayloadRequest::Vessel((&beacon_use.vessel).into()),
            Some(Environment::Aviation) => UsePayloadRequest::Aircraft((&beacon_use.aircraft).into()),
            Some(Environment::Land | Environment::Other) => {
                UsePayloadRequest::Land(LandRequest::new(&details.activity, &beacon_use.land))
            }
            None => UsePayloadRequest::None {},
        };

        Self {
            environment: details.environment.clone(),
            purpose: details.purpose.clone(),
            activity: details.activity.clone(),
            other_activity: details.other_activity.clone(),
            more_details: details.more_details.clone(),
            main_use: beacon_use.main_use,
            call_sign: communications.call_sign.clone(),
            vhf_radio: is_selected(&communications.vhf_radio),
            fixed_vhf_radio: is_selected(&communications.fixed_vhf_radio),
            fixed_vhf_radio_value: communications.fixed_vhf_radio_value.clone(),
            portable_vhf_radio: is_selected(&communications.portable_vhf_radio),
            portable_vhf_radio_value: communications.portable_vhf_radio_value.clone(),
            satellite_telephone: is_selected(&communications.satellite_telephone),
            satellite_telephone_value: communications.satellite_telephone_value.clone(),
            mobile_telephone: is_selected(&communications.mobile_telephone),
            mobile_telephone1: communications.mobile_telephone1.clone(),
            mobile_telephone2: communications.mobile_telephone2.clone(),
            other_communication: is_selected(&communications.other_communication),
            other_communication_value: communications.other_communication_value.clone(),
            payload,
        }
    }
}

impl Registration {
    /// Build the body sent to the backend registration API.
    ///
    /// The first emergency contact is always sent, the others only when
    /// something was entered for them. Uses are ordered main use first.
    pub fn serialise_to_api(&self) -> RegistrationRequest {
        let beacon = self.beacon();

        let emergency_contacts = self
            .emergency_contacts()
            .iter()
            .enumerate()
            .filter(|(index, contact)| *index == 0 || !contact.is_blank())
            .map(|(_, contact)| contact.into())
            .collect();

        let mut uses: Vec<UseRequest> = self.uses().iter().map(UseRequest::from).collect();
        uses.sort_by_key(|beacon_use| !beacon_use.main_use);

        RegistrationRequest {
            beacons: vec![BeaconRequest {
                manufacturer: beacon.manufacturer.clone(),
                model: beacon.model.clone(),
                hex_id: beacon.hex_id.clone(),
                manufacturer_serial_number: beacon.manufacturer_serial_number.clone(),
                reference_number: beacon.reference_number.clone(),
                chk_code: beacon.chk_code.clone(),
                battery_expiry_date: beacon.battery_expiry_date.clone(),
                last_serviced_date: beacon.last_serviced_date.clone(),
                account_holder_id: self.account_holder_id().map(str::to_string),
                owner: self.owner().into(),
                emergency_contacts,
                uses,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::FormSubmission;
    use serde_json::{json, Value};

    fn form(pairs: &[(&str, &str)]) -> FormSubmission {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn maritime_registration() -> Registration {
        let mut registration = Registration::new();
        registration.update(&form(&[
            ("manufacturer", "Raleigh"),
            ("model", "Chopper"),
            ("hexId", "1D0EA08C52FFBFF"),
            ("manufacturerSerialNumber", "1234"),
            ("useIndex", "0"),
            ("environment", "MARITIME"),
            ("purpose", "COMMERCIAL"),
            ("activity", "FISHING_VESSEL"),
            ("maxCapacity", "10"),
            ("vesselName", "SS Great Britain"),
            ("vhfRadio", "VHF_RADIO"),
            ("fixedVhfRadio", "FIXED_VHF_RADIO"),
            ("fixedVhfRadioInput", "235123456"),
            ("mobileTelephone", "MOBILE_TELEPHONE"),
            ("mobileTelephoneInput1", "0123456789"),
            ("mobileTelephoneInput2", "01234567890"),
            ("otherActivityText", "Zorbing"),
            ("ownerFullName", "Steve Stevington"),
            ("ownerAddressLine1", "1 Beacon Square"),
            ("ownerTownOrCity", "Bristol"),
            ("ownerPostcode", "BS8 9UA"),
            ("emergencyContact1FullName", "Emma Hamilton"),
            ("emergencyContact1TelephoneNumber", "01632 960 001"),
        ]));
        registration
    }

    fn first_use(registration: &Registration) -> Value {
        let json = serde_json::to_value(registration.serialise_to_api()).unwrap();
        json["beacons"][0]["uses"][0].clone()
    }

    #[test]
    fn test_nested_shape() {
        let json = serde_json::to_value(maritime_registration().serialise_to_api()).unwrap();
        let beacon = &json["beacons"][0];

        assert_eq!(beacon["manufacturer"], "Raleigh");
        assert_eq!(beacon["hexId"], "1D0EA08C52FFBFF");
        assert_eq!(beacon["owner"]["fullName"], "Steve Stevington");
        assert_eq!(beacon["owner"]["postcode"], "BS8 9UA");
        assert!(beacon["owner"].get("email").is_none());
        assert!(beacon.get("accountHolderId").is_none());
        assert_eq!(
            beacon["emergencyContacts"],
            json!([{ "fullName": "Emma Hamilton", "telephoneNumber": "01632 960 001" }])
        );
        assert_eq!(beacon["uses"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_communications_are_renamed() {
        let beacon_use = first_use(&maritime_registration());

        assert_eq!(beacon_use["vhfRadio"], true);
        assert_eq!(beacon_use["fixedVhfRadio"], true);
        assert_eq!(beacon_use["fixedVhfRadioValue"], "235123456");
        assert_eq!(beacon_use["portableVhfRadio"], false);
        assert_eq!(beacon_use["mobileTelephone1"], "0123456789");
        assert_eq!(beacon_use["mobileTelephone2"], "01234567890");
        assert_eq!(beacon_use["otherActivity"], "Zorbing");
        assert!(beacon_use.get("fixedVhfRadioInput").is_none());
        assert!(beacon_use.get("otherActivityText").is_none());
    }

    #[test]
    fn test_vessel_payload_for_maritime_use() {
        let beacon_use = first_use(&maritime_registration());

        assert_eq!(beacon_use["environment"], "MARITIME");
        assert_eq!(beacon_use["maxCapacity"], 10);
        assert_eq!(beacon_use["vesselName"], "SS Great Britain");
        assert!(beacon_use.get("dongle").is_none());
        assert!(beacon_use.get("driving").is_none());
    }

    #[test]
    fn test_aircraft_payload_for_aviation_use() {
        let mut registration = Registration::new();
        registration.update(&form(&[
            ("useIndex", "0"),
            ("environment", "AVIATION"),
            ("aircraftMaxCapacity", "4"),
            ("aircraftManufacturer", "Boeing"),
            ("dongle", "true"),
            ("vesselName", "typed before switching environment"),
        ]));

        let beacon_use = first_use(&registration);
        assert_eq!(beacon_use["maxCapacity"], 4);
        assert_eq!(beacon_use["aircraftManufacturer"], "Boeing");
        assert_eq!(beacon_use["dongle"], true);
        assert!(beacon_use.get("vesselName").is_none());
    }

    #[test]
    fn test_land_payload_for_land_use() {
        let mut registration = Registration::new();
        registration.update(&form(&[
            ("useIndex", "0"),
            ("environment", "LAND"),
            ("activity", "WINDFARM"),
            ("windfarmLocation", "Scotland"),
            ("windfarmPeopleCount", "100"),
        ]));

        let beacon_use = first_use(&registration);
        assert_eq!(beacon_use["windfarm"], true);
        assert_eq!(beacon_use["driving"], false);
        assert_eq!(beacon_use["windfarmLocation"], "Scotland");
        assert_eq!(beacon_use["windfarmPeopleCount"], 100);
    }

    #[test]
    fn test_land_flag_follows_chosen_activity() {
        let mut registration = Registration::new();
        registration.update(&form(&[
            ("useIndex", "0"),
            ("environment", "LAND"),
            ("activity", "DRIVING"),
        ]));

        let beacon_use = first_use(&registration);
        assert_eq!(beacon_use["activity"], "DRIVING");
        assert_eq!(beacon_use["driving"], true);
        assert_eq!(beacon_use["cycling"], false);
        assert_eq!(beacon_use["walkingHiking"], false);
        assert_eq!(beacon_use["windfarm"], false);
    }

    #[test]
    fn test_max_capacity_not_a_number_is_omitted() {
        let mut registration = maritime_registration();
        registration.update(&form(&[("useIndex", "0"), ("maxCapacity", "not a number")]));

        assert!(first_use(&registration).get("maxCapacity").is_none());
    }

    #[test]
    fn test_max_capacity_not_a_whole_number_is_omitted() {
        let mut registration = maritime_registration();
        registration.update(&form(&[("useIndex", "0"), ("maxCapacity", "0.112")]));

        assert!(first_use(&registration).get("maxCapacity").is_none());
    }

    #[test]
    fn test_main_use_is_serialised_first() {
        let mut registration = Registration::new();
        registration.update(&form(&[("useIndex", "0"), ("environment", "LAND")]));
        let second = registration.create_use();
        registration.update(&form(&[
            ("useIndex", second.to_string().as_str()),
            ("environment", "MARITIME"),
        ]));

        // Swap so the main use is stored second.
        let mut json = serde_json::to_value(&registration).unwrap();
        json["uses"].as_array_mut().unwrap().reverse();
        let registration: Registration = serde_json::from_value(json).unwrap();
        assert!(!registration.uses()[0].main_use);

        let uses = registration.serialise_to_api().beacons[0].uses.clone();
        assert!(uses[0].main_use);
        assert_eq!(uses[0].environment, "LAND");
        assert!(!uses[1].main_use);
    }

    #[test]
    fn test_optional_emergency_contacts_sent_only_when_entered() {
        let mut registration = maritime_registration();
        registration.update(&form(&[("emergencyContact3FullName", "Third Contact")]));

        let request = registration.serialise_to_api();
        let contacts = &request.beacons[0].emergency_contacts;
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[1].full_name, "Third Contact");
    }

    #[test]
    fn test_late_bound_fields_are_serialised() {
        let mut registration = maritime_registration();
        registration.set_reference_number("ABC1234");
        registration.set_account_holder_id(Some("holder-1".to_string()));

        let beacon = &registration.serialise_to_api().beacons[0];
        assert_eq!(beacon.reference_number, "ABC1234");
        assert_eq!(beacon.account_holder_id.as_deref(), Some("holder-1"));
    }
}
