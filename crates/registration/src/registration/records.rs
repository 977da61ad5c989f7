//! Flat string records keyed by their form field names

use serde::{Deserialize, Serialize};

/// Declares a record of string fields, each bound to the form field name it
/// is submitted under. The generated `set`/`get` accept only those names,
/// which is what keeps unknown form keys out of a registration.
macro_rules! form_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $field:ident => $key:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(rename = $key, default)]
                pub $field: String,
            )*
        }

        impl $name {
            pub const KEYS: &'static [&'static str] = &[$($key),*];

            /// Overwrite the field submitted as `key`; `false` if no such field.
            pub fn set(&mut self, key: &str, value: &str) -> bool {
                match key {
                    $( $key => {
                        self.$field = value.to_string();
                        true
                    } )*
                    _ => false,
                }
            }

            pub fn get(&self, key: &str) -> Option<&str> {
                match key {
                    $( $key => Some(self.$field.as_str()), )*
                    _ => None,
                }
            }

            /// Every field as `(form key, value)`, in declaration order
            pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
                [$( ($key, self.$field.as_str()) ),*].into_iter()
            }
        }
    };
}

form_record! {
    /// Scalar attributes of the beacon itself
    pub struct BeaconDetails {
        manufacturer => "manufacturer",
        model => "model",
        hex_id => "hexId",
        manufacturer_serial_number => "manufacturerSerialNumber",
        chk_code => "chkCode",
        battery_expiry_date => "batteryExpiryDate",
        battery_expiry_date_month => "batteryExpiryDateMonth",
        battery_expiry_date_year => "batteryExpiryDateYear",
        last_serviced_date => "lastServicedDate",
        last_serviced_date_month => "lastServicedDateMonth",
        last_serviced_date_year => "lastServicedDateYear",
        reference_number => "referenceNumber",
        additional_beacon_use => "additionalBeaconUse",
    }
}

form_record! {
    pub struct OwnerDetails {
        full_name => "ownerFullName",
        email => "ownerEmail",
        telephone_number => "ownerTelephoneNumber",
        alternative_telephone_number => "ownerAlternativeTelephoneNumber",
        address_line1 => "ownerAddressLine1",
        address_line2 => "ownerAddressLine2",
        town_or_city => "ownerTownOrCity",
        county => "ownerCounty",
        postcode => "ownerPostcode",
    }
}

form_record! {
    /// Fields every use has regardless of environment
    pub struct UseDetails {
        environment => "environment",
        purpose => "purpose",
        activity => "activity",
        other_activity => "otherActivityText",
        more_details => "moreDetails",
    }
}

form_record! {
    /// Communication devices; each flag holds the ticked checkbox value and
    /// its `*Input` field the number or description that goes with it
    pub struct Communications {
        call_sign => "callSign",
        vhf_radio => "vhfRadio",
        fixed_vhf_radio => "fixedVhfRadio",
        fixed_vhf_radio_value => "fixedVhfRadioInput",
        portable_vhf_radio => "portableVhfRadio",
        portable_vhf_radio_value => "portableVhfRadioInput",
        satellite_telephone => "satelliteTelephone",
        satellite_telephone_value => "satelliteTelephoneInput",
        mobile_telephone => "mobileTelephone",
        mobile_telephone1 => "mobileTelephoneInput1",
        mobile_telephone2 => "mobileTelephoneInput2",
        other_communication => "otherCommunication",
        other_communication_value => "otherCommunicationInput",
    }
}

form_record! {
    pub struct Vessel {
        max_capacity => "maxCapacity",
        vessel_name => "vesselName",
        port_letter_number => "portLetterNumber",
        homeport => "homeport",
        area_of_operation => "areaOfOperation",
        beacon_location => "beaconLocation",
        imo_number => "imoNumber",
        ssr_number => "ssrNumber",
        official_number => "officialNumber",
        rig_platform_location => "rigPlatformLocation",
    }
}

form_record! {
    pub struct Aircraft {
        max_capacity => "aircraftMaxCapacity",
        manufacturer => "aircraftManufacturer",
        principal_airport => "principalAirport",
        secondary_airport => "secondaryAirport",
        registration_mark => "registrationMark",
        hex_address => "hexAddress",
        cn_or_msn_number => "cnOrMsnNumber",
        dongle => "dongle",
        beacon_position => "beaconPosition",
    }
}

form_record! {
    pub struct LandActivities {
        driving => "driving",
        cycling => "cycling",
        climbing_mountaineering => "climbingMountaineering",
        skiing => "skiing",
        walking_hiking => "walkingHiking",
        working_remotely => "workingRemotely",
        working_remotely_location => "workingRemotelyLocation",
        working_remotely_people_count => "workingRemotelyPeopleCount",
        windfarm => "windfarm",
        windfarm_location => "windfarmLocation",
        windfarm_people_count => "windfarmPeopleCount",
        other_activity_description => "otherActivityDescription",
        other_activity_location => "otherActivityLocation",
        other_activity_people_count => "otherActivityPeopleCount",
    }
}

/// One of the (up to three) emergency contacts.
///
/// Submitted as `emergencyContact{n}FullName` and friends, `n` in 1..=3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub telephone_number: String,
    #[serde(default)]
    pub alternative_telephone_number: String,
}

impl EmergencyContact {
    pub const KEY_PREFIX: &'static str = "emergencyContact";
    pub const SUFFIXES: [&'static str; 3] =
        ["FullName", "TelephoneNumber", "AlternativeTelephoneNumber"];

    pub fn set(&mut self, suffix: &str, value: &str) -> bool {
        let field = match suffix {
            "FullName" => &mut self.full_name,
            "TelephoneNumber" => &mut self.telephone_number,
            "AlternativeTelephoneNumber" => &mut self.alternative_telephone_number,
            _ => return false,
        };
        *field = value.to_string();
        true
    }

    pub fn get(&self, suffix: &str) -> Option<&str> {
        match suffix {
            "FullName" => Some(self.full_name.as_str()),
            "TelephoneNumber" => Some(self.telephone_number.as_str()),
            "AlternativeTelephoneNumber" => Some(self.alternative_telephone_number.as_str()),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        Self::SUFFIXES
            .iter()
            .filter_map(|suffix| self.get(suffix))
            .all(|value| value.trim().is_empty())
    }

    /// Split `emergencyContact2TelephoneNumber` into `(1, "TelephoneNumber")`.
    pub fn parse_key(key: &str) -> Option<(usize, &str)> {
        let rest = key.strip_prefix(Self::KEY_PREFIX)?;
        let mut chars = rest.chars();
        let position = chars.next()?.to_digit(10)? as usize;
        if !(1..=3).contains(&position) {
            return None;
        }
        Some((position - 1, chars.as_str()))
    }

    pub fn key(index: usize, suffix: &str) -> String {
        format!("{}{}{}", Self::KEY_PREFIX, index + 1, suffix)
    }
}
