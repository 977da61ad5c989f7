//! The registration journey: one [`PageDefinition`] per form page

use beacon_registration::{
    Activity, Condition, EmergencyContact, Environment, FieldManager, FormManager,
    FormSubmission, Registration, ValidationRule,
};

use crate::page::{Destination, PageDefinition};

/// First page after the start page
pub const FIRST_PAGE: &str = "check-beacon-details";

/// Summary page that submits the registration
pub const CHECK_YOUR_ANSWERS: &str = "check-your-answers";

/// Confirmation shown after a successful submission
pub const APPLICATION_COMPLETE: &str = "application-complete";

const MIN_DATE_YEAR: i32 = 1980;

pub static PAGES: &[PageDefinition] = &[
    PageDefinition {
        slug: "check-beacon-details",
        form: check_beacon_details_form,
        transform: Some(normalise_hex_id),
        next: |_, use_index| Destination::new("beacon-information", use_index),
    },
    PageDefinition {
        slug: "beacon-information",
        form: beacon_information_form,
        transform: Some(compose_dates),
        next: |_, use_index| Destination::new("beacon-use", use_index),
    },
    PageDefinition {
        slug: "beacon-use",
        form: beacon_use_form,
        transform: None,
        next: after_beacon_use,
    },
    PageDefinition {
        slug: "purpose",
        form: purpose_form,
        transform: None,
        next: |_, use_index| Destination::new("activity", use_index),
    },
    PageDefinition {
        slug: "activity",
        form: activity_form,
        transform: None,
        next: after_activity,
    },
    PageDefinition {
        slug: "about-the-vessel",
        form: about_the_vessel_form,
        transform: None,
        next: |_, use_index| Destination::new("vessel-communications", use_index),
    },
    PageDefinition {
        slug: "vessel-communications",
        form: vessel_communications_form,
        transform: None,
        next: |_, use_index| Destination::new("more-details", use_index),
    },
    PageDefinition {
        slug: "about-the-aircraft",
        form: about_the_aircraft_form,
        transform: None,
        next: |_, use_index| Destination::new("aircraft-communications", use_index),
    },
    PageDefinition {
        slug: "aircraft-communications",
        form: aircraft_communications_form,
        transform: None,
        next: |_, use_index| Destination::new("more-details", use_index),
    },
    PageDefinition {
        slug: "land-communications",
        form: land_communications_form,
        transform: None,
        next: |_, use_index| Destination::new("more-details", use_index),
    },
    PageDefinition {
        slug: "more-details",
        form: more_details_form,
        transform: None,
        next: |_, use_index| Destination::new("additional-beacon-use", use_index),
    },
    PageDefinition {
        slug: "additional-beacon-use",
        form: additional_beacon_use_form,
        transform: None,
        next: after_additional_beacon_use,
    },
    PageDefinition {
        slug: "about-beacon-owner",
        form: about_beacon_owner_form,
        transform: None,
        next: |_, use_index| Destination::new("beacon-owner-address", use_index),
    },
    PageDefinition {
        slug: "beacon-owner-address",
        form: beacon_owner_address_form,
        transform: None,
        next: |_, use_index| Destination::new("emergency-contact", use_index),
    },
    PageDefinition {
        slug: "emergency-contact",
        form: emergency_contact_form,
        transform: None,
        next: |_, use_index| Destination::new(CHECK_YOUR_ANSWERS, use_index),
    },
];

pub fn find(slug: &str) -> Option<&'static PageDefinition> {
    PAGES.iter().find(|page| page.slug == slug)
}

fn value(data: &FormSubmission, name: &str) -> FieldManager {
    FieldManager::new(data.get(name).cloned().unwrap_or_default())
}

fn optional(form: FormManager, data: &FormSubmission, names: &[&str]) -> FormManager {
    names
        .iter()
        .fold(form, |form, name| form.field(*name, value(data, name)))
}

fn normalise_hex_id(mut data: FormSubmission) -> FormSubmission {
    if let Some(hex_id) = data.get_mut("hexId") {
        *hex_id = hex_id.trim().to_uppercase();
    }
    data
}

fn check_beacon_details_form(data: &FormSubmission) -> FormManager {
    FormManager::new()
        .field(
            "manufacturer",
            value(data, "manufacturer").with_rules(vec![ValidationRule::required(
                "Beacon manufacturer is a required field",
            )]),
        )
        .field(
            "model",
            value(data, "model")
                .with_rules(vec![ValidationRule::required("Beacon model is a required field")]),
        )
        .field(
            "hexId",
            value(data, "hexId").with_rules(vec![
                ValidationRule::required("Beacon HEX ID or UIN must not be empty"),
                ValidationRule::is_length("Beacon HEX ID or UIN must be 15 characters long", 15),
                ValidationRule::should_not_contain(
                    "Your HEX ID should not contain the letter O. Replace it with 0 (zero)",
                    "O",
                ),
                ValidationRule::hexadecimal_string(
                    "Your HEX ID should only contain numbers (0 to 9) and letters (A to F)",
                ),
                ValidationRule::uk_encoded_beacon(
                    "You entered a beacon encoded with a HEX ID from another country. Your beacon must be UK-encoded to use this service",
                ),
            ]),
        )
}

/// `YYYY-MM` from separately entered month and year; blank when neither was entered.
fn compose_date(month: &str, year: &str) -> String {
    let (month, year) = (month.trim(), year.trim());
    if month.is_empty() && year.is_empty() {
        return String::new();
    }
    format!("{}-{:0>2}", year, month)
}

fn compose_dates(mut data: FormSubmission) -> FormSubmission {
    for prefix in ["batteryExpiryDate", "lastServicedDate"] {
        let month_key = format!("{prefix}Month");
        let year_key = format!("{prefix}Year");

        let month = data.get(&month_key).cloned().unwrap_or_default();
        let year = data.get(&year_key).cloned().unwrap_or_default();
        let date = compose_date(&month, &year);

        if !month.trim().is_empty() {
            data.insert(month_key, format!("{:0>2}", month.trim()));
        }
        data.insert(prefix.to_string(), date);
    }
    data
}

fn date_field(data: &FormSubmission, name: &str, label: &str, in_the_past: bool) -> FieldManager {
    let mut rules = vec![
        ValidationRule::is_valid_date(format!("Enter a complete {label} date")),
        ValidationRule::min_date_year(
            format!("Enter a {label} date after {MIN_DATE_YEAR}"),
            MIN_DATE_YEAR,
        ),
    ];
    if in_the_past {
        rules.push(ValidationRule::is_in_the_past(format!(
            "Enter a {label} date in the past"
        )));
    }

    value(data, name)
        .with_rules(rules)
        .with_conditions(vec![Condition::not_blank(name)])
}

fn beacon_information_form(data: &FormSubmission) -> FormManager {
    let form = FormManager::new()
        .field(
            "manufacturerSerialNumber",
            value(data, "manufacturerSerialNumber").with_rules(vec![ValidationRule::required(
                "Beacon manufacturer serial number is a required field",
            )]),
        )
        .field("chkCode", value(data, "chkCode"));

    optional(
        form,
        data,
        &["batteryExpiryDateMonth", "batteryExpiryDateYear"],
    )
    .field(
        "batteryExpiryDate",
        date_field(data, "batteryExpiryDate", "battery expiry", false),
    )
    .field("lastServicedDateMonth", value(data, "lastServicedDateMonth"))
    .field("lastServicedDateYear", value(data, "lastServicedDateYear"))
    .field(
        "lastServicedDate",
        date_field(data, "lastServicedDate", "last serviced", true),
    )
}

fn beacon_use_form(data: &FormSubmission) -> FormManager {
    FormManager::new().field(
        "environment",
        value(data, "environment").with_rules(vec![ValidationRule::required(
            "Where the beacon will be used is a required field",
        )]),
    )
}

fn environment_of(registration: &Registration, use_index: usize) -> Option<Environment> {
    registration
        .uses()
        .get(use_index)
        .and_then(|beacon_use| beacon_use.environment())
}

fn after_beacon_use(registration: &mut Registration, use_index: usize) -> Destination {
    match environment_of(registration, use_index) {
        Some(Environment::Maritime | Environment::Aviation) => {
            Destination::new("purpose", use_index)
        }
        _ => Destination::new("activity", use_index),
    }
}

fn purpose_form(data: &FormSubmission) -> FormManager {
    FormManager::new().field(
        "purpose",
        value(data, "purpose").with_rules(vec![ValidationRule::required(
            "Beacon use purpose is a required field",
        )]),
    )
}

fn activity_form(data: &FormSubmission) -> FormManager {
    let is = |activity: Activity| Condition::equals("activity", activity.as_str());

    FormManager::new()
        .field(
            "activity",
            value(data, "activity").with_rules(vec![ValidationRule::required(
                "Beacon use activity is a required field",
            )]),
        )
        .field(
            "otherActivityText",
            value(data, "otherActivityText")
                .with_rules(vec![
                    ValidationRule::required("Enter a description for your activity"),
                    ValidationRule::max_length("Activity description must be 100 characters or less", 100),
                ])
                .with_conditions(vec![is(Activity::Other)]),
        )
        .field(
            "workingRemotelyLocation",
            value(data, "workingRemotelyLocation")
                .with_rules(vec![ValidationRule::required(
                    "Enter where you will be working remotely",
                )])
                .with_conditions(vec![is(Activity::WorkingRemotely)]),
        )
        .field(
            "workingRemotelyPeopleCount",
            value(data, "workingRemotelyPeopleCount")
                .with_rules(vec![
                    ValidationRule::required(
                        "Enter how many people tend to be with you when you work remotely",
                    ),
                    ValidationRule::whole_number("Number of people must be a whole number"),
                ])
                .with_conditions(vec![is(Activity::WorkingRemotely)]),
        )
        .field(
            "windfarmLocation",
            value(data, "windfarmLocation")
                .with_rules(vec![ValidationRule::required("Enter the windfarm location")])
                .with_conditions(vec![is(Activity::Windfarm)]),
        )
        .field(
            "windfarmPeopleCount",
            value(data, "windfarmPeopleCount")
                .with_rules(vec![
                    ValidationRule::required(
                        "Enter how many people tend to be with you at the windfarm",
                    ),
                    ValidationRule::whole_number("Number of people must be a whole number"),
                ])
                .with_conditions(vec![is(Activity::Windfarm)]),
        )
        .field(
            "otherActivityDescription",
            value(data, "otherActivityDescription")
                .with_rules(vec![ValidationRule::required(
                    "Enter a description for your activity",
                )])
                .with_conditions(vec![is(Activity::Other)]),
        )
        .field(
            "otherActivityLocation",
            value(data, "otherActivityLocation")
                .with_rules(vec![ValidationRule::required("Enter where you use your beacon")])
                .with_conditions(vec![is(Activity::Other)]),
        )
        .field(
            "otherActivityPeopleCount",
            value(data, "otherActivityPeopleCount")
                .with_rules(vec![
                    ValidationRule::required(
                        "Enter how many people tend to be with you when you use your beacon",
                    ),
                    ValidationRule::whole_number("Number of people must be a whole number"),
                ])
                .with_conditions(vec![is(Activity::Other)]),
        )
}

fn after_activity(registration: &mut Registration, use_index: usize) -> Destination {
    let page = match environment_of(registration, use_index) {
        Some(Environment::Maritime) => "about-the-vessel",
        Some(Environment::Aviation) => "about-the-aircraft",
        Some(Environment::Land | Environment::Other) => "land-communications",
        None => "beacon-use",
    };
    Destination::new(page, use_index)
}

fn max_capacity(data: &FormSubmission, name: &str) -> FieldManager {
    value(data, name).with_rules(vec![
        ValidationRule::required("Maximum number of persons onboard is a required field"),
        ValidationRule::whole_number("Maximum number of persons onboard must be a whole number"),
    ])
}

fn about_the_vessel_form(data: &FormSubmission) -> FormManager {
    let form = FormManager::new().field("maxCapacity", max_capacity(data, "maxCapacity"));

    optional(
        form,
        data,
        &["vesselName", "homeport", "portLetterNumber", "imoNumber", "ssrNumber", "officialNumber"],
    )
    .field(
        "areaOfOperation",
        value(data, "areaOfOperation").with_rules(vec![ValidationRule::max_length(
            "Typical area of operation must be 250 characters or less",
            250,
        )]),
    )
    .field(
        "beaconLocation",
        value(data, "beaconLocation").with_rules(vec![ValidationRule::max_length(
            "Where the beacon is kept must be 100 characters or less",
            100,
        )]),
    )
    .field(
        "rigPlatformLocation",
        value(data, "rigPlatformLocation").with_rules(vec![ValidationRule::max_length(
            "Rig or platform location must be 250 characters or less",
            250,
        )]),
    )
}

/// Value field shown when its checkbox is ticked
fn ticked(
    data: &FormSubmission,
    name: &str,
    checkbox: &str,
    rules: Vec<ValidationRule>,
) -> FieldManager {
    value(data, name)
        .with_rules(rules)
        .with_conditions(vec![Condition::not_blank(checkbox)])
}

fn fixed_vhf_radio(form: FormManager, data: &FormSubmission) -> FormManager {
    form.field("fixedVhfRadio", value(data, "fixedVhfRadio")).field(
        "fixedVhfRadioInput",
        ticked(
            data,
            "fixedVhfRadioInput",
            "fixedVhfRadio",
            vec![
                ValidationRule::required("Enter your fixed VHF/DSC MMSI number"),
                ValidationRule::mmsi_number("Your fixed MMSI number must be exactly 9 digits long"),
            ],
        ),
    )
}

fn portable_vhf_radio(form: FormManager, data: &FormSubmission) -> FormManager {
    form.field("portableVhfRadio", value(data, "portableVhfRadio")).field(
        "portableVhfRadioInput",
        ticked(
            data,
            "portableVhfRadioInput",
            "portableVhfRadio",
            vec![
                ValidationRule::required("Enter your portable VHF/DSC MMSI number"),
                ValidationRule::mmsi_number(
                    "Your portable MMSI number must be exactly 9 digits long",
                ),
            ],
        ),
    )
}

fn satellite_mobile_and_other(form: FormManager, data: &FormSubmission) -> FormManager {
    form.field("satelliteTelephone", value(data, "satelliteTelephone"))
        .field(
            "satelliteTelephoneInput",
            ticked(
                data,
                "satelliteTelephoneInput",
                "satelliteTelephone",
                vec![
                    ValidationRule::required("Enter a satellite telephone number"),
                    ValidationRule::phone_number("Enter a satellite telephone number in the correct format"),
                ],
            ),
        )
        .field("mobileTelephone", value(data, "mobileTelephone"))
        .field(
            "mobileTelephoneInput1",
            ticked(
                data,
                "mobileTelephoneInput1",
                "mobileTelephone",
                vec![
                    ValidationRule::required("Enter a mobile telephone number"),
                    ValidationRule::phone_number("Enter a mobile telephone number, like 07700 982736"),
                ],
            ),
        )
        .field(
            "mobileTelephoneInput2",
            ticked(
                data,
                "mobileTelephoneInput2",
                "mobileTelephone",
                vec![ValidationRule::phone_number(
                    "Enter a mobile telephone number, like 07700 982736",
                )],
            ),
        )
        .field("otherCommunication", value(data, "otherCommunication"))
        .field(
            "otherCommunicationInput",
            ticked(
                data,
                "otherCommunicationInput",
                "otherCommunication",
                vec![
                    ValidationRule::required("Enter a description for your other communication"),
                    ValidationRule::max_length(
                        "Other communication must be 250 characters or less",
                        250,
                    ),
                ],
            ),
        )
}

fn vessel_communications_form(data: &FormSubmission) -> FormManager {
    let form = FormManager::new()
        .field("callSign", value(data, "callSign"))
        .field("vhfRadio", value(data, "vhfRadio"));
    let form = fixed_vhf_radio(form, data);
    let form = portable_vhf_radio(form, data);
    satellite_mobile_and_other(form, data)
}

fn about_the_aircraft_form(data: &FormSubmission) -> FormManager {
    let form = FormManager::new().field(
        "aircraftMaxCapacity",
        max_capacity(data, "aircraftMaxCapacity"),
    );

    optional(
        form,
        data,
        &[
            "aircraftManufacturer",
            "principalAirport",
            "secondaryAirport",
            "registrationMark",
            "hexAddress",
            "cnOrMsnNumber",
            "dongle",
        ],
    )
    .field(
        "beaconPosition",
        value(data, "beaconPosition").with_rules(vec![ValidationRule::max_length(
            "Where the beacon is kept must be 100 characters or less",
            100,
        )]),
    )
}

fn aircraft_communications_form(data: &FormSubmission) -> FormManager {
    let form = FormManager::new().field("vhfRadio", value(data, "vhfRadio"));
    satellite_mobile_and_other(form, data)
}

fn land_communications_form(data: &FormSubmission) -> FormManager {
    let form = portable_vhf_radio(FormManager::new(), data);
    satellite_mobile_and_other(form, data)
}

fn more_details_form(data: &FormSubmission) -> FormManager {
    FormManager::new().field(
        "moreDetails",
        value(data, "moreDetails").with_rules(vec![
            ValidationRule::required("Enter more details about how you use your beacon"),
            ValidationRule::max_length("More details must be 250 characters or less", 250),
        ]),
    )
}

fn additional_beacon_use_form(data: &FormSubmission) -> FormManager {
    FormManager::new().field(
        "additionalBeaconUse",
        value(data, "additionalBeaconUse").with_rules(vec![ValidationRule::required(
            "Tell us whether you use this beacon anywhere else",
        )]),
    )
}

/// Going back and answering "true" again moves on to the use already
/// created rather than adding another.
fn after_additional_beacon_use(registration: &mut Registration, use_index: usize) -> Destination {
    if registration.beacon().additional_beacon_use == "true" {
        let next = if use_index + 1 < registration.uses().len() {
            use_index + 1
        } else {
            registration.create_use()
        };
        Destination::new("beacon-use", next)
    } else {
        Destination::new("about-beacon-owner", use_index)
    }
}

fn about_beacon_owner_form(data: &FormSubmission) -> FormManager {
    FormManager::new()
        .field(
            "ownerFullName",
            value(data, "ownerFullName")
                .with_rules(vec![ValidationRule::required("Full name is a required field")]),
        )
        .field(
            "ownerEmail",
            value(data, "ownerEmail").with_rules(vec![ValidationRule::email(
                "Enter an email address in the correct format, like name@example.com",
            )]),
        )
        .field(
            "ownerTelephoneNumber",
            value(data, "ownerTelephoneNumber").with_rules(vec![ValidationRule::phone_number(
                "Enter a telephone number, like 01632 960 001 or 07700 900 982",
            )]),
        )
        .field(
            "ownerAlternativeTelephoneNumber",
            value(data, "ownerAlternativeTelephoneNumber").with_rules(vec![
                ValidationRule::phone_number(
                    "Enter a telephone number, like 01632 960 001 or 07700 900 982",
                ),
            ]),
        )
}

fn beacon_owner_address_form(data: &FormSubmission) -> FormManager {
    FormManager::new()
        .field(
            "ownerAddressLine1",
            value(data, "ownerAddressLine1").with_rules(vec![ValidationRule::required(
                "Building number and street is a required field",
            )]),
        )
        .field("ownerAddressLine2", value(data, "ownerAddressLine2"))
        .field(
            "ownerTownOrCity",
            value(data, "ownerTownOrCity")
                .with_rules(vec![ValidationRule::required("Town or city is a required field")]),
        )
        .field("ownerCounty", value(data, "ownerCounty"))
        .field(
            "ownerPostcode",
            value(data, "ownerPostcode").with_rules(vec![
                ValidationRule::required("Postcode is a required field"),
                ValidationRule::postcode("Postcode must be a valid UK postcode"),
            ]),
        )
}

fn emergency_contact_form(data: &FormSubmission) -> FormManager {
    let phone = || {
        ValidationRule::phone_number("Enter a telephone number, like 01632 960 001 or 07700 900 982")
    };

    (0..3).fold(FormManager::new(), |form, index| {
        let full_name = EmergencyContact::key(index, "FullName");
        let telephone = EmergencyContact::key(index, "TelephoneNumber");
        let alternative = EmergencyContact::key(index, "AlternativeTelephoneNumber");

        let (name_rules, telephone_rules) = if index == 0 {
            (
                vec![ValidationRule::required("Emergency contact full name is a required field")],
                vec![
                    ValidationRule::required(
                        "Emergency contact telephone number is a required field",
                    ),
                    phone(),
                ],
            )
        } else {
            (Vec::new(), vec![phone()])
        };

        form.field(&full_name, value(data, &full_name).with_rules(name_rules))
            .field(&telephone, value(data, &telephone).with_rules(telephone_rules))
            .field(&alternative, value(data, &alternative).with_rules(vec![phone()]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormSubmission {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn page(slug: &str) -> &'static PageDefinition {
        find(slug).unwrap()
    }

    fn errors_for(slug: &str, data: &FormSubmission) -> Vec<String> {
        (page(slug).form)(data)
            .mark_as_dirty()
            .serialise()
            .error_summary
            .into_iter()
            .map(|item| item.field_id)
            .collect()
    }

    fn hex_id_errors(hex_id: &str) -> Vec<String> {
        let data = form(&[("hexId", hex_id)]);
        (page("check-beacon-details").form)(&data)
            .mark_as_dirty()
            .serialise()
            .fields["hexId"]
            .error_messages
            .clone()
    }

    #[test]
    fn test_slugs_are_unique() {
        for (index, page) in PAGES.iter().enumerate() {
            assert!(PAGES[index + 1..].iter().all(|other| other.slug != page.slug));
        }
        assert!(find(FIRST_PAGE).is_some());
        assert!(find(CHECK_YOUR_ANSWERS).is_none());
    }

    #[test]
    fn test_valid_uk_hex_id() {
        assert!(hex_id_errors("1D0E9B07CEFFBFF").is_empty());
    }

    #[test]
    fn test_foreign_hex_id_fails_only_uk_rule() {
        assert_eq!(
            hex_id_errors("C00F429578002C1"),
            vec!["You entered a beacon encoded with a HEX ID from another country. Your beacon must be UK-encoded to use this service"]
        );
    }

    #[test]
    fn test_blank_hex_id() {
        assert_eq!(
            hex_id_errors(" "),
            vec![
                "Beacon HEX ID or UIN must not be empty",
                "Beacon HEX ID or UIN must be 15 characters long",
            ]
        );
    }

    #[test]
    fn test_hex_id_with_letter_o() {
        let errors = hex_id_errors("1D0E9B07CEFFBFO");
        assert!(errors[0].contains("letter O"));
    }

    #[test]
    fn test_hex_id_is_normalised() {
        let data = normalise_hex_id(form(&[("hexId", " 1d0e9b07ceffbff ")]));
        assert_eq!(data["hexId"], "1D0E9B07CEFFBFF");
    }

    #[test]
    fn test_dates_are_composed_and_padded() {
        let data = compose_dates(form(&[
            ("batteryExpiryDateMonth", "3"),
            ("batteryExpiryDateYear", "2030"),
            ("lastServicedDateMonth", ""),
            ("lastServicedDateYear", ""),
        ]));

        assert_eq!(data["batteryExpiryDateMonth"], "03");
        assert_eq!(data["batteryExpiryDate"], "2030-03");
        assert_eq!(data["lastServicedDate"], "");
    }

    #[test]
    fn test_date_rules_apply_only_when_entered() {
        let blank = compose_dates(form(&[("manufacturerSerialNumber", "1234")]));
        assert!(errors_for("beacon-information", &blank).is_empty());

        let old = compose_dates(form(&[
            ("manufacturerSerialNumber", "1234"),
            ("lastServicedDateMonth", "1"),
            ("lastServicedDateYear", "1979"),
        ]));
        assert_eq!(errors_for("beacon-information", &old), vec!["lastServicedDate"]);

        let future = compose_dates(form(&[
            ("manufacturerSerialNumber", "1234"),
            ("lastServicedDateMonth", "1"),
            ("lastServicedDateYear", "2999"),
        ]));
        assert_eq!(errors_for("beacon-information", &future), vec!["lastServicedDate"]);

        let incomplete = compose_dates(form(&[
            ("manufacturerSerialNumber", "1234"),
            ("batteryExpiryDateMonth", "13"),
            ("batteryExpiryDateYear", "2030"),
        ]));
        assert_eq!(
            errors_for("beacon-information", &incomplete),
            vec!["batteryExpiryDate"]
        );
    }

    #[test]
    fn test_other_activity_fields_only_required_for_other() {
        let motor = form(&[("activity", "MOTOR")]);
        assert!(errors_for("activity", &motor).is_empty());

        let other = form(&[("activity", "OTHER")]);
        assert_eq!(
            errors_for("activity", &other),
            vec![
                "otherActivityText",
                "otherActivityDescription",
                "otherActivityLocation",
                "otherActivityPeopleCount",
            ]
        );

        let described = form(&[
            ("activity", "OTHER"),
            ("otherActivityText", "Zorbing"),
            ("otherActivityDescription", "Rolling downhill"),
            ("otherActivityLocation", "Cooper's Hill"),
            ("otherActivityPeopleCount", "2"),
        ]);
        assert!(errors_for("activity", &described).is_empty());
    }

    #[test]
    fn test_people_counts_required_for_their_activity() {
        let windfarm = form(&[("activity", "WINDFARM"), ("windfarmLocation", "Scotland")]);
        assert_eq!(errors_for("activity", &windfarm), vec!["windfarmPeopleCount"]);

        let remote = form(&[
            ("activity", "WORKING_REMOTELY"),
            ("workingRemotelyLocation", "Dartmoor"),
            ("workingRemotelyPeopleCount", "a few"),
        ]);
        assert_eq!(errors_for("activity", &remote), vec!["workingRemotelyPeopleCount"]);

        let driving = form(&[("activity", "DRIVING"), ("windfarmPeopleCount", "")]);
        assert!(errors_for("activity", &driving).is_empty());
    }

    #[test]
    fn test_communication_values_gated_on_checkbox() {
        let unticked = form(&[("fixedVhfRadioInput", "")]);
        assert!(errors_for("vessel-communications", &unticked).is_empty());

        let ticked = form(&[("fixedVhfRadio", "FIXED_VHF_RADIO"), ("fixedVhfRadioInput", "123")]);
        assert_eq!(
            errors_for("vessel-communications", &ticked),
            vec!["fixedVhfRadioInput"]
        );
    }

    #[test]
    fn test_only_first_emergency_contact_is_required() {
        let errors = errors_for("emergency-contact", &FormSubmission::new());
        assert_eq!(
            errors,
            vec!["emergencyContact1FullName", "emergencyContact1TelephoneNumber"]
        );
    }

    #[test]
    fn test_beacon_use_branches_on_environment() {
        let mut registration = Registration::new();
        registration.update(&form(&[("useIndex", "0"), ("environment", "MARITIME")]));
        assert_eq!(
            (page("beacon-use").next)(&mut registration, 0).page,
            "purpose"
        );

        registration.update(&form(&[("useIndex", "0"), ("environment", "LAND")]));
        assert_eq!(
            (page("beacon-use").next)(&mut registration, 0).page,
            "activity"
        );
    }

    #[test]
    fn test_activity_branches_on_environment() {
        let mut registration = Registration::new();
        assert_eq!(
            (page("activity").next)(&mut registration, 0).page,
            "beacon-use"
        );

        for (environment, expected) in [
            ("MARITIME", "about-the-vessel"),
            ("AVIATION", "about-the-aircraft"),
            ("LAND", "land-communications"),
            ("OTHER", "land-communications"),
        ] {
            registration.update(&form(&[("useIndex", "0"), ("environment", environment)]));
            assert_eq!((page("activity").next)(&mut registration, 0).page, expected);
        }
    }

    #[test]
    fn test_additional_beacon_use_creates_use() {
        let mut registration = Registration::new();
        registration.update(&form(&[("additionalBeaconUse", "true")]));

        let destination = (page("additional-beacon-use").next)(&mut registration, 0);
        assert_eq!(destination, Destination::new("beacon-use", 1));
        assert_eq!(registration.uses().len(), 2);

        registration.update(&form(&[("additionalBeaconUse", "false")]));
        let destination = (page("additional-beacon-use").next)(&mut registration, 1);
        assert_eq!(destination, Destination::new("about-beacon-owner", 1));
        assert_eq!(registration.uses().len(), 2);
    }

    #[test]
    fn test_additional_beacon_use_resubmitted_reuses_next_use() {
        let mut registration = Registration::new();
        registration.update(&form(&[("additionalBeaconUse", "true")]));
        let next = page("additional-beacon-use").next;

        assert_eq!(next(&mut registration, 0), Destination::new("beacon-use", 1));
        assert_eq!(next(&mut registration, 0), Destination::new("beacon-use", 1));
        assert_eq!(registration.uses().len(), 2);

        assert_eq!(next(&mut registration, 1), Destination::new("beacon-use", 2));
        assert_eq!(registration.uses().len(), 3);
    }
}
