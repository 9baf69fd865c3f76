//! Resource kinds for FHIR DSTU2 (1.0.2).
//!
//! DSTU2 predates `PractitionerRole` and `AdverseEvent`, names the
//! encounter subject `patient`, and orders medications through
//! `MedicationOrder` rather than `MedicationRequest`.

use crate::kind::{ReferenceField, ResourceKind, SearchParam, SearchParamType};

pub static KINDS: &[ResourceKind] = &[
    ResourceKind {
        name: "Patient",
        description: "Demographics and administrative information about an individual receiving care.",
        reference_fields: &[
            ReferenceField {
                name: "careProvider",
                many: true,
                targets: &["Organization", "Practitioner"],
                description: "Patient's nominated care provider.",
            },
            ReferenceField {
                name: "managingOrganization",
                many: false,
                targets: &["Organization"],
                description: "Organization that is the custodian of the patient record.",
            },
        ],
        search_params: &[
            SearchParam { code: "name", kind: SearchParamType::String, path: "name" },
            SearchParam { code: "family", kind: SearchParamType::String, path: "name" },
            SearchParam { code: "given", kind: SearchParamType::String, path: "name" },
            SearchParam { code: "birthdate", kind: SearchParamType::Date, path: "birthDate" },
            SearchParam { code: "gender", kind: SearchParamType::Token, path: "gender" },
            SearchParam { code: "identifier", kind: SearchParamType::Token, path: "identifier" },
        ],
    },
    ResourceKind {
        name: "Organization",
        description: "A grouping of people or organizations with a common purpose.",
        reference_fields: &[ReferenceField {
            name: "partOf",
            many: false,
            targets: &["Organization"],
            description: "The organization of which this organization forms a part.",
        }],
        search_params: &[
            SearchParam { code: "name", kind: SearchParamType::String, path: "name" },
            SearchParam { code: "active", kind: SearchParamType::Token, path: "active" },
            SearchParam { code: "identifier", kind: SearchParamType::Token, path: "identifier" },
        ],
    },
    ResourceKind {
        name: "Practitioner",
        description: "A person directly or indirectly involved in the provisioning of healthcare.",
        reference_fields: &[],
        search_params: &[
            SearchParam { code: "name", kind: SearchParamType::String, path: "name" },
            SearchParam { code: "identifier", kind: SearchParamType::Token, path: "identifier" },
        ],
    },
    ResourceKind {
        name: "Device",
        description: "An instance of a manufactured item used in the provision of healthcare.",
        reference_fields: &[
            ReferenceField {
                name: "patient",
                many: false,
                targets: &["Patient"],
                description: "Patient to whom the device is affixed.",
            },
            ReferenceField {
                name: "owner",
                many: false,
                targets: &["Organization"],
                description: "Organization responsible for the device.",
            },
            ReferenceField {
                name: "location",
                many: false,
                targets: &["Location"],
                description: "Where the device is found.",
            },
        ],
        search_params: &[
            SearchParam { code: "status", kind: SearchParamType::Token, path: "status" },
            SearchParam { code: "identifier", kind: SearchParamType::Token, path: "identifier" },
        ],
    },
    ResourceKind {
        name: "Location",
        description: "Details of a physical place where services are provided and resources may be found.",
        reference_fields: &[
            ReferenceField {
                name: "managingOrganization",
                many: false,
                targets: &["Organization"],
                description: "Organization responsible for provisioning and upkeep.",
            },
            ReferenceField {
                name: "partOf",
                many: false,
                targets: &["Location"],
                description: "Another location this one is physically a part of.",
            },
        ],
        search_params: &[
            SearchParam { code: "name", kind: SearchParamType::String, path: "name" },
            SearchParam { code: "status", kind: SearchParamType::Token, path: "status" },
        ],
    },
    ResourceKind {
        name: "HealthcareService",
        description: "A service provided by an organization at a location.",
        reference_fields: &[
            ReferenceField {
                name: "providedBy",
                many: false,
                targets: &["Organization"],
                description: "Organization that provides this service.",
            },
            ReferenceField {
                name: "location",
                many: false,
                targets: &["Location"],
                description: "Location where the service is provided.",
            },
        ],
        search_params: &[SearchParam {
            code: "name",
            kind: SearchParamType::String,
            path: "serviceName",
        }],
    },
    ResourceKind {
        name: "Account",
        description: "A financial tool for tracking value accrued for a particular purpose, such as patient charges.",
        reference_fields: &[
            ReferenceField {
                name: "subject",
                many: false,
                targets: &[
                    "Patient",
                    "Device",
                    "Practitioner",
                    "Location",
                    "HealthcareService",
                    "Organization",
                ],
                description: "The entity that incurs the expenses tracked by the account.",
            },
            ReferenceField {
                name: "owner",
                many: false,
                targets: &["Organization"],
                description: "Entity managing the account.",
            },
        ],
        search_params: &[
            SearchParam { code: "name", kind: SearchParamType::String, path: "name" },
            SearchParam { code: "status", kind: SearchParamType::Token, path: "status" },
            SearchParam { code: "identifier", kind: SearchParamType::Token, path: "identifier" },
        ],
    },
    ResourceKind {
        name: "Observation",
        description: "Measurements and simple assertions made about a patient, device or other subject.",
        reference_fields: &[
            ReferenceField {
                name: "subject",
                many: false,
                targets: &["Patient", "Device", "Location"],
                description: "Who or what the observation is about.",
            },
            ReferenceField {
                name: "encounter",
                many: false,
                targets: &["Encounter"],
                description: "Healthcare event during which the observation was made.",
            },
            ReferenceField {
                name: "performer",
                many: true,
                targets: &["Practitioner", "Organization", "Patient", "RelatedPerson"],
                description: "Who is responsible for the observation.",
            },
            ReferenceField {
                name: "device",
                many: false,
                targets: &["Device"],
                description: "Measurement device.",
            },
        ],
        search_params: &[
            SearchParam { code: "code", kind: SearchParamType::Token, path: "code" },
            SearchParam { code: "status", kind: SearchParamType::Token, path: "status" },
            SearchParam { code: "date", kind: SearchParamType::Date, path: "effectiveDateTime" },
            SearchParam { code: "subject", kind: SearchParamType::Reference, path: "subject" },
        ],
    },
    ResourceKind {
        name: "Encounter",
        description: "An interaction between a patient and healthcare provider(s).",
        reference_fields: &[
            ReferenceField {
                name: "patient",
                many: false,
                targets: &["Patient"],
                description: "The patient present at the encounter.",
            },
            ReferenceField {
                name: "episodeOfCare",
                many: true,
                targets: &["EpisodeOfCare"],
                description: "Episode(s) of care this encounter should be recorded against.",
            },
            ReferenceField {
                name: "serviceProvider",
                many: false,
                targets: &["Organization"],
                description: "Organization responsible for the encounter.",
            },
            ReferenceField {
                name: "partOf",
                many: false,
                targets: &["Encounter"],
                description: "Another encounter this one is part of.",
            },
        ],
        search_params: &[
            SearchParam { code: "status", kind: SearchParamType::Token, path: "status" },
            SearchParam { code: "patient", kind: SearchParamType::Reference, path: "patient" },
        ],
    },
    ResourceKind {
        name: "EpisodeOfCare",
        description: "An association between a patient and an organization assuming care responsibility over time.",
        reference_fields: &[
            ReferenceField {
                name: "patient",
                many: false,
                targets: &["Patient"],
                description: "The patient under this episode of care.",
            },
            ReferenceField {
                name: "managingOrganization",
                many: false,
                targets: &["Organization"],
                description: "Organization assuming care responsibility.",
            },
            ReferenceField {
                name: "careManager",
                many: false,
                targets: &["Practitioner"],
                description: "Care manager for the episode.",
            },
        ],
        search_params: &[
            SearchParam { code: "status", kind: SearchParamType::Token, path: "status" },
            SearchParam { code: "patient", kind: SearchParamType::Reference, path: "patient" },
        ],
    },
    ResourceKind {
        name: "Condition",
        description: "A clinical condition, problem, diagnosis or other health matter of concern.",
        reference_fields: &[
            ReferenceField {
                name: "patient",
                many: false,
                targets: &["Patient"],
                description: "Who has the condition.",
            },
            ReferenceField {
                name: "encounter",
                many: false,
                targets: &["Encounter"],
                description: "Encounter during which the condition was asserted.",
            },
            ReferenceField {
                name: "asserter",
                many: false,
                targets: &["Practitioner", "Patient"],
                description: "Person who asserts this condition.",
            },
        ],
        search_params: &[
            SearchParam { code: "code", kind: SearchParamType::Token, path: "code" },
            SearchParam { code: "patient", kind: SearchParamType::Reference, path: "patient" },
        ],
    },
    ResourceKind {
        name: "Immunization",
        description: "Describes the event of a patient being administered a vaccine.",
        reference_fields: &[
            ReferenceField {
                name: "patient",
                many: false,
                targets: &["Patient"],
                description: "Who was immunized.",
            },
            ReferenceField {
                name: "performer",
                many: false,
                targets: &["Practitioner"],
                description: "Who administered the vaccine.",
            },
            ReferenceField {
                name: "requester",
                many: false,
                targets: &["Practitioner"],
                description: "Who ordered the vaccination.",
            },
            ReferenceField {
                name: "encounter",
                many: false,
                targets: &["Encounter"],
                description: "Encounter the immunization was part of.",
            },
            ReferenceField {
                name: "manufacturer",
                many: false,
                targets: &["Organization"],
                description: "Vaccine manufacturer.",
            },
            ReferenceField {
                name: "location",
                many: false,
                targets: &["Location"],
                description: "Where the immunization occurred.",
            },
        ],
        search_params: &[
            SearchParam { code: "status", kind: SearchParamType::Token, path: "status" },
            SearchParam { code: "date", kind: SearchParamType::Date, path: "date" },
            SearchParam { code: "patient", kind: SearchParamType::Reference, path: "patient" },
        ],
    },
    ResourceKind {
        name: "Provenance",
        description: "Who, what, when and how information about activities that created or influenced resources.",
        reference_fields: &[
            ReferenceField {
                name: "target",
                many: true,
                targets: &[],
                description: "The resource(s) the activity produced or influenced. May be any kind.",
            },
            ReferenceField {
                name: "location",
                many: false,
                targets: &["Location"],
                description: "Where the activity occurred.",
            },
        ],
        search_params: &[
            SearchParam { code: "recorded", kind: SearchParamType::Date, path: "recorded" },
            SearchParam { code: "target", kind: SearchParamType::Reference, path: "target" },
        ],
    },
    ResourceKind {
        name: "Medication",
        description: "Definition of a medication for the purposes of prescribing, dispensing and administering.",
        reference_fields: &[ReferenceField {
            name: "manufacturer",
            many: false,
            targets: &["Organization"],
            description: "Manufacturer of the item.",
        }],
        search_params: &[SearchParam {
            code: "code",
            kind: SearchParamType::Token,
            path: "code",
        }],
    },
    ResourceKind {
        name: "MedicationOrder",
        description: "An order for supply and administration of a medication to a patient.",
        reference_fields: &[
            ReferenceField {
                name: "patient",
                many: false,
                targets: &["Patient"],
                description: "Who the medication is for.",
            },
            ReferenceField {
                name: "prescriber",
                many: false,
                targets: &["Practitioner"],
                description: "Who ordered the medication.",
            },
            ReferenceField {
                name: "encounter",
                many: false,
                targets: &["Encounter"],
                description: "Encounter during which the order was created.",
            },
        ],
        search_params: &[
            SearchParam { code: "status", kind: SearchParamType::Token, path: "status" },
            SearchParam { code: "datewritten", kind: SearchParamType::Date, path: "dateWritten" },
            SearchParam { code: "patient", kind: SearchParamType::Reference, path: "patient" },
        ],
    },
    ResourceKind {
        name: "RelatedPerson",
        description: "A person with a relationship to a patient, involved in their care but not a provider.",
        reference_fields: &[ReferenceField {
            name: "patient",
            many: false,
            targets: &["Patient"],
            description: "The patient this person is related to.",
        }],
        search_params: &[
            SearchParam { code: "name", kind: SearchParamType::String, path: "name" },
            SearchParam { code: "patient", kind: SearchParamType::Reference, path: "patient" },
        ],
    },
];
