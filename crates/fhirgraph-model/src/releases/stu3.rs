//! Resource kinds for FHIR STU3 (3.0.1).
//!
//! STU3 carries `EpisodeOfCare` references through `context` fields and an
//! `AdverseEvent` shape noticeably different from R4's.

use crate::kind::{ReferenceField, ResourceKind, SearchParam, SearchParamType};

pub static KINDS: &[ResourceKind] = &[
    ResourceKind {
        name: "Patient",
        description: "Demographics and administrative information about an individual receiving care.",
        reference_fields: &[
            ReferenceField {
                name: "generalPractitioner",
                many: true,
                targets: &["Organization", "Practitioner"],
                description: "Patient's nominated primary care provider.",
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
            SearchParam { code: "active", kind: SearchParamType::Token, path: "active" },
            SearchParam { code: "identifier", kind: SearchParamType::Token, path: "identifier" },
        ],
    },
    ResourceKind {
        name: "PractitionerRole",
        description: "Roles and services a practitioner may perform at an organization for a period of time.",
        reference_fields: &[
            ReferenceField {
                name: "practitioner",
                many: false,
                targets: &["Practitioner"],
                description: "Practitioner providing services for the organization.",
            },
            ReferenceField {
                name: "organization",
                many: false,
                targets: &["Organization"],
                description: "Organization where the role is available.",
            },
            ReferenceField {
                name: "location",
                many: true,
                targets: &["Location"],
                description: "Locations where the practitioner provides care.",
            },
            ReferenceField {
                name: "healthcareService",
                many: true,
                targets: &["HealthcareService"],
                description: "Services provided in this role.",
            },
        ],
        search_params: &[
            SearchParam { code: "active", kind: SearchParamType::Token, path: "active" },
            SearchParam { code: "specialty", kind: SearchParamType::Token, path: "specialty" },
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
            SearchParam { code: "address", kind: SearchParamType::String, path: "address" },
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
                many: true,
                targets: &["Location"],
                description: "Locations where the service may be provided.",
            },
        ],
        search_params: &[
            SearchParam { code: "name", kind: SearchParamType::String, path: "name" },
            SearchParam { code: "active", kind: SearchParamType::Token, path: "active" },
        ],
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
                name: "context",
                many: false,
                targets: &["Encounter", "EpisodeOfCare"],
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
                name: "subject",
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
            SearchParam { code: "class", kind: SearchParamType::Token, path: "class" },
            SearchParam { code: "subject", kind: SearchParamType::Reference, path: "subject" },
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
                name: "subject",
                many: false,
                targets: &["Patient"],
                description: "Who has the condition.",
            },
            ReferenceField {
                name: "context",
                many: false,
                targets: &["Encounter", "EpisodeOfCare"],
                description: "Encounter or episode during which the condition was asserted.",
            },
            ReferenceField {
                name: "asserter",
                many: false,
                targets: &["Practitioner", "Patient", "RelatedPerson"],
                description: "Person who asserts this condition.",
            },
        ],
        search_params: &[
            SearchParam { code: "code", kind: SearchParamType::Token, path: "code" },
            SearchParam { code: "clinical-status", kind: SearchParamType::Token, path: "clinicalStatus" },
            SearchParam { code: "subject", kind: SearchParamType::Reference, path: "subject" },
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
                name: "encounter",
                many: false,
                targets: &["Encounter"],
                description: "Encounter the immunization was part of.",
            },
            ReferenceField {
                name: "location",
                many: false,
                targets: &["Location"],
                description: "Where the immunization occurred.",
            },
            ReferenceField {
                name: "manufacturer",
                many: false,
                targets: &["Organization"],
                description: "Vaccine manufacturer.",
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
        name: "AdverseEvent",
        description: "Unintended physical injury resulting from or contributed to by medical care.",
        reference_fields: &[
            ReferenceField {
                name: "subject",
                many: false,
                targets: &["Patient", "Medication", "Device"],
                description: "Subject or group impacted by the event.",
            },
            ReferenceField {
                name: "reaction",
                many: true,
                targets: &["Condition"],
                description: "Reaction that occurred as a result of exposure to a substance.",
            },
            ReferenceField {
                name: "location",
                many: false,
                targets: &["Location"],
                description: "Where the adverse event occurred.",
            },
            ReferenceField {
                name: "recorder",
                many: false,
                targets: &["Patient", "Practitioner", "RelatedPerson"],
                description: "Who recorded the adverse event.",
            },
            ReferenceField {
                name: "eventParticipant",
                many: false,
                targets: &["Practitioner", "Device"],
                description: "Who was involved in the adverse event or its potential cause.",
            },
            ReferenceField {
                name: "subjectMedicalHistory",
                many: true,
                targets: &["Condition", "Observation", "Immunization"],
                description: "Relevant past medical history for the subject.",
            },
        ],
        search_params: &[
            SearchParam { code: "date", kind: SearchParamType::Date, path: "date" },
            SearchParam { code: "type", kind: SearchParamType::Token, path: "type" },
            SearchParam { code: "subject", kind: SearchParamType::Reference, path: "subject" },
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
        search_params: &[
            SearchParam { code: "code", kind: SearchParamType::Token, path: "code" },
            SearchParam { code: "status", kind: SearchParamType::Token, path: "status" },
        ],
    },
    ResourceKind {
        name: "MedicationRequest",
        description: "An order or request for supply and administration of a medication.",
        reference_fields: &[
            ReferenceField {
                name: "subject",
                many: false,
                targets: &["Patient"],
                description: "Who the medication is for.",
            },
            ReferenceField {
                name: "context",
                many: false,
                targets: &["Encounter", "EpisodeOfCare"],
                description: "Encounter or episode during which the request was created.",
            },
            ReferenceField {
                name: "recorder",
                many: false,
                targets: &["Practitioner"],
                description: "Person who entered the request on behalf of another.",
            },
        ],
        search_params: &[
            SearchParam { code: "status", kind: SearchParamType::Token, path: "status" },
            SearchParam { code: "intent", kind: SearchParamType::Token, path: "intent" },
            SearchParam { code: "subject", kind: SearchParamType::Reference, path: "subject" },
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
