//! Release model lookup API.

use std::collections::HashMap;

use crate::kind::ResourceKind;
use crate::release::FhirRelease;
use crate::releases;

/// Errors raised by model consistency checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Two kinds in the same release share a name.
    #[error("duplicate resource kind '{name}' in release {release}")]
    DuplicateKind {
        /// The duplicated kind name.
        name: String,
        /// The release the table belongs to.
        release: FhirRelease,
    },

    /// A reference field names a target kind the release does not declare.
    #[error("{kind}.{field} targets unknown kind '{target}' in release {release}")]
    UnknownTarget {
        /// The kind declaring the field.
        kind: String,
        /// The reference field name.
        field: String,
        /// The unknown target kind name.
        target: String,
        /// The release the table belongs to.
        release: FhirRelease,
    },
}

/// The resource-kind model for one FHIR release.
///
/// Wraps the static kind table with an index for by-name lookup. Cheap to
/// construct; typically built once at server start and shared via `Arc`.
#[derive(Debug, Clone)]
pub struct ReleaseModel {
    release: FhirRelease,
    kinds: &'static [ResourceKind],
    by_name: HashMap<&'static str, usize>,
}

impl ReleaseModel {
    /// Builds the model for a release.
    #[must_use]
    pub fn new(release: FhirRelease) -> Self {
        let kinds = releases::kinds_for(release);
        let by_name = kinds
            .iter()
            .enumerate()
            .map(|(i, k)| (k.name, i))
            .collect();
        Self {
            release,
            kinds,
            by_name,
        }
    }

    /// The release this model describes.
    #[must_use]
    pub fn release(&self) -> FhirRelease {
        self.release
    }

    /// All kinds in declaration order.
    #[must_use]
    pub fn kinds(&self) -> &'static [ResourceKind] {
        self.kinds
    }

    /// Looks up a kind by its exact name.
    #[must_use]
    pub fn kind(&self, name: &str) -> Option<&'static ResourceKind> {
        self.by_name.get(name).map(|&i| &self.kinds[i])
    }

    /// Returns true if the release declares the kind.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Kind names in declaration order.
    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.iter().map(|k| k.name)
    }

    /// Checks table consistency: kind names are unique and every declared
    /// reference target exists in this release.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.by_name.len() != self.kinds.len() {
            // Find the offender for the error message.
            let mut seen = HashMap::new();
            for kind in self.kinds {
                if seen.insert(kind.name, ()).is_some() {
                    return Err(ModelError::DuplicateKind {
                        name: kind.name.to_string(),
                        release: self.release,
                    });
                }
            }
        }

        for kind in self.kinds {
            for field in kind.reference_fields {
                for target in field.targets {
                    if !self.contains(target) {
                        return Err(ModelError::UnknownTarget {
                            kind: kind.name.to_string(),
                            field: field.name.to_string(),
                            target: (*target).to_string(),
                            release: self.release,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_releases_validate() {
        for release in FhirRelease::ALL {
            let model = ReleaseModel::new(release);
            model.validate().unwrap_or_else(|e| panic!("{e}"));
            assert!(!model.kinds().is_empty());
        }
    }

    #[test]
    fn test_kind_lookup() {
        let model = ReleaseModel::new(FhirRelease::R4);
        let account = model.kind("Account").expect("Account in R4");
        assert_eq!(account.name, "Account");

        let subject = account
            .reference_fields
            .iter()
            .find(|f| f.name == "subject")
            .expect("Account.subject");
        assert!(subject.many);
        assert_eq!(subject.targets.len(), 7);
        assert_eq!(subject.targets[0], "Patient");
        assert_eq!(subject.targets[6], "Organization");
    }

    #[test]
    fn test_release_divergence() {
        let r4 = ReleaseModel::new(FhirRelease::R4);
        let stu3 = ReleaseModel::new(FhirRelease::Stu3);
        let dstu2 = ReleaseModel::new(FhirRelease::Dstu2);

        // MedicationOrder was renamed MedicationRequest after DSTU2.
        assert!(dstu2.contains("MedicationOrder"));
        assert!(!dstu2.contains("MedicationRequest"));
        assert!(stu3.contains("MedicationRequest"));
        assert!(r4.contains("MedicationRequest"));

        // PractitionerRole and AdverseEvent arrived after DSTU2.
        assert!(!dstu2.contains("PractitionerRole"));
        assert!(stu3.contains("AdverseEvent"));

        // The encounter subject is `patient` in DSTU2, `subject` later.
        let d2_enc = dstu2.kind("Encounter").unwrap();
        assert!(d2_enc.reference_fields.iter().any(|f| f.name == "patient"));
        let r4_enc = r4.kind("Encounter").unwrap();
        assert!(r4_enc.reference_fields.iter().any(|f| f.name == "subject"));
    }

    #[test]
    fn test_provenance_target_is_any() {
        for release in FhirRelease::ALL {
            let model = ReleaseModel::new(release);
            let provenance = model.kind("Provenance").unwrap();
            let target = provenance
                .reference_fields
                .iter()
                .find(|f| f.name == "target")
                .unwrap();
            assert!(target.is_any());
            assert!(target.many);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let model = ReleaseModel::new(FhirRelease::R4);
        assert!(model.kind("NotAResource").is_none());
    }
}
