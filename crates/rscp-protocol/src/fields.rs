//! # Field Classification
//!
//! Static allowlist and denylist of field names. Matching is exact and
//! case-insensitive: `Email`, `EMAIL` and `email` are the same field, but
//! `emailVerified` is not `email`.
//!
//! Both lists are compiled in. Adding a forbidden name is a protocol
//! change, not a configuration change.

use rscp_core::PUBLIC_ATTRIBUTE_FIELDS;

/// Containers scanned one level deep for forbidden fields.
pub const NESTED_CONTAINERS: [&str; 2] = ["publicAttributes", "attributes"];

/// Field names that must never reach a registry, lowercased.
pub const FORBIDDEN_FIELDS: &[&str] = &[
    // Contact and identity
    "email",
    "emailaddress",
    "phone",
    "phonenumber",
    "mobile",
    "mobilenumber",
    "telephone",
    "address",
    "streetaddress",
    "homeaddress",
    "postalcode",
    "zipcode",
    "dateofbirth",
    "dob",
    "birthdate",
    "placeofbirth",
    "age",
    "gender",
    "sex",
    "nationality",
    "photo",
    "photograph",
    // Government identifiers
    "ssn",
    "socialsecuritynumber",
    "nationalid",
    "nationalidnumber",
    "aadhaar",
    "aadhaarnumber",
    "pan",
    "pannumber",
    "passport",
    "passportnumber",
    "driverslicense",
    "driverslicensenumber",
    "licensenumber",
    "taxid",
    // Assessment data
    "score",
    "scores",
    "testscore",
    "theoryscore",
    "practicalscore",
    "assessmentscore",
    "assessmentresults",
    "examresults",
    "marks",
    "grade",
    "answers",
    "attempts",
    // Financial
    "bankaccount",
    "accountnumber",
    "iban",
    "creditcard",
    "cardnumber",
    "paymentinfo",
    "salary",
    "income",
    // Internal identifiers
    "internalid",
    "userid",
    "employeeid",
    "studentid",
    "databaseid",
    // Location
    "location",
    "gpscoordinates",
    "latitude",
    "longitude",
    "ipaddress",
    // Biometric and health
    "biometric",
    "biometrics",
    "fingerprint",
    "faceimage",
    "medicalinfo",
    "bloodtype",
    "disability",
];

/// Outcome of classifying one field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    /// One of the five public attributes.
    Allowed,
    /// On the denylist.
    Forbidden,
    /// Neither. Dropped by the gate, never an error by itself.
    Unknown,
}

/// Classify a field name.
pub fn classify_field(name: &str) -> FieldClass {
    if is_forbidden_field(name) {
        FieldClass::Forbidden
    } else if is_allowed_field(name) {
        FieldClass::Allowed
    } else {
        FieldClass::Unknown
    }
}

/// Whether `name` is on the denylist.
pub fn is_forbidden_field(name: &str) -> bool {
    let lower = name.to_lowercase();
    FORBIDDEN_FIELDS.iter().any(|f| *f == lower)
}

/// Whether `name` is one of the five public attributes.
pub fn is_allowed_field(name: &str) -> bool {
    PUBLIC_ATTRIBUTE_FIELDS
        .iter()
        .any(|f| f.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denylist_is_lowercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for f in FORBIDDEN_FIELDS {
            assert_eq!(*f, f.to_lowercase(), "{f}");
            assert!(seen.insert(*f), "duplicate {f}");
        }
        assert!(FORBIDDEN_FIELDS.len() >= 50);
    }

    #[test]
    fn lists_are_disjoint() {
        for f in PUBLIC_ATTRIBUTE_FIELDS {
            assert!(!is_forbidden_field(f), "{f}");
        }
        for c in NESTED_CONTAINERS {
            assert!(!is_forbidden_field(c), "{c}");
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify_field("email"), FieldClass::Forbidden);
        assert_eq!(classify_field("Email"), FieldClass::Forbidden);
        assert_eq!(classify_field("DATEOFBIRTH"), FieldClass::Forbidden);
        assert_eq!(classify_field("givenName"), FieldClass::Allowed);
        assert_eq!(classify_field("GIVENNAME"), FieldClass::Allowed);
        assert_eq!(classify_field("nickname"), FieldClass::Unknown);
    }

    #[test]
    fn matching_is_exact_not_substring() {
        assert_eq!(classify_field("emailVerified"), FieldClass::Unknown);
        assert_eq!(classify_field("company"), FieldClass::Unknown);
        assert_eq!(classify_field("page"), FieldClass::Unknown);
        assert_eq!(classify_field(""), FieldClass::Unknown);
    }

    #[test]
    fn envelope_fields_are_not_forbidden() {
        for f in [
            "credentialId",
            "certificateNumber",
            "verificationCode",
            "issuerCode",
            "issuedAt",
            "signature",
            "signedAt",
            "payload",
        ] {
            assert!(!is_forbidden_field(f), "{f}");
        }
    }
}
