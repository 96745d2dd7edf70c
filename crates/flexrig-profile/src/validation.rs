//! Profile validation logic.
//!
//! Validation catches the profile mistakes that would otherwise abort a rig
//! build halfway (coincident landmarks give zero-length bones) and flags
//! suspicious but buildable input as warnings.

use std::collections::HashSet;
use std::sync::OnceLock;

use glam::Vec3;
use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::landmark::is_absent;
use crate::profile::{MemberKind, Profile};

/// Longest name the host accepts for a bone, in bytes.
pub const MAX_NAME_LEN: usize = 63;

/// Suffixes may not contain `.`, which separates the parts of a bone name.
const SUFFIX_PATTERN: &str = r"^[^.]*$";

static SUFFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn suffix_regex() -> &'static Regex {
    SUFFIX_REGEX.get_or_init(|| Regex::new(SUFFIX_PATTERN).expect("invalid regex pattern"))
}

/// Returns true if `name` is usable as a profile or armature name.
///
/// Armature names prefix every generated bone name.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && name.len() <= MAX_NAME_LEN
}

/// Returns true if `suffix` keeps generated bone names unambiguous.
pub fn is_valid_suffix(suffix: &str) -> bool {
    suffix_regex().is_match(suffix)
}

/// Validates a profile and returns a validation result.
///
/// # Example
/// ```
/// use flexrig_profile::{Profile, validate_profile};
/// use glam::Vec3;
///
/// let profile = Profile::builder("Biped")
///     .chest(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.5), Vec3::new(0.0, 0.0, 2.0))
///     .build();
///
/// assert!(validate_profile(&profile).is_ok());
/// ```
pub fn validate_profile(profile: &Profile) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_name(profile, &mut result);
    validate_chest(profile, &mut result);
    validate_heads(profile, &mut result);
    validate_arms(profile, &mut result);
    validate_legs(profile, &mut result);
    check_suffixes(profile, &mut result);

    result
}

fn validate_name(profile: &Profile, result: &mut ValidationResult) {
    if !is_valid_name(&profile.name) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidProfileName,
            format!(
                "profile name must be non-empty and at most {} bytes, got '{}'",
                MAX_NAME_LEN, profile.name
            ),
            "name",
        ));
    }
}

/// Checks that each landmark is finite and differs from the previous one.
///
/// `chain` lists the landmarks of one bone chain in head-to-tail order.
fn check_chain(prefix: &str, chain: &[(&str, Vec3)], result: &mut ValidationResult) {
    for (field, point) in chain {
        if !point.is_finite() {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteLandmark,
                format!("{} is not a finite point: {:?}", field, point),
                format!("{}{}", prefix, field),
            ));
        }
    }

    for pair in chain.windows(2) {
        let (from_field, from) = pair[0];
        let (to_field, to) = pair[1];
        if from == to {
            result.add_error(ValidationError::with_path(
                ErrorCode::DegenerateSegment,
                format!(
                    "{} coincides with {}, the bone between them would have zero length",
                    to_field, from_field
                ),
                format!("{}{}", prefix, to_field),
            ));
        }
    }
}

fn warn_at_origin(prefix: &str, fields: &[(&str, Vec3)], result: &mut ValidationResult) {
    for (field, point) in fields {
        if is_absent(*point) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::LandmarkAtOrigin,
                format!("{} is at the origin, it was probably never set", field),
                format!("{}{}", prefix, field),
            ));
        }
    }
}

fn validate_chest(profile: &Profile, result: &mut ValidationResult) {
    let chest = &profile.chest;
    let chain = [("rib", chest.rib), ("chest", chest.chest), ("tchest", chest.tchest)];
    check_chain("", &chain, result);
}

fn validate_heads(profile: &Profile, result: &mut ValidationResult) {
    for (i, head) in profile.heads.iter().enumerate() {
        let prefix = format!("heads[{}].", i);
        let chain = [
            ("tchest", profile.chest.tchest),
            ("neck", head.neck),
            ("head", head.head),
        ];
        check_chain(&prefix, &chain, result);
        warn_at_origin(&prefix, &chain[1..], result);
    }
}

fn validate_arms(profile: &Profile, result: &mut ValidationResult) {
    for (i, arm) in profile.arms.iter().enumerate() {
        let prefix = format!("arms[{}].", i);

        let mut chain = Vec::with_capacity(4);
        if arm.shoulder {
            chain.push(("chest", profile.chest.chest));
        }
        chain.extend([("upper", arm.upper), ("lower", arm.lower), ("wrist", arm.wrist)]);
        check_chain(&prefix, &chain, result);
        warn_at_origin(&prefix, &[("upper", arm.upper), ("lower", arm.lower), ("wrist", arm.wrist)], result);

        if let Some(hand) = arm.hand_point() {
            check_chain(&prefix, &[("wrist", arm.wrist), ("hand", hand)], result);
        } else if !is_absent(arm.thumb) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::ThumbWithoutHand,
                "thumb is set but hand is absent, the thumb will not be built",
                format!("{}thumb", prefix),
            ));
        }
        if let Some(thumb) = arm.thumb_point() {
            check_chain(&prefix, &[("wrist", arm.wrist), ("thumb", thumb)], result);
        }
    }
}

fn validate_legs(profile: &Profile, result: &mut ValidationResult) {
    for (i, leg) in profile.legs.iter().enumerate() {
        let prefix = format!("legs[{}].", i);

        if leg.hip {
            check_chain(&prefix, &[("rib", profile.chest.rib), ("upper", leg.upper)], result);
        }
        let chain = [
            ("upper", leg.upper),
            ("lower", leg.lower),
            ("knee", leg.knee),
            ("foot", leg.foot),
        ];
        check_chain(&prefix, &chain, result);
        warn_at_origin(&prefix, &chain[..3], result);
    }
}

fn check_suffixes(profile: &Profile, result: &mut ValidationResult) {
    let regions: [(MemberKind, Vec<&str>); 3] = [
        (MemberKind::Heads, profile.heads.iter().map(|h| h.suffix.as_str()).collect()),
        (MemberKind::Arms, profile.arms.iter().map(|a| a.suffix.as_str()).collect()),
        (MemberKind::Legs, profile.legs.iter().map(|l| l.suffix.as_str()).collect()),
    ];

    for (kind, suffixes) in regions {
        let mut seen = HashSet::new();
        for (i, suffix) in suffixes.into_iter().enumerate() {
            let path = format!("{}[{}].suffix", kind.as_str(), i);
            if !is_valid_suffix(suffix) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidSuffix,
                    format!("suffix '{}' must not contain '.'", suffix),
                    path,
                ));
            } else if !seen.insert(suffix) {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::DuplicateSuffix,
                    format!(
                        "suffix '{}' is used by another {}, bone names stay unique through the index",
                        suffix, kind
                    ),
                    path,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ArmDescriptor, HeadDescriptor, LegDescriptor};

    fn base() -> crate::profile::ProfileBuilder {
        Profile::builder("Biped").chest(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.5),
            Vec3::new(0.0, 0.0, 2.0),
        )
    }

    fn arm(suffix: &str) -> ArmDescriptor {
        ArmDescriptor::new(
            suffix,
            Vec3::new(0.2, 0.0, 1.8),
            Vec3::new(0.6, 0.0, 1.6),
            Vec3::new(1.0, 0.0, 1.6),
        )
    }

    #[test]
    fn test_valid_profile() {
        let profile = base()
            .head(HeadDescriptor::new("", Vec3::new(0.0, 0.0, 2.2), Vec3::new(0.0, 0.0, 2.6)))
            .arm(arm("L"))
            .leg(LegDescriptor::new(
                "L",
                Vec3::new(0.15, 0.0, 1.0),
                Vec3::new(0.15, 0.0, 0.5),
                Vec3::new(0.15, 0.0, 0.1),
                Vec3::new(0.15, 0.3, 0.0),
            ))
            .build();

        let result = validate_profile(&profile);
        assert!(result.is_ok(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
    }

    #[test]
    fn test_empty_name() {
        let profile = Profile::builder(" ")
            .chest(Vec3::Z, Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, 3.0))
            .build();
        let result = validate_profile(&profile);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::InvalidProfileName));
    }

    #[test]
    fn test_coincident_landmarks() {
        let mut bad = arm("L");
        bad.lower = bad.upper;
        let profile = base().arm(bad).build();

        let result = validate_profile(&profile);
        assert!(!result.is_ok());
        let error = result
            .errors
            .iter()
            .find(|e| e.code == ErrorCode::DegenerateSegment)
            .expect("degenerate segment error");
        assert_eq!(error.path.as_deref(), Some("arms[0].lower"));
    }

    #[test]
    fn test_shoulder_on_chest_point() {
        let mut bad = arm("L");
        bad.upper = Vec3::new(0.0, 0.0, 1.5);
        let profile = base().arm(bad.clone()).build();
        assert!(!validate_profile(&profile).is_ok());

        // Without a shoulder the upper arm is free to start anywhere.
        let profile = base().arm(bad.with_shoulder(false)).build();
        assert!(validate_profile(&profile).is_ok());
    }

    #[test]
    fn test_dotted_suffix() {
        let profile = base().arm(arm("L.1")).build();
        let result = validate_profile(&profile);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::InvalidSuffix);
        assert_eq!(result.errors[0].path.as_deref(), Some("arms[0].suffix"));
    }

    #[test]
    fn test_duplicate_suffix_warns() {
        let profile = base().arm(arm("L")).arm(arm("L")).build();
        let result = validate_profile(&profile);
        assert!(result.is_ok());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::DuplicateSuffix
                && w.path.as_deref() == Some("arms[1].suffix")));
    }

    #[test]
    fn test_thumb_without_hand_warns() {
        let profile = base()
            .arm(arm("L").with_thumb(Vec3::new(1.1, 0.1, 1.6)))
            .build();
        let result = validate_profile(&profile);
        assert!(result.is_ok());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::ThumbWithoutHand));
    }

    #[test]
    fn test_non_finite_landmark() {
        let mut bad = arm("L");
        bad.wrist = Vec3::new(f32::NAN, 0.0, 1.6);
        let profile = base().arm(bad).build();
        let result = validate_profile(&profile);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::NonFiniteLandmark
                && e.path.as_deref() == Some("arms[0].wrist")));
    }

    #[test]
    fn test_name_helpers() {
        assert!(is_valid_name("Flexrig.Armature"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name(&"a".repeat(64)));
        assert!(is_valid_suffix(""));
        assert!(is_valid_suffix("L"));
        assert!(!is_valid_suffix("L.R"));
    }
}
