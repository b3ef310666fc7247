use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::profile::Profile;

/// A field-level validation failure, surfaced inline next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// One field's constraint set. The static [`FIELD_RULES`] table is the
/// single source of truth for both the inline error text and the
/// accept/reject decision at submit time.
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub pattern: Option<&'static Lazy<Regex>>,
    pub required_msg: &'static str,
    pub length_msg: &'static str,
    pub pattern_msg: &'static str,
}

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zА-яЁё -]+$").unwrap());
static JOB_TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-zА-яЁё ]+$").unwrap());
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[0-9]{10,14}$").unwrap());
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-zА-яЁё,. -]+$").unwrap());

pub static FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        required: true,
        min_len: Some(2),
        max_len: Some(50),
        pattern: Some(&NAME_PATTERN),
        required_msg: "Name is required",
        length_msg: "Name should be 2 to 50 characters",
        pattern_msg: "Name may contain letters, spaces and hyphens only",
    },
    FieldRule {
        field: "lastname",
        required: true,
        min_len: Some(2),
        max_len: Some(50),
        pattern: Some(&NAME_PATTERN),
        required_msg: "Lastname is required",
        length_msg: "Lastname should be 2 to 50 characters",
        pattern_msg: "Lastname may contain letters, spaces and hyphens only",
    },
    FieldRule {
        field: "jobTitle",
        required: false,
        min_len: None,
        max_len: Some(100),
        pattern: Some(&JOB_TITLE_PATTERN),
        required_msg: "",
        length_msg: "Job title should be at most 100 characters",
        pattern_msg: "Job title may contain letters, digits and spaces only",
    },
    FieldRule {
        field: "phone",
        required: true,
        min_len: None,
        max_len: None,
        pattern: Some(&PHONE_PATTERN),
        required_msg: "Phone is required",
        length_msg: "",
        pattern_msg: "Phone should be + followed by 10 to 14 digits",
    },
    FieldRule {
        field: "email",
        required: true,
        min_len: None,
        max_len: Some(320),
        pattern: Some(&EMAIL_PATTERN),
        required_msg: "Email is required",
        length_msg: "Email should be at most 320 characters",
        pattern_msg: "Email should look like name@example.com",
    },
    FieldRule {
        field: "address",
        required: false,
        min_len: None,
        max_len: Some(200),
        pattern: Some(&ADDRESS_PATTERN),
        required_msg: "",
        length_msg: "Address should be at most 200 characters",
        pattern_msg: "Address may contain letters, digits, spaces and ,.- only",
    },
];

pub fn rule_for(field: &str) -> Option<&'static FieldRule> {
    FIELD_RULES.iter().find(|rule| rule.field == field)
}

/// Check one field against its rule, returning the first failing
/// rule's message. Fields without a rule (`pitch`, unknown names)
/// always pass.
pub fn validate_field(field: &str, value: &str) -> Option<ValidationError> {
    let rule = rule_for(field)?;
    let fail = |message: &str| {
        Some(ValidationError {
            field: field.to_owned(),
            message: message.to_owned(),
        })
    };

    if value.is_empty() {
        return if rule.required {
            fail(rule.required_msg)
        } else {
            None
        };
    }

    let chars = value.chars().count();
    if rule.min_len.map_or(false, |min| chars < min)
        || rule.max_len.map_or(false, |max| chars > max)
    {
        return fail(rule.length_msg);
    }
    if let Some(pattern) = rule.pattern {
        if !pattern.is_match(value) {
            return fail(rule.pattern_msg);
        }
    }
    None
}

/// Run the whole rule table over a profile, collecting one error per
/// failing field. An empty result means submission may proceed.
pub fn validate_profile(profile: &Profile) -> Vec<ValidationError> {
    FIELD_RULES
        .iter()
        .filter_map(|rule| {
            let value = profile.field_value(rule.field).unwrap_or_default();
            validate_field(rule.field, value)
        })
        .collect()
}
