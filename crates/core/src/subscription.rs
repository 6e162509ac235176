//! Subscription validation rules and the delivery frequency enum.
//!
//! Every write path (HTTP handlers and the repository) funnels its input
//! through [`validate_subscription`], so the stored row always satisfies:
//! - the email is non-empty, syntactically valid, and has a lower-case domain
//! - the category set is non-empty, trimmed, and free of duplicates
//! - the frequency is one of [`VALID_FREQUENCIES`]

use std::fmt;
use std::str::FromStr;

use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Frequency constants
// ---------------------------------------------------------------------------

/// One digest per day.
pub const FREQUENCY_DAILY: &str = "daily";
/// One digest per week.
pub const FREQUENCY_WEEKLY: &str = "weekly";
/// One digest every two weeks.
pub const FREQUENCY_BIWEEKLY: &str = "biweekly";

/// All valid delivery frequencies, in display order.
pub const VALID_FREQUENCIES: &[&str] = &[FREQUENCY_DAILY, FREQUENCY_WEEKLY, FREQUENCY_BIWEEKLY];

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum number of categories on a single subscription.
pub const MAX_CATEGORIES: usize = 32;

/// Maximum length of a single category tag, in characters.
pub const MAX_CATEGORY_LEN: usize = 64;

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_EMAIL_INVALID: &str = "Enter a valid email address";
pub const MSG_NO_CATEGORIES: &str = "Select at least one topic";

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

/// How often a subscriber receives a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Biweekly,
}

impl Frequency {
    /// Return the database / wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => FREQUENCY_DAILY,
            Self::Weekly => FREQUENCY_WEEKLY,
            Self::Biweekly => FREQUENCY_BIWEEKLY,
        }
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    /// Parse the lower-case wire form. Anything else (including `"Daily"`
    /// or `"monthly"`) is a validation error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            FREQUENCY_DAILY => Ok(Self::Daily),
            FREQUENCY_WEEKLY => Ok(Self::Weekly),
            FREQUENCY_BIWEEKLY => Ok(Self::Biweekly),
            other => Err(CoreError::Validation(format!(
                "Unknown frequency: '{other}'. Valid frequencies: {}",
                VALID_FREQUENCIES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validated input
// ---------------------------------------------------------------------------

/// A subscription request that has passed every domain rule.
///
/// Only [`validate_subscription`] constructs this, so holding one is proof
/// that the email, categories, and frequency are all acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    email: String,
    categories: Vec<String>,
    frequency: Frequency,
}

impl NewSubscription {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }
}

/// Validate and normalize a raw subscription request.
///
/// Checks run in the order the form presents the fields (email, categories,
/// frequency) so the first failing field determines the message. A missing
/// frequency falls back to [`Frequency::Daily`].
pub fn validate_subscription(
    email: &str,
    categories: &[String],
    frequency: Option<&str>,
) -> Result<NewSubscription, CoreError> {
    let email = normalize_email(email)?;
    let categories = normalize_categories(categories)?;
    let frequency = match frequency {
        Some(raw) => raw.parse()?,
        None => Frequency::default(),
    };

    Ok(NewSubscription {
        email,
        categories,
        frequency,
    })
}

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

/// Trim an email address, lower-case its domain, and check its syntax.
///
/// The local part keeps its case: some mail hosts treat it as significant.
pub fn normalize_email(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(MSG_EMAIL_REQUIRED.to_string()));
    }
    if trimmed.len() > MAX_EMAIL_LEN {
        return Err(CoreError::Validation(MSG_EMAIL_INVALID.to_string()));
    }

    let (local, domain) = trimmed
        .rsplit_once('@')
        .ok_or_else(|| CoreError::Validation(MSG_EMAIL_INVALID.to_string()))?;

    let normalized = format!("{local}@{}", domain.to_lowercase());
    if !normalized.validate_email() {
        return Err(CoreError::Validation(MSG_EMAIL_INVALID.to_string()));
    }

    Ok(normalized)
}

/// Trim category tags and drop duplicates, keeping first-seen order.
pub fn normalize_categories(raw: &[String]) -> Result<Vec<String>, CoreError> {
    let mut categories: Vec<String> = Vec::with_capacity(raw.len());

    for tag in raw {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(CoreError::Validation(
                "Category names must not be empty".to_string(),
            ));
        }
        if tag.chars().count() > MAX_CATEGORY_LEN {
            return Err(CoreError::Validation(format!(
                "Category '{tag}' exceeds maximum length of {MAX_CATEGORY_LEN} characters"
            )));
        }
        if !categories.iter().any(|c| c == tag) {
            categories.push(tag.to_string());
        }
    }

    if categories.is_empty() {
        return Err(CoreError::Validation(MSG_NO_CATEGORIES.to_string()));
    }
    if categories.len() > MAX_CATEGORIES {
        return Err(CoreError::Validation(format!(
            "At most {MAX_CATEGORIES} categories are allowed"
        )));
    }

    Ok(categories)
}
