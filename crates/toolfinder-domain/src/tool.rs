//! Tool record module - the unit of the Toolfinder directory

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Description given to records that arrive without one
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Placeholder link for records without a website
pub const DEFAULT_URL: &str = "#";

/// Placeholder logo image reference
pub const DEFAULT_LOGO_URL: &str = "/placeholder.svg";

/// Category for records that do not name one
pub const DEFAULT_CATEGORY: &str = "general";

/// Pricing label when nothing is known about cost
pub const DEFAULT_PRICING: &str = "Unknown";

/// Company attributed to records without a known maker
pub const DEFAULT_COMPANY: &str = "AI Recommended";

/// Prefix for ids generated when the source text supplies none
pub const FALLBACK_ID_PREFIX: &str = "ai-tool-";

/// Build the fallback id for the `n`th generated record (1-based)
///
/// # Examples
///
/// ```
/// use toolfinder_domain::tool::fallback_id;
///
/// assert_eq!(fallback_id(3), "ai-tool-3");
/// ```
pub fn fallback_id(n: usize) -> String {
    format!("{}{}", FALLBACK_ID_PREFIX, n)
}

/// One entry describing an AI tool
///
/// Only `id` and `name` are always present. Every other field is optional so
/// that a well-formed structured payload keeps exactly the fields it carried;
/// the heuristic extraction path fills the defaults in explicitly.
///
/// An empty `id` means "not supplied by the source" and is replaced during
/// extraction. A record with an empty `name` is never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    /// Identifier, unique within one extraction batch
    #[serde(default, deserialize_with = "id_from_any")]
    pub id: String,

    /// Display name of the tool
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,

    /// Short summary of what the tool does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Official website or landing page
    #[serde(default, alias = "website", alias = "link", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Logo image reference
    #[serde(default, alias = "logo", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    /// Main category, lower-cased on the heuristic path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// More specific category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    /// Pricing label or plan list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,

    /// Company behind the tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Country or region of origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Free-form tags
    #[serde(default, deserialize_with = "list_without_nulls", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Key features
    #[serde(default, deserialize_with = "list_without_nulls", skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,

    /// Strengths
    #[serde(default, deserialize_with = "list_without_nulls", skip_serializing_if = "Option::is_none")]
    pub pros: Option<Vec<String>>,

    /// Weaknesses
    #[serde(default, deserialize_with = "list_without_nulls", skip_serializing_if = "Option::is_none")]
    pub cons: Option<Vec<String>>,

    /// Whether the tool is currently trending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending: Option<bool>,

    /// Whether the tool is featured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,

    /// ISO-8601 creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// ISO-8601 last-update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl ToolRecord {
    /// Create a record with only an id and a name
    ///
    /// # Examples
    ///
    /// ```
    /// use toolfinder_domain::ToolRecord;
    ///
    /// let tool = ToolRecord::new("x1", "Foo");
    /// assert_eq!(tool.name, "Foo");
    /// assert!(tool.description.is_none());
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            url: None,
            logo_url: None,
            category: None,
            subcategory: None,
            pricing: None,
            company: None,
            origin: None,
            tags: None,
            features: None,
            pros: None,
            cons: None,
            trending: None,
            featured: None,
            created: None,
            updated: None,
        }
    }

    /// True when the record carries a usable name
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// True when the source supplied an id
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// Pricing information for a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Pricing {
    /// Free-text label such as "Free" or "$20/month"
    Label(String),
    /// Structured plan list
    Plans(Vec<PricingPlan>),
}

impl Pricing {
    /// Pricing used when nothing is known
    pub fn unknown() -> Self {
        Pricing::Label(DEFAULT_PRICING.to_string())
    }
}

impl<'de> Deserialize<'de> for Pricing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Models answer with a label, a plan list, or now and then a lone plan
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Label(String),
            Plans(Vec<PricingPlan>),
            Plan(PricingPlan),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Label(label) => Pricing::Label(label),
            Repr::Plans(plans) => Pricing::Plans(plans),
            Repr::Plan(plan) => Pricing::Plans(vec![plan]),
        })
    }
}

impl fmt::Display for Pricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pricing::Label(label) => write!(f, "{}", label),
            Pricing::Plans(plans) => {
                let parts: Vec<String> = plans.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

/// One structured pricing plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    /// Free or premium; empty `Other` when the source left it out
    #[serde(rename = "type", default, deserialize_with = "plan_kind_or_null")]
    pub kind: PlanKind,

    /// Plan name
    #[serde(default, deserialize_with = "string_or_null")]
    pub plan: String,

    /// Cost as written by the source
    #[serde(default, deserialize_with = "string_or_null")]
    pub cost: String,
}

impl fmt::Display for PricingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.plan.is_empty(), self.cost.is_empty()) {
            (true, true) => write!(f, "{}", self.kind),
            (false, true) => write!(f, "{} ({})", self.plan, self.kind),
            (true, false) => write!(f, "{}: {}", self.kind, self.cost),
            (false, false) => write!(f, "{}: {}", self.plan, self.cost),
        }
    }
}

/// Kind of a pricing plan
///
/// Matched case-insensitively. Anything other than free or premium is kept
/// verbatim instead of failing the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlanKind {
    /// No cost
    Free,
    /// Paid tier
    Premium,
    /// Any other label
    Other(String),
}

impl From<String> for PlanKind {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "free" => PlanKind::Free,
            "premium" => PlanKind::Premium,
            _ => PlanKind::Other(value),
        }
    }
}

impl From<PlanKind> for String {
    fn from(kind: PlanKind) -> Self {
        match kind {
            PlanKind::Free => "free".to_string(),
            PlanKind::Premium => "premium".to_string(),
            PlanKind::Other(label) => label,
        }
    }
}

impl Default for PlanKind {
    fn default() -> Self {
        PlanKind::Other(String::new())
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanKind::Free => write!(f, "free"),
            PlanKind::Premium => write!(f, "premium"),
            PlanKind::Other(label) => write!(f, "{}", label),
        }
    }
}

fn string_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn plan_kind_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PlanKind, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .map(PlanKind::from)
        .unwrap_or_default())
}

/// Lists drop `null` elements, and a `null` list is absent
fn list_without_nulls<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(Option::<Vec<Option<String>>>::deserialize(deserializer)?
        .map(|items| items.into_iter().flatten().collect()))
}

fn id_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Text(id)) => id,
        Some(Repr::Unsigned(n)) => n.to_string(),
        Some(Repr::Signed(n)) => n.to_string(),
        None => String::new(),
    })
}
