//! Static package and add-on catalogs.
//!
//! This module defines the purchasable offerings: service packages looked
//! up by plan id, and flat-priced add-ons attachable to chatbot and
//! enterprise packages. All prices are whole USD.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Plan id of the advanced AI package whose price depends on the voice
/// bot flag.
pub const ADVANCED_AI_PLAN_ID: &str = "advanced-ai-integration";

/// Advanced AI package price with the voice bot included.
pub const ADVANCED_AI_VOICE_BOT_USD: i64 = 999;

/// Advanced AI package price without the voice bot.
pub const ADVANCED_AI_BASE_USD: i64 = 899;

/// Legacy plan name that keeps its original 10% discount.
pub const LEGACY_DISCOUNT_PLAN_NAME: &str = "Full-Stack Basic";

/// Where a checkout session originated.
///
/// Chatbot and enterprise sessions ("AI sources") are always priced in
/// USD and never discounted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    /// A traditional web-development package page.
    #[default]
    Traditional,

    /// A chatbot consultation flow.
    Chatbot,

    /// An enterprise consultation flow.
    Enterprise,
}

impl PlanSource {
    /// Whether this source is always priced in USD, with zero discount.
    #[must_use]
    pub const fn is_usd_only(&self) -> bool {
        matches!(self, Self::Chatbot | Self::Enterprise)
    }

    /// Source name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Traditional => "page",
            Self::Chatbot => "chatbot",
            Self::Enterprise => "enterprise",
        }
    }

    /// Parse a `source` query parameter. Unknown values map to
    /// [`PlanSource::Traditional`].
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "chatbot" => Self::Chatbot,
            "enterprise" => Self::Enterprise,
            _ => Self::Traditional,
        }
    }
}

/// A purchasable service package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagePlan {
    /// Stable plan id used in URLs and lookups.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Base list price in whole USD.
    pub base_usd: i64,

    /// Price override when the voice bot is enabled, if the plan has one.
    pub voice_bot_usd: Option<i64>,

    /// Which flow sells this plan.
    pub source: PlanSource,
}

/// Category of an add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnCategory {
    /// Ongoing maintenance and support.
    Maintenance,

    /// Extra product features.
    Features,

    /// Third-party integrations.
    Integrations,

    /// AI capabilities.
    Ai,

    /// Reporting and analytics.
    Analytics,
}

impl AddOnCategory {
    /// Category name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::Features => "features",
            Self::Integrations => "integrations",
            Self::Ai => "ai",
            Self::Analytics => "analytics",
        }
    }
}

/// An optional flat-priced feature attachable to a package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOn {
    /// Stable add-on id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description shown on the invoice.
    pub description: String,

    /// Flat price in whole USD.
    pub price_usd: i64,

    /// Catalog category.
    pub category: AddOnCategory,
}

/// The static catalog of packages and add-ons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Packages by plan id.
    pub plans: HashMap<String, PackagePlan>,

    /// Add-ons by id.
    pub add_ons: HashMap<String, AddOn>,
}

impl Default for Catalog {
    fn default() -> Self {
        let mut plans = HashMap::new();

        for (id, name, base_usd) in [
            ("full-stack-basic", "Full-Stack Basic", 499),
            ("full-stack-standard", "Full-Stack Standard", 999),
            ("full-stack-premium", "Full-Stack Premium", 1499),
            ("ecommerce-complete", "E-Commerce Complete", 1999),
        ] {
            plans.insert(
                id.to_string(),
                PackagePlan {
                    id: id.to_string(),
                    name: name.to_string(),
                    base_usd,
                    voice_bot_usd: None,
                    source: PlanSource::Traditional,
                },
            );
        }

        plans.insert(
            "basic-ai-integration".to_string(),
            PackagePlan {
                id: "basic-ai-integration".to_string(),
                name: "Basic AI Integration".to_string(),
                base_usd: 499,
                voice_bot_usd: None,
                source: PlanSource::Chatbot,
            },
        );
        plans.insert(
            ADVANCED_AI_PLAN_ID.to_string(),
            PackagePlan {
                id: ADVANCED_AI_PLAN_ID.to_string(),
                name: "Advanced AI Integration".to_string(),
                base_usd: ADVANCED_AI_BASE_USD,
                voice_bot_usd: Some(ADVANCED_AI_VOICE_BOT_USD),
                source: PlanSource::Chatbot,
            },
        );
        plans.insert(
            "enterprise-automation".to_string(),
            PackagePlan {
                id: "enterprise-automation".to_string(),
                name: "Enterprise Automation Suite".to_string(),
                base_usd: 2499,
                voice_bot_usd: None,
                source: PlanSource::Enterprise,
            },
        );

        let mut add_ons = HashMap::new();
        for (id, name, description, price_usd, category) in [
            (
                "monthly-maintenance",
                "Monthly Maintenance",
                "Bug fixes, dependency updates and uptime monitoring",
                39,
                AddOnCategory::Maintenance,
            ),
            (
                "priority-support",
                "Priority Support",
                "Same-day response on support requests",
                59,
                AddOnCategory::Maintenance,
            ),
            (
                "multi-language",
                "Multi-Language Support",
                "Conversations and content in up to 5 languages",
                69,
                AddOnCategory::Features,
            ),
            (
                "booking-system",
                "Booking System",
                "Appointment scheduling with calendar sync",
                99,
                AddOnCategory::Features,
            ),
            (
                "whatsapp-integration",
                "WhatsApp Integration",
                "Deploy the assistant to WhatsApp Business",
                89,
                AddOnCategory::Integrations,
            ),
            (
                "crm-integration",
                "CRM Integration",
                "Sync leads and conversations to your CRM",
                129,
                AddOnCategory::Integrations,
            ),
            (
                "payment-gateway",
                "Payment Gateway",
                "Accept payments inside the conversation",
                79,
                AddOnCategory::Integrations,
            ),
            (
                "voice-assistant",
                "Voice Assistant",
                "Speech input and spoken responses",
                149,
                AddOnCategory::Ai,
            ),
            (
                "ai-knowledge-base",
                "AI Knowledge Base",
                "Train the assistant on your documents",
                119,
                AddOnCategory::Ai,
            ),
            (
                "conversation-analytics",
                "Conversation Analytics",
                "Dashboards for intents, drop-offs and satisfaction",
                99,
                AddOnCategory::Analytics,
            ),
            (
                "monthly-reports",
                "Monthly Reports",
                "Emailed summary of traffic and conversions",
                49,
                AddOnCategory::Analytics,
            ),
        ] {
            add_ons.insert(
                id.to_string(),
                AddOn {
                    id: id.to_string(),
                    name: name.to_string(),
                    description: description.to_string(),
                    price_usd,
                    category,
                },
            );
        }

        Self { plans, add_ons }
    }
}

impl Catalog {
    /// Look up a package by plan id.
    #[must_use]
    pub fn plan(&self, plan_id: &str) -> Option<&PackagePlan> {
        self.plans.get(plan_id)
    }

    /// Look up an add-on by id.
    #[must_use]
    pub fn add_on(&self, add_on_id: &str) -> Option<&AddOn> {
        self.add_ons.get(add_on_id)
    }

    /// Base amount in USD for a plan id.
    ///
    /// Unknown plan ids resolve to 0. The advanced AI plan's price depends
    /// on whether the voice bot is enabled.
    #[must_use]
    pub fn base_amount(&self, plan_id: &str, voice_bot_enabled: bool) -> i64 {
        match self.plans.get(plan_id) {
            Some(plan) => match plan.voice_bot_usd {
                Some(with_voice_bot) if voice_bot_enabled => with_voice_bot,
                _ => plan.base_usd,
            },
            None => {
                warn!(plan_id, "unknown plan id, base amount is 0");
                0
            }
        }
    }

    /// Total flat USD price of the selected add-ons.
    ///
    /// Unknown ids contribute 0. Order-independent.
    #[must_use]
    pub fn add_ons_total<'a, I>(&self, selected_ids: I) -> i64
    where
        I: IntoIterator<Item = &'a str>,
    {
        selected_ids
            .into_iter()
            .filter_map(|id| self.add_ons.get(id))
            .map(|add_on| add_on.price_usd)
            .sum()
    }

    /// All add-ons in a category, sorted by id for stable display order.
    #[must_use]
    pub fn add_ons_in_category(&self, category: AddOnCategory) -> Vec<&AddOn> {
        let mut matches: Vec<&AddOn> = self
            .add_ons
            .values()
            .filter(|add_on| add_on.category == category)
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches
    }
}
