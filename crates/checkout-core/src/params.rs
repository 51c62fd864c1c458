//! Checkout launch parameters.
//!
//! The checkout page is opened with query parameters describing what to
//! price: a plan id, the originating flow, an optional exact price for
//! pre-negotiated deals, and (for enterprise flows) a JSON consultation
//! payload. URL decoding is the router's job; this module ingests already
//! decoded key/value pairs.
//!
//! Malformed values degrade to absent rather than failing the page.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::PlanSource;

/// Result of an enterprise consultation, carried in the `data` parameter
/// as JSON produced by the consultation flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsultationData {
    /// Company the consultation was for.
    pub company: Option<String>,

    /// Package the consultation recommended.
    pub recommended_package: Option<String>,

    /// Price quoted during the consultation, in whole USD.
    pub estimated_price: Option<i64>,

    /// Features discussed during the consultation.
    pub features: Vec<String>,
}

/// Decoded launch parameters for a checkout session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    /// Selected plan id (`plan`).
    pub plan: Option<String>,

    /// Originating flow (`source`).
    pub source: PlanSource,

    /// Package display-name override (`package`).
    pub package: Option<String>,

    /// Exact pre-negotiated price in whole USD (`price`).
    pub price: Option<i64>,

    /// Whether the voice bot is enabled (`voiceBot`).
    pub voice_bot: bool,

    /// Whether the visitor arrived from the main page (`fromMainPage`).
    pub from_main_page: bool,

    /// Enterprise consultation payload (`data`).
    pub consultation: Option<ConsultationData>,
}

impl LaunchParams {
    /// Build launch parameters from decoded query pairs.
    ///
    /// Later occurrences of a key win. Unrecognized keys are ignored;
    /// unparseable values are dropped with a warning.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "plan" => params.plan = non_empty(value),
                "source" => params.source = PlanSource::from_param(value),
                "package" => params.package = non_empty(value),
                "price" => {
                    params.price = match value.parse::<i64>() {
                        Ok(price) if price > 0 => Some(price),
                        Ok(_) | Err(_) => {
                            warn!(price = value, "unparseable price parameter, ignored");
                            None
                        }
                    };
                }
                "voiceBot" => params.voice_bot = is_truthy(value),
                "fromMainPage" => params.from_main_page = is_truthy(value),
                "data" => {
                    params.consultation = match serde_json::from_str(value) {
                        Ok(data) => Some(data),
                        Err(err) => {
                            warn!(%err, "unparseable consultation data, ignored");
                            None
                        }
                    };
                }
                _ => {}
            }
        }
        params
    }

    /// Package display name, preferring the explicit `package` parameter,
    /// then the consultation's recommendation.
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_deref().or_else(|| {
            self.consultation
                .as_ref()
                .and_then(|data| data.recommended_package.as_deref())
        })
    }

    /// Exact price to bill, preferring the explicit `price` parameter,
    /// then the consultation's estimate.
    #[must_use]
    pub fn direct_price(&self) -> Option<i64> {
        self.price.or_else(|| {
            self.consultation
                .as_ref()
                .and_then(|data| data.estimated_price)
                .filter(|price| *price > 0)
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "true" | "1")
}
