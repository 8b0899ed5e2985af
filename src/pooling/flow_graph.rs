use crate::core::country::ConvertibilityCategory;
use crate::core::currency::CurrencyCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Node id of the regional treasury centre sink.
pub const RTC_NODE_ID: &str = "RTC";

/// Node id of the restricted-funds sink.
pub const RESTRICTED_NODE_ID: &str = "Restricted";

/// Visual floor applied to link weights so zero and near-zero flows stay
/// visible as thin edges in a Sankey rendering. The floor affects only
/// the link `value`/`converted_value` fields, never the accumulated
/// metrics.
pub const MIN_LINK_VALUE: Decimal = dec!(0.1);

/// A node in the pooling flow graph: one per operating country, plus the
/// two fixed sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub category: ConvertibilityCategory,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, category: ConvertibilityCategory) -> Self {
        Self {
            id: id.into(),
            category,
        }
    }

    /// The RTC sink node.
    pub fn rtc_sink() -> Self {
        Self::new(RTC_NODE_ID, ConvertibilityCategory::FreelyConvertible)
    }

    /// The restricted-funds sink node.
    pub fn restricted_sink() -> Self {
        Self::new(RESTRICTED_NODE_ID, ConvertibilityCategory::Restricted)
    }
}

/// A weighted edge routing one currency balance from a country to a sink.
///
/// `value` carries the source-currency amount and `converted_value` the
/// target-currency amount when FX conversion applies; both are floored
/// at [`MIN_LINK_VALUE`] for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_value: Option<Decimal>,
    pub currency: CurrencyCode,
}

impl FlowLink {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        value: Decimal,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value: value.max(MIN_LINK_VALUE),
            converted_value: None,
            currency,
        }
    }

    pub fn with_converted_value(mut self, converted: Decimal) -> Self {
        self.converted_value = Some(converted.max(MIN_LINK_VALUE));
        self
    }
}

/// The directed flow graph produced by one simulation pass, suitable for
/// Sankey-style rendering: country nodes plus the two sinks, and one link
/// per cash-positive (country, currency) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolingGraph {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
    /// Running total of cash reaching the RTC, in target-currency terms
    /// (converted amounts for partially convertible flows, face amounts
    /// for freely convertible ones). Unfloored.
    pub rtc_total: Decimal,
}

impl PoolingGraph {
    /// Ensure a country node exists, inserting it at most once.
    pub(crate) fn ensure_node(&mut self, id: &str, category: ConvertibilityCategory) {
        if !self.nodes.iter().any(|n| n.id == id) {
            self.nodes.push(FlowNode::new(id, category));
        }
    }

    /// Append the two sink nodes. Called once, after all country nodes,
    /// regardless of whether any link references them.
    pub(crate) fn append_sinks(&mut self) {
        self.nodes.push(FlowNode::rtc_sink());
        self.nodes.push(FlowNode::restricted_sink());
    }

    /// Links flowing into a given sink.
    pub fn links_to<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a FlowLink> + 'a {
        self.links.iter().filter(move |l| l.target == target)
    }

    /// Sum of floored link values into the RTC sink. This is the figure
    /// the what-if calculator starts from.
    pub fn pooled_cash(&self) -> Decimal {
        self.links_to(RTC_NODE_ID).map(|l| l.value).sum()
    }
}
