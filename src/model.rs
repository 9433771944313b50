use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub min_cost: f64,
    pub max_cost: f64,
}

impl RepairItem {
    pub fn average_cost(&self) -> f64 {
        (self.min_cost + self.max_cost) / 2.0
    }
}

/// Raw form values as typed by the user. Coerced to numbers at analysis time.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInput {
    pub address: String,
    pub square_footage: String,
    pub estimated_arv: String,
    pub target_percent: String,
}

impl Default for PropertyInput {
    fn default() -> Self {
        PropertyInput {
            address: String::new(),
            square_footage: String::new(),
            estimated_arv: String::new(),
            target_percent: "70".to_string(),
        }
    }
}

impl PropertyInput {
    /// Both ARV and square footage have been entered (any text, even "0").
    pub fn has_required_fields(&self) -> bool {
        !self.estimated_arv.is_empty() && !self.square_footage.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedRepairs {
    ids: BTreeSet<String>,
}

impl SelectedRepairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the id if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for SelectedRepairs {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SelectedRepairs {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl DealQuality {
    pub fn from_margin(profit_margin: f64) -> Self {
        if profit_margin >= 20.0 {
            DealQuality::Excellent
        } else if profit_margin >= 15.0 {
            DealQuality::Good
        } else if profit_margin >= 10.0 {
            DealQuality::Fair
        } else {
            DealQuality::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DealQuality::Excellent => "EXCELLENT DEAL",
            DealQuality::Good => "GOOD DEAL",
            DealQuality::Fair => "FAIR DEAL",
            DealQuality::Poor => "POOR DEAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub max_allowable_offer: f64,  // Floored at zero
    pub raw_offer: f64,            // Offer before the floor, may be negative
    pub projected_profit: f64,
    pub profit_margin: f64,        // Percent of ARV
    /// Sum of the unfloored offer and all costs. This collapses to
    /// `arv * target_percent / 100`, so profit and margin never react to
    /// repair, closing or financing costs.
    pub total_investment: f64,
    pub total_repair_costs: f64,
    pub closing_costs: f64,
    pub hard_money_interest: f64,
    pub deal_quality: DealQuality,

    pub arv: f64,
    pub target_percent: f64,
    pub sqft: f64,
}
