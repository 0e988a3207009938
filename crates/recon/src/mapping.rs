use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cost categories
// ---------------------------------------------------------------------------

/// Fixed cost categories a column can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    LiftUnload,
    ContainerDeposit,
    Toll,
    TransportFee,
    WarehouseTransfer,
    WeighingFee,
    CleaningFee,
    OverweightFee,
    DetentionFee,
    StorageFee,
    Vat,
}

impl CostCategory {
    pub const ALL: [CostCategory; 11] = [
        Self::LiftUnload,
        Self::ContainerDeposit,
        Self::Toll,
        Self::TransportFee,
        Self::WarehouseTransfer,
        Self::WeighingFee,
        Self::CleaningFee,
        Self::OverweightFee,
        Self::DetentionFee,
        Self::StorageFee,
        Self::Vat,
    ];

    /// Stable key used in configs and breakdowns.
    pub fn key(&self) -> &'static str {
        match self {
            Self::LiftUnload => "lift_unload",
            Self::ContainerDeposit => "container_deposit",
            Self::Toll => "toll",
            Self::TransportFee => "transport_fee",
            Self::WarehouseTransfer => "warehouse_transfer",
            Self::WeighingFee => "weighing_fee",
            Self::CleaningFee => "cleaning_fee",
            Self::OverweightFee => "overweight_fee",
            Self::DetentionFee => "detention_fee",
            Self::StorageFee => "storage_fee",
            Self::Vat => "vat",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Which columns of one side's sheets carry the key fields and each cost.
///
/// A column listed under several categories is summed once per category;
/// keeping assignments exclusive is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_no: Option<String>,

    pub lift_unload: Vec<String>,
    pub container_deposit: Vec<String>,
    pub toll: Vec<String>,
    pub transport_fee: Vec<String>,
    pub warehouse_transfer: Vec<String>,
    pub weighing_fee: Vec<String>,
    pub cleaning_fee: Vec<String>,
    pub overweight_fee: Vec<String>,
    pub detention_fee: Vec<String>,
    pub storage_fee: Vec<String>,
    pub vat: Vec<String>,

    /// User-defined categories: name → columns. Kept sorted by name, which
    /// is the order breakdowns and reports list them in.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_costs: BTreeMap<String, Vec<String>>,
}

impl CostMapping {
    pub fn columns(&self, category: CostCategory) -> &[String] {
        match category {
            CostCategory::LiftUnload => &self.lift_unload,
            CostCategory::ContainerDeposit => &self.container_deposit,
            CostCategory::Toll => &self.toll,
            CostCategory::TransportFee => &self.transport_fee,
            CostCategory::WarehouseTransfer => &self.warehouse_transfer,
            CostCategory::WeighingFee => &self.weighing_fee,
            CostCategory::CleaningFee => &self.cleaning_fee,
            CostCategory::OverweightFee => &self.overweight_fee,
            CostCategory::DetentionFee => &self.detention_fee,
            CostCategory::StorageFee => &self.storage_fee,
            CostCategory::Vat => &self.vat,
        }
    }

    pub fn columns_mut(&mut self, category: CostCategory) -> &mut Vec<String> {
        match category {
            CostCategory::LiftUnload => &mut self.lift_unload,
            CostCategory::ContainerDeposit => &mut self.container_deposit,
            CostCategory::Toll => &mut self.toll,
            CostCategory::TransportFee => &mut self.transport_fee,
            CostCategory::WarehouseTransfer => &mut self.warehouse_transfer,
            CostCategory::WeighingFee => &mut self.weighing_fee,
            CostCategory::CleaningFee => &mut self.cleaning_fee,
            CostCategory::OverweightFee => &mut self.overweight_fee,
            CostCategory::DetentionFee => &mut self.detention_fee,
            CostCategory::StorageFee => &mut self.storage_fee,
            CostCategory::Vat => &mut self.vat,
        }
    }

    /// Every cost bucket as `(breakdown key, columns)`: the fixed categories in
    /// declaration order, then the additional costs by name.
    pub fn cost_buckets(&self) -> Vec<(String, &[String])> {
        let fixed = CostCategory::ALL
            .iter()
            .map(|c| (c.key().to_string(), self.columns(*c)));
        let extra = self
            .additional_costs
            .iter()
            .map(|(name, cols)| (name.clone(), cols.as_slice()));
        fixed.chain(extra).collect()
    }

    /// Number of column assignments across all cost buckets.
    pub fn mapped_cost_columns(&self) -> usize {
        self.cost_buckets().iter().map(|(_, cols)| cols.len()).sum()
    }

    /// Contract and date columns are both set, so rows can be keyed.
    pub fn is_ready(&self) -> bool {
        let set = |c: &Option<String>| c.as_deref().is_some_and(|s| !s.trim().is_empty());
        set(&self.contract_no) && set(&self.date)
    }
}
