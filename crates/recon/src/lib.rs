//! `contrecon-recon`: Container cost reconciliation engine.
//!
//! Pure engine crate: receives loaded files and a column mapping per side,
//! returns per-container comparison results. No CLI or IO dependencies.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod filter;
pub mod mapper;
pub mod mapping;
pub mod matcher;
pub mod model;
pub mod normalize;

pub use config::{ReconConfig, SideConfig};
pub use engine::{compare, reconcile};
pub use error::ReconError;
pub use filter::{filter_results, StatusFilter};
pub use mapper::{map_headers, union_headers};
pub use mapping::{CostCategory, CostMapping};
pub use model::{ComparisonResult, MatchStatus, ReconMeta, ReconReport, ReconSummary};
