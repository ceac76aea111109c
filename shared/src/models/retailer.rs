//! Retailer and listing reference entities
//!
//! Read-mostly data scoped to a retailer identity; listings feed orders at
//! checkout time. Not mutated by the client core beyond inventory reads.

use crate::types::{ListingId, RetailerId};
use serde::{Deserialize, Serialize};

/// Retailer record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retailer {
    pub id: RetailerId,
    pub name: String,
    pub suburb: String,
}

/// A retailer's sellable listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub retailer_id: RetailerId,
    pub name: String,
    /// Unit price in whole rand
    pub unit_price: i64,
    pub available: bool,
}
