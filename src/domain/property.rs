// src/domain/property.rs

use crate::domain::lease::whole_amount;
use serde::Deserialize;

/// A row of `get_public_properties`. The RPC repeats the unpaged row count
/// on every row as `total_count`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyListing {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(deserialize_with = "whole_amount")]
    pub monthly_price: i64,
    #[serde(default)]
    pub available_rooms: i64,
    #[serde(default)]
    pub total_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertySort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl PropertySort {
    pub const ALL: [PropertySort; 3] = [
        PropertySort::Newest,
        PropertySort::PriceAsc,
        PropertySort::PriceDesc,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PropertySort::Newest => "newest",
            PropertySort::PriceAsc => "price_asc",
            PropertySort::PriceDesc => "price_desc",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertySort::Newest => "Newest",
            PropertySort::PriceAsc => "Price: low to high",
            PropertySort::PriceDesc => "Price: high to low",
        }
    }
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort: PropertySort,
}

impl PropertyQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 12;

    pub fn new(page: u32, sort: PropertySort) -> Self {
        Self {
            page: page.max(1),
            page_size: Self::DEFAULT_PAGE_SIZE,
            sort,
        }
    }

    pub fn offset(&self) -> u32 {
        (self.page.max(1) - 1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPage {
    pub query: PropertyQuery,
    pub listings: Vec<PropertyListing>,
    pub total_count: i64,
}

impl PropertyPage {
    pub fn from_rows(query: PropertyQuery, listings: Vec<PropertyListing>) -> Self {
        let total_count = listings.first().map(|l| l.total_count).unwrap_or(0);
        Self {
            query,
            listings,
            total_count,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.total_count <= 0 || self.query.page_size == 0 {
            return 1;
        }
        let size = i64::from(self.query.page_size);
        ((self.total_count + size - 1) / size).max(1) as u32
    }

    pub fn has_next(&self) -> bool {
        self.query.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.query.page > 1
    }
}
