use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub location: String,
    pub address: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub timings: String,
    pub price_range: String,
    pub rating: f64,
    pub reviews: i64,
    pub amenities: Vec<String>,
    pub grounds: Vec<Ground>,
}

impl Venue {
    pub fn ground_by_name(&self, name: &str) -> Option<&Ground> {
        self.grounds.iter().find(|g| g.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ground {
    pub id: i64,
    pub name: String,
    pub capacity: String,
    pub tier: GroundTier,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GroundTier {
    Premium,
    Standard,
}

impl GroundTier {
    pub fn parse(s: &str) -> Self {
        match s {
            "premium" => GroundTier::Premium,
            _ => GroundTier::Standard,
        }
    }
}

/// Directory listing entry; grounds are only counted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub location: String,
    pub price_range: String,
    pub rating: f64,
    pub reviews: i64,
    pub grounds: i64,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueFilter {
    pub city: Option<String>,
    pub q: Option<String>,
}

impl VenueFilter {
    pub fn matches(&self, venue: &VenueSummary) -> bool {
        let city_ok = match self.city.as_deref().filter(|c| !c.is_empty()) {
            Some(city) => venue.city == city,
            None => true,
        };
        let query_ok = match self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let q = q.to_lowercase();
                venue.name.to_lowercase().contains(&q) || venue.location.to_lowercase().contains(&q)
            }
            None => true,
        };
        city_ok && query_ok
    }
}
