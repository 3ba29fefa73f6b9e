use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{news::NewsItem, route::RouteSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub timezone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hospital {
    /// The hospital's zone, or `fallback` when the stored identifier is not
    /// a known IANA name.
    pub fn zone_or(&self, fallback: Tz) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(e) => {
                tracing::warn!(
                    "Hospital {} has invalid timezone {:?} ({}), using {}",
                    self.code,
                    self.timezone,
                    e,
                    fallback
                );
                fallback
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalSummary {
    pub code: String,
    pub name: String,
    pub timezone: String,
}

impl From<&Hospital> for HospitalSummary {
    fn from(hospital: &Hospital) -> Self {
        Self {
            code: hospital.code.clone(),
            name: hospital.name.clone(),
            timezone: hospital.timezone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientHospitalResponse {
    pub hospital: HospitalSummary,
    pub news: Vec<NewsItem>,
    pub routes: Vec<RouteSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterHospitalResponse {
    pub hospital: HospitalSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedResponse {
    pub seeded: bool,
    pub hospital_code: String,
}
