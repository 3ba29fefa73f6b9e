use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsPriority {
    High,
    #[default]
    Normal,
}

impl NewsPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsPriority::High => "high",
            NewsPriority::Normal => "normal",
        }
    }
}

impl fmt::Display for NewsPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsPriority {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(NewsPriority::High),
            "normal" => Ok(NewsPriority::Normal),
            other => Err(eyre::eyre!("Unknown news priority: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub priority: NewsPriority,
    pub is_published: bool,
    pub updated_at: DateTime<Utc>,
}

/// An announcement as shown to patients, timestamped in the hospital's zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub body: Option<String>,
    pub priority: NewsPriority,
    pub updated_at: DateTime<FixedOffset>,
}

impl NewsItem {
    pub fn new(news: News, tz: Tz) -> Self {
        let local = news.updated_at.with_timezone(&tz);
        Self {
            title: news.title,
            body: news.body,
            priority: news.priority,
            updated_at: local.with_timezone(&local.offset().fix()),
        }
    }
}
