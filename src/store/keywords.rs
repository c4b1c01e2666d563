// src/store/keywords.rs
// Durable cross-session keyword memory, keyed by (user_id, keyword, category).
// Upserts increment mentioned_count instead of duplicating rows.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Technical,
    SoftSkill,
    Experience,
    Project,
    Strength,
    Weakness,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 6] = [
        KeywordCategory::Technical,
        KeywordCategory::SoftSkill,
        KeywordCategory::Experience,
        KeywordCategory::Project,
        KeywordCategory::Strength,
        KeywordCategory::Weakness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Technical => "technical",
            KeywordCategory::SoftSkill => "soft_skill",
            KeywordCategory::Experience => "experience",
            KeywordCategory::Project => "project",
            KeywordCategory::Strength => "strength",
            KeywordCategory::Weakness => "weakness",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "technical" => Some(KeywordCategory::Technical),
            "soft_skill" => Some(KeywordCategory::SoftSkill),
            "experience" => Some(KeywordCategory::Experience),
            "project" => Some(KeywordCategory::Project),
            "strength" => Some(KeywordCategory::Strength),
            "weakness" => Some(KeywordCategory::Weakness),
            _ => None,
        }
    }

    /// Heading used when keywords are grouped for prompt injection.
    pub fn label(&self) -> &'static str {
        match self {
            KeywordCategory::Technical => "Tech stack",
            KeywordCategory::SoftSkill => "Soft skills",
            KeywordCategory::Experience => "Experience",
            KeywordCategory::Project => "Projects",
            KeywordCategory::Strength => "Strengths",
            KeywordCategory::Weakness => "Areas to improve",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserKeyword {
    pub keyword: String,
    pub category: KeywordCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub mentioned_count: i64,
}

pub struct KeywordStore {
    pool: SqlitePool,
}

impl KeywordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, user_id: &str, kw: &UserKeyword) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_keywords (user_id, keyword, category, context, mentioned_count)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(user_id, keyword, category) DO UPDATE SET
                mentioned_count = mentioned_count + excluded.mentioned_count,
                context = COALESCE(excluded.context, user_keywords.context)
            "#,
        )
        .bind(user_id)
        .bind(&kw.keyword)
        .bind(kw.category.as_str())
        .bind(&kw.context)
        .bind(kw.mentioned_count.max(1))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// The user's highest-mention-count keywords across all categories.
    pub async fn top_for_user(&self, user_id: &str, limit: i64) -> Result<Vec<UserKeyword>> {
        let rows = sqlx::query(
            r#"
            SELECT keyword, category, context, mentioned_count
            FROM user_keywords
            WHERE user_id = ?
            ORDER BY mentioned_count DESC, keyword ASC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let category = KeywordCategory::parse(&row.get::<String, _>("category"))?;
                Some(UserKeyword {
                    keyword: row.get("keyword"),
                    category,
                    context: row.get("context"),
                    mentioned_count: row.get("mentioned_count"),
                })
            })
            .collect())
    }
}
