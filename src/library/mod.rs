//! Prompt listing filters.

use serde::{Deserialize, Serialize};

use crate::model::{Aggregate, Platform, Prompt};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TagMatchMode {
    /// Match any of the specified tags (OR)
    #[default]
    Any,
    /// Match all of the specified tags (AND)
    All,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FolderScope {
    #[default]
    Any,
    Uncategorized,
    In(String),
}

#[derive(Debug, Default, Clone)]
pub struct PromptFilter {
    /// Case-insensitive substring of title or content.
    pub search: Option<String>,
    pub platform: Option<Platform>,
    pub folder: FolderScope,
    pub tags: Vec<String>,
    pub tag_mode: TagMatchMode,
}

impl PromptFilter {
    pub fn matches(&self, p: &Prompt) -> bool {
        if let Some(q) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            if !p.title.to_lowercase().contains(&q) && !p.content.to_lowercase().contains(&q) {
                return false;
            }
        }
        if let Some(platform) = self.platform {
            if p.platform != platform {
                return false;
            }
        }
        match &self.folder {
            FolderScope::Any => {}
            FolderScope::Uncategorized => {
                if p.folder_id.is_some() {
                    return false;
                }
            }
            FolderScope::In(id) => {
                if p.folder_id.as_deref() != Some(id.as_str()) {
                    return false;
                }
            }
        }
        if self.tags.is_empty() {
            return true;
        }
        match self.tag_mode {
            TagMatchMode::Any => self.tags.iter().any(|t| p.has_tag(t)),
            TagMatchMode::All => self.tags.iter().all(|t| p.has_tag(t)),
        }
    }
}

/// Stored order is kept.
pub fn filter_prompts<'a>(prompts: &'a [Prompt], filter: &PromptFilter) -> Vec<&'a Prompt> {
    prompts.iter().filter(|p| filter.matches(p)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderCount {
    pub id: Option<String>,
    pub name: String,
    pub prompts: usize,
}

/// Prompt count per folder in folder order, then an "Uncategorized" row.
/// Prompts pointing at a folder that no longer exists count as uncategorized.
pub fn folder_counts(data: &Aggregate) -> Vec<FolderCount> {
    let mut out: Vec<FolderCount> = data
        .folders
        .iter()
        .map(|f| FolderCount {
            id: Some(f.id.clone()),
            name: f.name.clone(),
            prompts: data
                .prompts
                .iter()
                .filter(|p| p.folder_id.as_deref() == Some(f.id.as_str()))
                .count(),
        })
        .collect();
    let uncategorized = data
        .prompts
        .iter()
        .filter(|p| match p.folder_id.as_deref() {
            None => true,
            Some(id) => !data.folders.iter().any(|f| f.id == id),
        })
        .count();
    out.push(FolderCount {
        id: None,
        name: "Uncategorized".into(),
        prompts: uncategorized,
    });
    out
}
