//! The in-memory aggregate with write-through persistence.
//!
//! Every mutation is applied to a copy of the aggregate, the copy is written
//! through the [`Storage`] port, and only a successful save replaces the
//! in-memory state. Updates and deletes that name an unknown id are no-ops
//! and report `false`.

mod seed;
mod storage;

pub use seed::seed;
pub use storage::{JsonFileStorage, MemoryStorage, Storage};

use chrono::Utc;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::model::{
    normalize_tags, Aggregate, ApiKeys, ApiKeysPatch, Folder, NewPrompt, NewRun, Prompt,
    PromptPatch, Run,
};

pub struct Store<S: Storage> {
    storage: S,
    data: Aggregate,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn require_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("prompt title must not be empty".into()));
    }
    Ok(())
}

fn check_rating(rating: Option<u8>) -> Result<(), StoreError> {
    match rating {
        Some(r) if !(1..=5).contains(&r) => Err(StoreError::Validation(format!(
            "rating must be between 1 and 5, got {r}"
        ))),
        _ => Ok(()),
    }
}

impl<S: Storage> Store<S> {
    /// Load the persisted aggregate, falling back to the seed data when the
    /// document is missing or does not parse. Only a failing read is an error.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        let data = match storage.load()? {
            None => {
                tracing::info!("no saved data, starting from seed");
                seed()
            }
            Some(doc) => match serde_json::from_slice::<Aggregate>(&doc) {
                Ok(agg) => agg,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to parse saved data, starting from seed");
                    seed()
                }
            },
        };
        Ok(Self { storage, data })
    }

    /// Save `next` and make it current. On error the current state is kept.
    fn commit(&mut self, next: Aggregate) -> Result<(), StoreError> {
        let doc = serde_json::to_string(&next)?;
        self.storage.save(&doc)?;
        self.data = next;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn aggregate(&self) -> &Aggregate {
        &self.data
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.data.prompts
    }

    pub fn folders(&self) -> &[Folder] {
        &self.data.folders
    }

    pub fn runs(&self) -> &[Run] {
        &self.data.runs
    }

    pub fn api_keys(&self) -> &ApiKeys {
        &self.data.api_keys
    }

    pub fn prompt(&self, id: &str) -> Option<&Prompt> {
        self.data.prompts.iter().find(|p| p.id == id)
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.data.folders.iter().find(|f| f.id == id)
    }

    /// New prompts go to the front (newest first).
    pub fn add_prompt(&mut self, new: NewPrompt) -> Result<Prompt, StoreError> {
        require_title(&new.title)?;
        let prompt = Prompt {
            id: new_id(),
            title: new.title,
            content: new.content,
            tags: normalize_tags(new.tags),
            platform: new.platform,
            folder_id: new.folder_id,
            color: new.color,
            created_at: Utc::now(),
        };
        let mut next = self.data.clone();
        next.prompts.insert(0, prompt.clone());
        self.commit(next)?;
        tracing::debug!(id = %prompt.id, "added prompt");
        Ok(prompt)
    }

    pub fn update_prompt(&mut self, id: &str, patch: PromptPatch) -> Result<bool, StoreError> {
        if let Some(title) = &patch.title {
            require_title(title)?;
        }
        let mut next = self.data.clone();
        let Some(prompt) = next.prompts.iter_mut().find(|p| p.id == id) else {
            tracing::debug!(%id, "update on unknown prompt ignored");
            return Ok(false);
        };
        patch.apply(prompt);
        self.commit(next)?;
        Ok(true)
    }

    pub fn delete_prompt(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.prompt(id).is_none() {
            tracing::debug!(%id, "delete on unknown prompt ignored");
            return Ok(false);
        }
        let mut next = self.data.clone();
        next.prompts.retain(|p| p.id != id);
        self.commit(next)?;
        Ok(true)
    }

    /// Runs are append-only; newest first.
    pub fn add_run(&mut self, new: NewRun) -> Result<Run, StoreError> {
        check_rating(new.outputs.model_a.rating)?;
        check_rating(new.outputs.model_b.rating)?;
        let run = Run {
            id: new_id(),
            created_at: Utc::now(),
            prompt_id: new.prompt_id,
            prompt_title: new.prompt_title,
            variables: new.variables,
            outputs: new.outputs,
        };
        let mut next = self.data.clone();
        next.runs.insert(0, run.clone());
        self.commit(next)?;
        Ok(run)
    }

    pub fn set_api_keys(&mut self, patch: ApiKeysPatch) -> Result<(), StoreError> {
        let mut next = self.data.clone();
        next.api_keys.merge(patch);
        self.commit(next)
    }

    /// New folders go to the end.
    pub fn create_folder(&mut self, name: &str) -> Result<Folder, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("folder name must not be empty".into()));
        }
        let folder = Folder {
            id: new_id(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        let mut next = self.data.clone();
        next.folders.push(folder.clone());
        self.commit(next)?;
        Ok(folder)
    }

    /// Removes the folder and orphans its prompts; prompts are never deleted.
    pub fn delete_folder(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.folder(id).is_none() {
            return Ok(false);
        }
        let mut next = self.data.clone();
        next.folders.retain(|f| f.id != id);
        let mut orphaned = 0usize;
        for p in next.prompts.iter_mut() {
            if p.folder_id.as_deref() == Some(id) {
                p.folder_id = None;
                orphaned += 1;
            }
        }
        self.commit(next)?;
        tracing::debug!(%id, orphaned, "deleted folder");
        Ok(true)
    }

    /// Replace everything with the seed data.
    pub fn reset_data(&mut self) -> Result<(), StoreError> {
        self.commit(seed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_used_without_document() {
        let store = Store::open(MemoryStorage::new()).unwrap();
        assert!(store.prompts().iter().any(|p| p.title == "SQL Query Generator"));
        assert!(store.runs().is_empty());
        assert_eq!(store.api_keys(), &ApiKeys::default());
        // Opening does not write.
        assert_eq!(store.storage().save_count(), 0);
    }

    #[test]
    fn garbage_document_falls_back_to_seed() {
        let store = Store::open(MemoryStorage::with_document("{not json")).unwrap();
        assert_eq!(store.aggregate().prompts.len(), seed().prompts.len());
    }

    #[test]
    fn blank_title_rejected() {
        let mut store = Store::open(MemoryStorage::new()).unwrap();
        let err = store
            .add_prompt(NewPrompt { title: "  ".into(), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.storage().save_count(), 0);
    }

    #[test]
    fn out_of_range_rating_rejected() {
        let mut store = Store::open(MemoryStorage::new()).unwrap();
        let mut run = NewRun::default();
        run.outputs.model_a.rating = Some(6);
        assert!(store.add_run(run).is_err());
        assert!(store.runs().is_empty());
    }
}
