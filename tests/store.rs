use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::io;

use promptfolio::model::{
    Aggregate, ApiKeysPatch, NewPrompt, NewRun, Platform, PromptPatch, RunOutput, RunOutputs,
};
use promptfolio::errors::StoreError;
use promptfolio::store::{seed, JsonFileStorage, MemoryStorage, Storage, Store};
use promptfolio::template::{self, Values};

fn sample(title: &str, folder: Option<&str>) -> NewPrompt {
    NewPrompt {
        title: title.into(),
        content: "Summarize {{topic}} for {{audience}}".into(),
        tags: vec!["a".into(), "b".into()],
        platform: Platform::Claude,
        folder_id: folder.map(str::to_string),
        color: Some("violet".into()),
    }
}

fn reopen(storage: &MemoryStorage) -> Aggregate {
    Store::open(storage).unwrap().aggregate().clone()
}

#[test]
fn add_then_delete_restores_collection() {
    let storage = MemoryStorage::new();
    let mut store = Store::open(&storage).unwrap();
    let before = store.prompts().to_vec();

    let p = store.add_prompt(sample("Temp", None)).unwrap();
    assert_eq!(store.prompts()[0].id, p.id, "newest first");
    assert!(store.delete_prompt(&p.id).unwrap());

    assert_eq!(store.prompts(), before.as_slice());
}

#[test]
fn every_mutation_writes_through() {
    let storage = MemoryStorage::new();
    let mut store = Store::open(&storage).unwrap();

    let p = store.add_prompt(sample("One", None)).unwrap();
    assert_eq!(storage.save_count(), 1);
    assert_eq!(reopen(&storage).prompts[0].title, "One");

    store
        .update_prompt(&p.id, PromptPatch { title: Some("Two".into()), ..Default::default() })
        .unwrap();
    assert_eq!(storage.save_count(), 2);
    assert_eq!(reopen(&storage).prompts[0].title, "Two");

    let f = store.create_folder("Drafts").unwrap();
    assert_eq!(reopen(&storage).folders.last().unwrap().id, f.id);

    store
        .set_api_keys(ApiKeysPatch { openai: Some("sk-1".into()), ..Default::default() })
        .unwrap();
    assert_eq!(reopen(&storage).api_keys.openai, "sk-1");
    assert_eq!(storage.save_count(), 4);
}

#[test]
fn unknown_ids_are_silent_noops() {
    let storage = MemoryStorage::new();
    let mut store = Store::open(&storage).unwrap();
    let before = store.aggregate().clone();

    assert!(!store
        .update_prompt("missing", PromptPatch { title: Some("x".into()), ..Default::default() })
        .unwrap());
    assert!(!store.delete_prompt("missing").unwrap());
    assert!(!store.delete_folder("missing").unwrap());

    assert_eq!(store.aggregate(), &before);
    assert_eq!(storage.save_count(), 0);
}

#[test]
fn partial_update_merges() {
    let mut store = Store::open(MemoryStorage::new()).unwrap();
    let p = store.add_prompt(sample("Keep", Some("ux"))).unwrap();

    store
        .update_prompt(
            &p.id,
            PromptPatch {
                content: Some("New {{x}}".into()),
                tags: Some(vec!["z".into(), " z ".into()]),
                ..Default::default()
            },
        )
        .unwrap();

    let got = store.prompt(&p.id).unwrap();
    assert_eq!(got.title, "Keep");
    assert_eq!(got.content, "New {{x}}");
    assert_eq!(got.tags, vec!["z".to_string()]);
    assert_eq!(got.platform, Platform::Claude);
    assert_eq!(got.folder_id.as_deref(), Some("ux"));
    assert_eq!(got.color.as_deref(), Some("violet"));
    assert_eq!(got.created_at, p.created_at);
    assert_eq!(got.id, p.id);

    store
        .update_prompt(&p.id, PromptPatch { folder_id: Some(None), ..Default::default() })
        .unwrap();
    assert_eq!(store.prompt(&p.id).unwrap().folder_id, None);
}

#[test]
fn deleting_folder_orphans_its_prompts() {
    let mut store = Store::open(MemoryStorage::new()).unwrap();
    let folder = store.create_folder("Shared").unwrap();
    let a = store.add_prompt(sample("A", Some(&folder.id))).unwrap();
    let b = store.add_prompt(sample("B", Some(&folder.id))).unwrap();
    let count = store.prompts().len();

    assert!(store.delete_folder(&folder.id).unwrap());

    assert!(store.folder(&folder.id).is_none());
    assert_eq!(store.prompts().len(), count);
    for original in [a, b] {
        let now = store.prompt(&original.id).unwrap();
        assert_eq!(now.folder_id, None);
        assert_eq!(now.title, original.title);
        assert_eq!(now.content, original.content);
        assert_eq!(now.tags, original.tags);
        assert_eq!(now.created_at, original.created_at);
    }
}

#[test]
fn runs_are_prepended() {
    let mut store = Store::open(MemoryStorage::new()).unwrap();
    let mut vars = Values::new();
    vars.insert("table".into(), "users".into());
    let first = store
        .add_run(NewRun {
            prompt_id: "3".into(),
            prompt_title: "SQL Query Generator".into(),
            variables: vars,
            outputs: RunOutputs {
                model_a: RunOutput { name: "ChatGPT".into(), content: "SELECT *".into(), rating: Some(5) },
                model_b: RunOutput { name: "Claude".into(), content: String::new(), rating: None },
            },
        })
        .unwrap();
    let second = store.add_run(NewRun { prompt_id: "3".into(), ..Default::default() }).unwrap();

    let ids: Vec<_> = store.runs().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(store.runs()[1].variables.get("table").map(String::as_str), Some("users"));
}

#[test]
fn key_updates_are_partial() {
    let mut store = Store::open(MemoryStorage::new()).unwrap();
    store
        .set_api_keys(ApiKeysPatch {
            openai: Some("o".into()),
            anthropic: Some("a".into()),
            ..Default::default()
        })
        .unwrap();
    store
        .set_api_keys(ApiKeysPatch { anthropic: Some("a2".into()), ..Default::default() })
        .unwrap();
    let keys = store.api_keys();
    assert_eq!((keys.openai.as_str(), keys.anthropic.as_str(), keys.gemini.as_str()), ("o", "a2", ""));
}

#[test]
fn reset_restores_seed() {
    let storage = MemoryStorage::new();
    let mut store = Store::open(&storage).unwrap();
    store.add_prompt(sample("Mine", None)).unwrap();
    store.set_api_keys(ApiKeysPatch { gemini: Some("g".into()), ..Default::default() }).unwrap();

    store.reset_data().unwrap();

    let titles: Vec<_> = store.prompts().iter().map(|p| p.title.clone()).collect();
    let seed_titles: Vec<_> = seed().prompts.iter().map(|p| p.title.clone()).collect();
    assert_eq!(titles, seed_titles);
    assert!(store.api_keys().gemini.is_empty());
    assert_eq!(reopen(&storage).prompts.len(), seed_titles.len());
}

#[test]
fn seeded_sql_prompt_compiles() {
    let store = Store::open(MemoryStorage::new()).unwrap();
    let p = store
        .prompts()
        .iter()
        .find(|p| p.title == "SQL Query Generator")
        .unwrap();
    let mut values = Values::new();
    values.insert("action".into(), "select".into());
    values.insert("table".into(), "users".into());
    values.insert("condition".into(), "active=true".into());
    assert_eq!(
        template::compile(&p.content, &values),
        "Write a SQL query to select from the users table where active=true."
    );
}

#[test]
fn wrong_shape_that_parses_as_json_is_not_validated_further() {
    // Missing collections default to empty rather than failing the load.
    let storage = MemoryStorage::with_document(r#"{"prompts": []}"#);
    let store = Store::open(&storage).unwrap();
    assert!(store.prompts().is_empty());
    assert!(store.folders().is_empty());
}

#[test]
fn file_storage_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data.json");
    let storage = JsonFileStorage::new(&path);
    assert_eq!(storage.load().unwrap(), None);

    let mut store = Store::open(storage.clone()).unwrap();
    let p = store.add_prompt(sample("On disk", None)).unwrap();
    assert!(path.exists());

    let again = Store::open(JsonFileStorage::new(&path)).unwrap();
    assert_eq!(again.prompt(&p.id).unwrap().title, "On disk");

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    for key in ["prompts", "folders", "runs", "apiKeys"] {
        assert!(raw.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn corrupt_file_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "[[[").unwrap();
    let store = Store::open(JsonFileStorage::new(&path)).unwrap();
    assert_eq!(store.prompts().len(), seed().prompts.len());
    // The broken file is left alone until the next mutation.
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[[[");
}

#[test]
fn non_utf8_file_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, [0xff, 0xfe, b'{']).unwrap();
    let store = Store::open(JsonFileStorage::new(&path)).unwrap();
    assert_eq!(store.prompts().len(), seed().prompts.len());
}

#[test]
fn unreadable_data_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory exists at the path, so reading it fails.
    let path = dir.path().join("data.json");
    std::fs::create_dir(&path).unwrap();
    let err = Store::open(JsonFileStorage::new(&path)).err().unwrap();
    assert!(matches!(err, StoreError::Storage(_)), "{err:?}");
}

/// Serves the seed document and fails every save while `fail` is set.
#[derive(Default)]
struct FlakyStorage {
    fail: Cell<bool>,
    saved: Cell<usize>,
}

impl Storage for FlakyStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(None)
    }

    fn save(&self, _document: &str) -> Result<(), StoreError> {
        if self.fail.get() {
            return Err(io::Error::other("disk full").into());
        }
        self.saved.set(self.saved.get() + 1);
        Ok(())
    }
}

#[test]
fn failed_save_leaves_memory_untouched() {
    let storage = FlakyStorage::default();
    let mut store = Store::open(&storage).unwrap();
    let kept = store.add_prompt(sample("Kept", None)).unwrap();
    let folder = store.create_folder("Shared").unwrap();
    store
        .update_prompt(&kept.id, PromptPatch { folder_id: Some(Some(folder.id.clone())), ..Default::default() })
        .unwrap();
    let before = store.aggregate().clone();

    storage.fail.set(true);
    assert!(store.add_prompt(sample("Lost", None)).is_err());
    assert!(store
        .update_prompt(&kept.id, PromptPatch { title: Some("Renamed".into()), ..Default::default() })
        .is_err());
    assert!(store.delete_prompt(&kept.id).is_err());
    assert!(store.delete_folder(&folder.id).is_err());
    assert!(store.create_folder("Other").is_err());
    assert!(store.add_run(NewRun { prompt_id: kept.id.clone(), ..Default::default() }).is_err());
    assert!(store.set_api_keys(ApiKeysPatch { openai: Some("sk".into()), ..Default::default() }).is_err());
    assert!(store.reset_data().is_err());

    assert_eq!(store.aggregate(), &before);

    storage.fail.set(false);
    store.add_prompt(sample("Now saved", None)).unwrap();
    assert_eq!(store.prompts()[0].title, "Now saved");
    assert_eq!(storage.saved.get(), 4);
}

#[test]
fn marketing_seeds_keep_every_placeholder() {
    let data = seed();
    let vars = |title: &str| {
        let p = data.prompts.iter().find(|p| p.title == title).unwrap();
        template::unique_variables(&p.content)
    };
    let campaign = vars("Campaign Proposal Writer");
    assert_eq!(campaign.len(), 14);
    assert!(campaign.contains(&"creative_themes".to_string()));
    assert!(campaign.contains(&"potential_risks".to_string()));
    let calendar = vars("Content Calendar Generator");
    assert!(calendar.contains(&"audience_values".to_string()));
    assert!(calendar.contains(&"influencer_audience_size".to_string()));
}
