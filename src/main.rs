use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use fs_err as fs;
use std::path::Path;

mod cli;

use cli::{ArenaArgs, Args, Command, FolderAction, KeysAction, PromptAction, VarArgs};
use promptfolio::arena::{Arena, Slot};
use promptfolio::config::Config;
use promptfolio::library::{self, FolderScope, PromptFilter, TagMatchMode};
use promptfolio::model::{ApiKeysPatch, NewPrompt, PromptPatch};
use promptfolio::provider::Gateway;
use promptfolio::store::{JsonFileStorage, Store};
use promptfolio::template::{self, Values};
use promptfolio::{log, ux};

type FileStore = Store<JsonFileStorage>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    log::init(args.debug);

    let mut cfg = Config::load(args.config.as_deref()).context("loading config")?;
    if let Some(data) = args.data.clone() {
        cfg.data_file = Some(data);
    }
    let data_path = cfg.data_path()?;
    tracing::debug!(path = %data_path.display(), "opening data file");
    let mut store = Store::open(JsonFileStorage::new(data_path)).context("opening data file")?;

    match args.command {
        Command::Prompt { action } => cmd_prompt(&mut store, action),
        Command::Folder { action } => cmd_folder(&mut store, action),
        Command::Preview { id, vars } => cmd_preview(&store, &id, vars),
        Command::Compile { id, vars } => cmd_compile(&store, &id, vars),
        Command::Arena(a) => cmd_arena(&mut store, &cfg, a).await,
        Command::Runs => {
            ux::show_runs(store.runs());
            Ok(())
        }
        Command::Keys { action } => cmd_keys(&mut store, &cfg, action).await,
        Command::Reset { yes } => {
            if !yes && !ux::confirm("Discard all prompts, folders, runs and keys?") {
                println!("Aborted by user.");
                return Ok(());
            }
            store.reset_data()?;
            println!("{} Data reset to the bundled examples.", "✓".green());
            Ok(())
        }
    }
}

fn values_from(vars: VarArgs) -> Values {
    vars.vars.into_iter().collect()
}

fn unfilled(content: &str, values: &Values) -> Vec<String> {
    template::unique_variables(content)
        .into_iter()
        .filter(|v| values.get(v).map_or(true, |x| x.trim().is_empty()))
        .collect()
}

fn read_content(content: Option<String>, file: Option<&Path>) -> Result<Option<String>> {
    match (content, file) {
        (Some(c), _) => Ok(Some(c)),
        (None, Some(p)) => Ok(Some(
            fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        )),
        (None, None) => Ok(None),
    }
}

fn cmd_prompt(store: &mut FileStore, action: PromptAction) -> Result<()> {
    match action {
        PromptAction::List { search, platform, folder, uncategorized, tags, all_tags } => {
            let filter = PromptFilter {
                search,
                platform,
                folder: match (folder, uncategorized) {
                    (Some(id), _) => FolderScope::In(id),
                    (None, true) => FolderScope::Uncategorized,
                    (None, false) => FolderScope::Any,
                },
                tags,
                tag_mode: if all_tags { TagMatchMode::All } else { TagMatchMode::Any },
            };
            let hits = library::filter_prompts(store.prompts(), &filter);
            ux::show_prompts(&hits, store.folders());
        }
        PromptAction::Show { id } => {
            let p = store.prompt(&id).with_context(|| format!("no prompt with id {id}"))?;
            let folder = p.folder_id.as_deref().and_then(|f| store.folder(f));
            ux::show_prompt(p, folder);
        }
        PromptAction::Add { title, content, file, tags, platform, folder, color } => {
            let content = read_content(content, file.as_deref())?.unwrap_or_default();
            if let Some(f) = &folder {
                if store.folder(f).is_none() {
                    tracing::warn!(folder = %f, "folder does not exist; prompt will reference it anyway");
                }
            }
            let p = store.add_prompt(NewPrompt { title, content, tags, platform, folder_id: folder, color })?;
            println!("{} Created prompt {} ({})", "✓".green(), p.title.bold(), p.id);
            let vars = template::detect_variables(&p.content);
            if !vars.is_empty() {
                println!("Detected variables: {}", vars.join(", ").yellow());
            }
        }
        PromptAction::Edit { id, title, content, file, tags, platform, folder, no_folder, color, no_color } => {
            let patch = PromptPatch {
                title,
                content: read_content(content, file.as_deref())?,
                tags,
                platform,
                folder_id: if no_folder { Some(None) } else { folder.map(Some) },
                color: if no_color { Some(None) } else { color.map(Some) },
            };
            if store.update_prompt(&id, patch)? {
                println!("{} Updated prompt {}", "✓".green(), id);
            } else {
                println!("No prompt with id {id}; nothing changed.");
            }
        }
        PromptAction::Delete { id, yes } => {
            let Some(p) = store.prompt(&id) else {
                println!("No prompt with id {id}; nothing changed.");
                return Ok(());
            };
            if !yes && !ux::confirm(&format!("Delete prompt '{}'?", p.title)) {
                println!("Aborted by user.");
                return Ok(());
            }
            store.delete_prompt(&id)?;
            println!("{} Deleted prompt {}", "✓".green(), id);
        }
    }
    Ok(())
}

fn cmd_folder(store: &mut FileStore, action: FolderAction) -> Result<()> {
    match action {
        FolderAction::List => ux::show_folders(&library::folder_counts(store.aggregate())),
        FolderAction::Create { name } => {
            let f = store.create_folder(&name)?;
            println!("{} Created folder {} ({})", "✓".green(), f.name.bold(), f.id);
        }
        FolderAction::Delete { id, yes } => {
            let Some(f) = store.folder(&id) else {
                println!("No folder with id {id}; nothing changed.");
                return Ok(());
            };
            if !yes && !ux::confirm(&format!("Delete folder '{}'? Its prompts are kept.", f.name)) {
                println!("Aborted by user.");
                return Ok(());
            }
            store.delete_folder(&id)?;
            println!("{} Deleted folder {}", "✓".green(), id);
        }
    }
    Ok(())
}

fn cmd_preview(store: &FileStore, id: &str, vars: VarArgs) -> Result<()> {
    let p = store.prompt(id).with_context(|| format!("no prompt with id {id}"))?;
    let values = values_from(vars);
    println!("{}", ux::render_segments(&template::render_preview(&p.content, &values)));
    let missing = unfilled(&p.content, &values);
    if !missing.is_empty() {
        eprintln!("{} {}", "Unfilled:".yellow(), missing.join(", "));
    }
    Ok(())
}

fn cmd_compile(store: &FileStore, id: &str, vars: VarArgs) -> Result<()> {
    let p = store.prompt(id).with_context(|| format!("no prompt with id {id}"))?;
    println!("{}", template::compile(&p.content, &values_from(vars)));
    Ok(())
}

async fn cmd_arena(store: &mut FileStore, cfg: &Config, a: ArenaArgs) -> Result<()> {
    let prompt = store
        .prompt(&a.id)
        .cloned()
        .with_context(|| format!("no prompt with id {}", a.id))?;
    let mut arena = Arena::new(
        prompt,
        a.model_a.unwrap_or(cfg.model_a),
        a.model_b.unwrap_or(cfg.model_b),
    );
    for (k, v) in a.vars.vars {
        arena.set_value(k, v);
    }
    let missing = unfilled(&arena.prompt().content, arena.values());
    if !missing.is_empty() {
        eprintln!("{} unfilled variables are sent as written: {}", "warning:".yellow(), missing.join(", "));
    }

    let gateway = Gateway::new(cfg.providers.clone(), cfg.timeout()).context("building HTTP client")?;
    let keys = store.api_keys().clone();
    let pb = ux::spinner("Generating...");
    match a.only.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("a") => arena.run_slot(Slot::A, &gateway, &keys).await,
        Some("b") => arena.run_slot(Slot::B, &gateway, &keys).await,
        _ => arena.run_both(&gateway, &keys).await,
    }
    pb.finish_and_clear();

    if let Some(r) = a.rate_a {
        arena.set_rating(Slot::A, r).map_err(anyhow::Error::msg)?;
    }
    if let Some(r) = a.rate_b {
        arena.set_rating(Slot::B, r).map_err(anyhow::Error::msg)?;
    }
    ux::print_arena_dashboard(&arena);

    for slot in [Slot::A, Slot::B] {
        if let Some(Err(e)) = &arena.slot(slot).output {
            if e.is_missing_key() {
                println!("Add a key with: promptfolio keys set --{} <KEY>", e.provider());
            }
        }
    }

    if a.save {
        let run = store.add_run(arena.to_new_run())?;
        println!("{} Run saved to history ({})", "✓".green(), run.id);
    }
    Ok(())
}

async fn cmd_keys(store: &mut FileStore, cfg: &Config, action: KeysAction) -> Result<()> {
    match action {
        KeysAction::Show => ux::show_keys(store.api_keys()),
        KeysAction::Set { openai, anthropic, gemini } => {
            let patch = ApiKeysPatch { openai, anthropic, gemini };
            if patch.is_empty() {
                bail!("nothing to set; pass --openai, --anthropic or --gemini");
            }
            store.set_api_keys(patch)?;
            println!("{} Keys saved.", "✓".green());
            ux::show_keys(store.api_keys());
        }
        KeysAction::Test { provider } => {
            let gateway = Gateway::new(cfg.providers.clone(), cfg.timeout()).context("building HTTP client")?;
            let pb = ux::spinner(&format!("Testing {}...", provider.label()));
            let res = gateway.run(provider, store.api_keys().get(provider), "Hello").await;
            pb.finish_and_clear();
            match res {
                Ok(_) => println!("{} {} key is working!", "✓".green(), provider.label()),
                Err(e) => println!("{} {}", "✗".red(), e),
            }
        }
    }
    Ok(())
}
