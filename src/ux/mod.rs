use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

use crate::arena::{Arena, Slot};
use crate::library::FolderCount;
use crate::model::{ApiKeys, Folder, Prompt, Run};
use crate::provider::ProviderKind;
use crate::template::{self, Segment};

pub fn show_prompts(prompts: &[&Prompt], folders: &[Folder]) {
    if prompts.is_empty() {
        println!("No prompts found. Try adjusting your search or create a new prompt.");
        return;
    }
    for p in prompts {
        let folder = p
            .folder_id
            .as_deref()
            .and_then(|id| folders.iter().find(|f| f.id == id))
            .map(|f| f.name.as_str())
            .unwrap_or("Uncategorized");
        println!(
            "{}  {}  {}  {}",
            p.id.dimmed(),
            p.title.bold(),
            format!("[{}]", p.platform).cyan(),
            folder.dimmed()
        );
        if !p.tags.is_empty() {
            println!("    {}", p.tags.iter().map(|t| format!("#{t}")).collect::<Vec<_>>().join(" ").magenta());
        }
    }
}

pub fn show_prompt(p: &Prompt, folder: Option<&Folder>) {
    println!("\n=== {} ===", p.title.bold());
    println!("id:        {}", p.id);
    println!("platform:  {}", p.platform);
    println!("folder:    {}", folder.map(|f| f.name.as_str()).unwrap_or("Uncategorized"));
    if let Some(c) = &p.color {
        println!("color:     {}", c);
    }
    if !p.tags.is_empty() {
        println!("tags:      {}", p.tags.join(", "));
    }
    println!("created:   {}", p.created_at.format("%Y-%m-%d %H:%M"));
    println!("\n{}\n", p.content);
    let vars = template::detect_variables(&p.content);
    if vars.is_empty() {
        println!("{}", "(no variables)".dimmed());
    } else {
        println!("{} {}", "Detected variables:".bold(), vars.join(", ").yellow());
    }
    println!();
}

/// Filled placeholders show their value, unfilled ones their name.
pub fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| match s {
            Segment::Text(t) => t.normal().to_string(),
            Segment::Placeholder { value: Some(v), .. } => v.green().bold().to_string(),
            Segment::Placeholder { name, value: None, .. } => name.dimmed().underline().to_string(),
        })
        .collect()
}

pub fn show_folders(counts: &[FolderCount]) {
    for c in counts {
        let id = c.id.as_deref().unwrap_or("-");
        println!("{}  {}  ({})", id.dimmed(), c.name.bold(), c.prompts);
    }
}

pub fn show_runs(runs: &[Run]) {
    if runs.is_empty() {
        println!("No saved runs yet.");
        return;
    }
    for r in runs {
        println!(
            "{}  {}  {}",
            r.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            r.prompt_title.bold(),
            r.id.dimmed()
        );
        for (label, out) in [("A", &r.outputs.model_a), ("B", &r.outputs.model_b)] {
            let rating = out.rating.map(stars).unwrap_or_else(|| "unrated".into());
            println!("    {} {:<8} {}  {} chars", label, out.name, rating.yellow(), out.content.chars().count());
        }
    }
}

fn stars(rating: u8) -> String {
    let r = rating.min(5) as usize;
    format!("{}{}", "★".repeat(r), "☆".repeat(5 - r))
}

/// Show only the last four characters of each key.
pub fn show_keys(keys: &ApiKeys) {
    for kind in ProviderKind::ALL {
        let k = keys.get(kind);
        let shown = if k.is_empty() {
            "(not set)".dimmed().to_string()
        } else {
            let tail: String = k.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            format!("••••{}", tail).green().to_string()
        };
        println!("{:<10} {}", kind.label().bold(), shown);
    }
}

pub fn print_arena_dashboard(arena: &Arena) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━━━━ Arena ━━━━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    println!("  {}", arena.prompt().title.bold());
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());
    println!("\n{}", render_segments(&arena.preview()));

    for slot in [Slot::A, Slot::B] {
        let s = arena.slot(slot);
        let rating = s.rating.map(stars).unwrap_or_default();
        println!(
            "\n{} {} {}",
            format!("[{}]", slot).cyan().bold(),
            s.provider.display_name().bold(),
            rating.yellow()
        );
        match &s.output {
            None => println!("{}", "(not run)".dimmed()),
            Some(Ok(text)) => println!("{}", indent(text, 2)),
            Some(Err(e)) => println!("{}", indent(&format!("Error: {e}"), 2).red()),
        }
    }
    println!();
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    let _ = io::stdout().flush();
    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        let ans = s.trim().to_lowercase();
        ans == "y" || ans == "yes"
    } else {
        false
    }
}

fn indent(s: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    s.lines()
        .map(|l| format!("{}{}", pad, l))
        .collect::<Vec<_>>()
        .join("\n")
}
