use clap::{Parser, Subcommand};
use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use kulitan_core::core::types::{Category, Rarity, WordTransliteration};
use kulitan_core::lexicon::Direction;
use kulitan_core::persistence::{save_to_disk, TableSnapshot};
use kulitan_core::recognition::{Prediction, RecognitionOutcome};
use kulitan_core::{KulitanConfig, KulitanEngine};
use std::io::{self, stdin, stdout, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kulitan", about = "Kulitan script transliteration and lookup")]
struct Cli {
    /// TOML config file (embedded defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Segment text into Kulitan syllables
    Translate {
        text: Vec<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Live transliteration while typing
    Interactive,
    /// Browse the character table
    Chars {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        rarity: Option<String>,
    },
    /// Show the detail page of one character
    Show { name: String },
    /// Translate whole words with the lexicon
    Dict {
        text: Vec<String>,
        #[arg(short, long, default_value = "english-to-kulitan")]
        direction: String,
    },
    /// Pick random lexicon words to practice
    Practice {
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },
    /// Grade a handwriting classifier reply against a character
    Check {
        name: String,
        /// Raw JSON returned by the classifier
        response: String,
    },
    /// Write the loaded tables to a snapshot file
    Compile { out: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = KulitanConfig::load_or_default(cli.config.as_deref())?;
    init_tracing(&config.log_filter);
    let engine = KulitanEngine::from_config(&config)?;

    match cli.command {
        Command::Translate { text, json } => {
            let phrase = engine.transliterate_phrase(&text.join(" "));
            if json {
                println!("{}", serde_json::to_string_pretty(&phrase)?);
            } else {
                for word in &phrase.words {
                    print_word(word);
                }
                println!(
                    "\n{} translatable, {} not translatable",
                    phrase.translatable_words.to_string().green(),
                    phrase.untranslatable_words.to_string().yellow()
                );
            }
        }
        Command::Interactive => interactive(&engine)?,
        Command::Chars { search, category, rarity } => {
            let category = category
                .map(|c| Category::from_label(&c).ok_or(format!("unknown category: {c}")))
                .transpose()?;
            let rarity = rarity
                .map(|r| Rarity::from_label(&r).ok_or(format!("unknown rarity: {r}")))
                .transpose()?;
            let hits = engine.characters().filter(&search, rarity, category);
            for entry in &hits {
                println!(
                    "{:>3}  {:<4} {:<8} {:<18} {}",
                    entry.id,
                    entry.character,
                    entry.name.clone().bold(),
                    entry.category.to_string(),
                    entry.rarity
                );
            }
            println!("\n{} of {} characters", hits.len(), engine.characters().len());
        }
        Command::Show { name } => {
            let entry = engine
                .characters()
                .find_by_name(&name)
                .ok_or(format!("no character named {name:?}"))?;
            println!("{}  {}", entry.character, entry.name.clone().bold());
            println!("Pronunciation: {}", entry.pronunciation);
            println!("Category: {}  Rarity: {}", entry.category, entry.rarity);
            if !entry.kind.is_empty() {
                println!("Type: {}", entry.kind);
            }
            if !entry.sound_description.is_empty() {
                println!("Sound: {}", entry.sound_description);
            }
            println!("\n{}", entry.description);
            print_list("Uses", &entry.uses);
            print_list("Characteristics", &entry.characteristics);
            if !entry.learning_tips.is_empty() {
                println!("\nTip: {}", entry.learning_tips);
            }
            if let Some(how) = &entry.writing_instructions {
                println!("Writing: {how}");
            }
            if !entry.combinations.is_empty() {
                println!("Combinations: {}", entry.combinations.join(", "));
            }
        }
        Command::Dict { text, direction } => {
            let direction: Direction = direction.parse()?;
            for r in engine.lexicon().translate_text(&text.join(" "), direction) {
                let mark = if r.is_translatable { "✓".green() } else { "✗".red() };
                println!("{mark} {} -> {}", r.original_word, r.translated_word);
            }
        }
        Command::Practice { count } => {
            for word in engine.lexicon().random_words(count) {
                println!("{}  {}  ({})", word.kulitan, word.english.clone().bold(), word.pronunciation);
            }
        }
        Command::Check { name, response } => {
            let value: serde_json::Value = serde_json::from_str(&response)?;
            match Prediction::from_json(&value) {
                RecognitionOutcome::Failed(msg) => {
                    println!("{} {msg}", "Recognition Failed:".red().bold());
                }
                RecognitionOutcome::Predicted(prediction) => {
                    let verdict = engine.check_drawing(&name, &prediction)?;
                    if verdict.correct {
                        println!("{} {}", "Great Job!".green().bold(), verdict.message());
                    } else {
                        println!("{} {}", "Keep Practicing!".yellow().bold(), verdict.message());
                    }
                    if let Some(pct) = verdict.confidence_percent() {
                        println!("Confidence: {pct}");
                    }
                }
            }
        }
        Command::Compile { out } => {
            let snapshot = TableSnapshot::capture(engine.characters(), engine.patterns(), engine.lexicon());
            save_to_disk(&snapshot, &out)?;
            println!("Snapshot written to '{}'", out.display());
        }
    }
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_word(word: &WordTransliteration) {
    let status = if word.translatable { "translatable".green() } else { "no match".yellow() };
    println!("{} ({}/{}, {})", word.word.clone().bold(), word.resolved, word.total, status);
    for token in &word.tokens {
        match &token.character {
            Some(c) => println!("  {:<6} {:<4} {}", token.syllable, c.character, c.name),
            None => println!("  {:<6} {}", token.syllable, "?".dark_grey()),
        }
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}:");
    for item in items {
        println!("  - {item}");
    }
}

fn interactive(engine: &KulitanEngine) -> io::Result<()> {
    let mut preedit = String::new();

    loop {
        print_ui(&preedit, engine)?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim_end_matches(['\n', '\r']);

        match cmd.trim() {
            "exit" => break,
            "" => preedit.clear(),
            ":back" => {
                preedit.pop();
            }
            _ => preedit.push_str(cmd),
        }
    }
    Ok(())
}

fn print_ui(preedit: &str, engine: &KulitanEngine) -> io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    println!("{}", "Kulitan Transliterator".bold());
    println!("---------------------------------------------------------------");
    println!("Type text to append, [Enter] on an empty line to clear.");
    println!("':back' deletes one character, 'exit' quits.\n");

    println!("Pre-edit: [{preedit}]\n");
    let phrase = engine.transliterate_phrase(preedit);
    if phrase.words.is_empty() {
        println!("Nothing to transliterate yet.");
    } else {
        let glyphs: Vec<String> = phrase
            .words
            .iter()
            .map(|w| {
                w.tokens
                    .iter()
                    .map(|t| t.character.as_ref().map_or("□", |c| c.character.as_str()))
                    .collect::<String>()
            })
            .collect();
        println!("Kulitan -> {}\n", glyphs.join(" "));
        for word in &phrase.words {
            print_word(word);
        }
        println!(
            "\n{} translatable, {} not translatable",
            phrase.translatable_words, phrase.untranslatable_words
        );
    }
    print!("\n> ");
    out.flush()
}
