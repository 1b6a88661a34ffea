//! Huzzlingo - Entry Point
//!
//! Terminal front-end for the game core. It loads the config and catalog,
//! opens the on-disk store, and runs a small command loop for lessons,
//! stats and the chat challenge.

use huzzlingo::catalog::loader::load_catalog;
use huzzlingo::catalog::{LessonCatalog, Question};
use huzzlingo::core::calendar::SystemClock;
use huzzlingo::core::config::GameConfig;
use huzzlingo::core::error::Result;
use huzzlingo::core::types::LessonId;
use huzzlingo::game::Game;
use huzzlingo::llm::HttpReplyGenerator;
use huzzlingo::progress::stats::format_change;
use huzzlingo::progress::{LessonStatus, NextLesson};
use huzzlingo::quiz::{QuestionInput, TokenList};
use huzzlingo::storage::JsonFileStore;

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;

type TerminalGame = Game<JsonFileStore, SystemClock>;

/// Huzzlingo - practice conversations one lesson at a time
#[derive(Parser, Debug)]
#[command(name = "huzzlingo")]
#[command(about = "Conversation-practice lessons and a scored chat challenge")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for saved progress (overrides the config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed for the rule-based chat partner
    #[arg(long)]
    seed: Option<u64>,

    /// TOML lesson catalog replacing the built-in lessons
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huzzlingo=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = dir;
    }
    if let Some(seed) = args.seed {
        config.chat.rng_seed = seed;
    }

    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => LessonCatalog::builtin(),
    };

    // Reply futures are driven on this runtime
    let rt = Runtime::new()?;

    let store = JsonFileStore::open(&config.storage.data_dir)?;
    let mut game = Game::new(config, catalog, store, SystemClock);

    match HttpReplyGenerator::from_env() {
        Ok(generator) => game.set_reply_generator(Some(Box::new(generator))),
        Err(_) => tracing::warn!("LLM_API_KEY not set - chat uses rule-based replies only"),
    }

    println!("\n=== HUZZLINGO ===");
    println!("Level up your conversation game");
    println!();
    print_help();

    loop {
        game.tick();

        let Some(input) = read_line("> ")? else {
            break;
        };
        let mut parts = input.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "lessons" | "l" => print_lessons(&game),
            "stats" | "s" => print_stats(&game),
            "next" | "n" => match game.next_available_lesson() {
                NextLesson::Available(lesson) => {
                    let id = lesson.id.clone();
                    play_lesson(&mut game, &id)?;
                }
                NextLesson::AllComplete => {
                    println!("All lessons complete. Try the final boss with 'chat'.")
                }
                NextLesson::Blocked => println!("No lesson is unlocked yet."),
            },
            "play" | "p" => match parts.next() {
                Some(id) => play_lesson(&mut game, &LessonId::from(id))?,
                None => println!("Usage: play <lesson_id>"),
            },
            "retry" => match parts.next() {
                Some(id) => match game.retry_lesson(&LessonId::from(id)) {
                    Ok(()) => println!("Lesson {} reset.", id),
                    Err(e) => println!("{}", e),
                },
                None => println!("Usage: retry <lesson_id>"),
            },
            "chat" | "c" => run_chat(&mut game, &rt)?,
            "credits" => println!("Reply credits left: {}", game.credits_left()),
            "reset-credits" => {
                game.reset_credits();
                println!("Reply credits restored to {}", game.credits_left());
            }
            "freeze" => {
                game.add_streak_freeze();
                println!("Streak freezes: {}", game.streak().streak_freeze_count);
            }
            other => println!("Unknown command: {} (try 'help')", other),
        }
    }

    game.touch_last_active();
    tracing::info!("Huzzlingo shutting down");
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  lessons / l        - List lessons and their status");
    println!("  next / n           - Play the next unlocked lesson");
    println!("  play <id> / p      - Play a specific lesson");
    println!("  retry <id>         - Clear a lesson's answers");
    println!("  stats / s          - Show XP, level, streak and time spent");
    println!("  chat / c           - Start the final boss conversation");
    println!("  credits            - Show external reply credits");
    println!("  reset-credits      - Restore reply credits");
    println!("  freeze             - Add a streak freeze");
    println!("  quit / q           - Exit");
    println!();
}

/// Prompt and read one trimmed line; `None` on end of input
fn read_line(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn print_lessons(game: &TerminalGame) {
    for lesson in game.catalog().iter() {
        let status = match game.lessons().status(&lesson.id) {
            LessonStatus::NotStarted => " ",
            LessonStatus::InProgress => "~",
            LessonStatus::Completed => "x",
        };
        let summary = game.lessons().summary(lesson);
        println!(
            "[{}] {} {} {} ({}%)",
            status, lesson.id, lesson.icon, lesson.title, summary.progress
        );
    }
}

fn print_stats(game: &TerminalGame) {
    let stats = game.stats();
    println!(
        "Level {} {} - {} XP ({}), {:.0}% to next level",
        stats.level,
        stats.level_label,
        stats.formatted_xp(),
        format_change(stats.xp_percentage_change),
        stats.level_progress
    );
    println!(
        "Streak: {} days (best {}, {} freezes)",
        stats.current_streak, stats.longest_streak, stats.streak_freezes
    );
    println!(
        "Time spent: {} ({})",
        stats.formatted_time(),
        format_change(stats.time_spent_percentage_change)
    );
    println!(
        "Lessons: {}/{}",
        stats.lessons_completed, stats.lessons_total
    );
    if let Some(score) = stats.last_huzzlingo_score {
        println!("Last Huzzlingo score: {}", score);
    }
}

fn play_lesson(game: &mut TerminalGame, lesson_id: &LessonId) -> Result<()> {
    let mut run = match game.start_lesson(lesson_id) {
        Ok(run) => run,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    while let Some(question) = game.current_question(&run).cloned() {
        println!();
        println!("Question {}/{}: {}", run.index() + 1, run.total(), question.prompt());

        let mut input = QuestionInput::for_question(&question);
        let answer = loop {
            if !ask(&mut input)? {
                return Ok(());
            }
            if let Some(answer) = input.answer() {
                break answer;
            }
        };

        let feedback = game.submit_answer(&mut run, &answer)?;
        if feedback.is_correct {
            println!("Correct! {}", feedback.explanation);
        } else {
            if let Question::MultipleChoice(q) = &question {
                println!("Not quite. The answer was: {}", q.correct_answer);
            }
            println!("{}", feedback.explanation);
        }

        if let Some(report) = feedback.finished {
            println!();
            println!(
                "Lesson complete: {}/{} correct ({}%), +{} XP",
                report.correct, report.total, report.score, report.xp_gained
            );
            if report.leveled_up() {
                println!("Level up! You reached level {}", report.level_after);
            }
            println!("Streak: {} days", report.streak);
        }
    }
    Ok(())
}

/// Collect input for one question; `false` if the learner left
fn ask(input: &mut QuestionInput) -> Result<bool> {
    match input {
        QuestionInput::Choice(picker) => {
            for (i, option) in picker.options().iter().enumerate() {
                println!("  {}. {}", i + 1, option);
            }
            let Some(line) = read_line("answer> ")? else {
                return Ok(false);
            };
            match line.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if picker.select_index(n - 1).is_none() {
                        println!("Pick a number from the list.");
                    }
                }
                _ => println!("Pick a number from the list."),
            }
        }
        QuestionInput::Reorder(board) => {
            board.reset();
            for (i, word) in board.available().iter().enumerate() {
                println!("  {}. {}", i + 1, word);
            }
            println!("Enter the numbers in order, separated by spaces.");
            let Some(line) = read_line("order> ")? else {
                return Ok(false);
            };
            let picks: Vec<String> = line
                .split_whitespace()
                .filter_map(|n| n.parse::<usize>().ok())
                .filter_map(|n| board.available().get(n.wrapping_sub(1)).cloned())
                .collect();
            for word in picks {
                let Some(index) = board.available().iter().position(|w| *w == word) else {
                    continue;
                };
                board.begin_drag(&word, TokenList::Available, index)?;
                board.commit_drop(TokenList::Answer)?;
            }
            println!("Your order: {}", board.answer().join(" "));
        }
    }
    Ok(true)
}

fn run_chat(game: &mut TerminalGame, rt: &Runtime) -> Result<()> {
    game.reset_chat();
    println!();
    println!("=== FINAL BOSS ===");
    if let Some(welcome) = game.chat().messages().first() {
        println!("Sarah: {}", welcome.text);
    }
    println!("(type /leave to walk away)");

    loop {
        let label = format!("[{} left] you> ", game.chat().messages_left());
        let Some(line) = read_line(&label)? else {
            return Ok(());
        };
        if line == "/leave" {
            return Ok(());
        }

        let result = match rt.block_on(game.send_chat_message(&line)) {
            Ok(result) => result,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        println!("Sarah: {}", result.reply);
        println!(
            "  interest {} | smoothness {} | {:?}",
            result.analysis.interest, result.analysis.smoothness, result.analysis.tone
        );

        if let Some(outcome) = result.outcome {
            println!("Sarah: {}", outcome.closing_line);
            println!();
            println!("Huzzlingo score: {}", outcome.composite_score);
            return Ok(());
        }
    }
}
