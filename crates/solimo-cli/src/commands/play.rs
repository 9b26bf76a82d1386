//! Text-mode session runner.
//!
//! Answers come either from `--answers` (a string of `c`/`w`) or
//! interactively from stdin. Narration is printed instead of spoken.

use std::io::{BufRead, Write};

use clap::Args;
use solimo_core::feedback::{welcome_message, COMPLETION_MESSAGE};
use solimo_core::{
    ActivityId, Config, ContentCatalog, FeedbackKind, FeedbackPicker, GatedNarrator, Narrator,
    Outcome, Prompt, VoiceSettings,
};

use tracing::debug;

use super::open_app;

#[derive(Args)]
pub struct PlayArgs {
    /// Activity to play (defaults to today's)
    #[arg(long)]
    activity: Option<ActivityId>,
    /// Scripted answers, e.g. "ccwccc" (c = correct, w = wrong)
    #[arg(long)]
    answers: Option<String>,
    /// Seed for message and question selection
    #[arg(long)]
    seed: Option<u64>,
    /// Play even if today's activity is already done
    #[arg(long)]
    again: bool,
}

/// Prints narration to stdout.
struct ConsoleNarrator;

impl Narrator for ConsoleNarrator {
    fn speak(
        &self,
        text: &str,
        _voice: VoiceSettings,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "🔊 {text}")?;
        Ok(())
    }
}

/// Where the next answer comes from.
enum AnswerSource {
    Scripted(std::vec::IntoIter<Outcome>),
    Interactive,
}

fn parse_script(script: &str) -> Result<Vec<Outcome>, String> {
    script
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_lowercase() {
            'c' => Ok(Outcome::Correct),
            'w' => Ok(Outcome::Wrong),
            other => Err(format!("invalid answer '{other}' (use c or w)")),
        })
        .collect()
}

fn label_for(prompt: Option<&Prompt>, outcome: Outcome, fallback: &str) -> String {
    let Some(prompt) = prompt else {
        return fallback.to_string();
    };
    let want_correct = outcome == Outcome::Correct;
    prompt
        .options
        .iter()
        .find(|opt| opt.correct == want_correct)
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| fallback.to_string())
}

fn read_line() -> Result<Option<String>, std::io::Error> {
    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    Ok((read > 0).then(|| line.trim().to_string()))
}

/// Ask one question on stdin. `None` means end of input.
/// Outcome plus the label the child picked, if any.
type Answer = (Outcome, Option<String>);

fn ask(prompt: Option<&Prompt>) -> Result<Option<Answer>, Box<dyn std::error::Error>> {
    match prompt {
        Some(prompt) => {
            println!("{}", prompt.instruction);
            for (idx, opt) in prompt.options.iter().enumerate() {
                println!("  {}) {}", idx + 1, opt.label);
            }
            print!("> ");
            std::io::stdout().flush()?;
            let Some(line) = read_line()? else {
                return Ok(None);
            };
            let chosen = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| prompt.options.get(idx));
            Ok(Some(match chosen {
                Some(opt) if opt.correct => (Outcome::Correct, Some(opt.label.clone())),
                Some(opt) => (Outcome::Wrong, Some(opt.label.clone())),
                None => (Outcome::Wrong, None),
            }))
        }
        None => {
            print!("Answer correct? [c/w] > ");
            std::io::stdout().flush()?;
            let Some(line) = read_line()? else {
                return Ok(None);
            };
            let outcome = parse_script(&line)?
                .into_iter()
                .next()
                .unwrap_or(Outcome::Wrong);
            Ok(Some((outcome, None)))
        }
    }
}

pub async fn run(args: PlayArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(config)?;
    let activity = args
        .activity
        .unwrap_or_else(|| app.scheduler().todays_activity_id());

    if !args.again && app.tracker().is_completed_today().await? {
        println!("Today's activity is already done. See you tomorrow!");
        return Ok(());
    }

    let narrator = GatedNarrator::new(ConsoleNarrator, app.preferences().sound_enabled().await?);
    let mut picker = FeedbackPicker::new(args.seed.or(config.feedback.seed));
    let catalog = ContentCatalog::builtin();

    let mut source = match args.answers.as_deref() {
        Some(script) => AnswerSource::Scripted(parse_script(script)?.into_iter()),
        None => AnswerSource::Interactive,
    };

    let mut session = app.start_session(activity).await?;
    debug!(%activity, level = %session.level(), "session started");
    narrator.say(&welcome_message(activity), VoiceSettings::WELCOME);

    while !session.is_complete() {
        let prompt = catalog.random_prompt(
            activity,
            session.age_band(),
            session.level(),
            picker.rng(),
        );

        let (outcome, picked) = match &mut source {
            AnswerSource::Scripted(answers) => match answers.next() {
                Some(outcome) => (outcome, None),
                None => break,
            },
            AnswerSource::Interactive => match ask(prompt)? {
                Some(answer) => answer,
                None => break,
            },
        };

        let report = session.answer(outcome).await?;
        let label = picked.unwrap_or_else(|| label_for(prompt, outcome, activity.display_name()));
        let kind = match outcome {
            Outcome::Correct => FeedbackKind::Success,
            Outcome::Wrong => FeedbackKind::Retry,
        };
        narrator.say(&picker.message(kind, &label), kind.voice());

        if let Some(change) = report.level_change {
            let direction = if change.to > change.from { "up" } else { "down" };
            println!("Level {direction}: {} -> {}", change.from, change.to);
        }
        println!(
            "Correct: {}/{}  streak {}/{}",
            report.correct_count,
            app.settings().correct_answers_to_complete,
            report.progress.count,
            report.progress.target
        );
    }

    narrator.stop();
    let summary = session.summary();
    if summary.completed {
        narrator.say(COMPLETION_MESSAGE, VoiceSettings::SUCCESS);
        println!(
            "You got {} out of {} correct! Great job! See you tomorrow!",
            summary.correct, summary.attempts
        );
    } else {
        println!(
            "Stopped after {} answers ({} correct). Level {}.",
            summary.attempts, summary.correct, summary.level
        );
    }
    Ok(())
}
