use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use transcript_tracer_core::alignment::domain::transcript::{words_from_text, TranscriptWord};
use transcript_tracer_core::pipeline::alignment_registry::{MediaId, TranscriptId};
use transcript_tracer_core::pipeline::tracer_session::{HighlightDirective, TracerSession};
use transcript_tracer_core::playback::domain::transition::{AutoScroll, ScrollTarget};
use transcript_tracer_core::shared::constants::DEFAULT_TICK_INTERVAL;
use transcript_tracer_core::shared::options::TracerOptions;

/// Align a transcript to WebVTT captions and trace highlighting during playback.
#[derive(Parser)]
#[command(name = "transcript-tracer")]
struct Cli {
    /// WebVTT caption file.
    captions: PathBuf,

    /// Plain-text transcript. Blank lines separate paragraphs.
    transcript: PathBuf,

    /// JSON options file (defaults to the per-user options file).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Caption words to look ahead when matching a transcript word.
    #[arg(long)]
    fuzziness: Option<usize>,

    /// Seconds subtracted from the playback clock before matching.
    #[arg(long, allow_hyphen_values = true)]
    time_offset: Option<f64>,

    /// Auto-scroll scope: off, block, phrase, word.
    #[arg(long)]
    auto_scroll: Option<String>,

    /// Group words by transcript paragraphs and lines instead of caption cues.
    #[arg(long)]
    transcript_structure: bool,

    /// Simulated playback clock step in seconds.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL)]
    step: f64,

    /// Print directives as JSON lines.
    #[arg(long)]
    json: bool,

    /// Print the seek time for the transcript word at this position and exit.
    #[arg(long)]
    seek_word: Option<usize>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let options = build_options(&cli)?;
    let caption_text = fs::read_to_string(&cli.captions)?;
    let transcript_text = fs::read_to_string(&cli.transcript)?;
    let with_containers = options.block_selector.is_some() || options.phrase_selector.is_some();
    let words = words_from_text(&transcript_text, with_containers);

    let media = MediaId(cli.captions.display().to_string());
    let transcript = TranscriptId(0);
    let mut session = TracerSession::new(options);
    let summary = session.link(transcript, media.clone(), &words, &caption_text)?;
    log::info!(
        "Aligned {}/{} transcript words against {} caption words ({} gaps)",
        summary.matched_words,
        summary.transcript_words,
        summary.caption_words,
        summary.gaps()
    );

    if let Some(position) = cli.seek_word {
        match session.seek_time_for_word(transcript, position) {
            Some(seconds) => println!("{seconds:.3}"),
            None => return Err(format!("Transcript word {position} has no caption timing").into()),
        }
        return Ok(());
    }

    session.activate(media.clone());
    let end = session
        .linked(&media)
        .and_then(|l| l.events().last())
        .map(|e| e.seconds)
        .unwrap_or(0.0)
        + session.options().time_offset
        + cli.step;

    let mut tick = 0u64;
    loop {
        let time = tick as f64 * cli.step;
        if time > end {
            break;
        }
        if let Some(directive) = session.tick(&media, time) {
            if cli.json {
                let line = serde_json::json!({ "time": time, "directive": directive });
                println!("{line}");
            } else {
                println!("{}", describe(time, &directive, &words));
            }
        }
        tick += 1;
    }

    Ok(())
}

fn build_options(cli: &Cli) -> Result<TracerOptions, Box<dyn std::error::Error>> {
    let mut options = match &cli.config {
        Some(path) => TracerOptions::load(path)?,
        None => TracerOptions::load_default(),
    };
    if let Some(fuzziness) = cli.fuzziness {
        options.alignment_fuzziness = fuzziness;
    }
    if let Some(offset) = cli.time_offset {
        options.time_offset = offset;
    }
    if let Some(scroll) = &cli.auto_scroll {
        options.auto_scroll = scroll.parse::<AutoScroll>()?;
    }
    if cli.transcript_structure {
        options.block_selector = Some("paragraph".to_string());
        options.phrase_selector = Some("line".to_string());
    }
    if cli.seek_word.is_some() {
        options.clickable = true;
    }
    Ok(options)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.captions.exists() {
        return Err(format!("Caption file not found: {}", cli.captions.display()).into());
    }
    if !cli.transcript.exists() {
        return Err(format!("Transcript file not found: {}", cli.transcript.display()).into());
    }
    if !(cli.step.is_finite() && cli.step > 0.0) {
        return Err(format!("Step must be a positive number of seconds, got {}", cli.step).into());
    }
    if let Some(offset) = cli.time_offset {
        if !offset.is_finite() {
            return Err(format!("Time offset must be finite, got {offset}").into());
        }
    }
    Ok(())
}

fn describe(time: f64, directive: &HighlightDirective, words: &[TranscriptWord]) -> String {
    let transition = &directive.transition;
    if transition.is_clear() {
        return format!("{time:8.2}s  (cleared)");
    }

    let current: Vec<&str> = directive
        .current_positions
        .iter()
        .filter_map(|&p| words.get(p).map(|w| w.text.as_str()))
        .collect();
    let mut line = format!(
        "{time:8.2}s  block {}  phrase {}  spoken {}  \"{}\"",
        region(transition.block_index, transition.block_changed),
        region(transition.phrase_index, transition.phrase_changed),
        position(directive.spoken_before),
        current.join(" ")
    );
    if let Some(target) = transition.scroll {
        line.push_str(&match target {
            ScrollTarget::Block(i) => format!("  scroll->block {i}"),
            ScrollTarget::Phrase(i) => format!("  scroll->phrase {i}"),
            ScrollTarget::Word(i) => format!("  scroll->word {i}"),
        });
    }
    line
}

fn region(index: Option<usize>, changed: bool) -> String {
    match (index, changed) {
        (Some(i), true) => format!("{i}*"),
        _ => position(index),
    }
}

fn position(index: Option<usize>) -> String {
    index.map_or_else(|| "-".to_string(), |i| i.to_string())
}
