//! Line-oriented front end: one command per line, plain-text scenes.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use auscult_core::Scene;
use auscult_core::model::TrainingTrack;
use services::{Advance, AudioPlayer, ChoiceOutcome, Simulator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    NextScene,
    PreviousScene,
    Goto(Scene),
    Stethoscope,
    ListenCase,
    ListenTraining(TrainingTrack, usize),
    /// One-based option number as typed.
    Choose(usize),
    Cross(usize),
    NextCase,
    PreviousCase,
    Highlighter,
    Highlight(usize),
    ClearHighlights,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseCommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    BadNumber(String),
    BadScene(String),
    BadTrack(String),
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCommandError::Empty => f.write_str("empty command"),
            ParseCommandError::Unknown(cmd) => write!(f, "unknown command: {cmd} (try `help`)"),
            ParseCommandError::MissingArgument(what) => write!(f, "missing {what}"),
            ParseCommandError::BadNumber(raw) => write!(f, "not a number: {raw}"),
            ParseCommandError::BadScene(raw) => write!(f, "no such scene: {raw}"),
            ParseCommandError::BadTrack(raw) => write!(f, "no such track: {raw} (adult|paeds)"),
        }
    }
}

fn number(raw: Option<&str>, what: &'static str) -> Result<usize, ParseCommandError> {
    let raw = raw.ok_or(ParseCommandError::MissingArgument(what))?;
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseCommandError::BadNumber(raw.to_string())),
    }
}

fn track(raw: &str) -> Result<TrainingTrack, ParseCommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "adult" => Ok(TrainingTrack::Adult),
        "paeds" | "peds" | "paediatric" => Ok(TrainingTrack::Paediatric),
        _ => Err(ParseCommandError::BadTrack(raw.to_string())),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ParseCommandError::Empty)?;
        let arg = words.next();

        let command = match (head.to_ascii_lowercase().as_str(), arg) {
            ("next" | "n", None) => Command::NextScene,
            ("back" | "b", None) => Command::PreviousScene,
            ("goto" | "g", Some(raw)) => Command::Goto(
                raw.parse()
                    .map_err(|_| ParseCommandError::BadScene(raw.to_string()))?,
            ),
            ("goto" | "g", None) => return Err(ParseCommandError::MissingArgument("scene")),
            ("steth" | "s", None) => Command::Stethoscope,
            ("listen" | "l", None) => Command::ListenCase,
            ("listen" | "l", Some(raw)) => {
                let track = track(raw)?;
                Command::ListenTraining(track, number(words.next(), "clip number")?)
            }
            ("choose" | "c", raw) => Command::Choose(number(raw, "option number")?),
            ("cross" | "x", raw) => Command::Cross(number(raw, "option number")?),
            ("case", Some("next")) => Command::NextCase,
            ("case", Some("prev")) => Command::PreviousCase,
            ("hl", None) => Command::Highlighter,
            ("hl", Some("clear")) => Command::ClearHighlights,
            ("hl", raw) => Command::Highlight(number(raw, "sentence number")?),
            ("show" | "progress", None) => Command::Show,
            ("help" | "?", None) => Command::Help,
            ("quit" | "q" | "exit", None) => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(line.trim().to_string())),
        };
        Ok(command)
    }
}

const HELP: &str = "\
commands:
  next | back | goto <scene>      move between scenes
  steth                           toggle the stethoscope
  listen                          play the current case (ward)
  listen <adult|paeds> <n>        play training clip n (skills lab)
  choose <n> | cross <n>          answer or cross out option n
  case next | case prev           move between cases
  hl | hl <n> | hl clear          highlighter mode, sentence n, clear
  show                            redraw the scene
  quit";

/// Drive `sim` from `input` until end of input or `quit`.
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails.
pub fn run<A, R, W>(sim: &mut Simulator<A>, input: R, mut out: W) -> io::Result<()>
where
    A: AudioPlayer,
    R: BufRead,
    W: Write,
{
    render(sim, &mut out)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => execute(sim, command, &mut out)?,
            Err(err) => writeln!(out, "{err}")?,
        }
    }
    Ok(())
}

/// Unwrap a simulator result, or print the error and finish the command.
macro_rules! or_report {
    ($out:expr, $result:expr) => {
        match $result {
            Ok(value) => value,
            Err(err) => return writeln!($out, "{err}"),
        }
    };
}

fn execute<A: AudioPlayer, W: Write>(
    sim: &mut Simulator<A>,
    command: Command,
    out: &mut W,
) -> io::Result<()> {
    let redraw = match command {
        Command::NextScene => sim.next_scene(),
        Command::PreviousScene => sim.previous_scene(),
        Command::Goto(scene) => {
            sim.goto(scene);
            true
        }
        Command::Stethoscope => {
            let on = sim.toggle_stethoscope();
            writeln!(out, "stethoscope {}", if on { "on" } else { "off" })?;
            false
        }
        Command::ListenCase => {
            or_report!(out, sim.listen_case());
            writeln!(out, "listening...")?;
            false
        }
        Command::ListenTraining(track, n) => {
            let clip = or_report!(out, sim.listen_training(track, n - 1));
            writeln!(out, "{}", clip.title())?;
            for finding in clip.findings() {
                writeln!(out, "  - {finding}")?;
            }
            false
        }
        Command::Choose(n) => {
            let Some(i) = option_index(sim, n) else {
                return report_missing(sim, "option", n, out);
            };
            let verdict = match or_report!(out, sim.choose(i)) {
                ChoiceOutcome::Ignored => "(no effect)",
                ChoiceOutcome::Correct { .. } => "correct",
                ChoiceOutcome::Wrong { .. } => "not quite",
            };
            writeln!(out, "{verdict}")?;
            true
        }
        Command::Cross(n) => {
            let Some(i) = option_index(sim, n) else {
                return report_missing(sim, "option", n, out);
            };
            or_report!(out, sim.eliminate(i));
            true
        }
        Command::NextCase => {
            if or_report!(out, sim.next_case()) == Advance::RoundComplete {
                writeln!(out, "round complete")?;
            }
            true
        }
        Command::PreviousCase => {
            or_report!(out, sim.previous_case());
            true
        }
        Command::Highlighter => {
            let on = or_report!(out, sim.toggle_highlighter());
            writeln!(out, "highlighter {}", if on { "on" } else { "off" })?;
            true
        }
        Command::Highlight(n) => {
            let Some(i) = sentence_index(sim, n) else {
                return report_missing(sim, "sentence", n, out);
            };
            or_report!(out, sim.highlight_sentence(i));
            true
        }
        Command::ClearHighlights => {
            or_report!(out, sim.clear_highlights());
            true
        }
        Command::Show => true,
        Command::Help => {
            writeln!(out, "{HELP}")?;
            false
        }
        Command::Quit => false,
    };

    if redraw { render(sim, out) } else { Ok(()) }
}

/// Zero-based display index for option `n`, if the ward has one.
fn option_index<A: AudioPlayer>(sim: &Simulator<A>, n: usize) -> Option<usize> {
    let round = sim.ward().ok()?;
    (n <= round.session().options().len()).then(|| n - 1)
}

/// Zero-based index for vignette sentence `n`, if the ward has one.
fn sentence_index<A: AudioPlayer>(sim: &Simulator<A>, n: usize) -> Option<usize> {
    let round = sim.ward().ok()?;
    (n <= round.sentences().len()).then(|| n - 1)
}

fn report_missing<A: AudioPlayer, W: Write>(
    sim: &Simulator<A>,
    what: &str,
    n: usize,
    out: &mut W,
) -> io::Result<()> {
    // Off the ward, the simulator's own error says why.
    match sim.ward() {
        Ok(_) => writeln!(out, "no {what} {n}"),
        Err(err) => writeln!(out, "{err}"),
    }
}

fn render<A: AudioPlayer, W: Write>(sim: &Simulator<A>, out: &mut W) -> io::Result<()> {
    let scene = sim.scene();
    writeln!(out)?;
    writeln!(out, "== {scene} ==")?;
    match scene {
        Scene::Intro => {
            writeln!(out, "Your shift starts in the skills lab, then the adult and paediatric wards.")?;
            writeln!(out, "Type `steth` to put on your stethoscope and `next` to begin.")?;
        }
        Scene::Skills => {
            for (label, track) in [("adult", TrainingTrack::Adult), ("paeds", TrainingTrack::Paediatric)] {
                writeln!(out, "{label} track:")?;
                for (i, clip) in sim.training_clips(track).iter().enumerate() {
                    writeln!(out, "  {}. {}", i + 1, clip.title())?;
                }
            }
        }
        Scene::Ward | Scene::Peds => render_ward(sim, out)?,
        Scene::Progress => {
            let report = sim.progress();
            for (label, summary) in [("Adult ward", &report.adult), ("Paeds ward", &report.paediatric)] {
                match summary {
                    Some(s) => writeln!(
                        out,
                        "{label}: {} ({} right, {} wrong, {} skipped)",
                        s.final_accuracy(),
                        s.first_attempt_correct(),
                        s.first_attempt_wrong(),
                        s.unanswered()
                    )?,
                    None => writeln!(out, "{label}: not completed")?,
                }
            }
            if let Some(combined) = report.combined {
                writeln!(out, "Overall: {combined}")?;
            }
        }
        Scene::Library => {
            for resource in sim.library() {
                writeln!(out, "[{}] {}", resource.category(), resource.title())?;
                writeln!(out, "    {}", resource.description())?;
            }
        }
        Scene::References => {
            for resource in sim.library() {
                writeln!(out, "{}. {}", resource.title(), resource.url())?;
            }
        }
    }
    Ok(())
}

fn render_ward<A: AudioPlayer, W: Write>(sim: &Simulator<A>, out: &mut W) -> io::Result<()> {
    let Ok(round) = sim.ward() else {
        return Ok(());
    };
    let session = round.session();
    let case = session.current_case();
    let progress = round.progress();

    writeln!(out, "{}  |  accuracy {}", progress.position_label(), progress.accuracy)?;
    writeln!(out, "{}: {}, {}{}", case.title(), case.patient_name(), case.age(), case.sex())?;
    for (i, sentence) in round.sentences().iter().enumerate() {
        let mark = if round.highlights().is_marked(i) { "*" } else { " " };
        writeln!(out, " {mark}{}. {sentence}", i + 1)?;
    }
    writeln!(out)?;
    for (i, option) in session.options().iter().enumerate() {
        let mark = if session.selected() == Some(i) {
            '>'
        } else if session.is_eliminated(i) {
            'x'
        } else {
            ' '
        };
        writeln!(out, " {mark} {}) {option}", i + 1)?;
    }
    if let Some(feedback) = &progress.feedback {
        let verdict = if progress.is_answered_correctly() {
            "Correct"
        } else {
            "Not quite"
        };
        writeln!(out)?;
        writeln!(out, "{verdict}: {feedback}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use auscult_core::Clock;
    use services::{RecordingAudioPlayer, SimulatorConfig};

    #[test]
    fn parses_commands() {
        assert_eq!("next".parse::<Command>().unwrap(), Command::NextScene);
        assert_eq!("goto peds".parse::<Command>().unwrap(), Command::Goto(Scene::Peds));
        assert_eq!(
            "listen paeds 3".parse::<Command>().unwrap(),
            Command::ListenTraining(TrainingTrack::Paediatric, 3)
        );
        assert_eq!("c 2".parse::<Command>().unwrap(), Command::Choose(2));
        assert_eq!("hl clear".parse::<Command>().unwrap(), Command::ClearHighlights);
        assert_eq!("hl 4".parse::<Command>().unwrap(), Command::Highlight(4));
        assert_eq!("case prev".parse::<Command>().unwrap(), Command::PreviousCase);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            "choose 0".parse::<Command>(),
            Err(ParseCommandError::BadNumber("0".into()))
        );
        assert_eq!(
            "choose".parse::<Command>(),
            Err(ParseCommandError::MissingArgument("option number"))
        );
        assert!(matches!(
            "goto moon".parse::<Command>(),
            Err(ParseCommandError::BadScene(_))
        ));
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(ParseCommandError::Unknown(_))
        ));
    }

    #[test]
    fn scripted_session_renders_ward() {
        let mut sim = Simulator::with_builtin_content(
            SimulatorConfig::new().with_shuffle_seed(Some(1)),
            Clock::system(),
            RecordingAudioPlayer::new(),
        )
        .unwrap();
        let script = "goto ward\nchoose 9\nlisten\nsteth\nlisten\nquit\nnext\n";
        let mut out = Vec::new();

        run(&mut sim, script.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("== Ward Round =="));
        assert!(text.contains("Case 1 of 8"));
        assert!(text.contains("no option 9"));
        assert!(text.contains("equip the stethoscope"));
        assert!(text.contains("listening..."));
        assert_eq!(sim.scene(), Scene::Ward);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn ward_simulator() -> Simulator<RecordingAudioPlayer> {
        let mut sim = Simulator::with_builtin_content(
            SimulatorConfig::new().with_shuffle_seed(Some(3)),
            Clock::system(),
            RecordingAudioPlayer::new(),
        )
        .unwrap();
        sim.goto(Scene::Ward);
        sim
    }

    #[test]
    fn write_failures_after_an_action_surface() {
        let mut sim = ward_simulator();
        sim.toggle_stethoscope();

        let err = execute(&mut sim, Command::ListenCase, &mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn highlight_outside_vignette_is_reported() {
        let mut sim = ward_simulator();
        let mut out = Vec::new();
        execute(&mut sim, Command::Highlighter, &mut out).unwrap();
        execute(&mut sim, Command::Highlight(99), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("no sentence 99"));
        assert_eq!(sim.ward().unwrap().highlights().marked().count(), 0);
    }

    #[test]
    fn answered_case_shows_verdict_with_feedback() {
        let mut sim = ward_simulator();
        let correct = sim.ward().unwrap().session().correct_display_index();
        let mut out = Vec::new();
        execute(&mut sim, Command::Choose(correct + 1), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Correct: "));
    }
}
