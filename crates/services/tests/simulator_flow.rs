use auscult_core::model::{RoundKind, TrainingTrack};
use auscult_core::time::fixed_now;
use auscult_core::{Accuracy, Clock, Scene};
use services::{
    Advance, AudioEvent, ListenError, RecordingAudioPlayer, RoundError, Simulator,
    SimulatorConfig, SimulatorError,
};

fn simulator() -> Simulator<RecordingAudioPlayer> {
    Simulator::with_builtin_content(
        SimulatorConfig::new().with_shuffle_seed(Some(2024)),
        Clock::fixed(fixed_now()),
        RecordingAudioPlayer::new(),
    )
    .unwrap()
}

fn answer_correctly(sim: &mut Simulator<RecordingAudioPlayer>) {
    let correct = sim.ward().unwrap().session().correct_display_index();
    sim.choose(correct).unwrap();
}

fn answer_wrongly(sim: &mut Simulator<RecordingAudioPlayer>) {
    let session = sim.ward().unwrap().session();
    let wrong = (session.correct_display_index() + 1) % session.options().len();
    sim.choose(wrong).unwrap();
}

/// Answer every case with `answer` and step past the last one.
fn finish_round(
    sim: &mut Simulator<RecordingAudioPlayer>,
    answer: fn(&mut Simulator<RecordingAudioPlayer>),
) {
    loop {
        answer(sim);
        if sim.next_case().unwrap() == Advance::RoundComplete {
            break;
        }
    }
}

#[test]
fn scene_changes_stop_audio_before_moving() {
    let mut sim = simulator();
    assert!(sim.next_scene());
    assert_eq!(sim.scene(), Scene::Skills);
    assert_eq!(sim.audio().events(), &[AudioEvent::Stop]);

    assert!(sim.previous_scene());
    assert!(!sim.previous_scene());
    assert_eq!(sim.audio().stop_count(), 3);
    assert_eq!(sim.scene(), Scene::Intro);
}

#[test]
fn listening_requires_the_stethoscope() {
    let mut sim = simulator();
    sim.goto(Scene::Ward);

    let err = sim.listen_case().unwrap_err();
    assert!(matches!(
        err,
        SimulatorError::Listen(ListenError::StethoscopeOff)
    ));

    assert!(sim.toggle_stethoscope());
    sim.listen_case().unwrap();
    assert!(matches!(sim.audio().last(), Some(AudioEvent::Play(_))));
}

#[test]
fn training_clips_only_play_in_skills_lab() {
    let mut sim = simulator();
    sim.toggle_stethoscope();
    let err = sim
        .listen_training(TrainingTrack::Paediatric, 0)
        .unwrap_err();
    assert!(matches!(
        err,
        SimulatorError::NotInSkillsLab {
            scene: Scene::Intro
        }
    ));

    sim.goto(Scene::Skills);
    let clip = sim.listen_training(TrainingTrack::Paediatric, 8).unwrap();
    assert!(!clip.findings().is_empty());
}

#[test]
fn ward_actions_fail_off_ward() {
    let mut sim = simulator();
    sim.goto(Scene::Library);

    assert!(matches!(
        sim.choose(0),
        Err(SimulatorError::NotOnWard {
            scene: Scene::Library
        })
    ));
    assert!(sim.eliminate(0).is_err());
    assert!(sim.next_case().is_err());
    assert!(sim.previous_case().is_err());
    assert!(sim.toggle_highlighter().is_err());
    assert!(sim.highlight_sentence(0).is_err());
    assert!(sim.clear_highlights().is_err());
}

#[test]
fn leaving_the_ward_discards_the_round() {
    let mut sim = simulator();
    sim.goto(Scene::Ward);
    answer_wrongly(&mut sim);
    assert_eq!(sim.ward().unwrap().accuracy().value(), 94);

    sim.goto(Scene::Intro);
    sim.goto(Scene::Ward);
    assert_eq!(sim.ward().unwrap().accuracy(), Accuracy::FULL);
    assert_eq!(sim.ward().unwrap().session().current_index(), 0);
}

#[test]
fn case_without_recording_reports_no_audio() {
    let mut sim = simulator();
    sim.goto(Scene::Ward);
    sim.toggle_stethoscope();
    while !sim.ward().unwrap().session().is_last() {
        sim.next_case().unwrap();
    }

    let err = sim.listen_case().unwrap_err();
    assert!(matches!(
        err,
        SimulatorError::Listen(ListenError::NoAudio { .. })
    ));
}

#[test]
fn completed_rounds_advance_and_feed_progress() {
    let mut sim = simulator();
    sim.goto(Scene::Ward);
    finish_round(&mut sim, answer_correctly);

    assert_eq!(sim.scene(), Scene::Peds);
    assert_eq!(sim.ward().unwrap().session().deck().kind(), RoundKind::Paediatric);
    let report = sim.progress();
    assert_eq!(report.adult.as_ref().unwrap().final_accuracy(), Accuracy::FULL);
    assert!(report.paediatric.is_none());
    assert!(report.combined.is_none());

    finish_round(&mut sim, answer_wrongly);

    assert_eq!(sim.scene(), Scene::Progress);
    assert!(sim.ward().is_err());
    let report = sim.progress();
    let paeds = report.paediatric.unwrap();
    assert_eq!(paeds.final_accuracy().value(), 46);
    assert_eq!(paeds.first_attempt_wrong(), 9);
    assert_eq!(report.combined.unwrap().value(), 73);
    assert_eq!(sim.completed_rounds().len(), 2);
}

#[test]
fn highlighting_past_the_vignette_is_refused() {
    let mut sim = simulator();
    sim.goto(Scene::Ward);
    sim.toggle_highlighter().unwrap();
    let count = sim.ward().unwrap().sentences().len();

    let err = sim.highlight_sentence(count).unwrap_err();
    assert!(matches!(
        err,
        SimulatorError::Round(RoundError::NoSuchSentence { .. })
    ));
    assert_eq!(sim.ward().unwrap().highlights().marked().count(), 0);
    assert!(sim.highlight_sentence(0).unwrap());
}
