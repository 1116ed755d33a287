//! Integration test for a full page visit, with state carried to a reload.

use std::time::Duration;

use celebration::fireworks::{DrawCommand, FrameState, RecordingSurface};
use celebration::site::{
    AnswerOutcome, AudioSink, FileStore, MemoryStore, Question, SiteError, SiteResult,
};
use celebration::{Page, PageConfig, PageElements, PageError, PageEvent, Reaction};
use chrono::{DateTime, TimeZone, Utc};

fn temp_state_dir() -> std::path::PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("test_celebration_page_{id}"))
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 1, 18, 30, 0).unwrap()
}

fn questions() -> Vec<Question> {
    vec![
        Question {
            prompt: "first".into(),
            options: vec!["a".into(), "b".into()],
            answer: 0,
            reward: "one".into(),
        },
        Question {
            prompt: "second".into(),
            options: vec!["a".into(), "b".into()],
            answer: 1,
            reward: "two".into(),
        },
    ]
}

fn stateful_elements() -> PageElements<RecordingSurface> {
    PageElements {
        wish_board: true,
        questions: Some(questions()),
        ..Default::default()
    }
}

struct BlockedAudio;

impl AudioSink for BlockedAudio {
    fn play(&mut self) -> SiteResult<()> {
        Err(SiteError::Playback("no user gesture yet".into()))
    }

    fn pause(&mut self) {}
}

#[test]
fn test_state_survives_reload() {
    let dir = temp_state_dir();
    let config = PageConfig::default();

    {
        let store = FileStore::open(&dir).unwrap();
        let mut page = Page::setup_seeded(&config, stateful_elements(), store, 1).unwrap();
        page.handle(
            PageEvent::WishSubmitted {
                name: "阿明".into(),
                message: "生日快乐".into(),
            },
            &now(),
        )
        .unwrap();
        page.handle(PageEvent::AnswerChosen(0), &now()).unwrap();
    }

    let store = FileStore::open(&dir).unwrap();
    let mut page = Page::setup_seeded(&config, stateful_elements(), store, 1).unwrap();

    let board = page.wish_board().unwrap();
    assert_eq!(board.wishes().len(), 1);
    assert_eq!(board.wishes()[0].timestamp, now().timestamp_millis());

    // Progress restarts, stars don't.
    assert_eq!(page.game().unwrap().star_count(), 1);
    assert_eq!(
        page.handle(PageEvent::AnswerChosen(0), &now()).unwrap(),
        Reaction::Answer(AnswerOutcome::Correct {
            reward: "one".into(),
            newly_collected: false
        })
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_rapid_clicks_share_one_loop() {
    let config = PageConfig {
        intro_burst_ms: 0,
        ..Default::default()
    };
    let elements = PageElements {
        firework_surface: Some(RecordingSurface::new(800, 600)),
        firework_trigger: true,
        ..Default::default()
    };
    let mut page = Page::setup_seeded(&config, elements, MemoryStore::new(), 7).unwrap();

    for _ in 0..2 {
        let reaction = page
            .handle(PageEvent::FireworkClick { x: 100.0, y: 100.0 }, &now())
            .unwrap();
        assert_eq!(reaction, Reaction::FireworksLaunched);
    }
    assert_eq!(page.fireworks().session().active_count(), 160);

    let frame = Duration::from_millis(16);
    let mut last = FrameState::Idle;
    for _ in 0..config.fireworks.max_lifetime_frames() + 2 {
        let report = page.tick(frame, &now());
        if report.frame != FrameState::Idle {
            last = report.frame;
        }
    }

    assert_eq!(last, FrameState::Finished);
    assert_eq!(page.fireworks().session().stats().loops_started, 1);
    let surface = page.fireworks().surface().unwrap();
    assert_eq!(surface.last_command(), Some(&DrawCommand::Clear));
}

#[test]
fn test_refused_playback_is_reported() {
    let elements: PageElements<RecordingSurface> = PageElements {
        audio: Some(Box::new(BlockedAudio)),
        ..Default::default()
    };
    let mut page = Page::setup_seeded(&PageConfig::default(), elements, MemoryStore::new(), 1).unwrap();

    let err = page.handle(PageEvent::MusicToggled, &now()).unwrap_err();
    assert!(matches!(err, PageError::Site(SiteError::Playback(_))));
    assert_eq!(page.music_playing(), Some(false));
}

#[test]
fn test_invalid_questions_fail_setup() {
    let elements: PageElements<RecordingSurface> = PageElements {
        questions: Some(vec![Question {
            prompt: "broken".into(),
            options: Vec::new(),
            answer: 0,
            reward: "x".into(),
        }]),
        ..Default::default()
    };
    let result = Page::setup_seeded(&PageConfig::default(), elements, MemoryStore::new(), 1);
    assert!(matches!(result, Err(PageError::Site(SiteError::InvalidInput(_)))));
}
