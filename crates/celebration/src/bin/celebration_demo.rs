//! # Celebration Demo
//!
//! Headless run of a scripted visit: the intro burst, a few clicks on the
//! firework trigger, a wish, a trivia answer and a lantern, on a software
//! raster surface.
//!
//! ```text
//! celebration_demo [config.toml] [state-dir]
//! ```
//!
//! Without a state directory the run keeps its state in memory.

use celebration::fireworks::{FrameState, RasterSurface};
use celebration::site::{
    AnswerOutcome, AudioSink, FileStore, KeyValueStore, LanternTag, MapPin, MemoryStore, Question,
    SiteResult,
};
use celebration::{Page, PageConfig, PageElements, PageEvent, PageResult, Reaction};
use chrono::Local;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

/// Audio that always agrees to play.
struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self) -> SiteResult<()> {
        Ok(())
    }

    fn pause(&mut self) {}
}

fn elements() -> PageElements<RasterSurface> {
    PageElements {
        nav: true,
        countdown: true,
        firework_surface: Some(RasterSurface::new(WIDTH, HEIGHT)),
        firework_trigger: true,
        map_pins: Some(vec![MapPin::new("郑州", "中原的第一站")]),
        wish_board: true,
        questions: Some(vec![Question {
            prompt: "生日在几月?".into(),
            options: vec!["十月".into(), "十一月".into()],
            answer: 1,
            reward: "november".into(),
        }]),
        audio: Some(Box::new(SilentAudio)),
        lantern_tags: Some(vec![
            LanternTag { wish: "平安喜乐".into() },
            LanternTag { wish: "万事胜意".into() },
        ]),
        cards: Some(3),
        ..Default::default()
    }
}

fn run<K: KeyValueStore>(config: &PageConfig, store: K) -> PageResult<()> {
    let mut page = Page::setup(config, elements(), store)?;
    let frame = config.fireworks.frame_duration();
    let now = Local::now();

    let script = [
        PageEvent::NavToggle,
        PageEvent::PinClicked(0),
        PageEvent::MusicToggled,
        PageEvent::WishSubmitted {
            name: "Demo".into(),
            message: "生日快乐!".into(),
        },
        PageEvent::AnswerChosen(1),
        PageEvent::LanternTagSelected(1),
        PageEvent::LanternLaunch,
        PageEvent::CardClicked(2),
    ];
    for event in script {
        let label = format!("{event:?}");
        let reaction = page.handle(event, &now)?;
        println!("{label:<40} -> {reaction:?}");
        if let Reaction::Answer(AnswerOutcome::Correct { reward, .. }) = reaction {
            println!("{:<40}    star collected: {reward}", "");
        }
    }

    // Intro burst, then two overlapping clicks mid-flight.
    let mut frames = 0_u32;
    let mut finished_loops = 0_u32;
    let mut countdown = None;
    for tick in 0..2_000_u32 {
        if tick == 100 || tick == 104 {
            #[allow(clippy::cast_precision_loss)]
            let x = (WIDTH / 4 + tick) as f32;
            page.handle(PageEvent::FireworkClick { x, y: 120.0 }, &now)?;
        }

        let report = page.tick(frame, &Local::now());
        countdown = report.countdown.or(countdown);
        match report.frame {
            FrameState::Running { .. } => frames += 1,
            FrameState::Finished => {
                frames += 1;
                finished_loops += 1;
            }
            FrameState::Idle => {}
        }
        let sky_clear = page.lantern().is_none_or(|l| l.lanterns().is_empty());
        if tick > 104 && sky_clear && !page.fireworks().wants_frame() {
            break;
        }
    }

    let stats = page.fireworks().session().stats();
    println!();
    println!(
        "fireworks: {} bursts, {} particles, {frames} frames, {finished_loops} loop(s) finished",
        stats.bursts, stats.spawned
    );
    if let Some(surface) = page.fireworks().surface() {
        println!("surface blank after run: {}", surface.is_blank());
    }
    if let Some(view) = countdown {
        let cells: Vec<String> = view
            .cells
            .iter()
            .map(|c| format!("{}{}", c.value, c.label))
            .collect();
        println!("{} ({})", view.notice, cells.join(" "));
    }
    if let Some(board) = page.wish_board() {
        for card in board.cards() {
            println!("wish: {} @ {}: {}", card.name, card.when, card.message);
        }
    }
    if let Some(lantern) = page.lantern() {
        for line in lantern.log() {
            println!("lantern: {line}");
        }
    }
    Ok(())
}

fn main() {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match PageConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("celebration_demo: {e}");
                std::process::exit(2);
            }
        },
        None => PageConfig::default(),
    };

    let result = match args.next() {
        Some(dir) => FileStore::open(dir)
            .map_err(Into::into)
            .and_then(|store| run(&config, store)),
        None => run(&config, MemoryStore::new()),
    };

    if let Err(e) = result {
        eprintln!("celebration_demo: {e}");
        std::process::exit(1);
    }
}
