//! Play an ambient soundscape for a piece of story text.
//!
//! Usage: `ambient "Er was eens een vrolijke prinses" [seconds]`

use std::env;
use std::process;
use std::thread;
use std::time::Duration;

use storyscape::{AmbientEngine, classify, profile_for};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(text) = args.next() else {
        eprintln!("usage: ambient <story text> [seconds]");
        process::exit(2);
    };
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(8);

    let tag = classify(&text);
    let profile = profile_for(tag);
    println!(
        "emotion: {tag:?} — {} BPM, {}, {} layer(s)",
        profile.tempo_bpm,
        profile.musical_key,
        profile.timbres.len()
    );

    let mut engine = AmbientEngine::new();
    engine.play_for_text(&text);
    if engine.is_playing() {
        thread::sleep(Duration::from_secs(seconds));
    } else {
        eprintln!("no audio output available, nothing to play");
    }
    engine.stop();
}
