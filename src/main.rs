//! Glimmeroids entry point
//!
//! Headless driver: wires a JSON score store to the simulation and runs a
//! scripted demo flight, standing in for the browser host that samples the
//! keyboard and paints a canvas once per frame.

use std::time::{SystemTime, UNIX_EPOCH};

use glimmeroids::persistence::JsonFileStore;
use glimmeroids::sim::{FrameInput, GamePhase, Viewport, World, tick};
use glimmeroids::Leaderboard;
use glimmeroids::highscores::TOP_SCORES_COUNT;

const SCORE_FILE: &str = "glimmeroids_scores.json";
const DEMO_FRAMES: u32 = 3600; // one minute at 60 Hz

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let store = JsonFileStore::new(SCORE_FILE);
    let mut leaderboard = Leaderboard::load(&store);

    let mut world = World::new(seed, Viewport::default());
    world.set_score_to_beat(leaderboard.lowest_top_score());
    log::info!("glimmeroids starting (seed {})", seed);

    // Press Enter, then fly a lazy spiral with the trigger held.
    tick(&mut world, &FrameInput {
        confirm: true,
        ..Default::default()
    });

    for frame in 0..DEMO_FRAMES {
        let input = FrameInput {
            thrust: frame % 90 < 30,
            right: frame % 120 < 45,
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &input);

        if world.phase == GamePhase::GameOver {
            break;
        }
        if frame % 600 == 0 {
            log::info!(
                "frame {}: {} points, {} asteroids, wave base {}",
                frame,
                world.score,
                world.asteroids.len(),
                world.asteroid_base_count
            );
        }
    }

    println!("demo over: {} points", world.score);
    println!("{}", leaderboard.game_over_message(world.score));
    if Leaderboard::is_prize_winner(world.score) {
        println!("prize winner!");
    }

    if world.needs_name_entry {
        // Stand-in for the name-entry prompt.
        leaderboard.submit("demo pilot", world.score, &store);
        world.name_submitted();
    }

    println!("top scorers ({} max):", TOP_SCORES_COUNT);
    for (i, player) in leaderboard.top_scorers().iter().enumerate() {
        println!("  {}. {} - {}", i + 1, player.name, player.score);
    }
}
