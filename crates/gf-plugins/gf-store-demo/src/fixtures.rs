//! Seed data for demo mode: five posts from the regulars, newest first.

use chrono::{DateTime, TimeZone, Utc};
use gf_core::models::{Comment, Post};

const MANOS_IMAGE: &str =
    "https://images.unsplash.com/photo-1566492031773-4f4e44671857?auto=format&fit=crop&q=80&w=200";
const NIGHTSTALKER_IMAGE: &str =
    "https://images.unsplash.com/photo-1566411520896-01e7ca4726af?auto=format&fit=crop&q=80&w=200";
const SAKURA_IMAGE: &str =
    "https://images.unsplash.com/photo-1494790108377-be9c29b29330?auto=format&fit=crop&q=80&w=200";
const ARCTIC_IMAGE: &str =
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&q=80&w=200";
const PIXEL_IMAGE: &str =
    "https://images.unsplash.com/photo-1580489944761-15a19d654956?auto=format&fit=crop&q=80&w=200";

const ARENA_SHOT: &str =
    "https://images.unsplash.com/photo-1542751371-adc38448a05e?auto=format&fit=crop&q=80";
const STREAM_SETUP_SHOT: &str =
    "https://images.unsplash.com/photo-1542751110-97427bbecf20?auto=format&fit=crop&q=80";

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("fixture timestamps are valid UTC dates")
}

fn ids(users: &[&str]) -> Vec<String> {
    users.iter().map(|u| u.to_string()).collect()
}

struct Author(&'static str, &'static str, &'static str);

const MANOS: Author = Author("user-1", "Manos550", MANOS_IMAGE);
const NIGHTSTALKER: Author = Author("user-2", "NightStalker", NIGHTSTALKER_IMAGE);
const SAKURA: Author = Author("user-3", "SakuraPro", SAKURA_IMAGE);
const ARCTIC: Author = Author("user-4", "ArcticWolf", ARCTIC_IMAGE);
const PIXEL: Author = Author("user-5", "PixelQueen", PIXEL_IMAGE);

fn comment(id: &str, author: &Author, content: &str, likes: &[&str], created_at: DateTime<Utc>) -> Comment {
    Comment {
        id: id.to_string(),
        author_id: author.0.to_string(),
        author_name: author.1.to_string(),
        author_image: author.2.to_string(),
        content: content.to_string(),
        likes: ids(likes),
        created_at,
    }
}

fn post(
    id: &str,
    author: &Author,
    content: &str,
    media: &[&str],
    likes: &[&str],
    comments: Vec<Comment>,
    created_at: DateTime<Utc>,
) -> Post {
    Post {
        id: id.to_string(),
        author_id: author.0.to_string(),
        author_name: author.1.to_string(),
        author_image: author.2.to_string(),
        content: content.to_string(),
        media: ids(media),
        likes: ids(likes),
        comments,
        created_at,
        updated_at: created_at,
    }
}

/// The demo feed as seeded at startup.
pub fn demo_posts() -> Vec<Post> {
    vec![
        post(
            "post-1",
            &MANOS,
            "Just hit Immortal rank in Valorant! The grind was real but totally worth it. Thanks to my amazing team for the support! 🎮🏆",
            &[ARENA_SHOT],
            &["user-2", "user-3", "user-4"],
            vec![comment(
                "comment-1",
                &NIGHTSTALKER,
                "Congrats man! Well deserved! 🎉",
                &[],
                at(2024, 2, 10, 15, 30),
            )],
            at(2024, 2, 10, 15, 0),
        ),
        post(
            "post-2",
            &NIGHTSTALKER,
            "New streaming setup is finally complete! Ready for some epic League of Legends action. Come hang out at twitch.tv/nightstalker 🎥",
            &[STREAM_SETUP_SHOT],
            &["user-1", "user-5"],
            Vec::new(),
            at(2024, 2, 9, 18, 0),
        ),
        post(
            "post-3",
            &SAKURA,
            "Another tournament victory with the team! 🏆 The coordination and teamwork were on point today. GGs to all competitors!",
            &[],
            &["user-1", "user-2", "user-4", "user-5"],
            vec![comment(
                "comment-2",
                &PIXEL,
                "Amazing plays today! That last match was intense!",
                &["user-3"],
                at(2024, 2, 8, 20, 15),
            )],
            at(2024, 2, 8, 20, 0),
        ),
        post(
            "post-4",
            &ARCTIC,
            "Looking for a CS2 coach to help improve my gameplay. Currently Global Elite but want to take it to the next level. DM if interested! 🎯",
            &[],
            &["user-1"],
            Vec::new(),
            at(2024, 2, 7, 14, 0),
        ),
        post(
            "post-5",
            &PIXEL,
            "New YouTube video is up! Check out my latest Valorant guide on advanced movement techniques. Link in bio! 🎮✨",
            &[ARENA_SHOT],
            &["user-1", "user-2", "user-3"],
            vec![comment(
                "comment-3",
                &ARCTIC,
                "Great tips! Really helped improve my gameplay.",
                &["user-5"],
                at(2024, 2, 6, 16, 30),
            )],
            at(2024, 2, 6, 16, 0),
        ),
    ]
}
