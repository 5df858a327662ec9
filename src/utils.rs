use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveTime, TimeZone, Weekday};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::types::{PkceAttempt, Track};

const CODE_VERIFIER_LEN: usize = 64;
const CODE_VERIFIER_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates the random secret for one PKCE attempt.
///
/// 64 bytes from the thread-local CSPRNG, each mapped onto the 62-symbol
/// alphanumeric alphabet. The modulo mapping is very slightly non-uniform,
/// which the provider accepts.
pub fn generate_code_verifier() -> String {
    let mut bytes = [0u8; CODE_VERIFIER_LEN];
    rand::rng().fill(&mut bytes[..]);
    bytes
        .iter()
        .map(|b| CODE_VERIFIER_CHARS[*b as usize % CODE_VERIFIER_CHARS.len()] as char)
        .collect()
}

/// Derives the S256 challenge: base64url(SHA-256(verifier)), no padding.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_pkce() -> PkceAttempt {
    let code_verifier = generate_code_verifier();
    let code_challenge = generate_code_challenge(&code_verifier);
    PkceAttempt {
        code_verifier,
        code_challenge,
    }
}

/// Next occurrence of `weekday` at `hour:minute` strictly after `now`,
/// except that the slot later today still counts.
pub fn next_weekly_occurrence(
    now: DateTime<Local>,
    weekday: Weekday,
    hour: u32,
    minute: u32,
) -> DateTime<Local> {
    let today = now.date_naive();
    let days_ahead = (weekday.num_days_from_monday() as i64
        - today.weekday().num_days_from_monday() as i64)
        .rem_euclid(7);
    let target_time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();

    let mut date = today + Duration::days(days_ahead);
    if days_ahead == 0 && now.time() >= target_time {
        date += Duration::days(7);
    }

    let naive = date.and_time(target_time);
    match naive.and_local_timezone(Local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        // DST gap; shift into the following hour.
        LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or(now),
    }
}

/// Summarizes a track list by its five most frequent primary artists, for
/// use as a playlist description.
pub fn top_artist_summary(tracks: &[Track]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for track in tracks {
        if let Some(artist) = track.artists.first() {
            *counts.entry(artist.name.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let names: Vec<&str> = ranked.iter().take(5).map(|(name, _)| *name).collect();
    format!("{} and more", names.join(", ")).trim().to_string()
}
