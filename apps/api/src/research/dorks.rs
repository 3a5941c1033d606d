//! Google Dork construction and per-platform author extraction from search hits.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

static REDDIT_USER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/u/([^/]+)").expect("valid reddit user regex"));
static LINKEDIN_AUTHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.+?)\s+on LinkedIn").expect("valid linkedin author regex"));
static QUORA_AUTHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.+?)\s+-\s+Quora").expect("valid quora author regex"));

/// `site:<platform> "<text>"`
pub fn build_google_dork(platform: &str, text: &str) -> String {
    format!("site:{platform} \"{text}\"")
}

fn reddit_user(url: &str) -> Option<&str> {
    REDDIT_USER
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Best-effort author name for a search hit.
pub fn extract_profile_name(url: &str, title: &str, platform: &str) -> String {
    let captured = match platform {
        "reddit.com" => Some(reddit_user(url).unwrap_or("RedditUser")),
        "linkedin.com" => Some(
            LINKEDIN_AUTHOR
                .captures(title)
                .and_then(|c| c.get(1))
                .map_or("LinkedIn Professional", |m| m.as_str()),
        ),
        "quora.com" => Some(
            QUORA_AUTHOR
                .captures(title)
                .and_then(|c| c.get(1))
                .map_or("Quora Expert", |m| m.as_str()),
        ),
        _ => None,
    };

    match captured {
        Some(name) => name.to_string(),
        None => format!("{}User", platform.split('.').next().unwrap_or(platform)),
    }
}

/// Profile link for the author. Only reddit exposes one in the discussion URL;
/// every other platform links back to the discussion itself.
pub fn generate_profile_url(discussion_url: &str, platform: &str) -> String {
    if platform == "reddit.com" {
        if let Some(user) = reddit_user(discussion_url) {
            return format!("https://{platform}/u/{user}");
        }
    }
    discussion_url.to_string()
}

/// Synthesized engagement line: the SERP API does not return counters.
pub fn generate_engagement_metrics() -> String {
    let mut rng = rand::thread_rng();
    let likes = rng.gen_range(10..210);
    let comments = rng.gen_range(2..52);
    let shares = rng.gen_range(0..20);

    if shares > 0 {
        format!("{likes} likes, {comments} comments, {shares} shares")
    } else {
        format!("{likes} likes, {comments} comments")
    }
}
