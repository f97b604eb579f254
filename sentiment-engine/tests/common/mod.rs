#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use pulse_core::{FeedRequest, NetworkError, Post, PostSource};
use std::sync::Mutex;

/// Wednesday 2024-06-12 12:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap()
}

pub fn post(id: &str, title: &str, body: Option<&str>, score: i64, created_at: DateTime<Utc>) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        body: body.map(str::to_string),
        score,
        created_at,
    }
}

/// Ten posts; three mention the economy (ids e0, e1, e6).
pub fn ten_post_fixture() -> Vec<Post> {
    let recent = now() - Duration::hours(2);
    let older = now() - Duration::days(3);
    vec![
        post("e0", "Economy adds jobs in May", None, 1500, recent),
        post("e1", "Economy slows down", None, -150, older),
        post("p2", "Senate schedules a vote", None, 0, older),
        post("p3", "Governor speaks at rally", None, 1200, older),
        post("p4", "Poll results released", None, -200, older),
        post("p5", "Mayor announces plan", None, 50, older),
        post("e6", "Weekly thread", Some("The economy outlook is uncertain"), 800, older),
        post("p7", "Court hears appeal", None, -300, older),
        post("p8", "Debate night recap", None, 2000, older),
        post("p9", "Committee hearing today", None, 10, older),
    ]
}

/// Five posts covering all three labels.
pub fn five_post_fixture() -> Vec<Post> {
    vec![
        post("s1", "Tax cuts pass the house", None, 2400, now()),
        post("s2", "The tax bill faces opposition", Some("Critics call it a disaster"), -450, now()),
        post("s3", "Healthcare town hall", Some("Questions about tax credits"), 300, now()),
        post("s4", "The border debate continues", None, 1001, now()),
        post("s5", "Daily discussion", None, -100, now()),
    ]
}

/// Serves a fixed corpus and records the requests it was asked for.
pub struct StaticSource {
    posts: Vec<Post>,
    requests: Mutex<Vec<FeedRequest>>,
}

impl StaticSource {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<FeedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostSource for StaticSource {
    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<Post>, NetworkError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.posts.clone())
    }
}

/// Always fails the way an overloaded upstream would.
pub struct FailingSource;

#[async_trait]
impl PostSource for FailingSource {
    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<Post>, NetworkError> {
        Err(NetworkError::Status {
            status_code: 503,
            endpoint: format!("/r/{}/{}.json", request.channel, request.listing.path_segment()),
        })
    }
}
