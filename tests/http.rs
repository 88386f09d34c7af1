use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GymVisit {
    gym_id: String,
    gym_name: String,
    last_visited: String,
    visit_count: u64,
    climb_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GymStats {
    visits: std::collections::BTreeMap<String, GymVisit>,
    total_climbs: u64,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct UserProfile {
    display_name: String,
    avatar: String,
    home_gym_id: Option<String>,
    join_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HomeGymSnapshot {
    gym_id: String,
    name: String,
    location: String,
}

#[derive(Debug, Deserialize)]
struct Gym {
    id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GymDetail {
    visit: Option<GymVisit>,
    avg_climbs_per_visit: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PerksOffer {
    price: String,
    yearly_savings_percent: u32,
    trial_days: u32,
    perks: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardEntry {
    rank: usize,
    stat: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    current_user_rank: Option<usize>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("gym_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/stats")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server_at(data_path: &str) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_gym_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("GYM_LISTING_DELAY_MS", "0")
        .env("GYM_LISTING_FAILURE_RATE", "0")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server_at(&unique_data_path()).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_stats(client: &Client, base_url: &str) -> GymStats {
    client
        .get(format!("{base_url}/api/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_visit_then_climbs_update_ledger() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_stats(&client, &server.base_url).await;
    let visits_before = before.visits.get("1").map_or(0, |visit| visit.visit_count);
    let climbs_before = before.visits.get("1").map_or(0, |visit| visit.climb_count);

    let visit: GymVisit = client
        .post(format!("{}/api/gyms/1/visit", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(visit.gym_id, "1");
    assert_eq!(visit.gym_name, "Boulder District");
    assert_eq!(visit.visit_count, visits_before + 1);
    assert!(visit.last_visited.ends_with('Z'));

    for _ in 0..3 {
        let response = client
            .post(format!("{}/api/gyms/1/climb", server.base_url))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let after = fetch_stats(&client, &server.base_url).await;
    assert_eq!(after.visits["1"].climb_count, climbs_before + 3);
    assert_eq!(after.total_climbs, before.total_climbs + 3);

    let detail: GymDetail = client
        .get(format!("{}/api/gyms/1", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let visit = detail.visit.expect("visit record");
    let expected = (2 * visit.climb_count + visit.visit_count) / (2 * visit.visit_count);
    assert_eq!(detail.avg_climbs_per_visit, Some(expected));

    let unvisited: GymDetail = client
        .get(format!("{}/api/gyms/3", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(unvisited.visit.is_none());
    assert_eq!(unvisited.avg_climbs_per_visit, None);
}

#[tokio::test]
async fn http_climb_at_unvisited_gym_conflicts() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_stats(&client, &server.base_url).await;
    let response = client
        .post(format!("{}/api/gyms/3/climb", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let after = fetch_stats(&client, &server.base_url).await;
    assert!(!after.visits.contains_key("3"));
    assert_eq!(after.total_climbs, before.total_climbs);

    let unknown = client
        .post(format!("{}/api/gyms/99/visit", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_profile_patch_keeps_join_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let first: UserProfile = client
        .get(format!("{}/api/profile", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: UserProfile = client
        .get(format!("{}/api/profile", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first.join_date, second.join_date);

    let updated: UserProfile = client
        .patch(format!("{}/api/profile", server.base_url))
        .json(&serde_json::json!({
            "displayName": "Sam Climber",
            "joinDate": "1999-01-01T00:00:00.000Z"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.display_name, "Sam Climber");
    assert_eq!(updated.avatar, first.avatar);
    assert_eq!(updated.home_gym_id, first.home_gym_id);
    assert_eq!(updated.join_date, first.join_date);
}

#[tokio::test]
async fn http_home_gym_set_and_clear() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let profile: UserProfile = client
        .post(format!("{}/api/gyms/2/home", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile.home_gym_id.as_deref(), Some("2"));

    let home: Option<HomeGymSnapshot> = client
        .get(format!("{}/api/home", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let home = home.expect("home gym snapshot");
    assert_eq!(home.gym_id, "2");
    assert_eq!(home.name, "Vertical World");
    assert_eq!(home.location, "Ballard");

    let cleared: UserProfile = client
        .delete(format!("{}/api/home", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cleared.home_gym_id, None);

    let home: Option<HomeGymSnapshot> = client
        .get(format!("{}/api/home", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(home.is_none());
}

#[tokio::test]
async fn http_listing_filters_and_leaderboard() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let gyms: Vec<Gym> = client
        .get(format!("{}/api/gyms", server.base_url))
        .query(&[("q", "fremont"), ("facilities", "moonboard,yoga")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(gyms.len(), 1);
    assert_eq!(gyms[0].id, 3);
    assert_eq!(gyms[0].name, "Seattle Bouldering Project");

    let bad = client
        .get(format!("{}/api/gyms?facilities=pool", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let board: Leaderboard = client
        .get(format!("{}/api/leaderboard?category=visits&country=USA", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(board.entries[0].rank, 1);
    assert_eq!(board.entries[0].stat, "156 visits");
    assert_eq!(board.current_user_rank, Some(4));

    let offer: PerksOffer = client
        .get(format!("{}/api/perks?plan=yearly", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(offer.price, "$49.99");
    assert_eq!(offer.yearly_savings_percent, 17);
    assert_eq!(offer.trial_days, 7);
    assert_eq!(offer.perks.len(), 7);
}

#[tokio::test]
async fn http_store_survives_restart() {
    let data_path = unique_data_path();
    let client = Client::new();

    {
        let server = spawn_server_at(&data_path).await;
        let response = client
            .post(format!("{}/api/gyms/2/visit", server.base_url))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let response = client
            .post(format!("{}/api/gyms/2/climb", server.base_url))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let server = spawn_server_at(&data_path).await;
    let stats = fetch_stats(&client, &server.base_url).await;
    drop(server);
    let _ = std::fs::remove_file(&data_path);

    assert_eq!(stats.visits["2"].visit_count, 1);
    assert_eq!(stats.visits["2"].climb_count, 1);
    assert_eq!(stats.total_climbs, 1);
}
