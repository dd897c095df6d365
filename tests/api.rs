extern crate rocket;
use rocket::async_test;

#[cfg(test)]
mod tests {
    use super::*;

    use api::AppConfig;
    use migration::{Migrator, MigratorTrait};
    use rocket::config::{LogLevel, SecretKey};
    use rocket::figment::Profile;
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::{Client, LocalResponse};
    use rocket::Config;
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ADMIN_EMAIL: &str = "admin@example.com";
    const PASSWORD: &str = "correct horse";
    const BOUNDARY: &str = "X-ARENA-BOUNDARY";

    static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

    /// A named in-memory database shared by every connection opened to `url`. `_keep` holds it
    /// open for the whole test.
    struct TestDb {
        url: String,
        _keep: DatabaseConnection,
    }

    async fn connect(url: &str) -> DatabaseConnection {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        Database::connect(opt).await.expect("in-memory database")
    }

    async fn make_db() -> TestDb {
        let id = NEXT_DB.fetch_add(1, Ordering::Relaxed);
        let url = format!("sqlite:file:arena_test_{id}?mode=memory&cache=shared");
        let db = connect(&url).await;
        Migrator::up(&db, None).await.expect("migrations apply");
        TestDb { url, _keep: db }
    }

    fn app_config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            upload_dir: std::env::temp_dir().join("arena-test-uploads"),
            admin_emails: vec![ADMIN_EMAIL.to_string()],
        }
    }

    /// One client per logged in user, each with its own connection to the same database.
    async fn make_tracked_client(db: &TestDb) -> Client {
        let config = Config {
            profile: Profile::Global,
            log_level: LogLevel::Off,
            secret_key: SecretKey::from(&[1u8; 64][..]),
            limits: api::limits(),
            ..Default::default()
        };
        let connection = connect(&db.url).await;
        Client::tracked(api::build_rocket(connection, app_config()).configure(config))
            .await
            .expect("valid rocket instance")
    }

    async fn body(res: LocalResponse<'_>) -> Value {
        res.into_json::<Value>().await.expect("json body")
    }

    /// Registers and logs in a fresh user, returning their client and id.
    async fn user(db: &TestDb, name: &str, email: &str) -> (Client, i64) {
        let client = make_tracked_client(db).await;
        let res = client
            .post("/api/register")
            .json(&json!({ "name": name, "email": email, "password": PASSWORD }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok, "registering {email}");
        let id = body(res).await["id"].as_i64().expect("user id");
        (client, id)
    }

    async fn create_team(client: &Client, name: &str, tag: &str, invited: &[i64]) -> Value {
        let res = client
            .post("/api/teams")
            .json(&json!({
                "name": name,
                "tag": tag,
                "description": format!("{name} description"),
                "invitedUsers": invited,
            }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok, "creating team {name}");
        body(res).await
    }

    fn tournament_json(name: &str, kind: &str, max_participants: i32) -> Value {
        json!({
            "name": name,
            "type": kind,
            "startDate": "2099-01-10T10:00",
            "endDate": "2099-01-12T18:00",
            "registrationDeadline": "2099-01-01T00:00",
            "maxParticipants": max_participants,
            "description": "Season opener",
            "rules": "Best of three",
            "prizes": "Glory",
        })
    }

    async fn create_tournament(admin: &Client, tournament: Value) -> i64 {
        let res = admin
            .post("/api/admin/tournaments")
            .json(&tournament)
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);
        body(res).await["id"].as_i64().expect("tournament id")
    }

    async fn register(client: &Client, tournament_id: i64, team_id: i64) -> LocalResponse<'_> {
        client
            .post(format!("/api/tournaments/{tournament_id}/register"))
            .json(&json!({ "teamId": team_id }))
            .dispatch()
            .await
    }

    fn multipart(filename: &str, content_type: &str, data: &[u8]) -> (ContentType, Vec<u8>) {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        let header = ContentType::new("multipart", "form-data").with_params(("boundary", BOUNDARY));
        (header, body)
    }

    #[async_test]
    async fn session_lifecycle() {
        let db = make_db().await;
        let (client, _) = user(&db, "Ada", "Ada@Example.com").await;

        let res = client.get("/api/me").dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        let me = body(res).await;
        assert_eq!(me["email"], "ada@example.com");
        assert_eq!(me["admin"], false);

        let res = client.get("/api/check-cookie").dispatch().await;
        assert_eq!(res.into_string().await.as_deref(), Some("Authenticated"));

        let res = client.post("/api/logout").dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(client.get("/api/me").dispatch().await.status(), Status::Unauthorized);

        let res = client
            .post("/api/login")
            .json(&json!({ "email": "ada@example.com", "password": "wrong password" }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Unauthorized);

        let res = client
            .post("/api/login")
            .json(&json!({ "email": "ADA@example.com", "password": PASSWORD }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(client.get("/api/me").dispatch().await.status(), Status::Ok);
    }

    #[async_test]
    async fn duplicate_emails_and_short_passwords_are_rejected() {
        let db = make_db().await;
        user(&db, "Ada", "ada@example.com").await;
        let client = make_tracked_client(&db).await;

        let res = client
            .post("/api/register")
            .json(&json!({ "name": "Imposter", "email": "ADA@example.com", "password": PASSWORD }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);

        let res = client
            .post("/api/register")
            .json(&json!({ "name": "Bob", "email": "bob@example.com", "password": "short" }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);
    }

    #[async_test]
    async fn requests_without_a_session_are_unauthorized() {
        let db = make_db().await;
        let client = make_tracked_client(&db).await;

        let res = client.get("/api/teams").dispatch().await;
        assert_eq!(res.status(), Status::Unauthorized);
        assert!(body(res).await["error"].is_string());

        let res = client
            .post("/api/teams")
            .json(&json!({ "name": "Rockets", "tag": "RKT", "description": "Fast" }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Unauthorized);

        let res = client.get("/api/user/dashboard-stats").dispatch().await;
        assert_eq!(res.status(), Status::Unauthorized);
    }

    #[async_test]
    async fn creating_a_team_makes_the_caller_captain() {
        let db = make_db().await;
        let (alice, alice_id) = user(&db, "Alice", "alice@example.com").await;
        let (_, bob_id) = user(&db, "Bob", "bob@example.com").await;

        let team = create_team(&alice, "Rockets", "RKT", &[bob_id, alice_id, 9999]).await;

        assert_eq!(team["name"], "Rockets");
        assert_eq!(team["captain_id"].as_i64(), Some(alice_id));
        assert_eq!(team["isOwner"], true);
        assert_eq!(team["logo_url"], Value::Null);
        let members = team["members"].as_array().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0]["id"].as_i64(), Some(alice_id));
        assert_eq!(members[0]["role"], "CAPTAIN");
        let invites = team["pendingInvites"].as_array().unwrap();
        assert_eq!(invites.len(), 1);
        assert_eq!(invites[0]["email"], "bob@example.com");
        assert_eq!(invites[0]["status"], "PENDING");

        let res = alice.get("/api/teams").dispatch().await;
        let mine = body(res).await;
        assert_eq!(mine.as_array().unwrap().len(), 1);
    }

    #[async_test]
    async fn blank_fields_and_malformed_bodies_are_bad_requests() {
        let db = make_db().await;
        let (alice, _) = user(&db, "Alice", "alice@example.com").await;

        let res = alice
            .post("/api/teams")
            .json(&json!({ "name": "  ", "tag": "RKT", "description": "Fast" }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);

        let res = alice
            .post("/api/teams")
            .json(&json!({ "name": "Rockets" }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);
        assert!(body(res).await["error"].is_string());
    }

    #[async_test]
    async fn duplicate_name_or_tag_is_rejected_ignoring_case() {
        let db = make_db().await;
        let (alice, _) = user(&db, "Alice", "alice@example.com").await;
        let (bob, _) = user(&db, "Bob", "bob@example.com").await;
        create_team(&alice, "Rockets", "RKT", &[]).await;

        for (name, tag) in [("rockets", "NEW"), ("Comets", "rkt")] {
            let res = bob
                .post("/api/teams")
                .json(&json!({ "name": name, "tag": tag, "description": "Again" }))
                .dispatch()
                .await;
            assert_eq!(res.status(), Status::BadRequest);
            assert_eq!(
                body(res).await["error"],
                "A team with this name or tag already exists"
            );
        }

        let all = body(bob.get("/api/teams/all").dispatch().await).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
        assert_eq!(all[0]["isOwner"], false);
    }

    #[async_test]
    async fn invites_are_answered_once_by_the_invitee() {
        let db = make_db().await;
        let (alice, _) = user(&db, "Alice", "alice@example.com").await;
        let (bob, bob_id) = user(&db, "Bob", "bob@example.com").await;
        let (carol, carol_id) = user(&db, "Carol", "carol@example.com").await;
        let team = create_team(&alice, "Rockets", "RKT", &[bob_id, carol_id]).await;
        let team_id = team["id"].as_i64().unwrap();

        let invites = body(bob.get("/api/invites").dispatch().await).await;
        assert_eq!(invites.as_array().unwrap().len(), 1);
        assert_eq!(invites[0]["teamTag"], "RKT");
        assert_eq!(invites[0]["status"], "PENDING");
        let invite_id = invites[0]["id"].as_i64().unwrap();

        let res = carol
            .post(format!("/api/invites/{invite_id}/accept"))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Forbidden);

        let res = bob
            .post(format!("/api/invites/{invite_id}/accept"))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(body(res).await["success"], true);

        let res = bob
            .post(format!("/api/invites/{invite_id}/decline"))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);

        let res = bob.get(format!("/api/teams/{team_id}")).dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        let details = body(res).await;
        assert_eq!(details["members"].as_array().unwrap().len(), 2);
        assert_eq!(details["isOwner"], false);

        let carol_invite = body(carol.get("/api/invites").dispatch().await).await[0]["id"]
            .as_i64()
            .unwrap();
        let res = carol
            .post(format!("/api/invites/{carol_invite}/decline"))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);
        let res = carol.get(format!("/api/teams/{team_id}")).dispatch().await;
        assert_eq!(res.status(), Status::Forbidden);

        let res = bob.post("/api/invites/4242/accept").dispatch().await;
        assert_eq!(res.status(), Status::NotFound);
    }

    #[async_test]
    async fn only_the_captain_can_change_a_team() {
        let db = make_db().await;
        let (alice, _) = user(&db, "Alice", "alice@example.com").await;
        let (bob, bob_id) = user(&db, "Bob", "bob@example.com").await;
        create_team(&alice, "Comets", "CMT", &[]).await;
        let team = create_team(&alice, "Rockets", "RKT", &[bob_id]).await;
        let team_id = team["id"].as_i64().unwrap();
        let invite_id = team["pendingInvites"][0]["id"].as_i64().unwrap();
        bob.post(format!("/api/invites/{invite_id}/accept"))
            .dispatch()
            .await;

        let update = json!({ "name": "Rockets 2", "tag": "RK2", "description": "Faster", "logoUrl": "/uploads/x.png" });
        let res = bob
            .put(format!("/api/teams/{team_id}"))
            .json(&update)
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Forbidden);
        let res = bob.delete(format!("/api/teams/{team_id}")).dispatch().await;
        assert_eq!(res.status(), Status::Forbidden);

        let res = alice
            .put(format!("/api/teams/{team_id}"))
            .json(&json!({ "name": "comets", "tag": "RKT", "description": "Taken" }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);

        let res = alice
            .put(format!("/api/teams/{team_id}"))
            .json(&update)
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);
        let updated = body(res).await;
        assert_eq!(updated["tag"], "RK2");
        assert_eq!(updated["logo_url"], "/uploads/x.png");

        let res = alice
            .put(format!("/api/teams/{team_id}"))
            .json(&json!({ "name": "rockets 2", "tag": "rk2", "description": "Same team" }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);

        let res = alice.delete(format!("/api/teams/{team_id}")).dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(body(res).await, json!({ "success": true }));

        let res = alice.get(format!("/api/teams/{team_id}")).dispatch().await;
        assert_eq!(res.status(), Status::NotFound);
        let res = alice.delete(format!("/api/teams/{team_id}")).dispatch().await;
        assert_eq!(res.status(), Status::NotFound);
    }

    #[async_test]
    async fn user_search_needs_three_characters_and_skips_the_caller() {
        let db = make_db().await;
        let (alice, _) = user(&db, "Alice", "alice@example.com").await;
        user(&db, "Alicia", "alicia@example.com").await;
        let (bob, _) = user(&db, "Bob", "bob@example.com").await;

        let res = bob.get("/api/users/search?q=al").dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(body(res).await, json!([]));
        assert_eq!(body(bob.get("/api/users/search").dispatch().await).await, json!([]));

        let found = body(bob.get("/api/users/search?q=ALI").dispatch().await).await;
        let names: Vec<&str> = found
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Alice", "Alicia"]);

        let found = body(alice.get("/api/users/search?q=ali").dispatch().await).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["name"], "Alicia");

        let found = body(alice.get("/api/users/search?q=bob%40example").dispatch().await).await;
        assert_eq!(found[0]["email"], "bob@example.com");
    }

    #[async_test]
    async fn dashboard_is_empty_without_teams() {
        let db = make_db().await;
        let (alice, _) = user(&db, "Alice", "alice@example.com").await;

        let res = alice.get("/api/user/dashboard-stats").dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(
            body(res).await,
            json!({
                "totalTournaments": 0,
                "totalTeams": 0,
                "upcomingMatches": [],
                "recentTournaments": [],
            })
        );
    }

    #[async_test]
    async fn admin_routes_require_an_admin() {
        let db = make_db().await;
        let (alice, _) = user(&db, "Alice", "alice@example.com").await;
        let (admin, _) = user(&db, "Admin", ADMIN_EMAIL).await;
        let anonymous = make_tracked_client(&db).await;

        for path in ["/api/admin/tournaments", "/api/admin/contacts", "/api/admin/dashboard-stats"] {
            assert_eq!(anonymous.get(path).dispatch().await.status(), Status::Unauthorized);
            assert_eq!(alice.get(path).dispatch().await.status(), Status::Forbidden);
            assert_eq!(admin.get(path).dispatch().await.status(), Status::Ok);
        }

        let res = alice
            .post("/api/admin/tournaments")
            .json(&tournament_json("Cup", "swiss", 8))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Forbidden);
    }

    #[async_test]
    async fn tournaments_are_validated() {
        let db = make_db().await;
        let (admin, _) = user(&db, "Admin", ADMIN_EMAIL).await;

        let mut backwards = tournament_json("Cup", "swiss", 8);
        backwards["endDate"] = json!("2099-01-09T10:00");
        let mut late_deadline = tournament_json("Cup", "swiss", 8);
        late_deadline["registrationDeadline"] = json!("2099-01-11T00:00");
        let mut bad_date = tournament_json("Cup", "swiss", 8);
        bad_date["startDate"] = json!("someday");

        for invalid in [
            backwards,
            late_deadline,
            bad_date,
            tournament_json("Cup", "swiss", 1),
            tournament_json(" ", "swiss", 8),
        ] {
            let res = admin
                .post("/api/admin/tournaments")
                .json(&invalid)
                .dispatch()
                .await;
            assert_eq!(res.status(), Status::BadRequest, "{invalid}");
        }

        let id = create_tournament(&admin, tournament_json("Cup", "roundRobin", 8)).await;
        let res = admin.get(format!("/api/admin/tournaments/{id}")).dispatch().await;
        let tournament = body(res).await;
        assert_eq!(tournament["type"], "roundRobin");
        assert_eq!(tournament["status"], "upcoming");
        assert_eq!(tournament["participants"], 0);
        assert_eq!(tournament["maxParticipants"], 8);

        let mut update = tournament_json("Cup Finals", "elimination", 4);
        update["status"] = json!("ongoing");
        let res = admin
            .put(format!("/api/admin/tournaments/{id}"))
            .json(&update)
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);
        let updated = body(res).await;
        assert_eq!(updated["name"], "Cup Finals");
        assert_eq!(updated["status"], "ongoing");

        let stats = body(admin.get("/api/admin/dashboard-stats").dispatch().await).await;
        assert_eq!(stats["activeTournaments"], 1);
        assert_eq!(stats["ongoingTournaments"][0]["type"], "elimination");
        assert_eq!(stats["totalUsers"], 1);

        let res = admin.delete(format!("/api/admin/tournaments/{id}")).dispatch().await;
        assert_eq!(res.status(), Status::NoContent);
        let res = admin.get(format!("/api/admin/tournaments/{id}")).dispatch().await;
        assert_eq!(res.status(), Status::NotFound);
    }

    #[async_test]
    async fn registration_and_match_generation() {
        let db = make_db().await;
        let (admin, _) = user(&db, "Admin", ADMIN_EMAIL).await;
        let tournament_id = create_tournament(&admin, tournament_json("Cup", "elimination", 3)).await;

        let mut captains = Vec::new();
        for (name, tag, email) in [
            ("Rockets", "RKT", "rockets@example.com"),
            ("Comets", "CMT", "comets@example.com"),
            ("Meteors", "MTR", "meteors@example.com"),
        ] {
            let (client, _) = user(&db, name, email).await;
            let team_id = create_team(&client, name, tag, &[]).await["id"].as_i64().unwrap();
            captains.push((client, team_id));
        }
        let (late, _) = user(&db, "Late", "late@example.com").await;
        let late_team = create_team(&late, "Latecomers", "LTC", &[]).await["id"]
            .as_i64()
            .unwrap();

        let (rockets, rockets_team) = &captains[0];
        let res = register(&late, tournament_id, *rockets_team).await;
        assert_eq!(res.status(), Status::Forbidden);

        let res = admin
            .post(format!("/api/admin/tournaments/{tournament_id}/matches"))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);

        for (client, team_id) in &captains {
            let res = register(client, tournament_id, *team_id).await;
            assert_eq!(res.status(), Status::Ok);
        }
        let res = register(rockets, tournament_id, *rockets_team).await;
        assert_eq!(res.status(), Status::BadRequest);
        let res = register(&late, tournament_id, late_team).await;
        assert_eq!(res.status(), Status::BadRequest);

        let res = admin
            .post(format!("/api/admin/tournaments/{tournament_id}/matches"))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);
        let matches = body(res).await;
        let matches = matches.as_array().unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0]["teamA"]["tag"], "RKT");
        assert_eq!(matches[0]["teamB"], Value::Null);
        assert_eq!(matches[1]["teamA"]["tag"], "CMT");
        assert_eq!(matches[1]["teamB"]["tag"], "MTR");
        assert!(matches.iter().all(|m| m["round"] == 1));

        let res = admin
            .post(format!("/api/admin/tournaments/{tournament_id}/matches"))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);

        let listed = body(
            late.get(format!("/api/tournaments/{tournament_id}/matches"))
                .dispatch()
                .await,
        )
        .await;
        assert_eq!(listed.as_array().unwrap().len(), 2);

        let tournament = body(
            late.get(format!("/api/tournaments/{tournament_id}"))
                .dispatch()
                .await,
        )
        .await;
        assert_eq!(tournament["participants"], 3);

        let stats = body(rockets.get("/api/user/dashboard-stats").dispatch().await).await;
        assert_eq!(stats["totalTournaments"], 1);
        assert_eq!(stats["totalTeams"], 1);
        assert_eq!(stats["upcomingMatches"][0]["opponent"], "BYE");
        assert_eq!(stats["upcomingMatches"][0]["tournament_name"], "Cup");
        assert_eq!(stats["recentTournaments"][0]["status"], "upcoming");

        let (comets, _) = &captains[1];
        let stats = body(comets.get("/api/user/dashboard-stats").dispatch().await).await;
        assert_eq!(stats["upcomingMatches"][0]["opponent"], "Meteors");
    }

    #[async_test]
    async fn registration_closes_once_the_tournament_is_under_way() {
        let db = make_db().await;
        let (admin, _) = user(&db, "Admin", ADMIN_EMAIL).await;
        let (alice, _) = user(&db, "Alice", "alice@example.com").await;
        let team_id = create_team(&alice, "Rockets", "RKT", &[]).await["id"]
            .as_i64()
            .unwrap();

        let mut past = tournament_json("Old Cup", "swiss", 8);
        past["startDate"] = json!("2000-01-10T10:00:00Z");
        past["endDate"] = json!("2000-01-12 18:00");
        past["registrationDeadline"] = json!("2000-01-01");
        let past_id = create_tournament(&admin, past).await;
        let res = register(&alice, past_id, team_id).await;
        assert_eq!(res.status(), Status::BadRequest);

        let ongoing_id = create_tournament(&admin, tournament_json("Live Cup", "swiss", 8)).await;
        let mut update = tournament_json("Live Cup", "swiss", 8);
        update["status"] = json!("ongoing");
        admin
            .put(format!("/api/admin/tournaments/{ongoing_id}"))
            .json(&update)
            .dispatch()
            .await;
        let res = register(&alice, ongoing_id, team_id).await;
        assert_eq!(res.status(), Status::BadRequest);

        let res = register(&alice, 4242, team_id).await;
        assert_eq!(res.status(), Status::NotFound);
    }

    #[async_test]
    async fn contact_messages_flow_to_the_admin() {
        let db = make_db().await;
        let (admin, _) = user(&db, "Admin", ADMIN_EMAIL).await;
        let anonymous = make_tracked_client(&db).await;

        let res = anonymous
            .post("/api/contacts")
            .json(&json!({ "name": "Visitor", "email": "not-an-email", "subject": "Hi", "message": "Hello" }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);

        for subject in ["First", "Second"] {
            let res = anonymous
                .post("/api/contacts")
                .json(&json!({ "name": "Visitor", "email": "visitor@example.com", "subject": subject, "message": "Hello" }))
                .dispatch()
                .await;
            assert_eq!(res.status(), Status::Ok);
            assert_eq!(body(res).await["status"], "new");
        }

        let contacts = body(admin.get("/api/admin/contacts").dispatch().await).await;
        assert_eq!(contacts[0]["subject"], "Second");
        let id = contacts[0]["id"].as_i64().unwrap();

        let res = admin
            .patch(format!("/api/admin/contacts/{id}"))
            .json(&json!({}))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(body(res).await["error"], "Status is required");

        let res = admin
            .patch(format!("/api/admin/contacts/{id}"))
            .json(&json!({ "status": "replied" }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(body(res).await["status"], "replied");

        let res = admin
            .patch("/api/admin/contacts/4242")
            .json(&json!({ "status": "read" }))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::NotFound);

        let res = admin.delete(format!("/api/admin/contacts/{id}")).dispatch().await;
        assert_eq!(res.status(), Status::NoContent);
        let res = admin.delete(format!("/api/admin/contacts/{id}")).dispatch().await;
        assert_eq!(res.status(), Status::NotFound);
    }

    #[async_test]
    async fn uploads_accept_images_only() {
        let db = make_db().await;
        let anonymous = make_tracked_client(&db).await;
        let (alice, _) = user(&db, "Alice", "alice@example.com").await;

        let (header, data) = multipart("logo.png", "image/png", b"\x89PNG\r\n\x1a\nfake");
        let res = anonymous
            .post("/api/upload")
            .header(header.clone())
            .body(data.clone())
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Unauthorized);

        let (text_header, text) = multipart("notes.txt", "text/plain", b"hello");
        let res = alice
            .post("/api/upload")
            .header(text_header)
            .body(text)
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::BadRequest);

        let res = alice.post("/api/upload").header(header).body(data).dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        let url = body(res).await["url"].as_str().unwrap().to_string();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let res = alice.get(url).dispatch().await;
        assert_eq!(res.status(), Status::Ok);
    }

    #[async_test]
    async fn uploads_reject_svg_and_oversized_images() {
        let db = make_db().await;
        let (alice, _) = user(&db, "Alice", "alice@example.com").await;

        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg"><script>alert(1)</script></svg>"#;
        let (header, data) = multipart("logo.svg", "image/svg+xml", svg);
        let res = alice.post("/api/upload").header(header).body(data).dispatch().await;
        assert_eq!(res.status(), Status::BadRequest);

        let oversized = vec![0u8; api::MAX_UPLOAD_SIZE as usize + 10];
        let (header, data) = multipart("huge.png", "image/png", &oversized);
        let res = alice.post("/api/upload").header(header).body(data).dispatch().await;
        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(body(res).await["error"], "Images may be at most 5 MB");
    }

    #[async_test]
    async fn deleting_a_team_drops_its_registrations_and_matches() {
        let db = make_db().await;
        let (admin, _) = user(&db, "Admin", ADMIN_EMAIL).await;
        let tournament_id = create_tournament(&admin, tournament_json("Cup", "swiss", 4)).await;

        let (alice, _) = user(&db, "Alice", "alice@example.com").await;
        let (bob, _) = user(&db, "Bob", "bob@example.com").await;
        let rockets = create_team(&alice, "Rockets", "RKT", &[]).await["id"].as_i64().unwrap();
        let comets = create_team(&bob, "Comets", "CMT", &[]).await["id"].as_i64().unwrap();
        assert_eq!(register(&alice, tournament_id, rockets).await.status(), Status::Ok);
        assert_eq!(register(&bob, tournament_id, comets).await.status(), Status::Ok);

        let res = admin
            .post(format!("/api/admin/tournaments/{tournament_id}/matches"))
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(body(res).await.as_array().unwrap().len(), 1);

        let res = alice.delete(format!("/api/teams/{rockets}")).dispatch().await;
        assert_eq!(res.status(), Status::Ok);

        let matches = body(
            bob.get(format!("/api/tournaments/{tournament_id}/matches"))
                .dispatch()
                .await,
        )
        .await;
        assert_eq!(matches, json!([]));
        let tournament = body(
            bob.get(format!("/api/tournaments/{tournament_id}"))
                .dispatch()
                .await,
        )
        .await;
        assert_eq!(tournament["participants"], 1);
    }

    #[async_test]
    async fn user_search_treats_wildcards_literally() {
        let db = make_db().await;
        user(&db, "Axb Player", "axb@example.com").await;
        user(&db, "A_b Player", "underscore@example.com").await;
        let (carol, _) = user(&db, "Carol", "carol@example.com").await;

        let found = body(carol.get("/api/users/search?q=a_b").dispatch().await).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["name"], "A_b Player");

        let found = body(carol.get("/api/users/search?q=%25%25%25").dispatch().await).await;
        assert_eq!(found, json!([]));
    }

    #[async_test]
    async fn unknown_api_paths_answer_json() {
        let db = make_db().await;
        let client = make_tracked_client(&db).await;

        let res = client.get("/api/does-not-exist").dispatch().await;
        assert_eq!(res.status(), Status::NotFound);
        assert_eq!(body(res).await["error"], "Api endpoint not found");

        let res = client.get("/api/openapi.json").dispatch().await;
        assert_eq!(res.status(), Status::Ok);
    }
}
