//! Use case and router tests for the campaign crate

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::time::Duration;

    use account::application::{RegisterInput, RegisterUseCase};
    use account::{AccountConfig, InMemoryUserRepository, User};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use platform::upload::UploadStore;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::config::CampaignConfig;
    use crate::infra::memory::InMemoryCampaignRepository;
    use crate::presentation::router::campaign_router_generic;

    pub struct TestApp {
        pub users: Arc<InMemoryUserRepository>,
        pub campaigns: Arc<InMemoryCampaignRepository>,
        pub account_config: Arc<AccountConfig>,
        pub config: Arc<CampaignConfig>,
        pub router: Router,
        pub upload_dir: tempfile::TempDir,
    }

    impl TestApp {
        /// Register a user and return it with a bearer token
        pub async fn user(&self, email: &str) -> (User, String) {
            let output = RegisterUseCase::new(self.users.clone(), self.account_config.clone())
                .execute(RegisterInput {
                    name: "Budi".into(),
                    occupation: "Engineer".into(),
                    email: email.into(),
                    password: "secret123".into(),
                })
                .await
                .unwrap();
            (output.user, output.token)
        }
    }

    pub fn app() -> TestApp {
        let upload_dir = tempfile::tempdir().unwrap();
        let users = Arc::new(InMemoryUserRepository::new());
        let campaigns = Arc::new(InMemoryCampaignRepository::new());
        let uploads = UploadStore::new(upload_dir.path(), "images");
        let account_config = Arc::new(AccountConfig::new(
            b"campaign-test-secret-campaign-test",
            Duration::from_secs(3600),
            uploads.clone(),
        ));
        let config = Arc::new(CampaignConfig::new(uploads));
        let router = campaign_router_generic(
            campaigns.clone(),
            users.clone(),
            config.clone(),
            account_config.clone(),
        );

        TestApp {
            users,
            campaigns,
            account_config,
            config,
            router,
            upload_dir,
        }
    }

    pub async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn campaign_body(name: &str) -> Value {
        serde_json::json!({
            "name": name,
            "short_description": "Panels for the village school",
            "description": "We install solar panels on the school roof.",
            "goal_amount": 1_000_000,
            "perks": "sticker, t-shirt",
        })
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use kernel::id::{CampaignId, UserId};

    use super::support::app;
    use crate::application::{
        CampaignInput, CreateCampaignUseCase, GetCampaignUseCase, ListCampaignsUseCase,
        UpdateCampaignUseCase, UploadImageInput, UploadImageUseCase,
    };
    use crate::domain::actor::Actor;
    use crate::domain::entity::campaign::{Campaign, NewCampaign};
    use crate::domain::entity::campaign_image::{CampaignImage, NewCampaignImage};
    use crate::domain::repository::CampaignRepository;
    use crate::error::{CampaignError, CampaignResult};
    use crate::infra::memory::InMemoryCampaignRepository;

    fn input(name: &str, goal: i64) -> CampaignInput {
        CampaignInput {
            name: name.into(),
            short_description: "short".into(),
            description: "long".into(),
            perks: "a, b".into(),
            goal_amount: goal,
        }
    }

    #[tokio::test]
    async fn test_create_derives_slug_from_name_and_owner() {
        let repo = Arc::new(InMemoryCampaignRepository::new());
        let campaign = CreateCampaignUseCase::new(repo.clone())
            .execute(UserId::from_raw(7), input("Clean Water", 500))
            .await
            .unwrap();

        assert_eq!(campaign.slug, "clean-water-7-1");
        assert_eq!(campaign.current_amount, 0);
        assert_eq!(campaign.backer_count, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let repo = Arc::new(InMemoryCampaignRepository::new());
        let err = CreateCampaignUseCase::new(repo.clone())
            .execute(UserId::from_raw(1), input("", 0))
            .await
            .unwrap_err();

        assert!(matches!(err, CampaignError::Validation(ref e) if e.len() == 2));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_non_owner_update_is_forbidden_and_unchanged() {
        let repo = Arc::new(InMemoryCampaignRepository::new());
        let owner = UserId::from_raw(1);
        let created = CreateCampaignUseCase::new(repo.clone())
            .execute(owner, input("Clean Water", 500))
            .await
            .unwrap();

        let update = UpdateCampaignUseCase::new(repo.clone());
        let err = update
            .execute(Actor::User(UserId::from_raw(2)), created.id, input("Hijacked", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, CampaignError::NotOwner));
        assert_eq!(repo.find(created.id).unwrap().name, "Clean Water");

        let updated = update
            .execute(Actor::User(owner), created.id, input("Clean Water 2", 900))
            .await
            .unwrap();
        assert_eq!(updated.name, "Clean Water 2");
        assert_eq!(updated.slug, "clean-water-1-1");

        let by_admin = update
            .execute(Actor::Admin, created.id, input("Clean Water 3", 900))
            .await
            .unwrap();
        assert_eq!(by_admin.name, "Clean Water 3");
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let repo = Arc::new(InMemoryCampaignRepository::new());
        let create = CreateCampaignUseCase::new(repo.clone());
        create.execute(UserId::from_raw(1), input("One", 10)).await.unwrap();
        create.execute(UserId::from_raw(2), input("Two", 10)).await.unwrap();

        let list = ListCampaignsUseCase::new(repo.clone());
        assert_eq!(list.execute(None).await.unwrap().len(), 2);

        let mine = list.execute(Some(UserId::from_raw(2))).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Two");
    }

    #[tokio::test]
    async fn test_primary_upload_demotes_previous_primary() {
        let app = app();
        let (owner, _) = app.user("owner@b.com").await;
        let campaign = CreateCampaignUseCase::new(app.campaigns.clone())
            .execute(owner.id, input("Clean Water", 500))
            .await
            .unwrap();

        let upload = UploadImageUseCase::new(app.campaigns.clone(), app.config.clone());
        for name in ["a.png", "b.png"] {
            upload
                .execute(
                    Actor::User(owner.id),
                    UploadImageInput {
                        campaign_id: campaign.id,
                        is_primary: true,
                        file_name: name,
                        bytes: b"img",
                    },
                )
                .await
                .unwrap();
        }

        let stored = app.campaigns.find(campaign.id).unwrap();
        assert_eq!(stored.images.len(), 2);
        assert_eq!(stored.images.iter().filter(|i| i.is_primary).count(), 1);
        assert_eq!(
            stored.primary_image().unwrap().file_name,
            format!("images/{}-b.png", owner.id)
        );
    }

    #[tokio::test]
    async fn test_non_owner_upload_is_forbidden() {
        let app = app();
        let (owner, _) = app.user("owner@b.com").await;
        let (other, _) = app.user("other@b.com").await;
        let campaign = CreateCampaignUseCase::new(app.campaigns.clone())
            .execute(owner.id, input("Clean Water", 500))
            .await
            .unwrap();

        let err = UploadImageUseCase::new(app.campaigns.clone(), app.config.clone())
            .execute(
                Actor::User(other.id),
                UploadImageInput {
                    campaign_id: campaign.id,
                    is_primary: false,
                    file_name: "x.png",
                    bytes: b"img",
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CampaignError::NotOwner));
        assert!(app.campaigns.find(campaign.id).unwrap().images.is_empty());
    }

    /// Delegates to the in-memory store but refuses to record images
    struct RejectingImages(Arc<InMemoryCampaignRepository>);

    impl CampaignRepository for RejectingImages {
        async fn list(&self, owner: Option<UserId>) -> CampaignResult<Vec<Campaign>> {
            self.0.list(owner).await
        }

        async fn find_by_id(&self, id: CampaignId) -> CampaignResult<Option<Campaign>> {
            self.0.find_by_id(id).await
        }

        async fn create(&self, campaign: &NewCampaign) -> CampaignResult<Campaign> {
            self.0.create(campaign).await
        }

        async fn update(&self, campaign: &Campaign) -> CampaignResult<()> {
            self.0.update(campaign).await
        }

        async fn add_image(&self, _image: &NewCampaignImage) -> CampaignResult<CampaignImage> {
            Err(CampaignError::Internal("image insert failed".into()))
        }
    }

    #[tokio::test]
    async fn test_failed_image_insert_leaves_no_file() {
        let app = app();
        let (owner, _) = app.user("owner@b.com").await;
        let campaign = CreateCampaignUseCase::new(app.campaigns.clone())
            .execute(owner.id, input("Clean Water", 500))
            .await
            .unwrap();

        let repo = Arc::new(RejectingImages(app.campaigns.clone()));
        let err = UploadImageUseCase::new(repo, app.config.clone())
            .execute(
                Actor::User(owner.id),
                UploadImageInput {
                    campaign_id: campaign.id,
                    is_primary: true,
                    file_name: "a.png",
                    bytes: b"img",
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CampaignError::Internal(_)));
        let left: Vec<_> = std::fs::read_dir(app.upload_dir.path())
            .map(|dir| dir.map(|e| e.unwrap().file_name()).collect())
            .unwrap_or_default();
        assert!(left.is_empty(), "orphaned files: {left:?}");
    }

    #[tokio::test]
    async fn test_detail_includes_owner() {
        let app = app();
        let (owner, _) = app.user("owner@b.com").await;
        let campaign = CreateCampaignUseCase::new(app.campaigns.clone())
            .execute(owner.id, input("Clean Water", 500))
            .await
            .unwrap();

        let detail = GetCampaignUseCase::new(app.campaigns.clone(), app.users.clone())
            .execute(campaign.id)
            .await
            .unwrap();
        assert_eq!(detail.owner.unwrap().id, owner.id);

        let missing = GetCampaignUseCase::new(app.campaigns.clone(), app.users.clone())
            .execute(kernel::id::CampaignId::from_raw(999))
            .await
            .unwrap_err();
        assert!(matches!(missing, CampaignError::NotFound));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use kernel::id::CampaignId;

    use super::support::{app, campaign_body, json_request, send};

    #[tokio::test]
    async fn test_create_without_auth_is_unauthorized() {
        let app = app();

        let (status, body) = send(
            &app.router,
            json_request("POST", "/campaigns", None, campaign_body("Clean Water")),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["meta"]["status"], "error");
        assert!(app.campaigns.is_empty());
    }

    #[tokio::test]
    async fn test_create_list_and_detail() {
        let app = app();
        let (owner, token) = app.user("owner@b.com").await;

        let (status, body) = send(
            &app.router,
            json_request("POST", "/campaigns", Some(&token), campaign_body("Clean Water")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user_id"], owner.id.get());
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = send(
            &app.router,
            Request::get(format!("/campaigns?user_id={}", owner.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app.router,
            Request::get(format!("/campaigns/{id}")).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["perks"], serde_json::json!(["sticker", "t-shirt"]));
        assert_eq!(body["data"]["user"]["name"], "Budi");
        assert_eq!(body["data"]["backer_count"], 0);
    }

    #[tokio::test]
    async fn test_same_owner_names_never_collide() {
        let app = app();
        let (owner, token) = app.user("owner@b.com").await;
        let long_name = "a".repeat(255);

        let mut slugs = Vec::new();
        for name in ["太阳能电池板", "学校图书馆", "Clean Water", "Clean Water", long_name.as_str()] {
            let (status, body) = send(
                &app.router,
                json_request("POST", "/campaigns", Some(&token), campaign_body(name)),
            )
            .await;
            assert_eq!(status, StatusCode::OK, "create {name:?}: {body}");
            slugs.push(body["data"]["slug"].as_str().unwrap().to_string());
        }

        assert_eq!(slugs[0], format!("{}-1", owner.id));
        assert_eq!(slugs[1], format!("{}-2", owner.id));
        assert_eq!(slugs[2], format!("clean-water-{}-3", owner.id));
        assert_eq!(slugs[3], format!("clean-water-{}-4", owner.id));
        assert!(slugs[4].len() <= crate::domain::value_object::slug::SLUG_MAX_LEN);
        assert_eq!(app.campaigns.len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_campaign_is_not_found() {
        let app = app();

        let (status, body) = send(
            &app.router,
            Request::get("/campaigns/404").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["meta"]["code"], 404);
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_forbidden() {
        let app = app();
        let (_, owner_token) = app.user("owner@b.com").await;
        let (_, other_token) = app.user("other@b.com").await;

        let (_, body) = send(
            &app.router,
            json_request("POST", "/campaigns", Some(&owner_token), campaign_body("Clean Water")),
        )
        .await;
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = send(
            &app.router,
            json_request(
                "PUT",
                &format!("/campaigns/{id}"),
                Some(&other_token),
                campaign_body("Hijacked"),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            app.campaigns.find(CampaignId::from_raw(id)).unwrap().name,
            "Clean Water"
        );
    }

    #[tokio::test]
    async fn test_upload_image_via_both_paths() {
        let app = app();
        let (owner, token) = app.user("owner@b.com").await;
        let (_, body) = send(
            &app.router,
            json_request("POST", "/campaigns", Some(&token), campaign_body("Clean Water")),
        )
        .await;
        let id = body["data"]["id"].as_i64().unwrap();

        for (path, file) in [("/campaign-images", "a.png"), ("/campaign-image", "b.png")] {
            let multipart = format!(
                "--XB\r\nContent-Disposition: form-data; name=\"campaign_id\"\r\n\r\n{id}\r\n\
                 --XB\r\nContent-Disposition: form-data; name=\"is_primary\"\r\n\r\ntrue\r\n\
                 --XB\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file}\"\r\n\
                 Content-Type: image/png\r\n\r\nimg\r\n--XB--\r\n"
            );
            let (status, body) = send(
                &app.router,
                Request::post(path)
                    .header("authorization", format!("Bearer {token}"))
                    .header("content-type", "multipart/form-data; boundary=XB")
                    .body(Body::from(multipart))
                    .unwrap(),
            )
            .await;
            assert_eq!(status, StatusCode::OK, "{path}");
            assert_eq!(body["data"]["is_uploaded"], true);
        }

        let stored = app.campaigns.find(CampaignId::from_raw(id)).unwrap();
        assert_eq!(stored.images.len(), 2);
        assert_eq!(
            stored.primary_image().unwrap().file_name,
            format!("images/{}-b.png", owner.id)
        );
        assert!(app.upload_dir.path().join(format!("{}-a.png", owner.id)).exists());
    }
}
