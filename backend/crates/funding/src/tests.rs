//! Use case and router tests for the funding crate

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use account::application::{RegisterInput, RegisterUseCase};
    use account::{AccountConfig, InMemoryUserRepository, User};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use campaign::application::{CampaignInput, CreateCampaignUseCase};
    use campaign::{Campaign, InMemoryCampaignRepository};
    use platform::upload::UploadStore;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::config::FundingConfig;
    use crate::application::notification_signature;
    use crate::domain::gateway::{GatewayError, PaymentGateway, PaymentLink, PaymentRequest};
    use crate::infra::memory::InMemoryTransactionRepository;
    use crate::presentation::router::funding_router_generic;

    pub const SERVER_KEY: &str = "SB-Mid-server-test";

    /// Gateway double: answers with a link, or fails like an outage
    #[derive(Default)]
    pub struct FakeGateway {
        pub failing: bool,
        pub requests: Mutex<Vec<PaymentRequest>>,
    }

    impl FakeGateway {
        pub fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl PaymentGateway for FakeGateway {
        async fn create_payment(
            &self,
            request: &PaymentRequest,
        ) -> Result<PaymentLink, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.failing {
                return Err(GatewayError::Unavailable("connection refused".into()));
            }
            Ok(PaymentLink {
                token: Some("snap-token".into()),
                redirect_url: format!("https://pay.test/{}", request.order_code),
            })
        }
    }

    pub struct TestApp {
        pub users: Arc<InMemoryUserRepository>,
        pub campaigns: Arc<InMemoryCampaignRepository>,
        pub transactions: Arc<InMemoryTransactionRepository>,
        pub gateway: Arc<FakeGateway>,
        pub account_config: Arc<AccountConfig>,
        pub config: Arc<FundingConfig>,
        pub router: Router,
        _upload_dir: tempfile::TempDir,
    }

    impl TestApp {
        /// Register a user and return it with a bearer token
        pub async fn user(&self, email: &str) -> (User, String) {
            let output = RegisterUseCase::new(self.users.clone(), self.account_config.clone())
                .execute(RegisterInput {
                    name: "Sari".into(),
                    occupation: "Designer".into(),
                    email: email.into(),
                    password: "secret123".into(),
                })
                .await
                .unwrap();
            (output.user, output.token)
        }

        pub async fn campaign(&self, owner: &User, goal: i64) -> Campaign {
            CreateCampaignUseCase::new(self.campaigns.clone())
                .execute(
                    owner.id,
                    CampaignInput {
                        name: format!("Library {}", self.campaigns.len() + 1),
                        short_description: "Books for the village".into(),
                        description: "A small library".into(),
                        perks: "bookmark".into(),
                        goal_amount: goal,
                    },
                )
                .await
                .unwrap()
        }
    }

    pub fn app() -> TestApp {
        app_with(FakeGateway::default())
    }

    pub fn app_with(gateway: FakeGateway) -> TestApp {
        let upload_dir = tempfile::tempdir().unwrap();
        let users = Arc::new(InMemoryUserRepository::new());
        let campaigns = Arc::new(InMemoryCampaignRepository::new());
        let transactions = Arc::new(InMemoryTransactionRepository::new(campaigns.clone()));
        let gateway = Arc::new(gateway);
        let account_config = Arc::new(AccountConfig::new(
            b"funding-test-secret-funding-test",
            Duration::from_secs(3600),
            UploadStore::new(upload_dir.path(), "images"),
        ));
        let config = Arc::new(FundingConfig::new(SERVER_KEY));
        let router = funding_router_generic(
            transactions.clone(),
            campaigns.clone(),
            users.clone(),
            gateway.clone(),
            config.clone(),
            account_config.clone(),
        );

        TestApp {
            users,
            campaigns,
            transactions,
            gateway,
            account_config,
            config,
            router,
            _upload_dir: upload_dir,
        }
    }

    /// Notification body signed with the test server key
    pub fn notification(order_id: &str, status: &str, gross_amount: &str) -> Value {
        serde_json::json!({
            "order_id": order_id,
            "transaction_status": status,
            "payment_type": "bank_transfer",
            "fraud_status": "accept",
            "status_code": "200",
            "gross_amount": gross_amount,
            "signature_key": notification_signature(order_id, "200", gross_amount, SERVER_KEY),
        })
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
}

#[cfg(test)]
mod use_case_tests {
    use campaign::Actor;

    use super::support::{FakeGateway, SERVER_KEY, app, app_with};
    use crate::application::{
        CreateTransactionInput, CreateTransactionUseCase, HandleNotificationUseCase,
        ListTransactionsUseCase, Notification, NotificationOutcome, notification_signature,
    };
    use crate::domain::value_object::payment_status::PaymentStatus;
    use crate::error::FundingError;

    fn signed(order_id: &str, status: &str, fraud: Option<&str>) -> Notification {
        Notification {
            order_id: order_id.into(),
            transaction_status: status.into(),
            payment_type: Some("gopay".into()),
            fraud_status: fraud.map(Into::into),
            status_code: "200".into(),
            gross_amount: "50000.00".into(),
            signature_key: notification_signature(order_id, "200", "50000.00", SERVER_KEY),
        }
    }

    #[test]
    fn test_signature_is_sha512_hex() {
        let sig = notification_signature("ORDER-1", "200", "10000.00", "key");
        assert_eq!(sig.len(), 128);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(sig, notification_signature("ORDER-1", "200", "10000.00", "other"));
    }

    #[tokio::test]
    async fn test_create_stores_pending_with_payment_url() {
        let app = app();
        let (owner, _) = app.user("owner@example.com").await;
        let (payer, _) = app.user("payer@example.com").await;
        let campaign = app.campaign(&owner, 1_000_000).await;

        let transaction = CreateTransactionUseCase::new(
            app.transactions.clone(),
            app.campaigns.clone(),
            app.gateway.clone(),
        )
        .execute(
            &payer,
            CreateTransactionInput {
                campaign_id: campaign.id,
                amount: 50_000,
            },
        )
        .await
        .unwrap();

        assert_eq!(transaction.status, PaymentStatus::Pending);
        assert!(transaction.code.starts_with("ORDER-"));
        let stored = app.transactions.find(&transaction.code).unwrap();
        assert_eq!(stored.payment_url, transaction.payment_url);
        assert!(stored.payment_url.unwrap().ends_with(&transaction.code));

        let request = app.gateway.requests.lock().unwrap()[0].clone();
        assert_eq!(request.amount, 50_000);
        assert_eq!(request.customer_email, "payer@example.com");
    }

    #[tokio::test]
    async fn test_gateway_failure_leaves_transaction_pending() {
        let app = app_with(FakeGateway::failing());
        let (owner, _) = app.user("owner@example.com").await;
        let campaign = app.campaign(&owner, 1_000_000).await;

        let err = CreateTransactionUseCase::new(
            app.transactions.clone(),
            app.campaigns.clone(),
            app.gateway.clone(),
        )
        .execute(
            &owner,
            CreateTransactionInput {
                campaign_id: campaign.id,
                amount: 10_000,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, FundingError::Gateway(_)));
        assert_eq!(app.transactions.len(), 1);
        let pending = ListTransactionsUseCase::new(
            app.transactions.clone(),
            app.campaigns.clone(),
            app.users.clone(),
        )
        .all()
        .await
        .unwrap();
        assert_eq!(pending[0].transaction.status, PaymentStatus::Pending);
        assert!(pending[0].transaction.payment_url.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_amount_and_closed_campaign() {
        let app = app();
        let (owner, _) = app.user("owner@example.com").await;
        let campaign = app.campaign(&owner, 100).await;
        let create = CreateTransactionUseCase::new(
            app.transactions.clone(),
            app.campaigns.clone(),
            app.gateway.clone(),
        );

        let err = create
            .execute(
                &owner,
                CreateTransactionInput {
                    campaign_id: campaign.id,
                    amount: 0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FundingError::Validation(_)));

        app.campaigns.credit(campaign.id, 100);
        let err = create
            .execute(
                &owner,
                CreateTransactionInput {
                    campaign_id: campaign.id,
                    amount: 10,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FundingError::CampaignClosed));
        assert!(app.transactions.is_empty());
        assert_eq!(app.gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_settlement_replay_credits_once() {
        let app = app();
        let (owner, _) = app.user("owner@example.com").await;
        let campaign = app.campaign(&owner, 1_000_000).await;
        let transaction = CreateTransactionUseCase::new(
            app.transactions.clone(),
            app.campaigns.clone(),
            app.gateway.clone(),
        )
        .execute(
            &owner,
            CreateTransactionInput {
                campaign_id: campaign.id,
                amount: 50_000,
            },
        )
        .await
        .unwrap();

        let handle = HandleNotificationUseCase::new(app.transactions.clone(), app.config.clone());

        let first = handle
            .execute(signed(&transaction.code, "settlement", None))
            .await
            .unwrap();
        assert!(matches!(first, NotificationOutcome::Applied(ref t) if t.status == PaymentStatus::Paid));

        let replay = handle
            .execute(signed(&transaction.code, "settlement", None))
            .await
            .unwrap();
        assert!(matches!(replay, NotificationOutcome::Replayed(_)));

        // A late failure cannot undo the payment either
        let late = handle
            .execute(signed(&transaction.code, "expire", None))
            .await
            .unwrap();
        assert!(matches!(late, NotificationOutcome::Replayed(_)));

        let credited = app.campaigns.find(campaign.id).unwrap();
        assert_eq!(credited.current_amount, 50_000);
        assert_eq!(credited.backer_count, 1);
        assert_eq!(
            app.transactions.find(&transaction.code).unwrap().status,
            PaymentStatus::Paid
        );
    }

    #[tokio::test]
    async fn test_failed_and_ignored_statuses_do_not_credit() {
        let app = app();
        let (owner, _) = app.user("owner@example.com").await;
        let campaign = app.campaign(&owner, 1_000_000).await;
        let create = CreateTransactionUseCase::new(
            app.transactions.clone(),
            app.campaigns.clone(),
            app.gateway.clone(),
        );
        let input = || CreateTransactionInput {
            campaign_id: campaign.id,
            amount: 50_000,
        };
        let denied = create.execute(&owner, input()).await.unwrap();
        let waiting = create.execute(&owner, input()).await.unwrap();

        let handle = HandleNotificationUseCase::new(app.transactions.clone(), app.config.clone());
        handle
            .execute(signed(&denied.code, "capture", Some("deny")))
            .await
            .unwrap();
        let ignored = handle
            .execute(signed(&waiting.code, "pending", None))
            .await
            .unwrap();
        assert!(matches!(ignored, NotificationOutcome::Ignored));

        assert_eq!(
            app.transactions.find(&denied.code).unwrap().status,
            PaymentStatus::Failed
        );
        assert_eq!(
            app.transactions.find(&waiting.code).unwrap().status,
            PaymentStatus::Pending
        );
        assert_eq!(app.campaigns.find(campaign.id).unwrap().current_amount, 0);
    }

    #[tokio::test]
    async fn test_bad_signature_and_unknown_order_change_nothing() {
        let app = app();
        let (owner, _) = app.user("owner@example.com").await;
        let campaign = app.campaign(&owner, 1_000_000).await;
        let transaction = CreateTransactionUseCase::new(
            app.transactions.clone(),
            app.campaigns.clone(),
            app.gateway.clone(),
        )
        .execute(
            &owner,
            CreateTransactionInput {
                campaign_id: campaign.id,
                amount: 50_000,
            },
        )
        .await
        .unwrap();
        let handle = HandleNotificationUseCase::new(app.transactions.clone(), app.config.clone());

        let mut forged = signed(&transaction.code, "settlement", None);
        forged.gross_amount = "99999999.00".into();
        let err = handle.execute(forged).await.unwrap_err();
        assert!(matches!(err, FundingError::InvalidSignature));

        let err = handle
            .execute(signed("ORDER-UNKNOWN", "settlement", None))
            .await
            .unwrap_err();
        assert!(matches!(err, FundingError::TransactionNotFound));

        assert_eq!(
            app.transactions.find(&transaction.code).unwrap().status,
            PaymentStatus::Pending
        );
        assert_eq!(app.campaigns.find(campaign.id).unwrap().current_amount, 0);
    }

    #[tokio::test]
    async fn test_signed_notification_with_other_amount_changes_nothing() {
        let app = app();
        let (owner, _) = app.user("owner@example.com").await;
        let campaign = app.campaign(&owner, 1_000_000).await;
        let transaction = CreateTransactionUseCase::new(
            app.transactions.clone(),
            app.campaigns.clone(),
            app.gateway.clone(),
        )
        .execute(
            &owner,
            CreateTransactionInput {
                campaign_id: campaign.id,
                amount: 50_000,
            },
        )
        .await
        .unwrap();
        let handle = HandleNotificationUseCase::new(app.transactions.clone(), app.config.clone());

        let mut underpaid = signed(&transaction.code, "settlement", None);
        underpaid.gross_amount = "10000.00".into();
        underpaid.signature_key =
            notification_signature(&transaction.code, "200", "10000.00", SERVER_KEY);
        let err = handle.execute(underpaid).await.unwrap_err();
        assert!(matches!(err, FundingError::AmountMismatch));
        assert_eq!(err.status_code(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(
            app.transactions.find(&transaction.code).unwrap().status,
            PaymentStatus::Pending
        );
        assert_eq!(app.campaigns.find(campaign.id).unwrap().current_amount, 0);

        let outcome = handle
            .execute(signed(&transaction.code, "settlement", None))
            .await
            .unwrap();
        assert!(matches!(outcome, NotificationOutcome::Applied(_)));
        assert_eq!(app.campaigns.find(campaign.id).unwrap().current_amount, 50_000);
    }

    #[tokio::test]
    async fn test_campaign_listing_is_owner_only() {
        let app = app();
        let (owner, _) = app.user("owner@example.com").await;
        let (other, _) = app.user("other@example.com").await;
        let campaign = app.campaign(&owner, 1_000_000).await;
        let list = ListTransactionsUseCase::new(
            app.transactions.clone(),
            app.campaigns.clone(),
            app.users.clone(),
        );

        let err = list
            .by_campaign(Actor::User(other.id), campaign.id)
            .await
            .unwrap_err();
        assert!(matches!(err, FundingError::NotOwner));

        assert!(list.by_campaign(Actor::User(owner.id), campaign.id).await.unwrap().is_empty());
        assert!(list.by_campaign(Actor::Admin, campaign.id).await.is_ok());
    }
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::support::{FakeGateway, app, app_with, json_request, notification, send};
    use crate::domain::value_object::payment_status::PaymentStatus;

    #[tokio::test]
    async fn test_create_requires_bearer() {
        let app = app();
        let (status, body) = send(
            &app.router,
            json_request("POST", "/transactions", None, json!({"campaign_id": 1, "amount": 10})),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["meta"]["status"], "error");
        assert!(app.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_pledge_then_paid_notification() {
        let app = app();
        let (owner, owner_token) = app.user("owner@example.com").await;
        let (_, payer_token) = app.user("payer@example.com").await;
        let campaign = app.campaign(&owner, 1_000_000).await;

        let (status, body) = send(
            &app.router,
            json_request(
                "POST",
                "/transactions",
                Some(&payer_token),
                json!({"campaign_id": campaign.id.get(), "amount": 25000}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["message"], "Success to create transaction");
        assert_eq!(body["data"]["status"], "pending");
        let code = body["data"]["code"].as_str().unwrap().to_string();
        assert!(body["data"]["payment_url"].as_str().unwrap().contains(&code));

        for _ in 0..2 {
            let (status, body) = send(
                &app.router,
                json_request(
                    "POST",
                    "/transactions/notification",
                    None,
                    notification(&code, "settlement", "25000.00"),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"]["order_id"], code.as_str());
        }

        let campaign = app.campaigns.find(campaign.id).unwrap();
        assert_eq!(campaign.current_amount, 25_000);
        assert_eq!(campaign.backer_count, 1);

        let (status, body) = send(
            &app.router,
            json_request("GET", "/transactions", Some(&payer_token), json!(null)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["status"], "paid");
        assert_eq!(body["data"][0]["campaign"]["name"], campaign.name.as_str());

        let (status, body) = send(
            &app.router,
            json_request(
                "GET",
                &format!("/campaigns/{}/transactions", campaign.id),
                Some(&owner_token),
                json!(null),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], "Sari");
        assert_eq!(body["data"][0]["amount"], 25000);
    }

    #[tokio::test]
    async fn test_campaign_transactions_forbidden_for_non_owner() {
        let app = app();
        let (owner, _) = app.user("owner@example.com").await;
        let (_, other_token) = app.user("other@example.com").await;
        let campaign = app.campaign(&owner, 1_000).await;

        let (status, _) = send(
            &app.router,
            json_request(
                "GET",
                &format!("/campaigns/{}/transactions", campaign.id),
                Some(&other_token),
                json!(null),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_notification_rejections() {
        let app = app();
        let (owner, token) = app.user("owner@example.com").await;
        let campaign = app.campaign(&owner, 1_000_000).await;
        let (_, body) = send(
            &app.router,
            json_request(
                "POST",
                "/transactions",
                Some(&token),
                json!({"campaign_id": campaign.id.get(), "amount": 500}),
            ),
        )
        .await;
        let code = body["data"]["code"].as_str().unwrap().to_string();

        let mut forged = notification(&code, "settlement", "500.00");
        forged["signature_key"] = json!("00");
        let (status, _) = send(
            &app.router,
            json_request("POST", "/transactions/notification", None, forged),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app.router,
            json_request(
                "POST",
                "/transactions/notification",
                None,
                notification("ORDER-NOPE", "settlement", "500.00"),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["meta"]["code"], 404);

        assert_eq!(app.transactions.find(&code).unwrap().status, PaymentStatus::Pending);
        assert_eq!(app.campaigns.find(campaign.id).unwrap().current_amount, 0);
    }

    #[tokio::test]
    async fn test_gateway_outage_is_bad_gateway() {
        let app = app_with(FakeGateway::failing());
        let (owner, token) = app.user("owner@example.com").await;
        let campaign = app.campaign(&owner, 1_000_000).await;

        let (status, body) = send(
            &app.router,
            json_request(
                "POST",
                "/transactions",
                Some(&token),
                json!({"campaign_id": campaign.id.get(), "amount": 500}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["meta"]["message"], "Bad Gateway");
        assert_eq!(app.transactions.len(), 1);
    }

    #[tokio::test]
    async fn test_create_without_campaign_id_is_unprocessable() {
        let app = app();
        let (_, token) = app.user("payer@example.com").await;

        let (status, body) = send(
            &app.router,
            json_request("POST", "/transactions", Some(&token), json!({"amount": 500})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["meta"]["status"], "error");
        assert!(!body["data"]["errors"].as_array().unwrap().is_empty());
        assert!(app.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_campaign_is_not_found() {
        let app = app();
        let (_, token) = app.user("payer@example.com").await;

        let (status, _) = send(
            &app.router,
            json_request(
                "POST",
                "/transactions",
                Some(&token),
                json!({"campaign_id": 404, "amount": 500}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
