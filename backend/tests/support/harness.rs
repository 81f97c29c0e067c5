//! Server harness and shared world for the HTTP behaviour suites.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The server runs the real services over
//! the in-memory store. The `WorldFixture` stops the server even if a test
//! panics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::{App, HttpServer, web};
use awc::Client;
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use feedback_backend::Trace;
use feedback_backend::domain::TRACE_ID_HEADER;
use feedback_backend::inbound::http::api_scope;
use feedback_backend::inbound::http::health::{HealthState, live, ready};
use feedback_backend::inbound::http::state::{HttpState, StateDependencies};
use feedback_backend::outbound::memory::InMemoryStore;
use feedback_backend::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};

pub(crate) const PASSWORD: &str = "correct horse battery";
const TOKEN_SECRET: &[u8] = b"behaviour-suite-secret-0123456789abcdef";

/// Last HTTP exchange observed by a step.
#[derive(Debug, Clone)]
pub(crate) struct Exchange {
    pub(crate) status: u16,
    pub(crate) trace_id: Option<String>,
    pub(crate) body: Value,
}

pub(crate) struct FeedbackWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    /// Bearer tokens keyed by the alias used in step text.
    pub(crate) tokens: HashMap<String, String>,
    /// User ids keyed by alias.
    pub(crate) user_ids: HashMap<String, i64>,
    pub(crate) last_feedback_id: Option<i64>,
    pub(crate) last: Option<Exchange>,
}

impl FeedbackWorld {
    pub(crate) fn token(&self, alias: &str) -> String {
        self.tokens
            .get(alias)
            .cloned()
            .unwrap_or_else(|| panic!("no token for {alias}"))
    }

    pub(crate) fn user_id(&self, alias: &str) -> i64 {
        *self
            .user_ids
            .get(alias)
            .unwrap_or_else(|| panic!("no user for {alias}"))
    }

    pub(crate) fn last(&self) -> &Exchange {
        self.last.as_ref().expect("a request was sent")
    }
}

pub(crate) type SharedWorld = Rc<RefCell<FeedbackWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

/// A request issued by a step.
pub(crate) struct RequestSpec<'a> {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) bearer: Option<String>,
    pub(crate) payload: Option<Value>,
    pub(crate) label: &'a str,
}

/// Send a request and return the exchange without recording it.
pub(crate) fn send(world: &SharedWorld, spec: RequestSpec<'_>) -> Exchange {
    let RequestSpec {
        method,
        path,
        bearer,
        payload,
        label,
    } = spec;
    with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}{path}"));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect(label),
            None => request.send().await.expect(label),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.body().await.expect(label);
        Exchange {
            status,
            trace_id,
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        }
    })
}

/// Send a request and remember it as the latest exchange.
pub(crate) fn perform(world: &SharedWorld, spec: RequestSpec<'_>) -> Exchange {
    let exchange = send(world, spec);
    world.borrow_mut().last = Some(exchange.clone());
    exchange
}

/// Register `email` with `role` and store its id and bearer token under `alias`.
pub(crate) fn register_and_login(world: &SharedWorld, alias: &str, email: &str, role: &str) {
    let registered = send(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/register".to_owned(),
            bearer: None,
            payload: Some(json!({"email": email, "password": PASSWORD, "role": role})),
            label: "register request",
        },
    );
    assert_eq!(registered.status, 201, "registration failed: {:?}", registered.body);
    let id = registered.body["id"].as_i64().expect("user id");

    let login = send(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/login".to_owned(),
            bearer: None,
            payload: Some(json!({"email": email, "password": PASSWORD})),
            label: "login request",
        },
    );
    assert_eq!(login.status, 200, "login failed: {:?}", login.body);
    let token = login.body["accessToken"]
        .as_str()
        .expect("access token")
        .to_owned();

    let mut ctx = world.borrow_mut();
    ctx.user_ids.insert(alias.to_owned(), id);
    ctx.tokens.insert(alias.to_owned(), token);
}

fn http_state() -> HttpState {
    let store = Arc::new(InMemoryStore::default());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    HttpState::from_dependencies(StateDependencies {
        users: store.clone(),
        feedbacks: store.clone(),
        requests: store,
        hasher: Arc::new(Argon2PasswordHasher),
        tokens: Arc::new(JwtTokenCodec::new(
            TOKEN_SECRET,
            chrono::Duration::minutes(30),
            clock.clone(),
        )),
        clock,
    })
}

async fn spawn_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);
    let health = web::Data::new(HealthState::new());
    health.mark_ready();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .app_data(health.clone())
            .wrap(Trace)
            .service(api_scope())
            .service(ready)
            .service(live)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_server(http_state()).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(FeedbackWorld {
        runtime,
        local,
        base_url,
        server,
        tokens: HashMap::new(),
        user_ids: HashMap::new(),
        last_feedback_id: None,
        last: None,
    }));

    WorldFixture { world }
}
