//! User profile demo service.
//!
//! `build.rs` turns `api.yaml` into the parameter structs, the `serve_http`
//! dispatchers and the endpoint wrappers included below. This file only holds
//! the business types and methods the generated code calls.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use apigen::runtime::{ApiError, RequestContext};
use serde::Serialize;

include!(concat!(env!("OUT_DIR"), "/api_gen.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub status: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserList {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtherUser {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub level: i64,
}

fn status_code(status: &str) -> i64 {
    match status {
        "admin" => 20,
        "moderator" => 10,
        _ => 0,
    }
}

/// In-memory user directory.
pub struct MyApi {
    next_id: Mutex<u64>,
    users: Mutex<HashMap<String, User>>,
}

impl Default for MyApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MyApi {
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "rvasily".to_string(),
            User {
                id: 42,
                login: "rvasily".to_string(),
                full_name: "Vasily Romanov".to_string(),
                status: status_code("admin"),
            },
        );
        MyApi {
            next_id: Mutex::new(43),
            users: Mutex::new(users),
        }
    }

    pub fn profile(&self, ctx: &RequestContext, params: ProfileParams) -> Result<User, ApiError> {
        if params.login == "bad_user" {
            return Err(ApiError::internal("bad user"));
        }
        tracing::debug!(request_id = %ctx.request_id, login = %params.login, "profile lookup");
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        users
            .get(&params.login)
            .cloned()
            .ok_or_else(|| ApiError::not_found("user not exist"))
    }

    pub fn create(&self, ctx: &RequestContext, params: CreateParams) -> anyhow::Result<NewUser> {
        if params.login == "bad_username" {
            anyhow::bail!("storage unavailable");
        }
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        if users.contains_key(&params.login) {
            return Err(ApiError::conflict(format!("user {} exist", params.login)).into());
        }
        let mut next_id = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
        let id = *next_id;
        *next_id += 1;
        tracing::info!(request_id = %ctx.request_id, login = %params.login, id, "user created");
        users.insert(
            params.login.clone(),
            User {
                id,
                login: params.login,
                full_name: params.name,
                status: status_code(&params.status),
            },
        );
        Ok(NewUser { id })
    }

    /// Users with the given role whose login starts with `prefix`, ordered by id.
    pub fn search(&self, _ctx: &RequestContext, params: SearchParams) -> Result<UserList, ApiError> {
        let status = status_code(&params.role);
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        let mut found: Vec<User> = users
            .values()
            .filter(|u| u.status == status && u.login.starts_with(&params.prefix))
            .cloned()
            .collect();
        found.sort_by_key(|u| u.id);
        found.truncate(usize::try_from(params.limit).unwrap_or_default());
        Ok(UserList { users: found })
    }

    /// Not routed; callable directly.
    pub fn audit(&self, ctx: &RequestContext, params: ProfileParams) -> Result<User, ApiError> {
        self.profile(ctx, params)
    }
}

/// Stateless service sharing the `/user/create` path with [`MyApi`].
#[derive(Debug, Default)]
pub struct OtherApi;

impl OtherApi {
    pub fn create(
        &self,
        _ctx: &RequestContext,
        params: OtherCreateParams,
    ) -> Result<OtherUser, ApiError> {
        Ok(OtherUser {
            id: 12,
            login: params.username,
            full_name: params.name,
            level: params.level,
        })
    }
}
