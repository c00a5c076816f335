//! i 西电（移动端后端）登录。
//!
//! Wraps the credentials in the signed JSON envelope, posts them and
//! installs the joined session token on the returned client.

use crate::cas::validate_credentials;
use crate::error::{ErrorKind, Result};
use crate::model::dtos::AppLoginResponse;
use crate::model::structs::AppSession;
use crate::request::{self, AppEndpoints};
use crate::sign;
use serde_json::{Map, Value};
use tracing::debug;

/// 登录成功时服务器返回的 msg。
const SUCCESS_MSG: &str = "登录成功";
/// 学号或密码不正确时响应中出现的标记。
const FAILURE_MARKER: &str = "有误";

/// i 西电登录客户端。Uuid 在构造时生成一次，整个实例生命周期内复用。
#[derive(Debug, Clone)]
pub struct AppLoginClient {
    pub id: String,
    pub password: String,
    uuid: String,
    endpoints: AppEndpoints,
}

impl AppLoginClient {
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
            uuid: sign::get_uuid(),
            endpoints: AppEndpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: AppEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// 本实例所有请求使用的 Uuid。
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Posts the signed login envelope and returns the authenticated
    /// session exposing `user_id` and the installed `token` header.
    pub async fn login(&self) -> Result<AppSession> {
        validate_credentials(&self.id, &self.password)?;

        let client = request::create_app_client("")?;

        let mut param = Map::new();
        param.insert("userName".to_string(), Value::from(self.id.as_str()));
        param.insert("password".to_string(), Value::from(self.password.as_str()));
        param.insert("uuId".to_string(), Value::from(self.uuid.as_str()));
        param.insert("schoolId".to_string(), Value::from(sign::SCHOOL_ID));
        let envelope = sign::build_query(&param, false, false)?;

        let raw = request::send_app_login(&client, &self.endpoints.login, envelope).await?;

        if raw.contains(FAILURE_MARKER) {
            return Err(ErrorKind::InvalidCredentialsError.into());
        }
        let parsed: AppLoginResponse = serde_json::from_str(&raw)
            .map_err(|e| ErrorKind::ParseError(e.to_string()))?;
        if parsed.msg != SUCCESS_MSG {
            return Err(ErrorKind::ServerRejectedError(parsed.msg).into());
        }

        let user_id = parsed
            .user_base_info
            .as_ref()
            .map(|info| info.user_id)
            .ok_or_else(|| ErrorKind::ParseError("响应中缺少 userBaseInfo".to_string()))?;
        let token = match parsed.token.as_slice() {
            [first, second, ..] => format!("{first}_{second}"),
            _ => return Err(ErrorKind::ParseError("响应中缺少 token".to_string()).into()),
        };
        debug!(user_id, "app login succeeded");

        // 用真正的会话 token 替换登录时的空占位标头
        let client = request::create_app_client(&token)?;
        Ok(AppSession {
            client,
            user_id,
            token,
        })
    }
}
