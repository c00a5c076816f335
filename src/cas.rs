//! 统一身份认证 (CAS) 登录握手。
//!
//! Fetches the login page, echoes the hidden form fields back with the
//! credentials, and distinguishes success, CAPTCHA-demand and rejection.

use crate::error::{ErrorKind, Result};
use crate::model::structs::{CaptchaChallenge, CasLogin, CasSession};
use crate::request::{self, CasEndpoints};
use crate::sign;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

/// 学号或密码不正确时响应中出现的标记。
const FAILURE_MARKER: &str = "有误";
/// 登录页要求验证码时响应中出现的提示。
const CAPTCHA_PROMPT_MARKER: &str = "请输入验证码";

static LT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<input type="hidden" name="lt" value="(.*?)"/>"#).unwrap()
});
static EXECUTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<input type="hidden" name="execution" value="(.*?)"/>"#).unwrap()
});
static EVENT_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<input type="hidden" name="_eventId" value="(.*?)"/>"#).unwrap()
});
// rmShown 的闭合与其它字段不同，是 "> 而不是 "/>
static RM_SHOWN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<input type="hidden" name="rmShown" value="(.*?)">"#).unwrap()
});

/// CAS 登录客户端。每次 `login` 调用构造一个全新的 HTTP 会话。
#[derive(Debug, Clone)]
pub struct CasLoginClient {
    pub id: String,
    pub password: String,
    /// 回调地址。接受原始 URI 或经过一次编码的 URI。
    pub redirect_uri: String,
    /// 登录请求使用的 Referer 标头。
    pub referrer: String,
    endpoints: CasEndpoints,
}

impl CasLoginClient {
    pub fn new(
        id: impl Into<String>,
        password: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
            redirect_uri: redirect_uri.into(),
            referrer: "http://ids.xidian.edu.cn".to_string(),
            endpoints: CasEndpoints::default(),
        }
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = referrer.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: CasEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Performs the CAS handshake and returns the authenticated session,
    /// or the session plus a CAPTCHA challenge when the server demands
    /// one; the caller then re-invokes with the solved text.
    pub async fn login(&self, captcha: Option<&str>, proxy: Option<&str>) -> Result<CasLogin> {
        validate_credentials(&self.id, &self.password)?;
        let service = urlencoding::decode(&self.redirect_uri)
            .map_err(|_| ErrorKind::FormatError("回调地址格式不正确。".to_string()))?
            .into_owned();
        if !check_uri(&service) {
            return Err(ErrorKind::FormatError("回调地址格式不正确。".to_string()).into());
        }
        if !check_uri(&self.referrer) {
            return Err(ErrorKind::FormatError("Referer 标头格式不正确。".to_string()).into());
        }

        let client = request::create_cas_client(proxy)?;

        let html = request::fetch_login_page(&client, &self.endpoints.login, &service).await?;
        let lt = extract_hidden_field(&LT_RE, &html);
        let execution = extract_hidden_field(&EXECUTION_RE, &html);
        let event_id = extract_hidden_field(&EVENT_ID_RE, &html);
        let rm_shown = extract_hidden_field(&RM_SHOWN_RE, &html);
        debug!(
            lt = %lt,
            execution_present = !execution.is_empty(),
            "fetched login page"
        );

        let mut form: Vec<(&str, &str)> = vec![
            ("username", self.id.as_str()),
            ("password", self.password.as_str()),
            ("submit", ""),
            ("lt", lt.as_str()),
            ("execution", execution.as_str()),
            ("_eventId", event_id.as_str()),
            ("rmShown", rm_shown.as_str()),
        ];
        if let Some(c) = captcha.filter(|c| !c.is_empty()) {
            form.push(("captchaResponse", c));
        }

        let body = request::submit_credentials(
            &client,
            &self.endpoints.login,
            &service,
            &self.referrer,
            &form,
        )
        .await?;

        if body.contains(FAILURE_MARKER) {
            return Err(ErrorKind::InvalidCredentialsError.into());
        }

        let required = request::check_captcha_required(
            &client,
            &self.endpoints.need_captcha,
            &self.id,
            sign::timestamp_millis(),
        )
        .await?;
        if required || body.contains(CAPTCHA_PROMPT_MARKER) {
            debug!("server demands a captcha, fetching image");
            let image =
                request::fetch_captcha_image(&client, &self.endpoints.captcha_image).await?;
            return Ok(CasLogin::CaptchaRequired(
                CasSession { client },
                CaptchaChallenge { image },
            ));
        }

        debug!("cas login succeeded");
        Ok(CasLogin::Success(CasSession { client }))
    }
}

pub(crate) fn validate_credentials(id: &str, password: &str) -> Result<()> {
    if id.len() != 11 || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ErrorKind::FormatError("学号格式不正确。".to_string()).into());
    }
    if password.is_empty() {
        return Err(ErrorKind::ArgumentError("密码不能为空。".to_string()).into());
    }
    Ok(())
}

fn check_uri(uri: &str) -> bool {
    matches!(Url::parse(uri), Ok(u) if u.scheme() == "http" || u.scheme() == "https")
}

/// Extracts one hidden-input value; no match yields an empty string, the
/// server may legitimately omit a field.
fn extract_hidden_field(re: &Regex, html: &str) -> String {
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
