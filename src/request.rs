use crate::error::Result;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, REFERER},
    Client, Proxy,
};

/// CAS portal endpoints. Overridable so tests can point the handshake at a
/// stub server; production values are the defaults.
#[derive(Debug, Clone)]
pub struct CasEndpoints {
    pub login: String,
    pub need_captcha: String,
    pub captcha_image: String,
}

impl CasEndpoints {
    pub fn with_base(base: &str) -> Self {
        Self {
            login: format!("{base}/authserver/login"),
            need_captcha: format!("{base}/authserver/needCaptcha.html"),
            captcha_image: format!("{base}/authserver/captcha.html"),
        }
    }
}

impl Default for CasEndpoints {
    fn default() -> Self {
        Self::with_base("http://ids.xidian.edu.cn")
    }
}

/// i 西电 backend endpoints.
#[derive(Debug, Clone)]
pub struct AppEndpoints {
    pub login: String,
}

impl AppEndpoints {
    pub fn with_base(base: &str) -> Self {
        Self {
            login: format!("{base}/baseCampus/login/login.do"),
        }
    }
}

impl Default for AppEndpoints {
    fn default() -> Self {
        Self::with_base("http://202.117.121.7:8080")
    }
}

pub fn create_cas_client(proxy: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert("Connection", HeaderValue::from_static("keep-alive"));

    let mut builder = Client::builder()
        .user_agent("okhttp/9.9.9")
        .default_headers(headers)
        .cookie_store(true);
    if let Some(addr) = proxy {
        builder = builder.proxy(Proxy::all(addr)?);
    }
    builder.build().map_err(Into::into)
}

pub fn create_app_client(token: &str) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(REFERER, HeaderValue::from_static("http://wx.xidian.edu.cn/wx_xdu/"));
    headers.insert(
        reqwest::header::ORIGIN,
        HeaderValue::from_static("http://wx.xidian.edu.cn"),
    );
    headers.insert("Connection", HeaderValue::from_static("keep-alive"));
    // 登录请求用空 token 占位，登录成功后换成真正的会话 token
    headers.insert(
        "token",
        HeaderValue::from_str(token)
            .map_err(|e| crate::error::ErrorKind::ParseError(e.to_string()))?,
    );

    Client::builder()
        .user_agent(
            "Mozilla/5.0 (Linux; Android 8.0; Pixel 2 Build/OPD3.170816.012) \
             AppleWebKit/537.36 (KHTML, like Gecko) Chrome/71.0.3578.98 Mobile Safari/537.36",
        )
        .default_headers(headers)
        .build()
        .map_err(Into::into)
}

pub async fn fetch_login_page(client: &Client, login_url: &str, service: &str) -> Result<String> {
    let resp = client
        .get(login_url)
        .query(&[("service", service)])
        .send()
        .await?;
    resp.text().await.map_err(Into::into)
}

pub async fn submit_credentials(
    client: &Client,
    login_url: &str,
    service: &str,
    referrer: &str,
    form: &[(&str, &str)],
) -> Result<String> {
    let resp = client
        .post(login_url)
        .query(&[("service", service)])
        .header(REFERER, referrer)
        .form(form)
        .send()
        .await?;
    resp.text().await.map_err(Into::into)
}

pub async fn check_captcha_required(
    client: &Client,
    url: &str,
    username: &str,
    timestamp: i64,
) -> Result<bool> {
    let timestamp = timestamp.to_string();
    let body = client
        .get(url)
        .query(&[("username", username), ("_", timestamp.as_str())])
        .send()
        .await?
        .text()
        .await?;
    Ok(body == "true")
}

pub async fn fetch_captcha_image(client: &Client, url: &str) -> Result<Vec<u8>> {
    let resp = client.get(url).send().await?;
    Ok(resp.bytes().await?.to_vec())
}

pub async fn send_app_login(client: &Client, url: &str, body: String) -> Result<String> {
    let resp = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await?;
    resp.text().await.map_err(Into::into)
}
