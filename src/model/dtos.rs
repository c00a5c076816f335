use serde::Deserialize;

/// Login response of the i 西电 backend. Failure responses omit most
/// fields, so everything past `msg` is lenient.
#[derive(Debug, Clone, Deserialize)]
pub struct AppLoginResponse {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub token: Vec<String>,
    #[serde(default, rename = "userBaseInfo")]
    pub user_base_info: Option<UserBaseInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserBaseInfo {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(default, rename = "realName")]
    pub real_name: Option<String>,
}
