pub type Result<T> = core::result::Result<T, Error>;

pub struct Error {
    pub inner: Box<ErrorKind>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            inner: Box::new(kind),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.inner
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::new(ErrorKind::ReqwestError(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::new(ErrorKind::SerdeJsonError(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::new(ErrorKind::StdIoError(e))
    }
}

pub enum ErrorKind {
    /// 登录信息格式不正确（学号、回调地址或 Referer 标头）。
    FormatError(String),
    /// 密码不能为空。
    ArgumentError(String),
    /// 服务器确认学号或密码不正确。
    InvalidCredentialsError,
    /// 服务器返回了非成功的 msg，原文透传。
    ServerRejectedError(String),
    ParseError(String),
    ReqwestError(reqwest::Error),
    SerdeJsonError(serde_json::Error),
    StdIoError(std::io::Error),
}

impl std::fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ErrorKind::FormatError(ref e) => write!(f, "FormatError: {e:?}"),
            ErrorKind::ArgumentError(ref e) => write!(f, "ArgumentError: {e:?}"),
            ErrorKind::InvalidCredentialsError => write!(f, "InvalidCredentialsError"),
            ErrorKind::ServerRejectedError(ref e) => write!(f, "ServerRejectedError: {e:?}"),
            ErrorKind::ParseError(ref e) => write!(f, "ParseError: {e:?}"),
            ErrorKind::ReqwestError(ref e) => write!(f, "ReqwestError: {e:?}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "SerdeJsonError: {e:?}"),
            ErrorKind::StdIoError(ref e) => write!(f, "StdIoError: {e:?}"),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ErrorKind::FormatError(ref e) => write!(f, "{e}"),
            ErrorKind::ArgumentError(ref e) => write!(f, "{e}"),
            ErrorKind::InvalidCredentialsError => write!(f, "学号或密码不正确。"),
            ErrorKind::ServerRejectedError(ref e) => write!(f, "登录失败。{e}"),
            ErrorKind::ParseError(ref e) => write!(f, "登录失败。{e}"),
            ErrorKind::ReqwestError(ref e) => write!(f, "ReqwestError: {e}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "SerdeJsonError: {e}"),
            ErrorKind::StdIoError(ref e) => write!(f, "StdIoError: {e}"),
        }
    }
}
