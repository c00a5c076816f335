use reqwest::Client;

// Common data structures shared by both login flows

/// Outcome of a CAS login attempt. A CAPTCHA demand is a state, not an
/// error: the session already carries the handshake cookies and the caller
/// is expected to re-invoke login with the solved CAPTCHA text.
#[derive(Debug)]
pub enum CasLogin {
    Success(CasSession),
    CaptchaRequired(CasSession, CaptchaChallenge),
}

/// Cookie-bearing HTTP session accumulated during the CAS handshake.
/// Owned by the caller once returned; the core never touches it again.
#[derive(Debug, Clone)]
pub struct CasSession {
    pub client: Client,
}

/// Raw CAPTCHA image bytes served by the CAS portal.
#[derive(Clone)]
pub struct CaptchaChallenge {
    pub image: Vec<u8>,
}

impl std::fmt::Debug for CaptchaChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "CaptchaChallenge({} bytes)", self.image.len())
    }
}

/// Authenticated i 西电 session: the client already carries the joined
/// session token in its `token` header.
#[derive(Debug, Clone)]
pub struct AppSession {
    pub client: Client,
    pub user_id: i64,
    pub token: String,
}
