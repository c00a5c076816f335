use xdu_cas_core::error::Result;
use xdu_cas_core::model::structs::CasLogin;
use xdu_cas_core::{AppLoginClient, CasLoginClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("用法: {} 学号 密码 app", args[0]);
        println!("      {} 学号 密码 cas <回调地址>", args[0]);
        return Ok(());
    }

    let id = args[1].clone();
    let password = args[2].clone();

    match args[3].as_str() {
        "app" => {
            let client = AppLoginClient::new(id, password);
            let session = client.login().await?;
            println!("登录成功");
            println!("userId: {}", session.user_id);
            println!("token: {}", session.token);
        }
        _ => {
            let redirect = args
                .get(4)
                .cloned()
                .unwrap_or_else(|| "http://ids.xidian.edu.cn/authserver/index.do".to_string());
            let client = CasLoginClient::new(id, password, redirect);

            let mut captcha = String::new();
            loop {
                let attempt = if captcha.is_empty() {
                    client.login(None, None).await?
                } else {
                    client.login(Some(&captcha), None).await?
                };
                match attempt {
                    CasLogin::Success(_session) => {
                        println!("登录成功");
                        break;
                    }
                    CasLogin::CaptchaRequired(_session, challenge) => {
                        std::fs::write("captcha.png", &challenge.image)?;
                        println!("请查看 captcha.png 并输入验证码:");
                        std::io::Write::flush(&mut std::io::stdout())?;
                        captcha.clear();
                        std::io::stdin().read_line(&mut captcha)?;
                        captcha = captcha.trim().to_string();
                    }
                }
            }
        }
    }

    Ok(())
}
