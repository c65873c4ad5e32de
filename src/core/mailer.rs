use crate::errors::AppResult;

/// Outbound mail collaborator. Returns whether the message was actually sent.
pub trait Mailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<bool>;
}

/// Mail disabled: the message is dumped to the log instead of being sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<bool> {
        log::info!("mail disabled, dumping message to={to} subject={subject:?}\n{body}");
        Ok(false)
    }
}

/// Build the link a user follows to redeem a reset secret.
pub fn reset_link(app_url: &str, raw_token: &str) -> String {
    format!(
        "{}/?action=reset-password&token={}",
        app_url.trim_end_matches('/'),
        raw_token
    )
}
