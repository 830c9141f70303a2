use crate::core::normalize::Recipient;
use crate::domain::model::OutreachMessage;
use crate::utils::validation::sanitize_html;
use url::form_urlencoded;

pub const SUBJECT: &str = "Free website audit — I can help";
pub const TRACKING_PATH: &str = "/api/track";

/// The fixed outreach email.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    public_app_url: String,
    sender_name: String,
}

impl MessageTemplate {
    pub fn new(public_app_url: impl Into<String>, sender_name: impl Into<String>) -> Self {
        let public_app_url: String = public_app_url.into();
        Self {
            public_app_url: public_app_url.trim_end_matches('/').to_string(),
            sender_name: sender_name.into(),
        }
    }

    /// `{public_app_url}/api/track?email=<address>`, the address
    /// form-urlencoded.
    pub fn tracking_pixel_url(&self, email: &str) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("email", email)
            .finish();
        format!("{}{}?{}", self.public_app_url, TRACKING_PATH, query)
    }

    pub fn render(&self, recipient: &Recipient) -> OutreachMessage {
        let name = sanitize_html(&recipient.name);
        let location = sanitize_html(&recipient.location);
        let sender = sanitize_html(&self.sender_name);
        let pixel = self.tracking_pixel_url(&recipient.email);
        let app_url = &self.public_app_url;

        let html = format!(
            r#"<p>Hello {name},</p>
<p>My name is {sender}, a web developer based near {location}.</p>
<p>I build modern, mobile-friendly websites that help local businesses get more customers.</p>
<p>If you'd like a free website audit, reply to this email or book a 15-min consult: <a href="{app_url}">{app_url}</a></p>
<p>If you'd prefer not to hear from me again, reply "UNSUBSCRIBE".</p>
<p>Best,<br/>{sender}<br/>Web Developer</p>
<img src="{pixel}" width="1" height="1" alt="" />
"#
        );

        OutreachMessage {
            to: recipient.email.clone(),
            subject: SUBJECT.to_string(),
            html,
        }
    }
}
