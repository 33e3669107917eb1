//! Social share links and the platform URL opener.

use std::process::Command;

use reqwest::Url;

use super::error::ExportError;

/// Characters of the poem included in a tweet.
const TWEET_EXCERPT_CHARS: usize = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Twitter,
    WhatsApp,
    Facebook,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 3] = [
        ShareTarget::Twitter,
        ShareTarget::WhatsApp,
        ShareTarget::Facebook,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::Twitter => "X / Twitter",
            ShareTarget::WhatsApp => "WhatsApp",
            ShareTarget::Facebook => "Facebook",
        }
    }
}

/// Build the share URL for `target`. `app_url` is the link to the app.
pub fn share_url(
    target: ShareTarget,
    title: Option<&str>,
    poem: &str,
    app_url: &str,
) -> Result<Url, ExportError> {
    let title = title.map(str::trim).filter(|t| !t.is_empty());
    let result = match target {
        ShareTarget::Twitter => {
            let excerpt: String = poem.chars().take(TWEET_EXCERPT_CHARS).collect();
            let text = format!(
                "\"{}\" from PhotoPoet:\n\n{}...",
                title.unwrap_or("A new verse"),
                excerpt
            );
            Url::parse_with_params(
                "https://twitter.com/intent/tweet",
                &[("text", text.as_str()), ("url", app_url)],
            )
        }
        ShareTarget::WhatsApp => {
            let text = format!(
                "*{}*\n\n{}\n\nShared via PhotoPoet",
                title.unwrap_or("PhotoPoet Composition"),
                poem
            );
            Url::parse_with_params("https://wa.me/", &[("text", text.as_str())])
        }
        ShareTarget::Facebook => Url::parse_with_params(
            "https://www.facebook.com/sharer/sharer.php",
            &[("u", app_url)],
        ),
    };
    result.map_err(|e| ExportError::Url(e.to_string()))
}

/// Open `url` with the desktop's default handler.
pub fn open_url(url: &str) -> Result<(), ExportError> {
    let mut command = opener_command(url);
    let status = command.status().map_err(|e| ExportError::Open {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if status.success() {
        tracing::debug!(url, "Opened URL");
        Ok(())
    } else {
        Err(ExportError::Open {
            url: url.to_string(),
            reason: format!("opener exited with {}", status),
        })
    }
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn tweet_uses_default_title_and_truncates() {
        let poem = "x".repeat(300);
        let url = share_url(ShareTarget::Twitter, None, &poem, "https://app.example").unwrap();
        assert_eq!(url.host_str(), Some("twitter.com"));

        let text = param(&url, "text").unwrap();
        assert!(text.starts_with("\"A new verse\" from PhotoPoet:\n\n"));
        assert!(text.ends_with(&format!("{}...", "x".repeat(180))));
        assert!(!text.contains(&"x".repeat(181)));
        assert_eq!(param(&url, "url").as_deref(), Some("https://app.example"));
    }

    #[test]
    fn whatsapp_embeds_full_poem() {
        let url = share_url(ShareTarget::WhatsApp, Some("Dawn"), "a\nb & c", "unused").unwrap();
        assert_eq!(
            param(&url, "text").as_deref(),
            Some("*Dawn*\n\na\nb & c\n\nShared via PhotoPoet")
        );
    }

    #[test]
    fn facebook_shares_only_the_link() {
        let url = share_url(ShareTarget::Facebook, Some("Dawn"), "poem", "https://app.example")
            .unwrap();
        assert_eq!(url.path(), "/sharer/sharer.php");
        assert_eq!(param(&url, "u").as_deref(), Some("https://app.example"));
        assert_eq!(url.query_pairs().count(), 1);
    }
}
