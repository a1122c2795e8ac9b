//! Profile sharing with clipboard fallback
//!
//! Native share is tried first; when it is missing or fails, the link goes
//! to the clipboard. Only a clipboard failure is surfaced, as a destructive
//! toast through the same presenter the scheduler uses.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, VoxaError};
use crate::presenter::{Toast, ToastPresenter};

pub const DEFAULT_BASE_URL: &str = "https://voxa.app";

const QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Whose profile is shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    User,
    Politician,
}

impl ProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::User => "user",
            ProfileKind::Politician => "politician",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = VoxaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "user" => Ok(ProfileKind::User),
            "politician" => Ok(ProfileKind::Politician),
            _ => Err(VoxaError::UnknownProfileKind {
                kind: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Twitter,
    Facebook,
    Whatsapp,
}

/// Payload handed to a native share sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// A shareable profile page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLink {
    pub kind: ProfileKind,
    pub id: String,
    pub name: String,
    url: Url,
}

impl ProfileLink {
    /// `{base_url}/profile/{kind}/{id}`
    pub fn new(
        kind: ProfileKind,
        id: impl Into<String>,
        name: impl Into<String>,
        base_url: &str,
    ) -> Result<Self> {
        let id = id.into();
        let mut url = Url::parse(base_url)?;
        url.path_segments_mut()
            .map_err(|_| VoxaError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["profile", kind.as_str(), id.as_str()]);

        Ok(Self {
            kind,
            id,
            name: name.into(),
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn share_text(&self) -> String {
        let subject = match self.kind {
            ProfileKind::Politician => "político",
            ProfileKind::User => "do usuário",
        };
        format!(
            "Confira o perfil {} de {} na plataforma Voxa",
            subject, self.name
        )
    }

    pub fn payload(&self) -> SharePayload {
        SharePayload {
            title: format!("Perfil de {} - Voxa", self.name),
            text: self.share_text(),
            url: self.url.to_string(),
        }
    }

    /// Intent URL for a social network
    pub fn social_url(&self, platform: SharePlatform) -> Url {
        let link = self.url.as_str();
        let text = self.share_text();
        // Base URLs are constants, parsing cannot fail.
        let (base, params): (&str, Vec<(&str, String)>) = match platform {
            SharePlatform::Twitter => (
                "https://twitter.com/intent/tweet",
                vec![("text", text), ("url", link.to_string())],
            ),
            SharePlatform::Facebook => (
                "https://www.facebook.com/sharer/sharer.php",
                vec![("u", link.to_string())],
            ),
            SharePlatform::Whatsapp => (
                "https://wa.me/",
                vec![("text", format!("{} {}", text, link))],
            ),
        };
        let mut url = Url::parse(base).unwrap_or_else(|_| self.url.clone());
        url.query_pairs_mut().extend_pairs(params);
        url
    }

    /// QR code image for the profile link
    pub fn qr_code_url(&self) -> Url {
        let mut url = Url::parse(QR_SERVICE).unwrap_or_else(|_| self.url.clone());
        url.query_pairs_mut()
            .append_pair("size", "200x200")
            .append_pair("data", self.url.as_str());
        url
    }
}

// ═══════════════════════════════════════════════════════════════
// Platform capabilities
// ═══════════════════════════════════════════════════════════════

pub trait Clipboard {
    fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

pub trait NativeShare {
    fn share(&self, payload: &SharePayload) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Native share sheet accepted the payload
    Shared,
    /// Link copied to the clipboard
    Copied,
    /// Clipboard failed, error toast shown
    Failed,
}

/// Copy `url` to the clipboard and report through `presenter`
pub fn copy_link(url: &str, clipboard: &dyn Clipboard, presenter: &dyn ToastPresenter) -> ShareOutcome {
    match clipboard.write_text(url) {
        Ok(()) => {
            debug!(url, "link copied");
            presenter.present(Toast::new(
                "Link copiado!",
                "O link do perfil foi copiado para a área de transferência.",
            ));
            ShareOutcome::Copied
        }
        Err(e) => {
            warn!(error = %e, "clipboard write failed");
            presenter.present(
                Toast::new(
                    "Erro ao copiar",
                    "Não foi possível copiar o link. Tente novamente.",
                )
                .destructive(),
            );
            ShareOutcome::Failed
        }
    }
}

/// Share via the native sheet, falling back to the clipboard
pub fn share_profile(
    link: &ProfileLink,
    native: Option<&dyn NativeShare>,
    clipboard: &dyn Clipboard,
    presenter: &dyn ToastPresenter,
) -> ShareOutcome {
    if let Some(native) = native {
        match native.share(&link.payload()) {
            Ok(()) => return ShareOutcome::Shared,
            Err(e) => debug!(error = %e, "native share failed, falling back to clipboard"),
        }
    }
    copy_link(link.url().as_str(), clipboard, presenter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{RecordingPresenter, ToastVariant};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct FakeClipboard {
        fail: bool,
        contents: Mutex<Option<String>>,
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&self, text: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("clipboard denied");
            }
            *self.contents.lock() = Some(text.to_string());
            Ok(())
        }
    }

    struct FakeShare {
        fail: bool,
        shared: Mutex<Vec<SharePayload>>,
    }

    impl NativeShare for FakeShare {
        fn share(&self, payload: &SharePayload) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("user cancelled");
            }
            self.shared.lock().push(payload.clone());
            Ok(())
        }
    }

    fn link() -> ProfileLink {
        ProfileLink::new(ProfileKind::Politician, "42", "Tabata Amaral", DEFAULT_BASE_URL).unwrap()
    }

    #[test]
    fn profile_url_layout() {
        assert_eq!(link().url().as_str(), "https://voxa.app/profile/politician/42");
        let with_slash =
            ProfileLink::new(ProfileKind::User, "7", "Ana", "https://example.org/app/").unwrap();
        assert_eq!(with_slash.url().as_str(), "https://example.org/app/profile/user/7");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ProfileLink::new(ProfileKind::User, "1", "Ana", "not a url").unwrap_err();
        assert!(matches!(err, VoxaError::InvalidUrl(_)));
    }

    #[test]
    fn share_text_depends_on_kind() {
        assert_eq!(
            link().share_text(),
            "Confira o perfil político de Tabata Amaral na plataforma Voxa"
        );
        let user = ProfileLink::new(ProfileKind::User, "7", "Ana", DEFAULT_BASE_URL).unwrap();
        assert!(user.share_text().contains("do usuário de Ana"));
    }

    #[test]
    fn social_urls_encode_link() {
        let twitter = link().social_url(SharePlatform::Twitter);
        assert_eq!(twitter.host_str(), Some("twitter.com"));
        let pairs: Vec<(String, String)> = twitter.query_pairs().into_owned().collect();
        assert_eq!(pairs[1].0, "url");
        assert_eq!(pairs[1].1, "https://voxa.app/profile/politician/42");

        let facebook = link().social_url(SharePlatform::Facebook);
        assert!(facebook.as_str().starts_with("https://www.facebook.com/sharer/sharer.php?u="));

        let whatsapp = link().social_url(SharePlatform::Whatsapp);
        let text = whatsapp.query_pairs().next().unwrap().1.into_owned();
        assert!(text.ends_with(" https://voxa.app/profile/politician/42"));
    }

    #[test]
    fn qr_code_url_carries_data() {
        let qr = link().qr_code_url();
        let data = qr
            .query_pairs()
            .find(|(k, _)| k == "data")
            .map(|(_, v)| v.into_owned());
        assert_eq!(data.as_deref(), Some("https://voxa.app/profile/politician/42"));
    }

    #[test]
    fn profile_kind_parsing() {
        assert_eq!("user".parse::<ProfileKind>().unwrap(), ProfileKind::User);
        assert!("party".parse::<ProfileKind>().is_err());
    }

    #[test]
    fn native_share_success_skips_clipboard() {
        let native = FakeShare {
            fail: false,
            shared: Mutex::new(Vec::new()),
        };
        let clipboard = FakeClipboard::default();
        let presenter = RecordingPresenter::new();

        let outcome = share_profile(&link(), Some(&native as &dyn NativeShare), &clipboard, &presenter);

        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(native.shared.lock()[0].title, "Perfil de Tabata Amaral - Voxa");
        assert!(clipboard.contents.lock().is_none());
        assert_eq!(presenter.count(), 0);
    }

    #[test]
    fn native_failure_falls_back_to_clipboard() {
        let native = FakeShare {
            fail: true,
            shared: Mutex::new(Vec::new()),
        };
        let clipboard = FakeClipboard::default();
        let presenter = RecordingPresenter::new();

        let outcome = share_profile(&link(), Some(&native as &dyn NativeShare), &clipboard, &presenter);

        assert_eq!(outcome, ShareOutcome::Copied);
        assert_eq!(
            clipboard.contents.lock().as_deref(),
            Some("https://voxa.app/profile/politician/42")
        );
        assert_eq!(presenter.last().unwrap().title, "Link copiado!");
    }

    #[test]
    fn missing_native_share_uses_clipboard() {
        let clipboard = FakeClipboard::default();
        let presenter = RecordingPresenter::new();
        let outcome = share_profile(&link(), None, &clipboard, &presenter);
        assert_eq!(outcome, ShareOutcome::Copied);
    }

    #[test]
    fn clipboard_failure_is_destructive_toast() {
        let clipboard = FakeClipboard {
            fail: true,
            ..Default::default()
        };
        let presenter = RecordingPresenter::new();

        let outcome = share_profile(&link(), None, &clipboard, &presenter);

        assert_eq!(outcome, ShareOutcome::Failed);
        let toast = presenter.last().unwrap();
        assert_eq!(toast.title, "Erro ao copiar");
        assert_eq!(toast.variant, ToastVariant::Destructive);
    }
}
