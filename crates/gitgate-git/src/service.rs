//! Identities of the smart HTTP pack-protocol services.

/// The two pack-protocol services exposed over smart HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitService {
    /// Fetch side (`git-upload-pack`).
    UploadPack,
    /// Push side (`git-receive-pack`).
    ReceivePack,
}

impl GitService {
    /// Parses the `service` query parameter of an advertisement request.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "git-upload-pack" => Some(Self::UploadPack),
            "git-receive-pack" => Some(Self::ReceivePack),
            _ => None,
        }
    }

    /// Protocol name, as advertised on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UploadPack => "git-upload-pack",
            Self::ReceivePack => "git-receive-pack",
        }
    }

    /// Subcommand passed to the git binary.
    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::UploadPack => "upload-pack",
            Self::ReceivePack => "receive-pack",
        }
    }

    /// Content type of the ref advertisement response.
    pub fn advertisement_content_type(&self) -> &'static str {
        match self {
            Self::UploadPack => "application/x-git-upload-pack-advertisement",
            Self::ReceivePack => "application/x-git-receive-pack-advertisement",
        }
    }

    /// Content type of the RPC result response.
    pub fn result_content_type(&self) -> &'static str {
        match self {
            Self::UploadPack => "application/x-git-upload-pack-result",
            Self::ReceivePack => "application/x-git-receive-pack-result",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(
            GitService::from_name("git-upload-pack"),
            Some(GitService::UploadPack)
        );
        assert_eq!(
            GitService::from_name("git-receive-pack"),
            Some(GitService::ReceivePack)
        );
        assert_eq!(GitService::from_name("git-annex"), None);
        assert_eq!(GitService::from_name(""), None);
        // Exact match only, no prefixes
        assert_eq!(GitService::from_name("git-upload-packs"), None);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(GitService::UploadPack.as_str(), "git-upload-pack");
        assert_eq!(GitService::UploadPack.subcommand(), "upload-pack");
        assert_eq!(GitService::ReceivePack.as_str(), "git-receive-pack");
        assert_eq!(GitService::ReceivePack.subcommand(), "receive-pack");
    }

    #[test]
    fn test_content_types() {
        assert_eq!(
            GitService::UploadPack.advertisement_content_type(),
            "application/x-git-upload-pack-advertisement"
        );
        assert_eq!(
            GitService::ReceivePack.result_content_type(),
            "application/x-git-receive-pack-result"
        );
    }
}
