use models::ApiVersion;

use std::fmt;

/// API methods this client consumes, with the version that introduced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    ListAuthorsOfPad,
    GetAuthorName,
    GetText,
    CreateDiffHtml,
    ListAllPads,
    GetLastEdited,
}

impl ApiMethod {
    /// Name used in the request path.
    pub const fn name(&self) -> &'static str {
        match self {
            ApiMethod::ListAuthorsOfPad => "listAuthorsOfPad",
            ApiMethod::GetAuthorName => "getAuthorName",
            ApiMethod::GetText => "getText",
            ApiMethod::CreateDiffHtml => "createDiffHTML",
            ApiMethod::ListAllPads => "listAllPads",
            ApiMethod::GetLastEdited => "getLastEdited",
        }
    }

    pub const fn min_version(&self) -> ApiVersion {
        match self {
            ApiMethod::ListAuthorsOfPad | ApiMethod::GetText | ApiMethod::GetLastEdited => {
                ApiVersion::new(1, 0, 0)
            }
            ApiMethod::GetAuthorName => ApiVersion::new(1, 1, 0),
            ApiMethod::ListAllPads => ApiVersion::new(1, 2, 1),
            ApiMethod::CreateDiffHtml => ApiVersion::new(1, 2, 7),
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
