//! Domain entity definitions.

mod asset;
mod event;
mod image_reference;
mod replacement;
mod subject;
mod token;

pub use asset::{
    ASSET_ROOT, AssetPath, MAX_BASENAME_LEN, TARGET_EXTENSION, sanitize_filename, url_basename,
};
pub use event::{CommentPayload, Event, IssuePayload, RepositoryPayload};
pub use image_reference::ImageReference;
pub use replacement::ReplacementMap;
pub use subject::{RepoIdentity, Subject, SubjectContext, SubjectKind};
pub use token::GitHubToken;
