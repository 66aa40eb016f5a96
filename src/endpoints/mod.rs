//! Endpoint groups, one module per resource family. Each is a thin
//! borrow of the client session; all calls route through the shared
//! request pipeline.

pub mod blocks;
pub mod direct_messages;
pub mod followers;
pub mod help;
pub mod media;
pub mod mutes;

pub use blocks::{BlockOptions, BlockedIdsRequest, BlockedListRequest, Blocks};
pub use direct_messages::{DirectMessages, DirectMessagesRequest, SentDirectMessagesRequest};
pub use followers::{FollowerIdsRequest, Followers, FollowersRequest};
pub use help::Help;
pub use media::{Media, MediaUpload};
pub use mutes::{MutedUsersRequest, Mutes};
