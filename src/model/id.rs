use bson::oid::ObjectId;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid object id")]
pub struct InvalidObjectId;

macro_rules! object_ids {
    {
        $( $( #[$Meta:meta] )* $Ident:ident, )*
    } => {$(
        $( #[$Meta] )*
        #[derive(Debug, serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(transparent)]
        pub struct $Ident(pub ObjectId);

        impl $Ident {
            /// Generates a new identifier. Identifiers generated later
            /// than the other are always greater.
            #[must_use]
            pub fn new() -> Self {
                Self(ObjectId::new())
            }
        }

        impl Default for $Ident {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<ObjectId> for $Ident {
            fn from(value: ObjectId) -> Self {
                Self(value)
            }
        }

        impl From<$Ident> for bson::Bson {
            fn from(value: $Ident) -> Self {
                bson::Bson::ObjectId(value.0)
            }
        }

        impl Display for $Ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0.to_hex())
            }
        }

        impl FromStr for $Ident {
            type Err = InvalidObjectId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                ObjectId::parse_str(s).map(Self).map_err(|_| InvalidObjectId)
            }
        }
    )*};
}

object_ids! {
    PostId,
    /// Unique within its post.
    CommentId,
    /// Unique within its comment.
    ReplyId,
}
