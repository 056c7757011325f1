//! Who is acting on a campaign

use kernel::id::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// A bearer-authenticated API user; may only touch own campaigns
    User(UserId),
    /// The admin panel; may touch any campaign
    Admin,
}

impl Actor {
    /// Whether this actor may modify a campaign owned by `owner`
    pub fn can_manage(&self, owner: UserId) -> bool {
        match self {
            Actor::User(id) => *id == owner,
            Actor::Admin => true,
        }
    }
}
