//! Author profile pages

use super::post::{Post, User, UserId};

/// Which list of a profile is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    /// Published posts by the profile owner
    #[default]
    Posts,
    /// Posts the signed-in user liked (own profile only)
    Liked,
    /// Unpublished drafts (own profile only)
    Drafts,
}

/// Everything fetched for one profile page
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    pub user: User,
    pub posts: Vec<Post>,
    pub liked: Vec<Post>,
    pub drafts: Vec<Post>,
    /// True when this is the signed-in user's own profile
    pub is_self: bool,
}

/// Which profile to show: the signed-in user or someone else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileTarget {
    Me,
    User(UserId),
}

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub target: Option<ProfileTarget>,
    pub data: Option<ProfileData>,
    pub tab: ProfileTab,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProfileState {
    /// Begin loading `target`, dropping whatever was shown
    pub fn open(&mut self, target: ProfileTarget) {
        self.target = Some(target);
        self.data = None;
        self.tab = ProfileTab::Posts;
        self.loading = true;
        self.error = None;
    }

    /// Posts of the active tab (empty while loading)
    pub fn tab_posts(&self) -> &[Post] {
        match &self.data {
            Some(data) => match self.tab {
                ProfileTab::Posts => &data.posts,
                ProfileTab::Liked => &data.liked,
                ProfileTab::Drafts => &data.drafts,
            },
            None => &[],
        }
    }

    /// Switch tab; Liked and Drafts only exist on the own profile
    pub fn select_tab(&mut self, tab: ProfileTab) -> bool {
        let allowed = match tab {
            ProfileTab::Posts => true,
            ProfileTab::Liked | ProfileTab::Drafts => {
                self.data.as_ref().is_some_and(|d| d.is_self)
            }
        };
        if allowed {
            self.tab = tab;
        }
        allowed
    }
}
